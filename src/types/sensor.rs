use serde::{Deserialize, Serialize};

/// A single pollutant-measuring instrument attached to a station.
///
/// The client only ever holds the sensors of the currently selected station,
/// so no back-reference to the owning station is stored.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sensor {
    /// Identifier, unique within the owning station.
    pub id: i64,
    /// Measured parameter, e.g. "pył zawieszony PM10".
    pub param_name: String,
}

impl Sensor {
    pub fn new(id: i64, param_name: impl Into<String>) -> Self {
        Self {
            id,
            param_name: param_name.into(),
        }
    }
}
