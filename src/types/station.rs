//! Defines the monitoring station record and the coordinate pair used to
//! describe a point on the map (a station location, or a geocoded address).

use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
/// Both values are decimal degrees.
///
/// # Examples
///
/// ```
/// use airquality::LatLon;
///
/// let poznan = LatLon(52.4064, 16.9252);
/// assert_eq!(poznan.0, 52.4064); // Latitude
/// assert_eq!(poznan.1, 16.9252); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// A fixed air-quality monitoring location.
///
/// Stations are immutable once fetched; the whole list is replaced on every
/// successful station fetch. The serialized form is the snapshot record
/// `{id, name, latitude, longitude}`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Station {
    /// Identifier assigned by the data service, unique across stations.
    pub id: i64,
    /// Display name, e.g. "Poznań, ul. Polanka".
    pub name: String,
    /// Latitude in decimal degrees (positive for North).
    pub latitude: f64,
    /// Longitude in decimal degrees (positive for East).
    pub longitude: f64,
}

impl Station {
    pub fn new(id: i64, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id,
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// The station position as a [`LatLon`].
    pub fn location(&self) -> LatLon {
        LatLon(self.latitude, self.longitude)
    }
}
