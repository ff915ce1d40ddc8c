//! Defines the timestamped sensor reading and its "missing value" sentinel.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel stored in [`Measurement::value`] when the service reported no value.
///
/// Any negative value is treated as missing, not only this exact one.
pub const MISSING_VALUE: f64 = -1.0;

/// One timestamped value reported by a sensor.
///
/// A negative `value` marks a missing reading. Such entries keep their slot in
/// the series (ordering is preserved) but are excluded from statistics and charts.
///
/// Serialized as the snapshot record `{paramName, value, dateTime}` where
/// `dateTime` is ISO-8601 (`2025-04-10T12:00:00`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    /// Parameter code of the owning sensor, e.g. "PM10".
    pub param_name: String,
    /// Measured value, or a negative sentinel when missing.
    pub value: f64,
    /// Local time of the reading.
    pub date_time: NaiveDateTime,
}

impl Measurement {
    pub fn new(param_name: impl Into<String>, value: f64, date_time: NaiveDateTime) -> Self {
        Self {
            param_name: param_name.into(),
            value,
            date_time,
        }
    }

    /// Creates a measurement carrying the [`MISSING_VALUE`] sentinel.
    pub fn missing(param_name: impl Into<String>, date_time: NaiveDateTime) -> Self {
        Self::new(param_name, MISSING_VALUE, date_time)
    }

    /// `true` when the value is not the missing sentinel (`value >= 0`).
    pub fn is_valid(&self) -> bool {
        self.value >= 0.0
    }

    /// The value as an optional, `None` for missing readings.
    pub fn reading(&self) -> Option<f64> {
        self.is_valid().then_some(self.value)
    }
}

/// Formats a reading with six significant digits, trailing zeros removed, the
/// way values have always appeared in list lines and reports: `25`, `0.3`,
/// `12.3457`, `1.23457e+06`.
pub(crate) fn format_value(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{value}");
    }
    let sci = format!("{value:.5e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return format!("{value}");
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return format!("{value}");
    };

    if !(-5..6).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{}e{sign}{:02}", trim_zeros(mantissa), exp.abs());
    }
    let decimals = (5 - exp) as usize;
    trim_zeros(&format!("{value:.decimals$}")).to_string()
}

fn trim_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// List line shown for a measurement: `PM10: 25 (2025-04-10 12:00:00)`,
/// with "brak" in place of a missing value.
impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reading() {
            Some(value) => write!(
                f,
                "{}: {} ({})",
                self.param_name,
                format_value(value),
                self.date_time
            ),
            None => write!(f, "{}: brak ({})", self.param_name, self.date_time),
        }
    }
}
