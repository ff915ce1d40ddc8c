//! Summary statistics over a measurement series: extremes with their
//! timestamps, the mean, and the direction of the least-squares trend.
//!
//! Missing readings (negative values) are skipped everywhere. The trend is fitted
//! against each valid reading's position *among valid readings*, so gaps do not
//! stretch the x axis.

use crate::types::measurement::{format_value, Measurement};
use chrono::NaiveDateTime;
use std::fmt;

/// Direction of the least-squares slope of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trend {
    Rising,
    Falling,
    /// Zero slope, or fewer than two valid readings.
    Stable,
}

impl Trend {
    fn from_slope(slope: f64) -> Self {
        if slope > 0.0 {
            Trend::Rising
        } else if slope < 0.0 {
            Trend::Falling
        } else {
            Trend::Stable
        }
    }

    /// Canonical label: "Rising", "Falling" or "Stable".
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Rising => "Rising",
            Trend::Falling => "Falling",
            Trend::Stable => "Stable",
        }
    }

    /// Label shown in the analysis report.
    pub fn label(&self) -> &'static str {
        match self {
            Trend::Rising => "Rosnący",
            Trend::Falling => "Malejący",
            Trend::Stable => "Stabilny",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Statistics of a non-empty series.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub min_value: f64,
    pub min_timestamp: NaiveDateTime,
    pub max_value: f64,
    pub max_timestamp: NaiveDateTime,
    /// Mean of the valid readings, `0.0` when there are none.
    pub average: f64,
    /// Number of readings that took part in the statistics.
    pub valid_count: usize,
    pub trend: Trend,
}

/// Outcome of [`analyze`].
#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    /// The series was empty.
    NoData,
    Summary(Summary),
}

impl Analysis {
    pub fn summary(&self) -> Option<&Summary> {
        match self {
            Analysis::NoData => None,
            Analysis::Summary(summary) => Some(summary),
        }
    }
}

/// Computes min/max, mean and trend over `series`.
///
/// Extremes are seeded with the first element, whatever its value, and then
/// replaced only by valid readings that are strictly smaller or larger. An
/// all-missing series therefore reports the first element's raw value as both
/// minimum and maximum. Ties keep the earliest occurrence.
///
/// # Examples
///
/// ```
/// use airquality::{analyze, Measurement, Trend};
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
/// let series = vec![
///     Measurement::new("PM10", 25.0, day.and_hms_opt(12, 0, 0).unwrap()),
///     Measurement::new("PM10", 30.0, day.and_hms_opt(13, 0, 0).unwrap()),
/// ];
/// let summary = analyze(&series).summary().cloned().unwrap();
/// assert_eq!(summary.average, 27.5);
/// assert_eq!(summary.trend, Trend::Rising);
/// ```
pub fn analyze(series: &[Measurement]) -> Analysis {
    let Some(first) = series.first() else {
        return Analysis::NoData;
    };

    let mut min_value = first.value;
    let mut max_value = first.value;
    let mut min_timestamp = first.date_time;
    let mut max_timestamp = first.date_time;
    let mut sum = 0.0;
    let mut valid_count = 0usize;

    for m in series.iter().filter(|m| m.is_valid()) {
        if m.value < min_value {
            min_value = m.value;
            min_timestamp = m.date_time;
        }
        if m.value > max_value {
            max_value = m.value;
            max_timestamp = m.date_time;
        }
        sum += m.value;
        valid_count += 1;
    }

    let average = if valid_count > 0 {
        sum / valid_count as f64
    } else {
        0.0
    };

    Analysis::Summary(Summary {
        min_value,
        min_timestamp,
        max_value,
        max_timestamp,
        average,
        valid_count,
        trend: Trend::from_slope(slope(series, valid_count)),
    })
}

/// Ordinary least-squares slope of valid values against their valid-only index.
fn slope(series: &[Measurement], valid_count: usize) -> f64 {
    if valid_count < 2 {
        return 0.0;
    }

    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    for (i, m) in series.iter().filter(|m| m.is_valid()).enumerate() {
        let x = i as f64;
        let y = m.value;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    let n = valid_count as f64;
    (n * sum_xy - sum_x * sum_y) / (n * sum_xx - sum_x * sum_x)
}

/// Renders the report shown under the chart.
///
/// ```text
/// Analiza danych:
/// Najmniejsza wartość: 25 (2025-04-10 12:00:00)
/// Największa wartość: 30 (2025-04-10 13:00:00)
/// Średnia wartość: 27.50
/// Trend: Rosnący
/// ```
impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = match self {
            Analysis::NoData => return write!(f, "Brak danych do analizy."),
            Analysis::Summary(summary) => summary,
        };
        writeln!(f, "Analiza danych:")?;
        writeln!(
            f,
            "Najmniejsza wartość: {} ({})",
            format_value(summary.min_value),
            summary.min_timestamp
        )?;
        writeln!(
            f,
            "Największa wartość: {} ({})",
            format_value(summary.max_value),
            summary.max_timestamp
        )?;
        writeln!(f, "Średnia wartość: {:.2}", summary.average)?;
        write!(f, "Trend: {}", summary.trend.label())
    }
}
