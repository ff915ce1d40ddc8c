//! Selects the part of a measurement series that falls inside a trailing time
//! window, for charting.

use crate::types::measurement::Measurement;
use chrono::{Duration, NaiveDateTime};

/// One plotted point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

impl ChartPoint {
    /// X coordinate for time axes that count milliseconds since the Unix epoch.
    pub fn epoch_millis(&self) -> i64 {
        self.timestamp.and_utc().timestamp_millis()
    }
}

/// Smallest and largest value among the plotted points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Y axis bounds with 10% headroom below and above the data.
    pub fn padded(&self) -> (f64, f64) {
        (self.min * 0.9, self.max * 1.1)
    }
}

/// Result of [`windowed`].
#[derive(Debug, Clone, PartialEq)]
pub struct WindowedSeries {
    /// Earliest timestamp still inside the window (inclusive).
    pub cutoff: NaiveDateTime,
    /// End of the window, normally "now".
    pub reference: NaiveDateTime,
    pub points: Vec<ChartPoint>,
    /// `None` when nothing falls inside the window.
    pub range: Option<ValueRange>,
}

impl WindowedSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Chart title: the parameter name, or a notice when the window is empty.
    pub fn title(&self, param_name: &str) -> String {
        if self.is_empty() {
            "Brak danych dla wybranego okresu".to_string()
        } else {
            format!("Wykres pomiarów: {param_name}")
        }
    }
}

/// Keeps the valid readings with `timestamp >= reference - window_days`,
/// in their original order.
///
/// Any day count is accepted; the interface only offers the values in
/// [`crate::TimeWindow`].
pub fn windowed(
    series: &[Measurement],
    window_days: u32,
    reference: NaiveDateTime,
) -> WindowedSeries {
    // A window reaching past the earliest representable time keeps everything.
    let cutoff = reference
        .checked_sub_signed(Duration::days(i64::from(window_days)))
        .unwrap_or(NaiveDateTime::MIN);

    let points: Vec<ChartPoint> = series
        .iter()
        .filter(|m| m.is_valid() && m.date_time >= cutoff)
        .map(|m| ChartPoint {
            timestamp: m.date_time,
            value: m.value,
        })
        .collect();

    let range = points.iter().fold(None, |acc: Option<ValueRange>, p| {
        Some(match acc {
            None => ValueRange {
                min: p.value,
                max: p.value,
            },
            Some(r) => ValueRange {
                min: r.min.min(p.value),
                max: r.max.max(p.value),
            },
        })
    });

    WindowedSeries {
        cutoff,
        reference,
        points,
        range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn hours_ago(h: i64, value: f64) -> Measurement {
        Measurement::new("NO2", value, now() - Duration::hours(h))
    }

    #[test]
    fn test_one_day_window_drops_old_and_missing() {
        let series = vec![
            hours_ago(30, 50.0),
            hours_ago(20, 12.0),
            hours_ago(10, -1.0),
            hours_ago(5, 18.0),
            hours_ago(1, 9.0),
        ];
        let w = windowed(&series, 1, now());

        let values: Vec<f64> = w.points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![12.0, 18.0, 9.0]);
        assert_eq!(w.cutoff, now() - Duration::days(1));
        assert_eq!(w.range, Some(ValueRange { min: 9.0, max: 18.0 }));
        assert_eq!(w.title("NO2"), "Wykres pomiarów: NO2");
    }

    #[test]
    fn test_cutoff_is_inclusive() {
        let series = vec![hours_ago(24, 7.0), hours_ago(25, 8.0)];
        let w = windowed(&series, 1, now());
        assert_eq!(w.points.len(), 1);
        assert_eq!(w.points[0].value, 7.0);
    }

    #[test]
    fn test_arbitrary_day_count() {
        let series = vec![hours_ago(24 * 13, 1.0), hours_ago(24 * 15, 2.0)];
        let w = windowed(&series, 14, now());
        assert_eq!(w.points.len(), 1);
    }

    #[test]
    fn test_oversized_window_keeps_everything() {
        let series = vec![hours_ago(24 * 365 * 50, 4.0), hours_ago(1, 6.0)];
        for days in [100_000_000, u32::MAX] {
            let w = windowed(&series, days, now());
            assert_eq!(w.cutoff, NaiveDateTime::MIN);
            assert_eq!(w.points.len(), 2);
            assert_eq!(w.range, Some(ValueRange { min: 4.0, max: 6.0 }));
        }
    }

    #[test]
    fn test_empty_window_has_no_range() {
        let series = vec![hours_ago(24 * 40, 3.0), hours_ago(2, -1.0)];
        let w = windowed(&series, 30, now());
        assert!(w.is_empty());
        assert_eq!(w.range, None);
        assert_eq!(w.title("NO2"), "Brak danych dla wybranego okresu");
    }

    #[test]
    fn test_padded_range_and_epoch_millis() {
        let r = ValueRange { min: 10.0, max: 20.0 };
        let (lo, hi) = r.padded();
        assert!((lo - 9.0).abs() < 1e-9);
        assert!((hi - 22.0).abs() < 1e-9);

        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 1)
            .unwrap();
        let p = ChartPoint {
            timestamp: epoch,
            value: 0.0,
        };
        assert_eq!(p.epoch_millis(), 1000);
    }
}
