//! Defines the three independently persisted collections and the options a
//! chart window can be set to.

use std::fmt;

/// Identifies one of the three collections kept on disk.
///
/// Each kind is stored in its own file; a snapshot of one kind never affects
/// the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotKind {
    /// The full station list.
    Stations,
    /// The sensors of the last selected station.
    Sensors,
    /// The measurement series of the last selected sensor.
    Measurements,
}

impl SnapshotKind {
    pub const ALL: [SnapshotKind; 3] = [
        SnapshotKind::Stations,
        SnapshotKind::Sensors,
        SnapshotKind::Measurements,
    ];

    pub(crate) fn name(&self) -> &'static str {
        match self {
            SnapshotKind::Stations => "stations",
            SnapshotKind::Sensors => "sensors",
            SnapshotKind::Measurements => "measurements",
        }
    }

    pub(crate) fn file_name(&self) -> String {
        format!("{}.json", self.name())
    }
}

/// Allows formatting a `SnapshotKind` using its collection name.
///
/// # Examples
///
/// ```
/// use airquality::SnapshotKind;
///
/// assert_eq!(SnapshotKind::Stations.to_string(), "stations");
/// assert_eq!(format!("{}", SnapshotKind::Measurements), "measurements");
/// ```
impl fmt::Display for SnapshotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The trailing chart windows offered to the user.
///
/// [`crate::windowed`] accepts any day count; this enum only lists the
/// choices the interface presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeWindow {
    /// The last 24 hours.
    #[default]
    LastDay,
    /// The last 7 days.
    LastWeek,
    /// The last 30 days.
    LastMonth,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 3] = [
        TimeWindow::LastDay,
        TimeWindow::LastWeek,
        TimeWindow::LastMonth,
    ];

    pub fn days(&self) -> u32 {
        match self {
            TimeWindow::LastDay => 1,
            TimeWindow::LastWeek => 7,
            TimeWindow::LastMonth => 30,
        }
    }

    /// Label shown in the period selector.
    pub fn label(&self) -> &'static str {
        match self {
            TimeWindow::LastDay => "Ostatni dzień",
            TimeWindow::LastWeek => "Ostatni tydzień",
            TimeWindow::LastMonth => "Ostatni miesiąc",
        }
    }

    /// Maps a day count back to one of the offered windows.
    pub fn from_days(days: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.days() == days)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names_are_distinct() {
        let names: Vec<String> = SnapshotKind::ALL.iter().map(|k| k.file_name()).collect();
        assert_eq!(
            names,
            vec!["stations.json", "sensors.json", "measurements.json"]
        );
    }

    #[test]
    fn test_time_window_days() {
        assert_eq!(TimeWindow::default().days(), 1);
        assert_eq!(TimeWindow::from_days(7), Some(TimeWindow::LastWeek));
        assert_eq!(TimeWindow::from_days(30), Some(TimeWindow::LastMonth));
        assert_eq!(TimeWindow::from_days(14), None);
    }
}
