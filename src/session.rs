//! Client-side state: the current stations, sensors and measurements, what is
//! selected, and which stations are on screen.
//!
//! The analysis functions are stateless and take collections as arguments; this
//! struct is where the integrating application keeps those collections between
//! calls. It enforces the invalidation rules: picking a station drops the
//! sensors and measurements, and picking a sensor drops the measurements.
//! Results that arrive for a selection that is no longer current are rejected.

use crate::analysis::spatial::{filter_by_name, within_radius};
use crate::analysis::statistics::{analyze, Analysis};
use crate::analysis::window::{windowed, WindowedSeries};
use crate::store::snapshot_store::Recovered;
use crate::types::measurement::Measurement;
use crate::types::sensor::Sensor;
use crate::types::snapshot_kind::TimeWindow;
use crate::types::station::{LatLon, Station};
use chrono::NaiveDateTime;
use log::{debug, info};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("Ignoring {kind} for {received}: current selection is {expected:?}")]
    StaleResult {
        kind: &'static str,
        expected: Option<i64>,
        received: i64,
    },
}

/// Which stations are shown.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum StationView {
    /// No filter applied: the full list.
    #[default]
    All,
    /// Stations whose name contains `query`.
    ByName { query: String, stations: Vec<Station> },
    /// Stations within `radius_km` of `center`. May be empty.
    WithinRadius {
        center: LatLon,
        radius_km: f64,
        stations: Vec<Station>,
    },
}

impl StationView {
    pub fn is_filtered(&self) -> bool {
        !matches!(self, StationView::All)
    }
}

/// What a snapshot recovery did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryOutcome {
    /// No snapshot file exists.
    NothingSaved,
    /// Files exist but none held any records.
    NothingReadable,
    /// Counts of the restored records; zero means that kind was left alone.
    Restored {
        stations: usize,
        sensors: usize,
        measurements: usize,
    },
}

impl RecoveryOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            RecoveryOutcome::NothingSaved => "Brak danych historycznych do wczytania.",
            RecoveryOutcome::NothingReadable => "Brak dostępnych danych historycznych.",
            RecoveryOutcome::Restored { .. } => "Wczytano dostępne dane historyczne.",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MonitorSession {
    stations: Vec<Station>,
    view: StationView,
    selected_station: Option<i64>,
    sensors: Vec<Sensor>,
    selected_sensor: Option<i64>,
    measurements: Vec<Measurement>,
    window: TimeWindow,
}

impl MonitorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    pub fn view(&self) -> &StationView {
        &self.view
    }

    /// The stations currently on screen: all of them, or the filtered subset.
    pub fn visible_stations(&self) -> &[Station] {
        match &self.view {
            StationView::All => &self.stations,
            StationView::ByName { stations, .. } | StationView::WithinRadius { stations, .. } => {
                stations
            }
        }
    }

    pub fn selected_station(&self) -> Option<i64> {
        self.selected_station
    }

    pub fn selected_sensor(&self) -> Option<i64> {
        self.selected_sensor
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    pub fn set_window(&mut self, window: TimeWindow) {
        self.window = window;
    }

    /// Replaces the station list and re-applies the active filter to it.
    pub fn replace_stations(&mut self, stations: Vec<Station>) {
        self.stations = stations;
        self.view = match std::mem::take(&mut self.view) {
            StationView::All => StationView::All,
            StationView::ByName { query, .. } => StationView::ByName {
                stations: filter_by_name(&self.stations, &query),
                query,
            },
            StationView::WithinRadius {
                center, radius_km, ..
            } => StationView::WithinRadius {
                center,
                radius_km,
                stations: within_radius(&self.stations, center, radius_km),
            },
        };
    }

    /// Shows only stations whose name contains `query`; an empty query
    /// removes the filter.
    pub fn apply_name_filter(&mut self, query: &str) {
        self.view = if query.is_empty() {
            StationView::All
        } else {
            StationView::ByName {
                query: query.to_string(),
                stations: filter_by_name(&self.stations, query),
            }
        };
    }

    /// Shows only stations within `radius_km` of `center` and returns them.
    pub fn apply_radius_filter(&mut self, center: LatLon, radius_km: f64) -> &[Station] {
        let stations = within_radius(&self.stations, center, radius_km);
        info!(
            "{} of {} stations within {} km of ({}, {})",
            stations.len(),
            self.stations.len(),
            radius_km,
            center.0,
            center.1
        );
        self.view = StationView::WithinRadius {
            center,
            radius_km,
            stations,
        };
        self.visible_stations()
    }

    pub fn clear_filter(&mut self) {
        self.view = StationView::All;
    }

    /// Makes `station_id` current and drops its predecessor's sensors and
    /// measurements.
    pub fn select_station(&mut self, station_id: i64) {
        debug!("Selected station {}", station_id);
        self.selected_station = Some(station_id);
        self.selected_sensor = None;
        self.sensors.clear();
        self.measurements.clear();
    }

    /// Accepts the sensors fetched for `station_id` if it is still selected.
    pub fn accept_sensors(
        &mut self,
        station_id: i64,
        sensors: Vec<Sensor>,
    ) -> Result<(), SessionError> {
        if self.selected_station != Some(station_id) {
            return Err(SessionError::StaleResult {
                kind: "sensors",
                expected: self.selected_station,
                received: station_id,
            });
        }
        self.sensors = sensors;
        self.selected_sensor = None;
        self.measurements.clear();
        Ok(())
    }

    /// Makes `sensor_id` current and drops the previous measurements.
    pub fn select_sensor(&mut self, sensor_id: i64) {
        debug!("Selected sensor {}", sensor_id);
        self.selected_sensor = Some(sensor_id);
        self.measurements.clear();
    }

    /// Accepts the series fetched for `sensor_id` if it is still selected.
    pub fn accept_measurements(
        &mut self,
        sensor_id: i64,
        measurements: Vec<Measurement>,
    ) -> Result<(), SessionError> {
        if self.selected_sensor != Some(sensor_id) {
            return Err(SessionError::StaleResult {
                kind: "measurements",
                expected: self.selected_sensor,
                received: sensor_id,
            });
        }
        self.measurements = measurements;
        Ok(())
    }

    /// Statistics over the full current series.
    pub fn analysis(&self) -> Analysis {
        analyze(&self.measurements)
    }

    /// The current series cut to the selected window, ending at `now`.
    pub fn chart(&self, now: NaiveDateTime) -> WindowedSeries {
        windowed(&self.measurements, self.window.days(), now)
    }

    /// Puts recovered snapshots in place of the current collections.
    ///
    /// Each non-empty kind replaces its counterpart; empty kinds leave the
    /// current data untouched. Selections are cleared because a snapshot does
    /// not record which station or sensor it belonged to.
    pub fn restore(&mut self, recovered: Recovered) -> RecoveryOutcome {
        if recovered.is_empty() {
            return RecoveryOutcome::NothingReadable;
        }
        let outcome = RecoveryOutcome::Restored {
            stations: recovered.stations.len(),
            sensors: recovered.sensors.len(),
            measurements: recovered.measurements.len(),
        };

        if !recovered.stations.is_empty() {
            self.stations = recovered.stations;
            self.view = StationView::All;
        }
        if !recovered.sensors.is_empty() {
            self.sensors = recovered.sensors;
        }
        if !recovered.measurements.is_empty() {
            self.measurements = recovered.measurements;
        }
        self.selected_station = None;
        self.selected_sensor = None;

        info!("Restored snapshot: {:?}", outcome);
        outcome
    }
}
