//! This module provides the main entry point: a [`Monitor`] ties a remote data
//! source, the in-memory [`MonitorSession`] and the on-disk [`SnapshotStore`]
//! together.
//!
//! Every successful fetch replaces the matching collection in the session and is
//! then written to its snapshot. When a fetch fails, [`Monitor::recover`] can put
//! the last saved snapshots back in place.

use crate::analysis::statistics::Analysis;
use crate::analysis::window::WindowedSeries;
use crate::error::AirQualityError;
use crate::input::{validate_address, validate_radius};
use crate::remote::client::{AirQualitySource, GiosClient};
use crate::session::{MonitorSession, RecoveryOutcome};
use crate::store::snapshot_store::{SnapshotRecord, SnapshotStore};
use crate::types::station::Station;
use bon::bon;
use chrono::{Local, NaiveDateTime};
use log::{info, warn};
use std::path::PathBuf;

/// The air-quality client.
///
/// Create one with [`Monitor::new()`] for the GIOŚ service and the default
/// snapshot directory, [`Monitor::with_snapshot_dir()`] to keep snapshots
/// elsewhere, or [`Monitor::with_source()`] to fetch from another
/// [`AirQualitySource`].
///
/// # Examples
///
/// ```no_run
/// # use airquality::{Monitor, AirQualityError};
/// # async fn run() -> Result<(), AirQualityError> {
/// let mut monitor = Monitor::new()?;
/// match monitor.refresh_stations().await.map(|stations| stations.len()) {
///     Ok(count) => println!("{count} stations"),
///     Err(e) if e.is_remote() && monitor.has_snapshot() => {
///         let outcome = monitor.recover().await?;
///         println!("{}", outcome.message());
///     }
///     Err(e) => return Err(e),
/// }
/// # Ok(())
/// # }
/// ```
pub struct Monitor<S = GiosClient> {
    source: S,
    store: SnapshotStore,
    session: MonitorSession,
}

impl Monitor<GiosClient> {
    /// Creates a monitor for the GIOŚ service with snapshots in the platform
    /// data directory.
    ///
    /// # Errors
    ///
    /// Returns [`AirQualityError::Snapshot`] if the data directory cannot be resolved.
    pub fn new() -> Result<Self, AirQualityError> {
        let store = SnapshotStore::with_default_dir()?;
        Ok(Self::with_source(GiosClient::new(), store))
    }

    /// Creates a monitor for the GIOŚ service with snapshots kept in `dir`.
    /// The directory is created on the first save.
    pub fn with_snapshot_dir(dir: impl Into<PathBuf>) -> Self {
        Self::with_source(GiosClient::new(), SnapshotStore::new(dir))
    }
}

#[bon]
impl<S: AirQualitySource> Monitor<S> {
    pub fn with_source(source: S, store: SnapshotStore) -> Self {
        Self {
            source,
            store,
            session: MonitorSession::new(),
        }
    }

    pub fn session(&self) -> &MonitorSession {
        &self.session
    }

    /// Mutable access for view changes such as the name filter or the chart window.
    pub fn session_mut(&mut self) -> &mut MonitorSession {
        &mut self.session
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Fetches the full station list, makes it current and saves it.
    ///
    /// # Errors
    ///
    /// Returns [`AirQualityError::Remote`] if the fetch fails; the current list
    /// is left as it was. Returns [`AirQualityError::Snapshot`] if saving fails,
    /// in which case the fetched list is already current.
    pub async fn refresh_stations(&mut self) -> Result<&[Station], AirQualityError> {
        let stations = self.source.fetch_stations().await?;
        self.session.replace_stations(stations);
        self.persist(self.session.stations().to_vec()).await?;
        Ok(self.session.visible_stations())
    }

    /// Selects a station and loads its sensors.
    ///
    /// The previous sensors and measurements are dropped before the fetch starts,
    /// so a failed fetch leaves both lists empty.
    pub async fn select_station(&mut self, station_id: i64) -> Result<(), AirQualityError> {
        self.session.select_station(station_id);
        let sensors = self.source.fetch_sensors(station_id).await?;
        self.session.accept_sensors(station_id, sensors)?;
        self.persist(self.session.sensors().to_vec()).await
    }

    /// Selects a sensor and loads its measurements.
    pub async fn select_sensor(&mut self, sensor_id: i64) -> Result<(), AirQualityError> {
        self.session.select_sensor(sensor_id);
        let measurements = self.source.fetch_measurements(sensor_id).await?;
        self.session.accept_measurements(sensor_id, measurements)?;
        self.persist(self.session.measurements().to_vec()).await
    }

    /// Finds the stations within a radius of an address.
    ///
    /// The address is geocoded first. The result becomes the session's station view;
    /// it may be empty.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.address(&str)`: **Required.** Free-text address, e.g. "Polanka 3, Poznań".
    /// * `.radius_km(f64)`: **Required.** Search radius in kilometers, must be positive.
    ///
    /// # Errors
    ///
    /// Returns [`AirQualityError::Input`] for an empty address or a radius that is not
    /// a positive number, before any request is made. Returns [`AirQualityError::Remote`]
    /// if geocoding fails or finds nothing.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use airquality::{Monitor, AirQualityError};
    /// # async fn run(monitor: &mut Monitor) -> Result<(), AirQualityError> {
    /// let nearby = monitor
    ///     .stations_near()
    ///     .address("Polanka 3, Poznań")
    ///     .radius_km(10.0)
    ///     .call()
    ///     .await?;
    /// for station in nearby {
    ///     println!("{}", station.name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn stations_near(
        &mut self,
        address: &str,
        radius_km: f64,
    ) -> Result<Vec<Station>, AirQualityError> {
        let address = validate_address(address)?;
        let radius_km = validate_radius(radius_km)?;

        let center = self.source.geocode(address).await?;
        info!("Geocoded '{}' to ({}, {})", address, center.0, center.1);
        Ok(self.session.apply_radius_filter(center, radius_km).to_vec())
    }

    /// Writes all three current collections, as the "save" action does.
    pub async fn save_all(&self) -> Result<(), AirQualityError> {
        self.persist(self.session.stations().to_vec()).await?;
        self.persist(self.session.sensors().to_vec()).await?;
        self.persist(self.session.measurements().to_vec()).await
    }

    /// `true` if any snapshot is on disk, i.e. recovery is worth offering.
    pub fn has_snapshot(&self) -> bool {
        self.store.exists_any()
    }

    /// Replaces the current collections with whatever snapshots can be read.
    pub async fn recover(&mut self) -> Result<RecoveryOutcome, AirQualityError> {
        if !self.store.exists_any() {
            info!("No snapshot in {}", self.store.dir().display());
            return Ok(RecoveryOutcome::NothingSaved);
        }
        let store = self.store.clone();
        let recovered = tokio::task::spawn_blocking(move || store.load_all()).await?;
        let outcome = self.session.restore(recovered);
        if outcome == RecoveryOutcome::NothingReadable {
            warn!("Snapshots in {} hold no records", self.store.dir().display());
        }
        Ok(outcome)
    }

    /// Statistics over the current measurement series.
    pub fn analysis(&self) -> Analysis {
        self.session.analysis()
    }

    /// The current series cut to the session's window, ending now.
    pub fn chart(&self) -> WindowedSeries {
        self.chart_at(Local::now().naive_local())
    }

    pub fn chart_at(&self, now: NaiveDateTime) -> WindowedSeries {
        self.session.chart(now)
    }

    async fn persist<T>(&self, records: Vec<T>) -> Result<(), AirQualityError>
    where
        T: SnapshotRecord + Send + 'static,
    {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.save(&records)).await??;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::statistics::Trend;
    use crate::input::InputError;
    use crate::remote::error::RemoteError;
    use crate::types::measurement::Measurement;
    use crate::types::sensor::Sensor;
    use crate::types::snapshot_kind::{SnapshotKind, TimeWindow};
    use crate::types::station::LatLon;
    use chrono::{Duration, NaiveDate};

    // In-memory data source; `online == false` makes every call fail.
    struct FakeSource {
        online: bool,
        stations: Vec<Station>,
    }

    impl FakeSource {
        fn online() -> Self {
            Self {
                online: true,
                stations: vec![
                    Station::new(944, "Poznań, ul. Polanka", 52.4200, 16.9500),
                    Station::new(943, "Poznań, ul. Dąbrowskiego", 52.4201, 16.8770),
                    Station::new(114, "Wrocław, ul. Bartnicza", 51.1158, 17.1413),
                ],
            }
        }

        fn offline() -> Self {
            Self {
                online: false,
                stations: Vec::new(),
            }
        }

        fn check(&self) -> Result<(), RemoteError> {
            if self.online {
                Ok(())
            } else {
                // What a captive portal answering with an HTML page looks like.
                let garbage = serde_json::from_str::<Vec<Station>>("<html>")
                    .expect_err("html is not json");
                Err(RemoteError::JsonParse("http://offline.test/".to_string(), garbage))
            }
        }
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    impl AirQualitySource for FakeSource {
        async fn fetch_stations(&self) -> Result<Vec<Station>, RemoteError> {
            self.check()?;
            Ok(self.stations.clone())
        }

        async fn fetch_sensors(&self, station_id: i64) -> Result<Vec<Sensor>, RemoteError> {
            self.check()?;
            Ok(vec![
                Sensor::new(station_id * 10, "PM10"),
                Sensor::new(station_id * 10 + 1, "NO2"),
            ])
        }

        async fn fetch_measurements(
            &self,
            _sensor_id: i64,
        ) -> Result<Vec<Measurement>, RemoteError> {
            self.check()?;
            Ok(vec![
                Measurement::new("PM10", 25.0, noon() - Duration::hours(3)),
                Measurement::missing("PM10", noon() - Duration::hours(2)),
                Measurement::new("PM10", 30.0, noon() - Duration::hours(1)),
            ])
        }

        async fn geocode(&self, address: &str) -> Result<LatLon, RemoteError> {
            self.check()?;
            if address.contains("Poznań") {
                Ok(LatLon(52.4064, 16.9252))
            } else {
                Err(RemoteError::AddressNotFound(address.to_string()))
            }
        }
    }

    fn monitor(source: FakeSource, dir: &tempfile::TempDir) -> Monitor<FakeSource> {
        Monitor::with_source(source, SnapshotStore::new(dir.path()))
    }

    #[tokio::test]
    async fn test_fetches_are_saved() -> Result<(), AirQualityError> {
        let dir = tempfile::tempdir().unwrap();
        let mut monitor = monitor(FakeSource::online(), &dir);

        assert_eq!(monitor.refresh_stations().await?.len(), 3);
        monitor.select_station(944).await?;
        assert_eq!(monitor.session().sensors().len(), 2);
        monitor.select_sensor(9440).await?;

        for kind in SnapshotKind::ALL {
            assert!(monitor.store().exists(kind), "{kind} snapshot missing");
        }
        assert_eq!(monitor.store().load::<Station>().len(), 3);
        assert_eq!(monitor.store().load::<Measurement>().len(), 3);

        let summary = monitor.analysis().summary().cloned().unwrap();
        assert_eq!(summary.average, 27.5);
        assert_eq!(summary.trend, Trend::Rising);

        monitor.session_mut().set_window(TimeWindow::LastDay);
        assert_eq!(monitor.chart_at(noon()).points.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_recover_after_failed_fetch() -> Result<(), AirQualityError> {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut first_run = monitor(FakeSource::online(), &dir);
            first_run.refresh_stations().await?;
            first_run.select_station(114).await?;
        }

        let mut monitor = monitor(FakeSource::offline(), &dir);
        let err = monitor.refresh_stations().await.unwrap_err();
        assert!(err.is_remote());
        assert!(matches!(
            err,
            AirQualityError::Remote(RemoteError::JsonParse(..))
        ));
        assert!(monitor.session().stations().is_empty());

        assert!(monitor.has_snapshot());
        let outcome = monitor.recover().await?;
        assert_eq!(
            outcome,
            RecoveryOutcome::Restored {
                stations: 3,
                sensors: 2,
                measurements: 0
            }
        );
        assert_eq!(monitor.session().stations().len(), 3);
        assert_eq!(monitor.session().sensors()[0].id, 1140);
        assert_eq!(monitor.analysis(), Analysis::NoData);
        Ok(())
    }

    #[tokio::test]
    async fn test_recover_without_snapshot() -> Result<(), AirQualityError> {
        let dir = tempfile::tempdir().unwrap();
        let mut monitor = monitor(FakeSource::offline(), &dir);
        assert!(!monitor.has_snapshot());
        assert_eq!(monitor.recover().await?, RecoveryOutcome::NothingSaved);
        Ok(())
    }

    #[tokio::test]
    async fn test_stations_near_address() -> Result<(), AirQualityError> {
        let dir = tempfile::tempdir().unwrap();
        let mut monitor = monitor(FakeSource::online(), &dir);
        monitor.refresh_stations().await?;

        let nearby = monitor
            .stations_near()
            .address("  Polanka 3, Poznań ")
            .radius_km(10.0)
            .call()
            .await?;
        let ids: Vec<i64> = nearby.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![944, 943]);
        assert_eq!(monitor.session().visible_stations().len(), 2);

        let none = monitor
            .stations_near()
            .address("Poznań")
            .radius_km(0.5)
            .call()
            .await?;
        assert!(none.is_empty());
        assert!(monitor.session().view().is_filtered());
        Ok(())
    }

    #[tokio::test]
    async fn test_stations_near_rejects_bad_input() {
        let dir = tempfile::tempdir().unwrap();
        let mut monitor = monitor(FakeSource::online(), &dir);

        let err = monitor
            .stations_near()
            .address("   ")
            .radius_km(5.0)
            .call()
            .await
            .unwrap_err();
        assert!(matches!(err, AirQualityError::Input(InputError::EmptyAddress)));

        let err = monitor
            .stations_near()
            .address("Poznań")
            .radius_km(0.0)
            .call()
            .await
            .unwrap_err();
        assert!(matches!(err, AirQualityError::Input(InputError::InvalidRadius(_))));

        let err = monitor
            .stations_near()
            .address("Atlantis")
            .radius_km(5.0)
            .call()
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AirQualityError::Remote(RemoteError::AddressNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_save_all_writes_empty_collections_too() -> Result<(), AirQualityError> {
        let dir = tempfile::tempdir().unwrap();
        let mut monitor = monitor(FakeSource::online(), &dir);
        monitor.refresh_stations().await?;
        monitor.save_all().await?;

        assert!(monitor.store().exists(SnapshotKind::Sensors));
        assert!(monitor.store().load::<Sensor>().is_empty());
        Ok(())
    }
}
