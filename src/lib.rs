mod analysis;
mod error;
mod input;
mod monitor;
mod remote;
mod session;
mod store;
mod types;
mod utils;

pub use error::AirQualityError;
pub use monitor::*;

pub use analysis::geo::distance_km;
pub use analysis::spatial::{filter_by_name, within_radius};
pub use analysis::statistics::{analyze, Analysis, Summary, Trend};
pub use analysis::window::{windowed, ChartPoint, ValueRange, WindowedSeries};

pub use input::{parse_radius, validate_address, validate_radius, InputError};

pub use remote::client::{AirQualitySource, GiosClient, DEFAULT_API_URL, DEFAULT_GEOCODE_URL};
pub use remote::error::RemoteError;

pub use session::{MonitorSession, RecoveryOutcome, SessionError, StationView};

pub use store::error::SnapshotError;
pub use store::snapshot_store::{Recovered, SnapshotRecord, SnapshotStore};

pub use types::measurement::{Measurement, MISSING_VALUE};
pub use types::sensor::Sensor;
pub use types::snapshot_kind::{SnapshotKind, TimeWindow};
pub use types::station::{LatLon, Station};
