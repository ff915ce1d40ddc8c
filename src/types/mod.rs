pub mod measurement;
pub mod sensor;
pub mod snapshot_kind;
pub mod station;
