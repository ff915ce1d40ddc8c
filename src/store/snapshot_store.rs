//! Persists the last fetched stations, sensors and measurements so they can be
//! reloaded when the data service is unreachable.
//!
//! Every collection kind lives in its own JSON file and is saved and loaded
//! independently. A save replaces the previous snapshot of that kind; there is
//! no history. Saves go through a temporary file in the same directory that is
//! renamed over the target, so readers never observe a half-written snapshot.
//!
//! Loading never fails: an absent, unreadable or corrupt file yields an empty
//! collection.

use crate::store::error::SnapshotError;
use crate::types::measurement::Measurement;
use crate::types::sensor::Sensor;
use crate::types::snapshot_kind::SnapshotKind;
use crate::types::station::Station;
use crate::utils::{ensure_dir_exists, get_snapshot_dir};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// A record type that is persisted as one snapshot kind.
pub trait SnapshotRecord: Serialize + DeserializeOwned {
    const KIND: SnapshotKind;
}

impl SnapshotRecord for Station {
    const KIND: SnapshotKind = SnapshotKind::Stations;
}

impl SnapshotRecord for Sensor {
    const KIND: SnapshotKind = SnapshotKind::Sensors;
}

impl SnapshotRecord for Measurement {
    const KIND: SnapshotKind = SnapshotKind::Measurements;
}

/// Everything that could be read back from disk. Missing kinds are empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recovered {
    pub stations: Vec<Station>,
    pub sensors: Vec<Sensor>,
    pub measurements: Vec<Measurement>,
}

impl Recovered {
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty() && self.sensors.is_empty() && self.measurements.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    /// Creates a store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Creates a store in `<data dir>/airquality_snapshots`.
    pub fn with_default_dir() -> Result<Self, SnapshotError> {
        get_snapshot_dir()
            .map(Self::new)
            .map_err(SnapshotError::DirResolution)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Location of the snapshot file for `kind`.
    pub fn path(&self, kind: SnapshotKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    /// Replaces the snapshot of `T::KIND` with `records`.
    pub fn save<T: SnapshotRecord>(&self, records: &[T]) -> Result<(), SnapshotError> {
        let kind = T::KIND;
        let target = self.path(kind);

        let json = serde_json::to_vec_pretty(records)
            .map_err(|source| SnapshotError::Encode { kind, source })?;

        ensure_dir_exists(&self.dir)
            .map_err(|e| SnapshotError::DirCreation(self.dir.clone(), e))?;

        let mut temp_file = NamedTempFile::new_in(&self.dir)
            .map_err(|e| SnapshotError::Write(target.clone(), e))?;
        temp_file
            .write_all(&json)
            .and_then(|_| temp_file.flush())
            .map_err(|e| SnapshotError::Write(target.clone(), e))?;
        temp_file
            .persist(&target)
            .map_err(|e| SnapshotError::Persist(target.clone(), e.error))?;

        info!(
            "Saved {} {} ({} bytes) to {}",
            records.len(),
            kind,
            json.len(),
            target.display()
        );
        Ok(())
    }

    /// Reads the snapshot of `T::KIND`, or an empty list if there is none or it
    /// cannot be read.
    pub fn load<T: SnapshotRecord>(&self) -> Vec<T> {
        let kind = T::KIND;
        let path = self.path(kind);

        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!("No {} snapshot at {}: {}", kind, path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_slice::<Vec<T>>(&bytes) {
            Ok(records) => {
                info!(
                    "Loaded {} {} from {}",
                    records.len(),
                    kind,
                    path.display()
                );
                records
            }
            Err(e) => {
                warn!("Ignoring unreadable {} snapshot {}: {}", kind, path.display(), e);
                Vec::new()
            }
        }
    }

    /// `true` if a snapshot file of `kind` is present (it may still be corrupt).
    pub fn exists(&self, kind: SnapshotKind) -> bool {
        self.path(kind).is_file()
    }

    /// `true` if any of the three snapshots is present.
    pub fn exists_any(&self) -> bool {
        SnapshotKind::ALL.iter().any(|kind| self.exists(*kind))
    }

    /// Loads all three kinds independently.
    pub fn load_all(&self) -> Recovered {
        Recovered {
            stations: self.load(),
            sensors: self.load(),
            measurements: self.load(),
        }
    }
}
