use crate::types::snapshot_kind::SnapshotKind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to determine snapshot directory")]
    DirResolution(#[source] std::io::Error),

    #[error("Failed to create snapshot directory '{0}'")]
    DirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to encode {kind} snapshot")]
    Encode {
        kind: SnapshotKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write snapshot file '{0}'")]
    Write(PathBuf, #[source] std::io::Error),

    // The temp file was written but could not be moved over the target.
    #[error("Failed to replace snapshot file '{0}'")]
    Persist(PathBuf, #[source] std::io::Error),
}
