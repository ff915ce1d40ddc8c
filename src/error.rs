use crate::input::InputError;
use crate::remote::error::RemoteError;
use crate::session::SessionError;
use crate::store::error::SnapshotError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AirQualityError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Session(#[from] SessionError),

    // Covers errors joining tokio blocking tasks
    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl AirQualityError {
    /// `true` when the data service could not be reached or answered badly,
    /// the case in which a saved snapshot may be offered instead.
    pub fn is_remote(&self) -> bool {
        matches!(self, AirQualityError::Remote(_))
    }
}
