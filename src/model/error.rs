use std::time::Duration;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{operation} timed out after {after:?}")]
    TimeoutExceeded {
        operation: &'static str,
        after: Duration,
    },
    #[error("transport failure: {0}")]
    TransportFailure(#[source] reqwest::Error),
    #[error("unexpected response status {0}")]
    NonOkStatus(u16),
    #[error("failed to decode payload: {0}")]
    DecodeFailure(#[from] serde_json::Error),
    #[error("storage failure: {0}")]
    StorageFailure(#[source] BoxError),
    #[error("file i/o failure: {0}")]
    FileIoFailure(#[from] std::io::Error),
    #[error("timeout must be greater than zero")]
    InvalidTimeout,
}

impl Error {
    pub fn timeout(operation: &'static str, after: Duration) -> Error {
        Error::TimeoutExceeded { operation, after }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        Error::StorageFailure(Box::new(e))
    }
}

impl From<r2d2::Error> for Error {
    fn from(e: r2d2::Error) -> Self {
        Error::StorageFailure(Box::new(e))
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(e: tokio::task::JoinError) -> Self {
        Error::StorageFailure(Box::new(e))
    }
}
