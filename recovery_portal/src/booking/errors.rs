use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Booking not found: {0}")]
    NotFound(String),

    #[error("Unknown booking status: {0}")]
    UnknownStatus(String),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}

impl From<serde_json::Error> for BookingError {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage(StorageError::Serde(err.to_string()))
    }
}
