use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Unknown setting type: {0}")]
    UnknownType(String),

    #[error("Unknown setting category: {0}")]
    UnknownCategory(String),

    #[error("Setting not found: {0}")]
    NotFound(String),

    /// Value rejected by the setting's stored validation rules
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Json conversion error: {0}")]
    Serde(String),
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}
