use thiserror::Error;

/// Failures from the shared data store, classified by SQLSTATE where the
/// driver reports one so callers can react to the kind of failure instead
/// of parsing driver messages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Json conversion error: {0}")]
    Serde(String),

    #[error("Duplicate record: {0}")]
    UniqueViolation(String),

    #[error("Missing referenced record: {0}")]
    ForeignKeyViolation(String),

    #[error("Missing required value: {0}")]
    NotNullViolation(String),

    #[error("Unknown table: {0}")]
    UndefinedTable(String),

    #[error("Unknown column: {0}")]
    UndefinedColumn(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

impl StorageError {
    /// Connection-level failures are the only kind worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Map a SQLSTATE code onto a classified variant. Unrecognized codes
    /// fall back to the plain `Storage` variant.
    pub fn classify(code: Option<&str>, message: &str) -> Self {
        match code {
            Some("23505") => Self::UniqueViolation(message.to_string()),
            Some("23503") => Self::ForeignKeyViolation(message.to_string()),
            Some("23502") => Self::NotNullViolation(message.to_string()),
            Some("42P01") => Self::UndefinedTable(message.to_string()),
            Some("42703") => Self::UndefinedColumn(message.to_string()),
            // Class 08 covers connection exceptions
            Some(c) if c.starts_with("08") => Self::Connection(message.to_string()),
            _ => Self::Storage(message.to_string()),
        }
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) => {
                let code = db.code().map(|c| c.to_string());
                Self::classify(code.as_deref(), db.message())
            }
            sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                Self::Connection(err.to_string())
            }
            _ => Self::Storage(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}
