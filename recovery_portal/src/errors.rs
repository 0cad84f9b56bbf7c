//! Error taxonomy for the portal pipeline
//!
//! Every failure path resolves to one of four kinds so UI code never
//! branches on provider-specific formats. The action factory is the
//! single place that catches, logs and converts these; nothing here is
//! fatal to the process.

use serde_json::{Value, json};
use thiserror::Error;

use crate::auth::AuthError;
use crate::schema::ValidationError;
use crate::storage::StorageError;

/// Coarse severity recorded with every structured log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Error, Clone)]
pub enum AppError {
    /// Classified authentication failure
    #[error("Auth error: {0}")]
    Auth(AuthError),

    /// Schema validation failure (expected, low severity)
    #[error("Validation error: {0}")]
    Validation(ValidationError),

    /// Storage-layer failure, classified by SQLSTATE
    #[error("Database error: {0}")]
    Database(StorageError),

    /// Catch-all for anything unexpected; `cause` keeps the original
    /// error text for logging only
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        cause: Option<String>,
    },
}

/// The one phrase users see when nothing more specific applies
pub(crate) const GENERIC_FAILURE_MESSAGE: &str = "Authentication failed. Please try again.";

impl AppError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(message: impl Into<String>, cause: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            cause: Some(cause.into()),
        }
    }

    /// Coarse type tag: one of a fixed enumeration
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Auth(_) => "auth",
            Self::Validation(_) => "validation",
            Self::Database(_) => "database",
            Self::Internal { .. } => "app",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::Validation(_) => Severity::Low,
            Self::Internal { .. } => Severity::Medium,
            Self::Auth(_) | Self::Database(_) => Severity::High,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Database(err) => err.is_retryable(),
            _ => false,
        }
    }

    /// The single pattern-matching function that computes the user-facing
    /// message. Raw provider or exception text never comes out of here.
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(err) => err.user_message().to_string(),
            Self::Validation(err) => err.joined_messages(),
            Self::Database(err) => match err {
                StorageError::UniqueViolation(_) => "This record already exists.".to_string(),
                StorageError::ForeignKeyViolation(_) => {
                    "A related record is missing.".to_string()
                }
                StorageError::Connection(_) => {
                    "We're having trouble connecting. Please try again.".to_string()
                }
                _ => "We hit a problem saving your changes. Please try again.".to_string(),
            },
            Self::Internal { .. } => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    /// Structured representation for logging: includes the developer
    /// message, the preserved cause and per-kind metadata
    pub fn serialize(&self) -> Value {
        json!({
            "kind": self.kind(),
            "severity": self.severity(),
            "message": self.to_string(),
            "cause": self.cause(),
            "metadata": self.metadata(),
        })
    }

    fn cause(&self) -> Option<String> {
        match self {
            Self::Internal { cause, .. } => cause.clone(),
            Self::Auth(AuthError::Provider { message, .. }) => Some(message.clone()),
            _ => None,
        }
    }

    fn metadata(&self) -> Value {
        match self {
            Self::Auth(err) => json!({ "subType": err.sub_type() }),
            Self::Validation(err) => json!({
                "violations": err
                    .violations()
                    .iter()
                    .map(|v| json!({ "field": v.field, "message": v.message }))
                    .collect::<Vec<_>>(),
            }),
            Self::Database(err) => json!({ "retryable": err.is_retryable() }),
            Self::Internal { .. } => Value::Null,
        }
    }

    /// Log the error and return self, allowing method chaining where a
    /// call site wants explicit logging
    pub fn log(self) -> Self {
        tracing::error!(kind = self.kind(), detail = %self.serialize(), "{}", self);
        self
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        Self::Auth(err)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        Self::Database(err)
    }
}
