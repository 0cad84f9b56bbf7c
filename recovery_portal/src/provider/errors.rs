use thiserror::Error;

/// Failures reported by (or while reaching) the hosted identity provider.
/// These never reach a user directly; `AuthError::from_provider` maps
/// them onto fixed user-safe classifications.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Transport-level failure before a response was decoded
    #[error("Request error: {0}")]
    Http(String),

    /// The provider answered with a non-success status
    #[error("Provider rejected request ({status}): {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Serde error: {0}")]
    Serde(String),
}

impl ProviderError {
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Http(msg) | Self::Serde(msg) => msg,
            Self::Api { message, .. } => message,
        }
    }
}
