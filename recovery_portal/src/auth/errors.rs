use thiserror::Error;

use crate::provider::ProviderError;

/// Classified authentication failures. Each variant maps to exactly one
/// fixed user-safe phrase; original provider text is kept only on the
/// fallback variant, for logging.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Session expired")]
    SessionExpired,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Email not verified")]
    EmailNotVerified,

    #[error("Email already registered")]
    EmailTaken,

    #[error("Password too weak")]
    WeakPassword,

    #[error("Verification code expired")]
    OtpExpired,

    #[error("Verification code invalid")]
    OtpInvalid,

    /// Unclassified provider failure; `message` is logged, never shown
    #[error("Provider error ({code:?}): {message}")]
    Provider {
        code: Option<String>,
        message: String,
    },
}

impl AuthError {
    /// Stable machine tag, recorded in structured logs
    pub fn sub_type(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "invalid_credentials",
            Self::SessionExpired => "session_expired",
            Self::Unauthorized => "unauthorized",
            Self::EmailNotVerified => "email_not_verified",
            Self::EmailTaken => "email_taken",
            Self::WeakPassword => "weak_password",
            Self::OtpExpired => "otp_expired",
            Self::OtpInvalid => "otp_invalid",
            Self::Provider { .. } => "provider",
        }
    }

    /// The one phrase a user may see for this classification
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "The email or password you entered is incorrect.",
            Self::SessionExpired => "Your session has expired. Please sign in again.",
            Self::Unauthorized => "You need to sign in to continue.",
            Self::EmailNotVerified => "Please verify your email address before signing in.",
            Self::EmailTaken => "An account with this email already exists.",
            Self::WeakPassword => "Please choose a stronger password.",
            Self::OtpExpired => "That verification code has expired. Request a new one.",
            Self::OtpInvalid => "That verification code is not valid.",
            Self::Provider { .. } => "Authentication failed. Please try again.",
        }
    }

    /// Classify a provider failure. Deterministic: the same code/status
    /// always yields the same variant.
    pub fn from_provider(err: &ProviderError) -> Self {
        match err.code() {
            Some("invalid_credentials") | Some("invalid_grant") => Self::InvalidCredentials,
            Some("user_already_exists") | Some("email_exists") => Self::EmailTaken,
            Some("weak_password") => Self::WeakPassword,
            Some("email_not_confirmed") => Self::EmailNotVerified,
            Some("session_expired") | Some("refresh_token_not_found") => Self::SessionExpired,
            Some("otp_expired") => Self::OtpExpired,
            Some("otp_invalid") | Some("invalid_otp") => Self::OtpInvalid,
            _ => match err.status() {
                Some(401) | Some(403) => Self::Unauthorized,
                _ => Self::Provider {
                    code: err.code().map(|s| s.to_string()),
                    message: err.message().to_string(),
                },
            },
        }
    }
}
