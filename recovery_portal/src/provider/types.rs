use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user record as the identity provider reports it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderUser {
    pub id: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub display_name: Option<String>,
    /// Whether the provider considers the email address confirmed
    pub email_confirmed: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// A session the provider established for a user. Session persistence is
/// the provider's concern; this is only the handle it returned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderSession {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub user: ProviderUser,
}

/// Result of a sign-up call. The provider either establishes a session
/// immediately or signals that email confirmation is pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpResponse {
    pub user: ProviderUser,
    pub session: Option<ProviderSession>,
    pub requires_confirmation: bool,
}

/// Delivery channel for one-time codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpChannel {
    Email,
    Sms,
}

/// Fields to change on the authenticated user. `None` means leave as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub display_name: Option<String>,
}
