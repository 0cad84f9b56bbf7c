//! recovery-portal - Booking and account portal for a wellness service
//!
//! This crate provides the authentication action pipeline (schema
//! validation, error taxonomy, action factory, identity-provider
//! operations) together with the business-settings and booking stores
//! that back the admin views.

mod action;
mod auth;
mod booking;
mod config;
mod errors;
mod provider;
mod schema;
mod settings;
mod storage;

#[cfg(test)]
mod test_utils;

// Re-export the action pipeline surface
pub use action::{ActionResult, FormData, Outcome, run_action, run_redirect_action};
pub use errors::{AppError, Severity};
pub use schema::{FieldViolation, Schema, ValidationError};

pub use auth::{
    AuthError, SignUpOutcome, begin_oauth, exchange_oauth_code, send_magic_link, send_phone_otp,
    sign_in_with_password, sign_out, sign_up_with_password, update_email, update_password,
    update_profile, verify_magic_link, verify_phone_otp,
};

pub use provider::{
    HttpIdentityProvider, IdentityProvider, OtpChannel, ProviderError, ProviderSession,
    ProviderUser, SignUpResponse, UserUpdate,
};

pub use booking::{
    Booking, BookingError, BookingStatus, BookingStore, StatusFilter, bookings_on_day,
    filter_by_status,
};

pub use settings::{
    Address, BusinessSetting, DayHours, SettingCategory, SettingValue, SettingsError,
    SettingsStore, ValidationRules, WeeklyHours,
};

// Re-export the route prefix
pub use config::PORTAL_ROUTE_PREFIX;

pub use storage::StorageError;

/// Initialize the shared data store and the tables behind the
/// settings and booking stores.
pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    storage::init().await?;
    settings::init().await?;
    booking::init().await?;
    Ok(())
}
