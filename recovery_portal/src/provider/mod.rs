mod client;
mod config;
mod errors;
mod types;

pub use client::{HttpIdentityProvider, IdentityProvider};
pub use errors::ProviderError;
pub use types::{OtpChannel, ProviderSession, ProviderUser, SignUpResponse, UserUpdate};
