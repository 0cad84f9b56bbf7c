//! Identity provider configuration
//!
//! One configured client per process: `HttpIdentityProvider::from_env`
//! reads these once and the constructed client is injected wherever
//! operations run.

use std::env;
use std::sync::LazyLock;

/// Base URL of the hosted identity provider's auth API
pub(crate) static IDENTITY_BASE_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("IDENTITY_BASE_URL").unwrap_or_else(|_| "http://localhost:9999".to_string())
});

/// Public API key sent with every request
pub(crate) static IDENTITY_API_KEY: LazyLock<String> =
    LazyLock::new(|| env::var("IDENTITY_API_KEY").unwrap_or_default());

/// Where the provider sends the browser back after an OAuth round trip
pub(crate) static IDENTITY_REDIRECT_URI: LazyLock<String> = LazyLock::new(|| {
    env::var("IDENTITY_REDIRECT_URI")
        .unwrap_or_else(|_| "http://localhost:3000/auth/callback".to_string())
});
