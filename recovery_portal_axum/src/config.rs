//! Central configuration for the recovery-portal-axum crate

use std::sync::LazyLock;

/// Where the browser lands after a completed OAuth sign-in, used when the
/// initiation request carries no `redirect_to` of its own.
/// Default: "/"
pub static PORTAL_REDIRECT_SIGNED_IN: LazyLock<String> = LazyLock::new(|| {
    std::env::var("PORTAL_REDIRECT_SIGNED_IN").unwrap_or_else(|_| "/".to_string())
});
