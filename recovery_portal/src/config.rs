//! Central configuration for the recovery-portal crate

use std::sync::LazyLock;

/// Route prefix for all recovery-portal endpoints
///
/// This is the main prefix under which all portal endpoints will be mounted.
/// Default: "/portal"
pub static PORTAL_ROUTE_PREFIX: LazyLock<String> = LazyLock::new(|| {
    std::env::var("PORTAL_ROUTE_PREFIX").unwrap_or_else(|_| "/portal".to_string())
});
