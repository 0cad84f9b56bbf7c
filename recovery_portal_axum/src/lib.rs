//! recovery-portal-axum - Axum integration for the recovery-portal library
//!
//! Mounts the portal's auth action pipeline and admin stores as an axum
//! router. Construct a [`PortalState`] (one identity-provider client per
//! process) and nest [`recovery_portal_router`] under
//! `PORTAL_ROUTE_PREFIX`.

mod admin;
mod auth;
mod config;
mod error;
mod router;
mod state;

pub use config::PORTAL_REDIRECT_SIGNED_IN;
pub use router::{recovery_portal_router, recovery_portal_router_no_trace};
pub use state::PortalState;

// Re-export the route prefix and initialization function from the
// recovery_portal crate
pub use recovery_portal::{PORTAL_ROUTE_PREFIX, init};
