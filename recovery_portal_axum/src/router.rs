//! Combined router for all portal endpoints

use axum::Router;
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::state::PortalState;

/// Create a combined router for all portal endpoints
///
/// This router combines the auth and admin endpoints under a single mount
/// point. The endpoints will be available at:
/// - {PORTAL_ROUTE_PREFIX}/auth/...
/// - {PORTAL_ROUTE_PREFIX}/admin/...
///
/// This simplifies integration by requiring only a single router to be
/// mounted in the application.
pub fn recovery_portal_router(state: PortalState) -> Router {
    Router::new()
        .nest("/auth", super::auth::router())
        .nest("/admin", super::admin::router())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(true),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .with_state(state)
}

/// Create a combined router for all portal endpoints without HTTP tracing
///
/// This is the same as `recovery_portal_router()` but without the HTTP
/// tracing middleware. Use this if you want to add your own tracing
/// middleware or if you don't need HTTP request tracing.
pub fn recovery_portal_router_no_trace(state: PortalState) -> Router {
    Router::new()
        .nest("/auth", super::auth::router())
        .nest("/admin", super::admin::router())
        .with_state(state)
}
