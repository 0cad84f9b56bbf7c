use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Form, Path, Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::Redirect,
    routing::{get, post},
};
use serde::Serialize;

use recovery_portal::{
    ActionResult, FormData, begin_oauth, exchange_oauth_code, send_magic_link, send_phone_otp,
    sign_in_with_password, sign_out, sign_up_with_password, update_email, update_password,
    update_profile, verify_magic_link, verify_phone_otp,
};

use super::config::PORTAL_REDIRECT_SIGNED_IN;
use super::state::PortalState;

pub(super) fn router() -> Router<PortalState> {
    Router::new()
        .route("/signin", post(post_sign_in))
        .route("/signup", post(post_sign_up))
        .route("/magiclink", post(post_magic_link))
        .route("/magiclink/verify", post(post_magic_link_verify))
        .route("/otp", post(post_phone_otp))
        .route("/otp/verify", post(post_phone_otp_verify))
        .route("/oauth/{provider}", get(get_oauth_start))
        .route("/oauth/callback", post(post_oauth_callback))
        .route("/profile", post(post_profile_update))
        .route("/email", post(post_email_update))
        .route("/password", post(post_password_update))
        .route("/signout", post(post_sign_out))
}

/// ActionResult is the API: 200 on success, 400 on failure, body
/// unchanged either way.
fn respond<T: Serialize>(result: ActionResult<T>) -> (StatusCode, Json<ActionResult<T>>) {
    let status = if result.is_success() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(result))
}

fn bearer_token(headers: &HeaderMap) -> Result<String, (StatusCode, String)> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
        .ok_or((
            StatusCode::UNAUTHORIZED,
            "Missing bearer token".to_string(),
        ))
}

async fn post_sign_in(
    State(state): State<PortalState>,
    Form(fields): Form<HashMap<String, String>>,
) -> impl axum::response::IntoResponse {
    let form = FormData::from(fields);
    respond(sign_in_with_password(state.provider.as_ref(), &form).await)
}

async fn post_sign_up(
    State(state): State<PortalState>,
    Form(fields): Form<HashMap<String, String>>,
) -> impl axum::response::IntoResponse {
    let form = FormData::from(fields);
    respond(sign_up_with_password(state.provider.as_ref(), &form).await)
}

async fn post_magic_link(
    State(state): State<PortalState>,
    Form(fields): Form<HashMap<String, String>>,
) -> impl axum::response::IntoResponse {
    let form = FormData::from(fields);
    respond(send_magic_link(state.provider.as_ref(), &form).await)
}

async fn post_magic_link_verify(
    State(state): State<PortalState>,
    Form(fields): Form<HashMap<String, String>>,
) -> impl axum::response::IntoResponse {
    let form = FormData::from(fields);
    respond(verify_magic_link(state.provider.as_ref(), &form).await)
}

async fn post_phone_otp(
    State(state): State<PortalState>,
    Form(fields): Form<HashMap<String, String>>,
) -> impl axum::response::IntoResponse {
    let form = FormData::from(fields);
    respond(send_phone_otp(state.provider.as_ref(), &form).await)
}

async fn post_phone_otp_verify(
    State(state): State<PortalState>,
    Form(fields): Form<HashMap<String, String>>,
) -> impl axum::response::IntoResponse {
    let form = FormData::from(fields);
    respond(verify_phone_otp(state.provider.as_ref(), &form).await)
}

/// OAuth initiation redirects the browser to the provider's authorize
/// URL. Failures surface as HTTP errors here because there is no form
/// result to carry them.
async fn get_oauth_start(
    State(state): State<PortalState>,
    Path(provider): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Redirect, (StatusCode, String)> {
    let mut form = FormData::new();
    form.insert("provider", provider);
    let redirect_to = params
        .get("redirect_to")
        .map(String::as_str)
        .unwrap_or(PORTAL_REDIRECT_SIGNED_IN.as_str());
    form.insert("redirect_to", redirect_to);

    let url = begin_oauth(state.provider.as_ref(), &form)
        .await
        .map_err(|e| {
            let status = match &e {
                recovery_portal::AppError::Validation(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, e.user_message())
        })?;

    Ok(Redirect::to(&url))
}

async fn post_oauth_callback(
    State(state): State<PortalState>,
    Form(fields): Form<HashMap<String, String>>,
) -> impl axum::response::IntoResponse {
    let form = FormData::from(fields);
    respond(exchange_oauth_code(state.provider.as_ref(), &form).await)
}

async fn post_profile_update(
    State(state): State<PortalState>,
    headers: HeaderMap,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<impl axum::response::IntoResponse, (StatusCode, String)> {
    let token = bearer_token(&headers)?;
    let form = FormData::from(fields);
    Ok(respond(
        update_profile(state.provider.as_ref(), &token, &form).await,
    ))
}

async fn post_email_update(
    State(state): State<PortalState>,
    headers: HeaderMap,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<impl axum::response::IntoResponse, (StatusCode, String)> {
    let token = bearer_token(&headers)?;
    let form = FormData::from(fields);
    Ok(respond(
        update_email(state.provider.as_ref(), &token, &form).await,
    ))
}

async fn post_password_update(
    State(state): State<PortalState>,
    headers: HeaderMap,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<impl axum::response::IntoResponse, (StatusCode, String)> {
    let token = bearer_token(&headers)?;
    let form = FormData::from(fields);
    Ok(respond(
        update_password(state.provider.as_ref(), &token, &form).await,
    ))
}

async fn post_sign_out(
    State(state): State<PortalState>,
    headers: HeaderMap,
) -> Result<impl axum::response::IntoResponse, (StatusCode, String)> {
    let token = bearer_token(&headers)?;
    Ok(respond(sign_out(state.provider.as_ref(), &token).await))
}
