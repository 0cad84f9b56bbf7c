use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, put},
};
use serde::Deserialize;

use recovery_portal::{
    Booking, BookingStatus, BookingStore, BusinessSetting, SettingCategory, SettingValue,
    SettingsStore, StatusFilter, filter_by_status,
};

use super::error::IntoResponseError;
use super::state::PortalState;

pub(super) fn router() -> Router<PortalState> {
    Router::new()
        .route("/bookings", get(list_bookings))
        .route("/bookings/{id}", get(get_booking))
        .route("/bookings/{id}/status", put(put_booking_status))
        .route("/settings", get(list_settings))
        .route("/settings/{key}", get(get_setting).put(put_setting_value))
}

/// Booking list with optional client-side `?status=` narrowing.
/// `status=all` and a missing parameter both mean no filtering.
async fn list_bookings(
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Booking>>, (StatusCode, String)> {
    let filter = match params.get("status") {
        Some(raw) => raw
            .parse::<StatusFilter>()
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?,
        None => StatusFilter::All,
    };

    let bookings = BookingStore::list_bookings().await.into_response_error()?;
    Ok(Json(filter_by_status(&bookings, filter)))
}

async fn get_booking(Path(id): Path<String>) -> Result<Json<Booking>, (StatusCode, String)> {
    let booking = BookingStore::get_booking(&id)
        .await
        .into_response_error()?
        .ok_or((StatusCode::NOT_FOUND, format!("Booking not found: {id}")))?;
    Ok(Json(booking))
}

#[derive(Deserialize)]
struct StatusUpdate {
    status: String,
}

async fn put_booking_status(
    Path(id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<Booking>, (StatusCode, String)> {
    let next = update
        .status
        .parse::<BookingStatus>()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let booking = BookingStore::update_status(&id, next)
        .await
        .into_response_error()?;
    Ok(Json(booking))
}

async fn list_settings(
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<BusinessSetting>>, (StatusCode, String)> {
    let category = match params.get("category") {
        Some(raw) => Some(
            raw.parse::<SettingCategory>()
                .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?,
        ),
        None => None,
    };

    let settings = SettingsStore::list_settings(category)
        .await
        .into_response_error()?;
    Ok(Json(settings))
}

async fn get_setting(
    Path(key): Path<String>,
) -> Result<Json<BusinessSetting>, (StatusCode, String)> {
    let setting = SettingsStore::get_setting(&key)
        .await
        .into_response_error()?
        .ok_or((StatusCode::NOT_FOUND, format!("Setting not found: {key}")))?;
    Ok(Json(setting))
}

async fn put_setting_value(
    Path(key): Path<String>,
    Json(value): Json<SettingValue>,
) -> Result<Json<BusinessSetting>, (StatusCode, String)> {
    SettingsStore::update_value(&key, value)
        .await
        .into_response_error()?;

    let setting = SettingsStore::get_setting(&key)
        .await
        .into_response_error()?
        .ok_or((StatusCode::NOT_FOUND, format!("Setting not found: {key}")))?;
    Ok(Json(setting))
}
