use http::StatusCode;
use recovery_portal::{BookingError, SettingsError};

/// Helper trait for converting errors to a standard response error format
pub(super) trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)>;
}

/// Implementation for BookingError to map variants to appropriate status codes
impl<T> IntoResponseError<T> for Result<T, BookingError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| {
            let status = match e {
                BookingError::NotFound(_) => StatusCode::NOT_FOUND,
                BookingError::UnknownStatus(_) => StatusCode::BAD_REQUEST,
                BookingError::InvalidTransition { .. } => StatusCode::CONFLICT,
                BookingError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, e.to_string())
        })
    }
}

/// Implementation for SettingsError to map variants to appropriate status codes
impl<T> IntoResponseError<T> for Result<T, SettingsError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| {
            let status = match e {
                SettingsError::NotFound(_) => StatusCode::NOT_FOUND,
                SettingsError::InvalidValue { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                SettingsError::UnknownType(_) | SettingsError::UnknownCategory(_) => {
                    StatusCode::BAD_REQUEST
                }
                SettingsError::Serde(_) | SettingsError::Storage(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            (status, e.to_string())
        })
    }
}
