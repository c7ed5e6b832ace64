//! API error type that maps [`MeowError`] variants to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use meowseek_types::MeowError;
use serde_json::json;

/// Wrapper around [`MeowError`] that implements [`IntoResponse`].
///
/// Body shape: `{"detail": "<human-readable message>", "code": "<kind>"}`.
#[derive(Debug)]
pub struct ApiError(pub MeowError);

impl ApiError {
    /// Returns `(status, error_code)` for the wrapped error.
    fn classify(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            MeowError::InvalidApiKey => (StatusCode::UNAUTHORIZED, "invalid_api_key"),
            MeowError::NotAuthenticated => (StatusCode::UNAUTHORIZED, "not_authenticated"),
            MeowError::BadExchange(_) => (StatusCode::BAD_REQUEST, "bad_exchange"),
            MeowError::InvalidRequest(_) => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_request"),
            MeowError::DeviceNotFound => (StatusCode::NOT_FOUND, "device_not_found"),
            MeowError::DeviceInactive => (StatusCode::BAD_REQUEST, "device_inactive"),
            MeowError::Provider { .. } => (StatusCode::BAD_REQUEST, "provider_error"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "server_error"),
        }
    }

    fn detail(&self) -> String {
        if self.0.is_client_error() {
            self.0.to_string()
        } else {
            format!("Server error: {}", self.0)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.classify();
        (
            status,
            Json(json!({
                "detail": self.detail(),
                "code": code,
            })),
        )
            .into_response()
    }
}

impl From<MeowError> for ApiError {
    fn from(e: MeowError) -> Self {
        Self(e)
    }
}
