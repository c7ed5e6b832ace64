//! Static API-key middleware for protected routes.

use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::{AppState, error::ApiError};

/// Header carrying the widget's shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Rejects the request with 401 unless `X-API-Key` matches the configured key
/// byte for byte. An empty header counts as missing.
///
/// Runs before body extraction, so a rejected request never reaches the
/// provider.
pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let supplied = request.headers().get(API_KEY_HEADER).map(HeaderValue::as_bytes);
    if let Err(e) = state.gate.validate_api_key(supplied) {
        tracing::warn!(
            path = %request.uri().path(),
            present = supplied.is_some(),
            "rejected request with invalid API key"
        );
        return Err(e.into());
    }
    Ok(next.run(request).await)
}
