//! Welcome and OAuth routes.
//!
//! Routes:
//! - `GET /`         -> welcome message (API key required).
//! - `GET /auth`     -> Spotify authorization URL.
//! - `GET /callback` -> code exchange; caches the token on success.
use axum::{
    Json,
    extract::{Query, State},
};
use meowseek_types::MeowError;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::{AppState, error::ApiError};

/// Query parameters Spotify appends when redirecting back.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    code: Option<String>,
    /// Set instead of `code` when the user denies access.
    error: Option<String>,
}

/// Handles `GET /`.
pub async fn root() -> Json<Value> {
    Json(json!({"message": "Welcome to the Meowseek Widget API"}))
}

/// Handles `GET /auth`.
pub async fn authorize(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({"auth_url": state.gate.begin_authorization()}))
}

/// Handles `GET /callback`.
///
/// # Errors
///
/// Returns a 400 [`ApiError`] if the redirect carries an error, lacks a code,
/// or the code is rejected.
pub async fn callback(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CallbackParams>,
) -> Result<Json<Value>, ApiError> {
    let code = match (params.code, params.error) {
        (_, Some(reason)) => {
            tracing::error!(reason = %reason, "authorization denied");
            return Err(MeowError::BadExchange(reason).into());
        }
        (Some(code), None) => code,
        (None, None) => {
            return Err(MeowError::BadExchange("missing code parameter".into()).into());
        }
    };

    state.gate.exchange_code(&code).await?;
    Ok(Json(json!({
        "message": "Authentication successful. You can now use the API."
    })))
}
