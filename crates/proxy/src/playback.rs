//! Playback and device routes. All sit behind the API-key guard.

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Request, State},
};
use meowseek_provider::{DeviceListing, dispatch, list_devices};
use meowseek_types::{MeowError, PlaybackCommand};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::{AppState, error::ApiError};

/// Body of the playback routes. `device_id` is optional on the wire; a
/// missing id simply fails the device lookup.
///
/// Extracted leniently: the content type is not checked and an empty body
/// reads as `{}`. Malformed JSON is reported as a JSON [`ApiError`].
#[derive(Debug, Default, Deserialize)]
pub struct PlaybackRequest {
    #[serde(default)]
    pub device_id: Option<String>,
}

impl<S> FromRequest<S> for PlaybackRequest
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| MeowError::InvalidRequest(e.body_text()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::from(MeowError::InvalidRequest(e.to_string())))
    }
}

async fn run(
    state: &AppState,
    command: PlaybackCommand,
    request: PlaybackRequest,
) -> Result<Json<Value>, ApiError> {
    let provider = state.gate.client().await?;
    let message = dispatch(provider.as_ref(), command, request.device_id.as_deref())
        .await
        .inspect_err(|e| {
            if e.is_client_error() {
                tracing::warn!(%command, error = %e, "playback command rejected");
            } else {
                tracing::error!(%command, error = %e, "playback command failed");
            }
        })?;
    Ok(Json(json!({"message": message})))
}

/// Handles `POST /play`.
pub async fn play(
    State(state): State<Arc<AppState>>,
    request: PlaybackRequest,
) -> Result<Json<Value>, ApiError> {
    run(&state, PlaybackCommand::Play, request).await
}

/// Handles `POST /pause`.
pub async fn pause(
    State(state): State<Arc<AppState>>,
    request: PlaybackRequest,
) -> Result<Json<Value>, ApiError> {
    run(&state, PlaybackCommand::Pause, request).await
}

/// Handles `POST /next`.
pub async fn next(
    State(state): State<Arc<AppState>>,
    request: PlaybackRequest,
) -> Result<Json<Value>, ApiError> {
    run(&state, PlaybackCommand::Next, request).await
}

/// Handles `POST /previous`.
pub async fn previous(
    State(state): State<Arc<AppState>>,
    request: PlaybackRequest,
) -> Result<Json<Value>, ApiError> {
    run(&state, PlaybackCommand::Previous, request).await
}

/// Handles `GET /device`.
///
/// Returns `{"devices": [{id, name, type}]}`, or `{"message": ...}` when the
/// account has no devices.
pub async fn devices(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let provider = state.gate.client().await?;
    let listing = list_devices(provider.as_ref()).await.inspect_err(|e| {
        tracing::error!(error = %e, "error fetching devices");
    })?;
    Ok(Json(match listing {
        DeviceListing::Empty => json!({"message": "No devices found."}),
        DeviceListing::Devices(devices) => json!({"devices": devices}),
    }))
}
