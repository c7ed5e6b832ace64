//! HTTP layer: axum router, route handlers, and error mapping.
//!
//! Every route except `/auth` and `/callback` sits behind the `X-API-Key`
//! guard. CORS is the outermost layer so browser preflights are answered
//! before the guard sees them.

mod auth;
mod error;
mod guard;
mod playback;

pub use error::ApiError;
pub use guard::API_KEY_HEADER;

use axum::{
    Router,
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
};
use meowseek_auth::AccessGate;
use meowseek_config::Config;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Shared application state passed to all route handlers.
pub struct AppState {
    /// Server configuration. Read-only after startup.
    pub config: Arc<Config>,
    /// API-key check, token cache, and provider client factory.
    pub gate: Arc<AccessGate>,
}

impl AppState {
    /// Creates a new shared application state wrapped in an `Arc`.
    pub fn new(config: Arc<Config>, gate: Arc<AccessGate>) -> Arc<Self> {
        Arc::new(Self { config, gate })
    }
}

/// Build the full axum router.
///
/// Routes:
/// - GET  /          welcome (key required)
/// - POST /play      start playback on a device (key required)
/// - POST /pause     (key required)
/// - POST /next      (key required)
/// - POST /previous  (key required)
/// - GET  /device    list devices (key required)
/// - GET  /auth      authorization URL
/// - GET  /callback  OAuth redirect target
pub fn make_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/", get(auth::root))
        .route("/play", post(playback::play))
        .route("/pause", post(playback::pause))
        .route("/next", post(playback::next))
        .route("/previous", post(playback::previous))
        .route("/device", get(playback::devices))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            guard::require_api_key,
        ));

    let public = Router::new()
        .route("/auth", get(auth::authorize))
        .route("/callback", get(auth::callback));

    let cors = cors_layer(&state.config.cors_origin);
    protected
        .merge(public)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Single-origin CORS with credentials.
///
/// Request headers are mirrored because tower-http refuses a wildcard header
/// list together with credentials.
fn cors_layer(origin: &str) -> CorsLayer {
    let allow_origin = match HeaderValue::from_str(origin) {
        Ok(v) => AllowOrigin::exact(v),
        Err(e) => {
            tracing::warn!(origin, error = %e, "invalid CORS origin, cross-origin requests disabled");
            AllowOrigin::list(Vec::<HeaderValue>::new())
        }
    };
    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
