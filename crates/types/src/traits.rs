//! Async traits shared across all meowseek crates.
//!
//! Every cross-crate abstraction is defined here so that higher layers depend
//! only on `meowseek-types`, not on each other.

use crate::{Device, OAuthToken};
use async_trait::async_trait;

pub use crate::error::Result;

/// Storage for the single OAuth token the gateway operates with.
///
/// Implementations must make `save` atomic with respect to `load`: a reader
/// sees either the previous token or the new one, never a mix.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Load the cached token, if any.
    async fn load(&self) -> Result<Option<OAuthToken>>;
    /// Replace the cached token.
    async fn save(&self, token: &OAuthToken) -> Result<()>;
}

/// The subset of the provider's Web API the gateway forwards to.
///
/// Each method is a single upstream call; nothing is retried.
#[async_trait]
pub trait PlaybackProvider: Send + Sync {
    /// Fetch the user's current device list.
    async fn devices(&self) -> Result<Vec<Device>>;
    /// Start or resume playback on `device_id`.
    async fn start_playback(&self, device_id: Option<&str>) -> Result<()>;
    /// Pause playback on `device_id`.
    async fn pause_playback(&self, device_id: Option<&str>) -> Result<()>;
    /// Skip to the next track on `device_id`.
    async fn skip_to_next(&self, device_id: Option<&str>) -> Result<()>;
    /// Skip to the previous track on `device_id`.
    async fn skip_to_previous(&self, device_id: Option<&str>) -> Result<()>;
}

/// Builds a [`PlaybackProvider`] bound to an access token.
pub trait ProviderConnector: Send + Sync {
    fn connect(&self, token: &OAuthToken) -> Box<dyn PlaybackProvider>;
}
