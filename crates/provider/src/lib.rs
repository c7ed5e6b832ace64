//! Provider-side half of the gateway.
//!
//! [`SpotifyClient`] implements [`PlaybackProvider`] against the Spotify Web
//! API, [`SpotifyConnector`] builds one per request from the cached token,
//! and [`dispatch`] holds the device-validation logic shared by every
//! playback command.
//!
//! [`PlaybackProvider`]: meowseek_types::PlaybackProvider

pub mod dispatch;
pub mod http_util;
pub mod spotify;

pub use dispatch::{DeviceListing, dispatch, list_devices};
pub use http_util::ProviderHttp;
pub use spotify::{SpotifyClient, SpotifyConnector};
