//! Core types and traits for the meowseek workspace.
//!
//! This crate defines the shared abstractions used across all layers of the
//! gateway: the error type, the OAuth token representation, the provider's
//! device model, playback commands, and the async traits that the store,
//! auth, and provider layers implement.

pub mod device;
pub mod error;
pub mod playback;
pub mod token;
pub mod traits;

pub use device::{Device, DeviceSummary};
pub use error::MeowError;
pub use playback::PlaybackCommand;
pub use token::{OAuthToken, TokenState};
pub use traits::{PlaybackProvider, ProviderConnector, TokenStore};
