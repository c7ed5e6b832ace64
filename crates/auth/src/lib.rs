//! Access control for the gateway.
//!
//! [`spotify`] wraps the provider's OAuth authorization-code flow; the
//! [`AccessGate`] combines it with the static API key and the token store to
//! decide whether a request may reach the provider, and hands out clients
//! bound to the cached token.

pub mod gate;
pub mod spotify;

pub use gate::AccessGate;
pub use spotify::SpotifyOAuth;
