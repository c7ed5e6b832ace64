//! Configuration loading for the meowseek gateway.
//!
//! Uses figment to layer built-in defaults, an optional YAML file, and the
//! process environment (`CLIENT_ID`, `CLIENT_SECRET`, `REDIRECT_URI`,
//! `API_KEY`, plus `MEOWSEEK_*` for everything else).

pub mod schema;

pub use schema::{Config, DEFAULT_API_KEY, LogConfig, SpotifyEndpoints};
