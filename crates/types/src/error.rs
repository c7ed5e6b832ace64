//! Unified error type for the meowseek workspace.

use thiserror::Error;

/// Enumerates all error kinds that can occur across meowseek crates.
#[derive(Debug, Error)]
pub enum MeowError {
    /// The `X-API-Key` header is missing or does not match the configured key.
    #[error("Unauthorized. Invalid or missing API key.")]
    InvalidApiKey,

    /// No cached OAuth token, or the cached token has expired.
    #[error("Unauthorized. Please authenticate.")]
    NotAuthenticated,

    /// Exchanging an authorization code for a token failed.
    #[error("Error during token exchange: {0}")]
    BadExchange(String),

    /// The request body could not be parsed.
    #[error("Invalid request body: {0}")]
    InvalidRequest(String),

    /// The requested device id is not in the provider's device list.
    #[error("Device not found.")]
    DeviceNotFound,

    /// The requested device exists but is not the provider's active device.
    #[error("Device is not active.")]
    DeviceInactive,

    /// The provider answered with a non-success status.
    #[error("Spotify error: http status: {status}, {message}")]
    Provider { status: u16, message: String },

    /// HTTP transport error (connect, timeout, TLS).
    #[error("http error: {0}")]
    Http(String),

    /// JSON serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Token cache read/write error.
    #[error("storage error: {0}")]
    Storage(String),

    /// Configuration loading or validation error.
    #[error("configuration error: {0}")]
    Config(String),
}

// ── Feature-gated From impls ──────────────────────────────────────────────────

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for MeowError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.to_string())
    }
}

impl MeowError {
    /// Returns `true` if the error was caused by the caller or reported by the
    /// provider, as opposed to a fault inside the gateway or on the network.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidApiKey
                | Self::NotAuthenticated
                | Self::BadExchange(_)
                | Self::InvalidRequest(_)
                | Self::DeviceNotFound
                | Self::DeviceInactive
                | Self::Provider { .. }
        )
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, MeowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_api_key() {
        assert_eq!(
            MeowError::InvalidApiKey.to_string(),
            "Unauthorized. Invalid or missing API key."
        );
    }

    #[test]
    fn test_error_display_not_authenticated() {
        assert_eq!(
            MeowError::NotAuthenticated.to_string(),
            "Unauthorized. Please authenticate."
        );
    }

    #[test]
    fn test_error_display_provider() {
        let err = MeowError::Provider {
            status: 404,
            message: "Device not found".to_string(),
        };
        let s = err.to_string();
        assert!(s.starts_with("Spotify error:"));
        assert!(s.contains("404"));
        assert!(s.contains("Device not found"));
    }

    #[test]
    fn test_error_display_bad_exchange() {
        let err = MeowError::BadExchange("invalid_grant".into());
        assert_eq!(err.to_string(), "Error during token exchange: invalid_grant");
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid {{{").unwrap_err();
        let err: MeowError = json_err.into();
        assert!(matches!(err, MeowError::Serialization(_)));
    }

    #[test]
    fn test_client_error_classification() {
        assert!(MeowError::DeviceNotFound.is_client_error());
        assert!(MeowError::InvalidRequest("expected a string".into()).is_client_error());
        assert!(MeowError::DeviceInactive.is_client_error());
        assert!(
            MeowError::Provider {
                status: 502,
                message: String::new()
            }
            .is_client_error()
        );
        assert!(!MeowError::Http("connection refused".into()).is_client_error());
        assert!(!MeowError::Storage("disk full".into()).is_client_error());
        assert!(!MeowError::Config("missing client_id".into()).is_client_error());
    }
}
