//! Shared HTTP utilities for provider calls.
//!
//! Centralises send → status-check → error-envelope parsing so every Spotify
//! endpoint reports failures the same way.

use meowseek_types::{MeowError, traits::Result};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use std::time::Duration;

/// Shape of Spotify's regular error object: `{"error": {"status", "message"}}`.
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Thin wrapper over a shared [`Client`] that turns non-2xx responses into
/// [`MeowError::Provider`].
#[derive(Clone)]
pub struct ProviderHttp {
    http: Client,
}

impl ProviderHttp {
    /// Creates a new helper wrapping the given HTTP client.
    #[must_use]
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    /// Builds the gateway's outbound client: bounded by `timeout`, no redirects.
    ///
    /// # Errors
    ///
    /// Returns [`MeowError::Http`] if the TLS backend cannot be initialised.
    pub fn build_client(timeout: Duration) -> Result<Client> {
        Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(MeowError::from)
    }

    /// Returns a reference to the inner HTTP client for building requests.
    #[must_use]
    pub fn client(&self) -> &Client {
        &self.http
    }

    /// Sends a request and checks for success status.
    ///
    /// # Errors
    ///
    /// Returns [`MeowError::Provider`] on non-success HTTP status codes, or
    /// [`MeowError::Http`] if the request fails to send.
    pub async fn send(&self, builder: RequestBuilder) -> Result<reqwest::Response> {
        let resp = builder.send().await?;
        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            let text = resp.text().await.unwrap_or_default();
            Err(MeowError::Provider {
                status: status.as_u16(),
                message: provider_message(&text),
            })
        }
    }
}

/// Extracts the human-readable message from an error body, falling back to
/// the raw text.
fn provider_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|env| env.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}
