//! Spotify Web API client: device listing and transport control.
//!
//! Auth: `Authorization: Bearer <access token>` from the gate's token cache.
//! Every method is one upstream call; nothing is retried.

use async_trait::async_trait;
use meowseek_types::{
    Device, OAuthToken, PlaybackProvider, ProviderConnector, traits::Result,
};
use reqwest::{Client, Method, RequestBuilder, header};
use serde::Deserialize;
use serde_json::json;

use crate::http_util::ProviderHttp;

/// `GET /me/player/devices` response body.
#[derive(Deserialize)]
struct DevicesPage {
    devices: Vec<Device>,
}

/// A Spotify client bound to one access token.
pub struct SpotifyClient {
    ph: ProviderHttp,
    api_base: String,
    access_token: String,
}

impl SpotifyClient {
    /// Creates a client for `api_base` (e.g. `https://api.spotify.com/v1`).
    pub fn new(http: Client, api_base: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            ph: ProviderHttp::new(http),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    fn request(&self, method: Method, path: &str, device_id: Option<&str>) -> RequestBuilder {
        let mut builder = self
            .ph
            .client()
            .request(method, format!("{}{path}", self.api_base))
            .bearer_auth(&self.access_token);
        if let Some(id) = device_id {
            builder = builder.query(&[("device_id", id)]);
        }
        builder
    }

    /// Sends a body-less player command and discards the (empty) response.
    async fn command(&self, method: Method, path: &str, device_id: Option<&str>) -> Result<()> {
        let builder = self
            .request(method, path, device_id)
            .header(header::CONTENT_LENGTH, 0);
        self.ph.send(builder).await?;
        Ok(())
    }
}

#[async_trait]
impl PlaybackProvider for SpotifyClient {
    async fn devices(&self) -> Result<Vec<Device>> {
        let resp = self
            .ph
            .send(self.request(Method::GET, "/me/player/devices", None))
            .await?;
        let bytes = resp.bytes().await?;
        let page: DevicesPage = serde_json::from_slice(&bytes)?;
        Ok(page.devices)
    }

    async fn start_playback(&self, device_id: Option<&str>) -> Result<()> {
        let builder = self
            .request(Method::PUT, "/me/player/play", device_id)
            .json(&json!({}));
        self.ph.send(builder).await?;
        Ok(())
    }

    async fn pause_playback(&self, device_id: Option<&str>) -> Result<()> {
        self.command(Method::PUT, "/me/player/pause", device_id).await
    }

    async fn skip_to_next(&self, device_id: Option<&str>) -> Result<()> {
        self.command(Method::POST, "/me/player/next", device_id).await
    }

    async fn skip_to_previous(&self, device_id: Option<&str>) -> Result<()> {
        self.command(Method::POST, "/me/player/previous", device_id)
            .await
    }
}

/// Builds a [`SpotifyClient`] per request, sharing one connection pool.
#[derive(Clone)]
pub struct SpotifyConnector {
    http: Client,
    api_base: String,
}

impl SpotifyConnector {
    pub fn new(http: Client, api_base: impl Into<String>) -> Self {
        Self {
            http,
            api_base: api_base.into(),
        }
    }
}

impl ProviderConnector for SpotifyConnector {
    fn connect(&self, token: &OAuthToken) -> Box<dyn PlaybackProvider> {
        Box::new(SpotifyClient::new(
            self.http.clone(),
            self.api_base.clone(),
            token.access_token.clone(),
        ))
    }
}
