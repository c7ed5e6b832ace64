//! The access gate in front of every provider call.
//!
//! Two independent checks:
//! - the static `X-API-Key` shared with the widget;
//! - a cached, unexpired OAuth token obtained through `/auth` → `/callback`.
//!
//! The gate never refreshes a token inline: an expired token means the
//! operator has to run the authorization flow again.

use meowseek_types::{
    MeowError, OAuthToken, PlaybackProvider, ProviderConnector, TokenState, TokenStore,
    traits::Result,
};
use std::sync::Arc;

use crate::SpotifyOAuth;

/// Validates inbound credentials and hands out authenticated provider clients.
pub struct AccessGate {
    api_key: String,
    oauth: SpotifyOAuth,
    store: Arc<dyn TokenStore>,
    connector: Arc<dyn ProviderConnector>,
}

impl AccessGate {
    pub fn new(
        api_key: impl Into<String>,
        oauth: SpotifyOAuth,
        store: Arc<dyn TokenStore>,
        connector: Arc<dyn ProviderConnector>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            oauth,
            store,
            connector,
        }
    }

    /// Checks the request's `X-API-Key` value against the configured key.
    ///
    /// # Errors
    ///
    /// Returns [`MeowError::InvalidApiKey`] if the value is absent, empty, or
    /// differs from the configured key in any byte.
    pub fn validate_api_key(&self, header_value: Option<&[u8]>) -> Result<()> {
        match header_value {
            Some(v) if !v.is_empty() && v == self.api_key.as_bytes() => Ok(()),
            _ => Err(MeowError::InvalidApiKey),
        }
    }

    /// Returns a provider client bound to the cached access token.
    ///
    /// # Errors
    ///
    /// Returns [`MeowError::NotAuthenticated`] when no token is cached or the
    /// cached token has expired, or the store's error if it cannot be read.
    pub async fn client(&self) -> Result<Box<dyn PlaybackProvider>> {
        let token = self.valid_token().await?;
        Ok(self.connector.connect(&token))
    }

    async fn valid_token(&self) -> Result<OAuthToken> {
        let Some(token) = self.store.load().await? else {
            tracing::debug!("no cached token");
            return Err(MeowError::NotAuthenticated);
        };
        match token.state() {
            TokenState::Valid => Ok(token),
            TokenState::Expired => {
                tracing::info!("cached token expired; re-run the authorization flow");
                Err(MeowError::NotAuthenticated)
            }
        }
    }

    /// Returns the provider's authorization URL. Does not touch the token store.
    #[must_use]
    pub fn begin_authorization(&self) -> String {
        self.oauth.authorize_url()
    }

    /// Exchanges `code` for a token and caches it.
    ///
    /// # Errors
    ///
    /// Returns [`MeowError::BadExchange`] if the exchange fails, or the
    /// store's error if the token cannot be cached.
    pub async fn exchange_code(&self, code: &str) -> Result<()> {
        let token = self.oauth.exchange_code(code).await.inspect_err(|e| {
            tracing::error!(error = %e, "token exchange failed");
        })?;
        self.store.save(&token).await?;
        tracing::info!(scope = token.scope.as_deref().unwrap_or(""), "token cached");
        Ok(())
    }
}
