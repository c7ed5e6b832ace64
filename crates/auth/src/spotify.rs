//! Spotify OAuth 2.0 authorization-code flow.
//!
//! URL building and the code exchange are delegated to the `oauth2` crate;
//! this module only knows Spotify's endpoints and scopes, and converts the
//! token response into an [`OAuthToken`].

use meowseek_config::Config;
use meowseek_types::{MeowError, OAuthToken, traits::Result};
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet,
    RedirectUrl, RequestTokenError, Scope, TokenResponse as _, TokenUrl,
    basic::{BasicClient, BasicTokenResponse},
};

/// OAuth scopes requested during authorization.
pub const SCOPES: &[&str] = &["user-modify-playback-state", "user-read-playback-state"];

type Client = BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Spotify OAuth client: builds authorization URLs and exchanges codes.
pub struct SpotifyOAuth {
    client: Client,
    http: reqwest::Client,
}

impl SpotifyOAuth {
    /// Builds the client from the gateway configuration.
    ///
    /// `http` should not follow redirects; the token endpoint never needs them.
    ///
    /// # Errors
    ///
    /// Returns [`MeowError::Config`] if the client id, secret, or redirect URI
    /// is missing, or if any endpoint is not a valid URL.
    pub fn from_config(config: &Config, http: reqwest::Client) -> Result<Self> {
        let missing = config.missing_oauth_settings();
        if !missing.is_empty() {
            return Err(MeowError::Config(format!(
                "missing OAuth settings: {}",
                missing.join(", ")
            )));
        }

        let client = BasicClient::new(ClientId::new(config.client_id.clone()))
            .set_client_secret(ClientSecret::new(config.client_secret.clone()))
            .set_auth_uri(parse_url(AuthUrl::new, &config.spotify.auth_url, "auth_url")?)
            .set_token_uri(parse_url(TokenUrl::new, &config.spotify.token_url, "token_url")?)
            .set_redirect_uri(parse_url(
                RedirectUrl::new,
                &config.redirect_uri,
                "redirect_uri",
            )?);

        Ok(Self { client, http })
    }

    /// Returns the URL the operator must visit to grant access.
    ///
    /// Every call carries a fresh random `state`; it is not checked on return.
    #[must_use]
    pub fn authorize_url(&self) -> String {
        let (url, _state) = self
            .client
            .authorize_url(CsrfToken::new_random)
            .add_scopes(SCOPES.iter().map(|s| Scope::new((*s).to_string())))
            .url();
        url.to_string()
    }

    /// Exchanges an authorization code for a token. Attempted once.
    ///
    /// # Errors
    ///
    /// Returns [`MeowError::BadExchange`] for any failure: rejected code,
    /// unreachable endpoint, or an unparseable response.
    pub async fn exchange_code(&self, code: &str) -> Result<OAuthToken> {
        let response = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(&self.http)
            .await
            .map_err(|e| {
                let reason = match e {
                    RequestTokenError::ServerResponse(resp) => resp.to_string(),
                    other => error_chain(&other),
                };
                MeowError::BadExchange(reason)
            })?;
        Ok(token_from_response(&response))
    }
}

fn parse_url<T>(
    ctor: fn(String) -> std::result::Result<T, oauth2::url::ParseError>,
    raw: &str,
    field: &str,
) -> Result<T> {
    ctor(raw.to_string()).map_err(|e| MeowError::Config(format!("invalid {field} '{raw}': {e}")))
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}

fn token_from_response(resp: &BasicTokenResponse) -> OAuthToken {
    let mut token = OAuthToken::new(resp.access_token().secret().clone());
    if let Some(refresh) = resp.refresh_token() {
        token = token.with_refresh(refresh.secret().clone());
    }
    if let Some(expires_in) = resp.expires_in() {
        token = token.with_expiry(expires_in.as_secs());
    }
    if let Some(scopes) = resp.scopes() {
        let joined = scopes
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        token = token.with_scope(joined);
    }
    token
}
