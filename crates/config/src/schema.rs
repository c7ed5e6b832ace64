use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Fallback used when `API_KEY` is not set. Not suitable for production.
pub const DEFAULT_API_KEY: &str = "default-api-key";

/// Environment variables read without the `MEOWSEEK_` prefix.
const RAW_ENV_KEYS: &[&str] = &["client_id", "client_secret", "redirect_uri", "api_key"];

fn default_port() -> u16 {
    8000
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_api_key() -> String {
    DEFAULT_API_KEY.to_string()
}
fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}
fn default_request_timeout_secs() -> u64 {
    10
}

/// Spotify endpoints. Overridable so tests and proxies can point elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotifyEndpoints {
    #[serde(default = "SpotifyEndpoints::default_auth_url")]
    pub auth_url: String,
    #[serde(default = "SpotifyEndpoints::default_token_url")]
    pub token_url: String,
    /// Web API base, without a trailing slash.
    #[serde(default = "SpotifyEndpoints::default_api_base")]
    pub api_base: String,
}

impl SpotifyEndpoints {
    fn default_auth_url() -> String {
        "https://accounts.spotify.com/authorize".to_string()
    }
    fn default_token_url() -> String {
        "https://accounts.spotify.com/api/token".to_string()
    }
    fn default_api_base() -> String {
        "https://api.spotify.com/v1".to_string()
    }
}

impl Default for SpotifyEndpoints {
    fn default() -> Self {
        Self {
            auth_url: Self::default_auth_url(),
            token_url: Self::default_token_url(),
            api_base: Self::default_api_base(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    #[serde(default = "LogConfig::default_level")]
    pub level: String,
}

impl LogConfig {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Listen port (defaults to 8000).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Listen address (defaults to `127.0.0.1`).
    #[serde(default = "default_host")]
    pub host: String,
    /// Spotify application client id.
    #[serde(default)]
    pub client_id: String,
    /// Spotify application client secret.
    #[serde(default)]
    pub client_secret: String,
    /// Redirect URI registered with the Spotify application (points at `/callback`).
    #[serde(default)]
    pub redirect_uri: String,
    /// Static key expected in the `X-API-Key` header of protected routes.
    #[serde(default = "default_api_key")]
    pub api_key: String,
    /// Front-end origin allowed by CORS.
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
    /// Timeout applied to every outbound Spotify call.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Optional JSON file the OAuth token is persisted to.
    #[serde(default)]
    pub token_cache: Option<PathBuf>,
    #[serde(default)]
    pub spotify: SpotifyEndpoints,
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: String::new(),
            api_key: default_api_key(),
            cors_origin: default_cors_origin(),
            request_timeout_secs: default_request_timeout_secs(),
            token_cache: None,
            spotify: SpotifyEndpoints::default(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Parses configuration from a YAML string, merged with defaults.
    ///
    /// The environment is not consulted.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the YAML is invalid or extraction fails.
    #[allow(clippy::result_large_err)]
    pub fn from_yaml(yaml: &str) -> Result<Self, figment::Error> {
        use figment::{
            Figment,
            providers::{Format as _, Serialized, Yaml},
        };
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Yaml::string(yaml))
            .extract()
    }

    /// Loads configuration from defaults, an optional YAML file, and the
    /// environment, in increasing order of precedence.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the file cannot be parsed or a value
    /// has the wrong type.
    #[allow(clippy::result_large_err)]
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        use figment::{
            Figment,
            providers::{Env, Format as _, Serialized, Yaml},
        };
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::raw().only(RAW_ENV_KEYS))
            .merge(Env::prefixed("MEOWSEEK_").split("__"))
            .extract()
    }

    /// Returns `true` when the insecure built-in API key is in effect.
    #[must_use]
    pub fn uses_default_api_key(&self) -> bool {
        self.api_key == DEFAULT_API_KEY
    }

    /// Names of the OAuth settings that are still empty.
    #[must_use]
    pub fn missing_oauth_settings(&self) -> Vec<&'static str> {
        [
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("redirect_uri", &self.redirect_uri),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| k)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_YAML: &str = r#"
port: 9000
host: "0.0.0.0"
client_id: "cid"
client_secret: "csecret"
redirect_uri: "http://localhost:9000/callback"
api_key: "widget-key"
cors_origin: "https://widget.example"
token_cache: "/tmp/meowseek-token.json"
spotify:
  api_base: "http://127.0.0.1:4000/v1"
"#;

    #[test]
    fn test_default_config() {
        let c = Config::default();
        assert_eq!(c.port, 8000);
        assert_eq!(c.host, "127.0.0.1");
        assert_eq!(c.api_key, DEFAULT_API_KEY);
        assert_eq!(c.cors_origin, "http://localhost:3000");
        assert_eq!(c.request_timeout_secs, 10);
        assert!(c.token_cache.is_none());
        assert!(c.uses_default_api_key());
    }

    #[test]
    fn test_from_yaml_values() {
        let c = Config::from_yaml(SAMPLE_YAML).unwrap();
        assert_eq!(c.port, 9000);
        assert_eq!(c.host, "0.0.0.0");
        assert_eq!(c.api_key, "widget-key");
        assert!(!c.uses_default_api_key());
        assert_eq!(c.cors_origin, "https://widget.example");
        assert_eq!(
            c.token_cache.as_deref(),
            Some(Path::new("/tmp/meowseek-token.json"))
        );
        assert!(c.missing_oauth_settings().is_empty());
    }

    #[test]
    fn test_from_yaml_partial_spotify_keeps_defaults() {
        let c = Config::from_yaml(SAMPLE_YAML).unwrap();
        assert_eq!(c.spotify.api_base, "http://127.0.0.1:4000/v1");
        assert_eq!(c.spotify.auth_url, "https://accounts.spotify.com/authorize");
        assert_eq!(c.spotify.token_url, "https://accounts.spotify.com/api/token");
    }

    #[test]
    fn test_from_yaml_defaults_applied() {
        let c = Config::from_yaml("port: 1234").unwrap();
        assert_eq!(c.port, 1234);
        assert_eq!(c.host, "127.0.0.1");
        assert_eq!(c.log.level, "info");
    }

    #[test]
    fn test_missing_oauth_settings() {
        let c = Config::from_yaml("client_id: abc").unwrap();
        assert_eq!(
            c.missing_oauth_settings(),
            vec!["client_secret", "redirect_uri"]
        );
    }

    #[test]
    fn test_load_reads_unprefixed_env() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("CLIENT_ID", "env-client");
            jail.set_env("CLIENT_SECRET", "env-secret");
            jail.set_env("REDIRECT_URI", "http://localhost:8000/callback");
            jail.set_env("API_KEY", "env-key");
            let c = Config::load(None)?;
            assert_eq!(c.client_id, "env-client");
            assert_eq!(c.client_secret, "env-secret");
            assert_eq!(c.redirect_uri, "http://localhost:8000/callback");
            assert_eq!(c.api_key, "env-key");
            Ok(())
        });
    }

    #[test]
    fn test_load_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("meowseek.yaml", "port: 9100\napi_key: from-file\n")?;
            jail.set_env("API_KEY", "from-env");
            jail.set_env("MEOWSEEK_LOG__LEVEL", "debug");
            let c = Config::load(Some(Path::new("meowseek.yaml")))?;
            assert_eq!(c.port, 9100);
            assert_eq!(c.api_key, "from-env");
            assert_eq!(c.log.level, "debug");
            Ok(())
        });
    }

    #[test]
    fn test_load_prefixed_env() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("MEOWSEEK_PORT", "8123");
            jail.set_env("MEOWSEEK_REQUEST_TIMEOUT_SECS", "3");
            let c = Config::load(None)?;
            assert_eq!(c.port, 8123);
            assert_eq!(c.request_timeout_secs, 3);
            Ok(())
        });
    }
}
