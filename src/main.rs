use anyhow::Result;
use clap::{Parser, Subcommand};
use meowseek_auth::{AccessGate, SpotifyOAuth};
use meowseek_config::Config;
use meowseek_provider::{ProviderHttp, SpotifyConnector};
use meowseek_proxy::AppState;
use meowseek_store::{FileTokenStore, MemoryTokenStore};
use meowseek_types::TokenStore;
use std::{path::PathBuf, sync::Arc, time::Duration};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser, Debug)]
#[command(name = "meowseek", about = "meowseek: Spotify remote control for the desktop widget")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server.
    Serve {
        /// Path to the YAML configuration file.
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// Override the listening port (default: 8000).
        #[arg(short, long)]
        port: Option<u16>,
        /// Override the listening address (default: 127.0.0.1).
        #[arg(long)]
        host: Option<String>,
    },
    /// Print the Spotify authorization URL and exit.
    AuthUrl {
        /// Path to the YAML configuration file.
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, port, host } => cmd_serve(config, port, host).await,
        Commands::AuthUrl { config } => cmd_auth_url(config),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    Config::load(path.map(PathBuf::as_path)).map_err(|e| anyhow::anyhow!("config error: {e}"))
}

fn init_tracing(default_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn cmd_serve(
    config_path: Option<PathBuf>,
    port: Option<u16>,
    host: Option<String>,
) -> Result<()> {
    let mut config = load_config(config_path.as_ref())?;
    if let Some(p) = port {
        config.port = p;
    }
    if let Some(h) = host {
        config.host = h;
    }
    init_tracing(&config.log.level);

    if config.uses_default_api_key() {
        tracing::warn!("API_KEY is not set; using the built-in default key");
    }

    let http = ProviderHttp::build_client(Duration::from_secs(config.request_timeout_secs))?;
    let oauth = SpotifyOAuth::from_config(&config, http.clone())?;
    let connector = Arc::new(SpotifyConnector::new(
        http,
        config.spotify.api_base.clone(),
    ));
    let store = open_store(&config).await;
    let gate = Arc::new(AccessGate::new(
        config.api_key.clone(),
        oauth,
        store,
        connector,
    ));

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(Arc::new(config), gate);
    let app = meowseek_proxy::make_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("meowseek listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

fn cmd_auth_url(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path.as_ref())?;
    let oauth = SpotifyOAuth::from_config(&config, reqwest::Client::new())?;
    println!("{}", oauth.authorize_url());
    Ok(())
}

async fn open_store(config: &Config) -> Arc<dyn TokenStore> {
    match &config.token_cache {
        Some(path) => {
            let store = FileTokenStore::open(path.clone()).await;
            tracing::info!(path = %store.path().display(), "using file token cache");
            Arc::new(store)
        }
        None => Arc::new(MemoryTokenStore::new()),
    }
}
