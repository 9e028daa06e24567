//! HubSpot Language Proxy entry point.
//!
//! Initializes tracing, resolves configuration from an optional TOML file and
//! the environment, builds the HubSpot client, sets up the Axum router, and
//! starts the HTTP server.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hubspot_language_proxy::config::{AppConfig, DEFAULT_LOG_FILTER, HUBSPOT_TOKEN_ENV};
use hubspot_language_proxy::http::start_server;
use hubspot_language_proxy::hubspot::HubSpotClient;
use hubspot_language_proxy::{create_router, AppState};

/// HubSpot Language Proxy: updates a contact's language preference in HubSpot
#[derive(Parser, Debug)]
#[command(name = "hubspot-language-proxy", version, about)]
struct Args {
    /// Path to configuration file (defaults to config/default.toml when present)
    #[arg(short, long)]
    config: Option<String>,

    /// Log level filter (e.g., "hubspot_language_proxy=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = AppConfig::resolve(args.config.as_deref())?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(
        host = %config.http.host,
        port = config.http.port,
        api_base_url = %config.hubspot.api_base_url,
        timeout_seconds = config.hubspot.request_timeout_seconds,
        "Loaded configuration"
    );

    if !config.hubspot.has_token() {
        tracing::warn!(
            env = HUBSPOT_TOKEN_ENV,
            "HubSpot token not configured; updates will fail and /health reports \
             configuration_missing"
        );
    }

    let client = HubSpotClient::new(&config.hubspot)?;
    let state = AppState::new(&config.hubspot, Arc::new(client));
    let app = create_router(state);

    start_server(app, &config.http).await?;

    Ok(())
}
