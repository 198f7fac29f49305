//! Quakewatch server binary.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `quakewatch.yaml` (or `QUAKE_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Build shared state and the feed client
//! 4. Start the background feed load
//! 5. Serve the HTTP API until `Ctrl-C`

use std::sync::Arc;

use anyhow::Context;
use quake_feed::FeedClient;
use quake_server::config::LoggingSettings;
use quake_server::{AppState, ConfigSource, QuakeConfig, start_server, startup};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration.
    let (config, source, rejected) = QuakeConfig::load().context("loading configuration")?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!("quakewatch starting");
    match &source {
        ConfigSource::File(path) => info!(path = %path.display(), "configuration loaded"),
        ConfigSource::Defaults => info!("config file not found, using defaults"),
    }
    for r in &rejected {
        warn!(var = r.var, value = %r.value, "ignoring unparseable override");
    }
    info!(
        events_url = %config.feed.events_url,
        overpass = %config.overpass.endpoint,
        categories = ?config.overpass.categories,
        "data sources"
    );

    // 3. Shared state and feed client.
    let state = Arc::new(AppState::from_config(&config).context("building query client")?);
    let feed = FeedClient::new(
        config.feed.events_url.clone(),
        config.feed.tectonic_url.clone(),
        config.feed.timeout(),
    )
    .context("building feed client")?;

    // 4. Background feed load.
    tokio::spawn(startup::load_feeds(Arc::clone(&state), feed));

    // 5. Serve.
    start_server(&config.server, state)
        .await
        .context("running server")?;

    Ok(())
}

fn init_tracing(logging: &LoggingSettings) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}
