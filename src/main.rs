use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

mod config;
mod dashboard;
mod models;
mod predict;
mod sources;
mod upstream;

use config::Config;
use dashboard::AppState;
use sources::{MlbSource, NbaSource, ScheduleSource};
use upstream::UpstreamClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let timeout = Duration::from_secs(config.upstream_timeout_secs);
    let cache_ttl = Duration::from_secs(config.cache_ttl_secs);

    // MLB needs no credential; its team directory is a static table.
    let mlb = Arc::new(MlbSource::new(UpstreamClient::new(
        "mlb-stats",
        &config.mlb_api_url,
        None,
        timeout,
        cache_ttl,
    )?));

    if config.nba_api_key.is_none() {
        warn!("NBA_API_KEY not set – NBA requests will be rejected upstream and render empty");
    }
    let nba_client = UpstreamClient::new(
        "balldontlie",
        &config.nba_api_url,
        config.nba_api_key.clone(),
        timeout,
        cache_ttl,
    )?;

    // Team directory is loaded here, explicitly, so a fake client can stand
    // in during tests and startup order stays visible.
    let nba = Arc::new(NbaSource::connect(nba_client).await);
    info!("Loaded {} NBA teams", nba.teams().len());
    info!("Upstream sources ready: {}, {}", mlb.name(), nba.name());

    let app = dashboard::router(AppState { mlb, nba });
    let addr: SocketAddr = config.listen_addr.parse()?;
    info!("Dashboard listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Run dashboard server (blocks until shutdown)
    axum::serve(listener, app).await?;

    Ok(())
}
