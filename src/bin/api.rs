//! Complaint Dash API Server
//!
//! Run with: cargo run --bin complaint-dash-api
//!
//! # Configuration
//!
//! Read from the first config file found (see `Config::load_default`), then
//! overridden by environment variables:
//! - `COMPLAINT_DASH_FEED_URL`: Complaint endpoint (default: http://localhost:5000/api/complaints)
//! - `COMPLAINT_DASH_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `COMPLAINT_DASH_API_PORT`: Port to listen on (default: 8083)
//! - `COMPLAINT_DASH_TIMEZONE`: Zone used for heatmap bucketing and dates (default: local)
//! - `RUST_LOG`: Log filter (default: from `[logging] level`)

use complaint_dash::api::{serve, AppState};
use complaint_dash::config::Config;
use complaint_dash::feed::{FeedClient, FeedSource};
use complaint_dash::logging::{init_tracing, with_bootstrap_logging};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = with_bootstrap_logging(Config::load_default);
    init_tracing(&config.logging);

    tracing::info!(
        "Starting complaint dashboard API v{}",
        env!("CARGO_PKG_VERSION")
    );

    let client: Arc<dyn FeedSource> = Arc::new(FeedClient::new(config.feed.client_config())?);
    tracing::info!("Complaint feed: {}", client.describe());
    tracing::info!("Display timezone: {}", config.dashboard.timezone);

    let state = AppState::new(&config.dashboard);
    state.spawn_initial_fetch(client);

    serve(state, &config.api).await?;

    tracing::info!("Complaint dashboard API stopped");
    Ok(())
}
