//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::api::error::{ApiError, ApiResult};
use crate::config::DashboardConfig;
use crate::feed::{DisplayZone, FeedResponse, FeedSource, FeedState};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Outcome of the one-shot feed fetch. Written once, then only read.
    pub feed: Arc<RwLock<FeedState>>,
    /// Zone complaint timestamps are read in
    pub zone: DisplayZone,
    /// Complaint table rows per page
    pub page_size: usize,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create state in the `Loading` phase
    pub fn new(config: &DashboardConfig) -> Self {
        Self::with_feed_state(FeedState::Loading, config)
    }

    /// Create state with an already-settled feed
    pub fn with_feed_state(state: FeedState, config: &DashboardConfig) -> Self {
        Self {
            feed: Arc::new(RwLock::new(state)),
            zone: config.timezone,
            page_size: config.page_size.max(1),
            start_time: Instant::now(),
        }
    }

    /// Run the feed fetch in the background and record its outcome.
    /// A state that has already settled is left untouched.
    pub fn spawn_initial_fetch(&self, source: Arc<dyn FeedSource>) -> JoinHandle<()> {
        let feed = Arc::clone(&self.feed);
        tokio::spawn(async move {
            if feed.read().await.is_settled() {
                return;
            }

            let outcome = FeedState::load(source.as_ref()).await;
            tracing::info!(state = ?outcome.phase(), "Initial complaint fetch settled");
            *feed.write().await = outcome;
        })
    }

    /// Run `f` against the loaded feed, or report why there is none
    pub async fn with_feed<T>(&self, f: impl FnOnce(&FeedResponse) -> T) -> ApiResult<T> {
        let guard = self.feed.read().await;
        match &*guard {
            FeedState::Loading => Err(ApiError::FeedLoading),
            FeedState::Failed(message) => Err(ApiError::FeedUnavailable(message.clone())),
            FeedState::Loaded(feed) => Ok(f(feed)),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
