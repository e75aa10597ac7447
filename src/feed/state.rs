//! Fetch lifecycle state
//!
//! `Loading → Loaded | Failed`. Both outcomes are terminal for a session.

use serde::Serialize;

use super::client::FeedSource;
use super::types::FeedResponse;

/// Observable result of the one-shot feed fetch
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FeedState {
    #[default]
    Loading,
    Failed(String),
    Loaded(FeedResponse),
}

impl FeedState {
    /// Run the fetch once and settle into `Loaded` or `Failed`
    pub async fn load(source: &dyn FeedSource) -> Self {
        let origin = source.describe();
        match source.fetch().await {
            Ok(feed) => FeedState::Loaded(feed),
            Err(e) => {
                tracing::error!(source = %origin, error = %e, "Failed to load complaint feed");
                FeedState::Failed(e.to_string())
            }
        }
    }

    /// Whether the fetch has finished, successfully or not
    pub fn is_settled(&self) -> bool {
        !matches!(self, FeedState::Loading)
    }

    pub fn feed(&self) -> Option<&FeedResponse> {
        match self {
            FeedState::Loaded(feed) => Some(feed),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FeedState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn phase(&self) -> FeedPhase {
        match self {
            FeedState::Loading => FeedPhase::Loading,
            FeedState::Failed(_) => FeedPhase::Failed,
            FeedState::Loaded(_) => FeedPhase::Loaded,
        }
    }
}

/// Payload-free discriminant of [`FeedState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedPhase {
    Loading,
    Failed,
    Loaded,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::client::FeedError;
    use crate::feed::types::Complaint;
    use async_trait::async_trait;

    struct StaticFeed(FeedResponse);

    #[async_trait]
    impl FeedSource for StaticFeed {
        fn describe(&self) -> String {
            "static".to_string()
        }

        async fn fetch(&self) -> Result<FeedResponse, FeedError> {
            Ok(self.0.clone())
        }
    }

    struct BrokenFeed;

    #[async_trait]
    impl FeedSource for BrokenFeed {
        fn describe(&self) -> String {
            "broken".to_string()
        }

        async fn fetch(&self) -> Result<FeedResponse, FeedError> {
            Err(FeedError::Io {
                path: "complaints.json".into(),
                error: "permission denied".to_string(),
            })
        }
    }

    #[test]
    fn test_initial_state_is_loading() {
        let state = FeedState::default();
        assert_eq!(state, FeedState::Loading);
        assert!(!state.is_settled());
        assert_eq!(state.phase(), FeedPhase::Loading);
    }

    #[tokio::test]
    async fn test_load_success() {
        let feed = FeedResponse::new(vec![Complaint::new(1).severity(2)]);
        let state = FeedState::load(&StaticFeed(feed.clone())).await;

        assert!(state.is_settled());
        assert_eq!(state.feed(), Some(&feed));
        assert!(state.error().is_none());
    }

    #[tokio::test]
    async fn test_load_failure_keeps_message() {
        let state = FeedState::load(&BrokenFeed).await;

        assert_eq!(state.phase(), FeedPhase::Failed);
        assert_eq!(
            state.error(),
            Some("Failed to read feed payload \"complaints.json\": permission denied")
        );
        assert!(state.feed().is_none());
    }
}
