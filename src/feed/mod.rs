//! Complaint Feed
//!
//! Fetches the complaint list from the remote endpoint exactly once and
//! exposes the outcome as a three-state [`FeedState`].
//!
//! ## Architecture
//!
//! - **Types**: wire model (`Complaint`, `FeedResponse`) with defensive defaults
//! - **Client**: `FeedSource` trait, HTTP `FeedClient`, offline `FileFeed`
//! - **State**: `Loading → Loaded | Failed` lifecycle

mod client;
mod state;
mod types;

pub use client::{decode_feed, FeedClient, FeedClientConfig, FeedError, FeedSource, FileFeed, DEFAULT_FEED_URL};
pub use state::{FeedPhase, FeedState};
pub use types::{
    parse_complaint_date, Complaint, ComplaintId, DisplayZone, FeedResponse, MealType, OPEN_STATUS,
};
