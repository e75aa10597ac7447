//! # Complaint Dash
//!
//! Restaurant complaint dashboard. Fetches a complaint feed once, derives the
//! summary aggregates a manager looks at, and presents them either in the
//! terminal or as JSON over HTTP.
//!
//! ## Features
//!
//! - **One-shot feed**: a single GET with `Loading → Loaded | Failed` states
//! - **Aggregates**: severity histogram, meal-type distribution, timing heatmap
//! - **Overview cards**: total, average severity, open cases, resolution rate
//! - **Complaint table**: long-format dates, row selection, pages of five
//! - **API**: Axum server exposing every aggregate for a charting front end
//!
//! ## Modules
//!
//! - [`feed`]: Wire model, HTTP client and fetch lifecycle
//! - [`aggregate`]: Pure functions from complaints to chart data
//! - [`dashboard`]: Terminal rendering of cards, charts and the table
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use complaint_dash::dashboard::{Dashboard, DashboardOptions};
//! use complaint_dash::feed::{FeedClient, FeedClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FeedClient::new(FeedClientConfig::default())?;
//!
//!     let mut dashboard = Dashboard::new(DashboardOptions::default());
//!     dashboard.initialize(&client).await;
//!
//!     print!("{}", dashboard.render());
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod api;
pub mod config;
pub mod dashboard;
pub mod feed;
pub mod logging;

// Re-export top-level types for convenience
pub use feed::{
    Complaint, ComplaintId, DisplayZone, FeedClient, FeedError, FeedResponse, FeedSource,
    FeedState, FileFeed, MealType,
};

pub use aggregate::{
    heatmap_cells, heatmap_points, meal_type_distribution, severity_histogram, DashboardSnapshot,
    HeatmapCell, HeatmapPoint, MealSlice, OverviewMetrics, SeverityBucket,
};

pub use dashboard::{ComplaintTable, Dashboard, DashboardOptions, Section, TablePage};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, Config, ConfigError, DashboardConfig, FeedConfig, LoggingConfig};
