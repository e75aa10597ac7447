//! Dashboard page
//!
//! Root composer owning the fetch lifecycle. It starts in `Loading`, runs
//! the feed fetch once via [`Dashboard::initialize`], and lays out the page
//! for whichever state it settles in:
//!
//! - `Loading`: a spinner line
//! - `Failed`: a single error banner, nothing else
//! - `Loaded`: title, overview cards, severity chart, meal-type chart,
//!   timing heatmap, complaint table
//!
//! Each section recomputes its aggregate from the raw list on every render.

mod cards;
mod charts;
mod table;

pub use cards::{overview_cards, render_cards, Card};
pub use charts::{render_heatmap, render_meal_chart, render_severity_chart};
pub use table::{
    format_long_datetime, Column, ComplaintTable, TablePage, TableRow, COLUMNS, DEFAULT_PAGE_SIZE,
};

use crate::aggregate::{
    heatmap_cells, meal_type_distribution, severity_histogram, DashboardSnapshot, OverviewMetrics,
};
use crate::feed::{DisplayZone, FeedSource, FeedState};

pub const PAGE_TITLE: &str = "Restaurant Dashboard";

/// Page layout blocks, in render order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Spinner,
    ErrorBanner,
    Title,
    Overview,
    SeverityChart,
    MealTypeChart,
    Heatmap,
    Table,
}

impl Section {
    /// Heading shown above the section, if any
    pub fn heading(&self) -> Option<&'static str> {
        match self {
            Section::SeverityChart => Some("Complaint Severity Distribution"),
            Section::MealTypeChart => Some("Meal Type Distribution"),
            Section::Heatmap => Some("Complaint Timing Heatmap"),
            Section::Table => Some("Recent Complaints"),
            _ => None,
        }
    }
}

/// Rendering options
#[derive(Debug, Clone)]
pub struct DashboardOptions {
    /// Zone complaint timestamps are read in
    pub zone: DisplayZone,
    /// Table rows per page
    pub page_size: usize,
    /// 0-based table page to show
    pub page: usize,
    /// Complaint ids to mark as selected in the table
    pub selected: Vec<String>,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            zone: DisplayZone::Local,
            page_size: DEFAULT_PAGE_SIZE,
            page: 0,
            selected: Vec::new(),
        }
    }
}

/// The composed dashboard page
pub struct Dashboard {
    state: FeedState,
    options: DashboardOptions,
}

impl Dashboard {
    /// New dashboard in the `Loading` state
    pub fn new(options: DashboardOptions) -> Self {
        Self::with_state(FeedState::Loading, options)
    }

    /// Dashboard over an already-settled state
    pub fn with_state(state: FeedState, options: DashboardOptions) -> Self {
        Self { state, options }
    }

    /// Fetch the feed if that has not happened yet. Settled states are
    /// terminal, so later calls leave the state untouched.
    pub async fn initialize(&mut self, source: &dyn FeedSource) -> &FeedState {
        if self.state.is_settled() {
            tracing::debug!("Dashboard already initialized, skipping fetch");
        } else {
            self.state = FeedState::load(source).await;
        }
        &self.state
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn options(&self) -> &DashboardOptions {
        &self.options
    }

    /// Sections the current state renders
    pub fn sections(&self) -> Vec<Section> {
        match self.state {
            FeedState::Loading => vec![Section::Spinner],
            FeedState::Failed(_) => vec![Section::ErrorBanner],
            FeedState::Loaded(_) => vec![
                Section::Title,
                Section::Overview,
                Section::SeverityChart,
                Section::MealTypeChart,
                Section::Heatmap,
                Section::Table,
            ],
        }
    }

    /// All aggregates, once loaded
    pub fn snapshot(&self) -> Option<DashboardSnapshot> {
        self.state
            .feed()
            .map(|feed| DashboardSnapshot::build(feed, self.options.zone))
    }

    /// Table with the configured selection applied, once loaded
    pub fn table(&self) -> Option<ComplaintTable<'_>> {
        let feed = self.state.feed()?;
        let mut table = ComplaintTable::new(&feed.complaints, self.options.page_size, self.options.zone);
        for id in &self.options.selected {
            table.toggle_by_label(id);
        }
        Some(table)
    }

    /// Full page as text
    pub fn render(&self) -> String {
        self.sections()
            .into_iter()
            .map(|section| self.render_section(section))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// One section as text. Sections the state cannot supply render empty.
    pub fn render_section(&self, section: Section) -> String {
        let body = match (&self.state, section) {
            (FeedState::Loading, Section::Spinner) => "Loading complaints...\n".to_string(),
            (FeedState::Failed(message), Section::ErrorBanner) => format!("Error: {}\n", message),
            (FeedState::Loaded(_), Section::Title) => {
                format!("{}\n{}\n", PAGE_TITLE, "=".repeat(PAGE_TITLE.len()))
            }
            (FeedState::Loaded(feed), Section::Overview) => {
                render_cards(&overview_cards(&OverviewMetrics::compute(feed)))
            }
            (FeedState::Loaded(feed), Section::SeverityChart) => {
                render_severity_chart(&severity_histogram(&feed.complaints))
            }
            (FeedState::Loaded(feed), Section::MealTypeChart) => {
                render_meal_chart(&meal_type_distribution(&feed.complaints))
            }
            (FeedState::Loaded(feed), Section::Heatmap) => {
                render_heatmap(&heatmap_cells(&feed.complaints, self.options.zone))
            }
            (FeedState::Loaded(_), Section::Table) => self
                .table()
                .map(|table| table.render(self.options.page))
                .unwrap_or_default(),
            _ => return String::new(),
        };

        match section.heading() {
            Some(heading) => format!("{}\n{}", heading, body),
            None => body,
        }
    }

    /// Machine-readable page: state, error, aggregates and the table page
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "state": self.state.phase(),
            "error": self.state.error(),
            "dashboard": self.snapshot(),
            "table": self.table().map(|table| table.page_view(self.options.page)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{Complaint, FeedError, FeedResponse};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingFeed {
        calls: AtomicUsize,
        result: fn() -> Result<FeedResponse, FeedError>,
    }

    #[async_trait]
    impl FeedSource for CountingFeed {
        fn describe(&self) -> String {
            "counting".to_string()
        }

        async fn fetch(&self) -> Result<FeedResponse, FeedError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.result)()
        }
    }

    fn sample_feed() -> Result<FeedResponse, FeedError> {
        Ok(FeedResponse::new(vec![
            Complaint::new(1)
                .customer("Ada")
                .description("Cold soup")
                .severity(3)
                .filed("2024-03-15T14:30:00")
                .meal_type("lunch")
                .status("Open"),
            Complaint::new(2)
                .customer("Bo")
                .description("Wrong order")
                .severity(5)
                .filed("2024-03-16T19:15:00")
                .meal_type("dinner")
                .status("Resolved"),
        ]))
    }

    fn refused_feed() -> Result<FeedResponse, FeedError> {
        Err(FeedError::Io {
            path: "feed.json".into(),
            error: "connection refused".to_string(),
        })
    }

    fn options() -> DashboardOptions {
        DashboardOptions {
            zone: DisplayZone::Utc,
            ..Default::default()
        }
    }

    #[test]
    fn test_loading_page() {
        let dashboard = Dashboard::new(options());
        assert_eq!(dashboard.sections(), vec![Section::Spinner]);
        assert_eq!(dashboard.render(), "Loading complaints...\n");
        assert!(dashboard.snapshot().is_none());
    }

    #[tokio::test]
    async fn test_failed_fetch_shows_only_banner() {
        let source = CountingFeed {
            calls: AtomicUsize::new(0),
            result: refused_feed,
        };
        let mut dashboard = Dashboard::new(options());
        dashboard.initialize(&source).await;

        assert_eq!(dashboard.sections(), vec![Section::ErrorBanner]);
        let page = dashboard.render();
        assert!(page.starts_with("Error: "));
        assert!(page.contains("connection refused"));
        assert!(!page.contains("Complaint Severity Distribution"));
        assert!(!page.contains("Recent Complaints"));
        assert!(dashboard.table().is_none());
    }

    #[tokio::test]
    async fn test_loaded_page_has_all_sections() {
        let source = CountingFeed {
            calls: AtomicUsize::new(0),
            result: sample_feed,
        };
        let mut dashboard = Dashboard::new(options());
        dashboard.initialize(&source).await;

        let page = dashboard.render();
        for heading in [
            PAGE_TITLE,
            "Total Complaints",
            "Complaint Severity Distribution",
            "Meal Type Distribution",
            "Complaint Timing Heatmap",
            "Recent Complaints",
        ] {
            assert!(page.contains(heading), "missing {}", heading);
        }
        assert!(page.contains("50.0%"));
        assert!(page.contains("Mar 15, 2024, 2:30:00 PM"));
    }

    #[tokio::test]
    async fn test_initialize_fetches_once() {
        let source = CountingFeed {
            calls: AtomicUsize::new(0),
            result: sample_feed,
        };
        let mut dashboard = Dashboard::new(options());
        dashboard.initialize(&source).await;
        dashboard.initialize(&source).await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_selection_and_page_options() {
        let feed = sample_feed().unwrap();
        let dashboard = Dashboard::with_state(
            FeedState::Loaded(feed),
            DashboardOptions {
                zone: DisplayZone::Utc,
                page_size: 1,
                page: 1,
                selected: vec!["2".to_string()],
            },
        );

        let text = dashboard.render_section(Section::Table);
        assert!(text.starts_with("Recent Complaints\n"));
        assert!(text.contains("[x] 2"));
        assert!(text.contains("Page 2 of 2"));
    }

    #[test]
    fn test_to_json_failed() {
        let dashboard = Dashboard::with_state(FeedState::Failed("boom".to_string()), options());
        let json = dashboard.to_json();

        assert_eq!(json["state"], "failed");
        assert_eq!(json["error"], "boom");
        assert!(json["dashboard"].is_null());
        assert!(json["table"].is_null());
    }

    #[test]
    fn test_to_json_loaded() {
        let dashboard = Dashboard::with_state(FeedState::Loaded(sample_feed().unwrap()), options());
        let json = dashboard.to_json();

        assert_eq!(json["state"], "loaded");
        assert_eq!(json["dashboard"]["overview"]["open_cases"], 1);
        assert_eq!(json["table"]["total_rows"], 2);
    }
}
