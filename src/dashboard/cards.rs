//! Overview cards

use crate::aggregate::OverviewMetrics;

const CARD_WIDTH: usize = 20;

/// A titled headline value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: &'static str,
    pub value: String,
}

/// The four overview cards in display order
pub fn overview_cards(metrics: &OverviewMetrics) -> [Card; 4] {
    [
        Card {
            title: "Total Complaints",
            value: metrics.total_complaints.to_string(),
        },
        Card {
            title: "Average Severity",
            value: metrics.average_severity_label(),
        },
        Card {
            title: "Open Cases",
            value: metrics.open_cases.to_string(),
        },
        Card {
            title: "Resolution Rate",
            value: metrics.resolution_rate_label(),
        },
    ]
}

/// Boxed cards laid out side by side
pub fn render_cards(cards: &[Card]) -> String {
    let border = "─".repeat(CARD_WIDTH);
    let mut top = String::new();
    let mut titles = String::new();
    let mut values = String::new();
    let mut bottom = String::new();

    for card in cards {
        top.push_str(&format!("┌{}┐ ", border));
        titles.push_str(&format!("│{:^width$}│ ", card.title, width = CARD_WIDTH));
        values.push_str(&format!("│{:^width$}│ ", card.value, width = CARD_WIDTH));
        bottom.push_str(&format!("└{}┘ ", border));
    }

    [top, titles, values, bottom]
        .iter()
        .map(|line| format!("{}\n", line.trim_end()))
        .collect()
}
