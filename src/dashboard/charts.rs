//! Text charts
//!
//! Terminal renderings of the three chart aggregates: a horizontal bar chart
//! for severity, a share legend standing in for the meal-type pie, and an
//! hour × weekday grid for complaint timing.

use std::collections::HashMap;

use crate::aggregate::{
    known_meal_total, weekday_name, HeatmapCell, MealSlice, SeverityBucket, WEEKDAYS,
};

const BAR_WIDTH: usize = 40;

/// Heatmap shades from sparse to dense
const SHADES: [char; 4] = ['░', '▒', '▓', '█'];

pub fn render_severity_chart(buckets: &[SeverityBucket]) -> String {
    let max = buckets.iter().map(|b| b.count).max().unwrap_or(0);

    let mut out = String::new();
    for bucket in buckets {
        out.push_str(&format!(
            "  {} │{:<width$} {}\n",
            bucket.severity,
            bar(bucket.count, max),
            bucket.count,
            width = BAR_WIDTH
        ));
    }
    out
}

pub fn render_meal_chart(slices: &[MealSlice]) -> String {
    let total = known_meal_total(slices);
    let max = slices.iter().map(|s| s.value).max().unwrap_or(0);

    let mut out = String::new();
    for slice in slices {
        out.push_str(&format!(
            "  {:<10} │{:<width$} {} ({:.1}%)\n",
            slice.name.as_str(),
            bar(slice.value, max),
            slice.value,
            slice.share(total) * 100.0,
            width = BAR_WIDTH
        ));
    }
    out
}

/// Hour columns, weekday rows. Shade follows the cell's complaint count.
pub fn render_heatmap(cells: &[HeatmapCell]) -> String {
    let lookup: HashMap<(&str, u32), &HeatmapCell> =
        cells.iter().map(|c| ((c.day, c.hour), c)).collect();
    let max = cells.iter().map(|c| c.count).max().unwrap_or(0);

    let mut out = String::from("           ");
    for hour in 0..24 {
        out.push_str(&format!("{:>3}", hour));
    }
    out.push('\n');

    for day in WEEKDAYS {
        let name = weekday_name(day);
        out.push_str(&format!("{:<11}", name));
        for hour in 0..24 {
            let glyph = lookup
                .get(&(name, hour))
                .map(|cell| shade(cell.count, max))
                .unwrap_or('·');
            out.push_str(&format!("{:>3}", glyph));
        }
        out.push('\n');
    }

    let total: usize = cells.iter().map(|c| c.count).sum();
    out.push_str(&format!(
        "  {} complaints placed · densest cell {} · {} sparse → {} dense\n",
        total, max, SHADES[0], SHADES[3]
    ));
    out
}

/// Bar proportional to `value / max`, at least one block for non-zero values
fn bar(value: usize, max: usize) -> String {
    if value == 0 || max == 0 {
        return String::new();
    }
    let len = (value * BAR_WIDTH + max - 1) / max;
    "█".repeat(len.min(BAR_WIDTH))
}

fn shade(count: usize, max: usize) -> char {
    if max == 0 {
        return SHADES[0];
    }
    let level = (count * SHADES.len() + max - 1) / max;
    SHADES[level.clamp(1, SHADES.len()) - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{heatmap_cells, meal_type_distribution, severity_histogram};
    use crate::feed::{Complaint, DisplayZone};

    #[test]
    fn test_bar_scaling() {
        assert_eq!(bar(0, 10), "");
        assert_eq!(bar(5, 0), "");
        assert_eq!(bar(10, 10).chars().count(), BAR_WIDTH);
        assert_eq!(bar(5, 10).chars().count(), BAR_WIDTH / 2);
        assert_eq!(bar(1, 1000).chars().count(), 1);
    }

    #[test]
    fn test_shade_levels() {
        assert_eq!(shade(1, 1), '█');
        assert_eq!(shade(1, 8), '░');
        assert_eq!(shade(4, 8), '▒');
        assert_eq!(shade(8, 8), '█');
    }

    #[test]
    fn test_severity_chart_has_five_rows() {
        let complaints = vec![Complaint::new(1).severity(2), Complaint::new(2).severity(2)];
        let text = render_severity_chart(&severity_histogram(&complaints));

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("  2 │"));
        assert!(lines[1].ends_with(" 2"));
    }

    #[test]
    fn test_meal_chart_shares() {
        let complaints = vec![
            Complaint::new(1).meal_type("lunch"),
            Complaint::new(2).meal_type("lunch"),
            Complaint::new(3).meal_type("dinner"),
            Complaint::new(4).meal_type("dinner"),
        ];
        let text = render_meal_chart(&meal_type_distribution(&complaints));

        assert!(text.contains("(50.0%)"));
        assert!(text.contains("breakfast"));
        assert!(text.contains("(0.0%)"));
    }

    #[test]
    fn test_heatmap_grid_dimensions() {
        let complaints = vec![Complaint::new(1).severity(3).filed("2024-03-15T14:30:00")];
        let text = render_heatmap(&heatmap_cells(&complaints, DisplayZone::Utc));

        let lines: Vec<&str> = text.lines().collect();
        // header + 7 weekdays + legend
        assert_eq!(lines.len(), 9);
        let friday = lines.iter().find(|l| l.starts_with("Friday")).unwrap();
        assert_eq!(friday.matches('█').count(), 1);
        assert!(lines[8].contains("1 complaints placed"));
    }
}
