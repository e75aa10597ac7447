//! Complaint Table
//!
//! Paginated, selectable view over the raw complaint list. Selection is
//! tracked by exact complaint id (numeric `1` and text `"1"` are distinct)
//! and carries no action.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::feed::{Complaint, ComplaintId, DisplayZone};

pub const DEFAULT_PAGE_SIZE: usize = 5;

/// "Mar 15, 2024, 2:30:00 PM"
const LONG_DATETIME_FMT: &str = "%b %-d, %Y, %-I:%M:%S %p";

/// Column header and text width
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub header: &'static str,
    pub width: usize,
}

pub const COLUMNS: [Column; 6] = [
    Column { header: "ID", width: 8 },
    Column { header: "Customer", width: 16 },
    Column { header: "Description", width: 36 },
    Column { header: "Severity", width: 8 },
    Column { header: "Date", width: 26 },
    Column { header: "Status", width: 10 },
];

/// Display-ready table row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub id: String,
    pub customer: String,
    pub description: String,
    pub severity: i64,
    pub date: String,
    pub status: String,
    pub selected: bool,
}

impl TableRow {
    fn cells(&self) -> [String; 6] {
        [
            self.id.clone(),
            self.customer.clone(),
            self.description.clone(),
            self.severity.to_string(),
            self.date.clone(),
            self.status.clone(),
        ]
    }
}

/// One page of rows plus paging metadata. `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePage {
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_rows: usize,
    pub rows: Vec<TableRow>,
}

/// Table over a borrowed complaint list
#[derive(Debug, Clone)]
pub struct ComplaintTable<'a> {
    complaints: &'a [Complaint],
    page_size: usize,
    zone: DisplayZone,
    selected: BTreeSet<ComplaintId>,
}

impl<'a> ComplaintTable<'a> {
    /// A page size of 0 is treated as 1
    pub fn new(complaints: &'a [Complaint], page_size: usize, zone: DisplayZone) -> Self {
        Self {
            complaints,
            page_size: page_size.max(1),
            zone,
            selected: BTreeSet::new(),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        (self.complaints.len() + self.page_size - 1) / self.page_size
    }

    /// Complaints on the 0-based page `index`; empty past the last page
    pub fn page(&self, index: usize) -> &'a [Complaint] {
        let start = index.saturating_mul(self.page_size);
        if start >= self.complaints.len() {
            return &[];
        }
        let end = (start + self.page_size).min(self.complaints.len());
        &self.complaints[start..end]
    }

    /// Flip selection for `id`. Returns whether the row is now selected.
    /// Ids not present in the table are ignored.
    pub fn toggle(&mut self, id: &ComplaintId) -> bool {
        if !self.complaints.iter().any(|c| &c.id == id) {
            tracing::debug!(%id, "Ignoring selection of unknown complaint");
            return false;
        }

        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.clone());
            true
        }
    }

    /// Toggle by an id typed on the command line or in a query string.
    /// Resolves to the first row whose id displays as `label`.
    pub fn toggle_by_label(&mut self, label: &str) -> bool {
        let found = self
            .complaints
            .iter()
            .find(|c| c.id.to_string() == label)
            .map(|c| c.id.clone());

        match found {
            Some(id) => self.toggle(&id),
            None => {
                tracing::debug!(id = label, "Ignoring selection of unknown complaint");
                false
            }
        }
    }

    pub fn is_selected(&self, complaint: &Complaint) -> bool {
        self.selected.contains(&complaint.id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn row(&self, complaint: &Complaint) -> TableRow {
        TableRow {
            id: complaint.id.to_string(),
            customer: complaint.customer_name.clone(),
            description: complaint.description.clone(),
            severity: complaint.severity,
            date: complaint
                .filed_at(self.zone)
                .map(format_long_datetime)
                .unwrap_or_else(|| "-".to_string()),
            status: complaint.status.clone(),
            selected: self.is_selected(complaint),
        }
    }

    /// Rows and metadata for the 0-based page `index`
    pub fn page_view(&self, index: usize) -> TablePage {
        TablePage {
            page: index.saturating_add(1),
            page_size: self.page_size,
            total_pages: self.page_count(),
            total_rows: self.complaints.len(),
            rows: self.page(index).iter().map(|c| self.row(c)).collect(),
        }
    }

    /// Text rendering of the 0-based page `index`
    pub fn render(&self, index: usize) -> String {
        let view = self.page_view(index);
        let mut out = String::new();

        if view.total_rows == 0 {
            out.push_str("No complaints\n");
            return out;
        }

        out.push_str("    ");
        for column in COLUMNS {
            out.push_str(&fit(column.header, column.width));
            out.push(' ');
        }
        out.push('\n');

        let line_width = 4 + COLUMNS.iter().map(|c| c.width + 1).sum::<usize>();
        out.push_str(&"-".repeat(line_width));
        out.push('\n');

        if view.rows.is_empty() {
            out.push_str(&format!("(page {} is empty)\n", view.page));
        }

        for row in &view.rows {
            out.push_str(if row.selected { "[x] " } else { "[ ] " });
            for (cell, column) in row.cells().iter().zip(COLUMNS) {
                out.push_str(&fit(cell, column.width));
                out.push(' ');
            }
            out.push('\n');
        }

        out.push_str(&format!(
            "Page {} of {} · {} complaints · {} selected\n",
            view.page,
            view.total_pages,
            view.total_rows,
            self.selected_count()
        ));

        out
    }
}

/// Long, human-readable date-time, e.g. "Mar 15, 2024, 2:30:00 PM"
pub fn format_long_datetime(dt: NaiveDateTime) -> String {
    dt.format(LONG_DATETIME_FMT).to_string()
}

/// Pad or truncate to exactly `width` characters
fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        return format!("{:<width$}", text, width = width);
    }
    let mut truncated: String = text.chars().take(width.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}
