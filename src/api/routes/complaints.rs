//! Complaint Table Routes
//!
//! - GET /api/v1/complaints?page=N&selected=a,b - One page of the complaint table

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::ComplaintsQuery;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::dashboard::{ComplaintTable, TablePage};

/// GET /api/v1/complaints
///
/// Pages are 1-based. Pages past the end come back with no rows.
pub async fn list_complaints(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ComplaintsQuery>,
) -> ApiResult<Json<TablePage>> {
    if query.page == 0 {
        return Err(ApiError::Validation("page numbers start at 1".to_string()));
    }

    let selected: Vec<String> = query
        .selected
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();

    let (zone, page_size) = (state.zone, state.page_size);
    let page = state
        .with_feed(|feed| {
            let mut table = ComplaintTable::new(&feed.complaints, page_size, zone);
            for id in &selected {
                table.toggle_by_label(id);
            }
            table.page_view(query.page - 1)
        })
        .await?;

    Ok(Json(page))
}
