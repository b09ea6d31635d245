// Activity feed endpoint: synthesized on demand, filtered by entry type,
// paginated like the blog listing.

use crate::activity;
use crate::api::AppState;
use crate::models::{ActivityPage, paginate};
use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    /// Entry type to keep; `all` (or absent) keeps everything.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_page() -> usize {
    1
}

fn default_limit() -> usize {
    10
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ActivityQuery>,
) -> Json<ActivityPage> {
    let mut entries = activity::collect(&state.store);

    if let Some(kind) = &query.kind {
        if kind != "all" {
            entries.retain(|entry| &entry.kind == kind);
        }
    }

    let (activities, pagination) = paginate(entries, query.page, query.limit);
    Json(ActivityPage {
        activities,
        pagination,
    })
}
