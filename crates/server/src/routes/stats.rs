//! Global statistics endpoint.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chatview_types::Statistics;

use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/statistics - Whole-table totals.
///
/// Returns message and session counts with the message total split by
/// kind. Computed in a single table scan.
pub async fn get_statistics(State(state): State<Arc<AppState>>) -> ApiResult<Json<Statistics>> {
    let stats = state.db.statistics().await?;
    Ok(Json(stats))
}

/// Create the statistics routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/statistics", get(get_statistics))
}
