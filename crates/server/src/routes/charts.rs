// crates/server/src/routes/charts.rs
//! Chart data endpoints backing the dashboard graphs.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chatview_types::{DayCount, HourCount, TopSession};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::state::AppState;

/// Default trailing window for the per-day chart.
const DEFAULT_DAYS: i64 = 30;

/// Default row count for the top-sessions chart.
const DEFAULT_LIMIT: i64 = 10;

/// Query parameters for GET /api/chart/messages-by-day.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct DaysQuery {
    /// Trailing window in days (default 30, max 365).
    pub days: Option<i64>,
}

/// Query parameters for GET /api/chart/top-sessions.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct LimitQuery {
    /// Number of sessions to return (default 10, max 100).
    pub limit: Option<i64>,
}

/// GET /api/chart/messages-by-day - Daily message counts over a trailing
/// window ending today, split by kind. Days with no traffic are omitted.
pub async fn messages_by_day(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DaysQuery>,
) -> ApiResult<Json<Vec<DayCount>>> {
    let days = query.days.unwrap_or(DEFAULT_DAYS);
    Ok(Json(state.db.messages_by_day(days).await?))
}

/// GET /api/chart/messages-by-hour - Message counts per hour of day across
/// all history, split by kind. Hours with no traffic are omitted.
pub async fn messages_by_hour(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<HourCount>>> {
    Ok(Json(state.db.messages_by_hour().await?))
}

/// GET /api/chart/top-sessions - Sessions ranked by message volume,
/// busiest first.
pub async fn top_sessions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<Json<Vec<TopSession>>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    Ok(Json(state.db.top_sessions(limit).await?))
}

/// Create the chart routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/chart/messages-by-day", get(messages_by_day))
        .route("/chart/messages-by-hour", get(messages_by_hour))
        .route("/chart/top-sessions", get(top_sessions))
}
