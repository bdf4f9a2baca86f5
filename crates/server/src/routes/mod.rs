//! API route handlers for the chatview server.

pub mod charts;
pub mod conversations;
pub mod health;
pub mod index;
pub mod metrics;
pub mod sessions;
pub mod stats;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Create the combined router: the HTML index at `/`, Prometheus metrics
/// at `/metrics`, and the JSON API under `/api`.
///
/// Routes:
/// - GET / - HTML index of all sessions
/// - GET /metrics - Prometheus metrics
/// - GET /api/health - Health check
/// - GET /api/sessions - Per-session summaries, most recent activity first
/// - GET /api/conversations - Filtered, paginated message search
/// - GET /api/conversation/{session_id} - Full transcript for one session
/// - GET /api/statistics - Whole-table totals
/// - GET /api/chart/messages-by-day - Daily counts over a trailing window
/// - GET /api/chart/messages-by-hour - Hour-of-day counts, all history
/// - GET /api/chart/top-sessions - Sessions ranked by message volume
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(index::router())
        .merge(metrics::router())
        .nest("/api", health::router())
        .nest("/api", sessions::router())
        .nest("/api", conversations::router())
        .nest("/api", stats::router())
        .nest("/api", charts::router())
        .with_state(state)
}
