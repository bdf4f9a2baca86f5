// crates/server/src/routes/sessions.rs
//! Session listing and transcript endpoints.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chatview_types::{ChatMessage, SessionSummary};

use crate::error::ApiResult;
use crate::metrics::record_request;
use crate::state::AppState;

/// GET /api/sessions - Per-session summaries, most recent activity first.
///
/// One row per session with message counts split by kind and the first
/// and last timestamps rendered in the display timezone. Sessions whose
/// rows all have NULL timestamps sort last.
pub async fn list_sessions(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<SessionSummary>>> {
    let start = Instant::now();

    let sessions = match state.db.list_sessions().await {
        Ok(sessions) => sessions,
        Err(e) => {
            tracing::error!(endpoint = "sessions", error = %e, "Failed to list sessions");
            record_request("sessions", "500", start.elapsed());
            return Err(e.into());
        }
    };

    record_request("sessions", "200", start.elapsed());
    Ok(Json(sessions))
}

/// GET /api/conversation/{session_id} - Full transcript for one session in
/// chronological order.
///
/// An unknown session id yields an empty array rather than a 404.
pub async fn get_conversation(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<Vec<ChatMessage>>> {
    let messages = state.db.conversation_by_session(&session_id).await?;
    Ok(Json(messages))
}

/// Create the session routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sessions", get(list_sessions))
        .route("/conversation/{session_id}", get(get_conversation))
}
