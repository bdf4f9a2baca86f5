// crates/server/src/routes/conversations.rs
//! Paginated, filtered conversation search endpoint.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chatview_db::ConversationFilter;
use chatview_types::{ConversationPage, MessageKind};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::metrics::RequestTimer;
use crate::state::AppState;

/// Default page size when `per_page` is absent.
const DEFAULT_PER_PAGE: i64 = 50;

/// Query parameters for GET /api/conversations.
///
/// Every parameter is optional. Values that parse but fall outside their
/// range are coerced; values of the wrong shape (`page=abc`) are rejected
/// by the extractor with a 400 before the handler runs.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ConversationsQuery {
    /// Page number, 1-based (default 1).
    pub page: Option<i64>,
    /// Rows per page (default 50, max 500).
    pub per_page: Option<i64>,
    /// Exact session id.
    pub session_id: Option<String>,
    /// Message kind: human or ai. Unknown values are ignored.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Case-insensitive content substring.
    pub search: Option<String>,
    /// Start date, YYYY-MM-DD inclusive.
    pub date_from: Option<String>,
    /// End date, YYYY-MM-DD inclusive.
    pub date_to: Option<String>,
}

/// Treat an absent or empty parameter as no filter.
fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}

/// Parse a YYYY-MM-DD parameter, logging and dropping anything malformed.
fn date_param(param: &'static str, value: &Option<String>) -> Option<NaiveDate> {
    let raw = value.as_deref().filter(|v| !v.is_empty())?;
    match raw.parse::<NaiveDate>() {
        Ok(date) => Some(date),
        Err(_) => {
            tracing::warn!(param, value = raw, "Ignoring malformed date filter");
            None
        }
    }
}

fn build_filter(query: &ConversationsQuery) -> ConversationFilter {
    ConversationFilter {
        session_id: non_empty(&query.session_id),
        kind: query.kind.as_deref().and_then(MessageKind::parse),
        search: non_empty(&query.search),
        date_from: date_param("date_from", &query.date_from),
        date_to: date_param("date_to", &query.date_to),
    }
}

/// GET /api/conversations - Filtered, paginated message search.
///
/// Filters:
/// - `session_id`: exact match
/// - `type`: human or ai; unknown values are ignored
/// - `search`: case-insensitive content substring
/// - `date_from` / `date_to`: inclusive YYYY-MM-DD bounds in the display
///   timezone
///
/// Pagination: `page` (default 1) and `per_page` (default 50, max 500).
/// The response echoes the values actually used after coercion.
pub async fn search_conversations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConversationsQuery>,
) -> ApiResult<Json<ConversationPage>> {
    let timer = RequestTimer::new("conversations");

    let filter = build_filter(&query);
    let page = query.page.unwrap_or(1);
    let per_page = query.per_page.unwrap_or(DEFAULT_PER_PAGE);

    match state.db.search_conversations(&filter, page, per_page).await {
        Ok(result) => {
            timer.finish_ok();
            Ok(Json(result))
        }
        Err(e) => {
            tracing::error!(endpoint = "conversations", error = %e, "Conversation search failed");
            timer.finish_err(500);
            Err(e.into())
        }
    }
}

/// Create the conversation search router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/conversations", get(search_conversations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn query_with(f: impl FnOnce(&mut ConversationsQuery)) -> ConversationsQuery {
        let mut query = ConversationsQuery::default();
        f(&mut query);
        query
    }

    #[test]
    fn test_build_filter_empty_query() {
        let filter = build_filter(&ConversationsQuery::default());
        assert_eq!(filter.session_id, None);
        assert!(filter.kind.is_none());
        assert_eq!(filter.search, None);
        assert_eq!(filter.date_from, None);
        assert_eq!(filter.date_to, None);
    }

    #[test]
    fn test_build_filter_known_kind() {
        let query = query_with(|q| q.kind = Some("human".to_string()));
        assert_eq!(build_filter(&query).kind, Some(MessageKind::Human));

        let query = query_with(|q| q.kind = Some("ai".to_string()));
        assert_eq!(build_filter(&query).kind, Some(MessageKind::Ai));
    }

    #[test]
    fn test_build_filter_unknown_kind_is_ignored() {
        for bad in ["robot", "HUMAN", "Human ", ""] {
            let query = query_with(|q| q.kind = Some(bad.to_string()));
            assert_eq!(build_filter(&query).kind, None, "{bad:?} should be ignored");
        }
    }

    #[test]
    fn test_build_filter_empty_strings_are_ignored() {
        let query = query_with(|q| {
            q.session_id = Some(String::new());
            q.search = Some(String::new());
            q.date_from = Some(String::new());
        });
        let filter = build_filter(&query);
        assert_eq!(filter.session_id, None);
        assert_eq!(filter.search, None);
        assert_eq!(filter.date_from, None);
    }

    #[test]
    fn test_build_filter_dates() {
        let query = query_with(|q| {
            q.date_from = Some("2024-06-01".to_string());
            q.date_to = Some("June 30th".to_string());
        });
        let filter = build_filter(&query);
        assert_eq!(filter.date_from, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(filter.date_to, None, "malformed date is dropped");
    }

    #[test]
    fn test_build_filter_passthrough() {
        let query = query_with(|q| {
            q.session_id = Some("wa-5215512345678".to_string());
            q.search = Some("pedido".to_string());
        });
        let filter = build_filter(&query);
        assert_eq!(filter.session_id.as_deref(), Some("wa-5215512345678"));
        assert_eq!(filter.search.as_deref(), Some("pedido"));
    }
}
