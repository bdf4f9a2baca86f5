// crates/db/src/queries/conversations.rs
// Filtered, paginated message search over the chat-log table.

use crate::{Database, DbResult, CHAT_TABLE};
use chatview_types::{ChatMessage, ConversationPage, MessageKind};
use chrono::{NaiveDate, NaiveDateTime};

/// Upper bound for `per_page`; requests above it are clamped.
pub const MAX_PER_PAGE: i64 = 500;

/// Filters for paginated conversation search.
/// All fields are optional — omitted fields apply no filter.
#[derive(Debug, Clone, Default)]
pub struct ConversationFilter {
    /// Exact session id.
    pub session_id: Option<String>,
    /// Message kind, already validated; an unknown `type` value never
    /// reaches this struct.
    pub kind: Option<MessageKind>,
    /// Case-insensitive substring of `message->>'content'`. LIKE
    /// metacharacters in the needle match literally.
    pub search: Option<String>,
    /// Inclusive lower bound on the display-timezone date.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on the display-timezone date.
    pub date_to: Option<NaiveDate>,
}

/// Number of pages needed for `total` rows at `per_page` rows per page.
/// Always at least 1, so an empty result still renders as page 1 of 1.
pub fn page_count(total: i64, per_page: i64) -> i64 {
    ((total + per_page - 1) / per_page).max(1)
}

/// Coerce out-of-range paging values instead of erroring: `page` floors at
/// 1, `per_page` clamps to `1..=MAX_PER_PAGE`.
fn normalize_paging(page: i64, per_page: i64) -> (i64, i64) {
    (page.max(1), per_page.clamp(1, MAX_PER_PAGE))
}

/// Escape `%`, `_`, and `\` so a search needle matches literally inside a
/// LIKE pattern.
fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Append all WHERE clauses to a QueryBuilder.
/// Called twice — once for COUNT(*), once for the page SELECT.
fn append_filters<'args>(
    qb: &mut sqlx::QueryBuilder<'args, sqlx::Postgres>,
    filter: &'args ConversationFilter,
    tz: &'args str,
) {
    qb.push(" WHERE 1=1");

    if let Some(session_id) = &filter.session_id {
        qb.push(" AND session_id = ");
        qb.push_bind(session_id.as_str());
    }

    if let Some(kind) = filter.kind {
        qb.push(" AND message->>'type' = ");
        qb.push_bind(kind.as_str());
    }

    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", escape_like(search));
        qb.push(" AND message->>'content' ILIKE ");
        qb.push_bind(pattern);
        qb.push(" ESCAPE '\\'");
    }

    if let Some(from) = filter.date_from {
        qb.push(" AND (created_at AT TIME ZONE ");
        qb.push_bind(tz);
        qb.push(")::date >= ");
        qb.push_bind(from);
    }

    if let Some(to) = filter.date_to {
        // Exclusive bound at the next local midnight. Comparing against the
        // date directly keeps late-evening rows, fractional seconds and
        // all, inside the range.
        qb.push(" AND (created_at AT TIME ZONE ");
        qb.push_bind(tz);
        qb.push(")::date < ");
        qb.push_bind(to);
        qb.push(" + 1");
    }
}

impl Database {
    /// Search messages with optional filters, paginated.
    ///
    /// Runs a COUNT query and a page query sharing one filter builder.
    /// Rows come back ordered by `id` ascending; out-of-range paging values
    /// are coerced, and the coerced values are echoed in the result.
    pub async fn search_conversations(
        &self,
        filter: &ConversationFilter,
        page: i64,
        per_page: i64,
    ) -> DbResult<ConversationPage> {
        let (page, per_page) = normalize_paging(page, per_page);
        let tz = self.display_timezone();

        // --- COUNT query ---
        let mut count_qb =
            sqlx::QueryBuilder::new(format!("SELECT COUNT(*) FROM {CHAT_TABLE}"));
        append_filters(&mut count_qb, filter, tz);

        let total: (i64,) = count_qb.build_query_as().fetch_one(self.pool()).await?;
        let total = total.0;

        // --- page query ---
        let mut data_qb =
            sqlx::QueryBuilder::new("SELECT id, session_id, message, created_at AT TIME ZONE ");
        data_qb.push_bind(tz);
        data_qb.push(format!(" AS created_at FROM {CHAT_TABLE}"));
        append_filters(&mut data_qb, filter, tz);

        data_qb.push(" ORDER BY id ASC LIMIT ");
        data_qb.push_bind(per_page);
        data_qb.push(" OFFSET ");
        data_qb.push_bind((page - 1).saturating_mul(per_page));

        let rows: Vec<(i64, String, serde_json::Value, Option<NaiveDateTime>)> =
            data_qb.build_query_as().fetch_all(self.pool()).await?;

        let messages = rows
            .into_iter()
            .map(|(id, session_id, message, created_at)| ChatMessage {
                id,
                session_id,
                message,
                created_at,
            })
            .collect();

        Ok(ConversationPage {
            messages,
            total,
            page,
            per_page,
            total_pages: page_count(total, per_page),
        })
    }
}
