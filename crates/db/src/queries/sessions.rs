// crates/db/src/queries/sessions.rs
// Session rollups: the session list, full-session fetch, and top sessions.

use crate::{Database, DbResult, CHAT_TABLE};
use chatview_types::{ChatMessage, SessionSummary, TopSession};
use chrono::NaiveDateTime;

/// Upper bound for `top_sessions`; requests above it are clamped.
pub(crate) const MAX_TOP_SESSIONS: i64 = 100;

impl Database {
    /// List every session with message counts and first/last activity,
    /// most recently active first.
    pub async fn list_sessions(&self) -> DbResult<Vec<SessionSummary>> {
        let sql = format!(
            r#"
            SELECT
                session_id,
                COUNT(*) AS total_messages,
                COUNT(*) FILTER (WHERE message->>'type' = 'human') AS human_messages,
                COUNT(*) FILTER (WHERE message->>'type' = 'ai') AS ai_messages,
                MIN(created_at AT TIME ZONE $1) AS first_message,
                MAX(created_at AT TIME ZONE $1) AS last_message
            FROM {CHAT_TABLE}
            GROUP BY session_id
            ORDER BY MAX(created_at) DESC NULLS LAST, session_id ASC
            "#
        );

        let rows: Vec<(
            String,
            i64,
            i64,
            i64,
            Option<NaiveDateTime>,
            Option<NaiveDateTime>,
        )> = sqlx::query_as(&sql)
            .bind(self.display_timezone())
            .fetch_all(self.pool())
            .await?;

        let summaries = rows
            .into_iter()
            .map(
                |(session_id, total, human, ai, first_message, last_message)| SessionSummary {
                    session_id,
                    total_messages: total,
                    human_messages: human,
                    ai_messages: ai,
                    first_message,
                    last_message,
                },
            )
            .collect();

        Ok(summaries)
    }

    /// Fetch every message of one session in chronological order.
    ///
    /// Row ids are assigned in insert order, which for this table is also
    /// chronological, so ordering by `id` is ordering by time. An unknown
    /// session simply has no messages.
    pub async fn conversation_by_session(&self, session_id: &str) -> DbResult<Vec<ChatMessage>> {
        let sql = format!(
            r#"
            SELECT id, session_id, message, created_at AT TIME ZONE $1 AS created_at
            FROM {CHAT_TABLE}
            WHERE session_id = $2
            ORDER BY id ASC
            "#
        );

        let rows: Vec<(i64, String, serde_json::Value, Option<NaiveDateTime>)> =
            sqlx::query_as(&sql)
                .bind(self.display_timezone())
                .bind(session_id)
                .fetch_all(self.pool())
                .await?;

        Ok(rows
            .into_iter()
            .map(|(id, session_id, message, created_at)| ChatMessage {
                id,
                session_id,
                message,
                created_at,
            })
            .collect())
    }

    /// The busiest sessions by message count, ties broken by session id for
    /// a stable order.
    pub async fn top_sessions(&self, limit: i64) -> DbResult<Vec<TopSession>> {
        let limit = limit.clamp(1, MAX_TOP_SESSIONS);

        let sql = format!(
            r#"
            SELECT session_id, COUNT(*) AS message_count
            FROM {CHAT_TABLE}
            GROUP BY session_id
            ORDER BY message_count DESC, session_id ASC
            LIMIT $1
            "#
        );

        let rows: Vec<(String, i64)> = sqlx::query_as(&sql)
            .bind(limit)
            .fetch_all(self.pool())
            .await?;

        Ok(rows
            .into_iter()
            .map(|(session_id, message_count)| TopSession {
                session_id,
                message_count,
            })
            .collect())
    }
}
