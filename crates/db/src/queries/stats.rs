// crates/db/src/queries/stats.rs
// Aggregate counts for the dashboard landing cards and charts.

use crate::{Database, DbResult, CHAT_TABLE};
use chatview_types::{DayCount, HourCount, Statistics};
use chrono::NaiveDate;

/// Largest trailing window the per-day chart will compute.
pub(crate) const MAX_DAY_WINDOW: i64 = 365;

impl Database {
    /// Global message and session totals in a single scan.
    pub async fn statistics(&self) -> DbResult<Statistics> {
        let sql = format!(
            "SELECT COUNT(*), \
                    COUNT(DISTINCT session_id), \
                    COUNT(*) FILTER (WHERE message->>'type' = 'human'), \
                    COUNT(*) FILTER (WHERE message->>'type' = 'ai') \
             FROM {CHAT_TABLE}"
        );

        let row: (i64, i64, i64, i64) =
            sqlx::query_as(&sql).fetch_one(self.pool()).await?;

        Ok(Statistics {
            total_messages: row.0,
            total_sessions: row.1,
            human_messages: row.2,
            ai_messages: row.3,
        })
    }

    /// Message counts per display-timezone day over the trailing `days`
    /// window, today included. Days with no traffic are absent from the
    /// result. `days` is clamped to `1..=MAX_DAY_WINDOW`.
    pub async fn messages_by_day(&self, days: i64) -> DbResult<Vec<DayCount>> {
        // Postgres date arithmetic wants int4, so the window is bound as i32.
        let days = days.clamp(1, MAX_DAY_WINDOW) as i32;
        let tz = self.display_timezone();

        let sql = format!(
            "SELECT (created_at AT TIME ZONE $1)::date AS day, \
                    COUNT(*) AS total, \
                    COUNT(*) FILTER (WHERE message->>'type' = 'human') AS human, \
                    COUNT(*) FILTER (WHERE message->>'type' = 'ai') AS ai \
             FROM {CHAT_TABLE} \
             WHERE (created_at AT TIME ZONE $1)::date > (now() AT TIME ZONE $1)::date - $2 \
             GROUP BY day \
             ORDER BY day ASC"
        );

        let rows: Vec<(NaiveDate, i64, i64, i64)> = sqlx::query_as(&sql)
            .bind(tz)
            .bind(days)
            .fetch_all(self.pool())
            .await?;

        Ok(rows
            .into_iter()
            .map(|(date, total, human, ai)| DayCount {
                date,
                total,
                human,
                ai,
            })
            .collect())
    }

    /// Message counts per display-timezone hour of day, all history.
    /// Hours with no traffic are absent from the result.
    pub async fn messages_by_hour(&self) -> DbResult<Vec<HourCount>> {
        let tz = self.display_timezone();

        let sql = format!(
            "SELECT EXTRACT(HOUR FROM created_at AT TIME ZONE $1)::int AS hour, \
                    COUNT(*) AS total, \
                    COUNT(*) FILTER (WHERE message->>'type' = 'human') AS human, \
                    COUNT(*) FILTER (WHERE message->>'type' = 'ai') AS ai \
             FROM {CHAT_TABLE} \
             GROUP BY hour \
             ORDER BY hour ASC"
        );

        let rows: Vec<(i32, i64, i64, i64)> = sqlx::query_as(&sql)
            .bind(tz)
            .fetch_all(self.pool())
            .await?;

        Ok(rows
            .into_iter()
            .map(|(hour, total, human, ai)| HourCount {
                hour,
                total,
                human,
                ai,
            })
            .collect())
    }
}
