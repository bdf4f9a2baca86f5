// crates/server/src/routes/index.rs
//! Server-rendered HTML index at `/`.
//!
//! A single static page with the global stat cards and a table of every
//! session, each linking into the transcript API. This is the only
//! non-JSON surface the server has; everything interactive goes through
//! `/api`.

use std::sync::Arc;

use axum::{extract::State, response::Html, routing::get, Router};
use chatview_types::{SessionSummary, Statistics};
use chrono::NaiveDateTime;

use crate::error::ApiResult;
use crate::state::AppState;

/// GET / - Minimal HTML view of the store: totals plus one row per session.
pub async fn index(State(state): State<Arc<AppState>>) -> ApiResult<Html<String>> {
    let stats = state.db.statistics().await?;
    let sessions = state.db.list_sessions().await?;
    Ok(Html(render_index(stats, &sessions)))
}

/// Escape text for interpolation into HTML. Session ids come from an
/// external pipeline and are not trusted.
fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn format_timestamp(ts: Option<NaiveDateTime>) -> String {
    match ts {
        Some(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

fn render_index(stats: Statistics, sessions: &[SessionSummary]) -> String {
    let mut html = String::with_capacity(2048 + sessions.len() * 256);
    html.push_str(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Chat Dashboard</title>\n\
         <style>\n\
         body { font-family: sans-serif; margin: 2rem; }\n\
         .cards { display: flex; gap: 1rem; margin-bottom: 1.5rem; }\n\
         .card { border: 1px solid #ccc; border-radius: 4px; padding: 0.8rem 1.2rem; }\n\
         .card b { display: block; font-size: 1.4rem; }\n\
         table { border-collapse: collapse; }\n\
         th, td { border: 1px solid #ccc; padding: 0.4rem 0.8rem; text-align: left; }\n\
         th { background: #f0f0f0; }\n\
         </style>\n</head>\n<body>\n<h1>Chat Dashboard</h1>\n",
    );

    html.push_str(&format!(
        "<div class=\"cards\">\
         <div class=\"card\"><b>{}</b>messages</div>\
         <div class=\"card\"><b>{}</b>sessions</div>\
         <div class=\"card\"><b>{}</b>human</div>\
         <div class=\"card\"><b>{}</b>ai</div>\
         </div>\n",
        stats.total_messages, stats.total_sessions, stats.human_messages, stats.ai_messages,
    ));

    html.push_str(
        "<table>\n<tr><th>Session</th><th>Total</th><th>Human</th><th>AI</th>\
         <th>First message</th><th>Last message</th></tr>\n",
    );

    for session in sessions {
        html.push_str(&format!(
            "<tr><td><a href=\"/api/conversation/{}\">{}</a></td>\
             <td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            urlencoding::encode(&session.session_id),
            html_escape(&session.session_id),
            session.total_messages,
            session.human_messages,
            session.ai_messages,
            format_timestamp(session.first_message),
            format_timestamp(session.last_message),
        ));
    }

    html.push_str("</table>\n</body>\n</html>\n");
    html
}

/// Create the index routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn stats() -> Statistics {
        Statistics {
            total_messages: 12,
            total_sessions: 3,
            human_messages: 7,
            ai_messages: 5,
        }
    }

    fn summary(session_id: &str) -> SessionSummary {
        SessionSummary {
            session_id: session_id.to_string(),
            total_messages: 4,
            human_messages: 2,
            ai_messages: 2,
            first_message: NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0),
            last_message: None,
        }
    }

    #[test]
    fn test_render_index_shows_stat_cards() {
        let html = render_index(stats(), &[]);
        assert!(html.contains("<b>12</b>messages"));
        assert!(html.contains("<b>3</b>sessions"));
        assert!(html.contains("<b>7</b>human"));
        assert!(html.contains("<b>5</b>ai"));
    }

    #[test]
    fn test_render_index_lists_sessions() {
        let html = render_index(stats(), &[summary("wa-123"), summary("wa-456")]);
        assert!(html.contains("/api/conversation/wa-123"));
        assert!(html.contains("/api/conversation/wa-456"));
        assert!(html.contains("2024-06-01 09:30"));
    }

    #[test]
    fn test_render_index_escapes_session_ids() {
        let html = render_index(stats(), &[summary("<script>alert(1)</script>")]);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_render_index_encodes_link_targets() {
        let html = render_index(stats(), &[summary("session with spaces/and+stuff")]);
        assert!(html.contains("/api/conversation/session%20with%20spaces%2Fand%2Bstuff"));
    }

    #[test]
    fn test_render_index_missing_timestamps() {
        let html = render_index(stats(), &[summary("wa-123")]);
        // last_message is None
        assert!(html.contains("<td>-</td>"));
    }

    #[test]
    fn test_render_index_empty() {
        let html = render_index(stats(), &[]);
        assert!(html.contains("</table>"));
        assert!(!html.contains("<td>"));
    }
}
