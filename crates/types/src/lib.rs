// crates/types/src/lib.rs
//! Shared response types for the chatview dashboard.
//!
//! These are the JSON shapes the API serves. The query layer builds them
//! from rows of the chat-log table; the server serializes them as-is, so
//! field names here are the wire contract.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// The two producer roles recorded in a message payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Human,
    Ai,
}

impl MessageKind {
    /// Parse a `type` filter value.
    ///
    /// Anything other than the two known kinds yields `None`; callers drop
    /// the filter rather than erroring, so an unknown value behaves like no
    /// filter at all.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "human" => Some(Self::Human),
            "ai" => Some(Self::Ai),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Ai => "ai",
        }
    }
}

/// One row of the chat-log table.
///
/// The `message` payload is passed through untouched; only `type` and
/// `content` inside it are ever inspected, and that happens in SQL.
/// `created_at` has already been converted to the display timezone and is
/// `None` when the row predates the table gaining its timestamp column.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub id: i64,
    pub session_id: String,
    pub message: serde_json::Value,
    pub created_at: Option<NaiveDateTime>,
}

/// Per-session rollup for the session list.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub total_messages: i64,
    pub human_messages: i64,
    pub ai_messages: i64,
    pub first_message: Option<NaiveDateTime>,
    pub last_message: Option<NaiveDateTime>,
}

/// One page of a filtered conversation search.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationPage {
    pub messages: Vec<ChatMessage>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    /// Always at least 1, so an empty result still renders as page 1 of 1.
    pub total_pages: i64,
}

/// Whole-table counters.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Statistics {
    pub total_messages: i64,
    pub total_sessions: i64,
    pub human_messages: i64,
    pub ai_messages: i64,
}

/// Message counts for one display-timezone date.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DayCount {
    pub date: NaiveDate,
    pub total: i64,
    pub human: i64,
    pub ai: i64,
}

/// Message counts for one hour of the day (0-23, display timezone).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HourCount {
    pub hour: i32,
    pub total: i64,
    pub human: i64,
    pub ai: i64,
}

/// A session ranked by message volume.
#[derive(Debug, Clone, Serialize)]
pub struct TopSession {
    pub session_id: String,
    pub message_count: i64,
}
