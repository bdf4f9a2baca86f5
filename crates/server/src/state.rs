// crates/server/src/state.rs
//! Application state for the Axum server.

use chatview_db::Database;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    /// Server start time for uptime tracking.
    pub start_time: Instant,
    /// Read-only handle on the chat-log store.
    pub db: Database,
}

impl AppState {
    /// Create a new application state wrapped in an Arc for sharing.
    pub fn new(db: Database) -> Arc<Self> {
        Arc::new(Self {
            start_time: Instant::now(),
            db,
        })
    }

    /// Get the server uptime in seconds.
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatview_db::StoreConfig;

    /// Helper to create an AppState backed by a lazy pool that never
    /// connects. Handler logic that touches the pool gets a clean error.
    fn test_state() -> Arc<AppState> {
        let config = StoreConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            user: "chatview".to_string(),
            password: "chatview".to_string(),
            dbname: "chatlog".to_string(),
            display_timezone: "UTC".to_string(),
        };
        AppState::new(Database::connect_lazy(&config))
    }

    #[tokio::test]
    async fn test_app_state_new() {
        let state = test_state();
        assert!(state.uptime_secs() < 1);
    }

    #[tokio::test]
    async fn test_app_state_clone() {
        let state = test_state();
        let cloned = state.clone();
        // Both point at the same instant
        assert_eq!(state.uptime_secs(), cloned.uptime_secs());
    }
}
