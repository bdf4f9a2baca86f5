// crates/db/src/config.rs
//! Connection settings for the chat-log store.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Connection and display settings for the chat-log store.
///
/// Built once at startup and handed to [`crate::Database::connect`];
/// nothing reads the environment after construction.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
    /// IANA timezone used when rendering timestamps and bucketing dates.
    pub display_timezone: String,
}

impl StoreConfig {
    /// Read the store configuration from the environment.
    ///
    /// `POSTGRES_HOST`, `POSTGRES_USER`, `POSTGRES_PASSWORD`, and
    /// `POSTGRES_DATABASE` are required. `POSTGRES_PORT` defaults to 5432
    /// and `CHATVIEW_TZ` to UTC.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match optional("POSTGRES_PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                var: "POSTGRES_PORT",
                value: raw.clone(),
            })?,
            None => 5432,
        };

        Ok(Self {
            host: require("POSTGRES_HOST")?,
            port,
            user: require("POSTGRES_USER")?,
            password: require("POSTGRES_PASSWORD")?,
            dbname: require("POSTGRES_DATABASE")?,
            display_timezone: optional("CHATVIEW_TZ").unwrap_or_else(|| "UTC".to_string()),
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::MissingVar(name))
}

/// Unset and empty both count as absent, so `POSTGRES_PORT=` in a compose
/// file falls back to the default instead of failing to parse.
fn optional(name: &'static str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the process-wide environment is only touched from one
    // place; parallel tests sharing these variables would race.
    #[test]
    fn from_env_reads_and_validates() {
        std::env::set_var("POSTGRES_HOST", "db.internal");
        std::env::set_var("POSTGRES_PORT", "5433");
        std::env::set_var("POSTGRES_USER", "dashboard");
        std::env::set_var("POSTGRES_PASSWORD", "secret");
        std::env::set_var("POSTGRES_DATABASE", "chatlog");
        std::env::set_var("CHATVIEW_TZ", "America/Mexico_City");

        let config = StoreConfig::from_env().expect("complete environment");
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 5433);
        assert_eq!(config.user, "dashboard");
        assert_eq!(config.dbname, "chatlog");
        assert_eq!(config.display_timezone, "America/Mexico_City");

        // Defaults kick in when the optional variables are absent.
        std::env::remove_var("POSTGRES_PORT");
        std::env::remove_var("CHATVIEW_TZ");
        let config = StoreConfig::from_env().expect("defaults fill in");
        assert_eq!(config.port, 5432);
        assert_eq!(config.display_timezone, "UTC");

        // Empty counts as absent.
        std::env::set_var("POSTGRES_PORT", "");
        let config = StoreConfig::from_env().expect("empty port falls back");
        assert_eq!(config.port, 5432);

        // A garbage port is an error, not a silent default.
        std::env::set_var("POSTGRES_PORT", "not-a-port");
        let err = StoreConfig::from_env().expect_err("bad port rejected");
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                var: "POSTGRES_PORT",
                ..
            }
        ));
        std::env::remove_var("POSTGRES_PORT");

        // A missing required variable names itself.
        std::env::remove_var("POSTGRES_HOST");
        let err = StoreConfig::from_env().expect_err("missing host rejected");
        assert!(matches!(err, ConfigError::MissingVar("POSTGRES_HOST")));
        assert!(err.to_string().contains("POSTGRES_HOST"));
    }
}
