// crates/server/src/main.rs
//! Chatview server binary.
//!
//! Connects to the chat-log store, then serves the dashboard API until
//! killed. There is no background work; every request reads the store
//! directly.

use std::net::SocketAddr;

use anyhow::Result;
use chatview_db::{Database, StoreConfig};
use chatview_server::{create_app, init_metrics};
use tracing_subscriber::EnvFilter;

/// Default port for the server.
const DEFAULT_PORT: u16 = 5002;

/// Get the server port from environment or use default.
fn get_port() -> u16 {
    std::env::var("CHATVIEW_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG overrides the default filter.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "chatview_server=info,chatview_db=info,tower_http=warn".into());
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();

    // Initialize Prometheus metrics
    init_metrics();

    eprintln!("\n\u{1f4ac} chatview v{}\n", env!("CARGO_PKG_VERSION"));

    let config = StoreConfig::from_env()?;
    let db = Database::connect(&config).await?;

    let app = create_app(db);

    // Bind on all interfaces; the dashboard is typically viewed from
    // another machine on the same network.
    let port = get_port();
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    eprintln!("  \u{2192} http://localhost:{}\n", port);
    tracing::info!(port, "chatview listening");

    axum::serve(listener, app).await?;

    Ok(())
}
