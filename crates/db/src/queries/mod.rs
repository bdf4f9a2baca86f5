// crates/db/src/queries/mod.rs
//! Read-only queries over the chat-log table, one module per resource.

pub mod conversations;
pub mod sessions;
pub mod stats;
