//! standup-server: HTTP API for the standup spinner
//!
//! Manages the team roster, produces twisted speaking orders and
//! aggregates who tends to go first or last.

pub mod db;
pub mod http;
pub mod models;

pub use db::{DbError, MemoryStore, PgStore, Store};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
