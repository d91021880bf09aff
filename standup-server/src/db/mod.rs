//! Storage layer - connection pool, schema bootstrap and stores
//!
//! Handlers talk to a `Store`. `PgStore` is the production backend over
//! sqlx; `MemoryStore` backs tests and `--in-memory` runs.
//!
//! - Single-statement upserts (ON CONFLICT), no check-then-insert
//! - List operations JOIN member names in one query, no N+1
//! - A spin's rows are written in one transaction

pub mod error;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod repos;
pub mod store;

pub use error::DbError;
pub use memory::MemoryStore;
pub use pool::{create_pool, create_pool_with_options};
pub use repos::{MemberRepo, PgStore, SpinRepo, TeamMember};
pub use store::{MemberUpdate, Store};
