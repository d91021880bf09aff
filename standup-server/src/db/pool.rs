//! Postgres pool for the spinner's two tables

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// One team, one spinner: a handful is plenty.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Give up on a checkout well before the request timeout fires, so a
/// stuck database surfaces as a 500 rather than a dropped connection.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

fn pool_options(max_connections: u32) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(DEFAULT_ACQUIRE_TIMEOUT)
}

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// `max_connections` of zero is bumped to one.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(max_connections, "connecting to database");
    pool_options(max_connections).connect(database_url).await
}
