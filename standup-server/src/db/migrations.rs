//! Schema bootstrap for the spinner tables
//!
//! Idempotent `CREATE ... IF NOT EXISTS` statements run at startup.

use sqlx::PgPool;

use super::DbError;

/// Create tables and indexes if they are missing
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Ensuring standup schema...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS team_members (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            emoji TEXT NOT NULL DEFAULT '👤',
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS spin_orders (
            id BIGSERIAL PRIMARY KEY,
            session_id UUID NOT NULL,
            member_id BIGINT NOT NULL REFERENCES team_members(id) ON DELETE CASCADE,
            position INTEGER NOT NULL CHECK (position > 0),
            twist_type TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_team_members_active ON team_members(is_active)",
        "CREATE INDEX IF NOT EXISTS idx_spin_orders_session ON spin_orders(session_id)",
        "CREATE INDEX IF NOT EXISTS idx_spin_orders_created ON spin_orders(created_at)",
        "CREATE INDEX IF NOT EXISTS idx_spin_orders_member ON spin_orders(member_id)",
    ];
    for ddl in indexes {
        sqlx::query(ddl).execute(pool).await?;
    }

    tracing::info!("Standup schema ready");
    Ok(())
}
