//! Postgres repositories
//!
//! Each repository borrows the pool; `PgStore` owns it and delegates.

pub mod members;
pub mod spins;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use standup_core::{Member, Slot, SpinRecord};
use uuid::Uuid;

use super::store::{MemberUpdate, Store};
use super::{create_pool_with_options, migrations, DbError};
use crate::models::{Emoji, MemberName};

pub use members::{MemberRepo, TeamMember};
pub use spins::SpinRepo;

/// `Store` backed by PostgreSQL
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool and make sure the schema exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, DbError> {
        let pool = create_pool_with_options(database_url, max_connections).await?;
        migrations::run(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn create_member(&self, name: &MemberName, emoji: &Emoji) -> Result<TeamMember, DbError> {
        MemberRepo::new(&self.pool).create(name, emoji).await
    }

    async fn list_members(&self, include_inactive: bool) -> Result<Vec<TeamMember>, DbError> {
        MemberRepo::new(&self.pool).list(include_inactive).await
    }

    async fn get_member(&self, id: i64) -> Result<TeamMember, DbError> {
        MemberRepo::new(&self.pool).get(id).await
    }

    async fn update_member(&self, id: i64, update: MemberUpdate) -> Result<TeamMember, DbError> {
        MemberRepo::new(&self.pool).update(id, update).await
    }

    async fn deactivate_member(&self, id: i64) -> Result<(), DbError> {
        MemberRepo::new(&self.pool).deactivate(id).await
    }

    async fn active_members(&self, ids: &[i64]) -> Result<Vec<Member>, DbError> {
        MemberRepo::new(&self.pool).active_among(ids).await
    }

    async fn record_spin(
        &self,
        session_id: Uuid,
        twist_type: &str,
        slots: &[Slot],
    ) -> Result<(), DbError> {
        SpinRepo::new(&self.pool)
            .record(session_id, twist_type, slots)
            .await
    }

    async fn get_spin(&self, session_id: Uuid) -> Result<Vec<SpinRecord>, DbError> {
        SpinRepo::new(&self.pool).get(session_id).await
    }

    async fn spin_records_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<SpinRecord>, DbError> {
        SpinRepo::new(&self.pool).since(cutoff).await
    }
}
