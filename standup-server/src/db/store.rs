//! Storage trait shared by the Postgres and in-memory backends

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use standup_core::{Member, Slot, SpinRecord};
use uuid::Uuid;

use super::{DbError, TeamMember};
use crate::models::{Emoji, MemberName};

/// Partial update for a team member. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct MemberUpdate {
    pub name: Option<MemberName>,
    pub emoji: Option<Emoji>,
    pub is_active: Option<bool>,
}

/// Persistence operations used by the HTTP handlers (testable)
#[async_trait]
pub trait Store: Send + Sync {
    /// Check the backend is reachable
    async fn ping(&self) -> Result<(), DbError>;

    /// Insert a member. An inactive member with the same name is
    /// reactivated with the new emoji; an active one is a conflict.
    async fn create_member(&self, name: &MemberName, emoji: &Emoji) -> Result<TeamMember, DbError>;

    /// Members ordered by name
    async fn list_members(&self, include_inactive: bool) -> Result<Vec<TeamMember>, DbError>;

    async fn get_member(&self, id: i64) -> Result<TeamMember, DbError>;

    async fn update_member(&self, id: i64, update: MemberUpdate) -> Result<TeamMember, DbError>;

    /// Soft delete: the row and its spin history stay
    async fn deactivate_member(&self, id: i64) -> Result<(), DbError>;

    /// Active members among `ids`, ordered by id. Unknown ids are ignored.
    async fn active_members(&self, ids: &[i64]) -> Result<Vec<Member>, DbError>;

    /// Persist one row per member per slot
    async fn record_spin(
        &self,
        session_id: Uuid,
        twist_type: &str,
        slots: &[Slot],
    ) -> Result<(), DbError>;

    /// Recorded rows of one spin in position order
    async fn get_spin(&self, session_id: Uuid) -> Result<Vec<SpinRecord>, DbError>;

    /// All rows recorded at or after `cutoff`
    async fn spin_records_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<SpinRecord>, DbError>;
}
