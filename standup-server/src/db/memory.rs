//! In-memory `Store` for tests and database-less runs
//!
//! Same semantics as `PgStore`, state lives behind a `tokio::sync::RwLock`
//! and is lost on shutdown.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use standup_core::{Member, Slot, SpinRecord};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::store::{MemberUpdate, Store};
use super::{DbError, TeamMember};
use crate::models::{Emoji, MemberName};

#[derive(Debug, Clone)]
struct SpinRow {
    session_id: Uuid,
    member_id: i64,
    position: u32,
    twist_type: String,
    created_at: DateTime<Utc>,
}

#[derive(Default)]
struct Inner {
    members: Vec<TeamMember>,
    spins: Vec<SpinRow>,
    next_id: i64,
}

impl Inner {
    fn member_mut(&mut self, id: i64) -> Result<&mut TeamMember, DbError> {
        self.members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| DbError::not_found("member", id))
    }

    fn records<'a>(&'a self, rows: impl Iterator<Item = &'a SpinRow>) -> Vec<SpinRecord> {
        rows.filter_map(|row| {
            let member = self.members.iter().find(|m| m.id == row.member_id)?;
            Some(SpinRecord {
                session_id: row.session_id,
                member_id: row.member_id,
                member_name: member.name.clone(),
                emoji: member.emoji.clone(),
                position: row.position,
                twist_type: row.twist_type.clone(),
                recorded_at: row.created_at,
            })
        })
        .collect()
    }
}

/// `Store` held entirely in process memory
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }

    async fn create_member(&self, name: &MemberName, emoji: &Emoji) -> Result<TeamMember, DbError> {
        let mut inner = self.inner.write().await;

        if let Some(existing) = inner.members.iter_mut().find(|m| m.name == name.as_str()) {
            if existing.is_active {
                return Err(DbError::conflict("member", name.as_str()));
            }
            existing.is_active = true;
            existing.emoji = emoji.as_str().to_owned();
            return Ok(existing.clone());
        }

        inner.next_id += 1;
        let member = TeamMember {
            id: inner.next_id,
            name: name.as_str().to_owned(),
            emoji: emoji.as_str().to_owned(),
            is_active: true,
            created_at: Utc::now(),
        };
        inner.members.push(member.clone());
        Ok(member)
    }

    async fn list_members(&self, include_inactive: bool) -> Result<Vec<TeamMember>, DbError> {
        let inner = self.inner.read().await;
        let mut members: Vec<TeamMember> = inner
            .members
            .iter()
            .filter(|m| include_inactive || m.is_active)
            .cloned()
            .collect();
        members.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(members)
    }

    async fn get_member(&self, id: i64) -> Result<TeamMember, DbError> {
        let inner = self.inner.read().await;
        inner
            .members
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| DbError::not_found("member", id))
    }

    async fn update_member(&self, id: i64, update: MemberUpdate) -> Result<TeamMember, DbError> {
        let mut inner = self.inner.write().await;

        if let Some(name) = &update.name {
            if inner
                .members
                .iter()
                .any(|m| m.id != id && m.name == name.as_str())
            {
                return Err(DbError::conflict("member", name.as_str()));
            }
        }

        let member = inner.member_mut(id)?;
        if let Some(name) = update.name {
            member.name = name.into_inner();
        }
        if let Some(emoji) = update.emoji {
            member.emoji = emoji.into_inner();
        }
        if let Some(active) = update.is_active {
            member.is_active = active;
        }
        Ok(member.clone())
    }

    async fn deactivate_member(&self, id: i64) -> Result<(), DbError> {
        let mut inner = self.inner.write().await;
        inner.member_mut(id)?.is_active = false;
        Ok(())
    }

    async fn active_members(&self, ids: &[i64]) -> Result<Vec<Member>, DbError> {
        let inner = self.inner.read().await;
        let mut members: Vec<Member> = inner
            .members
            .iter()
            .filter(|m| m.is_active && ids.contains(&m.id))
            .cloned()
            .map(Member::from)
            .collect();
        members.sort_by_key(|m| m.id);
        Ok(members)
    }

    async fn record_spin(
        &self,
        session_id: Uuid,
        twist_type: &str,
        slots: &[Slot],
    ) -> Result<(), DbError> {
        let mut inner = self.inner.write().await;
        let now = Utc::now();

        for slot in slots {
            for &member_id in &slot.member_ids {
                if !inner.members.iter().any(|m| m.id == member_id) {
                    return Err(DbError::not_found("member", member_id));
                }
            }
        }

        let rows = slots.iter().flat_map(|slot| {
            slot.member_ids.iter().map(move |&member_id| SpinRow {
                session_id,
                member_id,
                position: slot.position,
                twist_type: twist_type.to_owned(),
                created_at: now,
            })
        });
        inner.spins.extend(rows);
        Ok(())
    }

    async fn get_spin(&self, session_id: Uuid) -> Result<Vec<SpinRecord>, DbError> {
        let inner = self.inner.read().await;
        let mut records = inner.records(inner.spins.iter().filter(|r| r.session_id == session_id));
        if records.is_empty() {
            return Err(DbError::not_found("spin", session_id));
        }
        records.sort_by_key(|r| r.position);
        Ok(records)
    }

    async fn spin_records_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<SpinRecord>, DbError> {
        let inner = self.inner.read().await;
        Ok(inner.records(inner.spins.iter().filter(|r| r.created_at >= cutoff)))
    }
}
