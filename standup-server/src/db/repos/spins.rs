//! Spin history repository

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use standup_core::{Slot, SpinRecord};
use uuid::Uuid;

use crate::db::DbError;

const SELECT_RECORDS: &str = r#"
    SELECT s.session_id, s.member_id, m.name AS member_name, m.emoji,
           s.position, s.twist_type, s.created_at
    FROM spin_orders s
    JOIN team_members m ON m.id = s.member_id
"#;

/// Spin history repository
pub struct SpinRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> SpinRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Write every member of every slot in a single transaction.
    pub async fn record(
        &self,
        session_id: Uuid,
        twist_type: &str,
        slots: &[Slot],
    ) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        for slot in slots {
            for member_id in &slot.member_ids {
                sqlx::query(
                    r#"
                    INSERT INTO spin_orders (session_id, member_id, position, twist_type)
                    VALUES ($1, $2, $3, $4)
                    "#,
                )
                .bind(session_id)
                .bind(member_id)
                .bind(slot.position as i32)
                .bind(twist_type)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        tracing::debug!(%session_id, slots = slots.len(), "spin recorded");
        Ok(())
    }

    pub async fn get(&self, session_id: Uuid) -> Result<Vec<SpinRecord>, DbError> {
        let rows = sqlx::query(&format!(
            "{SELECT_RECORDS} WHERE s.session_id = $1 ORDER BY s.position, s.id"
        ))
        .bind(session_id)
        .fetch_all(self.pool)
        .await?;

        if rows.is_empty() {
            return Err(DbError::not_found("spin", session_id));
        }
        Ok(rows.iter().map(spin_record).collect())
    }

    pub async fn since(&self, cutoff: DateTime<Utc>) -> Result<Vec<SpinRecord>, DbError> {
        let rows = sqlx::query(&format!(
            "{SELECT_RECORDS} WHERE s.created_at >= $1 ORDER BY s.created_at, s.id"
        ))
        .bind(cutoff)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.iter().map(spin_record).collect())
    }
}

fn spin_record(row: &PgRow) -> SpinRecord {
    SpinRecord {
        session_id: row.get("session_id"),
        member_id: row.get("member_id"),
        member_name: row.get("member_name"),
        emoji: row.get("emoji"),
        position: row.get::<i32, _>("position").max(0) as u32,
        twist_type: row.get("twist_type"),
        recorded_at: row.get("created_at"),
    }
}

#[cfg(test)]
mod tests {
    // Integration tests with test database
    // Run with: DATABASE_URL=... cargo test -p standup-server -- --ignored
    use super::*;
    use crate::db::{create_pool, migrations, MemberRepo};
    use crate::models::{Emoji, MemberName};

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pair_slot_writes_two_rows() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.unwrap();
        migrations::run(&pool).await.unwrap();

        let members = MemberRepo::new(&pool);
        let mut ids = Vec::new();
        for _ in 0..2 {
            let name = MemberName::new(&Uuid::new_v4().to_string()).unwrap();
            ids.push(members.create(&name, &Emoji::default()).await.unwrap().id);
        }

        let session = Uuid::new_v4();
        let slots = vec![Slot {
            position: 1,
            name: "a & b".into(),
            emoji: "👥".into(),
            member_ids: ids.clone(),
        }];
        let repo = SpinRepo::new(&pool);
        repo.record(session, "pair_up", &slots).await.unwrap();

        let records = repo.get(session).await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.position == 1));
    }
}
