//! Team member repository
//!
//! - create: INSERT with ON CONFLICT, reactivating a soft-deleted name
//! - update: COALESCE partial update, unique violations become conflicts
//! - delete: soft, flips `is_active`

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use standup_core::Member;

use crate::db::error::is_unique_violation;
use crate::db::{DbError, MemberUpdate};
use crate::models::{Emoji, MemberName};

/// Team member record from database
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TeamMember {
    pub id: i64,
    pub name: String,
    pub emoji: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<TeamMember> for Member {
    fn from(m: TeamMember) -> Self {
        Member::new(m.id, m.name, m.emoji)
    }
}

/// Team member repository
pub struct MemberRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> MemberRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a member, or bring back an inactive one with the same name.
    ///
    /// The DO UPDATE only fires for inactive rows, so an active duplicate
    /// returns no row and maps to `DbError::Conflict`.
    pub async fn create(&self, name: &MemberName, emoji: &Emoji) -> Result<TeamMember, DbError> {
        sqlx::query_as::<_, TeamMember>(
            r#"
            INSERT INTO team_members (name, emoji) VALUES ($1, $2)
            ON CONFLICT (name) DO UPDATE
                SET emoji = EXCLUDED.emoji, is_active = TRUE
                WHERE team_members.is_active = FALSE
            RETURNING id, name, emoji, is_active, created_at
            "#,
        )
        .bind(name.as_str())
        .bind(emoji.as_str())
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::conflict("member", name.as_str()))
    }

    pub async fn list(&self, include_inactive: bool) -> Result<Vec<TeamMember>, DbError> {
        let members = sqlx::query_as::<_, TeamMember>(
            r#"
            SELECT id, name, emoji, is_active, created_at
            FROM team_members
            WHERE is_active OR $1
            ORDER BY name
            "#,
        )
        .bind(include_inactive)
        .fetch_all(self.pool)
        .await?;

        Ok(members)
    }

    pub async fn get(&self, id: i64) -> Result<TeamMember, DbError> {
        sqlx::query_as::<_, TeamMember>(
            "SELECT id, name, emoji, is_active, created_at FROM team_members WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("member", id))
    }

    pub async fn update(&self, id: i64, update: MemberUpdate) -> Result<TeamMember, DbError> {
        let new_name = update.name.as_ref().map(|n| n.as_str().to_owned());
        let result = sqlx::query_as::<_, TeamMember>(
            r#"
            UPDATE team_members SET
                name = COALESCE($2, name),
                emoji = COALESCE($3, emoji),
                is_active = COALESCE($4, is_active)
            WHERE id = $1
            RETURNING id, name, emoji, is_active, created_at
            "#,
        )
        .bind(id)
        .bind(new_name.as_deref())
        .bind(update.emoji.as_ref().map(Emoji::as_str))
        .bind(update.is_active)
        .fetch_optional(self.pool)
        .await;

        match result {
            Ok(Some(member)) => Ok(member),
            Ok(None) => Err(DbError::not_found("member", id)),
            Err(e) if is_unique_violation(&e) => Err(DbError::conflict(
                "member",
                new_name.unwrap_or_default(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn deactivate(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("UPDATE team_members SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("member", id));
        }
        Ok(())
    }

    /// Active members among `ids`, ordered by id
    pub async fn active_among(&self, ids: &[i64]) -> Result<Vec<Member>, DbError> {
        let members = sqlx::query_as::<_, TeamMember>(
            r#"
            SELECT id, name, emoji, is_active, created_at
            FROM team_members
            WHERE id = ANY($1) AND is_active
            ORDER BY id
            "#,
        )
        .bind(ids)
        .fetch_all(self.pool)
        .await?;

        Ok(members.into_iter().map(Member::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, migrations};

    // Integration tests - run with DATABASE_URL set
    // cargo test -p standup-server -- --ignored

    async fn repo_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("schema bootstrap failed");
        pool
    }

    fn unique_name(prefix: &str) -> MemberName {
        MemberName::new(&format!("{prefix}-{}", uuid::Uuid::new_v4())).unwrap()
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_rejects_active_duplicate() {
        let pool = repo_pool().await;
        let repo = MemberRepo::new(&pool);
        let name = unique_name("dup");

        repo.create(&name, &Emoji::default()).await.unwrap();
        let err = repo.create(&name, &Emoji::default()).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict { .. }));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_reactivates_inactive() {
        let pool = repo_pool().await;
        let repo = MemberRepo::new(&pool);
        let name = unique_name("back");

        let first = repo.create(&name, &Emoji::default()).await.unwrap();
        repo.deactivate(first.id).await.unwrap();

        let emoji = Emoji::new(Some("🦀")).unwrap();
        let again = repo.create(&name, &emoji).await.unwrap();
        assert_eq!(again.id, first.id);
        assert!(again.is_active);
        assert_eq!(again.emoji, "🦀");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn active_among_skips_inactive() {
        let pool = repo_pool().await;
        let repo = MemberRepo::new(&pool);

        let a = repo.create(&unique_name("a"), &Emoji::default()).await.unwrap();
        let b = repo.create(&unique_name("b"), &Emoji::default()).await.unwrap();
        repo.deactivate(b.id).await.unwrap();

        let members = repo.active_among(&[a.id, b.id, -1]).await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].id, a.id);
    }
}
