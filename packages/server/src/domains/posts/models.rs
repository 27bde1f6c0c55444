use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A board post. `author_name` is joined in from the members table on
/// every read.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub member_id: Uuid,
    pub author_name: String,

    pub title: String,
    pub content: String,
    pub category: String,
    pub view_count: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a member supplies when writing or editing a post.
#[derive(Debug, Clone, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    "자유".to_string()
}

const SELECT_WITH_AUTHOR: &str = r#"
    SELECT p.*, m.username AS author_name
    FROM posts p
    JOIN members m ON m.id = p.member_id
"#;

impl Post {
    pub async fn create(member_id: Uuid, draft: &PostDraft, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            WITH inserted AS (
                INSERT INTO posts (member_id, title, content, category)
                VALUES ($1, $2, $3, $4)
                RETURNING *
            )
            SELECT inserted.*, m.username AS author_name
            FROM inserted
            JOIN members m ON m.id = inserted.member_id
            "#,
        )
        .bind(member_id)
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(&draft.category)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn update(id: Uuid, draft: &PostDraft, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            WITH updated AS (
                UPDATE posts
                SET title = $2, content = $3, category = $4, updated_at = now()
                WHERE id = $1
                RETURNING *
            )
            SELECT updated.*, m.username AS author_name
            FROM updated
            JOIN members m ON m.id = updated.member_id
            "#,
        )
        .bind(id)
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(&draft.category)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn delete(id: Uuid, pool: &PgPool) -> Result<u64> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(&format!("{} WHERE p.id = $1", SELECT_WITH_AUTHOR))
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Fetch a post for display, counting the view.
    pub async fn find_by_id_and_bump(id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            WITH bumped AS (
                UPDATE posts
                SET view_count = view_count + 1
                WHERE id = $1
                RETURNING *
            )
            SELECT bumped.*, m.username AS author_name
            FROM bumped
            JOIN members m ON m.id = bumped.member_id
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_all_recent(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(&format!(
            "{} ORDER BY p.created_at DESC",
            SELECT_WITH_AUTHOR
        ))
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_category(category: &str, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(&format!(
            "{} WHERE p.category = $1 ORDER BY p.created_at DESC",
            SELECT_WITH_AUTHOR
        ))
        .bind(category)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Title keyword search, optionally scoped to one category.
    pub async fn search(
        keyword: &str,
        category: Option<&str>,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let pattern = format!("%{}%", keyword);
        match category {
            Some(category) => sqlx::query_as::<_, Self>(&format!(
                "{} WHERE p.category = $1 AND p.title ILIKE $2 ORDER BY p.created_at DESC",
                SELECT_WITH_AUTHOR
            ))
            .bind(category)
            .bind(pattern)
            .fetch_all(pool)
            .await
            .map_err(Into::into),
            None => sqlx::query_as::<_, Self>(&format!(
                "{} WHERE p.title ILIKE $1 ORDER BY p.created_at DESC",
                SELECT_WITH_AUTHOR
            ))
            .bind(pattern)
            .fetch_all(pool)
            .await
            .map_err(Into::into),
        }
    }

    pub async fn find_by_member(member_id: Uuid, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(&format!(
            "{} WHERE p.member_id = $1 ORDER BY p.created_at DESC",
            SELECT_WITH_AUTHOR
        ))
        .bind(member_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
