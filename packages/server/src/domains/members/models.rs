use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::password::{generate_salt, hash_password, verify_password};

/// A registered member.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Member {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub password_salt: String,
    /// 'user' or 'admin'
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl Member {
    /// Register a new member with a freshly salted password digest.
    pub async fn create(
        username: &str,
        email: &str,
        name: &str,
        password: &str,
        pool: &PgPool,
    ) -> Result<Self> {
        let salt = generate_salt();
        let hash = hash_password(&salt, password);

        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO members (username, email, name, password_hash, password_salt)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(name)
        .bind(hash)
        .bind(salt)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_username(username: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM members WHERE username = $1")
            .bind(username)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn username_exists(username: &str, pool: &PgPool) -> Result<bool> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM members WHERE username = $1)")
                .bind(username)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    pub async fn email_exists(email: &str, pool: &PgPool) -> Result<bool> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM members WHERE email = $1)")
                .bind(email)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// Check a login attempt against the stored digest.
    pub fn verify_credentials(&self, password: &str) -> bool {
        verify_password(&self.password_salt, password, &self.password_hash)
    }

    pub async fn update_profile(
        id: Uuid,
        name: &str,
        email: &str,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE members SET name = $2, email = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Re-salt and store a new password.
    pub async fn change_password(id: Uuid, new_password: &str, pool: &PgPool) -> Result<Self> {
        let salt = generate_salt();
        let hash = hash_password(&salt, new_password);

        sqlx::query_as::<_, Self>(
            "UPDATE members SET password_hash = $2, password_salt = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(hash)
        .bind(salt)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Delete the account; books, posts and comments cascade.
    pub async fn delete(id: Uuid, pool: &PgPool) -> Result<u64> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
