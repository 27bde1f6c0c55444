use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A logged book on a member's shelf.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    pub id: Uuid,
    pub member_id: Uuid,

    pub title: String,
    pub author: String,
    pub publisher: String,
    pub genre: String,

    /// 'WANT_TO_READ', 'READING', 'READ'
    pub status: String,
    /// 1–5, unset until the member rates the book
    pub rating: Option<i32>,
    pub review: Option<String>,
    pub read_date: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reading status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReadingStatus {
    WantToRead,
    Reading,
    Read,
}

impl std::fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadingStatus::WantToRead => write!(f, "WANT_TO_READ"),
            ReadingStatus::Reading => write!(f, "READING"),
            ReadingStatus::Read => write!(f, "READ"),
        }
    }
}

impl std::str::FromStr for ReadingStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "WANT_TO_READ" => Ok(ReadingStatus::WantToRead),
            "READING" => Ok(ReadingStatus::Reading),
            "READ" => Ok(ReadingStatus::Read),
            _ => Err(anyhow::anyhow!("Invalid reading status: {}", s)),
        }
    }
}

/// Fields a member supplies when logging or editing a book.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookDraft {
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default = "default_status")]
    pub status: String,
    pub rating: Option<i32>,
    pub review: Option<String>,
    pub read_date: Option<NaiveDate>,
}

fn default_status() -> String {
    ReadingStatus::WantToRead.to_string()
}

impl Book {
    pub async fn create(member_id: Uuid, draft: &BookDraft, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO books (member_id, title, author, publisher, genre, status, rating, review, read_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(member_id)
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(&draft.publisher)
        .bind(&draft.genre)
        .bind(&draft.status)
        .bind(draft.rating)
        .bind(&draft.review)
        .bind(draft.read_date)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn update(id: Uuid, draft: &BookDraft, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE books
            SET title = $2, author = $3, publisher = $4, genre = $5,
                status = $6, rating = $7, review = $8, read_date = $9,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(&draft.publisher)
        .bind(&draft.genre)
        .bind(&draft.status)
        .bind(draft.rating)
        .bind(&draft.review)
        .bind(draft.read_date)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn delete(id: Uuid, pool: &PgPool) -> Result<u64> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Every member's books, newest first.
    pub async fn find_all_recent(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM books ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_member(member_id: Uuid, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM books WHERE member_id = $1 ORDER BY created_at DESC",
        )
        .bind(member_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_member_and_status(
        member_id: Uuid,
        status: &str,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM books WHERE member_id = $1 AND status = $2 ORDER BY created_at DESC",
        )
        .bind(member_id)
        .bind(status)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Keyword search over title, author and publisher.
    pub async fn search(keyword: &str, pool: &PgPool) -> Result<Vec<Self>> {
        let pattern = format!("%{}%", keyword);
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM books
            WHERE title ILIKE $1 OR author ILIKE $1 OR publisher ILIKE $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(pattern)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_genre(genre: &str, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM books WHERE genre = $1 ORDER BY created_at DESC",
        )
        .bind(genre)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}

/// Mean rating over the rated books only; `None` when nothing is rated.
pub fn average_rating(books: &[Book]) -> Option<f64> {
    let rated: Vec<i32> = books.iter().filter_map(|b| b.rating).collect();
    if rated.is_empty() {
        return None;
    }
    Some(rated.iter().sum::<i32>() as f64 / rated.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn book(rating: Option<i32>) -> Book {
        Book {
            id: Uuid::new_v4(),
            member_id: Uuid::new_v4(),
            title: "t".to_string(),
            author: String::new(),
            publisher: String::new(),
            genre: String::new(),
            status: "READ".to_string(),
            rating,
            review: None,
            read_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_average_rating_ignores_unrated() {
        let books = vec![book(Some(5)), book(None), book(Some(2))];
        assert_eq!(average_rating(&books), Some(3.5));
    }

    #[test]
    fn test_average_rating_none_when_nothing_rated() {
        assert_eq!(average_rating(&[]), None);
        assert_eq!(average_rating(&[book(None)]), None);
    }

    #[test]
    fn test_reading_status_round_trip() {
        for status in [
            ReadingStatus::WantToRead,
            ReadingStatus::Reading,
            ReadingStatus::Read,
        ] {
            let parsed = ReadingStatus::from_str(&status.to_string()).expect("round trip");
            assert_eq!(parsed, status);
        }
        assert!(ReadingStatus::from_str("FINISHED").is_err());
    }
}
