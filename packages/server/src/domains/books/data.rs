use crate::domains::books::models::Book;
use serde::{Deserialize, Serialize};

/// API representation of a logged book
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookData {
    pub id: String,
    pub member_id: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub genre: String,
    pub status: String,
    pub rating: Option<i32>,
    pub review: Option<String>,
    pub read_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Book> for BookData {
    fn from(book: Book) -> Self {
        Self {
            id: book.id.to_string(),
            member_id: book.member_id.to_string(),
            title: book.title,
            author: book.author,
            publisher: book.publisher,
            genre: book.genre,
            status: book.status,
            rating: book.rating,
            review: book.review,
            read_date: book.read_date.map(|d| d.to_string()),
            created_at: book.created_at.to_rfc3339(),
            updated_at: book.updated_at.to_rfc3339(),
        }
    }
}
