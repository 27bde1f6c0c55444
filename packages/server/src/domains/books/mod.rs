//! Personal reading log: each member's books with status, rating and
//! review.

pub mod data;
pub mod models;

pub use data::BookData;
pub use models::{average_rating, Book, BookDraft, ReadingStatus};
