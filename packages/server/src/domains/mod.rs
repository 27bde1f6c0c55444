pub mod books;
pub mod catalog;
pub mod comments;
pub mod members;
pub mod posts;
pub mod recommend;
