// HTTP routes
pub mod auth;
pub mod books;
pub mod catalog;
pub mod comments;
pub mod health;
pub mod me;
pub mod posts;
pub mod recommend;
