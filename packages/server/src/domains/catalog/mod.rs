//! External book catalog aggregation: provider fan-out, normalization
//! into unified records, genre classification, and feed sampling.

pub mod genre;
pub mod models;
pub mod sample;
pub mod sanitize;
pub mod service;

pub use models::{BookRecord, ChartBookView, RecommendedBookView};
pub use service::CatalogService;
