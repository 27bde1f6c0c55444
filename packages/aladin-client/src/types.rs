//! Aladin item-list response types.

use serde::{Deserialize, Serialize};

/// A single book from an Aladin item list (bestsellers / new titles).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AladinBook {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub isbn13: String,
    pub cover_url: String,
    pub pub_date: String,
    pub description: String,
    pub category_name: String,
    pub price_standard: i64,
    pub price_sales: i64,
    pub link: String,
}
