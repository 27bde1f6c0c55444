//! Aladin TTB item-list API client.
//!
//! Fetches the bestseller and new-title charts. Both are the same
//! endpoint with a different `QueryType`.
//!
//! # Example
//!
//! ```rust,ignore
//! use aladin_client::AladinClient;
//!
//! let client = AladinClient::new("ttb-key");
//! let chart = client.bestsellers(50).await?;
//! ```

pub mod error;
pub mod types;

pub use error::{AladinError, Result};
pub use types::AladinBook;

use serde_json::Value;
use tracing::{debug, warn};

const BASE_URL: &str = "http://www.aladin.co.kr/ttb/api/ItemList.aspx";
const API_VERSION: &str = "20131101";

#[derive(Debug, Clone)]
pub struct AladinClient {
    client: reqwest::Client,
    ttb_key: String,
    base_url: String,
}

impl AladinClient {
    pub fn new(ttb_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            ttb_key: ttb_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (for tests and proxies).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Current bestseller chart, up to `max_results` titles.
    pub async fn bestsellers(&self, max_results: u32) -> Result<Vec<AladinBook>> {
        self.item_list("Bestseller", max_results).await
    }

    /// Newly published titles, up to `max_results`.
    pub async fn new_titles(&self, max_results: u32) -> Result<Vec<AladinBook>> {
        self.item_list("ItemNewAll", max_results).await
    }

    async fn item_list(&self, query_type: &str, max_results: u32) -> Result<Vec<AladinBook>> {
        let max_results = max_results.to_string();
        let params: &[(&str, &str)] = &[
            ("ttbkey", self.ttb_key.as_str()),
            ("QueryType", query_type),
            ("MaxResults", &max_results),
            ("start", "1"),
            ("SearchTarget", "Book"),
            ("output", "js"),
            ("Version", API_VERSION),
        ];
        let resp = self
            .client
            .get(&self.base_url)
            .query(params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            warn!(status = %status, query_type, "Aladin API returned an error");
            return Err(AladinError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        let books = parse_item_list(&body);
        debug!(query_type, count = books.len(), "Aladin item list fetched");
        Ok(books)
    }
}

/// Parse an Aladin item-list response body.
///
/// A body without an `item` array (including the API's own error shape)
/// yields an empty list; a malformed element is skipped.
pub fn parse_item_list(body: &str) -> Vec<AladinBook> {
    let root: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "Aladin response was not valid JSON");
            return Vec::new();
        }
    };

    let Some(items) = root.get("item").and_then(Value::as_array) else {
        warn!("Aladin response missing `item` array");
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            if !item.is_object() {
                return None;
            }
            Some(AladinBook {
                title: text_field(item, "title"),
                author: text_field(item, "author"),
                publisher: text_field(item, "publisher"),
                isbn13: text_field(item, "isbn13"),
                cover_url: text_field(item, "cover"),
                pub_date: text_field(item, "pubDate"),
                description: text_field(item, "description"),
                category_name: text_field(item, "categoryName"),
                price_standard: int_field(item, "priceStandard"),
                price_sales: int_field(item, "priceSales"),
                link: text_field(item, "link"),
            })
        })
        .collect()
}

fn text_field(item: &Value, key: &str) -> String {
    match item.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn int_field(item: &Value, key: &str) -> i64 {
    item.get(key).and_then(Value::as_i64).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item_list() {
        let body = r#"{
            "version": "20131101",
            "item": [
                {
                    "title": "불편한 편의점",
                    "author": "김호연 (지은이)",
                    "publisher": "나무옆의자",
                    "isbn13": "9791161571188",
                    "cover": "https://img.example.com/store.jpg",
                    "pubDate": "2021-04-20",
                    "description": "서울역 근처 골목의 작은 편의점",
                    "categoryName": "국내도서>소설/시/희곡>한국소설",
                    "priceStandard": 14000,
                    "priceSales": 12600,
                    "link": "https://www.aladin.co.kr/shop/wproduct.aspx?ItemId=1"
                },
                "garbage",
                { "title": "가격 없는 책" }
            ]
        }"#;

        let books = parse_item_list(body);
        assert_eq!(books.len(), 2);

        let first = &books[0];
        assert_eq!(first.title, "불편한 편의점");
        assert_eq!(first.price_standard, 14000);
        assert_eq!(first.price_sales, 12600);

        let second = &books[1];
        assert_eq!(second.price_standard, 0);
        assert_eq!(second.isbn13, "");
    }

    #[test]
    fn test_missing_item_array_is_empty() {
        assert!(parse_item_list(r#"{"errorCode": 100, "errorMessage": "잘못된 TTBKey"}"#).is_empty());
        assert!(parse_item_list("not json at all").is_empty());
    }
}
