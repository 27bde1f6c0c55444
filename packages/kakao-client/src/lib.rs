//! Kakao book search API client.
//!
//! A minimal client for the Kakao `v3/search/book` endpoint. Supports
//! free-text keyword search and single-ISBN lookup.
//!
//! # Example
//!
//! ```rust,ignore
//! use kakao_client::KakaoClient;
//!
//! let client = KakaoClient::new("rest-api-key");
//! let books = client.search("토지").await?;
//! for book in &books {
//!     println!("{} / {}", book.title, book.author);
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{KakaoError, Result};
pub use types::KakaoBook;

use serde_json::Value;
use tracing::{debug, warn};

const BASE_URL: &str = "https://dapi.kakao.com/v3/search/book";

/// How many documents a keyword search asks for (the API caps at 50).
const SEARCH_SIZE: u32 = 50;

#[derive(Debug, Clone)]
pub struct KakaoClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl KakaoClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (for tests and proxies).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Keyword search across title, author and publisher.
    pub async fn search(&self, query: &str) -> Result<Vec<KakaoBook>> {
        let body = self
            .get(&[("query", query), ("size", &SEARCH_SIZE.to_string())])
            .await?;
        let books = parse_search_response(&body);
        debug!(query, count = books.len(), "Kakao search complete");
        Ok(books)
    }

    /// Single-ISBN lookup. Returns the first matching document, if any.
    pub async fn lookup_isbn(&self, isbn: &str) -> Result<Option<KakaoBook>> {
        let body = self.get(&[("query", isbn), ("target", "isbn")]).await?;
        Ok(parse_search_response(&body).into_iter().next())
    }

    async fn get(&self, params: &[(&str, &str)]) -> Result<String> {
        let resp = self
            .client
            .get(&self.base_url)
            .header("Authorization", format!("KakaoAK {}", self.api_key))
            .query(params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            warn!(status = %status, "Kakao API returned an error");
            return Err(KakaoError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.text().await?)
    }
}

/// Parse a Kakao search response body into normalized books.
///
/// A malformed element is skipped; a malformed or shape-mismatched body
/// yields an empty list. Callers only distinguish the two via logs.
pub fn parse_search_response(body: &str) -> Vec<KakaoBook> {
    let root: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "Kakao response was not valid JSON");
            return Vec::new();
        }
    };

    let Some(documents) = root.get("documents").and_then(Value::as_array) else {
        warn!("Kakao response missing `documents` array");
        return Vec::new();
    };

    documents.iter().filter_map(parse_document).collect()
}

fn parse_document(doc: &Value) -> Option<KakaoBook> {
    if !doc.is_object() {
        return None;
    }

    let author = doc
        .get("authors")
        .and_then(Value::as_array)
        .map(|authors| {
            authors
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();

    // The isbn field can hold both ISBN-10 and ISBN-13 separated by a
    // space; the first token is used.
    let isbn = text_field(doc, "isbn")
        .split(' ')
        .next()
        .unwrap_or_default()
        .to_string();

    let thumbnail = {
        let url = text_field(doc, "thumbnail");
        (!url.is_empty()).then_some(url)
    };

    // `datetime` is a full timestamp; only the date part is kept.
    let publish_date: String = text_field(doc, "datetime").chars().take(10).collect();

    Some(KakaoBook {
        title: text_field(doc, "title"),
        author,
        publisher: text_field(doc, "publisher"),
        isbn,
        thumbnail,
        publish_date,
        price: text_field(doc, "price"),
        contents: text_field(doc, "contents"),
    })
}

/// String value of a field, stringifying numbers, defaulting to `""`.
fn text_field(doc: &Value, key: &str) -> String {
    match doc.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = KakaoClient::new("test-key").with_base_url("https://custom.api.com");
        assert_eq!(client.api_key, "test-key");
        assert_eq!(client.base_url, "https://custom.api.com");
    }

    #[test]
    fn test_parse_full_document() {
        let body = r#"{
            "documents": [{
                "title": "데미안",
                "authors": ["헤르만 헤세", "전영애"],
                "publisher": "민음사",
                "isbn": "8937460440 9788937460449",
                "thumbnail": "https://img.example.com/demian.jpg",
                "datetime": "2000-12-20T00:00:00.000+09:00",
                "price": 8000,
                "contents": "싱클레어의 성장 이야기"
            }]
        }"#;

        let books = parse_search_response(body);
        assert_eq!(books.len(), 1);

        let book = &books[0];
        assert_eq!(book.title, "데미안");
        assert_eq!(book.author, "헤르만 헤세, 전영애");
        assert_eq!(book.publisher, "민음사");
        assert_eq!(book.isbn, "8937460440");
        assert_eq!(book.thumbnail.as_deref(), Some("https://img.example.com/demian.jpg"));
        assert_eq!(book.publish_date, "2000-12-20");
        assert_eq!(book.price, "8000");
    }

    #[test]
    fn test_parse_multi_isbn_takes_first_token() {
        let body = r#"{"documents": [{"isbn": "9780000000001 9780000000002"}]}"#;
        let books = parse_search_response(body);
        assert_eq!(books[0].isbn, "9780000000001");
    }

    #[test]
    fn test_empty_thumbnail_is_absent() {
        let body = r#"{"documents": [{"title": "t", "thumbnail": ""}]}"#;
        let books = parse_search_response(body);
        assert_eq!(books[0].thumbnail, None);
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let body = r#"{"documents": [{}]}"#;
        let books = parse_search_response(body);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "");
        assert_eq!(books[0].author, "");
        assert_eq!(books[0].isbn, "");
        assert_eq!(books[0].thumbnail, None);
    }

    #[test]
    fn test_malformed_element_is_skipped() {
        let body = r#"{"documents": [42, {"title": "ok"}]}"#;
        let books = parse_search_response(body);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "ok");
    }

    #[test]
    fn test_invalid_body_yields_empty_list() {
        assert!(parse_search_response("not json").is_empty());
        assert!(parse_search_response("").is_empty());
        assert!(parse_search_response(r#"{"errorType": "MissingParameter"}"#).is_empty());
    }
}
