//! National Library of Korea API client.
//!
//! Covers two endpoints with very different shapes:
//! - the catalog (Seoji) search API, JSON with upper-case keys, queried
//!   by one field at a time (title, author, publisher, ISBN);
//! - the librarian-curated recommendation (Saseo) API, XML with repeated
//!   `<item>` elements.
//!
//! # Example
//!
//! ```rust,ignore
//! use natlib_client::NatLibClient;
//!
//! let client = NatLibClient::new("cert-key");
//! let books = client.search_title("난장이가 쏘아올린 작은 공").await?;
//! let picks = client.fetch_recommended(1, 50).await?;
//! ```

pub mod error;
pub mod types;

pub use error::{NatLibError, Result};
pub use types::{CatalogBook, RecommendedBook};

use quick_xml::events::Event;
use serde_json::Value;
use tracing::{debug, warn};

const CATALOG_URL: &str = "https://www.nl.go.kr/seoji/SearchApi.do";
const RECOMMEND_URL: &str = "https://nl.go.kr/NL/search/openApi/saseoApi.do";

/// The endpoint rejects requests with a default client user agent.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const SEARCH_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone)]
pub struct NatLibClient {
    client: reqwest::Client,
    cert_key: String,
    catalog_url: String,
    recommend_url: String,
}

impl NatLibClient {
    pub fn new(cert_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            cert_key: cert_key.into(),
            catalog_url: CATALOG_URL.to_string(),
            recommend_url: RECOMMEND_URL.to_string(),
        }
    }

    /// Override both endpoint URLs (for tests and proxies).
    pub fn with_base_urls(
        mut self,
        catalog_url: impl Into<String>,
        recommend_url: impl Into<String>,
    ) -> Self {
        self.catalog_url = catalog_url.into();
        self.recommend_url = recommend_url.into();
        self
    }

    // ------------------------------------------------------------------
    // Catalog (Seoji) search: JSON
    // ------------------------------------------------------------------

    pub async fn search_title(&self, title: &str) -> Result<Vec<CatalogBook>> {
        self.search_field("title", title, SEARCH_PAGE_SIZE).await
    }

    pub async fn search_author(&self, author: &str) -> Result<Vec<CatalogBook>> {
        self.search_field("author", author, SEARCH_PAGE_SIZE).await
    }

    pub async fn search_publisher(&self, publisher: &str) -> Result<Vec<CatalogBook>> {
        self.search_field("publisher", publisher, SEARCH_PAGE_SIZE)
            .await
    }

    /// Single-ISBN lookup. Returns the first matching record, if any.
    pub async fn lookup_isbn(&self, isbn: &str) -> Result<Option<CatalogBook>> {
        let books = self.search_field("isbn", isbn, 1).await?;
        Ok(books.into_iter().next())
    }

    async fn search_field(
        &self,
        field: &str,
        value: &str,
        page_size: u32,
    ) -> Result<Vec<CatalogBook>> {
        let body = self
            .get(
                &self.catalog_url,
                &[
                    ("cert_key", self.cert_key.as_str()),
                    ("result_style", "json"),
                    ("page_no", "1"),
                    ("page_size", &page_size.to_string()),
                    (field, value),
                ],
            )
            .await?;
        let books = parse_catalog_response(&body);
        debug!(field, value, count = books.len(), "catalog search complete");
        Ok(books)
    }

    // ------------------------------------------------------------------
    // Librarian-curated feed (Saseo): XML
    // ------------------------------------------------------------------

    /// Fetch a row range of the curated list, newest first.
    pub async fn fetch_recommended(
        &self,
        start_row: u32,
        end_row: u32,
    ) -> Result<Vec<RecommendedBook>> {
        self.fetch_recommend_rows(start_row, end_row, &[]).await
    }

    /// Curated list scoped to a registration date range (`YYYYMMDD`).
    pub async fn fetch_recommended_between(
        &self,
        start_row: u32,
        end_row: u32,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<RecommendedBook>> {
        self.fetch_recommend_rows(
            start_row,
            end_row,
            &[("start_date", start_date), ("end_date", end_date)],
        )
        .await
    }

    /// Curated list scoped to one classification code (`drcode`).
    pub async fn fetch_recommended_by_category(
        &self,
        category_code: &str,
        end_row: u32,
    ) -> Result<Vec<RecommendedBook>> {
        self.fetch_recommend_rows(1, end_row, &[("drcode", category_code)])
            .await
    }

    async fn fetch_recommend_rows(
        &self,
        start_row: u32,
        end_row: u32,
        extra: &[(&str, &str)],
    ) -> Result<Vec<RecommendedBook>> {
        let start = start_row.to_string();
        let end = end_row.to_string();
        let mut params = vec![
            ("key", self.cert_key.as_str()),
            ("startRowNumApi", start.as_str()),
            ("endRowNumApi", end.as_str()),
        ];
        params.extend_from_slice(extra);

        let body = self.get(&self.recommend_url, &params).await?;
        let books = parse_recommend_response(&body);
        debug!(count = books.len(), "curated feed fetched");
        Ok(books)
    }

    async fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            warn!(status = %status, url, "National Library API returned an error");
            return Err(NatLibError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.text().await?)
    }
}

/// Parse a catalog (Seoji) JSON response into books.
///
/// The payload nests records in a `docs` array beside `TOTAL_COUNT`;
/// field keys are upper-case. A missing `docs` array or a malformed body
/// yields an empty list.
pub fn parse_catalog_response(body: &str) -> Vec<CatalogBook> {
    let root: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "catalog response was not valid JSON");
            return Vec::new();
        }
    };

    let Some(docs) = root.get("docs").and_then(Value::as_array) else {
        warn!("catalog response missing `docs` array");
        return Vec::new();
    };

    docs.iter()
        .filter_map(|doc| {
            if !doc.is_object() {
                return None;
            }
            let cover_url = {
                let url = text_field(doc, "TITLE_URL");
                (!url.is_empty()).then_some(url)
            };
            Some(CatalogBook {
                title: text_field(doc, "TITLE"),
                author: text_field(doc, "AUTHOR"),
                publisher: text_field(doc, "PUBLISHER"),
                isbn: text_field(doc, "EA_ISBN"),
                cover_url,
                publish_date: text_field(doc, "PUBLISH_PREDATE"),
                page: text_field(doc, "PAGE"),
                subject: text_field(doc, "SUBJECT"),
            })
        })
        .collect()
}

/// Parse a curated-feed (Saseo) XML response.
///
/// The document repeats `<item>` elements; any tag may be missing and
/// yields an empty string. A truncated or malformed document keeps the
/// items parsed before the error rather than failing the whole page.
pub fn parse_recommend_response(xml: &str) -> Vec<RecommendedBook> {
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut books = Vec::new();
    let mut current: Option<RecommendedBook> = None;
    let mut tag = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if name == "item" {
                    current = Some(RecommendedBook::default());
                }
                tag = name;
            }
            Ok(Event::Text(t)) => {
                let Some(book) = current.as_mut() else {
                    continue;
                };
                let value = t.unescape().map(|v| v.to_string()).unwrap_or_default();
                match tag.as_str() {
                    "recomtitle" => book.title = value,
                    "recomauthor" => book.author = value,
                    "recompublisher" => book.publisher = value,
                    "recomisbn" => book.isbn = value,
                    "recomfilepath" => {
                        book.cover_url = (!value.trim().is_empty()).then_some(value)
                    }
                    "recomcontens" => book.contents = value,
                    "drCodeName" => book.category = value,
                    "drCode" => book.category_code = value,
                    "publishYear" => book.publish_year = value.trim().parse().unwrap_or(0),
                    _ => {}
                }
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"item" {
                    if let Some(book) = current.take() {
                        books.push(book);
                    }
                }
                tag.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                warn!(error = %e, "curated feed XML was malformed");
                break;
            }
            Ok(_) => {}
        }
    }

    books
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
    fn test_parse_catalog_document() {
        let body = r#"{
            "TOTAL_COUNT": "2",
            "docs": [
                {
                    "TITLE": "토지 1",
                    "AUTHOR": "박경리",
                    "PUBLISHER": "마로니에북스",
                    "EA_ISBN": "9788960530010",
                    "TITLE_URL": "https://img.example.com/toji.jpg",
                    "PUBLISH_PREDATE": "20120315",
                    "PAGE": "424",
                    "SUBJECT": "813.6"
                },
                {
                    "TITLE": "표지 없는 책",
                    "AUTHOR": "아무개"
                }
            ]
        }"#;

        let books = parse_catalog_response(body);
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].title, "토지 1");
        assert_eq!(books[0].cover_url.as_deref(), Some("https://img.example.com/toji.jpg"));
        assert_eq!(books[0].subject, "813.6");
        // Missing TITLE_URL is absent, not an empty string.
        assert_eq!(books[1].cover_url, None);
        assert_eq!(books[1].publisher, "");
    }

    #[test]
    fn test_empty_title_url_is_absent() {
        let body = r#"{"docs": [{"TITLE": "t", "TITLE_URL": ""}]}"#;
        let books = parse_catalog_response(body);
        assert_eq!(books[0].cover_url, None);
    }

    #[test]
    fn test_catalog_without_docs_is_empty() {
        assert!(parse_catalog_response(r#"{"TOTAL_COUNT": "0"}"#).is_empty());
        assert!(parse_catalog_response("<html>error</html>").is_empty());
        assert!(parse_catalog_response("").is_empty());
    }

    #[test]
    fn test_parse_recommend_items() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <channel>
                <totalCount>2</totalCount>
                <list>
                    <item>
                        <recomtitle>어린 왕자</recomtitle>
                        <recomauthor>생텍쥐페리</recomauthor>
                        <recompublisher>열린책들</recompublisher>
                        <recomisbn>9788932917245</recomisbn>
                        <recomfilepath>https://img.example.com/prince.jpg</recomfilepath>
                        <recomcontens>&lt;p&gt;사막에서 만난 아이&lt;/p&gt;</recomcontens>
                        <drCodeName>문학</drCodeName>
                        <drCode>11</drCode>
                        <publishYear>2015</publishYear>
                    </item>
                    <item>
                        <recomtitle>태그가 빠진 책</recomtitle>
                        <publishYear>abc</publishYear>
                    </item>
                </list>
            </channel>"#;

        let books = parse_recommend_response(xml);
        assert_eq!(books.len(), 2);

        let first = &books[0];
        assert_eq!(first.title, "어린 왕자");
        assert_eq!(first.category, "문학");
        assert_eq!(first.category_code, "11");
        assert_eq!(first.publish_year, 2015);
        // XML entities come back decoded; markup stripping happens downstream.
        assert_eq!(first.contents, "<p>사막에서 만난 아이</p>");

        let second = &books[1];
        assert_eq!(second.author, "");
        assert_eq!(second.cover_url, None);
        assert_eq!(second.publish_year, 0);
    }

    #[test]
    fn test_recommend_empty_or_malformed() {
        assert!(parse_recommend_response("").is_empty());
        assert!(parse_recommend_response("plain text, no items").is_empty());
    }

    #[test]
    fn test_recommend_truncated_document_keeps_complete_items() {
        let xml = "<list><item><recomtitle>first</recomtitle></item><item><recomtitle>cut";
        let books = parse_recommend_response(xml);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "first");
    }
}
