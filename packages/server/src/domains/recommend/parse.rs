//! Completion response parsing.
//!
//! The model is told to answer with bare JSON, but in practice the
//! payload often arrives wrapped in a markdown code fence. Anything that
//! fails to parse yields an empty list; this is a best-effort widget,
//! not a required page element.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// A book recommended by the completion model. The provider supplies no
/// ISBN or cover; `reason` says why this member should care.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiRecommendedBook {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub category: String,
    pub description: String,
    pub reason: String,
}

/// Parse a completion's content into recommendations.
///
/// Strips optional ```` ```json ```` / ```` ``` ```` fences, then reads
/// the `recommendations` array. Missing fields default to `""`; any
/// malformed payload yields an empty list, never an error.
pub fn parse_recommendations(raw: &str) -> Vec<AiRecommendedBook> {
    let mut content = raw.trim();
    if let Some(rest) = content.strip_prefix("```json") {
        content = rest;
    }
    if let Some(rest) = content.strip_prefix("```") {
        content = rest;
    }
    if let Some(rest) = content.strip_suffix("```") {
        content = rest;
    }
    let content = content.trim();

    let root: Value = match serde_json::from_str(content) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "completion content was not valid JSON");
            return Vec::new();
        }
    };

    let Some(items) = root.get("recommendations").and_then(Value::as_array) else {
        warn!("completion content missing `recommendations` array");
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            if !item.is_object() {
                return None;
            }
            Some(AiRecommendedBook {
                title: text_field(item, "title"),
                author: text_field(item, "author"),
                publisher: text_field(item, "publisher"),
                category: text_field(item, "category"),
                description: text_field(item, "description"),
                reason: text_field(item, "reason"),
            })
        })
        .collect()
}

fn text_field(item: &Value, key: &str) -> String {
    item.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "recommendations": [
            {
                "title": "파친코",
                "author": "이민진",
                "publisher": "문학사상",
                "category": "소설",
                "description": "자이니치 4대의 연대기.",
                "reason": "역사 소설을 즐겨 읽는 독자에게."
            }
        ]
    }"#;

    #[test]
    fn test_parses_bare_json() {
        let books = parse_recommendations(PAYLOAD);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "파친코");
        assert_eq!(books[0].reason, "역사 소설을 즐겨 읽는 독자에게.");
    }

    #[test]
    fn test_fenced_json_parses_identically() {
        let fenced = format!("```json\n{}\n```", PAYLOAD);
        let plain_fence = format!("```\n{}\n```", PAYLOAD);

        let from_fenced = parse_recommendations(&fenced);
        let from_plain = parse_recommendations(&plain_fence);
        let from_bare = parse_recommendations(PAYLOAD);

        assert_eq!(from_fenced.len(), from_bare.len());
        assert_eq!(from_plain.len(), from_bare.len());
        assert_eq!(from_fenced[0].title, from_bare[0].title);
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let books = parse_recommendations(r#"{"recommendations": [{"title": "제목만"}]}"#);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "제목만");
        assert_eq!(books[0].author, "");
        assert_eq!(books[0].reason, "");
    }

    #[test]
    fn test_invalid_payloads_yield_empty_list() {
        assert!(parse_recommendations("").is_empty());
        assert!(parse_recommendations("죄송하지만 추천할 수 없습니다.").is_empty());
        // truncated JSON
        assert!(parse_recommendations(r#"{"recommendations": [{"title": "잘린"#).is_empty());
        // valid JSON, wrong shape
        assert!(parse_recommendations(r#"{"books": []}"#).is_empty());
    }

    #[test]
    fn test_non_object_elements_skipped() {
        let books =
            parse_recommendations(r#"{"recommendations": ["문자열", {"title": "정상"}]}"#);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "정상");
    }
}
