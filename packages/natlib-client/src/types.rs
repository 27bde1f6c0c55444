//! National Library response types.

use serde::{Deserialize, Serialize};

/// A book from the catalog (Seoji) search API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogBook {
    pub title: String,
    pub author: String,
    pub publisher: String,
    /// `EA_ISBN` field.
    pub isbn: String,
    /// `TITLE_URL`; `None` when missing or empty.
    pub cover_url: Option<String>,
    /// `PUBLISH_PREDATE` field.
    pub publish_date: String,
    /// Page count as the provider reports it (free-form).
    pub page: String,
    /// Raw subject classification (KDC code or text).
    pub subject: String,
}

/// A librarian-recommended book from the curated-list (Saseo) XML API.
///
/// Missing tags yield empty strings; only the cover is an explicit
/// absent value so callers can tell "no cover" apart from "empty URL".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendedBook {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub isbn: String,
    /// `recomfilepath`; `None` when missing or empty.
    pub cover_url: Option<String>,
    /// Librarian's description of the book (may carry HTML markup).
    pub contents: String,
    /// Classification name (`drCodeName`).
    pub category: String,
    /// Classification code (`drCode`).
    pub category_code: String,
    /// Publication year; 0 when absent or unparseable.
    pub publish_year: i32,
}
