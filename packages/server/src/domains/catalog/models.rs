//! Read-only projections over external catalog data.
//!
//! Three record shapes, one per consumer path (manual search, curated
//! feed, chart feed). They all describe "a book" but are kept separate:
//! each downstream view needs fields the others do not have.

use aladin_client::AladinBook;
use kakao_client::KakaoBook;
use natlib_client::{CatalogBook, RecommendedBook};
use serde::Serialize;

use super::genre;
use super::sanitize::strip_markup;

/// Display blurbs are cut at this many characters.
const DESCRIPTION_LIMIT: usize = 200;

/// A search result unified across the Kakao and National Library
/// catalogs. `title` and `author` are always present (possibly empty);
/// an absent cover is `None`, never `""`.
#[derive(Debug, Clone, Serialize)]
pub struct BookRecord {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub isbn: String,
    pub cover_url: Option<String>,
    pub publish_date: String,
    /// Provider-specific free field: price (Kakao) or page count (NL).
    pub price_or_page: String,
    /// Raw provider category, or a genre inferred from the text when
    /// the provider carries no category data.
    pub subject: String,
    pub description: Option<String>,
}

impl BookRecord {
    /// Kakao carries no category data, so the genre is inferred from
    /// title plus the full (untruncated) blurb.
    pub fn from_kakao(book: KakaoBook) -> Self {
        let subject = genre::infer_from_text(&book.title, &book.contents).to_string();
        Self {
            title: book.title,
            author: book.author,
            publisher: book.publisher,
            isbn: book.isbn,
            cover_url: book.thumbnail,
            publish_date: book.publish_date,
            price_or_page: book.price,
            subject,
            description: truncate_description(&book.contents),
        }
    }

    /// The National Library catalog has a subject classification of its
    /// own; it is kept raw.
    pub fn from_catalog(book: CatalogBook) -> Self {
        Self {
            title: book.title,
            author: book.author,
            publisher: book.publisher,
            isbn: book.isbn,
            cover_url: book.cover_url,
            publish_date: book.publish_date,
            price_or_page: book.page,
            subject: book.subject,
            description: None,
        }
    }
}

/// A librarian-recommended book, ready for display: blurb stripped of
/// markup, classification mapped to a display genre.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendedBookView {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub isbn: String,
    pub cover_url: Option<String>,
    pub contents: String,
    pub category: String,
    pub category_code: String,
    pub publish_year: i32,
    pub genre: String,
}

impl From<RecommendedBook> for RecommendedBookView {
    fn from(book: RecommendedBook) -> Self {
        let genre = genre::map_category_code(&book.category).to_string();
        Self {
            title: book.title,
            author: book.author,
            publisher: book.publisher,
            isbn: book.isbn,
            cover_url: book.cover_url,
            contents: strip_markup(&book.contents),
            category: book.category,
            category_code: book.category_code,
            publish_year: book.publish_year,
            genre,
        }
    }
}

/// A chart entry (bestsellers / new titles).
#[derive(Debug, Clone, Serialize)]
pub struct ChartBookView {
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

impl From<AladinBook> for ChartBookView {
    fn from(book: AladinBook) -> Self {
        Self {
            title: book.title,
            author: book.author,
            publisher: book.publisher,
            isbn13: book.isbn13,
            cover_url: book.cover_url,
            pub_date: book.pub_date,
            description: book.description,
            category_name: book.category_name,
            price_standard: book.price_standard,
            price_sales: book.price_sales,
            link: book.link,
        }
    }
}

/// Cut a blurb for display: at most [`DESCRIPTION_LIMIT`] characters,
/// with a trailing ellipsis when something was cut. Empty blurbs stay
/// absent.
fn truncate_description(contents: &str) -> Option<String> {
    if contents.is_empty() {
        return None;
    }
    if contents.chars().count() <= DESCRIPTION_LIMIT {
        return Some(contents.to_string());
    }
    let cut: String = contents.chars().take(DESCRIPTION_LIMIT).collect();
    Some(format!("{}...", cut))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_kakao_infers_genre_from_full_text() {
        let book = KakaoBook {
            title: "어떤 책".to_string(),
            contents: "밤하늘과 우주를 다룬 안내서".to_string(),
            ..Default::default()
        };
        let record = BookRecord::from_kakao(book);
        assert_eq!(record.subject, "과학");
    }

    #[test]
    fn test_from_kakao_truncates_long_description() {
        let book = KakaoBook {
            contents: "가".repeat(250),
            ..Default::default()
        };
        let record = BookRecord::from_kakao(book);
        let description = record.description.expect("description present");
        assert!(description.ends_with("..."));
        assert_eq!(description.chars().count(), 203);
    }

    #[test]
    fn test_from_kakao_short_description_kept_whole() {
        let book = KakaoBook {
            contents: "짧은 소개".to_string(),
            ..Default::default()
        };
        let record = BookRecord::from_kakao(book);
        assert_eq!(record.description.as_deref(), Some("짧은 소개"));
    }

    #[test]
    fn test_from_kakao_empty_description_is_absent() {
        let record = BookRecord::from_kakao(KakaoBook::default());
        assert_eq!(record.description, None);
        assert_eq!(record.title, "");
        assert_eq!(record.subject, "기타");
    }

    #[test]
    fn test_from_catalog_keeps_raw_subject() {
        let book = CatalogBook {
            title: "토지".to_string(),
            subject: "813.6".to_string(),
            page: "424".to_string(),
            ..Default::default()
        };
        let record = BookRecord::from_catalog(book);
        assert_eq!(record.subject, "813.6");
        assert_eq!(record.price_or_page, "424");
        assert_eq!(record.cover_url, None);
    }

    #[test]
    fn test_recommended_view_sanitizes_and_classifies() {
        let book = RecommendedBook {
            title: "어린 왕자".to_string(),
            contents: "<p>사막에서&nbsp;만난 아이</p>".to_string(),
            category: "문학".to_string(),
            category_code: "11".to_string(),
            publish_year: 2015,
            ..Default::default()
        };
        let view = RecommendedBookView::from(book);
        assert_eq!(view.contents, "사막에서 만난 아이");
        assert_eq!(view.genre, "소설");
        assert_eq!(view.publish_year, 2015);
    }
}
