//! The catalog aggregator.
//!
//! Fans search queries and feed requests out to the provider clients and
//! shapes the results for display. This is also the single boundary
//! where the degrade-gracefully contract lives: a provider failure of
//! any kind is logged and becomes an empty result, never an error: a
//! broken third party costs a widget, not the page.

use aladin_client::AladinClient;
use chrono::{Datelike, NaiveDate, Utc};
use kakao_client::KakaoClient;
use natlib_client::NatLibClient;
use tracing::warn;

use super::models::{BookRecord, ChartBookView, RecommendedBookView};
use super::sample::{fetch_pool_size, sample_daily, sample_random};

#[derive(Clone)]
pub struct CatalogService {
    kakao: KakaoClient,
    natlib: NatLibClient,
    aladin: AladinClient,
}

impl CatalogService {
    pub fn new(kakao: KakaoClient, natlib: NatLibClient, aladin: AladinClient) -> Self {
        Self {
            kakao,
            natlib,
            aladin,
        }
    }

    /// Keyword search over the Kakao catalog.
    pub async fn search(&self, query: &str) -> Vec<BookRecord> {
        match self.kakao.search(query).await {
            Ok(books) => books.into_iter().map(BookRecord::from_kakao).collect(),
            Err(e) => {
                warn!(error = %e, query, "Kakao search failed");
                Vec::new()
            }
        }
    }

    /// Union of title and author searches against the National Library
    /// catalog, deduplicated by ISBN.
    pub async fn search_library(&self, query: &str) -> Vec<BookRecord> {
        let mut results: Vec<BookRecord> = match self.natlib.search_title(query).await {
            Ok(books) => books.into_iter().map(BookRecord::from_catalog).collect(),
            Err(e) => {
                warn!(error = %e, query, "library title search failed");
                Vec::new()
            }
        };

        match self.natlib.search_author(query).await {
            Ok(books) => {
                results.extend(books.into_iter().map(BookRecord::from_catalog));
            }
            Err(e) => warn!(error = %e, query, "library author search failed"),
        }

        dedupe_by_isbn(results)
    }

    /// ISBN lookup for entry pre-fill: Kakao first, National Library as
    /// the fallback.
    pub async fn lookup_isbn(&self, isbn: &str) -> Option<BookRecord> {
        match self.kakao.lookup_isbn(isbn).await {
            Ok(Some(book)) => return Some(BookRecord::from_kakao(book)),
            Ok(None) => {}
            Err(e) => warn!(error = %e, isbn, "Kakao ISBN lookup failed"),
        }

        match self.natlib.lookup_isbn(isbn).await {
            Ok(found) => found.map(BookRecord::from_catalog),
            Err(e) => {
                warn!(error = %e, isbn, "library ISBN lookup failed");
                None
            }
        }
    }

    /// Latest librarian picks: a fresh random selection per call.
    pub async fn latest_recommended(&self, count: usize) -> Vec<RecommendedBookView> {
        match self.natlib.fetch_recommended(1, fetch_pool_size(count)).await {
            Ok(books) => sample_random(books, count)
                .into_iter()
                .map(RecommendedBookView::from)
                .collect(),
            Err(e) => {
                warn!(error = %e, "curated feed fetch failed");
                Vec::new()
            }
        }
    }

    /// Librarian picks registered in the current calendar month.
    pub async fn monthly_recommended(&self, count: usize) -> Vec<RecommendedBookView> {
        let (first, last) = month_bounds(Utc::now().date_naive());
        let start = first.format("%Y%m%d").to_string();
        let end = last.format("%Y%m%d").to_string();

        match self
            .natlib
            .fetch_recommended_between(1, count as u32, &start, &end)
            .await
        {
            Ok(books) => books.into_iter().map(RecommendedBookView::from).collect(),
            Err(e) => {
                warn!(error = %e, "monthly curated feed fetch failed");
                Vec::new()
            }
        }
    }

    /// Librarian picks for one classification code.
    pub async fn recommended_by_category(
        &self,
        category_code: &str,
        count: usize,
    ) -> Vec<RecommendedBookView> {
        match self
            .natlib
            .fetch_recommended_by_category(category_code, count as u32)
            .await
        {
            Ok(books) => books.into_iter().map(RecommendedBookView::from).collect(),
            Err(e) => {
                warn!(error = %e, category_code, "curated category feed fetch failed");
                Vec::new()
            }
        }
    }

    /// Today's bestseller picks, stable for the whole calendar day.
    pub async fn daily_bestsellers(&self, count: usize) -> Vec<ChartBookView> {
        match self.aladin.bestsellers(fetch_pool_size(count)).await {
            Ok(books) => sample_daily(books, count, Utc::now().date_naive())
                .into_iter()
                .map(ChartBookView::from)
                .collect(),
            Err(e) => {
                warn!(error = %e, "bestseller chart fetch failed");
                Vec::new()
            }
        }
    }

    /// Today's new-title picks, stable for the whole calendar day.
    pub async fn daily_new_titles(&self, count: usize) -> Vec<ChartBookView> {
        match self.aladin.new_titles(fetch_pool_size(count)).await {
            Ok(books) => sample_daily(books, count, Utc::now().date_naive())
                .into_iter()
                .map(ChartBookView::from)
                .collect(),
            Err(e) => {
                warn!(error = %e, "new-title chart fetch failed");
                Vec::new()
            }
        }
    }
}

/// Keep the first record for each non-empty ISBN; records without an
/// ISBN are never deduplicated against each other.
pub fn dedupe_by_isbn(records: Vec<BookRecord>) -> Vec<BookRecord> {
    let mut seen = std::collections::HashSet::new();
    records
        .into_iter()
        .filter(|record| record.isbn.is_empty() || seen.insert(record.isbn.clone()))
        .collect()
}

/// First and last day of the month containing `today`.
fn month_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today);
    let next_month = if today.month() == 12 {
        NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
    };
    let last = next_month
        .and_then(|d| d.pred_opt())
        .unwrap_or(today);
    (first, last)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(isbn: &str, title: &str) -> BookRecord {
        BookRecord {
            title: title.to_string(),
            author: String::new(),
            publisher: String::new(),
            isbn: isbn.to_string(),
            cover_url: None,
            publish_date: String::new(),
            price_or_page: String::new(),
            subject: String::new(),
            description: None,
        }
    }

    #[test]
    fn test_dedupe_drops_repeated_isbn() {
        let records = vec![
            record("9780000000001", "from title search"),
            record("9780000000002", "other"),
            record("9780000000001", "from author search"),
        ];
        let deduped = dedupe_by_isbn(records);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].title, "from title search");
    }

    #[test]
    fn test_dedupe_keeps_all_records_without_isbn() {
        let records = vec![record("", "first"), record("", "second")];
        let deduped = dedupe_by_isbn(records);
        assert_eq!(deduped.len(), 2);
    }

    #[test]
    fn test_dedupe_is_case_sensitive() {
        let records = vec![record("89x", "lower"), record("89X", "upper")];
        assert_eq!(dedupe_by_isbn(records).len(), 2);
    }

    #[test]
    fn test_month_bounds() {
        let (first, last) = month_bounds(NaiveDate::from_ymd_opt(2025, 2, 14).unwrap());
        assert_eq!(first, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());

        let (first, last) = month_bounds(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }
}
