//! End-to-end tests of the catalog normalization pipeline: raw provider
//! payloads through the parsers into unified records, deduplication and
//! sampling. Everything here runs on string fixtures.

use booklog_core::domains::catalog::models::BookRecord;
use booklog_core::domains::catalog::sample::sample_daily;
use booklog_core::domains::catalog::service::dedupe_by_isbn;
use booklog_core::domains::catalog::RecommendedBookView;
use chrono::NaiveDate;

const KAKAO_FIXTURE: &str = r#"{
    "meta": { "total_count": 2, "is_end": true },
    "documents": [
        {
            "title": "채식주의자",
            "authors": ["한강"],
            "publisher": "창비",
            "isbn": "8936433598 9788936433598",
            "thumbnail": "https://img.example.com/veg.jpg",
            "datetime": "2007-10-30T00:00:00.000+09:00",
            "price": 12000,
            "contents": "어느 날 꿈을 꾸고 육식을 거부하기 시작한 영혜의 이야기"
        },
        {
            "title": "장편 무제",
            "authors": [],
            "isbn": "",
            "thumbnail": "",
            "contents": ""
        }
    ]
}"#;

const NATLIB_FIXTURE: &str = r#"{
    "TOTAL_COUNT": "2",
    "docs": [
        {
            "TITLE": "채식주의자",
            "AUTHOR": "한강",
            "PUBLISHER": "창비",
            "EA_ISBN": "9788936433598",
            "TITLE_URL": "",
            "PUBLISH_PREDATE": "20071030",
            "PAGE": "247",
            "SUBJECT": "813.7"
        },
        {
            "TITLE": "이름 없는 소장본",
            "AUTHOR": "미상",
            "EA_ISBN": ""
        }
    ]
}"#;

#[test]
fn kakao_payload_normalizes_into_unified_records() {
    let books = kakao_client::parse_search_response(KAKAO_FIXTURE);
    assert_eq!(books.len(), 2);

    let records: Vec<BookRecord> = books.into_iter().map(BookRecord::from_kakao).collect();

    let first = &records[0];
    assert_eq!(first.isbn, "8936433598");
    assert_eq!(first.publish_date, "2007-10-30");
    assert_eq!(first.cover_url.as_deref(), Some("https://img.example.com/veg.jpg"));
    assert_eq!(first.price_or_page, "12000");
    // Kakao has no category data: genre is inferred from the text
    assert_eq!(first.subject, "소설");
    assert!(first.description.is_some());

    let second = &records[1];
    assert_eq!(second.author, "");
    assert_eq!(second.cover_url, None);
    assert_eq!(second.description, None);
    // 장편 is a fiction keyword
    assert_eq!(second.subject, "소설");
}

#[test]
fn library_payload_keeps_raw_subject_and_absent_cover() {
    let books = natlib_client::parse_catalog_response(NATLIB_FIXTURE);
    let records: Vec<BookRecord> = books.into_iter().map(BookRecord::from_catalog).collect();

    assert_eq!(records[0].subject, "813.7");
    assert_eq!(records[0].cover_url, None);
    assert_eq!(records[0].price_or_page, "247");
}

#[test]
fn multi_provider_union_dedupes_on_isbn_only() {
    let kakao: Vec<BookRecord> = kakao_client::parse_search_response(KAKAO_FIXTURE)
        .into_iter()
        .map(BookRecord::from_kakao)
        .collect();
    let natlib: Vec<BookRecord> = natlib_client::parse_catalog_response(NATLIB_FIXTURE)
        .into_iter()
        .map(BookRecord::from_catalog)
        .collect();

    let mut all = kakao;
    all.extend(natlib);
    assert_eq!(all.len(), 4);

    let deduped = dedupe_by_isbn(all);
    // the two 채식주의자 entries carry different ISBN strings (10 vs 13
    // digit), so both survive; the two blank-ISBN records survive too
    assert_eq!(deduped.len(), 4);

    // same ISBN from two sources collapses to the first occurrence
    let kakao_again: Vec<BookRecord> = kakao_client::parse_search_response(KAKAO_FIXTURE)
        .into_iter()
        .map(BookRecord::from_kakao)
        .collect();
    let mut doubled = kakao_again.clone();
    doubled.extend(kakao_again);
    let deduped = dedupe_by_isbn(doubled);
    // the ISBN-carrying record collapses; the two blank-ISBN ones do not
    assert_eq!(deduped.len(), 3);
}

#[test]
fn curated_xml_flows_into_display_view() {
    let xml = r#"<channel><list>
        <item>
            <recomtitle>난중일기</recomtitle>
            <recomauthor>이순신</recomauthor>
            <recomcontens>&lt;b&gt;전란의&lt;/b&gt;&amp;nbsp;기록</recomcontens>
            <drCodeName>역사</drCodeName>
            <drCode>6</drCode>
            <publishYear>2014</publishYear>
        </item>
    </list></channel>"#;

    let books = natlib_client::parse_recommend_response(xml);
    assert_eq!(books.len(), 1);

    let view = RecommendedBookView::from(books[0].clone());
    assert_eq!(view.contents, "전란의 기록");
    assert_eq!(view.genre, "역사");
    assert_eq!(view.publish_year, 2014);
}

#[test]
fn daily_chart_sampling_is_date_stable() {
    let fixture: Vec<aladin_client::AladinBook> = (0..60)
        .map(|i| aladin_client::AladinBook {
            title: format!("차트 {}", i),
            isbn13: format!("97911{:08}", i),
            ..Default::default()
        })
        .collect();

    let date = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");
    let today = sample_daily(fixture.clone(), 10, date);
    let today_again = sample_daily(fixture.clone(), 10, date);
    let tomorrow = sample_daily(
        fixture,
        10,
        NaiveDate::from_ymd_opt(2025, 6, 2).expect("valid date"),
    );

    let titles = |books: &[aladin_client::AladinBook]| -> Vec<String> {
        books.iter().map(|b| b.title.clone()).collect()
    };

    assert_eq!(titles(&today), titles(&today_again));
    assert_ne!(titles(&today), titles(&tomorrow));
    assert_eq!(today.len(), 10);
}
