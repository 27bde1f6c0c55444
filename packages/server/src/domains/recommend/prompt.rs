//! Prompt construction for the recommendation completion.
//!
//! Hybrid policy: with enough logged books the prompt embeds the
//! member's reading statistics for a personalized answer; below the
//! threshold it asks for current crowd favorites instead.

use std::collections::HashMap;

use crate::domains::books::models::{Book, ReadingStatus};

/// How many logged books a member needs before recommendations are
/// personalized.
pub const MIN_BOOKS_FOR_PERSONALIZED: usize = 3;

/// How many recent / highly-rated books the prompt lists.
const HISTORY_SAMPLE: usize = 5;

/// Ratings at or above this count as "loved it".
const HIGH_RATING: i32 = 4;

/// The JSON shape the completion must answer with.
fn response_format(reason_hint: &str) -> String {
    format!(
        r#"각 책에 대해 JSON 형식으로 다음 정보를 제공해주세요:
{{
  "recommendations": [
    {{
      "title": "책 제목",
      "author": "저자명",
      "publisher": "출판사",
      "category": "장르",
      "description": "책 소개 (2-3문장)",
      "reason": "{reason_hint} (1-2문장)"
    }}
  ]
}}

실제로 출판된 한국 도서만 추천해주세요. JSON 형식만 출력하고 다른 설명은 불필요합니다."#
    )
}

/// Build the personalized prompt. Callers check the
/// [`MIN_BOOKS_FOR_PERSONALIZED`] threshold first; `books` is expected
/// newest-first.
pub fn build_personalized_prompt(books: &[Book], count: usize) -> String {
    let mut genre_counts: HashMap<&str, usize> = HashMap::new();
    let mut author_counts: HashMap<&str, usize> = HashMap::new();
    for book in books {
        if !book.genre.is_empty() {
            *genre_counts.entry(book.genre.as_str()).or_default() += 1;
        }
        if !book.author.is_empty() {
            *author_counts.entry(book.author.as_str()).or_default() += 1;
        }
    }

    let read_status = ReadingStatus::Read.to_string();
    let recent: Vec<&Book> = books
        .iter()
        .filter(|b| b.status == read_status)
        .take(HISTORY_SAMPLE)
        .collect();

    let mut high_rated: Vec<&Book> = books
        .iter()
        .filter(|b| b.rating.unwrap_or(0) >= HIGH_RATING)
        .collect();
    high_rated.sort_by(|a, b| b.rating.cmp(&a.rating));
    high_rated.truncate(HISTORY_SAMPLE);

    let mut prompt = String::new();
    prompt.push_str(
        "당신은 전문 책 추천 AI입니다. 다음 사용자의 독서 기록을 분석하여 맞춤형 책을 추천해주세요.\n\n",
    );

    prompt.push_str("【독서 통계】\n");
    prompt.push_str(&format!("- 총 등록 책: {}권\n", books.len()));

    if !genre_counts.is_empty() {
        prompt.push_str("- 선호 장르: ");
        for (genre, n) in top_entries(genre_counts, 3) {
            prompt.push_str(&format!("{}({}권) ", genre, n));
        }
        prompt.push('\n');
    }

    if !author_counts.is_empty() {
        prompt.push_str("- 선호 작가: ");
        for (author, n) in top_entries(author_counts, 3) {
            prompt.push_str(&format!("{}({}권) ", author, n));
        }
        prompt.push('\n');
    }

    if !recent.is_empty() {
        prompt.push_str("\n【최근 읽은 책】\n");
        for book in &recent {
            prompt.push_str(&history_line(book));
        }
    }

    if !high_rated.is_empty() {
        prompt.push_str("\n【높은 평점을 준 책】\n");
        for book in &high_rated {
            prompt.push_str(&history_line(book));
        }
    }

    prompt.push_str("\n【요청사항】\n");
    prompt.push_str(&format!(
        "위 독서 패턴을 바탕으로 이 사용자가 좋아할만한 한국 도서 {}권을 추천해주세요.\n",
        count
    ));
    prompt.push_str(&response_format("이 사용자에게 추천하는 이유"));

    prompt
}

/// Build the fallback prompt for members with little or no history.
pub fn build_trend_prompt(count: usize) -> String {
    let mut prompt = String::new();
    prompt.push_str("당신은 전문 책 추천 AI입니다.\n\n");
    prompt.push_str("【요청사항】\n");
    prompt.push_str(&format!(
        "최근 한국에서 인기 있는 베스트셀러 도서 중 평점이 높고 폭넓게 사랑받는 책 {}권을 추천해주세요.\n",
        count
    ));
    prompt.push_str("소설, 에세이, 자기계발, 인문 등 다양한 장르를 골고루 포함해주세요.\n\n");
    prompt.push_str(&response_format("많은 독자들에게 사랑받는 이유"));
    prompt
}

/// Highest-count entries, ties broken by name for a stable prompt.
fn top_entries(counts: HashMap<&str, usize>, limit: usize) -> Vec<(&str, usize)> {
    let mut entries: Vec<(&str, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries.truncate(limit);
    entries
}

fn history_line(book: &Book) -> String {
    let mut line = format!("- 『{}』", book.title);
    if !book.author.is_empty() {
        line.push_str(&format!(" - {}", book.author));
    }
    if let Some(rating) = book.rating {
        line.push_str(&format!(" (평점: {}/5)", rating));
    }
    line.push('\n');
    line
}
