//! Rule-based genre classification.
//!
//! Two entry points: keyword inference over free text (for providers
//! that carry no category data) and mapping of a raw provider category
//! (a KDC classification code or plain text) to a display genre.
//!
//! Both are pure and total: every input maps to a label, the fallback
//! being [`OTHER`]. Rule order matters: the first matching rule wins.

/// Fallback label when no rule matches.
pub const OTHER: &str = "기타";

/// Keyword rules for free-text inference, checked in order.
const TEXT_RULES: &[(&str, &[&str])] = &[
    ("소설", &["소설", "이야기", "장편", "단편", "novel"]),
    ("에세이", &["에세이", "수필", "산문", "일상", "기록"]),
    (
        "자기계발",
        &["자기계발", "성공", "습관", "동기부여", "자존감", "행복", "마음", "심리", "치유"],
    ),
    (
        "경제/경영",
        &["경제", "경영", "투자", "재테크", "마케팅", "비즈니스", "창업", "부자"],
    ),
    (
        "IT/컴퓨터",
        &["프로그래밍", "코딩", "개발", "java", "python", "javascript", "컴퓨터", "알고리즘", "데이터"],
    ),
    ("역사", &["역사", "문화", "전쟁", "세계사", "한국사", "조선", "고려"]),
    ("과학", &["과학", "물리", "화학", "생물", "수학", "우주", "진화"]),
    ("인문", &["철학", "인문", "사상", "사회", "교양", "예술"]),
];


/// Infer a genre from a book's title and blurb.
///
/// The poetry rule is checked last and must not fire on historical
/// content: `시` is a substring of `시대`, so text mentioning `역사` or
/// `시대` is excluded from it.
pub fn infer_from_text(title: &str, content: &str) -> &'static str {
    let text = format!("{} {}", title, content).to_lowercase();

    for (label, keywords) in TEXT_RULES {
        if keywords.iter().any(|k| text.contains(k)) {
            return label;
        }
    }

    if ["시집", "시", "poetry", "poem"].iter().any(|k| text.contains(k))
        && !text.contains("역사")
        && !text.contains("시대")
    {
        return "시";
    }

    OTHER
}

/// Map a raw provider category (KDC code or text) to a display genre.
///
/// Numeric categories are matched on their leading KDC digits first;
/// codes outside the mapped ranges (and non-numeric categories) fall
/// through to keyword containment on the raw text.
pub fn map_category_code(category: &str) -> &'static str {
    if category.is_empty() {
        return OTHER;
    }

    if category.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        let code: String = category.chars().take(3).collect();

        // 800s: literature, filed as fiction for display
        if code.starts_with('8') {
            return "소설";
        }
        // 100s: philosophy
        if code.starts_with('1') {
            return "인문";
        }
        // 300s: social science, 320s being economics
        if code.starts_with('3') {
            if code.starts_with("32") {
                return "경제/경영";
            }
            return "인문";
        }
        // 400s: natural science
        if code.starts_with('4') {
            return "과학";
        }
        // 500s: applied science, computing included
        if code.starts_with('5') {
            return "IT/컴퓨터";
        }
        // 900s: history
        if code.starts_with('9') {
            return "역사";
        }
    }

    let lower = category.to_lowercase();
    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

    if contains_any(&["소설", "문학"]) {
        return "소설";
    }
    if contains_any(&["에세이", "수필"]) {
        return "에세이";
    }
    // 시 is a substring of 시대: historical categories must not read as poetry
    if lower.contains("시") && !lower.contains("역사") && !lower.contains("시대") {
        return "시";
    }
    if contains_any(&["자기계발", "자기관리", "성공", "동기부여", "자기개발"]) {
        return "자기계발";
    }
    if contains_any(&["경제", "경영", "재테크", "투자", "마케팅", "비즈니스"]) {
        return "경제/경영";
    }
    if contains_any(&["인문", "철학", "심리", "사회", "교양"]) {
        return "인문";
    }
    if contains_any(&["역사", "문화"]) {
        return "역사";
    }
    if contains_any(&["과학", "수학", "물리", "화학", "생물", "자연"]) {
        return "과학";
    }
    if contains_any(&["컴퓨터", "프로그래밍", "it", "개발", "코딩", "웹", "앱", "소프트웨어"]) {
        return "IT/컴퓨터";
    }

    OTHER
}
