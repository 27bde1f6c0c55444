//! Markup stripping for provider-supplied blurbs.
//!
//! Curated-feed descriptions arrive with embedded HTML. Display wants
//! plain text: tag spans removed, a fixed set of named entities decoded
//! (`&amp;` last, so entities that were themselves escaped survive as
//! text instead of being decoded twice), whitespace collapsed.

/// Strip markup and normalize whitespace. Identity on empty input.
pub fn strip_markup(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    // Drop <...> spans. An unclosed '<' swallows the rest of the text,
    // matching how the feed actually truncates broken markup.
    let mut stripped = String::with_capacity(text.len());
    let mut in_tag = false;
    for ch in text.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => stripped.push(c),
            _ => {}
        }
    }

    // Decode order matters: &amp; must be last.
    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tags() {
        assert_eq!(strip_markup("<p>줄거리 <b>소개</b></p>"), "줄거리 소개");
    }

    #[test]
    fn test_decodes_entities() {
        assert_eq!(strip_markup("&quot;인용&quot;&nbsp;&apos;글&apos;"), "\"인용\" '글'");
    }

    #[test]
    fn test_amp_decoded_last() {
        // A double-escaped entity must come out as the entity text,
        // not be decoded twice into a live angle bracket.
        assert_eq!(strip_markup("&amp;lt;b&amp;gt;"), "&lt;b&gt;");
        assert_eq!(strip_markup("<b>Hello</b> &amp;nbsp; World"), "Hello &nbsp; World");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(strip_markup("  여러   칸\n\t띄어쓰기  "), "여러 칸 띄어쓰기");
        assert_eq!(strip_markup("a&nbsp;&nbsp;b"), "a b");
    }

    #[test]
    fn test_identity_on_empty() {
        assert_eq!(strip_markup(""), "");
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(strip_markup("마크업 없는 문장"), "마크업 없는 문장");
    }
}
