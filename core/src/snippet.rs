//! Fixed-window excerpts around the first occurrence of a word.
//!
//! Matching folds content and word the same way the index does (NFKC, then
//! lower-case) and has no notion of word boundaries, so a match may land
//! inside a longer token. The window is [`LOOKBEHIND`] bytes before the match
//! and [`LOOKAHEAD`] bytes after its start, measured in the original content
//! and clamped to it.

use unicode_normalization::UnicodeNormalization;

/// Bytes kept before the match.
pub const LOOKBEHIND: usize = 50;
/// Bytes kept after the start of the match.
pub const LOOKAHEAD: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Snippet {
    /// `start..=end` is the byte window in the content. `text` is the longest
    /// run of whole characters inside that window.
    Excerpt { start: usize, end: usize, text: String },
    /// The word does not occur in the content.
    NotFound,
    /// The clamped window collapsed (`start >= end`).
    EmptyWindow,
}

impl Snippet {
    pub fn text(&self) -> Option<&str> {
        match self {
            Snippet::Excerpt { text, .. } => Some(text),
            Snippet::NotFound | Snippet::EmptyWindow => None,
        }
    }
}

pub fn extract(content: &str, word: &str) -> Snippet {
    let Some(pos) = find_folded(content, word) else {
        return Snippet::NotFound;
    };

    // A match implies non-empty content.
    let last = content.len() - 1;
    let start = pos.saturating_sub(LOOKBEHIND);
    let end = pos.saturating_add(LOOKAHEAD).min(last);
    if start >= end {
        return Snippet::EmptyWindow;
    }

    let mut lo = start;
    while !content.is_char_boundary(lo) {
        lo += 1;
    }
    let mut hi = end + 1;
    while hi > lo && !content.is_char_boundary(hi) {
        hi -= 1;
    }
    Snippet::Excerpt { start, end, text: content[lo..hi].to_string() }
}

/// Byte offset in `content` of the character where the first folded match
/// of `word` starts.
fn find_folded(content: &str, word: &str) -> Option<usize> {
    let (needle, _) = fold(word);
    if needle.is_empty() {
        return None;
    }
    let (haystack, origin) = fold(content);
    haystack.find(&needle).map(|i| origin[i])
}

/// NFKC + lower-case `text`, recording for every output byte the offset of
/// the source character it came from.
fn fold(text: &str) -> (String, Vec<usize>) {
    let mut folded = String::with_capacity(text.len());
    let mut origin = Vec::with_capacity(text.len());
    for (offset, c) in text.char_indices() {
        for n in std::iter::once(c).nfkc() {
            for l in n.to_lowercase() {
                folded.push(l);
                origin.extend(std::iter::repeat(offset).take(l.len_utf8()));
            }
        }
    }
    (folded, origin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_content_is_returned_whole() {
        let s = extract("this filter is a filter", "filter");
        assert_eq!(s, Snippet::Excerpt { start: 0, end: 22, text: "this filter is a filter".into() });
    }

    #[test]
    fn match_at_offset_zero_starts_window_at_zero() {
        assert_eq!(
            extract("needle and more", "NEEDLE"),
            Snippet::Excerpt { start: 0, end: 14, text: "needle and more".into() }
        );
    }

    #[test]
    fn non_ascii_case_folds_like_the_index() {
        assert_eq!(extract("Über die Brücke", "über").text(), Some("Über die Brücke"));
        assert_eq!(extract("Über die Brücke", "BRÜCKE").text(), Some("Über die Brücke"));
    }

    #[test]
    fn compatibility_forms_match_their_nfkc_equivalent() {
        match extract("the \u{fb01}lter stage", "filter") {
            Snippet::Excerpt { start, end, .. } => {
                assert_eq!(start, 0);
                assert_eq!(end, "the \u{fb01}lter stage".len() - 1);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn window_offsets_refer_to_original_bytes() {
        let content = format!("{}Ärger", "é".repeat(40));
        match extract(&content, "ärger") {
            Snippet::Excerpt { start, end, text } => {
                assert_eq!(start, 30);
                assert_eq!(end, content.len() - 1);
                assert!(text.ends_with("Ärger"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn match_is_case_insensitive() {
        assert_eq!(extract("Hello WORLD", "world").text(), Some("Hello WORLD"));
    }

    #[test]
    fn window_is_clamped_on_both_sides() {
        let content = format!("{}needle{}", "a".repeat(80), "b".repeat(200));
        match extract(&content, "NEEDLE") {
            Snippet::Excerpt { start, end, text } => {
                assert_eq!(start, 30);
                assert_eq!(end, 180);
                assert_eq!(text.len(), 151);
                assert!(text.contains("needle"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn match_at_end_clamps_to_last_byte() {
        let content = "xxxxz";
        assert_eq!(extract(content, "z"), Snippet::Excerpt { start: 0, end: 4, text: "xxxxz".into() });
    }

    #[test]
    fn absent_word_is_not_found() {
        assert_eq!(extract("abc", "zzz"), Snippet::NotFound);
        assert_eq!(extract("", "a"), Snippet::NotFound);
        assert_eq!(extract("abc", ""), Snippet::NotFound);
    }

    #[test]
    fn single_byte_content_is_an_empty_window() {
        assert_eq!(extract("a", "A"), Snippet::EmptyWindow);
    }

    #[test]
    fn matches_inside_longer_tokens() {
        assert_eq!(extract("prefiltered", "filter").text(), Some("prefiltered"));
    }

    #[test]
    fn text_never_splits_a_character() {
        let content = format!("{}key", "é".repeat(30));
        let s = extract(&content, "key");
        let text = s.text().unwrap();
        assert!(text.ends_with("key"));
        assert!(text.starts_with('é'));
    }
}
