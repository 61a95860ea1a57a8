use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    // Han ideographs are emitted one per token; everything else is a run of
    // letters, marks, digits, underscores and inner apostrophes.
    static ref RE: Regex = Regex::new(r"(?u)\p{Han}|[[\p{L}\p{N}_]--\p{Han}][[\p{L}\p{M}\p{N}_']--\p{Han}]*").expect("valid regex");
}

/// Word segmentation used for both indexing and querying.
///
/// Implementations must be deterministic: the same text always yields the
/// same tokens in the same order. Case folding is left to the caller.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Default tokenizer: NFKC normalization followed by regex segmentation.
/// No stop-word removal and no stemming.
#[derive(Debug, Default, Clone, Copy)]
pub struct WordTokenizer;

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized = text.nfkc().collect::<String>();
        RE.find_iter(&normalized).map(|m| m.as_str().to_string()).collect()
    }
}

impl<F> Tokenizer for F
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn tokenize(&self, text: &str) -> Vec<String> {
        self(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_punctuation_and_keeps_case() {
        let t = WordTokenizer.tokenize("Boost.Asio: async_read, don't!");
        assert_eq!(t, vec!["Boost", "Asio", "async_read", "don't"]);
    }

    #[test]
    fn segments_han_per_character() {
        let t = WordTokenizer.tokenize("boost库文档");
        assert_eq!(t, vec!["boost", "库", "文", "档"]);
    }

    #[test]
    fn closures_are_tokenizers() {
        let ws = |s: &str| s.split_whitespace().map(str::to_string).collect::<Vec<_>>();
        assert_eq!(ws.tokenize("a  b"), vec!["a", "b"]);
    }
}
