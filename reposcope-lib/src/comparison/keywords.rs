use crate::scoring::tables::is_stop_word;
use regex::Regex;
use std::sync::LazyLock;

/// Maximum number of keywords kept from a description.
pub const MAX_KEYWORDS: usize = 10;

static WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[a-zA-Z0-9-]+\b").expect("invalid regex"));

/// Pull search keywords out of free text.
///
/// Lower-cases the text, splits on word boundaries, drops stop words and
/// anything of two characters or fewer, and keeps the first ten survivors in
/// their original order.
#[must_use]
pub fn extract_keywords(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_REGEX
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|word| word.chars().count() > 2 && !is_stop_word(word))
        .take(MAX_KEYWORDS)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_stop_words_and_short_tokens() {
        let keywords = extract_keywords("A fast web API for real time chat");
        assert_eq!(keywords, vec!["fast", "web", "api", "real", "time", "chat"]);
    }

    #[test]
    fn test_keeps_hyphenated_words() {
        let keywords = extract_keywords("Cross-platform GUI toolkit");
        assert_eq!(keywords, vec!["cross-platform", "gui", "toolkit"]);
    }

    #[test]
    fn test_limits_to_ten() {
        let text = "alpha bravo charlie delta echo foxtrot golf hotel india juliet kilo lima";
        let keywords = extract_keywords(text);
        assert_eq!(keywords.len(), MAX_KEYWORDS);
        assert_eq!(keywords.last().map(String::as_str), Some("juliet"));
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("!!! ... ??").is_empty());
    }

    #[test]
    fn test_lowercases() {
        assert_eq!(extract_keywords("Blazing RUST Parser"), vec!["blazing", "rust", "parser"]);
    }
}
