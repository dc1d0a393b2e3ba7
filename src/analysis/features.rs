//! Word, whitespace and digit statistics over raw text.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Number of words returned by `top_words` unless configured otherwise.
pub const DEFAULT_TOP_WORDS: usize = 10;

/// Tokens never reported as top words.
pub const STOP_WORDS: &[&str] = &[
    "the", "and", "is", "in", "to", "of", "a", "it", "for", "that", "this", "on", "with", "as",
    "are",
];

/// Alphabetic runs of at least two letters, matched on lowercased text.
static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[a-z]{2,}\b").unwrap());

/// A token and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Occurrences of one decimal digit character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigitCount {
    pub digit: String,
    pub count: usize,
}

/// The `n` most frequent tokens of `text`.
///
/// Ranking is by count, descending; equal counts keep the order in which the
/// tokens were first seen.
pub fn top_words(text: &str, n: usize) -> Vec<WordCount> {
    let lowered = text.to_lowercase();

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<WordCount> = Vec::new();

    for token in WORD_PATTERN.find_iter(&lowered).map(|m| m.as_str()) {
        if STOP_WORDS.contains(&token) {
            continue;
        }
        match index.get(token) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(token, counts.len());
                counts.push(WordCount {
                    word: token.to_string(),
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable, so first-seen order survives among ties
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(n);
    counts
}

/// Collapse every whitespace run to a single space and trim both ends.
pub fn summarize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Count each digit `0`..`9` in `text`, always returning ten entries in order.
pub fn digit_frequency(text: &str) -> Vec<DigitCount> {
    let mut counts = [0usize; 10];
    for c in text.chars() {
        if let Some(d) = c.to_digit(10) {
            counts[d as usize] += 1;
        }
    }

    counts
        .iter()
        .enumerate()
        .map(|(d, &count)| DigitCount {
            digit: d.to_string(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_collapses_whitespace() {
        assert_eq!(summarize_text("a   b\tc\n d"), "a b c d");
        assert_eq!(summarize_text("  padded  "), "padded");
        assert_eq!(summarize_text(""), "");
    }

    #[test]
    fn test_digit_frequency_has_ten_ordered_entries() {
        let text = "call 555-0199 or 2024, room 7";
        let digits = digit_frequency(text);

        assert_eq!(digits.len(), 10);
        let keys: Vec<_> = digits.iter().map(|d| d.digit.as_str()).collect();
        assert_eq!(keys, ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"]);

        let total: usize = digits.iter().map(|d| d.count).sum();
        assert_eq!(total, text.chars().filter(|c| c.is_ascii_digit()).count());
        assert_eq!(digits[5].count, 3);
        assert_eq!(digits[9].count, 2);
    }

    #[test]
    fn test_digit_frequency_without_digits() {
        let digits = digit_frequency("no numbers here");
        assert_eq!(digits.len(), 10);
        assert!(digits.iter().all(|d| d.count == 0));
    }

    #[test]
    fn test_top_words_skips_stop_words_and_short_tokens() {
        let words = top_words("The cat and a dog. It is the cat, I think x y", 10);

        for w in &words {
            assert!(!STOP_WORDS.contains(&w.word.as_str()));
            assert!(w.word.len() >= 2);
        }
        assert_eq!(words[0].word, "cat");
        assert_eq!(words[0].count, 2);
    }

    #[test]
    fn test_top_words_ties_keep_first_seen_order() {
        let words = top_words("zebra apple mango apple zebra mango kiwi", 10);
        let order: Vec<_> = words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(order, ["zebra", "apple", "mango", "kiwi"]);
    }

    #[test]
    fn test_top_words_is_case_insensitive_and_limited() {
        let words = top_words("Rust RUST rust go Go python", 2);
        assert_eq!(
            words,
            vec![
                WordCount {
                    word: "rust".to_string(),
                    count: 3
                },
                WordCount {
                    word: "go".to_string(),
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn test_top_words_ignores_alphanumeric_runs() {
        // no word boundary between letters and digits
        let words = top_words("abc123 plain", 10);
        let order: Vec<_> = words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(order, ["plain"]);
    }
}
