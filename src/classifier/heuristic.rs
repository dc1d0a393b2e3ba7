//! Keyword-count fallback used when no model artifact is loaded.

use super::Prediction;

pub const POSITIVE_WORDS: &[&str] = &["good", "great", "happy", "excellent", "love"];
pub const NEGATIVE_WORDS: &[&str] = &["bad", "sad", "terrible", "hate", "worst"];

/// Counts case-insensitive substring occurrences of fixed positive and
/// negative keywords. Ties go to `"positive"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordHeuristic;

impl KeywordHeuristic {
    /// `(positive, negative)` keyword occurrence counts.
    pub fn counts(&self, text: &str) -> (usize, usize) {
        let lowered = text.to_lowercase();
        let tally = |words: &[&str]| -> usize {
            words.iter().map(|w| lowered.matches(w).count()).sum()
        };
        (tally(POSITIVE_WORDS), tally(NEGATIVE_WORDS))
    }

    pub fn classify(&self, text: &str) -> Prediction {
        let (positive, negative) = self.counts(text);
        let label = if positive >= negative {
            "positive"
        } else {
            "negative"
        };

        Prediction {
            label: label.to_string(),
            labels: vec!["positive".to_string(), "negative".to_string()],
            scores: vec![positive as f64, negative as f64],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_text() {
        let prediction = KeywordHeuristic.classify("I love this, it is great");
        assert_eq!(prediction.label, "positive");
        assert_eq!(prediction.labels, vec!["positive", "negative"]);
        assert_eq!(prediction.scores, vec![2.0, 0.0]);
    }

    #[test]
    fn test_negative_text() {
        let prediction = KeywordHeuristic.classify("worst hate bad");
        assert_eq!(prediction.label, "negative");
        assert_eq!(prediction.scores, vec![0.0, 3.0]);
    }

    #[test]
    fn test_empty_text_is_positive() {
        let prediction = KeywordHeuristic.classify("");
        assert_eq!(prediction.label, "positive");
        assert_eq!(prediction.scores, vec![0.0, 0.0]);
    }

    #[test]
    fn test_counts_substrings_case_insensitively() {
        // "Goodness" contains "good"; "BADLY" contains "bad"
        assert_eq!(KeywordHeuristic.counts("Goodness, BADLY bad"), (1, 2));
    }

    #[test]
    fn test_is_deterministic() {
        let text = "great service but terrible food and sad staff";
        assert_eq!(
            KeywordHeuristic.classify(text),
            KeywordHeuristic.classify(text)
        );
        assert_eq!(KeywordHeuristic.classify(text).label, "negative");
    }
}
