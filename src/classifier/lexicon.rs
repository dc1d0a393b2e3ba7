//! Label-only keyword lexicon model.

use serde::Deserialize;

use super::{LabelModel, ModelError};

/// One label and the keywords that vote for it.
#[derive(Debug, Clone, Deserialize)]
pub struct LexiconEntry {
    pub label: String,
    pub keywords: Vec<String>,
}

/// Picks the label whose keywords occur most often in the text.
///
/// Keywords match as case-insensitive substrings. Ties go to the entry listed
/// first; text with no matches at all gets `default_label`.
#[derive(Debug, Clone)]
pub struct LexiconModel {
    entries: Vec<LexiconEntry>,
    default_label: String,
}

impl LexiconModel {
    pub fn new(entries: Vec<LexiconEntry>, default_label: String) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| LexiconEntry {
                label: entry.label,
                keywords: entry
                    .keywords
                    .into_iter()
                    .map(|k| k.to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect(),
            })
            .collect();

        Self {
            entries,
            default_label,
        }
    }
}

impl LabelModel for LexiconModel {
    fn predict(&self, text: &str) -> Result<String, ModelError> {
        if self.entries.is_empty() {
            return Err(ModelError::NoLabels);
        }

        let lowered = text.to_lowercase();
        let mut best: Option<(&str, usize)> = None;

        for entry in &self.entries {
            let hits: usize = entry
                .keywords
                .iter()
                .map(|k| lowered.matches(k.as_str()).count())
                .sum();
            if hits > 0 && best.map_or(true, |(_, top)| hits > top) {
                best = Some((entry.label.as_str(), hits));
            }
        }

        Ok(best
            .map(|(label, _)| label.to_string())
            .unwrap_or_else(|| self.default_label.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> LexiconModel {
        LexiconModel::new(
            vec![
                LexiconEntry {
                    label: "joy".to_string(),
                    keywords: vec!["glad".to_string(), "Delight".to_string()],
                },
                LexiconEntry {
                    label: "anger".to_string(),
                    keywords: vec!["furious".to_string(), "rage".to_string(), String::new()],
                },
            ],
            "neutral".to_string(),
        )
    }

    #[test]
    fn test_most_hits_wins() {
        assert_eq!(model().predict("Furious. Pure RAGE. glad?").unwrap(), "anger");
        assert_eq!(model().predict("delighted and glad").unwrap(), "joy");
    }

    #[test]
    fn test_tie_goes_to_first_entry() {
        assert_eq!(model().predict("glad but furious").unwrap(), "joy");
    }

    #[test]
    fn test_no_hits_uses_default() {
        assert_eq!(model().predict("the weather is mild").unwrap(), "neutral");
    }

    #[test]
    fn test_empty_lexicon_is_error() {
        let empty = LexiconModel::new(Vec::new(), "neutral".to_string());
        assert!(matches!(empty.predict("text"), Err(ModelError::NoLabels)));
    }
}
