//! Bag-of-words linear model with softmax probabilities.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::{ModelError, ProbabilisticModel};

/// Word tokens of two or more word characters.
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// Linear classifier over lowercase token counts.
///
/// Class `c` scores `intercepts[c] + Σ count(token) * coefficients[c][vocab(token)]`.
/// Probabilities are the softmax of those scores. A binary model may carry a
/// single coefficient row, in which case the row scores the second class and
/// the probability comes from the logistic function.
#[derive(Debug, Clone)]
pub struct LinearModel {
    classes: Vec<String>,
    vocabulary: HashMap<String, usize>,
    vocabulary_len: usize,
    coefficients: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
}

impl LinearModel {
    pub fn new(
        classes: Vec<String>,
        vocabulary: Vec<String>,
        coefficients: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
    ) -> Self {
        let vocabulary_len = vocabulary.len();
        let vocabulary = vocabulary
            .into_iter()
            .enumerate()
            .map(|(i, term)| (term.to_lowercase(), i))
            .collect();

        Self {
            classes,
            vocabulary,
            vocabulary_len,
            coefficients,
            intercepts,
        }
    }

    fn is_binary_logistic(&self) -> bool {
        self.classes.len() == 2 && self.coefficients.len() == 1
    }

    fn check_shape(&self) -> Result<(), ModelError> {
        let expected_rows = if self.is_binary_logistic() {
            1
        } else {
            self.classes.len()
        };

        if self.coefficients.len() != expected_rows {
            return Err(ModelError::ShapeMismatch {
                what: "coefficient matrix",
                expected: expected_rows,
                found: self.coefficients.len(),
            });
        }
        if !self.intercepts.is_empty() && self.intercepts.len() != expected_rows {
            return Err(ModelError::ShapeMismatch {
                what: "intercept vector",
                expected: expected_rows,
                found: self.intercepts.len(),
            });
        }
        if let Some(row) = self
            .coefficients
            .iter()
            .find(|row| row.len() != self.vocabulary_len)
        {
            return Err(ModelError::ShapeMismatch {
                what: "coefficient row",
                expected: self.vocabulary_len,
                found: row.len(),
            });
        }
        Ok(())
    }

    /// Vocabulary index -> occurrence count for the tokens of `text`.
    fn vectorize(&self, text: &str) -> HashMap<usize, f64> {
        let lowered = text.to_lowercase();
        let mut features = HashMap::new();
        for token in TOKEN_PATTERN.find_iter(&lowered) {
            if let Some(&idx) = self.vocabulary.get(token.as_str()) {
                *features.entry(idx).or_insert(0.0) += 1.0;
            }
        }
        features
    }

    fn decision_scores(&self, features: &HashMap<usize, f64>) -> Vec<f64> {
        self.coefficients
            .iter()
            .enumerate()
            .map(|(row_idx, row)| {
                let bias = self.intercepts.get(row_idx).copied().unwrap_or(0.0);
                bias + features
                    .iter()
                    .map(|(&idx, &count)| row[idx] * count)
                    .sum::<f64>()
            })
            .collect()
    }
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

impl ProbabilisticModel for LinearModel {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict_proba(&self, text: &str) -> Result<Vec<f64>, ModelError> {
        self.check_shape()?;

        let features = self.vectorize(text);
        let scores = self.decision_scores(&features);

        let probs = if self.is_binary_logistic() {
            let p = 1.0 / (1.0 + (-scores[0]).exp());
            vec![1.0 - p, p]
        } else {
            softmax(&scores)
        };

        if probs.iter().any(|p| !p.is_finite()) {
            return Err(ModelError::NonFinite);
        }
        Ok(probs)
    }
}
