//! Sentiment classification.
//!
//! A [`Classifier`] is one of three things:
//! - a probabilistic model that scores every known class
//! - a label-only model that names a single class
//! - the keyword heuristic used when no model artifact could be loaded
//!
//! Every variant answers through [`Classifier::classify`]. Model failures do
//! not propagate as errors; they come back as [`Classification::Degraded`] so
//! callers can tell a broken model apart from a real prediction.

mod artifact;
mod heuristic;
mod lexicon;
mod linear;

use serde::Serialize;
use thiserror::Error;

pub use artifact::{load_classifier, ModelArtifact, ModelKind, ModelLoadError, ModelStatus};
pub use heuristic::{KeywordHeuristic, NEGATIVE_WORDS, POSITIVE_WORDS};
pub use lexicon::{LexiconEntry, LexiconModel};
pub use linear::LinearModel;

/// Label reported when model invocation fails.
pub const ERROR_LABEL: &str = "Error";

/// Label reported by a probabilistic model that declares no classes.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Errors raised while invoking a loaded model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{what} has length {found}, expected {expected}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("model produced non-finite probabilities")]
    NonFinite,

    #[error("model defines no labels")]
    NoLabels,
}

/// A model that produces one probability per class.
pub trait ProbabilisticModel: Send + Sync {
    /// Class names, parallel to the output of `predict_proba`.
    fn classes(&self) -> &[String];

    /// Probability of each class for `text`.
    fn predict_proba(&self, text: &str) -> Result<Vec<f64>, ModelError>;
}

/// A model that only names the predicted class.
pub trait LabelModel: Send + Sync {
    fn predict(&self, text: &str) -> Result<String, ModelError>;
}

/// Outcome of classifying one text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub label: String,
    pub labels: Vec<String>,
    pub scores: Vec<f64>,
}

impl Prediction {
    /// Sentinel prediction for a failed model invocation.
    pub fn error() -> Self {
        Self {
            label: ERROR_LABEL.to_string(),
            labels: Vec::new(),
            scores: Vec::new(),
        }
    }

    /// Prediction from a label-only model.
    pub fn single(label: String) -> Self {
        Self {
            labels: vec![label.clone()],
            scores: vec![1.0],
            label,
        }
    }

    /// Pick the most probable class. Ties go to the lowest index.
    fn from_probabilities(classes: &[String], probs: Vec<f64>) -> Result<Self, ModelError> {
        if probs.len() != classes.len() {
            return Err(ModelError::ShapeMismatch {
                what: "probability vector",
                expected: classes.len(),
                found: probs.len(),
            });
        }

        let mut best: Option<usize> = None;
        for (i, p) in probs.iter().enumerate() {
            if best.map_or(true, |b| *p > probs[b]) {
                best = Some(i);
            }
        }

        let label = best
            .map(|i| classes[i].clone())
            .unwrap_or_else(|| UNKNOWN_LABEL.to_string());

        Ok(Self {
            label,
            labels: classes.to_vec(),
            scores: probs,
        })
    }
}

/// How a prediction was obtained.
#[derive(Debug)]
pub enum Classification {
    /// A loaded model answered.
    Model(Prediction),
    /// No model is loaded; the keyword heuristic answered.
    Heuristic(Prediction),
    /// The loaded model failed.
    Degraded(ModelError),
}

impl Classification {
    /// Collapse to a prediction, substituting the `"Error"` sentinel for
    /// a failed model.
    pub fn into_prediction(self) -> Prediction {
        match self {
            Classification::Model(p) | Classification::Heuristic(p) => p,
            Classification::Degraded(_) => Prediction::error(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Classification::Degraded(_))
    }

    /// Short name of the path that produced this outcome.
    pub fn source(&self) -> &'static str {
        match self {
            Classification::Model(_) => "model",
            Classification::Heuristic(_) => "heuristic",
            Classification::Degraded(_) => "degraded",
        }
    }
}

/// The classifier shared by every request.
pub enum Classifier {
    Probabilistic(Box<dyn ProbabilisticModel>),
    LabelOnly(Box<dyn LabelModel>),
    Heuristic(KeywordHeuristic),
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::Heuristic(KeywordHeuristic)
    }
}

impl Classifier {
    pub fn heuristic() -> Self {
        Self::default()
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Classifier::Heuristic(_))
    }

    /// Classify `text`. Never fails; see [`Classification`].
    pub fn classify(&self, text: &str) -> Classification {
        let outcome = match self {
            Classifier::Probabilistic(model) => model
                .predict_proba(text)
                .and_then(|probs| Prediction::from_probabilities(model.classes(), probs)),
            Classifier::LabelOnly(model) => model.predict(text).map(Prediction::single),
            Classifier::Heuristic(heuristic) => {
                return Classification::Heuristic(heuristic.classify(text));
            }
        };

        match outcome {
            Ok(prediction) => Classification::Model(prediction),
            Err(e) => {
                tracing::warn!("Model invocation failed: {}", e);
                Classification::Degraded(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProbs {
        classes: Vec<String>,
        probs: Vec<f64>,
    }

    impl ProbabilisticModel for FixedProbs {
        fn classes(&self) -> &[String] {
            &self.classes
        }

        fn predict_proba(&self, _text: &str) -> Result<Vec<f64>, ModelError> {
            Ok(self.probs.clone())
        }
    }

    struct Broken;

    impl LabelModel for Broken {
        fn predict(&self, _text: &str) -> Result<String, ModelError> {
            Err(ModelError::NoLabels)
        }
    }

    struct Echo;

    impl LabelModel for Echo {
        fn predict(&self, text: &str) -> Result<String, ModelError> {
            Ok(text.to_string())
        }
    }

    fn classes(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_probabilistic_picks_argmax() {
        let classifier = Classifier::Probabilistic(Box::new(FixedProbs {
            classes: classes(&["negative", "neutral", "positive"]),
            probs: vec![0.2, 0.3, 0.5],
        }));

        let outcome = classifier.classify("anything");
        assert_eq!(outcome.source(), "model");
        let prediction = outcome.into_prediction();
        assert_eq!(prediction.label, "positive");
        assert_eq!(prediction.labels, classes(&["negative", "neutral", "positive"]));
        assert_eq!(prediction.scores, vec![0.2, 0.3, 0.5]);
    }

    #[test]
    fn test_probabilistic_tie_goes_to_first_class() {
        let classifier = Classifier::Probabilistic(Box::new(FixedProbs {
            classes: classes(&["a", "b"]),
            probs: vec![0.5, 0.5],
        }));
        assert_eq!(classifier.classify("x").into_prediction().label, "a");
    }

    #[test]
    fn test_probabilistic_without_classes_is_unknown() {
        let classifier = Classifier::Probabilistic(Box::new(FixedProbs {
            classes: Vec::new(),
            probs: Vec::new(),
        }));
        let prediction = classifier.classify("x").into_prediction();
        assert_eq!(prediction.label, UNKNOWN_LABEL);
        assert!(prediction.labels.is_empty());
    }

    #[test]
    fn test_probability_length_mismatch_degrades() {
        let classifier = Classifier::Probabilistic(Box::new(FixedProbs {
            classes: classes(&["a", "b"]),
            probs: vec![1.0],
        }));
        let outcome = classifier.classify("x");
        assert!(outcome.is_degraded());
        assert_eq!(outcome.into_prediction(), Prediction::error());
    }

    #[test]
    fn test_label_only_scores_one() {
        let classifier = Classifier::LabelOnly(Box::new(Echo));
        let prediction = classifier.classify("joy").into_prediction();
        assert_eq!(prediction.label, "joy");
        assert_eq!(prediction.labels, vec!["joy"]);
        assert_eq!(prediction.scores, vec![1.0]);
    }

    #[test]
    fn test_model_error_becomes_sentinel() {
        let classifier = Classifier::LabelOnly(Box::new(Broken));
        let outcome = classifier.classify("text");
        assert!(matches!(outcome, Classification::Degraded(ModelError::NoLabels)));

        let prediction = outcome.into_prediction();
        assert_eq!(prediction.label, ERROR_LABEL);
        assert!(prediction.labels.is_empty());
        assert!(prediction.scores.is_empty());
    }

    #[test]
    fn test_default_is_heuristic() {
        let classifier = Classifier::default();
        assert!(classifier.is_fallback());
        let outcome = classifier.classify("I love this, it is great");
        assert_eq!(outcome.source(), "heuristic");
        assert_eq!(outcome.into_prediction().label, "positive");
    }
}
