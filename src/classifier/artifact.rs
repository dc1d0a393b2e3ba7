//! Loading a serialized model artifact at startup.
//!
//! Artifacts are JSON documents tagged by `kind`:
//!
//! ```json
//! {"kind": "linear", "classes": ["negative", "positive"],
//!  "vocabulary": ["bad", "good"], "coefficients": [[1.0, -1.0], [-1.0, 1.0]],
//!  "intercepts": [0.0, 0.0]}
//! ```
//!
//! ```json
//! {"kind": "lexicon", "default_label": "neutral",
//!  "labels": [{"label": "joy", "keywords": ["glad"]}]}
//! ```
//!
//! A missing or unreadable artifact is not an error for the application: the
//! keyword heuristic takes over and the reason is kept in [`ModelStatus`].

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Classifier, LexiconEntry, LexiconModel, LinearModel};

/// Errors reading or parsing a model artifact.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid model artifact: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Serialized model description.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear {
        classes: Vec<String>,
        vocabulary: Vec<String>,
        coefficients: Vec<Vec<f64>>,
        #[serde(default)]
        intercepts: Vec<f64>,
    },
    Lexicon {
        labels: Vec<LexiconEntry>,
        #[serde(default = "default_lexicon_label")]
        default_label: String,
    },
}

fn default_lexicon_label() -> String {
    "neutral".to_string()
}

/// Kind of a successfully loaded model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Linear,
    Lexicon,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Linear => "linear",
            ModelKind::Lexicon => "lexicon",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ModelArtifact {
    pub fn from_json(json: &str) -> Result<Self, ModelLoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ModelLoadError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            ModelArtifact::Linear { .. } => ModelKind::Linear,
            ModelArtifact::Lexicon { .. } => ModelKind::Lexicon,
        }
    }

    pub fn into_classifier(self) -> Classifier {
        match self {
            ModelArtifact::Linear {
                classes,
                vocabulary,
                coefficients,
                intercepts,
            } => Classifier::Probabilistic(Box::new(LinearModel::new(
                classes,
                vocabulary,
                coefficients,
                intercepts,
            ))),
            ModelArtifact::Lexicon {
                labels,
                default_label,
            } => Classifier::LabelOnly(Box::new(LexiconModel::new(labels, default_label))),
        }
    }
}

/// What happened when the model artifact was loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ModelStatus {
    Loaded { kind: ModelKind, path: PathBuf },
    Missing { path: PathBuf },
    Invalid { path: PathBuf, error: String },
}

impl ModelStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, ModelStatus::Loaded { .. })
    }
}

impl fmt::Display for ModelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelStatus::Loaded { kind, path } => {
                write!(f, "{} model loaded from {}", kind, path.display())
            }
            ModelStatus::Missing { path } => write!(
                f,
                "no model at {}, using keyword heuristic",
                path.display()
            ),
            ModelStatus::Invalid { path, error } => write!(
                f,
                "model at {} could not be loaded ({}), using keyword heuristic",
                path.display(),
                error
            ),
        }
    }
}

/// Load the classifier from `path`, falling back to the keyword heuristic.
pub fn load_classifier(path: &Path) -> (Classifier, ModelStatus) {
    if !path.exists() {
        tracing::info!("No model artifact at {}, using keyword heuristic", path.display());
        return (
            Classifier::heuristic(),
            ModelStatus::Missing {
                path: path.to_path_buf(),
            },
        );
    }

    match ModelArtifact::from_path(path) {
        Ok(artifact) => {
            let kind = artifact.kind();
            tracing::info!("Loaded {} model from {}", kind, path.display());
            (
                artifact.into_classifier(),
                ModelStatus::Loaded {
                    kind,
                    path: path.to_path_buf(),
                },
            )
        }
        Err(e) => {
            tracing::warn!("Failed to load model from {}: {}", path.display(), e);
            (
                Classifier::heuristic(),
                ModelStatus::Invalid {
                    path: path.to_path_buf(),
                    error: e.to_string(),
                },
            )
        }
    }
}
