//! Upload-to-prediction pipeline.
//!
//! One submission goes through: input selection, optional upload storage and
//! text extraction, classification, stats recording, and feature
//! summarization. Extraction and model failures degrade (empty text and the
//! `"Error"` label respectively) but are reported in [`PipelineReport`] so
//! callers can tell what happened.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::NamedTempFile;

use crate::analysis::{digit_frequency, summarize_text, top_words, DigitCount, WordCount};
use crate::classifier::{Classifier, Prediction};
use crate::extract::{Extraction, ExtractionError, Extractors};
use crate::stats::StatsAggregator;
use crate::utils::{allowed_extension, sanitize_filename};

/// A file received from the client.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// The text source chosen for one prediction.
#[derive(Debug, Clone)]
pub enum PredictInput {
    /// Text typed by the user (already trimmed).
    Text(String),
    /// An uploaded file with an accepted extension.
    Upload {
        file: UploadedFile,
        extension: String,
    },
    /// A file already on disk (command-line use).
    File(PathBuf),
}

impl PredictInput {
    /// Choose between an uploaded file and typed text.
    ///
    /// A file wins when it has a name and an accepted extension; otherwise
    /// non-blank text is used. Returns `None` when neither is usable.
    pub fn choose(text_input: &str, file: Option<UploadedFile>) -> Option<Self> {
        if let Some(file) = file.filter(|f| !f.filename.is_empty()) {
            if let Some(extension) = allowed_extension(&file.filename) {
                return Some(PredictInput::Upload { file, extension });
            }
            tracing::debug!("Ignoring upload with disallowed name {:?}", file.filename);
        }

        let text = text_input.trim();
        if text.is_empty() {
            None
        } else {
            Some(PredictInput::Text(text.to_string()))
        }
    }
}

/// Where the classified text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextOrigin {
    Typed,
    Extracted,
    ExtractionUnavailable,
    ExtractionFailed,
}

impl From<&Extraction> for TextOrigin {
    fn from(extraction: &Extraction) -> Self {
        match extraction {
            Extraction::Text(_) => TextOrigin::Extracted,
            Extraction::Unavailable(_) => TextOrigin::ExtractionUnavailable,
            Extraction::Failed(_) => TextOrigin::ExtractionFailed,
        }
    }
}

/// Everything produced for one submission.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PipelineReport {
    pub prediction: Prediction,
    /// "model", "heuristic" or "degraded".
    pub classified_by: &'static str,
    pub origin: TextOrigin,
    pub top_words: Vec<WordCount>,
    pub summary: String,
    pub digits: Vec<DigitCount>,
}

/// Shared pipeline state. Cheap to clone.
#[derive(Clone)]
pub struct Pipeline {
    classifier: Arc<Classifier>,
    extractors: Arc<Extractors>,
    stats: Arc<StatsAggregator>,
    uploads_dir: PathBuf,
    top_words: usize,
}

impl Pipeline {
    pub fn new(
        classifier: Arc<Classifier>,
        extractors: Arc<Extractors>,
        stats: Arc<StatsAggregator>,
        uploads_dir: PathBuf,
        top_words: usize,
    ) -> Self {
        Self {
            classifier,
            extractors,
            stats,
            uploads_dir,
            top_words,
        }
    }

    pub fn stats(&self) -> &StatsAggregator {
        &self.stats
    }

    /// Run one submission to completion. Never fails.
    pub async fn run(&self, input: PredictInput) -> PipelineReport {
        let (text, origin) = match input {
            PredictInput::Text(text) => (text, TextOrigin::Typed),
            PredictInput::Upload { file, extension } => {
                let extraction = self.store_and_extract(file, extension).await;
                let origin = TextOrigin::from(&extraction);
                (extraction.into_text(), origin)
            }
            PredictInput::File(path) => {
                let extraction = self.extract_path(path).await;
                let origin = TextOrigin::from(&extraction);
                (extraction.into_text(), origin)
            }
        };

        self.analyze(&text, origin)
    }

    fn analyze(&self, text: &str, origin: TextOrigin) -> PipelineReport {
        let classification = self.classifier.classify(text);
        let classified_by = classification.source();
        let prediction = classification.into_prediction();

        self.stats.record(&prediction.label);

        tracing::info!(
            label = %prediction.label,
            classified_by,
            origin = ?origin,
            chars = text.chars().count(),
            "Prediction complete"
        );

        PipelineReport {
            top_words: top_words(text, self.top_words),
            summary: summarize_text(text),
            digits: digit_frequency(text),
            prediction,
            classified_by,
            origin,
        }
    }

    async fn store_and_extract(&self, file: UploadedFile, extension: String) -> Extraction {
        let extractors = Arc::clone(&self.extractors);
        let uploads_dir = self.uploads_dir.clone();

        let task = tokio::task::spawn_blocking(move || {
            match store_upload(&uploads_dir, &file, &extension) {
                Ok(stored) => extractors.extract(stored.path(), &extension),
                Err(e) => {
                    tracing::warn!("Failed to store upload {:?}: {}", file.filename, e);
                    Extraction::Failed(ExtractionError::Io(e))
                }
            }
        });
        join_extraction(task).await
    }

    async fn extract_path(&self, path: PathBuf) -> Extraction {
        let extractors = Arc::clone(&self.extractors);

        let task = tokio::task::spawn_blocking(move || {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            match allowed_extension(&name) {
                Some(extension) => extractors.extract(&path, &extension),
                None => Extraction::Failed(ExtractionError::UnsupportedFileType(name)),
            }
        });
        join_extraction(task).await
    }
}

async fn join_extraction(task: tokio::task::JoinHandle<Extraction>) -> Extraction {
    match task.await {
        Ok(extraction) => extraction,
        Err(e) => Extraction::Failed(ExtractionError::ExtractionFailed(format!(
            "extraction task failed: {}",
            e
        ))),
    }
}

/// Write an upload to a temporary file under `uploads_dir`.
///
/// The file is removed when the returned handle is dropped.
fn store_upload(
    uploads_dir: &Path,
    file: &UploadedFile,
    extension: &str,
) -> std::io::Result<NamedTempFile> {
    std::fs::create_dir_all(uploads_dir)?;
    let sanitized = sanitize_filename(&file.filename);
    let stem = Path::new(&sanitized)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let mut stored = tempfile::Builder::new()
        .prefix(&format!("{}-", stem))
        .suffix(&format!(".{}", extension))
        .tempfile_in(uploads_dir)?;
    stored.write_all(&file.bytes)?;
    stored.flush()?;
    tracing::debug!(
        "Stored upload {:?} at {}",
        file.filename,
        stored.path().display()
    );
    Ok(stored)
}
