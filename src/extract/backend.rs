//! Extraction backend abstraction and outcome types.

use std::path::Path;

use thiserror::Error;

/// Errors that can occur during text extraction.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("External tool not found: {0}")]
    ToolNotFound(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of extracting text from one uploaded file.
#[derive(Debug)]
pub enum Extraction {
    /// Text was extracted (possibly empty).
    Text(String),
    /// No backend for this format was available at startup.
    Unavailable(String),
    /// The backend ran and failed.
    Failed(ExtractionError),
}

impl Extraction {
    /// Extracted text, or an empty string when extraction did not happen.
    pub fn into_text(self) -> String {
        match self {
            Extraction::Text(text) => text,
            Extraction::Unavailable(_) | Extraction::Failed(_) => String::new(),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Extraction::Text(_))
    }
}

/// A strategy for turning one file format into plain text.
pub trait ExtractionBackend: Send + Sync {
    /// Lowercase file extension this backend handles.
    fn format(&self) -> &'static str;

    /// Check if this backend can run (tools installed, feature enabled).
    fn is_available(&self) -> bool;

    /// Get a description of what's needed to make this backend available.
    fn availability_hint(&self) -> String;

    /// Extract plain text from the file at `path`.
    fn extract(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// Availability of one backend, as decided at startup.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct BackendAvailability {
    pub format: &'static str,
    pub available: bool,
    pub hint: String,
}
