//! Text extraction from uploaded files.
//!
//! One backend per accepted extension:
//! - `txt`: read directly
//! - `pdf`: pdftotext (Poppler), only when the binary is on PATH
//! - `docx`: unzip `word/document.xml` and collect its text runs
//!
//! Availability is decided once, when [`Extractors`] is built at startup. A
//! file whose backend is unavailable is still accepted; it simply yields
//! [`Extraction::Unavailable`].

mod backend;
mod docx;
mod pdf;
mod plain;

use std::path::Path;

pub use backend::{BackendAvailability, Extraction, ExtractionBackend, ExtractionError};
pub use docx::DocxBackend;
pub use pdf::PdfToTextBackend;
pub use plain::PlainTextBackend;

/// Options controlling which backends are installed.
#[derive(Debug, Clone)]
pub struct ExtractorOptions {
    pub pdftotext_binary: String,
    pub enable_docx: bool,
}

impl Default for ExtractorOptions {
    fn default() -> Self {
        Self {
            pdftotext_binary: "pdftotext".to_string(),
            enable_docx: true,
        }
    }
}

struct Slot {
    backend: Box<dyn ExtractionBackend>,
    available: bool,
}

/// The set of extraction backends chosen at startup.
pub struct Extractors {
    slots: Vec<Slot>,
}

impl Extractors {
    /// Build the standard backend set, probing each for availability.
    pub fn detect(options: &ExtractorOptions) -> Self {
        Self::from_backends(vec![
            Box::new(PlainTextBackend),
            Box::new(PdfToTextBackend::new(options.pdftotext_binary.clone())),
            Box::new(DocxBackend::new(options.enable_docx)),
        ])
    }

    pub fn from_backends(backends: Vec<Box<dyn ExtractionBackend>>) -> Self {
        let slots = backends
            .into_iter()
            .map(|backend| {
                let available = backend.is_available();
                if available {
                    tracing::debug!("Extraction backend for .{} available", backend.format());
                } else {
                    tracing::info!(
                        "Extraction backend for .{} unavailable ({})",
                        backend.format(),
                        backend.availability_hint()
                    );
                }
                Slot { backend, available }
            })
            .collect();

        Self { slots }
    }

    /// Availability of every installed backend, in registration order.
    pub fn availability(&self) -> Vec<BackendAvailability> {
        self.slots
            .iter()
            .map(|slot| BackendAvailability {
                format: slot.backend.format(),
                available: slot.available,
                hint: slot.backend.availability_hint(),
            })
            .collect()
    }

    /// Extract text from `path`, choosing the backend by `extension`.
    pub fn extract(&self, path: &Path, extension: &str) -> Extraction {
        let extension = extension.to_ascii_lowercase();

        let Some(slot) = self
            .slots
            .iter()
            .find(|slot| slot.backend.format() == extension)
        else {
            return Extraction::Failed(ExtractionError::UnsupportedFileType(extension));
        };

        if !slot.available {
            tracing::debug!(
                "Skipping {}: no .{} backend available",
                path.display(),
                extension
            );
            return Extraction::Unavailable(extension);
        }

        match slot.backend.extract(path) {
            Ok(text) => Extraction::Text(text),
            Err(e) => {
                tracing::warn!("Text extraction failed for {}: {}", path.display(), e);
                Extraction::Failed(e)
            }
        }
    }
}
