//! PDF text extraction via pdftotext (Poppler).

use std::path::Path;
use std::process::Command;

use super::backend::{ExtractionBackend, ExtractionError};

/// Handle command output, extracting stdout on success or returning appropriate error.
fn handle_cmd_output(
    result: std::io::Result<std::process::Output>,
    tool_name: &str,
    error_prefix: &str,
) -> Result<String, ExtractionError> {
    match result {
        Ok(output) => {
            if output.status.success() {
                Ok(String::from_utf8_lossy(&output.stdout).to_string())
            } else {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(ExtractionError::ExtractionFailed(format!(
                    "{}: {}",
                    error_prefix,
                    stderr.trim()
                )))
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ExtractionError::ToolNotFound(tool_name.to_string()))
        }
        Err(e) => Err(ExtractionError::Io(e)),
    }
}

/// Runs `pdftotext` over the whole document.
///
/// Pages come back separated by form feeds; they are joined with newlines.
#[derive(Debug, Clone)]
pub struct PdfToTextBackend {
    binary: String,
}

impl Default for PdfToTextBackend {
    fn default() -> Self {
        Self::new("pdftotext")
    }
}

impl PdfToTextBackend {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

/// Check the file's magic bytes before handing it to an external tool.
fn ensure_pdf(path: &Path) -> Result<(), ExtractionError> {
    match infer::get_from_path(path)? {
        Some(kind) if kind.mime_type() == "application/pdf" => Ok(()),
        Some(kind) => Err(ExtractionError::ExtractionFailed(format!(
            "expected a PDF, found {}",
            kind.mime_type()
        ))),
        None => Err(ExtractionError::ExtractionFailed(
            "expected a PDF, found unrecognized content".to_string(),
        )),
    }
}

impl ExtractionBackend for PdfToTextBackend {
    fn format(&self) -> &'static str {
        "pdf"
    }

    fn is_available(&self) -> bool {
        which::which(&self.binary).is_ok()
    }

    fn availability_hint(&self) -> String {
        format!(
            "install poppler-utils so that `{}` is on PATH",
            self.binary
        )
    }

    fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        ensure_pdf(path)?;

        let output = Command::new(&self.binary)
            .args(["-enc", "UTF-8"])
            .arg(path)
            .arg("-")
            .output();

        let text = handle_cmd_output(output, &self.binary, "pdftotext failed")?;
        Ok(text
            .trim_end_matches('\u{c}')
            .split('\u{c}')
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_binary_is_unavailable() {
        let backend = PdfToTextBackend::new("definitely-not-a-real-pdftotext-binary");
        assert!(!backend.is_available());
        assert!(backend.availability_hint().contains("poppler"));
    }

    #[test]
    fn test_rejects_non_pdf_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fake.pdf");
        std::fs::write(&path, "plain text pretending to be a pdf").unwrap();

        let err = PdfToTextBackend::default().extract(&path).unwrap_err();
        assert!(matches!(err, ExtractionError::ExtractionFailed(_)));
    }

    #[test]
    fn test_missing_tool_reports_not_found() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        std::fs::write(&path, b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n").unwrap();

        let err = PdfToTextBackend::new("definitely-not-a-real-pdftotext-binary")
            .extract(&path)
            .unwrap_err();
        assert!(matches!(err, ExtractionError::ToolNotFound(_)));
    }
}
