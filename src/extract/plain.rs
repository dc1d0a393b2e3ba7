//! Plain text uploads.

use std::path::Path;

use super::backend::{ExtractionBackend, ExtractionError};

/// Reads `.txt` files, dropping any bytes that are not valid UTF-8.
#[derive(Debug, Default)]
pub struct PlainTextBackend;

impl ExtractionBackend for PlainTextBackend {
    fn format(&self) -> &'static str {
        "txt"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn availability_hint(&self) -> String {
        "always available".to_string()
    }

    fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        let bytes = std::fs::read(path)?;
        Ok(bytes.utf8_chunks().map(|chunk| chunk.valid()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_reads_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("note.txt");
        std::fs::write(&path, "héllo wörld").unwrap();

        assert_eq!(PlainTextBackend.extract(&path).unwrap(), "héllo wörld");
    }

    #[test]
    fn test_drops_invalid_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("note.txt");
        std::fs::write(&path, b"good\xff\xfe day").unwrap();

        assert_eq!(PlainTextBackend.extract(&path).unwrap(), "good day");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = PlainTextBackend
            .extract(&dir.path().join("absent.txt"))
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Io(_)));
    }
}
