//! Word (.docx) text extraction.
//!
//! A .docx file is a zip archive; the body text lives in
//! `word/document.xml` as `<w:t>` runs grouped into `<w:p>` paragraphs.

use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::backend::{ExtractionBackend, ExtractionError};

const DOCUMENT_PART: &str = "word/document.xml";

/// Text runs, paragraph ends, tabs and line breaks, in document order.
static BODY_TOKENS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|</w:p>|<w:p\s*/>|<w:tab\s*/>|<w:br\s*/>|<w:cr\s*/>")
        .unwrap()
});

static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#x[0-9a-fA-F]+|#[0-9]+|lt|gt|amp|quot|apos);").unwrap());

#[derive(Debug, Clone)]
pub struct DocxBackend {
    enabled: bool,
}

impl Default for DocxBackend {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl DocxBackend {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl ExtractionBackend for DocxBackend {
    fn format(&self) -> &'static str {
        "docx"
    }

    fn is_available(&self) -> bool {
        self.enabled
    }

    fn availability_hint(&self) -> String {
        "set enable_docx = true in the config file".to_string()
    }

    fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        let file = std::fs::File::open(path)?;
        let mut archive = zip::ZipArchive::new(file).map_err(|e| {
            ExtractionError::ExtractionFailed(format!("not a docx archive: {}", e))
        })?;

        let mut xml = String::new();
        archive
            .by_name(DOCUMENT_PART)
            .map_err(|e| {
                ExtractionError::ExtractionFailed(format!("missing {}: {}", DOCUMENT_PART, e))
            })?
            .read_to_string(&mut xml)?;

        Ok(document_xml_to_text(&xml))
    }
}

/// Flatten WordprocessingML body XML to paragraphs joined by newlines.
fn document_xml_to_text(xml: &str) -> String {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();

    for caps in BODY_TOKENS.captures_iter(xml) {
        if let Some(run) = caps.get(1) {
            current.push_str(&unescape_xml(run.as_str()));
            continue;
        }
        match &caps[0] {
            tag if tag.starts_with("<w:tab") => current.push('\t'),
            tag if tag.starts_with("<w:br") || tag.starts_with("<w:cr") => current.push('\n'),
            _ => paragraphs.push(std::mem::take(&mut current)),
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    paragraphs.join("\n")
}

fn unescape_xml(s: &str) -> String {
    ENTITY
        .replace_all(s, |caps: &regex::Captures| match &caps[1] {
            "lt" => "<".to_string(),
            "gt" => ">".to_string(),
            "amp" => "&".to_string(),
            "quot" => "\"".to_string(),
            "apos" => "'".to_string(),
            numeric => {
                let code = &numeric[1..];
                let value = match code.strip_prefix('x') {
                    Some(hex) => u32::from_str_radix(hex, 16).ok(),
                    None => code.parse::<u32>().ok(),
                };
                value
                    .and_then(char::from_u32)
                    .map(String::from)
                    .unwrap_or_default()
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_docx(path: &Path, document_xml: &str) {
        let file = std::fs::File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        zip.start_file(DOCUMENT_PART, zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(document_xml.as_bytes()).unwrap();
        zip.finish().unwrap();
    }

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:body>
<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>I love</w:t></w:r><w:r><w:t xml:space="preserve"> this &amp; that</w:t></w:r></w:p>
<w:p/>
<w:p><w:r><w:t>Col</w:t><w:tab/><w:t>&lt;2&gt; &#233;t&#xE9;</w:t></w:r></w:p>
</w:body>
</w:document>"#;

    #[test]
    fn test_document_xml_to_text() {
        assert_eq!(
            document_xml_to_text(BODY),
            "I love this & that\n\nCol\t<2> été"
        );
        assert_eq!(
            document_xml_to_text("<w:p><w:r><w:t>a &#38;lt; b &amp;#60;</w:t></w:r></w:p>"),
            "a &lt; b &#60;"
        );
    }

    #[test]
    fn test_extracts_from_archive() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("review.docx");
        write_docx(&path, BODY);

        let text = DocxBackend::default().extract(&path).unwrap();
        assert!(text.starts_with("I love this & that"));
    }

    #[test]
    fn test_non_zip_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.docx");
        std::fs::write(&path, "not a zip").unwrap();

        let err = DocxBackend::default().extract(&path).unwrap_err();
        assert!(matches!(err, ExtractionError::ExtractionFailed(_)));
    }

    #[test]
    fn test_archive_without_document_part_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.docx");
        let file = std::fs::File::create(&path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        zip.start_file("other.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"<x/>").unwrap();
        zip.finish().unwrap();

        let err = DocxBackend::default().extract(&path).unwrap_err();
        assert!(err.to_string().contains(DOCUMENT_PART));
    }

    #[test]
    fn test_disabled_backend_is_unavailable() {
        assert!(!DocxBackend::new(false).is_available());
    }
}
