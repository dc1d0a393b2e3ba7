//! Upload filename handling.

/// File extensions accepted for upload.
pub const ALLOWED_EXTENSIONS: &[&str] = &["txt", "pdf", "docx"];

/// Lowercased extension of `filename` if it is accepted for upload.
pub fn allowed_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    let ext = ext.to_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Reduce a client-supplied filename to a safe single path component.
///
/// Directory parts are dropped, whitespace becomes `_`, and anything outside
/// `[A-Za-z0-9._-]` is removed. Leading and trailing dots and underscores are
/// trimmed. An empty result becomes `"upload"`.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);

    let cleaned: String = base
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        "upload".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extension() {
        assert_eq!(allowed_extension("review.txt").as_deref(), Some("txt"));
        assert_eq!(allowed_extension("Report.PDF").as_deref(), Some("pdf"));
        assert_eq!(allowed_extension("a.b.docx").as_deref(), Some("docx"));
        assert_eq!(allowed_extension("virus.exe"), None);
        assert_eq!(allowed_extension("noextension"), None);
        assert_eq!(allowed_extension("archive.docx.zip"), None);
    }

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename(r"C:\Users\me\notes.txt"), "notes.txt");
    }

    #[test]
    fn test_sanitize_cleans_characters() {
        assert_eq!(sanitize_filename("my review (final).txt"), "my_review_final.txt");
        assert_eq!(sanitize_filename("..hidden.txt"), "hidden.txt");
        assert_eq!(sanitize_filename("日本.txt"), "txt");
        assert_eq!(sanitize_filename("..."), "upload");
    }
}
