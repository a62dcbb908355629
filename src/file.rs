use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A file selected for the content section, together with its read outcome.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path used to open the file
    pub absolute_path: PathBuf,

    /// Root-relative label written after `FILE PATH:`
    pub label: String,

    /// Decoded text, or the reason it could not be produced
    pub content: FileContent,
}

/// Outcome of reading a single file.
#[derive(Debug, Clone)]
pub enum FileContent {
    /// Full UTF-8 content, unmodified
    Text(String),

    /// The file could not be opened or decoded
    Unreadable(Error),
}

impl SourceFile {
    /// Reads `path` and captures the outcome without failing the caller.
    ///
    /// Read failures name the file by its label, not its host path.
    #[must_use]
    pub fn read(absolute_path: PathBuf, label: String) -> Self {
        let content = match read_text(&absolute_path, &label) {
            Ok(text) => FileContent::Text(text),
            Err(e) => FileContent::Unreadable(e),
        };

        Self {
            absolute_path,
            label,
            content,
        }
    }

    /// Returns true if the content was read successfully.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self.content, FileContent::Text(_))
    }

    /// Returns the text content if the file was readable.
    #[must_use]
    pub fn content_str(&self) -> Option<&str> {
        match &self.content {
            FileContent::Text(s) => Some(s),
            FileContent::Unreadable(_) => None,
        }
    }

    /// Returns the read failure, if any.
    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        match &self.content {
            FileContent::Text(_) => None,
            FileContent::Unreadable(e) => Some(e),
        }
    }
}

/// Reads a whole file as UTF-8, reporting failures against `shown_as`.
///
/// # Errors
///
/// Returns [`Error::InvalidUtf8`] for undecodable content and [`Error::Io`]
/// for everything else.
pub(crate) fn read_text(path: &Path, shown_as: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::read(shown_as, e))
}

/// Builds the `./relative/path` label for a file under `root`.
#[must_use]
pub(crate) fn display_label(path: &Path, root: &Path) -> String {
    let relative = pathdiff::diff_paths(path, root).unwrap_or_else(|| path.to_path_buf());
    Path::new(".").join(relative).display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn test_read_text_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("index.html");
        file.write_str("<h1>Hi</h1>").unwrap();

        let source = SourceFile::read(file.path().to_path_buf(), "./index.html".to_string());

        assert!(source.is_text());
        assert_eq!(source.content_str(), Some("<h1>Hi</h1>"));
        assert!(source.error().is_none());
    }

    #[test]
    fn test_read_preserves_content_verbatim() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("style.css");
        file.write_str("a {\r\n  color: red;\r\n}\n\n").unwrap();

        let source = SourceFile::read(file.path().to_path_buf(), "./style.css".to_string());

        assert_eq!(source.content_str(), Some("a {\r\n  color: red;\r\n}\n\n"));
    }

    #[test]
    fn test_read_invalid_utf8() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("broken.md");
        file.write_binary(&[0xff, 0xfe, 0x00, 0x41]).unwrap();

        let source = SourceFile::read(file.path().to_path_buf(), "./broken.md".to_string());

        assert!(!source.is_text());
        assert!(source.error().unwrap().is_invalid_utf8());
    }

    #[test]
    fn test_read_missing_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let path = temp.path().join("gone.js");

        let source = SourceFile::read(path, "./gone.js".to_string());

        let err = source.error().unwrap();
        assert!(err.is_io());
        assert!(err.to_string().contains("'./gone.js'"));
        assert!(!err.to_string().contains(&temp.path().display().to_string()));
    }

    #[test]
    fn test_display_label() {
        let root = Path::new("/srv/site");

        assert_eq!(
            display_label(Path::new("/srv/site/a/index.html"), root),
            Path::new(".").join("a").join("index.html").display().to_string()
        );
        assert_eq!(
            display_label(Path::new("/srv/site/b.md"), root),
            Path::new(".").join("b.md").display().to_string()
        );
    }
}
