// ============================================================
// Layer 3 — Document Domain Type
// ============================================================
// A single uploaded document after text extraction:
// where it came from, what format it was, and the plain
// text that the Chunker and Summarizer work on.
//
// DocumentKind is the classification step at the boundary.
// It decides which extractor handles the raw bytes, either
// from the MIME type reported by an upload or from the file
// extension on disk.

use serde::{Deserialize, Serialize};
use std::{fmt, path::Path};

use crate::domain::errors::ExtractionError;

pub const MIME_PDF:  &str = "application/pdf";
pub const MIME_DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const MIME_TEXT: &str = "text/plain";

/// The document formats the assistant can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Docx,
    Spreadsheet,
    Text,
}

impl DocumentKind {
    /// Classify an upload by MIME type.
    /// Parameters such as `; charset=utf-8` are ignored.
    pub fn from_mime(mime: &str) -> Result<Self, ExtractionError> {
        let essence = mime.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        match essence.as_str() {
            MIME_PDF  => Ok(Self::Pdf),
            MIME_DOCX => Ok(Self::Docx),
            MIME_XLSX => Ok(Self::Spreadsheet),
            MIME_TEXT => Ok(Self::Text),
            _         => Err(ExtractionError::UnsupportedFormat(mime.to_string())),
        }
    }

    /// Classify a file on disk by its extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, ExtractionError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "pdf"        => Ok(Self::Pdf),
            "docx"       => Ok(Self::Docx),
            "xlsx"       => Ok(Self::Spreadsheet),
            "txt" | "md" => Ok(Self::Text),
            _ => Err(ExtractionError::UnsupportedFormat(format!(
                "'{}' (expected .pdf, .docx, .xlsx or .txt)",
                path.display()
            ))),
        }
    }

    /// The canonical MIME type for this kind
    pub fn mime(&self) -> &'static str {
        match self {
            Self::Pdf         => MIME_PDF,
            Self::Docx        => MIME_DOCX,
            Self::Spreadsheet => MIME_XLSX,
            Self::Text        => MIME_TEXT,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pdf         => "pdf",
            Self::Docx        => "docx",
            Self::Spreadsheet => "xlsx",
            Self::Text        => "text",
        };
        f.write_str(name)
    }
}

/// A loaded document. Immutable once built; a new upload
/// produces a new Document rather than mutating this one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// The filename (or "<stdin>", "<text>") — kept for log messages
    pub source: String,

    /// The format the text was extracted from
    pub kind: DocumentKind,

    /// The full extracted text, in source order
    pub text: String,
}

impl Document {
    pub fn new(source: impl Into<String>, kind: DocumentKind, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            kind,
            text:   text.into(),
        }
    }

    /// A document built from pasted text
    pub fn from_text(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(source, DocumentKind::Text, text)
    }

    /// True when there is nothing but whitespace to work with
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mime_known_types() {
        assert_eq!(DocumentKind::from_mime("application/pdf").unwrap(), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_mime(MIME_DOCX).unwrap(), DocumentKind::Docx);
        assert_eq!(DocumentKind::from_mime(MIME_XLSX).unwrap(), DocumentKind::Spreadsheet);
        assert_eq!(
            DocumentKind::from_mime("text/plain; charset=utf-8").unwrap(),
            DocumentKind::Text
        );
    }

    #[test]
    fn test_from_mime_unknown_is_unsupported() {
        let err = DocumentKind::from_mime("image/png").unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_from_path_is_case_insensitive() {
        assert_eq!(DocumentKind::from_path(Path::new("a/Report.PDF")).unwrap(), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_path(Path::new("sheet.xlsx")).unwrap(), DocumentKind::Spreadsheet);
        assert_eq!(DocumentKind::from_path(Path::new("notes.md")).unwrap(), DocumentKind::Text);
        assert!(DocumentKind::from_path(Path::new("no_extension")).is_err());
    }

    #[test]
    fn test_mime_round_trip() {
        for kind in [DocumentKind::Pdf, DocumentKind::Docx, DocumentKind::Spreadsheet, DocumentKind::Text] {
            assert_eq!(DocumentKind::from_mime(kind.mime()).unwrap(), kind);
        }
    }

    #[test]
    fn test_blank_document() {
        assert!(Document::from_text("<text>", "  \n\t ").is_blank());
        assert!(!Document::from_text("<text>", "x").is_blank());
    }
}
