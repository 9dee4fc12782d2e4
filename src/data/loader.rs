// ============================================================
// Layer 4 — Document Loader
// ============================================================
// Turns an uploaded file into a Document.
//
//   path / MIME type
//       │
//       ▼
//   DocumentKind::from_path / from_mime   → classification
//       │
//       ▼
//   extractor_for(kind).extract(bytes)    → raw text
//       │
//       ▼
//   Preprocessor::clean                   → normalized text
//
// The .docx walk follows the docx-rs tree:
//   Document → Paragraph → Run → Text
// Run texts are concatenated inside a paragraph; non-empty
// paragraphs are joined with newlines.
//
// Reference: docx-rs and pdf-extract crate documentation
//            Rust Book §9 (Error Handling)

use std::{fs, path::Path};

use crate::data::preprocessor::Preprocessor;
use crate::data::spreadsheet::SpreadsheetExtractor;
use crate::domain::document::{Document, DocumentKind};
use crate::domain::errors::ExtractionError;
use crate::domain::traits::DocumentExtractor;

// ─── PDF ──────────────────────────────────────────────────────────────────────
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

impl DocumentExtractor for PdfExtractor {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Pdf
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))
    }
}

// ─── DOCX ─────────────────────────────────────────────────────────────────────
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxExtractor;

impl DocumentExtractor for DocxExtractor {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Docx
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        use docx_rs::DocumentChild;

        let docx = docx_rs::read_docx(bytes)
            .map_err(|e| ExtractionError::Docx(format!("{e:?}")))?;

        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
                _ => None,
            })
            .filter(|text| !text.trim().is_empty())
            .collect();

        Ok(paragraphs.join("\n"))
    }
}

/// Concatenate the Text leaves of every Run in a paragraph
fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    use docx_rs::{ParagraphChild, RunChild};

    let mut out = String::new();
    for child in &para.children {
        if let ParagraphChild::Run(run) = child {
            for rc in &run.children {
                if let RunChild::Text(t) = rc {
                    out.push_str(&t.text);
                }
            }
        }
    }
    out
}

// ─── Plain text ───────────────────────────────────────────────────────────────
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

impl DocumentExtractor for PlainTextExtractor {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Text
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        Ok(String::from_utf8(bytes.to_vec())?)
    }
}

/// The extractor for a classified document kind
pub fn extractor_for(kind: DocumentKind) -> Box<dyn DocumentExtractor> {
    match kind {
        DocumentKind::Pdf         => Box::new(PdfExtractor),
        DocumentKind::Docx        => Box::new(DocxExtractor),
        DocumentKind::Spreadsheet => Box::new(SpreadsheetExtractor::new()),
        DocumentKind::Text        => Box::new(PlainTextExtractor),
    }
}

/// Extract and normalize the bytes of an already-classified upload.
pub fn load_bytes(
    source: impl Into<String>,
    kind:   DocumentKind,
    bytes:  &[u8],
) -> Result<Document, ExtractionError> {
    let source = source.into();
    let raw    = extractor_for(kind).extract(bytes)?;
    let text   = Preprocessor::new().clean(&raw);

    if text.is_empty() {
        return Err(ExtractionError::NoText(source));
    }

    tracing::debug!("Extracted {} chars from '{}' ({})", text.chars().count(), source, kind);
    Ok(Document::new(source, kind, text))
}

/// Load an upload classified by its MIME type.
pub fn load_upload(
    source: impl Into<String>,
    mime:   &str,
    bytes:  &[u8],
) -> Result<Document, ExtractionError> {
    let kind = DocumentKind::from_mime(mime)?;
    load_bytes(source, kind, bytes)
}

/// Load a document from disk, classified by file extension.
pub fn load_document(path: &Path) -> Result<Document, ExtractionError> {
    let kind = DocumentKind::from_path(path)?;

    let bytes = fs::read(path).map_err(|source| ExtractionError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string();

    let doc = load_bytes(name, kind, &bytes)?;
    tracing::info!("Loaded '{}' ({}, {} chars)", doc.source, doc.kind, doc.text.len());
    Ok(doc)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::MIME_DOCX;
    use std::io::Write;

    #[test]
    fn test_extractor_for_matches_kind() {
        for kind in [DocumentKind::Pdf, DocumentKind::Docx, DocumentKind::Spreadsheet, DocumentKind::Text] {
            assert_eq!(extractor_for(kind).kind(), kind);
        }
    }

    #[test]
    fn test_plain_text_rejects_invalid_utf8() {
        let err = PlainTextExtractor.extract(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, ExtractionError::Encoding(_)));
    }

    #[test]
    fn test_load_upload_text_is_normalized() {
        let doc = load_upload("notes", "text/plain", b"  Hello \r\n\r\n\r\n  world.  ").unwrap();
        assert_eq!(doc.kind, DocumentKind::Text);
        assert_eq!(doc.text, "Hello\n\nworld.");
    }

    #[test]
    fn test_load_upload_unknown_mime() {
        let err = load_upload("pic", "image/png", b"\x89PNG").unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_blank_text_is_no_text() {
        let err = load_bytes("empty.txt", DocumentKind::Text, b" \n\t ").unwrap_err();
        assert!(matches!(err, ExtractionError::NoText(ref s) if s == "empty.txt"));
    }

    fn build_docx(paragraphs: Vec<docx_rs::Paragraph>) -> Vec<u8> {
        let mut docx = docx_rs::Docx::new();
        for p in paragraphs {
            docx = docx.add_paragraph(p);
        }
        let mut buf = std::io::Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_docx_joins_runs_and_skips_empty_paragraphs() {
        use docx_rs::{Paragraph, Run};

        let bytes = build_docx(vec![
            Paragraph::new()
                .add_run(Run::new().add_text("Ship"))
                .add_run(Run::new().add_text("ping takes three days.")),
            Paragraph::new(),
            Paragraph::new().add_run(Run::new().add_text("Returns are free.")),
        ]);

        let text = DocxExtractor.extract(&bytes).unwrap();
        assert_eq!(text, "Shipping takes three days.\nReturns are free.");
    }

    #[test]
    fn test_load_upload_docx() {
        use docx_rs::{Paragraph, Run};

        let bytes = build_docx(vec![Paragraph::new().add_run(Run::new().add_text("Opening hours: 9 to 5."))]);
        let doc   = load_upload("hours.docx", MIME_DOCX, &bytes).unwrap();
        assert_eq!(doc.kind, DocumentKind::Docx);
        assert_eq!(doc.text, "Opening hours: 9 to 5.");
    }

    #[test]
    fn test_garbage_pdf_and_docx_are_errors() {
        assert!(matches!(PdfExtractor.extract(b"not a pdf"), Err(ExtractionError::Pdf(_))));
        assert!(matches!(DocxExtractor.extract(b"not a docx"), Err(ExtractionError::Docx(_))));
    }

    #[test]
    fn test_load_document_from_disk() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("faq.txt");
        let mut f = fs::File::create(&path).unwrap();
        writeln!(f, "Shipping takes three days.").unwrap();

        let doc = load_document(&path).unwrap();
        assert_eq!(doc.source, "faq.txt");
        assert_eq!(doc.text, "Shipping takes three days.");
    }

    #[test]
    fn test_load_document_missing_file_is_io_error() {
        let err = load_document(Path::new("/definitely/not/here.pdf")).unwrap_err();
        assert!(matches!(err, ExtractionError::Io { .. }));
    }

    #[test]
    fn test_load_document_unsupported_extension() {
        let err = load_document(Path::new("slides.pptx")).unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat(_)));
    }
}
