// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The seams between the session and its collaborators.
//
//   DocumentExtractor — one per file format (PDF, DOCX,
//                       spreadsheet, plain text); picked by
//                       DocumentKind classification
//   Summarizer        — a summarization backend, built once
//                       and handed to the Session
//   QuestionAnswerer  — anything that turns a question into
//                       an answer string
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §17 (Trait Objects)

use anyhow::Result;

use crate::domain::answer::{Summary, SummaryMethod};
use crate::domain::document::DocumentKind;
use crate::domain::errors::{ExtractionError, SummarizationError};

// ─── DocumentExtractor ────────────────────────────────────────────────────────
/// Turns the raw bytes of one file format into plain text.
///
/// Implementations:
///   - PdfExtractor         → pdf-extract
///   - DocxExtractor        → docx-rs
///   - SpreadsheetExtractor → zip + quick-xml over the XLSX parts
///   - PlainTextExtractor   → UTF-8 decode
///
/// Every implementation returns text in source order; the
/// loader normalizes it afterwards with the Preprocessor.
pub trait DocumentExtractor {
    /// The format this extractor reads
    fn kind(&self) -> DocumentKind;

    /// Extract all text content from the file bytes
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

// ─── Summarizer ───────────────────────────────────────────────────────────────
/// A summarization backend.
///
/// Failures come back as SummarizationError, never as an empty
/// string or the unchanged input.
pub trait Summarizer {
    fn method(&self) -> SummaryMethod;

    fn summarize(&self, text: &str) -> Result<Summary, SummarizationError>;
}

// ─── QuestionAnswerer ─────────────────────────────────────────────────────────
/// Any component that can answer natural language questions.
///
/// Implementations:
///   - Session → keyword overlap over the loaded document's chunks
pub trait QuestionAnswerer {
    /// Given a question string, return the best answer found,
    /// or the fallback sentence when nothing matches.
    fn answer(&self, question: &str) -> Result<String>;
}
