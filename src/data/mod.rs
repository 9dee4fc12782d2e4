// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between an uploaded file and an answer:
//
//   .pdf / .docx / .xlsx / .txt
//       │
//       ▼
//   loader / spreadsheet  → classify and extract raw text
//       │
//       ▼
//   Preprocessor          → normalize whitespace and line endings
//       │
//       ▼
//   Chunker               → sentence-aligned chunks
//       │
//       ▼
//   Matcher               → best chunk for a question
//
// Chunker and Matcher are pure functions with no I/O.

/// Format classification and the PDF / DOCX / text extractors
pub mod loader;

/// XLSX extraction over zip + quick-xml
pub mod spreadsheet;

/// Cleans and normalises extracted text
pub mod preprocessor;

/// Splits text into bounded, sentence-aligned chunks
pub mod chunker;

/// Keyword-overlap answer finder
pub mod matcher;
