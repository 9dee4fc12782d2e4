// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs, enums, traits and error types that
// define the core concepts of the assistant.
//
// Rules for this layer:
//   - NO file I/O
//   - NO format parsers (pdf-extract, docx-rs, zip)
//   - Only plain types, traits and errors
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// A loaded document and its format classification
pub mod document;

// Answers, summaries and the fallback sentence
pub mod answer;

// Typed errors for every layer below the CLI
pub mod errors;

// Core abstractions (traits) that other layers implement
pub mod traits;
