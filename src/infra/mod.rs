// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// File-system concerns shared by the CLI and the session:
//
//   config_store.rs — AppConfig JSON load/save
//
//   export.rs       — writes extracted text or a summary to a
//                     plain-text file ("download")
//
// Reference: Rust Book §9 (Error Handling with anyhow)

/// AppConfig / SummarizerConfig and their JSON store
pub mod config_store;

/// Plain-text download writer
pub mod export;
