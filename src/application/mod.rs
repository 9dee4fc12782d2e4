// ============================================================
// Layer 2 — Application / Session Controller
// ============================================================
// Wires the data layer (extract, chunk, match) and the
// injected summarizer around a single loaded document.
//
// Rules for this layer:
//   - No parsing or scoring code here
//   - No printing here (that's Layer 1)
//   - Only workflow coordination

// The per-run session holding the current document
pub mod session;
