// ============================================================
// Layer 4 — Text Chunker
// ============================================================
// Splits a document into bounded, sentence-aligned chunks.
//
// Each window is at most `max_len` characters. Inside the
// window we look for the LAST '.' and cut right after it, so
// a chunk ends on a sentence boundary whenever one exists.
// With no period in the window, the chunk is cut mid-sentence
// at the window edge.
//
// Example with max_len = 6:
//   Text:     "AAA. BBB. CCC"
//   Window 1: "AAA. B"  → last '.' at 3 → chunk "AAA."
//   Window 2: " BBB. "  → last '.' at 4 → chunk "BBB."
//   Window 3: " CCC"    → no '.'        → chunk "CCC"
//
// The window is clamped to the end of the text before the
// period search. Lengths count chars, not bytes, so multi-byte
// text never gets sliced inside a code point.
//
// Reference: Rust Book §8 (Strings — bytes vs chars)

use crate::domain::errors::ChunkError;

/// Default window size in characters
pub const DEFAULT_MAX_LEN: usize = 500;

/// Whitespace, plus the file/group/record/unit separators
/// U+001C..U+001F that `char::is_whitespace` does not cover.
pub fn is_trim_char(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Split `text` into trimmed, non-empty chunks of at most
/// `max_len` characters, cutting after the last period in
/// each window.
///
/// Returns `ChunkError::InvalidArgument` for `max_len == 0`
/// before looking at the text.
pub fn split_into_chunks(text: &str, max_len: usize) -> Result<Vec<String>, ChunkError> {
    if max_len == 0 {
        return Err(ChunkError::InvalidArgument(max_len));
    }

    let mut chunks = Vec::new();
    // Byte offset of the cursor; always on a char boundary
    let mut start = 0usize;

    while start < text.len() {
        // Tentative end: max_len chars ahead, clamped to the text end
        let rest       = &text[start..];
        let window_len = rest
            .char_indices()
            .nth(max_len)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let mut end = start + window_len;

        // '.' is one byte, so p + 1 stays on a char boundary
        if let Some(p) = text[start..end].rfind('.') {
            end = start + p + 1;
        }

        if end <= start {
            break;
        }

        let chunk = text[start..end].trim_matches(is_trim_char);
        if !chunk.is_empty() {
            chunks.push(chunk.to_string());
        }

        start = end;
    }

    Ok(chunks)
}

/// A chunker with a validated window size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunker {
    max_len: usize,
}

impl Chunker {
    /// Create a new Chunker.
    ///
    /// # Errors
    /// `ChunkError::InvalidArgument` if `max_len` is zero.
    pub fn new(max_len: usize) -> Result<Self, ChunkError> {
        if max_len == 0 {
            return Err(ChunkError::InvalidArgument(max_len));
        }
        Ok(Self { max_len })
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Split text into sentence-aligned chunks.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        // max_len was validated in new()
        split_into_chunks(text, self.max_len).unwrap_or_default()
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self { max_len: DEFAULT_MAX_LEN }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn non_ws(s: &str) -> String {
        s.chars().filter(|c| !c.is_whitespace()).collect()
    }

    #[test]
    fn test_cuts_after_last_period_in_window() {
        let chunks = split_into_chunks("AAA. BBB. CCC", 6).unwrap();
        assert_eq!(chunks[0], "AAA.");
        assert_eq!(chunks, vec!["AAA.", "BBB.", "CCC"]);
    }

    #[test]
    fn test_uses_last_period_not_first() {
        let chunks = split_into_chunks("A. B. C. DDDDDDDDDD", 8).unwrap();
        assert_eq!(chunks[0], "A. B. C.");
    }

    #[test]
    fn test_no_period_cuts_at_window_edge() {
        let chunks = split_into_chunks("abcdefghij", 4).unwrap();
        assert_eq!(chunks, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_empty_text_gives_no_chunks() {
        assert!(split_into_chunks("", 500).unwrap().is_empty());
    }

    #[test]
    fn test_whitespace_only_text_gives_no_chunks() {
        assert!(split_into_chunks("   \n\t  ", 3).unwrap().is_empty());
    }

    #[test]
    fn test_short_text_gives_one_trimmed_chunk() {
        let chunks = split_into_chunks("  just a few words  ", 500).unwrap();
        assert_eq!(chunks, vec!["just a few words"]);
    }

    #[test]
    fn test_zero_max_len_is_invalid() {
        assert_eq!(split_into_chunks("text", 0), Err(ChunkError::InvalidArgument(0)));
        assert_eq!(split_into_chunks("", 0), Err(ChunkError::InvalidArgument(0)));
        assert!(Chunker::new(0).is_err());
    }

    #[test]
    fn test_skips_whitespace_only_chunks() {
        // Second window is "   ." → "." ; third is all spaces
        let chunks = split_into_chunks("ab.   .      ", 4).unwrap();
        assert_eq!(chunks, vec!["ab.", "."]);
    }

    #[test]
    fn test_trims_separator_controls() {
        assert_eq!(split_into_chunks("ab\x1f", 10).unwrap(), vec!["ab"]);
        assert_eq!(split_into_chunks("\x1c a. \x1e", 6).unwrap(), vec!["a."]);
        assert!(split_into_chunks("\x1d\x1f", 5).unwrap().is_empty());
    }

    #[test]
    fn test_lengths_count_chars_not_bytes() {
        let text   = "ééééé. ççç";
        let chunks = split_into_chunks(text, 6).unwrap();
        assert_eq!(chunks, vec!["ééééé.", "ççç"]);
    }

    #[test]
    fn test_chunker_default_window() {
        assert_eq!(Chunker::default().max_len(), DEFAULT_MAX_LEN);
        let c = Chunker::new(6).unwrap();
        assert_eq!(c.chunk("AAA. BBB. CCC"), vec!["AAA.", "BBB.", "CCC"]);
    }

    proptest! {
        #[test]
        fn prop_chunks_cover_non_whitespace(text in "[a-z .\n]{0,300}", max_len in 1usize..60) {
            let chunks = split_into_chunks(&text, max_len).unwrap();
            prop_assert_eq!(non_ws(&chunks.concat()), non_ws(&text));
        }

        #[test]
        fn prop_chunks_are_bounded(text in "\\PC{0,200}", max_len in 1usize..40) {
            let chunks = split_into_chunks(&text, max_len).unwrap();
            for c in &chunks {
                prop_assert!(c.chars().count() <= max_len);
                prop_assert!(!c.is_empty());
                prop_assert_eq!(c.trim(), c.as_str());
            }
        }

        #[test]
        fn prop_unicode_coverage(text in "\\PC{0,200}", max_len in 1usize..40) {
            let chunks = split_into_chunks(&text, max_len).unwrap();
            prop_assert_eq!(non_ws(&chunks.concat()), non_ws(&text));
        }
    }
}
