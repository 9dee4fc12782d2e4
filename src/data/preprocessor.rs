// ============================================================
// Layer 4 — Text Preprocessor
// ============================================================
// Normalizes the text coming out of an extractor so every
// format hands the Chunker the same shape of text:
//
//   1. CRLF / CR line endings become '\n'
//   2. Tabs, NBSP, zero-width spaces, BOM and other control
//      characters become plain spaces
//   3. Runs of spaces inside a line collapse to one, and each
//      line is trimmed
//   4. At most `max_blank_lines` empty lines survive between
//      paragraphs
//   5. The whole text is trimmed
//
// Periods and words are never touched, so chunk boundaries
// and match tokens are the same before and after cleaning.
//
// Pasted plain text skips this step; see data::loader.

/// Text normalizer applied to extracted document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preprocessor {
    max_blank_lines: usize,
}

impl Preprocessor {
    /// A preprocessor that keeps at most one blank line between paragraphs
    pub fn new() -> Self {
        Self::with_max_blank_lines(1)
    }

    /// A preprocessor that keeps at most `max_blank_lines` blank lines in a row
    pub fn with_max_blank_lines(max_blank_lines: usize) -> Self {
        Self { max_blank_lines }
    }

    /// Clean extracted text. Returns an owned, trimmed String.
    pub fn clean(&self, text: &str) -> String {
        let unified = text.replace("\r\n", "\n");

        let mut out   = String::with_capacity(unified.len());
        let mut blank = 0usize;

        for line in unified.split(['\n', '\r']) {
            let line = squeeze_spaces(line);

            if line.is_empty() {
                blank += 1;
                if blank > self.max_blank_lines {
                    continue;
                }
            } else {
                blank = 0;
            }

            out.push_str(&line);
            out.push('\n');
        }

        out.trim().to_string()
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Map invisible and spacing characters to ' '
fn normalize_char(c: char) -> char {
    match c {
        '\t' | '\u{00A0}' | '\u{200B}' | '\u{FEFF}' => ' ',
        c if c.is_control()                         => ' ',
        c                                           => c,
    }
}

/// Normalize, collapse repeated spaces and trim one line
fn squeeze_spaces(line: &str) -> String {
    let mut out        = String::with_capacity(line.len());
    let mut last_space = true;

    for c in line.chars().map(normalize_char) {
        if c == ' ' {
            if !last_space {
                out.push(' ');
            }
            last_space = true;
        } else {
            out.push(c);
            last_space = false;
        }
    }

    if out.ends_with(' ') {
        out.pop();
    }
    out
}
