// ============================================================
// Layer 3 — Answer and Summary Domain Types
// ============================================================
// What the assistant hands back to the user.
//
// An Answer is either a chunk of the document, taken verbatim,
// or the fixed fallback sentence. Callers that only see the
// rendered string tell the two apart by comparing against
// FALLBACK_ANSWER.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Returned when no chunk shares a single word with the question.
pub const FALLBACK_ANSWER: &str = "Sorry, I couldn't find the answer in the document.";

/// The outcome of matching a question against the chunk list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Answer {
    /// The best chunk and its overlap score (always > 0)
    Found {
        chunk_index: usize,
        score:       usize,
        text:        String,
    },

    /// Nothing overlapped
    NotFound,
}

impl Answer {
    /// The text shown to the user
    pub fn text(&self) -> &str {
        match self {
            Answer::Found { text, .. } => text,
            Answer::NotFound           => FALLBACK_ANSWER,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Answer::Found { .. })
    }

    pub fn into_text(self) -> String {
        match self {
            Answer::Found { text, .. } => text,
            Answer::NotFound           => FALLBACK_ANSWER.to_string(),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Which summarization backend produced a Summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMethod {
    /// Leading text of the document, cut on a sentence end
    Truncate,
    /// Highest-scoring sentences by word frequency
    Extractive,
}

impl FromStr for SummaryMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "truncate" | "truncation" => Ok(Self::Truncate),
            "extractive"              => Ok(Self::Extractive),
            other => Err(format!("unknown summary method '{other}' (expected truncate or extractive)")),
        }
    }
}

impl fmt::Display for SummaryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncate   => f.write_str("truncate"),
            Self::Extractive => f.write_str("extractive"),
        }
    }
}

/// A generated summary and the method that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub text:   String,
    pub method: SummaryMethod,
}

impl Summary {
    pub fn new(text: impl Into<String>, method: SummaryMethod) -> Self {
        Self { text: text.into(), method }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_renders_fallback() {
        assert_eq!(Answer::NotFound.text(), FALLBACK_ANSWER);
        assert_eq!(Answer::NotFound.to_string(), FALLBACK_ANSWER);
        assert!(!Answer::NotFound.is_found());
    }

    #[test]
    fn test_found_renders_chunk_verbatim() {
        let a = Answer::Found { chunk_index: 2, score: 1, text: "a cat sat".into() };
        assert!(a.is_found());
        assert_eq!(a.into_text(), "a cat sat");
    }

    #[test]
    fn test_summary_method_parsing() {
        assert_eq!("Extractive".parse::<SummaryMethod>().unwrap(), SummaryMethod::Extractive);
        assert_eq!("truncate".parse::<SummaryMethod>().unwrap(), SummaryMethod::Truncate);
        assert!("bart".parse::<SummaryMethod>().is_err());
    }
}
