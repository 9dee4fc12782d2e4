// ============================================================
// Layer 3 — Domain Errors
// ============================================================
// Typed failures raised by the core and its adapters.
// The application and CLI layers wrap these in anyhow with
// context; the data and summarization layers return them
// directly so callers can match on the variant.
//
// The fallback answer is NOT an error — see domain::answer.

use thiserror::Error;

/// Raised by the Chunker before any iteration begins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChunkError {
    #[error("invalid argument: max_len must be at least 1 (got {0})")]
    InvalidArgument(usize),
}

/// Raised while turning an uploaded file into document text.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("spreadsheet extraction failed: {0}")]
    Spreadsheet(String),

    #[error("document is not valid UTF-8 text: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("no text could be extracted from '{0}'")]
    NoText(String),

    #[error("cannot read '{path}': {source}")]
    Io {
        path:   String,
        #[source]
        source: std::io::Error,
    },
}

/// Raised by a Summarizer. Never swallowed: the caller decides
/// whether to show the error or fall back to something else.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SummarizationError {
    #[error("nothing to summarize: the document text is empty")]
    EmptyInput,

    #[error("invalid summarizer configuration: {0}")]
    InvalidConfig(String),
}

/// Raised by the Session Controller for UI-level validation
/// and for failures of the components it drives.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Please provide document text first.")]
    NoDocument,

    #[error("Please enter a question.")]
    EmptyQuestion,

    #[error(transparent)]
    Chunk(#[from] ChunkError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Summarization(#[from] SummarizationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_warnings_match_ui_text() {
        assert_eq!(SessionError::NoDocument.to_string(), "Please provide document text first.");
        assert_eq!(SessionError::EmptyQuestion.to_string(), "Please enter a question.");
    }

    #[test]
    fn test_chunk_error_is_transparent_in_session_error() {
        let e: SessionError = ChunkError::InvalidArgument(0).into();
        assert!(e.to_string().contains("max_len"));
    }
}
