// ============================================================
// Layer 5 — Summarization Services
// ============================================================
// The summarization backends, built once at startup from
// SummarizerConfig and handed to the Session by value.
// Nothing here is a global: a Session owns its summarizer.
//
//   summarizer.rs — TruncationSummarizer, ExtractiveSummarizer

pub mod summarizer;

use crate::domain::answer::SummaryMethod;
use crate::domain::errors::SummarizationError;
use crate::domain::traits::Summarizer;
use crate::infra::config_store::SummarizerConfig;

use summarizer::{ExtractiveSummarizer, TruncationSummarizer};

/// Construct the configured summarization backend.
pub fn build_summarizer(cfg: &SummarizerConfig) -> Result<Box<dyn Summarizer>, SummarizationError> {
    let summarizer: Box<dyn Summarizer> = match cfg.method {
        SummaryMethod::Truncate   => Box::new(TruncationSummarizer::new(cfg.max_chars)?),
        SummaryMethod::Extractive => Box::new(ExtractiveSummarizer::new(cfg.max_sentences, cfg.ratio)?),
    };
    tracing::debug!("Summarizer ready: {}", summarizer.method());
    Ok(summarizer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_summarizer_follows_config() {
        let mut cfg = SummarizerConfig::default();
        cfg.method = SummaryMethod::Truncate;
        assert_eq!(build_summarizer(&cfg).unwrap().method(), SummaryMethod::Truncate);

        cfg.method = SummaryMethod::Extractive;
        assert_eq!(build_summarizer(&cfg).unwrap().method(), SummaryMethod::Extractive);
    }

    #[test]
    fn test_build_summarizer_rejects_bad_config() {
        let cfg = SummarizerConfig { ratio: 2.0, ..SummarizerConfig::default() };
        assert!(matches!(build_summarizer(&cfg), Err(SummarizationError::InvalidConfig(_))));
    }
}
