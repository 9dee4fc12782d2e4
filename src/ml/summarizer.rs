// ============================================================
// Layer 5 — Summarizers
// ============================================================
// Two summarization backends behind the Summarizer trait:
//
//   TruncationSummarizer — the opening of the document, cut
//                          after the last period inside the
//                          first `max_chars` characters
//
//   ExtractiveSummarizer — ranks sentences by the normalized
//                          frequency of their content words
//                          and keeps the best ones in their
//                          original order
//
// Extractive scoring, step by step:
//   1. Split into sentences ([^.!?]+[.!?]+, plus any trailing
//      fragment without a terminator)
//   2. Count words longer than 2 chars that are not stop words
//   3. Normalize counts to 0..=100 against the most frequent word
//   4. Sentence score = sum of its word scores / word count;
//      the first sentence gets a 1.5x boost
//   5. Keep clamp(n * ratio, 2, max_sentences) sentences
//
// Both return Err instead of an empty string or the input.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

use crate::domain::answer::{Summary, SummaryMethod};
use crate::domain::errors::SummarizationError;
use crate::domain::traits::Summarizer;

pub const DEFAULT_MAX_CHARS:     usize = 1000;
pub const DEFAULT_MAX_SENTENCES: usize = 5;
pub const DEFAULT_RATIO:         f64   = 0.3;

static SENTENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^.!?]+[.!?]+").expect("sentence pattern is a valid regex"));

static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w']+").expect("word pattern is a valid regex"));

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "and", "are", "as", "at", "be", "by", "for", "from",
        "has", "he", "in", "is", "it", "its", "of", "on", "that", "the",
        "to", "was", "will", "with", "this", "but", "they", "have",
        "had", "what", "when", "where", "who", "which", "why", "how",
    ]
    .into_iter()
    .collect()
});

fn require_text(text: &str) -> Result<&str, SummarizationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(SummarizationError::EmptyInput);
    }
    Ok(trimmed)
}

// ─── TruncationSummarizer ─────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncationSummarizer {
    max_chars: usize,
}

impl TruncationSummarizer {
    pub fn new(max_chars: usize) -> Result<Self, SummarizationError> {
        if max_chars == 0 {
            return Err(SummarizationError::InvalidConfig("max_chars must be at least 1".into()));
        }
        Ok(Self { max_chars })
    }
}

impl Default for TruncationSummarizer {
    fn default() -> Self {
        Self { max_chars: DEFAULT_MAX_CHARS }
    }
}

impl Summarizer for TruncationSummarizer {
    fn method(&self) -> SummaryMethod {
        SummaryMethod::Truncate
    }

    fn summarize(&self, text: &str) -> Result<Summary, SummarizationError> {
        let text = require_text(text)?;

        let window_end = text
            .char_indices()
            .nth(self.max_chars)
            .map(|(i, _)| i)
            .unwrap_or(text.len());
        let window = &text[..window_end];

        let cut = if window_end < text.len() {
            match window.rfind('.') {
                Some(p) => &window[..=p],
                None    => window,
            }
        } else {
            window
        };

        Ok(Summary::new(cut.trim(), self.method()))
    }
}

// ─── ExtractiveSummarizer ─────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractiveSummarizer {
    max_sentences: usize,
    ratio:         f64,
}

impl ExtractiveSummarizer {
    pub fn new(max_sentences: usize, ratio: f64) -> Result<Self, SummarizationError> {
        if max_sentences == 0 {
            return Err(SummarizationError::InvalidConfig("max_sentences must be at least 1".into()));
        }
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(SummarizationError::InvalidConfig(format!(
                "ratio must be in (0, 1], got {ratio}"
            )));
        }
        Ok(Self { max_sentences, ratio })
    }

    /// How many sentences to keep out of `n`
    fn target_len(&self, n: usize) -> usize {
        let wanted = (n as f64 * self.ratio) as usize;
        wanted.max(2).min(self.max_sentences).min(n)
    }
}

impl Default for ExtractiveSummarizer {
    fn default() -> Self {
        Self { max_sentences: DEFAULT_MAX_SENTENCES, ratio: DEFAULT_RATIO }
    }
}

/// Sentences in order, including a trailing unterminated fragment
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut last_end  = 0;

    for m in SENTENCE_PATTERN.find_iter(text) {
        let s = m.as_str().trim();
        if !s.is_empty() {
            sentences.push(s);
        }
        last_end = m.end();
    }

    let tail = text[last_end..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}

fn content_words(sentence: &str) -> impl Iterator<Item = String> + '_ {
    WORD_PATTERN
        .find_iter(sentence)
        .map(|w| w.as_str().to_lowercase())
}

impl Summarizer for ExtractiveSummarizer {
    fn method(&self) -> SummaryMethod {
        SummaryMethod::Extractive
    }

    fn summarize(&self, text: &str) -> Result<Summary, SummarizationError> {
        let text      = require_text(text)?;
        let sentences = split_sentences(text);

        if sentences.len() <= 3 {
            return Ok(Summary::new(text, self.method()));
        }

        let mut freq: HashMap<String, usize> = HashMap::new();
        for sentence in &sentences {
            for word in content_words(sentence) {
                if word.chars().count() > 2 && !STOP_WORDS.contains(word.as_str()) {
                    *freq.entry(word).or_insert(0) += 1;
                }
            }
        }

        let max_freq = freq.values().copied().max().unwrap_or(1);
        for count in freq.values_mut() {
            *count = *count * 100 / max_freq;
        }

        let mut scored: Vec<(usize, f64)> = sentences
            .iter()
            .enumerate()
            .map(|(idx, sentence)| {
                let words: Vec<String> = content_words(sentence).collect();
                let total: usize = words.iter().filter_map(|w| freq.get(w)).sum();
                let mut score = if words.is_empty() { 0.0 } else { total as f64 / words.len() as f64 };
                if idx == 0 {
                    score *= 1.5;
                }
                (idx, score)
            })
            .collect();

        // Highest score first; earlier sentence wins a tie
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

        let mut keep: Vec<usize> = scored
            .iter()
            .take(self.target_len(sentences.len()))
            .map(|&(idx, _)| idx)
            .collect();
        keep.sort_unstable();

        let summary = keep.iter().map(|&i| sentences[i]).collect::<Vec<_>>().join(" ");
        tracing::debug!("Extractive summary kept {} of {} sentences", keep.len(), sentences.len());

        Ok(Summary::new(summary, self.method()))
    }
}
