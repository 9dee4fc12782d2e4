// ============================================================
// Layer 2 — Session Controller
// ============================================================
// Holds the one document the user is working with and runs
// the three workflows on it:
//
//   ask(question) → best chunk, or the fallback sentence
//   summary()     → computed once per document, then cached
//   chunks()      → the chunk list the matcher searches
//
// Loading a new document throws away the previous document,
// its chunks and its cached summary. Nothing outlives the
// process.
//
// The summarizer is built by the caller and injected here.

use anyhow::Result;
use std::path::Path;

use crate::data::{chunker::Chunker, loader, matcher};
use crate::domain::answer::{Answer, Summary};
use crate::domain::document::Document;
use crate::domain::errors::{ChunkError, SessionError};
use crate::domain::traits::{QuestionAnswerer, Summarizer};
use crate::infra::config_store::AppConfig;

/// A document and everything derived from it
struct Loaded {
    document: Document,
    chunks:   Vec<String>,
    summary:  Option<Summary>,
}

pub struct Session {
    chunker:    Chunker,
    summarizer: Box<dyn Summarizer>,
    loaded:     Option<Loaded>,
}

impl Session {
    /// Create an empty session.
    ///
    /// # Errors
    /// `ChunkError::InvalidArgument` if `config.max_len` is zero.
    pub fn new(config: &AppConfig, summarizer: Box<dyn Summarizer>) -> Result<Self, ChunkError> {
        Ok(Self {
            chunker: Chunker::new(config.max_len)?,
            summarizer,
            loaded: None,
        })
    }

    /// Replace the current document and re-chunk it.
    pub fn load_document(&mut self, document: Document) {
        let chunks = self.chunker.chunk(&document.text);
        tracing::info!(
            "Document '{}' split into {} chunks (max_len={})",
            document.source,
            chunks.len(),
            self.chunker.max_len()
        );

        self.loaded = Some(Loaded { document, chunks, summary: None });
    }

    /// Load pasted text verbatim.
    pub fn load_text(&mut self, source: impl Into<String>, text: impl Into<String>) {
        self.load_document(Document::from_text(source, text));
    }

    /// Extract a file from disk and load it.
    pub fn load_path(&mut self, path: &Path) -> Result<(), SessionError> {
        let document = loader::load_document(path)?;
        self.load_document(document);
        Ok(())
    }

    pub fn document(&self) -> Option<&Document> {
        self.loaded.as_ref().map(|l| &l.document)
    }

    /// The current chunk list; empty when nothing is loaded
    pub fn chunks(&self) -> &[String] {
        self.loaded.as_ref().map(|l| l.chunks.as_slice()).unwrap_or(&[])
    }

    fn require_document(&self) -> Result<&Loaded, SessionError> {
        match &self.loaded {
            Some(l) if !l.document.is_blank() => Ok(l),
            _ => Err(SessionError::NoDocument),
        }
    }

    /// Answer a question against the loaded document.
    pub fn ask(&self, question: &str) -> Result<Answer, SessionError> {
        let loaded = self.require_document()?;
        if question.trim().is_empty() {
            return Err(SessionError::EmptyQuestion);
        }

        let answer = matcher::best_match(question, &loaded.chunks);
        match &answer {
            Answer::Found { chunk_index, score, .. } => {
                tracing::debug!("Chunk {} matched with score {}", chunk_index, score)
            }
            Answer::NotFound => tracing::debug!("No chunk overlaps the question"),
        }
        Ok(answer)
    }

    /// Up to `top_k` ranked `(chunk, score)` pairs for a question.
    pub fn ranked(&self, question: &str, top_k: usize) -> Result<Vec<(&str, usize)>, SessionError> {
        let loaded = self.require_document()?;
        if question.trim().is_empty() {
            return Err(SessionError::EmptyQuestion);
        }

        Ok(matcher::rank_chunks(question, &loaded.chunks, top_k)
            .into_iter()
            .map(|(i, score)| (loaded.chunks[i].as_str(), score))
            .collect())
    }

    /// The summary of the loaded document, computed on first use.
    pub fn summary(&mut self) -> Result<&Summary, SessionError> {
        self.require_document()?;
        let loaded = self.loaded.as_mut().ok_or(SessionError::NoDocument)?;

        let summary = match loaded.summary.take() {
            Some(s) => s,
            None => {
                let s = self.summarizer.summarize(&loaded.document.text)?;
                tracing::info!("Summarized '{}' with {}", loaded.document.source, s.method);
                s
            }
        };

        Ok(loaded.summary.insert(summary))
    }
}

impl QuestionAnswerer for Session {
    fn answer(&self, question: &str) -> Result<String> {
        Ok(self.ask(question)?.into_text())
    }
}
