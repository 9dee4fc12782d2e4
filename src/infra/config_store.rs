// ============================================================
// Layer 6 — Config Store
// ============================================================
// Loads and saves the assistant configuration as JSON.
//
// Example file:
//   {
//     "max_len": 500,
//     "summarizer": {
//       "method": "extractive",
//       "max_chars": 1000,
//       "max_sentences": 5,
//       "ratio": 0.3
//     }
//   }
//
// Every field is optional; missing fields take their
// defaults. CLI flags override whatever the file says.
//
// Reference: serde / serde_json documentation
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::data::chunker::DEFAULT_MAX_LEN;
use crate::domain::answer::SummaryMethod;
use crate::ml::summarizer::{DEFAULT_MAX_CHARS, DEFAULT_MAX_SENTENCES, DEFAULT_RATIO};

/// Settings for the summarization backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    pub method:        SummaryMethod,
    /// Window for the truncation summarizer, in characters
    pub max_chars:     usize,
    /// Upper bound on sentences kept by the extractive summarizer
    pub max_sentences: usize,
    /// Share of sentences the extractive summarizer aims to keep
    pub ratio:         f64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            method:        SummaryMethod::Extractive,
            max_chars:     DEFAULT_MAX_CHARS,
            max_sentences: DEFAULT_MAX_SENTENCES,
            ratio:         DEFAULT_RATIO,
        }
    }
}

/// Top-level configuration for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Chunk window size in characters
    pub max_len:    usize,
    pub summarizer: SummarizerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_len:    DEFAULT_MAX_LEN,
            summarizer: SummarizerConfig::default(),
        }
    }
}

/// Reads and writes AppConfig JSON files.
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the configuration file.
    pub fn load(&self) -> Result<AppConfig> {
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read config from '{}'", self.path.display()))?;

        let cfg = serde_json::from_str(&json)
            .with_context(|| format!("Invalid config JSON in '{}'", self.path.display()))?;

        tracing::debug!("Loaded config from '{}'", self.path.display());
        Ok(cfg)
    }

    /// Save the configuration as pretty-printed JSON,
    /// creating parent directories as needed.
    pub fn save(&self, cfg: &AppConfig) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create '{}'", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Cannot write config to '{}'", self.path.display()))?;

        tracing::debug!("Saved config to '{}'", self.path.display());
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load() {
        let dir   = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("nested").join("config.json"));

        let cfg = AppConfig {
            max_len:    1200,
            summarizer: SummarizerConfig { method: SummaryMethod::Truncate, ..Default::default() },
        };
        store.save(&cfg).unwrap();
        assert_eq!(store.load().unwrap(), cfg);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "max_len": 1000, "summarizer": { "method": "truncate" } }"#).unwrap();

        let cfg = ConfigStore::new(&path).load().unwrap();
        assert_eq!(cfg.max_len, 1000);
        assert_eq!(cfg.summarizer.method, SummaryMethod::Truncate);
        assert_eq!(cfg.summarizer.max_chars, DEFAULT_MAX_CHARS);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = ConfigStore::new("/no/such/config.json").load().unwrap_err();
        assert!(err.to_string().contains("Cannot read config"));
    }

    #[test]
    fn test_bad_json_is_an_error() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(ConfigStore::new(&path).load().is_err());
    }
}
