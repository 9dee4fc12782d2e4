// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the subcommands and their flags:
//
//   ask        — answer one question
//   chunks     — show how a document is split
//   summarize  — print or save a summary
//   extract    — save the extracted plain text
//   chat       — interactive question loop on stdin
//   init-config — write the effective config as JSON
//
// clap's derive macros generate --help, error messages for
// missing args and string → number conversion.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::domain::answer::SummaryMethod;
use crate::infra::config_store::AppConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer a question from a document
    Ask(AskArgs),

    /// Print the chunks a document is split into
    Chunks(ChunksArgs),

    /// Summarize a document
    Summarize(SummarizeArgs),

    /// Write the extracted text of a document to a file
    Extract(ExtractArgs),

    /// Ask questions interactively, one per line on stdin
    Chat(ChatArgs),

    /// Write the effective configuration to a JSON file
    InitConfig(InitConfigArgs),
}

/// Where the document text comes from.
/// With neither flag, `ask`, `chunks` and `summarize` read stdin.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Document to load (.pdf, .docx, .xlsx, .txt)
    #[arg(long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Use this text as the document, verbatim
    #[arg(long)]
    pub text: Option<String>,

    /// Maximum chunk length in characters
    #[arg(long)]
    pub max_len: Option<usize>,
}

impl SourceArgs {
    /// Apply flag overrides on top of the loaded config
    pub fn apply(&self, cfg: &mut AppConfig) {
        if let Some(max_len) = self.max_len {
            cfg.max_len = max_len;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.file.is_none() && self.text.is_none()
    }
}

#[derive(Args, Debug)]
pub struct AskArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// The question to answer
    #[arg(long, short)]
    pub question: String,

    /// Also list up to this many matching passages with their scores
    #[arg(long)]
    pub top: Option<usize>,
}

#[derive(Args, Debug)]
pub struct ChunksArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Args, Debug)]
pub struct SummarizeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Summarization method: truncate or extractive
    #[arg(long)]
    pub method: Option<SummaryMethod>,

    /// Character window for the truncate method
    #[arg(long)]
    pub max_chars: Option<usize>,

    /// Write the summary here instead of printing it
    #[arg(long)]
    pub out: Option<PathBuf>,
}

impl SummarizeArgs {
    pub fn apply(&self, cfg: &mut AppConfig) {
        self.source.apply(cfg);
        if let Some(method) = self.method {
            cfg.summarizer.method = method;
        }
        if let Some(max_chars) = self.max_chars {
            cfg.summarizer.max_chars = max_chars;
        }
    }
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Document to extract
    #[arg(long)]
    pub file: PathBuf,

    /// Destination for the plain text
    #[arg(long)]
    pub out: PathBuf,
}

#[derive(Args, Debug)]
pub struct ChatArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Args, Debug)]
pub struct InitConfigArgs {
    /// Where to write the config file
    #[arg(long)]
    pub out: PathBuf,

    /// Maximum chunk length in characters
    #[arg(long)]
    pub max_len: Option<usize>,

    /// Summarization method: truncate or extractive
    #[arg(long)]
    pub method: Option<SummaryMethod>,
}

impl InitConfigArgs {
    pub fn apply(&self, cfg: &mut AppConfig) {
        if let Some(max_len) = self.max_len {
            cfg.max_len = max_len;
        }
        if let Some(method) = self.method {
            cfg.summarizer.method = method;
        }
    }
}
