// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments,
// builds the config, the summarizer and the Session, then
// prints results. All document logic lives below Layer 2.
//
// Answers and summaries go to stdout; logs go to stderr.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;

use crate::application::session::Session;
use crate::data::loader;
use crate::domain::errors::SessionError;
use crate::infra::{config_store::{AppConfig, ConfigStore}, export::export_text};
use crate::ml::build_summarizer;
use commands::{
    AskArgs, ChatArgs, ChunksArgs, Commands, ExtractArgs, InitConfigArgs, SourceArgs, SummarizeArgs,
};

#[derive(Parser, Debug)]
#[command(
    name = "doc-qa",
    version,
    about = "Ask questions about a PDF, DOCX or XLSX document and get a quick summary."
)]
pub struct Cli {
    /// JSON config file; command flags override its values
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the chosen subcommand
    pub fn run(self) -> Result<()> {
        let base = self.base_config()?;

        match self.command {
            Commands::Ask(args)       => run_ask(base, args),
            Commands::Chunks(args)    => run_chunks(base, args),
            Commands::Summarize(args) => run_summarize(base, args),
            Commands::Extract(args)   => run_extract(args),
            Commands::Chat(args)      => run_chat(base, args),
            Commands::InitConfig(args) => run_init_config(base, args),
        }
    }

    fn base_config(&self) -> Result<AppConfig> {
        match &self.config {
            Some(path) => ConfigStore::new(path).load(),
            None       => Ok(AppConfig::default()),
        }
    }
}

/// Build a Session from config and load the requested document.
fn open_session(cfg: &AppConfig, source: &SourceArgs) -> Result<Session> {
    let summarizer = build_summarizer(&cfg.summarizer)?;
    let mut session = Session::new(cfg, summarizer)?;

    match (&source.file, &source.text) {
        (Some(path), _) => session
            .load_path(path)
            .with_context(|| format!("Cannot load '{}'", path.display()))?,
        (None, Some(text)) => session.load_text("<text>", text.as_str()),
        (None, None) => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Cannot read document text from stdin")?;
            session.load_text("<stdin>", text);
        }
    }

    Ok(session)
}

fn run_ask(mut cfg: AppConfig, args: AskArgs) -> Result<()> {
    args.source.apply(&mut cfg);
    let session = open_session(&cfg, &args.source)?;

    let answer = session.ask(&args.question)?;
    println!("\nAnswer: {}", answer);

    if let Some(top) = args.top {
        for (rank, (chunk, score)) in session.ranked(&args.question, top)?.into_iter().enumerate() {
            println!("\n[{}] score={}\n{}", rank + 1, score, chunk);
        }
    }
    Ok(())
}

fn run_chunks(mut cfg: AppConfig, args: ChunksArgs) -> Result<()> {
    args.source.apply(&mut cfg);
    let session = open_session(&cfg, &args.source)?;

    for (i, chunk) in session.chunks().iter().enumerate() {
        println!("--- chunk {} ({} chars) ---\n{}", i + 1, chunk.chars().count(), chunk);
    }
    Ok(())
}

fn run_summarize(mut cfg: AppConfig, args: SummarizeArgs) -> Result<()> {
    args.apply(&mut cfg);
    let mut session = open_session(&cfg, &args.source)?;
    let summary     = session.summary()?;

    match &args.out {
        Some(path) => export_text(path, &summary.text)?,
        None       => println!("{}", summary.text),
    }
    Ok(())
}

fn run_extract(args: ExtractArgs) -> Result<()> {
    let document = loader::load_document(&args.file)
        .with_context(|| format!("Cannot load '{}'", args.file.display()))?;
    export_text(&args.out, &document.text)
}

fn run_init_config(mut cfg: AppConfig, args: InitConfigArgs) -> Result<()> {
    args.apply(&mut cfg);
    ConfigStore::new(&args.out).save(&cfg)?;
    println!("Config written to '{}'", args.out.display());
    Ok(())
}

fn run_chat(mut cfg: AppConfig, args: ChatArgs) -> Result<()> {
    if args.source.is_empty() {
        bail!("chat reads questions from stdin; pass the document with --file or --text");
    }
    args.source.apply(&mut cfg);
    let mut session = open_session(&cfg, &args.source)?;

    eprintln!("Ask a question (:summary for a summary, :quit to exit)");
    chat_loop(&mut session, io::stdin().lock(), io::stdout())
}

/// One question per input line until `:quit`, `:q` or end of input.
/// Missing-input warnings are written to `out` and the loop goes on.
fn chat_loop(session: &mut Session, input: impl BufRead, mut out: impl Write) -> Result<()> {
    write!(out, "> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line.context("Cannot read a chat line")?;

        match line.trim() {
            ":quit" | ":q" => break,
            ":summary" => match session.summary() {
                Ok(summary) => writeln!(out, "{}", summary.text)?,
                Err(e)      => writeln!(out, "Warning: {e}")?,
            },
            question => match session.ask(question) {
                Ok(answer) => {
                    if !answer.is_found() {
                        tracing::info!("No passage shares a word with '{}'", question);
                    }
                    writeln!(out, "Answer: {answer}")?
                }
                Err(e @ (SessionError::EmptyQuestion | SessionError::NoDocument)) => {
                    writeln!(out, "Warning: {e}")?
                }
                Err(e) => return Err(e.into()),
            },
        }

        write!(out, "> ")?;
        out.flush()?;
    }

    writeln!(out)?;
    Ok(())
}
