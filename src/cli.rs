//! Command-line entry: `extract`, `diagnose` and `tag`.
//!
//! Reads already-tokenized documents (JSON) or plain text, writes JSON to
//! stdout. Logs go to stderr.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;

use crate::config::TaggerConfig;
use crate::pipeline::extraction::{diagnose, extract, DocumentInput, DocumentLoadError};
use crate::pipeline::tagging::{tag_spans, InferenceTagger, SpanRecord, TaggingError};

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Document error: {0}")]
    Document(#[from] DocumentLoadError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Tagging error: {0}")]
    Tagging(#[from] TaggingError),
}

#[derive(Parser, Debug)]
#[command(name = "tradeconf")]
#[command(about = "Extract structured fields from trade confirmation documents")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Extract every field from a tokenized document (JSON)
    Extract {
        /// Document with `paragraphs` and `rows`
        path: PathBuf,
    },
    /// Show where each field label appears and what was resolved
    Diagnose {
        /// Document with `paragraphs` and `rows`
        path: PathBuf,
    },
    /// Tag named-entity spans in a plain-text file
    Tag {
        /// UTF-8 text file
        path: PathBuf,
    },
}

#[derive(Serialize)]
struct TagOutput {
    document_type: &'static str,
    processing_method: &'static str,
    entities: Vec<SpanRecord>,
}

/// Execute a command and return the JSON to print.
pub fn execute(command: &Command) -> Result<String, CliError> {
    match command {
        Command::Extract { path } => {
            let doc = DocumentInput::load(path)?;
            let report = extract(&doc.paragraphs, &doc.rows);
            for warning in &report.warnings {
                tracing::warn!(path = %path.display(), "{warning}");
            }
            Ok(serde_json::to_string_pretty(&report)?)
        }
        Command::Diagnose { path } => {
            let doc = DocumentInput::load(path)?;
            Ok(serde_json::to_string_pretty(&diagnose(&doc.paragraphs, &doc.rows))?)
        }
        Command::Tag { path } => {
            let text = std::fs::read_to_string(path)?;
            let config = TaggerConfig::from_env();
            tracing::info!(model = %config.model, "Tagging free text");
            let tagger = InferenceTagger::from_config(&config);
            let output = TagOutput {
                document_type: "txt",
                processing_method: "ner_based",
                entities: tag_spans(&tagger, &text)?.collect(),
            };
            Ok(serde_json::to_string_pretty(&output)?)
        }
    }
}
