use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::TableRow;

/// Pre-tokenized document content as handed over by a document parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInput {
    #[serde(default)]
    pub paragraphs: Vec<String>,
    #[serde(default)]
    pub rows: Vec<TableRow>,
}

#[derive(Error, Debug)]
pub enum DocumentLoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl DocumentInput {
    pub fn from_json(json: &str) -> Result<Self, DocumentLoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, DocumentLoadError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
