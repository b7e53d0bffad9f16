//! Per-field diagnostics for tuning the catalog against real confirmations.
//!
//! For each field: every line of the assembled document text that mentions
//! the field label, next to what the extraction pass actually resolved and
//! from which source. Pure; callers decide how to log or print it.

use serde::Serialize;

use super::catalog::catalog;
use super::orchestrator::{assemble_text, extract_assembled};
use super::types::{Field, FieldSource, TableRow};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDiagnostic {
    pub field: Field,
    /// Trimmed lines containing the field label (case-insensitive).
    pub mentions: Vec<String>,
    pub value: Option<String>,
    pub source: Option<FieldSource>,
}

pub fn diagnose(paragraphs: &[String], rows: &[TableRow]) -> Vec<FieldDiagnostic> {
    let text = assemble_text(paragraphs, rows);
    let report = extract_assembled(&text, rows);

    catalog()
        .iter()
        .map(|def| FieldDiagnostic {
            field: def.field,
            mentions: lines_mentioning(&text, def.label),
            value: report.entities.get(def.field).map(str::to_string),
            source: report.sources.get(&def.field).copied(),
        })
        .collect()
}

fn lines_mentioning(text: &str, label: &str) -> Vec<String> {
    let needle = label.to_lowercase();
    text.lines()
        .map(str::trim)
        .filter(|line| line.to_lowercase().contains(&needle))
        .map(str::to_string)
        .collect()
}
