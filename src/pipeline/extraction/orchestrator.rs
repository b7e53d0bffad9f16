use std::collections::BTreeMap;

use super::patterns::resolve_from_text;
use super::table::{resolve_from_rows, shape_rows};
use super::types::{EntityRecord, ExtractionReport, Field, FieldSource, TableRow};

/// Join paragraphs and the usable cells of every row into one text,
/// newline-separated, in document order.
pub fn assemble_text(paragraphs: &[String], rows: &[TableRow]) -> String {
    let mut lines: Vec<&str> = paragraphs.iter().map(String::as_str).collect();
    for row in rows {
        lines.extend(row.usable_cells());
    }
    lines.join("\n")
}

/// Run the full rule-based pass over one document.
///
/// table rows → pattern fallback over the assembled text → report.
/// Malformed rows are reported as warnings; the record is always complete.
pub fn extract(paragraphs: &[String], rows: &[TableRow]) -> ExtractionReport {
    let text = assemble_text(paragraphs, rows);
    extract_assembled(&text, rows)
}

/// Same as `extract`, for callers that already hold the assembled text.
pub fn extract_assembled(text: &str, rows: &[TableRow]) -> ExtractionReport {
    let (raw_rows, warnings) = shape_rows(rows);

    let from_table = resolve_from_rows(&raw_rows);
    let sources = Field::ALL
        .into_iter()
        .filter(|f| from_table.is_set(*f))
        .map(|f| (f, FieldSource::Table))
        .collect::<BTreeMap<_, _>>();

    let entities = resolve_from_text(text, from_table);
    let sources = with_pattern_sources(sources, &entities);

    tracing::info!(
        text_len = text.len(),
        rows = rows.len(),
        resolved = entities.resolved_count(),
        from_table = sources.values().filter(|s| **s == FieldSource::Table).count(),
        skipped_rows = warnings.len(),
        "Extraction complete"
    );

    ExtractionReport {
        processing_method: ExtractionReport::PROCESSING_METHOD,
        entities,
        sources,
        warnings,
    }
}

/// Convenience wrapper returning only the record.
pub fn extract_record(paragraphs: &[String], rows: &[TableRow]) -> EntityRecord {
    extract(paragraphs, rows).entities
}

fn with_pattern_sources(
    mut sources: BTreeMap<Field, FieldSource>,
    entities: &EntityRecord,
) -> BTreeMap<Field, FieldSource> {
    for field in Field::ALL {
        if entities.is_set(field) {
            sources.entry(field).or_insert(FieldSource::Pattern);
        }
    }
    sources
}
