use super::catalog::field_for_key;
use super::normalize::normalize_value;
use super::types::{EntityRecord, RawRow, TableRow};
use super::InputError;

/// Resolve fields from key/value table rows.
///
/// Keys are matched against catalog aliases after emphasis stripping.
/// The first row that yields a non-empty value for a field wins; later
/// rows mapping to the same field are ignored. Unknown keys are skipped.
pub fn resolve_from_rows(rows: &[RawRow]) -> EntityRecord {
    let mut record = EntityRecord::empty();

    for row in rows {
        let Some(field) = field_for_key(&row.key) else {
            continue;
        };
        if record.is_set(field) {
            continue;
        }
        let value = normalize_value(&row.value);
        if !value.is_empty() {
            tracing::debug!(field = %field, "Resolved from table row");
            record.set(field, value);
        }
    }

    record
}

/// Shape raw table rows into key/value pairs.
///
/// The first usable cell is the key; the remaining usable cells, joined by
/// a single space, form the value. Rows with fewer than two usable cells
/// are skipped and reported.
pub fn shape_rows(rows: &[TableRow]) -> (Vec<RawRow>, Vec<InputError>) {
    let mut shaped = Vec::with_capacity(rows.len());
    let mut warnings = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        let cells = row.usable_cells();
        match cells.split_first() {
            Some((key, rest)) if !rest.is_empty() => {
                shaped.push(RawRow::new(*key, rest.join(" ")));
            }
            _ => {
                tracing::warn!(
                    row = index,
                    usable_cells = cells.len(),
                    "Skipping malformed table row"
                );
                warnings.push(InputError::MalformedRow {
                    row: index,
                    usable_cells: cells.len(),
                });
            }
        }
    }

    (shaped, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::extraction::types::Field;

    #[test]
    fn maps_known_keys_to_fields() {
        let rows = vec![
            RawRow::new("Trade Date", "3 June 2024"),
            RawRow::new("**Notional Amount**", "**EUR 10,000,000.00**"),
            RawRow::new("Coupon", " 5.00% "),
        ];
        let record = resolve_from_rows(&rows);
        assert_eq!(record.get(Field::TradeDate), Some("3 June 2024"));
        assert_eq!(record.get(Field::NotionalAmount), Some("EUR 10,000,000.00"));
        assert_eq!(record.get(Field::Coupon), Some("5.00%"));
        assert_eq!(record.resolved_count(), 3);
    }

    #[test]
    fn first_row_wins() {
        let rows = vec![
            RawRow::new("Barrier", "75%"),
            RawRow::new("Barrier Level", "60%"),
            RawRow::new("Barrier", "80%"),
        ];
        let record = resolve_from_rows(&rows);
        assert_eq!(record.get(Field::Barrier), Some("75%"));
    }

    #[test]
    fn empty_value_does_not_claim_field() {
        let rows = vec![
            RawRow::new("Exchange", "  ** "),
            RawRow::new("Exchange", "Eurex"),
        ];
        let record = resolve_from_rows(&rows);
        assert_eq!(record.get(Field::Exchange), Some("Eurex"));
    }

    #[test]
    fn unknown_keys_contribute_nothing() {
        let rows = vec![
            RawRow::new("Calculation Agent", "Party A"),
            RawRow::new("Governing Law", "English"),
        ];
        let record = resolve_from_rows(&rows);
        assert_eq!(record.resolved_count(), 0);
    }

    #[test]
    fn keys_compare_case_sensitively() {
        let rows = vec![RawRow::new("coupon", "5.00%")];
        assert!(!resolve_from_rows(&rows).is_set(Field::Coupon));
    }

    #[test]
    fn no_rows_yields_empty_record() {
        assert_eq!(resolve_from_rows(&[]), EntityRecord::empty());
    }

    #[test]
    fn shape_joins_trailing_cells() {
        let rows = vec![TableRow::new([
            "Upfront Payment",
            "***TBD***% of Notional",
            "payable on the Effective Date",
        ])];
        let (shaped, warnings) = shape_rows(&rows);
        assert!(warnings.is_empty());
        assert_eq!(
            shaped,
            vec![RawRow::new(
                "Upfront Payment",
                "***TBD***% of Notional payable on the Effective Date"
            )]
        );
    }

    #[test]
    fn shape_skips_blank_cells_before_pairing() {
        let rows = vec![TableRow::new(["", "Party B", "  ", "Acme Bank"])];
        let (shaped, warnings) = shape_rows(&rows);
        assert!(warnings.is_empty());
        assert_eq!(shaped, vec![RawRow::new("Party B", "Acme Bank")]);
    }

    #[test]
    fn shape_reports_single_cell_rows() {
        let rows = vec![
            TableRow::new(["Coupon", "5.00%"]),
            TableRow::new(["Section heading", ""]),
            TableRow::new(Vec::<String>::new()),
        ];
        let (shaped, warnings) = shape_rows(&rows);
        assert_eq!(shaped.len(), 1);
        assert_eq!(
            warnings,
            vec![
                InputError::MalformedRow { row: 1, usable_cells: 1 },
                InputError::MalformedRow { row: 2, usable_cells: 0 },
            ]
        );
    }
}
