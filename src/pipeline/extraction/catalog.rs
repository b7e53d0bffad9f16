use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use super::normalize::normalize_value;
use super::types::Field;

/// Shared date shape: "5 June 2024", "05/06/2024", "5-Jun-2024".
const DATE: &str = r"[0-9]{1,2}[\s/-][A-Za-z0-9]+[\s/-][0-9]{4}";

/// Static definition of one canonical field.
pub struct FieldDefinition {
    pub field: Field,
    /// Human label as it appears in confirmations.
    pub label: &'static str,
    /// Table keys that map to this field. Compared after normalization.
    pub table_aliases: &'static [&'static str],
    /// Exactly one capture group; compiled case-insensitive and multi-line.
    pub pattern: Regex,
    /// Reject a pattern match immediately preceded by this phrase.
    pub exclusion: Option<&'static str>,
}

/// The field catalog, in evaluation order.
static CATALOG: LazyLock<Vec<FieldDefinition>> = LazyLock::new(|| {
    vec![
        definition(
            Field::PartyA,
            "Party A",
            &["Party A", "Party A:"],
            r"Party A[:\s]*([A-Za-z0-9 &]+)(?:\n|$)",
            None,
        ),
        definition(
            Field::PartyB,
            "Party B",
            &["Party B", "Party B:"],
            r"Party B[:\s]*([A-Za-z0-9 &]+)(?:\n|$)",
            None,
        ),
        definition(
            Field::TradeDate,
            "Trade Date",
            &["Trade Date", "Trade Date:"],
            &format!(r"Trade Date[:\s]*({DATE})"),
            None,
        ),
        definition(
            Field::InitialValuationDate,
            "Initial Valuation Date",
            &["Initial Valuation Date", "Initial Valuation Date:", "Strike Date"],
            &format!(r"Initial Valuation Date[:\s]*({DATE})"),
            None,
        ),
        definition(
            Field::EffectiveDate,
            "Effective Date",
            &["Effective Date", "Effective Date:"],
            &format!(r"Effective Date[:\s]*({DATE})"),
            None,
        ),
        definition(
            Field::TerminationDate,
            "Termination Date",
            &["Termination Date", "Termination Date:", "Maturity Date"],
            &format!(r"Termination Date[:\s]*({DATE})"),
            None,
        ),
        definition(
            Field::Underlying,
            "Underlying",
            &["Underlying", "Underlying:", "Underlying Index", "Underlying Asset"],
            r"Underlying[:\s]*([^(\n]+?(?:\([^)\n]*\))?[^:\n]*?)(?:\n|\bExchange\b|$)",
            None,
        ),
        definition(
            Field::Exchange,
            "Exchange",
            &["Exchange", "Exchange:"],
            r"\bExchange[:\s]*([A-Za-z0-9]+)",
            None,
        ),
        definition(
            Field::Coupon,
            "Coupon",
            &["Coupon", "Coupon:", "Coupon Rate", "Coupon (C)"],
            r"Coupon[^:]*[:\s]*([0-9.]+%)",
            None,
        ),
        definition(
            Field::BusinessDay,
            "Business Day",
            &["Business Day", "Business Day:", "Business Days"],
            r"Business Day[:\s]*([A-Za-z0-9]+)",
            None,
        ),
        definition(
            Field::TradeTime,
            "Trade Time",
            &["Trade Time", "Trade Time:"],
            r"Trade Time[:\s]*([0-9]{2}:[0-9]{2}:[0-9]{2})",
            None,
        ),
        definition(
            Field::ValuationDate,
            "Valuation Date",
            &["Valuation Date", "Valuation Date:", "Final Valuation Date"],
            r"\bValuation Date[:\s]*([0-9]{1,2}[\s/-][A-Za-z]+[\s/-][0-9]{4})",
            Some("Initial"),
        ),
        definition(
            Field::NotionalAmount,
            "Notional Amount",
            &["Notional Amount", "Notional Amount:", "Notional", "Notional Amount (N)"],
            r"Notional Amount[^:]*[:\s]*([A-Z]{3}\s+[0-9,.]+\s*[A-Za-z]+)",
            None,
        ),
        definition(
            Field::UpfrontPayment,
            "Upfront Payment",
            &["Upfront Payment", "Upfront Payment:", "Upfront Fee"],
            r"Upfront Payment[^:]*[:\s]*([^:]+?on the Effective Date)",
            None,
        ),
        definition(
            Field::Barrier,
            "Barrier",
            &["Barrier", "Barrier:", "Barrier (B)", "Barrier Level"],
            r"Barrier(?:\s*\(B\))?[:\- ]+([0-9.]+%)",
            None,
        ),
    ]
});

fn definition(
    field: Field,
    label: &'static str,
    table_aliases: &'static [&'static str],
    pattern: &str,
    exclusion: Option<&'static str>,
) -> FieldDefinition {
    FieldDefinition {
        field,
        label,
        table_aliases,
        pattern: RegexBuilder::new(pattern)
            .case_insensitive(true)
            .multi_line(true)
            .build()
            .expect("Invalid field catalog pattern"),
        exclusion,
    }
}

/// All field definitions, in evaluation order.
pub fn catalog() -> &'static [FieldDefinition] {
    &CATALOG
}

/// Definition for a single field.
pub fn definition_of(field: Field) -> &'static FieldDefinition {
    // Catalog order mirrors `Field::ALL`, checked by tests below.
    &CATALOG[field as usize]
}

/// Map a raw table key to its canonical field, if any alias matches.
pub fn field_for_key(raw_key: &str) -> Option<Field> {
    let key = normalize_value(raw_key);
    if key.is_empty() {
        return None;
    }
    CATALOG
        .iter()
        .find(|def| {
            def.table_aliases
                .iter()
                .any(|alias| normalize_value(alias) == key)
        })
        .map(|def| def.field)
}
