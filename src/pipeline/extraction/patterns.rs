use super::catalog::{catalog, FieldDefinition};
use super::normalize::{normalize_value, strip_emphasis};
use super::types::EntityRecord;

/// Fill every field still absent in `partial` by scanning the full text.
///
/// Emphasis markers are dropped before scanning so bold labels and bold
/// exclusion phrases read the same as plain ones.
/// Fields already set are never re-evaluated: table rows outrank prose.
/// A field with no accepted match stays absent.
pub fn resolve_from_text(text: &str, partial: EntityRecord) -> EntityRecord {
    let mut record = partial;
    let text = strip_emphasis(text);

    for def in catalog() {
        if record.is_set(def.field) {
            continue;
        }
        if let Some(value) = find_value(def, &text) {
            tracing::debug!(field = %def.field, "Resolved from text pattern");
            record.set(def.field, value);
        }
    }

    record
}

/// First accepted, non-empty capture for a field definition.
///
/// A candidate preceded by the definition's exclusion phrase is rejected and
/// the search resumes just past the rejected match start.
pub fn find_value(def: &FieldDefinition, text: &str) -> Option<String> {
    let mut pos = 0;

    while pos <= text.len() {
        let caps = def.pattern.captures_at(text, pos)?;
        let whole = caps.get(0)?;

        let excluded = def
            .exclusion
            .is_some_and(|phrase| preceded_by(text, whole.start(), phrase));

        if !excluded {
            let value = caps.get(1).map(|m| normalize_value(m.as_str())).unwrap_or_default();
            if !value.is_empty() {
                return Some(value);
            }
        }

        pos = next_char_boundary(text, whole.start());
    }

    None
}

/// True when `phrase` ends right before `offset`, ignoring whitespace.
/// Case-insensitive to match the patterns themselves.
fn preceded_by(text: &str, offset: usize, phrase: &str) -> bool {
    let before = text[..offset].trim_end();
    if before.len() < phrase.len() {
        return false;
    }
    let start = before.len() - phrase.len();
    if !before.is_char_boundary(start) {
        return false;
    }
    let tail = &before[start..];
    if !tail.eq_ignore_ascii_case(phrase) {
        return false;
    }
    // "Initial" must be a whole word, not the end of e.g. "Noninitial".
    !before[..start]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_alphanumeric())
}

fn next_char_boundary(text: &str, from: usize) -> usize {
    text[from..]
        .chars()
        .next()
        .map_or(text.len() + 1, |c| from + c.len_utf8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::extraction::catalog::definition_of;
    use crate::pipeline::extraction::types::Field;

    const CONFIRMATION: &str = "\
Confirmation of OTC Equity Derivative
Party A: Goldman Sachs International
Party B: Acme Capital Partners
Trade Date: 3 June 2024
Trade Time: 14:32:05
Initial Valuation Date: 5 June 2024
Effective Date: 7 June 2024
Valuation Date: 5 June 2026
Termination Date: 9 June 2026
Underlying: Euro Stoxx 50 (SX5E) Exchange: Eurex
Notional Amount (N): EUR 1,000,000 million
Upfront Payment: ***TBD***% of Notional payable on the Effective Date
Coupon (C): 4.25%
Barrier (B): 75.00%
Business Day: TARGET
";

    #[test]
    fn resolves_every_field_from_prose() {
        let record = resolve_from_text(CONFIRMATION, EntityRecord::empty());
        assert_eq!(record.get(Field::PartyA), Some("Goldman Sachs International"));
        assert_eq!(record.get(Field::PartyB), Some("Acme Capital Partners"));
        assert_eq!(record.get(Field::TradeDate), Some("3 June 2024"));
        assert_eq!(record.get(Field::TradeTime), Some("14:32:05"));
        assert_eq!(record.get(Field::InitialValuationDate), Some("5 June 2024"));
        assert_eq!(record.get(Field::EffectiveDate), Some("7 June 2024"));
        assert_eq!(record.get(Field::ValuationDate), Some("5 June 2026"));
        assert_eq!(record.get(Field::TerminationDate), Some("9 June 2026"));
        assert_eq!(record.get(Field::Underlying), Some("Euro Stoxx 50 (SX5E)"));
        assert_eq!(record.get(Field::Exchange), Some("Eurex"));
        assert_eq!(record.get(Field::NotionalAmount), Some("EUR 1,000,000 million"));
        assert_eq!(
            record.get(Field::UpfrontPayment),
            Some("TBD% of Notional payable on the Effective Date")
        );
        assert_eq!(record.get(Field::Coupon), Some("4.25%"));
        assert_eq!(record.get(Field::Barrier), Some("75.00%"));
        assert_eq!(record.get(Field::BusinessDay), Some("TARGET"));
    }

    #[test]
    fn initial_valuation_date_alone_does_not_fill_valuation_date() {
        let record =
            resolve_from_text("Initial Valuation Date: 5 June 2024", EntityRecord::empty());
        assert_eq!(record.get(Field::InitialValuationDate), Some("5 June 2024"));
        assert_eq!(record.get(Field::ValuationDate), None);
    }

    #[test]
    fn exclusion_skips_to_later_occurrence() {
        let text = "Initial Valuation Date: 5 June 2024\nValuation Date: 5 June 2026";
        let def = definition_of(Field::ValuationDate);
        assert_eq!(find_value(def, text).as_deref(), Some("5 June 2026"));
    }

    #[test]
    fn exclusion_ignores_intervening_whitespace_and_case() {
        let text = "INITIAL \n  valuation date 5 June 2024";
        let def = definition_of(Field::ValuationDate);
        assert_eq!(find_value(def, text), None);
    }

    #[test]
    fn exclusion_requires_whole_word() {
        assert!(preceded_by("Initial Valuation", 8, "Initial"));
        assert!(!preceded_by("Noninitial Valuation", 11, "Initial"));
        assert!(!preceded_by("Valuation", 0, "Initial"));
    }

    #[test]
    fn bold_exclusion_phrase_still_excludes() {
        let record = resolve_from_text(
            "**Initial** Valuation Date: 5 June 2024",
            EntityRecord::empty(),
        );
        assert_eq!(record.get(Field::InitialValuationDate), Some("5 June 2024"));
        assert_eq!(record.get(Field::ValuationDate), None);
    }

    #[test]
    fn bold_labels_resolve_like_plain_ones() {
        let text = "**Trade Date:** 3 June 2024\n**Barrier (B):** 75%\n***Valuation Date***: 5 June 2026";
        let record = resolve_from_text(text, EntityRecord::empty());
        assert_eq!(record.get(Field::TradeDate), Some("3 June 2024"));
        assert_eq!(record.get(Field::Barrier), Some("75%"));
        assert_eq!(record.get(Field::ValuationDate), Some("5 June 2026"));
    }

    #[test]
    fn preset_fields_are_not_overwritten() {
        let mut partial = EntityRecord::empty();
        partial.set(Field::Coupon, "5.00%".into());
        let record = resolve_from_text("Coupon: 3.10%", partial);
        assert_eq!(record.get(Field::Coupon), Some("5.00%"));
    }

    #[test]
    fn match_may_span_lines() {
        let record = resolve_from_text("Trade Date\n3 June 2024", EntityRecord::empty());
        assert_eq!(record.get(Field::TradeDate), Some("3 June 2024"));
    }

    #[test]
    fn no_match_leaves_field_absent() {
        let record = resolve_from_text("Nothing to see here.", EntityRecord::empty());
        assert_eq!(record.resolved_count(), 0);
        assert_eq!(record.iter().count(), Field::COUNT);
    }

    #[test]
    fn empty_text_is_fine() {
        assert_eq!(resolve_from_text("", EntityRecord::empty()), EntityRecord::empty());
    }

    #[test]
    fn multibyte_text_before_excluded_match() {
        let text = "Prix € Initial Valuation Date: 5 Juin 2024 — fin";
        let def = definition_of(Field::ValuationDate);
        assert_eq!(find_value(def, text), None);
    }
}
