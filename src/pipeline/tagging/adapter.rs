use super::types::{EntityTagger, SpanRecord, TaggedToken};
use super::TaggingError;

/// Lazily reshapes tagger output into span records, one per tagged unit,
/// in tagger order. Restart by calling `tag_spans` again.
pub struct SpanIter {
    inner: std::vec::IntoIter<TaggedToken>,
}

impl Iterator for SpanIter {
    type Item = SpanRecord;

    fn next(&mut self) -> Option<SpanRecord> {
        self.inner.next().map(SpanRecord::from)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for SpanIter {}

/// Run the tagger over free text. Tagger failures propagate unchanged.
pub fn tag_spans(tagger: &dyn EntityTagger, text: &str) -> Result<SpanIter, TaggingError> {
    let tokens = tagger.tag(text).map_err(|e| {
        tracing::warn!(error = %e, "Entity tagging failed");
        e
    })?;
    tracing::debug!(spans = tokens.len(), "Entity tagging complete");
    Ok(SpanIter {
        inner: tokens.into_iter(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::tagging::MockTagger;

    #[test]
    fn reshapes_tokens_in_order_without_merging() {
        let tagger = MockTagger::new(vec![
            TaggedToken::new("Goldman Sachs", "ORG"),
            TaggedToken::new("London", "LOC"),
            TaggedToken::new("Goldman Sachs", "ORG"),
        ]);
        let spans: Vec<SpanRecord> = tag_spans(&tagger, "irrelevant").unwrap().collect();
        assert_eq!(
            spans,
            vec![
                SpanRecord { text: "Goldman Sachs".into(), label: "ORG".into() },
                SpanRecord { text: "London".into(), label: "LOC".into() },
                SpanRecord { text: "Goldman Sachs".into(), label: "ORG".into() },
            ]
        );
    }

    #[test]
    fn reports_exact_length() {
        let tagger = MockTagger::new(vec![TaggedToken::new("Paris", "LOC")]);
        assert_eq!(tag_spans(&tagger, "x").unwrap().len(), 1);
    }

    #[test]
    fn empty_output_is_empty_sequence() {
        let tagger = MockTagger::new(vec![]);
        assert_eq!(tag_spans(&tagger, "").unwrap().count(), 0);
    }

    #[test]
    fn failure_propagates() {
        let tagger = MockTagger::failing("model not loaded");
        let err = tag_spans(&tagger, "text").err().unwrap();
        assert!(matches!(err, TaggingError::Unavailable(ref msg) if msg == "model not loaded"));
    }

    #[test]
    fn each_call_re_invokes_tagger() {
        let tagger = MockTagger::new(vec![TaggedToken::new("EUR", "MISC")]);
        tag_spans(&tagger, "a").unwrap().for_each(drop);
        tag_spans(&tagger, "b").unwrap().for_each(drop);
        assert_eq!(tagger.call_count(), 2);
    }
}
