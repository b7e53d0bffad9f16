use serde::{Deserialize, Serialize};

use super::TaggingError;

/// One tagged unit as emitted by a token-classification model with
/// simple aggregation (`entity_group` + surface `word`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedToken {
    pub entity_group: String,
    pub word: String,
    #[serde(default)]
    pub score: Option<f32>,
    #[serde(default)]
    pub start: Option<usize>,
    #[serde(default)]
    pub end: Option<usize>,
}

impl TaggedToken {
    pub fn new(word: &str, entity_group: &str) -> Self {
        Self {
            entity_group: entity_group.to_string(),
            word: word.to_string(),
            score: None,
            start: None,
            end: None,
        }
    }
}

/// Span shape handed to callers of the free-text path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanRecord {
    pub text: String,
    pub label: String,
}

impl From<TaggedToken> for SpanRecord {
    fn from(token: TaggedToken) -> Self {
        Self {
            text: token.word,
            label: token.entity_group,
        }
    }
}

/// External free-text entity tagger (allows mocking).
pub trait EntityTagger {
    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>, TaggingError>;
}
