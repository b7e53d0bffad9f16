pub mod extraction;
pub mod tagging; // Free-text entity tagging, independent of the rule-based path
