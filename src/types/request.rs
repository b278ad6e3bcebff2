//! Generation requests and their validation.

use serde::Serialize;

use super::Style;
use crate::error::ValidationError;

/// Smallest accepted word budget.
pub const MIN_WORD_COUNT: u32 = 100;

/// Largest accepted word budget.
pub const MAX_WORD_COUNT: u32 = 1000;

/// Suggested increment for word-count pickers. Not enforced.
pub const WORD_COUNT_STEP: u32 = 50;

/// Word budget a picker starts at.
pub const DEFAULT_WORD_COUNT: u32 = 250;

/// A validated request for generated content.
///
/// Only obtainable through [`validate`] (or [`GenerationRequest::new`]), so
/// every instance satisfies all three field constraints. Equality and
/// hashing cover every field, which makes the request itself the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GenerationRequest {
    topic: String,
    word_count: u32,
    style: Style,
}

impl GenerationRequest {
    /// Validate raw input into a request. Same as [`validate`].
    pub fn new(topic: &str, word_count: i64, style: &str) -> Result<Self, ValidationError> {
        validate(topic, word_count, style)
    }

    /// Build a request from an already-parsed style.
    pub fn with_style(topic: &str, word_count: i64, style: Style) -> Result<Self, ValidationError> {
        Ok(Self {
            topic: validate_topic(topic)?,
            word_count: validate_word_count(word_count)?,
            style,
        })
    }

    /// Topic, trimmed of surrounding whitespace.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Target word budget. Advisory only; output length is not checked.
    pub fn word_count(&self) -> u32 {
        self.word_count
    }

    pub fn style(&self) -> Style {
        self.style
    }
}

/// Check raw request fields and build a [`GenerationRequest`].
///
/// Checks run in field order: topic, then word count, then style.
/// Trimming the topic is the only normalization applied.
pub fn validate(topic: &str, word_count: i64, style: &str) -> Result<GenerationRequest, ValidationError> {
    let topic = validate_topic(topic)?;
    let word_count = validate_word_count(word_count)?;
    let style = style.parse::<Style>()?;
    Ok(GenerationRequest {
        topic,
        word_count,
        style,
    })
}

fn validate_topic(topic: &str) -> Result<String, ValidationError> {
    let trimmed = topic.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTopic);
    }
    Ok(trimmed.to_string())
}

fn validate_word_count(word_count: i64) -> Result<u32, ValidationError> {
    u32::try_from(word_count)
        .ok()
        .filter(|w| (MIN_WORD_COUNT..=MAX_WORD_COUNT).contains(w))
        .ok_or(ValidationError::WordCountOutOfRange {
            value: word_count,
            min: MIN_WORD_COUNT,
            max: MAX_WORD_COUNT,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_word_count_is_out_of_range() {
        assert!(matches!(
            validate_word_count(-300),
            Err(ValidationError::WordCountOutOfRange { value: -300, .. })
        ));
    }

    #[test]
    fn huge_word_count_does_not_wrap() {
        let value = i64::from(u32::MAX) + 200;
        assert!(validate_word_count(value).is_err());
    }

    #[test]
    fn topic_checked_before_word_count() {
        assert_eq!(validate("  ", 5, "nope"), Err(ValidationError::EmptyTopic));
    }
}
