//! AnswerText value object for the punchline of a joke.

use super::text::bounded_text;
use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Longest answer a joke may have, in characters.
pub const MAX_ANSWER_LENGTH: usize = 500;

/// A validated joke answer.
///
/// Same shape rules as [`QuestionText`](super::QuestionText) with a longer limit of
/// [`MAX_ANSWER_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnswerText(String);

impl AnswerText {
    /// Create a new AnswerText with validation.
    pub fn new(value: impl AsRef<str>) -> ValidationResult<Self> {
        bounded_text(
            value.as_ref(),
            MAX_ANSWER_LENGTH,
            ValidationError::AnswerRequired,
            |max, actual| ValidationError::AnswerTooLong { max, actual },
        )
        .map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for AnswerText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for AnswerText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AnswerText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<String> for AnswerText {
    type Error = ValidationError;

    fn try_from(value: String) -> ValidationResult<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for AnswerText {
    type Error = ValidationError;

    fn try_from(value: &str) -> ValidationResult<Self> {
        Self::new(value)
    }
}
