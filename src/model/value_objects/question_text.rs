//! QuestionText value object for the set-up line of a joke.

use super::text::bounded_text;
use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Longest question a joke may have, in characters.
pub const MAX_QUESTION_LENGTH: usize = 200;

/// A validated joke question.
///
/// ## Validation Rules
///
/// - Must not be blank
/// - At most [`MAX_QUESTION_LENGTH`] characters as given
/// - Stored trimmed
///
/// ## Examples
///
/// ```rust
/// use jokebox::model::value_objects::QuestionText;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let question = QuestionText::new("  Why did the crab never share?  ")?;
///     assert_eq!(question.as_str(), "Why did the crab never share?");
///
///     assert!(QuestionText::new("x".repeat(201)).is_err());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuestionText(String);

impl QuestionText {
    /// Create a new QuestionText with validation.
    ///
    /// # Returns
    ///
    /// * `Ok(QuestionText)` - If the value is valid
    /// * `Err(ValidationError::QuestionRequired)` - If the value is blank
    /// * `Err(ValidationError::QuestionTooLong)` - If the value exceeds the limit
    pub fn new(value: impl AsRef<str>) -> ValidationResult<Self> {
        bounded_text(
            value.as_ref(),
            MAX_QUESTION_LENGTH,
            ValidationError::QuestionRequired,
            |max, actual| ValidationError::QuestionTooLong { max, actual },
        )
        .map(Self)
    }

    /// Get the string representation of the QuestionText.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the owned string value of the QuestionText.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for QuestionText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for QuestionText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for QuestionText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<String> for QuestionText {
    type Error = ValidationError;

    fn try_from(value: String) -> ValidationResult<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for QuestionText {
    type Error = ValidationError;

    fn try_from(value: &str) -> ValidationResult<Self> {
        Self::new(value)
    }
}
