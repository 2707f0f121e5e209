//! JokeId value object for joke identifiers.
//!
//! Joke ids are assigned by the persistence boundary on first save. A freshly
//! created joke has no id at all (`None` on the aggregate).

use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated joke identifier.
///
/// ## Validation Rules
///
/// - Must be strictly greater than zero
///
/// ## Examples
///
/// ```rust
/// use jokebox::model::value_objects::JokeId;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let id = JokeId::new(42)?;
///     assert_eq!(id.value(), 42);
///
///     assert!(JokeId::new(0).is_err());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JokeId(i64);

impl JokeId {
    /// Create a new JokeId with validation.
    ///
    /// # Returns
    ///
    /// * `Ok(JokeId)` - If the value is positive
    /// * `Err(ValidationError::NonPositiveJokeId)` - Otherwise
    pub fn new(value: i64) -> ValidationResult<Self> {
        if value <= 0 {
            return Err(ValidationError::NonPositiveJokeId { value });
        }
        Ok(Self(value))
    }

    /// Get the raw integer value.
    ///
    /// Intended for persistence and transport boundaries.
    pub fn value(&self) -> i64 {
        self.0
    }

    /// The id following this one, used when allocating ids in sequence.
    pub(crate) fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// The first id handed out by a fresh store.
    pub(crate) fn first() -> Self {
        Self(1)
    }
}

impl fmt::Display for JokeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for JokeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for JokeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<i64> for JokeId {
    type Error = ValidationError;

    fn try_from(value: i64) -> ValidationResult<Self> {
        Self::new(value)
    }
}

impl From<JokeId> for i64 {
    fn from(id: JokeId) -> Self {
        id.0
    }
}
