//! UserId value object for author identity keys.
//!
//! User ids are issued by the identity provider. The domain only checks that a key
//! has the shape the provider could have produced, so a malformed key can never be
//! used to sidestep the ownership checks on [`Joke`](crate::model::Joke).

use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Longest identity key the identity provider stores.
pub const MAX_USER_ID_LENGTH: usize = 450;

/// A validated identity key.
///
/// ## Validation Rules
///
/// - Surrounding whitespace is trimmed
/// - Must not be empty after trimming
/// - At most [`MAX_USER_ID_LENGTH`] characters
/// - ASCII letters, digits and `- _ . @ + | :` only
///
/// ## Examples
///
/// ```rust
/// use jokebox::model::value_objects::UserId;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let id = UserId::new("3f2b9c1e-8a4d-4e0f-9b6a-1c2d3e4f5a6b")?;
///     assert_eq!(id.as_str(), "3f2b9c1e-8a4d-4e0f-9b6a-1c2d3e4f5a6b");
///
///     assert!(UserId::new("   ").is_err());
///     assert!(UserId::new("bob; DROP TABLE").is_err());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId with validation.
    pub fn new(value: impl AsRef<str>) -> ValidationResult<Self> {
        let trimmed = value.as_ref().trim();
        Self::validate_format(trimmed)?;
        Ok(Self(trimmed.to_string()))
    }

    /// Get the string representation of the UserId.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the owned string value of the UserId.
    pub fn into_string(self) -> String {
        self.0
    }

    fn validate_format(value: &str) -> ValidationResult<()> {
        if value.is_empty() {
            return Err(ValidationError::UserIdRequired);
        }

        let length = value.chars().count();
        if length > MAX_USER_ID_LENGTH {
            return Err(ValidationError::UserIdTooLong {
                max: MAX_USER_ID_LENGTH,
                actual: length,
            });
        }

        if let Some(character) = value.chars().find(|c| !Self::is_allowed(*c)) {
            return Err(ValidationError::UserIdInvalidCharacter { character });
        }

        Ok(())
    }

    fn is_allowed(c: char) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@' | '+' | '|' | ':')
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for UserId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<String> for UserId {
    type Error = ValidationError;

    fn try_from(value: String) -> ValidationResult<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for UserId {
    type Error = ValidationError;

    fn try_from(value: &str) -> ValidationResult<Self> {
        Self::new(value)
    }
}
