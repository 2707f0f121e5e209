//! EmailAddress value object for a user's contact address.
//!
//! The same rule backs both profile updates and explicit email changes on
//! [`User`](crate::model::User), so there is exactly one definition of a valid address.

use crate::error::{ValidationError, ValidationResult};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::OnceLock;

/// Longest accepted address, counted after trimming.
pub const MAX_EMAIL_LENGTH: usize = 256;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Whitespace is rejected separately so it gets its own error.
        Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// A validated email address.
///
/// ## Validation Rules
///
/// - Surrounding whitespace is trimmed
/// - Must not be empty
/// - At most [`MAX_EMAIL_LENGTH`] characters
/// - No whitespace inside the address
/// - `local@domain.tld` shape, exactly one `@`, no empty domain labels
///
/// ## Examples
///
/// ```rust
/// use jokebox::model::value_objects::EmailAddress;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let email = EmailAddress::new(" bjensen@example.com ")?;
///     assert_eq!(email.as_str(), "bjensen@example.com");
///
///     assert!(EmailAddress::new("b jensen@example.com").is_err());
///     assert!(EmailAddress::new("bjensen").is_err());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new EmailAddress with validation.
    pub fn new(value: impl AsRef<str>) -> ValidationResult<Self> {
        let trimmed = value.as_ref().trim();
        Self::validate_value(trimmed)?;
        Ok(Self(trimmed.to_string()))
    }

    /// Get the email address value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Domain part of the address.
    pub fn domain(&self) -> &str {
        self.0.rsplit_once('@').map(|(_, domain)| domain).unwrap_or_default()
    }

    fn validate_value(value: &str) -> ValidationResult<()> {
        if value.is_empty() {
            return Err(ValidationError::EmailRequired);
        }

        let length = value.chars().count();
        if length > MAX_EMAIL_LENGTH {
            return Err(ValidationError::EmailTooLong {
                max: MAX_EMAIL_LENGTH,
                actual: length,
            });
        }

        if value.chars().any(char::is_whitespace) {
            return Err(ValidationError::EmailContainsWhitespace);
        }

        if !email_regex().is_match(value) {
            return Err(ValidationError::InvalidEmailFormat {
                value: value.to_string(),
            });
        }

        Ok(())
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for EmailAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EmailAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<&str> for EmailAddress {
    type Error = ValidationError;

    fn try_from(value: &str) -> ValidationResult<Self> {
        Self::new(value)
    }
}
