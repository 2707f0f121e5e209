//! AvatarUrl value object for a user's profile picture location.
//!
//! Two levels of checking exist. [`AvatarUrl::new`] enforces the length bound only and
//! backs [`User::set_avatar`](crate::model::User::set_avatar), which deliberately accepts
//! any string short enough to store. [`AvatarUrl::new_well_formed`] additionally requires
//! an absolute http(s) URL and backs profile updates.

use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use url::Url;

/// Longest avatar URL that can be stored.
pub const MAX_AVATAR_URL_LENGTH: usize = 2048;

/// A length-checked avatar URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AvatarUrl(String);

impl AvatarUrl {
    /// Create an AvatarUrl checking length only.
    ///
    /// A blank value is rejected; callers model "no avatar" as `None`
    /// (see [`AvatarUrl::parse_optional`]).
    pub fn new(value: impl AsRef<str>) -> ValidationResult<Self> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::AvatarUrlRequired);
        }

        let length = trimmed.chars().count();
        if length > MAX_AVATAR_URL_LENGTH {
            return Err(ValidationError::AvatarUrlTooLong {
                max: MAX_AVATAR_URL_LENGTH,
                actual: length,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Create an AvatarUrl that must also parse as an absolute http or https URL.
    pub fn new_well_formed(value: impl AsRef<str>) -> ValidationResult<Self> {
        let avatar = Self::new(value)?;
        let parsed = Url::parse(&avatar.0).map_err(|_| ValidationError::InvalidAvatarUrl {
            value: avatar.0.clone(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ValidationError::InvalidAvatarUrl { value: avatar.0 });
        }

        Ok(avatar)
    }

    /// Length-checked optional avatar; `None` and blank input both mean "no avatar".
    pub fn parse_optional(value: Option<&str>) -> ValidationResult<Option<Self>> {
        match value.map(str::trim) {
            None | Some("") => Ok(None),
            Some(url) => Self::new(url).map(Some),
        }
    }

    /// Well-formed optional avatar; `None` and blank input both mean "no avatar".
    pub fn parse_optional_well_formed(value: Option<&str>) -> ValidationResult<Option<Self>> {
        match value.map(str::trim) {
            None | Some("") => Ok(None),
            Some(url) => Self::new_well_formed(url).map(Some),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for AvatarUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for AvatarUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AvatarUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}
