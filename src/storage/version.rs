//! Record versions for optimistic concurrency control.
//!
//! A version is derived from the stored content with SHA-256, so any change to a
//! record changes its version. Writers pass back the version they read; a
//! mismatch means someone else wrote in between.
//!
//! ```rust
//! use jokebox::storage::RecordVersion;
//!
//! let v1 = RecordVersion::from_content(br#"{"id":1,"likes":0}"#);
//! let v2 = RecordVersion::from_content(br#"{"id":1,"likes":1}"#);
//! assert_ne!(v1, v2);
//!
//! // Weak ETag form for HTTP headers
//! let etag = v1.to_etag();
//! assert_eq!(RecordVersion::from_etag(&etag).unwrap(), v1);
//! ```

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Opaque version identifier of a stored record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordVersion {
    opaque: String,
}

impl RecordVersion {
    /// Compute the version of a record from its serialized content.
    pub fn from_content(content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content);
        let hash = hasher.finalize();
        // First 8 bytes are plenty to tell successive writes apart
        Self {
            opaque: BASE64.encode(&hash[..8]),
        }
    }

    /// Parse a weak (`W/"..."`) or strong (`"..."`) ETag header value.
    pub fn from_etag(etag: &str) -> Result<Self, VersionError> {
        let trimmed = etag.trim();
        let quoted = trimmed.strip_prefix("W/").unwrap_or(trimmed);
        let opaque = quoted
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .filter(|inner| !inner.is_empty())
            .ok_or_else(|| VersionError::InvalidEtagFormat(etag.to_string()))?;

        Ok(Self {
            opaque: opaque.to_string(),
        })
    }

    /// Weak ETag form, `W/"<version>"`.
    pub fn to_etag(&self) -> String {
        format!("W/\"{}\"", self.opaque)
    }

    pub fn as_str(&self) -> &str {
        &self.opaque
    }
}

impl fmt::Display for RecordVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opaque)
    }
}

impl FromStr for RecordVersion {
    type Err = VersionError;

    fn from_str(version_str: &str) -> Result<Self, Self::Err> {
        let trimmed = version_str.trim();
        if trimmed.is_empty() {
            return Err(VersionError::ParseError(
                "Version string cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            opaque: trimmed.to_string(),
        })
    }
}

/// Errors when parsing versions from external input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("Invalid ETag format: {0}")]
    InvalidEtagFormat(String),

    #[error("Version parse error: {0}")]
    ParseError(String),
}

/// A value paired with the version of the record it was loaded from or saved as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versioned<T> {
    value: T,
    version: RecordVersion,
}

impl<T> Versioned<T> {
    pub fn new(value: T, version: RecordVersion) -> Self {
        Self { value, version }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn version(&self) -> &RecordVersion {
        &self.version
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn into_parts(self) -> (T, RecordVersion) {
        (self.value, self.version)
    }
}
