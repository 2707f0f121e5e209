//! Creation and modification timestamps for aggregates.
//!
//! Aggregates never expose their timestamps for writing. They call
//! [`AuditStamps::touch`] from inside the mutator that actually changed a value.

use crate::error::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// When an aggregate was created and when it last changed.
///
/// `updated_at` is `None` until the first real change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStamps {
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl AuditStamps {
    /// Stamps for an aggregate created now.
    pub fn new_for_creation() -> Self {
        Self {
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Rebuild stamps read back from storage.
    ///
    /// The last update may not precede creation.
    pub fn restore(
        created_at: DateTime<Utc>,
        updated_at: Option<DateTime<Utc>>,
    ) -> DomainResult<Self> {
        if let Some(updated) = updated_at {
            if updated < created_at {
                return Err(DomainError::UpdatedBeforeCreated);
            }
        }
        Ok(Self {
            created_at,
            updated_at,
        })
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Latest of creation and last update.
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }

    /// Record a change at the current time.
    ///
    /// Never moves backwards, even if the wall clock does.
    pub(crate) fn touch(&mut self) {
        let now = Utc::now().max(self.last_activity());
        self.updated_at = Some(now);
    }
}
