//! The User aggregate: the author record jokes point back to.
//!
//! Profile fields can only be changed through the mutators below. Each one compares
//! the validated input against the stored value and advances `updated_at` only when
//! something actually changed, so repeating a call with the same input is a no-op.

use crate::error::{DomainResult, ValidationResult};
use crate::model::audit::AuditStamps;
use crate::model::value_objects::{AvatarUrl, DisplayName, EmailAddress, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A registered author.
///
/// ## Examples
///
/// ```rust
/// use jokebox::model::User;
/// use jokebox::model::value_objects::{DisplayName, EmailAddress, UserId};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut user = User::new(
///         UserId::new("alice")?,
///         DisplayName::new("Alice")?,
///         None,
///         EmailAddress::new("alice@example.com")?,
///     );
///
///     assert!(user.update_profile("Alice Liddell", None, None)?);
///     let stamped = user.updated_at();
///
///     // Same input again: nothing changes
///     assert!(!user.update_profile("Alice Liddell", None, None)?);
///     assert_eq!(user.updated_at(), stamped);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    display_name: DisplayName,
    avatar_url: Option<AvatarUrl>,
    email: EmailAddress,
    #[serde(flatten)]
    stamps: AuditStamps,
}

impl User {
    /// Create a user registered now.
    pub fn new(
        id: UserId,
        display_name: DisplayName,
        avatar_url: Option<AvatarUrl>,
        email: EmailAddress,
    ) -> Self {
        Self {
            id,
            display_name,
            avatar_url,
            email,
            stamps: AuditStamps::new_for_creation(),
        }
    }

    /// Rebuild a user read back from storage.
    pub fn restore(
        id: UserId,
        display_name: DisplayName,
        avatar_url: Option<AvatarUrl>,
        email: EmailAddress,
        created_at: DateTime<Utc>,
        updated_at: Option<DateTime<Utc>>,
    ) -> DomainResult<Self> {
        Ok(Self {
            id,
            display_name,
            avatar_url,
            email,
            stamps: AuditStamps::restore(created_at, updated_at)?,
        })
    }

    /// Update display name and avatar, and the email when one is given.
    ///
    /// All inputs are trimmed and validated before anything is applied. The avatar
    /// must be a well-formed http(s) URL; `None` or blank removes it. `updated_at`
    /// advances at most once per call, and only if some field changed.
    ///
    /// Returns whether anything changed.
    pub fn update_profile(
        &mut self,
        display_name: &str,
        avatar_url: Option<&str>,
        email: Option<&str>,
    ) -> ValidationResult<bool> {
        let display_name = DisplayName::new(display_name)?;
        let avatar_url = AvatarUrl::parse_optional_well_formed(avatar_url)?;
        let email = email.map(EmailAddress::new).transpose()?;

        let mut changed = replace_if_changed(&mut self.display_name, display_name);
        changed |= replace_if_changed(&mut self.avatar_url, avatar_url);
        if let Some(email) = email {
            changed |= replace_if_changed(&mut self.email, email);
        }

        if changed {
            self.stamps.touch();
        }
        Ok(changed)
    }

    /// Replace the email address.
    ///
    /// Blank input fails with `EmailRequired`. Returns whether the address changed.
    pub fn change_email(&mut self, new_email: &str) -> ValidationResult<bool> {
        let email = EmailAddress::new(new_email)?;
        let changed = replace_if_changed(&mut self.email, email);
        if changed {
            self.stamps.touch();
        }
        Ok(changed)
    }

    /// Set or clear the avatar.
    ///
    /// Only the length is checked here; the URL format is not. Returns whether the
    /// avatar changed.
    pub fn set_avatar(&mut self, url: Option<&str>) -> ValidationResult<bool> {
        let avatar_url = AvatarUrl::parse_optional(url)?;
        let changed = replace_if_changed(&mut self.avatar_url, avatar_url);
        if changed {
            self.stamps.touch();
        }
        Ok(changed)
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    pub fn avatar_url(&self) -> Option<&AvatarUrl> {
        self.avatar_url.as_ref()
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.stamps.created_at()
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.stamps.updated_at()
    }
}

/// Store `new` in `slot` if it differs; report whether it did.
fn replace_if_changed<T: PartialEq>(slot: &mut T, new: T) -> bool {
    if *slot == new {
        return false;
    }
    *slot = new;
    true
}
