//! Shared length/blank checks for free-text value objects.

use crate::error::{ValidationError, ValidationResult};

/// Validate a required, length-bounded text and return its trimmed form.
///
/// The length bound applies to the input as given, counted in characters.
pub(super) fn bounded_text(
    value: &str,
    max: usize,
    required: ValidationError,
    too_long: fn(usize, usize) -> ValidationError,
) -> ValidationResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(required);
    }

    let length = value.chars().count();
    if length > max {
        return Err(too_long(max, length));
    }

    Ok(trimmed.to_string())
}
