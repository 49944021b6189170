//! Input validation for characters created by the user.
//!
//! A saved character needs every text field filled in and a non-empty
//! image. Whitespace-only text counts as empty.

use crate::error::CoreError;

/// Message shown when a new character is rejected.
pub const INCOMPLETE_CHARACTER_MESSAGE: &str = "All fields and an image must be filled";

/// Check a set of `(field_name, value)` pairs plus the image payload.
///
/// Returns [`CoreError::Validation`] naming every blank field (and
/// `image` when the payload is missing or empty).
pub fn validate_new_character(fields: &[(&str, &str)], image: Option<&[u8]>) -> Result<(), CoreError> {
    let mut missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if image.map_or(true, |bytes| bytes.is_empty()) {
        missing.push("image");
    }

    if missing.is_empty() {
        return Ok(());
    }

    Err(CoreError::Validation(format!(
        "{INCOMPLETE_CHARACTER_MESSAGE} (missing: {})",
        missing.join(", ")
    )))
}
