//! Input rules shared by the DB and API layers.
//!
//! Request DTOs derive [`validator::Validate`] with the limits below;
//! [`validate_input`] turns a failed check into [`CoreError::Validation`].

use validator::{Validate, ValidationErrors};

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Limits
-------------------------------------------------------------------------- */

/// Maximum length for deck names.
pub const MAX_DECK_NAME_LENGTH: u64 = 200;

/// Maximum length for deck descriptions.
pub const MAX_DECK_DESCRIPTION_LENGTH: u64 = 2_000;

/// Maximum length for either side of a card.
pub const MAX_CARD_SIDE_LENGTH: u64 = 10_000;

/// Maximum length for a tag name.
pub const MAX_TAG_NAME_LENGTH: u64 = 64;

/// Maximum number of tags attached to a card in one request.
pub const MAX_TAGS_PER_CARD: u64 = 20;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Run the derived validator on `input`, flattening every field error into a
/// single readable message.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::Validation(describe(&errors)))
}

fn describe(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let detail = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect::<Vec<_>>()
                .join(", ");
            format!("{field}: {detail}")
        })
        .collect();
    parts.sort();
    parts.join("; ")
}

/// Normalize a tag name: trim surrounding whitespace and collapse inner runs.
///
/// Returns an error for names that are empty after trimming or too long.
pub fn normalize_tag_name(name: &str) -> Result<String, CoreError> {
    let normalized = name.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.is_empty() {
        return Err(CoreError::Validation(
            "Tag name must not be empty".to_string(),
        ));
    }
    if normalized.chars().count() as u64 > MAX_TAG_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Tag name exceeds maximum length of {MAX_TAG_NAME_LENGTH} characters"
        )));
    }
    Ok(normalized)
}

/// Ensure a text field is not blank (whitespace only counts as blank).
pub fn require_non_blank(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
