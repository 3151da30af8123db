//! Validation rules for to-do text fields.
//!
//! All rules are pure. Length is counted in UTF-16 code units, so a character
//! outside the Basic Multilingual Plane (most emoji) counts as two. "Blank"
//! means empty or whitespace-only. The same rules run on every text change in a
//! form and again when the store accepts a command.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use thiserror::Error;

/// Allowed title length, in UTF-16 code units
pub const TITLE_LENGTH: RangeInclusive<usize> = 3..=50;

/// Maximum subtitle length, in UTF-16 code units
pub const SUBTITLE_MAX_LENGTH: usize = 120;

/// Which input a [`FieldError`] belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    /// The headline text
    Title,
    /// The details text
    Subtitle,
}

/// A single rule violation, carrying the message shown next to the field
#[derive(Error, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldError {
    /// Title length outside [`TITLE_LENGTH`]
    #[error("Title must be 3 to 50 characters.")]
    TitleLength {
        /// Length that was rejected
        len: usize,
    },

    /// Title has the right length but only whitespace
    #[error("Title cannot be blank.")]
    TitleBlank,

    /// Subtitle longer than [`SUBTITLE_MAX_LENGTH`]
    #[error("Details max 120 characters.")]
    SubtitleTooLong {
        /// Length that was rejected
        len: usize,
    },

    /// Subtitle empty or whitespace-only
    #[error("Details cannot be blank.")]
    SubtitleBlank,
}

impl FieldError {
    /// The field this error belongs to
    #[must_use]
    pub const fn field(&self) -> Field {
        match self {
            Self::TitleLength { .. } | Self::TitleBlank => Field::Title,
            Self::SubtitleTooLong { .. } | Self::SubtitleBlank => Field::Subtitle,
        }
    }
}

/// Every rule violation found in a title/subtitle pair
///
/// Never empty when returned from [`validate`].
#[derive(Error, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[error("{}", join_messages(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    /// The error for one field, if that field failed
    #[must_use]
    pub fn for_field(&self, field: Field) -> Option<&FieldError> {
        self.0.iter().find(|error| error.field() == field)
    }

    /// Iterate over the errors, title first
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

fn text_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Check a title, reporting the first rule it breaks
///
/// The length rule is checked first, so empty text reports a length error.
///
/// # Errors
///
/// [`FieldError::TitleLength`] or [`FieldError::TitleBlank`].
pub fn check_title(text: &str) -> Result<(), FieldError> {
    let len = text_len(text);
    if !TITLE_LENGTH.contains(&len) {
        return Err(FieldError::TitleLength { len });
    }
    if is_blank(text) {
        return Err(FieldError::TitleBlank);
    }
    Ok(())
}

/// Check a subtitle, reporting the first rule it breaks
///
/// # Errors
///
/// [`FieldError::SubtitleTooLong`] or [`FieldError::SubtitleBlank`].
pub fn check_subtitle(text: &str) -> Result<(), FieldError> {
    let len = text_len(text);
    if len > SUBTITLE_MAX_LENGTH {
        return Err(FieldError::SubtitleTooLong { len });
    }
    if is_blank(text) {
        return Err(FieldError::SubtitleBlank);
    }
    Ok(())
}

/// True iff the title is 3–50 characters and not blank
#[must_use]
pub fn validate_title(text: &str) -> bool {
    check_title(text).is_ok()
}

/// True iff the subtitle is at most 120 characters and not blank
#[must_use]
pub fn validate_subtitle(text: &str) -> bool {
    check_subtitle(text).is_ok()
}

/// Check both fields independently
///
/// # Errors
///
/// Returns every field error found, title first.
pub fn validate(title: &str, subtitle: &str) -> Result<(), ValidationErrors> {
    let errors: Vec<FieldError> = [check_title(title).err(), check_subtitle(subtitle).err()]
        .into_iter()
        .flatten()
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}
