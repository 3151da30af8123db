//! Form state behind the add and edit screens.
//!
//! Each text change re-runs that field's rule and stores the resulting
//! message. Nothing is flagged before the first change, so a fresh add form
//! shows no errors even though its empty fields would not pass.

use crate::types::{TodoId, TodoItem};
use crate::validation::{self, Field, FieldError, ValidationErrors};
use serde::{Deserialize, Serialize};

/// What submitting the form will do
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormMode {
    /// Create a new item
    Add,
    /// Replace the text of an existing item
    Edit(TodoId),
}

/// Text accepted by [`FormState::submit`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    /// Headline
    pub title: String,
    /// Details
    pub subtitle: String,
}

/// Title/subtitle inputs with inline validation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    mode: FormMode,
    title: String,
    subtitle: String,
    title_error: Option<FieldError>,
    subtitle_error: Option<FieldError>,
}

impl FormState {
    /// Empty form for a new item
    #[must_use]
    pub const fn for_add() -> Self {
        Self {
            mode: FormMode::Add,
            title: String::new(),
            subtitle: String::new(),
            title_error: None,
            subtitle_error: None,
        }
    }

    /// Form pre-filled with an existing item's text
    #[must_use]
    pub fn for_edit(item: &TodoItem) -> Self {
        Self {
            mode: FormMode::Edit(item.id),
            title: item.title.clone(),
            subtitle: item.subtitle.clone(),
            title_error: None,
            subtitle_error: None,
        }
    }

    /// Whether this form adds or edits
    #[must_use]
    pub const fn mode(&self) -> FormMode {
        self.mode
    }

    /// Current title text
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Current subtitle text
    #[must_use]
    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    /// Message shown under a field, if any
    #[must_use]
    pub const fn error(&self, field: Field) -> Option<&FieldError> {
        match field {
            Field::Title => self.title_error.as_ref(),
            Field::Subtitle => self.subtitle_error.as_ref(),
        }
    }

    /// Replace the title text and re-check it
    pub fn set_title(&mut self, text: impl Into<String>) {
        self.title = text.into();
        self.title_error = validation::check_title(&self.title).err();
    }

    /// Replace the subtitle text and re-check it
    pub fn set_subtitle(&mut self, text: impl Into<String>) {
        self.subtitle = text.into();
        self.subtitle_error = validation::check_subtitle(&self.subtitle).err();
    }

    /// Whether the submit button is enabled
    ///
    /// Evaluates both rules on the current text, so untouched empty fields
    /// keep the button disabled without showing an error.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        validation::validate(&self.title, &self.subtitle).is_ok()
    }

    /// Re-validate both fields and hand out the text if it passes
    ///
    /// # Errors
    ///
    /// Returns the failing rules; they are also stored on the form so the
    /// fields show them.
    pub fn submit(&mut self) -> Result<Draft, ValidationErrors> {
        self.title_error = validation::check_title(&self.title).err();
        self.subtitle_error = validation::check_subtitle(&self.subtitle).err();

        validation::validate(&self.title, &self.subtitle)?;
        Ok(Draft {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
        })
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::for_add()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can unwrap
mod tests {
    use super::*;

    #[test]
    fn fresh_add_form_shows_nothing_but_cannot_submit() {
        let form = FormState::for_add();

        assert_eq!(form.error(Field::Title), None);
        assert_eq!(form.error(Field::Subtitle), None);
        assert!(!form.can_submit());
    }

    #[test]
    fn each_keystroke_revalidates_its_field() {
        let mut form = FormState::for_add();

        form.set_title("B");
        assert_eq!(form.error(Field::Title), Some(&FieldError::TitleLength { len: 1 }));
        assert_eq!(form.error(Field::Subtitle), None);

        form.set_title("Buy");
        assert_eq!(form.error(Field::Title), None);
        assert!(!form.can_submit());

        form.set_subtitle("2% milk");
        assert!(form.can_submit());

        form.set_subtitle("x".repeat(121));
        assert_eq!(
            form.error(Field::Subtitle),
            Some(&FieldError::SubtitleTooLong { len: 121 })
        );
        assert!(!form.can_submit());
    }

    #[test]
    fn submit_flags_untouched_fields() {
        let mut form = FormState::for_add();
        form.set_title("Buy milk");

        let errors = form.submit().unwrap_err();

        assert_eq!(errors.0, vec![FieldError::SubtitleBlank]);
        assert_eq!(form.error(Field::Subtitle), Some(&FieldError::SubtitleBlank));
    }

    #[test]
    fn submit_returns_draft_when_valid() {
        let mut form = FormState::for_add();
        form.set_title("Buy milk");
        form.set_subtitle("2% milk, 1 gallon");

        let draft = form.submit().unwrap();

        assert_eq!(
            draft,
            Draft {
                title: "Buy milk".to_string(),
                subtitle: "2% milk, 1 gallon".to_string(),
            }
        );
    }

    #[test]
    fn edit_form_is_prefilled() {
        let item = TodoItem::new(TodoId::new(3), "Walk dog".to_string(), "twice".to_string());

        let form = FormState::for_edit(&item);

        assert_eq!(form.mode(), FormMode::Edit(TodoId::new(3)));
        assert_eq!(form.title(), "Walk dog");
        assert_eq!(form.subtitle(), "twice");
        assert!(form.can_submit());
    }
}
