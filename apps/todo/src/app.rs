//! App shell tying the store, navigation and form together.
//!
//! A front end feeds user [`Intent`]s into [`App::dispatch`] and draws
//! whatever [`App::screen`] returns.

use crate::config::AppConfig;
use crate::error::TodoError;
use crate::form::{FormMode, FormState};
use crate::navigation::{Navigator, Route};
use crate::store::ItemStore;
use crate::types::{TodoId, TodoItem};

/// Something the user did
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Tapped the add button on the list
    OpenAdd,
    /// Tapped an item on the list
    OpenEdit(TodoId),
    /// Pressed back
    Back,
    /// Typed in the title field
    TitleChanged(String),
    /// Typed in the details field
    SubtitleChanged(String),
    /// Pressed the form's submit button
    Submit,
    /// Tapped an item's checkbox
    ToggleDone(TodoId),
    /// Tapped an item's delete button
    Delete(TodoId),
}

/// What to draw for the current route
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen<'a> {
    /// The list of items
    List {
        /// Top bar text
        title: &'static str,
        /// Items in display order
        items: &'a [TodoItem],
    },
    /// The add or edit form
    Form {
        /// Top bar text
        title: &'static str,
        /// Submit button text
        submit_label: &'static str,
        /// Field text and inline errors
        form: &'a FormState,
    },
    /// Nothing; shown for an edit route whose item does not exist
    Blank,
}

/// The to-do app
#[derive(Debug)]
pub struct App {
    store: ItemStore,
    navigator: Navigator,
    form: Option<FormState>,
}

impl App {
    /// Creates an app with an empty store built from `config`
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self::with_store(ItemStore::with_config(config.id_policy, config.store_config()))
    }

    /// Creates an app around an existing store, showing the list
    #[must_use]
    pub fn with_store(store: ItemStore) -> Self {
        Self {
            store,
            navigator: Navigator::new(),
            form: None,
        }
    }

    /// Handles one user intent
    ///
    /// An invalid submit is not an error: the form stays open and shows its
    /// field errors.
    ///
    /// Toggling or deleting an item that no longer exists is ignored.
    ///
    /// # Errors
    ///
    /// Runtime failures from the store.
    pub fn dispatch(&mut self, intent: Intent) -> Result<(), TodoError> {
        tracing::debug!(?intent, route = %self.navigator.current(), "Dispatch intent");

        match intent {
            Intent::OpenAdd => {
                self.form = Some(FormState::for_add());
                self.navigator.navigate(Route::Add);
            },
            Intent::OpenEdit(item_id) => {
                self.form = self.store.find_by_id(item_id).map(FormState::for_edit);
                self.navigator.navigate(Route::Edit { item_id });
            },
            Intent::Back => self.back(),
            Intent::TitleChanged(text) => {
                if let Some(form) = self.form.as_mut() {
                    form.set_title(text);
                }
            },
            Intent::SubtitleChanged(text) => {
                if let Some(form) = self.form.as_mut() {
                    form.set_subtitle(text);
                }
            },
            Intent::Submit => self.submit()?,
            Intent::ToggleDone(id) => match self.store.toggle_done(id) {
                Ok(_) => {},
                Err(TodoError::NotFound(id)) => {
                    tracing::debug!(%id, "Toggle ignored: item no longer exists");
                },
                Err(error) => return Err(error),
            },
            Intent::Delete(id) => {
                self.store.remove(id)?;
            },
        }
        Ok(())
    }

    fn back(&mut self) {
        if self.navigator.pop_back() && self.navigator.current() == Route::List {
            self.form = None;
        }
    }

    fn submit(&mut self) -> Result<(), TodoError> {
        let Some(form) = self.form.as_mut() else {
            tracing::debug!("Submit ignored: no form open");
            return Ok(());
        };

        let draft = match form.submit() {
            Ok(draft) => draft,
            Err(errors) => {
                tracing::debug!(%errors, "Submit rejected");
                return Ok(());
            },
        };

        match form.mode() {
            FormMode::Add => {
                self.store.add(draft.title, draft.subtitle)?;
            },
            FormMode::Edit(id) => {
                self.store.update(id, draft.title, draft.subtitle)?;
            },
        }
        self.back();
        Ok(())
    }

    /// Render model for the current route
    #[must_use]
    pub fn screen(&self) -> Screen<'_> {
        match self.navigator.current() {
            Route::List => Screen::List {
                title: "Todo List",
                items: self.store.list(),
            },
            Route::Add | Route::Edit { .. } => match &self.form {
                Some(form) => {
                    let (title, submit_label) = match form.mode() {
                        FormMode::Add => ("Add Todo", "Add Todo"),
                        FormMode::Edit(_) => ("Edit Todo", "Save Todo"),
                    };
                    Screen::Form {
                        title,
                        submit_label,
                        form,
                    }
                },
                None => Screen::Blank,
            },
        }
    }

    /// The item store
    #[must_use]
    pub const fn store(&self) -> &ItemStore {
        &self.store
    }

    /// The navigation back stack
    #[must_use]
    pub const fn navigator(&self) -> &Navigator {
        &self.navigator
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}
