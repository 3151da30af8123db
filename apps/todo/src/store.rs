//! The item store: the single owner of the to-do list.
//!
//! [`ItemStore`] wraps the runtime [`Store`] with the to-do reducer and turns
//! each call into a command. The event the command produced decides the
//! return value, so callers get plain `Result`s instead of inspecting
//! actions.

use crate::error::TodoError;
use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::types::{IdPolicy, TodoAction, TodoId, TodoItem, TodoState};
use checklist_runtime::{Store, StoreConfig};
use tokio::sync::{broadcast, watch};

/// Runtime store specialised for the to-do list
pub type TodoStore = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

/// Ordered, observable collection of to-do items
pub struct ItemStore {
    inner: TodoStore,
}

impl ItemStore {
    /// Creates an empty store with the given id policy
    #[must_use]
    pub fn new(id_policy: IdPolicy) -> Self {
        Self::with_config(id_policy, StoreConfig::default())
    }

    /// Creates an empty store with a custom runtime configuration
    #[must_use]
    pub fn with_config(id_policy: IdPolicy, config: StoreConfig) -> Self {
        Self {
            inner: Store::with_config(
                TodoState::new(),
                TodoReducer::new(),
                TodoEnvironment::new(id_policy),
                config,
            ),
        }
    }

    /// Sends a command and returns the single event it produced
    fn dispatch(&mut self, command: TodoAction) -> Result<TodoAction, TodoError> {
        let name = command.name();
        self.inner
            .send(command)?
            .into_iter()
            .find(TodoAction::is_event)
            .ok_or(TodoError::MissingOutcome(name))
    }

    /// Appends a new, unchecked item
    ///
    /// # Errors
    ///
    /// [`TodoError::Validation`] if either text breaks its rule; the list is
    /// unchanged.
    pub fn add(&mut self, title: impl Into<String>, subtitle: impl Into<String>) -> Result<TodoItem, TodoError> {
        let outcome = self.dispatch(TodoAction::AddTodo {
            title: title.into(),
            subtitle: subtitle.into(),
        })?;

        match outcome {
            TodoAction::TodoAdded { item } => {
                tracing::debug!(id = %item.id, "Added todo");
                Ok(item)
            },
            other => Err(Self::failure(other, "AddTodo")),
        }
    }

    /// Replaces the title and subtitle of an item; `id` and `done` are kept
    ///
    /// # Errors
    ///
    /// [`TodoError::NotFound`] if no item has this id, otherwise
    /// [`TodoError::Validation`] if the text is invalid.
    pub fn update(
        &mut self,
        id: TodoId,
        title: impl Into<String>,
        subtitle: impl Into<String>,
    ) -> Result<TodoItem, TodoError> {
        let outcome = self.dispatch(TodoAction::UpdateTodo {
            id,
            title: title.into(),
            subtitle: subtitle.into(),
        })?;

        match outcome {
            TodoAction::TodoUpdated { id, .. } => self.expect_present(id),
            other => Err(Self::failure(other, "UpdateTodo")),
        }
    }

    /// Flips the done flag of an item
    ///
    /// # Errors
    ///
    /// [`TodoError::NotFound`] if no item has this id.
    pub fn toggle_done(&mut self, id: TodoId) -> Result<TodoItem, TodoError> {
        match self.dispatch(TodoAction::ToggleDone { id })? {
            TodoAction::DoneToggled { id, .. } => self.expect_present(id),
            other => Err(Self::failure(other, "ToggleDone")),
        }
    }

    /// Deletes an item permanently, returning it
    ///
    /// Removing an id that is not in the list is a no-op and returns `None`.
    ///
    /// # Errors
    ///
    /// Only runtime failures ([`TodoError::Store`]).
    pub fn remove(&mut self, id: TodoId) -> Result<Option<TodoItem>, TodoError> {
        match self.dispatch(TodoAction::RemoveTodo { id })? {
            TodoAction::TodoRemoved { item } => Ok(Some(item)),
            TodoAction::NotFound { .. } => Ok(None),
            other => Err(Self::failure(other, "RemoveTodo")),
        }
    }

    /// Looks up the first item with this id
    #[must_use]
    pub fn find_by_id(&self, id: TodoId) -> Option<&TodoItem> {
        self.state().get(id)
    }

    /// All items, in insertion order
    #[must_use]
    pub fn list(&self) -> &[TodoItem] {
        &self.state().items
    }

    /// Number of items
    #[must_use]
    pub fn count(&self) -> usize {
        self.state().count()
    }

    /// Number of checked-off items
    #[must_use]
    pub fn done_count(&self) -> usize {
        self.state().done_count()
    }

    /// Current state, including the last rejection message
    #[must_use]
    pub const fn state(&self) -> &TodoState {
        self.inner.state()
    }

    /// The id policy this store was created with
    #[must_use]
    pub const fn id_policy(&self) -> IdPolicy {
        self.inner.environment().id_policy
    }

    /// Subscribe to state snapshots, published after every operation
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<TodoState> {
        self.inner.subscribe_state()
    }

    /// Subscribe to the events the store produces
    #[must_use]
    pub fn subscribe_events(&self) -> broadcast::Receiver<TodoAction> {
        self.inner.subscribe_actions()
    }

    fn expect_present(&self, id: TodoId) -> Result<TodoItem, TodoError> {
        self.find_by_id(id).cloned().ok_or(TodoError::NotFound(id))
    }

    fn failure(outcome: TodoAction, command: &'static str) -> TodoError {
        match outcome {
            TodoAction::ValidationFailed { errors } => TodoError::Validation(errors),
            TodoAction::NotFound { id } => TodoError::NotFound(id),
            _ => TodoError::MissingOutcome(command),
        }
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new(IdPolicy::default())
    }
}

impl std::fmt::Debug for ItemStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemStore")
            .field("id_policy", &self.id_policy())
            .field("state", self.state())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)] // Test code can unwrap/panic
mod tests {
    use super::*;
    use crate::validation::{Field, FieldError};

    #[test]
    fn add_then_find() {
        let mut store = ItemStore::default();

        let item = store.add("Buy milk", "2% milk, 1 gallon").unwrap();

        assert_eq!(item.id, TodoId::new(0));
        assert!(!item.done);
        assert_eq!(store.find_by_id(item.id), Some(&item));
        assert_eq!(store.list(), std::slice::from_ref(&item));
    }

    #[test]
    fn invalid_add_leaves_store_unchanged() {
        let mut store = ItemStore::default();

        let error = store.add("Hi", "x").unwrap_err();

        let TodoError::Validation(errors) = &error else {
            panic!("expected validation error, got {error:?}");
        };
        assert_eq!(errors.for_field(Field::Title), Some(&FieldError::TitleLength { len: 2 }));
        assert_eq!(store.count(), 0);
        assert_eq!(store.state().revision(), 0);
        assert!(store.state().last_error.is_some());
    }

    #[test]
    fn toggle_twice_restores_done() {
        let mut store = ItemStore::default();
        let id = store.add("Buy milk", "2%").unwrap().id;

        assert!(store.toggle_done(id).unwrap().done);
        assert!(!store.toggle_done(id).unwrap().done);
    }

    #[test]
    fn operations_on_missing_id() {
        let mut store = ItemStore::default();
        let missing = TodoId::new(42);

        assert_eq!(store.toggle_done(missing), Err(TodoError::NotFound(missing)));
        assert_eq!(
            store.update(missing, "Valid title", "details"),
            Err(TodoError::NotFound(missing))
        );
        assert_eq!(store.remove(missing), Ok(None));
        assert_eq!(store.find_by_id(missing), None);
    }

    #[test]
    fn size_derived_policy_reuses_ids() {
        let mut store = ItemStore::new(IdPolicy::SizeDerived);
        let first = store.add("First item", "details").unwrap();
        assert_eq!(store.remove(first.id).unwrap(), Some(first));

        let second = store.add("Second item", "details").unwrap();

        assert_eq!(second.id, TodoId::new(0));
    }

    #[test]
    fn monotonic_policy_never_reuses_ids() {
        let mut store = ItemStore::new(IdPolicy::Monotonic);
        let first = store.add("First item", "details").unwrap();
        store.remove(first.id).unwrap();

        let second = store.add("Second item", "details").unwrap();

        assert_eq!(second.id, TodoId::new(1));
    }

    #[test]
    fn subscribers_see_each_mutation() {
        let mut store = ItemStore::default();
        let mut snapshots = store.subscribe();
        let mut events = store.subscribe_events();

        let item = store.add("Buy milk", "2%").unwrap();

        assert!(snapshots.has_changed().unwrap());
        assert_eq!(snapshots.borrow_and_update().items, vec![item.clone()]);
        assert_eq!(events.try_recv().unwrap(), TodoAction::TodoAdded { item });
    }
}
