//! Reducer logic for the to-do list.
//!
//! Commands are validated against the current state. A valid command answers
//! with the event describing the change; a rejected one answers with
//! `ValidationFailed` or `NotFound`. State only changes when an event is
//! reduced, which the runtime does right after the command.

use crate::types::{IdPolicy, TodoAction, TodoId, TodoItem, TodoState};
use crate::validation;
use checklist_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

/// Environment dependencies for the to-do reducer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TodoEnvironment {
    /// How new items get their id
    pub id_policy: IdPolicy,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub const fn new(id_policy: IdPolicy) -> Self {
        Self { id_policy }
    }
}

/// Reducer for the to-do list
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn emit(event: TodoAction) -> SmallVec<[Effect<TodoAction>; 4]> {
        smallvec![Effect::send(event)]
    }

    fn add(state: &TodoState, title: String, subtitle: String, env: &TodoEnvironment) -> TodoAction {
        if let Err(errors) = validation::validate(&title, &subtitle) {
            tracing::debug!(%errors, "Rejected AddTodo");
            return TodoAction::ValidationFailed { errors };
        }

        let id = state.peek_id(env.id_policy);
        TodoAction::TodoAdded {
            item: TodoItem::new(id, title, subtitle),
        }
    }

    fn update(state: &TodoState, id: TodoId, title: String, subtitle: String) -> TodoAction {
        if !state.exists(id) {
            tracing::debug!(%id, "Rejected UpdateTodo: not found");
            return TodoAction::NotFound { id };
        }

        if let Err(errors) = validation::validate(&title, &subtitle) {
            tracing::debug!(%id, %errors, "Rejected UpdateTodo");
            return TodoAction::ValidationFailed { errors };
        }

        TodoAction::TodoUpdated { id, title, subtitle }
    }

    fn toggle(state: &TodoState, id: TodoId) -> TodoAction {
        match state.get(id) {
            Some(item) => TodoAction::DoneToggled { id, done: !item.done },
            None => {
                tracing::debug!(%id, "Rejected ToggleDone: not found");
                TodoAction::NotFound { id }
            },
        }
    }

    fn remove(state: &TodoState, id: TodoId) -> TodoAction {
        match state.get(id) {
            Some(item) => TodoAction::TodoRemoved { item: item.clone() },
            None => {
                tracing::debug!(%id, "Ignored RemoveTodo: not found");
                TodoAction::NotFound { id }
            },
        }
    }

    /// Applies an event to state
    fn apply_event(state: &mut TodoState, action: TodoAction) {
        match action {
            TodoAction::TodoAdded { item } => {
                state.next_id = state.next_id.max(item.id.get().saturating_add(1));
                state.items.push(item);
                state.last_error = None;
                state.bump_revision();
            },
            TodoAction::TodoUpdated { id, title, subtitle } => {
                if let Some(item) = state.get_mut(id) {
                    item.title = title;
                    item.subtitle = subtitle;
                    state.bump_revision();
                }
                state.last_error = None;
            },
            TodoAction::DoneToggled { id, done } => {
                if let Some(item) = state.get_mut(id) {
                    item.done = done;
                    state.bump_revision();
                }
                state.last_error = None;
            },
            TodoAction::TodoRemoved { item } => {
                if let Some(index) = state.position(item.id) {
                    state.items.remove(index);
                    state.bump_revision();
                }
                state.last_error = None;
            },
            TodoAction::ValidationFailed { errors } => {
                state.last_error = Some(errors.to_string());
            },
            TodoAction::NotFound { id } => {
                state.last_error = Some(format!("Todo {id} not found"));
            },
            // Commands are not applied to state
            TodoAction::AddTodo { .. }
            | TodoAction::UpdateTodo { .. }
            | TodoAction::ToggleDone { .. }
            | TodoAction::RemoveTodo { .. } => {},
        }
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            TodoAction::AddTodo { title, subtitle } => {
                Self::emit(Self::add(state, title, subtitle, env))
            },
            TodoAction::UpdateTodo { id, title, subtitle } => {
                Self::emit(Self::update(state, id, title, subtitle))
            },
            TodoAction::ToggleDone { id } => Self::emit(Self::toggle(state, id)),
            TodoAction::RemoveTodo { id } => Self::emit(Self::remove(state, id)),

            // ========== Events ==========
            event => {
                Self::apply_event(state, event);
                SmallVec::new()
            },
        }
    }
}
