//! Domain types for the to-do list.
//!
//! A to-do list is an ordered collection of items that can be added,
//! edited, checked off, and deleted. Commands describe what a user asked
//! for; events describe what the store actually did.

use crate::validation::ValidationErrors;
use checklist_macros::{Action, State};
use serde::{Deserialize, Serialize};
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of a to-do item, assigned by the store
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TodoId(u32);

impl TodoId {
    /// Creates a `TodoId` from its raw value
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw value
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TodoId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// A single to-do item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Identifier, fixed at creation
    pub id: TodoId,
    /// Headline, 3–50 UTF-16 code units
    pub title: String,
    /// Details, up to 120 UTF-16 code units
    pub subtitle: String,
    /// Whether the item is checked off
    pub done: bool,
}

impl TodoItem {
    /// Creates a new, unchecked item
    #[must_use]
    pub const fn new(id: TodoId, title: String, subtitle: String) -> Self {
        Self {
            id,
            title,
            subtitle,
            done: false,
        }
    }
}

/// How the store picks the id of a new item
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdPolicy {
    /// A counter that only grows; ids are never reused
    #[default]
    Monotonic,
    /// The number of items currently stored
    ///
    /// After a delete this hands out an id that may still be in use, so two
    /// items can share an id. Lookups then resolve to the earlier item.
    SizeDerived,
}

impl std::fmt::Display for IdPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Monotonic => write!(f, "monotonic"),
            Self::SizeDerived => write!(f, "size-derived"),
        }
    }
}

/// Error for an unrecognised [`IdPolicy`] name
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown id policy {0:?} (expected \"monotonic\" or \"size-derived\")")]
pub struct UnknownIdPolicy(pub String);

impl FromStr for IdPolicy {
    type Err = UnknownIdPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monotonic" => Ok(Self::Monotonic),
            "size-derived" | "size_derived" | "size" => Ok(Self::SizeDerived),
            other => Err(UnknownIdPolicy(other.to_string())),
        }
    }
}

/// State of the to-do list
#[derive(State, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// All items, in insertion order
    pub items: Vec<TodoItem>,
    /// Next id for [`IdPolicy::Monotonic`]; always above every id issued
    pub next_id: u32,
    /// Message of the most recently rejected command, if any
    pub last_error: Option<String>,
    /// Bumped whenever `items` changes
    #[revision]
    pub revision: u64,
}

impl TodoState {
    /// Creates a new empty state
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 0,
            last_error: None,
            revision: 0,
        }
    }

    /// Returns the number of items
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns the number of checked-off items
    #[must_use]
    pub fn done_count(&self) -> usize {
        self.items.iter().filter(|item| item.done).count()
    }

    /// Returns the first item with this id
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Checks if an item exists
    #[must_use]
    pub fn exists(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn get_mut(&mut self, id: TodoId) -> Option<&mut TodoItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    pub(crate) fn position(&self, id: TodoId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// The id the next added item receives under `policy`
    #[must_use]
    pub fn peek_id(&self, policy: IdPolicy) -> TodoId {
        match policy {
            IdPolicy::Monotonic => TodoId::new(self.next_id),
            // Item counts beyond u32 are not reachable in an in-memory list
            IdPolicy::SizeDerived => {
                TodoId::new(u32::try_from(self.items.len()).unwrap_or(u32::MAX))
            },
        }
    }
}

/// Actions representing commands and events for the to-do list
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoAction {
    // ========== Commands ==========
    /// Command: Add a new item at the end of the list
    #[command]
    AddTodo {
        /// Headline
        title: String,
        /// Details
        subtitle: String,
    },

    /// Command: Replace an item's title and subtitle
    #[command]
    UpdateTodo {
        /// Item to edit
        id: TodoId,
        /// New headline
        title: String,
        /// New details
        subtitle: String,
    },

    /// Command: Flip an item's done flag
    #[command]
    ToggleDone {
        /// Item to toggle
        id: TodoId,
    },

    /// Command: Delete an item permanently
    #[command]
    RemoveTodo {
        /// Item to delete
        id: TodoId,
    },

    // ========== Events ==========
    /// Event: Item was appended
    #[event]
    TodoAdded {
        /// The new item
        item: TodoItem,
    },

    /// Event: Item text was replaced
    #[event]
    TodoUpdated {
        /// Edited item
        id: TodoId,
        /// New headline
        title: String,
        /// New details
        subtitle: String,
    },

    /// Event: Item's done flag was flipped
    #[event]
    DoneToggled {
        /// Toggled item
        id: TodoId,
        /// Value after the flip
        done: bool,
    },

    /// Event: Item was deleted
    #[event]
    TodoRemoved {
        /// The deleted item
        item: TodoItem,
    },

    /// Event: A command carried invalid text
    #[event]
    ValidationFailed {
        /// Every rule the text broke
        errors: ValidationErrors,
    },

    /// Event: A command referenced an id that is not in the list
    #[event]
    NotFound {
        /// The missing id
        id: TodoId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_id_display_and_parse() {
        let id = TodoId::new(7);
        assert_eq!(id.to_string(), "7");
        assert_eq!("7".parse::<TodoId>(), Ok(id));
        assert!("seven".parse::<TodoId>().is_err());
        assert!("-1".parse::<TodoId>().is_err());
    }

    #[test]
    fn todo_item_new() {
        let item = TodoItem::new(TodoId::new(0), "Buy milk".to_string(), "2%".to_string());

        assert_eq!(item.id, TodoId::new(0));
        assert_eq!(item.title, "Buy milk");
        assert_eq!(item.subtitle, "2%");
        assert!(!item.done);
    }

    #[test]
    fn todo_state_counts() {
        let mut state = TodoState::new();
        assert_eq!(state.count(), 0);
        assert_eq!(state.done_count(), 0);

        state.items.push(TodoItem::new(TodoId::new(0), "One".into(), "a".into()));
        let mut done = TodoItem::new(TodoId::new(1), "Two".into(), "b".into());
        done.done = true;
        state.items.push(done);

        assert_eq!(state.count(), 2);
        assert_eq!(state.done_count(), 1);
        assert!(state.exists(TodoId::new(1)));
        assert!(!state.exists(TodoId::new(2)));
    }

    #[test]
    fn get_returns_first_match_for_duplicate_ids() {
        let mut state = TodoState::new();
        state.items.push(TodoItem::new(TodoId::new(0), "First".into(), "a".into()));
        state.items.push(TodoItem::new(TodoId::new(0), "Second".into(), "b".into()));

        assert_eq!(state.get(TodoId::new(0)).map(|item| item.title.as_str()), Some("First"));
    }

    #[test]
    fn peek_id_per_policy() {
        let mut state = TodoState::new();
        state.items.push(TodoItem::new(TodoId::new(4), "Kept".into(), "a".into()));
        state.next_id = 5;

        assert_eq!(state.peek_id(IdPolicy::Monotonic), TodoId::new(5));
        assert_eq!(state.peek_id(IdPolicy::SizeDerived), TodoId::new(1));
    }

    #[test]
    fn id_policy_parse() {
        assert_eq!("monotonic".parse(), Ok(IdPolicy::Monotonic));
        assert_eq!(" Size-Derived ".parse(), Ok(IdPolicy::SizeDerived));
        assert_eq!(
            "random".parse::<IdPolicy>(),
            Err(UnknownIdPolicy("random".to_string()))
        );
        assert_eq!(IdPolicy::SizeDerived.to_string(), "size-derived");
    }

    #[test]
    fn todo_action_classification() {
        let command = TodoAction::AddTodo {
            title: "Test".to_string(),
            subtitle: "x".to_string(),
        };
        assert!(command.is_command());
        assert!(!command.is_event());
        assert_eq!(command.name(), "AddTodo");

        let event = TodoAction::NotFound { id: TodoId::new(3) };
        assert!(event.is_event());
        assert!(!event.is_command());
        assert_eq!(event.name(), "NotFound");
    }
}
