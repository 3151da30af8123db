//! Screen routing for the to-do app.
//!
//! Routes are typed values. The string forms (`todoList`, `addTodo`,
//! `editTodo/{id}`) exist only for logging and for parsing at the boundary.

use crate::types::TodoId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// A screen the app can show
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    /// The list of all items
    List,
    /// Form for a new item
    Add,
    /// Form for an existing item
    Edit {
        /// Item being edited
        item_id: TodoId,
    },
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::List => write!(f, "todoList"),
            Self::Add => write!(f, "addTodo"),
            Self::Edit { item_id } => write!(f, "editTodo/{item_id}"),
        }
    }
}

/// Error for a string that names no route
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteParseError {
    /// Not one of the known route names
    #[error("unknown route {0:?}")]
    Unknown(String),

    /// `editTodo/` followed by something other than an id
    #[error("invalid item id {0:?} in edit route")]
    InvalidId(String),
}

impl FromStr for Route {
    type Err = RouteParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todoList" => Ok(Self::List),
            "addTodo" => Ok(Self::Add),
            _ => {
                let raw = s
                    .strip_prefix("editTodo/")
                    .ok_or_else(|| RouteParseError::Unknown(s.to_string()))?;
                let item_id = raw
                    .parse()
                    .map_err(|_| RouteParseError::InvalidId(raw.to_string()))?;
                Ok(Self::Edit { item_id })
            },
        }
    }
}

/// Back stack of routes, rooted at [`Route::List`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Navigator {
    /// Creates a navigator showing the list
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: vec![Route::List],
        }
    }

    /// Route on top of the stack
    #[must_use]
    pub fn current(&self) -> Route {
        self.stack.last().copied().unwrap_or(Route::List)
    }

    /// Pushes a route
    pub fn navigate(&mut self, route: Route) {
        tracing::debug!(from = %self.current(), to = %route, "Navigate");
        self.stack.push(route);
    }

    /// Returns to the previous route
    ///
    /// Returns `false`, leaving the stack alone, when already at the root.
    pub fn pop_back(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        let left = self.stack.pop();
        tracing::debug!(?left, to = %self.current(), "Back");
        true
    }

    /// Number of routes on the stack, root included
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
