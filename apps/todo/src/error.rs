//! Error types for the to-do list.

use crate::types::TodoId;
use crate::validation::ValidationErrors;
use checklist_runtime::StoreError;
use thiserror::Error;

/// Errors returned by [`crate::ItemStore`] and [`crate::App`]
///
/// None of these are fatal: validation failures are shown next to the
/// fields, and a missing item simply renders nothing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// Title or subtitle broke a rule
    #[error("invalid todo: {0}")]
    Validation(#[from] ValidationErrors),

    /// The id does not belong to any item
    #[error("Todo {0} not found")]
    NotFound(TodoId),

    /// The runtime could not finish processing the command
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A command was processed but produced no recognisable event
    #[error("{0} produced no outcome")]
    MissingOutcome(&'static str),
}
