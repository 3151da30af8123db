//! In-memory to-do list built on the Checklist architecture.
//!
//! The crate provides:
//!
//! - [`ItemStore`]: ordered, observable list of items backed by a reducer
//! - [`validation`]: pure title/subtitle rules with their user-facing messages
//! - [`FormState`]: per-field inline validation for the add and edit forms
//! - [`Route`] and [`Navigator`]: typed screen routing with a back stack
//! - [`App`]: the three-screen flow driven by user [`Intent`]s
//!
//! # Quick Start
//!
//! ```
//! use todo::{IdPolicy, ItemStore};
//!
//! # fn example() -> Result<(), todo::TodoError> {
//! let mut store = ItemStore::new(IdPolicy::Monotonic);
//! let mut snapshots = store.subscribe();
//!
//! let item = store.add("Buy milk", "2% milk, 1 gallon")?;
//! store.toggle_done(item.id)?;
//!
//! assert_eq!(store.done_count(), 1);
//! assert!(snapshots.has_changed().unwrap_or(false));
//! assert!(store.add("Hi", "x").is_err());
//! # Ok(())
//! # }
//! # example().ok();
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod form;
pub mod navigation;
pub mod reducer;
pub mod store;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use app::{App, Intent, Screen};
pub use config::{AppConfig, ConfigError};
pub use error::TodoError;
pub use form::{Draft, FormMode, FormState};
pub use navigation::{Navigator, Route, RouteParseError};
pub use reducer::{TodoEnvironment, TodoReducer};
pub use store::{ItemStore, TodoStore};
pub use types::{IdPolicy, TodoAction, TodoId, TodoItem, TodoState};
pub use validation::{Field, FieldError, ValidationErrors, validate_subtitle, validate_title};
