//! Configuration for the to-do app.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::types::{IdPolicy, UnknownIdPolicy};
use checklist_runtime::StoreConfig;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Environment variable selecting the id policy
pub const ID_POLICY_VAR: &str = "TODO_ID_POLICY";
/// Environment variable holding the tracing filter directive
pub const LOG_VAR: &str = "TODO_LOG";
/// Environment variable bounding the effect feedback loop
pub const MAX_FEEDBACK_DEPTH_VAR: &str = "TODO_MAX_FEEDBACK_DEPTH";

/// Default tracing filter
pub const DEFAULT_LOG_FILTER: &str = "todo=info,checklist_runtime=info";

/// Error for an environment value that cannot be used
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `TODO_ID_POLICY` names no policy
    #[error("{ID_POLICY_VAR}: {0}")]
    IdPolicy(#[from] UnknownIdPolicy),

    /// `TODO_MAX_FEEDBACK_DEPTH` is not a positive integer
    #[error("{MAX_FEEDBACK_DEPTH_VAR}: expected a positive integer, got {0:?}")]
    MaxFeedbackDepth(String),
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// How new items get their id
    pub id_policy: IdPolicy,
    /// Tracing filter directive (`EnvFilter` syntax)
    pub log_filter: String,
    /// Maximum depth of effect feedback per command
    pub max_feedback_depth: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            id_policy: IdPolicy::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            max_feedback_depth: StoreConfig::default().max_feedback_depth,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    ///
    /// Unset variables fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an unusable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let id_policy = match lookup(ID_POLICY_VAR) {
            Some(raw) => raw.parse()?,
            None => defaults.id_policy,
        };

        let log_filter = lookup(LOG_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.log_filter);

        let max_feedback_depth = match lookup(MAX_FEEDBACK_DEPTH_VAR) {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(depth) if depth > 0 => depth,
                _ => return Err(ConfigError::MaxFeedbackDepth(raw)),
            },
            None => defaults.max_feedback_depth,
        };

        Ok(Self {
            id_policy,
            log_filter,
            max_feedback_depth,
        })
    }

    /// Runtime configuration for the store
    #[must_use]
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::default().with_max_feedback_depth(self.max_feedback_depth)
    }
}
