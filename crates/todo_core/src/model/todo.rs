//! Todo domain model.
//!
//! # Responsibility
//! - Define the canonical todo record and its wire shape.
//! - Define `FilterMode` and the predicate it applies.
//!
//! # Invariants
//! - `text` is immutable after construction; only `completed` changes.
//! - Wire fields are `id`, `text`, `completed`, `createdAt`; unknown fields
//!   are ignored on read and missing optional ones take defaults.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Stable integer identifier of a todo within one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(i64);

impl TodoId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl Display for TodoId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for TodoId {
    type Err = std::num::ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.trim().parse::<i64>().map(Self)
    }
}

/// Validation failures for todo construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    /// Text was empty after trimming surrounding whitespace.
    EmptyText,
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "todo text cannot be empty"),
        }
    }
}

impl Error for TodoValidationError {}

/// One task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    /// Trimmed task text.
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    /// RFC 3339 creation timestamp. Kept as the persisted string so records
    /// written by other clients round-trip untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Todo {
    /// Creates an active todo from raw user input.
    ///
    /// # Errors
    /// - `TodoValidationError::EmptyText` when `text` is blank after trimming.
    pub fn new(
        id: TodoId,
        text: &str,
        created_at: impl Into<String>,
    ) -> Result<Self, TodoValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TodoValidationError::EmptyText);
        }

        Ok(Self {
            id,
            text: text.to_string(),
            completed: false,
            created_at: Some(created_at.into()),
        })
    }

    /// Flips the completion flag and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }

    pub fn is_active(&self) -> bool {
        !self.completed
    }
}

/// Which subset of todos a list view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Every todo.
    #[default]
    All,
    /// Todos not yet completed.
    Active,
    /// Completed todos.
    Completed,
}

impl FilterMode {
    pub const ALL_MODES: [FilterMode; 3] = [Self::All, Self::Active, Self::Completed];

    /// Returns whether `todo` belongs to this filter's subset.
    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Active => !todo.completed,
            Self::Completed => todo.completed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl Display for FilterMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a filter name is not one of `all|active|completed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFilterMode(pub String);

impl Display for UnknownFilterMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown filter `{}`; expected all|active|completed",
            self.0
        )
    }
}

impl Error for UnknownFilterMode {}

impl FromStr for FilterMode {
    type Err = UnknownFilterMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(UnknownFilterMode(other.to_string())),
        }
    }
}
