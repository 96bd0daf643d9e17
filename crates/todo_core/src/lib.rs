//! Core domain logic for the todo list.
//! This crate is the single source of truth for todo invariants; front ends
//! talk to it through `TodoSession` commands.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod view;

pub use config::{ConfigError, ConfigOverrides, TodoConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::todo::{FilterMode, Todo, TodoId, TodoValidationError, UnknownFilterMode};
pub use repo::kv_repo::{
    KeyValueStore, MemoryKeyValueStore, RepoError, RepoResult, SqliteKeyValueStore,
};
pub use service::todo_session::{
    CommandOutcome, TodoCommand, TodoItemView, TodoSession, TodoView,
};
pub use store::clock::{Clock, FixedClock, SystemClock};
pub use store::todo_store::{TodoStore, DEFAULT_STORAGE_KEY};
pub use view::{empty_state_message, remaining_label, sample_todos};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
