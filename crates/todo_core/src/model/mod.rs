//! Domain model for the todo list.
//!
//! # Responsibility
//! - Define the record shape persisted by the store.
//! - Define the filter modes used by list views.
//!
//! # Invariants
//! - Every todo is identified by a `TodoId` that is never reused.
//! - Text is trimmed and non-empty for records created through this crate.

pub mod todo;
