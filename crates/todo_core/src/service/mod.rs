//! Core use-case services.
//!
//! # Responsibility
//! - Turn UI-level commands into store operations.
//! - Keep UI layers decoupled from storage details.

pub mod todo_session;
