//! In-memory todo store and the pieces it is built from.
//!
//! # Responsibility
//! - Hold the session's todo sequence and persist it after each mutation.
//! - Allocate ids and timestamps from injectable sources.

pub mod clock;
pub mod id;
pub mod todo_store;
