//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value contract the todo store persists through.
//! - Isolate SQLite query details from store and session logic.
//!
//! # Invariants
//! - A `set` replaces any prior value under the same key atomically.
//! - Repository APIs distinguish schema problems from transport errors.

pub mod kv_repo;
