//! Todo collection with persistence through a key-value store.
//!
//! # Responsibility
//! - Own the ordered todo sequence for one session.
//! - Apply add/toggle/delete/clear-completed and persist after each change.
//! - Answer filtered views and counters without mutating state.
//!
//! # Invariants
//! - Insertion order is display order; the sequence is never re-sorted.
//! - All ids are distinct, including after loading persisted data.
//! - The full sequence is written as one JSON array under one key.

use crate::model::todo::{FilterMode, Todo, TodoId};
use crate::repo::kv_repo::{KeyValueStore, RepoResult};
use crate::store::clock::{format_timestamp, Clock, SystemClock};
use crate::store::id::IdAllocator;
use log::{debug, error, info, warn};
use std::collections::HashSet;

/// Storage key used when the caller does not pick one.
pub const DEFAULT_STORAGE_KEY: &str = "todos";

/// Ordered todo collection bound to a key-value store.
pub struct TodoStore<S: KeyValueStore, C: Clock = SystemClock> {
    storage: S,
    clock: C,
    key: String,
    todos: Vec<Todo>,
    ids: IdAllocator,
}

impl<S: KeyValueStore> TodoStore<S, SystemClock> {
    /// Loads the store from `storage` under the default key using wall-clock time.
    pub fn load(storage: S) -> Self {
        Self::load_with(storage, DEFAULT_STORAGE_KEY, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> TodoStore<S, C> {
    /// Loads the store from `storage` under `key`.
    ///
    /// Absent, blank, or unparseable persisted data yields an empty store.
    /// Read failures are logged and also fall back to an empty store.
    pub fn load_with(storage: S, key: impl Into<String>, clock: C) -> Self {
        let key = key.into();
        let todos = read_persisted(&storage, &key);
        let ids = IdAllocator::seeded(todos.iter().map(|todo| &todo.id));
        Self {
            storage,
            clock,
            key,
            todos,
            ids,
        }
    }

    /// Re-reads persisted state, discarding in-memory changes.
    pub fn reload(&mut self) {
        self.todos = read_persisted(&self.storage, &self.key);
        for todo in &self.todos {
            self.ids.observe(todo.id);
        }
    }

    /// Adds a todo and persists. Blank text is ignored and returns `None`.
    pub fn add(&mut self, text: &str) -> RepoResult<Option<TodoId>> {
        let now = self.clock.now();
        let id = self.allocate_id(now.timestamp_millis());
        let todo = match Todo::new(id, text, format_timestamp(now)) {
            Ok(todo) => todo,
            Err(err) => {
                debug!("event=todo_add module=store status=skipped reason=invalid error={err}");
                return Ok(None);
            }
        };

        self.todos.push(todo);
        self.save()?;
        info!(
            "event=todo_add module=store status=ok id={} total={}",
            id,
            self.todos.len()
        );
        Ok(Some(id))
    }

    /// Flips `completed` on the todo with `id` and persists.
    ///
    /// Returns `false` without persisting when no todo has that id.
    pub fn toggle(&mut self, id: TodoId) -> RepoResult<bool> {
        let Some(todo) = self.todos.iter_mut().find(|todo| todo.id == id) else {
            debug!("event=todo_toggle module=store status=skipped reason=not_found id={id}");
            return Ok(false);
        };

        let completed = todo.toggle();
        self.save()?;
        info!("event=todo_toggle module=store status=ok id={id} completed={completed}");
        Ok(true)
    }

    /// Removes every todo with `id` and persists. Returns how many were removed.
    pub fn delete(&mut self, id: TodoId) -> RepoResult<usize> {
        let before = self.todos.len();
        self.todos.retain(|todo| todo.id != id);
        let removed = before - self.todos.len();
        self.save()?;
        info!("event=todo_delete module=store status=ok id={id} removed={removed}");
        Ok(removed)
    }

    /// Drops every completed todo and persists. Returns how many were removed.
    pub fn clear_completed(&mut self) -> RepoResult<usize> {
        let before = self.todos.len();
        self.todos.retain(Todo::is_active);
        let removed = before - self.todos.len();
        self.save()?;
        info!("event=todo_clear_completed module=store status=ok removed={removed}");
        Ok(removed)
    }

    /// Replaces the whole sequence and persists.
    ///
    /// Later duplicates of an id are dropped so ids stay distinct.
    pub fn replace_all(&mut self, todos: Vec<Todo>) -> RepoResult<()> {
        self.todos = dedup_ids(todos);
        for todo in &self.todos {
            self.ids.observe(todo.id);
        }
        self.save()
    }

    /// Next id from the allocator, or the smallest positive id not in use
    /// once the allocator has run past `i64::MAX`.
    fn allocate_id(&mut self, now_ms: i64) -> TodoId {
        if let Some(id) = self.ids.next(now_ms) {
            return id;
        }

        let used: HashSet<i64> = self.todos.iter().map(|todo| todo.id.get()).collect();
        let fallback = (1..=i64::MAX)
            .find(|candidate| !used.contains(candidate))
            .unwrap_or(i64::MIN);
        warn!("event=todo_id_exhausted module=store status=fallback id={fallback}");
        TodoId::new(fallback)
    }

    /// Writes the full sequence under the storage key.
    pub fn save(&self) -> RepoResult<()> {
        let encoded = serde_json::to_string(&self.todos)?;
        if let Err(err) = self.storage.set(&self.key, &encoded) {
            error!(
                "event=todo_save module=store status=error key={} error={}",
                self.key, err
            );
            return Err(err);
        }
        Ok(())
    }

    /// Returns todos matching `mode`, in insertion order.
    pub fn filter(&self, mode: FilterMode) -> Vec<&Todo> {
        self.todos.iter().filter(|todo| mode.matches(todo)).collect()
    }

    pub fn active_count(&self) -> usize {
        self.todos.iter().filter(|todo| todo.is_active()).count()
    }

    pub fn has_completed(&self) -> bool {
        self.todos.iter().any(|todo| todo.completed)
    }

    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

fn read_persisted<S: KeyValueStore>(storage: &S, key: &str) -> Vec<Todo> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("event=todo_load module=store status=empty key={key} reason=absent");
            return Vec::new();
        }
        Err(err) => {
            error!(
                "event=todo_load module=store status=fallback key={key} reason=read_failed error={err}"
            );
            return Vec::new();
        }
    };

    match decode_todos(&raw) {
        Ok(todos) => {
            info!(
                "event=todo_load module=store status=ok key={} count={}",
                key,
                todos.len()
            );
            todos
        }
        Err(err) => {
            warn!(
                "event=todo_load module=store status=fallback key={key} reason=corrupt error={err}"
            );
            Vec::new()
        }
    }
}

/// Decodes a persisted JSON array. Blank input and `null` decode as empty.
fn decode_todos(raw: &str) -> Result<Vec<Todo>, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let todos = serde_json::from_str::<Option<Vec<Todo>>>(raw)?.unwrap_or_default();
    Ok(dedup_ids(todos))
}

fn dedup_ids(todos: Vec<Todo>) -> Vec<Todo> {
    let mut seen = HashSet::with_capacity(todos.len());
    let before = todos.len();
    let unique: Vec<Todo> = todos
        .into_iter()
        .filter(|todo| seen.insert(todo.id))
        .collect();
    if unique.len() != before {
        warn!(
            "event=todo_dedup module=store status=ok dropped={}",
            before - unique.len()
        );
    }
    unique
}
