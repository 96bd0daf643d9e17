//! Command interface and render model for one UI session.
//!
//! # Responsibility
//! - Accept `TodoCommand`s from any UI layer (terminal, tests, bindings).
//! - Hold the current filter, which is view state and never persisted.
//! - Produce a `TodoView` with everything needed to draw the list.
//!
//! # Invariants
//! - The session never bypasses the store's persistence contract.
//! - Changing the filter does not touch storage.

use crate::model::todo::{FilterMode, TodoId};
use crate::repo::kv_repo::{KeyValueStore, RepoResult};
use crate::store::clock::{Clock, SystemClock};
use crate::store::todo_store::TodoStore;
use crate::view::{empty_state_message, remaining_label, sample_todos};
use log::info;

/// User intents a UI layer can send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoCommand {
    Add(String),
    Toggle(TodoId),
    Delete(TodoId),
    SetFilter(FilterMode),
    ClearCompleted,
}

/// What a command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Added(TodoId),
    Toggled(TodoId),
    Deleted(TodoId),
    FilterChanged(FilterMode),
    Cleared(usize),
    /// Blank text, or an id that matched nothing.
    Ignored,
}

/// One visible row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItemView {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
}

/// Render model for the whole list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoView {
    pub filter: FilterMode,
    /// Rows matching `filter`, in insertion order.
    pub items: Vec<TodoItemView>,
    /// Set only when `items` is empty.
    pub empty_message: Option<String>,
    pub remaining_label: String,
    /// Whether the "clear completed" action should be offered.
    pub show_clear_completed: bool,
}

/// A store plus the UI's current filter.
pub struct TodoSession<S: KeyValueStore, C: Clock = SystemClock> {
    store: TodoStore<S, C>,
    filter: FilterMode,
}

impl<S: KeyValueStore, C: Clock> TodoSession<S, C> {
    pub fn new(store: TodoStore<S, C>) -> Self {
        Self {
            store,
            filter: FilterMode::default(),
        }
    }

    pub fn with_filter(mut self, filter: FilterMode) -> Self {
        self.filter = filter;
        self
    }

    /// Executes one command against the store.
    ///
    /// # Errors
    /// - Propagates storage write failures from the store.
    pub fn apply(&mut self, command: TodoCommand) -> RepoResult<CommandOutcome> {
        let outcome = match command {
            TodoCommand::Add(text) => self
                .store
                .add(&text)?
                .map_or(CommandOutcome::Ignored, CommandOutcome::Added),
            TodoCommand::Toggle(id) => {
                if self.store.toggle(id)? {
                    CommandOutcome::Toggled(id)
                } else {
                    CommandOutcome::Ignored
                }
            }
            TodoCommand::Delete(id) => {
                if self.store.delete(id)? > 0 {
                    CommandOutcome::Deleted(id)
                } else {
                    CommandOutcome::Ignored
                }
            }
            TodoCommand::SetFilter(filter) => {
                self.filter = filter;
                CommandOutcome::FilterChanged(filter)
            }
            TodoCommand::ClearCompleted => CommandOutcome::Cleared(self.store.clear_completed()?),
        };
        Ok(outcome)
    }

    /// Writes the sample todos when the store holds nothing.
    ///
    /// Returns whether samples were written.
    pub fn seed_samples_if_empty(&mut self) -> RepoResult<bool> {
        if !self.store.is_empty() {
            return Ok(false);
        }

        let samples = sample_todos(self.store.clock());
        let count = samples.len();
        self.store.replace_all(samples)?;
        info!("event=todo_seed module=session status=ok count={count}");
        Ok(true)
    }

    /// Builds the render model for the current filter.
    pub fn view(&self) -> TodoView {
        let items: Vec<TodoItemView> = self
            .store
            .filter(self.filter)
            .into_iter()
            .map(|todo| TodoItemView {
                id: todo.id,
                text: todo.text.clone(),
                completed: todo.completed,
            })
            .collect();
        let empty_message = items
            .is_empty()
            .then(|| empty_state_message(self.filter));

        TodoView {
            filter: self.filter,
            items,
            empty_message,
            remaining_label: remaining_label(self.store.active_count()),
            show_clear_completed: self.store.has_completed(),
        }
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    pub fn store(&self) -> &TodoStore<S, C> {
        &self.store
    }

    pub fn into_store(self) -> TodoStore<S, C> {
        self.store
    }
}
