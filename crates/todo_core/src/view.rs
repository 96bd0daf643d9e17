//! Derived display text and sample data.
//!
//! # Responsibility
//! - Produce the strings every UI layer shows next to the list.
//! - Provide the starter todos shown to first-time users.

use crate::model::todo::{FilterMode, Todo, TodoId};
use crate::store::clock::{format_timestamp, Clock};

/// Remaining-task label, e.g. `1 task remaining` / `3 tasks remaining`.
pub fn remaining_label(active_count: usize) -> String {
    let noun = if active_count == 1 { "task" } else { "tasks" };
    format!("{active_count} {noun} remaining")
}

/// Message shown when the filtered list has no items.
pub fn empty_state_message(filter: FilterMode) -> String {
    match filter {
        FilterMode::All => "No todos yet. Add one above!".to_string(),
        other => format!("No {other} todos."),
    }
}

/// Starter todos for an empty store, stamped with `clock`'s current time.
pub fn sample_todos(clock: &impl Clock) -> Vec<Todo> {
    let created_at = format_timestamp(clock.now());
    [
        (1, "Welcome to your Todo App!", false),
        (2, "Try adding a new task", false),
        (3, "Mark tasks as complete by checking them", true),
    ]
    .into_iter()
    .map(|(id, text, completed)| Todo {
        id: TodoId::new(id),
        text: text.to_string(),
        completed,
        created_at: Some(created_at.clone()),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::{empty_state_message, remaining_label, sample_todos};
    use crate::model::todo::FilterMode;
    use crate::store::clock::FixedClock;
    use chrono::{TimeZone, Utc};

    #[test]
    fn remaining_label_pluralizes_except_for_one() {
        assert_eq!(remaining_label(0), "0 tasks remaining");
        assert_eq!(remaining_label(1), "1 task remaining");
        assert_eq!(remaining_label(2), "2 tasks remaining");
    }

    #[test]
    fn empty_state_message_depends_on_filter() {
        assert_eq!(
            empty_state_message(FilterMode::All),
            "No todos yet. Add one above!"
        );
        assert_eq!(empty_state_message(FilterMode::Active), "No active todos.");
        assert_eq!(
            empty_state_message(FilterMode::Completed),
            "No completed todos."
        );
    }

    #[test]
    fn sample_todos_have_one_completed_entry() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap());
        let samples = sample_todos(&clock);
        assert_eq!(samples.len(), 3);
        assert_eq!(samples.iter().filter(|todo| todo.completed).count(), 1);
        assert!(samples
            .iter()
            .all(|todo| todo.created_at.as_deref() == Some("2025-05-01T12:00:00.000Z")));
    }
}
