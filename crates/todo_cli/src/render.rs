//! Plain-text rendering of `TodoView`.

use std::io::{self, Write};
use todo_core::{CommandOutcome, TodoView};

pub const CLEAR_COMPLETED_HINT: &str = "(clear completed available)";

/// Prints a one-line confirmation for commands that changed something.
pub fn write_outcome(out: &mut impl Write, outcome: CommandOutcome) -> io::Result<()> {
    match outcome {
        CommandOutcome::Added(id) => writeln!(out, "Added #{id}"),
        CommandOutcome::Toggled(id) => writeln!(out, "Toggled #{id}"),
        CommandOutcome::Deleted(id) => writeln!(out, "Deleted #{id}"),
        CommandOutcome::Cleared(0) => Ok(()),
        CommandOutcome::Cleared(count) => writeln!(out, "Cleared {count} completed"),
        CommandOutcome::FilterChanged(_) | CommandOutcome::Ignored => Ok(()),
    }
}

/// Prints the list rows (or the empty-state message) and the footer.
pub fn write_view(out: &mut impl Write, view: &TodoView) -> io::Result<()> {
    if let Some(message) = &view.empty_message {
        writeln!(out, "{message}")?;
    }
    for item in &view.items {
        let mark = if item.completed { 'x' } else { ' ' };
        writeln!(out, "[{mark}] {}  {}", item.id, item.text)?;
    }
    writeln!(out, "{}", view.remaining_label)?;
    if view.show_clear_completed {
        writeln!(out, "{CLEAR_COMPLETED_HINT}")?;
    }
    Ok(())
}
