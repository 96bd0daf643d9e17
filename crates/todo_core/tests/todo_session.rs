use chrono::{TimeZone, Utc};
use todo_core::db::open_db_in_memory;
use todo_core::{
    CommandOutcome, FilterMode, FixedClock, MemoryKeyValueStore, SqliteKeyValueStore,
    TodoCommand, TodoId, TodoSession, TodoStore, DEFAULT_STORAGE_KEY,
};

fn session() -> TodoSession<MemoryKeyValueStore, FixedClock> {
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 6, 1, 8, 0, 0).unwrap());
    let store = TodoStore::load_with(MemoryKeyValueStore::new(), DEFAULT_STORAGE_KEY, clock);
    TodoSession::new(store)
}

fn added(outcome: CommandOutcome) -> TodoId {
    match outcome {
        CommandOutcome::Added(id) => id,
        other => panic!("expected Added, got {other:?}"),
    }
}

#[test]
fn empty_session_view_uses_all_filter_message() {
    let session = session();
    let view = session.view();

    assert_eq!(view.filter, FilterMode::All);
    assert!(view.items.is_empty());
    assert_eq!(
        view.empty_message.as_deref(),
        Some("No todos yet. Add one above!")
    );
    assert_eq!(view.remaining_label, "0 tasks remaining");
    assert!(!view.show_clear_completed);
}

#[test]
fn commands_drive_store_and_view() {
    let mut session = session();

    let milk = added(session.apply(TodoCommand::Add("Buy milk".into())).unwrap());
    added(session.apply(TodoCommand::Add("Walk dog".into())).unwrap());
    assert_eq!(session.view().remaining_label, "2 tasks remaining");

    assert_eq!(
        session.apply(TodoCommand::Toggle(milk)).unwrap(),
        CommandOutcome::Toggled(milk)
    );
    let view = session.view();
    assert_eq!(view.remaining_label, "1 task remaining");
    assert!(view.show_clear_completed);
    assert_eq!(view.empty_message, None);

    assert_eq!(
        session.apply(TodoCommand::ClearCompleted).unwrap(),
        CommandOutcome::Cleared(1)
    );
    let view = session.view();
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].text, "Walk dog");
    assert!(!view.show_clear_completed);
}

#[test]
fn ignored_commands_report_ignored() {
    let mut session = session();

    assert_eq!(
        session.apply(TodoCommand::Add("  ".into())).unwrap(),
        CommandOutcome::Ignored
    );
    assert_eq!(
        session.apply(TodoCommand::Toggle(TodoId::new(404))).unwrap(),
        CommandOutcome::Ignored
    );
    assert_eq!(
        session.apply(TodoCommand::Delete(TodoId::new(404))).unwrap(),
        CommandOutcome::Ignored
    );
    assert!(session.store().is_empty());
}

#[test]
fn set_filter_changes_view_without_touching_storage() {
    let mut session = session();
    let id = added(session.apply(TodoCommand::Add("only".into())).unwrap());

    assert_eq!(
        session
            .apply(TodoCommand::SetFilter(FilterMode::Completed))
            .unwrap(),
        CommandOutcome::FilterChanged(FilterMode::Completed)
    );
    let view = session.view();
    assert!(view.items.is_empty());
    assert_eq!(view.empty_message.as_deref(), Some("No completed todos."));
    assert_eq!(view.remaining_label, "1 task remaining");

    session.apply(TodoCommand::SetFilter(FilterMode::Active)).unwrap();
    assert_eq!(session.view().items[0].id, id);
    assert_eq!(session.filter(), FilterMode::Active);
}

#[test]
fn delete_command_removes_item() {
    let mut session = session();
    let id = added(session.apply(TodoCommand::Add("gone soon".into())).unwrap());

    assert_eq!(
        session.apply(TodoCommand::Delete(id)).unwrap(),
        CommandOutcome::Deleted(id)
    );
    assert!(session.view().items.is_empty());
}

#[test]
fn seed_samples_only_when_empty_and_persists_them() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKeyValueStore::try_new(&conn).unwrap();
    let mut session = TodoSession::new(TodoStore::load(&kv));

    assert!(session.seed_samples_if_empty().unwrap());
    assert!(!session.seed_samples_if_empty().unwrap());

    let view = session.view();
    assert_eq!(view.items.len(), 3);
    assert_eq!(view.items[0].text, "Welcome to your Todo App!");
    assert_eq!(view.remaining_label, "2 tasks remaining");
    assert!(view.show_clear_completed);

    let reloaded = TodoStore::load(&kv);
    assert_eq!(reloaded.len(), 3);
}

#[test]
fn adds_after_seeding_get_fresh_ids() {
    let mut session = session();
    session.seed_samples_if_empty().unwrap();

    let id = added(session.apply(TodoCommand::Add("mine".into())).unwrap());
    assert!(id > TodoId::new(3));
}

#[test]
fn with_filter_sets_initial_filter() {
    let session = session().with_filter(FilterMode::Active);
    assert_eq!(
        session.view().empty_message.as_deref(),
        Some("No active todos.")
    );
}
