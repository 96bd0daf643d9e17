use todo_core::{FilterMode, Todo, TodoId, TodoValidationError};

#[test]
fn todo_new_trims_text_and_starts_active() {
    let todo = Todo::new(TodoId::new(7), "  Buy milk \n", "2026-01-01T00:00:00.000Z").unwrap();

    assert_eq!(todo.id, TodoId::new(7));
    assert_eq!(todo.text, "Buy milk");
    assert!(!todo.completed);
    assert!(todo.is_active());
    assert_eq!(todo.created_at.as_deref(), Some("2026-01-01T00:00:00.000Z"));
}

#[test]
fn todo_new_rejects_blank_text() {
    for text in ["", "   ", "\t\n"] {
        let err = Todo::new(TodoId::new(1), text, "now").unwrap_err();
        assert_eq!(err, TodoValidationError::EmptyText);
    }
}

#[test]
fn toggle_flips_completion_both_ways() {
    let mut todo = Todo::new(TodoId::new(1), "flip", "now").unwrap();

    assert!(todo.toggle());
    assert!(todo.completed);
    assert!(!todo.toggle());
    assert!(!todo.completed);
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let mut todo = Todo::new(
        TodoId::new(1_700_000_000_000),
        "ship it",
        "2026-02-13T10:00:00.000Z",
    )
    .unwrap();
    todo.completed = true;

    let json = serde_json::to_value(&todo).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "id": 1_700_000_000_000_i64,
            "text": "ship it",
            "completed": true,
            "createdAt": "2026-02-13T10:00:00.000Z"
        })
    );
}

#[test]
fn deserialize_tolerates_unknown_and_missing_fields() {
    let value = serde_json::json!({
        "id": 42,
        "text": "from another client",
        "priority": "high"
    });

    let todo: Todo = serde_json::from_value(value).unwrap();
    assert_eq!(todo.id, TodoId::new(42));
    assert!(!todo.completed);
    assert_eq!(todo.created_at, None);

    let json = serde_json::to_value(&todo).unwrap();
    assert!(json.get("createdAt").is_none());
    assert!(json.get("priority").is_none());
}

#[test]
fn deserialize_requires_id_and_text() {
    assert!(serde_json::from_str::<Todo>(r#"{"text":"no id"}"#).is_err());
    assert!(serde_json::from_str::<Todo>(r#"{"id":1}"#).is_err());
}

#[test]
fn filter_mode_parses_case_insensitively_and_displays_lowercase() {
    assert_eq!("ALL".parse::<FilterMode>().unwrap(), FilterMode::All);
    assert_eq!(" active ".parse::<FilterMode>().unwrap(), FilterMode::Active);
    assert_eq!(
        "Completed".parse::<FilterMode>().unwrap(),
        FilterMode::Completed
    );
    assert!("done".parse::<FilterMode>().is_err());

    for mode in FilterMode::ALL_MODES {
        assert_eq!(mode.to_string().parse::<FilterMode>().unwrap(), mode);
    }
    assert_eq!(FilterMode::default(), FilterMode::All);
}

#[test]
fn filter_mode_predicates_partition_todos() {
    let active = Todo::new(TodoId::new(1), "a", "now").unwrap();
    let mut done = Todo::new(TodoId::new(2), "b", "now").unwrap();
    done.toggle();

    assert!(FilterMode::All.matches(&active) && FilterMode::All.matches(&done));
    assert!(FilterMode::Active.matches(&active) && !FilterMode::Active.matches(&done));
    assert!(!FilterMode::Completed.matches(&active) && FilterMode::Completed.matches(&done));
}

#[test]
fn todo_id_parses_from_cli_text() {
    assert_eq!(" 17 ".parse::<TodoId>().unwrap(), TodoId::new(17));
    assert!("abc".parse::<TodoId>().is_err());
}
