use kanban_core::{
    Board, Column, DragLocation, KanbanStore, StoreConfig, StoreError, StoreErrorKind, Task,
    TaskPatch,
};

fn single_column_store() -> KanbanStore {
    let mut board = Board::default();
    board
        .columns
        .insert("c1".to_string(), Column::with_id("c1", "To Do"));
    board.column_order.push("c1".to_string());
    KanbanStore::new(board, StoreConfig::default()).unwrap()
}

fn two_column_store_with_tasks(ids: &[&str]) -> KanbanStore {
    let mut store = single_column_store();
    store.add_column(Column::with_id("c2", "Done")).unwrap();
    for id in ids {
        store
            .add_task("c1", Task::with_id(*id, id.to_uppercase(), "", 0))
            .unwrap();
    }
    store.clear_history();
    store
}

fn task_ids<'a>(store: &'a KanbanStore, column_id: &str) -> Vec<&'a str> {
    store.board().columns[column_id]
        .task_ids
        .iter()
        .map(String::as_str)
        .collect()
}

#[test]
fn add_then_delete_task_scenario() {
    let mut store = single_column_store();
    let task = Task::with_id("t1", "A", "", 1);

    store.add_task("c1", task.clone()).unwrap();
    assert_eq!(store.board().tasks.get("t1"), Some(&task));
    assert_eq!(task_ids(&store, "c1"), vec!["t1"]);

    store.delete_task("t1", "c1").unwrap();
    assert!(store.board().tasks.is_empty());
    assert!(task_ids(&store, "c1").is_empty());
}

#[test]
fn move_across_columns_scenario() {
    let mut store = two_column_store_with_tasks(&["t1", "t2"]);

    store
        .move_task(&DragLocation::new("c1", 0), &DragLocation::new("c2", 0))
        .unwrap();

    assert_eq!(task_ids(&store, "c1"), vec!["t2"]);
    assert_eq!(task_ids(&store, "c2"), vec!["t1"]);
}

#[test]
fn rename_undo_redo_scenario() {
    let mut store = single_column_store();

    store.update_column_title("c1", "Renamed").unwrap();
    assert!(store.undo());
    assert_eq!(store.board().columns["c1"].title, "To Do");

    assert!(store.redo());
    assert_eq!(store.board().columns["c1"].title, "Renamed");
}

#[test]
fn add_task_appends_to_end_of_column() {
    let store = two_column_store_with_tasks(&["t1", "t2", "t3"]);
    assert_eq!(task_ids(&store, "c1"), vec!["t1", "t2", "t3"]);
}

#[test]
fn add_task_rejects_unknown_column_without_side_effects() {
    let mut store = single_column_store();
    let before = store.board().clone();

    let err = store
        .add_task("nope", Task::with_id("t1", "A", "", 0))
        .unwrap_err();

    assert_eq!(err, StoreError::ColumnNotFound("nope".to_string()));
    assert_eq!(err.kind(), StoreErrorKind::NotFound);
    assert_eq!(store.board(), &before);
    assert_eq!(store.history().past_len(), 0);
}

#[test]
fn add_task_rejects_duplicate_task_id() {
    let mut store = two_column_store_with_tasks(&["t1"]);

    let err = store
        .add_task("c2", Task::with_id("t1", "again", "", 0))
        .unwrap_err();

    assert_eq!(err.kind(), StoreErrorKind::Conflict);
    assert_eq!(task_ids(&store, "c2"), Vec::<&str>::new());
    assert_eq!(store.history().past_len(), 0);
}

#[test]
fn update_task_merges_fields_and_keeps_identity() {
    let mut store = single_column_store();
    store
        .add_task("c1", Task::with_id("t1", "Old", "Body", 5))
        .unwrap();

    store
        .update_task("t1", &TaskPatch::title("Updated Task"))
        .unwrap();

    let task = &store.board().tasks["t1"];
    assert_eq!(task.id, "t1");
    assert_eq!(task.title, "Updated Task");
    assert_eq!(task.description, "Body");
    assert_eq!(task.created_at, 5);
}

#[test]
fn empty_update_still_records_history() {
    let mut store = two_column_store_with_tasks(&["t1"]);
    let before = store.board().clone();

    store.update_task("t1", &TaskPatch::default()).unwrap();

    assert_eq!(store.board(), &before);
    assert_eq!(store.history().past_len(), 1);
}

#[test]
fn update_missing_task_is_not_found() {
    let mut store = single_column_store();
    let err = store
        .update_task("ghost", &TaskPatch::title("x"))
        .unwrap_err();
    assert_eq!(err, StoreError::TaskNotFound("ghost".to_string()));
}

#[test]
fn delete_task_requires_matching_column() {
    let mut store = two_column_store_with_tasks(&["t1"]);

    let err = store.delete_task("t1", "c2").unwrap_err();
    assert!(matches!(err, StoreError::TaskNotInColumn { .. }));
    assert_eq!(err.kind(), StoreErrorKind::NotFound);
    assert!(store.board().tasks.contains_key("t1"));

    let err = store.delete_task("ghost", "c1").unwrap_err();
    assert_eq!(err, StoreError::TaskNotFound("ghost".to_string()));

    let err = store.delete_task("t1", "nope").unwrap_err();
    assert_eq!(err, StoreError::ColumnNotFound("nope".to_string()));
    assert_eq!(store.history().past_len(), 0);
}

#[test]
fn move_within_column_reorders() {
    let mut store = two_column_store_with_tasks(&["t1", "t2", "t3"]);

    store
        .move_task(&DragLocation::new("c1", 0), &DragLocation::new("c1", 2))
        .unwrap();

    assert_eq!(task_ids(&store, "c1"), vec!["t2", "t3", "t1"]);
}

#[test]
fn move_clamps_destination_index_to_end() {
    let mut store = two_column_store_with_tasks(&["t1", "t2"]);

    store
        .move_task(&DragLocation::new("c1", 0), &DragLocation::new("c2", 99))
        .unwrap();
    store
        .move_task(&DragLocation::new("c1", 0), &DragLocation::new("c2", 99))
        .unwrap();

    assert_eq!(task_ids(&store, "c2"), vec!["t1", "t2"]);

    store
        .move_task(&DragLocation::new("c2", 0), &DragLocation::new("c2", 5))
        .unwrap();
    assert_eq!(task_ids(&store, "c2"), vec!["t2", "t1"]);
}

#[test]
fn move_rejects_source_index_past_end() {
    let mut store = two_column_store_with_tasks(&["t1"]);
    let before = store.board().clone();

    let err = store
        .move_task(&DragLocation::new("c1", 1), &DragLocation::new("c2", 0))
        .unwrap_err();

    assert_eq!(
        err,
        StoreError::NoTaskAtIndex {
            column_id: "c1".to_string(),
            index: 1,
            len: 1,
        }
    );
    assert_eq!(store.board(), &before);
}

#[test]
fn move_rejects_unknown_containers() {
    let mut store = two_column_store_with_tasks(&["t1"]);

    let err = store
        .move_task(&DragLocation::new("c1", 0), &DragLocation::new("zz", 0))
        .unwrap_err();
    assert_eq!(err, StoreError::ColumnNotFound("zz".to_string()));

    let err = store
        .move_task(&DragLocation::new("zz", 0), &DragLocation::new("c1", 0))
        .unwrap_err();
    assert_eq!(err, StoreError::ColumnNotFound("zz".to_string()));
    assert_eq!(task_ids(&store, "c1"), vec!["t1"]);
}

#[test]
fn identity_move_is_recorded_but_changes_nothing() {
    let mut store = two_column_store_with_tasks(&["t1", "t2"]);
    let before = store.board().clone();

    store
        .move_task(&DragLocation::new("c1", 1), &DragLocation::new("c1", 1))
        .unwrap();

    assert_eq!(store.board(), &before);
    assert_eq!(store.history().past_len(), 1);
}

#[test]
fn add_column_appends_to_order_and_rejects_duplicates() {
    let mut store = single_column_store();
    store.add_column(Column::with_id("c2", "New Column")).unwrap();

    assert_eq!(store.board().column_order, vec!["c1", "c2"]);
    assert_eq!(
        store.board().columns["c2"],
        Column::with_id("c2", "New Column")
    );

    let err = store.add_column(Column::with_id("c2", "Other")).unwrap_err();
    assert_eq!(err, StoreError::ColumnConflict("c2".to_string()));
    assert_eq!(err.kind(), StoreErrorKind::Conflict);
    assert_eq!(store.board().columns["c2"].title, "New Column");
}

#[test]
fn add_column_discards_prefilled_task_ids() {
    let mut store = two_column_store_with_tasks(&["t1"]);
    let mut column = Column::with_id("c3", "Sneaky");
    column.task_ids.push("t1".to_string());

    store.add_column(column).unwrap();

    assert!(store.board().columns["c3"].task_ids.is_empty());
    assert!(store.board().validate().is_ok());
}

#[test]
fn update_column_title_requires_existing_column() {
    let mut store = single_column_store();
    let err = store.update_column_title("zz", "x").unwrap_err();
    assert_eq!(err, StoreError::ColumnNotFound("zz".to_string()));
}

#[test]
fn delete_column_cascades_to_its_tasks() {
    let mut store = two_column_store_with_tasks(&["t1", "t2"]);
    store
        .move_task(&DragLocation::new("c1", 1), &DragLocation::new("c2", 0))
        .unwrap();

    store.delete_column("c1").unwrap();

    let board = store.board();
    assert!(!board.columns.contains_key("c1"));
    assert_eq!(board.column_order, vec!["c2"]);
    assert!(!board.tasks.contains_key("t1"));
    assert!(board.tasks.contains_key("t2"));
    assert!(board.unlisted_task_ids().is_empty());
    assert!(board.validate().is_ok());

    assert!(store.undo());
    assert!(store.board().tasks.contains_key("t1"));
    assert_eq!(store.board().column_order, vec!["c1", "c2"]);
}

#[test]
fn delete_missing_column_is_not_found() {
    let mut store = single_column_store();
    let err = store.delete_column("zz").unwrap_err();
    assert_eq!(err, StoreError::ColumnNotFound("zz".to_string()));
}

#[test]
fn undo_and_redo_are_noops_at_the_boundary() {
    let mut store = single_column_store();
    let before = store.board().clone();

    assert!(!store.undo());
    assert!(!store.redo());
    assert_eq!(store.board(), &before);
    assert_eq!(store.history().past_len(), 0);
    assert_eq!(store.history().future_len(), 0);
}

#[test]
fn new_mutation_after_undo_clears_redo() {
    let mut store = single_column_store();
    store.update_column_title("c1", "One").unwrap();
    store.update_column_title("c1", "Two").unwrap();
    assert!(store.undo());
    assert!(store.history().can_redo());

    store.update_column_title("c1", "Three").unwrap();

    assert_eq!(store.history().future_len(), 0);
    assert!(!store.redo());
    assert_eq!(store.board().columns["c1"].title, "Three");
}

#[test]
fn history_is_capped_and_keeps_most_recent_entries() {
    let config = StoreConfig::default().with_max_history(3);
    let mut store = KanbanStore::with_default_board(config);
    assert_eq!(store.history().max_depth(), 3);

    for step in 0..7 {
        store
            .update_column_title("column-1", &format!("title-{step}"))
            .unwrap();
    }

    assert_eq!(store.history().past_len(), 3);
    let titles: Vec<&str> = store
        .history()
        .past()
        .map(|board| board.columns["column-1"].title.as_str())
        .collect();
    assert_eq!(titles, vec!["title-3", "title-4", "title-5"]);

    while store.undo() {}
    assert_eq!(store.board().columns["column-1"].title, "title-3");
    assert_eq!(store.history().future_len(), 3);
}

#[test]
fn snapshots_do_not_follow_later_mutations() {
    let mut store = two_column_store_with_tasks(&["t1", "t2"]);
    store
        .move_task(&DragLocation::new("c1", 0), &DragLocation::new("c2", 0))
        .unwrap();
    store
        .move_task(&DragLocation::new("c1", 0), &DragLocation::new("c2", 1))
        .unwrap();

    let first_snapshot = store.history().past().next().unwrap();
    assert_eq!(first_snapshot.columns["c1"].task_ids, vec!["t1", "t2"]);
    assert!(first_snapshot.columns["c2"].task_ids.is_empty());
}

#[test]
fn replace_board_validates_and_resets_history() {
    let mut store = single_column_store();
    store.update_column_title("c1", "x").unwrap();

    let mut broken = Board::default_board();
    broken.column_order.clear();
    let err = store.replace_board(broken).unwrap_err();
    assert!(matches!(err, StoreError::InvalidBoard(_)));
    assert_eq!(store.history().past_len(), 1);

    store.replace_board(Board::default_board()).unwrap();
    assert_eq!(store.board(), &Board::default_board());
    assert!(!store.history().can_undo());
}

#[test]
fn new_rejects_inconsistent_board() {
    let mut board = Board::default_board();
    board
        .columns
        .get_mut("column-1")
        .unwrap()
        .task_ids
        .push("ghost".to_string());

    let err = KanbanStore::new(board, StoreConfig::default()).unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::Conflict);
}
