//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose board use cases to Dart via FRB as sync calls.
//! - Own one board session per explicitly opened [`BoardHandle`].
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Mutations report through [`ActionResponse`]; errors become messages.
//! - A poisoned handle lock is recovered, never propagated as a panic.

use kanban_core::db::open_db;
use kanban_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    BoardService, BoardView, DragLocation, DropResult, SqliteKeyValueStore, StoreConfig,
    TaskPatch,
};
use log::info;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

const BOARD_DB_FILE_NAME: &str = "kanban_board.sqlite3";
const BOARD_DB_PATH_ENV: &str = "KANBAN_DB_PATH";

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Generic action response envelope for board commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Created or affected task/column ID, when there is one.
    pub id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Task row as rendered by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub created_at: i64,
}

/// Column with its visible tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnItem {
    pub id: String,
    pub title: String,
    pub tasks: Vec<TaskItem>,
}

/// Board projection plus undo/redo availability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardViewResponse {
    pub columns: Vec<ColumnItem>,
    pub can_undo: bool,
    pub can_redo: bool,
}

/// Opaque board session backed by one SQLite file.
#[flutter_rust_bridge::frb(opaque)]
pub struct BoardHandle {
    service: Mutex<BoardService<SqliteKeyValueStore>>,
    db_path: PathBuf,
}

/// Opens the board stored at `db_path`.
///
/// Path resolution: explicit argument, else `KANBAN_DB_PATH`, else
/// `<temp_dir>/kanban_board.sqlite3`.
///
/// # FFI contract
/// - Sync call; opens the database and applies migrations.
/// - Never panics; returns an error message when the database is unusable.
#[flutter_rust_bridge::frb(sync)]
pub fn open_board(db_path: Option<String>) -> Result<BoardHandle, String> {
    let db_path = resolve_board_db_path(db_path);
    let conn = open_db(&db_path).map_err(|err| format!("board DB open failed: {err}"))?;
    let kv = SqliteKeyValueStore::try_new(conn)
        .map_err(|err| format!("board storage init failed: {err}"))?;
    let service = BoardService::open(kv, StoreConfig::from_env());
    info!(
        "event=ffi_open_board module=ffi status=ok source={:?}",
        service.loaded_from()
    );
    Ok(BoardHandle {
        service: Mutex::new(service),
        db_path,
    })
}

impl BoardHandle {
    /// Absolute or relative path of the backing database file.
    #[flutter_rust_bridge::frb(sync)]
    pub fn db_path(&self) -> String {
        self.db_path.display().to_string()
    }

    /// Renders the board, keeping only tasks matching `search`.
    #[flutter_rust_bridge::frb(sync)]
    pub fn board_view(&self, search: Option<String>) -> BoardViewResponse {
        let service = self.lock();
        let view = service.view(search.as_deref().unwrap_or_default());
        let history = service.store().history();
        BoardViewResponse {
            columns: to_column_items(view),
            can_undo: history.can_undo(),
            can_redo: history.can_redo(),
        }
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn create_task(&self, column_id: String, title: String) -> ActionResponse {
        match self.lock().create_task(&column_id, &title) {
            Ok(task_id) => ActionResponse::success("Task created.", Some(task_id)),
            Err(err) => ActionResponse::failure(format!("create_task failed: {err}")),
        }
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn rename_task(&self, task_id: String, title: String) -> ActionResponse {
        match self.lock().rename_task(&task_id, &title) {
            Ok(true) => ActionResponse::success("Task renamed.", Some(task_id)),
            Ok(false) => ActionResponse::success("Task unchanged.", Some(task_id)),
            Err(err) => ActionResponse::failure(format!("rename_task failed: {err}")),
        }
    }

    /// Replaces the task description verbatim; empty text is allowed.
    #[flutter_rust_bridge::frb(sync)]
    pub fn update_task_description(&self, task_id: String, description: String) -> ActionResponse {
        let patch = TaskPatch::description(description);
        match self.lock().update_task(&task_id, &patch) {
            Ok(()) => ActionResponse::success("Task updated.", Some(task_id)),
            Err(err) => ActionResponse::failure(format!("update_task failed: {err}")),
        }
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn delete_task(&self, task_id: String, column_id: String) -> ActionResponse {
        match self.lock().delete_task(&task_id, &column_id) {
            Ok(()) => ActionResponse::success("Task deleted.", Some(task_id)),
            Err(err) => ActionResponse::failure(format!("delete_task failed: {err}")),
        }
    }

    /// Applies a drag-end event; a missing destination is a no-op.
    #[flutter_rust_bridge::frb(sync)]
    pub fn handle_drop(
        &self,
        source_column_id: String,
        source_index: u32,
        destination_column_id: Option<String>,
        destination_index: u32,
    ) -> ActionResponse {
        let drop = DropResult {
            source: DragLocation::new(source_column_id, source_index as usize),
            destination: destination_column_id
                .map(|column_id| DragLocation::new(column_id, destination_index as usize)),
        };
        match self.lock().handle_drop(&drop) {
            Ok(true) => ActionResponse::success("Task moved.", None),
            Ok(false) => ActionResponse::success("Nothing to move.", None),
            Err(err) => ActionResponse::failure(format!("move_task failed: {err}")),
        }
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn create_column(&self, title: String) -> ActionResponse {
        match self.lock().create_column(&title) {
            Ok(column_id) => ActionResponse::success("Column created.", Some(column_id)),
            Err(err) => ActionResponse::failure(format!("create_column failed: {err}")),
        }
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn rename_column(&self, column_id: String, title: String) -> ActionResponse {
        match self.lock().rename_column(&column_id, &title) {
            Ok(true) => ActionResponse::success("Column renamed.", Some(column_id)),
            Ok(false) => ActionResponse::success("Column unchanged.", Some(column_id)),
            Err(err) => ActionResponse::failure(format!("rename_column failed: {err}")),
        }
    }

    /// Deletes a column and every task it lists.
    #[flutter_rust_bridge::frb(sync)]
    pub fn delete_column(&self, column_id: String) -> ActionResponse {
        match self.lock().delete_column(&column_id) {
            Ok(()) => ActionResponse::success("Column deleted.", Some(column_id)),
            Err(err) => ActionResponse::failure(format!("delete_column failed: {err}")),
        }
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn undo(&self) -> ActionResponse {
        if self.lock().undo() {
            ActionResponse::success("Undone.", None)
        } else {
            ActionResponse::failure("Nothing to undo.")
        }
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn redo(&self) -> ActionResponse {
        if self.lock().redo() {
            ActionResponse::success("Redone.", None)
        } else {
            ActionResponse::failure("Nothing to redo.")
        }
    }

    fn lock(&self) -> MutexGuard<'_, BoardService<SqliteKeyValueStore>> {
        // Mutations are all-or-nothing, so state behind a poisoned lock is still consistent.
        self.service
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn resolve_board_db_path(explicit: Option<String>) -> PathBuf {
    let non_blank = |raw: String| {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
    };
    explicit
        .and_then(non_blank)
        .or_else(|| std::env::var(BOARD_DB_PATH_ENV).ok().and_then(non_blank))
        .unwrap_or_else(|| std::env::temp_dir().join(BOARD_DB_FILE_NAME))
}

fn to_column_items(view: BoardView) -> Vec<ColumnItem> {
    view.columns
        .into_iter()
        .map(|column| ColumnItem {
            id: column.id,
            title: column.title,
            tasks: column
                .tasks
                .into_iter()
                .map(|task| TaskItem {
                    id: task.id,
                    title: task.title,
                    description: task.description,
                    created_at: task.created_at,
                })
                .collect(),
        })
        .collect()
}
