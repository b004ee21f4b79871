//! Board use-case service.
//!
//! # Responsibility
//! - Own the board store and its persistence slot for one UI session.
//! - Translate UI intents (titles, drops) into store mutations.
//! - Persist the committed board after every change.
//!
//! # Invariants
//! - Persistence is fire-and-forget: a failed write is logged and never
//!   rolls back a commit.
//! - History is never persisted; every opened service starts with none.
//! - User-entered titles are trimmed and must not be blank.

use crate::config::StoreConfig;
use crate::model::board::Board;
use crate::model::column::{Column, ColumnId};
use crate::model::task::{Task, TaskId, TaskPatch, DEFAULT_TASK_DESCRIPTION};
use crate::repo::board_repo::{load_board, save_board, BoardSource};
use crate::repo::kv_repo::KeyValueStore;
use crate::search::filter::{build_view, BoardView};
use crate::store::{DragLocation, DropResult, KanbanStore, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from board service operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Title is blank after trim.
    InvalidTitle,
    /// Store rejected the mutation.
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle => write!(f, "title must not be blank"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidTitle => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Board service facade: single writer over one persisted board.
pub struct BoardService<S: KeyValueStore> {
    store: KanbanStore,
    kv: S,
    loaded_from: BoardSource,
}

impl<S: KeyValueStore> BoardService<S> {
    /// Opens the board persisted under `config.storage_key`.
    ///
    /// Missing or unreadable state falls back to the default board.
    pub fn open(kv: S, config: StoreConfig) -> Self {
        let (board, loaded_from) = load_board(&kv, &config.storage_key);
        let store = KanbanStore::new(board, config.clone())
            .unwrap_or_else(|_| KanbanStore::with_default_board(config));
        info!(
            "event=board_open module=service status=ok source={loaded_from:?} columns={} tasks={}",
            store.board().columns.len(),
            store.board().tasks.len()
        );
        Self {
            store,
            kv,
            loaded_from,
        }
    }

    pub fn board(&self) -> &Board {
        self.store.board()
    }

    pub fn store(&self) -> &KanbanStore {
        &self.store
    }

    pub fn loaded_from(&self) -> BoardSource {
        self.loaded_from
    }

    /// Gives the key-value store back, e.g. to reopen it in tests.
    pub fn into_inner(self) -> S {
        self.kv
    }

    /// Render projection filtered by `search_term`.
    pub fn view(&self, search_term: &str) -> BoardView {
        build_view(self.store.board(), search_term)
    }

    pub fn add_task(&mut self, column_id: &str, task: Task) -> ServiceResult<()> {
        self.store.add_task(column_id, task)?;
        self.persist("add_task");
        Ok(())
    }

    /// Creates a task from a bare title at the end of `column_id`.
    pub fn create_task(&mut self, column_id: &str, title: &str) -> ServiceResult<TaskId> {
        let title = normalize_title(title)?;
        let task = Task::new(title, DEFAULT_TASK_DESCRIPTION);
        let task_id = task.id.clone();
        self.add_task(column_id, task)?;
        Ok(task_id)
    }

    pub fn update_task(&mut self, task_id: &str, patch: &TaskPatch) -> ServiceResult<()> {
        self.store.update_task(task_id, patch)?;
        self.persist("update_task");
        Ok(())
    }

    /// Renames a task. Returns `false` when the trimmed title is unchanged.
    pub fn rename_task(&mut self, task_id: &str, title: &str) -> ServiceResult<bool> {
        let title = normalize_title(title)?;
        let current = self
            .store
            .board()
            .tasks
            .get(task_id)
            .ok_or_else(|| StoreError::TaskNotFound(task_id.to_string()))?;
        if current.title == title {
            return Ok(false);
        }
        self.update_task(task_id, &TaskPatch::title(title))?;
        Ok(true)
    }

    pub fn delete_task(&mut self, task_id: &str, column_id: &str) -> ServiceResult<()> {
        self.store.delete_task(task_id, column_id)?;
        self.persist("delete_task");
        Ok(())
    }

    pub fn move_task(
        &mut self,
        source: &DragLocation,
        destination: &DragLocation,
    ) -> ServiceResult<()> {
        self.store.move_task(source, destination)?;
        self.persist("move_task");
        Ok(())
    }

    /// Applies a drag-end event. Returns whether a move was committed.
    pub fn handle_drop(&mut self, drop: &DropResult) -> ServiceResult<bool> {
        match drop.as_move() {
            Some((source, destination)) => {
                self.move_task(source, destination)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn add_column(&mut self, column: Column) -> ServiceResult<()> {
        self.store.add_column(column)?;
        self.persist("add_column");
        Ok(())
    }

    /// Creates an empty column from a bare title at the end of the board.
    pub fn create_column(&mut self, title: &str) -> ServiceResult<ColumnId> {
        let column = Column::new(normalize_title(title)?);
        let column_id = column.id.clone();
        self.add_column(column)?;
        Ok(column_id)
    }

    pub fn update_column_title(&mut self, column_id: &str, title: &str) -> ServiceResult<()> {
        self.store.update_column_title(column_id, title)?;
        self.persist("update_column_title");
        Ok(())
    }

    /// Renames a column. Returns `false` when the title is unchanged.
    ///
    /// The comparison uses the trimmed title, so padding alone is not a change.
    pub fn rename_column(&mut self, column_id: &str, title: &str) -> ServiceResult<bool> {
        let title = normalize_title(title)?;
        let current = self
            .store
            .board()
            .columns
            .get(column_id)
            .ok_or_else(|| StoreError::ColumnNotFound(column_id.to_string()))?;
        if current.title == title {
            return Ok(false);
        }
        self.update_column_title(column_id, &title)?;
        Ok(true)
    }

    /// Deletes a column together with its tasks.
    pub fn delete_column(&mut self, column_id: &str) -> ServiceResult<()> {
        self.store.delete_column(column_id)?;
        self.persist("delete_column");
        Ok(())
    }

    pub fn undo(&mut self) -> bool {
        let applied = self.store.undo();
        if applied {
            self.persist("undo");
        }
        applied
    }

    pub fn redo(&mut self) -> bool {
        let applied = self.store.redo();
        if applied {
            self.persist("redo");
        }
        applied
    }

    fn persist(&mut self, op: &'static str) {
        let key = self.store.config().storage_key.as_str();
        if let Err(err) = save_board(&mut self.kv, key, self.store.board()) {
            warn!(
                "event=board_persist module=service op={op} status=error error_code=board_save_failed error={err}"
            );
        }
    }
}

fn normalize_title(value: &str) -> ServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::InvalidTitle);
    }
    Ok(trimmed.to_string())
}
