//! Ordered board state store with linear undo/redo.
//!
//! # Responsibility
//! - Hold the committed board and its bounded snapshot history.
//! - Apply add/update/delete/move mutations all-or-nothing.
//!
//! # Invariants
//! - Every mutation follows: snapshot, compute next, record snapshot in
//!   `past`, clear `future`, commit next.
//! - A rejected operation changes neither the board nor the history.
//! - Committed boards always pass `Board::validate()`.
//! - Snapshots are owned values; later mutations never reach them.

mod drag;
mod error;
mod history;

pub use drag::{DragLocation, DropResult};
pub use error::{StoreError, StoreErrorKind, StoreResult};
pub use history::History;

use crate::config::StoreConfig;
use crate::model::board::Board;
use crate::model::column::Column;
use crate::model::task::{Task, TaskPatch};
use log::{debug, warn};

/// Single-writer board container.
///
/// Readers borrow [`KanbanStore::board`]; mutations require `&mut self`, so
/// no reader can observe a half-applied change.
#[derive(Debug, Clone)]
pub struct KanbanStore {
    board: Board,
    history: History,
    config: StoreConfig,
}

impl KanbanStore {
    /// Creates a store over an already validated board with empty history.
    ///
    /// # Errors
    /// - `InvalidBoard` when `board` violates referential integrity.
    pub fn new(board: Board, config: StoreConfig) -> StoreResult<Self> {
        board.validate()?;
        Ok(Self {
            board,
            history: History::new(config.max_history),
            config,
        })
    }

    /// Creates a store over the three-column default board.
    pub fn with_default_board(config: StoreConfig) -> Self {
        Self {
            board: Board::default_board(),
            history: History::new(config.max_history),
            config,
        }
    }

    /// Current committed board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Inserts `task` and appends it to the end of `column_id`.
    ///
    /// # Errors
    /// - `ColumnNotFound` when the column does not exist.
    /// - `TaskConflict` when a task with the same id already exists.
    pub fn add_task(&mut self, column_id: &str, task: Task) -> StoreResult<()> {
        self.mutate("add_task", |next| {
            if next.tasks.contains_key(&task.id) {
                return Err(StoreError::TaskConflict(task.id.clone()));
            }
            let column = next
                .columns
                .get_mut(column_id)
                .ok_or_else(|| StoreError::ColumnNotFound(column_id.to_string()))?;
            column.task_ids.push(task.id.clone());
            next.tasks.insert(task.id.clone(), task);
            Ok(())
        })
    }

    /// Merges `patch` into an existing task.
    ///
    /// An empty patch still records a history entry.
    pub fn update_task(&mut self, task_id: &str, patch: &TaskPatch) -> StoreResult<()> {
        self.mutate("update_task", |next| {
            let task = next
                .tasks
                .get_mut(task_id)
                .ok_or_else(|| StoreError::TaskNotFound(task_id.to_string()))?;
            task.apply_patch(patch);
            Ok(())
        })
    }

    /// Removes a task and its id from the owning column.
    ///
    /// # Errors
    /// - `TaskNotFound` / `ColumnNotFound` for unknown ids.
    /// - `TaskNotInColumn` when the column does not list the task.
    pub fn delete_task(&mut self, task_id: &str, column_id: &str) -> StoreResult<()> {
        self.mutate("delete_task", |next| {
            if !next.tasks.contains_key(task_id) {
                return Err(StoreError::TaskNotFound(task_id.to_string()));
            }
            let column = next
                .columns
                .get_mut(column_id)
                .ok_or_else(|| StoreError::ColumnNotFound(column_id.to_string()))?;
            let position =
                column
                    .position_of(task_id)
                    .ok_or_else(|| StoreError::TaskNotInColumn {
                        task_id: task_id.to_string(),
                        column_id: column_id.to_string(),
                    })?;
            column.task_ids.remove(position);
            next.tasks.remove(task_id);
            Ok(())
        })
    }

    /// Moves the task at `source` to `destination`.
    ///
    /// Same-column moves reorder. The destination index is clamped to the end
    /// of the destination list (measured after removal from the source).
    /// Identical source and destination still record a history entry.
    ///
    /// # Errors
    /// - `ColumnNotFound` when either container is unknown.
    /// - `NoTaskAtIndex` when `source.index` is past the source list.
    pub fn move_task(
        &mut self,
        source: &DragLocation,
        destination: &DragLocation,
    ) -> StoreResult<()> {
        self.mutate("move_task", |next| {
            if !next.columns.contains_key(&destination.container_id) {
                return Err(StoreError::ColumnNotFound(
                    destination.container_id.clone(),
                ));
            }
            let source_column = next
                .columns
                .get_mut(&source.container_id)
                .ok_or_else(|| StoreError::ColumnNotFound(source.container_id.clone()))?;
            let len = source_column.task_ids.len();
            if source.index >= len {
                return Err(StoreError::NoTaskAtIndex {
                    column_id: source.container_id.clone(),
                    index: source.index,
                    len,
                });
            }
            let task_id = source_column.task_ids.remove(source.index);

            let destination_column = next
                .columns
                .get_mut(&destination.container_id)
                .ok_or_else(|| StoreError::ColumnNotFound(destination.container_id.clone()))?;
            let target_index = destination.index.min(destination_column.task_ids.len());
            destination_column.task_ids.insert(target_index, task_id);
            Ok(())
        })
    }

    /// Inserts a new column at the end of the column order.
    ///
    /// The column is inserted empty; pre-filled `task_ids` are discarded
    /// because they would reference tasks owned by other columns.
    pub fn add_column(&mut self, column: Column) -> StoreResult<()> {
        self.mutate("add_column", |next| {
            if next.columns.contains_key(&column.id) {
                return Err(StoreError::ColumnConflict(column.id.clone()));
            }
            let mut column = column;
            column.task_ids.clear();
            next.column_order.push(column.id.clone());
            next.columns.insert(column.id.clone(), column);
            Ok(())
        })
    }

    pub fn update_column_title(&mut self, column_id: &str, title: &str) -> StoreResult<()> {
        self.mutate("update_column_title", |next| {
            let column = next
                .columns
                .get_mut(column_id)
                .ok_or_else(|| StoreError::ColumnNotFound(column_id.to_string()))?;
            column.title = title.to_string();
            Ok(())
        })
    }

    /// Removes a column and cascade-deletes the tasks it listed.
    pub fn delete_column(&mut self, column_id: &str) -> StoreResult<()> {
        self.mutate("delete_column", |next| {
            let column = next
                .columns
                .remove(column_id)
                .ok_or_else(|| StoreError::ColumnNotFound(column_id.to_string()))?;
            next.column_order.retain(|id| id != column_id);
            for task_id in &column.task_ids {
                next.tasks.remove(task_id);
            }
            Ok(())
        })
    }

    /// Restores the most recent snapshot. Returns `false` at the boundary.
    pub fn undo(&mut self) -> bool {
        let current = std::mem::take(&mut self.board);
        let applied = match self.history.undo(current) {
            Ok(previous) => {
                self.board = previous;
                true
            }
            Err(current) => {
                self.board = current;
                false
            }
        };
        self.log_history_step("undo", applied);
        applied
    }

    /// Re-applies the nearest undone snapshot. Returns `false` at the boundary.
    pub fn redo(&mut self) -> bool {
        let current = std::mem::take(&mut self.board);
        let applied = match self.history.redo(current) {
            Ok(next) => {
                self.board = next;
                true
            }
            Err(current) => {
                self.board = current;
                false
            }
        };
        self.log_history_step("redo", applied);
        applied
    }

    /// Drops every undo and redo entry, keeping the board.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Replaces the board wholesale and resets history.
    ///
    /// # Errors
    /// - `InvalidBoard` when `board` violates referential integrity.
    pub fn replace_board(&mut self, board: Board) -> StoreResult<()> {
        board.validate()?;
        self.board = board;
        self.history.clear();
        debug!("event=store_replace module=store status=ok");
        Ok(())
    }

    fn mutate(
        &mut self,
        op: &'static str,
        apply: impl FnOnce(&mut Board) -> StoreResult<()>,
    ) -> StoreResult<()> {
        let mut next = self.board.clone();
        if let Err(err) = apply(&mut next) {
            warn!(
                "event=store_mutation module=store op={op} status=rejected error_code={} error={err}",
                err.code()
            );
            return Err(err);
        }
        debug_assert!(
            next.validate().is_ok(),
            "{op} produced an inconsistent board: {:?}",
            next.validate()
        );

        let snapshot = std::mem::replace(&mut self.board, next);
        self.history.record(snapshot);
        debug!(
            "event=store_mutation module=store op={op} status=ok past_len={} future_len={}",
            self.history.past_len(),
            self.history.future_len()
        );
        Ok(())
    }

    fn log_history_step(&self, op: &'static str, applied: bool) {
        debug!(
            "event=store_history module=store op={op} status={} past_len={} future_len={}",
            if applied { "ok" } else { "noop" },
            self.history.past_len(),
            self.history.future_len()
        );
    }
}

impl Default for KanbanStore {
    fn default() -> Self {
        Self::with_default_board(StoreConfig::default())
    }
}
