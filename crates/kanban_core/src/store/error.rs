//! Store error types.

use crate::model::board::BoardInvariantError;
use crate::model::column::ColumnId;
use crate::model::task::TaskId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Coarse classification of store failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// A referenced task or column does not exist.
    NotFound,
    /// The operation would create an id that already exists, or would load a
    /// board that contradicts itself.
    Conflict,
}

/// Misuse of a store operation. The store is unchanged when returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    TaskNotFound(TaskId),
    ColumnNotFound(ColumnId),
    /// Task exists but is not listed under the given column.
    TaskNotInColumn {
        task_id: TaskId,
        column_id: ColumnId,
    },
    /// Drag source index points past the end of the source column.
    NoTaskAtIndex {
        column_id: ColumnId,
        index: usize,
        len: usize,
    },
    TaskConflict(TaskId),
    ColumnConflict(ColumnId),
    /// Replacement board fails referential integrity checks.
    InvalidBoard(BoardInvariantError),
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            Self::TaskNotFound(_)
            | Self::ColumnNotFound(_)
            | Self::TaskNotInColumn { .. }
            | Self::NoTaskAtIndex { .. } => StoreErrorKind::NotFound,
            Self::TaskConflict(_) | Self::ColumnConflict(_) | Self::InvalidBoard(_) => {
                StoreErrorKind::Conflict
            }
        }
    }

    /// Stable snake_case code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TaskNotFound(_) => "task_not_found",
            Self::ColumnNotFound(_) => "column_not_found",
            Self::TaskNotInColumn { .. } => "task_not_in_column",
            Self::NoTaskAtIndex { .. } => "no_task_at_index",
            Self::TaskConflict(_) => "task_conflict",
            Self::ColumnConflict(_) => "column_conflict",
            Self::InvalidBoard(_) => "invalid_board",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::ColumnNotFound(id) => write!(f, "column not found: {id}"),
            Self::TaskNotInColumn { task_id, column_id } => {
                write!(f, "task {task_id} is not listed in column {column_id}")
            }
            Self::NoTaskAtIndex {
                column_id,
                index,
                len,
            } => write!(
                f,
                "no task at index {index} in column {column_id} (length {len})"
            ),
            Self::TaskConflict(id) => write!(f, "task already exists: {id}"),
            Self::ColumnConflict(id) => write!(f, "column already exists: {id}"),
            Self::InvalidBoard(err) => write!(f, "invalid board: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidBoard(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BoardInvariantError> for StoreError {
    fn from(value: BoardInvariantError) -> Self {
        Self::InvalidBoard(value)
    }
}
