//! Board aggregate root.
//!
//! # Responsibility
//! - Own every task and column of one kanban board.
//! - Check referential integrity between tasks and column membership.
//!
//! # Invariants
//! - Every task id listed by a column exists in `tasks`.
//! - Every task id is listed at most once across all columns.
//! - `column_order` is a permutation of the keys of `columns`.
//! - Map keys equal the `id` field of the stored value.

use super::column::{Column, ColumnId};
use super::task::{Task, TaskId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Ids and titles of the board used when nothing was persisted yet.
const DEFAULT_COLUMNS: [(&str, &str); 3] = [
    ("column-1", "To Do"),
    ("column-2", "In Progress"),
    ("column-3", "Done"),
];

/// Complete board state. This is the unit of snapshotting and persistence.
///
/// `Clone` produces a fully independent copy: the aggregate only holds owned
/// strings and vectors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub tasks: BTreeMap<TaskId, Task>,
    pub columns: BTreeMap<ColumnId, Column>,
    pub column_order: Vec<ColumnId>,
}

/// Referential-integrity violation found by [`Board::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardInvariantError {
    /// A column lists a task id missing from `tasks`.
    DanglingTaskId { column_id: ColumnId, task_id: TaskId },
    /// A task id is listed more than once across columns.
    DuplicateTaskId { task_id: TaskId },
    /// `column_order` names a column missing from `columns`.
    UnknownColumnInOrder { column_id: ColumnId },
    /// `column_order` lists the same column twice.
    DuplicateColumnInOrder { column_id: ColumnId },
    /// A column exists but is absent from `column_order`.
    ColumnMissingFromOrder { column_id: ColumnId },
    /// A map key disagrees with the stored value's id.
    MismatchedKey { key: String, id: String },
}

impl Display for BoardInvariantError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DanglingTaskId { column_id, task_id } => {
                write!(f, "column `{column_id}` lists unknown task `{task_id}`")
            }
            Self::DuplicateTaskId { task_id } => {
                write!(f, "task `{task_id}` is listed more than once")
            }
            Self::UnknownColumnInOrder { column_id } => {
                write!(f, "column order references unknown column `{column_id}`")
            }
            Self::DuplicateColumnInOrder { column_id } => {
                write!(f, "column order lists `{column_id}` more than once")
            }
            Self::ColumnMissingFromOrder { column_id } => {
                write!(f, "column `{column_id}` is missing from column order")
            }
            Self::MismatchedKey { key, id } => {
                write!(f, "entry stored under `{key}` has id `{id}`")
            }
        }
    }
}

impl Error for BoardInvariantError {}

impl Board {
    /// Builds the three-column board used when no persisted state exists.
    pub fn default_board() -> Self {
        let mut board = Self::default();
        for (id, title) in DEFAULT_COLUMNS {
            board
                .columns
                .insert(id.to_string(), Column::with_id(id, title));
            board.column_order.push(id.to_string());
        }
        board
    }

    /// Columns in display order.
    ///
    /// Ids in `column_order` without a matching column are skipped.
    pub fn ordered_columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.column_order
            .iter()
            .filter_map(|column_id| self.columns.get(column_id))
    }

    /// Tasks of one column in display order.
    pub fn column_tasks<'a>(&'a self, column: &'a Column) -> impl Iterator<Item = &'a Task> + 'a {
        column
            .task_ids
            .iter()
            .filter_map(|task_id| self.tasks.get(task_id))
    }

    /// Tasks present in `tasks` but listed by no column.
    pub fn unlisted_task_ids(&self) -> Vec<&TaskId> {
        let listed: HashSet<&str> = self
            .columns
            .values()
            .flat_map(|column| column.task_ids.iter().map(String::as_str))
            .collect();
        self.tasks
            .keys()
            .filter(|task_id| !listed.contains(task_id.as_str()))
            .collect()
    }

    /// Checks every board invariant, returning the first violation.
    pub fn validate(&self) -> Result<(), BoardInvariantError> {
        for (key, task) in &self.tasks {
            if key != &task.id {
                return Err(BoardInvariantError::MismatchedKey {
                    key: key.clone(),
                    id: task.id.clone(),
                });
            }
        }

        let mut seen_tasks = HashSet::new();
        for (key, column) in &self.columns {
            if key != &column.id {
                return Err(BoardInvariantError::MismatchedKey {
                    key: key.clone(),
                    id: column.id.clone(),
                });
            }
            for task_id in &column.task_ids {
                if !self.tasks.contains_key(task_id) {
                    return Err(BoardInvariantError::DanglingTaskId {
                        column_id: column.id.clone(),
                        task_id: task_id.clone(),
                    });
                }
                if !seen_tasks.insert(task_id.as_str()) {
                    return Err(BoardInvariantError::DuplicateTaskId {
                        task_id: task_id.clone(),
                    });
                }
            }
        }

        let mut order_counts: HashMap<&str, usize> = HashMap::new();
        for column_id in &self.column_order {
            if !self.columns.contains_key(column_id) {
                return Err(BoardInvariantError::UnknownColumnInOrder {
                    column_id: column_id.clone(),
                });
            }
            let count = order_counts.entry(column_id.as_str()).or_default();
            *count += 1;
            if *count > 1 {
                return Err(BoardInvariantError::DuplicateColumnInOrder {
                    column_id: column_id.clone(),
                });
            }
        }
        if let Some(column_id) = self
            .columns
            .keys()
            .find(|column_id| !order_counts.contains_key(column_id.as_str()))
        {
            return Err(BoardInvariantError::ColumnMissingFromOrder {
                column_id: column_id.clone(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Board, BoardInvariantError};
    use crate::model::column::Column;
    use crate::model::task::Task;

    fn board_with_task() -> Board {
        let mut board = Board::default_board();
        board
            .tasks
            .insert("t1".to_string(), Task::with_id("t1", "A", "", 1));
        board
            .columns
            .get_mut("column-1")
            .expect("default column")
            .task_ids
            .push("t1".to_string());
        board
    }

    #[test]
    fn default_board_has_three_empty_columns_in_order() {
        let board = Board::default_board();
        let titles: Vec<&str> = board
            .ordered_columns()
            .map(|column| column.title.as_str())
            .collect();
        assert_eq!(titles, vec!["To Do", "In Progress", "Done"]);
        assert!(board.tasks.is_empty());
        assert!(board.validate().is_ok());
    }

    #[test]
    fn validate_detects_dangling_task_id() {
        let mut board = Board::default_board();
        board
            .columns
            .get_mut("column-2")
            .expect("default column")
            .task_ids
            .push("ghost".to_string());

        assert_eq!(
            board.validate().unwrap_err(),
            BoardInvariantError::DanglingTaskId {
                column_id: "column-2".to_string(),
                task_id: "ghost".to_string(),
            }
        );
    }

    #[test]
    fn validate_detects_task_listed_twice() {
        let mut board = board_with_task();
        board
            .columns
            .get_mut("column-3")
            .expect("default column")
            .task_ids
            .push("t1".to_string());

        assert!(matches!(
            board.validate(),
            Err(BoardInvariantError::DuplicateTaskId { task_id }) if task_id == "t1"
        ));
    }

    #[test]
    fn validate_detects_column_order_drift() {
        let mut board = Board::default_board();
        board.column_order.pop();
        assert!(matches!(
            board.validate(),
            Err(BoardInvariantError::ColumnMissingFromOrder { column_id }) if column_id == "column-3"
        ));

        let mut board = Board::default_board();
        board.column_order.push("column-1".to_string());
        assert!(matches!(
            board.validate(),
            Err(BoardInvariantError::DuplicateColumnInOrder { .. })
        ));

        let mut board = Board::default_board();
        board.column_order.push("nope".to_string());
        assert!(matches!(
            board.validate(),
            Err(BoardInvariantError::UnknownColumnInOrder { .. })
        ));
    }

    #[test]
    fn validate_detects_mismatched_keys() {
        let mut board = Board::default_board();
        board
            .columns
            .insert("column-9".to_string(), Column::with_id("other", "x"));
        board.column_order.push("column-9".to_string());
        assert!(matches!(
            board.validate(),
            Err(BoardInvariantError::MismatchedKey { .. })
        ));
    }

    #[test]
    fn lookup_helpers_follow_membership() {
        let board = board_with_task();
        assert!(board.unlisted_task_ids().is_empty());

        let column = board.columns.get("column-1").expect("default column");
        let titles: Vec<&str> = board
            .column_tasks(column)
            .map(|task| task.title.as_str())
            .collect();
        assert_eq!(titles, vec!["A"]);
    }

    #[test]
    fn clone_is_independent_of_the_original() {
        let original = board_with_task();
        let mut copy = original.clone();
        copy.columns
            .get_mut("column-1")
            .expect("default column")
            .task_ids
            .clear();
        copy.tasks.clear();

        assert_eq!(original.tasks.len(), 1);
        assert_eq!(original.columns["column-1"].task_ids, vec!["t1"]);
    }
}
