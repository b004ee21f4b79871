//! Render projection of a board with optional task filtering.
//!
//! # Responsibility
//! - Resolve column order and task ids into ready-to-render rows.
//! - Apply case-insensitive substring search over title and description.
//!
//! # Invariants
//! - Column order and per-column task order follow the board exactly.
//! - Filtering hides tasks; it never hides columns.

use crate::model::board::Board;
use crate::model::column::ColumnId;
use crate::model::task::Task;

/// One column as rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    pub id: ColumnId,
    pub title: String,
    pub tasks: Vec<Task>,
}

/// Whole board as rendered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardView {
    pub columns: Vec<ColumnView>,
}

impl BoardView {
    /// Number of visible tasks across all columns.
    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|column| column.tasks.len()).sum()
    }
}

/// Builds a view of `board`, keeping only tasks matching `search_term`.
///
/// A blank term keeps every task.
pub fn build_view(board: &Board, search_term: &str) -> BoardView {
    let needle = search_term.trim().to_lowercase();
    let columns = board
        .ordered_columns()
        .map(|column| ColumnView {
            id: column.id.clone(),
            title: column.title.clone(),
            tasks: board
                .column_tasks(column)
                .filter(|task| needle.is_empty() || task_matches(task, &needle))
                .cloned()
                .collect(),
        })
        .collect();
    BoardView { columns }
}

fn task_matches(task: &Task, needle: &str) -> bool {
    task.title.to_lowercase().contains(needle) || task.description.to_lowercase().contains(needle)
}
