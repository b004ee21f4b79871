//! Column domain model.
//!
//! # Invariants
//! - `task_ids` order is the render order of the column.
//! - `task_ids` only references tasks owned by the same board.

use super::task::TaskId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a column.
pub type ColumnId = String;

/// Ordered list of tasks under one heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    /// Task ids in display order.
    pub task_ids: Vec<TaskId>,
}

impl Column {
    /// Creates an empty column with a generated id.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(format!("column-{}", Uuid::new_v4()), title)
    }

    /// Creates an empty column with a caller-provided id.
    pub fn with_id(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            task_ids: Vec::new(),
        }
    }

    /// Position of `task_id` inside this column, if listed.
    pub fn position_of(&self, task_id: &str) -> Option<usize> {
        self.task_ids.iter().position(|id| id == task_id)
    }
}
