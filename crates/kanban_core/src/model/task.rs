//! Task domain model.
//!
//! # Responsibility
//! - Define the card record rendered inside board columns.
//! - Provide partial-update semantics for editable fields.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - Partial updates never change `id` or `created_at`.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for a task.
///
/// Kept as a type alias because ids are caller-supplied strings
/// (UI layers historically use `task-<timestamp>`).
pub type TaskId = String;

/// Description assigned to tasks created from a bare title.
pub const DEFAULT_TASK_DESCRIPTION: &str = "Add description here";

/// One card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable global ID, unique across the whole board.
    pub id: TaskId,
    /// Short label shown on the card.
    pub title: String,
    /// Free-form body text.
    pub description: String,
    /// Unix epoch milliseconds at creation time.
    pub created_at: i64,
}

impl Task {
    /// Creates a task with a generated id and the current timestamp.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_id(
            format!("task-{}", Uuid::new_v4()),
            title,
            description,
            now_epoch_ms(),
        )
    }

    /// Creates a task with a caller-provided id and timestamp.
    ///
    /// Used by import paths and tests where identity already exists.
    pub fn with_id(
        id: impl Into<TaskId>,
        title: impl Into<String>,
        description: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            created_at,
        }
    }

    /// Merges present patch fields into this task.
    pub fn apply_patch(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(description) = &patch.description {
            self.description.clone_from(description);
        }
    }
}

/// Partial update for editable task fields.
///
/// `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl TaskPatch {
    /// Patch that only replaces the title.
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: None,
        }
    }

    /// Patch that only replaces the description.
    pub fn description(description: impl Into<String>) -> Self {
        Self {
            title: None,
            description: Some(description.into()),
        }
    }
}

/// Current wall-clock time in Unix epoch milliseconds.
///
/// Clock errors (time before epoch) collapse to `0`.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
