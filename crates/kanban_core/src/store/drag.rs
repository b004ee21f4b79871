//! Drag-and-drop payloads reported by the UI drag capability.
//!
//! # Invariants
//! - Positions are plain list indices inside one column's `task_ids`.
//! - A missing destination means the drop was cancelled.

use crate::model::column::ColumnId;

/// One end of a drag gesture: a column and a position inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DragLocation {
    pub container_id: ColumnId,
    pub index: usize,
}

impl DragLocation {
    pub fn new(container_id: impl Into<ColumnId>, index: usize) -> Self {
        Self {
            container_id: container_id.into(),
            index,
        }
    }
}

/// Drop event emitted when a drag gesture ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropResult {
    pub source: DragLocation,
    pub destination: Option<DragLocation>,
}

impl DropResult {
    /// Returns the move to perform, or `None` for cancelled and in-place drops.
    pub fn as_move(&self) -> Option<(&DragLocation, &DragLocation)> {
        let destination = self.destination.as_ref()?;
        if *destination == self.source {
            return None;
        }
        Some((&self.source, destination))
    }
}
