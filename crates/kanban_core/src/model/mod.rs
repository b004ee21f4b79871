//! Kanban domain model.
//!
//! # Responsibility
//! - Define the task, column and board records shared by every layer.
//! - Keep the board as the single owning aggregate for tasks and columns.
//!
//! # Invariants
//! - Tasks and columns have no identity outside their board.
//! - Board values are plain data; cloning yields an independent snapshot.

pub mod board;
pub mod column;
pub mod task;
