//! Board search and render projections.
//!
//! # Responsibility
//! - Shape board state into the rows UI layers render.
//! - Keep filter semantics inside core so every UI behaves the same.

pub mod filter;
