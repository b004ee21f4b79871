//! Bounded linear undo/redo log of board snapshots.
//!
//! # Invariants
//! - `past` is ordered oldest-first; its back is the most recent snapshot.
//! - `future` is ordered nearest-first; its front is the next redo target.
//! - Neither side ever holds more than `max_depth` entries.

use crate::model::board::Board;
use std::collections::VecDeque;

/// Snapshot history backing undo/redo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    past: VecDeque<Board>,
    future: VecDeque<Board>,
    max_depth: usize,
}

impl History {
    pub fn new(max_depth: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: VecDeque::new(),
            max_depth,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Snapshots available to undo, oldest first.
    pub fn past(&self) -> impl Iterator<Item = &Board> + '_ {
        self.past.iter()
    }

    /// Snapshots available to redo, nearest first.
    pub fn future(&self) -> impl Iterator<Item = &Board> + '_ {
        self.future.iter()
    }

    /// Records the pre-mutation board of a forward mutation.
    ///
    /// Invalidates every redo entry.
    pub fn record(&mut self, snapshot: Board) {
        self.push_past(snapshot);
        self.future.clear();
    }

    /// Steps back: returns the board to restore, parking `current` for redo.
    ///
    /// Hands `current` back as `Err` when there is nothing to undo.
    pub fn undo(&mut self, current: Board) -> Result<Board, Board> {
        match self.past.pop_back() {
            Some(previous) => {
                self.push_future(current);
                Ok(previous)
            }
            None => Err(current),
        }
    }

    /// Steps forward: returns the board to restore, parking `current` for undo.
    pub fn redo(&mut self, current: Board) -> Result<Board, Board> {
        match self.future.pop_front() {
            Some(next) => {
                self.push_past(current);
                Ok(next)
            }
            None => Err(current),
        }
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    fn push_past(&mut self, snapshot: Board) {
        self.past.push_back(snapshot);
        while self.past.len() > self.max_depth {
            self.past.pop_front();
        }
    }

    fn push_future(&mut self, snapshot: Board) {
        self.future.push_front(snapshot);
        // Farthest redo target goes first.
        self.future.truncate(self.max_depth);
    }
}
