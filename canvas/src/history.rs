//! Undo/redo over whole-scene snapshots.
//!
//! Because [`Scene`] is copy-on-write, retaining a snapshot is a reference
//! count bump rather than a deep clone.
//!
//! ```text
//! commit(s0 -> s1)          undo()                   commit(s1 -> s2)
//! undo: [s0]                undo: []                 undo: [s0]
//! redo: []                  redo: [s1]               redo: []      <- cleared
//! current: s1               current: s0              current: s2
//! ```
//!
//! A new commit always clears the redo stack, so redo never replays a
//! timeline that the user has since diverged from.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;

use crate::scene::Scene;

/// Undo and redo stacks of scene snapshots.
#[derive(Debug, Clone)]
pub struct History {
    /// Oldest entry at the front, most recent at the back.
    undo: VecDeque<Scene>,
    /// Next redo entry at the back.
    redo: Vec<Scene>,
    max_depth: usize,
}

impl History {
    /// Empty history retaining at most `max_depth` undo entries (minimum 1).
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self { undo: VecDeque::new(), redo: Vec::new(), max_depth: max_depth.max(1) }
    }

    /// Record the scene as it was before a committed mutation.
    pub fn commit(&mut self, previous: Scene) {
        self.redo.clear();
        self.push_undo(previous);
    }

    /// Step back. `current` moves onto the redo stack and the most recent
    /// undo entry is returned. `None` when there is nothing to undo.
    pub fn undo(&mut self, current: Scene) -> Option<Scene> {
        let previous = self.undo.pop_back()?;
        self.redo.push(current);
        Some(previous)
    }

    /// Step forward. `current` moves onto the undo stack and the most
    /// recently undone entry is returned. `None` when there is nothing to redo.
    pub fn redo(&mut self, current: Scene) -> Option<Scene> {
        let next = self.redo.pop()?;
        self.push_undo(current);
        Some(next)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Drop every entry on both stacks.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    fn push_undo(&mut self, scene: Scene) {
        self.undo.push_back(scene);
        while self.undo.len() > self.max_depth {
            self.undo.pop_front();
        }
    }
}
