//! Linear undo history over full canvas snapshots.
//!
//! Every mutation pushes a complete copy of the canvas state. The cursor
//! always points at the snapshot matching the live canvas; undo walks it
//! back one step. There is no redo: a push after an undo discards the tail.

use crate::store::CanvasState;

/// Default maximum number of snapshots kept.
pub const HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<CanvasState>,
    /// `None` until the first push.
    cursor: Option<usize>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(HISTORY_LIMIT)
    }
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            snapshots: Vec::with_capacity(limit.min(HISTORY_LIMIT) + 1),
            cursor: None,
            limit: limit.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    /// Snapshot the cursor points at.
    pub fn current(&self) -> Option<&CanvasState> {
        self.cursor.and_then(|c| self.snapshots.get(c))
    }

    pub fn push(&mut self, snapshot: CanvasState) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.snapshots.truncate(keep);

        self.snapshots.push(snapshot);
        let mut cursor = self.snapshots.len() - 1;

        if self.snapshots.len() > self.limit {
            self.snapshots.remove(0);
            cursor -= 1;
        }
        self.cursor = Some(cursor);
    }

    /// Step back one snapshot and return it, or `None` at the boundary.
    pub fn undo(&mut self) -> Option<&CanvasState> {
        match self.cursor {
            Some(c) if c > 0 => {
                self.cursor = Some(c - 1);
                self.snapshots.get(c - 1)
            }
            _ => None,
        }
    }
}
