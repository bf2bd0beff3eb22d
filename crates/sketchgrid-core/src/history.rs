//! Linear edit history with a cursor.
//!
//! The history is a log of immutable commands. Entries before the cursor
//! are applied to the bitmap; entries at or after it can be redone. Undo
//! works by replaying the applied prefix onto a cleared stroke layer rather
//! than by keeping bitmap snapshots, so memory grows with stroke count and
//! not with pixel count.

use crate::stroke::Stroke;
use serde::{Deserialize, Serialize};

/// Default maximum number of entries kept.
pub const DEFAULT_HISTORY_CAPACITY: usize = 200;

/// One recorded edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HistoryEntry {
    /// A committed stroke.
    Stroke(Stroke),
    /// The stroke layer was wiped.
    Clear,
}

/// Coarse position of the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryState {
    /// Nothing recorded.
    Empty,
    /// Every entry is applied.
    AtTail,
    /// Some entries are available to redo.
    MidHistory,
}

/// Command log with an undo/redo cursor.
#[derive(Debug, Clone)]
pub struct HistoryStack {
    entries: Vec<HistoryEntry>,
    /// Number of applied entries.
    cursor: usize,
    capacity: usize,
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStack {
    /// Create an empty history with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Create an empty history holding at most `capacity` entries (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    /// Record an entry at the cursor.
    ///
    /// Drops the redo branch and moves the cursor to the new tail. If the
    /// log grows past capacity, the oldest entries are removed and returned
    /// so the caller can bake them into its baseline; they can no longer be
    /// undone.
    pub fn commit(&mut self, entry: HistoryEntry) -> Vec<HistoryEntry> {
        let discarded = self.entries.len() - self.cursor;
        if discarded > 0 {
            log::debug!("Discarding {} redo entries", discarded);
        }
        self.entries.truncate(self.cursor);
        self.entries.push(entry);

        let evicted = if self.entries.len() > self.capacity {
            let overflow = self.entries.len() - self.capacity;
            log::debug!("History full, evicting {} oldest entries", overflow);
            self.entries.drain(..overflow).collect()
        } else {
            Vec::new()
        };

        self.cursor = self.entries.len();
        evicted
    }

    /// Step the cursor back one entry.
    ///
    /// Returns false (and does nothing) at the start. On success the caller
    /// replays [`applied`](Self::applied) onto a cleared layer.
    pub fn undo(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Step the cursor forward one entry and return it for re-application.
    ///
    /// Returns `None` (and does nothing) at the tail.
    pub fn redo(&mut self) -> Option<&HistoryEntry> {
        if self.cursor == self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor - 1)
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }

    /// Entries currently applied to the bitmap, oldest first.
    pub fn applied(&self) -> &[HistoryEntry] {
        &self.entries[..self.cursor]
    }

    /// Cursor position (number of applied entries).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Total number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Coarse cursor state.
    pub fn state(&self) -> HistoryState {
        if self.entries.is_empty() {
            HistoryState::Empty
        } else if self.cursor == self.entries.len() {
            HistoryState::AtTail
        } else {
            HistoryState::MidHistory
        }
    }

    /// Forget everything.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::{OpenStroke, SerializableColor};
    use crate::tools::{BrushWidth, ToolKind, ToolSnapshot};
    use kurbo::Point;

    fn stroke(x: f64) -> HistoryEntry {
        let snapshot = ToolSnapshot {
            tool: ToolKind::Brush,
            width: BrushWidth::DEFAULT,
        };
        let mut open = OpenStroke::begin(Point::new(x, 0.0), snapshot, SerializableColor::COPPER);
        open.push(Point::new(x, 10.0));
        HistoryEntry::Stroke(open.finish())
    }

    #[test]
    fn test_empty_history() {
        let mut history = HistoryStack::new();
        assert_eq!(history.state(), HistoryState::Empty);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(!history.undo());
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_commit_advances_cursor() {
        let mut history = HistoryStack::new();
        history.commit(stroke(1.0));
        history.commit(HistoryEntry::Clear);
        assert_eq!(history.cursor(), 2);
        assert_eq!(history.len(), 2);
        assert_eq!(history.state(), HistoryState::AtTail);
        assert_eq!(history.applied()[1], HistoryEntry::Clear);
    }

    #[test]
    fn test_undo_redo_moves_cursor() {
        let mut history = HistoryStack::new();
        let s1 = stroke(1.0);
        let s2 = stroke(2.0);
        history.commit(s1.clone());
        history.commit(s2.clone());

        assert!(history.undo());
        assert_eq!(history.state(), HistoryState::MidHistory);
        assert_eq!(history.applied(), &[s1.clone()]);
        assert!(history.can_redo());

        assert_eq!(history.redo(), Some(&s2));
        assert_eq!(history.state(), HistoryState::AtTail);
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_undo_stops_at_start() {
        let mut history = HistoryStack::new();
        history.commit(stroke(1.0));
        assert!(history.undo());
        assert!(!history.undo());
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.state(), HistoryState::MidHistory);
    }

    #[test]
    fn test_commit_discards_redo_branch() {
        let mut history = HistoryStack::new();
        history.commit(stroke(1.0));
        history.commit(stroke(2.0));
        assert!(history.undo());

        let replacement = stroke(3.0);
        history.commit(replacement.clone());

        assert!(!history.can_redo());
        assert!(history.redo().is_none());
        assert_eq!(history.len(), 2);
        assert_eq!(history.applied()[1], replacement);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = HistoryStack::with_capacity(2);
        let s1 = stroke(1.0);
        assert!(history.commit(s1.clone()).is_empty());
        assert!(history.commit(stroke(2.0)).is_empty());

        let evicted = history.commit(stroke(3.0));
        assert_eq!(evicted, vec![s1]);
        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), 2);
    }

    #[test]
    fn test_capacity_minimum_is_one() {
        let history = HistoryStack::with_capacity(0);
        assert_eq!(history.capacity(), 1);
    }

    #[test]
    fn test_reset() {
        let mut history = HistoryStack::new();
        history.commit(stroke(1.0));
        history.reset();
        assert!(history.is_empty());
        assert_eq!(history.state(), HistoryState::Empty);
    }
}
