//! Linear undo/redo over full point-list snapshots.

use crate::point::Point;

/// Snapshot history with a cursor.
///
/// Entries are never edited after they are pushed; committing while the
/// cursor is not at the end drops the redo tail.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<Vec<Point>>,
    cursor: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commit(&mut self, snapshot: &[Point]) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.entries.truncate(keep);
        self.entries.push(snapshot.to_vec());
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Steps back and returns a copy of that snapshot.
    pub fn undo(&mut self) -> Option<Vec<Point>> {
        let cursor = self.cursor.filter(|&c| c > 0)? - 1;
        self.cursor = Some(cursor);
        Some(self.entries[cursor].clone())
    }

    pub fn redo(&mut self) -> Option<Vec<Point>> {
        let cursor = self.cursor? + 1;
        let entry = self.entries.get(cursor)?.clone();
        self.cursor = Some(cursor);
        Some(entry)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::sample_point;

    fn snap(ids: &[u64]) -> Vec<Point> {
        ids.iter().map(|&id| sample_point(id, 0.0, 0.0)).collect()
    }

    #[test]
    fn undo_restores_previous_snapshot() {
        let mut h = History::new();
        h.commit(&snap(&[1]));
        h.commit(&snap(&[1, 2]));
        assert_eq!(h.undo(), Some(snap(&[1])));
        assert!(h.can_redo());
    }

    #[test]
    fn commit_after_undo_drops_redo() {
        let mut h = History::new();
        h.commit(&snap(&[1]));
        h.commit(&snap(&[1, 2]));
        h.undo();
        h.commit(&snap(&[3]));
        assert_eq!(h.redo(), None);
        assert_eq!(h.len(), 2);
        assert_eq!(h.undo(), Some(snap(&[1])));
    }

    #[test]
    fn bounds_are_no_ops() {
        let mut h = History::new();
        assert_eq!(h.undo(), None);
        assert_eq!(h.redo(), None);
        h.commit(&snap(&[]));
        assert_eq!(h.undo(), None);
        assert_eq!(h.cursor(), Some(0));
        assert!(!h.can_undo());
    }

    #[test]
    fn returned_snapshots_are_copies() {
        let mut h = History::new();
        h.commit(&snap(&[1]));
        h.commit(&snap(&[2]));
        let mut first = h.undo().unwrap();
        first[0].x = 99.0;
        h.redo();
        assert_eq!(h.undo().unwrap()[0].x, 0.0);
    }
}
