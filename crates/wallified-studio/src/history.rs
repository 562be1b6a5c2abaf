//! Bounded linear undo history.

use std::collections::VecDeque;

/// Ordered snapshots plus a cursor.
///
/// The cursor is `None` only while the log is empty. Pushing while the
/// cursor is behind the newest entry discards the forward tail first; once
/// `capacity` is exceeded the oldest snapshot is evicted.
#[derive(Debug, Clone)]
pub struct HistoryLog<T> {
    entries: VecDeque<T>,
    cursor: Option<usize>,
    capacity: usize,
}

impl<T> HistoryLog<T> {
    /// Create an empty log holding at most `capacity` snapshots (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            cursor: None,
            capacity,
        }
    }

    /// Record `entry` as the newest snapshot and move the cursor onto it
    pub fn push(&mut self, entry: T) {
        let keep = self.cursor.map_or(0, |cursor| cursor + 1);
        if keep < self.entries.len() {
            tracing::debug!(
                "Discarding {} redo snapshot(s)",
                self.entries.len() - keep
            );
            self.entries.truncate(keep);
        }

        self.entries.push_back(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
            tracing::trace!("History full, evicted oldest snapshot");
        }
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Step back; returns the snapshot now under the cursor
    pub fn undo(&mut self) -> Option<&T> {
        match self.cursor {
            Some(cursor) if cursor > 0 => {
                self.cursor = Some(cursor - 1);
                self.entries.get(cursor - 1)
            }
            _ => None,
        }
    }

    /// Step forward; returns the snapshot now under the cursor
    pub fn redo(&mut self) -> Option<&T> {
        match self.cursor {
            Some(cursor) if cursor + 1 < self.entries.len() => {
                self.cursor = Some(cursor + 1);
                self.entries.get(cursor + 1)
            }
            _ => None,
        }
    }

    /// Snapshot under the cursor
    pub fn current(&self) -> Option<&T> {
        self.cursor.and_then(|cursor| self.entries.get(cursor))
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor + 1 < self.entries.len())
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }
}
