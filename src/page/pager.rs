//! Pagination engine: fixed-capacity screens over an ordered row sequence.
//!
//! Movement saturates at both ends: forward on the last screen and back on
//! the first are no-ops.

use std::num::NonZeroUsize;
use std::ops::Range;

use crate::error::PageError;

/// Which way a navigation action moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Back,
}

/// Screen index over `total_rows` rows, `capacity` rows per screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    capacity: NonZeroUsize,
    total_rows: usize,
    current: usize,
}

impl Pager {
    /// # Errors
    /// `InvalidCapacity` when `capacity` is zero.
    pub fn new(capacity: usize, total_rows: usize) -> Result<Self, PageError> {
        let capacity = NonZeroUsize::new(capacity).ok_or(PageError::InvalidCapacity)?;
        Ok(Self {
            capacity,
            total_rows,
            current: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Zero-based index of the visible screen.
    pub fn current(&self) -> usize {
        self.current
    }

    /// `ceil(rows / capacity)`, but at least 1 so empty content still renders.
    pub fn total_pages(&self) -> usize {
        self.total_rows.div_ceil(self.capacity.get()).max(1)
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.total_pages()
    }

    /// Track a change in row count, keeping the index in bounds.
    pub fn set_total_rows(&mut self, total_rows: usize) {
        self.total_rows = total_rows;
        self.current = self.current.min(self.total_pages() - 1);
    }

    /// Next screen; stays put on the last one. Returns whether it moved.
    pub fn forward(&mut self) -> bool {
        let next = (self.current + 1).min(self.total_pages() - 1);
        let moved = next != self.current;
        self.current = next;
        moved
    }

    /// Previous screen; stays put on the first one. Returns whether it moved.
    pub fn back(&mut self) -> bool {
        let prev = self.current.saturating_sub(1);
        let moved = prev != self.current;
        self.current = prev;
        moved
    }

    pub fn go(&mut self, direction: Direction) -> bool {
        let moved = match direction {
            Direction::Forward => self.forward(),
            Direction::Back => self.back(),
        };
        tracing::trace!(?direction, moved, page = self.current, "pager move");
        moved
    }

    /// Row indices shown on the current screen.
    pub fn visible_range(&self) -> Range<usize> {
        let start = (self.current * self.capacity.get()).min(self.total_rows);
        let end = (start + self.capacity.get()).min(self.total_rows);
        start..end
    }

    /// The slice of `items` shown on the current screen.
    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.visible_range();
        let end = range.end.min(items.len());
        &items[range.start.min(end)..end]
    }
}

// ============================================================================
// TESTS
// ============================================================================
