//! Shuffle navigation history
//!
//! Bounded stacks of visited track indices. Used only while shuffling, so
//! that "previous" and a following "next" retrace an otherwise random path.

use std::collections::VecDeque;

/// Bounded stack of track indices
///
/// Most recent entry at the back. When full, the oldest entry is discarded.
#[derive(Debug, Clone)]
pub struct IndexStack {
    entries: VecDeque<usize>,
    max_size: usize,
}

impl IndexStack {
    /// Create a stack holding at most `max_size` indices
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_size,
        }
    }

    /// Push an index, dropping the oldest one if full
    pub fn push(&mut self, index: usize) {
        if self.max_size == 0 {
            return;
        }
        if self.entries.len() >= self.max_size {
            self.entries.pop_front();
        }
        self.entries.push_back(index);
    }

    /// Pop the most recent index
    pub fn pop(&mut self) -> Option<usize> {
        self.entries.pop_back()
    }

    /// Number of stored indices
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the stack is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all indices
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Indices oldest first
    pub fn to_vec(&self) -> Vec<usize> {
        self.entries.iter().copied().collect()
    }
}

/// Backward and forward shuffle history
///
/// `retreat` moves an index from backward to forward, `advance` replays
/// from forward before picking anything new.
#[derive(Debug, Clone)]
pub struct ShuffleHistory {
    pub(crate) backward: IndexStack,
    pub(crate) forward: IndexStack,
}

impl ShuffleHistory {
    /// Create empty history; each stack holds at most `max_size` indices
    pub fn new(max_size: usize) -> Self {
        Self {
            backward: IndexStack::new(max_size),
            forward: IndexStack::new(max_size),
        }
    }

    /// Forget both directions
    pub fn clear(&mut self) {
        self.backward.clear();
        self.forward.clear();
    }

    /// Check if both stacks are empty
    pub fn is_empty(&self) -> bool {
        self.backward.is_empty() && self.forward.is_empty()
    }

    /// Backward stack, oldest first
    pub fn backward(&self) -> Vec<usize> {
        self.backward.to_vec()
    }

    /// Forward stack, oldest first
    pub fn forward(&self) -> Vec<usize> {
        self.forward.to_vec()
    }
}

impl Default for ShuffleHistory {
    fn default() -> Self {
        Self::new(100)
    }
}
