//! Playlist queue with a tagged traversal cursor
//!
//! Owns the tracks of the loaded playlist and decides which one is current.
//! Shuffle does not reorder the tracks; it picks random indices and records
//! them in a backward/forward history so that "previous" and "next" can
//! retrace the path.
//!
//! ```text
//!   load ──► NotStarted ──current()──► At(i) ──advance()──► At(i+1) ... At(n-1)
//!                                        ▲                                │
//!                                        └──── current() ◄── Finished ◄───┘ (loop off)
//! ```

use crate::history::ShuffleHistory;
use crate::shuffle::pick_index;
use crate::types::LoopMode;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;
use voxplay_core::{Playlist, TrackRef};

/// Logical position of the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// No playlist loaded
    Empty,

    /// Playlist loaded, no track picked yet
    NotStarted,

    /// Pointing at `tracks[index]`
    At(usize),

    /// Non-looping playback ran off the end
    Finished,
}

/// Queue for the currently loaded playlist
#[derive(Debug, Clone)]
pub struct Queue {
    tracks: Vec<TrackRef>,
    cursor: Cursor,
    shuffle: bool,
    loop_mode: LoopMode,
    history: ShuffleHistory,
    rng: StdRng,
}

impl Queue {
    /// Create an empty queue
    ///
    /// `history_size` bounds each shuffle history stack.
    pub fn new(history_size: usize) -> Self {
        Self::with_rng(history_size, StdRng::from_entropy())
    }

    /// Create an empty queue with a deterministic shuffle sequence
    pub fn with_seed(history_size: usize, seed: u64) -> Self {
        Self::with_rng(history_size, StdRng::seed_from_u64(seed))
    }

    fn with_rng(history_size: usize, rng: StdRng) -> Self {
        Self {
            tracks: Vec::new(),
            cursor: Cursor::Empty,
            shuffle: false,
            loop_mode: LoopMode::Off,
            history: ShuffleHistory::new(history_size),
            rng,
        }
    }

    /// Drop all tracks and history
    ///
    /// Shuffle and loop settings survive a reset.
    pub fn reset(&mut self) {
        self.tracks.clear();
        self.cursor = Cursor::Empty;
        self.history.clear();
    }

    /// Load the first playlist whose name contains `query`
    ///
    /// Matching is a case-insensitive substring test in enumeration order;
    /// the first hit wins, even if later playlists match too. The queue is
    /// reset whether or not anything matches.
    ///
    /// Returns the matched playlist's display name.
    pub fn load(&mut self, query: &str, playlists: &[Playlist]) -> Option<String> {
        self.reset();

        let needle = query.trim().to_lowercase();
        let Some(playlist) = playlists
            .iter()
            .find(|playlist| playlist.name.trim().to_lowercase().contains(&needle))
        else {
            debug!(query, "No playlist matches");
            return None;
        };

        debug!(query, playlist = %playlist.name, tracks = playlist.len(), "Playlist matched");

        self.tracks.clone_from(&playlist.tracks);
        if !self.tracks.is_empty() {
            self.cursor = Cursor::NotStarted;
        }

        Some(playlist.name.clone())
    }

    /// Resolve the cursor to a track
    ///
    /// - `NotStarted` picks a starting index (random when shuffling, else 0)
    ///   and returns that track.
    /// - `Finished` picks a starting index the same way but returns `None`,
    ///   so playback stops at the end and the next play starts over.
    /// - `Empty` returns `None`.
    pub fn current(&mut self) -> Option<&TrackRef> {
        match self.cursor {
            Cursor::Empty => None,
            Cursor::At(index) => self.tracks.get(index),
            Cursor::NotStarted => {
                self.cursor = self.fresh_cursor();
                match self.cursor {
                    Cursor::At(index) => self.tracks.get(index),
                    _ => None,
                }
            }
            Cursor::Finished => {
                self.cursor = self.fresh_cursor();
                None
            }
        }
    }

    /// Move the cursor forward
    ///
    /// - Repeat-one leaves the cursor untouched.
    /// - Shuffling replays the forward history first, otherwise picks a random
    ///   index other than the current one.
    /// - In order, running past the end finishes (loop off) or wraps (loop all).
    ///
    /// From `NotStarted` or `Finished`, in-order traversal moves to index 0.
    pub fn advance(&mut self) {
        if self.tracks.is_empty() {
            self.cursor = Cursor::Empty;
            return;
        }

        if self.loop_mode == LoopMode::One {
            return;
        }

        let len = self.tracks.len();

        if self.shuffle {
            let previous = self.position();
            if let Some(index) = previous {
                self.history.backward.push(index);
            }

            let next = match self.history.forward.pop() {
                Some(index) => index,
                None => pick_index(&mut self.rng, len, previous),
            };
            self.cursor = Cursor::At(next);
        } else {
            let next = self.position().map_or(0, |index| index + 1);

            self.cursor = if next < len {
                Cursor::At(next)
            } else if self.loop_mode == LoopMode::Off {
                Cursor::Finished
            } else {
                Cursor::At(next % len)
            };
        }
    }

    /// Move the cursor backward
    ///
    /// Shuffling only moves when there is backward history. In order, the
    /// index is clamped at 0 (no wraparound).
    pub fn retreat(&mut self) {
        if self.tracks.is_empty() {
            self.cursor = Cursor::Empty;
            return;
        }

        if self.shuffle {
            if let Some(previous) = self.history.backward.pop() {
                if let Some(index) = self.position() {
                    self.history.forward.push(index);
                }
                self.cursor = Cursor::At(previous);
            }
        } else {
            let index = self.position().map_or(0, |index| index.saturating_sub(1));
            self.cursor = Cursor::At(index);
        }
    }

    /// Enable or disable shuffle
    ///
    /// Always clears both history stacks.
    pub fn set_shuffle(&mut self, enabled: bool) {
        self.shuffle = enabled;
        self.history.clear();
    }

    /// Set loop mode
    pub fn set_loop_mode(&mut self, mode: LoopMode) {
        self.loop_mode = mode;
    }

    /// Check if shuffle is enabled
    pub fn is_shuffled(&self) -> bool {
        self.shuffle
    }

    /// Get loop mode
    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    /// Get cursor
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Current index, if the cursor points at a track
    pub fn position(&self) -> Option<usize> {
        match self.cursor {
            Cursor::At(index) if index < self.tracks.len() => Some(index),
            _ => None,
        }
    }

    /// Tracks of the loaded playlist, in playlist order
    pub fn tracks(&self) -> &[TrackRef] {
        &self.tracks
    }

    /// Number of tracks loaded
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if no tracks are loaded
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Shuffle history stacks
    pub fn history(&self) -> &ShuffleHistory {
        &self.history
    }

    fn fresh_cursor(&mut self) -> Cursor {
        if self.tracks.is_empty() {
            return Cursor::Empty;
        }

        if self.shuffle {
            Cursor::At(pick_index(&mut self.rng, self.tracks.len(), None))
        } else {
            Cursor::At(0)
        }
    }
}

impl Default for Queue {
    fn default() -> Self {
        Self::new(100)
    }
}
