//! voxplay - Playback Control
//!
//! The voice-driven player core. It answers "what should the player be doing
//! right now?" and never touches audio or the network itself.
//!
//! This crate provides:
//! - Playlist queue with a tagged cursor (`Empty`, `NotStarted`, `At`, `Finished`)
//! - Shuffle as random picks with backward/forward history
//! - Loop modes (Off, All, One)
//! - Tri-state playback machine (Stopped, Playing, Paused)
//! - Volume control (0-100, mute/unmute)
//! - Command interruption (pause for a spoken reply, then resume)
//! - Voice command parsing and announcements
//!
//! # Architecture
//!
//! All state sits behind one mutex owned by [`Controller`]. The playback
//! engine reports finished tracks on its own thread; those reports travel
//! through a channel to the [`EventPump`], which applies them under the same
//! lock. Every report carries the generation of the player that sent it, so
//! reports from stopped or replaced players are ignored.
//!
//! The catalog and engine are provided via the traits in `voxplay-core`.
//!
//! # Example
//!
//! ```rust
//! use voxplay_playback::{Cursor, LoopMode, Queue};
//! use voxplay_core::{Playlist, TrackRef};
//!
//! let playlists = vec![
//!     Playlist::new("Classic Rock", vec![
//!         TrackRef::new("t1", "Queen", "Bohemian Rhapsody"),
//!         TrackRef::new("t2", "Led Zeppelin", "Kashmir"),
//!     ]),
//!     Playlist::new("Jazz", vec![]),
//! ];
//!
//! let mut queue = Queue::with_seed(100, 7);
//! assert_eq!(queue.load("roc", &playlists).as_deref(), Some("Classic Rock"));
//! assert_eq!(queue.current().map(|t| t.title.as_str()), Some("Bohemian Rhapsody"));
//!
//! queue.advance();
//! queue.advance();
//! assert_eq!(queue.cursor(), Cursor::Finished);
//!
//! queue.set_loop_mode(LoopMode::All);
//! assert_eq!(queue.loop_mode(), LoopMode::All);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod controller;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod history;
pub mod interrupt;
pub mod queue;
pub mod shuffle;
mod state;
pub mod types;
pub mod volume;

// Re-export commonly used types
pub use controller::{Controller, EventPump};
pub use dispatch::{command_phrases, execute, VoiceCommand, UNKNOWN_COMMAND_REPLY};
pub use error::{PlaybackError, Result};
pub use events::{EngineEvent, PlaybackEvent};
pub use history::ShuffleHistory;
pub use interrupt::InterruptCoordinator;
pub use queue::{Cursor, Queue};
pub use types::{CommandKind, LoopMode, PlaybackConfig, PlaybackStatus, VolumeDirection};
pub use volume::Volume;
