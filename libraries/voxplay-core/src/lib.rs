//! voxplay Core
//!
//! Shared domain types, collaborator traits, and error handling for voxplay.
//!
//! The playback core never talks to a music service or an audio library
//! directly. It consumes them through the narrow contracts defined here:
//! - **Domain Types**: `TrackId`, `TrackRef`, `Playlist`
//! - **Collaborator Traits**: `CatalogGateway`, `PlaybackEngine`, `PlayerHandle`
//! - **Error Handling**: `VoxError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use voxplay_core::types::{Playlist, TrackRef};
//!
//! let track = TrackRef::new("t1", "Queen", "Bohemian Rhapsody");
//! let playlist = Playlist::new("Classic Rock", vec![track.clone()]);
//!
//! assert_eq!(track.display_name(), "Queen - Bohemian Rhapsody");
//! assert_eq!(playlist.len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Result, VoxError};
pub use traits::{CatalogGateway, EndOfTrackCallback, PlaybackEngine, PlayerHandle};
pub use types::{Playlist, TrackId, TrackRef, UNKNOWN_TRACK_DISPLAY};
