//! Error types for playback control

use thiserror::Error;
use voxplay_core::{TrackId, VoxError};

/// Playback errors
///
/// Only genuine collaborator failures are errors. Empty queues, fresh starts
/// and finished playlists are ordinary control flow and never show up here.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Catalog could not produce a stream for the track
    #[error("Failed to resolve stream for {track}: {source}")]
    StreamResolution {
        /// Track that was about to play
        track: TrackId,
        /// Underlying catalog error
        #[source]
        source: VoxError,
    },

    /// Playback engine failed to create or start a player
    #[error("Playback engine failure: {0}")]
    Engine(#[source] VoxError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
