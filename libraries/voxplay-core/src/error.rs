//! Core error types for voxplay collaborators

use crate::types::TrackId;
use thiserror::Error;

/// Result type alias using `VoxError`
pub type Result<T> = std::result::Result<T, VoxError>;

/// Errors surfaced by the catalog gateway and the playback engine
#[derive(Error, Debug)]
pub enum VoxError {
    /// Track is unknown to the catalog
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// Catalog knows the track but cannot hand out a stream for it
    #[error("Stream unavailable for {track}: {reason}")]
    StreamUnavailable {
        /// Track whose stream could not be resolved
        track: TrackId,
        /// Human-readable cause
        reason: String,
    },

    /// Playback engine rejected a player operation
    #[error("Engine error: {0}")]
    Engine(String),

    /// Catalog backend failure (cache, service)
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VoxError {
    /// Create an engine error
    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine(msg.into())
    }

    /// Create a catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }
}
