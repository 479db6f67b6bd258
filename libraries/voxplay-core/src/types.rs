//! Domain types shared between the catalog and the playback core

use serde::{Deserialize, Serialize};
use std::fmt;

/// Announcement used when the catalog has no metadata for a track
pub const UNKNOWN_TRACK_DISPLAY: &str = "Unknown Artist - Unknown Title";

/// Track identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    /// Create a new track ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to a playable track
///
/// Obtained from the catalog and never mutated afterwards. Carries just
/// enough metadata to announce the track.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackRef {
    /// Catalog identifier
    pub id: TrackId,

    /// Artist name
    pub artist: String,

    /// Track title
    pub title: String,
}

impl TrackRef {
    /// Create a new track reference
    pub fn new(id: impl Into<String>, artist: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: TrackId::new(id),
            artist: artist.into(),
            title: title.into(),
        }
    }

    /// "Artist - Title"
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.artist, self.title)
    }
}

/// Named, ordered list of tracks as enumerated by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Display name
    pub name: String,

    /// Tracks in playback order
    pub tracks: Vec<TrackRef>,
}

impl Playlist {
    /// Create a new playlist
    pub fn new(name: impl Into<String>, tracks: Vec<TrackRef>) -> Self {
        Self {
            name: name.into(),
            tracks,
        }
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the playlist has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
