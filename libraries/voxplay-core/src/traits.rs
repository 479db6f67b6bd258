//! Collaborator traits consumed by the playback core

use crate::error::Result;
use crate::types::{Playlist, TrackRef};

/// Callback fired by a player when its track finishes naturally
///
/// `FnOnce` makes the "at most once per player" rule part of the type.
pub type EndOfTrackCallback = Box<dyn FnOnce() + Send + 'static>;

/// Music catalog gateway
///
/// Implementers resolve playlists and tracks against a music library
/// (a cloud service, a local cache, ...). Catalog data is treated as a
/// read-mostly snapshot by the core.
pub trait CatalogGateway: Send + Sync {
    /// Enumerate all known playlists
    ///
    /// Enumeration order matters: playlist lookup takes the first match.
    fn playlists(&self) -> Vec<Playlist>;

    /// Resolve a track to a URL the playback engine can stream
    ///
    /// # Errors
    /// Returns an error if the track is unknown or the stream cannot be obtained
    fn resolve_stream(&self, track: &TrackRef) -> Result<String>;

    /// "Artist - Title" announcement for a track
    ///
    /// Falls back to [`crate::UNKNOWN_TRACK_DISPLAY`] when the catalog has no
    /// entry for the track.
    fn display_name(&self, track: &TrackRef) -> String;

    /// Record that a track was played to completion
    ///
    /// Fire-and-forget from the core's point of view: failures are logged,
    /// never retried.
    fn report_played(&self, track: &TrackRef) -> Result<()>;
}

/// Audio playback engine
///
/// Renders one stream per player instance. The core creates a fresh player
/// for every track it starts and discards the previous one.
pub trait PlaybackEngine: Send + Sync {
    /// Create a player for the given stream URL
    ///
    /// The player is created idle; nothing is rendered until
    /// [`PlayerHandle::start`] is called.
    ///
    /// # Errors
    /// Returns an error if the stream cannot be opened
    fn create_player(&self, stream_url: &str) -> Result<Box<dyn PlayerHandle>>;
}

/// A single player instance owned by the playback core
pub trait PlayerHandle: Send {
    /// Set output volume (0-100)
    fn set_volume(&mut self, level: u8);

    /// Start rendering
    ///
    /// # Errors
    /// Returns an error if the engine cannot start playback
    fn start(&mut self) -> Result<()>;

    /// Pause (`true`) or resume (`false`) in place
    fn pause(&mut self, paused: bool);

    /// Stop rendering
    ///
    /// A stopped player must never fire its end-of-track callback.
    fn stop(&mut self);

    /// Register the end-of-track callback
    ///
    /// Invoked at most once, only when the track finishes naturally. May be
    /// called from any thread.
    fn on_end_of_track(&mut self, callback: EndOfTrackCallback);
}
