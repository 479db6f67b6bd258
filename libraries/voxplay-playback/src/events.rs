//! Playback Events
//!
//! Events queued by the controller for the front end to announce or render.
//! Emitted on:
//! - Status changes (play/pause/stop)
//! - Track starts and natural track ends
//! - Playlist loads
//! - Volume and mute changes
//!
//! Drained with `Controller::drain_events`.

use crate::types::PlaybackStatus;
use serde::{Deserialize, Serialize};
use voxplay_core::TrackRef;

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playback status changed
    StatusChanged {
        /// The new status
        status: PlaybackStatus,
    },

    /// A new track started in a fresh engine player
    TrackStarted {
        /// Track now playing
        track: TrackRef,
        /// Catalog announcement ("Artist - Title")
        display_name: String,
    },

    /// Track finished playing naturally (reached end)
    TrackFinished {
        /// Finished track
        track: TrackRef,
    },

    /// A playlist was loaded into the queue
    PlaylistLoaded {
        /// Matched playlist display name
        name: String,
        /// Number of tracks loaded
        tracks: usize,
    },

    /// Volume or mute changed
    VolumeChanged {
        /// Stored volume level (0-100)
        level: u8,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// An end-of-track notification arrived for a player that is gone
    StaleNotificationIgnored {
        /// Generation the notification was tagged with
        generation: u64,
    },

    /// Automatic advance after a finished track failed
    ///
    /// Nobody is waiting on the result of an engine-driven transition, so
    /// the failure is reported here instead.
    Error {
        /// Error message
        message: String,
    },
}

/// Messages sent from engine threads into the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// A player finished its track naturally
    EndOfTrack {
        /// Generation of the player that fired
        generation: u64,
    },
}
