//! Core types for playback control

use serde::{Deserialize, Serialize};

/// Playback status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackStatus {
    /// No track loaded into the engine
    Stopped,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

/// Traversal policy at the end of the track list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopMode {
    /// Stop when the playlist ends
    #[default]
    Off,

    /// Loop the entire playlist
    All,

    /// Repeat the current track
    One,
}

/// Volume adjustment direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeDirection {
    /// Louder
    Up,

    /// Quieter
    Down,
}

/// Identity of a user-facing controller operation
///
/// Recorded after every user command so the interrupt coordinator can tell
/// whether a playback decision was made while the player was suspended.
/// The interruption calls record themselves too, as non-playback commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandKind {
    /// `load(name)`
    Load,
    /// `play()`
    Play,
    /// `pause()`
    Pause,
    /// `stop()`
    Stop,
    /// `next()`
    Next,
    /// `previous()`
    Previous,
    /// `set_shuffle()` or `shuffle_status()`
    Shuffle,
    /// `set_loop()` or `loop_status()`
    Loop,
    /// `volume_adjust()`
    Volume,
    /// `mute()`
    Mute,
    /// `unmute()`
    Unmute,
    /// `pause_for_command()`
    Suspend,
    /// `resume_after_command()`
    Resume,
}

impl CommandKind {
    /// Play, pause and stop decide the playback state on their own
    pub fn is_playback_control(self) -> bool {
        matches!(self, Self::Play | Self::Pause | Self::Stop)
    }
}

/// Configuration for the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume (0-100, default: 50)
    pub volume: u8,

    /// Start muted (default: false)
    pub muted: bool,

    /// Initial shuffle state (default: false)
    pub shuffle: bool,

    /// Initial loop mode (default: Off)
    pub loop_mode: LoopMode,

    /// Step used by "volume up" / "volume down" (default: 10)
    pub volume_step: u8,

    /// Maximum entries kept on each shuffle history stack (default: 100)
    pub history_size: usize,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 50,
            muted: false,
            shuffle: false,
            loop_mode: LoopMode::Off,
            volume_step: 10,
            history_size: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlaybackConfig::default();
        assert_eq!(config.volume, 50);
        assert!(!config.muted);
        assert!(!config.shuffle);
        assert_eq!(config.loop_mode, LoopMode::Off);
        assert_eq!(config.volume_step, 10);
        assert_eq!(config.history_size, 100);
    }

    #[test]
    fn playback_control_commands() {
        assert!(CommandKind::Play.is_playback_control());
        assert!(CommandKind::Pause.is_playback_control());
        assert!(CommandKind::Stop.is_playback_control());

        assert!(!CommandKind::Next.is_playback_control());
        assert!(!CommandKind::Load.is_playback_control());
        assert!(!CommandKind::Volume.is_playback_control());
        assert!(!CommandKind::Suspend.is_playback_control());
        assert!(!CommandKind::Resume.is_playback_control());
    }
}
