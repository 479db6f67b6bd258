//! Voice command dispatch
//!
//! Maps recognized text onto controller calls and produces the sentence the
//! assistant should speak back, if any.

use crate::controller::Controller;
use crate::error::Result;
use crate::types::{LoopMode, VolumeDirection};
use std::convert::Infallible;
use std::str::FromStr;
use tracing::debug;

/// Reply for text that is not a player command
pub const UNKNOWN_COMMAND_REPLY: &str = "I don't know what to do.";

/// A parsed player command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceCommand {
    /// "play <playlist>": load the playlist, then play
    PlayPlaylist(String),
    /// "resume" or a bare "play"
    Resume,
    /// "pause"
    Pause,
    /// "stop"
    Stop,
    /// "next"
    Next,
    /// "previous"
    Previous,
    /// "shuffle on" / "shuffle off"
    Shuffle(bool),
    /// "shuffle status"
    ShuffleStatus,
    /// "looping off" / "looping all" / "looping one"
    Loop(LoopMode),
    /// "looping status"
    LoopStatus,
    /// "volume up" / "volume down"
    Volume(VolumeDirection),
    /// "mute"
    Mute,
    /// "unmute"
    Unmute,
    /// Anything else
    Unknown(String),
}

const PHRASES: &[(&str, VoiceCommand)] = &[
    ("resume", VoiceCommand::Resume),
    ("pause", VoiceCommand::Pause),
    ("stop", VoiceCommand::Stop),
    ("next", VoiceCommand::Next),
    ("previous", VoiceCommand::Previous),
    ("shuffle on", VoiceCommand::Shuffle(true)),
    ("shuffle off", VoiceCommand::Shuffle(false)),
    ("shuffle status", VoiceCommand::ShuffleStatus),
    ("looping off", VoiceCommand::Loop(LoopMode::Off)),
    ("looping all", VoiceCommand::Loop(LoopMode::All)),
    ("looping one", VoiceCommand::Loop(LoopMode::One)),
    ("looping status", VoiceCommand::LoopStatus),
    ("volume up", VoiceCommand::Volume(VolumeDirection::Up)),
    ("volume down", VoiceCommand::Volume(VolumeDirection::Down)),
    ("mute", VoiceCommand::Mute),
    ("unmute", VoiceCommand::Unmute),
];

/// Fixed phrases the player understands (besides "play <playlist>")
pub fn command_phrases() -> impl Iterator<Item = &'static str> {
    PHRASES.iter().map(|(phrase, _)| *phrase)
}

impl VoiceCommand {
    /// Whether this is something the player handles
    pub fn is_player_command(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl FromStr for VoiceCommand {
    type Err = Infallible;

    /// Parse recognized text; never fails, unmatched text is `Unknown`
    fn from_str(text: &str) -> std::result::Result<Self, Self::Err> {
        let text = text.trim().to_lowercase();

        if let Some((_, command)) = PHRASES.iter().find(|(phrase, _)| *phrase == text) {
            return Ok(command.clone());
        }

        if let Some(rest) = text.strip_prefix("play") {
            if rest.is_empty() {
                return Ok(Self::Resume);
            }
            // "playlist" is not "play list"
            if rest.starts_with(char::is_whitespace) {
                return Ok(Self::PlayPlaylist(rest.trim().to_string()));
            }
        }

        Ok(Self::Unknown(text))
    }
}

/// Run a command against the controller
///
/// Returns the sentence to announce, if the command has one.
///
/// # Errors
///
/// Propagates engine failures from commands that start playback.
pub fn execute(controller: &Controller, command: VoiceCommand) -> Result<Option<String>> {
    debug!(?command, "Executing voice command");

    match command {
        VoiceCommand::PlayPlaylist(name) => {
            if controller.load(&name).is_none() {
                return Ok(Some(format!("I am not able to find {name}")));
            }
            controller.play()?;
        }
        VoiceCommand::Resume => controller.play()?,
        VoiceCommand::Pause => controller.pause(),
        VoiceCommand::Stop => controller.stop(),
        VoiceCommand::Next => controller.next()?,
        VoiceCommand::Previous => controller.previous()?,
        VoiceCommand::Shuffle(enabled) => controller.set_shuffle(enabled),
        VoiceCommand::ShuffleStatus => {
            let state = if controller.shuffle_status() { "on" } else { "off" };
            return Ok(Some(format!("Shuffle is {state}")));
        }
        VoiceCommand::Loop(mode) => controller.set_loop(mode),
        VoiceCommand::LoopStatus => {
            return Ok(Some(loop_announcement(controller.loop_status()).to_string()));
        }
        VoiceCommand::Volume(direction) => {
            controller.volume_adjust(direction, controller.volume_step());
        }
        VoiceCommand::Mute => controller.mute(),
        VoiceCommand::Unmute => controller.unmute(),
        VoiceCommand::Unknown(text) => {
            debug!(text = %text, "Not a player command");
            return Ok(Some(UNKNOWN_COMMAND_REPLY.to_string()));
        }
    }

    Ok(None)
}

fn loop_announcement(mode: LoopMode) -> &'static str {
    match mode {
        LoopMode::Off => "looping is off",
        LoopMode::All => "looping all songs",
        LoopMode::One => "looping this song",
    }
}
