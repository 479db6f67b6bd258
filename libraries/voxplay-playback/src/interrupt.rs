//! Command interruption bookkeeping
//!
//! While the assistant answers a spoken command, playback is paused so the
//! response can be heard. Afterwards it resumes, unless the command itself
//! was a playback decision (play/pause/stop) that should stand.
//!
//! The coordinator only decides; the controller applies the decisions to the
//! state machine under its lock.

use crate::types::{CommandKind, PlaybackStatus};

/// Tracks suspension state and the last user-facing command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterruptCoordinator {
    suspended: bool,
    was_playing: bool,
    last_command: CommandKind,
}

impl InterruptCoordinator {
    /// Create a coordinator; the initial last command is `Stop`
    pub fn new() -> Self {
        Self {
            suspended: false,
            was_playing: false,
            last_command: CommandKind::Stop,
        }
    }

    /// Record a user-facing controller call
    pub fn record(&mut self, command: CommandKind) {
        self.last_command = command;
    }

    /// Enter suspension
    ///
    /// Returns `true` if the caller must pause playback now. Records
    /// `Suspend` as the last command, so only a play/pause/stop issued
    /// during the interruption can block the unforced resume.
    pub fn suspend(&mut self, status: PlaybackStatus) -> bool {
        self.suspended = true;
        self.was_playing = status == PlaybackStatus::Playing;
        self.record(CommandKind::Suspend);
        self.was_playing
    }

    /// Leave suspension
    ///
    /// Returns `true` if the caller must resume playback. Resumes only if
    /// something was playing at suspension time and either `force` is set
    /// or the last command was not play/pause/stop. The latch is cleared
    /// either way, so a second call never resumes. Records `Resume` after
    /// the decision is made.
    pub fn resume(&mut self, force: bool) -> bool {
        let should_resume =
            self.was_playing && (force || !self.last_command.is_playback_control());
        self.suspended = false;
        self.was_playing = false;
        self.record(CommandKind::Resume);
        should_resume
    }

    /// Most recent user-facing command
    pub fn last_command(&self) -> CommandKind {
        self.last_command
    }

    /// Whether a command interruption is in progress
    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Whether playback was running when the interruption began
    pub fn was_playing(&self) -> bool {
        self.was_playing
    }
}

impl Default for InterruptCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
