//! Assistant session
//!
//! Handles one recognized utterance at a time, the way the voice assistant
//! does: pause the player so the reply can be heard, answer, then resume.
//! Player commands that decide playback themselves (play/pause/stop) are
//! not overridden by the resume; anything else forces it.

use tracing::{debug, warn};
use voxplay_playback::{
    command_phrases, execute, Controller, PlaybackEvent, VoiceCommand, UNKNOWN_COMMAND_REPLY,
};

/// What the console should do after an utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Speak (print) this sentence
    Say(String),
    /// Nothing to say
    Silent,
    /// End the session
    Exit,
}

/// Front-end session driving a controller
pub struct Session {
    controller: Controller,
    last_was_player_command: bool,
}

impl Session {
    pub fn new(controller: Controller) -> Self {
        Self {
            controller,
            last_was_player_command: false,
        }
    }

    /// Handle one utterance
    pub fn handle(&mut self, text: &str) -> Reply {
        let text = text.trim();
        if text.is_empty() {
            return Reply::Silent;
        }

        let lowered = text.to_lowercase();
        if matches!(lowered.as_str(), "exit" | "quit") {
            return Reply::Exit;
        }

        self.controller.pause_for_command();
        self.last_was_player_command = false;

        let reply = self.respond(&lowered);

        let force = !self.last_was_player_command;
        if let Err(e) = self.controller.resume_after_command(force) {
            warn!(error = %e, "Failed to resume after command");
        }
        reply
    }

    /// Announcements for events since the last call
    pub fn announcements(&self) -> Vec<String> {
        self.controller
            .drain_events()
            .into_iter()
            .filter_map(|event| match event {
                PlaybackEvent::TrackStarted { display_name, .. } => {
                    Some(format!("Playing... {display_name}"))
                }
                PlaybackEvent::Error { message } => Some(format!("Playback stopped: {message}")),
                _ => None,
            })
            .collect()
    }

    /// Whether the last utterance was routed to the player
    pub fn last_was_player_command(&self) -> bool {
        self.last_was_player_command
    }

    fn respond(&mut self, text: &str) -> Reply {
        match text {
            "help" => {
                let phrases: Vec<_> = command_phrases().collect();
                Reply::Say(format!(
                    "You can say: play <playlist>, {}",
                    phrases.join(", ")
                ))
            }
            "what's playing" | "what is playing" => Reply::Say(self.now_playing()),
            _ => self.player_command(text),
        }
    }

    fn player_command(&mut self, text: &str) -> Reply {
        let command = match text.parse::<VoiceCommand>() {
            Ok(command) => command,
            Err(never) => match never {},
        };

        if !command.is_player_command() {
            debug!(text, "Not a player command");
            return Reply::Say(UNKNOWN_COMMAND_REPLY.to_string());
        }

        self.last_was_player_command = true;
        match execute(&self.controller, command) {
            Ok(Some(sentence)) => Reply::Say(sentence),
            Ok(None) => Reply::Silent,
            Err(e) => {
                warn!(error = %e, "Player command failed");
                Reply::Say(format!("Sorry, I can't play that right now. {e}"))
            }
        }
    }

    fn now_playing(&self) -> String {
        match self.controller.now_playing() {
            Some(track) => self.controller.display_name(&track),
            None => "Nothing is playing".to_string(),
        }
    }
}
