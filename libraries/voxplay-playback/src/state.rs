//! Playback state machine
//!
//! Owns the tri-state status, the volume/mute state and the active engine
//! player. Asks the queue what to play and reacts to end-of-track
//! notifications.
//!
//! ```text
//!            play (track available)
//!   Stopped ───────────────────────► Playing ◄──── play ────┐
//!      ▲  ▲                           │   │                 │
//!      │  └──────── stop ─────────────┘   └──── pause ──► Paused
//!      └──────────────────── stop ──────────────────────────┘
//!
//!   end-of-track: Playing ──► Stopped ──advance──► play
//! ```
//!
//! Every player gets a generation number. End-of-track notifications carry
//! it, and only a notification matching the active player is acted upon.

use crate::error::{PlaybackError, Result};
use crate::events::{EngineEvent, PlaybackEvent};
use crate::queue::Queue;
use crate::types::{PlaybackConfig, PlaybackStatus, VolumeDirection};
use crate::volume::Volume;
use crossbeam_channel::Sender;
use std::sync::Arc;
use tracing::{debug, info, warn};
use voxplay_core::{CatalogGateway, PlaybackEngine, PlayerHandle, TrackRef};

/// Collaborators the state machine drives
pub(crate) struct Backend {
    pub(crate) catalog: Arc<dyn CatalogGateway>,
    pub(crate) engine: Arc<dyn PlaybackEngine>,
}

/// The engine player currently loaded, tagged with its generation
struct ActivePlayer {
    generation: u64,
    track: TrackRef,
    player: Box<dyn PlayerHandle>,
}

/// Tri-state playback machine
///
/// Invariant: `active` is `Some` exactly when `status != Stopped`.
pub(crate) struct PlaybackMachine {
    status: PlaybackStatus,
    volume: Volume,
    active: Option<ActivePlayer>,

    // Last generation handed out
    generation: u64,
    notify_tx: Sender<EngineEvent>,

    // Event queue for the front end
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackMachine {
    pub(crate) fn new(config: &PlaybackConfig, notify_tx: Sender<EngineEvent>) -> Self {
        Self {
            status: PlaybackStatus::Stopped,
            volume: Volume::new(config.volume, config.muted),
            active: None,
            generation: 0,
            notify_tx,
            pending_events: Vec::new(),
        }
    }

    // ===== Playback Control =====

    /// Start or resume playback
    ///
    /// Paused resumes in place. Stopped asks the queue for its current
    /// track and stays stopped if there is none.
    pub(crate) fn play(&mut self, queue: &mut Queue, backend: &Backend) -> Result<()> {
        match self.status {
            PlaybackStatus::Playing => Ok(()),
            PlaybackStatus::Paused => {
                if let Some(active) = self.active.as_mut() {
                    active.player.pause(false);
                }
                self.set_status(PlaybackStatus::Playing);
                Ok(())
            }
            PlaybackStatus::Stopped => {
                let Some(track) = queue.current().cloned() else {
                    debug!(cursor = ?queue.cursor(), "Nothing to play");
                    return Ok(());
                };
                self.start_track(track, backend)
            }
        }
    }

    /// Pause playback (only from Playing)
    pub(crate) fn pause(&mut self) {
        if self.status != PlaybackStatus::Playing {
            return;
        }
        if let Some(active) = self.active.as_mut() {
            active.player.pause(true);
        }
        self.set_status(PlaybackStatus::Paused);
    }

    /// Stop playback and discard the active player
    ///
    /// Any end-of-track notification still in flight for that player
    /// becomes stale.
    pub(crate) fn stop(&mut self) {
        if self.status == PlaybackStatus::Stopped {
            return;
        }
        if let Some(mut active) = self.active.take() {
            debug!(generation = active.generation, track = %active.track.id, "Stopping player");
            active.player.stop();
        }
        self.set_status(PlaybackStatus::Stopped);
    }

    /// Skip forward
    pub(crate) fn next(&mut self, queue: &mut Queue, backend: &Backend) -> Result<()> {
        self.skip(queue, backend, Queue::advance)
    }

    /// Skip backward
    pub(crate) fn previous(&mut self, queue: &mut Queue, backend: &Backend) -> Result<()> {
        self.skip(queue, backend, Queue::retreat)
    }

    /// Stop, move the cursor, and play again unless we were stopped
    ///
    /// Skipping while stopped only moves the cursor.
    fn skip(&mut self, queue: &mut Queue, backend: &Backend, step: fn(&mut Queue)) -> Result<()> {
        let saved_status = self.status;
        self.stop();
        step(queue);
        if saved_status != PlaybackStatus::Stopped {
            self.play(queue, backend)?;
        }
        Ok(())
    }

    /// Handle an end-of-track notification
    ///
    /// Returns `Ok(false)` for stale notifications (player already stopped
    /// or replaced), which are otherwise ignored.
    ///
    /// A paused player that still finishes is treated like a playing one:
    /// the next track starts `Playing`, even during a command interruption.
    pub(crate) fn end_of_track(
        &mut self,
        generation: u64,
        queue: &mut Queue,
        backend: &Backend,
    ) -> Result<bool> {
        let is_active = self
            .active
            .as_ref()
            .is_some_and(|active| active.generation == generation);
        if !is_active {
            debug!(generation, current = self.generation, "Ignoring stale end-of-track");
            self.emit(PlaybackEvent::StaleNotificationIgnored { generation });
            return Ok(false);
        }

        if self.status == PlaybackStatus::Paused {
            debug!(generation, "Track finished while paused, advancing anyway");
        }

        let Some(finished) = self.active.take() else {
            return Ok(false);
        };
        self.set_status(PlaybackStatus::Stopped);

        if let Err(e) = backend.catalog.report_played(&finished.track) {
            warn!(track = %finished.track.id, error = %e, "Failed to report play count");
        }
        self.emit(PlaybackEvent::TrackFinished {
            track: finished.track,
        });

        queue.advance();
        self.play(queue, backend)?;
        Ok(true)
    }

    /// Load a track into a fresh player and start it
    fn start_track(&mut self, track: TrackRef, backend: &Backend) -> Result<()> {
        let stream_url = backend.catalog.resolve_stream(&track).map_err(|source| {
            PlaybackError::StreamResolution {
                track: track.id.clone(),
                source,
            }
        })?;

        let mut player = backend
            .engine
            .create_player(&stream_url)
            .map_err(PlaybackError::Engine)?;

        self.generation += 1;
        let generation = self.generation;
        let notify_tx = self.notify_tx.clone();
        player.on_end_of_track(Box::new(move || {
            // Receiver is gone once the controller is dropped
            notify_tx.send(EngineEvent::EndOfTrack { generation }).ok();
        }));
        player.set_volume(self.volume.effective_level());
        player.start().map_err(PlaybackError::Engine)?;

        let display_name = backend.catalog.display_name(&track);
        info!(track = %track.id, generation, "Playing... {}", display_name);

        self.active = Some(ActivePlayer {
            generation,
            track: track.clone(),
            player,
        });
        self.set_status(PlaybackStatus::Playing);
        self.emit(PlaybackEvent::TrackStarted {
            track,
            display_name,
        });
        Ok(())
    }

    // ===== Volume =====

    /// Adjust volume, clamped to 0-100; always unmutes
    pub(crate) fn adjust_volume(&mut self, direction: VolumeDirection, amount: u8) {
        self.volume.adjust(direction, amount);
        self.push_volume();
    }

    /// Mute audio (no-op if already muted)
    pub(crate) fn mute(&mut self) {
        if self.volume.mute() {
            self.push_volume();
        }
    }

    /// Unmute audio (no-op if not muted)
    pub(crate) fn unmute(&mut self) {
        if self.volume.unmute() {
            self.push_volume();
        }
    }

    fn push_volume(&mut self) {
        let level = self.volume.effective_level();
        if let Some(active) = self.active.as_mut() {
            active.player.set_volume(level);
        }
        self.emit(PlaybackEvent::VolumeChanged {
            level: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }

    // ===== State Queries =====

    pub(crate) fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub(crate) fn volume(&self) -> &Volume {
        &self.volume
    }

    pub(crate) fn active_track(&self) -> Option<&TrackRef> {
        self.active.as_ref().map(|active| &active.track)
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    // ===== Events =====

    pub(crate) fn emit(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }

    pub(crate) fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn set_status(&mut self, status: PlaybackStatus) {
        if self.status != status {
            self.status = status;
            self.emit(PlaybackEvent::StatusChanged { status });
        }
    }
}
