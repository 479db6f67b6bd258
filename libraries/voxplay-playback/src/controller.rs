//! Playback controller
//!
//! Composes the queue, the playback state machine and the interrupt
//! coordinator behind one mutex. User commands and engine end-of-track
//! messages both go through that lock, so a `stop()` racing a finishing
//! track can never advance the queue twice or touch a discarded player.
//!
//! ```text
//!   user thread ──► Controller ──┐
//!                                ├──► Mutex<Deck> { Queue, PlaybackMachine, InterruptCoordinator }
//!   engine thread ──► channel ──► EventPump ──┘
//! ```

use crate::error::Result;
use crate::events::{EngineEvent, PlaybackEvent};
use crate::interrupt::InterruptCoordinator;
use crate::queue::{Cursor, Queue};
use crate::state::{Backend, PlaybackMachine};
use crate::types::{CommandKind, LoopMode, PlaybackConfig, PlaybackStatus, VolumeDirection};
use crossbeam_channel::{Receiver, TryRecvError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::{debug, info, warn};
use voxplay_core::{CatalogGateway, PlaybackEngine, Playlist, TrackRef};

/// Everything guarded by the controller lock
struct Deck {
    queue: Queue,
    machine: PlaybackMachine,
    interrupt: InterruptCoordinator,
    backend: Backend,
}

impl Deck {
    fn end_of_track(&mut self, generation: u64) -> Result<bool> {
        let Deck {
            queue,
            machine,
            backend,
            ..
        } = self;
        machine.end_of_track(generation, queue, backend)
    }
}

// A panic in one command must not wedge the player for good
fn lock(deck: &Mutex<Deck>) -> MutexGuard<'_, Deck> {
    deck.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Voice-facing playback controller
///
/// Cheap to clone; all clones drive the same player.
///
/// # Example
///
/// ```rust,ignore
/// let (controller, pump) = Controller::new(catalog, engine, PlaybackConfig::default());
/// std::thread::spawn(move || pump.run());
///
/// if controller.load("rock").is_some() {
///     controller.play()?;
/// }
/// ```
#[derive(Clone)]
pub struct Controller {
    deck: Arc<Mutex<Deck>>,
    volume_step: u8,
}

impl Controller {
    /// Create a controller and the pump that feeds it engine notifications
    pub fn new(
        catalog: Arc<dyn CatalogGateway>,
        engine: Arc<dyn PlaybackEngine>,
        config: PlaybackConfig,
    ) -> (Self, EventPump) {
        let queue = Queue::new(config.history_size);
        Self::with_queue(catalog, engine, &config, queue)
    }

    /// Same as [`Controller::new`] with a deterministic shuffle sequence
    pub fn with_seed(
        catalog: Arc<dyn CatalogGateway>,
        engine: Arc<dyn PlaybackEngine>,
        config: PlaybackConfig,
        seed: u64,
    ) -> (Self, EventPump) {
        let queue = Queue::with_seed(config.history_size, seed);
        Self::with_queue(catalog, engine, &config, queue)
    }

    fn with_queue(
        catalog: Arc<dyn CatalogGateway>,
        engine: Arc<dyn PlaybackEngine>,
        config: &PlaybackConfig,
        mut queue: Queue,
    ) -> (Self, EventPump) {
        let (notify_tx, notify_rx) = crossbeam_channel::unbounded();

        queue.set_shuffle(config.shuffle);
        queue.set_loop_mode(config.loop_mode);

        let deck = Arc::new(Mutex::new(Deck {
            queue,
            machine: PlaybackMachine::new(config, notify_tx),
            interrupt: InterruptCoordinator::new(),
            backend: Backend { catalog, engine },
        }));

        let pump = EventPump {
            deck: Arc::downgrade(&deck),
            notify_rx,
        };
        let controller = Self {
            deck,
            volume_step: config.volume_step,
        };
        (controller, pump)
    }

    fn deck(&self) -> MutexGuard<'_, Deck> {
        lock(&self.deck)
    }

    // ===== Commands =====

    /// Load the first playlist whose name contains `name`
    ///
    /// Stops playback and resets the queue first, even when nothing
    /// matches. Returns the matched playlist's display name.
    pub fn load(&self, name: &str) -> Option<String> {
        let mut deck = self.deck();
        deck.machine.stop();

        let playlists = deck.backend.catalog.playlists();
        let loaded = deck.queue.load(name, &playlists);
        match &loaded {
            Some(playlist) => {
                let tracks = deck.queue.len();
                info!(query = name, playlist = %playlist, tracks, "Playlist loaded");
                deck.machine.emit(PlaybackEvent::PlaylistLoaded {
                    name: playlist.clone(),
                    tracks,
                });
            }
            None => debug!(query = name, "Playlist not found"),
        }

        deck.interrupt.record(CommandKind::Load);
        loaded
    }

    /// Start or resume playback
    ///
    /// # Errors
    ///
    /// Fails if the stream cannot be resolved or the engine refuses to
    /// start; the controller stays stopped.
    pub fn play(&self) -> Result<()> {
        let mut deck = self.deck();
        let Deck {
            queue,
            machine,
            backend,
            ..
        } = &mut *deck;
        let result = machine.play(queue, backend);
        deck.interrupt.record(CommandKind::Play);
        result
    }

    /// Pause playback
    pub fn pause(&self) {
        let mut deck = self.deck();
        deck.machine.pause();
        deck.interrupt.record(CommandKind::Pause);
    }

    /// Stop playback
    pub fn stop(&self) {
        let mut deck = self.deck();
        deck.machine.stop();
        deck.interrupt.record(CommandKind::Stop);
    }

    /// Skip to the next track
    ///
    /// Keeps playing if something was playing or paused.
    ///
    /// # Errors
    ///
    /// Same failures as [`Controller::play`].
    pub fn next(&self) -> Result<()> {
        let mut deck = self.deck();
        let Deck {
            queue,
            machine,
            backend,
            ..
        } = &mut *deck;
        let result = machine.next(queue, backend);
        deck.interrupt.record(CommandKind::Next);
        result
    }

    /// Go back to the previous track
    ///
    /// # Errors
    ///
    /// Same failures as [`Controller::play`].
    pub fn previous(&self) -> Result<()> {
        let mut deck = self.deck();
        let Deck {
            queue,
            machine,
            backend,
            ..
        } = &mut *deck;
        let result = machine.previous(queue, backend);
        deck.interrupt.record(CommandKind::Previous);
        result
    }

    /// Enable or disable shuffle (clears shuffle history)
    pub fn set_shuffle(&self, enabled: bool) {
        let mut deck = self.deck();
        deck.queue.set_shuffle(enabled);
        debug!(enabled, "Shuffle set");
        deck.interrupt.record(CommandKind::Shuffle);
    }

    /// Whether shuffle is on
    pub fn shuffle_status(&self) -> bool {
        let mut deck = self.deck();
        let enabled = deck.queue.is_shuffled();
        deck.interrupt.record(CommandKind::Shuffle);
        enabled
    }

    /// Set loop mode
    pub fn set_loop(&self, mode: LoopMode) {
        let mut deck = self.deck();
        deck.queue.set_loop_mode(mode);
        debug!(?mode, "Loop mode set");
        deck.interrupt.record(CommandKind::Loop);
    }

    /// Current loop mode
    pub fn loop_status(&self) -> LoopMode {
        let mut deck = self.deck();
        let mode = deck.queue.loop_mode();
        deck.interrupt.record(CommandKind::Loop);
        mode
    }

    /// Move the volume by `amount`, clamped to 0-100; always unmutes
    pub fn volume_adjust(&self, direction: VolumeDirection, amount: u8) {
        let mut deck = self.deck();
        deck.machine.adjust_volume(direction, amount);
        deck.interrupt.record(CommandKind::Volume);
    }

    /// Mute audio
    pub fn mute(&self) {
        let mut deck = self.deck();
        deck.machine.mute();
        deck.interrupt.record(CommandKind::Mute);
    }

    /// Unmute audio
    pub fn unmute(&self) {
        let mut deck = self.deck();
        deck.machine.unmute();
        deck.interrupt.record(CommandKind::Unmute);
    }

    // ===== Command Interruption =====

    /// Pause whatever is playing so a spoken response can be heard
    ///
    /// Position is kept; this pauses, never stops. Recorded as
    /// [`CommandKind::Suspend`].
    pub fn pause_for_command(&self) {
        let mut deck = self.deck();
        let status = deck.machine.status();
        if deck.interrupt.suspend(status) {
            deck.machine.pause();
        }
        debug!(?status, "Suspended for command");
    }

    /// Resume after a command if appropriate
    ///
    /// With `force` unset, a play/pause/stop issued during the interruption
    /// wins over the state from before it. Recorded as
    /// [`CommandKind::Resume`] once the decision is made.
    ///
    /// # Errors
    ///
    /// Same failures as [`Controller::play`].
    pub fn resume_after_command(&self, force: bool) -> Result<()> {
        let mut deck = self.deck();
        if !deck.interrupt.resume(force) {
            debug!(force, "Not resuming");
            return Ok(());
        }

        let Deck {
            queue,
            machine,
            backend,
            ..
        } = &mut *deck;
        machine.play(queue, backend)
    }

    // ===== State Queries =====

    /// Current playback status
    pub fn status(&self) -> PlaybackStatus {
        self.deck().machine.status()
    }

    /// Stored volume level (0-100)
    pub fn volume(&self) -> u8 {
        self.deck().machine.volume().level()
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.deck().machine.volume().is_muted()
    }

    /// Track held by the active player
    pub fn now_playing(&self) -> Option<TrackRef> {
        self.deck().machine.active_track().cloned()
    }

    /// Display name the catalog announces for a track
    pub fn display_name(&self, track: &TrackRef) -> String {
        self.deck().backend.catalog.display_name(track)
    }

    /// Most recent user-facing command
    pub fn last_command(&self) -> CommandKind {
        self.deck().interrupt.last_command()
    }

    /// Whether a command interruption is in progress
    pub fn is_suspended(&self) -> bool {
        self.deck().interrupt.is_suspended()
    }

    /// Number of tracks in the loaded playlist
    pub fn queue_len(&self) -> usize {
        self.deck().queue.len()
    }

    /// Queue cursor
    pub fn cursor(&self) -> Cursor {
        self.deck().queue.cursor()
    }

    /// Playlists known to the catalog, in catalog order
    pub fn playlists(&self) -> Vec<Playlist> {
        self.deck().backend.catalog.playlists()
    }

    /// Generation of the most recently created player
    pub fn generation(&self) -> u64 {
        self.deck().machine.generation()
    }

    /// Step used for "volume up" and "volume down"
    pub fn volume_step(&self) -> u8 {
        self.volume_step
    }

    /// Take all events emitted since the last call
    pub fn drain_events(&self) -> Vec<PlaybackEvent> {
        self.deck().machine.drain_events()
    }
}

/// Delivers engine end-of-track messages into the controller lock
///
/// Holds only a weak reference, so it never keeps a dropped controller
/// alive.
pub struct EventPump {
    deck: Weak<Mutex<Deck>>,
    notify_rx: Receiver<EngineEvent>,
}

impl EventPump {
    /// Process every pending message without blocking
    ///
    /// Returns how many messages advanced playback (stale ones don't count).
    ///
    /// # Errors
    ///
    /// Returns the first failure to start the following track. Messages
    /// after it stay queued for the next call.
    pub fn drain(&self) -> Result<usize> {
        let mut handled = 0;
        loop {
            match self.notify_rx.try_recv() {
                Ok(event) => {
                    if self.handle(event)? {
                        handled += 1;
                    }
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return Ok(handled),
            }
        }
    }

    /// Block on the channel until the controller is gone
    ///
    /// Meant to run on a dedicated thread. Failures to start the following
    /// track are logged and queued as [`PlaybackEvent::Error`].
    pub fn run(self) {
        while let Ok(event) = self.notify_rx.recv() {
            let Some(shared) = self.deck.upgrade() else {
                break;
            };
            let mut deck = lock(&shared);
            if let Err(e) = deck.end_of_track(Self::generation_of(event)) {
                warn!(error = %e, "Failed to continue after end of track");
                deck.machine.emit(PlaybackEvent::Error {
                    message: e.to_string(),
                });
            }
        }
        debug!("Event pump stopped");
    }

    fn handle(&self, event: EngineEvent) -> Result<bool> {
        let Some(shared) = self.deck.upgrade() else {
            return Ok(false);
        };
        let mut deck = lock(&shared);
        deck.end_of_track(Self::generation_of(event))
    }

    fn generation_of(event: EngineEvent) -> u64 {
        match event {
            EngineEvent::EndOfTrack { generation } => generation,
        }
    }
}
