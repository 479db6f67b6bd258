//! Simulated playback engine
//!
//! Stands in for a real audio backend. Every player owns a timer thread
//! that counts play time while started and not paused, and reports the end
//! of the track once the configured track length has elapsed.
//!
//! ```text
//!   SimulatedPlayer ──Control──► timer thread ──(track length elapsed)──► end-of-track callback
//! ```

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, trace};
use voxplay_core::{EndOfTrackCallback, PlaybackEngine, PlayerHandle, Result, VoxError};

/// Messages from a player handle to its timer thread
enum Control {
    Start,
    Pause(bool),
    Volume(u8),
    OnEndOfTrack(EndOfTrackCallback),
    Stop,
}

/// Engine whose players pretend every track lasts `track_length`
#[derive(Debug, Clone)]
pub struct SimulatedEngine {
    track_length: Duration,
}

impl SimulatedEngine {
    /// Create an engine with a fixed track length
    pub fn new(track_length: Duration) -> Self {
        Self { track_length }
    }
}

impl PlaybackEngine for SimulatedEngine {
    fn create_player(&self, stream_url: &str) -> Result<Box<dyn PlayerHandle>> {
        let (control_tx, control_rx) = unbounded();
        let url = stream_url.to_string();
        let track_length = self.track_length;

        thread::Builder::new()
            .name("sim-player".to_string())
            .spawn(move || timer_thread(&url, track_length, &control_rx))
            .map_err(|e| VoxError::engine(format!("Failed to spawn player thread: {e}")))?;

        debug!(url = stream_url, "Simulated player created");
        Ok(Box::new(SimulatedPlayer { control_tx }))
    }
}

/// Handle to one simulated player
pub struct SimulatedPlayer {
    control_tx: Sender<Control>,
}

impl SimulatedPlayer {
    fn send(&self, control: Control) {
        // Thread is gone once the track ended or the player stopped
        self.control_tx.send(control).ok();
    }
}

impl PlayerHandle for SimulatedPlayer {
    fn set_volume(&mut self, level: u8) {
        self.send(Control::Volume(level));
    }

    fn start(&mut self) -> Result<()> {
        self.control_tx
            .send(Control::Start)
            .map_err(|_| VoxError::engine("player thread exited before start"))
    }

    fn pause(&mut self, paused: bool) {
        self.send(Control::Pause(paused));
    }

    fn stop(&mut self) {
        self.send(Control::Stop);
    }

    fn on_end_of_track(&mut self, callback: EndOfTrackCallback) {
        self.send(Control::OnEndOfTrack(callback));
    }
}

impl Drop for SimulatedPlayer {
    fn drop(&mut self) {
        self.send(Control::Stop);
    }
}

fn timer_thread(url: &str, track_length: Duration, control_rx: &Receiver<Control>) {
    let mut callback: Option<EndOfTrackCallback> = None;
    let mut played = Duration::ZERO;
    // Set while the clock is running
    let mut resumed_at: Option<Instant> = None;

    loop {
        let message = match resumed_at {
            Some(since) => {
                let remaining = track_length.saturating_sub(played + since.elapsed());
                control_rx.recv_timeout(remaining)
            }
            None => control_rx
                .recv()
                .map_err(|_| RecvTimeoutError::Disconnected),
        };

        match message {
            Ok(Control::Start | Control::Pause(false)) => {
                if resumed_at.is_none() {
                    resumed_at = Some(Instant::now());
                }
            }
            Ok(Control::Pause(true)) => {
                if let Some(since) = resumed_at.take() {
                    played += since.elapsed();
                }
            }
            Ok(Control::Volume(level)) => trace!(url, level, "Volume set"),
            Ok(Control::OnEndOfTrack(registered)) => callback = Some(registered),
            Ok(Control::Stop) | Err(RecvTimeoutError::Disconnected) => {
                debug!(url, "Simulated player stopped");
                return;
            }
            Err(RecvTimeoutError::Timeout) => {
                debug!(url, "Simulated track finished");
                if let Some(callback) = callback.take() {
                    callback();
                }
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    fn player_with_signal(engine: &SimulatedEngine) -> (Box<dyn PlayerHandle>, Receiver<()>) {
        let (done_tx, done_rx) = bounded(1);
        let mut player = engine.create_player("sim://t1").unwrap();
        player.on_end_of_track(Box::new(move || {
            done_tx.send(()).ok();
        }));
        (player, done_rx)
    }

    #[test]
    fn fires_after_track_length() {
        let engine = SimulatedEngine::new(Duration::from_millis(20));
        let (mut player, done_rx) = player_with_signal(&engine);

        player.start().unwrap();

        assert!(done_rx.recv_timeout(Duration::from_secs(2)).is_ok());
    }

    #[test]
    fn idle_player_never_fires() {
        let engine = SimulatedEngine::new(Duration::from_millis(10));
        let (_player, done_rx) = player_with_signal(&engine);

        assert!(done_rx.recv_timeout(Duration::from_millis(100)).is_err());
    }

    #[test]
    fn stopped_player_never_fires() {
        let engine = SimulatedEngine::new(Duration::from_millis(50));
        let (mut player, done_rx) = player_with_signal(&engine);

        player.start().unwrap();
        player.stop();

        assert!(done_rx.recv_timeout(Duration::from_millis(200)).is_err());
    }

    #[test]
    fn pause_holds_the_clock() {
        let engine = SimulatedEngine::new(Duration::from_millis(60));
        let (mut player, done_rx) = player_with_signal(&engine);

        player.start().unwrap();
        player.pause(true);
        assert!(done_rx.recv_timeout(Duration::from_millis(200)).is_err());

        player.pause(false);
        assert!(done_rx.recv_timeout(Duration::from_secs(2)).is_ok());
    }
}
