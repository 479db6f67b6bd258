//! Shared test doubles for the playback integration tests
//!
//! `FakeEngine` records every call made on its players and keeps their
//! end-of-track callbacks so tests decide when a track "finishes".
//! `FakeCatalog` serves fixed playlists and records reported plays.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use voxplay_core::{
    CatalogGateway, EndOfTrackCallback, PlaybackEngine, PlayerHandle, Playlist, Result, TrackId,
    TrackRef, VoxError,
};
use voxplay_playback::{Controller, EventPump, PlaybackConfig};

// ===== Catalog =====

pub struct FakeCatalog {
    playlists: Vec<Playlist>,
    unavailable: HashSet<String>,
    played: Mutex<Vec<TrackId>>,
}

impl FakeCatalog {
    pub fn new(playlists: Vec<Playlist>) -> Self {
        Self {
            playlists,
            unavailable: HashSet::new(),
            played: Mutex::new(Vec::new()),
        }
    }

    /// Make `resolve_stream` fail for a track id
    pub fn with_unavailable(mut self, id: &str) -> Self {
        self.unavailable.insert(id.to_string());
        self
    }

    pub fn played(&self) -> Vec<TrackId> {
        self.played.lock().unwrap().clone()
    }
}

impl CatalogGateway for FakeCatalog {
    fn playlists(&self) -> Vec<Playlist> {
        self.playlists.clone()
    }

    fn resolve_stream(&self, track: &TrackRef) -> Result<String> {
        if self.unavailable.contains(track.id.as_str()) {
            return Err(VoxError::StreamUnavailable {
                track: track.id.clone(),
                reason: "blocked in test".to_string(),
            });
        }
        Ok(format!("fake://{}", track.id))
    }

    fn display_name(&self, track: &TrackRef) -> String {
        track.display_name()
    }

    fn report_played(&self, track: &TrackRef) -> Result<()> {
        self.played.lock().unwrap().push(track.id.clone());
        Ok(())
    }
}

// ===== Engine =====

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCall {
    SetVolume(u8),
    Start,
    Pause(bool),
    Stop,
}

struct PlayerRecord {
    url: String,
    calls: Vec<PlayerCall>,
    callback: Option<EndOfTrackCallback>,
}

#[derive(Default)]
pub struct FakeEngine {
    players: Mutex<Vec<Arc<Mutex<PlayerRecord>>>>,
    fail_start: AtomicBool,
}

impl FakeEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every following `start()` fail
    pub fn fail_starts(&self, fail: bool) {
        self.fail_start.store(fail, Ordering::SeqCst);
    }

    pub fn player_count(&self) -> usize {
        self.players.lock().unwrap().len()
    }

    pub fn url(&self, player: usize) -> String {
        self.record(player).lock().unwrap().url.clone()
    }

    pub fn calls(&self, player: usize) -> Vec<PlayerCall> {
        self.record(player).lock().unwrap().calls.clone()
    }

    pub fn last_calls(&self) -> Vec<PlayerCall> {
        self.calls(self.player_count() - 1)
    }

    /// Take a player's callback without firing it (an in-flight notification)
    pub fn take_callback(&self, player: usize) -> Option<EndOfTrackCallback> {
        self.record(player).lock().unwrap().callback.take()
    }

    /// Finish a player's track the way a real engine would
    ///
    /// Never fires for a stopped player. Returns whether the callback ran.
    pub fn finish(&self, player: usize) -> bool {
        let record = self.record(player);
        let callback = {
            let mut record = record.lock().unwrap();
            if record.calls.contains(&PlayerCall::Stop) {
                return false;
            }
            record.callback.take()
        };
        match callback {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }

    /// Finish the most recently created player
    pub fn finish_last(&self) -> bool {
        self.finish(self.player_count() - 1)
    }

    fn record(&self, player: usize) -> Arc<Mutex<PlayerRecord>> {
        Arc::clone(&self.players.lock().unwrap()[player])
    }
}

struct FakePlayer {
    record: Arc<Mutex<PlayerRecord>>,
    fail_start: bool,
}

impl PlaybackEngine for FakeEngine {
    fn create_player(&self, stream_url: &str) -> Result<Box<dyn PlayerHandle>> {
        let record = Arc::new(Mutex::new(PlayerRecord {
            url: stream_url.to_string(),
            calls: Vec::new(),
            callback: None,
        }));
        self.players.lock().unwrap().push(Arc::clone(&record));
        Ok(Box::new(FakePlayer {
            record,
            fail_start: self.fail_start.load(Ordering::SeqCst),
        }))
    }
}

impl PlayerHandle for FakePlayer {
    fn set_volume(&mut self, level: u8) {
        self.record.lock().unwrap().calls.push(PlayerCall::SetVolume(level));
    }

    fn start(&mut self) -> Result<()> {
        if self.fail_start {
            return Err(VoxError::engine("no audio device"));
        }
        self.record.lock().unwrap().calls.push(PlayerCall::Start);
        Ok(())
    }

    fn pause(&mut self, paused: bool) {
        self.record.lock().unwrap().calls.push(PlayerCall::Pause(paused));
    }

    fn stop(&mut self) {
        self.record.lock().unwrap().calls.push(PlayerCall::Stop);
    }

    fn on_end_of_track(&mut self, callback: EndOfTrackCallback) {
        self.record.lock().unwrap().callback = Some(callback);
    }
}

// ===== Fixtures =====

pub fn create_test_track(id: &str) -> TrackRef {
    TrackRef::new(id, format!("Artist {id}"), format!("Title {id}"))
}

pub fn create_test_playlist(name: &str, count: usize) -> Playlist {
    let tracks = (0..count)
        .map(|i| create_test_track(&format!("{}-{i}", name.to_lowercase().replace(' ', "-"))))
        .collect();
    Playlist::new(name, tracks)
}

pub fn default_playlists() -> Vec<Playlist> {
    vec![
        create_test_playlist("Classic Rock", 3),
        create_test_playlist("Jazz", 2),
        Playlist::new("Empty", Vec::new()),
    ]
}

pub struct Harness {
    pub controller: Controller,
    pub pump: EventPump,
    pub engine: Arc<FakeEngine>,
    pub catalog: Arc<FakeCatalog>,
}

pub fn harness_with(catalog: FakeCatalog, config: PlaybackConfig) -> Harness {
    let engine = FakeEngine::new();
    let catalog = Arc::new(catalog);
    let (controller, pump) = Controller::with_seed(
        Arc::clone(&catalog) as Arc<dyn CatalogGateway>,
        Arc::clone(&engine) as Arc<dyn PlaybackEngine>,
        config,
        42,
    );
    Harness {
        controller,
        pump,
        engine,
        catalog,
    }
}

pub fn harness() -> Harness {
    harness_with(FakeCatalog::new(default_playlists()), PlaybackConfig::default())
}
