//! Assistant session against the real catalog and the simulated engine

use std::sync::Arc;
use std::time::{Duration, Instant};
use voxplay_catalog::{LibraryCatalog, LibrarySnapshot, PlaylistEntry, PlaylistRecord, SongRecord};
use voxplay_console::engine::SimulatedEngine;
use voxplay_console::session::{Reply, Session};
use voxplay_core::{CatalogGateway, TrackId};
use voxplay_playback::{Controller, EventPump, PlaybackConfig, PlaybackStatus};

fn song(id: &str, artist: &str, title: &str) -> SongRecord {
    SongRecord {
        id: id.to_string(),
        artist: artist.to_string(),
        title: title.to_string(),
        stream_url: format!("sim://{id}"),
        play_count: 0,
    }
}

fn library() -> LibraryCatalog {
    LibraryCatalog::from_snapshot(LibrarySnapshot {
        songs: vec![
            song("t1", "Queen", "Bohemian Rhapsody"),
            song("t2", "Led Zeppelin", "Kashmir"),
            song("t3", "Miles Davis", "So What"),
        ],
        playlists: vec![
            PlaylistRecord {
                name: "Classic Rock".to_string(),
                tracks: vec![
                    PlaylistEntry {
                        id: "e1".to_string(),
                        track_id: "t1".to_string(),
                    },
                    PlaylistEntry {
                        id: "e2".to_string(),
                        track_id: "t2".to_string(),
                    },
                ],
            },
            PlaylistRecord {
                name: "Jazz".to_string(),
                tracks: vec![PlaylistEntry {
                    id: "e3".to_string(),
                    track_id: "t3".to_string(),
                }],
            },
        ],
    })
}

fn setup(track_length: Duration) -> (Session, Controller, EventPump, Arc<LibraryCatalog>) {
    let catalog = Arc::new(library());
    let engine = Arc::new(SimulatedEngine::new(track_length));
    let (controller, pump) = Controller::new(
        Arc::clone(&catalog) as Arc<dyn CatalogGateway>,
        engine,
        PlaybackConfig::default(),
    );
    (Session::new(controller.clone()), controller, pump, catalog)
}

fn wait_for(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    false
}

#[test]
fn play_playlist_and_announce() {
    let (mut session, controller, _pump, _catalog) = setup(Duration::from_secs(600));

    assert_eq!(session.handle("play classic rock"), Reply::Silent);
    assert!(session.last_was_player_command());
    assert_eq!(controller.status(), PlaybackStatus::Playing);
    assert_eq!(
        session.announcements(),
        vec!["Playing... Queen - Bohemian Rhapsody".to_string()]
    );
}

#[test]
fn unknown_playlist_is_announced() {
    let (mut session, controller, _pump, _catalog) = setup(Duration::from_secs(600));

    assert_eq!(
        session.handle("play polka"),
        Reply::Say("I am not able to find polka".to_string())
    );
    assert_eq!(controller.status(), PlaybackStatus::Stopped);
}

#[test]
fn non_player_request_resumes_playback() {
    let (mut session, controller, _pump, _catalog) = setup(Duration::from_secs(600));
    session.handle("play jazz");

    let reply = session.handle("what's playing");

    assert_eq!(reply, Reply::Say("Miles Davis - So What".to_string()));
    assert!(!session.last_was_player_command());
    assert_eq!(controller.status(), PlaybackStatus::Playing);
}

#[test]
fn pause_command_is_not_overridden() {
    let (mut session, controller, _pump, _catalog) = setup(Duration::from_secs(600));
    session.handle("play jazz");

    assert_eq!(session.handle("pause"), Reply::Silent);
    assert_eq!(controller.status(), PlaybackStatus::Paused);

    session.handle("resume");
    assert_eq!(controller.status(), PlaybackStatus::Playing);
}

#[test]
fn status_queries_resume_playback() {
    let (mut session, controller, _pump, _catalog) = setup(Duration::from_secs(600));
    session.handle("play rock");

    assert_eq!(
        session.handle("shuffle status"),
        Reply::Say("Shuffle is off".to_string())
    );
    assert_eq!(controller.status(), PlaybackStatus::Playing);

    session.handle("looping all");
    assert_eq!(
        session.handle("Looping Status"),
        Reply::Say("looping all songs".to_string())
    );
}

#[test]
fn help_and_exit() {
    let (mut session, _controller, _pump, _catalog) = setup(Duration::from_secs(600));

    match session.handle("help") {
        Reply::Say(text) => {
            assert!(text.contains("play <playlist>"));
            assert!(text.contains("shuffle status"));
        }
        other => panic!("unexpected reply: {other:?}"),
    }
    assert_eq!(session.handle("  "), Reply::Silent);
    assert_eq!(session.handle("Exit"), Reply::Exit);
}

#[test]
fn finished_tracks_advance_and_count_plays() {
    let (mut session, controller, pump, catalog) = setup(Duration::from_millis(30));
    std::thread::spawn(move || pump.run());

    session.handle("play rock");

    assert!(wait_for(|| catalog.play_count(&TrackId::new("t1")) == Some(1)));
    // Last track of a non-looping playlist ends playback
    assert!(wait_for(|| controller.status() == PlaybackStatus::Stopped));
    assert_eq!(catalog.play_count(&TrackId::new("t2")), Some(1));

    let announcements = session.announcements();
    assert_eq!(
        announcements,
        vec![
            "Playing... Queen - Bohemian Rhapsody".to_string(),
            "Playing... Led Zeppelin - Kashmir".to_string(),
        ]
    );
}

#[test]
fn player_command_without_playback_decision_resumes() {
    let (mut session, controller, _pump, _catalog) = setup(Duration::from_secs(600));
    session.handle("play jazz");

    assert_eq!(session.handle("volume up"), Reply::Silent);

    assert!(session.last_was_player_command());
    assert_eq!(controller.status(), PlaybackStatus::Playing);
    assert_eq!(controller.volume(), 60);
}
