//! Catalog gateway over a cached library snapshot

use crate::error::Result;
use crate::snapshot::{LibrarySnapshot, SongRecord};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};
use voxplay_core::{CatalogGateway, Playlist, TrackId, TrackRef, VoxError};

const UNKNOWN_ARTIST: &str = "Unknown Artist";
const UNKNOWN_TITLE: &str = "Unknown Title";

/// Catalog backed by a library snapshot
///
/// Song and playlist data are read-only after construction. Play counts
/// are tracked in memory and written back with [`LibraryCatalog::flush`].
#[derive(Debug)]
pub struct LibraryCatalog {
    snapshot: LibrarySnapshot,
    // Song id -> position in `snapshot.songs`
    index: HashMap<TrackId, usize>,
    playlists: Vec<Playlist>,
    play_counts: Mutex<HashMap<TrackId, u32>>,
}

impl LibraryCatalog {
    /// Build a catalog from an in-memory snapshot
    ///
    /// Playlist entries whose song is missing from the song table are kept
    /// and announced as unknown; they fail when played.
    pub fn from_snapshot(snapshot: LibrarySnapshot) -> Self {
        let index: HashMap<TrackId, usize> = snapshot
            .songs
            .iter()
            .enumerate()
            .map(|(position, song)| (TrackId::new(song.id.clone()), position))
            .collect();

        let playlists = snapshot
            .playlists
            .iter()
            .map(|record| {
                let tracks = record
                    .tracks
                    .iter()
                    .map(|entry| {
                        let id = TrackId::new(entry.track_id.clone());
                        match index.get(&id) {
                            Some(&position) => track_ref(&snapshot.songs[position]),
                            None => {
                                warn!(playlist = %record.name, track = %id, "Playlist entry has no song");
                                TrackRef::new(id.as_str(), UNKNOWN_ARTIST, UNKNOWN_TITLE)
                            }
                        }
                    })
                    .collect();
                Playlist::new(record.name.clone(), tracks)
            })
            .collect();

        let play_counts = snapshot
            .songs
            .iter()
            .map(|song| (TrackId::new(song.id.clone()), song.play_count))
            .collect();

        Self {
            snapshot,
            index,
            playlists,
            play_counts: Mutex::new(play_counts),
        }
    }

    /// Load the cached library from `dir`
    pub fn open(dir: &Path) -> Result<Self> {
        let snapshot = LibrarySnapshot::load(dir)?;
        info!(
            dir = %dir.display(),
            songs = snapshot.songs.len(),
            playlists = snapshot.playlists.len(),
            "Library loaded from cache"
        );
        Ok(Self::from_snapshot(snapshot))
    }

    /// Completed plays for a song, including this session
    pub fn play_count(&self, id: &TrackId) -> Option<u32> {
        self.counts().get(id).copied()
    }

    /// Number of songs in the library
    pub fn song_count(&self) -> usize {
        self.snapshot.songs.len()
    }

    /// Snapshot with current play counts
    pub fn snapshot(&self) -> LibrarySnapshot {
        let counts = self.counts();
        let mut snapshot = self.snapshot.clone();
        for song in &mut snapshot.songs {
            if let Some(&count) = counts.get(&TrackId::new(song.id.clone())) {
                song.play_count = count;
            }
        }
        snapshot
    }

    /// Write the library, with current play counts, back to `dir`
    pub fn flush(&self, dir: &Path) -> Result<()> {
        self.snapshot().save(dir)
    }

    fn song(&self, id: &TrackId) -> Option<&SongRecord> {
        self.index.get(id).map(|&position| &self.snapshot.songs[position])
    }

    fn counts(&self) -> MutexGuard<'_, HashMap<TrackId, u32>> {
        self.play_counts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn track_ref(song: &SongRecord) -> TrackRef {
    TrackRef::new(song.id.clone(), song.artist.clone(), song.title.clone())
}

impl CatalogGateway for LibraryCatalog {
    fn playlists(&self) -> Vec<Playlist> {
        self.playlists.clone()
    }

    fn resolve_stream(&self, track: &TrackRef) -> voxplay_core::Result<String> {
        let song = self
            .song(&track.id)
            .ok_or_else(|| VoxError::TrackNotFound(track.id.clone()))?;

        if song.stream_url.is_empty() {
            return Err(VoxError::StreamUnavailable {
                track: track.id.clone(),
                reason: "no stream location cached".to_string(),
            });
        }
        Ok(song.stream_url.clone())
    }

    fn display_name(&self, track: &TrackRef) -> String {
        match self.song(&track.id) {
            Some(song) => track_ref(song).display_name(),
            None => voxplay_core::UNKNOWN_TRACK_DISPLAY.to_string(),
        }
    }

    fn report_played(&self, track: &TrackRef) -> voxplay_core::Result<()> {
        let mut counts = self.counts();
        let count = counts
            .get_mut(&track.id)
            .ok_or_else(|| VoxError::TrackNotFound(track.id.clone()))?;
        *count += 1;
        debug!(track = %track.id, plays = *count, "Play recorded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{PlaylistEntry, PlaylistRecord};

    fn song(id: &str, artist: &str, title: &str) -> SongRecord {
        SongRecord {
            id: id.to_string(),
            artist: artist.to_string(),
            title: title.to_string(),
            stream_url: format!("http://stream/{id}"),
            play_count: 0,
        }
    }

    fn entry(id: &str, track_id: &str) -> PlaylistEntry {
        PlaylistEntry {
            id: id.to_string(),
            track_id: track_id.to_string(),
        }
    }

    fn sample() -> LibraryCatalog {
        LibraryCatalog::from_snapshot(LibrarySnapshot {
            songs: vec![
                song("t1", "Queen", "Bohemian Rhapsody"),
                song("t2", "Led Zeppelin", "Kashmir"),
            ],
            playlists: vec![PlaylistRecord {
                name: "Classic Rock".to_string(),
                tracks: vec![entry("e1", "t2"), entry("e2", "gone"), entry("e3", "t1")],
            }],
        })
    }

    #[test]
    fn playlist_entries_resolve_in_order() {
        let catalog = sample();
        let playlists = catalog.playlists();

        assert_eq!(playlists.len(), 1);
        let titles: Vec<_> = playlists[0].tracks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Kashmir", UNKNOWN_TITLE, "Bohemian Rhapsody"]);
    }

    #[test]
    fn unknown_song_is_announced_but_not_playable() {
        let catalog = sample();
        let missing = catalog.playlists()[0].tracks[1].clone();

        assert_eq!(
            catalog.display_name(&missing),
            voxplay_core::UNKNOWN_TRACK_DISPLAY
        );
        assert!(matches!(
            catalog.resolve_stream(&missing),
            Err(VoxError::TrackNotFound(_))
        ));
        assert!(catalog.report_played(&missing).is_err());
    }

    #[test]
    fn resolves_known_song() {
        let catalog = sample();
        let track = TrackRef::new("t1", "", "");

        assert_eq!(catalog.resolve_stream(&track).unwrap(), "http://stream/t1");
        assert_eq!(catalog.display_name(&track), "Queen - Bohemian Rhapsody");
    }

    #[test]
    fn empty_stream_url_is_unavailable() {
        let mut snapshot = LibrarySnapshot::default();
        let mut record = song("t1", "A", "B");
        record.stream_url.clear();
        snapshot.songs.push(record);
        let catalog = LibraryCatalog::from_snapshot(snapshot);

        let err = catalog
            .resolve_stream(&TrackRef::new("t1", "A", "B"))
            .unwrap_err();
        assert!(matches!(err, VoxError::StreamUnavailable { .. }));
    }

    #[test]
    fn report_played_counts_up() {
        let catalog = sample();
        let track = TrackRef::new("t2", "Led Zeppelin", "Kashmir");

        catalog.report_played(&track).unwrap();
        catalog.report_played(&track).unwrap();

        assert_eq!(catalog.play_count(&TrackId::new("t2")), Some(2));
        assert_eq!(catalog.play_count(&TrackId::new("t1")), Some(0));
        assert_eq!(catalog.play_count(&TrackId::new("gone")), None);

        let snapshot = catalog.snapshot();
        assert_eq!(snapshot.songs[1].play_count, 2);
    }
}
