//! On-disk library snapshot
//!
//! The library is dumped to two JSON files in one directory:
//!
//! ```text
//! songs.json      [{ "id", "artist", "title", "streamUrl", "playCount" }, ...]
//! playlists.json  [{ "name", "tracks": [{ "id", "trackId" }, ...] }, ...]
//! ```
//!
//! Playlist entries reference songs by `trackId`; the entry `id` is the
//! playlist-local entry identifier and is kept only for round-tripping.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// File holding the song table
pub const SONGS_FILE: &str = "songs.json";

/// File holding the playlists
pub const PLAYLISTS_FILE: &str = "playlists.json";

/// One song in the library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongRecord {
    /// Track identifier
    pub id: String,

    /// Artist name
    #[serde(default)]
    pub artist: String,

    /// Song title
    #[serde(default)]
    pub title: String,

    /// Stream location handed to the playback engine
    #[serde(default)]
    pub stream_url: String,

    /// Completed plays
    #[serde(default)]
    pub play_count: u32,
}

/// One entry of a playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistEntry {
    /// Entry identifier within the playlist
    pub id: String,

    /// Song this entry plays
    pub track_id: String,
}

/// A playlist as stored in the cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistRecord {
    /// Playlist display name
    pub name: String,

    /// Entries in playback order
    #[serde(default)]
    pub tracks: Vec<PlaylistEntry>,
}

/// Complete library dump
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibrarySnapshot {
    /// Song table
    pub songs: Vec<SongRecord>,

    /// Playlists in enumeration order
    pub playlists: Vec<PlaylistRecord>,
}

impl LibrarySnapshot {
    /// Read `songs.json` and `playlists.json` from `dir`
    ///
    /// # Errors
    /// Returns `MissingCache` if either file does not exist
    pub fn load(dir: &Path) -> Result<Self> {
        let songs = read_json(&dir.join(SONGS_FILE))?;
        let playlists = read_json(&dir.join(PLAYLISTS_FILE))?;
        Ok(Self { songs, playlists })
    }

    /// Write both cache files into `dir`, creating it if needed
    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        write_json(&dir.join(SONGS_FILE), &self.songs)?;
        write_json(&dir.join(PLAYLISTS_FILE), &self.playlists)?;
        debug!(
            dir = %dir.display(),
            songs = self.songs.len(),
            playlists = self.playlists.len(),
            "Library cache written"
        );
        Ok(())
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.is_file() {
        return Err(CatalogError::MissingCache(path.to_path_buf()));
    }
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn song_uses_camel_case_keys() {
        let json = r#"{"id":"t1","artist":"Queen","title":"Bohemian Rhapsody","streamUrl":"http://s/t1","playCount":3}"#;
        let song: SongRecord = serde_json::from_str(json).unwrap();

        assert_eq!(song.stream_url, "http://s/t1");
        assert_eq!(song.play_count, 3);

        let back = serde_json::to_string(&song).unwrap();
        assert!(back.contains("\"streamUrl\""));
        assert!(back.contains("\"playCount\""));
    }

    #[test]
    fn missing_optional_fields_default() {
        let song: SongRecord = serde_json::from_str(r#"{"id":"t1"}"#).unwrap();
        assert_eq!(song.artist, "");
        assert_eq!(song.play_count, 0);

        let playlist: PlaylistRecord = serde_json::from_str(r#"{"name":"Empty"}"#).unwrap();
        assert!(playlist.tracks.is_empty());
    }

    #[test]
    fn playlist_entry_keys() {
        let entry: PlaylistEntry = serde_json::from_str(r#"{"id":"e1","trackId":"t1"}"#).unwrap();
        assert_eq!(entry.track_id, "t1");
    }
}
