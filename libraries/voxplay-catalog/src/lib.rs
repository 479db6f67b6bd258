//! voxplay Catalog
//!
//! A [`CatalogGateway`](voxplay_core::CatalogGateway) that serves playlists
//! and stream locations from a locally cached library dump, so the player
//! can start without talking to the music service.
//!
//! - **Snapshot**: `songs.json` and `playlists.json` in one cache directory
//! - **Catalog**: playlist resolution, stream lookup, announcements
//! - **Play counts**: counted in memory, flushed back to the cache
//!
//! # Example
//!
//! ```rust
//! use voxplay_catalog::{LibraryCatalog, LibrarySnapshot, PlaylistEntry, PlaylistRecord, SongRecord};
//! use voxplay_core::CatalogGateway;
//!
//! let snapshot = LibrarySnapshot {
//!     songs: vec![SongRecord {
//!         id: "t1".into(),
//!         artist: "Queen".into(),
//!         title: "Bohemian Rhapsody".into(),
//!         stream_url: "http://stream/t1".into(),
//!         play_count: 0,
//!     }],
//!     playlists: vec![PlaylistRecord {
//!         name: "Classic Rock".into(),
//!         tracks: vec![PlaylistEntry { id: "e1".into(), track_id: "t1".into() }],
//!     }],
//! };
//!
//! let catalog = LibraryCatalog::from_snapshot(snapshot);
//! let track = &catalog.playlists()[0].tracks[0];
//! assert_eq!(catalog.display_name(track), "Queen - Bohemian Rhapsody");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod library;
pub mod snapshot;

pub use error::{CatalogError, Result};
pub use library::LibraryCatalog;
pub use snapshot::{
    LibrarySnapshot, PlaylistEntry, PlaylistRecord, SongRecord, PLAYLISTS_FILE, SONGS_FILE,
};
