//! Console configuration
//!
//! Read from an optional TOML file (`voxplay.toml` by default), then
//! overridden by `VOXPLAY_` environment variables using `__` between
//! sections, e.g. `VOXPLAY_PLAYBACK__VOLUME=70`.

use crate::error::{ConsoleError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use voxplay_playback::PlaybackConfig;

/// Config file read when none is given
pub const DEFAULT_CONFIG_FILE: &str = "voxplay.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub library: LibrarySettings,

    #[serde(default)]
    pub engine: EngineSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibrarySettings {
    /// Directory holding `songs.json` and `playlists.json`
    #[serde(default = "default_library_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineSettings {
    /// Length of every simulated track
    #[serde(default = "default_track_length_secs")]
    pub track_length_secs: u64,
}

impl EngineSettings {
    pub fn track_length(&self) -> Duration {
        Duration::from_secs(self.track_length_secs)
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicitly given file must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with VOXPLAY_)
        settings = settings.add_source(
            config::Environment::with_prefix("VOXPLAY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.playback.volume > 100 {
            return Err(ConsoleError::Config(format!(
                "playback.volume must be 0-100, got {}",
                self.playback.volume
            )));
        }

        if self.playback.volume_step == 0 {
            return Err(ConsoleError::Config(
                "playback.volume_step must be at least 1".to_string(),
            ));
        }

        if self.playback.history_size == 0 {
            return Err(ConsoleError::Config(
                "playback.history_size must be at least 1".to_string(),
            ));
        }

        if self.engine.track_length_secs == 0 {
            return Err(ConsoleError::Config(
                "engine.track_length_secs must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            path: default_library_path(),
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            track_length_secs: default_track_length_secs(),
        }
    }
}

fn default_library_path() -> PathBuf {
    PathBuf::from("./library")
}

fn default_track_length_secs() -> u64 {
    180
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use voxplay_playback::LoopMode;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();

        assert_eq!(config.playback.volume, 50);
        assert_eq!(config.library.path, PathBuf::from("./library"));
        assert_eq!(config.engine.track_length(), Duration::from_secs(180));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn reads_toml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("voxplay.toml");
        fs::write(
            &path,
            r#"
[playback]
volume = 70
shuffle = true
loop_mode = "all"

[library]
path = "/music/cache"

[engine]
track_length_secs = 5
"#,
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();

        assert_eq!(config.playback.volume, 70);
        assert!(config.playback.shuffle);
        assert_eq!(config.playback.loop_mode, LoopMode::All);
        // Unset keys keep their defaults
        assert_eq!(config.playback.volume_step, 10);
        assert_eq!(config.library.path, PathBuf::from("/music/cache"));
        assert_eq!(config.engine.track_length_secs, 5);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = AppConfig::load(Some(&dir.path().join("absent.toml")));

        assert!(matches!(result, Err(ConsoleError::Config(_))));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.playback.volume = 150;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.playback.volume_step = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.engine.track_length_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_shuffle_history() {
        let mut config = AppConfig::default();
        config.playback.history_size = 0;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("history_size"));

        config.playback.history_size = 1;
        assert!(config.validate().is_ok());
    }
}
