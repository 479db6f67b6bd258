//! Volume and mute state
//!
//! The engine is driven with a plain 0-100 level. Muting drives it at 0
//! while the stored level is kept for restoration.

use crate::types::VolumeDirection;

/// Maximum volume level
pub const MAX_VOLUME: u8 = 100;

/// Volume controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
    /// Volume level (0-100)
    level: u8,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Volume {
    /// Create new volume controller
    ///
    /// Levels above 100 are clamped.
    pub fn new(level: u8, muted: bool) -> Self {
        Self {
            level: level.min(MAX_VOLUME),
            muted,
        }
    }

    /// Move the level up or down by `amount`, clamped to 0-100
    ///
    /// Any adjustment unmutes.
    pub fn adjust(&mut self, direction: VolumeDirection, amount: u8) {
        self.level = match direction {
            VolumeDirection::Up => self.level.saturating_add(amount).min(MAX_VOLUME),
            VolumeDirection::Down => self.level.saturating_sub(amount),
        };
        self.muted = false;
    }

    /// Mute audio (preserves volume level)
    ///
    /// Returns `false` if already muted.
    pub fn mute(&mut self) -> bool {
        if self.muted {
            return false;
        }
        self.muted = true;
        true
    }

    /// Unmute audio (restores previous volume)
    ///
    /// Returns `false` if not muted.
    pub fn unmute(&mut self) -> bool {
        if !self.muted {
            return false;
        }
        self.muted = false;
        true
    }

    /// Get current volume level (0-100), regardless of mute
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Level the engine should be driven at
    ///
    /// Returns 0 if muted, otherwise the stored level
    pub fn effective_level(&self) -> u8 {
        if self.muted {
            0
        } else {
            self.level
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(50, false)
    }
}
