// SPDX-License-Identifier: MPL-2.0
//! Playback speed domain type for video playback.
//!
//! The settings menu and the `<` / `>` shortcuts move along a fixed preset
//! ladder (0.25x to 2x). Arbitrary rates set by the host are clamped to the
//! range the session forwards to the resource.

use crate::config::{MAX_PLAYBACK_SPEED, MIN_PLAYBACK_SPEED, PLAYBACK_SPEED_PRESETS};
use std::fmt;

/// Playback speed value, guaranteed to be positive and bounded.
///
/// # Example
///
/// ```
/// use pimo_player::video_player::PlaybackSpeed;
///
/// let speed = PlaybackSpeed::new(1.0);
/// assert_eq!(speed.faster().value(), 1.25);
/// assert_eq!(speed.to_string(), "Normal");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSpeed(f64);

impl PlaybackSpeed {
    /// Creates a new playback speed, clamping to valid range.
    #[must_use]
    pub fn new(speed: f64) -> Self {
        if speed.is_nan() {
            return Self::default();
        }
        Self(speed.clamp(MIN_PLAYBACK_SPEED, MAX_PLAYBACK_SPEED))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns the next higher preset, or self above the last preset.
    #[must_use]
    pub fn faster(self) -> Self {
        PLAYBACK_SPEED_PRESETS
            .iter()
            .find(|&&s| s > self.0 + 0.001)
            .map_or(self, |&s| Self(s))
    }

    /// Returns the next lower preset, or self below the first preset.
    #[must_use]
    pub fn slower(self) -> Self {
        PLAYBACK_SPEED_PRESETS
            .iter()
            .rev()
            .find(|&&s| s < self.0 - 0.001)
            .map_or(self, |&s| Self(s))
    }

    /// Returns true at normal speed.
    #[must_use]
    pub fn is_normal(self) -> bool {
        (self.0 - 1.0).abs() < 0.001
    }

    /// All presets offered by the settings menu.
    #[must_use]
    pub fn presets() -> impl Iterator<Item = PlaybackSpeed> {
        PLAYBACK_SPEED_PRESETS.iter().map(|&s| Self(s))
    }
}

impl Default for PlaybackSpeed {
    fn default() -> Self {
        Self(1.0)
    }
}

impl fmt::Display for PlaybackSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_normal() {
            write!(f, "Normal")
        } else {
            write!(f, "{}x", self.0)
        }
    }
}
