// SPDX-License-Identifier: MPL-2.0
//! This module handles the player configuration, including loading and saving
//! it from a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! The configuration is organized into logical sections:
//! - `[media]` - Source URI or quality sources, poster, previews, aspect ratio
//! - `[playback]` - Autoplay, loop, initial volume and mute
//! - `[controls]` - Control bar, keyboard shortcuts, timing
//! - `[playlist]` - Queue items, start index and auto-advance
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `PIMO_PLAYER_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use pimo_player::config;
//!
//! let (mut config, _warning) = config::load();
//! config.playback.autoplay = true;
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::playlist::{PlaylistItem, VideoSource};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "PimoPlayer";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "PIMO_PLAYER_CONFIG_DIR";

// =============================================================================
// Aspect Ratio
// =============================================================================

/// Display aspect ratio of the video surface.
///
/// Parsed from `"W:H"` tokens or `"auto"`. Unparseable tokens fall back
/// to 16:9.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AspectRatio {
    /// Use the natural size reported by the media.
    Auto,
    Fixed { width: u32, height: u32 },
}

impl AspectRatio {
    pub const WIDESCREEN: Self = AspectRatio::Fixed {
        width: 16,
        height: 9,
    };

    /// Parses a `"W:H"` or `"auto"` token.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.eq_ignore_ascii_case("auto") {
            return Some(AspectRatio::Auto);
        }
        let (w, h) = token.split_once(':')?;
        let width: u32 = w.trim().parse().ok()?;
        let height: u32 = h.trim().parse().ok()?;
        if width == 0 || height == 0 {
            return None;
        }
        Some(AspectRatio::Fixed { width, height })
    }

    /// Returns width / height, or `None` for `Auto`.
    #[must_use]
    pub fn ratio(self) -> Option<f32> {
        match self {
            AspectRatio::Auto => None,
            AspectRatio::Fixed { width, height } => Some(width as f32 / height as f32),
        }
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::WIDESCREEN
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AspectRatio::Auto => write!(f, "auto"),
            AspectRatio::Fixed { width, height } => write!(f, "{}:{}", width, height),
        }
    }
}

impl From<String> for AspectRatio {
    fn from(value: String) -> Self {
        Self::parse(&value).unwrap_or_default()
    }
}

impl From<AspectRatio> for String {
    fn from(value: AspectRatio) -> Self {
        value.to_string()
    }
}

// =============================================================================
// Section Structs
// =============================================================================

/// What to play and how to present it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MediaConfig {
    /// Single source URI. Ignored when `sources` is not empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    /// Alternative sources, one per quality.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<VideoSource>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,

    /// Preview thumbnail URIs, evenly spread over the duration.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preview_thumbnails: Vec<String>,

    /// Quality labels offered in the settings menu.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualities: Option<Vec<String>>,

    #[serde(default)]
    pub aspect_ratio: AspectRatio,
}

impl MediaConfig {
    /// Source URI to load first: the first quality source, else `src`.
    #[must_use]
    pub fn initial_source(&self) -> Option<&str> {
        self.sources
            .first()
            .map(|source| source.src.as_str())
            .or(self.src.as_deref())
    }

    /// Quality labels, falling back to the built-in list.
    #[must_use]
    pub fn quality_labels(&self) -> Vec<String> {
        match &self.qualities {
            Some(labels) if !labels.is_empty() => labels.clone(),
            _ => DEFAULT_QUALITIES.iter().map(|q| (*q).to_string()).collect(),
        }
    }
}

/// Playback behavior at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaybackConfig {
    #[serde(default)]
    pub autoplay: bool,

    #[serde(default, rename = "loop")]
    pub loop_playback: bool,

    #[serde(default)]
    pub muted: bool,

    #[serde(default = "default_volume")]
    pub volume: f32,

    #[serde(default = "default_true")]
    pub plays_inline: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            autoplay: false,
            loop_playback: false,
            muted: false,
            volume: DEFAULT_VOLUME,
            plays_inline: true,
        }
    }
}

/// Control surface settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ControlsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_true")]
    pub keyboard_enabled: bool,

    /// Offer the mini player when the host supports it.
    #[serde(default = "default_true")]
    pub picture_in_picture: bool,

    /// Inactivity delay before the controls hide while playing.
    #[serde(default = "default_hide_delay_ms")]
    pub hide_delay_ms: u64,

    /// Time polling cadence while playing, for the tokio interval driver.
    /// The frame-driven player polls once per rendered frame instead.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl ControlsConfig {
    #[must_use]
    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(
            self.hide_delay_ms
                .clamp(MIN_CONTROLS_HIDE_DELAY_MS, MAX_CONTROLS_HIDE_DELAY_MS),
        )
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(
            self.poll_interval_ms
                .clamp(MIN_POLL_INTERVAL_MS, MAX_POLL_INTERVAL_MS),
        )
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            keyboard_enabled: true,
            picture_in_picture: true,
            hide_delay_ms: DEFAULT_CONTROLS_HIDE_DELAY_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

/// Queue of items played back to back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaylistConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<PlaylistItem>,

    #[serde(default)]
    pub start_index: usize,

    /// Advance to the next item when the current one ends.
    #[serde(default = "default_true")]
    pub auto_advance: bool,
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            start_index: 0,
            auto_advance: true,
        }
    }
}

/// Complete player configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlayerConfig {
    #[serde(default)]
    pub media: MediaConfig,

    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub controls: ControlsConfig,

    #[serde(default)]
    pub playlist: PlaylistConfig,
}

fn default_true() -> bool {
    true
}

fn default_volume() -> f32 {
    DEFAULT_VOLUME
}

fn default_hide_delay_ms() -> u64 {
    DEFAULT_CONTROLS_HIDE_DELAY_MS
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    base_dir
        .or_else(|| std::env::var_os(ENV_CONFIG_DIR).map(PathBuf::from))
        .or_else(|| {
            dirs::config_dir().map(|mut path| {
                path.push(APP_NAME);
                path
            })
        })
        .map(|mut path| {
            path.push(CONFIG_FILE);
            path
        })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (PlayerConfig, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (PlayerConfig, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "falling back to default config");
                    return (PlayerConfig::default(), Some(err.to_string()));
                }
            }
        }
    }
    (PlayerConfig::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<PlayerConfig> {
    let content = fs::read_to_string(path)?;
    let config: PlayerConfig = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &PlayerConfig) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &PlayerConfig, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &PlayerConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_config() -> PlayerConfig {
        PlayerConfig {
            media: MediaConfig {
                src: Some("https://cdn.example/intro.mp4".to_string()),
                poster: Some("https://cdn.example/intro.jpg".to_string()),
                aspect_ratio: AspectRatio::Fixed {
                    width: 4,
                    height: 3,
                },
                ..MediaConfig::default()
            },
            playback: PlaybackConfig {
                autoplay: true,
                loop_playback: true,
                muted: true,
                volume: 0.4,
                plays_inline: false,
            },
            controls: ControlsConfig {
                keyboard_enabled: false,
                ..ControlsConfig::default()
            },
            playlist: PlaylistConfig {
                items: vec![PlaylistItem::new("a", "a.mp4", "First")],
                start_index: 0,
                auto_advance: false,
            },
        }
    }

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = sample_config();
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let result = load_from_path(&config_path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn load_with_override_from_corrupted_file_returns_default_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[playback\nautoplay = ")
            .expect("failed to write corrupted file");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, PlayerConfig::default());
        assert!(warning.is_some());
    }

    #[test]
    fn load_with_override_from_empty_directory_returns_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, PlayerConfig::default());
        assert!(warning.is_none());
    }

    #[test]
    fn save_with_override_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base = temp_dir.path().join("deep").join("path");

        save_with_override(&sample_config(), Some(base.clone())).expect("save should work");
        assert!(base.join(CONFIG_FILE).exists());
    }

    #[test]
    fn default_config_has_expected_values() {
        let config = PlayerConfig::default();
        assert!(!config.playback.autoplay);
        assert!(!config.playback.loop_playback);
        assert!(config.controls.enabled);
        assert!(config.controls.keyboard_enabled);
        assert!(config.playback.plays_inline);
        assert!(config.playlist.auto_advance);
        assert_eq!(config.media.aspect_ratio, AspectRatio::WIDESCREEN);
        assert_eq!(config.controls.hide_delay(), Duration::from_millis(3000));
    }

    #[test]
    fn partial_file_fills_missing_sections_with_defaults() {
        let config: PlayerConfig = toml::from_str(
            r#"
            [media]
            src = "movie.mp4"
            aspect_ratio = "auto"

            [playback]
            loop = true
            "#,
        )
        .expect("partial config should parse");

        assert_eq!(config.media.initial_source(), Some("movie.mp4"));
        assert_eq!(config.media.aspect_ratio, AspectRatio::Auto);
        assert!(config.playback.loop_playback);
        assert_eq!(config.playback.volume, DEFAULT_VOLUME);
        assert!(config.controls.keyboard_enabled);
    }

    #[test]
    fn quality_sources_take_precedence_over_src() {
        let media = MediaConfig {
            src: Some("fallback.mp4".to_string()),
            sources: vec![
                VideoSource::new("hd.mp4").with_quality("1080p"),
                VideoSource::new("sd.mp4").with_quality("480p"),
            ],
            ..MediaConfig::default()
        };
        assert_eq!(media.initial_source(), Some("hd.mp4"));
    }

    #[test]
    fn quality_labels_fall_back_to_defaults() {
        let media = MediaConfig::default();
        assert_eq!(media.quality_labels()[0], "Auto");
        assert_eq!(media.quality_labels().len(), DEFAULT_QUALITIES.len());

        let custom = MediaConfig {
            qualities: Some(vec!["720p".to_string()]),
            ..MediaConfig::default()
        };
        assert_eq!(custom.quality_labels(), vec!["720p".to_string()]);
    }

    #[test]
    fn aspect_ratio_parses_tokens() {
        assert_eq!(AspectRatio::parse("auto"), Some(AspectRatio::Auto));
        assert_eq!(
            AspectRatio::parse(" 21:9 "),
            Some(AspectRatio::Fixed {
                width: 21,
                height: 9
            })
        );
        assert_eq!(AspectRatio::parse("16x9"), None);
        assert_eq!(AspectRatio::parse("0:9"), None);
        assert_eq!(AspectRatio::from("wide".to_string()), AspectRatio::WIDESCREEN);
    }

    #[test]
    fn aspect_ratio_value() {
        assert_eq!(AspectRatio::Auto.ratio(), None);
        let ratio = AspectRatio::WIDESCREEN.ratio().expect("fixed ratio");
        assert!((ratio - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn timing_values_are_clamped() {
        let controls = ControlsConfig {
            hide_delay_ms: 1,
            poll_interval_ms: 10_000,
            ..ControlsConfig::default()
        };
        assert_eq!(
            controls.hide_delay(),
            Duration::from_millis(MIN_CONTROLS_HIDE_DELAY_MS)
        );
        assert_eq!(
            controls.poll_interval(),
            Duration::from_millis(MAX_POLL_INTERVAL_MS)
        );
    }
}
