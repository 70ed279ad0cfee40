// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all player constants.
//!
//! This module serves as the single source of truth for default values
//! used across the player. Constants are organized by category.
//!
//! # Categories
//!
//! - **Seek**: keyboard seek step and near-end window
//! - **Volume**: playback volume bounds and step
//! - **Playback speed**: rate bounds and preset ladder
//! - **Controls**: auto-hide delay
//! - **Scrubbing**: hover preview geometry
//! - **Polling**: time republishing cadence

// ==========================================================================
// Seek Defaults
// ==========================================================================

/// Seconds skipped by the arrow / `j` / `l` shortcuts.
pub const SEEK_STEP_SECS: f64 = 5.0;

/// Remaining time (in seconds) under which the next-up item is announced.
pub const NEAR_END_THRESHOLD_SECS: f64 = 10.0;

// ==========================================================================
// Volume Defaults
// ==========================================================================

/// Default playback volume (0.0 to 1.0).
pub const DEFAULT_VOLUME: f32 = 1.0;

/// Minimum volume level.
pub const MIN_VOLUME: f32 = 0.0;

/// Maximum volume level.
pub const MAX_VOLUME: f32 = 1.0;

/// Volume adjustment step per key press (10%).
pub const VOLUME_STEP: f32 = 0.1;

/// Volumes below this level use the "low" speaker icon.
pub const LOW_VOLUME_THRESHOLD: f32 = 0.5;

// ==========================================================================
// Playback Speed Defaults
// ==========================================================================

/// Smallest playback rate ever forwarded to the resource.
pub const MIN_PLAYBACK_SPEED: f64 = 0.0625;

/// Largest playback rate ever forwarded to the resource.
pub const MAX_PLAYBACK_SPEED: f64 = 16.0;

/// Speeds offered by the settings menu and the speed shortcuts.
pub const PLAYBACK_SPEED_PRESETS: [f64; 8] = [0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0];

// ==========================================================================
// Quality Defaults
// ==========================================================================

/// Quality labels offered when the configuration names none.
pub const DEFAULT_QUALITIES: [&str; 7] = ["Auto", "1080p", "720p", "480p", "360p", "240p", "144p"];

// ==========================================================================
// Controls Defaults
// ==========================================================================

/// Inactivity delay before the controls hide while playing (in milliseconds).
pub const DEFAULT_CONTROLS_HIDE_DELAY_MS: u64 = 3000;

/// Minimum controls hide delay (in milliseconds).
pub const MIN_CONTROLS_HIDE_DELAY_MS: u64 = 500;

/// Maximum controls hide delay (in milliseconds).
pub const MAX_CONTROLS_HIDE_DELAY_MS: u64 = 30_000;

// ==========================================================================
// Scrubbing Defaults
// ==========================================================================

/// Horizontal margin keeping the hover preview inside the track.
pub const PREVIEW_EDGE_MARGIN_PX: f32 = 80.0;

// ==========================================================================
// Polling Defaults
// ==========================================================================

/// Interval between time-polling ticks while playing (one display frame).
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 16;

/// Minimum polling interval (in milliseconds).
pub const MIN_POLL_INTERVAL_MS: u64 = 4;

/// Maximum polling interval (in milliseconds).
pub const MAX_POLL_INTERVAL_MS: u64 = 250;

/// Interval of the housekeeping tick that drains resource events and
/// expires the controls timer.
pub const HOUSEKEEPING_INTERVAL_MS: u64 = 100;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Seek validation
    assert!(SEEK_STEP_SECS > 0.0);
    assert!(NEAR_END_THRESHOLD_SECS > 0.0);

    // Volume validation
    assert!(DEFAULT_VOLUME >= MIN_VOLUME);
    assert!(DEFAULT_VOLUME <= MAX_VOLUME);
    assert!(VOLUME_STEP > 0.0);
    assert!(LOW_VOLUME_THRESHOLD > MIN_VOLUME);
    assert!(LOW_VOLUME_THRESHOLD < MAX_VOLUME);

    // Playback speed validation
    assert!(MIN_PLAYBACK_SPEED > 0.0);
    assert!(MAX_PLAYBACK_SPEED > MIN_PLAYBACK_SPEED);
    assert!(PLAYBACK_SPEED_PRESETS[0] >= MIN_PLAYBACK_SPEED);
    assert!(PLAYBACK_SPEED_PRESETS[7] <= MAX_PLAYBACK_SPEED);

    // Controls validation
    assert!(MIN_CONTROLS_HIDE_DELAY_MS > 0);
    assert!(DEFAULT_CONTROLS_HIDE_DELAY_MS >= MIN_CONTROLS_HIDE_DELAY_MS);
    assert!(DEFAULT_CONTROLS_HIDE_DELAY_MS <= MAX_CONTROLS_HIDE_DELAY_MS);

    // Polling validation
    assert!(MIN_POLL_INTERVAL_MS > 0);
    assert!(DEFAULT_POLL_INTERVAL_MS >= MIN_POLL_INTERVAL_MS);
    assert!(DEFAULT_POLL_INTERVAL_MS <= MAX_POLL_INTERVAL_MS);
    assert!(HOUSEKEEPING_INTERVAL_MS < DEFAULT_CONTROLS_HIDE_DELAY_MS);
};
