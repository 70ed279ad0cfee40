// SPDX-License-Identifier: MPL-2.0
//! Playback state snapshot and lifecycle phases.
//!
//! [`PlaybackState`] is owned and written exclusively by the
//! [`MediaSession`](super::MediaSession); every other component receives a
//! shared reference and derives what it needs from it.
//!
//! The lifecycle is summarized by [`Phase`]:
//! - Idle: no source attached yet
//! - Loading: waiting for metadata, or stalled on data while paused
//! - Ready: metadata known, playback never started
//! - Playing / Paused: toggled by the user or the resource
//! - Ended: end of stream reached
//! - Error: loading failed; reachable from any phase

use crate::domain::time::{buffered_percent, TimeRange};
use crate::error::MediaError;

/// Observable playback state.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub playing: bool,
    /// Seconds, within `[0, duration]` once the duration is known.
    pub current_time: f64,
    /// Seconds, 0 until metadata has been resolved.
    pub duration: f64,
    /// Within `[0, 1]`.
    pub volume: f32,
    pub muted: bool,
    pub buffered: Vec<TimeRange>,
    /// Always positive.
    pub playback_rate: f64,
    pub loading: bool,
    pub ended: bool,
    pub error: Option<MediaError>,
}

impl PlaybackState {
    /// Percentage of the media buffered around the playhead.
    #[must_use]
    pub fn buffered_percent(&self) -> f64 {
        buffered_percent(&self.buffered, self.current_time, self.duration)
    }

    /// Played share of the media in `[0, 1]`, 0 when duration is unknown.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.current_time / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Seconds left before the end, 0 when duration is unknown.
    #[must_use]
    pub fn remaining(&self) -> f64 {
        (self.duration - self.current_time).max(0.0)
    }

    /// Returns true if the media reported a load failure.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            playing: false,
            current_time: 0.0,
            duration: 0.0,
            volume: crate::config::DEFAULT_VOLUME,
            muted: false,
            buffered: Vec::new(),
            playback_rate: 1.0,
            loading: true,
            ended: false,
            error: None,
        }
    }
}

/// Lifecycle phase derived from the session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Playing,
    Paused,
    Ended,
    Error,
}

impl Phase {
    /// Returns true when transport controls can act on the media.
    #[must_use]
    pub fn is_interactive(self) -> bool {
        matches!(
            self,
            Phase::Ready | Phase::Playing | Phase::Paused | Phase::Ended
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn default_state_is_loading_and_silent_about_time() {
        let state = PlaybackState::default();
        assert!(state.loading);
        assert!(!state.playing);
        assert!(!state.ended);
        assert_abs_diff_eq!(state.duration, 0.0);
        assert_abs_diff_eq!(state.playback_rate, 1.0);
    }

    #[test]
    fn progress_and_remaining() {
        let state = PlaybackState {
            current_time: 30.0,
            duration: 120.0,
            ..PlaybackState::default()
        };
        assert_abs_diff_eq!(state.progress(), 0.25);
        assert_abs_diff_eq!(state.remaining(), 90.0);
    }

    #[test]
    fn progress_is_zero_without_duration() {
        let state = PlaybackState {
            current_time: 30.0,
            ..PlaybackState::default()
        };
        assert_abs_diff_eq!(state.progress(), 0.0);
        assert_abs_diff_eq!(state.remaining(), 0.0);
    }

    #[test]
    fn buffered_percent_reads_ranges() {
        let state = PlaybackState {
            current_time: 25.0,
            duration: 30.0,
            buffered: vec![TimeRange::new(0.0, 10.0), TimeRange::new(20.0, 30.0)],
            ..PlaybackState::default()
        };
        assert_abs_diff_eq!(state.buffered_percent(), 100.0);
    }

    #[test]
    fn interactive_phases() {
        assert!(Phase::Ready.is_interactive());
        assert!(Phase::Ended.is_interactive());
        assert!(!Phase::Loading.is_interactive());
        assert!(!Phase::Error.is_interactive());
        assert!(!Phase::Idle.is_interactive());
    }
}
