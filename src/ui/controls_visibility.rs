// SPDX-License-Identifier: MPL-2.0
//! Auto-hide of the control bar during playback.
//!
//! Controls are shown on any pointer activity and hidden after a period of
//! inactivity, but only while the media is playing. Every change of the
//! playing flag restarts the countdown.

use crate::config::{
    DEFAULT_CONTROLS_HIDE_DELAY_MS, MAX_CONTROLS_HIDE_DELAY_MS, MIN_CONTROLS_HIDE_DELAY_MS,
};
use std::time::{Duration, Instant};

/// Inactivity delay before the controls hide.
///
/// # Example
///
/// ```
/// use pimo_player::ui::controls_visibility::HideDelay;
///
/// assert_eq!(HideDelay::default().value(), 3000);
/// assert_eq!(HideDelay::new(10).value(), 500); // Clamped to min
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HideDelay(u64);

impl HideDelay {
    /// Creates a new delay in milliseconds, clamping to valid range.
    #[must_use]
    pub fn new(millis: u64) -> Self {
        Self(millis.clamp(MIN_CONTROLS_HIDE_DELAY_MS, MAX_CONTROLS_HIDE_DELAY_MS))
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for HideDelay {
    fn default() -> Self {
        Self(DEFAULT_CONTROLS_HIDE_DELAY_MS)
    }
}

/// Deadline-based visibility timer.
#[derive(Debug, Clone)]
pub struct ControlsVisibilityTimer {
    delay: HideDelay,
    visible: bool,
    deadline: Option<Instant>,
}

impl ControlsVisibilityTimer {
    #[must_use]
    pub fn new(delay: HideDelay) -> Self {
        Self {
            delay,
            visible: true,
            deadline: None,
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns true while a countdown is armed.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Pointer activity: show the controls and restart the countdown.
    pub fn on_activity(&mut self, now: Instant, playing: bool) {
        self.visible = true;
        self.rearm(now, playing);
    }

    /// The playing flag changed: restart the countdown.
    pub fn on_playing_changed(&mut self, now: Instant, playing: bool) {
        if !playing {
            self.visible = true;
        }
        self.rearm(now, playing);
    }

    /// Hides the controls once the deadline passed, if still playing.
    ///
    /// Returns true when visibility changed.
    pub fn poll(&mut self, now: Instant, playing: bool) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }
        self.deadline = None;
        if playing && self.visible {
            self.visible = false;
            return true;
        }
        false
    }

    /// Cancels any pending countdown.
    pub fn teardown(&mut self) {
        self.deadline = None;
    }

    fn rearm(&mut self, now: Instant, playing: bool) {
        self.deadline = playing.then(|| now + self.delay.as_duration());
    }
}

impl Default for ControlsVisibilityTimer {
    fn default() -> Self {
        Self::new(HideDelay::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(DEFAULT_CONTROLS_HIDE_DELAY_MS);

    #[test]
    fn hide_delay_clamps_to_valid_range() {
        assert_eq!(HideDelay::new(0).value(), MIN_CONTROLS_HIDE_DELAY_MS);
        assert_eq!(HideDelay::new(1_000_000).value(), MAX_CONTROLS_HIDE_DELAY_MS);
        assert_eq!(HideDelay::new(1500).as_duration(), Duration::from_millis(1500));
    }

    #[test]
    fn hides_after_delay_while_playing() {
        let start = Instant::now();
        let mut timer = ControlsVisibilityTimer::default();
        timer.on_playing_changed(start, true);

        assert!(!timer.poll(start + DELAY - Duration::from_millis(1), true));
        assert!(timer.is_visible());
        assert!(timer.poll(start + DELAY, true));
        assert!(!timer.is_visible());
    }

    #[test]
    fn paused_media_keeps_controls_visible() {
        let start = Instant::now();
        let mut timer = ControlsVisibilityTimer::default();
        timer.on_activity(start, false);

        assert!(!timer.is_armed());
        assert!(!timer.poll(start + DELAY * 2, false));
        assert!(timer.is_visible());
    }

    #[test]
    fn pausing_at_expiry_keeps_controls_visible() {
        let start = Instant::now();
        let mut timer = ControlsVisibilityTimer::default();
        timer.on_activity(start, true);

        assert!(!timer.poll(start + DELAY, false));
        assert!(timer.is_visible());
    }

    #[test]
    fn activity_restarts_countdown() {
        let start = Instant::now();
        let mut timer = ControlsVisibilityTimer::default();
        timer.on_activity(start, true);
        timer.on_activity(start + Duration::from_millis(2000), true);

        assert!(!timer.poll(start + DELAY, true));
        assert!(timer.poll(start + Duration::from_millis(5000), true));
    }

    #[test]
    fn activity_shows_hidden_controls() {
        let start = Instant::now();
        let mut timer = ControlsVisibilityTimer::default();
        timer.on_activity(start, true);
        timer.poll(start + DELAY, true);
        assert!(!timer.is_visible());

        timer.on_activity(start + DELAY, true);
        assert!(timer.is_visible());
    }

    #[test]
    fn pausing_reveals_controls_and_disarms() {
        let start = Instant::now();
        let mut timer = ControlsVisibilityTimer::default();
        timer.on_activity(start, true);
        timer.poll(start + DELAY, true);

        timer.on_playing_changed(start + DELAY, false);
        assert!(timer.is_visible());
        assert!(!timer.is_armed());
    }

    #[test]
    fn teardown_cancels_countdown() {
        let start = Instant::now();
        let mut timer = ControlsVisibilityTimer::default();
        timer.on_activity(start, true);
        timer.teardown();

        assert!(!timer.is_armed());
        assert!(!timer.poll(start + DELAY, true));
        assert!(timer.is_visible());
    }
}
