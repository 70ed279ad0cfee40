// SPDX-License-Identifier: MPL-2.0
//! Seek bar interaction: pointer-to-time mapping, hover preview and drag
//! scrubbing.
//!
//! The controller never touches the session. It returns [`Effect::Seek`]
//! requests that the caller applies immediately, one per pointer event.

use crate::config::PREVIEW_EDGE_MARGIN_PX;
use iced::{Point, Rectangle};

/// Hover and drag state of the seek bar.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrubState {
    /// Media time under the pointer.
    pub hover_time: Option<f64>,
    pub dragging: bool,
    /// Horizontal anchor of the preview bubble, relative to the track.
    pub hover_position_px: f32,
}

/// What the caller should do after a pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    None,
    Seek(f64),
}

/// Seek bar controller bound to the on-screen track bounds.
#[derive(Debug, Clone)]
pub struct ScrubController {
    track: Rectangle,
    state: ScrubState,
}

impl ScrubController {
    #[must_use]
    pub fn new(track: Rectangle) -> Self {
        Self {
            track,
            state: ScrubState::default(),
        }
    }

    /// Updates the track bounds after a layout change.
    pub fn set_track(&mut self, track: Rectangle) {
        self.track = track;
    }

    #[must_use]
    pub fn track(&self) -> Rectangle {
        self.track
    }

    #[must_use]
    pub fn state(&self) -> &ScrubState {
        &self.state
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.state.dragging
    }

    /// Maps a horizontal pointer position to media time.
    #[must_use]
    pub fn time_at(&self, x: f32, duration: f64) -> f64 {
        if duration <= 0.0 || !duration.is_finite() || self.track.width <= 0.0 {
            return 0.0;
        }
        let fraction = f64::from(((x - self.track.x) / self.track.width).clamp(0.0, 1.0));
        fraction * duration
    }

    /// Starts a drag when the press lands on the track.
    pub fn pointer_pressed(&mut self, position: Point, duration: f64) -> Effect {
        if !self.track.contains(position) {
            return Effect::None;
        }
        self.state.dragging = true;
        self.update_hover(position.x, duration);
        Effect::Seek(self.time_at(position.x, duration))
    }

    /// Tracks hover, and seeks while dragging.
    pub fn pointer_moved(&mut self, position: Point, duration: f64) -> Effect {
        if self.state.dragging {
            self.update_hover(position.x, duration);
            return Effect::Seek(self.time_at(position.x, duration));
        }

        if self.track.contains(position) {
            self.update_hover(position.x, duration);
        } else {
            self.clear_hover();
        }
        Effect::None
    }

    /// Ends a drag. Observed globally so releases outside the track count.
    pub fn pointer_released(&mut self) -> bool {
        std::mem::take(&mut self.state.dragging)
    }

    /// Clears hover state unless a drag is in progress.
    pub fn pointer_left(&mut self) {
        if !self.state.dragging {
            self.clear_hover();
        }
    }

    /// Preview thumbnail for the hovered time.
    #[must_use]
    pub fn thumbnail_index(&self, duration: f64, count: usize) -> Option<usize> {
        self.state
            .hover_time
            .and_then(|hover| preview_thumbnail_index(hover, duration, count))
    }

    fn update_hover(&mut self, x: f32, duration: f64) {
        let relative = x - self.track.x;
        self.state.hover_time = Some(self.time_at(x, duration));
        self.state.hover_position_px = PREVIEW_EDGE_MARGIN_PX
            .max((self.track.width - PREVIEW_EDGE_MARGIN_PX).min(relative));
    }

    fn clear_hover(&mut self) {
        self.state.hover_time = None;
        self.state.hover_position_px = 0.0;
    }
}

/// Index of the thumbnail covering `hover_time` among `count` evenly spread
/// previews.
#[must_use]
pub fn preview_thumbnail_index(hover_time: f64, duration: f64, count: usize) -> Option<usize> {
    if count == 0 || duration <= 0.0 || !hover_time.is_finite() {
        return None;
    }
    let index = (hover_time / duration * count as f64).floor().max(0.0) as usize;
    Some(index.min(count - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;
    use iced::Size;

    fn controller() -> ScrubController {
        ScrubController::new(Rectangle::new(Point::new(100.0, 50.0), Size::new(400.0, 10.0)))
    }

    #[test]
    fn time_mapping_is_proportional_and_clamped() {
        let scrub = controller();
        assert_abs_diff_eq!(scrub.time_at(100.0, 200.0), 0.0);
        assert_abs_diff_eq!(scrub.time_at(300.0, 200.0), 100.0);
        assert_abs_diff_eq!(scrub.time_at(500.0, 200.0), 200.0);
        assert_abs_diff_eq!(scrub.time_at(20.0, 200.0), 0.0);
        assert_abs_diff_eq!(scrub.time_at(900.0, 200.0), 200.0);
    }

    #[test]
    fn zero_duration_maps_to_zero() {
        let scrub = controller();
        assert_abs_diff_eq!(scrub.time_at(300.0, 0.0), 0.0);
    }

    #[test]
    fn press_on_track_seeks_and_starts_drag() {
        let mut scrub = controller();
        let effect = scrub.pointer_pressed(Point::new(200.0, 55.0), 100.0);
        assert_eq!(effect, Effect::Seek(25.0));
        assert!(scrub.is_dragging());
    }

    #[test]
    fn press_outside_track_is_ignored() {
        let mut scrub = controller();
        assert_eq!(scrub.pointer_pressed(Point::new(200.0, 5.0), 100.0), Effect::None);
        assert!(!scrub.is_dragging());
    }

    #[test]
    fn drag_seeks_on_every_move_even_off_track() {
        let mut scrub = controller();
        scrub.pointer_pressed(Point::new(200.0, 55.0), 100.0);

        assert_eq!(scrub.pointer_moved(Point::new(300.0, 55.0), 100.0), Effect::Seek(50.0));
        assert_eq!(scrub.pointer_moved(Point::new(700.0, 300.0), 100.0), Effect::Seek(100.0));

        assert!(scrub.pointer_released());
        assert_eq!(scrub.pointer_moved(Point::new(300.0, 55.0), 100.0), Effect::None);
        assert!(!scrub.pointer_released());
    }

    #[test]
    fn hover_anchor_is_kept_away_from_edges() {
        let mut scrub = controller();
        scrub.pointer_moved(Point::new(110.0, 55.0), 100.0);
        assert_abs_diff_eq!(scrub.state().hover_position_px, 80.0);

        scrub.pointer_moved(Point::new(300.0, 55.0), 100.0);
        assert_abs_diff_eq!(scrub.state().hover_position_px, 200.0);

        scrub.pointer_moved(Point::new(495.0, 55.0), 100.0);
        assert_abs_diff_eq!(scrub.state().hover_position_px, 320.0);
    }

    #[test]
    fn leaving_clears_hover_unless_dragging() {
        let mut scrub = controller();
        scrub.pointer_moved(Point::new(300.0, 55.0), 100.0);
        assert!(scrub.state().hover_time.is_some());
        scrub.pointer_left();
        assert!(scrub.state().hover_time.is_none());

        scrub.pointer_pressed(Point::new(300.0, 55.0), 100.0);
        scrub.pointer_left();
        assert!(scrub.state().hover_time.is_some());
    }

    #[test]
    fn thumbnail_index_from_hover() {
        assert_eq!(preview_thumbnail_index(42.0, 100.0, 5), Some(2));
        assert_eq!(preview_thumbnail_index(100.0, 100.0, 5), Some(4));
        assert_eq!(preview_thumbnail_index(0.0, 100.0, 5), Some(0));
        assert_eq!(preview_thumbnail_index(42.0, 100.0, 0), None);
        assert_eq!(preview_thumbnail_index(42.0, 0.0, 5), None);
    }

    #[test]
    fn controller_thumbnail_follows_hover() {
        let mut scrub = controller();
        assert_eq!(scrub.thumbnail_index(100.0, 5), None);
        // x = 268 is 42% of the track.
        scrub.pointer_moved(Point::new(268.0, 55.0), 100.0);
        assert_eq!(scrub.thumbnail_index(100.0, 5), Some(2));
    }
}
