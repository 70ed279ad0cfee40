// SPDX-License-Identifier: MPL-2.0
//! Playlist position tracking and end-of-item advance.
//!
//! The advancer only decides *which* item should play. Loading the item into
//! the session is left to the caller, which keeps the session the sole
//! writer of the resource.

use super::state::PlaybackState;
use crate::config::NEAR_END_THRESHOLD_SECS;
use crate::domain::playlist::PlaylistItem;
use std::sync::Arc;

/// Queue cursor with auto-advance on end of stream.
#[derive(Debug, Clone)]
pub struct PlaylistAdvancer {
    items: Arc<[PlaylistItem]>,
    index: usize,
    auto_advance: bool,
    ended_seen: bool,
}

impl PlaylistAdvancer {
    /// Creates a cursor at `start_index`, clamped into the queue.
    #[must_use]
    pub fn new(items: Arc<[PlaylistItem]>, start_index: usize) -> Self {
        let index = start_index.min(items.len().saturating_sub(1));
        Self {
            items,
            index,
            auto_advance: true,
            ended_seen: false,
        }
    }

    #[must_use]
    pub fn items(&self) -> &Arc<[PlaylistItem]> {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn current(&self) -> Option<&PlaylistItem> {
        self.items.get(self.index)
    }

    /// Item that plays after the current one, if any.
    #[must_use]
    pub fn next_up(&self) -> Option<&PlaylistItem> {
        self.items.get(self.index + 1)
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.items.len()
    }

    #[must_use]
    pub fn auto_advance(&self) -> bool {
        self.auto_advance
    }

    pub fn set_auto_advance(&mut self, enabled: bool) {
        self.auto_advance = enabled;
    }

    /// "2 / 5" style position label, `None` without a queue.
    #[must_use]
    pub fn position_label(&self) -> Option<String> {
        (!self.items.is_empty()).then(|| format!("{} / {}", self.index + 1, self.items.len()))
    }

    /// Observes the latest state and reports the index to load when the
    /// current item has just ended.
    ///
    /// Edge-triggered: an ended state is acted upon once.
    pub fn on_state(&mut self, state: &PlaybackState) -> Option<usize> {
        if !state.ended {
            self.ended_seen = false;
            return None;
        }
        if self.ended_seen {
            return None;
        }
        self.ended_seen = true;

        if !self.auto_advance || self.is_last() {
            return None;
        }
        self.index += 1;
        tracing::info!(index = self.index, "advancing playlist");
        Some(self.index)
    }

    /// Moves to the next item.
    pub fn next_item(&mut self) -> Option<&PlaylistItem> {
        if self.is_last() {
            return None;
        }
        self.index += 1;
        self.ended_seen = false;
        self.items.get(self.index)
    }

    /// Moves to the previous item.
    pub fn previous_item(&mut self) -> Option<&PlaylistItem> {
        if self.index == 0 || self.items.is_empty() {
            return None;
        }
        self.index -= 1;
        self.ended_seen = false;
        self.items.get(self.index)
    }

    /// Jumps to `index`.
    pub fn select(&mut self, index: usize) -> Option<&PlaylistItem> {
        if index >= self.items.len() {
            return None;
        }
        self.index = index;
        self.ended_seen = false;
        self.items.get(index)
    }
}

/// Returns true when the remaining time is within the next-up window.
#[must_use]
pub fn is_near_end(state: &PlaybackState) -> bool {
    state.duration > 0.0 && state.duration - state.current_time <= NEAR_END_THRESHOLD_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue() -> Arc<[PlaylistItem]> {
        vec![
            PlaylistItem::new("a", "a.mp4", "A"),
            PlaylistItem::new("b", "b.mp4", "B"),
            PlaylistItem::new("c", "c.mp4", "C"),
        ]
        .into()
    }

    fn ended() -> PlaybackState {
        PlaybackState {
            ended: true,
            ..PlaybackState::default()
        }
    }

    #[test]
    fn ended_in_middle_advances() {
        let mut playlist = PlaylistAdvancer::new(queue(), 0);
        assert_eq!(playlist.on_state(&ended()), Some(1));
        assert_eq!(playlist.index(), 1);
        assert_eq!(playlist.current().map(|i| i.id.as_str()), Some("b"));
    }

    #[test]
    fn ended_at_last_item_stays() {
        let mut playlist = PlaylistAdvancer::new(queue(), 2);
        assert_eq!(playlist.on_state(&ended()), None);
        assert_eq!(playlist.index(), 2);
    }

    #[test]
    fn ended_is_edge_triggered() {
        let mut playlist = PlaylistAdvancer::new(queue(), 0);
        assert_eq!(playlist.on_state(&ended()), Some(1));
        assert_eq!(playlist.on_state(&ended()), None);

        playlist.on_state(&PlaybackState::default());
        assert_eq!(playlist.on_state(&ended()), Some(2));
    }

    #[test]
    fn auto_advance_can_be_disabled() {
        let mut playlist = PlaylistAdvancer::new(queue(), 0);
        playlist.set_auto_advance(false);
        assert_eq!(playlist.on_state(&ended()), None);
        assert_eq!(playlist.index(), 0);
    }

    #[test]
    fn empty_queue_never_advances() {
        let mut playlist = PlaylistAdvancer::new(Vec::<PlaylistItem>::new().into(), 3);
        assert!(playlist.is_empty());
        assert_eq!(playlist.on_state(&ended()), None);
        assert!(playlist.current().is_none());
        assert!(playlist.position_label().is_none());
    }

    #[test]
    fn start_index_is_clamped() {
        let playlist = PlaylistAdvancer::new(queue(), 10);
        assert_eq!(playlist.index(), 2);
    }

    #[test]
    fn next_previous_and_select() {
        let mut playlist = PlaylistAdvancer::new(queue(), 0);
        assert!(playlist.previous_item().is_none());
        assert_eq!(playlist.next_item().map(|i| i.id.clone()), Some("b".to_string()));
        assert_eq!(playlist.next_item().map(|i| i.id.clone()), Some("c".to_string()));
        assert!(playlist.next_item().is_none());
        assert_eq!(playlist.previous_item().map(|i| i.id.clone()), Some("b".to_string()));
        assert_eq!(playlist.select(0).map(|i| i.id.clone()), Some("a".to_string()));
        assert!(playlist.select(3).is_none());
        assert_eq!(playlist.index(), 0);
    }

    #[test]
    fn next_up_and_label() {
        let mut playlist = PlaylistAdvancer::new(queue(), 1);
        assert_eq!(playlist.next_up().map(|i| i.id.as_str()), Some("c"));
        assert_eq!(playlist.position_label().as_deref(), Some("2 / 3"));
        playlist.next_item();
        assert!(playlist.next_up().is_none());
    }

    #[test]
    fn near_end_window() {
        let at = |current_time| PlaybackState {
            duration: 120.0,
            current_time,
            ..PlaybackState::default()
        };
        assert!(is_near_end(&at(111.0)));
        assert!(is_near_end(&at(110.0)));
        assert!(!is_near_end(&at(109.0)));
        assert!(!is_near_end(&PlaybackState::default()));
    }
}
