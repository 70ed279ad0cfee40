// SPDX-License-Identifier: MPL-2.0
//! Host notification callbacks.
//!
//! Callbacks are best-effort: each invocation runs under `catch_unwind`, and
//! a panicking callback is logged without affecting playback state.

use crate::domain::playlist::PlaylistItem;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

type Callback<T> = Option<Box<dyn FnMut(T)>>;

/// Optional host callbacks, registered with builder methods.
///
/// # Example
///
/// ```
/// use pimo_player::app::HostCallbacks;
///
/// let callbacks = HostCallbacks::new()
///     .on_play(|| println!("playing"))
///     .on_time_update(|t| println!("at {t:.1}s"));
/// ```
#[derive(Default)]
pub struct HostCallbacks {
    time_update: Callback<f64>,
    play: Callback<()>,
    pause: Callback<()>,
    ended: Callback<()>,
    volume_change: Callback<(f32, bool)>,
    quality_change: Option<Box<dyn FnMut(&str)>>,
    fullscreen_change: Callback<bool>,
    picture_in_picture: Callback<bool>,
    playlist_item_change: Option<Box<dyn FnMut(usize, &PlaylistItem)>>,
}

impl HostCallbacks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_time_update(mut self, f: impl FnMut(f64) + 'static) -> Self {
        self.time_update = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_play(mut self, mut f: impl FnMut() + 'static) -> Self {
        self.play = Some(Box::new(move |()| f()));
        self
    }

    #[must_use]
    pub fn on_pause(mut self, mut f: impl FnMut() + 'static) -> Self {
        self.pause = Some(Box::new(move |()| f()));
        self
    }

    #[must_use]
    pub fn on_ended(mut self, mut f: impl FnMut() + 'static) -> Self {
        self.ended = Some(Box::new(move |()| f()));
        self
    }

    /// Called with `(volume, muted)`.
    #[must_use]
    pub fn on_volume_change(mut self, mut f: impl FnMut(f32, bool) + 'static) -> Self {
        self.volume_change = Some(Box::new(move |(volume, muted)| f(volume, muted)));
        self
    }

    #[must_use]
    pub fn on_quality_change(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.quality_change = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_fullscreen_change(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.fullscreen_change = Some(Box::new(f));
        self
    }

    /// Called when the mini player opens (`true`) or closes.
    #[must_use]
    pub fn on_picture_in_picture(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.picture_in_picture = Some(Box::new(f));
        self
    }

    /// Called with the new index and item.
    #[must_use]
    pub fn on_playlist_item_change(
        mut self,
        f: impl FnMut(usize, &PlaylistItem) + 'static,
    ) -> Self {
        self.playlist_item_change = Some(Box::new(f));
        self
    }

    pub(crate) fn time_update(&mut self, time: f64) {
        invoke("on_time_update", &mut self.time_update, time);
    }

    pub(crate) fn play(&mut self) {
        invoke("on_play", &mut self.play, ());
    }

    pub(crate) fn pause(&mut self) {
        invoke("on_pause", &mut self.pause, ());
    }

    pub(crate) fn ended(&mut self) {
        invoke("on_ended", &mut self.ended, ());
    }

    pub(crate) fn volume_change(&mut self, volume: f32, muted: bool) {
        invoke("on_volume_change", &mut self.volume_change, (volume, muted));
    }

    pub(crate) fn quality_change(&mut self, quality: &str) {
        if let Some(f) = self.quality_change.as_mut() {
            guarded("on_quality_change", || f(quality));
        }
    }

    pub(crate) fn fullscreen_change(&mut self, fullscreen: bool) {
        invoke("on_fullscreen_change", &mut self.fullscreen_change, fullscreen);
    }

    pub(crate) fn picture_in_picture(&mut self, active: bool) {
        invoke("on_picture_in_picture", &mut self.picture_in_picture, active);
    }

    pub(crate) fn playlist_item_change(&mut self, index: usize, item: &PlaylistItem) {
        if let Some(f) = self.playlist_item_change.as_mut() {
            guarded("on_playlist_item_change", || f(index, item));
        }
    }
}

impl fmt::Debug for HostCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostCallbacks")
            .field("time_update", &self.time_update.is_some())
            .field("play", &self.play.is_some())
            .field("pause", &self.pause.is_some())
            .field("ended", &self.ended.is_some())
            .field("volume_change", &self.volume_change.is_some())
            .field("quality_change", &self.quality_change.is_some())
            .field("fullscreen_change", &self.fullscreen_change.is_some())
            .field("picture_in_picture", &self.picture_in_picture.is_some())
            .field("playlist_item_change", &self.playlist_item_change.is_some())
            .finish()
    }
}

fn invoke<T>(name: &str, callback: &mut Callback<T>, value: T) {
    if let Some(f) = callback.as_mut() {
        guarded(name, || f(value));
    }
}

fn guarded(name: &str, f: impl FnOnce()) {
    if panic::catch_unwind(AssertUnwindSafe(f)).is_err() {
        tracing::warn!(callback = name, "host callback panicked");
    }
}
