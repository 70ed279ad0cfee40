// SPDX-License-Identifier: MPL-2.0
//! In-memory media resource.
//!
//! [`SimulatedResource`] implements [`MediaResource`] over a clock that only
//! moves when told to. A cloneable [`SimulatedHandle`] plays the part of the
//! decoder and the environment: it advances time, resolves metadata, stalls,
//! ends or fails the stream, and decides how play requests are answered.
//!
//! Used by the headless demo binary, the benches and the tests.

use super::resource::{EventSink, MediaResource, PlayRequest, ResourceEvent};
use crate::config::MAX_PLAYBACK_SPEED;
use crate::domain::time::TimeRange;
use crate::error::MediaError;
use futures_util::future::{self, FutureExt};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;

/// How the resource answers play requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayMode {
    /// Resolve immediately with success.
    Accept,
    /// Resolve immediately with a rejection.
    Reject(String),
    /// Hold the request until [`SimulatedHandle::resolve_deferred_plays`].
    Defer,
}

#[derive(Debug)]
struct Inner {
    src: Option<String>,
    loaded_sources: Vec<String>,
    failing_sources: HashSet<String>,
    next_duration: Option<f64>,
    duration: f64,
    current_time: f64,
    playing: bool,
    volume: f32,
    muted: bool,
    rate: f64,
    max_rate: f64,
    looping: bool,
    failed: bool,
    buffered: Vec<TimeRange>,
    play_mode: PlayMode,
    deferred: Vec<oneshot::Sender<Result<(), MediaError>>>,
    sink: Option<EventSink>,
}

impl Inner {
    fn emit(&self, event: ResourceEvent) {
        if let Some(sink) = &self.sink {
            sink.emit(event);
        }
    }

    fn has_duration(&self) -> bool {
        self.duration.is_finite() && self.duration > 0.0
    }

    fn cancel_deferred(&mut self, reason: &str) {
        for waiter in self.deferred.drain(..) {
            let _ = waiter.send(Err(MediaError::PlayRejected(reason.to_string())));
        }
    }

    fn reach_end(&mut self) {
        if self.looping {
            self.current_time = 0.0;
            return;
        }
        if self.has_duration() {
            self.current_time = self.duration;
        }
        self.playing = false;
        self.emit(ResourceEvent::EndOfStream);
    }
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            src: None,
            loaded_sources: Vec::new(),
            failing_sources: HashSet::new(),
            next_duration: None,
            duration: f64::NAN,
            current_time: 0.0,
            playing: false,
            volume: 1.0,
            muted: false,
            rate: 1.0,
            max_rate: MAX_PLAYBACK_SPEED,
            looping: false,
            failed: false,
            buffered: Vec::new(),
            play_mode: PlayMode::Accept,
            deferred: Vec::new(),
            sink: None,
        }
    }
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clock-driven media resource.
#[derive(Debug, Default)]
pub struct SimulatedResource {
    inner: Arc<Mutex<Inner>>,
}

impl SimulatedResource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle controlling this resource.
    #[must_use]
    pub fn handle(&self) -> SimulatedHandle {
        SimulatedHandle {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl MediaResource for SimulatedResource {
    fn load(&mut self, src: &str) {
        let mut inner = lock(&self.inner);
        inner.cancel_deferred("source replaced");
        inner.src = Some(src.to_string());
        inner.loaded_sources.push(src.to_string());
        inner.current_time = 0.0;
        inner.duration = f64::NAN;
        inner.playing = false;
        inner.failed = false;
        inner.buffered.clear();

        if inner.failing_sources.contains(src) {
            inner.failed = true;
            inner.emit(ResourceEvent::LoadFailed {
                message: format!("cannot open {}", src),
            });
        } else if let Some(duration) = inner.next_duration {
            inner.duration = duration;
            inner.emit(ResourceEvent::MetadataResolved { duration });
        }
    }

    fn play(&mut self) -> PlayRequest {
        let mut inner = lock(&self.inner);
        if inner.failed {
            return future::ready(Err(MediaError::PlayRejected(
                "media failed to load".to_string(),
            )))
            .boxed();
        }

        match inner.play_mode.clone() {
            PlayMode::Accept => {
                if inner.has_duration() && inner.current_time >= inner.duration {
                    inner.current_time = 0.0;
                }
                inner.playing = true;
                future::ready(Ok(())).boxed()
            }
            PlayMode::Reject(reason) => future::ready(Err(MediaError::PlayRejected(reason))).boxed(),
            PlayMode::Defer => {
                let (tx, rx) = oneshot::channel();
                inner.deferred.push(tx);
                rx.map(|answer| {
                    answer.unwrap_or_else(|_| {
                        Err(MediaError::PlayRejected("play request dropped".to_string()))
                    })
                })
                .boxed()
            }
        }
    }

    fn pause(&mut self) {
        let mut inner = lock(&self.inner);
        inner.cancel_deferred("interrupted by pause");
        inner.playing = false;
    }

    fn current_time(&self) -> f64 {
        lock(&self.inner).current_time
    }

    fn set_current_time(&mut self, seconds: f64) {
        lock(&self.inner).current_time = seconds;
    }

    fn duration(&self) -> f64 {
        lock(&self.inner).duration
    }

    fn volume(&self) -> f32 {
        lock(&self.inner).volume
    }

    fn set_volume(&mut self, volume: f32) {
        lock(&self.inner).volume = volume;
    }

    fn muted(&self) -> bool {
        lock(&self.inner).muted
    }

    fn set_muted(&mut self, muted: bool) {
        lock(&self.inner).muted = muted;
    }

    fn playback_rate(&self) -> f64 {
        lock(&self.inner).rate
    }

    fn set_playback_rate(&mut self, rate: f64) -> Result<(), MediaError> {
        let mut inner = lock(&self.inner);
        if rate > inner.max_rate {
            return Err(MediaError::RateRejected(rate));
        }
        inner.rate = rate;
        Ok(())
    }

    fn buffered(&self) -> Vec<TimeRange> {
        lock(&self.inner).buffered.clone()
    }

    fn set_looping(&mut self, looping: bool) {
        lock(&self.inner).looping = looping;
    }

    fn subscribe(&mut self, sink: EventSink) {
        lock(&self.inner).sink = Some(sink);
    }
}

/// Control handle for a [`SimulatedResource`].
#[derive(Debug, Clone)]
pub struct SimulatedHandle {
    inner: Arc<Mutex<Inner>>,
}

impl SimulatedHandle {
    /// Duration reported as metadata by every subsequent load.
    pub fn set_next_duration(&self, duration: f64) {
        lock(&self.inner).next_duration = Some(duration);
    }

    /// Resolves metadata for the current source.
    pub fn resolve_metadata(&self, duration: f64) {
        let mut inner = lock(&self.inner);
        inner.duration = duration;
        inner.emit(ResourceEvent::MetadataResolved { duration });
    }

    /// Makes every later load of `src` fail.
    pub fn fail_source(&self, src: &str) {
        lock(&self.inner).failing_sources.insert(src.to_string());
    }

    pub fn set_play_mode(&self, mode: PlayMode) {
        lock(&self.inner).play_mode = mode;
    }

    /// Accepts all held play requests.
    pub fn resolve_deferred_plays(&self) {
        let mut inner = lock(&self.inner);
        let waiters: Vec<_> = inner.deferred.drain(..).collect();
        if !waiters.is_empty() {
            inner.playing = true;
        }
        for waiter in waiters {
            let _ = waiter.send(Ok(()));
        }
    }

    /// Rejects all held play requests.
    pub fn reject_deferred_plays(&self, reason: &str) {
        lock(&self.inner).cancel_deferred(reason);
    }

    #[must_use]
    pub fn pending_plays(&self) -> usize {
        lock(&self.inner).deferred.len()
    }

    /// Moves the clock forward by `seconds` of wall time.
    pub fn advance(&self, seconds: f64) {
        let mut inner = lock(&self.inner);
        if !inner.playing {
            return;
        }
        inner.current_time += seconds * inner.rate;
        if inner.has_duration() && inner.current_time >= inner.duration {
            inner.reach_end();
        }
    }

    /// Jumps to the end of the stream.
    pub fn finish(&self) {
        lock(&self.inner).reach_end();
    }

    pub fn fail(&self, message: &str) {
        let mut inner = lock(&self.inner);
        inner.failed = true;
        inner.playing = false;
        inner.emit(ResourceEvent::LoadFailed {
            message: message.to_string(),
        });
    }

    pub fn stall(&self) {
        lock(&self.inner).emit(ResourceEvent::BufferingStalled);
    }

    pub fn recover(&self) {
        lock(&self.inner).emit(ResourceEvent::PlayableAgain);
    }

    /// Starts playback from outside the session.
    pub fn external_play(&self) {
        let mut inner = lock(&self.inner);
        inner.playing = true;
        inner.emit(ResourceEvent::ExternalPlay);
    }

    pub fn external_pause(&self) {
        let mut inner = lock(&self.inner);
        inner.playing = false;
        inner.emit(ResourceEvent::ExternalPause);
    }

    pub fn set_buffered(&self, ranges: Vec<TimeRange>) {
        lock(&self.inner).buffered = ranges;
    }

    /// Highest rate accepted by [`MediaResource::set_playback_rate`].
    pub fn set_max_rate(&self, rate: f64) {
        lock(&self.inner).max_rate = rate;
    }

    pub fn set_current_time(&self, seconds: f64) {
        lock(&self.inner).current_time = seconds;
    }

    #[must_use]
    pub fn current_time(&self) -> f64 {
        lock(&self.inner).current_time
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        lock(&self.inner).playing
    }

    #[must_use]
    pub fn muted(&self) -> bool {
        lock(&self.inner).muted
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        lock(&self.inner).volume
    }

    #[must_use]
    pub fn rate(&self) -> f64 {
        lock(&self.inner).rate
    }

    #[must_use]
    pub fn is_looping(&self) -> bool {
        lock(&self.inner).looping
    }

    #[must_use]
    pub fn source(&self) -> Option<String> {
        lock(&self.inner).src.clone()
    }

    /// Every source loaded so far, in order.
    #[must_use]
    pub fn loaded_sources(&self) -> Vec<String> {
        lock(&self.inner).loaded_sources.clone()
    }
}
