// SPDX-License-Identifier: MPL-2.0
//! Media resource port definition.
//!
//! This module defines the [`MediaResource`] trait: the external, stateful
//! playback engine the session drives. Hosts implement it on top of their
//! decoder or platform video element; [`SimulatedResource`](super::SimulatedResource)
//! is an in-memory implementation.
//!
//! # Design Notes
//!
//! - The resource mutates asynchronously: time advances, buffering stalls,
//!   the stream ends. These changes are reported as [`ResourceEvent`]s
//!   posted into the session inbox through an [`EventSink`].
//! - Only `play` is asynchronous. Its future may resolve long after it was
//!   requested, or be rejected.
//! - Getters reflect the resource's own view and are read by the session's
//!   polling loop.

use super::session::SessionInput;
use crate::domain::time::TimeRange;
use crate::error::MediaError;
use futures_util::future::BoxFuture;
use tokio::sync::mpsc;

/// Future returned by [`MediaResource::play`].
///
/// Resolves to `Err(MediaError::PlayRejected(_))` when playback is refused.
pub type PlayRequest = BoxFuture<'static, Result<(), MediaError>>;

// =============================================================================
// MediaResource Trait
// =============================================================================

/// Port for the playback engine driven by a [`MediaSession`](super::MediaSession).
///
/// # Lifecycle
///
/// 1. The session calls `subscribe()` once with its inbox sink
/// 2. `load()` attaches a source; metadata arrives later as an event
/// 3. `play()` / `pause()` / `set_current_time()` drive playback
/// 4. Dropping the session stops reading the resource
pub trait MediaResource {
    /// Attaches a new source, discarding the current one.
    fn load(&mut self, src: &str);

    /// Requests playback.
    fn play(&mut self) -> PlayRequest;

    fn pause(&mut self);

    /// Current playback position in seconds.
    fn current_time(&self) -> f64;

    fn set_current_time(&mut self, seconds: f64);

    /// Media duration in seconds. May be `NaN` or 0 before metadata.
    fn duration(&self) -> f64;

    fn volume(&self) -> f32;

    fn set_volume(&mut self, volume: f32);

    fn muted(&self) -> bool;

    fn set_muted(&mut self, muted: bool);

    fn playback_rate(&self) -> f64;

    /// Changes the playback rate.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::RateRejected`] when the rate is outside the
    /// resource's capability.
    fn set_playback_rate(&mut self, rate: f64) -> Result<(), MediaError>;

    /// Buffered spans, ordered and non-overlapping.
    fn buffered(&self) -> Vec<TimeRange>;

    /// When looping, the resource restarts at the end instead of reporting
    /// [`ResourceEvent::EndOfStream`].
    fn set_looping(&mut self, looping: bool);

    /// Registers the sink that receives this resource's events.
    fn subscribe(&mut self, sink: EventSink);
}

// =============================================================================
// Events
// =============================================================================

/// Asynchronous notifications from the resource.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceEvent {
    /// Duration became known.
    MetadataResolved { duration: f64 },
    /// Playback is waiting for data.
    BufferingStalled,
    /// Enough data is available again.
    PlayableAgain,
    EndOfStream,
    LoadFailed { message: String },
    /// Playback started outside the session (system media keys, picture in
    /// picture controls).
    ExternalPlay,
    ExternalPause,
}

/// Sending half of a session inbox, handed to the resource.
///
/// Cloneable; sending after the session is gone is a no-op.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: mpsc::UnboundedSender<SessionInput>,
}

impl EventSink {
    pub(crate) fn new(tx: mpsc::UnboundedSender<SessionInput>) -> Self {
        Self { tx }
    }

    /// Posts an event. Returns false when the session has been dropped.
    pub fn emit(&self, event: ResourceEvent) -> bool {
        self.tx.send(SessionInput::Resource(event)).is_ok()
    }

    /// Returns true when the receiving session no longer exists.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
