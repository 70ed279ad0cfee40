// SPDX-License-Identifier: MPL-2.0
//! Playback session: sole owner and writer of a [`MediaResource`].
//!
//! The session turns user actions into resource mutations and folds the
//! resource's asynchronous events back into a single [`PlaybackState`].
//!
//! # Flow
//!
//! 1. Actions (`play`, `seek`, `set_volume`, ...) mutate the resource and
//!    update the state synchronously where the result is known.
//! 2. `play` returns a [`PendingPlay`] future. Its [`PlayOutcome`] is fed
//!    back through [`MediaSession::resolve_play`]; only the outcome of the
//!    most recent play/pause action is applied.
//! 3. Resource events and poll ticks arrive in one inbox, drained by
//!    [`MediaSession::pump`] through [`MediaSession::apply`].
//! 4. Every observable change is queued as a [`Notification`] for the
//!    facade to forward to host callbacks.

use super::polling::{PollDriver, PollLoop, PollTick};
use super::resource::{EventSink, MediaResource, ResourceEvent};
use super::state::{Phase, PlaybackState};
use crate::config::{MAX_VOLUME, MIN_PLAYBACK_SPEED, MIN_VOLUME};
use crate::error::MediaError;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use tokio::sync::mpsc;

/// Everything that can arrive in the session inbox.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionInput {
    Resource(ResourceEvent),
    Tick(PollTick),
}

/// Identifies the play/pause action an outcome belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionTicket(u64);

/// Result of a play request, tagged with the action that issued it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayOutcome {
    pub ticket: ActionTicket,
    pub result: Result<(), MediaError>,
}

/// Play request in flight. Resolve it with [`MediaSession::resolve_play`].
pub type PendingPlay = BoxFuture<'static, PlayOutcome>;

/// Observable changes, drained by the host with
/// [`MediaSession::drain_notifications`].
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    TimeUpdate(f64),
    Play,
    Pause,
    Ended,
    VolumeChange { volume: f32, muted: bool },
    RateChange(f64),
    MetadataLoaded { duration: f64 },
    Failed(MediaError),
}

/// Playback session driving a media resource.
pub struct MediaSession<R: MediaResource> {
    resource: R,
    state: PlaybackState,
    source: Option<String>,
    started: bool,
    action_epoch: u64,
    pending_resume: Option<f64>,
    inbox_tx: mpsc::UnboundedSender<SessionInput>,
    inbox_rx: mpsc::UnboundedReceiver<SessionInput>,
    poll: PollLoop,
    notifications: Vec<Notification>,
}

impl<R: MediaResource> MediaSession<R> {
    /// Creates a session around `resource` and subscribes to its events.
    pub fn new(mut resource: R, driver: PollDriver) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        resource.subscribe(EventSink::new(inbox_tx.clone()));

        let state = PlaybackState {
            volume: resource.volume().clamp(MIN_VOLUME, MAX_VOLUME),
            muted: resource.muted(),
            playback_rate: sanitize_rate(resource.playback_rate()),
            ..PlaybackState::default()
        };

        Self {
            resource,
            state,
            source: None,
            started: false,
            action_epoch: 0,
            pending_resume: None,
            inbox_tx,
            inbox_rx,
            poll: PollLoop::new(driver),
            notifications: Vec::new(),
        }
    }

    // =========================================================================
    // Read access
    // =========================================================================

    #[must_use]
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.state.error.is_some() {
            Phase::Error
        } else if self.source.is_none() {
            Phase::Idle
        } else if self.state.ended {
            Phase::Ended
        } else if self.state.playing {
            Phase::Playing
        } else if self.state.loading {
            Phase::Loading
        } else if self.started {
            Phase::Paused
        } else {
            Phase::Ready
        }
    }

    #[must_use]
    pub fn buffered_percent(&self) -> f64 {
        self.state.buffered_percent()
    }

    /// Returns true while the polling loop is live.
    #[must_use]
    pub fn is_polling(&self) -> bool {
        self.poll.is_running()
    }

    /// Sink for hosts that post events on the resource's behalf.
    #[must_use]
    pub fn event_sink(&self) -> EventSink {
        EventSink::new(self.inbox_tx.clone())
    }

    #[must_use]
    pub fn resource(&self) -> &R {
        &self.resource
    }

    /// Drains the queued notifications.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    // =========================================================================
    // Source
    // =========================================================================

    /// Attaches a new source and resets the time-related state.
    ///
    /// Pending play requests are superseded and queued events of the previous
    /// source are discarded.
    pub fn load(&mut self, src: &str) {
        self.action_epoch += 1;
        self.poll.stop();

        let discarded = std::iter::from_fn(|| self.inbox_rx.try_recv().ok()).count();
        if discarded > 0 {
            tracing::debug!(discarded, "dropped events of previous source");
        }

        tracing::info!(src = %src, "loading media");
        self.resource.load(src);
        self.source = Some(src.to_string());
        self.started = false;
        self.pending_resume = None;
        self.state = PlaybackState {
            volume: self.state.volume,
            muted: self.state.muted,
            playback_rate: self.state.playback_rate,
            ..PlaybackState::default()
        };
    }

    /// Like [`load`](Self::load), then seeks to `resume_at` once metadata
    /// is known.
    pub fn load_at(&mut self, src: &str, resume_at: f64) {
        self.load(src);
        if resume_at.is_finite() && resume_at > 0.0 {
            self.pending_resume = Some(resume_at);
        }
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.resource.set_looping(looping);
    }

    // =========================================================================
    // Transport
    // =========================================================================

    /// Requests playback. The returned future must be resolved through
    /// [`resolve_play`](Self::resolve_play).
    pub fn play(&mut self) -> PendingPlay {
        self.action_epoch += 1;
        let ticket = ActionTicket(self.action_epoch);
        self.resource
            .play()
            .map(move |result| PlayOutcome { ticket, result })
            .boxed()
    }

    /// Applies the outcome of a play request.
    ///
    /// Outcomes of superseded actions are ignored and return `Ok`.
    ///
    /// # Errors
    ///
    /// Returns the rejection of the latest play request. The state is left
    /// untouched in that case.
    pub fn resolve_play(&mut self, outcome: PlayOutcome) -> Result<(), MediaError> {
        if outcome.ticket.0 != self.action_epoch {
            tracing::debug!(
                ticket = outcome.ticket.0,
                latest = self.action_epoch,
                "ignoring stale play outcome"
            );
            return Ok(());
        }

        match outcome.result {
            Ok(()) => {
                self.enter_playing();
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%err, "play request rejected");
                Err(err)
            }
        }
    }

    pub fn pause(&mut self) {
        self.action_epoch += 1;
        self.resource.pause();
        self.leave_playing();
    }

    /// Pauses when playing, otherwise requests playback.
    pub fn toggle_play(&mut self) -> Option<PendingPlay> {
        if self.state.playing {
            self.pause();
            None
        } else {
            Some(self.play())
        }
    }

    /// Restarts from the beginning.
    pub fn replay(&mut self) -> PendingPlay {
        self.seek(0.0);
        self.play()
    }

    /// Moves the playhead to `time`, clamped to `[0, duration]`.
    pub fn seek(&mut self, time: f64) {
        let duration = self.state.duration;
        let target = if time.is_nan() {
            0.0
        } else {
            time.clamp(0.0, duration)
        };

        self.resource.set_current_time(target);
        self.state.current_time = target;
        if self.state.ended && target < duration {
            self.state.ended = false;
        }
        self.notifications.push(Notification::TimeUpdate(target));
    }

    pub fn seek_by(&mut self, delta: f64) {
        self.seek(self.state.current_time + delta);
    }

    /// Seeks to `percent` of the duration.
    pub fn seek_to_percent(&mut self, percent: f64) {
        self.seek(percent / 100.0 * self.state.duration);
    }

    // =========================================================================
    // Audio and rate
    // =========================================================================

    /// Sets the volume, clamped to `[0, 1]`. Zero mutes, anything else unmutes.
    pub fn set_volume(&mut self, volume: f32) {
        let volume = if volume.is_nan() {
            MIN_VOLUME
        } else {
            volume.clamp(MIN_VOLUME, MAX_VOLUME)
        };
        let muted = volume == 0.0;

        self.resource.set_volume(volume);
        self.resource.set_muted(muted);
        self.state.volume = volume;
        self.state.muted = muted;
        self.notifications
            .push(Notification::VolumeChange { volume, muted });
    }

    /// Flips the mute flag, leaving the volume level untouched.
    pub fn toggle_mute(&mut self) {
        let muted = !self.state.muted;
        self.resource.set_muted(muted);
        self.state.muted = muted;
        self.notifications.push(Notification::VolumeChange {
            volume: self.state.volume,
            muted,
        });
    }

    /// Sets the playback rate. Non-finite rates become 1.0 and non-positive
    /// rates the slowest supported speed. Any upper bound is the resource's.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::RateRejected`] when the resource refuses the
    /// rate; the state keeps the previous rate.
    pub fn set_playback_rate(&mut self, rate: f64) -> Result<(), MediaError> {
        let rate = sanitize_rate(rate);
        if let Err(err) = self.resource.set_playback_rate(rate) {
            tracing::warn!(rate, %err, "playback rate refused");
            return Err(err);
        }
        self.state.playback_rate = rate;
        self.notifications.push(Notification::RateChange(rate));
        Ok(())
    }

    // =========================================================================
    // Inbox
    // =========================================================================

    /// Drains the inbox, returning how many inputs were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(input) = self.inbox_rx.try_recv() {
            self.apply(input);
            applied += 1;
        }
        applied
    }

    pub fn apply(&mut self, input: SessionInput) {
        match input {
            SessionInput::Resource(event) => self.handle_event(event),
            SessionInput::Tick(tick) => self.on_tick(tick),
        }
    }

    /// Polls the resource under the live generation, if any.
    ///
    /// Used with [`PollDriver::External`].
    pub fn tick(&mut self) {
        if let Some(tick) = self.poll.current_tick() {
            self.on_tick(tick);
        }
    }

    /// Single intake for resource events.
    pub fn handle_event(&mut self, event: ResourceEvent) {
        match event {
            ResourceEvent::MetadataResolved { duration } => {
                let duration = if duration.is_finite() && duration > 0.0 {
                    duration
                } else {
                    0.0
                };
                self.state.duration = duration;
                self.state.loading = false;
                self.state.current_time = self.state.current_time.clamp(0.0, duration);
                self.notifications
                    .push(Notification::MetadataLoaded { duration });
                if let Some(resume_at) = self.pending_resume.take() {
                    self.seek(resume_at);
                }
            }
            ResourceEvent::BufferingStalled => self.state.loading = true,
            ResourceEvent::PlayableAgain => self.state.loading = false,
            ResourceEvent::EndOfStream => {
                self.poll.stop();
                self.state.playing = false;
                self.state.ended = true;
                self.state.current_time = self.state.duration;
                self.notifications.push(Notification::Ended);
            }
            ResourceEvent::LoadFailed { message } => {
                tracing::error!(src = ?self.source, %message, "media failed to load");
                self.poll.stop();
                let error = MediaError::LoadFailed(message);
                self.state.error = Some(error.clone());
                self.state.loading = false;
                self.state.playing = false;
                self.notifications.push(Notification::Failed(error));
            }
            ResourceEvent::ExternalPlay => self.enter_playing(),
            ResourceEvent::ExternalPause => self.leave_playing(),
        }
    }

    fn on_tick(&mut self, tick: PollTick) {
        if !self.poll.accepts(tick) {
            tracing::trace!(generation = tick.generation(), "dropping stale poll tick");
            return;
        }

        let time = self.resource.current_time();
        self.state.current_time = if time.is_finite() {
            time.clamp(0.0, self.state.duration.max(0.0))
        } else {
            0.0
        };
        self.state.buffered = self.resource.buffered();
        self.notifications
            .push(Notification::TimeUpdate(self.state.current_time));
    }

    fn enter_playing(&mut self) {
        self.started = true;
        self.state.ended = false;
        self.poll.start(&self.inbox_tx);
        if !self.state.playing {
            self.state.playing = true;
            self.notifications.push(Notification::Play);
        }
    }

    fn leave_playing(&mut self) {
        self.poll.stop();
        if self.state.playing {
            self.state.playing = false;
            self.notifications.push(Notification::Pause);
        }
    }
}

fn sanitize_rate(rate: f64) -> f64 {
    if !rate.is_finite() {
        1.0
    } else if rate <= 0.0 {
        MIN_PLAYBACK_SPEED
    } else {
        rate
    }
}
