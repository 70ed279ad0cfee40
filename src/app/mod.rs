// SPDX-License-Identifier: MPL-2.0
//! Player facade wiring the session and control components into iced.
//!
//! [`Player`] owns one [`MediaSession`] plus the control surface state and
//! exposes the usual iced trio: [`Player::boot`], [`Player::update`] and
//! [`Player::subscription`]. Hosts embed it in their own application and map
//! its [`Message`]s.
//!
//! For headless hosts (tests, the demo binary) [`Player::handle`] returns
//! plain [`Effect`]s instead of iced tasks.

pub mod callbacks;
mod message;
mod subscription;
mod update;

pub use callbacks::HostCallbacks;
pub use message::Message;

use crate::config::{AspectRatio, PlayerConfig};
use crate::domain::playlist::{PlaylistItem, VideoSource};
use crate::error::MediaError;
use crate::ui::controls_visibility::{ControlsVisibilityTimer, HideDelay};
use crate::ui::fullscreen::{FullscreenBackend, FullscreenCoordinator, RequestQueue};
use crate::ui::picture_in_picture::{PictureInPicture, PictureInPictureBackend};
use crate::ui::scrub::{ScrubController, ScrubState};
use crate::ui::volume_control::{self, VolumeControl, VolumeLevel};
use crate::video_player::{
    is_near_end, MediaResource, MediaSession, PendingPlay, Phase, PlaybackSpeed, PlaybackState,
    PlaylistAdvancer, PollDriver,
};
use iced::{window, Rectangle, Subscription, Task};
use std::fmt;
use std::time::Instant;

/// Quality label used when no source carries one.
const AUTO_QUALITY: &str = "Auto";

/// Follow-up work requested by a handled message.
pub enum Effect {
    /// A play request in flight. Feed its outcome back as
    /// [`Message::PlayResolved`].
    AwaitPlay(PendingPlay),
    /// Enter (`true`) or leave window fullscreen. The window's actual mode
    /// is reported afterwards as [`Message::FullscreenChanged`].
    SetWindowMode(bool),
    /// Read the window's current mode and report it as
    /// [`Message::FullscreenChanged`].
    QueryWindowMode,
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::AwaitPlay(_) => f.write_str("AwaitPlay(..)"),
            Effect::SetWindowMode(enter) => f.debug_tuple("SetWindowMode").field(enter).finish(),
            Effect::QueryWindowMode => f.write_str("QueryWindowMode"),
        }
    }
}

/// Embeddable video player.
pub struct Player<R: MediaResource> {
    session: MediaSession<R>,
    driver: PollDriver,
    playlist: PlaylistAdvancer,
    scrub: ScrubController,
    controls: ControlsVisibilityTimer,
    volume_control: VolumeControl,
    fullscreen: FullscreenCoordinator,
    fullscreen_requests: RequestQueue,
    picture_in_picture: PictureInPicture,
    picture_in_picture_enabled: bool,
    callbacks: HostCallbacks,
    sources: Vec<VideoSource>,
    qualities: Vec<String>,
    quality: String,
    preview_thumbnails: Vec<String>,
    poster: Option<String>,
    aspect_ratio: AspectRatio,
    keyboard_enabled: bool,
    controls_enabled: bool,
    plays_inline: bool,
    autoplay: bool,
    looping: bool,
    window_id: Option<window::Id>,
    was_playing: bool,
    play_error: Option<MediaError>,
    rate_error: Option<MediaError>,
}

impl<R: MediaResource> Player<R> {
    /// Builds a player polled once per rendered frame.
    pub fn new(resource: R, config: &PlayerConfig) -> Self {
        Self::with_driver(resource, config, PollDriver::External)
    }

    /// Builds a player with an explicit poll driver.
    ///
    /// The first playlist item (or the configured source) is loaded right
    /// away; volume, mute and loop settings are applied before any playback.
    pub fn with_driver(resource: R, config: &PlayerConfig, driver: PollDriver) -> Self {
        let mut session = MediaSession::new(resource, driver);

        let mut playlist = PlaylistAdvancer::new(
            config.playlist.items.clone().into(),
            config.playlist.start_index,
        );
        playlist.set_auto_advance(config.playlist.auto_advance);

        session.set_volume(config.playback.volume);
        if config.playback.muted && !session.state().muted {
            session.toggle_mute();
        }
        session.set_looping(config.playback.loop_playback);

        let initial_src = playlist
            .current()
            .map(|item| item.src.clone())
            .or_else(|| config.media.initial_source().map(str::to_string));
        match &initial_src {
            Some(src) => session.load(src),
            None => tracing::info!("no source configured"),
        }
        // Nobody is listening yet.
        let _ = session.drain_notifications();

        let quality = config
            .media
            .sources
            .first()
            .and_then(|source| source.quality.clone())
            .unwrap_or_else(|| AUTO_QUALITY.to_string());
        let fullscreen_requests = RequestQueue::new();

        Self {
            volume_control: VolumeControl::new(session.state().volume),
            session,
            driver,
            playlist,
            scrub: ScrubController::new(Rectangle::default()),
            controls: ControlsVisibilityTimer::new(HideDelay::new(config.controls.hide_delay_ms)),
            fullscreen: FullscreenCoordinator::new(vec![Box::new(fullscreen_requests.clone())]),
            fullscreen_requests,
            picture_in_picture: PictureInPicture::default(),
            picture_in_picture_enabled: config.controls.picture_in_picture,
            callbacks: HostCallbacks::default(),
            sources: config.media.sources.clone(),
            qualities: config.media.quality_labels(),
            quality,
            preview_thumbnails: config.media.preview_thumbnails.clone(),
            poster: config.media.poster.clone(),
            aspect_ratio: config.media.aspect_ratio,
            keyboard_enabled: config.controls.keyboard_enabled,
            controls_enabled: config.controls.enabled,
            plays_inline: config.playback.plays_inline,
            autoplay: config.playback.autoplay,
            looping: config.playback.loop_playback,
            window_id: None,
            was_playing: false,
            play_error: None,
            rate_error: None,
        }
    }

    /// Registers host callbacks.
    #[must_use]
    pub fn with_callbacks(mut self, callbacks: HostCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// Tries `backends` in order before falling back to window mode changes.
    #[must_use]
    pub fn with_fullscreen_backends(
        mut self,
        mut backends: Vec<Box<dyn FullscreenBackend>>,
    ) -> Self {
        backends.push(Box::new(self.fullscreen_requests.clone()));
        self.fullscreen = FullscreenCoordinator::new(backends);
        self
    }

    /// Installs the host's mini player.
    #[must_use]
    pub fn with_picture_in_picture(mut self, backend: Box<dyn PictureInPictureBackend>) -> Self {
        self.picture_in_picture = PictureInPicture::new(backend);
        self
    }

    /// Announces the start item of a queue, then starts playback when
    /// autoplay is configured.
    pub fn start(&mut self) -> Vec<Effect> {
        let index = self.playlist.index();
        if let Some(item) = self.playlist.current() {
            self.callbacks.playlist_item_change(index, item);
        }

        if self.autoplay && self.session.source().is_some() {
            tracing::info!("autoplay");
            vec![Effect::AwaitPlay(self.session.play())]
        } else {
            Vec::new()
        }
    }

    /// Builds the player and its startup task.
    pub fn boot(resource: R, config: &PlayerConfig) -> (Self, Task<Message>) {
        let mut player = Self::new(resource, config);
        let effects = player.start();
        let task = player.tasks_for(effects);
        (player, task)
    }

    /// Handles a message at `Instant::now()`.
    pub fn handle(&mut self, message: Message) -> Vec<Effect> {
        self.handle_at(message, Instant::now())
    }

    /// Handles a message, using `now` as the reference for the controls
    /// auto-hide countdown.
    pub fn handle_at(&mut self, message: Message, now: Instant) -> Vec<Effect> {
        update::handle(self, message, now)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let effects = self.handle(message);
        self.tasks_for(effects)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let frames_active = self.driver == PollDriver::External && self.session.is_polling();
        Subscription::batch([
            subscription::create_event_subscription(self.keyboard_enabled),
            subscription::create_frame_subscription(frames_active),
            subscription::create_tick_subscription(),
        ])
    }

    /// Pauses the session, which stops polling and supersedes pending play
    /// requests, then clears the controls countdown and drag state.
    pub fn teardown(&mut self) {
        self.session.pause();
        // The host is going away.
        let _ = self.session.drain_notifications();
        self.was_playing = false;
        self.controls.teardown();
        self.scrub.pointer_left();
    }

    fn tasks_for(&self, effects: Vec<Effect>) -> Task<Message> {
        Task::batch(effects.into_iter().map(|effect| self.effect_task(effect)))
    }

    fn effect_task(&self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::AwaitPlay(pending) => Task::perform(pending, Message::PlayResolved),
            Effect::SetWindowMode(enter) => {
                let Some(window_id) = self.window_id else {
                    tracing::warn!(enter, "fullscreen requested before a window was attached");
                    return Task::none();
                };
                let mode = if enter {
                    window::Mode::Fullscreen
                } else {
                    window::Mode::Windowed
                };
                window::set_mode(window_id, mode).chain(query_window_mode(window_id))
            }
            Effect::QueryWindowMode => match self.window_id {
                Some(window_id) => query_window_mode(window_id),
                None => Task::none(),
            },
        }
    }

    // =========================================================================
    // Read access
    // =========================================================================

    #[must_use]
    pub fn session(&self) -> &MediaSession<R> {
        &self.session
    }

    #[must_use]
    pub fn state(&self) -> &PlaybackState {
        self.session.state()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    #[must_use]
    pub fn playlist(&self) -> &PlaylistAdvancer {
        &self.playlist
    }

    /// Next queue item while the current one is close to its end.
    #[must_use]
    pub fn next_up(&self) -> Option<&PlaylistItem> {
        if is_near_end(self.session.state()) {
            self.playlist.next_up()
        } else {
            None
        }
    }

    #[must_use]
    pub fn scrub_state(&self) -> &ScrubState {
        self.scrub.state()
    }

    /// Preview thumbnail for the hovered seek bar position.
    #[must_use]
    pub fn preview_thumbnail(&self) -> Option<&str> {
        let duration = self.session.state().duration;
        self.scrub
            .thumbnail_index(duration, self.preview_thumbnails.len())
            .and_then(|index| self.preview_thumbnails.get(index))
            .map(String::as_str)
    }

    #[must_use]
    pub fn controls_visible(&self) -> bool {
        self.controls_enabled && self.controls.is_visible()
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.is_fullscreen()
    }

    /// Whether the mini player button should be offered.
    #[must_use]
    pub fn picture_in_picture_available(&self) -> bool {
        self.picture_in_picture_enabled && self.picture_in_picture.is_available()
    }

    #[must_use]
    pub fn is_picture_in_picture(&self) -> bool {
        self.picture_in_picture.is_active()
    }

    #[must_use]
    pub fn quality(&self) -> &str {
        &self.quality
    }

    #[must_use]
    pub fn qualities(&self) -> &[String] {
        &self.qualities
    }

    #[must_use]
    pub fn speed(&self) -> PlaybackSpeed {
        PlaybackSpeed::new(self.session.state().playback_rate)
    }

    #[must_use]
    pub fn volume_level(&self) -> VolumeLevel {
        let state = self.session.state();
        VolumeLevel::from_state(state.volume, state.muted)
    }

    #[must_use]
    pub fn volume_slider_value(&self) -> f32 {
        let state = self.session.state();
        volume_control::slider_value(state.volume, state.muted)
    }

    #[must_use]
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    #[must_use]
    pub fn poster(&self) -> Option<&str> {
        self.poster.as_deref()
    }

    #[must_use]
    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    #[must_use]
    pub fn plays_inline(&self) -> bool {
        self.plays_inline
    }

    /// Rejection of the latest play request, cleared once playback starts.
    #[must_use]
    pub fn play_error(&self) -> Option<&MediaError> {
        self.play_error.as_ref()
    }

    /// Refusal of the latest rate change, if the resource refused it.
    #[must_use]
    pub fn rate_error(&self) -> Option<&MediaError> {
        self.rate_error.as_ref()
    }
}

fn query_window_mode(window_id: window::Id) -> Task<Message> {
    window::mode(window_id)
        .map(|mode| Message::FullscreenChanged(mode == window::Mode::Fullscreen))
}

impl<R: MediaResource> fmt::Debug for Player<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("source", &self.session.source())
            .field("phase", &self.session.phase())
            .field("playlist_index", &self.playlist.index())
            .field("quality", &self.quality)
            .field("fullscreen", &self.fullscreen)
            .field("picture_in_picture", &self.picture_in_picture)
            .field("callbacks", &self.callbacks)
            .finish_non_exhaustive()
    }
}
