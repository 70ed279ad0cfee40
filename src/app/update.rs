// SPDX-License-Identifier: MPL-2.0
//! Message handlers for the player facade.
//!
//! Handlers mutate the session and the control components, then
//! [`sync`] forwards the resulting notifications to the host and derives
//! follow-up effects (playlist advance, window mode changes).

use super::{Effect, Message, Player};
use crate::domain::playlist::source_for_quality;
use crate::ui::scrub;
use crate::ui::shortcuts::Command;
use crate::ui::volume_control::VolumeAction;
use crate::video_player::{MediaResource, Notification, PlaybackSpeed};
use std::time::Instant;

pub(super) fn handle<R: MediaResource>(
    player: &mut Player<R>,
    message: Message,
    now: Instant,
) -> Vec<Effect> {
    let mut effects = Vec::new();

    match message {
        Message::Play => effects.push(Effect::AwaitPlay(player.session.play())),
        Message::Pause => player.session.pause(),
        Message::TogglePlay | Message::VideoClicked => {
            effects.extend(player.session.toggle_play().map(Effect::AwaitPlay));
        }
        Message::Replay => effects.push(Effect::AwaitPlay(player.session.replay())),
        Message::PlayResolved(outcome) => {
            player.play_error = player.session.resolve_play(outcome).err();
        }
        Message::SeekTo(time) => player.session.seek(time),
        Message::SeekBy(delta) => player.session.seek_by(delta),

        Message::SetVolume(volume) => player.session.set_volume(volume),
        Message::ToggleMute => player.session.toggle_mute(),
        Message::MuteClicked => {
            let state = player.session.state();
            let action = player.volume_control.mute_clicked(state.volume, state.muted);
            apply_volume_action(player, action);
        }
        Message::VolumeSliderChanged(value) => {
            let action = player.volume_control.slider_changed(value);
            apply_volume_action(player, action);
        }
        Message::SetSpeed(rate) => {
            player.rate_error = player.session.set_playback_rate(rate).err();
        }

        Message::SelectQuality(label) => effects.extend(select_quality(player, &label)),
        Message::ToggleLoop => {
            player.looping = !player.looping;
            player.session.set_looping(player.looping);
        }

        Message::ToggleFullscreen | Message::VideoDoubleClicked => player.fullscreen.toggle(),
        Message::FullscreenChanged(fullscreen) => {
            if player.fullscreen.on_fullscreen_change(fullscreen) {
                player.callbacks.fullscreen_change(fullscreen);
            }
        }
        Message::WindowResized(window_id) => {
            player.window_id = Some(window_id);
            effects.push(Effect::QueryWindowMode);
        }

        Message::TogglePictureInPicture => toggle_picture_in_picture(player),
        Message::PictureInPictureChanged(active) => {
            if player.picture_in_picture.on_change(active) {
                player.callbacks.picture_in_picture(active);
            }
        }

        Message::NextItem => {
            if player.playlist.next_item().is_some() {
                effects.extend(start_current_item(player));
            }
        }
        Message::PreviousItem => {
            if player.playlist.previous_item().is_some() {
                effects.extend(start_current_item(player));
            }
        }
        Message::SelectItem(index) => {
            if player.playlist.select(index).is_some() {
                effects.extend(start_current_item(player));
            }
        }
        Message::SetAutoAdvance(enabled) => player.playlist.set_auto_advance(enabled),

        Message::Shortcut { window, command } => {
            player.window_id = Some(window);
            show_controls(player, now);
            effects.extend(run_command(player, command));
        }
        Message::ScrubPressed(position) => {
            show_controls(player, now);
            if player.controls_enabled {
                let duration = player.session.state().duration;
                let effect = player.scrub.pointer_pressed(position, duration);
                apply_scrub_effect(player, effect);
            }
        }
        Message::PointerMoved(position) => {
            show_controls(player, now);
            if player.controls_enabled {
                let duration = player.session.state().duration;
                let effect = player.scrub.pointer_moved(position, duration);
                apply_scrub_effect(player, effect);
            }
        }
        Message::PointerReleased => {
            player.scrub.pointer_released();
        }
        Message::PointerLeft => player.scrub.pointer_left(),
        Message::TrackResized(bounds) => player.scrub.set_track(bounds),
        Message::Attach(window_id) => player.window_id = Some(window_id),

        Message::Frame => player.session.tick(),
        Message::Tick(_) => {
            player.session.pump();
        }
    }

    effects.extend(sync(player, now));
    effects
}

/// Runs a keyboard command.
pub(super) fn run_command<R: MediaResource>(
    player: &mut Player<R>,
    command: Command,
) -> Vec<Effect> {
    match command {
        Command::TogglePlay => player
            .session
            .toggle_play()
            .map(Effect::AwaitPlay)
            .into_iter()
            .collect(),
        Command::SeekBy(delta) => {
            player.session.seek_by(delta);
            Vec::new()
        }
        Command::SeekToPercent(percent) => {
            player.session.seek_to_percent(percent);
            Vec::new()
        }
        Command::VolumeBy(delta) => {
            let volume = player.session.state().volume;
            let action = player.volume_control.step(volume, delta);
            apply_volume_action(player, action);
            Vec::new()
        }
        Command::ToggleMute => {
            player.session.toggle_mute();
            Vec::new()
        }
        Command::ToggleFullscreen => {
            player.fullscreen.toggle();
            Vec::new()
        }
        Command::TogglePictureInPicture => {
            toggle_picture_in_picture(player);
            Vec::new()
        }
        Command::NextItem => {
            if player.playlist.next_item().is_some() {
                start_current_item(player)
            } else {
                Vec::new()
            }
        }
        Command::PreviousItem => {
            if player.playlist.previous_item().is_some() {
                start_current_item(player)
            } else {
                Vec::new()
            }
        }
        Command::SpeedUp | Command::SpeedDown => {
            let current = PlaybackSpeed::new(player.session.state().playback_rate);
            let next = if command == Command::SpeedUp {
                current.faster()
            } else {
                current.slower()
            };
            player.rate_error = player.session.set_playback_rate(next.value()).err();
            Vec::new()
        }
    }
}

/// Switches to the source of `label`, keeping the playhead and the
/// playing flag.
pub(super) fn select_quality<R: MediaResource>(
    player: &mut Player<R>,
    label: &str,
) -> Vec<Effect> {
    if player.quality == label {
        return Vec::new();
    }

    let source = source_for_quality(&player.sources, label)
        .or_else(|| {
            label
                .eq_ignore_ascii_case("auto")
                .then(|| player.sources.first())
                .flatten()
        })
        .map(|source| source.src.clone());

    let mut effects = Vec::new();
    if let Some(src) = source {
        let state = player.session.state();
        let resume_at = state.current_time;
        let was_playing = state.playing;
        tracing::info!(quality = label, src = %src, resume_at, "switching quality");
        player.session.load_at(&src, resume_at);
        if was_playing {
            effects.push(Effect::AwaitPlay(player.session.play()));
        }
    } else {
        tracing::debug!(quality = label, "no source for quality");
    }

    player.quality = label.to_string();
    player.callbacks.quality_change(label);
    effects
}

/// Loads the playlist's current item and starts it.
pub(super) fn start_current_item<R: MediaResource>(player: &mut Player<R>) -> Vec<Effect> {
    let index = player.playlist.index();
    let Some(item) = player.playlist.current().cloned() else {
        return Vec::new();
    };

    player.session.load(&item.src);
    player.callbacks.playlist_item_change(index, &item);
    vec![Effect::AwaitPlay(player.session.play())]
}

/// Forwards queued notifications and derives follow-up effects.
pub(super) fn sync<R: MediaResource>(player: &mut Player<R>, now: Instant) -> Vec<Effect> {
    for notification in player.session.drain_notifications() {
        match notification {
            Notification::TimeUpdate(time) => player.callbacks.time_update(time),
            Notification::Play => {
                player.play_error = None;
                player.callbacks.play();
            }
            Notification::Pause => player.callbacks.pause(),
            Notification::Ended => player.callbacks.ended(),
            Notification::VolumeChange { volume, muted } => {
                player.callbacks.volume_change(volume, muted);
            }
            Notification::RateChange(_)
            | Notification::MetadataLoaded { .. }
            | Notification::Failed(_) => {}
        }
    }

    let playing = player.session.state().playing;
    if playing != player.was_playing {
        player.was_playing = playing;
        player.controls.on_playing_changed(now, playing);
    }
    player.controls.poll(now, playing);

    let mut effects = Vec::new();
    if player.playlist.on_state(player.session.state()).is_some() {
        effects.extend(start_current_item(player));
    }
    if let Some(enter) = player.fullscreen_requests.take() {
        effects.push(Effect::SetWindowMode(enter));
    }
    effects
}

fn toggle_picture_in_picture<R: MediaResource>(player: &mut Player<R>) {
    if player.picture_in_picture_enabled {
        player.picture_in_picture.toggle();
    } else {
        tracing::debug!("mini player disabled by configuration");
    }
}

fn show_controls<R: MediaResource>(player: &mut Player<R>, now: Instant) {
    let playing = player.session.state().playing;
    player.controls.on_activity(now, playing);
}

fn apply_scrub_effect<R: MediaResource>(player: &mut Player<R>, effect: scrub::Effect) {
    if let scrub::Effect::Seek(time) = effect {
        player.session.seek(time);
    }
}

fn apply_volume_action<R: MediaResource>(player: &mut Player<R>, action: VolumeAction) {
    match action {
        VolumeAction::SetVolume(volume) => player.session.set_volume(volume),
        VolumeAction::ToggleMute => player.session.toggle_mute(),
    }
}
