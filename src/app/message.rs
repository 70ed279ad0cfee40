// SPDX-License-Identifier: MPL-2.0
//! Messages consumed by [`Player::update`](super::Player::update).

use crate::ui::shortcuts::Command;
use crate::video_player::PlayOutcome;
use iced::{window, Point, Rectangle};
use std::time::Instant;

#[derive(Debug, Clone)]
pub enum Message {
    // Transport
    Play,
    Pause,
    TogglePlay,
    Replay,
    /// Outcome of a play request started by an earlier message.
    PlayResolved(PlayOutcome),
    SeekTo(f64),
    SeekBy(f64),

    // Audio and rate
    SetVolume(f32),
    ToggleMute,
    /// Mute button of the volume control.
    MuteClicked,
    /// Volume slider dragged.
    VolumeSliderChanged(f32),
    SetSpeed(f64),

    // Settings menu
    SelectQuality(String),
    ToggleLoop,

    // Fullscreen
    ToggleFullscreen,
    /// Current window mode as reported by the environment.
    FullscreenChanged(bool),
    /// The window changed size, possibly because its mode changed.
    WindowResized(window::Id),

    // Mini player
    TogglePictureInPicture,
    /// The host's mini player opened or closed.
    PictureInPictureChanged(bool),

    // Playlist
    NextItem,
    PreviousItem,
    SelectItem(usize),
    SetAutoAdvance(bool),

    // Pointer and keyboard input
    /// Bound key pressed while the player window had focus.
    Shortcut {
        window: window::Id,
        command: Command,
    },
    VideoClicked,
    VideoDoubleClicked,
    ScrubPressed(Point),
    PointerMoved(Point),
    PointerReleased,
    PointerLeft,
    /// Seek bar bounds changed after layout.
    TrackResized(Rectangle),
    /// Binds the player to the window whose mode it controls.
    Attach(window::Id),

    /// Frame-synchronized poll of the media position.
    Frame,
    /// Periodic housekeeping: inbox draining and controls auto-hide.
    Tick(Instant),
}
