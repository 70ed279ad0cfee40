// SPDX-License-Identifier: MPL-2.0
//! Keyboard shortcut table.
//!
//! | Key | Command |
//! |---|---|
//! | `Space`, `K` | play / pause |
//! | `←`, `J` | back 5 s |
//! | `→`, `L` | forward 5 s |
//! | `↑` / `↓` | volume ±10% |
//! | `M` | mute |
//! | `F` | fullscreen |
//! | `I` | mini player |
//! | `0`–`9` | jump to 0%–90% |
//! | `Home` / `End` | start / end |
//! | `Shift+N` / `Shift+P` | next / previous playlist item |
//! | `>` / `<` | faster / slower |
//!
//! Shortcuts are inert while a text entry has focus and never match when
//! the command (Ctrl/⌘) or Alt modifier is held.

use crate::config::{SEEK_STEP_SECS, VOLUME_STEP};
use iced::event;
use iced::keyboard::{self, key::Named, Key, Modifiers};

/// Player command bound to a key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    TogglePlay,
    SeekBy(f64),
    VolumeBy(f32),
    ToggleMute,
    ToggleFullscreen,
    TogglePictureInPicture,
    SeekToPercent(f64),
    NextItem,
    PreviousItem,
    SpeedUp,
    SpeedDown,
}

/// Where keyboard focus currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// A text field owns the keyboard.
    TextEntry,
    Other,
}

/// Result of offering a key press to the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dispatch {
    /// The key is bound; the host should suppress its default behavior.
    Handled(Command),
    Ignored,
}

impl Dispatch {
    #[must_use]
    pub fn command(self) -> Option<Command> {
        match self {
            Dispatch::Handled(command) => Some(command),
            Dispatch::Ignored => None,
        }
    }
}

/// Looks up the command bound to `key`.
#[must_use]
pub fn command_for(key: &Key, modifiers: Modifiers) -> Option<Command> {
    if modifiers.command() || modifiers.alt() {
        return None;
    }

    match key {
        Key::Named(Named::Space) => Some(Command::TogglePlay),
        Key::Named(Named::ArrowLeft) => Some(Command::SeekBy(-SEEK_STEP_SECS)),
        Key::Named(Named::ArrowRight) => Some(Command::SeekBy(SEEK_STEP_SECS)),
        Key::Named(Named::ArrowUp) => Some(Command::VolumeBy(VOLUME_STEP)),
        Key::Named(Named::ArrowDown) => Some(Command::VolumeBy(-VOLUME_STEP)),
        Key::Named(Named::Home) => Some(Command::SeekToPercent(0.0)),
        Key::Named(Named::End) => Some(Command::SeekToPercent(100.0)),
        Key::Character(c) => character_command(c.as_str(), modifiers.shift()),
        _ => None,
    }
}

fn character_command(c: &str, shift: bool) -> Option<Command> {
    match c {
        ">" => return Some(Command::SpeedUp),
        "<" => return Some(Command::SpeedDown),
        _ => {}
    }

    let mut chars = c.chars();
    let (Some(ch), None) = (chars.next(), chars.next()) else {
        return None;
    };

    if let Some(digit) = ch.to_digit(10) {
        return Some(Command::SeekToPercent(f64::from(digit) * 10.0));
    }

    match (ch.to_ascii_lowercase(), shift) {
        ('k', _) => Some(Command::TogglePlay),
        ('j', _) => Some(Command::SeekBy(-SEEK_STEP_SECS)),
        ('l', _) => Some(Command::SeekBy(SEEK_STEP_SECS)),
        ('m', _) => Some(Command::ToggleMute),
        ('f', _) => Some(Command::ToggleFullscreen),
        ('i', _) => Some(Command::TogglePictureInPicture),
        ('n', true) => Some(Command::NextItem),
        ('p', true) => Some(Command::PreviousItem),
        _ => None,
    }
}

/// Offers a key press to the shortcut table.
#[must_use]
pub fn dispatch(key: &Key, modifiers: Modifiers, focus: Focus) -> Dispatch {
    if focus == Focus::TextEntry {
        return Dispatch::Ignored;
    }
    command_for(key, modifiers).map_or(Dispatch::Ignored, Dispatch::Handled)
}

/// Offers a raw keyboard event, treating events already captured by a
/// widget (text inputs) as text-entry focus.
#[must_use]
pub fn dispatch_event(event: &keyboard::Event, status: event::Status) -> Dispatch {
    let focus = match status {
        event::Status::Captured => Focus::TextEntry,
        event::Status::Ignored => Focus::Other,
    };

    match event {
        keyboard::Event::KeyPressed { key, modifiers, .. } => dispatch(key, *modifiers, focus),
        _ => Dispatch::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ch(c: &str) -> Key {
        Key::Character(c.into())
    }

    fn plain(key: Key) -> Option<Command> {
        command_for(&key, Modifiers::default())
    }

    #[test]
    fn transport_keys() {
        assert_eq!(plain(Key::Named(Named::Space)), Some(Command::TogglePlay));
        assert_eq!(plain(ch("k")), Some(Command::TogglePlay));
        assert_eq!(plain(ch("K")), Some(Command::TogglePlay));
        assert_eq!(plain(ch("m")), Some(Command::ToggleMute));
        assert_eq!(plain(ch("f")), Some(Command::ToggleFullscreen));
        assert_eq!(plain(ch("i")), Some(Command::TogglePictureInPicture));
    }

    #[test]
    fn seek_keys() {
        assert_eq!(plain(Key::Named(Named::ArrowLeft)), Some(Command::SeekBy(-5.0)));
        assert_eq!(plain(ch("j")), Some(Command::SeekBy(-5.0)));
        assert_eq!(plain(Key::Named(Named::ArrowRight)), Some(Command::SeekBy(5.0)));
        assert_eq!(plain(ch("L")), Some(Command::SeekBy(5.0)));
        assert_eq!(plain(Key::Named(Named::Home)), Some(Command::SeekToPercent(0.0)));
        assert_eq!(plain(Key::Named(Named::End)), Some(Command::SeekToPercent(100.0)));
    }

    #[test]
    fn digits_jump_by_tenths() {
        assert_eq!(plain(ch("0")), Some(Command::SeekToPercent(0.0)));
        assert_eq!(plain(ch("3")), Some(Command::SeekToPercent(30.0)));
        assert_eq!(plain(ch("9")), Some(Command::SeekToPercent(90.0)));
    }

    #[test]
    fn volume_keys() {
        assert_eq!(plain(Key::Named(Named::ArrowUp)), Some(Command::VolumeBy(0.1)));
        assert_eq!(plain(Key::Named(Named::ArrowDown)), Some(Command::VolumeBy(-0.1)));
    }

    #[test]
    fn playlist_keys_need_shift() {
        assert_eq!(plain(ch("n")), None);
        assert_eq!(command_for(&ch("N"), Modifiers::SHIFT), Some(Command::NextItem));
        assert_eq!(command_for(&ch("P"), Modifiers::SHIFT), Some(Command::PreviousItem));
    }

    #[test]
    fn speed_keys() {
        assert_eq!(command_for(&ch(">"), Modifiers::SHIFT), Some(Command::SpeedUp));
        assert_eq!(command_for(&ch("<"), Modifiers::SHIFT), Some(Command::SpeedDown));
    }

    #[test]
    fn command_and_alt_modifiers_never_match() {
        assert_eq!(command_for(&ch("k"), Modifiers::CTRL | Modifiers::LOGO), None);
        assert_eq!(command_for(&Key::Named(Named::Space), Modifiers::ALT), None);
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(plain(ch("x")), None);
        assert_eq!(plain(Key::Named(Named::Escape)), None);
        assert_eq!(
            dispatch(&ch("q"), Modifiers::default(), Focus::Other),
            Dispatch::Ignored
        );
    }

    #[test]
    fn text_entry_focus_suppresses_shortcuts() {
        assert_eq!(
            dispatch(&ch("k"), Modifiers::default(), Focus::TextEntry),
            Dispatch::Ignored
        );
        assert_eq!(
            dispatch(&ch("k"), Modifiers::default(), Focus::Other),
            Dispatch::Handled(Command::TogglePlay)
        );
    }

    #[test]
    fn handled_dispatch_exposes_command() {
        assert_eq!(
            Dispatch::Handled(Command::ToggleMute).command(),
            Some(Command::ToggleMute)
        );
        assert_eq!(Dispatch::Ignored.command(), None);
    }
}
