// SPDX-License-Identifier: MPL-2.0
//! Volume button and slider state.
//!
//! The control remembers the last audible volume so that unmuting a player
//! that was silenced by dragging the slider to zero restores a usable level.

use crate::video_player::Volume;

/// Speaker icon to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeLevel {
    Muted,
    Low,
    High,
}

impl VolumeLevel {
    #[must_use]
    pub fn from_state(volume: f32, muted: bool) -> Self {
        let volume = Volume::new(volume);
        if muted || volume.is_silent() {
            VolumeLevel::Muted
        } else if volume.is_low() {
            VolumeLevel::Low
        } else {
            VolumeLevel::High
        }
    }
}

/// Session call requested by the control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VolumeAction {
    SetVolume(f32),
    ToggleMute,
}

#[derive(Debug, Clone)]
pub struct VolumeControl {
    previous: Volume,
}

impl VolumeControl {
    #[must_use]
    pub fn new(initial: f32) -> Self {
        let initial = Volume::new(initial);
        Self {
            previous: if initial.is_silent() {
                Volume::default()
            } else {
                initial
            },
        }
    }

    /// Last audible volume.
    #[must_use]
    pub fn previous_volume(&self) -> f32 {
        self.previous.value()
    }

    /// Mute button pressed.
    pub fn mute_clicked(&mut self, volume: f32, muted: bool) -> VolumeAction {
        let volume = Volume::new(volume);
        if !muted && !volume.is_silent() {
            self.previous = volume;
            return VolumeAction::ToggleMute;
        }
        if volume.is_silent() {
            // Silenced through the slider: unmute to the remembered level.
            return VolumeAction::SetVolume(self.previous.value());
        }
        VolumeAction::ToggleMute
    }

    /// Slider dragged to `value`.
    pub fn slider_changed(&mut self, value: f32) -> VolumeAction {
        let volume = Volume::new(value);
        if !volume.is_silent() {
            self.previous = volume;
        }
        VolumeAction::SetVolume(volume.value())
    }

    /// Keyboard step by `delta`.
    pub fn step(&mut self, volume: f32, delta: f32) -> VolumeAction {
        self.slider_changed(volume + delta)
    }
}

impl Default for VolumeControl {
    fn default() -> Self {
        Self::new(Volume::default().value())
    }
}

/// Value displayed by the slider: zero while muted.
#[must_use]
pub fn slider_value(volume: f32, muted: bool) -> f32 {
    if muted {
        0.0
    } else {
        Volume::new(volume).value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn level_thresholds() {
        assert_eq!(VolumeLevel::from_state(0.8, true), VolumeLevel::Muted);
        assert_eq!(VolumeLevel::from_state(0.0, false), VolumeLevel::Muted);
        assert_eq!(VolumeLevel::from_state(0.3, false), VolumeLevel::Low);
        assert_eq!(VolumeLevel::from_state(0.5, false), VolumeLevel::High);
    }

    #[test]
    fn mute_remembers_audible_volume() {
        let mut control = VolumeControl::new(1.0);
        assert_eq!(control.mute_clicked(0.7, false), VolumeAction::ToggleMute);
        assert_abs_diff_eq!(control.previous_volume(), 0.7);
        assert_eq!(control.mute_clicked(0.7, true), VolumeAction::ToggleMute);
    }

    #[test]
    fn unmuting_from_zero_restores_previous_level() {
        let mut control = VolumeControl::new(1.0);
        control.slider_changed(0.4);
        control.slider_changed(0.0);
        assert_eq!(control.mute_clicked(0.0, true), VolumeAction::SetVolume(0.4));
    }

    #[test]
    fn slider_and_steps_are_clamped() {
        let mut control = VolumeControl::default();
        assert_eq!(control.slider_changed(1.4), VolumeAction::SetVolume(1.0));
        assert_eq!(control.step(0.05, -0.1), VolumeAction::SetVolume(0.0));
        assert_abs_diff_eq!(control.previous_volume(), 1.0);
    }

    #[test]
    fn slider_shows_zero_while_muted() {
        assert_abs_diff_eq!(slider_value(0.6, true), 0.0);
        assert_abs_diff_eq!(slider_value(0.6, false), 0.6);
    }
}
