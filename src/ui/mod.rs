// SPDX-License-Identifier: MPL-2.0
//! Control surface state.
//!
//! Each component here is pure state plus input handling. Components read
//! the [`PlaybackState`](crate::video_player::PlaybackState) and answer with
//! commands or effects; only the facade applies them to the session.
//!
//! - [`scrub`] - Seek bar hover preview and drag scrubbing
//! - [`shortcuts`] - Keyboard shortcut table
//! - [`fullscreen`] - Fullscreen backend chain
//! - [`picture_in_picture`] - Mini player requests
//! - [`controls_visibility`] - Control bar auto-hide
//! - [`volume_control`] - Mute button and volume slider

pub mod controls_visibility;
pub mod fullscreen;
pub mod picture_in_picture;
pub mod scrub;
pub mod shortcuts;
pub mod volume_control;
