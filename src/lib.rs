// SPDX-License-Identifier: MPL-2.0
//! `pimo_player` is an embeddable video player core for iced applications.
//!
//! It owns a single media resource through a playback session, reconciles
//! asynchronous play requests and resource events into one state snapshot,
//! and provides the control surface logic (seek bar scrubbing, keyboard
//! shortcuts, fullscreen, auto-hiding controls, playlists) as plain state
//! machines wired into iced messages and subscriptions.

#![doc(html_root_url = "https://docs.rs/pimo_player/0.1.0")]

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod ui;
pub mod video_player;

#[cfg(test)]
pub(crate) mod test_utils;
