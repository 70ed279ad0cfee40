// SPDX-License-Identifier: MPL-2.0
//! Domain layer - pure value types shared by the session, the control
//! surface and the configuration.
//!
//! Nothing here talks to a media resource or a UI toolkit. The only external
//! dependency is `serde`, so playlist entries can be read from the settings
//! file.
//!
//! # Modules
//!
//! - [`time`]: Time formatting and parsing, buffered ranges
//!   ([`TimeRange`](time::TimeRange))
//! - [`playlist`]: Queue entries and quality sources
//!   ([`PlaylistItem`](playlist::PlaylistItem), [`VideoSource`](playlist::VideoSource))

pub mod playlist;
pub mod time;
