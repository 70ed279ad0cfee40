// SPDX-License-Identifier: MPL-2.0
//! Playback engine.
//!
//! A [`MediaSession`] owns a [`MediaResource`] and keeps a [`PlaybackState`]
//! in sync with it through a single event inbox and a frame-cadence
//! polling loop. Playlist advance and the audio/speed value types live here
//! as well.

mod playback_speed;
pub mod playlist;
pub mod polling;
pub mod resource;
pub mod session;
pub mod simulated;
mod state;
mod volume;

pub use playback_speed::PlaybackSpeed;
pub use playlist::{is_near_end, PlaylistAdvancer};
pub use polling::{PollDriver, PollTick};
pub use resource::{EventSink, MediaResource, PlayRequest, ResourceEvent};
pub use session::{
    ActionTicket, MediaSession, Notification, PendingPlay, PlayOutcome, SessionInput,
};
pub use simulated::{PlayMode, SimulatedHandle, SimulatedResource};
pub use state::{Phase, PlaybackState};
pub use volume::Volume;
