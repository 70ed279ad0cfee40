// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Io(String),
    Config(String),
    Media(MediaError),
}

/// Failures reported by the media resource or the environment around it.
///
/// Only `LoadFailed` is durable: it is stored in the playback state and
/// surfaces in the UI. The other variants are logged and returned to the
/// caller of the action that produced them.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaError {
    /// The resource could not fetch or decode its source.
    LoadFailed(String),

    /// The resource refused to start playback (autoplay policy, interrupted
    /// load, decoder not ready).
    PlayRejected(String),

    /// The environment refused to enter or leave fullscreen.
    FullscreenDenied(String),

    /// The environment refused to float the video in a mini player.
    PictureInPictureDenied(String),

    /// The resource does not support the requested playback rate.
    RateRejected(f64),
}

impl MediaError {
    /// Returns true for errors that leave the session unusable until a new
    /// source is loaded.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, MediaError::LoadFailed(_))
    }
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaError::LoadFailed(msg) => write!(f, "Failed to load media: {}", msg),
            MediaError::PlayRejected(msg) => write!(f, "Playback was rejected: {}", msg),
            MediaError::FullscreenDenied(msg) => write!(f, "Fullscreen denied: {}", msg),
            MediaError::PictureInPictureDenied(msg) => {
                write!(f, "Picture-in-picture denied: {}", msg)
            }
            MediaError::RateRejected(rate) => write!(f, "Unsupported playback rate: {}", rate),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Media(e) => write!(f, "Media Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<MediaError> for Error {
    fn from(err: MediaError) -> Self {
        Error::Media(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
