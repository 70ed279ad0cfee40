// SPDX-License-Identifier: MPL-2.0
//! Playlist entries and alternative quality sources.

use serde::{Deserialize, Serialize};

/// One entry of a playback queue.
///
/// Items are immutable once the queue is built; the queue itself is shared
/// with the host and referenced by index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub id: String,
    pub src: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Duration in seconds, when known ahead of loading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

impl PlaylistItem {
    #[must_use]
    pub fn new(id: impl Into<String>, src: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            src: src.into(),
            title: title.into(),
            thumbnail: None,
            duration: None,
            channel: None,
        }
    }

    #[must_use]
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    #[must_use]
    pub fn with_thumbnail(mut self, uri: impl Into<String>) -> Self {
        self.thumbnail = Some(uri.into());
        self
    }

    #[must_use]
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }
}

/// An alternative encoding of the same media.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSource {
    pub src: String,
    /// MIME type such as `video/mp4`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Quality label such as `720p`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
}

impl VideoSource {
    #[must_use]
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            mime_type: None,
            quality: None,
        }
    }

    #[must_use]
    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = Some(quality.into());
        self
    }

    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// Finds the source labelled with `quality` (case-insensitive).
#[must_use]
pub fn source_for_quality<'a>(sources: &'a [VideoSource], quality: &str) -> Option<&'a VideoSource> {
    sources.iter().find(|source| {
        source
            .quality
            .as_deref()
            .is_some_and(|label| label.eq_ignore_ascii_case(quality))
    })
}
