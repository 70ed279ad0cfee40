// SPDX-License-Identifier: MPL-2.0
//! Playback time helpers: clock formatting, parsing and buffered ranges.

/// A contiguous buffered span of the media, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Inclusive on both ends.
    #[must_use]
    pub fn contains(&self, time: f64) -> bool {
        self.start <= time && time <= self.end
    }
}

/// Formats seconds as `M:SS`, or `H:MM:SS` once an hour is reached.
///
/// Non-finite input renders as `0:00`; negative input is treated as zero.
///
/// # Example
///
/// ```
/// use pimo_player::domain::time::format_time;
///
/// assert_eq!(format_time(65.0), "1:05");
/// assert_eq!(format_time(3661.0), "1:01:01");
/// assert_eq!(format_time(f64::NAN), "0:00");
/// ```
#[must_use]
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "0:00".to_string();
    }

    let total = seconds.max(0.0).floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Parses `H:MM:SS`, `M:SS` or plain seconds back into seconds.
///
/// Components that fail to parse count as zero, mirroring what a user typing
/// into a time field expects.
#[must_use]
pub fn parse_time(text: &str) -> f64 {
    let parts: Vec<f64> = text
        .trim()
        .split(':')
        .map(|part| part.trim().parse::<f64>().unwrap_or(0.0))
        .collect();

    let value = match parts.as_slice() {
        [hours, minutes, seconds] => hours * 3600.0 + minutes * 60.0 + seconds,
        [minutes, seconds] => minutes * 60.0 + seconds,
        [seconds] => *seconds,
        _ => 0.0,
    };

    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Percentage of the media buffered ahead of `current_time`.
///
/// Looks for the range containing `current_time` and reports its end as a
/// share of the duration. Returns 0 when no range contains the playhead or
/// the duration is unknown.
#[must_use]
pub fn buffered_percent(ranges: &[TimeRange], current_time: f64, duration: f64) -> f64 {
    if duration <= 0.0 || !duration.is_finite() {
        return 0.0;
    }

    ranges
        .iter()
        .find(|range| range.contains(current_time))
        .map_or(0.0, |range| range.end / duration * 100.0)
}
