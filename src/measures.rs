//! # Measures
//!
//! Estimate how many measures a song lasts from its duration, tempo and time
//! signature. Used as a hint next to the song form, so any missing or
//! unparseable input yields `None` rather than an error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::duration::parse_duration_or_none;
use crate::error::BandBuddyError;

/// Time signature such as `4/4`, `3/4` or `6/8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSignature {
    pub beats: u32,
    pub beat_type: u32,
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self {
            beats: 4,
            beat_type: 4,
        }
    }
}

impl FromStr for TimeSignature {
    type Err = BandBuddyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BandBuddyError::InvalidTimeSignature(s.to_string());
        let (beats, beat_type) = s.trim().split_once('/').ok_or_else(invalid)?;
        let beats: u32 = beats.trim().parse().map_err(|_| invalid())?;
        let beat_type: u32 = beat_type.trim().parse().map_err(|_| invalid())?;
        if beats == 0 || beat_type == 0 {
            return Err(invalid());
        }
        Ok(Self { beats, beat_type })
    }
}

impl TryFrom<String> for TimeSignature {
    type Error = BandBuddyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TimeSignature> for String {
    fn from(ts: TimeSignature) -> Self {
        ts.to_string()
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.beats, self.beat_type)
    }
}

/// Beats per measure from a time signature string.
///
/// Only the numerator is read; the beat unit may be anything. Returns `None`
/// unless the numerator is a positive integer.
///
/// ```
/// use bandbuddy::beats_per_measure;
///
/// assert_eq!(beats_per_measure("6/8"), Some(6));
/// assert_eq!(beats_per_measure("x/4"), None);
/// ```
pub fn beats_per_measure(time_signature: &str) -> Option<u32> {
    let numerator = time_signature
        .split('/')
        .next()
        .map(str::trim)
        .unwrap_or_default();
    match numerator.parse::<u32>() {
        Ok(n) if n > 0 => Some(n),
        _ => None,
    }
}

/// Song duration as either a seconds count or `m:ss` text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DurationInput<'a> {
    Seconds(u32),
    Text(&'a str),
}

impl DurationInput<'_> {
    fn seconds(self) -> Option<u32> {
        match self {
            DurationInput::Seconds(s) => Some(s),
            DurationInput::Text(t) => parse_duration_or_none(Some(t)),
        }
    }
}

impl From<u32> for DurationInput<'_> {
    fn from(seconds: u32) -> Self {
        DurationInput::Seconds(seconds)
    }
}

impl<'a> From<&'a str> for DurationInput<'a> {
    fn from(text: &'a str) -> Self {
        DurationInput::Text(text)
    }
}

/// Estimate the number of measures in a song.
///
/// `measures = round(seconds * bpm / 60 / beats_per_measure)`, rounding half
/// away from zero. Returns `None` if any input is missing or unparseable, or if
/// `bpm` is not a positive finite number.
///
/// ```
/// use bandbuddy::calculate_measures;
///
/// assert_eq!(calculate_measures(Some("2:00".into()), Some(120.0), Some("4/4")), Some(60));
/// assert_eq!(calculate_measures(None, Some(120.0), Some("4/4")), None);
/// ```
pub fn calculate_measures(
    duration: Option<DurationInput<'_>>,
    bpm: Option<f64>,
    time_signature: Option<&str>,
) -> Option<u32> {
    let seconds = duration?.seconds()?;
    let bpm = bpm.filter(|b| b.is_finite() && *b > 0.0)?;
    let beats_per_measure = beats_per_measure(time_signature?)?;

    let beats_per_second = bpm / 60.0;
    let total_beats = f64::from(seconds) * beats_per_second;
    let measures = (total_beats / f64::from(beats_per_measure)).round();

    if measures > f64::from(u32::MAX) {
        return None;
    }
    Some(measures as u32)
}
