//! Metronome type definitions

use serde::{Deserialize, Serialize};

/// Default tempo when none (or an unusable one) is configured.
pub const DEFAULT_BPM: f64 = 120.0;

/// Fastest tempo the scheduler will run; faster requests are clamped.
pub const MAX_BPM: f64 = 400.0;

/// How far ahead of the clock beats are scheduled, in milliseconds.
pub const DEFAULT_LOOK_AHEAD_MS: f64 = 100.0;

/// MIDI note and base velocity for the first beat of a measure.
pub const DOWNBEAT_NOTE: u8 = 84;
pub const DOWNBEAT_VELOCITY: f32 = 1.0;

/// MIDI note and base velocity for every other beat.
pub const BEAT_NOTE: u8 = 79;
pub const BEAT_VELOCITY: f32 = 0.7;

/// One scheduled beat.
///
/// - `index`: position within the measure, 0-based
/// - `is_downbeat`: `index == 0`
/// - `time_ms`: when the beat should sound, on the host clock
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Beat {
    pub index: u32,
    pub is_downbeat: bool,
    pub time_ms: f64,
}

/// A beat ready for the sampler, with pitch and volume-scaled velocity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Click {
    #[serde(flatten)]
    pub beat: Beat,
    pub note: u8,
    pub velocity: f32,
}

impl Click {
    /// Build the click for `beat` at `volume` percent (clamped to 0-100).
    ///
    /// ```
    /// use bandbuddy::metronome::{Beat, Click, DOWNBEAT_NOTE};
    ///
    /// let beat = Beat { index: 0, is_downbeat: true, time_ms: 0.0 };
    /// let click = Click::for_beat(beat, 50);
    /// assert_eq!(click.note, DOWNBEAT_NOTE);
    /// assert_eq!(click.velocity, 0.5);
    /// ```
    pub fn for_beat(beat: Beat, volume: u8) -> Self {
        let (note, velocity) = if beat.is_downbeat {
            (DOWNBEAT_NOTE, DOWNBEAT_VELOCITY)
        } else {
            (BEAT_NOTE, BEAT_VELOCITY)
        };
        let scale = f32::from(volume.min(100)) / 100.0;
        Self {
            beat,
            note,
            velocity: velocity * scale,
        }
    }
}

/// Metronome configuration as stored in settings.
///
/// Keys use the same kebab-case style as song metadata:
///
/// ```yaml
/// bpm: 96
/// time-signature: 3/4
/// volume: 80
/// look-ahead-ms: 100
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MetronomeSettings {
    pub bpm: f64,
    pub time_signature: String,
    /// Percent, 0-100
    pub volume: u8,
    pub look_ahead_ms: f64,
}

impl Default for MetronomeSettings {
    fn default() -> Self {
        Self {
            bpm: DEFAULT_BPM,
            time_signature: "4/4".to_string(),
            volume: 100,
            look_ahead_ms: DEFAULT_LOOK_AHEAD_MS,
        }
    }
}
