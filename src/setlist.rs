//! # Setlists
//!
//! Songs as they come out of the library, and the totals shown for a setlist.
//!
//! The two duration call sites differ on purpose: a setlist total skips songs
//! without a usable duration (they count as zero), while a single song's
//! measure estimate is simply absent.

use serde::{Deserialize, Serialize};

use crate::chords::transpose_key;
use crate::duration::{format_duration, parse_duration_or_zero};
use crate::measures::{calculate_measures, DurationInput};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Song {
    pub title: String,
    /// `m:ss`
    pub duration: Option<String>,
    pub bpm: Option<f64>,
    pub time_signature: Option<String>,
    pub key: Option<String>,
}

impl Song {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Duration in seconds, `0` when missing or invalid.
    pub fn seconds(&self) -> u32 {
        parse_duration_or_zero(self.duration.as_deref())
    }

    /// Estimated number of measures, `None` when anything needed is missing.
    pub fn measures(&self) -> Option<u32> {
        calculate_measures(
            self.duration.as_deref().map(DurationInput::Text),
            self.bpm,
            self.time_signature.as_deref(),
        )
    }

    /// The song's key moved by `semitones`, if it has one.
    pub fn transposed_key(&self, semitones: i32) -> Option<String> {
        self.key.as_deref().map(|key| transpose_key(key, semitones))
    }
}

/// Total running time of a setlist in seconds.
///
/// ```
/// use bandbuddy::{setlist_total_seconds, Song};
///
/// let mut a = Song::new("Opener");
/// a.duration = Some("3:30".into());
/// let mut b = Song::new("Closer");
/// b.duration = Some("4:45".into());
/// let c = Song::new("Unknown length");
///
/// assert_eq!(setlist_total_seconds(&[a, b, c]), 495);
/// ```
pub fn setlist_total_seconds(songs: &[Song]) -> u64 {
    songs.iter().map(|song| u64::from(song.seconds())).sum()
}

/// Total running time of a setlist for display, e.g. `"1h 2m 5s"`.
pub fn format_setlist_length(songs: &[Song]) -> String {
    let total = i64::try_from(setlist_total_seconds(songs)).unwrap_or(i64::MAX);
    format_duration(total)
}
