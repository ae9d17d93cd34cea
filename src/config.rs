//! # Settings
//!
//! User settings stored as YAML:
//!
//! ```yaml
//! metronome:
//!   bpm: 96
//!   time-signature: 3/4
//!   volume: 80
//! instruments:
//!   Nord Stage 3:
//!     0: Grand Piano
//!     65: B3 Organ
//!   Yamaha MODX:
//!     2: E.Piano
//! ```
//!
//! Every section is optional and falls back to its defaults.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::BandBuddyError;
use crate::measures::beats_per_measure;
use crate::metronome::{MetronomeSettings, MAX_BPM};

/// Custom program names keyed by absolute program number.
pub type ProgramNames = BTreeMap<u16, String>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub metronome: MetronomeSettings,
    /// Custom program names per instrument name
    pub instruments: BTreeMap<String, ProgramNames>,
}

impl Settings {
    /// Parse settings from YAML text.
    ///
    /// ```
    /// use bandbuddy::Settings;
    ///
    /// let settings = Settings::from_yaml("metronome:\n  bpm: 96\n").unwrap();
    /// assert_eq!(settings.metronome.bpm, 96.0);
    /// assert_eq!(settings.metronome.time_signature, "4/4");
    /// ```
    pub fn from_yaml(content: &str) -> Result<Self, BandBuddyError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut settings: Settings = serde_yaml::from_str(content)
            .map_err(|e| BandBuddyError::ConfigError(e.to_string()))?;
        settings.sanitize();
        Ok(settings)
    }

    /// Read and parse a settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BandBuddyError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            BandBuddyError::ConfigError(format!("reading '{}': {}", path.display(), e))
        })?;
        let settings = Self::from_yaml(&content)?;
        tracing::debug!(path = %path.display(), instruments = settings.instruments.len(), "loaded settings");
        Ok(settings)
    }

    /// Custom program names for an instrument; empty when none are stored.
    pub fn program_names(&self, instrument: &str) -> ProgramNames {
        self.instruments.get(instrument).cloned().unwrap_or_default()
    }

    /// Replace values the metronome cannot use with defaults.
    fn sanitize(&mut self) {
        let defaults = MetronomeSettings::default();
        let metronome = &mut self.metronome;

        if !(metronome.bpm.is_finite() && metronome.bpm > 0.0) {
            tracing::warn!(bpm = metronome.bpm, "ignoring configured tempo");
            metronome.bpm = defaults.bpm;
        } else if metronome.bpm > MAX_BPM {
            tracing::warn!(bpm = metronome.bpm, "clamping configured tempo to {} bpm", MAX_BPM);
            metronome.bpm = MAX_BPM;
        }
        if beats_per_measure(&metronome.time_signature).is_none() {
            tracing::warn!(time_signature = %metronome.time_signature, "ignoring configured time signature");
            metronome.time_signature = defaults.time_signature;
        }
        if metronome.volume > 100 {
            tracing::warn!(volume = metronome.volume, "clamping configured volume to 100");
            metronome.volume = 100;
        }
        if !(metronome.look_ahead_ms.is_finite() && metronome.look_ahead_ms >= 0.0) {
            tracing::warn!(look_ahead_ms = metronome.look_ahead_ms, "ignoring configured look-ahead");
            metronome.look_ahead_ms = defaults.look_ahead_ms;
        }
    }
}
