//! # BandBuddy
//!
//! The domain core behind BandBuddy: song durations and measure estimates,
//! chord detection and transposition in lyrics, MIDI program pickers and
//! program-change messages, and the live metronome.
//!
//! ## Modules
//! - `duration` - `m:ss` parsing and display formatting
//! - `measures` - Measure estimates from duration, tempo and time signature
//! - `chords` - Chord grammar, lyric scanning and transposition
//! - `programs` - Program pickers (Nord bank grid or named programs)
//! - `midi` - Program-change byte encoding
//! - `metronome` - Look-ahead click scheduling
//! - `setlist` - Songs and setlist totals
//! - `config` - YAML settings
//! - `error` - Error type for the strict parsers
//!
//! ## Example
//! ```rust
//! use bandbuddy::{calculate_measures, format_duration, is_chord_token, parse_duration};
//!
//! assert_eq!(parse_duration("3:45"), Ok(225));
//! assert_eq!(format_duration(3661), "1h 1m 1s");
//! assert_eq!(calculate_measures(Some("2:00".into()), Some(120.0), Some("4/4")), Some(60));
//! assert!(is_chord_token("Bb/D"));
//! ```

pub mod chords;
pub mod config;
pub mod duration;
pub mod error;
pub mod measures;
pub mod metronome;
pub mod midi;
pub mod programs;
pub mod setlist;

pub use chords::{is_chord_token, split_token, transpose_chord, transpose_key};
pub use config::{ProgramNames, Settings};
pub use duration::{
    format_duration, format_duration_to_string, parse_duration, parse_duration_or_none,
    parse_duration_or_zero,
};
pub use error::*;
pub use measures::{beats_per_measure, calculate_measures, DurationInput, TimeSignature};
pub use midi::ProgramChange;
pub use programs::{
    build_nord_program_options, build_program_options, ProgramGroup, ProgramOption,
    ProgramOptions,
};
pub use setlist::{format_setlist_length, setlist_total_seconds, Song};
