//! # Chords
//!
//! Detect chord symbols inside free-text lyrics and transpose them.
//!
//! ## Sub-modules
//! - `grammar` - Token splitting, `♭`/`♯` normalization and the chord grammar
//! - `transpose` - Song-key and full chord-symbol transposition
//! - `lyrics` - Scanning lyric text into words, chords and whitespace
//!
//! ## Chord Grammar
//!
//! ```text
//! chord     := root quality? extension? modifier* ("/" root)?
//! root      := [A-G] ("b" | "#")?
//! quality   := "maj" | "min" | "m" | "dim" | "aug" | "sus" | "add"
//! extension := [0-9]+
//! modifier  := ("sus" | "add" | "b" | "#") [0-9]+
//! ```
//!
//! Capitalized words are not chords unless the whole token fits the grammar:
//! `Cmaj7`, `Bb/D` and `Gsus4` are chords; `Can` and `Do` are not.
//!
//! ## Example
//! ```rust
//! use bandbuddy::chords::{is_chord_token, transpose_key, transpose_lyrics};
//!
//! assert!(is_chord_token("(Cmaj7)"));
//! assert!(!is_chord_token("Can"));
//! assert_eq!(transpose_key("Bbm", 2), "Cm");
//! assert_eq!(transpose_lyrics("G  D/F# Em", 2), "A  E/G# F#m");
//! ```
//!
//! ## Enharmonic Spelling
//! A root keeps its accidental style: flat roots are respelled from the flat
//! table, everything else from the sharp table. Roots outside both tables
//! (`Cb`, `Fb`, `E#`, `B#`) are left as written.

mod grammar;
mod lyrics;
mod transpose;

pub use grammar::{is_chord_token, normalize_chord, parse_chord, split_token, Chord, TokenParts};
pub use lyrics::{is_chord_line, scan_lyrics, transpose_lyrics, LyricToken};
pub use transpose::{transpose_chord, transpose_key};
