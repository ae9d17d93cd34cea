//! Chord and key transposition
//!
//! Roots are looked up in a 12-tone table chosen by their accidental style
//! and re-rendered from the same table, so `Bb` moves to `C`, `Db`, ... and
//! `F#` moves to `G`, `G#`, ...

use super::grammar::{normalize_chord, parse_chord};

const SHARP_NOTES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];
const FLAT_NOTES: [&str; 12] = ["C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B"];

#[derive(Debug, Clone, Copy, PartialEq)]
enum Spelling {
    Sharp,
    Flat,
}

impl Spelling {
    fn of(note: &str) -> Option<Self> {
        if note.contains('b') {
            Some(Spelling::Flat)
        } else if note.contains('#') {
            Some(Spelling::Sharp)
        } else {
            None
        }
    }

    fn table(self) -> &'static [&'static str; 12] {
        match self {
            Spelling::Sharp => &SHARP_NOTES,
            Spelling::Flat => &FLAT_NOTES,
        }
    }
}

/// Move a note name by `semitones`, keeping `spelling`.
///
/// Returns `None` when the note is not in the table for that spelling.
fn shift_note(note: &str, semitones: i32, spelling: Spelling) -> Option<&'static str> {
    let table = spelling.table();
    let index = table.iter().position(|n| *n == note)? as i32;
    let shifted = (index + semitones.rem_euclid(12)).rem_euclid(12);
    Some(table[shifted as usize])
}

/// Split a key like `"Ebm"` into its root (`"Eb"`) and the remainder (`"m"`).
fn split_root(key: &str) -> Option<(&str, &str)> {
    let mut chars = key.char_indices();
    match chars.next() {
        Some((_, 'A'..='G')) => {}
        _ => return None,
    }
    let end = match chars.next() {
        Some((i, 'b' | '#')) => i + 1,
        Some((i, _)) => i,
        None => key.len(),
    };
    Some(key.split_at(end))
}

/// Transpose a song key such as `"F#"` or `"Bbm"` by a signed semitone count.
///
/// The root is respelled from the flat table when written with `b`, otherwise
/// from the sharp table. Whatever follows the root (a minor `m`) is kept as
/// written. Keys that do not start with a known root come back unchanged.
///
/// ```
/// use bandbuddy::chords::transpose_key;
///
/// assert_eq!(transpose_key("C", 2), "D");
/// assert_eq!(transpose_key("Am", 3), "Cm");
/// assert_eq!(transpose_key("Bb", 1), "B");
/// assert_eq!(transpose_key("Eb", -1), "D");
/// assert_eq!(transpose_key("F#m", 1), "Gm");
/// assert_eq!(transpose_key("Db", 1), "D");
/// assert_eq!(transpose_key("E", 1), "F");
/// assert_eq!(transpose_key("F", 1), "F#");
/// ```
pub fn transpose_key(key: &str, semitones: i32) -> String {
    let normalized = normalize_chord(key.trim());
    let Some((root, rest)) = split_root(&normalized) else {
        return key.to_string();
    };
    let spelling = Spelling::of(root).unwrap_or(Spelling::Sharp);
    match shift_note(root, semitones, spelling) {
        Some(new_root) => format!("{}{}", new_root, rest),
        None => key.to_string(),
    }
}

/// Transpose a full chord symbol, including a slash bass note.
///
/// Quality and extensions are kept verbatim. A natural bass note follows the
/// root's accidental style. Anything that is not a chord is returned as is.
///
/// ```
/// use bandbuddy::chords::transpose_chord;
///
/// assert_eq!(transpose_chord("Bbmaj7/D", 2), "Cmaj7/E");
/// assert_eq!(transpose_chord("D/F#", 2), "E/G#");
/// assert_eq!(transpose_chord("Abm7", -1), "Gm7");
/// assert_eq!(transpose_chord("chorus", 5), "chorus");
/// ```
pub fn transpose_chord(symbol: &str, semitones: i32) -> String {
    let Ok(mut chord) = parse_chord(symbol) else {
        return symbol.to_string();
    };

    let root_spelling = Spelling::of(&chord.root).unwrap_or(Spelling::Sharp);
    let Some(root) = shift_note(&chord.root, semitones, root_spelling) else {
        return symbol.to_string();
    };
    chord.root = root.to_string();

    if let Some(bass) = chord.bass.take() {
        let bass_spelling = Spelling::of(&bass).unwrap_or(root_spelling);
        match shift_note(&bass, semitones, bass_spelling) {
            Some(new_bass) => chord.bass = Some(new_bass.to_string()),
            None => return symbol.to_string(),
        }
    }

    chord.to_string()
}
