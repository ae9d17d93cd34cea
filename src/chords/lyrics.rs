//! Lyric scanning
//!
//! Splits lyric text into whitespace, plain words and chord tokens so a
//! renderer can highlight chords and a transpose control can rewrite them in
//! place.

use serde::Serialize;

use super::grammar::{is_chord_token, split_token};
use super::transpose::transpose_chord;

/// One piece of scanned lyric text.
///
/// Concatenating every token's text reproduces the input exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LyricToken {
    /// A run of whitespace, newlines included
    Space { text: String },
    /// A token that is not a chord
    Word { text: String },
    /// A chord symbol with the punctuation around it
    Chord {
        leading: String,
        chord: String,
        trailing: String,
    },
}

impl LyricToken {
    fn from_token(token: &str) -> Self {
        if is_chord_token(token) {
            let parts = split_token(token);
            LyricToken::Chord {
                leading: parts.leading.to_string(),
                chord: parts.core.to_string(),
                trailing: parts.trailing.to_string(),
            }
        } else {
            LyricToken::Word {
                text: token.to_string(),
            }
        }
    }

    /// Render the token back to text, transposing chords by `semitones`.
    pub fn render(&self, semitones: i32) -> String {
        match self {
            LyricToken::Space { text } | LyricToken::Word { text } => text.clone(),
            LyricToken::Chord {
                leading,
                chord,
                trailing,
            } => {
                let chord = if semitones.rem_euclid(12) == 0 {
                    chord.clone()
                } else {
                    transpose_chord(chord, semitones)
                };
                format!("{}{}{}", leading, chord, trailing)
            }
        }
    }
}

/// Scan lyric text into whitespace runs, words and chords.
///
/// ```
/// use bandbuddy::chords::{scan_lyrics, LyricToken};
///
/// let tokens = scan_lyrics("Am  Hello");
/// assert_eq!(tokens.len(), 3);
/// assert!(matches!(tokens[0], LyricToken::Chord { .. }));
/// assert!(matches!(tokens[2], LyricToken::Word { .. }));
/// ```
pub fn scan_lyrics(text: &str) -> Vec<LyricToken> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;

    for (i, c) in text.char_indices() {
        let space = c.is_whitespace();
        match in_space {
            Some(prev) if prev != space => {
                tokens.push(make_token(&text[start..i], prev));
                start = i;
            }
            _ => {}
        }
        in_space = Some(space);
    }
    if let Some(prev) = in_space {
        tokens.push(make_token(&text[start..], prev));
    }

    tokens
}

fn make_token(text: &str, space: bool) -> LyricToken {
    if space {
        LyricToken::Space {
            text: text.to_string(),
        }
    } else {
        LyricToken::from_token(text)
    }
}

/// Rewrite lyric text with every chord transposed by `semitones`.
///
/// Words and whitespace are kept byte-for-byte. A whole-octave shift returns
/// the text unchanged.
pub fn transpose_lyrics(text: &str, semitones: i32) -> String {
    scan_lyrics(text)
        .iter()
        .map(|token| token.render(semitones))
        .collect()
}

/// Whether a line holds only chords (at least one).
///
/// ```
/// use bandbuddy::chords::is_chord_line;
///
/// assert!(is_chord_line("  G   D/F#  Em  C"));
/// assert!(!is_chord_line("G  and then D"));
/// assert!(!is_chord_line("   "));
/// ```
pub fn is_chord_line(line: &str) -> bool {
    let mut tokens = line.split_whitespace().peekable();
    tokens.peek().is_some() && tokens.all(is_chord_token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_reproduces_input() {
        let text = "[Verse]\n  C      G\nWell, (Am) I can't  say...\n";
        let rebuilt: String = scan_lyrics(text).iter().map(|t| t.render(0)).collect();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_scan_classifies_tokens() {
        let tokens = scan_lyrics("(Am) Can you");
        assert_eq!(
            tokens,
            vec![
                LyricToken::Chord {
                    leading: "(".to_string(),
                    chord: "Am".to_string(),
                    trailing: ")".to_string(),
                },
                LyricToken::Space { text: " ".to_string() },
                LyricToken::Word { text: "Can".to_string() },
                LyricToken::Space { text: " ".to_string() },
                LyricToken::Word { text: "you".to_string() },
            ]
        );
    }

    #[test]
    fn test_scan_empty_text() {
        assert!(scan_lyrics("").is_empty());
    }

    #[test]
    fn test_transpose_lyrics_only_touches_chords() {
        let text = "G       C\nOne day in the life, (D7)";
        assert_eq!(
            transpose_lyrics(text, 2),
            "A       D\nOne day in the life, (E7)"
        );
    }

    #[test]
    fn test_transpose_lyrics_octave_keeps_original_spelling() {
        let text = "B♭  Cb  E#";
        assert_eq!(transpose_lyrics(text, 12), text);
        assert_eq!(transpose_lyrics(text, 0), text);
    }

    #[test]
    fn test_transpose_lyrics_round_trip() {
        let text = "C#m  A  E/G#  B7sus4";
        let up = transpose_lyrics(text, 1);
        assert_eq!(up, "Dm  A#  F/A  C7sus4");
        assert_eq!(transpose_lyrics(&up, -1), text);
    }

    #[test]
    fn test_lyric_token_serializes_with_kind() {
        let json = serde_json::to_string(&scan_lyrics("Em")).unwrap();
        assert_eq!(json, r#"[{"kind":"chord","leading":"","chord":"Em","trailing":""}]"#);
    }
}
