//! Chord symbol grammar
//!
//! Hand-written recursive-descent recognizer for chord symbols such as `C`,
//! `F#m7`, `Bbmaj7/D` and `Cm7b5`.

use std::fmt;

use serde::Serialize;

use crate::error::BandBuddyError;

const LEADING_PUNCTUATION: &[char] = &['(', '[', '{', '"', '\''];
const TRAILING_PUNCTUATION: &[char] = &[')', ']', '}', '\'', '"', ',', '.', ';', ':', '!', '?'];

// Longest keywords first so "maj"/"min" win over "m".
const QUALITIES: &[&str] = &["maj", "min", "dim", "aug", "sus", "add", "m"];
const MODIFIERS: &[&str] = &["sus", "add", "b", "#"];

/// A whitespace-delimited token split around its punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenParts<'a> {
    pub leading: &'a str,
    pub core: &'a str,
    pub trailing: &'a str,
}

/// Split a token into leading punctuation, core and trailing punctuation.
///
/// ```
/// use bandbuddy::chords::split_token;
///
/// let parts = split_token("(Am7),");
/// assert_eq!((parts.leading, parts.core, parts.trailing), ("(", "Am7", "),"));
/// ```
pub fn split_token(token: &str) -> TokenParts<'_> {
    let rest = token.trim_start_matches(LEADING_PUNCTUATION);
    let leading = &token[..token.len() - rest.len()];
    let core = rest.trim_end_matches(TRAILING_PUNCTUATION);
    let trailing = &rest[core.len()..];
    TokenParts {
        leading,
        core,
        trailing,
    }
}

/// Replace `♭` with `b` and `♯` with `#`.
pub fn normalize_chord(text: &str) -> String {
    text.replace('♭', "b").replace('♯', "#")
}

/// A parsed chord symbol.
///
/// `suffix` holds the quality, extension and modifiers exactly as written
/// (`"maj7"`, `"m7b5"`, `""`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chord {
    pub root: String,
    pub suffix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bass: Option<String>,
}

impl Chord {
    /// Whether the chord quality is minor (`m` or `min`, not `maj`).
    pub fn is_minor(&self) -> bool {
        self.suffix.starts_with('m') && !self.suffix.starts_with("maj")
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.suffix)?;
        if let Some(bass) = &self.bass {
            write!(f, "/{}", bass)?;
        }
        Ok(())
    }
}

/// Parse a chord symbol after normalizing `♭`/`♯`.
///
/// ```
/// use bandbuddy::chords::parse_chord;
///
/// let chord = parse_chord("B♭maj7/D").unwrap();
/// assert_eq!(chord.root, "Bb");
/// assert_eq!(chord.suffix, "maj7");
/// assert_eq!(chord.bass.as_deref(), Some("D"));
/// assert!(parse_chord("Can").is_err());
/// ```
pub fn parse_chord(symbol: &str) -> Result<Chord, BandBuddyError> {
    let normalized = normalize_chord(symbol);
    let error = |message: String| BandBuddyError::InvalidChord {
        symbol: symbol.to_string(),
        message,
    };

    let mut cursor = Cursor::new(&normalized);

    let root = cursor
        .root()
        .ok_or_else(|| error("expected a root note A-G".to_string()))?;

    let suffix_start = cursor.pos;
    cursor.keyword(QUALITIES);
    cursor.digits();
    while cursor.modifier() {}
    let suffix = normalized[suffix_start..cursor.pos].to_string();

    let bass = if cursor.eat('/') {
        Some(
            cursor
                .root()
                .ok_or_else(|| error("expected a bass note A-G after '/'".to_string()))?,
        )
    } else {
        None
    };

    if !cursor.at_end() {
        return Err(error(format!("unexpected '{}'", cursor.rest())));
    }

    Ok(Chord { root, suffix, bass })
}

/// Whether a lyric token is a chord symbol.
///
/// Surrounding punctuation is ignored; the core must start with an uppercase
/// `A`-`G` and match the chord grammar in full.
///
/// ```
/// use bandbuddy::chords::is_chord_token;
///
/// assert!(is_chord_token("Cmaj7"));
/// assert!(is_chord_token("Bb/D"));
/// assert!(!is_chord_token("Can"));
/// assert!(!is_chord_token("the"));
/// ```
pub fn is_chord_token(token: &str) -> bool {
    let core = split_token(token).core;
    match core.chars().next() {
        Some('A'..='G') => parse_chord(core).is_ok(),
        _ => false,
    }
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn eat(&mut self, c: char) -> bool {
        if self.rest().starts_with(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn root(&mut self) -> Option<String> {
        let start = self.pos;
        match self.rest().chars().next() {
            Some('A'..='G') => self.pos += 1,
            _ => return None,
        }
        if !self.eat('b') {
            self.eat('#');
        }
        Some(self.src[start..self.pos].to_string())
    }

    fn keyword(&mut self, keywords: &[&str]) -> bool {
        match keywords.iter().find(|k| self.rest().starts_with(*k)) {
            Some(k) => {
                self.pos += k.len();
                true
            }
            None => false,
        }
    }

    fn digits(&mut self) -> bool {
        let count = self.rest().bytes().take_while(u8::is_ascii_digit).count();
        self.pos += count;
        count > 0
    }

    /// A modifier keyword only counts when digits follow it.
    fn modifier(&mut self) -> bool {
        let start = self.pos;
        if self.keyword(MODIFIERS) && self.digits() {
            return true;
        }
        self.pos = start;
        false
    }
}
