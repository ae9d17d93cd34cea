//! # Error Types
//!
//! This module defines the error type for the BandBuddy core.
//!
//! Most of the public API degrades gracefully (`0`, `None`, `false`, an empty
//! list) instead of failing. The strict parsers underneath those fallbacks
//! return [`BandBuddyError`] so callers that want to report *why* an input was
//! rejected can do so.
//!
//! ## Error Types
//! - `InvalidDuration` - text that is not `m:ss`
//! - `InvalidTimeSignature` - text that is not `N/D`
//! - `InvalidChord` - a symbol the chord grammar rejects
//! - `InvalidProgramChange` - MIDI channel or program out of range
//! - `ConfigError` - unreadable or malformed YAML settings
//!
//! ## Usage
//! ```rust
//! use bandbuddy::{parse_duration, BandBuddyError};
//!
//! match parse_duration("1:60") {
//!     Ok(seconds) => println!("{} seconds", seconds),
//!     Err(BandBuddyError::InvalidDuration(text)) => eprintln!("bad duration: {}", text),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BandBuddyError {
    /// Duration text that does not match `minutes:seconds`.
    ///
    /// # Example
    /// ```
    /// # use bandbuddy::BandBuddyError;
    /// let err = BandBuddyError::InvalidDuration("1:60".to_string());
    /// assert_eq!(err.to_string(), "Invalid duration '1:60': expected m:ss with seconds 0-59");
    /// ```
    #[error("Invalid duration '{0}': expected m:ss with seconds 0-59")]
    InvalidDuration(String),

    /// Time signature text that does not match `N/D` with positive integers.
    #[error("Invalid time signature '{0}': expected N/D")]
    InvalidTimeSignature(String),

    /// Chord symbol rejected by the chord grammar.
    ///
    /// # Example
    /// ```
    /// # use bandbuddy::BandBuddyError;
    /// let err = BandBuddyError::InvalidChord {
    ///     symbol: "Can".to_string(),
    ///     message: "unexpected 'an'".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Invalid chord 'Can': unexpected 'an'");
    /// ```
    #[error("Invalid chord '{symbol}': {message}")]
    InvalidChord { symbol: String, message: String },

    /// MIDI program change with a channel above 15 or a program above 511.
    #[error("Invalid program change (channel {channel}, program {program}): {message}")]
    InvalidProgramChange {
        channel: u8,
        program: u16,
        message: String,
    },

    /// Settings file could not be read or parsed.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}
