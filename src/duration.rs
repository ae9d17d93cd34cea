//! # Durations
//!
//! Conversion between the `m:ss` text songs are entered with and a total
//! number of seconds, plus the human-readable form shown in setlists.
//!
//! Invalid text is handled differently depending on who is asking:
//! - summing a setlist wants a missing duration to count as zero
//!   ([`parse_duration_or_zero`])
//! - checking a single field wants to know the value is absent
//!   ([`parse_duration_or_none`])
//!
//! Both wrap the strict [`parse_duration`].

use crate::error::BandBuddyError;

/// Parse `minutes:seconds` into total seconds.
///
/// Minutes are one or more digits and unbounded; seconds are one or two digits
/// in `0..=59`. Surrounding whitespace is ignored.
///
/// # Examples
/// ```
/// use bandbuddy::parse_duration;
///
/// assert_eq!(parse_duration("3:45"), Ok(225));
/// assert_eq!(parse_duration("61:00"), Ok(3660));
/// assert!(parse_duration("1:60").is_err());
/// ```
pub fn parse_duration(text: &str) -> Result<u32, BandBuddyError> {
    let invalid = || BandBuddyError::InvalidDuration(text.to_string());
    let trimmed = text.trim();

    let (minutes, seconds) = trimmed.split_once(':').ok_or_else(invalid)?;
    if !is_digits(minutes) || !is_digits(seconds) || seconds.len() > 2 {
        return Err(invalid());
    }

    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    let seconds: u32 = seconds.parse().map_err(|_| invalid())?;
    if seconds >= 60 {
        return Err(invalid());
    }

    minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .ok_or_else(invalid)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a duration for accumulation; missing or invalid text counts as `0`.
pub fn parse_duration_or_zero(text: Option<&str>) -> u32 {
    parse_duration_or_none(text).unwrap_or(0)
}

/// Parse a duration for validation; missing or invalid text is `None`.
pub fn parse_duration_or_none(text: Option<&str>) -> Option<u32> {
    text.and_then(|t| parse_duration(t).ok())
}

/// Format seconds as `m:ss`.
///
/// ```
/// use bandbuddy::format_duration_to_string;
///
/// assert_eq!(format_duration_to_string(225), "3:45");
/// assert_eq!(format_duration_to_string(5), "0:05");
/// ```
pub fn format_duration_to_string(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Format seconds for display, e.g. `"1h 1m 1s"` or `"1m 5s"`.
///
/// Hours appear only from one hour up. Zero or negative totals render as an
/// em-dash placeholder.
///
/// ```
/// use bandbuddy::format_duration;
///
/// assert_eq!(format_duration(3661), "1h 1m 1s");
/// assert_eq!(format_duration(65), "1m 5s");
/// assert_eq!(format_duration(0), "—");
/// ```
pub fn format_duration(seconds: i64) -> String {
    if seconds <= 0 {
        return "—".to_string();
    }

    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else {
        format!("{}m {}s", minutes, secs)
    }
}
