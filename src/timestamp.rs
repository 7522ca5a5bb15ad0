//! Syslog timestamp parsing
//!
//! Classic syslog timestamps ("Jan 10 10:23:01") carry no year, so
//! parsing injects a fixed reference year supplied by the caller. Lines
//! that straddle a real year boundary are attributed to the reference
//! year; this is a documented approximation, not per-line inference.

use chrono::NaiveDateTime;

/// Year injected when parsing year-less syslog timestamps
pub const DEFAULT_REFERENCE_YEAR: i32 = 2024;

/// Parse the timestamp prefix at the start of a syslog line.
///
/// Takes exactly the first three whitespace-separated tokens (month,
/// day, time-of-day), appends `reference_year`, and parses the result
/// against `time_format` extended with `%Y`.
///
/// Returns `None` when the line has fewer than three tokens or the
/// prefix does not match the format. Both happen constantly in real
/// logs and are not errors.
pub fn parse_syslog_timestamp(
    line: &str,
    time_format: &str,
    reference_year: i32,
) -> Option<NaiveDateTime> {
    let mut tokens = line.split_whitespace();
    let month = tokens.next()?;
    let day = tokens.next()?;
    let time = tokens.next()?;

    let composed = format!("{} {} {} {}", month, day, time, reference_year);
    let format = format!("{} %Y", time_format);
    NaiveDateTime::parse_from_str(&composed, &format).ok()
}
