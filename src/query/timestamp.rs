//! Fixed-width capture timestamps (`YYYYMMDDhhmmss`, UTC).

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::config::{TIMESTAMP_DIGITS, TIMESTAMP_FORMAT};

/// Formats a time as a 14-digit CDX timestamp, dropping sub-second precision.
pub fn format_timestamp(time: &DateTime<Utc>) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a 14-digit CDX timestamp as UTC.
///
/// # Errors
///
/// Returns the `chrono` parse error when `text` is not exactly
/// `YYYYMMDDhhmmss`.
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    // chrono accepts single-digit fields, so the width is checked up front
    let fixed_width = text.len() == TIMESTAMP_DIGITS && text.bytes().all(|b| b.is_ascii_digit());
    let naive = if fixed_width {
        NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)?
    } else {
        // parsing nothing reports chrono's TooShort error
        NaiveDateTime::parse_from_str("", TIMESTAMP_FORMAT)?
    };
    Ok(Utc.from_utc_datetime(&naive))
}
