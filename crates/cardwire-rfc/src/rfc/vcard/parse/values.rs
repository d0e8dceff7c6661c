//! vCard value parsers.

use chrono::NaiveDateTime;

use super::error::{ParseError, ParseResult};
use crate::rfc::vcard::core::{TIMESTAMP_FORMAT, TIMESTAMP_LEN, Timestamp};

/// Parses a REV timestamp in `YYYYMMDD"T"HHMMSS"Z"` form.
///
/// Only the basic UTC layout is accepted; extended or offset forms are errors.
///
/// ## Errors
/// Returns an error if the value does not match the layout or is not a valid
/// calendar time.
pub fn parse_timestamp(value: &str, line_num: usize) -> ParseResult<Timestamp> {
    let s = value.trim();

    if s.len() != TIMESTAMP_LEN || !s.ends_with('Z') {
        return Err(ParseError::invalid_datetime(
            line_num,
            format!("expected YYYYMMDDTHHMMSSZ, found `{s}`"),
        ));
    }

    let naive = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .map_err(|e| ParseError::invalid_datetime(line_num, format!("`{s}`: {e}")))?;

    Ok(Timestamp::new(naive.and_utc()))
}
