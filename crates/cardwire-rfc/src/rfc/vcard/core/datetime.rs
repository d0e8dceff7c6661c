//! vCard timestamp type (RFC 6350 §4.3.5).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Fixed-width UTC layout used by REV: `YYYYMMDD"T"HHMMSS"Z"`.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Length in characters of a formatted timestamp.
pub const TIMESTAMP_LEN: usize = 16;

/// Timestamp value for the REV property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Timestamp {
    /// UTC datetime.
    pub datetime: DateTime<Utc>,
}

impl Timestamp {
    /// Creates a timestamp from a `chrono` `DateTime`.
    #[must_use]
    pub fn new(datetime: DateTime<Utc>) -> Self {
        Self { datetime }
    }

    /// Returns the current timestamp.
    #[must_use]
    pub fn now() -> Self {
        Self {
            datetime: Utc::now(),
        }
    }

    /// Formats with the fixed REV layout.
    #[must_use]
    pub fn to_wire(&self) -> String {
        self.datetime.format(TIMESTAMP_FORMAT).to_string()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::new(datetime)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.datetime.format(TIMESTAMP_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_fixed_width() {
        let ts = Timestamp::new(Utc.with_ymd_and_hms(1984, 11, 4, 0, 0, 0).unwrap());
        assert_eq!(ts.to_wire(), "19841104T000000Z");
        assert_eq!(ts.to_wire().len(), TIMESTAMP_LEN);
    }

    #[test]
    fn display_matches_wire() {
        let ts = Timestamp::new(Utc.with_ymd_and_hms(1995, 10, 31, 22, 27, 10).unwrap());
        assert_eq!(ts.to_string(), "19951031T222710Z");
    }
}
