//! Output utilities
//!
//! Commands print through a [`Printer`] and render timestamps with
//! [`format_timestamp`].

mod printer;

pub use printer::Printer;

use jiff::tz::{Offset, TimeZone};
use jiff::Timestamp;

/// Placeholder for entries the service returned without a timestamp
const MISSING_TIMESTAMP: &str = "-";

/// Render a timestamp as RFC 3339 in the given time zone, whole seconds,
/// with `Z` for a zero offset
pub fn format_timestamp(timestamp: Option<Timestamp>, time_zone: &TimeZone) -> String {
    let Some(timestamp) = timestamp else {
        return MISSING_TIMESTAMP.to_string();
    };

    let zoned = timestamp.to_zoned(time_zone.clone());
    if zoned.offset() == Offset::UTC {
        zoned.strftime("%Y-%m-%dT%H:%M:%SZ").to_string()
    } else {
        zoned.strftime("%Y-%m-%dT%H:%M:%S%:z").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_utc() {
        let ts = Timestamp::from_second(1_700_000_000).unwrap();
        assert_eq!(
            format_timestamp(Some(ts), &TimeZone::UTC),
            "2023-11-14T22:13:20Z"
        );
    }

    #[test]
    fn test_format_with_offset() {
        let ts = Timestamp::from_second(1_700_000_000).unwrap();
        let tz = TimeZone::fixed(jiff::tz::offset(9));
        assert_eq!(format_timestamp(Some(ts), &tz), "2023-11-15T07:13:20+09:00");

        let tz = TimeZone::fixed(jiff::tz::offset(-5));
        assert_eq!(format_timestamp(Some(ts), &tz), "2023-11-14T17:13:20-05:00");
    }

    #[test]
    fn test_format_missing() {
        assert_eq!(format_timestamp(None, &TimeZone::UTC), "-");
    }
}
