//! Timestamp rendering in the local time zone.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// Displays a stored UTC [`Timestamp`] as `YYYY-MM-DD HH:MM:SS TZ` in the
/// system time zone.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let local = self.0.to_zoned(TimeZone::system());
        write!(f, "{}", local.strftime("%Y-%m-%d %H:%M:%S %Z"))
    }
}
