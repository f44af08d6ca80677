//! Wall-clock calendar helpers.

use jiff::{Zoned, civil::Date};

/// Today's date in the system's local time zone.
#[must_use]
pub fn today() -> Date {
    Zoned::now().date()
}
