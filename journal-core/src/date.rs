//! Calendar dates as written in the journal
//!
//! Dates are kept exactly as parsed: four year digits, two month digits, two
//! day digits. The grammar does not check calendar validity (`2015/02/30`
//! parses), so the type cannot be `chrono::NaiveDate` directly; instead
//! [`Date::to_naive`] is the seam where a downstream pass applies calendar
//! rules.

use std::fmt;

use chrono::NaiveDate;

/// A date as written: year, month and day digits, no calendar validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    /// Four-digit year
    pub year: i32,
    /// Two-digit month
    pub month: u32,
    /// Two-digit day
    pub day: u32,
}

impl Date {
    /// Create a date from its written components.
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Date { year, month, day }
    }

    /// Convert to a calendar-checked `NaiveDate`.
    ///
    /// Returns `None` for dates that do not exist on the calendar; rejecting
    /// those is the caller's decision, not the parser's.
    pub fn to_naive(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}/{:02}", self.year, self.month, self.day)
    }
}
