//! Day-precise dates as they appear in the sales file
//!
//! Dates are stored as free text and only interpreted when an analysis
//! needs them. A small, fixed set of layouts is accepted and they are tried
//! in order: the first one that matches wins, there is no attempt at
//! resolving strings that several layouts could read.
//!
//! Week boundaries follow the Monday-first convention
//! (see `start_of_week` and `end_of_week`).

use chrono::{Datelike, Duration, NaiveDate};
use std::fmt;

/// A date with day-precision
pub type Date = NaiveDate;

/// Layouts accepted by `parse_date`, by decreasing priority
pub const ACCEPTED_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Layout used when writing new records
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d";

/// Text that matches none of the accepted layouts
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatError {
    /// the input as it was given
    pub text: String,
}

impl FormatError {
    /// What message to show to help fix the date
    pub fn fix_hint(&self) -> String {
        "dates are written YYYY-MM-DD or MM/DD/YYYY".to_string()
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' does not match any known date format (", self.text)?;
        for (i, fmt) in ACCEPTED_FORMATS.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", fmt)?;
        }
        write!(f, ")")
    }
}

impl std::error::Error for FormatError {}

/// Read a date using the first accepted layout that matches
pub fn parse_date(text: &str) -> Result<Date, FormatError> {
    let trimmed = text.trim();
    ACCEPTED_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| FormatError {
            text: text.to_string(),
        })
}

/// `YYYY-MM-DD`
pub fn format_date(date: Date) -> String {
    date.format(CANONICAL_FORMAT).to_string()
}

/// First Monday on or before the given date
pub fn start_of_week(date: Date) -> Date {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// First Sunday on or after the given date
pub fn end_of_week(date: Date) -> Date {
    start_of_week(date) + Duration::days(6)
}
