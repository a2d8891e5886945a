mod consts;
mod form;
mod prelude;
mod types;
mod validate;

pub use consts::*;
pub use form::{DateField, FieldMessage, Phase, SegmentedDateField, Submission, combine};
pub use types::{Day, Month, Year};
pub use validate::{ErrorKind, TodayRef, validate};

use crate::prelude::*;
use std::str::FromStr;
use types::days_in_month;

/// A fully validated Gregorian calendar date.
///
/// Construction only succeeds through validated component types, so an
/// existing value is always a real calendar day (leap years included).
/// The derived ordering is calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct CivilDate {
    year: types::Year,
    month: types::Month,
    day: types::Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u16 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl CivilDate {
    /// Creates a date from already validated components
    pub const fn new(year: types::Year, month: types::Month, day: types::Day) -> Self {
        Self { year, month, day }
    }

    /// Creates a date from raw numeric components, validating each of them
    ///
    /// # Errors
    /// Returns `ParseError` if any component is out of range or the day does
    /// not exist in the given month.
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        let year = types::Year::new(year)?;
        let month = types::Month::new(month)?;
        let day = types::Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    /// Returns the year component
    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    /// Returns the month component
    pub const fn month(&self) -> types::Month {
        self.month
    }

    /// Returns the day component
    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// Components as a `(year, month, day)` tuple.
    /// Tuple comparison on these is calendar comparison.
    pub const fn to_ymd(&self) -> (u16, u8, u8) {
        (self.year.get(), self.month.get(), self.day.get())
    }

    /// Calendar date on which a person born on this date turns `years` old.
    ///
    /// Adds to the year component and keeps month and day; a Feb 29 birthday
    /// rolls forward to Mar 1 in a common year. Returned as a raw tuple since
    /// the result may exceed `MAX_YEAR`.
    pub fn nth_birthday(&self, years: u16) -> (u16, u8, u8) {
        let year = self.year.get().saturating_add(years);
        let month = self.month.get();
        let day = self.day.get();
        if day > days_in_month(year, month) {
            (year, MARCH, MIN_DAY)
        } else {
            (year, month, day)
        }
    }

    /// Formats the date for confirmation display
    pub fn format(&self, style: DateStyle) -> String {
        let month = match style {
            DateStyle::Long => self.month.name(),
            DateStyle::Medium => self.month.abbrev(),
        };
        format!("{} {}, {}", month, self.day.get(), self.year.get())
    }

    /// Helper to parse u16 with better error messages
    fn parse_u16(s: &str) -> Result<u16, ParseError> {
        s.parse::<u16>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    /// Helper to parse u8 with better error messages
    fn parse_u8(s: &str) -> Result<u8, ParseError> {
        s.parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }
}

impl FromStr for CivilDate {
    type Err = ParseError;

    /// Parses strict ISO `YYYY-MM-DD`. Zero-padding is normalized rather
    /// than required, so combined segmented input like `0007-05-15` or
    /// `1990-05-3` parses the same as its canonical form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
        if parts.len() != 3 {
            return Err(ParseError::InvalidFormat(trimmed.to_owned()));
        }

        let year_u16 = Self::parse_u16(parts[0])?;
        let month_u8 = Self::parse_u8(parts[1])?;
        let day_u8 = Self::parse_u8(parts[2])?;

        let year = types::Year::new(year_u16)?;
        let month = types::Month::new(month_u8)?;
        let day = types::Day::new(day_u8, year, month)?;

        Ok(Self { year, month, day })
    }
}

impl serde::Serialize for CivilDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CivilDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Styles for human-readable date display, a closed set rather than an
/// open-ended format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DateStyle {
    /// Full month name, e.g. "June 15, 2024"
    Long,
    /// Abbreviated month name, e.g. "Jun 15, 2024"
    #[default]
    Medium,
}
