use std::str::FromStr;

use crate::consts::{ADULT_AGE_YEARS, TIME_SEPARATOR};
use crate::prelude::*;
use crate::{CivilDate, ParseError};

/// The "today" a date of birth is judged against.
///
/// Callers hand the crate a capture of the current instant rather than the
/// crate reading a clock itself, which keeps every check here a pure
/// function. Parses from either a bare `YYYY-MM-DD` date or a full ISO 8601
/// UTC timestamp; the time of day never participates in a comparison, only
/// the civil date does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From)]
#[display(fmt = "{_0}")]
pub struct TodayRef(CivilDate);

impl TodayRef {
    /// Wraps an already parsed date
    pub const fn new(date: CivilDate) -> Self {
        Self(date)
    }

    /// Returns the civil date of the reference instant
    pub const fn date(&self) -> CivilDate {
        self.0
    }
}

impl FromStr for TodayRef {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // Discard everything from the time separator on, so a timestamp like
        // 2024-06-15T09:30:00.000Z reads as its date
        let date_part = match trimmed.split_once(TIME_SEPARATOR) {
            Some((date, _)) => date,
            None => trimmed,
        };
        date_part.parse().map(Self)
    }
}

impl serde::Serialize for TodayRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for TodayRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The user-visible reasons a date of birth is rejected, mutually exclusive
/// and checked in this order. Each message is the sentence shown under the
/// field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ErrorKind {
    /// Empty input, or input that is not a real calendar date
    #[error("This field is required.")]
    RequiredField,

    /// The date is today or later
    #[error("Hello, time traveller! Please enter a date that’s in the past.")]
    FutureDate,

    /// The date implies an age under 18
    #[error("You must be 18 or older to join. Did you enter the right date?")]
    Underage,
}

/// Checks a raw date-of-birth string against `today`.
///
/// Rules in priority order: the input must parse as a calendar date, must be
/// strictly before today, and must put the 18th birthday strictly before
/// today. A date of birth equal to today is a future date, and an 18th
/// birthday falling exactly on today is still underage.
///
/// Pure function, safe to call on every state change.
///
/// # Errors
/// Returns the first matching `ErrorKind`; any parse failure reads as a
/// missing required field.
pub fn validate(raw: &str, today: TodayRef) -> Result<CivilDate, ErrorKind> {
    let date: CivilDate = raw.parse().map_err(|_| ErrorKind::RequiredField)?;
    let today_ymd = today.date().to_ymd();

    if date.to_ymd() >= today_ymd {
        return Err(ErrorKind::FutureDate);
    }
    if date.nth_birthday(ADULT_AGE_YEARS) >= today_ymd {
        return Err(ErrorKind::Underage);
    }
    Ok(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> TodayRef {
        "2024-06-15T00:00:00.000Z".parse().unwrap()
    }

    #[test]
    fn test_today_ref_from_timestamp() {
        let today = "2024-06-15T09:30:12.345Z".parse::<TodayRef>().unwrap();
        assert_eq!(today.date().to_ymd(), (2024, 6, 15));
    }

    #[test]
    fn test_today_ref_from_bare_date() {
        let today = "2024-06-15".parse::<TodayRef>().unwrap();
        assert_eq!(today.date().to_ymd(), (2024, 6, 15));
        assert_eq!(today.to_string(), "2024-06-15");
    }

    #[test]
    fn test_today_ref_rejects_garbage() {
        assert!("".parse::<TodayRef>().is_err());
        assert!("not-a-date".parse::<TodayRef>().is_err());
        assert!("T09:30:00Z".parse::<TodayRef>().is_err());
    }

    #[test]
    fn test_today_ref_from_civil_date() {
        let date = CivilDate::from_ymd(2024, 6, 15).unwrap();
        let today = TodayRef::from(date);
        assert_eq!(today.date(), date);
    }

    #[test]
    fn test_today_ref_serde() {
        let today = "2024-06-15T00:00:00.000Z".parse::<TodayRef>().unwrap();
        let json = serde_json::to_string(&today).unwrap();
        assert_eq!(json, r#""2024-06-15""#);

        let parsed: TodayRef = serde_json::from_str(&json).unwrap();
        assert_eq!(today, parsed);
    }

    #[test]
    fn test_empty_and_unparsable_are_required_field() {
        assert_eq!(validate("", today()), Err(ErrorKind::RequiredField));
        assert_eq!(validate("not-a-date", today()), Err(ErrorKind::RequiredField));
        assert_eq!(validate("2023-02-29", today()), Err(ErrorKind::RequiredField));
        assert_eq!(validate("2023-13-01", today()), Err(ErrorKind::RequiredField));
    }

    #[test]
    fn test_well_in_the_past_is_valid() {
        let date = validate("2000-06-15", today()).unwrap();
        assert_eq!(date.to_ymd(), (2000, 6, 15));

        assert!(validate("1956-01-31", today()).is_ok());
        assert!(validate("0007-05-15", today()).is_ok());
    }

    #[test]
    fn test_tomorrow_is_future() {
        assert_eq!(validate("2024-06-16", today()), Err(ErrorKind::FutureDate));
        assert_eq!(validate("2195-01-01", today()), Err(ErrorKind::FutureDate));
    }

    #[test]
    fn test_today_boundary_is_future() {
        assert_eq!(validate("2024-06-15", today()), Err(ErrorKind::FutureDate));
    }

    #[test]
    fn test_future_takes_priority_over_underage() {
        // A date in the future also implies underage; the future check wins
        assert_eq!(validate("2025-06-15", today()), Err(ErrorKind::FutureDate));
    }

    #[test]
    fn test_underage_window() {
        assert_eq!(validate("2010-03-20", today()), Err(ErrorKind::Underage));
        assert_eq!(validate("2024-06-14", today()), Err(ErrorKind::Underage));
    }

    #[test]
    fn test_eighteenth_birthday_boundary() {
        // 18th birthday exactly today: still underage
        assert_eq!(validate("2006-06-15", today()), Err(ErrorKind::Underage));
        // 18th birthday was yesterday: accepted
        assert!(validate("2006-06-14", today()).is_ok());
        // 18th birthday is tomorrow: underage
        assert_eq!(validate("2006-06-16", today()), Err(ErrorKind::Underage));
    }

    #[test]
    fn test_leap_day_birthday_boundary() {
        // Born 2008-02-29; the 18th birthday rolls to 2026-03-01
        let on_the_rolled_birthday: TodayRef = "2026-03-01".parse().unwrap();
        assert_eq!(
            validate("2008-02-29", on_the_rolled_birthday),
            Err(ErrorKind::Underage)
        );

        let day_before: TodayRef = "2026-02-28".parse().unwrap();
        assert_eq!(validate("2008-02-29", day_before), Err(ErrorKind::Underage));

        let day_after: TodayRef = "2026-03-02".parse().unwrap();
        assert!(validate("2008-02-29", day_after).is_ok());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ErrorKind::RequiredField.to_string(), "This field is required.");
        assert_eq!(
            ErrorKind::FutureDate.to_string(),
            "Hello, time traveller! Please enter a date that’s in the past."
        );
        assert_eq!(
            ErrorKind::Underage.to_string(),
            "You must be 18 or older to join. Did you enter the right date?"
        );
    }
}
