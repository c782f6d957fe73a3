//! Calendar dates in the `YYYY-MM-DD` format used by the API.

use std::ops::RangeInclusive;

use time::{Date, Duration, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

/// Date format for request and response bodies, e.g. "2024-01-15".
pub const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Parse `value` as a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [Error::InvalidInput] naming `field` if `value` is not a valid date.
pub fn parse_date(field: &str, value: &str) -> Result<Date, Error> {
    Date::parse(value.trim(), DATE_FORMAT)
        .map_err(|_| Error::InvalidInput(format!("invalid {field}")))
}

/// Parse an optional date field where both a missing value and an empty string
/// mean "no date".
///
/// # Errors
///
/// Returns [Error::InvalidInput] naming `field` if a non-empty value is not a valid date.
pub fn parse_optional_date(field: &str, value: Option<&str>) -> Result<Option<Date>, Error> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_date(field, value).map(Some),
    }
}

/// Unwrap a date that must be present when creating a row.
///
/// # Errors
///
/// Returns [Error::InvalidInput] naming `field` if `date` is `None`.
pub fn require_date(field: &str, date: Option<Date>) -> Result<Date, Error> {
    date.ok_or_else(|| Error::InvalidInput(format!("missing {field}")))
}

/// The first through to the last day of the calendar month containing `date`.
///
/// Since dates have no time component this is the same set of days as the
/// half-open range from the first of the month to the first of the next month.
pub fn calendar_month(date: Date) -> RangeInclusive<Date> {
    let first_day = date - Duration::days(i64::from(date.day()) - 1);
    let last_day = first_day + Duration::days(i64::from(date.month().length(date.year())) - 1);

    first_day..=last_day
}

pub mod iso_date {
    //! Serialize a [time::Date] as "YYYY-MM-DD".
    //!
    //! Only serialization is provided. Request bodies carry dates as strings
    //! and are parsed with [super::parse_date] so that errors name the field.
    //!
    //! The default serializer for [time::Date] writes a `(year, ordinal)`
    //! tuple unless human readable formats are enabled, which is not what
    //! clients of a JSON API expect.

    use serde::Serializer;
    use time::Date;

    use super::DATE_FORMAT;

    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = date.format(DATE_FORMAT).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub mod option {
        //! Serialize an optional [time::Date] as "YYYY-MM-DD" or `null`.

        use serde::Serializer;
        use time::Date;

        pub fn serialize<S>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match date {
                Some(date) => super::serialize(date, serializer),
                None => serializer.serialize_none(),
            }
        }
    }
}
