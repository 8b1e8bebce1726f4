// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Civil days in a fixed local offset.
//!
//! A *civil day* runs from local midnight to the next local midnight.  New
//! moons and solar terms are dated by the civil day that contains them, so
//! every boundary the calendar evaluates goes through [`local_midnight`].

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};

use super::error::{Error, Result};

const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%dT%H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y/%m/%dT%H:%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Start of the civil day (in `offset`) that contains `datetime`.
pub fn local_midnight<Tz: TimeZone>(
    datetime: &DateTime<Tz>,
    offset: FixedOffset,
) -> Result<DateTime<FixedOffset>> {
    let date = datetime.with_timezone(&offset).date_naive();
    midnight_of(date, offset)
}

/// Start of the civil day following the one that contains `datetime`.
pub fn next_midnight<Tz: TimeZone>(
    datetime: &DateTime<Tz>,
    offset: FixedOffset,
) -> Result<DateTime<FixedOffset>> {
    shift_days(local_midnight(datetime, offset)?, 1)
}

/// Moves a timestamp by whole days.
pub(crate) fn shift_days(
    datetime: DateTime<FixedOffset>,
    days: i64,
) -> Result<DateTime<FixedOffset>> {
    datetime
        .checked_add_signed(Duration::days(days))
        .ok_or(Error::OutOfRange)
}

fn midnight_of(date: NaiveDate, offset: FixedOffset) -> Result<DateTime<FixedOffset>> {
    let naive = date.and_hms_opt(0, 0, 0).ok_or(Error::OutOfRange)?;
    localize(naive, offset)
}

fn localize(naive: NaiveDateTime, offset: FixedOffset) -> Result<DateTime<FixedOffset>> {
    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or(Error::OutOfRange)
}

/// Parses a civil date or date-time given in `offset`.
///
/// Accepted forms are RFC 3339 (converted into `offset`), `YYYY-MM-DD` and
/// `YYYY/MM/DD`, optionally followed by ` HH:MM` or ` HH:MM:SS` (a `T` also
/// works as separator).  A date without time of day is local midnight.
///
/// ```
/// use chrono::FixedOffset;
/// use qreki::civil::parse_datetime;
///
/// let jst = FixedOffset::east_opt(9 * 3600).unwrap();
/// let t = parse_datetime("2017/06/24", jst).unwrap();
/// assert_eq!(t.to_rfc3339(), "2017-06-24T00:00:00+09:00");
/// assert!(parse_datetime("next friday", jst).is_err());
/// ```
///
/// # Errors
///
/// [`Error::InvalidDate`] when no form matches.
pub fn parse_datetime(input: &str, offset: FixedOffset) -> Result<DateTime<FixedOffset>> {
    let trimmed = input.trim();

    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(datetime.with_timezone(&offset));
    }
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return localize(naive, offset);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return midnight_of(date, offset);
        }
    }

    Err(Error::InvalidDate {
        input: input.to_owned(),
    })
}
