// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Half-open time intervals.
//!
//! A lunar month is the interval from the civil day of one new moon up to,
//! but excluding, the civil day of the next one, so [`Interval`] is always
//! treated as `[start, end)`.

use super::TimeInstant;
use std::fmt;

/// Represents an interval between two instants.
///
/// # Examples
///
/// ```
/// use chrono::{FixedOffset, TimeZone};
/// use qreki::Interval;
///
/// let jst = FixedOffset::east_opt(9 * 3600).unwrap();
/// let start = jst.with_ymd_and_hms(2024, 2, 10, 0, 0, 0).unwrap();
/// let end = jst.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
///
/// let month = Interval::new(start, end);
/// assert_eq!(month.duration().num_days(), 29);
/// assert!(month.contains(&start));
/// assert!(!month.contains(&end));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval<T: TimeInstant> {
    pub start: T,
    pub end: T,
}

impl<T: TimeInstant> Interval<T> {
    /// Creates a new period between two time instants.
    pub fn new(start: T, end: T) -> Self {
        Interval { start, end }
    }

    /// Returns the duration of the period as the difference between end and start.
    pub fn duration(&self) -> T::Duration {
        self.end.difference(&self.start)
    }

    /// `true` if `instant` lies in `[start, end)`.
    pub fn contains(&self, instant: &T) -> bool {
        self.start <= *instant && *instant < self.end
    }
}

impl<T: TimeInstant + fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
