// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Qreki: the Japanese lunisolar calendar (旧暦)
//!
//! This crate converts civil timestamps into dates of the traditional
//! lunisolar calendar, leap months included, and derives the 六曜 (rokuyō)
//! day of the six-day cycle.
//!
//! # Core types
//!
//! - [`Calendar`] — resolves a civil timestamp into a [`LunisolarDate`].
//! - [`CalendarConfig`] — local UTC offset and search bound.
//! - [`NewMoonTable`] — the fourteen new-moon days a date is resolved against.
//! - [`CrossingFinder`] — dates the civil day of a [`Cycle`] wrap
//!   ([`NewMoon`], [`SolarTerm`]).
//! - [`Rokuyou`] — the six-day cycle.
//! - [`Time<S>`] — generic instant parameterised by a [`TimeScale`] marker.
//! - [`Interval<T>`] — a half-open interval over any [`TimeInstant`].
//!
//! # Time scales
//!
//! | Marker | Scale |
//! |--------|-------|
//! | [`JD`] | Julian Date on the TT axis |
//! | [`TAI`] | International Atomic Time |
//! | [`UTC`] | Coordinated Universal Time (leap seconds frozen at 36 s) |
//!
//! # Example
//!
//! ```
//! use chrono::{FixedOffset, TimeZone};
//! use qreki::{Calendar, CalendarConfig, Rokuyou};
//!
//! let calendar = Calendar::new(CalendarConfig::default()).unwrap();
//! let jst = FixedOffset::east_opt(9 * 3600).unwrap();
//!
//! let date = calendar.convert(&jst.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap()).unwrap();
//! assert_eq!((date.month, date.day, date.is_leap_month), (1, 1, false));
//! assert_eq!(date.rokuyou(), Rokuyou::Sensho);
//! ```

mod calendar;
pub mod civil;
mod config;
mod crossing;
mod error;
pub(crate) mod instant;
mod julian_year;
pub mod longitude;
mod period;
mod rokuyou;
pub(crate) mod scales;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use calendar::{Calendar, FirstDay, LunarMonth, LunisolarDate, NewMoonTable, TABLE_LEN};
pub use config::{CalendarConfig, DEFAULT_MAX_SCAN_DAYS, JST_OFFSET_SECONDS};
pub use crossing::{CrossingFinder, Cycle, NewMoon, SolarTerm};
pub use error::{Error, Result};
pub use instant::{Time, TimeInstant, TimeScale};
pub use julian_year::{to_astronomical_time, to_civil_timestamp};
pub use longitude::{
    lunar_longitude, normalize_degrees, solar_longitude, LUNAR_MEAN_RATE, SOLAR_MEAN_RATE,
};
pub use period::Interval;
pub use rokuyou::Rokuyou;
pub use scales::{JD, TAI, UTC};
