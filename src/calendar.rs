// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Lunisolar calendar assembly
//!
//! A lunisolar date is resolved from a table of fourteen consecutive
//! new-moon days:
//!
//! 1. The new moon on or before the most recent winter solstice opens lunar
//!    month **11**.
//! 2. Thirteen more new moons follow, so the table spans thirteen months and
//!    ends at the first day of the next eleventh month.
//! 3. If the Sun has not yet reached 270° at the last entry, the thirteen
//!    months hold one month too many and a **leap month** exists: the first
//!    month during which the Sun crosses no multiple of 30° (no *chūki*)
//!    repeats the number of the month before it.
//!
//! Every date is a local midnight in the configured offset; solar longitudes
//! are sampled at those midnights.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use log::debug;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::config::CalendarConfig;
use super::crossing::{CrossingFinder, NewMoon, SolarTerm};
use super::error::{Error, Result};
use super::longitude::solar_longitude;
use super::period::Interval;
use super::rokuyou::Rokuyou;
use super::to_astronomical_time;

/// Number of new moons in a [`NewMoonTable`].
pub const TABLE_LEN: usize = 14;

/// Solar longitude that every eleventh month contains.
const WINTER_SOLSTICE_LONGITUDE: f64 = 270.0;

/// A date of the Japanese lunisolar calendar (旧暦).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LunisolarDate {
    /// Month number, `1..=12`.  A leap month carries the number it repeats.
    pub month: u32,
    /// Day of the month, starting at 1.
    pub day: u32,
    pub is_leap_month: bool,
}

impl LunisolarDate {
    /// The rokuyō day of this date.
    pub fn rokuyou(&self) -> Rokuyou {
        Rokuyou::from_month_day(self.month, self.day)
    }
}

impl fmt::Display for LunisolarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let leap = if self.is_leap_month { "閏" } else { "" };
        write!(f, "{leap}{}月{}日({})", self.month, self.day, self.rokuyou())
    }
}

/// First day of a lunar month and the solar longitude at its midnight.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FirstDay {
    pub date: DateTime<FixedOffset>,
    pub solar_longitude: f64,
}

impl FirstDay {
    pub fn new(date: DateTime<FixedOffset>) -> Self {
        Self {
            date,
            solar_longitude: solar_longitude(to_astronomical_time(&date)),
        }
    }

    /// Index of the 30° solar-longitude sector the Sun is in.
    fn sector(&self) -> u32 {
        (self.solar_longitude / 30.0) as u32
    }
}

/// A numbered lunar month and its civil-day span.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LunarMonth {
    pub number: u32,
    pub is_leap: bool,
    pub span: Interval<DateTime<FixedOffset>>,
}

/// Fourteen consecutive new-moon days starting at month 11.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMoonTable {
    entries: [FirstDay; TABLE_LEN],
}

impl NewMoonTable {
    /// Wraps pre-computed entries, which must be strictly increasing.
    pub fn from_entries(entries: [FirstDay; TABLE_LEN]) -> Self {
        Self { entries }
    }

    /// The fourteen first days, oldest first.
    pub fn entries(&self) -> &[FirstDay; TABLE_LEN] {
        &self.entries
    }

    /// `true` when the thirteen months fall short of a solar cycle.
    pub fn has_leap_month(&self) -> bool {
        self.entries[TABLE_LEN - 1].solar_longitude < WINTER_SOLSTICE_LONGITUDE
    }

    /// The thirteen months of the table, numbered from 11.
    ///
    /// Only the first month without a principal term is marked as leap, even
    /// if a later one also lacks one.
    pub fn months(&self) -> Vec<LunarMonth> {
        let mut leap_pending = self.has_leap_month();
        let mut number = 10;

        self.entries
            .windows(2)
            .map(|pair| {
                let is_leap = leap_pending && pair[0].sector() == pair[1].sector();
                if is_leap {
                    leap_pending = false;
                } else {
                    number = number % 12 + 1;
                }
                LunarMonth {
                    number,
                    is_leap,
                    span: Interval::new(pair[0].date, pair[1].date),
                }
            })
            .collect()
    }

    /// The lunisolar date of `datetime`.
    ///
    /// # Errors
    ///
    /// [`Error::NoBracketingMonth`] if `datetime` is outside the table.
    pub fn resolve<Tz: TimeZone>(&self, datetime: &DateTime<Tz>) -> Result<LunisolarDate> {
        let target = datetime.with_timezone(self.entries[0].date.offset());
        let month = self
            .months()
            .into_iter()
            .find(|m| m.span.contains(&target))
            .ok_or(Error::NoBracketingMonth(target))?;

        let elapsed = (target - month.span.start).num_days();
        let day = u32::try_from(elapsed + 1).map_err(|_| Error::NoBracketingMonth(target))?;
        Ok(LunisolarDate {
            month: month.number,
            day,
            is_leap_month: month.is_leap,
        })
    }
}

/// Converter from civil timestamps to lunisolar dates.
///
/// ```
/// use chrono::{FixedOffset, TimeZone};
/// use qreki::{Calendar, CalendarConfig};
///
/// let calendar = Calendar::new(CalendarConfig::default()).unwrap();
/// let jst = FixedOffset::east_opt(9 * 3600).unwrap();
///
/// let date = calendar.convert(&jst.with_ymd_and_hms(2017, 6, 24, 12, 0, 0).unwrap()).unwrap();
/// assert_eq!(date.to_string(), "閏5月1日(大安)");
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Calendar {
    config: CalendarConfig,
    finder: CrossingFinder,
}

impl Calendar {
    /// # Errors
    ///
    /// [`Error::InvalidUtcOffset`] if the configured offset is invalid.
    pub fn new(config: CalendarConfig) -> Result<Self> {
        let offset = config.utc_offset()?;
        Ok(Self {
            config,
            finder: CrossingFinder::new(offset, config.max_scan_days),
        })
    }

    /// Configuration this calendar was built from.
    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    /// Offset whose civil days the dates are counted in.
    pub fn offset(&self) -> FixedOffset {
        self.finder.offset()
    }

    /// Day of the most recent winter solstice, up to the day of `datetime`.
    pub fn winter_solstice_before<Tz: TimeZone>(
        &self,
        datetime: &DateTime<Tz>,
    ) -> Result<DateTime<FixedOffset>> {
        self.finder.previous(&SolarTerm::WINTER_SOLSTICE, datetime)
    }

    /// Day the Sun last reached `longitude`, up to the day of `datetime`.
    pub fn previous_solar_term<Tz: TimeZone>(
        &self,
        datetime: &DateTime<Tz>,
        longitude: f64,
    ) -> Result<DateTime<FixedOffset>> {
        self.finder.previous(&SolarTerm::new(longitude), datetime)
    }

    /// Day the Sun next reaches `longitude`, after the day of `datetime`.
    pub fn next_solar_term<Tz: TimeZone>(
        &self,
        datetime: &DateTime<Tz>,
        longitude: f64,
    ) -> Result<DateTime<FixedOffset>> {
        self.finder.next(&SolarTerm::new(longitude), datetime)
    }

    /// Day of the most recent new moon, up to the day of `datetime`.
    pub fn previous_new_moon<Tz: TimeZone>(
        &self,
        datetime: &DateTime<Tz>,
    ) -> Result<DateTime<FixedOffset>> {
        self.finder.previous(&NewMoon, datetime)
    }

    /// Day of the next new moon after the day of `datetime`.
    pub fn next_new_moon<Tz: TimeZone>(
        &self,
        datetime: &DateTime<Tz>,
    ) -> Result<DateTime<FixedOffset>> {
        self.finder.next(&NewMoon, datetime)
    }

    /// The new-moon table whose months cover `datetime`.
    ///
    /// In a leap window the last entry opens the next eleventh month a few
    /// days before the solstice; a query on those days gets the table that
    /// starts at that entry.
    pub fn new_moon_table<Tz: TimeZone>(&self, datetime: &DateTime<Tz>) -> Result<NewMoonTable> {
        let solstice = self.winter_solstice_before(datetime)?;
        let table = self.table_from(self.previous_new_moon(&solstice)?)?;

        let last = table.entries[TABLE_LEN - 1].date;
        if datetime.with_timezone(&self.offset()) >= last {
            debug!("{} precedes the solstice but opens month 11; rolling over", last);
            return self.table_from(last);
        }
        Ok(table)
    }

    fn table_from(&self, first: DateTime<FixedOffset>) -> Result<NewMoonTable> {
        let mut entries = [FirstDay::new(first); TABLE_LEN];
        for i in 1..TABLE_LEN {
            let date = self.next_new_moon(&entries[i - 1].date)?;
            entries[i] = FirstDay::new(date);
        }
        debug!(
            "new-moon table {} .. {} (λ☉ at end {:.3}°)",
            entries[0].date,
            entries[TABLE_LEN - 1].date,
            entries[TABLE_LEN - 1].solar_longitude
        );
        Ok(NewMoonTable::from_entries(entries))
    }

    /// Lunisolar date of `datetime`.
    ///
    /// # Errors
    ///
    /// Only internal errors: [`Error::ScanLimitExceeded`],
    /// [`Error::NoBracketingMonth`] or [`Error::OutOfRange`].
    pub fn convert<Tz: TimeZone>(&self, datetime: &DateTime<Tz>) -> Result<LunisolarDate> {
        self.new_moon_table(datetime)?.resolve(datetime)
    }

    /// Lunisolar date of the current instant.
    pub fn today(&self) -> Result<LunisolarDate> {
        self.convert(&Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jst() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> DateTime<FixedOffset> {
        jst().with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn calendar() -> Calendar {
        Calendar::new(CalendarConfig::default()).unwrap()
    }

    fn month_list(table: &NewMoonTable) -> Vec<(i32, String)> {
        table
            .months()
            .iter()
            .map(|m| {
                let n = m.number as i32;
                let date = m.span.start.date_naive().to_string();
                (if m.is_leap { -n } else { n }, date)
            })
            .collect()
    }

    #[test]
    fn months_without_leap() {
        let table = calendar().new_moon_table(&day(2000, 5, 1)).unwrap();
        assert!(!table.has_leap_month());
        let stds = [
            (11, "1999-12-08"),
            (12, "2000-01-07"),
            (1, "2000-02-05"),
            (2, "2000-03-06"),
            (3, "2000-04-05"),
            (4, "2000-05-04"),
            (5, "2000-06-02"),
            (6, "2000-07-02"),
            (7, "2000-07-31"),
            (8, "2000-08-29"),
            (9, "2000-09-28"),
            (10, "2000-10-27"),
            (11, "2000-11-26"),
        ];
        let expected: Vec<_> = stds.iter().map(|(n, d)| (*n, d.to_string())).collect();
        assert_eq!(month_list(&table), expected);
    }

    #[test]
    fn leap_month_2017_in_japan() {
        let table = calendar().new_moon_table(&day(2017, 7, 1)).unwrap();
        assert!(table.has_leap_month());
        let stds = [
            (11, "2016-11-29"),
            (12, "2016-12-29"),
            (1, "2017-01-28"),
            (2, "2017-02-26"),
            (3, "2017-03-28"),
            (4, "2017-04-26"),
            (5, "2017-05-26"),
            (-5, "2017-06-24"),
            (6, "2017-07-23"),
            (7, "2017-08-22"),
            (8, "2017-09-20"),
            (9, "2017-10-20"),
            (10, "2017-11-18"),
        ];
        let expected: Vec<_> = stds.iter().map(|(n, d)| (*n, d.to_string())).collect();
        assert_eq!(month_list(&table), expected);
        assert_eq!(
            table.entries()[TABLE_LEN - 1].date.date_naive().to_string(),
            "2017-12-18"
        );
    }

    #[test]
    fn leap_month_2017_in_china() {
        // In UTC+8 the principal term of 2017-07-22 23:15 falls inside the
        // sixth month, so the month after it becomes the leap month.
        let config = CalendarConfig::default().with_utc_offset_seconds(8 * 3600);
        let cst = Calendar::new(config).unwrap();
        let beijing = FixedOffset::east_opt(8 * 3600).unwrap();
        let date = cst
            .convert(&beijing.with_ymd_and_hms(2017, 7, 23, 0, 0, 0).unwrap())
            .unwrap();
        assert_eq!(
            date,
            LunisolarDate {
                month: 6,
                day: 1,
                is_leap_month: true
            }
        );
    }

    #[test]
    fn dates() {
        let data = [
            ((2016, 11, 29), (11, 1, false)),
            ((2017, 1, 27), (12, 30, false)),
            ((2017, 1, 28), (1, 1, false)),
            ((2017, 6, 23), (5, 29, false)),
            ((2017, 6, 24), (5, 1, true)),
            ((2017, 7, 22), (5, 29, true)),
            ((2017, 7, 23), (6, 1, false)),
            ((2023, 3, 21), (2, 30, false)),
            ((2023, 3, 22), (2, 1, true)),
            ((2023, 4, 20), (3, 1, false)),
        ];
        for ((y, m, d), (month, dd, leap)) in data {
            let expected = LunisolarDate {
                month,
                day: dd,
                is_leap_month: leap,
            };
            assert_eq!(calendar().convert(&day(y, m, d)).unwrap(), expected, "{y}-{m}-{d}");
        }
    }

    #[test]
    fn days_before_solstice_roll_into_next_table() {
        // 2017-12-18 opens month 11 although the solstice is on 12-22.
        let table = calendar().new_moon_table(&day(2017, 12, 20)).unwrap();
        assert_eq!(table.entries()[0].date, day(2017, 12, 18));
        let date = calendar().convert(&day(2017, 12, 20)).unwrap();
        assert_eq!((date.month, date.day, date.is_leap_month), (11, 3, false));
        let date = calendar().convert(&day(2017, 12, 23)).unwrap();
        assert_eq!((date.month, date.day, date.is_leap_month), (11, 6, false));
    }

    #[test]
    fn time_of_day_stays_within_civil_day() {
        let late = jst().with_ymd_and_hms(2017, 7, 22, 23, 59, 59).unwrap();
        let date = calendar().convert(&late).unwrap();
        assert_eq!((date.month, date.day, date.is_leap_month), (5, 29, true));

        // 2017-07-22T15:30Z is 2017-07-23 00:30 in Tokyo
        let utc = Utc.with_ymd_and_hms(2017, 7, 22, 15, 30, 0).unwrap();
        assert_eq!(calendar().convert(&utc).unwrap().month, 6);
    }

    #[test]
    fn only_first_chuki_free_month_is_leap() {
        // Two sector-repeating months in one window; only the first repeats
        // its predecessor's number.
        let longitudes = [
            250.0, 280.0, 310.0, 340.0, 5.0, 10.0, 20.0, 50.0, 80.0, 110.0, 115.0, 140.0, 170.0,
            200.0,
        ];
        let mut entries = [FirstDay::new(day(2030, 1, 1)); TABLE_LEN];
        for (i, (entry, longitude)) in entries.iter_mut().zip(longitudes).enumerate() {
            entry.date = day(2030, 1, 1) + chrono::Duration::days(30 * i as i64);
            entry.solar_longitude = longitude;
        }
        let table = NewMoonTable::from_entries(entries);
        let months = table.months();
        let leaps: Vec<_> = months.iter().filter(|m| m.is_leap).collect();
        assert_eq!(leaps.len(), 1);
        assert_eq!(months[4].number, 2);
        assert!(months[4].is_leap);
        assert_eq!(months[9].number, 7);
        assert!(!months[9].is_leap);
    }

    #[test]
    fn query_before_table_is_internal_error() {
        let table = calendar().new_moon_table(&day(2017, 7, 1)).unwrap();
        let err = table.resolve(&day(2016, 11, 28)).unwrap_err();
        assert_eq!(err, Error::NoBracketingMonth(day(2016, 11, 28)));
        assert!(err.is_internal());
        assert!(table.resolve(&day(2017, 12, 18)).is_err());
    }

    #[test]
    fn solar_terms_and_new_moons() {
        let cal = calendar();
        assert_eq!(cal.winter_solstice_before(&day(2023, 3, 22)).unwrap(), day(2022, 12, 22));
        assert_eq!(cal.next_solar_term(&day(2017, 7, 1), 120.0).unwrap(), day(2017, 7, 23));
        assert_eq!(cal.previous_solar_term(&day(2017, 7, 1), 90.0).unwrap(), day(2017, 6, 21));
        assert_eq!(cal.previous_new_moon(&day(2024, 2, 20)).unwrap(), day(2024, 2, 10));
        assert_eq!(cal.next_new_moon(&day(2024, 2, 10)).unwrap(), day(2024, 3, 10));
    }

    #[test]
    fn calendar_keeps_its_configuration() {
        let config = CalendarConfig::default().with_utc_offset_seconds(8 * 3600);
        let cal = Calendar::new(config).unwrap();
        assert_eq!(cal.config(), &config);
        assert_eq!(cal.offset().local_minus_utc(), 28_800);
    }

    #[test]
    fn display_marks_leap_months() {
        let leap = LunisolarDate {
            month: 5,
            day: 1,
            is_leap_month: true,
        };
        assert_eq!(leap.to_string(), "閏5月1日(大安)");
        let new_year = LunisolarDate {
            month: 1,
            day: 1,
            is_leap_month: false,
        };
        assert_eq!(new_year.to_string(), "1月1日(先勝)");
    }
}
