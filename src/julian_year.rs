// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The Julian-year axis the longitude models are evaluated on.
//!
//! An *astronomical time* is the number of Julian years (365.25 days) elapsed
//! since J2000.0, counted on the TT axis.  The epoch instant is
//! 2000-01-01T12:00:00 taken on the UTC axis and shifted by the fixed
//! `TT − UTC` offset, so civil timestamps map onto the axis with a single
//! constant shift.

use chrono::{DateTime, TimeZone, Utc};
use qtty::*;

use super::error::{Error, Result};
use super::instant::Time;
use super::scales::JD;

impl Time<JD> {
    /// J2000.0 epoch: JD 2 451 545.0.
    pub const J2000: Self = Self::new(2_451_545.0);

    /// One Julian year expressed in days.
    pub const JULIAN_YEAR: Days = Days::new(365.25);

    /// Julian years since J2000.0.
    #[inline]
    pub fn julian_years(&self) -> JulianYears {
        JulianYears::new(
            ((*self - Self::J2000) / Self::JULIAN_YEAR)
                .simplify()
                .value(),
        )
    }
}

impl From<JulianYears> for Time<JD> {
    fn from(years: JulianYears) -> Self {
        Self::J2000 + Days::new(years.value() * Self::JULIAN_YEAR.value())
    }
}

/// Maps a civil timestamp onto the Julian-year axis.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use qreki::to_astronomical_time;
///
/// let t = to_astronomical_time(&Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap());
/// assert!(t.value() > 0.0 && t.value() < 1e-5); // 68.184 s past J2000.0
/// ```
pub fn to_astronomical_time<Tz: TimeZone>(datetime: &DateTime<Tz>) -> JulianYears {
    Time::<JD>::from_utc(datetime.with_timezone(&Utc)).julian_years()
}

/// Inverse of [`to_astronomical_time`].
///
/// # Errors
///
/// [`Error::OutOfRange`] if the result cannot be represented by chrono.
pub fn to_civil_timestamp(years: JulianYears) -> Result<DateTime<Utc>> {
    Time::<JD>::from(years).to_utc().ok_or(Error::OutOfRange)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn julian_years_from_j2000() {
        let jd = Time::<JD>::J2000 + Days::new(365.25 * 2.0);
        let years = jd.julian_years();
        assert!((years - JulianYears::new(2.0)).abs() < JulianYears::new(1e-12));

        let roundtrip = Time::<JD>::from(years);
        assert!((roundtrip - jd).abs() < Days::new(1e-9));
    }

    #[test]
    fn civil_roundtrip_is_stable() {
        let jst = FixedOffset::east_opt(9 * 3600).unwrap();
        let samples = [
            jst.with_ymd_and_hms(1873, 1, 1, 0, 0, 0).unwrap(),
            jst.with_ymd_and_hms(2000, 1, 1, 21, 0, 0).unwrap(),
            jst.with_ymd_and_hms(2017, 6, 24, 0, 0, 0).unwrap(),
            jst.with_ymd_and_hms(2099, 12, 31, 23, 59, 59).unwrap(),
        ];
        for datetime in samples {
            let back = to_civil_timestamp(to_astronomical_time(&datetime)).unwrap();
            let delta_ns = back.timestamp_nanos_opt().unwrap()
                - datetime.timestamp_nanos_opt().unwrap();
            assert!(delta_ns.abs() < 1_000_000, "{datetime}: off by {delta_ns} ns");
        }
    }

    #[test]
    fn astronomical_time_is_monotonic() {
        let a = Utc.with_ymd_and_hms(2024, 2, 10, 0, 0, 0).unwrap();
        let b = a + chrono::Duration::seconds(1);
        assert!(to_astronomical_time(&a) < to_astronomical_time(&b));
    }

    #[test]
    fn out_of_range_is_reported() {
        assert_eq!(
            to_civil_timestamp(JulianYears::new(1e9)),
            Err(Error::OutOfRange)
        );
    }
}
