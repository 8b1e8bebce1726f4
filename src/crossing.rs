// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Phase wraps: dating new moons and solar terms
//!
//! A [`Cycle`] is a degree-valued function of astronomical time that grows at
//! a roughly constant mean rate and wraps from just under 360° back to 0° once
//! per period.  The civil day during which it wraps is the *date* of the
//! event: the winter solstice for `λ☉ − 270°`, a new moon for `λ☾ − λ☉`.
//!
//! [`CrossingFinder`] locates that day in two phases:
//!
//! 1. **Prediction.** From the next local midnight after the reference
//!    instant, extrapolate with the mean rate to the expected wrap and take
//!    the civil day containing it.
//! 2. **Correction.** If the phase does not wrap inside that day, walk one day
//!    at a time towards the wrap (backward when the day's end already lies in
//!    the lower half-circle, forward otherwise) until a day where
//!    `phase(start) ≥ phase(end)`.
//!
//! The walk is bounded by `max_scan_days`; running past it means the cycle's
//! model is inconsistent and is reported as [`Error::ScanLimitExceeded`].

use chrono::{DateTime, FixedOffset, TimeZone};
use log::{debug, trace};
use qtty::JulianYears;

use super::civil::{local_midnight, next_midnight, shift_days};
use super::error::{Error, Result};
use super::longitude::{
    lunar_longitude, normalize_degrees, solar_longitude, LUNAR_MEAN_RATE, SOLAR_MEAN_RATE,
};
use super::{to_astronomical_time, to_civil_timestamp};

/// A degree-valued periodic function of astronomical time.
pub trait Cycle {
    /// Mean angular rate in degrees per Julian year.
    fn rate(&self) -> f64;

    /// Phase angle in degrees, `[0, 360)`.
    fn phase(&self, t: JulianYears) -> f64;
}

/// The Sun reaching a given ecliptic longitude.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SolarTerm {
    longitude: f64,
}

impl SolarTerm {
    /// 春分, 0°.
    pub const VERNAL_EQUINOX: Self = Self::new(0.0);
    /// 夏至, 90°.
    pub const SUMMER_SOLSTICE: Self = Self::new(90.0);
    /// 秋分, 180°.
    pub const AUTUMNAL_EQUINOX: Self = Self::new(180.0);
    /// 冬至, 270°.  Every eleventh month contains it.
    pub const WINTER_SOLSTICE: Self = Self::new(270.0);

    /// Term at `longitude` degrees of solar ecliptic longitude.
    pub const fn new(longitude: f64) -> Self {
        Self { longitude }
    }

    /// Solar longitude of the term in degrees.
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl Cycle for SolarTerm {
    fn rate(&self) -> f64 {
        SOLAR_MEAN_RATE
    }

    fn phase(&self, t: JulianYears) -> f64 {
        normalize_degrees(solar_longitude(t) - self.longitude)
    }
}

/// Conjunction of the Moon and the Sun (lunar elongation wrapping to zero).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct NewMoon;

impl Cycle for NewMoon {
    fn rate(&self) -> f64 {
        LUNAR_MEAN_RATE - SOLAR_MEAN_RATE
    }

    fn phase(&self, t: JulianYears) -> f64 {
        normalize_degrees(lunar_longitude(t) - solar_longitude(t))
    }
}

/// Which way to look from the reference instant.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Direction {
    Previous,
    Next,
}

/// One civil day with the cycle's phase sampled at both boundaries.
#[derive(Debug, Copy, Clone)]
struct DaySample {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    at_start: f64,
    at_end: f64,
}

impl DaySample {
    fn wraps(&self) -> bool {
        self.at_start >= self.at_end
    }
}

/// Predict-and-correct search for the civil day of a phase wrap.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CrossingFinder {
    offset: FixedOffset,
    max_scan_days: u32,
}

impl CrossingFinder {
    /// Finder dating events in `offset` local time, walking at most
    /// `max_scan_days` days when the prediction misses.
    pub const fn new(offset: FixedOffset, max_scan_days: u32) -> Self {
        Self {
            offset,
            max_scan_days,
        }
    }

    /// Offset whose civil days date the events.
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Bound on the fallback walk, in days.
    pub const fn max_scan_days(&self) -> u32 {
        self.max_scan_days
    }

    /// Local midnight starting the most recent wrap day, looking back from
    /// the end of the civil day containing `reference`.
    pub fn previous<C, Tz>(
        &self,
        cycle: &C,
        reference: &DateTime<Tz>,
    ) -> Result<DateTime<FixedOffset>>
    where
        C: Cycle + ?Sized,
        Tz: TimeZone,
    {
        self.locate(cycle, reference, Direction::Previous)
    }

    /// Local midnight starting the first wrap day after the civil day
    /// containing `reference`.
    pub fn next<C, Tz>(
        &self,
        cycle: &C,
        reference: &DateTime<Tz>,
    ) -> Result<DateTime<FixedOffset>>
    where
        C: Cycle + ?Sized,
        Tz: TimeZone,
    {
        self.locate(cycle, reference, Direction::Next)
    }

    fn locate<C, Tz>(
        &self,
        cycle: &C,
        reference: &DateTime<Tz>,
        direction: Direction,
    ) -> Result<DateTime<FixedOffset>>
    where
        C: Cycle + ?Sized,
        Tz: TimeZone,
    {
        let origin = next_midnight(reference, self.offset)?;
        let t = to_astronomical_time(&origin);
        let phase = cycle.phase(t);
        let years = match direction {
            Direction::Previous => -phase / cycle.rate(),
            Direction::Next => (360.0 - phase) / cycle.rate(),
        };
        let estimate = to_civil_timestamp(JulianYears::new(t.value() + years))?;

        let day = self.sample(cycle, local_midnight(&estimate, self.offset)?)?;
        trace!(
            "{direction:?} wrap predicted on {} (phase {:.4} -> {:.4})",
            day.start,
            day.at_start,
            day.at_end
        );
        if day.wraps() {
            return Ok(day.start);
        }
        // Lower half-circle at the day's end: the prediction ran past the wrap.
        if day.at_end < 180.0 {
            self.scan_backward(cycle, day)
        } else {
            self.scan_forward(cycle, day)
        }
    }

    fn sample<C: Cycle + ?Sized>(
        &self,
        cycle: &C,
        start: DateTime<FixedOffset>,
    ) -> Result<DaySample> {
        let end = shift_days(start, 1)?;
        Ok(DaySample {
            start,
            end,
            at_start: self.phase_at(cycle, &start),
            at_end: self.phase_at(cycle, &end),
        })
    }

    fn phase_at<C: Cycle + ?Sized>(&self, cycle: &C, instant: &DateTime<FixedOffset>) -> f64 {
        cycle.phase(to_astronomical_time(instant))
    }

    /// Walks back from `day` until a day containing the wrap.
    fn scan_backward<C: Cycle + ?Sized>(
        &self,
        cycle: &C,
        mut day: DaySample,
    ) -> Result<DateTime<FixedOffset>> {
        let from = day.start;
        let mut steps = 0;
        while !day.wraps() {
            if steps >= self.max_scan_days {
                return Err(Error::ScanLimitExceeded {
                    from,
                    limit: self.max_scan_days,
                });
            }
            steps += 1;
            day.end = day.start;
            day.at_end = day.at_start;
            day.start = shift_days(day.start, -1)?;
            day.at_start = self.phase_at(cycle, &day.start);
        }
        debug!("prediction overshot by {steps} day(s); wrap on {}", day.start);
        Ok(day.start)
    }

    /// Walks forward from the day after `day` until a day containing the wrap.
    fn scan_forward<C: Cycle + ?Sized>(
        &self,
        cycle: &C,
        day: DaySample,
    ) -> Result<DateTime<FixedOffset>> {
        let from = day.start;
        let mut day = self.sample(cycle, day.end)?;

        let mut steps = 1;
        while !day.wraps() {
            if steps >= self.max_scan_days {
                return Err(Error::ScanLimitExceeded {
                    from,
                    limit: self.max_scan_days,
                });
            }
            steps += 1;
            day.start = day.end;
            day.at_start = day.at_end;
            day.end = shift_days(day.end, 1)?;
            day.at_end = self.phase_at(cycle, &day.end);
        }
        debug!("prediction undershot by {steps} day(s); wrap on {}", day.start);
        Ok(day.start)
    }
}
