// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time-scale marker types.
//!
//! Each zero-sized type identifies a specific time scale and encodes how
//! values in that scale relate to the canonical **Julian Date in TT**
//! (Terrestrial Time).
//!
//! | Marker | Description | Offset to JD(TT) |
//! |--------|-------------|------------------|
//! | [`JD`]  | Julian Date (TT axis) | 0 |
//! | [`TAI`] | International Atomic Time | +32.184 s |
//! | [`UTC`] | Coordinated Universal Time | +36 s +32.184 s |
//!
//! # Frozen leap seconds
//!
//! `TAI − UTC` is fixed at **36 s**, its value from mid-2012 to the end of
//! 2016.  No leap-second table is consulted, so instants far from that window
//! carry an error of a few tens of seconds.  At day resolution this is
//! irrelevant for lunisolar dates.

use super::instant::TimeScale;
use qtty::Days;

/// Julian Date — the identity scale.
///
/// `to_jd_tt(v) = v`, i.e. the quantity *is* a Julian Day number.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct JD;

impl TimeScale for JD {
    #[inline(always)]
    fn to_jd_tt(value: Days) -> Days {
        value
    }

    #[inline(always)]
    fn from_jd_tt(jd_tt: Days) -> Days {
        jd_tt
    }
}

/// International Atomic Time.
///
/// `TT = TAI + 32.184 s`.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct TAI;

/// `TT = TAI + 32.184 s` expressed in days.
const TT_MINUS_TAI: Days = Days::new(32.184 / 86_400.0);

impl TimeScale for TAI {
    #[inline(always)]
    fn to_jd_tt(value: Days) -> Days {
        value + TT_MINUS_TAI
    }

    #[inline(always)]
    fn from_jd_tt(jd_tt: Days) -> Days {
        jd_tt - TT_MINUS_TAI
    }
}

/// Coordinated Universal Time with a frozen leap-second count.
///
/// `TAI = UTC + 36 s`.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct UTC;

/// `TAI − UTC` in days, frozen at 36 s.
const TAI_MINUS_UTC: Days = Days::new(36.0 / 86_400.0);

impl TimeScale for UTC {
    #[inline(always)]
    fn to_jd_tt(value: Days) -> Days {
        TAI::to_jd_tt(value + TAI_MINUS_UTC)
    }

    #[inline(always)]
    fn from_jd_tt(jd_tt: Days) -> Days {
        TAI::from_jd_tt(jd_tt) - TAI_MINUS_UTC
    }
}
