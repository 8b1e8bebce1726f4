// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar configuration.

use chrono::FixedOffset;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::{Error, Result};

/// Japan Standard Time, UTC+9, in seconds.
pub const JST_OFFSET_SECONDS: i32 = 9 * 3600;

/// Default bound on the day-by-day fallback scan, about three lunations.
pub const DEFAULT_MAX_SCAN_DAYS: u32 = 90;

/// Parameters of a [`Calendar`](crate::Calendar).
///
/// The default dates events in Japan Standard Time, which is what defines
/// the Japanese lunisolar calendar.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalendarConfig {
    /// Offset of the local civil time from UTC, in seconds east.
    pub utc_offset_seconds: i32,
    /// Maximum number of days the crossing finder may walk after a missed
    /// prediction.
    pub max_scan_days: u32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            utc_offset_seconds: JST_OFFSET_SECONDS,
            max_scan_days: DEFAULT_MAX_SCAN_DAYS,
        }
    }
}

impl CalendarConfig {
    /// Dates events in the civil time `seconds` east of UTC.
    pub fn with_utc_offset_seconds(mut self, seconds: i32) -> Self {
        self.utc_offset_seconds = seconds;
        self
    }

    /// Bounds the crossing finder's fallback walk to `days`.
    pub fn with_max_scan_days(mut self, days: u32) -> Self {
        self.max_scan_days = days;
        self
    }

    /// The configured offset as a chrono [`FixedOffset`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidUtcOffset`] unless the offset is strictly within ±24 h.
    pub fn utc_offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_seconds)
            .ok_or(Error::InvalidUtcOffset(self.utc_offset_seconds))
    }
}
