// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type shared by the whole crate.

use chrono::{DateTime, FixedOffset};
use thiserror::Error;

/// Failures of a lunisolar conversion.
///
/// [`Error::InvalidDate`] and [`Error::InvalidUtcOffset`] are caused by the
/// caller's input.  The remaining variants mean the longitude models or the
/// crossing finder reached a state that should be impossible; see
/// [`Error::is_internal`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input could not be interpreted as a date.
    #[error("cannot interpret `{input}` as a date")]
    InvalidDate { input: String },

    /// A UTC offset outside ±24 h was configured.
    #[error("UTC offset of {0} s is out of range")]
    InvalidUtcOffset(i32),

    /// An instant fell outside the range chrono can represent.
    #[error("instant falls outside the representable civil time range")]
    OutOfRange,

    /// The day-by-day fallback scan walked further than its bound.
    #[error("no phase wrap found within {limit} days of {from}")]
    ScanLimitExceeded {
        from: DateTime<FixedOffset>,
        limit: u32,
    },

    /// No month of the new-moon table contains the query instant.
    #[error("no lunar month brackets {0}")]
    NoBracketingMonth(DateTime<FixedOffset>),
}

impl Error {
    /// `true` for modeling inconsistencies, `false` for bad input.
    pub fn is_internal(&self) -> bool {
        !matches!(self, Error::InvalidDate { .. } | Error::InvalidUtcOffset(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
