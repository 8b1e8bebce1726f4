// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! 六曜, the six-day cycle of lucky and unlucky days.
//!
//! The cycle value of a lunisolar date is `(month + day) mod 6`; leap months
//! use the number of the month they repeat.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the six rokuyō days, in cycle order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rokuyou {
    /// 大安, lucky all day.
    Taian = 0,
    /// 赤口, unlucky except around noon.
    Shakku = 1,
    /// 先勝, lucky in the morning.
    Sensho = 2,
    /// 友引, unlucky at noon.
    Tomobiki = 3,
    /// 先負, lucky in the afternoon.
    Senbu = 4,
    /// 仏滅, unlucky all day.
    Butsumetsu = 5,
}

impl Rokuyou {
    pub const ALL: [Rokuyou; 6] = [
        Rokuyou::Taian,
        Rokuyou::Shakku,
        Rokuyou::Sensho,
        Rokuyou::Tomobiki,
        Rokuyou::Senbu,
        Rokuyou::Butsumetsu,
    ];

    /// Cycle value `n mod 6`.
    pub const fn from_index(n: u32) -> Self {
        Self::ALL[(n % 6) as usize]
    }

    /// Cycle value of lunisolar `month` and `day`.
    ///
    /// ```
    /// use qreki::Rokuyou;
    ///
    /// assert_eq!(Rokuyou::from_month_day(1, 1), Rokuyou::Sensho);
    /// ```
    pub const fn from_month_day(month: u32, day: u32) -> Self {
        Self::from_index(month + day)
    }

    /// Position in the cycle, `0..6`.
    pub const fn index(self) -> u32 {
        self as u32
    }

    pub const fn name(self) -> &'static str {
        match self {
            Rokuyou::Taian => "大安",
            Rokuyou::Shakku => "赤口",
            Rokuyou::Sensho => "先勝",
            Rokuyou::Tomobiki => "友引",
            Rokuyou::Senbu => "先負",
            Rokuyou::Butsumetsu => "仏滅",
        }
    }

    /// Deployment advice for the day.
    pub const fn explanation(self) -> &'static str {
        match self {
            Rokuyou::Taian => "思い切ってdeployしちゃいましょう。",
            Rokuyou::Shakku => "実は仏滅よりもやばいです。deployしたらあかん...",
            Rokuyou::Sensho => "deployは午前中に済ませましょう。",
            Rokuyou::Tomobiki => "昼のdeployはさけましょう。するなら朝晩が吉です。",
            Rokuyou::Senbu => "deployは午後からが吉でしょう。",
            Rokuyou::Butsumetsu => "仏滅deployとか事故のもとですよ。",
        }
    }
}

impl fmt::Display for Rokuyou {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
