// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Apparent ecliptic longitude of the Sun and the Moon
//!
//! Low-precision trigonometric series from *Nagasawa, K. (1999), "Hi no de,
//! hi no iri no keisan" (Chijin Shokan)*.  Each model is a linear mean term
//! plus a truncated sum of sinusoidal perturbations; the running sum is folded
//! back into `[0, 360)` after every term.
//!
//! The argument is the astronomical time of [`to_astronomical_time`](crate::to_astronomical_time),
//! i.e. Julian years since J2000.0 on the TT axis.  All angles inside the
//! series are in degrees.
//!
//! Accuracy is a few hundredths of a degree for the Sun and about a tenth for
//! the Moon over the 20th and 21st centuries, which resolves new moons and
//! solar terms to well under an hour.

use qtty::JulianYears;

/// Mean motion of the Sun in ecliptic longitude (degrees per Julian year).
pub const SOLAR_MEAN_RATE: f64 = 360.00769;

/// Mean motion of the Moon in ecliptic longitude (degrees per Julian year).
pub const LUNAR_MEAN_RATE: f64 = 4812.67881;

/// Solar perturbation terms as `[amplitude, phase, rate]`.
#[rustfmt::skip]
const SOLAR_TERMS: [[f64; 3]; 18] = [
    [0.0200, 355.05, 719.981],
    [0.0048, 234.95, 19.341],
    [0.0020, 247.1, 329.64],
    [0.0018, 297.8, 4452.67],
    [0.0018, 251.3, 0.20],
    [0.0015, 343.2, 450.37],
    [0.0013, 81.4, 225.18],
    [0.0008, 132.5, 659.29],
    [0.0007, 153.3, 90.38],
    [0.0007, 206.8, 30.35],
    [0.0006, 29.8, 337.18],
    [0.0005, 207.4, 1.50],
    [0.0005, 291.2, 22.81],
    [0.0004, 234.9, 315.56],
    [0.0004, 157.3, 299.30],
    [0.0004, 21.1, 720.02],
    [0.0003, 352.5, 1079.97],
    [0.0003, 329.7, 44.43],
];

/// Lunar perturbation terms as `[amplitude, phase, rate]`.
#[rustfmt::skip]
const LUNAR_TERMS: [[f64; 3]; 62] = [
    [1.2740, 100.738, 4133.3536],
    [0.6583, 235.700, 8905.3422],
    [0.2136, 269.926, 9543.9773],
    [0.1856, 177.525, 359.9905],
    [0.1143, 6.546, 9664.0404],
    [0.0588, 214.22, 638.635],
    [0.0572, 103.21, 3773.363],
    [0.0533, 10.66, 13677.331],
    [0.0459, 238.18, 8545.352],
    [0.0410, 137.43, 4411.998],
    [0.0348, 117.84, 4452.671],
    [0.0305, 312.49, 5131.979],
    [0.0153, 130.84, 758.698],
    [0.0125, 141.51, 14436.029],
    [0.0110, 231.59, 4892.052],
    [0.0107, 336.44, 13038.696],
    [0.0100, 44.89, 14315.966],
    [0.0085, 201.5, 8266.71],
    [0.0079, 278.2, 4493.34],
    [0.0068, 53.2, 9265.33],
    [0.0052, 197.2, 319.32],
    [0.0050, 295.4, 4812.66],
    [0.0048, 235.0, 19.34],
    [0.0040, 13.2, 13317.34],
    [0.0040, 145.6, 18449.32],
    [0.0040, 119.5, 1.33],
    [0.0039, 111.3, 17810.68],
    [0.0037, 349.1, 5410.62],
    [0.0027, 272.5, 9183.99],
    [0.0026, 107.2, 13797.39],
    [0.0024, 211.9, 988.63],
    [0.0024, 252.8, 9224.66],
    [0.0022, 240.6, 8185.36],
    [0.0021, 87.5, 9903.97],
    [0.0021, 175.1, 719.98],
    [0.0021, 105.6, 3413.37],
    [0.0020, 55.0, 19.34],
    [0.0018, 4.1, 4013.29],
    [0.0016, 242.2, 18569.38],
    [0.0012, 339.0, 12678.71],
    [0.0011, 276.5, 19208.02],
    [0.0009, 218.0, 8586.0],
    [0.0008, 188.0, 14037.3],
    [0.0008, 204.0, 7906.7],
    [0.0007, 140.0, 4052.0],
    [0.0007, 275.0, 4853.3],
    [0.0007, 216.0, 278.6],
    [0.0006, 128.0, 1118.7],
    [0.0005, 247.0, 22582.7],
    [0.0005, 181.0, 19088.0],
    [0.0005, 114.0, 17450.7],
    [0.0005, 332.0, 5091.3],
    [0.0004, 313.0, 398.7],
    [0.0004, 278.0, 120.1],
    [0.0004, 71.0, 9584.7],
    [0.0004, 20.0, 720.0],
    [0.0003, 83.0, 3814.0],
    [0.0003, 66.0, 3494.7],
    [0.0003, 147.0, 18089.3],
    [0.0003, 311.0, 5492.0],
    [0.0003, 161.0, 40.7],
    [0.0003, 280.0, 23221.3],
];

/// Folds an angle in degrees into `[0, 360)`.
///
/// ```
/// use qreki::normalize_degrees;
///
/// assert_eq!(normalize_degrees(-90.0), 270.0);
/// assert_eq!(normalize_degrees(720.5), 0.5);
/// ```
#[inline]
pub fn normalize_degrees(x: f64) -> f64 {
    let x = x % 360.0;
    if x < 0.0 {
        // -1e-14 % 360 + 360 rounds to 360.0
        let x = x + 360.0;
        if x >= 360.0 {
            0.0
        } else {
            x
        }
    } else {
        x
    }
}

#[inline]
fn sin_deg(x: f64) -> f64 {
    x.to_radians().sin()
}

#[inline]
fn add_terms(mut longitude: f64, terms: &[[f64; 3]], t: f64) -> f64 {
    for &[amplitude, phase, rate] in terms {
        longitude = normalize_degrees(longitude + amplitude * sin_deg(phase + rate * t));
    }
    longitude
}

/// Apparent ecliptic longitude of the Sun in degrees, `[0, 360)`.
pub fn solar_longitude(t: JulianYears) -> f64 {
    let t = t.value();
    let mean = 280.4603 + SOLAR_MEAN_RATE * t;
    let center = (1.9146 - 0.00005 * t) * sin_deg(357.538 + 359.991 * t);
    add_terms(normalize_degrees(mean + center), &SOLAR_TERMS, t)
}

/// Apparent ecliptic longitude of the Moon in degrees, `[0, 360)`.
pub fn lunar_longitude(t: JulianYears) -> f64 {
    let t = t.value();
    let a = 0.0040 * sin_deg(119.5 + 1.33 * t)
        + 0.0020 * sin_deg(55.0 + 19.34 * t)
        + 0.0006 * sin_deg(71.0 + 0.2 * t)
        + 0.0006 * sin_deg(54.0 + 19.3 * t);
    let mean = 218.3161 + LUNAR_MEAN_RATE * t;
    let anomaly = 6.2887 * sin_deg(134.961 + 4771.9886 * t + a);
    add_terms(normalize_degrees(mean + anomaly), &LUNAR_TERMS, t)
}
