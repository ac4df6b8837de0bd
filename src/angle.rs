// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Altitude and azimuth classification of LiDAR returns.
//!
//! A rotating LiDAR emits each scan line at a fixed elevation angle and sweeps
//! it around the vertical axis. Two angular relations are enough to recover
//! that structure from an unordered cloud:
//!
//! - **Altitude banding** decides whether two points belong to the same scan
//!   line (their elevation angles differ by less than [`ALTITUDE_TOLERANCE`])
//!   and otherwise which line is higher.
//! - **Azimuth ordering** orders points counter-clockwise around +Z, starting
//!   just above -180° and ending at +180°.
//!
//! Each relation comes in two [`Variant`]s:
//!
//! | Variant | Altitude                          | Azimuth                          |
//! |---------|-----------------------------------|----------------------------------|
//! | Exact   | `atan(z / sqrt(x² + y²))`         | `atan2(y, x)`                    |
//! | Fast    | hemisphere + `z² / (x² + y²)`     | quadrant, octant, cross product  |
//!
//! The fast forms avoid inverse trigonometry entirely. Fast azimuth is the
//! same total order as exact azimuth for every `(x, y) != (0, 0)`. Fast
//! altitude agrees with exact altitude whenever the angular gap exceeds the
//! tolerance; they may only disagree on pairs inside the tolerance boundary.
//! The fast threshold is absolute in `tan²`, so its rounding noise grows with
//! altitude: past roughly ±40° returns of one line may stop tying.
//!
//! # Degenerate points
//!
//! Both variants share one fallback so the comparators stay total:
//!
//! - On the vertical axis (`x = y = 0`) the altitude is +90° when `z >= 0`
//!   and -90° otherwise. The fast form gives such points an infinite ratio in
//!   the same hemisphere, and infinite ratios tie.
//! - At the horizontal origin the azimuth is 0° (the +X direction).
//! - Negative zero is folded to positive zero before azimuth classification,
//!   so the -X axis is always +180°.

use crate::lidar::Point3;
use clap::ValueEnum;
use std::{
    cmp::Ordering,
    f32::consts::{FRAC_PI_2, PI},
    fmt,
};

/// Maximum elevation difference (radians) between two returns of the same
/// scan line: 0.05°.
pub const ALTITUDE_TOLERANCE: f32 = 0.05 * PI / 180.0;

/// `sin²(ALTITUDE_TOLERANCE)`, the threshold used by the fast altitude
/// comparison on the `z² / (x² + y²)` surrogate.
pub const ALTITUDE_TOLERANCE_SIN_SQ: f32 = 7.615_434e-7;

/// Comparison variant for altitude or azimuth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum Variant {
    /// Inverse trigonometric reference implementation
    #[default]
    #[value(alias = "slow")]
    Exact,
    /// Trig-free algebraic implementation
    Fast,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Exact, Variant::Fast];
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Variant::Exact => write!(f, "exact"),
            Variant::Fast => write!(f, "fast"),
        }
    }
}

// ── Altitude ────────────────────────────────────────────────────────────────

/// Elevation angle above the horizontal plane, in radians.
#[inline]
pub fn altitude(p: &Point3) -> f32 {
    let horizontal = p.horizontal_norm_sq().sqrt();
    if horizontal == 0.0 {
        return if p.z >= 0.0 { FRAC_PI_2 } else { -FRAC_PI_2 };
    }
    (p.z / horizontal).atan()
}

/// `+1` for the upper hemisphere (including the horizontal plane), `-1`
/// below it.
#[inline]
fn hemisphere(p: &Point3) -> i8 {
    if p.z >= 0.0 { 1 } else { -1 }
}

/// `tan²(altitude)`, monotonic in `|altitude|` within a hemisphere.
#[inline]
pub fn altitude_ratio(p: &Point3) -> f32 {
    let horizontal_sq = p.horizontal_norm_sq();
    if horizontal_sq == 0.0 {
        return f32::INFINITY;
    }
    p.z * p.z / horizontal_sq
}

/// Order two points by scan line using the elevation angle.
///
/// Returns `Equal` when both lie within [`ALTITUDE_TOLERANCE`] of each
/// other, otherwise `Less` when `a` is the higher point (lines are ordered
/// top to bottom).
#[inline]
pub fn compare_altitude_exact(a: &Point3, b: &Point3) -> Ordering {
    let alt_a = altitude(a);
    let alt_b = altitude(b);

    if (alt_a - alt_b).abs() < ALTITUDE_TOLERANCE {
        return Ordering::Equal;
    }
    if alt_a > alt_b {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Order two points by scan line without inverse trigonometry.
///
/// Points in different hemispheres are ordered by hemisphere alone. Within a
/// hemisphere the `tan²` surrogate is compared against
/// [`ALTITUDE_TOLERANCE_SIN_SQ`]; a larger surrogate means higher in the
/// upper hemisphere and lower in the lower one.
#[inline]
pub fn compare_altitude_fast(a: &Point3, b: &Point3) -> Ordering {
    let sign_a = hemisphere(a);
    let sign_b = hemisphere(b);
    if sign_a != sign_b {
        return if sign_a > sign_b {
            Ordering::Less
        } else {
            Ordering::Greater
        };
    }

    let ratio_a = altitude_ratio(a);
    let ratio_b = altitude_ratio(b);

    // Equality first: two vertical-axis points give inf - inf = NaN.
    if ratio_a == ratio_b || (ratio_a - ratio_b).abs() < ALTITUDE_TOLERANCE_SIN_SQ {
        return Ordering::Equal;
    }

    let a_higher = if sign_a > 0 {
        ratio_a > ratio_b
    } else {
        ratio_a < ratio_b
    };
    if a_higher {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Altitude comparison dispatched on `variant`.
#[inline]
pub fn compare_altitude(a: &Point3, b: &Point3, variant: Variant) -> Ordering {
    match variant {
        Variant::Exact => compare_altitude_exact(a, b),
        Variant::Fast => compare_altitude_fast(a, b),
    }
}

// ── Azimuth ─────────────────────────────────────────────────────────────────

/// Horizontal projection with the degenerate-point fallbacks applied.
#[inline]
fn horizontal(p: &Point3) -> (f32, f32) {
    if p.x == 0.0 && p.y == 0.0 {
        return (1.0, 0.0);
    }
    // Adding +0.0 turns -0.0 into +0.0 and leaves every other value alone.
    (p.x + 0.0, p.y + 0.0)
}

/// Counter-clockwise angle around +Z from the +X axis, in `(-π, π]`.
#[inline]
pub fn azimuth(p: &Point3) -> f32 {
    let (x, y) = horizontal(p);
    y.atan2(x)
}

/// Quadrant index, numbered so that it increases with `atan2(y, x)`:
///
/// ```text
///   3 | 2
///   -----
///   0 | 1
/// ```
#[inline]
fn quadrant(x: f32, y: f32) -> u8 {
    match (x >= 0.0, y >= 0.0) {
        (false, false) => 0,
        (true, false) => 1,
        (true, true) => 2,
        (false, true) => 3,
    }
}

/// True when `a` comes before `b` counter-clockwise, using `atan2`.
#[inline]
pub fn compare_azimuth_exact(a: &Point3, b: &Point3) -> bool {
    azimuth(a) < azimuth(b)
}

/// True when `a` comes before `b` counter-clockwise, without inverse
/// trigonometry.
#[inline]
pub fn compare_azimuth_fast(a: &Point3, b: &Point3) -> bool {
    let (xa, ya) = horizontal(a);
    let (xb, yb) = horizontal(b);

    let qa = quadrant(xa, ya);
    let qb = quadrant(xb, yb);
    if qa != qb {
        return qa < qb;
    }

    // The octant nearer the Y axis comes second in even quadrants and first
    // in odd ones.
    let octant_a = xa.abs() < ya.abs();
    let octant_b = xb.abs() < yb.abs();
    if octant_a != octant_b {
        return ((qa & 1) == 1) ^ octant_b;
    }

    // Same octant: both lie within 45° of each other, so the sign of the 2D
    // cross product decides.
    ya * xb < yb * xa
}

/// Azimuth comparison dispatched on `variant`.
#[inline]
pub fn compare_azimuth(a: &Point3, b: &Point3, variant: Variant) -> bool {
    match variant {
        Variant::Exact => compare_azimuth_exact(a, b),
        Variant::Fast => compare_azimuth_fast(a, b),
    }
}
