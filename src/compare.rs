// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Scanline-major point comparator.
//!
//! A [`Comparator`] combines one altitude [`Variant`] with one azimuth
//! [`Variant`] into a strict less-than predicate: points on a higher scan line
//! come first, and points on the same scan line are ordered counter-clockwise.

use crate::{
    angle::{compare_altitude, compare_azimuth, Variant},
    lidar::Point3,
};
use std::{cmp::Ordering, fmt};

/// Altitude and azimuth variant pair.
///
/// All four combinations are strict weak orders over point sets whose scan
/// lines are separated by more than [`crate::angle::ALTITUDE_TOLERANCE`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Comparator {
    pub altitude: Variant,
    pub azimuth: Variant,
}

impl Comparator {
    pub const EXACT: Comparator = Comparator::new(Variant::Exact, Variant::Exact);
    pub const FAST: Comparator = Comparator::new(Variant::Fast, Variant::Fast);

    /// Every altitude × azimuth combination.
    pub const ALL: [Comparator; 4] = [
        Comparator::new(Variant::Exact, Variant::Exact),
        Comparator::new(Variant::Exact, Variant::Fast),
        Comparator::new(Variant::Fast, Variant::Exact),
        Comparator::new(Variant::Fast, Variant::Fast),
    ];

    pub const fn new(altitude: Variant, azimuth: Variant) -> Self {
        Self { altitude, azimuth }
    }

    /// Strict less-than: `a` sorts before `b`.
    #[inline]
    pub fn is_less(&self, a: &Point3, b: &Point3) -> bool {
        match compare_altitude(a, b, self.altitude) {
            Ordering::Equal => compare_azimuth(a, b, self.azimuth),
            ord => ord == Ordering::Less,
        }
    }

    /// Three-way form of [`Self::is_less`].
    #[inline]
    pub fn ordering(&self, a: &Point3, b: &Point3) -> Ordering {
        if self.is_less(a, b) {
            Ordering::Less
        } else if self.is_less(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.altitude, self.azimuth)
    }
}

/// Strict less-than over two points with the given variants.
#[inline]
pub fn compare(a: &Point3, b: &Point3, altitude: Variant, azimuth: Variant) -> bool {
    Comparator::new(altitude, azimuth).is_less(a, b)
}
