// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Common LiDAR point types and error handling.
//!
//! This module provides the point representation shared by the comparators,
//! the sort driver, the synthetic generator and the coordinate dump.

use std::fmt;

/// A single LiDAR return in the sensor frame (meters).
///
/// Points are plain values with no identity beyond their position. Equality
/// is exact-coordinate equality and is only used for validation; ordering is
/// provided by [`crate::compare::Comparator`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Squared distance from the vertical axis.
    #[inline]
    pub fn horizontal_norm_sq(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// True when the point lies exactly on the vertical (Z) axis, where the
    /// elevation angle is undefined.
    #[inline]
    pub fn is_on_vertical_axis(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Distance from the sensor origin.
    #[inline]
    pub fn range(&self) -> f32 {
        (self.horizontal_norm_sq() + self.z * self.z).sqrt()
    }
}

impl From<[f32; 3]> for Point3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Point3> for [f32; 3] {
    fn from(p: Point3) -> Self {
        [p.x, p.y, p.z]
    }
}

/// Common error type for point cloud operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error (file operations)
    Io(std::io::Error),
    /// Malformed line in a coordinate dump (1-based line number)
    Parse { line: usize, message: String },
    /// Configuration error
    Config(String),
    /// Point at the given index lies on the vertical axis
    DegeneratePoint(usize),
    /// Sorted output differs from the reference at the given index
    Mismatch { index: usize },
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Parse { line, message } => write!(f, "parse error on line {}: {}", line, message),
            Error::Config(msg) => write!(f, "configuration error: {}", msg),
            Error::DegeneratePoint(index) => {
                write!(f, "point {} lies on the vertical axis", index)
            }
            Error::Mismatch { index } => write!(f, "points differ at index {}", index),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

/// Report the first point whose elevation angle is undefined.
///
/// The comparators never fail on such points (see [`crate::angle`] for the
/// fallback ordering); this check is for callers that would rather reject
/// them.
pub fn check_domain(points: &[Point3]) -> Result<(), Error> {
    match points.iter().position(Point3::is_on_vertical_axis) {
        Some(index) => Err(Error::DegeneratePoint(index)),
        None => Ok(()),
    }
}

/// Compare two point sequences coordinate-wise within `epsilon`.
///
/// Returns the index of the first differing point, or the shorter length if
/// the sequences differ in length.
pub fn first_mismatch(a: &[Point3], b: &[Point3], epsilon: f32) -> Option<usize> {
    let close = |p: &Point3, q: &Point3| {
        (p.x - q.x).abs() <= epsilon && (p.y - q.y).abs() <= epsilon && (p.z - q.z).abs() <= epsilon
    };

    match a.iter().zip(b).position(|(p, q)| !close(p, q)) {
        Some(index) => Some(index),
        None if a.len() != b.len() => Some(a.len().min(b.len())),
        None => None,
    }
}

/// True if both sequences have the same length and every coordinate pair is
/// within `epsilon`.
pub fn all_close(a: &[Point3], b: &[Point3], epsilon: f32) -> bool {
    first_mismatch(a, b, epsilon).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_conversions() {
        let p = Point3::from([1.0, 2.0, 3.0]);
        assert_eq!(p, Point3::new(1.0, 2.0, 3.0));
        let arr: [f32; 3] = p.into();
        assert_eq!(arr, [1.0, 2.0, 3.0]);
        assert_eq!(Point3::new(3.0, 4.0, 0.0).range(), 5.0);
    }

    #[test]
    fn test_check_domain() {
        let points = vec![
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 5.0),
            Point3::new(0.0, 0.0, 2.0),
        ];
        match check_domain(&points) {
            Err(Error::DegeneratePoint(2)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(check_domain(&points[..2]).is_ok());
        assert!(check_domain(&[]).is_ok());
    }

    #[test]
    fn test_all_close() {
        let a = vec![Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, 5.0, 6.0)];
        let mut b = a.clone();
        assert!(all_close(&a, &b, 1e-6));

        b[1].y += 1e-3;
        assert!(!all_close(&a, &b, 1e-6));
        assert_eq!(first_mismatch(&a, &b, 1e-6), Some(1));
        assert!(all_close(&a, &b, 1e-2));

        assert_eq!(first_mismatch(&a, &a[..1], 1e-6), Some(1));
    }

    #[test]
    fn test_error_display() {
        let err = Error::Parse {
            line: 3,
            message: "expected 3 fields".to_string(),
        };
        assert_eq!(err.to_string(), "parse error on line 3: expected 3 fields");
        assert_eq!(
            Error::DegeneratePoint(7).to_string(),
            "point 7 lies on the vertical axis"
        );
    }
}
