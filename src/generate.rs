// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Synthetic rotating-LiDAR point clouds.
//!
//! [`generate`] emits a cloud already in scanline-major, azimuth-ascending
//! order, which makes it its own reference output: shuffle it with
//! [`shuffle`], sort it, and compare against the unshuffled cloud.
//!
//! Randomness always comes from a caller-owned [`rand::Rng`], so a seeded
//! generator (e.g. `ChaCha8Rng::seed_from_u64`) gives reproducible clouds.

use crate::lidar::{Error, Point3};
use rand::{seq::SliceRandom, Rng};
use tracing::{debug, instrument};

/// Per-point random walk step bound for the range (meters).
const RANGE_WALK_STEP: f32 = 0.25;

/// Scan geometry of a simulated sensor. Angles in degrees, ranges in meters.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanPattern {
    /// Scan lines per sweep
    pub lines: usize,
    /// Returns per scan line
    pub points_per_line: usize,
    pub min_altitude: f32,
    pub max_altitude: f32,
    pub min_azimuth: f32,
    pub max_azimuth: f32,
    pub min_range: f32,
    pub max_range: f32,
}

impl Default for ScanPattern {
    fn default() -> Self {
        Self {
            lines: 128,
            points_per_line: 2048,
            min_altitude: -15.0,
            max_altitude: 15.0,
            // Stay clear of the ±180° seam.
            min_azimuth: -179.9,
            max_azimuth: 179.9,
            min_range: 3.0,
            max_range: 100.0,
        }
    }
}

impl ScanPattern {
    /// Total number of points produced by [`generate`].
    pub fn len(&self) -> usize {
        self.lines.saturating_mul(self.points_per_line)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Angular gap between adjacent scan lines in degrees.
    pub fn line_spacing(&self) -> f32 {
        (self.max_altitude - self.min_altitude) / (self.lines.max(2) - 1) as f32
    }

    /// Check that the pattern describes a usable scan.
    pub fn validate(&self) -> Result<(), Error> {
        if self.lines < 2 {
            return Err(Error::Config(format!(
                "at least 2 scan lines required, got {}",
                self.lines
            )));
        }
        if self.points_per_line == 0 {
            return Err(Error::Config("points per line must be non-zero".into()));
        }
        if self.lines.checked_mul(self.points_per_line).is_none() {
            return Err(Error::Config(format!(
                "{} lines x {} points per line overflows the point count",
                self.lines, self.points_per_line
            )));
        }

        let bounds = [
            ("altitude", self.min_altitude, self.max_altitude),
            ("azimuth", self.min_azimuth, self.max_azimuth),
            ("range", self.min_range, self.max_range),
        ];
        for (name, min, max) in bounds {
            if !min.is_finite() || !max.is_finite() {
                return Err(Error::Config(format!("{} bounds must be finite", name)));
            }
            if min > max {
                return Err(Error::Config(format!(
                    "{} minimum {} exceeds maximum {}",
                    name, min, max
                )));
            }
        }

        if self.min_altitude < -90.0 || self.max_altitude > 90.0 {
            return Err(Error::Config(format!(
                "altitude range [{}, {}] outside [-90, 90]",
                self.min_altitude, self.max_altitude
            )));
        }
        if self.min_azimuth < -180.0 || self.max_azimuth > 180.0 {
            return Err(Error::Config(format!(
                "azimuth range [{}, {}] outside [-180, 180]",
                self.min_azimuth, self.max_azimuth
            )));
        }
        if self.min_range <= 0.0 {
            return Err(Error::Config(format!(
                "minimum range must be positive, got {}",
                self.min_range
            )));
        }

        Ok(())
    }

    /// Elevation of scan line `line` in radians. Line 0 is at the maximum
    /// altitude and the last line at the minimum.
    fn line_altitude(&self, line: usize) -> f32 {
        let min = self.min_altitude.to_radians();
        let max = self.max_altitude.to_radians();
        (self.lines - 1 - line) as f32 / (self.lines as f32 - 1.0) * (max - min) + min
    }

    /// Azimuth of return `point` on a line in radians. Returns are evenly
    /// spaced from the minimum azimuth, counter-clockwise.
    fn point_azimuth(&self, point: usize) -> f32 {
        let min = self.min_azimuth.to_radians();
        let max = self.max_azimuth.to_radians();
        point as f32 / self.points_per_line as f32 * (max - min) + min
    }
}

/// Generate a synthetic sweep in scanline-major, azimuth-ascending order.
///
/// Each line starts at a uniformly random range and random-walks by up to
/// ±0.25 m per return, clamped to the pattern's range bounds.
#[instrument(skip_all, fields(lines = pattern.lines, points_per_line = pattern.points_per_line))]
pub fn generate<R: Rng + ?Sized>(
    pattern: &ScanPattern,
    rng: &mut R,
) -> Result<Vec<Point3>, Error> {
    pattern.validate()?;

    let mut ranges: Vec<f32> = (0..pattern.lines)
        .map(|_| rng.gen_range(pattern.min_range..=pattern.max_range))
        .collect();

    let mut points = Vec::with_capacity(pattern.len());
    for (line, range) in ranges.iter_mut().enumerate() {
        let altitude = pattern.line_altitude(line);
        let (sin_alt, cos_alt) = altitude.sin_cos();

        for point in 0..pattern.points_per_line {
            let azimuth = pattern.point_azimuth(point);
            let (sin_azi, cos_azi) = azimuth.sin_cos();

            let step = rng.gen_range(-RANGE_WALK_STEP..=RANGE_WALK_STEP);
            *range = (*range + step).clamp(pattern.min_range, pattern.max_range);

            points.push(Point3::new(
                *range * cos_alt * cos_azi,
                *range * cos_alt * sin_azi,
                *range * sin_alt,
            ));
        }
    }

    debug!("generated {} points", points.len());
    Ok(points)
}

/// Return a randomly permuted copy of `points`.
pub fn shuffle<R: Rng + ?Sized>(points: &[Point3], rng: &mut R) -> Vec<Point3> {
    let mut shuffled = points.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::{altitude, azimuth, ALTITUDE_TOLERANCE};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn pattern(lines: usize, points_per_line: usize) -> ScanPattern {
        ScanPattern {
            lines,
            points_per_line,
            ..Default::default()
        }
    }

    #[test]
    fn test_validate() {
        assert!(ScanPattern::default().validate().is_ok());
        assert!(pattern(1, 10).validate().is_err());
        assert!(pattern(4, 0).validate().is_err());

        let inverted = ScanPattern {
            min_range: 50.0,
            max_range: 10.0,
            ..Default::default()
        };
        assert!(matches!(inverted.validate(), Err(Error::Config(_))));

        let nan = ScanPattern {
            max_altitude: f32::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());

        let zero_range = ScanPattern {
            min_range: 0.0,
            ..Default::default()
        };
        assert!(zero_range.validate().is_err());

        let huge = pattern(usize::MAX / 2, 3);
        assert!(matches!(huge.validate(), Err(Error::Config(_))));
        assert_eq!(huge.len(), usize::MAX);
        assert!(matches!(
            generate(&huge, &mut ChaCha8Rng::seed_from_u64(0)),
            Err(Error::Config(_))
        ));

        let too_wide = ScanPattern {
            min_azimuth: -200.0,
            ..Default::default()
        };
        assert!(too_wide.validate().is_err());
    }

    #[test]
    fn test_generate_shape() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let p = pattern(8, 32);
        let points = generate(&p, &mut rng).unwrap();
        assert_eq!(points.len(), 8 * 32);

        for pt in &points {
            let r = pt.range();
            assert!(r >= p.min_range - 1e-3 && r <= p.max_range + 1e-3, "{}", r);
        }
    }

    #[test]
    fn test_generate_line_geometry() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let p = pattern(16, 64);
        let points = generate(&p, &mut rng).unwrap();

        for (line, chunk) in points.chunks(p.points_per_line).enumerate() {
            let expected = p.line_altitude(line);
            for (i, pt) in chunk.iter().enumerate() {
                assert!((altitude(pt) - expected).abs() < ALTITUDE_TOLERANCE / 10.0);
                assert!((azimuth(pt) - p.point_azimuth(i)).abs() < 1e-4);
            }
        }

        assert!((p.line_spacing() - 2.0).abs() < 1e-6);

        // Lines descend, returns ascend.
        assert!(p.line_altitude(0) > p.line_altitude(1));
        assert!(p.point_azimuth(0) < p.point_azimuth(1));
    }

    #[test]
    fn test_seed_reproducible() {
        let p = pattern(4, 16);
        let a = generate(&p, &mut ChaCha8Rng::seed_from_u64(7)).unwrap();
        let b = generate(&p, &mut ChaCha8Rng::seed_from_u64(7)).unwrap();
        let c = generate(&p, &mut ChaCha8Rng::seed_from_u64(8)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let points = generate(&pattern(4, 64), &mut rng).unwrap();
        let shuffled = shuffle(&points, &mut rng);

        assert_eq!(shuffled.len(), points.len());
        assert_ne!(shuffled, points);

        let key = |p: &Point3| (p.x.to_bits(), p.y.to_bits(), p.z.to_bits());
        let mut a: Vec<_> = points.iter().map(key).collect();
        let mut b: Vec<_> = shuffled.iter().map(key).collect();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);
    }
}
