// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! EdgeFirst LiDAR Sort Library
//!
//! Orders an unordered point cloud from a rotating LiDAR into scanline-major,
//! azimuth-ascending order: points are grouped by the scan line they were
//! emitted on, lines run top to bottom, and each line runs counter-clockwise
//! around the +Z axis.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────┐     ┌────────────────┐     ┌──────────────────┐
//! │  sort_points   │ ──► │  Comparator    │ ──► │  angle::compare_ │
//! │  (std / pdq)   │     │  (alt × azi)   │     │  altitude/azimuth│
//! └────────────────┘     └────────────────┘     └──────────────────┘
//!         ▲                                       exact (atan, atan2)
//!         │                                       fast  (trig-free)
//! ┌────────────────┐
//! │  generate /    │
//! │  shuffle / xyz │
//! └────────────────┘
//! ```
//!
//! The sort driver calls the comparator O(n log n) times and the comparator
//! calls one altitude and at most one azimuth classification per call. Each
//! classification has an exact and a fast [`Variant`], and any pairing of
//! them with either [`Algorithm`] produces the same order on well-formed
//! scans.
//!
//! # Modules
//!
//! - [`angle`]: Altitude banding and azimuth ordering, exact and fast
//! - [`compare`]: Scanline-major [`Comparator`]
//! - [`sort`]: In-place sort driver and sortedness check
//! - [`introsort`]: Introspective sort
//! - [`pdqsort`]: Pattern-defeating quicksort
//! - [`generate`]: Seeded synthetic sweeps and shuffling
//! - [`xyz`]: Plain-text `x,y,z` dump
//! - [`lidar`]: Point type and error handling
//!
//! # Example
//!
//! ```
//! use edgefirst_lidarsort::{
//!     generate::{generate, shuffle, ScanPattern},
//!     sort::{is_sorted, sort_points},
//!     Algorithm, Comparator,
//! };
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let pattern = ScanPattern {
//!     lines: 16,
//!     points_per_line: 64,
//!     ..Default::default()
//! };
//! let mut rng = ChaCha8Rng::seed_from_u64(0);
//! let points = generate(&pattern, &mut rng)?;
//! let mut cloud = shuffle(&points, &mut rng);
//!
//! sort_points(&mut cloud, Comparator::FAST, Algorithm::PatternDefeating);
//! assert!(is_sorted(&cloud, Comparator::FAST));
//! assert_eq!(cloud, points);
//! # Ok::<(), edgefirst_lidarsort::Error>(())
//! ```

pub mod angle;
pub mod compare;
pub mod generate;
pub mod introsort;
pub mod lidar;
pub mod pdqsort;
pub mod sort;
pub mod xyz;

// Re-exports for convenience
pub use angle::Variant;
pub use compare::Comparator;
pub use generate::ScanPattern;
pub use lidar::{Error, Point3};
pub use sort::Algorithm;
