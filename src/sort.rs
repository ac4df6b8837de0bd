// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! In-place sort driver for point clouds.
//!
//! [`sort_points`] reorders a point slice with a [`Comparator`] using one of
//! two interchangeable [`Algorithm`]s:
//!
//! - [`Algorithm::Standard`]: introspective sort (median-of-three quicksort,
//!   heapsort fallback, final insertion sort); see [`crate::introsort`].
//! - [`Algorithm::PatternDefeating`]: pattern-defeating quicksort, which
//!   finishes sorted and nearly sorted input in linear time; see
//!   [`crate::pdqsort`].
//!
//! For a strict weak order without ties both produce the same output; the
//! choice only affects speed.
//!
//! Neither algorithm validates the comparator. A predicate that is not a
//! strict weak order (e.g. scan lines closer than the altitude tolerance)
//! leaves the slice as a permutation of its input in unspecified order. Every
//! index step is bounds-guarded, so a bad predicate can never cause a panic or
//! a non-terminating loop.

use crate::{compare::Comparator, introsort::introsort, lidar::Point3, pdqsort::pdqsort};
use clap::ValueEnum;
use std::fmt;
use tracing::instrument;

/// Comparison sort used by [`sort_points`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum Algorithm {
    /// Introspective sort
    #[default]
    #[value(alias = "std")]
    Standard,
    /// Pattern-defeating quicksort
    #[value(alias = "pdq")]
    PatternDefeating,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Standard, Algorithm::PatternDefeating];
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Algorithm::Standard => write!(f, "std"),
            Algorithm::PatternDefeating => write!(f, "pdq"),
        }
    }
}

/// Sort `points` in place into the order induced by `comparator`.
#[instrument(level = "debug", skip_all, fields(n_points = points.len(), %comparator, %algorithm))]
pub fn sort_points(points: &mut [Point3], comparator: Comparator, algorithm: Algorithm) {
    sort_by_less(points, |a, b| comparator.is_less(a, b), algorithm);
}

/// Sort any slice in place with a strict less-than predicate.
pub fn sort_by_less<T, F>(v: &mut [T], mut is_less: F, algorithm: Algorithm)
where
    F: FnMut(&T, &T) -> bool,
{
    match algorithm {
        Algorithm::Standard => introsort(v, &mut is_less),
        Algorithm::PatternDefeating => pdqsort(v, &mut is_less),
    }
}

/// True iff no adjacent pair is out of order under `comparator`.
pub fn is_sorted(points: &[Point3], comparator: Comparator) -> bool {
    is_sorted_by_less(points, |a, b| comparator.is_less(a, b))
}

/// True iff no `v[i + 1]` is less than `v[i]`.
pub fn is_sorted_by_less<T, F>(v: &[T], mut is_less: F) -> bool
where
    F: FnMut(&T, &T) -> bool,
{
    v.windows(2).all(|w| !is_less(&w[1], &w[0]))
}

// ── Shared building blocks ──────────────────────────────────────────────────

/// Swap-based insertion sort, O(n²) but fastest on short slices.
pub(crate) fn insertion_sort<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    for i in 1..v.len() {
        shift_tail(&mut v[..=i], is_less);
    }
}

/// Move the last element left until it is not less than its predecessor.
pub(crate) fn shift_tail<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let mut i = v.len();
    while i >= 2 && is_less(&v[i - 1], &v[i - 2]) {
        v.swap(i - 1, i - 2);
        i -= 1;
    }
}

/// Move the first element right until its successor is not less than it.
pub(crate) fn shift_head<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let mut i = 0;
    while i + 1 < v.len() && is_less(&v[i + 1], &v[i]) {
        v.swap(i, i + 1);
        i += 1;
    }
}

/// In-place heapsort, the O(n log n) worst-case fallback of both quicksorts.
pub(crate) fn heapsort<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    for node in (0..v.len() / 2).rev() {
        sift_down(v, node, is_less);
    }
    for end in (1..v.len()).rev() {
        v.swap(0, end);
        sift_down(&mut v[..end], 0, is_less);
    }
}

fn sift_down<T, F>(v: &mut [T], mut node: usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    loop {
        let mut child = 2 * node + 1;
        if child >= v.len() {
            break;
        }
        if child + 1 < v.len() && is_less(&v[child], &v[child + 1]) {
            child += 1;
        }
        if !is_less(&v[node], &v[child]) {
            break;
        }
        v.swap(node, child);
        node = child;
    }
}
