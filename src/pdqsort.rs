// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Pattern-defeating quicksort.
//!
//! Quicksort tuned for the inputs a LiDAR pipeline actually sees: already
//! sorted frames, nearly sorted frames and frames with long runs of equal
//! keys. On top of a plain quicksort it
//!
//! 1. picks the pivot as a median of three (or a ninther on long slices) and
//!    uses the number of swaps that took as a sortedness hint,
//! 2. tries a bounded insertion sort when the slice looks sorted, which
//!    finishes sorted input in one linear pass,
//! 3. partitions out elements equal to the previous pivot in one step,
//! 4. shuffles a few elements after an unbalanced partition to break
//!    adversarial patterns, and
//! 5. falls back to heapsort after `log₂(n)` unbalanced partitions.

use crate::sort::{heapsort, insertion_sort, shift_head, shift_tail};
use std::cmp;

/// Slices up to this length are insertion sorted.
const INSERTION_THRESHOLD: usize = 20;
/// From this length on the pivot is a ninther (median of medians).
const NINTHER_THRESHOLD: usize = 50;
/// Swaps in [`choose_pivot`] at which the slice is assumed descending.
const MAX_PIVOT_SWAPS: usize = 4 * 3;
/// Out-of-order pairs [`partial_insertion_sort`] will fix before giving up.
const MAX_PARTIAL_STEPS: usize = 5;
/// Below this length [`partial_insertion_sort`] never shifts.
const SHORTEST_SHIFTING: usize = 50;

/// Sort `v` in place with the strict less-than predicate `is_less`.
pub fn pdqsort<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    if v.len() < 2 {
        return;
    }

    let limit = usize::BITS - v.len().leading_zeros();
    recurse(v, is_less, None, limit);
}

/// Sort `v`, where `pred` (if any) is the pivot that bounds `v` from below.
fn recurse<'a, T, F>(
    mut v: &'a mut [T],
    is_less: &mut F,
    mut pred: Option<&'a T>,
    mut limit: u32,
) where
    F: FnMut(&T, &T) -> bool,
{
    let mut was_balanced = true;
    let mut was_partitioned = true;

    loop {
        let len = v.len();

        if len <= INSERTION_THRESHOLD {
            insertion_sort(v, is_less);
            return;
        }

        if limit == 0 {
            heapsort(v, is_less);
            return;
        }

        if !was_balanced {
            break_patterns(v);
            limit -= 1;
        }

        let (pivot, likely_sorted) = choose_pivot(v, is_less);

        // The last partition was clean and the pivot looked sorted: try to
        // finish with a few shifts.
        if was_balanced && was_partitioned && likely_sorted && partial_insertion_sort(v, is_less) {
            return;
        }

        // Everything here is >= pred. A pivot equal to pred means a run of
        // equal elements, which can be split off in one pass.
        if let Some(p) = pred {
            if !is_less(p, &v[pivot]) {
                let mid = partition_equal(v, pivot, is_less);
                v = &mut v[mid..];
                continue;
            }
        }

        let (mid, partitioned) = partition(v, pivot, is_less);
        was_balanced = cmp::min(mid, len - mid) >= len / 8;
        was_partitioned = partitioned;

        let (left, right) = v.split_at_mut(mid);
        let (pivot, right) = right.split_at_mut(1);
        let pivot = &pivot[0];

        // Recurse into the shorter side to bound stack depth.
        if left.len() < right.len() {
            recurse(left, is_less, pred, limit);
            v = right;
            pred = Some(pivot);
        } else {
            recurse(right, is_less, Some(pivot), limit);
            v = left;
        }
    }
}

/// Partition `v` around `v[pivot]`: elements less than the pivot go left.
///
/// Returns the final pivot index and whether the slice was already
/// partitioned.
fn partition<T, F>(v: &mut [T], pivot: usize, is_less: &mut F) -> (usize, bool)
where
    F: FnMut(&T, &T) -> bool,
{
    v.swap(0, pivot);
    let (head, rest) = v.split_at_mut(1);
    let pivot = &head[0];

    let mut l = 0;
    let mut r = rest.len();

    // Skip the prefix and suffix that are already on the right side.
    while l < r && is_less(&rest[l], pivot) {
        l += 1;
    }
    while l < r && !is_less(&rest[r - 1], pivot) {
        r -= 1;
    }
    let was_partitioned = l >= r;

    loop {
        while l < r && is_less(&rest[l], pivot) {
            l += 1;
        }
        while l < r && !is_less(&rest[r - 1], pivot) {
            r -= 1;
        }
        if l >= r {
            break;
        }
        r -= 1;
        rest.swap(l, r);
        l += 1;
    }

    // rest[..r] < pivot <= rest[r..]
    v.swap(0, r);
    (r, was_partitioned)
}

/// Move every element equal to `v[pivot]` to the front, assuming none is
/// less than it. Returns how many there are, pivot included.
fn partition_equal<T, F>(v: &mut [T], pivot: usize, is_less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    v.swap(0, pivot);
    let (head, rest) = v.split_at_mut(1);
    let pivot = &head[0];

    let mut l = 0;
    let mut r = rest.len();
    loop {
        while l < r && !is_less(pivot, &rest[l]) {
            l += 1;
        }
        while l < r && is_less(pivot, &rest[r - 1]) {
            r -= 1;
        }
        if l >= r {
            break;
        }
        r -= 1;
        rest.swap(l, r);
        l += 1;
    }

    l + 1
}

/// Insertion sort that gives up after [`MAX_PARTIAL_STEPS`] out-of-order
/// pairs. Returns true if the slice ended up sorted.
fn partial_insertion_sort<T, F>(v: &mut [T], is_less: &mut F) -> bool
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    let mut i = 1;

    for _ in 0..MAX_PARTIAL_STEPS {
        while i < len && !is_less(&v[i], &v[i - 1]) {
            i += 1;
        }

        if i == len {
            return true;
        }
        if len < SHORTEST_SHIFTING {
            return false;
        }

        v.swap(i - 1, i);
        if i >= 2 {
            shift_tail(&mut v[..i], is_less);
            shift_head(&mut v[i..], is_less);
        }
    }

    false
}

/// Swap three elements near the middle with pseudo-random positions.
fn break_patterns<T>(v: &mut [T]) {
    let len = v.len();
    if len < 8 {
        return;
    }

    // xorshift64, seeded from the length so runs are reproducible.
    let mut random = len as u64;
    let mut next = || {
        random ^= random << 13;
        random ^= random >> 7;
        random ^= random << 17;
        random as usize
    };

    let modulus = len.next_power_of_two();
    let pos = len / 4 * 2;
    for i in 0..3 {
        let mut other = next() & (modulus - 1);
        if other >= len {
            other -= len;
        }
        v.swap(pos - 1 + i, other);
    }
}

/// Pick a pivot index. The flag is true when the sample was already in
/// order, hinting that the slice may be sorted.
///
/// A sample that needed the maximum number of swaps looks descending, so the
/// slice is reversed and the hint is raised.
fn choose_pivot<T, F>(v: &mut [T], is_less: &mut F) -> (usize, bool)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    let mut a = len / 4;
    let mut b = len / 4 * 2;
    let mut c = len / 4 * 3;
    let mut swaps = 0;

    if len >= 8 {
        if len >= NINTHER_THRESHOLD {
            sort_adjacent(v, &mut a, &mut swaps, is_less);
            sort_adjacent(v, &mut b, &mut swaps, is_less);
            sort_adjacent(v, &mut c, &mut swaps, is_less);
        }
        sort3(v, &mut a, &mut b, &mut c, &mut swaps, is_less);
    }

    if swaps < MAX_PIVOT_SWAPS {
        (b, swaps == 0)
    } else {
        v.reverse();
        (len - 1 - b, true)
    }
}

/// Order two sample indices by the elements they point at.
fn sort2<T, F>(v: &[T], a: &mut usize, b: &mut usize, swaps: &mut usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    if is_less(&v[*b], &v[*a]) {
        std::mem::swap(a, b);
        *swaps += 1;
    }
}

/// Order three sample indices; `b` ends up at the median.
fn sort3<T, F>(
    v: &[T],
    a: &mut usize,
    b: &mut usize,
    c: &mut usize,
    swaps: &mut usize,
    is_less: &mut F,
) where
    F: FnMut(&T, &T) -> bool,
{
    sort2(v, a, b, swaps, is_less);
    sort2(v, b, c, swaps, is_less);
    sort2(v, a, b, swaps, is_less);
}

/// Replace `a` with the median of `v[a - 1]`, `v[a]` and `v[a + 1]`.
fn sort_adjacent<T, F>(v: &[T], a: &mut usize, swaps: &mut usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let mut lo = *a - 1;
    let mut hi = *a + 1;
    sort3(v, &mut lo, a, &mut hi, swaps, is_less);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::tests::patterns;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_pdqsort_patterns() {
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        for input in patterns(&mut rng) {
            let mut expected = input.clone();
            expected.sort();
            let mut v = input;
            pdqsort(&mut v, &mut |a, b| a < b);
            assert_eq!(v, expected);
        }
    }

    #[test]
    fn test_sorted_input_is_linear() {
        let mut v: Vec<u32> = (0..10_000).collect();
        let mut comparisons = 0usize;
        pdqsort(&mut v, &mut |a, b| {
            comparisons += 1;
            a < b
        });
        assert_eq!(v, (0..10_000).collect::<Vec<_>>());
        // Pivot sampling plus one partial insertion pass.
        assert!(comparisons < 2 * 10_000, "{} comparisons", comparisons);
    }

    #[test]
    fn test_descending_input_is_reversed() {
        let mut v: Vec<u32> = (0..10_000).rev().collect();
        let mut comparisons = 0usize;
        pdqsort(&mut v, &mut |a, b| {
            comparisons += 1;
            a < b
        });
        assert_eq!(v, (0..10_000).collect::<Vec<_>>());
        assert!(comparisons < 2 * 10_000, "{} comparisons", comparisons);
    }

    #[test]
    fn test_partition() {
        let mut v = vec![5, 9, 1, 7, 3, 8, 2, 6, 4, 0];
        let (mid, partitioned) = partition(&mut v, 0, &mut |a, b| a < b);
        assert_eq!(v[mid], 5);
        assert!(v[..mid].iter().all(|&x| x < 5));
        assert!(v[mid + 1..].iter().all(|&x| x >= 5));
        assert!(!partitioned);

        let mut v = vec![3, 1, 2, 0, 4, 6, 5];
        let (mid, partitioned) = partition(&mut v, 0, &mut |a, b| a < b);
        assert_eq!(mid, 3);
        assert!(partitioned);
    }

    #[test]
    fn test_partition_equal() {
        let mut v = vec![4, 7, 4, 9, 4, 4, 5];
        let n = partition_equal(&mut v, 0, &mut |a, b| a < b);
        assert_eq!(n, 4);
        assert!(v[..n].iter().all(|&x| x == 4));
        assert!(v[n..].iter().all(|&x| x > 4));
    }

    #[test]
    fn test_break_patterns_permutes() {
        let mut v: Vec<u32> = (0..100).collect();
        break_patterns(&mut v);
        assert_ne!(v, (0..100).collect::<Vec<_>>());
        v.sort_unstable();
        assert_eq!(v, (0..100).collect::<Vec<_>>());
    }
}
