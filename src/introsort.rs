// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Introspective sort.
//!
//! Quicksort with a median-of-three pivot, switching to heapsort once the
//! recursion exceeds `2·log₂(n)` levels. Partitions at or below
//! [`INSERTION_THRESHOLD`] elements are left for a single insertion-sort pass
//! over the whole slice at the end.

use crate::sort::{heapsort, insertion_sort};

/// Partitions this short are finished by the final insertion sort.
const INSERTION_THRESHOLD: usize = 16;

/// Sort `v` in place with the strict less-than predicate `is_less`.
pub fn introsort<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    if len < 2 {
        return;
    }

    let depth_limit = 2 * len.ilog2();
    introsort_loop(v, is_less, depth_limit);
    insertion_sort(v, is_less);
}

fn introsort_loop<T, F>(mut v: &mut [T], is_less: &mut F, mut depth_limit: u32)
where
    F: FnMut(&T, &T) -> bool,
{
    while v.len() > INSERTION_THRESHOLD {
        if depth_limit == 0 {
            heapsort(v, is_less);
            return;
        }
        depth_limit -= 1;

        let mid = partition(v, is_less);
        let (left, right) = v.split_at_mut(mid);
        let right = &mut right[1..];

        // Recurse into the shorter side to bound stack depth.
        if left.len() < right.len() {
            introsort_loop(left, is_less, depth_limit);
            v = right;
        } else {
            introsort_loop(right, is_less, depth_limit);
            v = left;
        }
    }
}

/// Order `v[a] <= v[b] <= v[c]` by swapping.
fn sort3<T, F>(v: &mut [T], a: usize, b: usize, c: usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    if is_less(&v[b], &v[a]) {
        v.swap(a, b);
    }
    if is_less(&v[c], &v[b]) {
        v.swap(b, c);
    }
    if is_less(&v[b], &v[a]) {
        v.swap(a, b);
    }
}

/// Hoare partition around the median of the first, middle and last elements.
///
/// Returns the final pivot index `p`: nothing in `v[..p]` is greater than
/// the pivot and nothing in `v[p + 1..]` is less. Elements equal to the pivot
/// stop both scans, so runs of equal values split evenly.
fn partition<T, F>(v: &mut [T], is_less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    sort3(v, 0, len / 2, len - 1, is_less);
    v.swap(0, len / 2);

    let (head, rest) = v.split_at_mut(1);
    let pivot = &head[0];

    let mut l = 0;
    let mut r = rest.len();
    loop {
        while l < r && is_less(&rest[l], pivot) {
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

    // rest[..r] <= pivot <= rest[r..]
    v.swap(0, r);
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::tests::patterns;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_introsort_patterns() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        for input in patterns(&mut rng) {
            let mut expected = input.clone();
            expected.sort();
            let mut v = input;
            introsort(&mut v, &mut |a, b| a < b);
            assert_eq!(v, expected);
        }
    }

    #[test]
    fn test_partition_invariant() {
        let mut v: Vec<i32> = vec![9, 3, 7, 1, 8, 2, 6, 4, 5, 0, 5, 5, 11, -3, 4, 4, 10, 12];
        let p = partition(&mut v, &mut |a, b| a < b);
        let pivot = v[p];
        assert!(v[..p].iter().all(|&x| x <= pivot), "{:?} at {}", v, p);
        assert!(v[p + 1..].iter().all(|&x| x >= pivot), "{:?} at {}", v, p);
    }

    #[test]
    fn test_heapsort_fallback() {
        // A zero depth limit goes straight to heapsort.
        let mut v: Vec<i32> = (0..200).rev().collect();
        introsort_loop(&mut v, &mut |a, b| a < b, 0);
        assert_eq!(v, (0..200).collect::<Vec<_>>());
    }
}
