// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Trivial feasibility tests.
//!
//! These run on the items in the order they are given and never sort.
//! They resolve the bulk of the oracle's queries.

use binstretch_core::num::numeric::StretchNumeric;

/// Result of a cheap sound test: `Some(answer)` when conclusive.
pub type TestOutcome = Option<bool>;

/// Counts the bins opened by a single next-fit pass over `sizes`.
///
/// A new bin is opened whenever the current one cannot take the next item.
/// Every size must be in `1..=capacity`.
pub fn next_fit_bins<T>(sizes: &[T], capacity: T) -> usize
where
    T: StretchNumeric,
{
    if sizes.is_empty() {
        return 0;
    }
    let mut opened = 1;
    let mut current = capacity;
    for &size in sizes {
        if current >= size {
            current = current - size;
        } else {
            current = capacity - size;
            opened += 1;
        }
    }
    opened
}

/// Returns `true` if `total` exceeds `num_bins * capacity`.
/// An overflowing product, or a bin count that does not fit `T`, is
/// treated as unbounded room.
#[inline]
pub fn exceeds_total_capacity<T>(total: T, num_bins: usize, capacity: T) -> bool
where
    T: StretchNumeric,
{
    match T::from_usize(num_bins).and_then(|n| n.checked_mul_val(capacity)) {
        Some(room) => total > room,
        None => false,
    }
}

/// Runs the trivial tier.
///
/// * An item larger than the capacity: infeasible.
/// * At most one item per bin: feasible.
/// * A next-fit pass in the given order fits: feasible.
/// * Total size above `num_bins * capacity`: infeasible.
pub fn trivial_test<T>(sizes: &[T], num_bins: usize, capacity: T) -> TestOutcome
where
    T: StretchNumeric,
{
    if sizes.iter().any(|&s| s > capacity) {
        return Some(false);
    }
    if sizes.len() <= num_bins {
        return Some(true);
    }
    if num_bins == 0 {
        return Some(false);
    }
    if next_fit_bins(sizes, capacity) <= num_bins {
        return Some(true);
    }
    let total = sizes
        .iter()
        .fold(T::ZERO, |acc, &s| acc.saturating_add_val(s));
    if exceeds_total_capacity(total, num_bins, capacity) {
        return Some(false);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_fit_counts_bins() {
        assert_eq!(next_fit_bins::<i64>(&[], 10), 0);
        assert_eq!(next_fit_bins(&[5i64, 5, 5], 10), 2);
        assert_eq!(next_fit_bins(&[6i64, 5, 4, 1], 10), 2);
        assert_eq!(next_fit_bins(&[6i64, 5, 6], 10), 3);
    }

    #[test]
    fn test_oversized_item_is_infeasible() {
        assert_eq!(trivial_test(&[11i64], 3, 10), Some(false));
    }

    #[test]
    fn test_one_item_per_bin_is_feasible() {
        assert_eq!(trivial_test(&[10i64, 10, 10], 3, 10), Some(true));
        assert_eq!(trivial_test::<i64>(&[], 0, 10), Some(true));
    }

    #[test]
    fn test_no_bins_with_items_is_infeasible() {
        assert_eq!(trivial_test(&[1i64], 0, 10), Some(false));
    }

    #[test]
    fn test_next_fit_success_is_feasible() {
        assert_eq!(trivial_test(&[3i64, 3, 3, 3], 2, 6), Some(true));
    }

    #[test]
    fn test_total_size_above_capacity_is_infeasible() {
        assert_eq!(trivial_test(&[1i64, 2, 3, 4], 2, 4), Some(false));
    }

    #[test]
    fn test_order_sensitive_instance_is_inconclusive() {
        // Next-fit opens three bins, yet {4,1} {2,3} packs.
        assert_eq!(trivial_test(&[4i64, 2, 1, 3], 2, 5), None);
    }

    #[test]
    fn test_overflowing_room_is_not_infeasible() {
        assert!(!exceeds_total_capacity(i8::MAX, 3, 100i8));
        assert!(exceeds_total_capacity(9i8, 2, 4));
    }

    #[test]
    fn test_bin_count_beyond_size_type_is_unbounded_room() {
        assert!(!exceeds_total_capacity(i8::MAX, 200, 1i8));
        assert!(!exceeds_total_capacity(i8::MAX, usize::MAX, 1i8));
    }
}
