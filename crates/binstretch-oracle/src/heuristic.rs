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

//! Heuristic feasibility tests.
//!
//! All tests here expect the sizes sorted in decreasing order. They are
//! sound: a conclusive answer is always correct, an inconclusive one falls
//! through to the exact tier.

use crate::trivial::{TestOutcome, next_fit_bins};
use binstretch_core::num::numeric::StretchNumeric;
use binstretch_model::{configuration::BinConfiguration, item::Item};

/// Counts the items larger than half the capacity and the items of exactly
/// half the capacity.
#[inline]
pub fn count_big_and_half<T>(sizes: &[T], capacity: T) -> (usize, usize)
where
    T: StretchNumeric,
{
    sizes.iter().fold((0, 0), |(big, half), &s| {
        let doubled = s.saturating_mul_val(T::TWO);
        if doubled > capacity {
            (big + 1, half)
        } else if doubled == capacity {
            (big, half + 1)
        } else {
            (big, half)
        }
    })
}

/// Packs every size into the bin with the least remaining capacity that
/// still fits it, re-ordering the bins before each item.
///
/// Returns `false` as soon as an item fits nowhere. The bins keep whatever
/// was placed so far; callers clean them before reuse.
pub fn first_fit<T>(sizes: &[T], bins: &mut BinConfiguration<T>) -> bool
where
    T: StretchNumeric,
{
    for &size in sizes {
        let item = Item::new(size);
        let target = bins
            .order_by_remaining()
            .into_iter()
            .find(|&b| bins.bin(b).fits(item));
        match target {
            Some(b) => {
                bins.bin_mut(b).force_add(item);
            }
            None => return false,
        }
    }
    true
}

/// Runs the heuristic tier on sizes sorted in decreasing order.
///
/// * The `k`-th and `k+1`-th largest items cannot share a bin: infeasible.
/// * A next-fit pass in decreasing order fits: feasible.
/// * Items above half the capacity need a bin each, exact halves pair up:
///   if `2 * big + half > 2 * k` the instance is infeasible.
/// * A first-fit packing succeeds: feasible.
pub fn heuristic_test<T>(sorted_desc: &[T], num_bins: usize, capacity: T) -> TestOutcome
where
    T: StretchNumeric,
{
    debug_assert!(
        sorted_desc.windows(2).all(|w| w[0] >= w[1]),
        "called `heuristic_test` with unsorted sizes"
    );

    if sorted_desc.len() <= num_bins {
        return Some(true);
    }
    if num_bins == 0 {
        return Some(false);
    }
    if sorted_desc[num_bins - 1].saturating_add_val(sorted_desc[num_bins]) > capacity {
        return Some(false);
    }
    if next_fit_bins(sorted_desc, capacity) <= num_bins {
        return Some(true);
    }
    let (big, half) = count_big_and_half(sorted_desc, capacity);
    if 2 * big + half > 2 * num_bins {
        return Some(false);
    }

    let mut bins = BinConfiguration::new(num_bins, capacity);
    if first_fit(sorted_desc, &mut bins) {
        return Some(true);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_big_and_half() {
        assert_eq!(count_big_and_half(&[7i64, 6, 5, 5, 4], 10), (2, 2));
        assert_eq!(count_big_and_half(&[3i64, 3], 7), (0, 0));
    }

    #[test]
    fn test_pair_test_detects_infeasibility() {
        // The second and third largest cannot share a bin.
        assert_eq!(heuristic_test(&[6i64, 6, 6, 1], 2, 10), Some(false));
    }

    #[test]
    fn test_decreasing_next_fit_proves_feasibility() {
        assert_eq!(heuristic_test(&[5i64, 5, 3, 2], 2, 10), Some(true));
    }

    #[test]
    fn test_big_item_pigeonhole() {
        // Three halves and one big item need at least three bins.
        assert_eq!(heuristic_test(&[6i64, 5, 5, 5], 2, 10), Some(false));
    }

    #[test]
    fn test_first_fit_finds_packing_next_fit_misses() {
        // Next-fit closes the bin holding 4 too early.
        let sizes = [4i64, 3, 2, 1];
        assert!(next_fit_bins(&sizes, 5) > 2);
        assert_eq!(heuristic_test(&sizes, 2, 5), Some(true));
    }

    #[test]
    fn test_first_fit_prefers_tightest_bin() {
        let mut bins = BinConfiguration::new(2, 10i64);
        assert!(first_fit(&[6, 3, 4], &mut bins));
        // 3 joins the tighter bin, 4 no longer fits there.
        assert_eq!(bins.used_snapshot(), vec![9, 4]);
    }

    #[test]
    fn test_first_fit_reports_failure() {
        let mut bins = BinConfiguration::new(2, 10i64);
        assert!(!first_fit(&[6, 6, 6], &mut bins));
    }

    #[test]
    fn test_hard_instance_is_inconclusive() {
        // Two bins of 10 with {4,4,3,3,3,3}: next-fit and first-fit both fail,
        // {4,3,3} {4,3,3} packs.
        assert_eq!(heuristic_test(&[4i64, 4, 3, 3, 3, 3], 2, 10), None);
    }
}
