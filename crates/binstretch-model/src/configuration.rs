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

//! Bin configurations and their canonical keys.
//!
//! A `BinConfiguration` is the ordered set of bins the search mutates in
//! place. Bin identity never matters for the game: two configurations are
//! equivalent when they have the same multiset of remaining capacities and
//! the same multiset of placed item sizes. `ConfigurationKey` encodes exactly
//! that and is what memoization tables hash.

use crate::{bin::Bin, index::BinIndex, item::Item};
use binstretch_core::num::numeric::StretchNumeric;
use smallvec::SmallVec;

/// The bins at one point of the search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinConfiguration<T> {
    bins: Vec<Bin<T>>,
    capacity: T,
}

impl<T> BinConfiguration<T>
where
    T: StretchNumeric,
{
    /// Creates `num_bins` empty bins of the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is not strictly positive.
    pub fn new(num_bins: usize, capacity: T) -> Self {
        assert!(
            capacity > T::ZERO,
            "called `BinConfiguration::new` with a non-positive capacity: {}",
            capacity
        );
        Self {
            bins: (0..num_bins).map(|_| Bin::new(capacity)).collect(),
            capacity,
        }
    }

    /// Returns the number of bins.
    #[inline]
    pub fn num_bins(&self) -> usize {
        self.bins.len()
    }

    /// Returns `true` if the configuration has no bins at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Returns the common nominal capacity of the bins.
    #[inline]
    pub fn capacity(&self) -> T {
        self.capacity
    }

    /// Returns the bins in their storage order.
    #[inline]
    pub fn bins(&self) -> &[Bin<T>] {
        &self.bins
    }

    /// Returns the bin at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn bin(&self, index: BinIndex) -> &Bin<T> {
        let i = index.get();
        assert!(
            i < self.num_bins(),
            "called `BinConfiguration::bin` with bin index out of bounds: the len is {} but the index is {}",
            self.num_bins(),
            i
        );
        &self.bins[i]
    }

    /// Returns the bin at `index` mutably.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn bin_mut(&mut self, index: BinIndex) -> &mut Bin<T> {
        let i = index.get();
        assert!(
            i < self.num_bins(),
            "called `BinConfiguration::bin_mut` with bin index out of bounds: the len is {} but the index is {}",
            self.num_bins(),
            i
        );
        &mut self.bins[i]
    }

    /// Returns the smallest used capacity over all bins, `None` without bins.
    #[inline]
    pub fn min_used(&self) -> Option<T> {
        self.bins.iter().map(Bin::used).min()
    }

    /// Returns the largest used capacity over all bins, `None` without bins.
    #[inline]
    pub fn max_used(&self) -> Option<T> {
        self.bins.iter().map(Bin::used).max()
    }

    /// Returns `(min_used, max_used)` in a single pass, `None` without bins.
    pub fn used_range(&self) -> Option<(T, T)> {
        let mut iter = self.bins.iter().map(Bin::used);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), u| (lo.min(u), hi.max(u))))
    }

    /// Returns the total size placed over all bins.
    #[inline]
    pub fn total_used(&self) -> T {
        self.bins
            .iter()
            .fold(T::ZERO, |acc, b| acc.saturating_add_val(b.used()))
    }

    /// Returns `num_bins * capacity`, `None` on overflow or when the bin
    /// count does not fit `T`.
    #[inline]
    pub fn total_capacity(&self) -> Option<T> {
        T::from_usize(self.num_bins())?.checked_mul_val(self.capacity)
    }

    /// Returns the capacity budget still available to the adversary, i.e.
    /// `num_bins * capacity - total_used`. `None` on overflow.
    #[inline]
    pub fn remaining_budget(&self) -> Option<T> {
        self.total_capacity()?.checked_sub_val(self.total_used())
    }

    /// Returns the number of items placed over all bins.
    #[inline]
    pub fn num_items(&self) -> usize {
        self.bins.iter().map(Bin::len).sum()
    }

    /// Iterates over every placed item, bin by bin.
    #[inline]
    pub fn items(&self) -> impl Iterator<Item = &Item<T>> + '_ {
        self.bins.iter().flat_map(|b| b.items().iter())
    }

    /// Returns the bin indices ordered by increasing remaining capacity.
    /// Ties keep their storage order.
    pub fn order_by_remaining(&self) -> SmallVec<[BinIndex; 8]> {
        let mut order: SmallVec<[BinIndex; 8]> = BinIndex::range(self.num_bins()).collect();
        order.sort_by_key(|&i| self.bins[i.get()].remaining());
        order
    }

    /// Returns the used capacity of each bin in storage order.
    #[inline]
    pub fn used_snapshot(&self) -> Vec<T> {
        self.bins.iter().map(Bin::used).collect()
    }

    /// Empties every bin, keeping allocations.
    #[inline]
    pub fn clean(&mut self) {
        for bin in &mut self.bins {
            bin.clean();
        }
    }

    /// Builds the order-independent key of this configuration.
    pub fn canonical_key(&self) -> ConfigurationKey<T> {
        let mut remaining: SmallVec<[T; 8]> = self.bins.iter().map(Bin::remaining).collect();
        remaining.sort_unstable();

        let mut sizes: SmallVec<[T; 32]> = self.items().map(Item::size).collect();
        sizes.sort_unstable();

        ConfigurationKey {
            remaining,
            item_counts: run_lengths(&sizes),
        }
    }
}

impl<T> std::fmt::Display for BinConfiguration<T>
where
    T: StretchNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, bin) in self.bins.iter().enumerate() {
            writeln!(f, "{}: {}", BinIndex::new(i), bin)?;
        }
        Ok(())
    }
}

/// Run-length encodes a sorted slice into `(value, multiplicity)` pairs.
pub(crate) fn run_lengths<T>(sorted: &[T]) -> SmallVec<[(T, u32); 16]>
where
    T: Copy + PartialEq,
{
    let mut out: SmallVec<[(T, u32); 16]> = SmallVec::new();
    for &value in sorted {
        match out.last_mut() {
            Some((last, count)) if *last == value => *count += 1,
            _ => out.push((value, 1)),
        }
    }
    out
}

/// Canonical, order-independent encoding of a `BinConfiguration`.
///
/// Holds the sorted multiset of remaining capacities followed by the
/// `(size, multiplicity)` pairs of every placed item, sorted by size.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConfigurationKey<T> {
    remaining: SmallVec<[T; 8]>,
    item_counts: SmallVec<[(T, u32); 16]>,
}

impl<T> ConfigurationKey<T> {
    /// Returns the sorted remaining capacities.
    #[inline]
    pub fn remaining(&self) -> &[T] {
        &self.remaining
    }

    /// Returns the `(size, multiplicity)` pairs, sorted by size.
    #[inline]
    pub fn item_counts(&self) -> &[(T, u32)] {
        &self.item_counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(config: &mut BinConfiguration<i64>, bin: usize, size: i64) {
        config.bin_mut(BinIndex::new(bin)).force_add(Item::new(size));
    }

    #[test]
    fn test_new_configuration_is_empty() {
        let config = BinConfiguration::new(3, 10i64);
        assert_eq!(config.num_bins(), 3);
        assert_eq!(config.num_items(), 0);
        assert_eq!(config.used_range(), Some((0, 0)));
        assert_eq!(config.remaining_budget(), Some(30));
    }

    #[test]
    fn test_used_range_and_budget_track_placements() {
        let mut config = BinConfiguration::new(3, 10i64);
        place(&mut config, 0, 4);
        place(&mut config, 2, 7);
        place(&mut config, 2, 1);
        assert_eq!(config.min_used(), Some(0));
        assert_eq!(config.max_used(), Some(8));
        assert_eq!(config.used_range(), Some((0, 8)));
        assert_eq!(config.total_used(), 12);
        assert_eq!(config.remaining_budget(), Some(18));
        assert_eq!(config.used_snapshot(), vec![4, 0, 8]);
    }

    #[test]
    fn test_empty_configuration_has_no_range() {
        let config = BinConfiguration::<i64>::new(0, 5);
        assert!(config.is_empty());
        assert_eq!(config.used_range(), None);
        assert_eq!(config.min_used(), None);
    }

    #[test]
    fn test_total_capacity_overflow_is_none() {
        let config = BinConfiguration::new(2, 100i8);
        assert_eq!(config.total_capacity(), None);
        assert_eq!(config.remaining_budget(), None);

        // 200 bins do not fit `i8` at all.
        let config = BinConfiguration::new(200, 1i8);
        assert_eq!(config.total_capacity(), None);
        assert_eq!(config.remaining_budget(), None);
    }

    #[test]
    fn test_order_by_remaining_is_increasing_and_stable() {
        let mut config = BinConfiguration::new(4, 10i64);
        place(&mut config, 1, 3);
        place(&mut config, 3, 6);
        let order: Vec<usize> = config.order_by_remaining().iter().map(|i| i.get()).collect();
        assert_eq!(order, vec![3, 1, 0, 2]);
    }

    #[test]
    fn test_canonical_key_ignores_bin_and_placement_order() {
        let mut a = BinConfiguration::new(3, 10i64);
        place(&mut a, 0, 4);
        place(&mut a, 0, 2);
        place(&mut a, 1, 5);

        let mut b = BinConfiguration::new(3, 10i64);
        place(&mut b, 2, 5);
        place(&mut b, 1, 2);
        place(&mut b, 1, 4);

        assert_eq!(a.canonical_key(), b.canonical_key());
    }

    #[test]
    fn test_canonical_key_distinguishes_item_multisets() {
        // Same remaining capacities, different items.
        let mut a = BinConfiguration::new(2, 10i64);
        place(&mut a, 0, 6);

        let mut b = BinConfiguration::new(2, 10i64);
        place(&mut b, 0, 3);
        place(&mut b, 0, 3);

        assert_eq!(a.canonical_key().remaining(), b.canonical_key().remaining());
        assert_ne!(a.canonical_key(), b.canonical_key());
        assert_eq!(b.canonical_key().item_counts(), &[(3, 2)]);
    }

    #[test]
    fn test_clean_empties_all_bins() {
        let mut config = BinConfiguration::new(2, 10i64);
        place(&mut config, 0, 6);
        place(&mut config, 1, 9);
        config.clean();
        assert_eq!(config.num_items(), 0);
        assert_eq!(config.total_used(), 0);
    }

    #[test]
    fn test_run_lengths_groups_equal_values() {
        let encoded = run_lengths(&[1, 1, 2, 5, 5, 5]);
        assert_eq!(encoded.as_slice(), &[(1, 2), (2, 1), (5, 3)]);
        assert!(run_lengths::<i64>(&[]).is_empty());
    }
}
