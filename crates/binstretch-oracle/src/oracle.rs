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

//! # Feasibility Oracle
//!
//! `FeasibilityOracle` answers "do these items fit into `k` bins of capacity
//! `C`?" by chaining increasingly expensive tiers, each short-circuiting the
//! next:
//!
//! 1. the trivial tier on the items as given,
//! 2. a cache lookup on the canonical `PackingKey`,
//! 3. the heuristic tier on the items in decreasing order,
//! 4. building the `PackingModel` (its fixings may already overflow the bins),
//! 5. the injected exact `FeasibilityBackend`.
//!
//! Only answers from tiers 3 to 5 are cached; the trivial tier is cheaper
//! than hashing. The cache is never evicted and lives as long as the oracle.

use crate::{
    backend::FeasibilityBackend, error::OracleError, heuristic::heuristic_test, key::PackingKey,
    model::PackingModel, stats::OracleStatistics, trivial::trivial_test,
};
use binstretch_core::num::numeric::StretchNumeric;
use binstretch_model::{configuration::BinConfiguration, item::Item};
use rustc_hash::FxHashMap;
use std::time::Instant;

/// A memoizing bin packing feasibility oracle.
pub struct FeasibilityOracle<T, B> {
    backend: B,
    cache: FxHashMap<PackingKey<T>, bool>,
    statistics: OracleStatistics,
    scratch: Vec<T>,
}

impl<T, B> FeasibilityOracle<T, B>
where
    T: StretchNumeric,
    B: FeasibilityBackend<T>,
{
    /// Creates an oracle with an empty cache around the given backend.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            cache: FxHashMap::default(),
            statistics: OracleStatistics::default(),
            scratch: Vec::new(),
        }
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Consumes the oracle and returns its backend.
    #[inline]
    pub fn into_backend(self) -> B {
        self.backend
    }

    #[inline]
    pub fn statistics(&self) -> &OracleStatistics {
        &self.statistics
    }

    /// Returns the number of cached answers.
    #[inline]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Drops every cached answer.
    #[inline]
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Returns `true` iff `items` can be packed into `num_bins` bins of
    /// `capacity`.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::Backend` if the exact backend fails.
    pub fn is_feasible(
        &mut self,
        items: &[Item<T>],
        num_bins: usize,
        capacity: T,
    ) -> Result<bool, OracleError> {
        let mut sizes = std::mem::take(&mut self.scratch);
        sizes.clear();
        sizes.extend(items.iter().map(Item::size));
        let result = self.decide_timed(&mut sizes, num_bins, capacity);
        self.scratch = sizes;
        result
    }

    /// Returns `true` iff every item already placed in `bins`, plus `item`,
    /// can be packed into as many bins of the configuration's capacity.
    /// A configuration without bins can take nothing.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::Backend` if the exact backend fails.
    pub fn is_feasible_with(
        &mut self,
        bins: &BinConfiguration<T>,
        item: Item<T>,
    ) -> Result<bool, OracleError> {
        if bins.is_empty() {
            return Ok(false);
        }
        let mut sizes = std::mem::take(&mut self.scratch);
        sizes.clear();
        sizes.extend(bins.items().map(Item::size));
        sizes.push(item.size());
        let result = self.decide_timed(&mut sizes, bins.num_bins(), bins.capacity());
        self.scratch = sizes;
        result
    }

    fn decide_timed(
        &mut self,
        sizes: &mut Vec<T>,
        num_bins: usize,
        capacity: T,
    ) -> Result<bool, OracleError> {
        let start = Instant::now();
        self.statistics.on_call();
        let result = self.decide(sizes, num_bins, capacity);
        self.statistics.add_total_time(start.elapsed());
        result
    }

    fn decide(
        &mut self,
        sizes: &mut [T],
        num_bins: usize,
        capacity: T,
    ) -> Result<bool, OracleError> {
        if let Some(answer) = trivial_test(sizes, num_bins, capacity) {
            self.statistics.on_trivial_resolution();
            return Ok(answer);
        }

        sizes.sort_unstable_by(|a, b| b.cmp(a));
        let key = PackingKey::from_sorted(sizes, num_bins, capacity);
        if let Some(&answer) = self.cache.get(&key) {
            self.statistics.on_cache_hit();
            return Ok(answer);
        }

        let answer = self.decide_sorted(sizes, num_bins, capacity)?;
        self.cache.insert(key, answer);
        Ok(answer)
    }

    fn decide_sorted(
        &mut self,
        sorted_desc: &[T],
        num_bins: usize,
        capacity: T,
    ) -> Result<bool, OracleError> {
        if let Some(answer) = heuristic_test(sorted_desc, num_bins, capacity) {
            self.statistics.on_heuristic_resolution();
            return Ok(answer);
        }

        let Some(model) = PackingModel::build(sorted_desc, num_bins, capacity) else {
            self.statistics.on_model_resolution();
            return Ok(false);
        };

        let start = Instant::now();
        let verdict = self.backend.solve(&model)?;
        let elapsed = start.elapsed();
        self.statistics.on_exact_call(elapsed);

        log::debug!(
            "{} backend: {} items in {} bins of {} -> {} ({:.2?})",
            self.backend.name(),
            model.num_items(),
            num_bins,
            capacity,
            verdict,
            elapsed
        );
        Ok(verdict.is_feasible())
    }
}

impl<T, B> std::fmt::Debug for FeasibilityOracle<T, B>
where
    T: StretchNumeric,
    B: FeasibilityBackend<T>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeasibilityOracle")
            .field("backend", &self.backend.name())
            .field("cache_len", &self.cache.len())
            .field("statistics", &self.statistics)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendError, Verdict, search::SearchBackend};
    use binstretch_model::{generator::generate_instance, index::BinIndex};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn items(sizes: &[i64]) -> Vec<Item<i64>> {
        sizes.iter().map(|&s| Item::new(s)).collect()
    }

    fn oracle() -> FeasibilityOracle<i64, SearchBackend> {
        FeasibilityOracle::new(SearchBackend::new())
    }

    /// Tries every assignment of items to bins.
    fn brute_force(sizes: &[i64], num_bins: usize, capacity: i64) -> bool {
        fn go(sizes: &[i64], loads: &mut [i64], capacity: i64) -> bool {
            let Some((&first, rest)) = sizes.split_first() else {
                return true;
            };
            for b in 0..loads.len() {
                if loads[b] + first <= capacity {
                    loads[b] += first;
                    let ok = go(rest, loads, capacity);
                    loads[b] -= first;
                    if ok {
                        return true;
                    }
                }
            }
            false
        }
        go(sizes, &mut vec![0; num_bins], capacity)
    }

    struct FailingBackend;

    impl FeasibilityBackend<i64> for FailingBackend {
        fn name(&self) -> &str {
            "failing"
        }

        fn solve(&mut self, _model: &PackingModel<i64>) -> Result<Verdict, BackendError> {
            Err(BackendError::new("failing", "unavailable"))
        }
    }

    #[test]
    fn test_small_reference_instances() {
        let mut oracle = oracle();
        let four = items(&[1, 2, 3, 4]);
        assert!(!oracle.is_feasible(&four, 2, 4).unwrap());
        assert!(oracle.is_feasible(&four, 2, 5).unwrap());
        assert!(oracle.is_feasible(&four, 3, 4).unwrap());
    }

    #[test]
    fn test_oversized_item_is_rejected() {
        let mut oracle = oracle();
        assert!(!oracle.is_feasible(&items(&[11]), 5, 10).unwrap());
    }

    #[test]
    fn test_hard_instance_reaches_backend_once() {
        let mut oracle = oracle();
        let hard = items(&[4, 4, 3, 3, 3, 3]);
        assert!(oracle.is_feasible(&hard, 2, 10).unwrap());
        assert_eq!(oracle.statistics().exact_calls, 1);
        assert_eq!(oracle.cache_len(), 1);

        // Same multiset, different order: served from the cache.
        let shuffled = items(&[3, 4, 3, 3, 4, 3]);
        assert!(oracle.is_feasible(&shuffled, 2, 10).unwrap());
        assert_eq!(oracle.statistics().exact_calls, 1);
        assert_eq!(oracle.statistics().cache_hits, 1);
        assert_eq!(oracle.statistics().calls, 2);
    }

    #[test]
    fn test_trivial_answers_are_not_cached() {
        let mut oracle = oracle();
        assert!(oracle.is_feasible(&items(&[1, 1]), 2, 10).unwrap());
        assert_eq!(oracle.cache_len(), 0);
        assert_eq!(oracle.statistics().trivial_resolutions, 1);
    }

    #[test]
    fn test_backend_failure_propagates() {
        let mut oracle = FeasibilityOracle::new(FailingBackend);
        let result = oracle.is_feasible(&items(&[4, 4, 3, 3, 3, 3]), 2, 10);
        assert!(matches!(result, Err(OracleError::Backend(_))));
        assert_eq!(oracle.cache_len(), 0);
    }

    #[test]
    fn test_feasible_with_one_more_item() {
        let mut oracle = oracle();
        let mut bins = BinConfiguration::new(2, 10i64);
        bins.bin_mut(BinIndex::new(0)).force_add(Item::new(6));
        bins.bin_mut(BinIndex::new(1)).force_add(Item::new(6));
        assert!(oracle.is_feasible_with(&bins, Item::new(4)).unwrap());
        assert!(!oracle.is_feasible_with(&bins, Item::new(5)).unwrap());
    }

    #[test]
    fn test_feasible_with_ignores_current_placement() {
        // Over-filled bin, but {6,4} {5,5} repacks.
        let mut oracle = oracle();
        let mut bins = BinConfiguration::new(2, 10i64);
        bins.bin_mut(BinIndex::new(0)).force_add(Item::new(6));
        bins.bin_mut(BinIndex::new(0)).force_add(Item::new(5));
        bins.bin_mut(BinIndex::new(1)).force_add(Item::new(5));
        assert!(oracle.is_feasible_with(&bins, Item::new(4)).unwrap());
    }

    #[test]
    fn test_feasible_with_no_bins_is_false() {
        let mut oracle = oracle();
        let bins = BinConfiguration::new(0, 10i64);
        assert!(!oracle.is_feasible_with(&bins, Item::new(1)).unwrap());
    }

    #[test]
    fn test_generated_instances_are_feasible() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let mut oracle = oracle();
        for _ in 0..200 {
            let num_bins = rng.random_range(1..=4);
            let full = rng.random_bool(0.5);
            let instance = generate_instance(num_bins, 12i64, full, &mut rng);
            assert!(oracle.is_feasible(&instance.items, num_bins, 12).unwrap());
        }
    }

    #[test]
    fn test_matches_brute_force_on_random_instances() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut oracle = oracle();
        for _ in 0..400 {
            let num_bins = rng.random_range(1..=3);
            let capacity = rng.random_range(4..=12i64);
            let n = rng.random_range(0..=7);
            let sizes: Vec<i64> = (0..n).map(|_| rng.random_range(1..=capacity)).collect();
            assert_eq!(
                oracle.is_feasible(&items(&sizes), num_bins, capacity).unwrap(),
                brute_force(&sizes, num_bins, capacity),
                "{:?} in {} bins of {}",
                sizes,
                num_bins,
                capacity
            );
        }
    }

    #[test]
    fn test_monotone_in_bins_and_capacity() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut oracle = oracle();
        for _ in 0..200 {
            let num_bins = rng.random_range(1..=3);
            let capacity = rng.random_range(4..=10i64);
            let n = rng.random_range(1..=7);
            let packed = items(
                &(0..n)
                    .map(|_| rng.random_range(1..=capacity))
                    .collect::<Vec<i64>>(),
            );
            if oracle.is_feasible(&packed, num_bins, capacity).unwrap() {
                assert!(oracle.is_feasible(&packed, num_bins + 1, capacity).unwrap());
                assert!(oracle.is_feasible(&packed, num_bins, capacity + 1).unwrap());
            }
        }
    }
}
