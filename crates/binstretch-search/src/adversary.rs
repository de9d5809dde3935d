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

//! # Adversary search
//!
//! Computes the largest load an adversary can force in online bin
//! stretching. The adversary offers items one at a time from a fixed weight
//! universe; the decision maker places each item irrevocably into one of
//! `num_bins` bins. Every offered sequence must stay packable into
//! `num_bins` bins of `capacity` offline, which the feasibility oracle
//! decides. The decision maker may over-fill a bin, and the largest load it
//! is forced into, divided by `capacity`, is the stretching factor.
//!
//! ## Algorithm
//!
//! A depth-first minimax search with a window `(lower, upper)`: results at
//! or below `lower` and at or above `upper` are irrelevant to the caller.
//! A node is resolved without branching when the window is empty, when the
//! fullest bin already reaches `upper`, when even the emptiest bin plus the
//! whole remaining budget cannot beat `lower`, or when some legal weight
//! pushes even the emptiest bin to `upper`. Otherwise the adversary tries
//! every weight in decreasing order and the decision maker answers with
//! every bin, by increasing remaining capacity, skipping bins with the same
//! remaining capacity as the previous one. The decision maker's window
//! tightens to the best answer found so far; the adversary's floor rises to
//! its best weight so far.
//!
//! Children are answered through a `MemoTable` keyed by the canonical
//! configuration. The one live `BinConfiguration` is mutated through
//! `Placement` guards, so every placement is undone before the next one.

use crate::{
    error::SearchError,
    memo::{MemoPolicy, MemoTable},
    monitor::adversary_monitor::{AdversaryMonitor, CutReason},
    placement::Placement,
    result::StretchOutcome,
    stats::SearchStatistics,
};
use binstretch_core::num::numeric::StretchNumeric;
use binstretch_model::{configuration::BinConfiguration, item::Item, weights::WeightUniverse};
use binstretch_oracle::{backend::FeasibilityBackend, oracle::FeasibilityOracle};
use std::time::Instant;

/// The adversary search engine.
///
/// Holds only configuration; every call to `run` creates a fresh search
/// session with its own memo table and oracle cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdversarySolver<T> {
    memo_policy: MemoPolicy,
    ceiling: Option<T>,
}

impl<T> Default for AdversarySolver<T>
where
    T: StretchNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AdversarySolver<T>
where
    T: StretchNumeric,
{
    /// Creates a solver with the default memo policy and a ceiling of
    /// twice the capacity.
    #[inline]
    pub fn new() -> Self {
        Self {
            memo_policy: MemoPolicy::default(),
            ceiling: None,
        }
    }

    #[inline]
    pub fn with_memo_policy(mut self, policy: MemoPolicy) -> Self {
        self.memo_policy = policy;
        self
    }

    /// Sets the initial upper end of the search window. Values at or above
    /// it are reported as reached but not refined.
    #[inline]
    pub fn with_ceiling(mut self, ceiling: T) -> Self {
        self.ceiling = Some(ceiling);
        self
    }

    #[inline]
    pub fn memo_policy(&self) -> MemoPolicy {
        self.memo_policy
    }

    #[inline]
    pub fn ceiling(&self) -> Option<T> {
        self.ceiling
    }

    /// Searches the game on `num_bins` empty bins of `capacity`, with the
    /// adversary offering items from `weights`.
    ///
    /// Weights outside `1..=capacity` are ignored. `lower_bound` defaults to
    /// `capacity`. The returned value is never below the lower bound.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::InvalidInstance` if `capacity` is not positive
    /// or the total capacity or default ceiling overflows `T`, and
    /// `SearchError::Oracle` if an exact feasibility check fails.
    ///
    /// # Panics
    ///
    /// Panics if `num_bins` is zero.
    pub fn run<B, M>(
        &mut self,
        weights: &[T],
        num_bins: usize,
        capacity: T,
        lower_bound: Option<T>,
        backend: B,
        mut monitor: M,
    ) -> Result<StretchOutcome<T>, SearchError>
    where
        B: FeasibilityBackend<T>,
        M: AdversaryMonitor<T>,
    {
        assert!(
            num_bins > 0,
            "called `AdversarySolver::run` with no bins"
        );
        if capacity <= T::ZERO {
            return Err(SearchError::InvalidInstance(format!(
                "capacity must be positive, got {}",
                capacity
            )));
        }

        let mut config = BinConfiguration::new(num_bins, capacity);
        let budget = config.total_capacity().ok_or_else(|| {
            SearchError::InvalidInstance(format!(
                "total capacity of {} bins of size {} overflows",
                num_bins, capacity
            ))
        })?;
        let ceiling = match self.ceiling {
            Some(ceiling) => ceiling,
            None => capacity.checked_mul_val(T::TWO).ok_or_else(|| {
                SearchError::InvalidInstance(format!(
                    "default ceiling of capacity {} overflows",
                    capacity
                ))
            })?,
        };
        let lower = lower_bound.unwrap_or(capacity);

        let universe = WeightUniverse::new(capacity, weights.iter().copied());
        let session = AdversarySearchSession::new(universe, backend, self.memo_policy, &mut monitor);
        session.run(&mut config, budget, lower, ceiling)
    }
}

/// A single search run. Owns the oracle, the memo table and the
/// statistics, and is dropped when the run ends.
struct AdversarySearchSession<'a, T, B, M>
where
    T: StretchNumeric,
{
    weights: WeightUniverse<T>,
    oracle: FeasibilityOracle<T, B>,
    memo: MemoTable<T>,
    monitor: &'a mut M,
    statistics: SearchStatistics,
    depth: u64,
    first_weight: Option<T>,
    start_time: Instant,
}

impl<T, B, M> std::fmt::Debug for AdversarySearchSession<'_, T, B, M>
where
    T: StretchNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdversarySearchSession")
            .field("weights", &self.weights)
            .field("memo_entries", &self.memo.len())
            .field("depth", &self.depth)
            .field("first_weight", &self.first_weight)
            .field("statistics", &self.statistics)
            .finish()
    }
}

impl<'a, T, B, M> AdversarySearchSession<'a, T, B, M>
where
    T: StretchNumeric,
    B: FeasibilityBackend<T>,
    M: AdversaryMonitor<T>,
{
    #[inline]
    fn new(weights: WeightUniverse<T>, backend: B, policy: MemoPolicy, monitor: &'a mut M) -> Self {
        Self {
            weights,
            oracle: FeasibilityOracle::new(backend),
            memo: MemoTable::new(policy),
            monitor,
            statistics: SearchStatistics::default(),
            depth: 0,
            first_weight: None,
            start_time: Instant::now(),
        }
    }

    /// Searches the root. The root itself is not memoized.
    fn run(
        mut self,
        root: &mut BinConfiguration<T>,
        budget: T,
        lower: T,
        ceiling: T,
    ) -> Result<StretchOutcome<T>, SearchError> {
        self.monitor
            .on_enter_search(root, &self.weights, &self.statistics);

        let value = self.branch(root, budget, lower, ceiling)?;
        debug_assert_eq!(root.num_items(), 0, "root configuration not restored");

        if value >= ceiling {
            log::warn!(
                "Search reached the ceiling {}; the value {} is only a lower bound",
                ceiling,
                value
            );
        }

        self.statistics.set_total_time(self.start_time.elapsed());
        self.statistics
            .set_oracle_statistics(self.oracle.statistics().clone());
        self.monitor.on_exit_search(root, value, &self.statistics);

        Ok(StretchOutcome::new(
            value,
            root.capacity(),
            root.num_bins(),
            (lower, ceiling),
            self.first_weight,
            self.statistics,
        ))
    }

    /// Answers a child through the memo table, searching it on a miss.
    fn solve(
        &mut self,
        config: &mut BinConfiguration<T>,
        budget: T,
        lower: T,
        upper: T,
    ) -> Result<T, SearchError> {
        let key = config.canonical_key();
        if let Some(value) = self.memo.recall(&key, lower, upper) {
            self.statistics.on_memo_hit();
            self.monitor.on_memo_hit(value, &self.statistics);
            return Ok(value);
        }
        self.statistics.on_memo_miss();

        let value = self.branch(config, budget, lower, upper)?;
        if self.memo.store(key, lower, upper, value) {
            self.statistics.on_memo_store();
        }
        Ok(value)
    }

    #[inline]
    fn cut(&mut self, reason: CutReason<T>, value: T) -> T {
        match reason {
            CutReason::EmptyWindow => self.statistics.on_cut_empty_window(),
            CutReason::MaxUsedCeiling => self.statistics.on_cut_max_used(),
            CutReason::CannotImprove => self.statistics.on_cut_cannot_improve(),
            CutReason::WeightForcesCeiling { .. } => {
                self.statistics.on_cut_weight_forces_ceiling()
            }
        }
        self.monitor.on_cut(reason, value, &self.statistics);
        value
    }

    #[inline]
    fn record_first_weight(&mut self, weight: T) {
        if self.depth == 0 {
            self.first_weight = Some(weight);
        }
    }

    /// Returns the largest load the adversary can force from `config`,
    /// given that `budget` capacity is left to offer. The result is at
    /// least `lower`, and exact only if it lies strictly inside
    /// `(lower, upper)`.
    fn branch(
        &mut self,
        config: &mut BinConfiguration<T>,
        budget: T,
        lower: T,
        upper: T,
    ) -> Result<T, SearchError> {
        self.statistics.on_node_explored();
        self.monitor
            .on_node(config, lower, upper, self.depth, &self.statistics);

        let Some((min_used, max_used)) = config.used_range() else {
            panic!("called `AdversarySearchSession::branch` with no bins");
        };
        debug_assert!(
            budget >= T::ZERO,
            "negative remaining budget {} in search",
            budget
        );

        if lower >= upper {
            return Ok(self.cut(CutReason::EmptyWindow, lower));
        }

        let lower = lower.max(max_used);
        if max_used >= upper {
            return Ok(self.cut(CutReason::MaxUsedCeiling, max_used));
        }
        if min_used.saturating_add_val(budget) <= lower {
            return Ok(self.cut(CutReason::CannotImprove, lower));
        }

        let order = config.order_by_remaining();
        let mut best = lower;
        let mut feasibility_verified = false;

        for index in 0..self.weights.len() {
            let weight = self.weights.weights()[index];
            if weight > budget {
                continue;
            }
            let item = Item::new(weight);

            // Weights are tried in decreasing order, so once one weight fits
            // every smaller one fits as well.
            if !feasibility_verified {
                if !self.oracle.is_feasible_with(config, item)? {
                    self.statistics.on_infeasible_weight();
                    continue;
                }
                feasibility_verified = true;
            }

            let forced = min_used.saturating_add_val(weight);
            if forced >= upper {
                self.record_first_weight(weight);
                return Ok(self.cut(CutReason::WeightForcesCeiling { weight }, forced));
            }

            let mut stretch = upper;
            let mut previous_remaining = None;
            for &bin in &order {
                let remaining = config.bin(bin).remaining();
                if previous_remaining == Some(remaining) {
                    self.statistics.on_symmetric_skip();
                    continue;
                }
                previous_remaining = Some(remaining);

                let result = {
                    let mut placed = Placement::new(config, bin, item);
                    self.monitor
                        .on_descend(&placed, weight, bin, &self.statistics);
                    self.depth += 1;
                    self.statistics.on_depth_update(self.depth);
                    let result = self.solve(&mut placed, budget - weight, best, stretch);
                    self.depth -= 1;
                    result
                };
                let value = match result {
                    Ok(value) => value,
                    Err(error) => {
                        // Unwind the monitor with the bound known so far.
                        self.monitor.on_backtrack(stretch, &self.statistics);
                        return Err(error);
                    }
                };
                self.monitor.on_backtrack(value, &self.statistics);

                stretch = stretch.min(value);
                if stretch <= best {
                    break;
                }
            }

            if stretch >= upper {
                self.record_first_weight(weight);
                self.monitor
                    .on_weight_evaluated(weight, stretch, true, &self.statistics);
                return Ok(stretch);
            }

            let improved = stretch > best;
            if improved {
                best = stretch;
                self.record_first_weight(weight);
            }
            self.monitor
                .on_weight_evaluated(weight, stretch, improved, &self.statistics);
        }

        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::{no_op::NoOperationMonitor, tree::TreeRecorder};
    use binstretch_model::index::BinIndex;
    use binstretch_oracle::{
        backend::{BackendError, Verdict, search::SearchBackend},
        model::PackingModel,
    };

    fn range(capacity: i64) -> Vec<i64> {
        (1..=capacity).collect()
    }

    fn solve(
        policy: MemoPolicy,
        capacity: i64,
        num_bins: usize,
        lower_bound: Option<i64>,
    ) -> StretchOutcome<i64> {
        AdversarySolver::new()
            .with_memo_policy(policy)
            .run(
                &range(capacity),
                num_bins,
                capacity,
                lower_bound,
                SearchBackend::new(),
                NoOperationMonitor::new(),
            )
            .expect("search should succeed")
    }

    /// Checks that every placement is undone and that the event stream is
    /// well nested.
    #[derive(Default)]
    struct NestingCheck {
        root_items: u64,
        open: i64,
        max_open: i64,
        memo_hits: u64,
        items_on_exit: Option<usize>,
        value_on_exit: Option<i64>,
    }

    impl AdversaryMonitor<i64> for NestingCheck {
        fn name(&self) -> &str {
            "NestingCheck"
        }

        fn on_enter_search(
            &mut self,
            root: &BinConfiguration<i64>,
            _weights: &WeightUniverse<i64>,
            _statistics: &SearchStatistics,
        ) {
            assert_eq!(root.num_items(), 0);
        }

        fn on_exit_search(
            &mut self,
            root: &BinConfiguration<i64>,
            value: i64,
            _statistics: &SearchStatistics,
        ) {
            self.items_on_exit = Some(root.num_items());
            self.value_on_exit = Some(value);
        }

        fn on_node(
            &mut self,
            config: &BinConfiguration<i64>,
            _lower: i64,
            _upper: i64,
            depth: u64,
            _statistics: &SearchStatistics,
        ) {
            assert_eq!(config.num_items() as u64, self.root_items + depth);
            assert_eq!(depth as i64, self.open);
        }

        fn on_cut(&mut self, _reason: CutReason<i64>, _value: i64, _statistics: &SearchStatistics) {}

        fn on_memo_hit(&mut self, _value: i64, _statistics: &SearchStatistics) {
            self.memo_hits += 1;
        }

        fn on_descend(
            &mut self,
            config: &BinConfiguration<i64>,
            weight: i64,
            bin: BinIndex,
            _statistics: &SearchStatistics,
        ) {
            assert_eq!(config.bin(bin).items().last().map(|i| i.size()), Some(weight));
            self.open += 1;
            self.max_open = self.max_open.max(self.open);
        }

        fn on_backtrack(&mut self, _value: i64, _statistics: &SearchStatistics) {
            self.open -= 1;
            assert!(self.open >= 0);
        }

        fn on_weight_evaluated(
            &mut self,
            _weight: i64,
            _value: i64,
            _improved: bool,
            _statistics: &SearchStatistics,
        ) {
        }
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
    fn test_single_bin_cannot_be_stretched() {
        let outcome = solve(MemoPolicy::Overwrite, 5, 1, None);
        assert_eq!(outcome.value(), 5);
        assert!(!outcome.improved());
        assert_eq!(outcome.first_weight(), None);
    }

    #[test]
    fn test_two_bins_capacity_two_cannot_be_stretched() {
        let outcome = solve(MemoPolicy::Overwrite, 2, 2, None);
        assert_eq!(outcome.value(), 2);
        assert!(!outcome.improved());
    }

    #[test]
    fn test_two_bins_capacity_three_forces_four_thirds() {
        let outcome = solve(MemoPolicy::Overwrite, 3, 2, None);
        assert_eq!(outcome.value(), 4);
        assert!(outcome.improved());
        assert!(outcome.first_weight().is_some());
        assert!((outcome.stretching_factor() - 4.0 / 3.0).abs() < 1e-12);
        assert!(!outcome.reached_ceiling());
    }

    #[test]
    fn test_three_bins_capacity_ten_from_four_thirds() {
        let outcome = solve(MemoPolicy::Overwrite, 10, 3, Some(13));
        assert_eq!(outcome.value(), 13);
        assert!(!outcome.improved());
        assert_eq!(solve(MemoPolicy::Merge, 10, 3, Some(13)).value(), 13);
        assert!(outcome.statistics().nodes_explored > 0);
        assert!(outcome.statistics().oracle.calls > 0);
    }

    #[test]
    fn test_memo_policies_agree() {
        for &(capacity, num_bins) in &[(3, 2), (4, 2), (5, 2), (3, 3), (4, 3)] {
            let overwrite = solve(MemoPolicy::Overwrite, capacity, num_bins, None);
            let merge = solve(MemoPolicy::Merge, capacity, num_bins, None);
            let disabled = solve(MemoPolicy::Disabled, capacity, num_bins, None);
            assert_eq!(
                overwrite.value(),
                disabled.value(),
                "overwrite differs for C={capacity}, k={num_bins}"
            );
            assert_eq!(
                merge.value(),
                disabled.value(),
                "merge differs for C={capacity}, k={num_bins}"
            );
            assert_eq!(disabled.statistics().memo_hits, 0);
            assert_eq!(disabled.statistics().memo_stores, 0);
        }
    }

    #[test]
    fn test_value_never_below_lower_bound() {
        let free = solve(MemoPolicy::Overwrite, 4, 2, None);
        for lower in 0..=8 {
            let outcome = solve(MemoPolicy::Overwrite, 4, 2, Some(lower));
            assert!(outcome.value() >= lower);
            if lower >= 4 && lower < free.value() {
                assert_eq!(outcome.value(), free.value());
            }
        }
    }

    #[test]
    fn test_lower_bound_at_ceiling_is_an_empty_window() {
        let outcome = solve(MemoPolicy::Overwrite, 3, 2, Some(6));
        assert_eq!(outcome.value(), 6);
        assert_eq!(outcome.statistics().nodes_explored, 1);
        assert_eq!(outcome.statistics().cuts_empty_window, 1);
        assert!(outcome.reached_ceiling());
    }

    #[test]
    fn test_low_ceiling_is_reported() {
        let outcome = AdversarySolver::new()
            .with_ceiling(4)
            .run(
                &range(3),
                2,
                3,
                None,
                SearchBackend::new(),
                NoOperationMonitor::new(),
            )
            .expect("search should succeed");
        assert!(outcome.value() >= 4);
        assert!(outcome.reached_ceiling());
    }

    #[test]
    fn test_weights_outside_capacity_are_ignored() {
        let outcome = AdversarySolver::new()
            .run(
                &[-1, 0, 1, 2, 3, 7, 3],
                2,
                3,
                None,
                SearchBackend::new(),
                NoOperationMonitor::new(),
            )
            .expect("search should succeed");
        assert_eq!(outcome.value(), 4);
    }

    #[test]
    fn test_configuration_restored_and_events_nested() {
        let mut check = NestingCheck::default();
        let outcome = AdversarySolver::new()
            .run(
                &range(4),
                2,
                4,
                None,
                SearchBackend::new(),
                &mut check,
            )
            .expect("search should succeed");
        assert_eq!(check.open, 0);
        assert!(check.max_open > 0);
        assert_eq!(check.items_on_exit, Some(0));
        assert_eq!(check.value_on_exit, Some(outcome.value()));
        assert_eq!(check.memo_hits, outcome.statistics().memo_hits);
        assert_eq!(check.max_open as u64, outcome.statistics().max_depth);
    }

    #[test]
    fn test_backend_failure_closes_open_descents() {
        // Bins {3,3,3} and {4}. The root check is settled by next fit, then
        // offering 4 into the second bin leaves {3,3,3} {4,4} whose check for
        // a 3 needs the exact backend.
        let mut config = BinConfiguration::new(2, 10i64);
        for size in [3, 3, 3] {
            config.bin_mut(BinIndex::new(0)).force_add(Item::new(size));
        }
        config.bin_mut(BinIndex::new(1)).force_add(Item::new(4));

        let mut check = NestingCheck {
            root_items: 4,
            ..NestingCheck::default()
        };
        let universe = WeightUniverse::new(10, [3, 4]);
        let mut session =
            AdversarySearchSession::new(universe, FailingBackend, MemoPolicy::Disabled, &mut check);
        let result = session.branch(&mut config, 7, 10, 20);
        assert!(matches!(result, Err(SearchError::Oracle(_))));
        assert_eq!(session.depth, 0);
        drop(session);

        assert_eq!(check.open, 0);
        assert_eq!(check.max_open, 1);
        assert_eq!(config.num_items(), 4);
        assert_eq!(config.used_snapshot(), vec![9, 4]);
    }

    #[test]
    fn test_tree_recorder_captures_search() {
        let mut recorder = TreeRecorder::new();
        let outcome = AdversarySolver::new()
            .run(
                &range(3),
                2,
                3,
                None,
                SearchBackend::new(),
                &mut recorder,
            )
            .expect("search should succeed");
        assert!(recorder.len() > 1);
        assert_eq!(recorder.nodes()[0].value, Some(outcome.value()));
        let dot = recorder.to_dot();
        assert!(dot.contains("Name: Root"));
        assert!(dot.contains("->"));
    }

    #[test]
    fn test_non_positive_capacity_is_invalid() {
        let result = AdversarySolver::new().run(
            &[1, 2],
            2,
            0i64,
            None,
            SearchBackend::new(),
            NoOperationMonitor::new(),
        );
        assert!(matches!(result, Err(SearchError::InvalidInstance(_))));
    }

    #[test]
    fn test_overflowing_capacity_is_invalid() {
        let result = AdversarySolver::new().run(
            &[1],
            3,
            i8::MAX,
            None,
            SearchBackend::new(),
            NoOperationMonitor::new(),
        );
        assert!(matches!(result, Err(SearchError::InvalidInstance(_))));
    }

    #[test]
    fn test_bin_count_beyond_size_type_is_invalid() {
        let result = AdversarySolver::new().run(
            &[1i8],
            200,
            1i8,
            None,
            SearchBackend::new(),
            NoOperationMonitor::new(),
        );
        assert!(matches!(result, Err(SearchError::InvalidInstance(_))));
    }

    #[test]
    #[should_panic(expected = "called `AdversarySolver::run` with no bins")]
    fn test_zero_bins_panics() {
        let _ = AdversarySolver::new().run(
            &[1, 2],
            0,
            3i64,
            None,
            SearchBackend::new(),
            NoOperationMonitor::new(),
        );
    }
}
