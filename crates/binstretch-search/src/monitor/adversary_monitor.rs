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

//! Adversary search monitoring interface
//!
//! Declares the `AdversaryMonitor` trait and `CutReason`.
//!
//! Lifecycle highlights
//! - enter → node → {cut | memo hit | descend … backtrack | weight evaluated} → exit
//! - Every `descend` is matched by exactly one `backtrack`, in LIFO order.
//!   A memoized child produces `descend`, `memo hit`, `backtrack` and no `node`.
//! - If a feasibility check fails, every open `descend` is still closed by a
//!   `backtrack` carrying the child's upper bound, and `exit` is not called.
//! - `SearchStatistics` is provided to every callback for telemetry.
//!
//! Design notes
//! - Methods take `&mut self`; monitors are assumed single‑threaded.
//! - Monitors observe only; they cannot steer or stop the search.

use crate::stats::SearchStatistics;
use binstretch_core::num::numeric::StretchNumeric;
use binstretch_model::{
    configuration::BinConfiguration, index::BinIndex, weights::WeightUniverse,
};

/// Why a node was resolved without branching.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CutReason<T> {
    /// The window `(lower, upper)` was empty on entry.
    EmptyWindow,
    /// The fullest bin already reached the ceiling.
    MaxUsedCeiling,
    /// Even the remaining budget in the emptiest bin cannot beat the floor.
    CannotImprove,
    /// Offering `weight` reaches the ceiling whatever bin it goes to.
    WeightForcesCeiling { weight: T },
}

impl<T> std::fmt::Display for CutReason<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CutReason::EmptyWindow => write!(f, "LB >= UB"),
            CutReason::MaxUsedCeiling => write!(f, "Wmax >= UB"),
            CutReason::CannotImprove => write!(f, "Cannot improve"),
            CutReason::WeightForcesCeiling { weight } => write!(f, "Wmin + {} >= UB", weight),
        }
    }
}

/// Trait for observing the adversary search.
pub trait AdversaryMonitor<T>
where
    T: StretchNumeric,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called once before the root is searched.
    fn on_enter_search(
        &mut self,
        root: &BinConfiguration<T>,
        weights: &WeightUniverse<T>,
        statistics: &SearchStatistics,
    );
    /// Called once after the root returned, with the configuration restored.
    fn on_exit_search(&mut self, root: &BinConfiguration<T>, value: T, statistics: &SearchStatistics);
    /// Called when `branch` starts on a configuration with window `(lower, upper)`.
    fn on_node(
        &mut self,
        config: &BinConfiguration<T>,
        lower: T,
        upper: T,
        depth: u64,
        statistics: &SearchStatistics,
    );
    /// Called when a node is resolved by a cut, with the value it returns.
    fn on_cut(&mut self, reason: CutReason<T>, value: T, statistics: &SearchStatistics);
    /// Called when a child is answered by the memo table.
    fn on_memo_hit(&mut self, value: T, statistics: &SearchStatistics);
    /// Called after `weight` was placed into `bin`, before the child is searched.
    fn on_descend(
        &mut self,
        config: &BinConfiguration<T>,
        weight: T,
        bin: BinIndex,
        statistics: &SearchStatistics,
    );
    /// Called when a child returned `value` and its placement was undone.
    /// When the child failed, `value` is the upper bound it was searched with.
    fn on_backtrack(&mut self, value: T, statistics: &SearchStatistics);
    /// Called when every relevant placement of `weight` was tried.
    /// `improved` is set when the weight became the adversary's best choice.
    fn on_weight_evaluated(
        &mut self,
        weight: T,
        value: T,
        improved: bool,
        statistics: &SearchStatistics,
    );
}

impl<T, M> AdversaryMonitor<T> for &mut M
where
    T: StretchNumeric,
    M: AdversaryMonitor<T> + ?Sized,
{
    #[inline(always)]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline(always)]
    fn on_enter_search(
        &mut self,
        root: &BinConfiguration<T>,
        weights: &WeightUniverse<T>,
        statistics: &SearchStatistics,
    ) {
        (**self).on_enter_search(root, weights, statistics)
    }

    #[inline(always)]
    fn on_exit_search(&mut self, root: &BinConfiguration<T>, value: T, statistics: &SearchStatistics) {
        (**self).on_exit_search(root, value, statistics)
    }

    #[inline(always)]
    fn on_node(
        &mut self,
        config: &BinConfiguration<T>,
        lower: T,
        upper: T,
        depth: u64,
        statistics: &SearchStatistics,
    ) {
        (**self).on_node(config, lower, upper, depth, statistics)
    }

    #[inline(always)]
    fn on_cut(&mut self, reason: CutReason<T>, value: T, statistics: &SearchStatistics) {
        (**self).on_cut(reason, value, statistics)
    }

    #[inline(always)]
    fn on_memo_hit(&mut self, value: T, statistics: &SearchStatistics) {
        (**self).on_memo_hit(value, statistics)
    }

    #[inline(always)]
    fn on_descend(
        &mut self,
        config: &BinConfiguration<T>,
        weight: T,
        bin: BinIndex,
        statistics: &SearchStatistics,
    ) {
        (**self).on_descend(config, weight, bin, statistics)
    }

    #[inline(always)]
    fn on_backtrack(&mut self, value: T, statistics: &SearchStatistics) {
        (**self).on_backtrack(value, statistics)
    }

    #[inline(always)]
    fn on_weight_evaluated(
        &mut self,
        weight: T,
        value: T,
        improved: bool,
        statistics: &SearchStatistics,
    ) {
        (**self).on_weight_evaluated(weight, value, improved, statistics)
    }
}

impl<T> std::fmt::Debug for dyn AdversaryMonitor<T>
where
    T: StretchNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AdversaryMonitor({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn AdversaryMonitor<T>
where
    T: StretchNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AdversaryMonitor({})", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cut_reason_labels() {
        assert_eq!(CutReason::<i64>::EmptyWindow.to_string(), "LB >= UB");
        assert_eq!(CutReason::<i64>::MaxUsedCeiling.to_string(), "Wmax >= UB");
        assert_eq!(CutReason::<i64>::CannotImprove.to_string(), "Cannot improve");
        assert_eq!(
            CutReason::WeightForcesCeiling { weight: 7i64 }.to_string(),
            "Wmin + 7 >= UB"
        );
    }
}
