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

use binstretch_core::num::ops::saturating_arithmetic::SaturatingAddVal;
use binstretch_oracle::stats::OracleStatistics;
use std::time::Duration;

/// Statistics collected during an adversary search run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Total `branch` invocations.
    pub nodes_explored: u64,
    /// The deepest level reached in the tree.
    pub max_depth: u64,
    /// Memo lookups that answered the query.
    pub memo_hits: u64,
    /// Memo lookups that did not.
    pub memo_misses: u64,
    /// Results written to the memo table.
    pub memo_stores: u64,
    /// Nodes entered with `lower >= upper`.
    pub cuts_empty_window: u64,
    /// Nodes whose fullest bin already reached the ceiling.
    pub cuts_max_used: u64,
    /// Nodes that could not beat the floor even with every remaining item
    /// in the emptiest bin.
    pub cuts_cannot_improve: u64,
    /// Nodes where a single weight forced the ceiling on every bin.
    pub cuts_weight_forces_ceiling: u64,
    /// Weights rejected because the configuration could not absorb them.
    pub infeasible_weights: u64,
    /// Bins skipped because a bin with the same remaining capacity was tried.
    pub symmetric_skips: u64,
    /// Total time spent in the search.
    pub time_total: Duration,
    /// Statistics of the feasibility oracle used by the run.
    pub oracle: OracleStatistics,
}

impl SearchStatistics {
    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add_val(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn on_memo_hit(&mut self) {
        self.memo_hits = self.memo_hits.saturating_add_val(1);
    }

    #[inline]
    pub fn on_memo_miss(&mut self) {
        self.memo_misses = self.memo_misses.saturating_add_val(1);
    }

    #[inline]
    pub fn on_memo_store(&mut self) {
        self.memo_stores = self.memo_stores.saturating_add_val(1);
    }

    #[inline]
    pub fn on_cut_empty_window(&mut self) {
        self.cuts_empty_window = self.cuts_empty_window.saturating_add_val(1);
    }

    #[inline]
    pub fn on_cut_max_used(&mut self) {
        self.cuts_max_used = self.cuts_max_used.saturating_add_val(1);
    }

    #[inline]
    pub fn on_cut_cannot_improve(&mut self) {
        self.cuts_cannot_improve = self.cuts_cannot_improve.saturating_add_val(1);
    }

    #[inline]
    pub fn on_cut_weight_forces_ceiling(&mut self) {
        self.cuts_weight_forces_ceiling = self.cuts_weight_forces_ceiling.saturating_add_val(1);
    }

    #[inline]
    pub fn on_infeasible_weight(&mut self) {
        self.infeasible_weights = self.infeasible_weights.saturating_add_val(1);
    }

    #[inline]
    pub fn on_symmetric_skip(&mut self) {
        self.symmetric_skips = self.symmetric_skips.saturating_add_val(1);
    }

    /// Returns the total number of cuts of any kind.
    #[inline]
    pub fn total_cuts(&self) -> u64 {
        self.cuts_empty_window
            .saturating_add(self.cuts_max_used)
            .saturating_add(self.cuts_cannot_improve)
            .saturating_add(self.cuts_weight_forces_ceiling)
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    #[inline]
    pub fn set_oracle_statistics(&mut self, oracle: OracleStatistics) {
        self.oracle = oracle;
    }
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Adversary Search Statistics:")?;
        writeln!(f, "  Nodes explored:       {}", self.nodes_explored)?;
        writeln!(f, "  Max depth reached:    {}", self.max_depth)?;
        writeln!(f, "  Memo hits:            {}", self.memo_hits)?;
        writeln!(f, "  Memo misses:          {}", self.memo_misses)?;
        writeln!(f, "  Memo stores:          {}", self.memo_stores)?;
        writeln!(f, "  Cuts (LB >= UB):      {}", self.cuts_empty_window)?;
        writeln!(f, "  Cuts (Wmax >= UB):    {}", self.cuts_max_used)?;
        writeln!(f, "  Cuts (cannot improve):{}", self.cuts_cannot_improve)?;
        writeln!(f, "  Cuts (Wmin + w >= UB):{}", self.cuts_weight_forces_ceiling)?;
        writeln!(f, "  Infeasible weights:   {}", self.infeasible_weights)?;
        writeln!(f, "  Symmetric skips:      {}", self.symmetric_skips)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        write!(f, "{}", self.oracle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_keeps_maximum() {
        let mut stats = SearchStatistics::default();
        stats.on_depth_update(3);
        stats.on_depth_update(1);
        assert_eq!(stats.max_depth, 3);
    }

    #[test]
    fn test_total_cuts_sums_reasons() {
        let mut stats = SearchStatistics::default();
        stats.on_cut_empty_window();
        stats.on_cut_max_used();
        stats.on_cut_cannot_improve();
        stats.on_cut_cannot_improve();
        stats.on_cut_weight_forces_ceiling();
        assert_eq!(stats.total_cuts(), 5);
    }

    #[test]
    fn test_display_includes_oracle_section() {
        let text = SearchStatistics::default().to_string();
        assert!(text.contains("Adversary Search Statistics:"));
        assert!(text.contains("Feasibility Oracle Statistics:"));
    }
}
