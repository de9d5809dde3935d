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
use std::time::Duration;

/// Statistics collected by a `FeasibilityOracle`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OracleStatistics {
    /// Total feasibility queries.
    pub calls: u64,
    /// Queries answered by the trivial tier.
    pub trivial_resolutions: u64,
    /// Queries answered from the cache.
    pub cache_hits: u64,
    /// Queries answered by the heuristic tier.
    pub heuristic_resolutions: u64,
    /// Queries proven infeasible while building the exact model.
    pub model_resolutions: u64,
    /// Queries handed to the exact backend.
    pub exact_calls: u64,
    /// Time spent inside the exact backend.
    pub time_exact: Duration,
    /// Time spent inside the oracle overall.
    pub time_total: Duration,
}

impl OracleStatistics {
    #[inline]
    pub fn on_call(&mut self) {
        self.calls = self.calls.saturating_add_val(1);
    }

    #[inline]
    pub fn on_trivial_resolution(&mut self) {
        self.trivial_resolutions = self.trivial_resolutions.saturating_add_val(1);
    }

    #[inline]
    pub fn on_cache_hit(&mut self) {
        self.cache_hits = self.cache_hits.saturating_add_val(1);
    }

    #[inline]
    pub fn on_heuristic_resolution(&mut self) {
        self.heuristic_resolutions = self.heuristic_resolutions.saturating_add_val(1);
    }

    #[inline]
    pub fn on_model_resolution(&mut self) {
        self.model_resolutions = self.model_resolutions.saturating_add_val(1);
    }

    /// Records a backend call and the time it took.
    #[inline]
    pub fn on_exact_call(&mut self, elapsed: Duration) {
        self.exact_calls = self.exact_calls.saturating_add_val(1);
        self.time_exact = self.time_exact.saturating_add(elapsed);
    }

    #[inline]
    pub fn add_total_time(&mut self, elapsed: Duration) {
        self.time_total = self.time_total.saturating_add(elapsed);
    }
}

impl std::fmt::Display for OracleStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Feasibility Oracle Statistics:")?;
        writeln!(f, "  Calls:                {}", self.calls)?;
        writeln!(f, "  Trivial resolutions:  {}", self.trivial_resolutions)?;
        writeln!(f, "  Cache hits:           {}", self.cache_hits)?;
        writeln!(f, "  Heuristic resolutions:{}", self.heuristic_resolutions)?;
        writeln!(f, "  Model resolutions:    {}", self.model_resolutions)?;
        writeln!(f, "  Exact calls:          {}", self.exact_calls)?;
        writeln!(f, "  Time (exact):         {:.2?}", self.time_exact)?;
        writeln!(f, "  Time (total):         {:.2?}", self.time_total)?;
        Ok(())
    }
}
