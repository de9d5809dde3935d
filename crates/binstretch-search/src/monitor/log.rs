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

use crate::{
    monitor::adversary_monitor::{AdversaryMonitor, CutReason},
    stats::SearchStatistics,
};
use binstretch_core::num::numeric::StretchNumeric;
use binstretch_model::{
    configuration::BinConfiguration, index::BinIndex, weights::WeightUniverse,
};
use std::time::{Duration, Instant};

/// Periodically reports search progress through the `log` facade.
///
/// The clock is only read on nodes whose count matches `clock_check_mask`,
/// so the monitor stays cheap on the hot path.
#[derive(Debug, Clone)]
pub struct LogMonitor<T>
where
    T: StretchNumeric,
{
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    depth: u64,
    root_best: Option<(T, T)>,
}

impl<T> LogMonitor<T>
where
    T: StretchNumeric,
{
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            depth: 0,
            root_best: None,
        }
    }

    #[inline(always)]
    fn log_header(&self) {
        log::info!(
            "{:<9} | {:<14} | {:<7} | {:<12} | {:<12} | {:<10} | {:<10}",
            "Elapsed",
            "Nodes",
            "Depth",
            "Root Best",
            "Memo Hits",
            "Cuts",
            "Oracle"
        );
        log::info!("{}", "-".repeat(90));
    }

    #[inline(always)]
    fn log_line(&mut self, depth: u64, stats: &SearchStatistics) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();

        let root_best = match self.root_best {
            Some((weight, value)) => format!("{} (w={})", value, weight),
            None => "-".to_string(),
        };

        log::info!(
            "{:<9} | {:<14} | {:<7} | {:<12} | {:<12} | {:<10} | {:<10}",
            format!("{:.1}s", elapsed),
            stats.nodes_explored,
            depth,
            root_best,
            stats.memo_hits,
            stats.total_cuts(),
            stats.oracle.calls
        );

        self.last_log_time = now;
    }
}

impl<T> Default for LogMonitor<T>
where
    T: StretchNumeric,
{
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl<T> std::fmt::Display for LogMonitor<T>
where
    T: StretchNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl<T> AdversaryMonitor<T> for LogMonitor<T>
where
    T: StretchNumeric,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(
        &mut self,
        root: &BinConfiguration<T>,
        weights: &WeightUniverse<T>,
        _statistics: &SearchStatistics,
    ) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.depth = 0;
        self.root_best = None;
        log::info!(
            "Searching {} bins of capacity {} with {} weights",
            root.num_bins(),
            root.capacity(),
            weights.len()
        );
        self.log_header();
    }

    fn on_exit_search(&mut self, _root: &BinConfiguration<T>, value: T, stats: &SearchStatistics) {
        log::info!("{}", "-".repeat(90));
        log::info!(
            "Search finished: value {} after {} nodes in {:.2?}",
            value,
            stats.nodes_explored,
            self.start_time.elapsed()
        );
    }

    fn on_node(
        &mut self,
        _config: &BinConfiguration<T>,
        _lower: T,
        _upper: T,
        depth: u64,
        stats: &SearchStatistics,
    ) {
        if (stats.nodes_explored & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(depth, stats);
        }
    }

    fn on_cut(&mut self, _reason: CutReason<T>, _value: T, _stats: &SearchStatistics) {}

    fn on_memo_hit(&mut self, _value: T, _stats: &SearchStatistics) {}

    fn on_descend(
        &mut self,
        _config: &BinConfiguration<T>,
        _weight: T,
        _bin: BinIndex,
        _stats: &SearchStatistics,
    ) {
        self.depth += 1;
    }

    fn on_backtrack(&mut self, _value: T, _stats: &SearchStatistics) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn on_weight_evaluated(&mut self, weight: T, value: T, improved: bool, _stats: &SearchStatistics) {
        if improved && self.depth == 0 {
            self.root_best = Some((weight, value));
            log::debug!("Root improved to {} by offering {}", value, weight);
        }
    }
}
