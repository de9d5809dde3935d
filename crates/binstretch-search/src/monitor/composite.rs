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

//! Monitoring combinators for the adversary search
//!
//! Provides `CompositeMonitor`, a fan‑out monitor that forwards every event
//! to its children in insertion order. This lets logging and tree recording
//! run side by side without coupling them to the search.

use crate::{
    monitor::adversary_monitor::{AdversaryMonitor, CutReason},
    stats::SearchStatistics,
};
use binstretch_core::num::numeric::StretchNumeric;
use binstretch_model::{
    configuration::BinConfiguration, index::BinIndex, weights::WeightUniverse,
};

/// A monitor that aggregates multiple monitors and forwards events to all of them.
pub struct CompositeMonitor<'a, T>
where
    T: StretchNumeric,
{
    monitors: Vec<Box<dyn AdversaryMonitor<T> + 'a>>,
}

impl<'a, T> Default for CompositeMonitor<'a, T>
where
    T: StretchNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> CompositeMonitor<'a, T>
where
    T: StretchNumeric,
{
    /// Creates a new empty `CompositeMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeMonitor` with room for `capacity` monitors.
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a new monitor.
    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: AdversaryMonitor<T> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a boxed monitor.
    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn AdversaryMonitor<T> + 'a>) {
        self.monitors.push(monitor);
    }

    /// Returns the monitors in insertion order.
    #[inline(always)]
    pub fn monitors(&self) -> &[Box<dyn AdversaryMonitor<T> + 'a>] {
        &self.monitors
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a, T> FromIterator<Box<dyn AdversaryMonitor<T> + 'a>> for CompositeMonitor<'a, T>
where
    T: StretchNumeric,
{
    #[inline(always)]
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn AdversaryMonitor<T> + 'a>>,
    {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> AdversaryMonitor<T> for CompositeMonitor<'a, T>
where
    T: StretchNumeric,
{
    #[inline(always)]
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    #[inline(always)]
    fn on_enter_search(
        &mut self,
        root: &BinConfiguration<T>,
        weights: &WeightUniverse<T>,
        statistics: &SearchStatistics,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(root, weights, statistics);
        }
    }

    #[inline(always)]
    fn on_exit_search(&mut self, root: &BinConfiguration<T>, value: T, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search(root, value, statistics);
        }
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
        for monitor in &mut self.monitors {
            monitor.on_node(config, lower, upper, depth, statistics);
        }
    }

    #[inline(always)]
    fn on_cut(&mut self, reason: CutReason<T>, value: T, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_cut(reason, value, statistics);
        }
    }

    #[inline(always)]
    fn on_memo_hit(&mut self, value: T, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_memo_hit(value, statistics);
        }
    }

    #[inline(always)]
    fn on_descend(
        &mut self,
        config: &BinConfiguration<T>,
        weight: T,
        bin: BinIndex,
        statistics: &SearchStatistics,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_descend(config, weight, bin, statistics);
        }
    }

    #[inline(always)]
    fn on_backtrack(&mut self, value: T, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_backtrack(value, statistics);
        }
    }

    #[inline(always)]
    fn on_weight_evaluated(
        &mut self,
        weight: T,
        value: T,
        improved: bool,
        statistics: &SearchStatistics,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_weight_evaluated(weight, value, improved, statistics);
        }
    }
}
