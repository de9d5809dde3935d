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

/// A no-operation monitor that implements the `AdversaryMonitor` trait
/// but does nothing on any of the events.
#[repr(transparent)]
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct NoOperationMonitor<T>
where
    T: StretchNumeric,
{
    _phantom: std::marker::PhantomData<T>,
}

impl<T> NoOperationMonitor<T>
where
    T: StretchNumeric,
{
    /// Creates a new `NoOperationMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T> AdversaryMonitor<T> for NoOperationMonitor<T>
where
    T: StretchNumeric,
{
    #[inline(always)]
    fn name(&self) -> &str {
        "NoOperationMonitor"
    }

    #[inline(always)]
    fn on_enter_search(
        &mut self,
        _root: &BinConfiguration<T>,
        _weights: &WeightUniverse<T>,
        _statistics: &SearchStatistics,
    ) {
    }

    #[inline(always)]
    fn on_exit_search(&mut self, _root: &BinConfiguration<T>, _value: T, _statistics: &SearchStatistics) {}

    #[inline(always)]
    fn on_node(
        &mut self,
        _config: &BinConfiguration<T>,
        _lower: T,
        _upper: T,
        _depth: u64,
        _statistics: &SearchStatistics,
    ) {
    }

    #[inline(always)]
    fn on_cut(&mut self, _reason: CutReason<T>, _value: T, _statistics: &SearchStatistics) {}

    #[inline(always)]
    fn on_memo_hit(&mut self, _value: T, _statistics: &SearchStatistics) {}

    #[inline(always)]
    fn on_descend(
        &mut self,
        _config: &BinConfiguration<T>,
        _weight: T,
        _bin: BinIndex,
        _statistics: &SearchStatistics,
    ) {
    }

    #[inline(always)]
    fn on_backtrack(&mut self, _value: T, _statistics: &SearchStatistics) {}

    #[inline(always)]
    fn on_weight_evaluated(
        &mut self,
        _weight: T,
        _value: T,
        _improved: bool,
        _statistics: &SearchStatistics,
    ) {
    }
}
