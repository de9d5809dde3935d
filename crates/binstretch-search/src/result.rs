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

use crate::stats::SearchStatistics;
use binstretch_core::num::numeric::StretchNumeric;

/// Result of an adversary search.
///
/// `value` is the largest load the adversary can force into some bin,
/// raised to at least the starting lower bound. It is exact whenever it
/// lies strictly between the lower bound and the ceiling.
#[derive(Debug, Clone)]
pub struct StretchOutcome<T> {
    value: T,
    capacity: T,
    num_bins: usize,
    lower_bound: T,
    ceiling: T,
    first_weight: Option<T>,
    statistics: SearchStatistics,
}

impl<T> StretchOutcome<T>
where
    T: StretchNumeric,
{
    #[inline]
    pub(crate) fn new(
        value: T,
        capacity: T,
        num_bins: usize,
        (lower_bound, ceiling): (T, T),
        first_weight: Option<T>,
        statistics: SearchStatistics,
    ) -> Self {
        debug_assert!(
            value >= lower_bound,
            "search value {} below its lower bound {}",
            value,
            lower_bound
        );

        Self {
            value,
            capacity,
            num_bins,
            lower_bound,
            ceiling,
            first_weight,
            statistics,
        }
    }

    /// Returns the largest load the adversary can force.
    #[inline]
    pub fn value(&self) -> T {
        self.value
    }

    #[inline]
    pub fn capacity(&self) -> T {
        self.capacity
    }

    #[inline]
    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    #[inline]
    pub fn lower_bound(&self) -> T {
        self.lower_bound
    }

    #[inline]
    pub fn ceiling(&self) -> T {
        self.ceiling
    }

    /// Returns `value / capacity`.
    #[inline]
    pub fn stretching_factor(&self) -> f64 {
        ratio(self.value, self.capacity)
    }

    /// Returns `true` if the search beat the starting lower bound.
    #[inline]
    pub fn improved(&self) -> bool {
        self.value > self.lower_bound
    }

    /// Returns `true` if the value reached the ceiling, in which case it is
    /// only a lower bound on the true game value.
    #[inline]
    pub fn reached_ceiling(&self) -> bool {
        self.value >= self.ceiling
    }

    /// Returns the first item the adversary should offer, if the search
    /// improved on the lower bound.
    #[inline]
    pub fn first_weight(&self) -> Option<T> {
        self.first_weight
    }

    #[inline]
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }
}

#[inline]
fn ratio<T>(numerator: T, denominator: T) -> f64
where
    T: StretchNumeric,
{
    match (numerator.to_f64(), denominator.to_f64()) {
        (Some(n), Some(d)) if d != 0.0 => n / d,
        _ => f64::NAN,
    }
}

impl<T> std::fmt::Display for StretchOutcome<T>
where
    T: StretchNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.improved() {
            write!(
                f,
                "Stretching factor improved: {}/{} = {:.6}",
                self.value,
                self.capacity,
                self.stretching_factor()
            )
        } else {
            write!(
                f,
                "Stretching factor <= {:.6}",
                ratio(self.lower_bound, self.capacity)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(value: i64, first_weight: Option<i64>) -> StretchOutcome<i64> {
        StretchOutcome::new(
            value,
            10,
            3,
            (13, 20),
            first_weight,
            SearchStatistics::default(),
        )
    }

    #[test]
    fn test_not_improved_reports_lower_bound() {
        let o = outcome(13, None);
        assert!(!o.improved());
        assert!(!o.reached_ceiling());
        assert_eq!(o.to_string(), "Stretching factor <= 1.300000");
    }

    #[test]
    fn test_improved_reports_fraction() {
        let o = outcome(14, Some(2));
        assert!(o.improved());
        assert_eq!(o.first_weight(), Some(2));
        assert!((o.stretching_factor() - 1.4).abs() < 1e-12);
        assert_eq!(o.to_string(), "Stretching factor improved: 14/10 = 1.400000");
    }

    #[test]
    fn test_reached_ceiling() {
        let o = outcome(20, Some(5));
        assert!(o.reached_ceiling());
        assert_eq!(o.ceiling(), 20);
        assert_eq!(o.num_bins(), 3);
    }
}
