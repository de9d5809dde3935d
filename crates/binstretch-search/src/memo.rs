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

//! # Memoization of search results
//!
//! `branch` answers a windowed question: the value it returns for a
//! configuration is exact only when it lies strictly inside the window
//! `(lower, upper)`. A value at or above `upper` is a proven floor of the
//! true game value, and a value at or below `lower` a proven ceiling.
//!
//! Two policies reuse these answers:
//!
//! * `Overwrite` keeps the last `(lower, upper, value)` triple per key. A
//!   lookup answers unless the stored value was a floor obtained with a
//!   tighter ceiling than requested, or a ceiling obtained with a higher
//!   floor than requested.
//! * `Merge` keeps the interval `[floor, ceiling]` known to contain the true
//!   value and intersects it with every new result. A lookup answers when
//!   the interval is a single point, when the floor reaches the requested
//!   ceiling, or when the ceiling is at or below the requested floor.
//!
//! `Disabled` turns memoization off. Results computed on an empty window
//! carry no information and are never stored. Every answer is raised to at
//! least the requested floor, as `branch` itself never returns less.

use binstretch_core::num::numeric::StretchNumeric;
use binstretch_model::configuration::ConfigurationKey;
use rustc_hash::FxHashMap;

/// How search results are memoized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MemoPolicy {
    #[default]
    Overwrite,
    Merge,
    Disabled,
}

impl std::fmt::Display for MemoPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemoPolicy::Overwrite => write!(f, "Overwrite"),
            MemoPolicy::Merge => write!(f, "Merge"),
            MemoPolicy::Disabled => write!(f, "Disabled"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MemoEntry<T> {
    Window { lower: T, upper: T, value: T },
    Interval { floor: Option<T>, ceiling: Option<T> },
}

/// Memo table keyed by canonical bin configurations.
#[derive(Clone, Debug)]
pub struct MemoTable<T> {
    policy: MemoPolicy,
    entries: FxHashMap<ConfigurationKey<T>, MemoEntry<T>>,
}

impl<T> MemoTable<T>
where
    T: StretchNumeric,
{
    #[inline]
    pub fn new(policy: MemoPolicy) -> Self {
        Self {
            policy,
            entries: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn policy(&self) -> MemoPolicy {
        self.policy
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Looks up a memoized answer for the window `(lower, upper)`.
    pub fn recall(&self, key: &ConfigurationKey<T>, lower: T, upper: T) -> Option<T> {
        if self.policy == MemoPolicy::Disabled {
            return None;
        }
        match *self.entries.get(key)? {
            MemoEntry::Window {
                lower: stored_lower,
                upper: stored_upper,
                value,
            } => {
                if value >= stored_upper && stored_upper < upper {
                    return None;
                }
                if value <= stored_lower && stored_lower > lower {
                    return None;
                }
                Some(value.max(lower))
            }
            MemoEntry::Interval { floor, ceiling } => match (floor, ceiling) {
                (Some(f), Some(c)) if f == c => Some(f.max(lower)),
                (Some(f), _) if f >= upper => Some(f),
                (_, Some(c)) if c <= lower => Some(lower),
                _ => None,
            },
        }
    }

    /// Records the result of a search on the window `(lower, upper)`.
    /// Returns `true` if the table changed.
    ///
    /// # Panics
    ///
    /// Panics under the `Merge` policy if the result contradicts what is
    /// already known about the configuration.
    pub fn store(&mut self, key: ConfigurationKey<T>, lower: T, upper: T, value: T) -> bool {
        if lower >= upper {
            return false;
        }
        match self.policy {
            MemoPolicy::Disabled => false,
            MemoPolicy::Overwrite => {
                self.entries.insert(key, MemoEntry::Window { lower, upper, value });
                true
            }
            MemoPolicy::Merge => {
                let (new_floor, new_ceiling) = if value >= upper {
                    (Some(value), None)
                } else if value <= lower {
                    (None, Some(value))
                } else {
                    (Some(value), Some(value))
                };

                let entry = self.entries.entry(key).or_insert(MemoEntry::Interval {
                    floor: None,
                    ceiling: None,
                });
                let MemoEntry::Interval { floor, ceiling } = entry else {
                    unreachable!("merge tables only hold intervals");
                };
                *floor = max_bound(*floor, new_floor);
                *ceiling = min_bound(*ceiling, new_ceiling);
                if let (Some(f), Some(c)) = (*floor, *ceiling) {
                    assert!(
                        f <= c,
                        "called `MemoTable::store` with a result contradicting the memoized interval: floor {} above ceiling {}",
                        f,
                        c
                    );
                }
                true
            }
        }
    }
}

#[inline]
fn max_bound<T: Ord>(a: Option<T>, b: Option<T>) -> Option<T> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.max(y)),
        (x, None) => x,
        (None, y) => y,
    }
}

#[inline]
fn min_bound<T: Ord>(a: Option<T>, b: Option<T>) -> Option<T> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (x, None) => x,
        (None, y) => y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use binstretch_model::{configuration::BinConfiguration, index::BinIndex, item::Item};

    fn key(sizes: &[i64]) -> ConfigurationKey<i64> {
        let mut config = BinConfiguration::new(2, 10i64);
        for &s in sizes {
            config.bin_mut(BinIndex::new(0)).force_add(Item::new(s));
        }
        config.canonical_key()
    }

    #[test]
    fn test_overwrite_exact_value_answers_any_window() {
        let mut memo = MemoTable::new(MemoPolicy::Overwrite);
        assert!(memo.store(key(&[3]), 10, 20, 14));
        assert_eq!(memo.recall(&key(&[3]), 12, 16), Some(14));
        assert_eq!(memo.recall(&key(&[3]), 0, 100), Some(14));
        // Raised to the requested floor.
        assert_eq!(memo.recall(&key(&[3]), 15, 18), Some(15));
    }

    #[test]
    fn test_overwrite_floor_needs_looser_ceiling() {
        let mut memo = MemoTable::new(MemoPolicy::Overwrite);
        memo.store(key(&[3]), 10, 15, 16);
        assert_eq!(memo.recall(&key(&[3]), 10, 14), Some(16));
        assert_eq!(memo.recall(&key(&[3]), 10, 15), Some(16));
        assert_eq!(memo.recall(&key(&[3]), 10, 20), None);
    }

    #[test]
    fn test_overwrite_ceiling_needs_higher_floor() {
        let mut memo = MemoTable::new(MemoPolicy::Overwrite);
        memo.store(key(&[3]), 12, 20, 12);
        assert_eq!(memo.recall(&key(&[3]), 13, 20), Some(13));
        assert_eq!(memo.recall(&key(&[3]), 12, 20), Some(12));
        assert_eq!(memo.recall(&key(&[3]), 11, 20), None);
    }

    #[test]
    fn test_overwrite_replaces_entry() {
        let mut memo = MemoTable::new(MemoPolicy::Overwrite);
        memo.store(key(&[3]), 10, 20, 14);
        memo.store(key(&[3]), 15, 20, 15);
        assert_eq!(memo.len(), 1);
        assert_eq!(memo.recall(&key(&[3]), 10, 20), None);
    }

    #[test]
    fn test_merge_intersects_bounds() {
        let mut memo = MemoTable::new(MemoPolicy::Merge);
        // Floor 16 from a fail-high, ceiling 18 from a fail-low.
        memo.store(key(&[3]), 10, 15, 16);
        memo.store(key(&[3]), 18, 25, 18);
        assert_eq!(memo.recall(&key(&[3]), 10, 16), Some(16));
        assert_eq!(memo.recall(&key(&[3]), 18, 30), Some(18));
        assert_eq!(memo.recall(&key(&[3]), 10, 30), None);

        memo.store(key(&[3]), 10, 30, 17);
        assert_eq!(memo.recall(&key(&[3]), 0, 100), Some(17));
    }

    #[test]
    #[should_panic(expected = "contradicting the memoized interval")]
    fn test_merge_contradiction_panics() {
        let mut memo = MemoTable::new(MemoPolicy::Merge);
        memo.store(key(&[3]), 10, 15, 16);
        memo.store(key(&[3]), 12, 20, 12);
    }

    #[test]
    fn test_empty_window_is_never_stored() {
        for policy in [MemoPolicy::Overwrite, MemoPolicy::Merge] {
            let mut memo = MemoTable::new(policy);
            assert!(!memo.store(key(&[3]), 15, 15, 15));
            assert!(memo.is_empty());
        }
    }

    #[test]
    fn test_disabled_never_answers() {
        let mut memo = MemoTable::new(MemoPolicy::Disabled);
        assert!(!memo.store(key(&[3]), 10, 20, 14));
        assert_eq!(memo.recall(&key(&[3]), 10, 20), None);
    }

    #[test]
    fn test_keys_are_canonical() {
        let mut memo = MemoTable::new(MemoPolicy::Overwrite);
        memo.store(key(&[3, 4]), 10, 20, 14);
        assert_eq!(memo.recall(&key(&[4, 3]), 10, 20), Some(14));
        assert_eq!(memo.recall(&key(&[7]), 10, 20), None);
    }
}
