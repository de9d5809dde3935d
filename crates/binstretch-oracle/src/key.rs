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

//! Canonical cache key of a packing instance.

use smallvec::SmallVec;

/// Order-independent encoding of `(items, num_bins, capacity)`.
///
/// Items are stored as `(size, multiplicity)` pairs sorted by decreasing
/// size, so any permutation of the same multiset maps to the same key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PackingKey<T> {
    item_counts: SmallVec<[(T, u32); 16]>,
    num_bins: usize,
    capacity: T,
}

impl<T> PackingKey<T>
where
    T: Copy + Ord,
{
    /// Builds the key from sizes sorted in decreasing order.
    #[inline]
    pub fn from_sorted(sorted_desc: &[T], num_bins: usize, capacity: T) -> Self {
        debug_assert!(
            sorted_desc.windows(2).all(|w| w[0] >= w[1]),
            "called `PackingKey::from_sorted` with unsorted sizes"
        );
        let mut item_counts: SmallVec<[(T, u32); 16]> = SmallVec::new();
        for &size in sorted_desc {
            match item_counts.last_mut() {
                Some((last, count)) if *last == size => *count += 1,
                _ => item_counts.push((size, 1)),
            }
        }
        Self {
            item_counts,
            num_bins,
            capacity,
        }
    }

    /// Builds the key from sizes in any order.
    pub fn new(sizes: &[T], num_bins: usize, capacity: T) -> Self {
        let mut sorted: SmallVec<[T; 32]> = SmallVec::from_slice(sizes);
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        Self::from_sorted(&sorted, num_bins, capacity)
    }

    #[inline]
    pub fn item_counts(&self) -> &[(T, u32)] {
        &self.item_counts
    }

    #[inline]
    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    #[inline]
    pub fn capacity(&self) -> T {
        self.capacity
    }
}
