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

//! The sizes the adversary may offer.

use crate::item::Item;
use binstretch_core::num::numeric::{StretchNumeric, from_count};
use rand::Rng;

/// A set of distinct item sizes in `1..=capacity`, sorted in descending
/// order. The adversary search tries weights in exactly this order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightUniverse<T> {
    weights: Vec<T>,
    capacity: T,
}

impl<T> WeightUniverse<T>
where
    T: StretchNumeric,
{
    /// Builds a universe from arbitrary sizes. Sizes that are not in
    /// `1..=capacity` are dropped and duplicates are merged.
    pub fn new<I>(capacity: T, sizes: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut weights: Vec<T> = sizes
            .into_iter()
            .filter(|&w| w > T::ZERO && w <= capacity)
            .collect();
        weights.sort_unstable_by(|a, b| b.cmp(a));
        weights.dedup();
        Self { weights, capacity }
    }

    /// Every size in `1..=capacity`.
    pub fn range(capacity: T) -> Self {
        let n = to_count(capacity);
        Self::new(capacity, (1..=n).map(from_count::<T>))
    }

    /// A uniformly random subset of `count` sizes from `1..=capacity`.
    /// Asking for more sizes than exist yields the full range.
    pub fn sample<R>(capacity: T, count: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let n = to_count(capacity);
        let amount = count.min(n);
        let picked = rand::seq::index::sample(rng, n, amount);
        Self::new(capacity, picked.into_iter().map(|i| from_count::<T>(i + 1)))
    }

    /// Returns the capacity the universe was built for.
    #[inline]
    pub fn capacity(&self) -> T {
        self.capacity
    }

    /// Returns the weights in descending order.
    #[inline]
    pub fn weights(&self) -> &[T] {
        &self.weights
    }

    /// Returns the number of weights.
    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns `true` if no weight is available.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Returns the largest weight, if any.
    #[inline]
    pub fn largest(&self) -> Option<T> {
        self.weights.first().copied()
    }

    /// Iterates over the weights as items, largest first.
    #[inline]
    pub fn items(&self) -> impl Iterator<Item = Item<T>> + '_ {
        self.weights.iter().map(|&w| Item::new(w))
    }
}

impl<T> std::fmt::Display for WeightUniverse<T>
where
    T: StretchNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, w) in self.weights.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", w)?;
        }
        write!(f, "]")
    }
}

#[inline]
fn to_count<T>(capacity: T) -> usize
where
    T: StretchNumeric,
{
    match capacity.to_usize() {
        Some(n) => n,
        None => panic!(
            "called `WeightUniverse` constructor with a capacity that is not a valid count: {}",
            capacity
        ),
    }
}
