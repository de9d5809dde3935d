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

//! The 0/1 assignment formulation handed to exact backends.
//!
//! Binary variable `x[i][j]` is one iff item `i` goes to bin `j`. Every item
//! is assigned exactly once and every bin holds at most `capacity`. There is
//! no objective.
//!
//! Bins are interchangeable, so a prefix of the items can be pinned without
//! losing solutions. Items are sorted in decreasing order; each item of more
//! than half the capacity gets its own bin, and two items of exactly half the
//! capacity share one. Without such items the largest item is pinned to the
//! first bin.

use binstretch_core::num::numeric::StretchNumeric;

/// Pins `item` to `bin`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fixing {
    pub item: usize,
    pub bin: usize,
}

impl std::fmt::Display for Fixing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x({},{}) = 1", self.item, self.bin)
    }
}

/// A feasibility instance in backend-agnostic form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackingModel<T> {
    sizes: Vec<T>,
    num_bins: usize,
    capacity: T,
    fixings: Vec<Fixing>,
}

impl<T> PackingModel<T>
where
    T: StretchNumeric,
{
    /// Builds the model for `sizes` sorted in decreasing order.
    ///
    /// Returns `None` when the pinned prefix already needs more than
    /// `num_bins` bins, which proves the instance infeasible.
    pub fn build(sorted_desc: &[T], num_bins: usize, capacity: T) -> Option<Self> {
        debug_assert!(
            sorted_desc.windows(2).all(|w| w[0] >= w[1]),
            "called `PackingModel::build` with unsorted sizes"
        );

        let mut fixings = Vec::new();
        let mut bin = 0usize;
        let mut half_open = false;
        for (item, &size) in sorted_desc.iter().enumerate() {
            let doubled = size.saturating_mul_val(T::TWO);
            if doubled < capacity {
                break;
            }
            if bin >= num_bins {
                return None;
            }
            fixings.push(Fixing { item, bin });
            if doubled == capacity && !half_open {
                half_open = true;
            } else {
                half_open = false;
                bin += 1;
            }
        }

        if fixings.is_empty() && !sorted_desc.is_empty() {
            if num_bins == 0 {
                return None;
            }
            fixings.push(Fixing { item: 0, bin: 0 });
        }

        Some(Self {
            sizes: sorted_desc.to_vec(),
            num_bins,
            capacity,
            fixings,
        })
    }

    /// Returns the item sizes in decreasing order.
    #[inline]
    pub fn sizes(&self) -> &[T] {
        &self.sizes
    }

    #[inline]
    pub fn num_items(&self) -> usize {
        self.sizes.len()
    }

    #[inline]
    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    #[inline]
    pub fn capacity(&self) -> T {
        self.capacity
    }

    /// Returns the symmetry-breaking assignments. They always pin a prefix
    /// of the items, in item order.
    #[inline]
    pub fn fixings(&self) -> &[Fixing] {
        &self.fixings
    }

    /// Returns the number of binary variables `x[i][j]`.
    #[inline]
    pub fn num_variables(&self) -> usize {
        self.sizes.len() * self.num_bins
    }
}

impl<T> std::fmt::Display for PackingModel<T>
where
    T: StretchNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "PackingModel: {} items, {} bins of capacity {}, {} variables",
            self.num_items(),
            self.num_bins,
            self.capacity,
            self.num_variables()
        )?;
        for fixing in &self.fixings {
            writeln!(f, "  fix {} (size {})", fixing, self.sizes[fixing.item])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_big_items_get_their_own_bins() {
        let model = PackingModel::build(&[9i64, 7, 6, 2, 1], 4, 10).unwrap();
        assert_eq!(
            model.fixings(),
            &[
                Fixing { item: 0, bin: 0 },
                Fixing { item: 1, bin: 1 },
                Fixing { item: 2, bin: 2 },
            ]
        );
        assert_eq!(model.num_variables(), 20);
    }

    #[test]
    fn test_halves_pair_up() {
        let model = PackingModel::build(&[6i64, 5, 5, 5, 1], 3, 10).unwrap();
        assert_eq!(
            model.fixings(),
            &[
                Fixing { item: 0, bin: 0 },
                Fixing { item: 1, bin: 1 },
                Fixing { item: 2, bin: 1 },
                Fixing { item: 3, bin: 2 },
            ]
        );
    }

    #[test]
    fn test_small_items_pin_the_largest() {
        let model = PackingModel::build(&[4i64, 3, 3], 2, 10).unwrap();
        assert_eq!(model.fixings(), &[Fixing { item: 0, bin: 0 }]);
    }

    #[test]
    fn test_too_many_big_items_is_none() {
        assert!(PackingModel::build(&[6i64, 6, 6], 2, 10).is_none());
        assert!(PackingModel::build(&[1i64], 0, 10).is_none());
    }

    #[test]
    fn test_empty_model_has_no_fixings() {
        let model = PackingModel::<i64>::build(&[], 2, 10).unwrap();
        assert!(model.fixings().is_empty());
        assert_eq!(model.num_items(), 0);
    }
}
