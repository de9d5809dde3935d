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

//! Exact depth-first assignment backend.
//!
//! Items are placed in decreasing size order, pinned items first. Each free
//! item tries the bins in index order, skipping any bin whose load equals
//! a bin already tried for this item. A branch is cut as soon as the volume
//! still to place exceeds the free room left in all bins.

use super::{BackendError, FeasibilityBackend, Verdict};
use crate::model::PackingModel;
use binstretch_core::num::numeric::StretchNumeric;
use smallvec::SmallVec;

/// Always-available exact backend.
#[derive(Debug, Clone, Default)]
pub struct SearchBackend {
    nodes_explored: u64,
}

impl SearchBackend {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of assignment nodes visited over all solves.
    #[inline]
    pub fn nodes_explored(&self) -> u64 {
        self.nodes_explored
    }

    fn assign<T>(
        &mut self,
        sizes: &[T],
        suffix_volume: &[T],
        next: usize,
        loads: &mut [T],
        free_room: T,
        capacity: T,
    ) -> bool
    where
        T: StretchNumeric,
    {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
        if next == sizes.len() {
            return true;
        }
        if suffix_volume[next] > free_room {
            return false;
        }

        let size = sizes[next];
        let mut tried: SmallVec<[T; 8]> = SmallVec::new();
        for bin in 0..loads.len() {
            let load = loads[bin];
            if load.saturating_add_val(size) > capacity || tried.contains(&load) {
                continue;
            }
            tried.push(load);

            loads[bin] = load + size;
            let found = self.assign(
                sizes,
                suffix_volume,
                next + 1,
                loads,
                free_room - size,
                capacity,
            );
            loads[bin] = load;
            if found {
                return true;
            }
        }
        false
    }
}

impl<T> FeasibilityBackend<T> for SearchBackend
where
    T: StretchNumeric,
{
    fn name(&self) -> &str {
        "search"
    }

    fn solve(&mut self, model: &PackingModel<T>) -> Result<Verdict, BackendError> {
        let sizes = model.sizes();
        let capacity = model.capacity();
        let num_bins = model.num_bins();
        if sizes.is_empty() {
            return Ok(Verdict::Feasible);
        }
        if num_bins == 0 {
            return Ok(Verdict::Infeasible);
        }

        let mut loads = vec![T::ZERO; num_bins];
        for fixing in model.fixings() {
            if fixing.bin >= num_bins || fixing.item >= sizes.len() {
                return Err(BackendError::new(
                    "search",
                    format!("fixing {} out of range", fixing),
                ));
            }
            loads[fixing.bin] = loads[fixing.bin] + sizes[fixing.item];
            if loads[fixing.bin] > capacity {
                return Ok(Verdict::Infeasible);
            }
        }

        let first_free = model.fixings().len();
        let mut suffix_volume = vec![T::ZERO; sizes.len() + 1];
        for i in (0..sizes.len()).rev() {
            suffix_volume[i] = suffix_volume[i + 1].saturating_add_val(sizes[i]);
        }

        let used = loads.iter().fold(T::ZERO, |acc, &l| acc + l);
        let free_room = match T::from_usize(num_bins).and_then(|n| n.checked_mul_val(capacity)) {
            Some(room) => room - used,
            None => {
                return Err(BackendError::new(
                    "search",
                    "total capacity overflows the size type",
                ));
            }
        };

        let found = self.assign(
            sizes,
            &suffix_volume,
            first_free,
            &mut loads,
            free_room,
            capacity,
        );
        Ok(Verdict::from(found))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decide(sizes: &[i64], num_bins: usize, capacity: i64) -> Verdict {
        let mut sorted = sizes.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        match PackingModel::build(&sorted, num_bins, capacity) {
            Some(model) => SearchBackend::new().solve(&model).unwrap(),
            None => Verdict::Infeasible,
        }
    }

    #[test]
    fn test_small_reference_instances() {
        assert_eq!(decide(&[1, 2, 3, 4], 2, 4), Verdict::Infeasible);
        assert_eq!(decide(&[1, 2, 3, 4], 2, 5), Verdict::Feasible);
        assert_eq!(decide(&[1, 2, 3, 4], 3, 4), Verdict::Feasible);
    }

    #[test]
    fn test_tight_partition_is_found() {
        assert_eq!(decide(&[4, 4, 3, 3, 3, 3], 2, 10), Verdict::Feasible);
        assert_eq!(decide(&[5, 4, 4, 3, 2, 2], 2, 10), Verdict::Feasible);
    }

    #[test]
    fn test_volume_fits_but_no_partition_exists() {
        // Sum is 20 but nothing fits next to the 8.
        assert_eq!(decide(&[8, 4, 4, 4], 2, 10), Verdict::Infeasible);
        assert_eq!(decide(&[6, 6, 4, 4], 2, 10), Verdict::Feasible);
    }

    #[test]
    fn test_empty_model_is_feasible() {
        let model = PackingModel::<i64>::build(&[], 3, 10).unwrap();
        assert_eq!(SearchBackend::new().solve(&model), Ok(Verdict::Feasible));
    }

    #[test]
    fn test_bin_count_beyond_size_type_is_an_error() {
        let model = PackingModel::build(&[1i8], 200, 1).unwrap();
        assert!(SearchBackend::new().solve(&model).is_err());
    }

    #[test]
    fn test_nodes_accumulate_across_solves() {
        let model = PackingModel::build(&[4i64, 4, 3, 3, 3, 3], 2, 10).unwrap();
        let mut backend = SearchBackend::new();
        backend.solve(&model).unwrap();
        let first = backend.nodes_explored();
        backend.solve(&model).unwrap();
        assert_eq!(backend.nodes_explored(), 2 * first);
    }
}
