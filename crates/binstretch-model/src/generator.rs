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

//! Random packable instances.
//!
//! Bins are filled left to right with random sizes in `1..=capacity` until
//! the next drawn size no longer fits. With `full` set, each bin is then
//! topped up with an item of exactly its remaining capacity. The items are
//! shuffled before being returned, together with the bins that witness a
//! packing into `num_bins` bins.

use crate::{bin::Bin, item::Item};
use binstretch_core::num::numeric::{StretchNumeric, from_count};
use rand::{Rng, seq::SliceRandom};

/// A random instance together with a packing that proves it feasible.
#[derive(Clone, Debug)]
pub struct GeneratedInstance<T> {
    pub items: Vec<Item<T>>,
    pub bins: Vec<Bin<T>>,
}

/// Generates a random instance that fits into `num_bins` bins of `capacity`.
///
/// # Panics
///
/// Panics if `capacity` is not strictly positive.
pub fn generate_instance<T, R>(
    num_bins: usize,
    capacity: T,
    full: bool,
    rng: &mut R,
) -> GeneratedInstance<T>
where
    T: StretchNumeric,
    R: Rng + ?Sized,
{
    assert!(
        capacity > T::ZERO,
        "called `generate_instance` with a non-positive capacity: {}",
        capacity
    );
    let upper = capacity.to_usize().unwrap_or(usize::MAX);

    let mut bins: Vec<Bin<T>> = (0..num_bins).map(|_| Bin::new(capacity)).collect();
    let mut items = Vec::new();

    for bin in &mut bins {
        loop {
            let item = Item::new(from_count::<T>(rng.random_range(1..=upper)));
            if bin.add(item) {
                items.push(item);
                continue;
            }
            if full && bin.remaining() > T::ZERO {
                let top_up = Item::new(bin.remaining());
                bin.force_add(top_up);
                items.push(top_up);
            }
            break;
        }
    }

    items.shuffle(rng);
    GeneratedInstance { items, bins }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::total_size;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_witness_respects_capacity() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..50 {
            let instance = generate_instance(4, 20i64, false, &mut rng);
            assert_eq!(instance.bins.len(), 4);
            assert!(instance.bins.iter().all(|b| b.remaining() >= 0));
            let placed: usize = instance.bins.iter().map(Bin::len).sum();
            assert_eq!(placed, instance.items.len());
        }
    }

    #[test]
    fn test_full_instances_fill_every_bin() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..50 {
            let instance = generate_instance(3, 15i64, true, &mut rng);
            assert!(instance.bins.iter().all(|b| b.remaining() == 0));
            assert_eq!(total_size(instance.items.iter()), 45);
        }
    }

    #[test]
    fn test_no_bins_no_items() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let instance = generate_instance(0, 10i64, true, &mut rng);
        assert!(instance.items.is_empty());
    }
}
