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

//! Scoped placement of an item.
//!
//! The search mutates a single `BinConfiguration` in place. Every placement
//! must be undone exactly once, in the reverse order it was made. A
//! `Placement` makes that structural: it force-adds the item when created,
//! removes it when dropped, and dereferences to the configuration so that
//! the recursion below it runs through the guard.

use binstretch_core::num::numeric::StretchNumeric;
use binstretch_model::{configuration::BinConfiguration, index::BinIndex, item::Item};
use std::ops::{Deref, DerefMut};

/// An item placed into a bin for the lifetime of the guard.
#[derive(Debug)]
pub struct Placement<'a, T>
where
    T: StretchNumeric,
{
    config: &'a mut BinConfiguration<T>,
    bin: BinIndex,
    item: Item<T>,
}

impl<'a, T> Placement<'a, T>
where
    T: StretchNumeric,
{
    /// Places `item` into `bin` without a capacity check.
    ///
    /// # Panics
    ///
    /// Panics if `bin` is out of bounds.
    #[inline]
    pub fn new(config: &'a mut BinConfiguration<T>, bin: BinIndex, item: Item<T>) -> Self {
        config.bin_mut(bin).force_add(item);
        Self { config, bin, item }
    }

    /// Returns the bin the item was placed into.
    #[inline]
    pub fn bin_index(&self) -> BinIndex {
        self.bin
    }

    /// Returns the placed item.
    #[inline]
    pub fn item(&self) -> Item<T> {
        self.item
    }
}

impl<T> Deref for Placement<'_, T>
where
    T: StretchNumeric,
{
    type Target = BinConfiguration<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.config
    }
}

impl<T> DerefMut for Placement<'_, T>
where
    T: StretchNumeric,
{
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.config
    }
}

impl<T> Drop for Placement<'_, T>
where
    T: StretchNumeric,
{
    #[inline]
    fn drop(&mut self) {
        let removed = self.config.bin_mut(self.bin).remove_last();
        debug_assert_eq!(
            removed,
            Some(self.item),
            "placement undone out of order in {}",
            self.bin
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_restores_configuration() {
        let mut config = BinConfiguration::new(2, 10i64);
        let before = config.clone();
        {
            let placed = Placement::new(&mut config, BinIndex::new(1), Item::new(4));
            assert_eq!(placed.bin_index(), BinIndex::new(1));
            assert_eq!(placed.bin(BinIndex::new(1)).used(), 4);
            assert_eq!(placed.item(), Item::new(4));
        }
        assert_eq!(config, before);
    }

    #[test]
    fn test_nested_placements_unwind_in_reverse() {
        let mut config = BinConfiguration::new(2, 10i64);
        {
            let mut outer = Placement::new(&mut config, BinIndex::new(0), Item::new(6));
            {
                let inner = Placement::new(&mut outer, BinIndex::new(0), Item::new(7));
                // Over-filled on purpose.
                assert_eq!(inner.bin(BinIndex::new(0)).remaining(), -3);
            }
            assert_eq!(outer.used_snapshot(), vec![6, 0]);
        }
        assert_eq!(config.total_used(), 0);
    }

    #[test]
    fn test_early_return_still_undoes() {
        fn place_and_fail(config: &mut BinConfiguration<i64>) -> Result<(), ()> {
            let _placed = Placement::new(config, BinIndex::new(0), Item::new(5));
            Err(())
        }
        let mut config = BinConfiguration::new(1, 10i64);
        assert!(place_and_fail(&mut config).is_err());
        assert!(config.bin(BinIndex::new(0)).is_empty());
    }
}
