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

use crate::item::Item;
use binstretch_core::num::numeric::StretchNumeric;

/// A capacity-bounded container.
///
/// A bin keeps its nominal capacity, the capacity still left, and the items
/// placed into it in placement order. The invariant
/// `remaining == capacity - sum(items)` holds at all times.
///
/// `add` refuses items that do not fit, so bins filled through it never go
/// below zero remaining capacity. `force_add` skips that check: the adversary
/// search uses it to let the decision maker over-fill a bin (that overflow is
/// exactly the stretch being measured), in which case `remaining` goes
/// negative. `remove_last` undoes the most recent placement so backtracking
/// searches never reallocate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bin<T> {
    capacity: T,
    remaining: T,
    items: Vec<Item<T>>,
}

impl<T> Bin<T>
where
    T: StretchNumeric,
{
    /// Creates a new empty bin.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is not strictly positive.
    #[inline]
    pub fn new(capacity: T) -> Self {
        assert!(
            capacity > T::ZERO,
            "called `Bin::new` with a non-positive capacity: {}",
            capacity
        );
        Self {
            capacity,
            remaining: capacity,
            items: Vec::new(),
        }
    }

    /// Returns the nominal capacity of the bin.
    #[inline(always)]
    pub fn capacity(&self) -> T {
        self.capacity
    }

    /// Returns the capacity left in the bin. Negative once the bin has been
    /// over-filled through `force_add`.
    #[inline(always)]
    pub fn remaining(&self) -> T {
        self.remaining
    }

    /// Returns the capacity used so far.
    #[inline(always)]
    pub fn used(&self) -> T {
        self.capacity - self.remaining
    }

    /// Returns the items in placement order.
    #[inline]
    pub fn items(&self) -> &[Item<T>] {
        &self.items
    }

    /// Returns the number of items in the bin.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no item has been placed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` if `item` fits into the remaining capacity.
    #[inline]
    pub fn fits(&self, item: Item<T>) -> bool {
        item.size() <= self.remaining
    }

    /// Places `item` if it fits; returns `false` and leaves the bin
    /// untouched otherwise.
    #[inline]
    pub fn add(&mut self, item: Item<T>) -> bool {
        if !self.fits(item) {
            return false;
        }
        self.force_add(item);
        true
    }

    /// Places `item` without checking the remaining capacity.
    #[inline]
    pub fn force_add(&mut self, item: Item<T>) {
        self.remaining = self.remaining - item.size();
        self.items.push(item);
    }

    /// Removes the most recently placed item and restores its capacity.
    /// Returns `None` on an empty bin.
    #[inline]
    pub fn remove_last(&mut self) -> Option<Item<T>> {
        let item = self.items.pop()?;
        self.remaining = self.remaining + item.size();
        Some(item)
    }

    /// Empties the bin, keeping its allocation.
    #[inline]
    pub fn clean(&mut self) {
        self.remaining = self.capacity;
        self.items.clear();
    }
}

impl<T> std::fmt::Display for Bin<T>
where
    T: StretchNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Used: {}\tItems: [", self.used())?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "]\t(sum = {})", crate::item::total_size(&self.items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_capacity_invariant(bin: &Bin<i64>) {
        let sum: i64 = bin.items().iter().map(|i| i.size()).sum();
        assert_eq!(bin.remaining(), bin.capacity() - sum);
    }

    #[test]
    fn test_add_respects_capacity() {
        let mut bin = Bin::new(10i64);
        assert!(bin.add(Item::new(6)));
        assert!(bin.add(Item::new(4)));
        assert!(!bin.add(Item::new(1)), "a full bin must refuse items");
        assert_eq!(bin.remaining(), 0);
        assert_eq!(bin.used(), 10);
        assert_eq!(bin.len(), 2);
        assert_capacity_invariant(&bin);
    }

    #[test]
    fn test_failed_add_leaves_bin_untouched() {
        let mut bin = Bin::new(5i64);
        assert!(bin.add(Item::new(3)));
        let before = bin.clone();
        assert!(!bin.add(Item::new(3)));
        assert_eq!(bin, before);
    }

    #[test]
    fn test_force_add_can_overfill() {
        let mut bin = Bin::new(10i64);
        bin.force_add(Item::new(8));
        bin.force_add(Item::new(5));
        assert_eq!(bin.used(), 13);
        assert_eq!(bin.remaining(), -3);
        assert_capacity_invariant(&bin);
    }

    #[test]
    fn test_remove_last_restores_capacity_in_reverse_order() {
        let mut bin = Bin::new(10i64);
        bin.force_add(Item::new(2));
        bin.force_add(Item::new(7));
        assert_eq!(bin.remove_last(), Some(Item::new(7)));
        assert_eq!(bin.remaining(), 8);
        assert_eq!(bin.remove_last(), Some(Item::new(2)));
        assert_eq!(bin.remaining(), 10);
        assert_eq!(bin.remove_last(), None);
        assert_capacity_invariant(&bin);
    }

    #[test]
    fn test_clean_resets_bin() {
        let mut bin = Bin::new(4i64);
        bin.add(Item::new(1));
        bin.add(Item::new(2));
        bin.clean();
        assert!(bin.is_empty());
        assert_eq!(bin.remaining(), 4);
        assert_eq!(bin.used(), 0);
    }

    #[test]
    fn test_display_lists_items_and_sum() {
        let mut bin = Bin::new(10i64);
        bin.add(Item::new(3));
        bin.add(Item::new(4));
        assert_eq!(format!("{}", bin), "Used: 7\tItems: [3, 4]\t(sum = 7)");
    }

    #[test]
    #[should_panic(expected = "non-positive capacity")]
    fn test_zero_capacity_panics() {
        let _ = Bin::new(0i64);
    }
}
