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

use binstretch_core::num::numeric::StretchNumeric;

/// A single packable unit.
///
/// Items are immutable once created and order by size. Adding two items
/// yields an item whose size is the sum; this is only used to print totals.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Item<T> {
    size: T,
}

impl<T> Item<T>
where
    T: StretchNumeric,
{
    /// Creates a new item.
    ///
    /// # Panics
    ///
    /// Panics if `size` is not strictly positive.
    #[inline]
    pub fn new(size: T) -> Self {
        assert!(
            size > T::ZERO,
            "called `Item::new` with a non-positive size: {}",
            size
        );
        Self { size }
    }

    /// Returns the size of the item.
    #[inline(always)]
    pub fn size(&self) -> T {
        self.size
    }
}

impl<T> std::ops::Add for Item<T>
where
    T: StretchNumeric,
{
    type Output = Item<T>;

    fn add(self, rhs: Self) -> Self::Output {
        Item::new(self.size + rhs.size)
    }
}

impl<T> std::fmt::Display for Item<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.size)
    }
}

/// Returns the total size of the given items, zero for none.
#[inline]
pub fn total_size<'a, T, I>(items: I) -> T
where
    T: StretchNumeric,
    I: IntoIterator<Item = &'a Item<T>>,
{
    items
        .into_iter()
        .fold(T::ZERO, |acc, item| acc.saturating_add_val(item.size()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_order_by_size() {
        let mut items = vec![Item::new(3i64), Item::new(1), Item::new(2)];
        items.sort();
        let sizes: Vec<i64> = items.iter().map(|i| i.size()).collect();
        assert_eq!(sizes, vec![1, 2, 3]);
        assert!(Item::new(5i64) > Item::new(4));
    }

    #[test]
    fn test_addition_sums_sizes() {
        let total = Item::new(5i64) + Item::new(3);
        assert_eq!(total, Item::new(8));
    }

    #[test]
    fn test_total_size_of_slice_and_empty() {
        let items = [Item::new(5i64), Item::new(3), Item::new(1)];
        assert_eq!(total_size(&items), 9);
        let none: [Item<i64>; 0] = [];
        assert_eq!(total_size(&none), 0);
    }

    #[test]
    #[should_panic(expected = "non-positive size")]
    fn test_zero_sized_item_panics() {
        let _ = Item::new(0i64);
    }
}
