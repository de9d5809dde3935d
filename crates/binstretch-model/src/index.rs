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

/// Position of a bin inside a `BinConfiguration`.
///
/// Bins are anonymous to the search: the canonical key ignores their order,
/// so a `BinIndex` is only meaningful for the configuration it came from.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BinIndex(usize);

impl BinIndex {
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline(always)]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Iterates over the indices of `num_bins` bins in storage order.
    #[inline]
    pub fn range(num_bins: usize) -> impl DoubleEndedIterator<Item = BinIndex> + ExactSizeIterator {
        (0..num_bins).map(BinIndex)
    }
}

impl std::fmt::Debug for BinIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BinIndex({})", self.0)
    }
}

impl std::fmt::Display for BinIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BinIndex({})", self.0)
    }
}

impl From<usize> for BinIndex {
    #[inline]
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl From<BinIndex> for usize {
    #[inline]
    fn from(index: BinIndex) -> Self {
        index.0
    }
}
