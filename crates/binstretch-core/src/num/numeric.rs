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

//! # Stretch Numeric Trait
//!
//! Unified bounds for the size type used by items, bins and the search.
//! Sizes are signed because the adversary search deliberately lets the
//! decision maker over-fill a bin past its nominal capacity, which drives
//! that bin's remaining capacity below zero.
//!
//! Requires `PrimInt + Signed + FromPrimitive` for the numeric
//! fundamentals, `Hash` so sizes can be part of memoization keys, and the
//! by-value arithmetic traits from `ops`.

use crate::num::{
    constants::{Two, Zero},
    ops::{checked_arithmetic, saturating_arithmetic},
};
use num_traits::{FromPrimitive, PrimInt, Signed};
use std::hash::Hash;

/// A trait alias for integer types usable as item sizes and capacities.
/// These are the signed primitive integers `i8`, `i16`, `i32`, `i64`,
/// `i128` and `isize`.
pub trait StretchNumeric:
    PrimInt
    + Signed
    + FromPrimitive
    + std::fmt::Debug
    + std::fmt::Display
    + Zero
    + Two
    + saturating_arithmetic::SaturatingAddVal
    + saturating_arithmetic::SaturatingMulVal
    + checked_arithmetic::CheckedSubVal
    + checked_arithmetic::CheckedMulVal
    + Send
    + Sync
    + Hash
    + 'static
{
}

impl<T> StretchNumeric for T where
    T: PrimInt
        + Signed
        + FromPrimitive
        + std::fmt::Debug
        + std::fmt::Display
        + Zero
        + Two
        + saturating_arithmetic::SaturatingAddVal
        + saturating_arithmetic::SaturatingMulVal
        + checked_arithmetic::CheckedSubVal
        + checked_arithmetic::CheckedMulVal
        + Send
        + Sync
        + Hash
        + 'static
{
}

/// Converts a `usize` count into the size type.
///
/// # Panics
///
/// Panics if `count` does not fit into `T`.
#[inline]
pub fn from_count<T>(count: usize) -> T
where
    T: StretchNumeric,
{
    match T::from_usize(count) {
        Some(v) => v,
        None => panic!(
            "called `from_count` with a count that does not fit the size type: {}",
            count
        ),
    }
}
