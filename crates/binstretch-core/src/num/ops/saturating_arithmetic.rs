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

use core::ops::{Add, Mul};

macro_rules! saturating_impl_binary_val {
    ($trait_name:ident, $method:ident, $src_method:ident, $($t:ty),*) => {
        $(
            impl $trait_name for $t {
                #[inline(always)]
                fn $method(self, v: Self) -> Self {
                    <$t>::$src_method(self, v)
                }
            }
        )*
    };
}

/// Saturating addition by value.
///
/// Used for statistics counters and for totals that must never wrap.
///
/// # Examples
///
/// ```rust
/// # use binstretch_core::num::ops::saturating_arithmetic::SaturatingAddVal;
/// let a: u8 = 250;
/// assert_eq!(a.saturating_add_val(10), 255);
/// ```
pub trait SaturatingAddVal: Sized + Add<Self, Output = Self> {
    /// Performs saturating addition by value.
    fn saturating_add_val(self, v: Self) -> Self;
}

/// Saturating multiplication by value.
pub trait SaturatingMulVal: Sized + Mul<Self, Output = Self> {
    /// Performs saturating multiplication by value.
    fn saturating_mul_val(self, v: Self) -> Self;
}

saturating_impl_binary_val!(
    SaturatingAddVal,
    saturating_add_val,
    saturating_add,
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize
);
saturating_impl_binary_val!(
    SaturatingMulVal,
    saturating_mul_val,
    saturating_mul,
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturating_add_clamps_at_max() {
        assert_eq!(u64::MAX.saturating_add_val(1), u64::MAX);
        assert_eq!(i32::MAX.saturating_add_val(5), i32::MAX);
        assert_eq!(3i64.saturating_add_val(4), 7);
    }

    #[test]
    fn test_saturating_mul_clamps() {
        assert_eq!(i64::MAX.saturating_mul_val(2), i64::MAX);
        assert_eq!(i64::MIN.saturating_mul_val(2), i64::MIN);
        assert_eq!(6i32.saturating_mul_val(7), 42);
    }
}
