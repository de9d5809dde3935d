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

use core::ops::{Mul, Sub};

macro_rules! checked_impl_binary_val {
    ($trait_name:ident, $method:ident, $src_method:ident, $($t:ty),*) => {
        $(
            impl $trait_name for $t {
                #[inline(always)]
                fn $method(self, v: Self) -> Option<Self> {
                    <$t>::$src_method(self, v)
                }
            }
        )*
    };
}

/// Checked subtraction by value, `None` on overflow.
///
/// # Examples
///
/// ```rust
/// # use binstretch_core::num::ops::checked_arithmetic::CheckedSubVal;
/// assert_eq!(i8::MIN.checked_sub_val(1), None);
/// assert_eq!(30i64.checked_sub_val(12), Some(18));
/// ```
pub trait CheckedSubVal: Sized + Sub<Self, Output = Self> {
    /// Performs checked subtraction by value.
    fn checked_sub_val(self, v: Self) -> Option<Self>;
}

/// Checked multiplication by value, `None` on overflow.
///
/// The adversary search multiplies the number of bins by the capacity to
/// obtain its total budget; an instance for which this overflows is rejected.
///
/// # Examples
///
/// ```rust
/// # use binstretch_core::num::ops::checked_arithmetic::CheckedMulVal;
/// assert_eq!(i32::MAX.checked_mul_val(2), None);
/// assert_eq!(3i32.checked_mul_val(10), Some(30));
/// ```
pub trait CheckedMulVal: Sized + Mul<Self, Output = Self> {
    /// Performs checked multiplication by value.
    fn checked_mul_val(self, v: Self) -> Option<Self>;
}

checked_impl_binary_val!(
    CheckedSubVal,
    checked_sub_val,
    checked_sub,
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize
);
checked_impl_binary_val!(
    CheckedMulVal,
    checked_mul_val,
    checked_mul,
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_sub_detects_underflow() {
        assert_eq!(0u32.checked_sub_val(1), None);
        assert_eq!(i64::MIN.checked_sub_val(1), None);
        assert_eq!(10i64.checked_sub_val(3), Some(7));
    }

    #[test]
    fn test_checked_mul_detects_overflow() {
        assert_eq!(i64::MAX.checked_mul_val(3), None);
        assert_eq!((-4i64).checked_mul_val(3), Some(-12));
    }
}
