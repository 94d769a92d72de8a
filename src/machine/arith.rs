//! Arithmetic seam for the machine prober.

use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Sub};

/// A floating-point representation that can be probed.
///
/// Only the four basic operations, comparisons, and a handful of
/// conversions are required. The prober never inspects the encoding.
pub trait Arithmetic:
    Copy
    + Debug
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    const ZERO: Self;
    const ONE: Self;

    /// Significand width declared by the type, if any.
    const MANTISSA_DIGITS: Option<u32> = None;

    fn from_i32(n: i32) -> Self;

    /// Converts to an integer, truncating towards zero.
    fn trunc_to_i32(self) -> i32;

    fn abs(self) -> Self;

    fn to_f64(self) -> f64;
}

macro_rules! impl_arithmetic {
    ($($t:ty),*) => {
        $(
            impl Arithmetic for $t {
                const ZERO: Self = 0.0;
                const ONE: Self = 1.0;

                const MANTISSA_DIGITS: Option<u32> =
                    Some(<$t>::MANTISSA_DIGITS);

                #[inline]
                fn from_i32(n: i32) -> Self {
                    n as $t
                }

                #[inline]
                fn trunc_to_i32(self) -> i32 {
                    self as i32
                }

                #[inline]
                fn abs(self) -> Self {
                    <$t>::abs(self)
                }

                #[inline]
                fn to_f64(self) -> f64 {
                    f64::from(self)
                }
            }
        )*
    };
}

impl_arithmetic!(f32, f64);
