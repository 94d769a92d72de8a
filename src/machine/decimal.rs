//! Decimal floating-point test double.
//!
//! Seven significant digits, adjusted exponents in [-98, 98], and results
//! that flush to zero below the normalized range. Overflow panics.

use std::cmp::Ordering;
use std::ops::{Add, Div, Mul, Neg, Sub};

use super::Arithmetic;

const DIGITS: u32 = 7;
const MIN_ADJUSTED: i32 = -98;
const MAX_ADJUSTED: i32 = 98;

const UNIT: i64 = 10i64.pow(DIGITS - 1);
const LIMIT: i128 = 10i128.pow(DIGITS);

/// A decimal number `mant * 10^exp` with `mant` normalized to exactly
/// [`DIGITS`] digits. When `CHOP` is set results are truncated instead of
/// rounded half to even.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decimal<const CHOP: bool> {
    neg: bool,
    mant: i64,
    exp: i32,
}

pub type RoundedDecimal = Decimal<false>;
pub type ChoppedDecimal = Decimal<true>;

fn decimal_digits(mut mag: i128) -> u32 {
    let mut digits = 0;

    while mag > 0 {
        mag /= 10;
        digits += 1;
    }

    digits
}

impl<const CHOP: bool> Decimal<CHOP> {
    const ZERO_VALUE: Self = Decimal {
        neg: false,
        mant: 0,
        exp: 0,
    };

    pub fn new(mant: i64, exp: i32) -> Self {
        Self::round(mant < 0, i128::from(mant.unsigned_abs()), exp, false)
    }

    /// Rounds `mag * 10^exp` to the working precision. `sticky` records
    /// that the exact magnitude lies strictly between `mag` and `mag + 1`.
    fn round(neg: bool, mag: i128, mut exp: i32, sticky: bool) -> Self {
        if mag == 0 {
            return Self::ZERO_VALUE;
        }

        let digits = decimal_digits(mag);

        let mant = if digits > DIGITS {
            let shift = digits - DIGITS;
            let scale = 10i128.pow(shift);

            let mut q = mag / scale;
            let r = mag % scale;

            if !CHOP {
                let twice = 2 * r;

                if twice > scale || (twice == scale && (sticky || q % 2 == 1))
                {
                    q += 1;
                }
            }

            exp += shift as i32;

            if q == LIMIT {
                q /= 10;
                exp += 1;
            }

            q
        } else {
            let shift = DIGITS - digits;

            exp -= shift as i32;

            mag * 10i128.pow(shift)
        };

        let adjusted = exp + (DIGITS as i32 - 1);

        if adjusted < MIN_ADJUSTED {
            return Self::ZERO_VALUE;
        }

        assert!(adjusted <= MAX_ADJUSTED, "decimal overflow");

        Decimal {
            neg,
            mant: mant as i64,
            exp,
        }
    }

    fn is_zero(&self) -> bool {
        self.mant == 0
    }
}

impl<const CHOP: bool> Neg for Decimal<CHOP> {
    type Output = Self;

    fn neg(self) -> Self {
        if self.is_zero() {
            self
        } else {
            Decimal {
                neg: !self.neg,
                ..self
            }
        }
    }
}

impl<const CHOP: bool> Add for Decimal<CHOP> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        if self.is_zero() {
            return rhs;
        }

        if rhs.is_zero() {
            return self;
        }

        let (big, small) = if self.exp >= rhs.exp {
            (self, rhs)
        } else {
            (rhs, self)
        };

        let shift = (big.exp - small.exp) as u32;
        let same_sign = big.neg == small.neg;

        // Beyond this distance the smaller operand only breaks ties.
        let (signed, exp, sticky) = if shift <= 2 * DIGITS + 2 {
            let wide = i128::from(big.mant) * 10i128.pow(shift);
            let narrow = i128::from(small.mant);

            let signed = if same_sign {
                wide + narrow
            } else {
                wide - narrow
            };

            (signed, small.exp, false)
        } else {
            let wide = i128::from(big.mant) * 10i128.pow(DIGITS + 2);
            let signed = if same_sign { wide } else { wide - 1 };

            (signed, big.exp - (DIGITS + 2) as i32, true)
        };

        match signed.cmp(&0) {
            Ordering::Equal => Self::ZERO_VALUE,
            Ordering::Greater => Self::round(big.neg, signed, exp, sticky),
            Ordering::Less => Self::round(small.neg, -signed, exp, sticky),
        }
    }
}

impl<const CHOP: bool> Sub for Decimal<CHOP> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl<const CHOP: bool> Mul for Decimal<CHOP> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        if self.is_zero() || rhs.is_zero() {
            return Self::ZERO_VALUE;
        }

        let mag = i128::from(self.mant) * i128::from(rhs.mant);

        Self::round(self.neg != rhs.neg, mag, self.exp + rhs.exp, false)
    }
}

impl<const CHOP: bool> Div for Decimal<CHOP> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        assert!(!rhs.is_zero(), "decimal division by zero");

        if self.is_zero() {
            return Self::ZERO_VALUE;
        }

        let extra = DIGITS + 3;
        let numer = i128::from(self.mant) * 10i128.pow(extra);
        let denom = i128::from(rhs.mant);

        Self::round(
            self.neg != rhs.neg,
            numer / denom,
            self.exp - rhs.exp - extra as i32,
            numer % denom != 0,
        )
    }
}

impl<const CHOP: bool> PartialOrd for Decimal<CHOP> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let sign = |d: &Self| match (d.is_zero(), d.neg) {
            (true, _) => 0,
            (false, true) => -1,
            (false, false) => 1,
        };

        let ordering = match sign(self).cmp(&sign(other)) {
            Ordering::Equal if self.is_zero() => Ordering::Equal,
            Ordering::Equal => {
                let mag =
                    (self.exp, self.mant).cmp(&(other.exp, other.mant));

                if self.neg {
                    mag.reverse()
                } else {
                    mag
                }
            }
            ordering => ordering,
        };

        Some(ordering)
    }
}

impl<const CHOP: bool> Arithmetic for Decimal<CHOP> {
    const ZERO: Self = Self::ZERO_VALUE;
    const ONE: Self = Decimal {
        neg: false,
        mant: UNIT,
        exp: -(DIGITS as i32 - 1),
    };

    fn from_i32(n: i32) -> Self {
        Self::new(i64::from(n), 0)
    }

    fn trunc_to_i32(self) -> i32 {
        let mant = i128::from(self.mant);

        let mag = match self.exp {
            exp if exp >= 0 => mant * 10i128.pow(exp.unsigned_abs().min(30)),
            exp if exp < -18 => 0,
            exp => mant / 10i128.pow(exp.unsigned_abs()),
        };

        let value = if self.neg { -mag } else { mag };

        let saturated = if self.neg { i32::MIN } else { i32::MAX };

        i32::try_from(value).unwrap_or(saturated)
    }

    fn abs(self) -> Self {
        Decimal { neg: false, ..self }
    }

    fn to_f64(self) -> f64 {
        let mag = self.mant as f64 * 10f64.powi(self.exp);

        if self.neg {
            -mag
        } else {
            mag
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type D = RoundedDecimal;

    #[test]
    fn normalization() {
        assert_eq!(D::new(1, 0), D::ONE);
        assert_eq!(D::new(10, -1), D::ONE);
        assert_eq!(D::new(0, 5), D::ZERO);
        assert_eq!(D::new(1, -120), D::ZERO);
    }

    #[test]
    fn rounding_half_even() {
        assert_eq!(D::new(12_345_675, 0), D::new(1_234_568, 1));
        assert_eq!(D::new(12_345_665, 0), D::new(1_234_566, 1));
        assert_eq!(D::new(12_345_666, 0), D::new(1_234_567, 1));
        assert_eq!(
            ChoppedDecimal::new(12_345_679, 0),
            ChoppedDecimal::new(1_234_567, 1)
        );
    }

    #[test]
    fn arithmetic() {
        let two = D::from_i32(2);
        let three = D::from_i32(3);

        assert_eq!(two + three, D::from_i32(5));
        assert_eq!(two - three, D::from_i32(-1));
        assert_eq!(two * three, D::from_i32(6));
        assert_eq!(D::ONE / three, D::new(3_333_333, -7));
        assert_eq!(two / three, D::new(6_666_667, -7));

        // Absorbed addend.
        assert_eq!(D::new(1, 10) + D::ONE, D::new(1, 10));
        assert_eq!(D::ONE - D::new(1, -10), D::ONE);
    }

    #[test]
    fn ordering() {
        assert!(D::from_i32(-3) < D::from_i32(2));
        assert!(D::new(1, -5) < D::new(2, -5));
        assert!(D::new(-1, -5) > D::new(-2, -5));
        assert!(D::ZERO < D::new(1, -90));
        assert_eq!(D::from_i32(-7).abs(), D::from_i32(7));
        assert_eq!(D::new(375, -1).trunc_to_i32(), 37);
    }
}
