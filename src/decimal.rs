// Copyright 2021 CoD Technologies Corp.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Fixed-scale decimal implementation.

use crate::error::DecimalConvertError;
use ethnum::U256;
use stack_buf::StackVec;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Maximum precision of `Decimal`.
pub const MAX_PRECISION: u32 = 38;
/// Maximum scale of `Decimal`.
pub const MAX_SCALE: u8 = 38;

pub(crate) const MAX_COEFFICIENT: u128 = 99_9999_9999_9999_9999_9999_9999_9999_9999_9999_u128;

pub(crate) const POWERS_10: [u128; MAX_PRECISION as usize + 1] = powers_of_ten();

const fn powers_of_ten() -> [u128; MAX_PRECISION as usize + 1] {
    let mut table = [1u128; MAX_PRECISION as usize + 1];
    let mut i = 1;
    while i < table.len() {
        table[i] = table[i - 1] * 10;
        i += 1;
    }
    table
}

/// ASCII digits of a coefficient, most significant first.
pub(crate) type DigitBuf = StackVec<u8, 40>;

pub(crate) type Buf = StackVec<u8, 128>;

/// How to drop fractional digits when the scale is lowered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Round half away from zero, as COBOL `ROUNDED` does.
    HalfUp,
    /// Round half toward zero.
    HalfDown,
    /// Round half to the even neighbour.
    HalfEven,
    /// Truncate toward zero, as a plain COBOL `MOVE` does.
    Down,
    /// Round away from zero.
    Up,
}

impl Default for RoundingMode {
    #[inline]
    fn default() -> Self {
        RoundingMode::HalfUp
    }
}

/// Exact decimal with an explicit scale.
///
/// The value is `int_val * 10^-scale`. Trailing fractional zeros are kept,
/// so `"1.50"` and `"1.5"` compare equal but print differently.
#[derive(Copy, Clone, Debug, Eq)]
pub struct Decimal {
    pub(crate) int_val: u128,
    pub(crate) scale: u8,
    pub(crate) negative: bool,
}

impl Decimal {
    /// Zero value, i.e. `0`.
    pub const ZERO: Decimal = Decimal {
        int_val: 0,
        scale: 0,
        negative: false,
    };

    /// i.e. `1`.
    pub const ONE: Decimal = Decimal {
        int_val: 1,
        scale: 0,
        negative: false,
    };

    /// Creates a `Decimal` from parts the caller has already bounds checked.
    #[inline]
    pub(crate) const fn from_parts_unchecked(int_val: u128, scale: u8, negative: bool) -> Decimal {
        Decimal {
            int_val,
            scale,
            negative: negative && int_val != 0,
        }
    }

    /// Creates a `Decimal` from parts.
    ///
    /// `int_val` has at most 38 tens digits, `scale` ranges from `[0, 38]`.
    #[inline]
    pub const fn from_parts(int_val: u128, scale: u8, negative: bool) -> Result<Decimal, DecimalConvertError> {
        if int_val > MAX_COEFFICIENT || scale > MAX_SCALE {
            return Err(DecimalConvertError::Overflow);
        }

        Ok(Decimal::from_parts_unchecked(int_val, scale, negative))
    }

    /// Consumes the `Decimal`, returning `(int_val, scale, negative)`.
    #[inline]
    pub const fn into_parts(self) -> (u128, u8, bool) {
        (self.int_val, self.scale, self.negative)
    }

    /// Returns the precision, i.e. the count of significant digits in this decimal.
    #[inline]
    pub fn precision(&self) -> u32 {
        count_digits(self.int_val)
    }

    /// Returns the count of digits left of the decimal point, `0` for `0.xx`.
    #[inline]
    pub fn integer_digits(&self) -> u32 {
        if self.is_zero() {
            return 0;
        }
        self.precision().saturating_sub(self.scale as u32)
    }

    /// Returns the scale, i.e. the count of decimal digits in the fractional part.
    #[inline]
    pub const fn scale(&self) -> u8 {
        self.scale
    }

    /// Returns `true` if the sign bit of the decimal is negative.
    #[inline]
    pub const fn is_sign_negative(&self) -> bool {
        self.negative
    }

    /// Returns `true` if the sign bit of the decimal is positive.
    #[inline]
    pub const fn is_sign_positive(&self) -> bool {
        !self.negative
    }

    /// Returns `true` if `self` is less than zero. Zero is never negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.negative
    }

    /// Checks if `self` is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.int_val == 0
    }

    /// Computes the absolute value of `self`.
    #[inline]
    pub const fn abs(&self) -> Decimal {
        let mut abs_val = *self;
        abs_val.negative = false;
        abs_val
    }

    /// Returns `self` with the sign flipped.
    #[inline]
    pub const fn negate(&self) -> Decimal {
        Decimal::from_parts_unchecked(self.int_val, self.scale, !self.negative)
    }

    /// Rescales `self` to exactly `scale` fractional digits.
    ///
    /// Lowering the scale rounds with `mode`, raising it appends zeros.
    /// Fails with [`DecimalConvertError::Overflow`] if the result would need
    /// more than [`MAX_PRECISION`] digits.
    pub fn to_fixed_scale(&self, scale: u8, mode: RoundingMode) -> Result<Decimal, DecimalConvertError> {
        if scale > MAX_SCALE {
            return Err(DecimalConvertError::Overflow);
        }

        match scale.cmp(&self.scale) {
            Ordering::Equal => Ok(*self),
            Ordering::Greater => {
                let e = (scale - self.scale) as usize;
                let int_val = self
                    .int_val
                    .checked_mul(POWERS_10[e])
                    .ok_or(DecimalConvertError::Overflow)?;
                Decimal::from_parts(int_val, scale, self.negative)
            }
            Ordering::Less => {
                let divisor = POWERS_10[(self.scale - scale) as usize];
                let quotient = self.int_val / divisor;
                let remainder = self.int_val % divisor;
                let half = divisor / 2;

                let carry = match mode {
                    RoundingMode::Down => false,
                    RoundingMode::Up => remainder != 0,
                    RoundingMode::HalfUp => remainder >= half,
                    RoundingMode::HalfDown => remainder > half,
                    RoundingMode::HalfEven => remainder > half || (remainder == half && quotient % 2 == 1),
                };

                Decimal::from_parts(quotient + carry as u128, scale, self.negative)
            }
        }
    }

    /// Round a value to have `scale` digits after the decimal point, half away from zero.
    #[inline]
    pub fn round(&self, scale: u8) -> Result<Decimal, DecimalConvertError> {
        self.to_fixed_scale(scale, RoundingMode::HalfUp)
    }

    /// Truncate a value to have at most `scale` digits after the decimal point.
    #[inline]
    pub fn trunc(&self, scale: u8) -> Decimal {
        if self.scale <= scale {
            return *self;
        }

        let int_val = self.int_val / POWERS_10[(self.scale - scale) as usize];
        Decimal::from_parts_unchecked(int_val, scale, self.negative)
    }

    /// Normalize a `Decimal`'s scale toward zero by dropping trailing fractional zeros.
    #[inline]
    pub fn normalize(&self) -> Decimal {
        if self.is_zero() {
            return Decimal::ZERO;
        }

        let mut scale = self.scale;
        let mut int_val = self.int_val;

        while scale > 0 && int_val % 10 == 0 {
            int_val /= 10;
            scale -= 1;
        }

        Decimal::from_parts_unchecked(int_val, scale, self.negative)
    }

    #[inline]
    fn rescale_cmp(&self, other: &Decimal) -> Ordering {
        debug_assert!(self.scale < other.scale);

        let e = (other.scale - self.scale) as usize;
        let self_int_val = U256::new(self.int_val) * U256::new(POWERS_10[e]);
        self_int_val.cmp(&U256::new(other.int_val))
    }

    /// Brings both coefficients to the larger of the two scales.
    #[inline]
    fn aligned(&self, other: &Decimal) -> (U256, U256, u32) {
        let scale = self.scale.max(other.scale);
        let left = U256::new(self.int_val) * U256::new(POWERS_10[(scale - self.scale) as usize]);
        let right = U256::new(other.int_val) * U256::new(POWERS_10[(scale - other.scale) as usize]);
        (left, right, scale as u32)
    }

    /// Drops trailing fractional zeros until the coefficient and scale fit.
    fn fit_exact(mut int_val: U256, mut scale: u32, negative: bool) -> Option<Decimal> {
        let ten = U256::new(10);
        let max = U256::new(MAX_COEFFICIENT);

        while (scale > MAX_SCALE as u32 || int_val > max) && scale > 0 && int_val % ten == U256::ZERO {
            int_val /= ten;
            scale -= 1;
        }

        if scale > MAX_SCALE as u32 || int_val > max {
            return None;
        }

        let (_, low) = int_val.into_words();
        Some(Decimal::from_parts_unchecked(low, scale as u8, negative))
    }

    /// Add two decimals,
    /// returning `None` if the exact sum does not fit.
    ///
    /// The sum keeps the larger scale of the operands. Trailing fractional
    /// zeros are dropped only when that is what makes it fit.
    #[inline]
    pub fn checked_add(&self, other: Decimal) -> Option<Decimal> {
        let (left, right, scale) = self.aligned(&other);

        let (int_val, negative) = if self.negative == other.negative {
            (left + right, self.negative)
        } else if left >= right {
            (left - right, self.negative)
        } else {
            (right - left, other.negative)
        };

        Decimal::fit_exact(int_val, scale, negative)
    }

    /// Subtract one decimal from another,
    /// returning `None` if the exact difference does not fit.
    #[inline]
    pub fn checked_sub(&self, other: Decimal) -> Option<Decimal> {
        self.checked_add(other.negate())
    }

    /// Calculate the product of two decimals,
    /// returning `None` if the exact product does not fit.
    ///
    /// The product's scale is the sum of the operands' scales, less any
    /// trailing fractional zeros that had to go for it to fit.
    #[inline]
    pub fn checked_mul(&self, other: Decimal) -> Option<Decimal> {
        let product = U256::new(self.int_val) * U256::new(other.int_val);
        Decimal::fit_exact(product, self.scale as u32 + other.scale as u32, self.negative ^ other.negative)
    }

    /// Returns the ASCII digits of the coefficient.
    #[inline]
    pub(crate) fn coefficient_digits(&self) -> DigitBuf {
        use std::fmt::Write;

        let mut buf = DigitBuf::new();
        write!(&mut buf, "{}", self.int_val).expect("coefficient fits in digit buffer");
        buf
    }

    /// Writes the unsigned value with exactly `scale` fractional digits.
    ///
    /// `grouping` inserts a separator between every three integer digits.
    pub(crate) fn fmt_unsigned<W: fmt::Write>(
        &self,
        decimal_point: char,
        grouping: Option<char>,
        mut w: W,
    ) -> fmt::Result {
        let digits = self.coefficient_digits();
        let digits = digits.as_slice();
        let scale = self.scale as usize;

        let (int_digits, leading_zeros, frac_digits): (&[u8], usize, &[u8]) = if digits.len() > scale {
            let (int_digits, frac_digits) = digits.split_at(digits.len() - scale);
            (int_digits, 0, frac_digits)
        } else {
            (b"0", scale - digits.len(), digits)
        };

        let int_len = int_digits.len();
        for (i, &digit) in int_digits.iter().enumerate() {
            if let Some(sep) = grouping {
                if i > 0 && (int_len - i) % 3 == 0 {
                    w.write_char(sep)?;
                }
            }
            w.write_char(digit as char)?;
        }

        if scale > 0 {
            w.write_char(decimal_point)?;
            for _ in 0..leading_zeros {
                w.write_char('0')?;
            }
            for &digit in frac_digits {
                w.write_char(digit as char)?;
            }
        }

        Ok(())
    }
}

#[inline]
pub(crate) fn count_digits(val: u128) -> u32 {
    match POWERS_10.iter().position(|&p| val < p) {
        Some(0) => 1,
        Some(n) => n as u32,
        None => MAX_PRECISION + 1,
    }
}

impl fmt::Display for Decimal {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut buf = Buf::new();
        self.fmt_unsigned('.', None, &mut buf)?;
        let str = std::str::from_utf8(buf.as_slice()).map_err(|_| fmt::Error)?;
        f.pad_integral(self.is_sign_positive(), "", str)
    }
}

impl Default for Decimal {
    #[inline]
    fn default() -> Self {
        Decimal::ZERO
    }
}

impl PartialEq for Decimal {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialEq<&Decimal> for Decimal {
    #[inline]
    fn eq(&self, other: &&Decimal) -> bool {
        self.eq(*other)
    }
}

impl PartialEq<Decimal> for &Decimal {
    #[inline]
    fn eq(&self, other: &Decimal) -> bool {
        (*self).eq(other)
    }
}

impl PartialOrd for Decimal {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        // sign is different
        if self.negative != other.negative {
            return if self.negative {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }

        let (left, right) = if self.negative {
            // both are negative, so reverse cmp
            (other, self)
        } else {
            (self, other)
        };

        if left.scale == right.scale {
            return left.int_val.cmp(&right.int_val);
        }

        if left.scale < right.scale {
            left.rescale_cmp(right)
        } else {
            right.rescale_cmp(left).reverse()
        }
    }
}

impl Hash for Decimal {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        let n = self.normalize();
        n.int_val.hash(state);
        n.scale.hash(state);
        n.negative.hash(state);
    }
}
