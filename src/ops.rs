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

//! Ops implementation.
//!
//! The operators panic when the exact result does not fit; use the
//! `checked_*` methods to handle that case.

use crate::decimal::Decimal;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

impl Neg for Decimal {
    type Output = Decimal;

    #[inline]
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Neg for &'_ Decimal {
    type Output = Decimal;

    #[inline]
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Add<Decimal> for &'_ Decimal {
    type Output = Decimal;

    #[inline(always)]
    fn add(self, other: Decimal) -> Self::Output {
        match self.checked_add(other) {
            Some(sum) => sum,
            None => panic!("Addition overflowed"),
        }
    }
}

impl Sub<Decimal> for &'_ Decimal {
    type Output = Decimal;

    #[inline(always)]
    fn sub(self, other: Decimal) -> Decimal {
        match self.checked_sub(other) {
            Some(diff) => diff,
            None => panic!("Subtraction overflowed"),
        }
    }
}

impl Mul<Decimal> for &'_ Decimal {
    type Output = Decimal;

    #[inline(always)]
    fn mul(self, other: Decimal) -> Decimal {
        match self.checked_mul(other) {
            Some(prod) => prod,
            None => panic!("Multiplication overflowed"),
        }
    }
}

macro_rules! impl_arith_with_num {
    ($op: ident { $method: ident } $int: ty) => {
        impl $op<$int> for Decimal {
            type Output = Decimal;

            #[inline(always)]
            fn $method(self, other: $int) -> Self::Output {
                self.$method(Decimal::from(other))
            }
        }

        impl $op<Decimal> for $int {
            type Output = Decimal;

            #[inline(always)]
            fn $method(self, other: Decimal) -> Self::Output {
                Decimal::from(self).$method(other)
            }
        }
    };
    ($op: ident { $method: ident } $($int: ty), * $(,)?) => {
        $(impl_arith_with_num!($op { $method } $int);)*
    };
}

macro_rules! impl_arith {
    ($op: ident { $method: ident }, $assign_op: ident { $assign_method: ident }) => {
        impl $op for Decimal {
            type Output = Decimal;

            #[inline(always)]
            fn $method(self, other: Self) -> Self::Output {
                (&self).$method(other)
            }
        }

        impl $op<&'_ Decimal> for Decimal {
            type Output = Decimal;

            #[inline(always)]
            fn $method(self, other: &Decimal) -> Self::Output {
                (&self).$method(*other)
            }
        }

        impl $op<&'_ Decimal> for &'_ Decimal {
            type Output = Decimal;

            #[inline(always)]
            fn $method(self, other: &Decimal) -> Self::Output {
                self.$method(*other)
            }
        }

        impl $assign_op for Decimal {
            #[inline(always)]
            fn $assign_method(&mut self, other: Decimal) {
                *self = (&*self).$method(other);
            }
        }

        impl_arith_with_num!($op { $method } u8, u16, u32, u64, i8, i16, i32, i64);
    };
}

impl_arith!(Add { add }, AddAssign { add_assign });
impl_arith!(Sub { sub }, SubAssign { sub_assign });
impl_arith!(Mul { mul }, MulAssign { mul_assign });

impl Sum for Decimal {
    #[inline(always)]
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Decimal::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Decimal> for Decimal {
    #[inline(always)]
    fn sum<I: Iterator<Item = &'a Decimal>>(iter: I) -> Self {
        iter.fold(Decimal::ZERO, |acc, x| acc + x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_neg() {
        fn assert_neg(val: &str, expected: &str) {
            let val = dec(val);
            let expected = dec(expected);
            assert_eq!(-val, expected);
            assert_eq!(-&val, expected);
        }

        assert_neg("0.00", "0");
        assert_neg("1", "-1");
        assert_neg("-1", "1");
        assert_neg("123.45", "-123.45");
    }

    #[test]
    fn test_add() {
        fn assert_add(val1: &str, val2: &str, expected: &str) {
            let var1 = dec(val1);
            let var2 = dec(val2);

            let result = var1 + var2;
            assert_eq!(result.to_string(), expected);

            let mut acc = var1;
            acc += var2;
            assert_eq!(acc.to_string(), expected);
        }

        assert_add("0", "0", "0");
        assert_add("1.05", "2.1", "3.15");
        assert_add("-1.05", "2.1", "1.05");
        assert_add("100.00", "-100", "0.00");
        assert_add("99999999999999999999999999999999999998", "1", "99999999999999999999999999999999999999");
        assert_eq!((dec("1.5") + 2i32).to_string(), "3.5");
        assert_eq!((2u8 + dec("1.5")).to_string(), "3.5");
    }

    #[test]
    #[should_panic(expected = "Addition overflowed")]
    fn test_add_overflow() {
        let _ = dec("99999999999999999999999999999999999999") + Decimal::ONE;
    }

    #[test]
    fn test_sub() {
        fn assert_sub(val1: &str, val2: &str, expected: &str) {
            let var1 = dec(val1);
            let var2 = dec(val2);

            let result = var1 - var2;
            assert_eq!(result.to_string(), expected);

            let mut acc = var1;
            acc -= var2;
            assert_eq!(acc.to_string(), expected);
        }

        assert_sub("0", "0", "0");
        assert_sub("3.15", "2.1", "1.05");
        assert_sub("2.1", "3.15", "-1.05");
        assert_sub("-2.1", "-3.15", "1.05");
        assert_sub("-2.1", "3.15", "-5.25");
        assert_eq!((dec("1.5") - 2i64).to_string(), "-0.5");
    }

    #[test]
    fn test_mul() {
        fn assert_mul(val1: &str, val2: &str, expected: &str) {
            let var1 = dec(val1);
            let var2 = dec(val2);

            let result = var1 * var2;
            assert_eq!(result.to_string(), expected);

            let mut acc = var1;
            acc *= var2;
            assert_eq!(acc.to_string(), expected);
        }

        assert_mul("0", "12.5", "0.0");
        assert_mul("1.25", "4", "5.00");
        assert_mul("-1.25", "0.4", "-0.500");
        assert_mul("-1.25", "-1.25", "1.5625");
        assert_eq!((dec("19.99") * 3u32).to_string(), "59.97");
    }

    #[test]
    #[should_panic(expected = "Multiplication overflowed")]
    fn test_mul_overflow() {
        let _ = dec("99999999999999999999999999999999999999") * dec("1.1");
    }

    #[test]
    fn test_sum() {
        let values = [dec("1.10"), dec("2.20"), dec("-0.30")];
        let total: Decimal = values.iter().sum();
        assert_eq!(total.to_string(), "3.00");
        let total: Decimal = values.iter().copied().sum();
        assert_eq!(total.to_string(), "3.00");
    }
}
