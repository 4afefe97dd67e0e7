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

//! Decimal parsing utilities.

use crate::decimal::{MAX_PRECISION, MAX_SCALE};
use crate::error::DecimalParseError;
use crate::Decimal;
use std::str::FromStr;

#[derive(Debug, PartialEq)]
enum Sign {
    Positive,
    Negative,
}

/// The interesting parts of a decimal string.
#[derive(Debug)]
struct Parts<'a> {
    pub sign: Sign,
    pub integral: &'a [u8],
    pub fractional: &'a [u8],
}

/// Splits a decimal string bytes into sign and the rest, without inspecting or validating the rest.
#[inline]
fn extract_sign(s: &[u8]) -> (Sign, &[u8]) {
    match s.first() {
        Some(b'+') => (Sign::Positive, &s[1..]),
        Some(b'-') => (Sign::Negative, &s[1..]),
        _ => (Sign::Positive, s),
    }
}

/// Carves off decimal digits up to the first non-digit character.
#[inline]
pub(crate) fn eat_digits(s: &[u8]) -> (&[u8], &[u8]) {
    let i = s.iter().take_while(|&i| i.is_ascii_digit()).count();
    (&s[..i], &s[i..])
}

/// Carves off leading `'0'` digits.
#[inline]
pub(crate) fn strip_leading_zeros(s: &[u8]) -> &[u8] {
    let i = s.iter().take_while(|&&i| i == b'0').count();
    &s[i..]
}

/// Checks if the input string is a valid decimal and if so, locate the integral
/// part and the fractional part in it.
fn parse_decimal(s: &[u8]) -> Result<(Parts, &[u8]), DecimalParseError> {
    let (sign, s) = extract_sign(s);

    if s.is_empty() {
        return Err(DecimalParseError::Invalid);
    }

    let (integral, s) = eat_digits(s);

    let (fractional, s) = match s.first() {
        Some(&b'.') => {
            let (fractional, s) = eat_digits(&s[1..]);
            if integral.is_empty() && fractional.is_empty() {
                return Err(DecimalParseError::Invalid);
            }
            (fractional, s)
        }
        _ => {
            if integral.is_empty() {
                return Err(DecimalParseError::Invalid);
            }
            (&b""[..], s)
        }
    };

    Ok((
        Parts {
            sign,
            integral: strip_leading_zeros(integral),
            fractional,
        },
        s,
    ))
}

/// Carves off whitespaces up to the first non-whitespace character.
#[inline]
fn eat_whitespaces(s: &[u8]) -> &[u8] {
    let i = s.iter().take_while(|&i| i.is_ascii_whitespace()).count();
    &s[i..]
}

/// Parses a string bytes and put the number into this variable.
///
/// This function does not handle leading or trailing spaces. It returns the
/// remaining string bytes so that caller can check for trailing
/// spaces/garbage if deemed necessary.
#[inline]
fn parse_str(s: &[u8]) -> Result<(Decimal, &[u8]), DecimalParseError> {
    let (
        Parts {
            sign,
            integral,
            fractional,
        },
        s,
    ) = parse_decimal(s)?;

    if fractional.len() > MAX_SCALE as usize {
        return Err(DecimalParseError::Overflow);
    }

    let significant = if integral.is_empty() {
        strip_leading_zeros(fractional).len()
    } else {
        integral.len() + fractional.len()
    };
    if significant > MAX_PRECISION as usize {
        return Err(DecimalParseError::Overflow);
    }

    let mut int = 0u128;
    for &i in integral.iter().chain(fractional) {
        int = int * 10 + (i - b'0') as u128;
    }
    // So far, `int` precision does not exceed MAX_PRECISION.

    let negative = sign == Sign::Negative;
    Ok((
        Decimal::from_parts_unchecked(int, fractional.len() as u8, negative),
        s,
    ))
}

/// Parses a string slice and creates a decimal.
///
/// This function handles leading or trailing spaces.
#[inline]
fn from_str(s: &str) -> Result<Decimal, DecimalParseError> {
    let s = s.as_bytes();
    let s = eat_whitespaces(s);
    if s.is_empty() {
        return Err(DecimalParseError::Empty);
    }

    let (n, s) = parse_str(s)?;

    if s.iter().any(|n| !n.is_ascii_whitespace()) {
        return Err(DecimalParseError::Invalid);
    }

    Ok(n)
}

impl FromStr for Decimal {
    type Err = DecimalParseError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_str(s)
    }
}
