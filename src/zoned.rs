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

//! Zoned decimal encoding and decoding with an overpunched sign.
//!
//! One character per digit. Every character but the last is a plain digit,
//! the last one carries both its digit and the sign of the whole number:
//!
//! | digit | 0   | 1 | 2 | 3 | 4 | 5 | 6 | 7 | 8 | 9 |
//! |-------|-----|---|---|---|---|---|---|---|---|---|
//! | `+`   | `{` | A | B | C | D | E | F | G | H | I |
//! | `-`   | `}` | J | K | L | M | N | O | P | Q | R |
//!
//! So `+12345` in `S9(5)` is `"1234E"` and `-12345` is `"1234N"`.

use crate::config::{self, CodecConfig};
use crate::decimal::{Decimal, MAX_PRECISION, MAX_SCALE};
use crate::error::CodecError;
use crate::Result;
use std::fmt;
use std::str::FromStr;

const POSITIVE_OVERPUNCH: [u8; 10] = *b"{ABCDEFGHI";
const NEGATIVE_OVERPUNCH: [u8; 10] = *b"}JKLMNOPQR";

/// Returns the overpunch character for a trailing `digit` (0-9).
#[inline]
pub fn overpunch(digit: u8, negative: bool) -> char {
    debug_assert!(digit <= 9);
    let table = if negative {
        &NEGATIVE_OVERPUNCH
    } else {
        &POSITIVE_OVERPUNCH
    };
    table[digit as usize] as char
}

/// Splits an overpunch character into its digit and sign (`true` for negative).
#[inline]
pub fn read_overpunch(ch: char) -> Option<(u8, bool)> {
    if !ch.is_ascii() {
        return None;
    }
    let b = ch as u8;
    if let Some(digit) = POSITIVE_OVERPUNCH.iter().position(|&c| c == b) {
        return Some((digit as u8, false));
    }
    NEGATIVE_OVERPUNCH
        .iter()
        .position(|&c| c == b)
        .map(|digit| (digit as u8, true))
}

/// A validated zoned decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZonedDecimal(String);

impl ZonedDecimal {
    /// Validates `s` as zoned decimal text.
    pub fn new<S: Into<String>>(s: S) -> Result<ZonedDecimal> {
        let s = s.into();
        scan(&s)?;
        Ok(ZonedDecimal(s))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Number of digits, which is the number of characters.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the trailing character is a negative overpunch.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0
            .chars()
            .last()
            .and_then(read_overpunch)
            .map_or(false, |(_, negative)| negative)
    }

    /// Decodes the value with `scale` fractional digits.
    #[inline]
    pub fn decode(&self, scale: u8) -> Result<Decimal> {
        decode(&self.0, scale)
    }
}

impl FromStr for ZonedDecimal {
    type Err = CodecError;

    #[inline]
    fn from_str(s: &str) -> Result<Self> {
        ZonedDecimal::new(s)
    }
}

impl fmt::Display for ZonedDecimal {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ZonedDecimal {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validates the characters and returns the coefficient and the sign.
fn scan(input: &str) -> Result<(u128, bool)> {
    let (last_pos, last) = input.char_indices().last().ok_or(CodecError::EmptyField)?;

    let mut int_val = 0u128;
    let mut significant = 0usize;
    let mut push = |digit: u8| {
        if significant > 0 || digit != 0 {
            significant += 1;
            if significant <= MAX_PRECISION as usize {
                int_val = int_val * 10 + digit as u128;
            }
        }
    };

    for (position, ch) in input[..last_pos].chars().enumerate() {
        match ch.to_digit(10) {
            Some(digit) => push(digit as u8),
            _ => return Err(CodecError::InvalidZonedDigit { ch, position }),
        }
    }

    let (digit, negative) = read_overpunch(last).ok_or(CodecError::InvalidOverpunchCharacter(last))?;
    push(digit);

    if significant > MAX_PRECISION as usize {
        return Err(CodecError::exceeds(significant, MAX_PRECISION as usize));
    }

    Ok((int_val, negative))
}

#[inline]
fn check_width(digit_count: usize) -> Result<()> {
    if digit_count == 0 || digit_count > MAX_PRECISION as usize {
        return Err(CodecError::InvalidFieldSpec(format!(
            "zoned decimal field needs 1 to {} digits, got {}",
            MAX_PRECISION, digit_count
        )));
    }
    Ok(())
}

/// Encodes the coefficient of `value` as `digit_count` zoned characters.
///
/// The value keeps its own scale, so `1.50` encodes the digits `150`.
/// `digit_count` must be between 1 and [`MAX_PRECISION`].
pub fn encode(value: &Decimal, digit_count: usize) -> Result<ZonedDecimal> {
    check_width(digit_count)?;

    let digits = value.coefficient_digits();
    let digits = digits.as_slice();
    if digits.len() > digit_count {
        return Err(CodecError::exceeds(digits.len(), digit_count));
    }

    let mut zoned = String::with_capacity(digit_count);
    for _ in digits.len()..digit_count {
        zoned.push('0');
    }

    let (&last, init) = digits.split_last().ok_or(CodecError::EmptyField)?;
    zoned.extend(init.iter().map(|&d| d as char));
    zoned.push(overpunch(last - b'0', value.is_negative()));

    Ok(ZonedDecimal(zoned))
}

/// Rescales `value` to `scale` with the global rounding mode, then encodes it.
#[inline]
pub fn encode_scaled(value: &Decimal, digit_count: usize, scale: u8) -> Result<ZonedDecimal> {
    encode_scaled_with(value, digit_count, scale, config::global())
}

/// Rescales `value` to `scale` with `config.rounding`, then encodes it.
pub fn encode_scaled_with(value: &Decimal, digit_count: usize, scale: u8, config: &CodecConfig) -> Result<ZonedDecimal> {
    check_width(digit_count)?;

    let scaled = value
        .to_fixed_scale(scale, config.rounding)
        .map_err(|_| CodecError::exceeds(value.integer_digits() as usize + scale as usize, digit_count))?;
    encode(&scaled, digit_count)
}

/// Decodes zoned decimal text with `scale` fractional digits.
///
/// A plain digit in the last position is rejected, as is any non-digit
/// before it.
pub fn decode(input: &str, scale: u8) -> Result<Decimal> {
    if scale > MAX_SCALE {
        return Err(CodecError::exceeds(scale as usize, MAX_SCALE as usize));
    }

    let (int_val, negative) = scan(input)?;
    Ok(Decimal::from_parts_unchecked(int_val, scale, negative))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn assert_encode(value: &str, digit_count: usize, expected: &str) {
        let zoned = encode(&dec(value), digit_count).unwrap();
        assert_eq!(zoned.as_str(), expected, "encoding {}", value);
    }

    fn assert_decode(input: &str, scale: u8, expected: &str) {
        let value = decode(input, scale).unwrap();
        assert_eq!(value.to_string(), expected, "decoding {}", input);
    }

    #[test]
    fn test_overpunch_table() {
        assert_eq!(overpunch(0, false), '{');
        assert_eq!(overpunch(9, false), 'I');
        assert_eq!(overpunch(0, true), '}');
        assert_eq!(overpunch(1, true), 'J');
        assert_eq!(overpunch(9, true), 'R');
        for digit in 0..=9 {
            assert_eq!(read_overpunch(overpunch(digit, false)), Some((digit, false)));
            assert_eq!(read_overpunch(overpunch(digit, true)), Some((digit, true)));
        }
        assert_eq!(read_overpunch('S'), None);
        assert_eq!(read_overpunch('5'), None);
        assert_eq!(read_overpunch('é'), None);
    }

    #[test]
    fn test_encode() {
        assert_encode("12345", 5, "1234E");
        assert_encode("-12345", 5, "1234N");
        assert_encode("123450", 6, "12345{");
        assert_encode("-123450", 6, "12345}");
        assert_encode("1.50", 5, "0015{");
        assert_encode("0", 3, "00{");
        assert_encode("-0.00", 1, "{");
        assert_encode("-7", 1, "P");
    }

    #[test]
    fn test_encode_errors() {
        assert_eq!(
            encode(&dec("123456"), 5).unwrap_err(),
            CodecError::ValueExceedsCapacity {
                required: 6,
                capacity: 5
            }
        );
        assert!(matches!(
            encode(&dec("1"), 0).unwrap_err(),
            CodecError::InvalidFieldSpec(_)
        ));
        assert!(matches!(
            encode(&dec("1"), 39).unwrap_err(),
            CodecError::InvalidFieldSpec(_)
        ));
        assert!(matches!(
            encode(&dec("1"), usize::MAX).unwrap_err(),
            CodecError::InvalidFieldSpec(_)
        ));
        assert!(matches!(
            encode_scaled(&dec("1.5"), usize::MAX, 2).unwrap_err(),
            CodecError::InvalidFieldSpec(_)
        ));
        assert_eq!(encode(&dec("1"), 38).unwrap().len(), 38);
    }

    #[test]
    fn test_encode_scaled() {
        assert_eq!(encode_scaled(&dec("12.3"), 5, 2).unwrap().as_str(), "0123{");
        assert_eq!(encode_scaled(&dec("-12.345"), 5, 2).unwrap().as_str(), "0123N");
        let down = CodecConfig::default().with_rounding(crate::RoundingMode::Down);
        assert_eq!(
            encode_scaled_with(&dec("-12.349"), 5, 2, &down).unwrap().as_str(),
            "0123M"
        );
        assert!(encode_scaled(&dec("1234.5"), 5, 2).is_err());
    }

    #[test]
    fn test_decode() {
        assert_decode("12345{", 0, "123450");
        assert_decode("12345}", 0, "-123450");
        assert_decode("12345{", 2, "1234.50");
        assert_decode("12345}", 2, "-1234.50");
        assert_decode("1234E", 0, "12345");
        assert_decode("1234N", 2, "-123.45");
        assert_decode("0000{", 2, "0.00");
        assert_decode("0000}", 0, "0");
        assert_decode("R", 0, "-9");
    }

    #[test]
    fn test_decode_sign_swap() {
        let positive = decode("12345{", 0).unwrap();
        let negative = decode("12345}", 0).unwrap();
        assert_eq!(negative, -positive);
        assert_eq!(negative.abs(), positive);
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(decode("", 0).unwrap_err(), CodecError::EmptyField);
        assert_eq!(
            decode("12345", 0).unwrap_err(),
            CodecError::InvalidOverpunchCharacter('5')
        );
        assert_eq!(
            decode("1234S", 0).unwrap_err(),
            CodecError::InvalidOverpunchCharacter('S')
        );
        assert_eq!(
            decode("12A4E", 0).unwrap_err(),
            CodecError::InvalidZonedDigit { ch: 'A', position: 2 }
        );
        assert_eq!(
            decode(" 234E", 0).unwrap_err(),
            CodecError::InvalidZonedDigit { ch: ' ', position: 0 }
        );
        assert_eq!(
            decode("1}34E", 0).unwrap_err(),
            CodecError::InvalidZonedDigit { ch: '}', position: 1 }
        );
        assert!(matches!(
            decode("1{", MAX_SCALE + 1).unwrap_err(),
            CodecError::ValueExceedsCapacity { .. }
        ));

        let too_long = format!("{}{{", "9".repeat(39));
        assert_eq!(
            decode(&too_long, 0).unwrap_err(),
            CodecError::ValueExceedsCapacity {
                required: 40,
                capacity: 38
            }
        );
    }

    #[test]
    fn test_roundtrip() {
        fn assert_roundtrip(value: &str, digit_count: usize) {
            let value = dec(value);
            let zoned = encode(&value, digit_count).unwrap();
            let decoded = zoned.decode(value.scale()).unwrap();
            assert_eq!(decoded, value);
            assert_eq!(decoded.scale(), value.scale());
        }

        assert_roundtrip("0", 1);
        assert_roundtrip("123.45", 5);
        assert_roundtrip("-123.45", 7);
        assert_roundtrip("-0.01", 3);
        assert_roundtrip("9876543210.123456789", 19);
        assert_roundtrip("-99999999999999999999999999999999999999", 38);
    }

    #[test]
    fn test_roundtrip_range() {
        for n in -99_999i64..=99_999 {
            let value = Decimal::from_parts(n.unsigned_abs() as u128, 3, n < 0).unwrap();
            let zoned = encode(&value, 5).unwrap();
            assert_eq!(zoned.len(), 5);
            assert_eq!(zoned.is_negative(), n < 0);
            assert_eq!(decode(zoned.as_str(), 3).unwrap(), value);
        }
    }

    #[test]
    fn test_zoned_decimal() {
        let zoned: ZonedDecimal = "0123N".parse().unwrap();
        assert!(zoned.is_negative());
        assert_eq!(zoned.len(), 5);
        assert_eq!(zoned.to_string(), "0123N");
        assert_eq!(zoned.decode(2).unwrap().to_string(), "-12.35");
        assert!(!ZonedDecimal::new("0123E").unwrap().is_negative());
        assert_eq!(
            "01235".parse::<ZonedDecimal>().unwrap_err(),
            CodecError::InvalidOverpunchCharacter('5')
        );
        assert_eq!(ZonedDecimal::new("").unwrap_err(), CodecError::EmptyField);
    }
}
