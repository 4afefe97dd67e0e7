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

//! Fixed-width PIC field formatting and parsing.
//!
//! Truncation follows COBOL `MOVE`: alphanumeric values lose their tail
//! (or their head when right-justified) and unsigned numeric values keep
//! their least-significant digits. Neither is an error.

use crate::config::{self, CodecConfig};
use crate::decimal::{Decimal, DigitBuf, MAX_PRECISION, MAX_SCALE};
use crate::error::{CodecError, DecimalParseError};
use crate::parse::{eat_digits, strip_leading_zeros};
use crate::Result;
use std::fmt::Write;

/// Justification of an alphanumeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pad {
    /// Left-justified, padded and truncated on the right.
    Right,
    /// Right-justified (`JUSTIFIED RIGHT`), padded and truncated on the left.
    Left,
}

impl Default for Pad {
    #[inline]
    fn default() -> Self {
        Pad::Right
    }
}

/// Where a signed decimal field carries its sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignPlacement {
    /// `00123.45-`
    Trailing,
    /// `-00123.45`
    Leading,
    /// `-00123.45` or ` 00123.45`
    Separate,
}

impl Default for SignPlacement {
    #[inline]
    fn default() -> Self {
        SignPlacement::Trailing
    }
}

/// The category of a PIC field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// `PIC X(n)`
    Alphanumeric,
    /// `PIC 9(n)`
    UnsignedNumeric,
    /// `PIC S9(n)V9(m)`
    SignedDecimal,
}

/// A fixed-width field definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PicFieldSpec {
    kind: FieldKind,
    length: usize,
    integer_digits: usize,
    fractional_digits: usize,
    pad: Pad,
    sign_placement: SignPlacement,
}

impl PicFieldSpec {
    /// `PIC X(length)`, left-justified.
    #[inline]
    pub fn alphanumeric(length: usize) -> Result<PicFieldSpec> {
        check_length(length)?;
        Ok(PicFieldSpec {
            kind: FieldKind::Alphanumeric,
            length,
            integer_digits: 0,
            fractional_digits: 0,
            pad: Pad::Right,
            sign_placement: SignPlacement::Trailing,
        })
    }

    /// `PIC 9(length)`.
    #[inline]
    pub fn unsigned_numeric(length: usize) -> Result<PicFieldSpec> {
        check_length(length)?;
        Ok(PicFieldSpec {
            kind: FieldKind::UnsignedNumeric,
            length,
            integer_digits: length,
            fractional_digits: 0,
            pad: Pad::Right,
            sign_placement: SignPlacement::Trailing,
        })
    }

    /// `PIC S9(integer_digits)V9(fractional_digits)` with a trailing sign.
    ///
    /// Fails with [`CodecError::InvalidFieldSpec`] for an empty field, or one
    /// wider than [`MAX_PRECISION`] digits.
    #[inline]
    pub fn signed_decimal(integer_digits: usize, fractional_digits: usize) -> Result<PicFieldSpec> {
        check_digits(integer_digits, fractional_digits)?;
        Ok(PicFieldSpec {
            kind: FieldKind::SignedDecimal,
            length: integer_digits + fractional_digits,
            integer_digits,
            fractional_digits,
            pad: Pad::Right,
            sign_placement: SignPlacement::Trailing,
        })
    }

    /// Builds a field definition from a picture string such as `X(20)`, `9(11)`,
    /// `S9(7)V99` or `PIC S9(3)V9(2)`.
    ///
    /// A picture with an implied decimal point is a signed decimal field
    /// even without a leading `S`.
    pub fn from_picture(picture: &str) -> Result<PicFieldSpec> {
        let invalid = || CodecError::InvalidFieldSpec(format!("unsupported picture {:?}", picture));

        let mut s = picture.trim().as_bytes();
        for prefix in [&b"PICTURE"[..], &b"PIC"[..]].iter() {
            if s.len() > prefix.len() && s[..prefix.len()].eq_ignore_ascii_case(prefix) {
                s = trim_ascii_start(&s[prefix.len()..]);
                break;
            }
        }

        let signed = matches!(s.first(), Some(b'S') | Some(b's'));
        if signed {
            s = &s[1..];
        }

        let mut alpha = 0usize;
        let mut before_point = 0usize;
        let mut after_point = 0usize;
        let mut seen_point = false;

        while let Some((&symbol, rest)) = s.split_first() {
            s = rest;
            let symbol = symbol.to_ascii_uppercase();
            if symbol == b'V' {
                if seen_point {
                    return Err(invalid());
                }
                seen_point = true;
                continue;
            }

            let count = match s.first() {
                Some(b'(') => {
                    let (digits, rest) = eat_digits(&s[1..]);
                    match rest.split_first() {
                        Some((b')', rest)) if !digits.is_empty() && digits.len() <= 6 => {
                            s = rest;
                            digits.iter().fold(0usize, |acc, &d| acc * 10 + (d - b'0') as usize)
                        }
                        _ => return Err(invalid()),
                    }
                }
                _ => 1,
            };

            match symbol {
                b'X' if !seen_point => alpha += count,
                b'9' if seen_point => after_point += count,
                b'9' => before_point += count,
                _ => return Err(invalid()),
            }
        }

        let numeric = before_point + after_point;
        match (alpha, numeric) {
            (0, 0) => Err(invalid()),
            (0, _) if !signed && !seen_point => PicFieldSpec::unsigned_numeric(numeric),
            (0, _) => PicFieldSpec::signed_decimal(before_point, after_point),
            (_, 0) if !signed && !seen_point => PicFieldSpec::alphanumeric(alpha),
            _ => Err(invalid()),
        }
    }

    /// Sets the justification used by alphanumeric fields.
    #[inline]
    pub fn with_pad(mut self, pad: Pad) -> Self {
        self.pad = pad;
        self
    }

    /// Sets where signed decimal fields carry their sign.
    #[inline]
    pub fn with_sign_placement(mut self, placement: SignPlacement) -> Self {
        self.sign_placement = placement;
        self
    }

    /// Returns the field category.
    #[inline]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Number of characters for alphanumeric fields, digits otherwise.
    #[inline]
    pub const fn length(&self) -> usize {
        self.length
    }

    /// Digits before the implied decimal point.
    #[inline]
    pub const fn integer_digits(&self) -> usize {
        self.integer_digits
    }

    /// Digits after the implied decimal point.
    #[inline]
    pub const fn fractional_digits(&self) -> usize {
        self.fractional_digits
    }

    /// Returns the alphanumeric justification.
    #[inline]
    pub const fn pad(&self) -> Pad {
        self.pad
    }

    /// Returns the sign placement of signed decimal fields.
    #[inline]
    pub const fn sign_placement(&self) -> SignPlacement {
        self.sign_placement
    }

    /// Formats a raw value for this field.
    ///
    /// Signed decimal fields parse `raw` as a decimal first.
    pub fn format(&self, raw: &str) -> Result<String> {
        match self.kind {
            FieldKind::Alphanumeric => Ok(format_alphanumeric(raw, self.length, self.pad)),
            FieldKind::UnsignedNumeric => Ok(format_unsigned_numeric(raw, self.length)),
            FieldKind::SignedDecimal => {
                let value = raw.parse::<Decimal>()?;
                format_signed_decimal(&value, self.integer_digits, self.fractional_digits, self.sign_placement)
            }
        }
    }

    /// Parses a numeric field value. Fails for alphanumeric fields.
    pub fn parse(&self, input: &str) -> Result<Decimal> {
        match self.kind {
            FieldKind::Alphanumeric => Err(CodecError::InvalidFieldSpec(
                "alphanumeric fields have no numeric value".to_string(),
            )),
            FieldKind::UnsignedNumeric => parse_unsigned_numeric(input, self.length),
            FieldKind::SignedDecimal => parse_signed_decimal(
                input,
                self.integer_digits,
                self.fractional_digits,
                self.sign_placement,
            ),
        }
    }
}

#[inline]
fn trim_ascii_start(s: &[u8]) -> &[u8] {
    let i = s.iter().take_while(|b| b.is_ascii_whitespace()).count();
    &s[i..]
}

#[inline]
fn check_length(length: usize) -> Result<()> {
    if length == 0 {
        return Err(CodecError::InvalidFieldSpec("field length must be at least 1".to_string()));
    }
    Ok(())
}

fn check_digits(integer_digits: usize, fractional_digits: usize) -> Result<()> {
    let too_wide = || {
        CodecError::InvalidFieldSpec(format!(
            "S9({})V9({}) exceeds {} digits",
            integer_digits, fractional_digits, MAX_PRECISION
        ))
    };

    let total = integer_digits.checked_add(fractional_digits).ok_or_else(too_wide)?;
    check_length(total)?;
    if fractional_digits > MAX_SCALE as usize || total > MAX_PRECISION as usize {
        return Err(too_wide());
    }
    Ok(())
}

/// Pads `value` with spaces to exactly `length` characters, truncating silently.
///
/// ```
/// use copybook_codec::pic::{format_alphanumeric, Pad};
///
/// assert_eq!(format_alphanumeric("HELLO", 10, Pad::Right), "HELLO     ");
/// assert_eq!(format_alphanumeric("HELLOWORLD!", 5, Pad::Right), "HELLO");
/// assert_eq!(format_alphanumeric("HELLO", 7, Pad::Left), "  HELLO");
/// ```
pub fn format_alphanumeric(value: &str, length: usize, pad: Pad) -> String {
    let count = value.chars().count();

    if count > length {
        tracing::trace!(original = count, kept = length, "alphanumeric value truncated");
        return match pad {
            Pad::Right => value.chars().take(length).collect(),
            Pad::Left => value.chars().skip(count - length).collect(),
        };
    }

    let mut field = String::with_capacity(value.len() + length - count);
    match pad {
        Pad::Right => {
            field.push_str(value);
            field.extend(std::iter::repeat(' ').take(length - count));
        }
        Pad::Left => {
            field.extend(std::iter::repeat(' ').take(length - count));
            field.push_str(value);
        }
    }
    field
}

/// Right-aligns ASCII digits in a zero-filled field, keeping the last `length`.
fn fit_digits<'a, I>(digits: I, count: usize, length: usize) -> String
where
    I: Iterator<Item = &'a u8>,
{
    if count > length {
        tracing::trace!(original = count, kept = length, "numeric value truncated on the left");
    }

    let mut field = String::with_capacity(length);
    field.extend(std::iter::repeat('0').take(length.saturating_sub(count)));
    field.extend(digits.skip(count.saturating_sub(length)).map(|&d| d as char));
    field
}

/// Keeps the digits of `value` and fits them to `length`.
///
/// ```
/// use copybook_codec::pic::format_unsigned_numeric;
///
/// assert_eq!(format_unsigned_numeric("123", 5), "00123");
/// assert_eq!(format_unsigned_numeric("123456", 5), "23456");
/// assert_eq!(format_unsigned_numeric("12-34", 5), "01234");
/// ```
pub fn format_unsigned_numeric(value: &str, length: usize) -> String {
    let count = value.bytes().filter(u8::is_ascii_digit).count();
    fit_digits(value.as_bytes().iter().filter(|b| b.is_ascii_digit()), count, length)
}

/// Fits an integer to `length` digits, keeping the least-significant ones.
pub fn format_unsigned_integer(value: u128, length: usize) -> String {
    let mut buf = DigitBuf::new();
    write!(&mut buf, "{}", value).expect("u128 fits in digit buffer");
    let digits = buf.as_slice();
    fit_digits(digits.iter(), digits.len(), length)
}

/// Renders `value` as a signed decimal field with the global rounding mode.
#[inline]
pub fn format_signed_decimal(
    value: &Decimal,
    integer_digits: usize,
    fractional_digits: usize,
    placement: SignPlacement,
) -> Result<String> {
    format_signed_decimal_with(value, integer_digits, fractional_digits, placement, config::global())
}

/// Renders `value` as zero-padded integer digits, a `.` and the fraction
/// rounded with `config.rounding`, with the sign at `placement`.
///
/// Fails with [`CodecError::ValueExceedsCapacity`] if the integer part
/// needs more than `integer_digits` digits.
pub fn format_signed_decimal_with(
    value: &Decimal,
    integer_digits: usize,
    fractional_digits: usize,
    placement: SignPlacement,
    config: &CodecConfig,
) -> Result<String> {
    check_digits(integer_digits, fractional_digits)?;

    let scaled = value
        .to_fixed_scale(fractional_digits as u8, config.rounding)
        .map_err(|_| CodecError::exceeds(value.integer_digits() as usize, integer_digits))?;

    let required = scaled.integer_digits() as usize;
    if required > integer_digits {
        return Err(CodecError::exceeds(required, integer_digits));
    }

    let digits = scaled.coefficient_digits();
    let digits = digits.as_slice();
    let (int_part, frac_part): (&[u8], &[u8]) = if digits.len() > fractional_digits {
        digits.split_at(digits.len() - fractional_digits)
    } else {
        (b"", digits)
    };
    let int_part = strip_leading_zeros(int_part);

    let negative = scaled.is_negative();
    let sign = if negative { '-' } else { '+' };

    let mut field = String::with_capacity(integer_digits + fractional_digits + 2);
    match placement {
        SignPlacement::Leading => field.push(sign),
        SignPlacement::Separate => field.push(if negative { '-' } else { ' ' }),
        SignPlacement::Trailing => {}
    }

    field.extend(std::iter::repeat('0').take(integer_digits - int_part.len()));
    field.extend(int_part.iter().map(|&d| d as char));

    if fractional_digits > 0 {
        field.push('.');
        field.extend(std::iter::repeat('0').take(fractional_digits - frac_part.len()));
        field.extend(frac_part.iter().map(|&d| d as char));
    }

    if placement == SignPlacement::Trailing {
        field.push(sign);
    }

    Ok(field)
}

#[inline]
fn invalid_number() -> CodecError {
    CodecError::InvalidNumericFormat(DecimalParseError::Invalid)
}

/// Parses an unsigned numeric field of at most `length` digits.
pub fn parse_unsigned_numeric(input: &str, length: usize) -> Result<Decimal> {
    let s = input.trim_matches(' ');
    if s.is_empty() {
        return Err(CodecError::EmptyField);
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid_number());
    }
    if s.len() > length {
        return Err(CodecError::exceeds(s.len(), length));
    }
    Ok(s.parse::<Decimal>()?)
}

/// Parses a signed decimal field as rendered by [`format_signed_decimal`].
///
/// The sign is optional. Without a `.` the digits carry an implied decimal
/// point and their count must be exactly `integer_digits + fractional_digits`.
/// The result has exactly `fractional_digits` fractional digits.
pub fn parse_signed_decimal(
    input: &str,
    integer_digits: usize,
    fractional_digits: usize,
    placement: SignPlacement,
) -> Result<Decimal> {
    check_digits(integer_digits, fractional_digits)?;

    let s = input.trim_matches(' ').as_bytes();
    if s.is_empty() {
        return Err(CodecError::EmptyField);
    }

    let (negative, body) = match placement {
        SignPlacement::Trailing => match s.split_last() {
            Some((b'-', body)) => (true, body),
            Some((b'+', body)) => (false, body),
            _ => (false, s),
        },
        SignPlacement::Leading | SignPlacement::Separate => match s.split_first() {
            Some((b'-', body)) => (true, body),
            Some((b'+', body)) => (false, body),
            _ => (false, s),
        },
    };

    let (int_part, rest) = eat_digits(body);
    let (int_part, frac_part) = match rest.split_first() {
        None if fractional_digits > 0 => {
            let total = integer_digits + fractional_digits;
            if int_part.len() > total {
                return Err(CodecError::exceeds(int_part.len(), total));
            }
            if int_part.len() < total {
                return Err(invalid_number());
            }
            int_part.split_at(integer_digits)
        }
        None => (int_part, &b""[..]),
        Some((b'.', rest)) => {
            let (frac_part, rest) = eat_digits(rest);
            if !rest.is_empty() || (int_part.is_empty() && frac_part.is_empty()) {
                return Err(invalid_number());
            }
            (int_part, frac_part)
        }
        Some(_) => return Err(invalid_number()),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid_number());
    }

    let int_part = strip_leading_zeros(int_part);
    if int_part.len() > integer_digits {
        return Err(CodecError::exceeds(int_part.len(), integer_digits));
    }
    if frac_part.len() > fractional_digits {
        return Err(CodecError::exceeds(frac_part.len(), fractional_digits));
    }

    let mut int_val = int_part
        .iter()
        .chain(frac_part)
        .fold(0u128, |acc, &d| acc * 10 + (d - b'0') as u128);
    for _ in frac_part.len()..fractional_digits {
        int_val *= 10;
    }

    Ok(Decimal::from_parts_unchecked(int_val, fractional_digits as u8, negative))
}
