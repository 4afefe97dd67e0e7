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

//! Packed decimal (COMP-3) encoding and decoding.
//!
//! Packed decimal stores two decimal digits per byte. The low nibble of the
//! last byte holds the sign, so the boundary between digits and sign is
//! always byte-granular.
//!
//! For `PIC S9(n) COMP-3` the storage size is `n / 2 + 1` bytes:
//!
//! - `+12345` in `S9(5)`: `0x12 0x34 0x5C`
//! - `+123456` in `S9(6)`: `0x01 0x23 0x45 0x6C`, with a zero pad nibble in front
//! - `-1.00` in `S9(3)V99`: `0x00 0x10 0x0D`

use crate::config::{self, CodecConfig};
use crate::decimal::{Decimal, MAX_PRECISION, MAX_SCALE};
use crate::error::{CodecError, DecimalParseError};
use crate::Result;
use std::fmt::Write;

const fn bit(nibble: u8) -> u16 {
    1 << nibble
}

/// Sign of a packed decimal field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    /// Positive or unsigned, written as `C` by default.
    Positive,
    /// Negative, written as `D` by default.
    Negative,
}

/// The sign nibbles a packed decimal codec accepts and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignTable {
    positive: u16,
    negative: u16,
    preferred_positive: u8,
    preferred_negative: u8,
}

impl SignTable {
    /// Positive `A C E F`, negative `B D`; writes `C` and `D`.
    pub const STANDARD: SignTable = SignTable {
        positive: bit(0xA) | bit(0xC) | bit(0xE) | bit(0xF),
        negative: bit(0xB) | bit(0xD),
        preferred_positive: 0xC,
        preferred_negative: 0xD,
    };

    /// Only the preferred signs: `C` and unsigned `F` positive, `D` negative.
    pub const PREFERRED: SignTable = SignTable {
        positive: bit(0xC) | bit(0xF),
        negative: bit(0xD),
        preferred_positive: 0xC,
        preferred_negative: 0xD,
    };

    /// Builds a sign table for a specific COBOL dialect.
    ///
    /// Every nibble must be in `A..=F`, the two sets must not overlap, and
    /// each preferred nibble must belong to its own set.
    pub fn new(
        positive: &[u8],
        negative: &[u8],
        preferred_positive: u8,
        preferred_negative: u8,
    ) -> Result<SignTable> {
        fn to_mask(nibbles: &[u8]) -> Result<u16> {
            nibbles.iter().try_fold(0u16, |mask, &nibble| {
                if (0xA..=0xF).contains(&nibble) {
                    Ok(mask | bit(nibble))
                } else {
                    Err(CodecError::InvalidFieldSpec(format!(
                        "0x{:X} cannot be a sign nibble",
                        nibble
                    )))
                }
            })
        }

        let positive = to_mask(positive)?;
        let negative = to_mask(negative)?;

        if positive & negative != 0 {
            return Err(CodecError::InvalidFieldSpec(
                "positive and negative sign nibbles overlap".to_string(),
            ));
        }
        if preferred_positive > 0xF || positive & bit(preferred_positive) == 0 {
            return Err(CodecError::InvalidFieldSpec(format!(
                "preferred positive sign 0x{:X} is not a positive sign",
                preferred_positive
            )));
        }
        if preferred_negative > 0xF || negative & bit(preferred_negative) == 0 {
            return Err(CodecError::InvalidFieldSpec(format!(
                "preferred negative sign 0x{:X} is not a negative sign",
                preferred_negative
            )));
        }

        Ok(SignTable {
            positive,
            negative,
            preferred_positive,
            preferred_negative,
        })
    }

    /// Classifies a sign nibble, `None` if the table does not know it.
    #[inline]
    pub fn classify(&self, nibble: u8) -> Option<Sign> {
        if nibble > 0xF {
            None
        } else if self.positive & bit(nibble) != 0 {
            Some(Sign::Positive)
        } else if self.negative & bit(nibble) != 0 {
            Some(Sign::Negative)
        } else {
            None
        }
    }

    /// Returns the nibble written for the given sign.
    #[inline]
    pub fn nibble_for(&self, sign: Sign) -> u8 {
        match sign {
            Sign::Positive => self.preferred_positive,
            Sign::Negative => self.preferred_negative,
        }
    }
}

impl Default for SignTable {
    #[inline]
    fn default() -> Self {
        SignTable::STANDARD
    }
}

/// Packed decimal bytes.
///
/// A `PackedDecimal` always holds at least one byte. Every nibble but the
/// last is a decimal digit and the last is a known sign code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackedDecimal {
    bytes: Vec<u8>,
}

impl PackedDecimal {
    /// Storage size in bytes of a field with `total_digits` digits.
    #[inline]
    pub const fn byte_len(total_digits: usize) -> usize {
        total_digits / 2 + 1
    }

    /// Wraps raw bytes, checking them against the global sign table.
    #[inline]
    pub fn from_bytes<B: Into<Vec<u8>>>(bytes: B) -> Result<PackedDecimal> {
        PackedDecimal::from_bytes_with(bytes, &config::global().sign_table)
    }

    /// Wraps raw bytes, checking them against `signs`.
    pub fn from_bytes_with<B: Into<Vec<u8>>>(bytes: B, signs: &SignTable) -> Result<PackedDecimal> {
        let bytes = bytes.into();
        validate(&bytes, signs)?;
        Ok(PackedDecimal { bytes })
    }

    /// Parses a hex view such as `"12345C"` or `"12 34 5C"`, checking it
    /// against the global sign table.
    #[inline]
    pub fn from_hex(hex: &str) -> Result<PackedDecimal> {
        PackedDecimal::from_hex_with(hex, &config::global().sign_table)
    }

    /// Parses a hex view, checking it against `signs`.
    pub fn from_hex_with(hex: &str, signs: &SignTable) -> Result<PackedDecimal> {
        let nibbles = hex
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .map(|c| c.to_digit(16).map(|n| n as u8))
            .collect::<Option<Vec<u8>>>()
            .ok_or(CodecError::InvalidNumericFormat(DecimalParseError::Invalid))?;

        if nibbles.len() % 2 != 0 {
            return Err(CodecError::InvalidNumericFormat(DecimalParseError::Invalid));
        }

        let bytes: Vec<u8> = nibbles.chunks(2).map(|pair| (pair[0] << 4) | pair[1]).collect();
        PackedDecimal::from_bytes_with(bytes, signs)
    }

    /// Returns the hex view, two upper-case characters per byte.
    pub fn to_hex(&self) -> String {
        let mut hex = String::with_capacity(self.bytes.len() * 2);
        for byte in &self.bytes {
            write!(hex, "{:02X}", byte).expect("writing to a String cannot fail");
        }
        hex
    }

    /// Returns the raw field bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Unwraps the raw field bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Storage size in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of digit nibbles, i.e. every nibble but the sign.
    #[inline]
    pub fn digit_capacity(&self) -> usize {
        self.bytes.len() * 2 - 1
    }

    /// Returns the sign according to `signs`.
    #[inline]
    pub fn sign(&self, signs: &SignTable) -> Result<Sign> {
        read_sign(&self.bytes, signs)
    }

    /// Decodes the value with `scale` fractional digits, using the global
    /// configuration.
    #[inline]
    pub fn decode(&self, scale: u8) -> Result<Decimal> {
        decode(&self.bytes, scale)
    }

    /// Decodes the value with `scale` fractional digits, reading the sign
    /// with `config.sign_table`.
    #[inline]
    pub fn decode_with(&self, scale: u8, config: &CodecConfig) -> Result<Decimal> {
        decode_with(&self.bytes, scale, config)
    }
}

impl AsRef<[u8]> for PackedDecimal {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[inline]
fn nibble_at(bytes: &[u8], position: usize) -> u8 {
    let byte = bytes[position / 2];
    if position % 2 == 0 {
        byte >> 4
    } else {
        byte & 0x0F
    }
}

#[inline]
fn read_sign(bytes: &[u8], signs: &SignTable) -> Result<Sign> {
    let last = bytes.last().ok_or(CodecError::EmptyField)?;
    let nibble = last & 0x0F;
    signs.classify(nibble).ok_or(CodecError::InvalidSignNibble { nibble })
}

fn validate(bytes: &[u8], signs: &SignTable) -> Result<()> {
    if bytes.is_empty() {
        return Err(CodecError::EmptyField);
    }

    for position in 0..bytes.len() * 2 - 1 {
        let nibble = nibble_at(bytes, position);
        if nibble > 9 {
            return Err(CodecError::InvalidDigitNibble { nibble, position });
        }
    }

    read_sign(bytes, signs).map(|_| ())
}

/// Encodes `value` as `total_digits` packed digits with `scale` fractional digits,
/// using the global configuration.
#[inline]
pub fn encode(value: &Decimal, total_digits: usize, scale: u8) -> Result<PackedDecimal> {
    encode_with(value, total_digits, scale, config::global())
}

/// Encodes `value` as `total_digits` packed digits with `scale` fractional digits.
///
/// The value is rescaled with `config.rounding` first. Fails with
/// [`CodecError::ValueExceedsCapacity`] if it needs more than `total_digits`
/// digits at that scale, and with [`CodecError::InvalidFieldSpec`] unless
/// `total_digits` is between 1 and [`MAX_PRECISION`].
pub fn encode_with(value: &Decimal, total_digits: usize, scale: u8, config: &CodecConfig) -> Result<PackedDecimal> {
    if total_digits == 0 || total_digits > MAX_PRECISION as usize {
        return Err(CodecError::InvalidFieldSpec(format!(
            "packed decimal field needs 1 to {} digits, got {}",
            MAX_PRECISION, total_digits
        )));
    }

    let scaled = value
        .to_fixed_scale(scale, config.rounding)
        .map_err(|_| CodecError::exceeds(value.integer_digits() as usize + scale as usize, total_digits))?;

    let digits = scaled.coefficient_digits();
    let digits = digits.as_slice();
    if digits.len() > total_digits {
        return Err(CodecError::exceeds(digits.len(), total_digits));
    }

    let byte_len = PackedDecimal::byte_len(total_digits);
    let mut bytes = vec![0u8; byte_len];

    // right-align the digits so the last one lands just before the sign nibble
    let offset = byte_len * 2 - 1 - digits.len();
    for (i, &digit) in digits.iter().enumerate() {
        let position = offset + i;
        let nibble = digit - b'0';
        bytes[position / 2] |= if position % 2 == 0 { nibble << 4 } else { nibble };
    }

    let sign = if scaled.is_negative() {
        Sign::Negative
    } else {
        Sign::Positive
    };
    bytes[byte_len - 1] |= config.sign_table.nibble_for(sign);

    Ok(PackedDecimal { bytes })
}

/// Decodes packed decimal bytes with `scale` fractional digits,
/// using the global configuration.
#[inline]
pub fn decode(bytes: &[u8], scale: u8) -> Result<Decimal> {
    decode_with(bytes, scale, config::global())
}

/// Decodes packed decimal bytes with `scale` fractional digits.
///
/// Fails with [`CodecError::InvalidDigitNibble`] for a digit nibble above 9
/// and with [`CodecError::InvalidSignNibble`] for a sign nibble outside
/// `config.sign_table`. A bad nibble is never read as zero.
pub fn decode_with(bytes: &[u8], scale: u8, config: &CodecConfig) -> Result<Decimal> {
    if bytes.is_empty() {
        return Err(CodecError::EmptyField);
    }
    if scale > MAX_SCALE {
        return Err(CodecError::exceeds(scale as usize, MAX_SCALE as usize));
    }

    let mut int_val = 0u128;
    let mut significant = 0usize;

    for position in 0..bytes.len() * 2 - 1 {
        let nibble = nibble_at(bytes, position);
        if nibble > 9 {
            return Err(CodecError::InvalidDigitNibble { nibble, position });
        }

        if significant > 0 || nibble != 0 {
            significant += 1;
            if significant <= MAX_PRECISION as usize {
                int_val = int_val * 10 + nibble as u128;
            }
        }
    }

    if significant > MAX_PRECISION as usize {
        return Err(CodecError::exceeds(significant, MAX_PRECISION as usize));
    }

    let sign = read_sign(bytes, &config.sign_table)?;
    Ok(Decimal::from_parts_unchecked(int_val, scale, sign == Sign::Negative))
}
