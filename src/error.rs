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

//! Decimal and codec error definitions.

use thiserror::Error;

/// An error which can be returned when parsing a decimal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecimalParseError {
    /// Empty string.
    #[error("cannot parse number from empty string")]
    Empty,
    /// Invalid decimal.
    #[error("invalid number")]
    Invalid,
    /// Decimal is overflowed.
    #[error("value overflows number format")]
    Overflow,
}

/// An error which can be returned when a conversion between other type and decimal fails.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum DecimalConvertError {
    /// Invalid decimal.
    #[error("invalid number")]
    Invalid,
    /// Decimal is overflowed.
    #[error("numeric overflow")]
    Overflow,
    /// The conversion would drop a non-zero fractional part.
    #[error("value has a non-zero fractional part")]
    Inexact,
}

impl From<DecimalParseError> for DecimalConvertError {
    #[inline]
    fn from(e: DecimalParseError) -> Self {
        match e {
            DecimalParseError::Empty | DecimalParseError::Invalid => DecimalConvertError::Invalid,
            DecimalParseError::Overflow => DecimalConvertError::Overflow,
        }
    }
}

/// An error which can be returned by the field, packed, zoned and date codecs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The input is not a decimal number.
    #[error("invalid numeric format: {0}")]
    InvalidNumericFormat(#[from] DecimalParseError),
    /// The value needs more digits than the field provides.
    #[error("value needs {required} digits but the field holds {capacity}")]
    ValueExceedsCapacity { required: usize, capacity: usize },
    /// A packed decimal digit nibble is above 9.
    #[error("invalid digit nibble 0x{nibble:X} at nibble {position}")]
    InvalidDigitNibble { nibble: u8, position: usize },
    /// The packed decimal sign nibble is not in the sign table.
    #[error("invalid sign nibble 0x{nibble:X}")]
    InvalidSignNibble { nibble: u8 },
    /// A zoned decimal character before the sign position is not a digit.
    #[error("invalid zoned digit {ch:?} at position {position}")]
    InvalidZonedDigit { ch: char, position: usize },
    /// The trailing zoned decimal character is not an overpunch character.
    #[error("invalid overpunch character {0:?}")]
    InvalidOverpunchCharacter(char),
    /// The date is not 8 ASCII digits.
    #[error("invalid date format {0:?}, expected CCYYMMDD")]
    InvalidDateFormat(String),
    /// The date is well formed but not a calendar date in the supported window.
    #[error("date out of range: year {year}, month {month}, day {day}")]
    InvalidDateRange { year: u16, month: u8, day: u8 },
    /// There is no data to decode.
    #[error("empty field")]
    EmptyField,
    /// The field definition itself is unusable.
    #[error("invalid field definition: {0}")]
    InvalidFieldSpec(String),
}

impl CodecError {
    #[inline]
    pub(crate) fn exceeds(required: usize, capacity: usize) -> CodecError {
        CodecError::ValueExceedsCapacity { required, capacity }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            CodecError::InvalidSignNibble { nibble: 0x7 }.to_string(),
            "invalid sign nibble 0x7"
        );
        assert_eq!(
            CodecError::InvalidDigitNibble { nibble: 0xA, position: 3 }.to_string(),
            "invalid digit nibble 0xA at nibble 3"
        );
        assert_eq!(
            CodecError::from(DecimalParseError::Invalid).to_string(),
            "invalid numeric format: invalid number"
        );
        assert_eq!(
            CodecError::exceeds(6, 5).to_string(),
            "value needs 6 digits but the field holds 5"
        );
    }

    #[test]
    fn test_parse_into_convert() {
        assert_eq!(
            DecimalConvertError::from(DecimalParseError::Empty),
            DecimalConvertError::Invalid
        );
        assert_eq!(
            DecimalConvertError::from(DecimalParseError::Overflow),
            DecimalConvertError::Overflow
        );
    }
}
