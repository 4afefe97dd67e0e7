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

//! Lenient wrappers over the strict codecs.
//!
//! Each wrapper substitutes a caller-chosen default when the strict
//! operation fails and logs a `warn` event with the input and the error.
//! Nothing else in the crate ever substitutes a default.

use crate::date::{self, CalendarDate};
use crate::decimal::Decimal;
use crate::{packed, pic, zoned};

/// Parses `input` as a decimal, or returns `default`.
pub fn parse_decimal_or_default(input: &str, default: Decimal) -> Decimal {
    input.parse::<Decimal>().unwrap_or_else(|e| {
        tracing::warn!(input = %input, error = %e, default = %default, "invalid decimal, using default");
        default
    })
}

/// Parses an unsigned numeric field of at most `length` digits, or returns `default`.
pub fn parse_unsigned_numeric_or_default(input: &str, length: usize, default: Decimal) -> Decimal {
    pic::parse_unsigned_numeric(input, length).unwrap_or_else(|e| {
        tracing::warn!(input = %input, length, error = %e, default = %default, "invalid numeric field, using default");
        default
    })
}

/// Decodes packed decimal bytes, or returns `default`.
pub fn decode_packed_or_default(bytes: &[u8], scale: u8, default: Decimal) -> Decimal {
    packed::decode(bytes, scale).unwrap_or_else(|e| {
        tracing::warn!(input = ?bytes, scale, error = %e, default = %default, "invalid packed decimal, using default");
        default
    })
}

/// Decodes zoned decimal text, or returns `default`.
pub fn decode_zoned_or_default(input: &str, scale: u8, default: Decimal) -> Decimal {
    zoned::decode(input, scale).unwrap_or_else(|e| {
        tracing::warn!(input = %input, scale, error = %e, default = %default, "invalid zoned decimal, using default");
        default
    })
}

/// Parses a `CCYYMMDD` date, or returns `None`.
pub fn parse_date_or_none(input: &str) -> Option<CalendarDate> {
    match date::parse(input) {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::warn!(input = %input, error = %e, "invalid date, using none");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_decimal_fallback() {
        assert_eq!(parse_decimal_or_default("12.50", Decimal::ZERO), dec("12.50"));
        assert_eq!(parse_decimal_or_default("12,50", Decimal::ZERO), Decimal::ZERO);
        assert_eq!(parse_decimal_or_default("", dec("-1")), dec("-1"));
    }

    #[test]
    fn test_numeric_field_fallback() {
        assert_eq!(parse_unsigned_numeric_or_default("0042", 4, Decimal::ZERO), dec("42"));
        assert_eq!(parse_unsigned_numeric_or_default("00042", 4, Decimal::ZERO), Decimal::ZERO);
        assert_eq!(parse_unsigned_numeric_or_default("4x", 4, Decimal::ONE), Decimal::ONE);
    }

    #[test]
    fn test_packed_fallback() {
        assert_eq!(decode_packed_or_default(&[0x12, 0x34, 0x5C], 2, Decimal::ZERO), dec("123.45"));
        assert_eq!(decode_packed_or_default(&[0x12, 0x34, 0x57], 2, Decimal::ZERO), Decimal::ZERO);
        assert_eq!(decode_packed_or_default(&[], 0, Decimal::ONE), Decimal::ONE);
    }

    #[test]
    fn test_zoned_fallback() {
        assert_eq!(decode_zoned_or_default("12345}", 0, Decimal::ZERO), dec("-123450"));
        assert_eq!(decode_zoned_or_default("12345", 0, Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_date_fallback() {
        assert_eq!(
            parse_date_or_none("20240229"),
            Some(CalendarDate::new(2024, 2, 29).unwrap())
        );
        assert_eq!(parse_date_or_none("20230229"), None);
        assert_eq!(parse_date_or_none("2023-02-28"), None);
    }
}
