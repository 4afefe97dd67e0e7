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

//! Human-readable decimal rendering.

use crate::config::{self, CodecConfig};
use crate::decimal::Decimal;
use std::fmt;

/// How the sign of a displayed value is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignStyle {
    /// `-1,234.56`, positive values unsigned.
    Minus,
    /// `(1,234.56)` for negative values.
    Parentheses,
    /// `+1,234.56` and `-1,234.56`.
    Plus,
    /// No sign at all, and zero renders as an empty string.
    Suppressed,
}

impl Default for SignStyle {
    #[inline]
    fn default() -> Self {
        SignStyle::Minus
    }
}

/// Options for [`Decimal::to_display_string_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DisplayOptions {
    /// Group integer digits by three.
    pub thousands: bool,
    pub sign_style: SignStyle,
    /// Insert the configured currency symbol after any leading sign.
    pub currency: bool,
}

impl DisplayOptions {
    #[inline]
    pub const fn new(thousands: bool, sign_style: SignStyle) -> DisplayOptions {
        DisplayOptions {
            thousands,
            sign_style,
            currency: false,
        }
    }

    #[inline]
    pub const fn currency(sign_style: SignStyle) -> DisplayOptions {
        DisplayOptions {
            thousands: true,
            sign_style,
            currency: true,
        }
    }
}

/// A [`Decimal`] bound to display options, see [`Decimal::display_with`].
#[derive(Debug, Clone, Copy)]
pub struct Formatted<'a> {
    value: &'a Decimal,
    options: DisplayOptions,
    config: &'a CodecConfig,
}

impl fmt::Display for Formatted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let value = self.value;
        let style = self.options.sign_style;

        if style == SignStyle::Suppressed && value.is_zero() {
            return Ok(());
        }

        let negative = value.is_negative();
        match style {
            SignStyle::Minus if negative => f.write_str("-")?,
            SignStyle::Parentheses if negative => f.write_str("(")?,
            SignStyle::Plus => f.write_str(if negative { "-" } else { "+" })?,
            _ => {}
        }

        if self.options.currency {
            f.write_str(&self.config.currency_symbol)?;
        }

        let grouping = if self.options.thousands {
            Some(self.config.thousands_separator)
        } else {
            None
        };
        value.fmt_unsigned(self.config.decimal_point, grouping, &mut *f)?;

        if style == SignStyle::Parentheses && negative {
            f.write_str(")")?;
        }

        Ok(())
    }
}

impl Decimal {
    /// Binds `self` to display options for use with `format!` and friends.
    #[inline]
    pub fn display_with<'a>(&'a self, options: DisplayOptions, config: &'a CodecConfig) -> Formatted<'a> {
        Formatted {
            value: self,
            options,
            config,
        }
    }

    /// Renders `self` for people, with the separators of the global configuration.
    ///
    /// ```
    /// use copybook_codec::{Decimal, SignStyle};
    ///
    /// let value: Decimal = "-1234567.80".parse().unwrap();
    /// assert_eq!(value.to_display_string(true, SignStyle::Minus), "-1,234,567.80");
    /// assert_eq!(value.to_display_string(true, SignStyle::Parentheses), "(1,234,567.80)");
    /// assert_eq!(Decimal::ZERO.to_display_string(false, SignStyle::Suppressed), "");
    /// ```
    #[inline]
    pub fn to_display_string(&self, thousands: bool, sign_style: SignStyle) -> String {
        self.to_display_string_with(&DisplayOptions::new(thousands, sign_style), config::global())
    }

    #[inline]
    pub fn to_display_string_with(&self, options: &DisplayOptions, config: &CodecConfig) -> String {
        self.display_with(*options, config).to_string()
    }
}

/// Renders `value` as currency with thousands grouping, such as `-$1,234.56`
/// or `($1,234.56)`. The value keeps its own scale.
#[inline]
pub fn format_currency(value: &Decimal, sign_style: SignStyle) -> String {
    format_currency_with(value, sign_style, config::global())
}

#[inline]
pub fn format_currency_with(value: &Decimal, sign_style: SignStyle, config: &CodecConfig) -> String {
    value.to_display_string_with(&DisplayOptions::currency(sign_style), config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn assert_display(val: &str, thousands: bool, style: SignStyle, expected: &str) {
        assert_eq!(dec(val).to_display_string(thousands, style), expected);
    }

    #[test]
    fn test_minus() {
        assert_display("1234567.89", true, SignStyle::Minus, "1,234,567.89");
        assert_display("1234567.89", false, SignStyle::Minus, "1234567.89");
        assert_display("-1234.56", true, SignStyle::Minus, "-1,234.56");
        assert_display("-123.45", true, SignStyle::Minus, "-123.45");
        assert_display("-0.05", true, SignStyle::Minus, "-0.05");
        assert_display("0.00", true, SignStyle::Minus, "0.00");
        assert_display("100000", true, SignStyle::Minus, "100,000");
    }

    #[test]
    fn test_parentheses() {
        assert_display("-1234.56", true, SignStyle::Parentheses, "(1,234.56)");
        assert_display("1234.56", true, SignStyle::Parentheses, "1,234.56");
        assert_display("-0.00", true, SignStyle::Parentheses, "0.00");
    }

    #[test]
    fn test_plus() {
        assert_display("1234.56", true, SignStyle::Plus, "+1,234.56");
        assert_display("-1234.56", true, SignStyle::Plus, "-1,234.56");
        assert_display("0.00", false, SignStyle::Plus, "+0.00");
    }

    #[test]
    fn test_suppressed() {
        assert_display("0", true, SignStyle::Suppressed, "");
        assert_display("0.00", true, SignStyle::Suppressed, "");
        assert_display("-1234.5", true, SignStyle::Suppressed, "1,234.5");
        assert_display("0.01", true, SignStyle::Suppressed, "0.01");
    }

    #[test]
    fn test_currency() {
        assert_eq!(format_currency(&dec("-1234.56"), SignStyle::Minus), "-$1,234.56");
        assert_eq!(format_currency(&dec("-1234.56"), SignStyle::Parentheses), "($1,234.56)");
        assert_eq!(format_currency(&dec("1234.56"), SignStyle::Plus), "+$1,234.56");
        assert_eq!(format_currency(&dec("0.00"), SignStyle::Minus), "$0.00");
        assert_eq!(format_currency(&dec("0.00"), SignStyle::Suppressed), "");
    }

    #[test]
    fn test_with_config() {
        let config = CodecConfig::default()
            .with_thousands_separator('.')
            .with_decimal_point(',')
            .with_currency_symbol("EUR ");
        let value = dec("-1234567.5");

        assert_eq!(
            value.to_display_string_with(&DisplayOptions::new(true, SignStyle::Minus), &config),
            "-1.234.567,5"
        );
        assert_eq!(
            format_currency_with(&value, SignStyle::Parentheses, &config),
            "(EUR 1.234.567,5)"
        );
        assert_eq!(
            format!("[{}]", value.display_with(DisplayOptions::default(), &config)),
            "[-1234567,5]"
        );
    }
}
