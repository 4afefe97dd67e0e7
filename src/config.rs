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

//! Process-wide codec configuration.
//!
//! The configuration is installed at most once and never changes afterwards.
//! Every configurable operation also has a `*_with` form taking an explicit
//! [`CodecConfig`].

use crate::decimal::RoundingMode;
use crate::packed::SignTable;
use std::sync::OnceLock;

static GLOBAL: OnceLock<CodecConfig> = OnceLock::new();

/// Rounding, display and packed-sign settings shared by the codecs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Rounding applied when a value is rescaled to a field's scale.
    pub rounding: RoundingMode,
    /// Character between groups of three integer digits.
    pub thousands_separator: char,
    /// Character between integer and fractional digits in display strings.
    pub decimal_point: char,
    /// Symbol inserted by currency formatting.
    pub currency_symbol: String,
    /// Sign nibbles accepted and written by the packed decimal codec.
    pub sign_table: SignTable,
}

impl Default for CodecConfig {
    #[inline]
    fn default() -> Self {
        CodecConfig {
            rounding: RoundingMode::HalfUp,
            thousands_separator: ',',
            decimal_point: '.',
            currency_symbol: "$".to_string(),
            sign_table: SignTable::STANDARD,
        }
    }
}

impl CodecConfig {
    #[inline]
    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    #[inline]
    pub fn with_thousands_separator(mut self, separator: char) -> Self {
        self.thousands_separator = separator;
        self
    }

    #[inline]
    pub fn with_decimal_point(mut self, point: char) -> Self {
        self.decimal_point = point;
        self
    }

    #[inline]
    pub fn with_currency_symbol<S: Into<String>>(mut self, symbol: S) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    #[inline]
    pub fn with_sign_table(mut self, table: SignTable) -> Self {
        self.sign_table = table;
        self
    }
}

/// Installs the process-wide configuration.
///
/// Returns the rejected value if a configuration is already in place,
/// including the default one installed by an earlier [`global`] call.
pub fn init_global(config: CodecConfig) -> Result<(), CodecConfig> {
    match GLOBAL.set(config) {
        Ok(()) => {
            tracing::debug!(config = ?GLOBAL.get(), "codec configuration installed");
            Ok(())
        }
        Err(rejected) => {
            tracing::debug!("codec configuration already installed, keeping the existing one");
            Err(rejected)
        }
    }
}

/// Returns the process-wide configuration, installing the default on first use.
#[inline]
pub fn global() -> &'static CodecConfig {
    GLOBAL.get_or_init(CodecConfig::default)
}
