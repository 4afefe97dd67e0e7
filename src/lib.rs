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

//! Exact decimals and COBOL copybook field codecs.
//!
//! The crate converts between exact decimal values and the fixed-width
//! representations found in COBOL copybooks: `PIC X` / `PIC 9` / `PIC S9V9`
//! display fields, packed decimal (COMP-3), zoned decimal with an overpunched
//! sign, and `CCYYMMDD` dates.
//!
//! Every strict operation returns a [`Result`]. The [`fallback`] module holds
//! the wrappers that substitute a default instead, logging a `tracing` event
//! when they do.
//!
//! ## Optional features
//!
//! ### `serde`
//!
//! When this optional dependency is enabled, `Decimal`, `CalendarDate` and
//! `PackedDecimal` implement the `serde::Serialize` and `serde::Deserialize` traits.
//!
//! ## Usage
//!
//! Decimals keep their scale and never round behind your back:
//!
//! ```
//! use copybook_codec::Decimal;
//!
//! let price: Decimal = "19.99".parse().unwrap();
//! let total = price * 3u32;
//! assert_eq!(total.to_string(), "59.97");
//! assert_eq!(price.checked_mul("0.5".parse().unwrap()).unwrap().to_string(), "9.995");
//! ```
//!
//! Packed decimal (COMP-3):
//!
//! ```
//! use copybook_codec::{packed, Decimal};
//!
//! let value: Decimal = "123.45".parse().unwrap();
//! let field = packed::encode(&value, 5, 2).unwrap();
//! assert_eq!(field.as_bytes(), &[0x12, 0x34, 0x5C]);
//! assert_eq!(packed::decode(field.as_bytes(), 2).unwrap(), value);
//! ```
//!
//! Zoned decimal:
//!
//! ```
//! use copybook_codec::zoned;
//!
//! let value = zoned::decode("0012345}", 2).unwrap();
//! assert_eq!(value.to_string(), "-1234.50");
//! assert_eq!(zoned::encode(&value, 8).unwrap().as_str(), "0012345}");
//! ```
//!
//! PIC fields and dates:
//!
//! ```
//! use copybook_codec::pic::{self, SignPlacement};
//! use copybook_codec::{CalendarDate, Decimal};
//!
//! let amount: Decimal = "-123.45".parse().unwrap();
//! let field = pic::format_signed_decimal(&amount, 5, 2, SignPlacement::Trailing).unwrap();
//! assert_eq!(field, "00123.45-");
//! assert_eq!(pic::parse_signed_decimal(&field, 5, 2, SignPlacement::Trailing).unwrap(), amount);
//!
//! let date: CalendarDate = "20240229".parse().unwrap();
//! assert_eq!(date.to_string(), "20240229");
//! assert!("20230229".parse::<CalendarDate>().is_err());
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
mod convert;
pub mod date;
mod decimal;
mod display;
mod error;
pub mod fallback;
pub mod identifier;
mod ops;
pub mod packed;
mod parse;
pub mod pic;
pub mod zoned;

#[cfg(feature = "serde")]
mod serde;

pub use crate::config::CodecConfig;
pub use crate::date::CalendarDate;
pub use crate::decimal::{Decimal, RoundingMode, MAX_PRECISION, MAX_SCALE};
pub use crate::display::{format_currency, format_currency_with, DisplayOptions, Formatted, SignStyle};
pub use crate::error::{CodecError, DecimalConvertError, DecimalParseError};
pub use crate::packed::{PackedDecimal, SignTable};
pub use crate::pic::{FieldKind, Pad, PicFieldSpec, SignPlacement};
pub use crate::zoned::ZonedDecimal;

/// Result of the field, packed, zoned and date codecs.
pub type Result<T> = std::result::Result<T, CodecError>;
