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

//! serde implementation.
//!
//! Decimals and dates always travel as their canonical text. Packed decimals
//! travel as hex text in human-readable formats and as raw bytes otherwise.

use crate::date::CalendarDate;
use crate::decimal::Buf;
use crate::packed::PackedDecimal;
use crate::Decimal;
use std::fmt;

impl serde::Serialize for Decimal {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        use std::fmt::Write;

        let mut buf = Buf::new();
        write!(&mut buf, "{}", self).map_err(serde::ser::Error::custom)?;
        if serializer.is_human_readable() {
            let str = std::str::from_utf8(buf.as_slice()).map_err(serde::ser::Error::custom)?;
            serializer.serialize_str(str)
        } else {
            serializer.serialize_bytes(buf.as_slice())
        }
    }
}

impl<'de> serde::Deserialize<'de> for Decimal {
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        struct DecimalVisitor;

        impl<'de> serde::de::Visitor<'de> for DecimalVisitor {
            type Value = Decimal;

            #[inline]
            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(formatter, "a decimal string")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Decimal, E>
            where
                E: serde::de::Error,
            {
                v.parse().map_err(serde::de::Error::custom)
            }

            #[inline]
            fn visit_bytes<E>(self, v: &[u8]) -> Result<Decimal, E>
            where
                E: serde::de::Error,
            {
                let str = std::str::from_utf8(v).map_err(serde::de::Error::custom)?;
                str.parse().map_err(serde::de::Error::custom)
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_str(DecimalVisitor)
        } else {
            deserializer.deserialize_bytes(DecimalVisitor)
        }
    }
}

impl serde::Serialize for CalendarDate {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        struct DateVisitor;

        impl<'de> serde::de::Visitor<'de> for DateVisitor {
            type Value = CalendarDate;

            #[inline]
            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(formatter, "a CCYYMMDD date")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<CalendarDate, E>
            where
                E: serde::de::Error,
            {
                v.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(DateVisitor)
    }
}

impl serde::Serialize for PackedDecimal {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            serializer.serialize_bytes(self.as_bytes())
        }
    }
}

impl<'de> serde::Deserialize<'de> for PackedDecimal {
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        struct PackedVisitor;

        impl<'de> serde::de::Visitor<'de> for PackedVisitor {
            type Value = PackedDecimal;

            #[inline]
            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(formatter, "packed decimal bytes or hex text")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<PackedDecimal, E>
            where
                E: serde::de::Error,
            {
                PackedDecimal::from_hex(v).map_err(serde::de::Error::custom)
            }

            #[inline]
            fn visit_bytes<E>(self, v: &[u8]) -> Result<PackedDecimal, E>
            where
                E: serde::de::Error,
            {
                PackedDecimal::from_bytes(v).map_err(serde::de::Error::custom)
            }

            #[inline]
            fn visit_byte_buf<E>(self, v: Vec<u8>) -> Result<PackedDecimal, E>
            where
                E: serde::de::Error,
            {
                PackedDecimal::from_bytes(v).map_err(serde::de::Error::custom)
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_str(PackedVisitor)
        } else {
            deserializer.deserialize_byte_buf(PackedVisitor)
        }
    }
}
