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

//! `CCYYMMDD` calendar dates.
//!
//! Validation follows the proleptic Gregorian calendar, independent of the
//! host's locale or time zone. Integer dates count days from the COBOL
//! reference date, so `1601-01-01` is day 1.

use crate::error::CodecError;
use crate::Result;
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

/// First supported year.
pub const MIN_YEAR: u16 = 1601;
/// Last supported year.
pub const MAX_YEAR: u16 = 3999;

const DAYS_IN_MONTH: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Days from 1970-01-01 to `1600-12-31`, the day before integer date 1.
const REFERENCE_DAYS: i64 = days_from_civil(1600, 12, 31);

/// Largest valid integer date, `3999-12-31`.
pub const MAX_INTEGER_DATE: u32 = (days_from_civil(MAX_YEAR as i64, 12, 31) - REFERENCE_DAYS) as u32;

/// Returns whether `year` is a Gregorian leap year.
#[inline]
pub const fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Returns the number of days in `month` of `year`, or 0 for an invalid month.
#[inline]
pub const fn days_in_month(year: u16, month: u8) -> u8 {
    if month < 1 || month > 12 {
        0
    } else if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS_IN_MONTH[month as usize - 1]
    }
}

// Howard Hinnant's days_from_civil, with March as the first month of the year.
const fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = (if y >= 0 { y } else { y - 399 }) / 400;
    let yoe = y - era * 400;
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146097 + doe - 719468
}

fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let z = days + 719468;
    let era = (if z >= 0 { z } else { z - 146096 }) / 146097;
    let doe = z - era * 146097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let year = yoe + era * 400 + (month <= 2) as i64;
    (year, month, day)
}

/// A validated calendar date between `1601-01-01` and `3999-12-31`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: u16,
    month: u8,
    day: u8,
}

impl CalendarDate {
    /// Creates a date, failing with [`CodecError::InvalidDateRange`] if it
    /// does not exist or lies outside the supported years.
    #[inline]
    pub fn new(year: u16, month: u8, day: u8) -> Result<CalendarDate> {
        if year < MIN_YEAR || year > MAX_YEAR || day < 1 || day > days_in_month(year, month) {
            return Err(CodecError::InvalidDateRange { year, month, day });
        }
        Ok(CalendarDate { year, month, day })
    }

    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    #[inline]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Day of the year, 1 to 366.
    #[inline]
    pub fn day_of_year(&self) -> u16 {
        let before: u16 = (1..self.month).map(|m| days_in_month(self.year, m) as u16).sum();
        before + self.day as u16
    }

    /// Days since `1600-12-31`, as COBOL `FUNCTION INTEGER-OF-DATE`.
    #[inline]
    pub fn to_integer_date(&self) -> u32 {
        (days_from_civil(self.year as i64, self.month as i64, self.day as i64) - REFERENCE_DAYS) as u32
    }

    /// Inverse of [`to_integer_date`](CalendarDate::to_integer_date),
    /// as COBOL `FUNCTION DATE-OF-INTEGER`.
    pub fn from_integer_date(integer_date: u32) -> Result<CalendarDate> {
        let (year, month, day) = civil_from_days(integer_date as i64 + REFERENCE_DAYS);
        if integer_date == 0 || integer_date > MAX_INTEGER_DATE {
            return Err(CodecError::InvalidDateRange {
                year: u16::try_from(year).unwrap_or(u16::MAX),
                month,
                day,
            });
        }
        Ok(CalendarDate {
            year: year as u16,
            month,
            day,
        })
    }

    /// Adds a signed number of days, `None` if the result leaves the supported years.
    #[inline]
    pub fn checked_add_days(&self, days: i64) -> Option<CalendarDate> {
        let target = (self.to_integer_date() as i64).checked_add(days)?;
        if target < 1 || target > MAX_INTEGER_DATE as i64 {
            return None;
        }
        CalendarDate::from_integer_date(target as u32).ok()
    }
}

/// Parses exactly 8 ASCII digits as `CCYYMMDD`.
pub fn parse(input: &str) -> Result<CalendarDate> {
    let bytes = input.as_bytes();
    if bytes.len() != 8 || !bytes.iter().all(u8::is_ascii_digit) {
        return Err(CodecError::InvalidDateFormat(input.to_string()));
    }

    let number = |range: std::ops::Range<usize>| {
        bytes[range]
            .iter()
            .fold(0u16, |acc, &b| acc * 10 + (b - b'0') as u16)
    };

    CalendarDate::new(number(0..4), number(4..6) as u8, number(6..8) as u8)
}

/// Formats as `CCYYMMDD`.
#[inline]
pub fn format(date: &CalendarDate) -> String {
    date.to_string()
}

impl FromStr for CalendarDate {
    type Err = CodecError;

    #[inline]
    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

impl fmt::Display for CalendarDate {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year, self.month, self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    fn assert_range_error(s: &str) {
        let err = parse(s).unwrap_err();
        assert!(matches!(err, CodecError::InvalidDateRange { .. }), "{}: {:?}", s, err);
    }

    fn assert_format_error(s: &str) {
        assert_eq!(parse(s).unwrap_err(), CodecError::InvalidDateFormat(s.to_string()));
    }

    #[test]
    fn test_leap_years() {
        assert!(parse("20240229").is_ok());
        assert_range_error("20230229");
        assert!(parse("20000229").is_ok());
        assert_range_error("19000229");

        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2023, 1), 31);
        assert_eq!(days_in_month(2023, 4), 30);
        assert_eq!(days_in_month(2023, 12), 31);
        assert_eq!(days_in_month(2023, 0), 0);
        assert_eq!(days_in_month(2023, 13), 0);
    }

    #[test]
    fn test_parse() {
        let d = date("20240315");
        assert_eq!((d.year(), d.month(), d.day()), (2024, 3, 15));

        assert_format_error("");
        assert_format_error("2024031");
        assert_format_error("202403150");
        assert_format_error("2024-03-15");
        assert_format_error(" 20240315");
        assert_format_error("2024031a");
        assert_format_error("２０２４０３１５");

        assert_range_error("16001231");
        assert_range_error("40000101");
        assert_range_error("20241301");
        assert_range_error("20240001");
        assert_range_error("20240100");
        assert_range_error("20240431");
        assert_eq!(
            parse("20230229").unwrap_err(),
            CodecError::InvalidDateRange {
                year: 2023,
                month: 2,
                day: 29
            }
        );
    }

    #[test]
    fn test_format_roundtrip() {
        for s in &["16010101", "19991231", "20000229", "20240101", "39991231"] {
            assert_eq!(format(&date(s)), *s);
        }
        assert_eq!(CalendarDate::new(1700, 3, 1).unwrap().to_string(), "17000301");
    }

    #[test]
    fn test_every_date() {
        let mut count = 0u32;
        let mut previous: Option<CalendarDate> = None;
        for year in MIN_YEAR..=MAX_YEAR {
            for month in 1..=12u8 {
                for day in 1..=days_in_month(year, month) {
                    let d = CalendarDate::new(year, month, day).unwrap();
                    let text = format(&d);
                    assert_eq!(parse(&text).unwrap(), d);

                    count += 1;
                    assert_eq!(d.to_integer_date(), count);
                    assert_eq!(CalendarDate::from_integer_date(count).unwrap(), d);

                    if let Some(previous) = previous {
                        assert!(previous < d);
                        assert_eq!(previous.checked_add_days(1), Some(d));
                    }
                    previous = Some(d);
                }
                assert!(CalendarDate::new(year, month, days_in_month(year, month) + 1).is_err());
            }
        }
        assert_eq!(count, MAX_INTEGER_DATE);
    }

    #[test]
    fn test_ordering() {
        assert!(date("20240229") < date("20240301"));
        assert!(date("19991231") < date("20000101"));
        assert_eq!(date("20240229").max(date("20231231")), date("20240229"));
    }

    #[test]
    fn test_integer_date() {
        fn assert_integer(s: &str, expected: u32) {
            let d = date(s);
            assert_eq!(d.to_integer_date(), expected, "{}", s);
            assert_eq!(CalendarDate::from_integer_date(expected).unwrap(), d);
        }

        assert_integer("16010101", 1);
        assert_integer("16010102", 2);
        assert_integer("16011231", 365);
        assert_integer("16020101", 366);
        assert_integer("19700101", 134775);
        assert_integer("20000101", 145732);
        assert_integer("20240229", 154557);
        assert_integer("39991231", 876216);
        assert_eq!(MAX_INTEGER_DATE, 876216);

        assert!(CalendarDate::from_integer_date(0).is_err());
        assert!(CalendarDate::from_integer_date(MAX_INTEGER_DATE + 1).is_err());
    }

    #[test]
    fn test_day_of_year() {
        assert_eq!(date("20240101").day_of_year(), 1);
        assert_eq!(date("20240301").day_of_year(), 61);
        assert_eq!(date("20230301").day_of_year(), 60);
        assert_eq!(date("20241231").day_of_year(), 366);
    }

    #[test]
    fn test_checked_add_days() {
        assert_eq!(date("20240228").checked_add_days(1), Some(date("20240229")));
        assert_eq!(date("20240228").checked_add_days(2), Some(date("20240301")));
        assert_eq!(date("20240301").checked_add_days(-1), Some(date("20240229")));
        assert_eq!(date("16010101").checked_add_days(150000 - 1), Some(date("20110908")));
        assert_eq!(date("16010101").checked_add_days(-1), None);
        assert_eq!(date("39991231").checked_add_days(1), None);
        assert_eq!(date("20240101").checked_add_days(i64::MAX), None);
    }
}
