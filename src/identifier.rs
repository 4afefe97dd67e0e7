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

//! Account, card, SSN and phone number formatting.
//!
//! Each formatter first moves its input into an unsigned numeric field, so
//! separators in the input are dropped, short values are zero-filled and
//! long values keep their trailing digits.

use crate::pic::format_unsigned_numeric;

const ACCOUNT_NUMBER_DIGITS: usize = 11;
const CARD_NUMBER_DIGITS: usize = 16;
const SSN_DIGITS: usize = 9;
const PHONE_NUMBER_DIGITS: usize = 10;

/// Copies `digits` into a template, one digit per `#`.
fn fill_template(template: &str, digits: &str) -> String {
    let mut digits = digits.chars();
    template
        .chars()
        .map(|c| match c {
            '#' => digits.next().unwrap_or('0'),
            other => other,
        })
        .collect()
}

/// `PIC 9(11)`.
#[inline]
pub fn format_account_number(value: &str) -> String {
    format_unsigned_numeric(value, ACCOUNT_NUMBER_DIGITS)
}

/// `PIC 9(16)`.
#[inline]
pub fn format_card_number(value: &str) -> String {
    format_unsigned_numeric(value, CARD_NUMBER_DIGITS)
}

/// `NNNN-NNNN-NNNN-NNNN`.
#[inline]
pub fn format_card_number_grouped(value: &str) -> String {
    fill_template("####-####-####-####", &format_card_number(value))
}

/// Replaces all but the last four card digits with `*`.
pub fn mask_card_number(value: &str) -> String {
    let digits = format_card_number(value);
    let visible = CARD_NUMBER_DIGITS - 4;
    digits
        .char_indices()
        .map(|(i, c)| if i < visible { '*' } else { c })
        .collect()
}

/// `PIC 9(9)` as `NNN-NN-NNNN`.
#[inline]
pub fn format_ssn(value: &str) -> String {
    fill_template("###-##-####", &format_unsigned_numeric(value, SSN_DIGITS))
}

/// `PIC 9(10)` as `(NNN)NNN-NNNN`.
#[inline]
pub fn format_phone_number(value: &str) -> String {
    fill_template("(###)###-####", &format_unsigned_numeric(value, PHONE_NUMBER_DIGITS))
}
