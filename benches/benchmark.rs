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

//! copybook-codec benchmark

use bencher::{benchmark_group, benchmark_main, black_box, Bencher};
use copybook_codec::pic::{self, SignPlacement};
use copybook_codec::{date, packed, zoned, Decimal, RoundingMode, SignStyle};
use std::collections::hash_map::DefaultHasher;
use std::hash::Hash;

#[inline(always)]
fn parse(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn decimal_parse(bench: &mut Bencher) {
    bench.iter(|| {
        let _n = parse(black_box("12345678901.23456789"));
    })
}

fn decimal_to_string(bench: &mut Bencher) {
    let val = parse("12345678901.23456789");
    bench.iter(|| {
        let _n = black_box(&val).to_string();
    })
}

fn decimal_to_display_string(bench: &mut Bencher) {
    let val = parse("-12345678901.23");
    bench.iter(|| {
        let _n = black_box(&val).to_display_string(true, SignStyle::Parentheses);
    })
}

fn decimal_add(bench: &mut Bencher) {
    let x = parse("12345678901.23456789");
    let y = parse("123456.7890123456789");
    bench.iter(|| {
        let _n = *black_box(&x) + *black_box(&y);
    })
}

fn decimal_mul(bench: &mut Bencher) {
    let x = parse("12345678901.23456789");
    let y = parse("123456.7890123456789");
    bench.iter(|| {
        let _n = *black_box(&x) * *black_box(&y);
    })
}

fn decimal_to_fixed_scale(bench: &mut Bencher) {
    let x = parse("12345678901.23456789");
    bench.iter(|| {
        let _n = black_box(&x).to_fixed_scale(2, RoundingMode::HalfEven).unwrap();
    })
}

fn decimal_hash(bench: &mut Bencher) {
    let x = parse("12345678901.23456789");
    let mut hasher = DefaultHasher::new();
    bench.iter(|| {
        let _n = black_box(&x).hash(&mut hasher);
    })
}

fn decimal_cmp(bench: &mut Bencher) {
    let x = parse("12345678901.23456789");
    let y = parse("12345.67890123456789");
    bench.iter(|| {
        let _n = black_box(x > y);
    })
}

fn packed_encode(bench: &mut Bencher) {
    let x = parse("-9876543210.12");
    bench.iter(|| {
        let _n = packed::encode(black_box(&x), 15, 2).unwrap();
    })
}

fn packed_decode(bench: &mut Bencher) {
    let bytes = packed::encode(&parse("-9876543210.12"), 15, 2).unwrap().into_bytes();
    bench.iter(|| {
        let _n = packed::decode(black_box(&bytes), 2).unwrap();
    })
}

fn zoned_encode(bench: &mut Bencher) {
    let x = parse("-9876543210.12");
    bench.iter(|| {
        let _n = zoned::encode(black_box(&x), 15).unwrap();
    })
}

fn zoned_decode(bench: &mut Bencher) {
    bench.iter(|| {
        let _n = zoned::decode(black_box("00987654321012K"), 2).unwrap();
    })
}

fn pic_format_signed_decimal(bench: &mut Bencher) {
    let x = parse("-123.456");
    bench.iter(|| {
        let _n = pic::format_signed_decimal(black_box(&x), 7, 2, SignPlacement::Trailing).unwrap();
    })
}

fn pic_parse_signed_decimal(bench: &mut Bencher) {
    bench.iter(|| {
        let _n = pic::parse_signed_decimal(black_box("0000123.46-"), 7, 2, SignPlacement::Trailing).unwrap();
    })
}

fn date_parse(bench: &mut Bencher) {
    bench.iter(|| {
        let _n = date::parse(black_box("20240229")).unwrap();
    })
}

fn date_to_integer(bench: &mut Bencher) {
    let d = date::parse("20240229").unwrap();
    bench.iter(|| {
        let _n = black_box(&d).to_integer_date();
    })
}

benchmark_group!(
    decimal_benches,
    decimal_parse,
    decimal_to_string,
    decimal_to_display_string,
    decimal_add,
    decimal_mul,
    decimal_to_fixed_scale,
    decimal_hash,
    decimal_cmp,
);

benchmark_group!(
    codec_benches,
    packed_encode,
    packed_decode,
    zoned_encode,
    zoned_decode,
    pic_format_signed_decimal,
    pic_parse_signed_decimal,
    date_parse,
    date_to_integer,
);

benchmark_main!(decimal_benches, codec_benches);
