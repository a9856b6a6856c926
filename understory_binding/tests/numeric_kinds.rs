// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! String writes through every numeric member kind.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use understory_binding::{BindableValue, Number, NumericKind, schema_members};

#[derive(Debug, Default)]
struct Numbers {
    i8: i8,
    i16: i16,
    i32: i32,
    i64: i64,
    isize: isize,
    u8: u8,
    u16: u16,
    u32: u32,
    u64: u64,
    usize: usize,
    f32: f32,
    f64: f64,
    u8n: Option<u8>,
}

schema_members!(Numbers {
    "I8" = i8,
    "I16" = i16,
    "I32" = i32,
    "I64" = i64,
    "Isize" = isize,
    "U8" = u8,
    "U16" = u16,
    "U32" = u32,
    "U64" = u64,
    "Usize" = usize,
    "F32" = f32,
    "F64" = f64,
    "U8N" = u8n,
});

const INTEGERS: [(&str, NumericKind, i128, i128); 10] = [
    ("I8", NumericKind::I8, i8::MIN as i128, i8::MAX as i128),
    ("I16", NumericKind::I16, i16::MIN as i128, i16::MAX as i128),
    ("I32", NumericKind::I32, i32::MIN as i128, i32::MAX as i128),
    ("I64", NumericKind::I64, -(1 << 53), 1 << 53),
    ("Isize", NumericKind::Isize, i32::MIN as i128, i32::MAX as i128),
    ("U8", NumericKind::U8, 0, u8::MAX as i128),
    ("U16", NumericKind::U16, 0, u16::MAX as i128),
    ("U32", NumericKind::U32, 0, u32::MAX as i128),
    ("U64", NumericKind::U64, 0, 1 << 53),
    ("Usize", NumericKind::Usize, 0, u32::MAX as i128),
];

const ALL: [(&str, NumericKind); 12] = [
    ("I8", NumericKind::I8),
    ("I16", NumericKind::I16),
    ("I32", NumericKind::I32),
    ("I64", NumericKind::I64),
    ("Isize", NumericKind::Isize),
    ("U8", NumericKind::U8),
    ("U16", NumericKind::U16),
    ("U32", NumericKind::U32),
    ("U64", NumericKind::U64),
    ("Usize", NumericKind::Usize),
    ("F32", NumericKind::F32),
    ("F64", NumericKind::F64),
];

fn bound(name: &str) -> BindableValue<Numbers> {
    let mut item = BindableValue::<Numbers>::new(name).unwrap();
    item.set_source(Some(Rc::new(RefCell::new(Numbers::default()))));
    item
}

fn number(item: &BindableValue<Numbers>) -> Number {
    item.value().and_then(|value| value.as_number()).unwrap()
}

proptest! {
    #[test]
    fn integers_round_trip_in_range(index in 0_usize..INTEGERS.len(), raw in any::<u64>()) {
        let (name, kind, lo, hi) = INTEGERS[index];
        let x = lo + i128::from(raw) % (hi - lo + 1);
        let item = bound(name);
        item.set_bind_value(Some(&x.to_string()));
        let got = number(&item);
        prop_assert_eq!(got.kind(), kind);
        prop_assert_eq!(got.to_i128(), Some(x));
        prop_assert_eq!(item.bind_value(), Some(x.to_string()));
    }

    #[test]
    fn f32_round_trips(x in -1.0e30_f32..1.0e30) {
        let item = bound("F32");
        item.set_bind_value(Some(&f64::from(x).to_string()));
        prop_assert_eq!(number(&item), Number::F32(x));
    }

    #[test]
    fn every_kind_clamps_then_converts(
        index in 0_usize..ALL.len(),
        x in -1000.0_f64..1000.0,
        lo in 0.0_f64..50.0,
        hi in 50.0_f64..100.0,
    ) {
        let (name, kind) = ALL[index];
        let mut item = bound(name);
        item.set_bind_min_max(Some(lo), Some(hi)).unwrap();
        item.set_bind_value(Some(&x.to_string()));

        let clamped = x.clamp(lo, hi);
        let got = number(&item);
        prop_assert_eq!(got.kind(), kind);
        match kind {
            NumericKind::F32 => prop_assert_eq!(got.to_f64(), f64::from(clamped as f32)),
            NumericKind::F64 => prop_assert_eq!(got.to_f64(), clamped),
            _ => prop_assert_eq!(got.to_i128(), Some(clamped.trunc() as i128)),
        }
    }
}

#[test]
fn integers_saturate_at_kind_range() {
    let cases = [
        ("U8", "300", 255),
        ("U8", "-1", 0),
        ("I8", "-200", -128),
        ("I8", "127.9", 127),
        ("U16", "1e9", i128::from(u16::MAX)),
        ("I32", "1e12", i128::from(i32::MAX)),
        ("U64", "-5", 0),
        ("Usize", "-0.5", 0),
    ];
    for (name, text, expected) in cases {
        let item = bound(name);
        item.set_bind_value(Some(text));
        assert_eq!(number(&item).to_i128(), Some(expected), "{name} <- {text}");
    }
}

#[test]
fn nullable_small_integer() {
    let item = bound("U8N");
    item.set_bind_value(Some("7.9"));
    assert_eq!(item.bind_value().as_deref(), Some("7"));
    item.set_bind_value(Some("x"));
    assert_eq!(item.bind_value().as_deref(), Some("7"));
    item.set_bind_value(Some(""));
    assert_eq!(item.bind_value(), None);
}
