// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `understory_binding`.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::cell::RefCell;
use std::rc::Rc;

use understory_binding::{
    BindValueFlags, BindableValue, MemberInfo, Model, Schema, format_value, member_enum,
};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum Align {
    #[default]
    Start,
    Center,
    End,
}

member_enum!(Align { Start, Center, End });

#[derive(Clone, Debug, Default)]
struct Row {
    width: f64,
    count: Option<i32>,
    label: String,
    align: Align,
}

impl Schema for Row {
    fn members() -> Vec<MemberInfo> {
        vec![
            MemberInfo::field("Width", |r: &Self| &r.width, |r: &mut Self| &mut r.width),
            MemberInfo::field("Count", |r: &Self| &r.count, |r: &mut Self| &mut r.count),
            MemberInfo::field("Label", |r: &Self| &r.label, |r: &mut Self| &mut r.label),
            MemberInfo::field("Align", |r: &Self| &r.align, |r: &mut Self| &mut r.align),
        ]
    }
}

fn bound(name: &str) -> BindableValue<Row> {
    let mut item = BindableValue::<Row>::new(name).unwrap();
    item.set_source(Some(Rc::new(RefCell::new(Row::default()))));
    item
}

fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("binding/set_bind_value");

    let width = bound("Width");
    group.bench_function("f64", |b| {
        b.iter(|| width.set_bind_value(black_box(Some("123.406"))));
    });

    let mut clamped = bound("Width");
    clamped.set_bind_min_max(Some(0.0), Some(100.0)).unwrap();
    group.bench_function("f64_clamped", |b| {
        b.iter(|| clamped.set_bind_value(black_box(Some("250"))));
    });

    let mut count = bound("Count");
    count.set_bind_value_flags(BindValueFlags::all());
    group.bench_function("option_i32_empty", |b| {
        b.iter(|| count.set_bind_value(black_box(Some(""))));
    });

    let align = bound("Align");
    group.bench_function("enum", |b| {
        b.iter(|| align.set_bind_value(black_box(Some("center"))));
    });

    let label = bound("Label");
    group.bench_function("text", |b| {
        b.iter(|| label.set_bind_value(black_box(Some("hello world"))));
    });

    group.bench_function("rejected", |b| {
        b.iter(|| width.set_bind_value(black_box(Some("not a number"))));
    });

    group.finish();
}

fn bench_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("binding/read");

    let mut width = bound("Width");
    width.set_value(Some(1_234_567.891_f64.into()));
    width.set_format_string(Some("N2".into()));
    group.bench_function("bind_value", |b| b.iter(|| black_box(width.bind_value())));
    group.bench_function("format_value", |b| {
        b.iter(|| black_box(width.format_value()));
    });

    let value = width.value();
    for format in ["N2", "F4", "E", "P1"] {
        group.bench_with_input(BenchmarkId::new("format", format), &format, |b, format| {
            b.iter(|| black_box(format_value(value.as_ref(), Some(*format))));
        });
    }

    group.finish();
}

fn bench_model(c: &mut Criterion) {
    let mut group = c.benchmark_group("binding/model");

    group.bench_function("build", |b| {
        b.iter(|| black_box(Model::<Row>::new().unwrap()));
    });

    group.bench_function("render_list", |b| {
        b.iter_batched(
            || {
                let mut model = Model::<Row>::new().unwrap();
                for (order, item) in model.items_mut().iter_mut().rev().enumerate() {
                    item.def_mut().set_sort_order(i32::try_from(order).unwrap());
                }
                model
            },
            |model| {
                black_box(model.to_render_list().len());
                black_box(model);
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("set_source", |b| {
        let mut model = Model::<Row>::new().unwrap();
        let source = Rc::new(RefCell::new(Row::default()));
        b.iter(|| model.set_source(Some(black_box(source.clone()))));
    });

    group.finish();
}

criterion_group!(benches, bench_write, bench_read, bench_model);
criterion_main!(benches);
