// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_binding` crate.
//!
//! These exercise a full model over a sample type with one member of every
//! shape: plain and nullable numbers, text, enums, and composite values.

use std::cell::RefCell;
use std::rc::Rc;

use understory_binding::{
    BindValueFlags, BindingModel, DescribedModel, DescriptionCache, MemberInfo, Model, Schema,
    StaticDocumentation, member_enum, member_opaque,
};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum Choice {
    #[default]
    A,
    B,
    C,
}

member_enum!(Choice { A, B, C });

#[derive(Debug, Default, PartialEq)]
struct Options {
    name: Option<String>,
    enabled: bool,
}

member_opaque!(Options);

#[derive(Debug, Default)]
struct Sample {
    d: f64,
    dn: Option<f64>,
    i: i32,
    i_n: Option<i32>,
    s: String,
    sn: Option<String>,
    e: Choice,
    en: Option<Choice>,
    options: Options,
    options_n: Option<Options>,
}

impl Schema for Sample {
    fn members() -> Vec<MemberInfo> {
        vec![
            MemberInfo::field("D", |s: &Self| &s.d, |s: &mut Self| &mut s.d),
            MemberInfo::field("DN", |s: &Self| &s.dn, |s: &mut Self| &mut s.dn),
            MemberInfo::field("I", |s: &Self| &s.i, |s: &mut Self| &mut s.i),
            MemberInfo::field("IN", |s: &Self| &s.i_n, |s: &mut Self| &mut s.i_n),
            MemberInfo::field("S", |s: &Self| &s.s, |s: &mut Self| &mut s.s),
            MemberInfo::field("SN", |s: &Self| &s.sn, |s: &mut Self| &mut s.sn),
            MemberInfo::field("E", |s: &Self| &s.e, |s: &mut Self| &mut s.e),
            MemberInfo::field("EN", |s: &Self| &s.en, |s: &mut Self| &mut s.en),
            MemberInfo::field(
                "Options",
                |s: &Self| &s.options,
                |s: &mut Self| &mut s.options,
            ),
            MemberInfo::field(
                "OptionsN",
                |s: &Self| &s.options_n,
                |s: &mut Self| &mut s.options_n,
            ),
        ]
    }
}

fn attached(sample: Sample) -> (Model<Sample>, Rc<RefCell<Sample>>) {
    let mut model = Model::<Sample>::new().unwrap();
    let source = Rc::new(RefCell::new(sample));
    model.set_source(Some(source.clone()));
    (model, source)
}

#[test]
fn model_lists_every_member_by_name() {
    let model = Model::<Sample>::new().unwrap();
    let names: Vec<_> = model.iter().map(|item| item.name()).collect();
    assert_eq!(
        names,
        ["D", "DN", "E", "EN", "I", "IN", "Options", "OptionsN", "S", "SN"]
    );
}

#[test]
fn nullable_classification() {
    let model = Model::<Sample>::new().unwrap();
    let nullable: Vec<_> = model
        .iter()
        .filter(|item| item.is_nullable())
        .map(|item| item.name())
        .collect();
    assert_eq!(nullable, ["DN", "EN", "IN", "OptionsN", "SN"]);

    let nullable_value_types: Vec<_> = model
        .iter()
        .filter(|item| item.is_nullable_value_type())
        .map(|item| item.name())
        .collect();
    assert_eq!(nullable_value_types, ["DN", "EN", "IN"]);

    let numerical: Vec<_> = model
        .iter()
        .filter(|item| item.is_numerical())
        .map(|item| item.name())
        .collect();
    assert_eq!(numerical, ["D", "DN", "I", "IN"]);
}

#[test]
fn unattached_model_reads_nothing() {
    let model = Model::<Sample>::new().unwrap();
    for item in &model {
        assert_eq!(item.value(), None, "{}", item.name());
        assert_eq!(item.bind_value(), None, "{}", item.name());
        assert_eq!(item.format_value(), None, "{}", item.name());
    }
}

#[test]
fn double_formats_and_binds() {
    let (mut model, _source) = attached(Sample {
        d: 123.406,
        ..Sample::default()
    });
    let d = model.get_item_mut("D").unwrap();
    d.set_format_string(Some("N2".into()));
    assert_eq!(d.format_value().as_deref(), Some("123.41"));
    assert_eq!(d.bind_value().as_deref(), Some("123.406"));
}

#[test]
fn double_null_writes_follow_flags() {
    let (mut model, source) = attached(Sample {
        d: 123.406,
        ..Sample::default()
    });
    let d = model.get_item_mut("D").unwrap();

    d.set_bind_value(None);
    assert_eq!(d.bind_value().as_deref(), Some("123.406"));

    d.set_bind_value_flags(BindValueFlags::USE_DEFAULT_SET_VALUE_FOR_NULL);
    d.set_bind_value(None);
    assert_eq!(d.bind_value().as_deref(), Some("0"));

    source.borrow_mut().d = 123.406;
    d.set_bind_value(Some(""));
    assert_eq!(d.bind_value().as_deref(), Some("123.406"));

    d.set_bind_value_flags(BindValueFlags::TREAT_EMPTY_STRING_AS_NULL_FOR_VALUE_TYPES);
    d.set_bind_value(Some(""));
    assert_eq!(d.bind_value().as_deref(), Some("123.406"));

    d.set_bind_value_flags(
        BindValueFlags::USE_DEFAULT_SET_VALUE_FOR_NULL
            | BindValueFlags::TREAT_EMPTY_STRING_AS_NULL_FOR_VALUE_TYPES,
    );
    d.set_bind_value(Some(""));
    assert_eq!(d.bind_value().as_deref(), Some("0"));
}

#[test]
fn nullable_double_null_clears() {
    let (model, source) = attached(Sample {
        dn: Some(123.406),
        ..Sample::default()
    });
    let dn = model.get_item("DN").unwrap();
    assert_eq!(dn.bind_value().as_deref(), Some("123.406"));
    dn.set_bind_value(None);
    assert_eq!(dn.bind_value(), None);
    assert_eq!(source.borrow().dn, None);
}

#[test]
fn integer_truncates() {
    let (model, _source) = attached(Sample::default());
    let i = model.get_item("I").unwrap();
    i.set_bind_value(Some("123.406"));
    assert_eq!(i.bind_value().as_deref(), Some("123"));

    let i_n = model.get_item("IN").unwrap();
    i_n.set_bind_value(Some("-5.5"));
    assert_eq!(i_n.bind_value().as_deref(), Some("-5"));
}

#[test]
fn text_round_trips_and_read_only_blocks() {
    let (mut model, _source) = attached(Sample::default());
    let s = model.get_item_mut("S").unwrap();
    s.set_bind_value(Some("123.45678"));
    assert_eq!(s.bind_value().as_deref(), Some("123.45678"));

    s.def_mut().set_read_only(true);
    s.set_bind_value(Some("456.789"));
    assert_eq!(s.bind_value().as_deref(), Some("123.45678"));
}

#[test]
fn enum_round_trips() {
    let (model, _source) = attached(Sample::default());
    let e = model.get_item("E").unwrap();
    for name in ["A", "B", "C"] {
        e.set_bind_value(Some(name));
        assert_eq!(e.bind_value().as_deref(), Some(name));
    }
    e.set_bind_value(None);
    assert_eq!(e.bind_value().as_deref(), Some("C"));
    e.set_bind_value(Some(""));
    assert_eq!(e.bind_value().as_deref(), Some("C"));
}

#[test]
fn nullable_enum_clears() {
    let (model, _source) = attached(Sample::default());
    let en = model.get_item("EN").unwrap();
    for name in ["A", "B", "C"] {
        en.set_bind_value(Some(name));
        assert_eq!(en.bind_value().as_deref(), Some(name));
    }
    en.set_bind_value(None);
    assert_eq!(en.bind_value(), None);
    en.set_bind_value(Some("C"));
    en.set_bind_value(Some(""));
    assert_eq!(en.bind_value(), None);
}

#[test]
fn composite_members_ignore_string_writes() {
    let (model, source) = attached(Sample::default());
    model
        .get_item("Options")
        .unwrap()
        .set_bind_value(Some("anything"));
    model.get_item("OptionsN").unwrap().set_bind_value(Some("x"));
    assert_eq!(source.borrow().options, Options::default());
    assert_eq!(source.borrow().options_n, None);
    assert_eq!(model.get_item("OptionsN").unwrap().format_value(), None);
}

#[test]
fn render_list_through_erased_model() {
    let (mut model, _source) = attached(Sample::default());
    for item in model.items_mut() {
        let visible = item.name().starts_with('D');
        item.def_mut().set_visible(visible);
    }
    model.get_item_mut("DN").unwrap().def_mut().set_sort_order(-1);

    let erased: &dyn BindingModel = &model;
    let rows: Vec<_> = erased
        .render_list()
        .into_iter()
        .map(|item| item.def().name().to_owned())
        .collect();
    assert_eq!(rows, ["DN", "D"]);
}

#[test]
fn described_model_fills_descriptions_once() {
    let docs = StaticDocumentation::new()
        .with_summary::<Sample>("D", "A plain double.")
        .with_summary::<Sample>("en", "An optional choice.");
    let cache = DescriptionCache::new();

    let model = DescribedModel::<Sample>::new(&cache, Some(&docs)).unwrap();
    let described: Vec<_> = model
        .iter()
        .filter(|item| item.def().has_description())
        .map(|item| item.name())
        .collect();
    assert_eq!(described, ["D", "EN"]);

    let empty = StaticDocumentation::new();
    let model = DescribedModel::<Sample>::new(&cache, Some(&empty)).unwrap();
    assert_eq!(
        model.get_item("EN").unwrap().def().description(),
        Some("An optional choice.")
    );
}
