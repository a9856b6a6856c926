// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Binding: schema-driven property binding for generic UI controls.
//!
//! This crate lets a text box, dropdown, or table cell bind to any member of
//! any object through one contract: a string to edit, a string to display, and
//! display metadata. The control never needs to know the member's Rust type.
//!
//! ## Core Concepts
//!
//! ### Schemas and Members
//!
//! A type opts in by implementing [`Schema`], listing its members as
//! [`MemberInfo`] descriptors (or with [`schema_members!`] for plain fields).
//! Each member's type is classified once into a [`MemberType`]: text, bool,
//! enum, one of the primitive numeric kinds, or other, optionally nullable.
//!
//! ### Bindable Values
//!
//! [`BindableValue`] binds one member of a shared source object:
//!
//! - **`value`** - the raw runtime [`Value`]
//! - **`format_value`** - display text, honoring a format string such as `"N2"`
//! - **`bind_value`** - editable text; writes are coerced back to the member's
//!   type, clamped to optional bounds, and governed by [`BindValueFlags`]
//!
//! Writes never fail. Unparsable input, read-only items, and a missing source
//! are no-ops.
//!
//! Enum members also supply dropdown items through
//! [`BindableValue::choices`], optionally led by an absent item.
//!
//! ### Models
//!
//! [`Model`] binds all selected members of a schema type, sorted by name, and
//! hands an attached source to every item. [`Model::to_render_list`] yields the
//! visible items in display order. [`DescribedModel`] also fills in member
//! descriptions from a [`DocumentationSource`], once per type, through a
//! [`DescriptionCache`].
//!
//! ## Quick Start
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use understory_binding::{BindValueFlags, Model, member_enum, schema_members};
//!
//! #[derive(Clone, Copy, Debug, PartialEq)]
//! enum Unit {
//!     Px,
//!     Em,
//! }
//!
//! member_enum!(Unit { Px, Em });
//!
//! struct Font {
//!     size: f64,
//!     weight: Option<u16>,
//!     unit: Unit,
//! }
//!
//! schema_members!(Font { "Size" = size, "Weight" = weight, "Unit" = unit });
//!
//! let mut model = Model::<Font>::new()?;
//! let font = Rc::new(RefCell::new(Font { size: 12.5, weight: None, unit: Unit::Px }));
//! model.set_source(Some(font.clone()));
//!
//! let size = model.get_item_mut("Size").unwrap();
//! size.set_format_string(Some("F2".into()));
//! size.set_bind_min_max(Some(6.0), Some(72.0))?;
//! assert_eq!(size.format_value().as_deref(), Some("12.50"));
//!
//! // Out of range input clamps; garbage is ignored.
//! size.set_bind_value(Some("200"));
//! size.set_bind_value(Some("big"));
//! assert_eq!(font.borrow().size, 72.0);
//!
//! // Integers truncate; blank input clears a nullable member.
//! let weight = model.get_item_mut("weight").unwrap();
//! weight.set_bind_value(Some("700.9"));
//! assert_eq!(font.borrow().weight, Some(700));
//! weight.set_bind_value(Some(""));
//! assert_eq!(font.borrow().weight, None);
//!
//! // With the default-for-null policy, absence writes zero.
//! weight.set_bind_value_flags(BindValueFlags::USE_DEFAULT_SET_VALUE_FOR_NULL);
//! weight.set_bind_value(None);
//! assert_eq!(font.borrow().weight, Some(0));
//!
//! model.get_item("Unit").unwrap().set_bind_value(Some("em"));
//! assert_eq!(font.borrow().unit, Unit::Em);
//! # Ok::<(), understory_binding::BindError>(())
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards `std` to dependencies.
//! - `tracing`: emits `tracing` events for model construction, skipped
//!   duplicates, ignored writes, clamping, and description cache population.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod bindable;
mod choices;
mod described;
mod error;
mod flags;
mod format;
mod member;
mod metadata;
mod model;
mod types;
mod value;

pub use bindable::BindableValue;
pub use choices::{ChoiceItem, ChoiceList};
pub use described::{
    DescribedModel, DescriptionCache, DocumentationSource, StaticDocumentation, Summaries,
};
pub use error::BindError;
pub use flags::{BindValueFlags, MemberSelection};
pub use format::{NumberFormat, format_number, format_value};
pub use member::{MemberInfo, Schema, SchemaId};
pub use metadata::ValueDef;
pub use model::{BindingItem, BindingModel, Model};
pub use types::{EnumInfo, MemberType, NumericKind, TypeKind};
pub use value::{EnumVariant, Member, Number, Value};

#[doc(hidden)]
pub mod __private {
    pub use alloc::{format, vec, vec::Vec};
}
