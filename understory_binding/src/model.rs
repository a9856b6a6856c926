// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Models: the bound members of one schema type.
//!
//! A [`Model`] is built once per schema type from its member table and holds one
//! [`BindableValue`] per selected member, ordered by name. Attaching a source
//! object to the model attaches it to every item.
//!
//! UI code that does not know the schema type works through the object-safe
//! [`BindingModel`] and [`BindingItem`] traits instead.

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::cmp::Ordering;
use core::fmt;

use crate::bindable::BindableValue;
use crate::error::BindError;
use crate::flags::MemberSelection;
use crate::member::{MemberInfo, Schema, SchemaId};
use crate::metadata::ValueDef;
use crate::types::MemberType;
use crate::value::Value;

/// An ordered collection of bound members of `S`.
///
/// Items are unique by name, compared case-insensitively, and sorted by name.
///
/// # Example
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use understory_binding::{Model, schema_members};
///
/// struct Margins {
///     top: f64,
///     left: f64,
///     label: String,
/// }
///
/// schema_members!(Margins { "Top" = top, "Left" = left, "Label" = label });
///
/// let mut model = Model::<Margins>::new()?;
/// let names: Vec<_> = model.iter().map(|item| item.name()).collect();
/// assert_eq!(names, ["Label", "Left", "Top"]);
///
/// let source = Rc::new(RefCell::new(Margins { top: 1.0, left: 2.0, label: "m".into() }));
/// model.set_source(Some(source.clone()));
///
/// model.get_item("top").unwrap().set_bind_value(Some("4"));
/// assert_eq!(source.borrow().top, 4.0);
///
/// model.get_item_mut("Label").unwrap().def_mut().set_visible(false);
/// let render: Vec<_> = model.to_render_list().iter().map(|item| item.name()).collect();
/// assert_eq!(render, ["Left", "Top"]);
/// # Ok::<(), understory_binding::BindError>(())
/// ```
pub struct Model<S> {
    items: Vec<BindableValue<S>>,
    source: Option<Rc<RefCell<S>>>,
}

impl<S: Schema> Model<S> {
    /// Binds every public, readable member of `S`.
    ///
    /// # Errors
    ///
    /// [`BindError::TypeMismatch`] if `S::members()` lists a member declared on
    /// another type.
    pub fn new() -> Result<Self, BindError> {
        Self::with_selection(MemberSelection::default())
    }

    /// Binds the readable members of `S` matched by `selection`.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn with_selection(selection: MemberSelection) -> Result<Self, BindError> {
        Self::with_filter(|member| selection.selects(member))
    }

    /// Binds the readable members of `S` accepted by `filter`.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn with_filter(mut filter: impl FnMut(&MemberInfo) -> bool) -> Result<Self, BindError> {
        Self::from_members(
            S::members()
                .into_iter()
                .filter(|member| member.can_read() && filter(member)),
        )
    }

    /// Binds exactly the named members of `S`.
    ///
    /// Names must match exactly, as for [`BindableValue::new`].
    ///
    /// # Errors
    ///
    /// [`BindError::MemberNotFound`] for the first name `S` does not declare.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Self, BindError> {
        let members = S::members();
        let selected = names
            .into_iter()
            .map(|name| {
                members
                    .iter()
                    .find(|member| member.name() == name)
                    .cloned()
                    .ok_or_else(|| BindError::MemberNotFound {
                        schema: SchemaId::of::<S>().name(),
                        member: name.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_members(selected)
    }
}

impl<S: 'static> Model<S> {
    /// Binds the given member descriptors.
    ///
    /// A name that repeats an earlier one (ignoring case) is skipped. Items are
    /// sorted by name.
    ///
    /// # Errors
    ///
    /// [`BindError::TypeMismatch`] if a descriptor belongs to another type.
    pub fn from_members(members: impl IntoIterator<Item = MemberInfo>) -> Result<Self, BindError> {
        let mut items: Vec<BindableValue<S>> = Vec::new();
        for member in members {
            if items
                .iter()
                .any(|item| item.name().eq_ignore_ascii_case(member.name()))
            {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    schema = SchemaId::of::<S>().name(),
                    member = member.name(),
                    "duplicate member name skipped"
                );
                continue;
            }
            items.push(BindableValue::from_member(member)?);
        }
        items.sort_by(|a, b| compare_names(a.name(), b.name()));

        #[cfg(feature = "tracing")]
        tracing::debug!(
            schema = SchemaId::of::<S>().name(),
            items = items.len(),
            "model built"
        );

        Ok(Self {
            items,
            source: None,
        })
    }

    /// Returns the number of items.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the model has no items.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the items in name order.
    #[must_use]
    #[inline]
    pub fn items(&self) -> &[BindableValue<S>] {
        &self.items
    }

    /// Returns the items in name order, for editing metadata.
    #[inline]
    pub fn items_mut(&mut self) -> &mut [BindableValue<S>] {
        &mut self.items
    }

    /// Iterates the items in name order.
    pub fn iter(&self) -> core::slice::Iter<'_, BindableValue<S>> {
        self.items.iter()
    }

    /// Returns `true` if an item is named `name`, ignoring case.
    #[must_use]
    pub fn contains_item(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Returns the item named `name`, ignoring case.
    #[must_use]
    pub fn get_item(&self, name: &str) -> Option<&BindableValue<S>> {
        self.position(name).map(|index| &self.items[index])
    }

    /// Returns the item named `name`, ignoring case, for editing.
    pub fn get_item_mut(&mut self, name: &str) -> Option<&mut BindableValue<S>> {
        self.position(name).map(|index| &mut self.items[index])
    }

    /// Removes the item named `name`, ignoring case.
    ///
    /// Returns whether an item was removed.
    pub fn remove_item(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns the attached source.
    #[must_use]
    #[inline]
    pub fn source(&self) -> Option<&Rc<RefCell<S>>> {
        self.source.as_ref()
    }

    /// Attaches `source` to the model and every item, or detaches it.
    pub fn set_source(&mut self, source: Option<Rc<RefCell<S>>>) {
        for item in &mut self.items {
            item.set_source(source.clone());
        }
        self.source = source;
    }

    /// Returns the visible items ordered by sort order, then display name.
    ///
    /// The sort is stable and the model itself is not reordered.
    #[must_use]
    pub fn to_render_list(&self) -> Vec<&BindableValue<S>> {
        let mut list: Vec<_> = self
            .items
            .iter()
            .filter(|item| item.def().is_visible())
            .collect();
        list.sort_by(|a, b| render_order(a.def(), b.def()));
        list
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.name().eq_ignore_ascii_case(name))
    }
}

/// Case-insensitive order with an ordinal tiebreak, so the result is total.
fn compare_names(a: &str, b: &str) -> Ordering {
    fn fold(s: &str) -> impl Iterator<Item = u8> + '_ {
        s.bytes().map(|b| b.to_ascii_lowercase())
    }
    fold(a).cmp(fold(b)).then_with(|| a.cmp(b))
}

fn render_order(a: &ValueDef, b: &ValueDef) -> Ordering {
    a.sort_order()
        .cmp(&b.sort_order())
        .then_with(|| compare_names(a.name_display(), b.name_display()))
}

impl<'a, S: 'static> IntoIterator for &'a Model<S> {
    type Item = &'a BindableValue<S>;
    type IntoIter = core::slice::Iter<'a, BindableValue<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S> fmt::Debug for Model<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("schema", &core::any::type_name::<S>())
            .field("items", &self.items)
            .field("has_source", &self.source.is_some())
            .finish()
    }
}

/// One bound item, independent of the schema type.
///
/// This is the rendering boundary: everything a UI row needs.
pub trait BindingItem {
    /// Returns the display metadata.
    fn def(&self) -> &ValueDef;

    /// Returns the display metadata for editing.
    fn def_mut(&mut self) -> &mut ValueDef;

    /// Returns the member's declared type.
    fn source_type(&self) -> MemberType;

    /// Returns `true` if the member may hold no value.
    fn is_nullable(&self) -> bool;

    /// Returns `true` if the member is a nullable value type.
    fn is_nullable_value_type(&self) -> bool;

    /// Returns `true` if the member is numeric.
    fn is_numerical(&self) -> bool;

    /// Reads the runtime value.
    fn value(&self) -> Option<Value>;

    /// Reads the display text.
    fn format_value(&self) -> Option<String>;

    /// Reads the editable text.
    fn bind_value(&self) -> Option<String>;

    /// Coerces and writes editable text.
    fn set_bind_value(&self, text: Option<&str>);
}

impl<S: 'static> BindingItem for BindableValue<S> {
    fn def(&self) -> &ValueDef {
        Self::def(self)
    }

    fn def_mut(&mut self) -> &mut ValueDef {
        Self::def_mut(self)
    }

    fn source_type(&self) -> MemberType {
        Self::source_type(self)
    }

    fn is_nullable(&self) -> bool {
        Self::is_nullable(self)
    }

    fn is_nullable_value_type(&self) -> bool {
        Self::is_nullable_value_type(self)
    }

    fn is_numerical(&self) -> bool {
        Self::is_numerical(self)
    }

    fn value(&self) -> Option<Value> {
        Self::value(self)
    }

    fn format_value(&self) -> Option<String> {
        Self::format_value(self)
    }

    fn bind_value(&self) -> Option<String> {
        Self::bind_value(self)
    }

    fn set_bind_value(&self, text: Option<&str>) {
        Self::set_bind_value(self, text);
    }
}

/// A model, independent of the schema type.
pub trait BindingModel {
    /// Returns the number of items.
    fn len(&self) -> usize;

    /// Returns `true` if there are no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if an item is named `name`, ignoring case.
    fn contains_item(&self, name: &str) -> bool;

    /// Returns the item named `name`, ignoring case.
    fn item(&self, name: &str) -> Option<&dyn BindingItem>;

    /// Returns the item named `name`, ignoring case, for editing.
    fn item_mut(&mut self, name: &str) -> Option<&mut dyn BindingItem>;

    /// Removes the item named `name`, ignoring case.
    fn remove_item(&mut self, name: &str) -> bool;

    /// Returns the visible items in render order.
    fn render_list(&self) -> Vec<&dyn BindingItem>;
}

impl<S: 'static> BindingModel for Model<S> {
    fn len(&self) -> usize {
        Self::len(self)
    }

    fn contains_item(&self, name: &str) -> bool {
        Self::contains_item(self, name)
    }

    fn item(&self, name: &str) -> Option<&dyn BindingItem> {
        self.get_item(name).map(|item| item as &dyn BindingItem)
    }

    fn item_mut(&mut self, name: &str) -> Option<&mut dyn BindingItem> {
        self.get_item_mut(name)
            .map(|item| item as &mut dyn BindingItem)
    }

    fn remove_item(&mut self, name: &str) -> bool {
        Self::remove_item(self, name)
    }

    fn render_list(&self) -> Vec<&dyn BindingItem> {
        self.to_render_list()
            .into_iter()
            .map(|item| item as &dyn BindingItem)
            .collect()
    }
}
