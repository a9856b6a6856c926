// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dropdown item sources for enum members.
//!
//! A [`ChoiceList`] lists an enum's variants in declaration order, optionally
//! preceded by an absent item for nullable members. Each [`ChoiceItem`]
//! carries a display alias, and its [`bind_value`](ChoiceItem::bind_value)
//! feeds straight back into
//! [`BindableValue::set_bind_value`](crate::BindableValue::set_bind_value).

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::slice;

use crate::types::EnumInfo;
use crate::value::{EnumVariant, Value};

/// One entry of a [`ChoiceList`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceItem {
    value: Option<EnumVariant>,
    name_alias: Option<String>,
}

impl ChoiceItem {
    /// Creates an item for `value`; `None` is the absent item.
    #[must_use]
    pub const fn new(value: Option<EnumVariant>) -> Self {
        Self {
            value,
            name_alias: None,
        }
    }

    /// Returns the variant, or `None` for the absent item.
    #[must_use]
    #[inline]
    pub const fn value(&self) -> Option<EnumVariant> {
        self.value
    }

    /// Returns the variant name; empty for the absent item.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.value.map_or("", |variant| variant.name())
    }

    /// Returns the display alias.
    #[must_use]
    #[inline]
    pub fn name_alias(&self) -> Option<&str> {
        self.name_alias.as_deref()
    }

    /// Sets the display alias.
    pub fn set_name_alias(&mut self, alias: Option<String>) {
        self.name_alias = alias;
    }

    /// Returns the alias if set, otherwise the name.
    #[must_use]
    pub fn name_display(&self) -> &str {
        self.name_alias.as_deref().unwrap_or_else(|| self.name())
    }

    /// Returns the text that selects this item when written as a bind value.
    #[must_use]
    pub fn bind_value(&self) -> Option<&'static str> {
        self.value.map(|variant| variant.name())
    }
}

impl fmt::Display for ChoiceItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The selectable items of an enum member.
///
/// # Example
///
/// ```rust
/// use understory_binding::{ChoiceList, EnumInfo};
///
/// const ALIGN: EnumInfo = EnumInfo::new("Align", &["Start", "End"]);
///
/// let choices = ChoiceList::new(ALIGN, true, Some("(inherit)".into()));
/// let labels: Vec<_> = choices.iter().map(|item| item.name_display()).collect();
/// assert_eq!(labels, ["(inherit)", "Start", "End"]);
/// assert_eq!(choices.items()[0].bind_value(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceList {
    items: Vec<ChoiceItem>,
}

impl ChoiceList {
    /// Lists the variants of `info`, led by an absent item aliased
    /// `null_alias` when `null_item` is set.
    #[must_use]
    pub fn new(info: EnumInfo, null_item: bool, null_alias: Option<String>) -> Self {
        let mut items = Vec::with_capacity(info.variants().len() + usize::from(null_item));
        if null_item {
            let mut item = ChoiceItem::new(None);
            item.set_name_alias(null_alias);
            items.push(item);
        }
        items.extend(
            (0..info.variants().len())
                .filter_map(|index| info.variant(index))
                .map(|variant| ChoiceItem::new(Some(variant))),
        );
        Self { items }
    }

    /// Returns the items in display order.
    #[must_use]
    #[inline]
    pub fn items(&self) -> &[ChoiceItem] {
        &self.items
    }

    /// Returns the items for editing aliases.
    #[inline]
    pub fn items_mut(&mut self) -> &mut [ChoiceItem] {
        &mut self.items
    }

    /// Returns the number of items.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no items.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates the items in display order.
    pub fn iter(&self) -> slice::Iter<'_, ChoiceItem> {
        self.items.iter()
    }

    /// Returns the index of the item matching a member's current value.
    ///
    /// Absence matches the absent item; an enum value matches by variant
    /// index. Any other value matches nothing.
    #[must_use]
    pub fn position(&self, value: Option<&Value>) -> Option<usize> {
        let wanted = match value {
            None => None,
            Some(Value::Enum(variant)) => Some(variant.index()),
            Some(_) => return None,
        };
        self.items
            .iter()
            .position(|item| item.value.map(|variant| variant.index()) == wanted)
    }
}

impl<'a> IntoIterator for &'a ChoiceList {
    type Item = &'a ChoiceItem;
    type IntoIter = slice::Iter<'a, ChoiceItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
