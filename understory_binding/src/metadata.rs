// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display metadata for a bound member.
//!
//! This module provides [`ValueDef`]: the name, alias, description, ordering,
//! and visibility a UI needs to present one member. It knows nothing about the
//! member's value.

use alloc::string::String;

use crate::described::Summaries;

/// UI display metadata for one named member.
///
/// # Example
///
/// ```rust
/// use understory_binding::ValueDef;
///
/// let mut def = ValueDef::new("FontSize");
/// assert_eq!(def.name_display(), "FontSize");
/// assert!(def.is_visible());
///
/// def.set_name_alias(Some("Font size".into()));
/// def.set_sort_order(2);
/// assert_eq!(def.name_display(), "Font size");
/// assert_eq!(def.name(), "FontSize");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueDef {
    name: String,
    name_alias: Option<String>,
    description: Option<String>,
    sort_order: i32,
    visible: bool,
    read_only: bool,
}

impl ValueDef {
    /// Creates metadata for the member called `name`.
    ///
    /// Defaults: no alias, no description, sort order `0`, visible, writable.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        debug_assert!(!name.is_empty(), "member names are never empty");
        Self {
            name,
            name_alias: None,
            description: None,
            sort_order: 0,
            visible: true,
            read_only: false,
        }
    }

    /// Returns the member name.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the display alias, if one is set.
    #[must_use]
    #[inline]
    pub fn name_alias(&self) -> Option<&str> {
        self.name_alias.as_deref()
    }

    /// Sets or clears the display alias.
    pub fn set_name_alias(&mut self, alias: Option<String>) {
        self.name_alias = alias;
    }

    /// Returns the alias when it is non-blank, otherwise the name.
    #[must_use]
    pub fn name_display(&self) -> &str {
        self.name_alias
            .as_deref()
            .filter(|alias| !alias.trim().is_empty())
            .unwrap_or(&self.name)
    }

    /// Returns the description, if any.
    #[must_use]
    #[inline]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Sets or clears the description.
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// Returns `true` if the description has non-whitespace content.
    ///
    /// UI layers use this to decide whether to add tooltip or description
    /// columns at all.
    #[must_use]
    pub fn has_description(&self) -> bool {
        self.description
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty())
    }

    /// Takes the description for this member from a name → summary map.
    ///
    /// The lookup prefers an exact key and otherwise matches case-insensitively,
    /// taking the smallest of several such keys. Blank or missing summaries
    /// leave the current description alone.
    pub fn update_description(&mut self, summaries: &Summaries) {
        let summary = summaries.get(self.name.as_str()).or_else(|| {
            summaries
                .iter()
                .filter(|(key, _)| key.eq_ignore_ascii_case(&self.name))
                .min_by(|(a, _), (b, _)| a.cmp(b))
                .map(|(_, summary)| summary)
        });
        if let Some(Some(summary)) = summary
            && !summary.trim().is_empty()
        {
            self.description = Some(summary.clone());
        }
    }

    /// Returns the sort order used by render lists.
    #[must_use]
    #[inline]
    pub fn sort_order(&self) -> i32 {
        self.sort_order
    }

    /// Sets the sort order.
    pub fn set_sort_order(&mut self, sort_order: i32) {
        self.sort_order = sort_order;
    }

    /// Returns whether the member appears in render lists.
    #[must_use]
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Shows or hides the member.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Returns whether string writes are ignored.
    #[must_use]
    #[inline]
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Makes string writes through the binding a no-op (or enables them again).
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }
}
