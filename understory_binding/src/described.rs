// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Models with member descriptions.
//!
//! A [`DescribedModel`] is a [`Model`] whose items take their descriptions from
//! an external [`DocumentationSource`]. Descriptions for a schema type are
//! fetched at most once and kept in a [`DescriptionCache`] shared by every
//! described model built against it.
//!
//! ## Cache lifecycle
//!
//! - An entry is created the first time a documentation source returns
//!   summaries for a type. A source that is not loaded creates no entry, so a
//!   later construction may still populate it.
//! - The first entry for a type wins. Later constructions read it without
//!   consulting the source.
//! - Entries are never invalidated.
//!
//! The cache is single-threaded. Hosts that want one cache per process keep it
//! in a `thread_local!` or in their UI context and pass it by reference.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::TypeId;
use core::cell::RefCell;
use core::fmt;
use core::ops::{Deref, DerefMut};

use hashbrown::HashMap;

use crate::error::BindError;
use crate::member::{Schema, SchemaId};
use crate::model::{BindingItem, BindingModel, Model};

/// Member name → description, as supplied by a documentation source.
///
/// A `None` description is a documented member without text.
pub type Summaries = HashMap<String, Option<String>>;

/// Supplies member descriptions for schema types.
///
/// Any `Fn(SchemaId) -> Option<Summaries>` is a documentation source.
pub trait DocumentationSource {
    /// Returns the summaries for `schema`'s members.
    ///
    /// `None` means the documentation is not available (for example, not
    /// loaded yet). An empty map means the type has no documented members.
    fn try_get_summaries(&self, schema: SchemaId) -> Option<Summaries>;
}

impl<F> DocumentationSource for F
where
    F: Fn(SchemaId) -> Option<Summaries>,
{
    fn try_get_summaries(&self, schema: SchemaId) -> Option<Summaries> {
        self(schema)
    }
}

/// Populate-once cache of member descriptions per schema type.
///
/// See the [module docs](self) for the lifecycle.
#[derive(Debug, Default)]
pub struct DescriptionCache {
    entries: RefCell<HashMap<TypeId, Rc<Summaries>>>,
}

impl DescriptionCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached summaries for `schema`.
    #[must_use]
    pub fn get(&self, schema: SchemaId) -> Option<Rc<Summaries>> {
        self.entries.borrow().get(&schema.type_id()).cloned()
    }

    /// Returns `true` if summaries for `schema` are cached.
    #[must_use]
    pub fn is_populated(&self, schema: SchemaId) -> bool {
        self.entries.borrow().contains_key(&schema.type_id())
    }

    /// Returns the cached summaries for `schema`, fetching them from `docs` on
    /// a miss.
    ///
    /// Returns `None`, caching nothing, when there is no source or the source
    /// has no summaries to give.
    pub fn get_or_populate(
        &self,
        schema: SchemaId,
        docs: Option<&dyn DocumentationSource>,
    ) -> Option<Rc<Summaries>> {
        if let Some(summaries) = self.get(schema) {
            return Some(summaries);
        }
        let fetched = Rc::new(docs?.try_get_summaries(schema)?);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            schema = schema.name(),
            members = fetched.len(),
            "description cache populated"
        );

        Some(Rc::clone(
            self.entries
                .borrow_mut()
                .entry(schema.type_id())
                .or_insert(fetched),
        ))
    }

    /// Returns the number of cached schema types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

/// A [`Model`] whose item descriptions come from a documentation source.
///
/// Dereferences to the underlying [`Model`].
///
/// # Example
///
/// ```rust
/// use understory_binding::{DescribedModel, DescriptionCache, StaticDocumentation, schema_members};
///
/// struct Sample {
///     d: f64,
/// }
///
/// schema_members!(Sample { "D" = d });
///
/// let docs = StaticDocumentation::new().with_summary::<Sample>("D", "A double.");
/// let cache = DescriptionCache::new();
///
/// let model = DescribedModel::<Sample>::new(&cache, Some(&docs))?;
/// assert_eq!(model.get_item("D").unwrap().def().description(), Some("A double."));
///
/// // Later models read the cache, even without a source.
/// let again = DescribedModel::<Sample>::new(&cache, None)?;
/// assert!(again.get_item("D").unwrap().def().has_description());
/// # Ok::<(), understory_binding::BindError>(())
/// ```
pub struct DescribedModel<S> {
    model: Model<S>,
}

impl<S: Schema> DescribedModel<S> {
    /// Binds every public, readable member of `S` and applies descriptions.
    ///
    /// # Errors
    ///
    /// As for [`Model::new`].
    pub fn new(
        cache: &DescriptionCache,
        docs: Option<&dyn DocumentationSource>,
    ) -> Result<Self, BindError> {
        Ok(Self::from_model(Model::new()?, cache, docs))
    }
}

impl<S: 'static> DescribedModel<S> {
    /// Applies descriptions to an already built model.
    ///
    /// Without cached or fetchable summaries the items are left undescribed.
    #[must_use]
    pub fn from_model(
        mut model: Model<S>,
        cache: &DescriptionCache,
        docs: Option<&dyn DocumentationSource>,
    ) -> Self {
        if let Some(summaries) = cache.get_or_populate(SchemaId::of::<S>(), docs) {
            for item in model.items_mut() {
                item.def_mut().update_description(&summaries);
            }
        }
        Self { model }
    }

    /// Returns the underlying model.
    #[must_use]
    pub fn into_inner(self) -> Model<S> {
        self.model
    }
}

impl<S> Deref for DescribedModel<S> {
    type Target = Model<S>;

    fn deref(&self) -> &Self::Target {
        &self.model
    }
}

impl<S> DerefMut for DescribedModel<S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.model
    }
}

impl<S> fmt::Debug for DescribedModel<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescribedModel")
            .field("model", &self.model)
            .finish()
    }
}

impl<S: 'static> BindingModel for DescribedModel<S> {
    fn len(&self) -> usize {
        self.model.len()
    }

    fn contains_item(&self, name: &str) -> bool {
        self.model.contains_item(name)
    }

    fn item(&self, name: &str) -> Option<&dyn BindingItem> {
        BindingModel::item(&self.model, name)
    }

    fn item_mut(&mut self, name: &str) -> Option<&mut dyn BindingItem> {
        BindingModel::item_mut(&mut self.model, name)
    }

    fn remove_item(&mut self, name: &str) -> bool {
        self.model.remove_item(name)
    }

    fn render_list(&self) -> Vec<&dyn BindingItem> {
        BindingModel::render_list(&self.model)
    }
}

/// An in-memory documentation source.
///
/// Holds summaries per schema type. While unloaded it reports no
/// documentation at all, like a documentation file that has not been read.
#[derive(Clone, Debug)]
pub struct StaticDocumentation {
    loaded: bool,
    summaries: HashMap<TypeId, Summaries>,
}

impl StaticDocumentation {
    /// Creates an empty, loaded source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            loaded: true,
            summaries: HashMap::new(),
        }
    }

    /// Creates an empty source that is not loaded.
    #[must_use]
    pub fn unloaded() -> Self {
        Self {
            loaded: false,
            ..Self::new()
        }
    }

    /// Adds a summary for `member` of `S`.
    #[must_use]
    pub fn with_summary<S: 'static>(mut self, member: &str, summary: &str) -> Self {
        self.insert::<S>(member, Some(summary.into()));
        self
    }

    /// Sets or replaces the summary for `member` of `S`.
    pub fn insert<S: 'static>(&mut self, member: &str, summary: Option<String>) {
        self.summaries
            .entry(TypeId::of::<S>())
            .or_default()
            .insert(member.into(), summary);
    }

    /// Returns whether the source reports documentation.
    #[must_use]
    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Marks the source as loaded or not.
    pub fn set_loaded(&mut self, loaded: bool) {
        self.loaded = loaded;
    }
}

impl Default for StaticDocumentation {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentationSource for StaticDocumentation {
    fn try_get_summaries(&self, schema: SchemaId) -> Option<Summaries> {
        if !self.loaded {
            return None;
        }
        Some(
            self.summaries
                .get(&schema.type_id())
                .cloned()
                .unwrap_or_default(),
        )
    }
}
