// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bindable values.
//!
//! A [`BindableValue`] pairs a [`ValueDef`] with a live accessor to one member
//! of a shared source object. It exposes three views of the member:
//!
//! - [`value`](BindableValue::value) - the raw runtime value
//! - [`format_value`](BindableValue::format_value) - display text, honoring the
//!   item's format string
//! - [`bind_value`](BindableValue::bind_value) - editable text, coerced back to
//!   the member's native type on write
//!
//! ## Write path
//!
//! [`set_bind_value`](BindableValue::set_bind_value) never fails. Unparsable
//! text, writes to read-only items, and writes without a source are no-ops;
//! out-of-range numbers clamp.
//!
//! Dispatch runs on the member type, in order:
//!
//! 1. Text members store the incoming string verbatim, absence included.
//! 2. Members of any other non-value type ignore the write.
//! 3. No value (or an empty string under
//!    [`TREAT_EMPTY_STRING_AS_NULL_FOR_VALUE_TYPES`](BindValueFlags::TREAT_EMPTY_STRING_AS_NULL_FOR_VALUE_TYPES))
//!    writes the zero value under
//!    [`USE_DEFAULT_SET_VALUE_FOR_NULL`](BindValueFlags::USE_DEFAULT_SET_VALUE_FOR_NULL),
//!    otherwise clears a nullable member and leaves a non-nullable one alone.
//! 4. Booleans parse `true`/`false` case-insensitively. A failed parse clears a
//!    nullable member.
//! 5. Enums parse a variant name case-insensitively (or its index). Blank
//!    input clears a nullable member; a failed parse is ignored.
//! 6. Numbers parse as `f64`, clamp to the bind bounds, and convert to the
//!    member's exact kind, truncating for integers. Blank input clears a
//!    nullable member; a failed parse is ignored, as is a value that
//!    overflows an `f32` member to infinity.

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use core::cell::RefCell;
use core::fmt;
use core::marker::PhantomData;

use crate::choices::ChoiceList;
use crate::error::BindError;
use crate::flags::BindValueFlags;
use crate::format::format_value;
use crate::member::{MemberInfo, Schema, SchemaId};
use crate::metadata::ValueDef;
use crate::types::{MemberType, NumericKind, TypeKind};
use crate::value::{Number, Value};

/// Result of coercing bind text against the member type.
#[derive(Clone, Debug, PartialEq)]
enum Coerced {
    /// Store this value (`None` clears the member).
    Set(Option<Value>),
    /// Leave the member as it is.
    Unchanged,
}

/// One member of one source object, bound for UI editing.
///
/// The source is shared with the owning [`Model`](crate::Model) and any other
/// holders; the binding never controls its lifetime. All reads yield `None`
/// while no source is attached.
///
/// # Example
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use understory_binding::{BindableValue, schema_members};
///
/// struct Sample {
///     d: f64,
/// }
///
/// schema_members!(Sample { "D" = d });
///
/// let source = Rc::new(RefCell::new(Sample { d: 123.406 }));
/// let mut item = BindableValue::<Sample>::new("D")?;
/// item.set_format_string(Some("N2".into()));
/// assert_eq!(item.format_value(), None);
///
/// item.set_source(Some(source.clone()));
/// assert_eq!(item.format_value().as_deref(), Some("123.41"));
/// assert_eq!(item.bind_value().as_deref(), Some("123.406"));
///
/// item.set_bind_value(Some("7.5"));
/// assert_eq!(source.borrow().d, 7.5);
/// # Ok::<(), understory_binding::BindError>(())
/// ```
pub struct BindableValue<S> {
    def: ValueDef,
    member: MemberInfo,
    source_type: MemberType,
    inner_type: Option<MemberType>,
    source: Option<Rc<RefCell<S>>>,
    bind_min: Option<f64>,
    bind_max: Option<f64>,
    flags: BindValueFlags,
    format_string: Option<String>,
    _schema: PhantomData<fn() -> S>,
}

impl<S: Schema> BindableValue<S> {
    /// Binds the member of `S` called `name`.
    ///
    /// The name must match exactly.
    ///
    /// # Errors
    ///
    /// [`BindError::MemberNotFound`] if `S` has no such member.
    pub fn new(name: &str) -> Result<Self, BindError> {
        let member = S::members()
            .into_iter()
            .find(|member| member.name() == name)
            .ok_or_else(|| BindError::MemberNotFound {
                schema: SchemaId::of::<S>().name(),
                member: name.to_string(),
            })?;
        Self::from_member(member)
    }
}

impl<S: 'static> BindableValue<S> {
    /// Binds the member described by `member`.
    ///
    /// # Errors
    ///
    /// [`BindError::TypeMismatch`] if the descriptor belongs to another type.
    pub fn from_member(member: MemberInfo) -> Result<Self, BindError> {
        if !member.belongs_to::<S>() {
            return Err(BindError::TypeMismatch {
                schema: SchemaId::of::<S>().name(),
                owner: member.owner().name(),
                member: member.name(),
            });
        }
        let source_type = member.member_type();
        Ok(Self {
            def: ValueDef::new(member.name()),
            source_type,
            inner_type: source_type.inner_type(),
            member,
            source: None,
            bind_min: None,
            bind_max: None,
            flags: BindValueFlags::empty(),
            format_string: None,
            _schema: PhantomData,
        })
    }

    /// Returns the display metadata.
    #[must_use]
    #[inline]
    pub fn def(&self) -> &ValueDef {
        &self.def
    }

    /// Returns the display metadata for editing.
    #[inline]
    pub fn def_mut(&mut self) -> &mut ValueDef {
        &mut self.def
    }

    /// Returns the member name.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        self.def.name()
    }

    /// Returns the member descriptor.
    #[must_use]
    #[inline]
    pub fn member(&self) -> &MemberInfo {
        &self.member
    }

    /// Returns the member's declared type.
    #[must_use]
    #[inline]
    pub fn source_type(&self) -> MemberType {
        self.source_type
    }

    /// Returns the non-nullable type under a nullable value type.
    #[must_use]
    #[inline]
    pub fn inner_type(&self) -> Option<MemberType> {
        self.inner_type
    }

    /// Returns `true` if the member is a nullable value type.
    ///
    /// Nullable text is not a nullable value type; see
    /// [`is_nullable`](Self::is_nullable).
    #[must_use]
    #[inline]
    pub fn is_nullable_value_type(&self) -> bool {
        self.inner_type.is_some()
    }

    /// Returns `true` if the member may hold no value at all.
    #[must_use]
    #[inline]
    pub fn is_nullable(&self) -> bool {
        self.source_type.is_nullable()
    }

    /// Returns `true` if the member, or the type under its nullable wrapper,
    /// is numeric.
    #[must_use]
    #[inline]
    pub fn is_numerical(&self) -> bool {
        self.source_type.is_numerical()
    }

    /// Returns the dropdown items for an enum member.
    ///
    /// With `null_item`, an absent item aliased `null_alias` comes first.
    /// `None` for members of any other type.
    #[must_use]
    pub fn choices(&self, null_item: bool, null_alias: Option<String>) -> Option<ChoiceList> {
        match self.source_type.kind() {
            TypeKind::Enum(info) => Some(ChoiceList::new(info, null_item, null_alias)),
            _ => None,
        }
    }

    /// Returns the attached source.
    #[must_use]
    #[inline]
    pub fn source(&self) -> Option<&Rc<RefCell<S>>> {
        self.source.as_ref()
    }

    /// Attaches or detaches the source object.
    pub fn set_source(&mut self, source: Option<Rc<RefCell<S>>>) {
        self.source = source;
    }

    /// Returns the lower clamp bound.
    #[must_use]
    #[inline]
    pub fn bind_min(&self) -> Option<f64> {
        self.bind_min
    }

    /// Returns the upper clamp bound.
    #[must_use]
    #[inline]
    pub fn bind_max(&self) -> Option<f64> {
        self.bind_max
    }

    /// Sets the inclusive clamp bounds for numeric writes.
    ///
    /// `None` leaves that side unbounded. Bounds do not apply when a nullable
    /// member is cleared.
    ///
    /// # Errors
    ///
    /// [`BindError::Range`] if either bound is NaN or infinite, or if both
    /// are given and `min > max`; the current bounds are kept.
    pub fn set_bind_min_max(&mut self, min: Option<f64>, max: Option<f64>) -> Result<(), BindError> {
        if min.is_some_and(|min| !min.is_finite()) || max.is_some_and(|max| !max.is_finite()) {
            return Err(BindError::Range {
                min: min.unwrap_or(f64::NEG_INFINITY),
                max: max.unwrap_or(f64::INFINITY),
            });
        }
        if let (Some(min), Some(max)) = (min, max)
            && min > max
        {
            return Err(BindError::Range { min, max });
        }
        self.bind_min = min;
        self.bind_max = max;
        Ok(())
    }

    /// Returns the write-path policy.
    #[must_use]
    #[inline]
    pub fn bind_value_flags(&self) -> BindValueFlags {
        self.flags
    }

    /// Sets the write-path policy.
    pub fn set_bind_value_flags(&mut self, flags: BindValueFlags) {
        self.flags = flags;
    }

    /// Returns the format string used by [`format_value`](Self::format_value).
    #[must_use]
    #[inline]
    pub fn format_string(&self) -> Option<&str> {
        self.format_string.as_deref()
    }

    /// Sets the format string used by [`format_value`](Self::format_value).
    pub fn set_format_string(&mut self, format: Option<String>) {
        self.format_string = format;
    }

    /// Reads the member's runtime value.
    ///
    /// `None` when no source is attached, the member holds no value, or the
    /// source is mutably borrowed elsewhere.
    #[must_use]
    pub fn value(&self) -> Option<Value> {
        let source = self.source.as_ref()?.try_borrow().ok()?;
        self.member.read(&*source)
    }

    /// Writes a runtime value directly, bypassing coercion and
    /// [`ValueDef::is_read_only`].
    ///
    /// Returns whether the member was written; a value of the wrong kind is
    /// rejected.
    pub fn set_value(&self, value: Option<Value>) -> bool {
        let Some(source) = &self.source else {
            return false;
        };
        self.write(source, value)
    }

    /// Returns the display text: the value formatted with the item's format
    /// string.
    #[must_use]
    pub fn format_value(&self) -> Option<String> {
        format_value(self.value().as_ref(), self.format_string.as_deref())
    }

    /// Returns the editable text: the value's plain rendering, ignoring the
    /// format string.
    #[must_use]
    pub fn bind_value(&self) -> Option<String> {
        self.value().map(|value| value.to_string())
    }

    /// Coerces `text` to the member's type and writes it.
    ///
    /// Never fails; see the [module docs](self) for the rules.
    pub fn set_bind_value(&self, text: Option<&str>) {
        if self.def.is_read_only() {
            #[cfg(feature = "tracing")]
            tracing::trace!(member = self.name(), "bind write ignored: read-only");
            return;
        }
        let Some(source) = &self.source else {
            #[cfg(feature = "tracing")]
            tracing::trace!(member = self.name(), "bind write ignored: no source");
            return;
        };
        if !self.member.can_write() {
            #[cfg(feature = "tracing")]
            tracing::trace!(member = self.name(), "bind write ignored: not writable");
            return;
        }
        if let Coerced::Set(value) = self.coerce(text) {
            self.write(source, value);
        }
    }

    fn write(&self, source: &RefCell<S>, value: Option<Value>) -> bool {
        let Ok(mut source) = source.try_borrow_mut() else {
            return false;
        };
        self.member.write(&mut *source, value)
    }

    fn coerce(&self, text: Option<&str>) -> Coerced {
        let kind = self.source_type.kind();
        match kind {
            TypeKind::Text => {
                return Coerced::Set(text.map(|text| Value::Text(text.to_string())));
            }
            TypeKind::Other(_) => return Coerced::Unchanged,
            TypeKind::Bool | TypeKind::Enum(_) | TypeKind::Numeric(_) => {}
        }

        let empty_as_null = self
            .flags
            .contains(BindValueFlags::TREAT_EMPTY_STRING_AS_NULL_FOR_VALUE_TYPES);
        let Some(text) = text.filter(|text| !(empty_as_null && text.is_empty())) else {
            return self.coerce_absent();
        };

        let text = text.trim();
        let nullable = self.is_nullable_value_type();
        match kind {
            TypeKind::Bool => match parse_bool(text) {
                Some(b) => Coerced::Set(Some(Value::Bool(b))),
                None if nullable => Coerced::Set(None),
                None => Coerced::Unchanged,
            },
            TypeKind::Enum(info) => {
                if nullable && text.is_empty() {
                    return Coerced::Set(None);
                }
                info.parse(text)
                    .map_or(Coerced::Unchanged, |variant| {
                        Coerced::Set(Some(Value::Enum(variant)))
                    })
            }
            TypeKind::Numeric(kind) => {
                if nullable && text.is_empty() {
                    return Coerced::Set(None);
                }
                parse_number(text)
                    .and_then(|parsed| self.clamp(kind, parsed))
                    .map_or(Coerced::Unchanged, |number| {
                        Coerced::Set(Some(Value::Number(number)))
                    })
            }
            TypeKind::Text | TypeKind::Other(_) => Coerced::Unchanged,
        }
    }

    fn coerce_absent(&self) -> Coerced {
        if self
            .flags
            .contains(BindValueFlags::USE_DEFAULT_SET_VALUE_FOR_NULL)
        {
            Coerced::Set(self.source_type.zero_value())
        } else if self.is_nullable_value_type() {
            Coerced::Set(None)
        } else {
            Coerced::Unchanged
        }
    }

    /// Applies the bind bounds to `parsed` and converts to `kind`.
    ///
    /// Bounds are checked against the unclamped value, min first. `None` if
    /// the converted value is not finite.
    fn clamp(&self, kind: NumericKind, parsed: f64) -> Option<Number> {
        let target = match (self.bind_min, self.bind_max) {
            (Some(min), _) if parsed < min => {
                #[cfg(feature = "tracing")]
                tracing::debug!(member = self.name(), parsed, min, "bind write clamped to min");
                min
            }
            (_, Some(max)) if parsed > max => {
                #[cfg(feature = "tracing")]
                tracing::debug!(member = self.name(), parsed, max, "bind write clamped to max");
                max
            }
            _ => parsed,
        };
        let number = Number::from_f64(kind, target);
        if number.to_f64().is_finite() {
            Some(number)
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!(member = self.name(), parsed, %kind, "bind write ignored: overflow");
            None
        }
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Parses a finite `f64`; `inf` and `NaN` spellings are rejected.
fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

impl<S> fmt::Debug for BindableValue<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindableValue")
            .field("def", &self.def)
            .field("source_type", &self.source_type)
            .field("has_source", &self.source.is_some())
            .field("bind_min", &self.bind_min)
            .field("bind_max", &self.bind_max)
            .field("flags", &self.flags)
            .field("format_string", &self.format_string)
            .finish_non_exhaustive()
    }
}
