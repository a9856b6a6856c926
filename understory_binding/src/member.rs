// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Schema introspection.
//!
//! A schema type describes its bindable members once, through [`Schema`], as a
//! table of [`MemberInfo`] descriptors. Each descriptor carries the member's
//! name and classified type plus type-erased accessors, so the binding layer
//! can read and write the member without knowing the schema type statically.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::fmt;

use crate::types::MemberType;
use crate::value::{Member, Value};

/// Identifies a schema type at runtime.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SchemaId {
    type_id: TypeId,
    name: &'static str,
}

impl SchemaId {
    /// Returns the id of `S`.
    #[must_use]
    pub fn of<S: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<S>(),
            name: short_type_name(core::any::type_name::<S>()),
        }
    }

    /// Returns the [`TypeId`] of the schema type.
    #[must_use]
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the unqualified type name, for messages.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Strips the module path, keeping generic arguments intact.
fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    match base.rfind("::") {
        Some(pos) => &full[pos + 2..],
        None => full,
    }
}

type Getter = Rc<dyn Fn(&dyn Any) -> Option<Value>>;
type Setter = Rc<dyn Fn(&mut dyn Any, Option<Value>) -> bool>;

/// A type-erased descriptor for one member of a schema type.
///
/// # Example
///
/// ```rust
/// use understory_binding::{MemberInfo, SchemaId, Value};
///
/// struct Sample {
///     d: f64,
/// }
///
/// let member = MemberInfo::field("D", |s: &Sample| &s.d, |s: &mut Sample| &mut s.d);
/// assert_eq!(member.name(), "D");
/// assert_eq!(member.owner(), SchemaId::of::<Sample>());
///
/// let mut sample = Sample { d: 1.5 };
/// assert_eq!(member.read(&sample), Some(Value::from(1.5_f64)));
/// assert!(member.write(&mut sample, Some(Value::from(2.0_f64))));
/// assert_eq!(sample.d, 2.0);
/// ```
#[derive(Clone)]
pub struct MemberInfo {
    name: &'static str,
    member_type: MemberType,
    owner: SchemaId,
    public: bool,
    getter: Option<Getter>,
    setter: Option<Setter>,
}

impl MemberInfo {
    /// Describes a readable and writable field of `S`.
    pub fn field<S, T>(
        name: &'static str,
        get: impl Fn(&S) -> &T + 'static,
        get_mut: impl Fn(&mut S) -> &mut T + 'static,
    ) -> Self
    where
        S: 'static,
        T: Member,
    {
        Self {
            name,
            member_type: T::member_type(),
            owner: SchemaId::of::<S>(),
            public: true,
            getter: Some(getter(move |s: &S| get(s).to_value())),
            setter: Some(setter(get_mut)),
        }
    }

    /// Describes a member of `S` that can be read but not written.
    pub fn read_only<S, T>(name: &'static str, get: impl Fn(&S) -> &T + 'static) -> Self
    where
        S: 'static,
        T: Member,
    {
        Self {
            name,
            member_type: T::member_type(),
            owner: SchemaId::of::<S>(),
            public: true,
            getter: Some(getter(move |s: &S| get(s).to_value())),
            setter: None,
        }
    }

    /// Describes a read-only member whose value is computed from `S`.
    pub fn computed<S, T>(name: &'static str, compute: impl Fn(&S) -> T + 'static) -> Self
    where
        S: 'static,
        T: Member,
    {
        Self {
            name,
            member_type: T::member_type(),
            owner: SchemaId::of::<S>(),
            public: true,
            getter: Some(getter(move |s: &S| compute(s).to_value())),
            setter: None,
        }
    }

    /// Describes a member of `S` that can be written but not read.
    ///
    /// Models never include such members.
    pub fn write_only<S, T>(
        name: &'static str,
        get_mut: impl Fn(&mut S) -> &mut T + 'static,
    ) -> Self
    where
        S: 'static,
        T: Member,
    {
        Self {
            name,
            member_type: T::member_type(),
            owner: SchemaId::of::<S>(),
            public: true,
            getter: None,
            setter: Some(setter(get_mut)),
        }
    }

    /// Marks the member as non-public.
    ///
    /// Non-public members are skipped unless a model is built with
    /// [`MemberSelection::NON_PUBLIC`](crate::MemberSelection::NON_PUBLIC).
    #[must_use]
    pub fn non_public(mut self) -> Self {
        self.public = false;
        self
    }

    /// Returns the member name.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the member's declared type.
    #[must_use]
    #[inline]
    pub fn member_type(&self) -> MemberType {
        self.member_type
    }

    /// Returns the schema type that declares this member.
    #[must_use]
    #[inline]
    pub fn owner(&self) -> SchemaId {
        self.owner
    }

    /// Returns `true` if the member is declared on `S`.
    #[must_use]
    pub fn belongs_to<S: 'static>(&self) -> bool {
        self.owner.type_id() == TypeId::of::<S>()
    }

    /// Returns whether the member is public.
    #[must_use]
    #[inline]
    pub fn is_public(&self) -> bool {
        self.public
    }

    /// Returns whether the member can be read.
    #[must_use]
    #[inline]
    pub fn can_read(&self) -> bool {
        self.getter.is_some()
    }

    /// Returns whether the member can be written.
    #[must_use]
    #[inline]
    pub fn can_write(&self) -> bool {
        self.setter.is_some()
    }

    /// Reads the member from `source`.
    ///
    /// Returns `None` when the member holds no value, cannot be read, or
    /// `source` is not of the owning type.
    #[must_use]
    pub fn read(&self, source: &dyn Any) -> Option<Value> {
        self.getter.as_ref().and_then(|get| get(source))
    }

    /// Writes `value` into the member on `source`.
    ///
    /// Returns `false` and leaves `source` untouched when the member is not
    /// writable, `source` is not of the owning type, or `value` does not fit
    /// the member's type.
    pub fn write(&self, source: &mut dyn Any, value: Option<Value>) -> bool {
        self.setter.as_ref().is_some_and(|set| set(source, value))
    }
}

fn getter<S: 'static>(read: impl Fn(&S) -> Option<Value> + 'static) -> Getter {
    Rc::new(move |source: &dyn Any| source.downcast_ref::<S>().and_then(&read))
}

fn setter<S, T>(get_mut: impl Fn(&mut S) -> &mut T + 'static) -> Setter
where
    S: 'static,
    T: Member,
{
    Rc::new(move |source: &mut dyn Any, value: Option<Value>| {
        let Some(source) = source.downcast_mut::<S>() else {
            return false;
        };
        match T::from_value(value) {
            Some(native) => {
                *get_mut(source) = native;
                true
            }
            None => false,
        }
    })
}

impl fmt::Debug for MemberInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberInfo")
            .field("name", &self.name)
            .field("member_type", &self.member_type)
            .field("owner", &self.owner)
            .field("public", &self.public)
            .field("can_read", &self.can_read())
            .field("can_write", &self.can_write())
            .finish_non_exhaustive()
    }
}

/// A type whose members can be bound.
///
/// Implement this by listing the type's members, or use
/// [`schema_members!`](crate::schema_members) for plain fields.
///
/// ```rust
/// use understory_binding::{MemberInfo, Schema};
///
/// struct Sample {
///     d: f64,
///     label: String,
/// }
///
/// impl Schema for Sample {
///     fn members() -> Vec<MemberInfo> {
///         vec![
///             MemberInfo::field("D", |s: &Self| &s.d, |s: &mut Self| &mut s.d),
///             MemberInfo::read_only("Label", |s: &Self| &s.label),
///         ]
///     }
/// }
///
/// assert_eq!(Sample::members().len(), 2);
/// ```
pub trait Schema: 'static {
    /// Returns descriptors for every member of the type, in any order.
    fn members() -> Vec<MemberInfo>;
}

/// Implements [`Schema`] for a struct by listing its fields.
///
/// Each field becomes a readable and writable member named after the field.
/// A `name = field` entry sets the member name explicitly.
///
/// ```rust
/// use understory_binding::{Schema, schema_members};
///
/// struct Sample {
///     d: f64,
///     dn: Option<f64>,
/// }
///
/// schema_members!(Sample { "D" = d, dn });
///
/// let names: Vec<_> = Sample::members().iter().map(|m| m.name()).collect();
/// assert_eq!(names, ["D", "dn"]);
/// ```
#[macro_export]
macro_rules! schema_members {
    (@member $ty:ident, $name:literal = $field:ident) => {
        $crate::MemberInfo::field(
            $name,
            |s: &$ty| &s.$field,
            |s: &mut $ty| &mut s.$field,
        )
    };
    (@member $ty:ident, $field:ident) => {
        $crate::MemberInfo::field(
            stringify!($field),
            |s: &$ty| &s.$field,
            |s: &mut $ty| &mut s.$field,
        )
    };
    ($ty:ident { $($($name:literal =)? $field:ident),* $(,)? }) => {
        impl $crate::Schema for $ty {
            fn members() -> $crate::__private::Vec<$crate::MemberInfo> {
                $crate::__private::vec![
                    $($crate::schema_members!(@member $ty, $($name =)? $field)),*
                ]
            }
        }
    };
}
