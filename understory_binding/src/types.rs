// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Member type classification.
//!
//! A member's declared type is reduced once, when its descriptor is built, to a
//! [`MemberType`]: a closed [`TypeKind`] plus a nullable flag. The coercion
//! engine matches on the kind exhaustively instead of comparing type
//! identities.

use core::fmt;

use crate::value::{EnumVariant, Number, Value};
use alloc::string::String;

/// The numeric kinds a member can be declared as.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NumericKind {
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `isize`
    Isize,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `usize`
    Usize,
    /// `f32`
    F32,
    /// `f64`
    F64,
}

impl NumericKind {
    /// Returns `true` for the floating point kinds.
    #[must_use]
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Returns the Rust spelling of the kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Static description of a field-less enum: its name and variant names in
/// declaration order.
///
/// Usually produced by [`member_enum!`](crate::member_enum).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EnumInfo {
    name: &'static str,
    variants: &'static [&'static str],
}

impl EnumInfo {
    /// Creates a new enum description.
    #[must_use]
    pub const fn new(name: &'static str, variants: &'static [&'static str]) -> Self {
        Self { name, variants }
    }

    /// Returns the enum's type name.
    #[must_use]
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the variant names in declaration order.
    #[must_use]
    #[inline]
    pub const fn variants(&self) -> &'static [&'static str] {
        self.variants
    }

    /// Returns the variant at `index`, if any.
    #[must_use]
    pub fn variant(&self, index: usize) -> Option<EnumVariant> {
        self.variants
            .get(index)
            .map(|name| EnumVariant::new(index, name))
    }

    /// Parses a variant from text.
    ///
    /// Names match case-insensitively. A plain decimal number selects the
    /// variant at that index.
    #[must_use]
    pub fn parse(&self, text: &str) -> Option<EnumVariant> {
        let text = text.trim();
        if let Some(index) = self
            .variants
            .iter()
            .position(|name| name.eq_ignore_ascii_case(text))
        {
            return self.variant(index);
        }
        text.parse::<usize>().ok().and_then(|index| self.variant(index))
    }
}

/// The closed set of shapes a member type can take.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Text (`String`).
    Text,
    /// A boolean.
    Bool,
    /// A field-less enum.
    Enum(EnumInfo),
    /// One of the primitive numeric kinds.
    Numeric(NumericKind),
    /// Anything else; not string-bindable. Carries the type's name.
    Other(&'static str),
}

/// A classified member type.
///
/// `nullable` records an `Option` wrapper. For value kinds ([`TypeKind::Bool`],
/// [`TypeKind::Enum`], [`TypeKind::Numeric`]) that makes the member a nullable
/// value type with an [`inner_type`](Self::inner_type); for text and other
/// kinds it only means the member may hold no value.
///
/// # Example
///
/// ```rust
/// use understory_binding::{MemberType, NumericKind, TypeKind};
///
/// let dn = MemberType::new(TypeKind::Numeric(NumericKind::F64)).into_nullable();
/// assert!(dn.is_numerical());
/// assert!(dn.is_nullable_value_type());
/// assert_eq!(dn.inner_type(), Some(MemberType::new(TypeKind::Numeric(NumericKind::F64))));
///
/// let sn = MemberType::new(TypeKind::Text).into_nullable();
/// assert!(sn.is_nullable());
/// assert!(!sn.is_nullable_value_type());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemberType {
    kind: TypeKind,
    nullable: bool,
}

impl MemberType {
    /// Creates a non-nullable member type of the given kind.
    #[must_use]
    pub const fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    /// Returns the same type wrapped as nullable.
    #[must_use]
    pub const fn into_nullable(self) -> Self {
        Self {
            kind: self.kind,
            nullable: true,
        }
    }

    /// Returns the type's kind.
    #[must_use]
    #[inline]
    pub const fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Returns `true` if the member may hold no value at all.
    #[must_use]
    #[inline]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Returns `true` for booleans, enums, and numbers.
    #[must_use]
    pub const fn is_value_type(&self) -> bool {
        matches!(
            self.kind,
            TypeKind::Bool | TypeKind::Enum(_) | TypeKind::Numeric(_)
        )
    }

    /// Returns `true` if this is a nullable wrapper over a value type.
    #[must_use]
    pub const fn is_nullable_value_type(&self) -> bool {
        self.nullable && self.is_value_type()
    }

    /// Returns the non-nullable type under a nullable value type.
    #[must_use]
    pub const fn inner_type(&self) -> Option<Self> {
        if self.is_nullable_value_type() {
            Some(Self::new(self.kind))
        } else {
            None
        }
    }

    /// Returns `true` if the type, or the type under its nullable wrapper, is numeric.
    #[must_use]
    pub const fn is_numerical(&self) -> bool {
        matches!(self.kind, TypeKind::Numeric(_))
    }

    /// Returns `true` for text members.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self.kind, TypeKind::Text)
    }

    /// Returns the numeric kind, if the type is numerical.
    #[must_use]
    pub const fn numeric_kind(&self) -> Option<NumericKind> {
        match self.kind {
            TypeKind::Numeric(kind) => Some(kind),
            _ => None,
        }
    }

    /// Returns the zero value for the underlying kind.
    ///
    /// `false`, `0`, the first enum variant, or empty text. [`TypeKind::Other`]
    /// has no zero value.
    #[must_use]
    pub fn zero_value(&self) -> Option<Value> {
        match self.kind {
            TypeKind::Text => Some(Value::Text(String::new())),
            TypeKind::Bool => Some(Value::Bool(false)),
            TypeKind::Enum(info) => info.variant(0).map(Value::Enum),
            TypeKind::Numeric(kind) => Some(Value::Number(Number::zero(kind))),
            TypeKind::Other(_) => None,
        }
    }
}

impl fmt::Display for MemberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.kind {
            TypeKind::Text => "String",
            TypeKind::Bool => "bool",
            TypeKind::Enum(info) => info.name(),
            TypeKind::Numeric(kind) => kind.name(),
            TypeKind::Other(name) => name,
        };
        if self.nullable {
            write!(f, "Option<{name}>")
        } else {
            f.write_str(name)
        }
    }
}
