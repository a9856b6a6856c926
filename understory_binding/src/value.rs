// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runtime member values.
//!
//! This module provides [`Value`], the dynamic form a member's value takes
//! while it crosses the binding layer, and the [`Member`] trait that converts
//! native Rust types to and from it.

use alloc::string::String;
use core::fmt;

use crate::types::{MemberType, NumericKind, TypeKind};

/// A single variant of a field-less enum.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EnumVariant {
    index: usize,
    name: &'static str,
}

impl EnumVariant {
    /// Creates a variant reference from its declaration index and name.
    #[must_use]
    pub const fn new(index: usize, name: &'static str) -> Self {
        Self { index, name }
    }

    /// Returns the variant's position in declaration order.
    #[must_use]
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the variant's name.
    #[must_use]
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

/// A number tagged with its exact numeric kind.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Number {
    /// `i8`
    I8(i8),
    /// `i16`
    I16(i16),
    /// `i32`
    I32(i32),
    /// `i64`
    I64(i64),
    /// `isize`
    Isize(isize),
    /// `u8`
    U8(u8),
    /// `u16`
    U16(u16),
    /// `u32`
    U32(u32),
    /// `u64`
    U64(u64),
    /// `usize`
    Usize(usize),
    /// `f32`
    F32(f32),
    /// `f64`
    F64(f64),
}

impl Number {
    /// Returns the kind of this number.
    #[must_use]
    pub const fn kind(&self) -> NumericKind {
        match self {
            Self::I8(_) => NumericKind::I8,
            Self::I16(_) => NumericKind::I16,
            Self::I32(_) => NumericKind::I32,
            Self::I64(_) => NumericKind::I64,
            Self::Isize(_) => NumericKind::Isize,
            Self::U8(_) => NumericKind::U8,
            Self::U16(_) => NumericKind::U16,
            Self::U32(_) => NumericKind::U32,
            Self::U64(_) => NumericKind::U64,
            Self::Usize(_) => NumericKind::Usize,
            Self::F32(_) => NumericKind::F32,
            Self::F64(_) => NumericKind::F64,
        }
    }

    /// Returns the zero value of `kind`.
    #[must_use]
    pub const fn zero(kind: NumericKind) -> Self {
        match kind {
            NumericKind::I8 => Self::I8(0),
            NumericKind::I16 => Self::I16(0),
            NumericKind::I32 => Self::I32(0),
            NumericKind::I64 => Self::I64(0),
            NumericKind::Isize => Self::Isize(0),
            NumericKind::U8 => Self::U8(0),
            NumericKind::U16 => Self::U16(0),
            NumericKind::U32 => Self::U32(0),
            NumericKind::U64 => Self::U64(0),
            NumericKind::Usize => Self::Usize(0),
            NumericKind::F32 => Self::F32(0.0),
            NumericKind::F64 => Self::F64(0.0),
        }
    }

    /// Converts `value` to `kind`.
    ///
    /// Integer kinds truncate toward zero and saturate at the kind's range;
    /// `f32` rounds to the nearest representable value.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "truncating conversion is the documented behavior"
    )]
    pub fn from_f64(kind: NumericKind, value: f64) -> Self {
        match kind {
            NumericKind::I8 => Self::I8(value as i8),
            NumericKind::I16 => Self::I16(value as i16),
            NumericKind::I32 => Self::I32(value as i32),
            NumericKind::I64 => Self::I64(value as i64),
            NumericKind::Isize => Self::Isize(value as isize),
            NumericKind::U8 => Self::U8(value as u8),
            NumericKind::U16 => Self::U16(value as u16),
            NumericKind::U32 => Self::U32(value as u32),
            NumericKind::U64 => Self::U64(value as u64),
            NumericKind::Usize => Self::Usize(value as usize),
            NumericKind::F32 => Self::F32(value as f32),
            NumericKind::F64 => Self::F64(value),
        }
    }

    /// Returns the value widened to `f64`.
    ///
    /// 64-bit integers beyond 2^53 lose precision.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        match *self {
            Self::I8(v) => f64::from(v),
            Self::I16(v) => f64::from(v),
            Self::I32(v) => f64::from(v),
            Self::I64(v) => v as f64,
            Self::Isize(v) => v as f64,
            Self::U8(v) => f64::from(v),
            Self::U16(v) => f64::from(v),
            Self::U32(v) => f64::from(v),
            Self::U64(v) => v as f64,
            Self::Usize(v) => v as f64,
            Self::F32(v) => f64::from(v),
            Self::F64(v) => v,
        }
    }

    /// Returns the value as an `i128` for integer kinds.
    #[must_use]
    pub fn to_i128(&self) -> Option<i128> {
        match *self {
            Self::I8(v) => Some(i128::from(v)),
            Self::I16(v) => Some(i128::from(v)),
            Self::I32(v) => Some(i128::from(v)),
            Self::I64(v) => Some(i128::from(v)),
            Self::Isize(v) => i128::try_from(v).ok(),
            Self::U8(v) => Some(i128::from(v)),
            Self::U16(v) => Some(i128::from(v)),
            Self::U32(v) => Some(i128::from(v)),
            Self::U64(v) => Some(i128::from(v)),
            Self::Usize(v) => i128::try_from(v).ok(),
            Self::F32(_) | Self::F64(_) => None,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I8(v) => v.fmt(f),
            Self::I16(v) => v.fmt(f),
            Self::I32(v) => v.fmt(f),
            Self::I64(v) => v.fmt(f),
            Self::Isize(v) => v.fmt(f),
            Self::U8(v) => v.fmt(f),
            Self::U16(v) => v.fmt(f),
            Self::U32(v) => v.fmt(f),
            Self::U64(v) => v.fmt(f),
            Self::Usize(v) => v.fmt(f),
            Self::F32(v) => v.fmt(f),
            Self::F64(v) => v.fmt(f),
        }
    }
}

/// A member value in its runtime form.
///
/// Absence ("no value") is represented by `Option<Value>::None` at every API
/// boundary, never by a variant.
///
/// # Example
///
/// ```rust
/// use understory_binding::Value;
///
/// let v = Value::from(123.406_f64);
/// assert_eq!(v.to_string(), "123.406");
/// assert_eq!(Value::from("text").as_text(), Some("text"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Text.
    Text(String),
    /// A boolean.
    Bool(bool),
    /// An enum variant.
    Enum(EnumVariant),
    /// A number of an exact kind.
    Number(Number),
    /// A value that is not string-bindable, carried as its debug rendering.
    Other(String),
}

impl Value {
    /// Returns the text if this is a [`Value::Text`].
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the number if this is a [`Value::Number`].
    #[must_use]
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) | Self::Other(text) => f.write_str(text),
            Self::Bool(b) => b.fmt(f),
            Self::Enum(variant) => f.write_str(variant.name()),
            Self::Number(number) => number.fmt(f),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(String::from(text))
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Number> for Value {
    fn from(number: Number) -> Self {
        Self::Number(number)
    }
}

/// Conversion between a native member type and [`Value`].
///
/// Implemented for `String`, `bool`, every primitive numeric type, and
/// `Option<T>`. Use [`member_enum!`](crate::member_enum) for field-less enums
/// and [`member_opaque!`](crate::member_opaque) for anything else.
pub trait Member: Sized + 'static {
    /// Returns the classified type of this member.
    fn member_type() -> MemberType;

    /// Converts the native value to its runtime form; `None` means no value.
    fn to_value(&self) -> Option<Value>;

    /// Converts a runtime value back to the native type.
    ///
    /// Returns `None` when the value cannot be represented, in which case the
    /// member is left untouched.
    fn from_value(value: Option<Value>) -> Option<Self>;
}

impl Member for String {
    fn member_type() -> MemberType {
        MemberType::new(TypeKind::Text)
    }

    fn to_value(&self) -> Option<Value> {
        Some(Value::Text(self.clone()))
    }

    fn from_value(value: Option<Value>) -> Option<Self> {
        match value {
            Some(Value::Text(text)) => Some(text),
            // A non-nullable text member stores "no value" as empty text.
            None => Some(Self::new()),
            Some(_) => None,
        }
    }
}

impl Member for bool {
    fn member_type() -> MemberType {
        MemberType::new(TypeKind::Bool)
    }

    fn to_value(&self) -> Option<Value> {
        Some(Value::Bool(*self))
    }

    fn from_value(value: Option<Value>) -> Option<Self> {
        match value {
            Some(Value::Bool(b)) => Some(b),
            _ => None,
        }
    }
}

macro_rules! numeric_member {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Member for $ty {
                fn member_type() -> MemberType {
                    MemberType::new(TypeKind::Numeric(NumericKind::$variant))
                }

                fn to_value(&self) -> Option<Value> {
                    Some(Value::Number(Number::$variant(*self)))
                }

                fn from_value(value: Option<Value>) -> Option<Self> {
                    match value {
                        Some(Value::Number(Number::$variant(v))) => Some(v),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::Number(Number::$variant(v))
                }
            }
        )*
    };
}

numeric_member!(
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
);

impl<T: Member> Member for Option<T> {
    fn member_type() -> MemberType {
        T::member_type().into_nullable()
    }

    fn to_value(&self) -> Option<Value> {
        self.as_ref().and_then(T::to_value)
    }

    fn from_value(value: Option<Value>) -> Option<Self> {
        match value {
            None => Some(None),
            Some(value) => T::from_value(Some(value)).map(Some),
        }
    }
}

/// Implements [`Member`] for a field-less enum.
///
/// Every variant must be listed; they are matched by name, and their order
/// defines the variant index and the zero value (the first variant).
///
/// ```rust
/// use understory_binding::{Member, TypeKind, Value, member_enum};
///
/// #[derive(Clone, Copy, Debug, PartialEq)]
/// enum Align {
///     Start,
///     Center,
///     End,
/// }
///
/// member_enum!(Align { Start, Center, End });
///
/// assert!(matches!(Align::member_type().kind(), TypeKind::Enum(_)));
/// assert_eq!(Align::Center.to_value().map(|v| v.to_string()).as_deref(), Some("Center"));
/// ```
#[macro_export]
macro_rules! member_enum {
    ($ty:ident { $($variant:ident),+ $(,)? }) => {
        impl $ty {
            #[doc(hidden)]
            const __MEMBER_ENUM_INFO: $crate::EnumInfo =
                $crate::EnumInfo::new(stringify!($ty), &[$(stringify!($variant)),+]);
        }

        impl $crate::Member for $ty {
            fn member_type() -> $crate::MemberType {
                $crate::MemberType::new($crate::TypeKind::Enum(Self::__MEMBER_ENUM_INFO))
            }

            fn to_value(&self) -> Option<$crate::Value> {
                let name = match self {
                    $(Self::$variant => stringify!($variant),)+
                };
                Self::__MEMBER_ENUM_INFO
                    .parse(name)
                    .map($crate::Value::Enum)
            }

            fn from_value(value: Option<$crate::Value>) -> Option<Self> {
                let Some($crate::Value::Enum(variant)) = value else {
                    return None;
                };
                $(
                    if variant.name() == stringify!($variant) {
                        return Some(Self::$variant);
                    }
                )+
                None
            }
        }
    };
}

/// Implements [`Member`] for composite types that are readable but not
/// string-bindable.
///
/// Reads produce [`Value::Other`] holding the `Debug` rendering; writes through
/// the binding layer are ignored.
///
/// ```rust
/// use understory_binding::{Member, TypeKind, member_opaque};
///
/// #[derive(Debug, Default)]
/// struct Options {
///     name: Option<String>,
/// }
///
/// member_opaque!(Options);
///
/// assert_eq!(Options::member_type().kind(), TypeKind::Other("Options"));
/// ```
#[macro_export]
macro_rules! member_opaque {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl $crate::Member for $ty {
                fn member_type() -> $crate::MemberType {
                    $crate::MemberType::new($crate::TypeKind::Other(stringify!($ty)))
                }

                fn to_value(&self) -> Option<$crate::Value> {
                    Some($crate::Value::Other($crate::__private::format!("{self:?}")))
                }

                fn from_value(_: Option<$crate::Value>) -> Option<Self> {
                    None
                }
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Mode {
        Off,
        On,
    }

    member_enum!(Mode { Off, On });

    #[test]
    fn numbers_keep_their_kind() {
        assert_eq!(Value::from(3_u16).as_number().map(|n| n.kind()), Some(NumericKind::U16));
        assert_eq!(Number::zero(NumericKind::F32), Number::F32(0.0));
        assert_eq!(Number::I64(-7).to_i128(), Some(-7));
        assert_eq!(Number::F64(1.5).to_i128(), None);
    }

    #[test]
    fn from_f64_truncates_and_saturates() {
        assert_eq!(Number::from_f64(NumericKind::I32, 123.906), Number::I32(123));
        assert_eq!(Number::from_f64(NumericKind::I32, -123.906), Number::I32(-123));
        assert_eq!(Number::from_f64(NumericKind::U8, 300.0), Number::U8(255));
        assert_eq!(Number::from_f64(NumericKind::U8, -1.0), Number::U8(0));
        assert_eq!(Number::from_f64(NumericKind::F64, 0.25), Number::F64(0.25));
    }

    #[test]
    fn display_is_plain() {
        assert_eq!(Value::from(123.406_f64).to_string(), "123.406");
        assert_eq!(Value::from(0.0_f64).to_string(), "0");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::Enum(EnumVariant::new(1, "On")).to_string(), "On");
    }

    #[test]
    fn option_member_round_trips_absence() {
        assert_eq!(<Option<i32>>::from_value(None), Some(None));
        assert_eq!(<Option<i32>>::from_value(Some(Value::from(4_i32))), Some(Some(4)));
        assert_eq!(<Option<i32>>::from_value(Some(Value::from(4_i64))), None);
        assert_eq!(Some(5_i32).to_value(), Some(Value::from(5_i32)));
        assert_eq!(None::<i32>.to_value(), None);
        assert!(<Option<f64>>::member_type().is_nullable_value_type());
    }

    #[test]
    fn text_member_stores_absence_as_empty() {
        assert_eq!(String::from_value(None), Some(String::new()));
        assert_eq!(<Option<String>>::from_value(None), Some(None));
        assert_eq!(String::from_value(Some(Value::Bool(true))), None);
    }

    #[test]
    fn enum_member_macro() {
        assert_eq!(Mode::On.to_value(), Some(Value::Enum(EnumVariant::new(1, "On"))));
        assert_eq!(
            Mode::from_value(Some(Value::Enum(EnumVariant::new(0, "Off")))),
            Some(Mode::Off)
        );
        assert_eq!(Mode::from_value(None), None);
        assert_eq!(Mode::member_type().to_string(), "Mode");
        assert_eq!(<Option<Mode>>::member_type().to_string(), "Option<Mode>");
    }
}
