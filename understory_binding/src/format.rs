// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display formatting of member values.
//!
//! [`format_value`] turns a runtime value plus an optional format string into
//! the text a UI shows. Only numbers honor the format string; text passes
//! through and everything else uses its default rendering.
//!
//! ## Format strings
//!
//! A format string is a single specifier letter followed by an optional
//! precision (`0`..=`99`):
//!
//! | Specifier | Meaning | Default precision |
//! |-----------|---------|-------------------|
//! | `N` | fixed point with `,` group separators | 2 |
//! | `F` | fixed point | 2 |
//! | `P` | percent (value × 100, grouped, ` %` suffix) | 2 |
//! | `E` / `e` | scientific, three-digit signed exponent | 6 |
//! | `D` | integer, zero padded to the precision (integers only) | none |
//! | `X` / `x` | hexadecimal, zero padded (integers only) | none |
//! | `G` | default rendering | - |
//!
//! Anything that does not parse, or does not apply to the value's kind, falls
//! back to the default rendering. Formatting never fails.

use alloc::format;
use alloc::string::{String, ToString};

use crate::value::{Number, Value};

/// Formats `value` for display.
///
/// Returns `None` when there is no value.
///
/// # Example
///
/// ```rust
/// use understory_binding::{Value, format_value};
///
/// let d = Value::from(123.406_f64);
/// assert_eq!(format_value(Some(&d), Some("N2")).as_deref(), Some("123.41"));
/// assert_eq!(format_value(Some(&d), None).as_deref(), Some("123.406"));
///
/// let s = Value::from("123.45678");
/// assert_eq!(format_value(Some(&s), Some("N2")).as_deref(), Some("123.45678"));
/// assert_eq!(format_value(None, Some("N2")), None);
/// ```
#[must_use]
pub fn format_value(value: Option<&Value>, format: Option<&str>) -> Option<String> {
    let value = value?;
    let format = format.filter(|f| !f.trim().is_empty());
    Some(match (value, format) {
        (Value::Text(text), _) => text.clone(),
        (Value::Number(number), Some(format)) => format_number(number, format),
        (other, _) => other.to_string(),
    })
}

/// Formats a number with a format string, falling back to its default
/// rendering.
#[must_use]
pub fn format_number(number: &Number, format: &str) -> String {
    NumberFormat::parse(format)
        .and_then(|f| f.apply(number))
        .unwrap_or_else(|| number.to_string())
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Specifier {
    Number,
    Fixed,
    Percent,
    Exponent { upper: bool },
    Decimal,
    Hex { upper: bool },
    General,
}

/// A parsed numeric format string.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NumberFormat {
    specifier: Specifier,
    precision: Option<usize>,
}

impl NumberFormat {
    /// Parses a format string such as `"N2"` or `"e"`.
    ///
    /// Returns `None` for unrecognized specifiers.
    #[must_use]
    pub fn parse(format: &str) -> Option<Self> {
        let format = format.trim();
        let mut chars = format.chars();
        let letter = chars.next()?;
        let digits = chars.as_str();
        let precision = if digits.is_empty() {
            None
        } else if digits.len() <= 2 && digits.bytes().all(|b| b.is_ascii_digit()) {
            digits.parse().ok()
        } else {
            return None;
        };
        let specifier = match letter {
            'N' | 'n' => Specifier::Number,
            'F' | 'f' => Specifier::Fixed,
            'P' | 'p' => Specifier::Percent,
            'E' => Specifier::Exponent { upper: true },
            'e' => Specifier::Exponent { upper: false },
            'D' | 'd' => Specifier::Decimal,
            'X' => Specifier::Hex { upper: true },
            'x' => Specifier::Hex { upper: false },
            'G' | 'g' => Specifier::General,
            _ => return None,
        };
        Some(Self {
            specifier,
            precision,
        })
    }

    /// Applies the format to `number`.
    ///
    /// Returns `None` if the specifier does not apply to the number's kind.
    #[must_use]
    pub fn apply(&self, number: &Number) -> Option<String> {
        match self.specifier {
            Specifier::Fixed => Some(fixed(number, self.precision.unwrap_or(2))),
            Specifier::Number => Some(group_thousands(&fixed(
                number,
                self.precision.unwrap_or(2),
            ))),
            Specifier::Percent => {
                let scaled = Number::F64(number.to_f64() * 100.0);
                let text = group_thousands(&fixed(&scaled, self.precision.unwrap_or(2)));
                Some(format!("{text} %"))
            }
            Specifier::Exponent { upper } => Some(exponent(
                number.to_f64(),
                self.precision.unwrap_or(6),
                upper,
            )),
            Specifier::Decimal => {
                let value = number.to_i128()?;
                let width = self.precision.unwrap_or(0);
                let digits = format!("{:0width$}", value.unsigned_abs());
                Some(if value < 0 {
                    format!("-{digits}")
                } else {
                    digits
                })
            }
            Specifier::Hex { upper } => hex(number, self.precision.unwrap_or(0), upper),
            Specifier::General => Some(number.to_string()),
        }
    }
}

fn fixed(number: &Number, precision: usize) -> String {
    if number.to_i128().is_some() {
        // Integers format exactly; widening to f64 would lose digits.
        let mut text = number.to_string();
        if precision > 0 {
            text.push('.');
            text.extend(core::iter::repeat_n('0', precision));
        }
        text
    } else {
        format!("{:.*}", precision, number.to_f64())
    }
}

fn group_thousands(text: &str) -> String {
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (int, frac) = match rest.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (rest, None),
    };
    let mut out = String::with_capacity(text.len() + int.len() / 3);
    out.push_str(sign);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn exponent(value: f64, precision: usize, upper: bool) -> String {
    let text = format!("{value:.precision$e}");
    let Some((mantissa, exp)) = text.split_once('e') else {
        // inf / NaN
        return text;
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    let sign = if exp < 0 { '-' } else { '+' };
    let letter = if upper { 'E' } else { 'e' };
    format!("{mantissa}{letter}{sign}{:03}", exp.unsigned_abs())
}

fn hex(number: &Number, width: usize, upper: bool) -> Option<String> {
    // Negative values render as the two's complement of their own width.
    let bits: u64 = match *number {
        Number::I8(v) => u64::from(v.cast_unsigned()),
        Number::I16(v) => u64::from(v.cast_unsigned()),
        Number::I32(v) => u64::from(v.cast_unsigned()),
        Number::I64(v) => v.cast_unsigned(),
        Number::Isize(v) => u64::try_from(v.cast_unsigned()).ok()?,
        Number::U8(v) => u64::from(v),
        Number::U16(v) => u64::from(v),
        Number::U32(v) => u64::from(v),
        Number::U64(v) => v,
        Number::Usize(v) => u64::try_from(v).ok()?,
        Number::F32(_) | Number::F64(_) => return None,
    };
    Some(if upper {
        format!("{bits:0width$X}")
    } else {
        format!("{bits:0width$x}")
    })
}
