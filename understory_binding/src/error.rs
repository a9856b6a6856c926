// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding errors.
//!
//! Only construction-time mistakes are errors. Everything that can go wrong
//! while a UI control pushes text into a bound member (unparsable input,
//! out-of-range numbers, read-only items, a missing source) is handled as a
//! defined no-op or clamp by [`BindableValue`](crate::BindableValue).

use alloc::string::String;

/// Errors raised while building bindings or configuring their bounds.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum BindError {
    /// The requested member does not exist on the schema type.
    #[error("member `{member}` not found on `{schema}`")]
    MemberNotFound {
        /// Name of the schema type that was searched.
        schema: &'static str,
        /// The member name that was requested.
        member: String,
    },
    /// A member descriptor was supplied for a different schema type.
    #[error("member `{member}` is declared on `{owner}`, not on `{schema}`")]
    TypeMismatch {
        /// Name of the schema type the binding was built for.
        schema: &'static str,
        /// Name of the type the descriptor actually belongs to.
        owner: &'static str,
        /// The member name carried by the descriptor.
        member: &'static str,
    },
    /// `min` was greater than `max` when configuring clamp bounds.
    #[error("bind min [{min}] can not be greater than bind max [{max}]")]
    Range {
        /// The rejected lower bound.
        min: f64,
        /// The rejected upper bound.
        max: f64,
    },
}
