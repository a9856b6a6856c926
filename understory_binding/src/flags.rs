// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Policy bit sets.

use crate::member::MemberInfo;

bitflags::bitflags! {
    /// Policy for absent and empty input on the string write path.
    ///
    /// The bits are independent and compose.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct BindValueFlags: u8 {
        /// Writing no value sets the member to its type's zero value
        /// (`0`, `false`, the first enum variant) instead of clearing a
        /// nullable member or ignoring the write on a non-nullable one.
        const USE_DEFAULT_SET_VALUE_FOR_NULL = 0b0000_0001;
        /// An empty string written to a bool, enum, or numeric member is
        /// treated exactly like no value.
        const TREAT_EMPTY_STRING_AS_NULL_FOR_VALUE_TYPES = 0b0000_0010;
    }
}

bitflags::bitflags! {
    /// Which schema members a model binds.
    ///
    /// Members that cannot be read are never selected.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct MemberSelection: u8 {
        /// Public members.
        const PUBLIC     = 0b0000_0001;
        /// Members marked with [`MemberInfo::non_public`].
        const NON_PUBLIC = 0b0000_0010;
    }
}

impl MemberSelection {
    /// Returns `true` if `member` is readable and matches the selection.
    #[must_use]
    pub fn selects(self, member: &MemberInfo) -> bool {
        let visibility = if member.is_public() {
            Self::PUBLIC
        } else {
            Self::NON_PUBLIC
        };
        member.can_read() && self.contains(visibility)
    }
}

impl Default for MemberSelection {
    fn default() -> Self {
        Self::PUBLIC
    }
}
