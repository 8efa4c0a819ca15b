// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Modifier key sets and modifier matching.

use smallvec::SmallVec;

bitflags::bitflags! {
    /// Modifier keys held during an input event.
    ///
    /// The empty set means "no modifiers".
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Control key.
        const CTRL  = 0b0000_0001;
        /// Shift key.
        const SHIFT = 0b0000_0010;
        /// Alt / Option key.
        const ALT   = 0b0000_0100;
        /// Meta / Command / Windows key.
        const META  = 0b0000_1000;
    }
}

/// How a registration constrains the modifier set of an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModifierMatch {
    /// The event's modifiers must equal this set exactly.
    Exact(Modifiers),
    /// The event's modifiers must equal one of these sets exactly.
    ///
    /// Used for platform pairs such as `Ctrl+A` / `Meta+A`.
    OneOf(SmallVec<[Modifiers; 2]>),
    /// Any modifier combination matches, including none.
    Any,
}

impl ModifierMatch {
    /// No modifiers held.
    pub const NONE: Self = Self::Exact(Modifiers::empty());

    /// Match any of the given exact sets.
    pub fn one_of(sets: impl IntoIterator<Item = Modifiers>) -> Self {
        Self::OneOf(sets.into_iter().collect())
    }

    /// Returns `true` if `modifiers` satisfies this constraint.
    pub fn matches(&self, modifiers: Modifiers) -> bool {
        match self {
            Self::Exact(set) => *set == modifiers,
            Self::OneOf(sets) => sets.contains(&modifiers),
            Self::Any => true,
        }
    }
}

impl Default for ModifierMatch {
    fn default() -> Self {
        Self::NONE
    }
}

impl From<Modifiers> for ModifierMatch {
    fn from(set: Modifiers) -> Self {
        Self::Exact(set)
    }
}

impl<const N: usize> From<[Modifiers; N]> for ModifierMatch {
    fn from(sets: [Modifiers; N]) -> Self {
        Self::one_of(sets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_requires_equality() {
        let m = ModifierMatch::from(Modifiers::CTRL);
        assert!(m.matches(Modifiers::CTRL));
        assert!(!m.matches(Modifiers::CTRL | Modifiers::SHIFT));
        assert!(!m.matches(Modifiers::empty()));
    }

    #[test]
    fn none_rejects_held_modifiers() {
        assert!(ModifierMatch::NONE.matches(Modifiers::empty()));
        assert!(!ModifierMatch::NONE.matches(Modifiers::SHIFT));
    }

    #[test]
    fn one_of_accepts_platform_pairs() {
        let m = ModifierMatch::from([Modifiers::CTRL, Modifiers::META]);
        assert!(m.matches(Modifiers::CTRL));
        assert!(m.matches(Modifiers::META));
        assert!(!m.matches(Modifiers::CTRL | Modifiers::META));
    }

    #[test]
    fn any_accepts_everything() {
        assert!(ModifierMatch::Any.matches(Modifiers::all()));
        assert!(ModifierMatch::Any.matches(Modifiers::empty()));
    }
}
