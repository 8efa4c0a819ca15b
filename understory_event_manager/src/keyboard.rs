// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard events, key patterns, and the keyboard manager.
//!
//! Keys use DOM `KeyboardEvent.key` naming (`"ArrowDown"`, `"Enter"`, `" "`,
//! `"a"`); the [`keys`] module has constants for the named keys the widget
//! patterns use. Literal key comparison is case-insensitive so that `"A"`
//! registered with [`Modifiers::CTRL`] matches an event whose key is `"a"`.

use alloc::borrow::Cow;
use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use crate::manager::{EventManager, EventMatcher, HandlerConfig, HandlerOptions, ManagedEvent};
use crate::modifiers::{ModifierMatch, Modifiers};

/// Named key values.
pub mod keys {
    /// Up arrow.
    pub const ARROW_UP: &str = "ArrowUp";
    /// Down arrow.
    pub const ARROW_DOWN: &str = "ArrowDown";
    /// Left arrow.
    pub const ARROW_LEFT: &str = "ArrowLeft";
    /// Right arrow.
    pub const ARROW_RIGHT: &str = "ArrowRight";
    /// Home.
    pub const HOME: &str = "Home";
    /// End.
    pub const END: &str = "End";
    /// Enter / Return.
    pub const ENTER: &str = "Enter";
    /// Space bar.
    pub const SPACE: &str = " ";
    /// Escape.
    pub const ESCAPE: &str = "Escape";
    /// Tab.
    pub const TAB: &str = "Tab";
    /// The Shift key itself.
    pub const SHIFT: &str = "Shift";
    /// Backspace.
    pub const BACKSPACE: &str = "Backspace";
    /// Forward delete.
    pub const DELETE: &str = "Delete";
}

/// A keyboard event as delivered by the host adapter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyboardEvent {
    /// Key value, DOM `key` naming.
    pub key: String,
    /// Modifiers held while the key was pressed.
    pub modifiers: Modifiers,
    /// Host timestamp in milliseconds.
    pub time: u64,
    /// `true` if this is an auto-repeat.
    pub repeat: bool,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl KeyboardEvent {
    /// Create an event for `key` with no modifiers at time zero.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::empty(),
            time: 0,
            repeat: false,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Set the held modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the host timestamp in milliseconds.
    #[must_use]
    pub fn at(mut self, time: u64) -> Self {
        self.time = time;
        self
    }

    /// Mark the event as an auto-repeat.
    #[must_use]
    pub fn with_repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    /// The key as a single character, if it is one.
    pub fn char(&self) -> Option<char> {
        let mut chars = self.key.chars();
        let c = chars.next()?;
        chars.next().is_none().then_some(c)
    }

    /// Whether a handler prevented the host default action.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Whether a handler stopped propagation.
    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

impl ManagedEvent for KeyboardEvent {
    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

/// What a keyboard registration compares the event key against.
#[derive(Clone)]
pub enum KeyPattern {
    /// A fixed key value, compared case-insensitively.
    Literal(Cow<'static, str>),
    /// A key value computed at dispatch time.
    ///
    /// Useful when the key depends on state that may change after the
    /// registration is made (for example an orientation-derived arrow key).
    Computed(Rc<dyn Fn() -> String>),
    /// A predicate over the event key.
    Pattern(fn(&str) -> bool),
}

impl fmt::Debug for KeyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(key) => f.debug_tuple("Literal").field(key).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
            Self::Pattern(_) => f.write_str("Pattern(..)"),
        }
    }
}

impl KeyPattern {
    /// A key computed at dispatch time.
    pub fn computed(key: impl Fn() -> String + 'static) -> Self {
        Self::Computed(Rc::new(key))
    }

    /// Any single printable character (the typeahead trigger).
    pub fn printable() -> Self {
        Self::Pattern(is_printable)
    }

    /// Returns `true` if `key` satisfies this pattern.
    pub fn matches(&self, key: &str) -> bool {
        match self {
            Self::Literal(expected) => eq_ignore_case(expected, key),
            Self::Computed(compute) => eq_ignore_case(&compute(), key),
            Self::Pattern(predicate) => predicate(key),
        }
    }
}

impl From<&'static str> for KeyPattern {
    fn from(key: &'static str) -> Self {
        Self::Literal(Cow::Borrowed(key))
    }
}

impl From<String> for KeyPattern {
    fn from(key: String) -> Self {
        Self::Literal(Cow::Owned(key))
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

fn is_printable(key: &str) -> bool {
    let mut chars = key.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if !c.is_control())
}

/// Matches a [`KeyboardEvent`] on modifiers and key.
#[derive(Clone, Debug)]
pub struct KeyMatcher {
    /// Modifier constraint.
    pub modifiers: ModifierMatch,
    /// Key constraint.
    pub key: KeyPattern,
}

impl EventMatcher<KeyboardEvent> for KeyMatcher {
    fn matches(&self, event: &KeyboardEvent) -> bool {
        self.modifiers.matches(event.modifiers) && self.key.matches(&event.key)
    }
}

/// Ordered keyboard handler registry.
pub type KeyboardEventManager<H> = EventManager<KeyMatcher, H>;

impl<H> EventManager<KeyMatcher, H> {
    /// Register `handler` for `key` pressed with no modifiers.
    #[must_use]
    pub fn on(self, key: impl Into<KeyPattern>, handler: H) -> Self {
        self.on_with_options(ModifierMatch::NONE, key, handler, HandlerOptions::default())
    }

    /// Register `handler` for `key` pressed with the given modifiers.
    #[must_use]
    pub fn on_modifiers(
        self,
        modifiers: impl Into<ModifierMatch>,
        key: impl Into<KeyPattern>,
        handler: H,
    ) -> Self {
        self.on_with_options(modifiers, key, handler, HandlerOptions::default())
    }

    /// Register `handler` with explicit propagation options.
    #[must_use]
    pub fn on_with_options(
        self,
        modifiers: impl Into<ModifierMatch>,
        key: impl Into<KeyPattern>,
        handler: H,
        options: HandlerOptions,
    ) -> Self {
        self.push(HandlerConfig {
            matcher: KeyMatcher {
                modifiers: modifiers.into(),
                key: key.into(),
            },
            handler,
            options,
        })
    }
}
