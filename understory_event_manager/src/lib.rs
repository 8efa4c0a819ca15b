// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Event Manager: declarative "match event → handler" registries.
//!
//! Widget patterns describe their input contract as an ordered list of
//! registrations, each pairing a matcher with a handler value:
//!
//! - [`KeyboardEventManager`] matches a [`KeyboardEvent`] on a [`ModifierMatch`]
//!   and a [`KeyPattern`] (literal key, computed key, or predicate).
//! - [`PointerEventManager`] matches a [`PointerEvent`] on a [`PointerButton`] and
//!   a [`ModifierMatch`].
//!
//! ## Semantics
//!
//! - Registrations are ordered. For a given event the **first** matching
//!   registration wins and no other registration fires.
//! - Modifier sets must match exactly unless [`ModifierMatch::Any`] is used.
//! - Before the handler is returned, the event has `prevent_default` and
//!   `stop_propagation` applied according to the registration's
//!   [`HandlerOptions`] (both on by default).
//!
//! Handlers are plain values. Patterns usually register an action enum and
//! apply the returned action to themselves, which avoids closures that would
//! need to borrow the widget that owns the manager.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_event_manager::{
//!     KeyboardEvent, KeyboardEventManager, ModifierMatch, Modifiers,
//! };
//!
//! #[derive(Copy, Clone, Debug, PartialEq)]
//! enum Action {
//!     SelectAll,
//!     Type,
//! }
//!
//! let manager = KeyboardEventManager::new()
//!     .on_modifiers(Modifiers::CTRL, "A", Action::SelectAll)
//!     .on_modifiers(ModifierMatch::Any, "A", Action::Type);
//!
//! let mut event = KeyboardEvent::new("a").with_modifiers(Modifiers::CTRL);
//! assert_eq!(manager.handle(&mut event), Some(&Action::SelectAll));
//! assert!(event.default_prevented());
//!
//! let mut event = KeyboardEvent::new("a").with_modifiers(Modifiers::SHIFT);
//! assert_eq!(manager.handle(&mut event), Some(&Action::Type));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod keyboard;
pub mod manager;
pub mod modifiers;
pub mod pointer;

pub use keyboard::{KeyMatcher, KeyPattern, KeyboardEvent, KeyboardEventManager, keys};
pub use manager::{EventManager, EventMatcher, HandlerConfig, HandlerOptions, ManagedEvent};
pub use modifiers::{ModifierMatch, Modifiers};
pub use pointer::{ButtonMatcher, PointerButton, PointerEvent, PointerEventManager};
