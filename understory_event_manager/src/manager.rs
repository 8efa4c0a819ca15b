// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered handler registry shared by the keyboard and pointer managers.
//!
//! [`EventManager`] is generic over a matcher type `M` and a handler type `H`.
//! The concrete managers are type aliases:
//! [`KeyboardEventManager`](crate::KeyboardEventManager) uses
//! [`KeyMatcher`](crate::KeyMatcher) and
//! [`PointerEventManager`](crate::PointerEventManager) uses
//! [`ButtonMatcher`](crate::ButtonMatcher).
//!
//! Dispatch walks registrations in order and stops at the first match, so
//! a more specific registration must be added before a broader one that
//! overlaps it.

use alloc::vec::Vec;

/// An input event that can record default-prevention and propagation state.
pub trait ManagedEvent {
    /// Mark the host's default action as prevented.
    fn prevent_default(&mut self);
    /// Mark propagation to outer handlers as stopped.
    fn stop_propagation(&mut self);
}

/// Predicate deciding whether a registration applies to an event.
pub trait EventMatcher<E> {
    /// Returns `true` if this matcher accepts `event`.
    fn matches(&self, event: &E) -> bool;
}

/// Propagation policy applied to an event when its registration matches.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HandlerOptions {
    /// Call [`ManagedEvent::prevent_default`] before returning the handler.
    pub prevent_default: bool,
    /// Call [`ManagedEvent::stop_propagation`] before returning the handler.
    pub stop_propagation: bool,
}

impl HandlerOptions {
    /// Leave the event untouched on match.
    pub const PASSIVE: Self = Self {
        prevent_default: false,
        stop_propagation: false,
    };
}

impl Default for HandlerOptions {
    fn default() -> Self {
        Self {
            prevent_default: true,
            stop_propagation: true,
        }
    }
}

/// A single registration: matcher, handler, and propagation options.
#[derive(Clone, Debug)]
pub struct HandlerConfig<M, H> {
    /// Decides whether this registration applies.
    pub matcher: M,
    /// Value returned to the caller on match.
    pub handler: H,
    /// Propagation policy applied on match.
    pub options: HandlerOptions,
}

/// Ordered registry of [`HandlerConfig`]s.
#[derive(Clone, Debug)]
pub struct EventManager<M, H> {
    configs: Vec<HandlerConfig<M, H>>,
}

impl<M, H> Default for EventManager<M, H> {
    fn default() -> Self {
        Self {
            configs: Vec::new(),
        }
    }
}

impl<M, H> EventManager<M, H> {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a registration after all existing ones.
    #[must_use]
    pub fn push(mut self, config: HandlerConfig<M, H>) -> Self {
        self.configs.push(config);
        self
    }

    /// Registrations in dispatch order.
    pub fn configs(&self) -> &[HandlerConfig<M, H>] {
        &self.configs
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Find the first registration matching `event` without touching the event.
    pub fn find<E>(&self, event: &E) -> Option<&HandlerConfig<M, H>>
    where
        M: EventMatcher<E>,
    {
        self.configs.iter().find(|c| c.matcher.matches(event))
    }

    /// Dispatch `event` to the first matching registration.
    ///
    /// On match, the registration's [`HandlerOptions`] are applied to the event
    /// and its handler is returned. On no match the event is left untouched and
    /// `None` is returned.
    pub fn handle<E>(&self, event: &mut E) -> Option<&H>
    where
        M: EventMatcher<E>,
        E: ManagedEvent,
    {
        let Some((index, config)) = self
            .configs
            .iter()
            .enumerate()
            .find(|(_, c)| c.matcher.matches(event))
        else {
            tracing::trace!("no handler matched");
            return None;
        };
        if config.options.prevent_default {
            event.prevent_default();
        }
        if config.options.stop_propagation {
            event.stop_propagation();
        }
        tracing::trace!(index, "handler matched");
        Some(&config.handler)
    }
}
