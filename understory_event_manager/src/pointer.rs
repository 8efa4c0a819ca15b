// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer events and the pointer manager.
//!
//! A [`PointerEvent`] carries the host-resolved target (`T`) rather than a
//! position: hit testing is the adapter's job, and widget patterns only need
//! to know which item (if any) was pressed.

use crate::manager::{EventManager, EventMatcher, HandlerConfig, HandlerOptions, ManagedEvent};
use crate::modifiers::{ModifierMatch, Modifiers};

/// Mouse / pen button identifier.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Main button, usually the left mouse button or a touch contact.
    #[default]
    Primary,
    /// Auxiliary button, usually the wheel.
    Auxiliary,
    /// Secondary button, usually the right mouse button.
    Secondary,
    /// Any other button, by DOM `button` index.
    Other(u8),
}

impl From<u8> for PointerButton {
    /// Convert a DOM `MouseEvent.button` index.
    fn from(button: u8) -> Self {
        match button {
            0 => Self::Primary,
            1 => Self::Auxiliary,
            2 => Self::Secondary,
            other => Self::Other(other),
        }
    }
}

/// A pointer down/up event as delivered by the host adapter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointerEvent<T> {
    /// What the pointer hit, as resolved by the adapter.
    pub target: T,
    /// Button that changed state.
    pub button: PointerButton,
    /// Modifiers held at the time of the event.
    pub modifiers: Modifiers,
    /// Host timestamp in milliseconds.
    pub time: u64,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl<T> PointerEvent<T> {
    /// A primary-button event on `target` with no modifiers at time zero.
    pub fn new(target: T) -> Self {
        Self {
            target,
            button: PointerButton::Primary,
            modifiers: Modifiers::empty(),
            time: 0,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Set the button.
    #[must_use]
    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
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

    /// Whether a handler prevented the host default action.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Whether a handler stopped propagation.
    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

impl<T> ManagedEvent for PointerEvent<T> {
    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

/// Matches a [`PointerEvent`] on button and modifiers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButtonMatcher {
    /// Required button.
    pub button: PointerButton,
    /// Modifier constraint.
    pub modifiers: ModifierMatch,
}

impl<T> EventMatcher<PointerEvent<T>> for ButtonMatcher {
    fn matches(&self, event: &PointerEvent<T>) -> bool {
        self.button == event.button && self.modifiers.matches(event.modifiers)
    }
}

/// Ordered pointer handler registry.
pub type PointerEventManager<H> = EventManager<ButtonMatcher, H>;

impl<H> EventManager<ButtonMatcher, H> {
    /// Register `handler` for the primary button with no modifiers.
    #[must_use]
    pub fn on(self, handler: H) -> Self {
        self.on_button(PointerButton::Primary, ModifierMatch::NONE, handler)
    }

    /// Register `handler` for the primary button with the given modifiers.
    #[must_use]
    pub fn on_modifiers(self, modifiers: impl Into<ModifierMatch>, handler: H) -> Self {
        self.on_button(PointerButton::Primary, modifiers, handler)
    }

    /// Register `handler` for a specific button and modifiers.
    #[must_use]
    pub fn on_button(
        self,
        button: PointerButton,
        modifiers: impl Into<ModifierMatch>,
        handler: H,
    ) -> Self {
        self.on_with_options(button, modifiers, handler, HandlerOptions::default())
    }

    /// Register `handler` with explicit propagation options.
    #[must_use]
    pub fn on_with_options(
        self,
        button: PointerButton,
        modifiers: impl Into<ModifierMatch>,
        handler: H,
        options: HandlerOptions,
    ) -> Self {
        self.push(HandlerConfig {
            matcher: ButtonMatcher {
                button,
                modifiers: modifiers.into(),
            },
            handler,
            options,
        })
    }
}
