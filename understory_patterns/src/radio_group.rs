// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Radio group: navigation plus a selection that, once made, always holds
//! exactly one radio button.
//!
//! Arrow keys move and (with `follow_focus`) check the new radio button;
//! `Space` and a primary click check the active one. There is no way to
//! uncheck a radio button from the group.
//!
//! A radio group can also live inside a [`Toolbar`](crate::Toolbar) through
//! its [`WidgetGroup`] implementation. There the toolbar drives movement and
//! moving never checks; `Enter`/`Space` do.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use understory_event_manager::{
    KeyboardEvent, KeyboardEventManager, PointerEvent, PointerEventManager, keys,
};
use understory_list::{Item, List, ListConfig, ListError, Selection, TabIndex};

use crate::keys::{next_key, prev_key};
use crate::listbox::Move;
use crate::toolbar::WidgetGroup;
use crate::violation::Violation;

/// Behavior switches of a [`RadioGroup`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RadioGroupConfig {
    /// Navigation only; the checked radio button cannot change.
    pub readonly: bool,
    /// Arrow-key navigation checks the newly active radio button.
    pub follow_focus: bool,
}

impl Default for RadioGroupConfig {
    fn default() -> Self {
        Self {
            readonly: false,
            follow_focus: true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum KeyAction {
    Navigate(Move),
    Check,
}

/// Radio group state machine.
#[derive(Debug)]
pub struct RadioGroup<K> {
    list: List<K>,
    selection: Selection<K>,
    config: RadioGroupConfig,
}

impl<K> RadioGroup<K> {
    /// The radio buttons.
    pub fn list(&self) -> &List<K> {
        &self.list
    }

    /// Behavior switches.
    pub fn config(&self) -> &RadioGroupConfig {
        &self.config
    }

    /// Replace the behavior switches.
    pub fn set_config(&mut self, config: RadioGroupConfig) {
        self.config = config;
    }

    /// Whether the group is inert.
    pub fn is_disabled(&self) -> bool {
        self.list.is_list_disabled()
    }
}

impl<K: Copy + Eq + Hash + Debug> RadioGroup<K> {
    /// Create a radio group with nothing checked.
    pub fn new(
        radios: Vec<Item<K>>,
        list_config: ListConfig,
        config: RadioGroupConfig,
    ) -> Result<Self, ListError> {
        Ok(Self {
            list: List::try_new(radios, list_config)?,
            selection: Selection::new(false, false),
            config,
        })
    }

    /// Replace the radio buttons. A removed checked radio leaves the group
    /// unchecked.
    pub fn set_radios(&mut self, radios: Vec<Item<K>>) -> Result<(), ListError> {
        self.list.set_items(radios)?;
        self.selection.prune(&self.list);
        Ok(())
    }

    /// The checked radio button.
    pub fn selected_id(&self) -> Option<K> {
        self.selection.selected_item(&self.list).map(|item| item.id)
    }

    /// Whether `id` is checked (`aria-checked`).
    pub fn is_checked(&self, id: K) -> bool {
        self.selection.is_selected(&self.list, id)
    }

    /// Tab index of radio button `id`.
    pub fn radio_tabindex(&self, id: K) -> TabIndex {
        self.list
            .index_of(id)
            .map_or(-1, |index| self.list.item_tabindex(index))
    }

    /// Check radio button `id`, unchecking the previous one.
    pub fn select(&mut self, id: K) -> bool {
        if self.config.readonly {
            return false;
        }
        self.selection.select_one(&self.list, Some(id))
    }

    /// Set the checked radio programmatically; disabled radios are accepted.
    pub fn set_selected(&mut self, id: Option<K>) {
        self.selection.set_selected(&self.list, id);
    }

    /// Activate the checked radio if it is focusable, else the first
    /// focusable one.
    pub fn set_default_state(&mut self) {
        let checked = self
            .selected_id()
            .and_then(|id| self.list.index_of(id))
            .filter(|&index| self.list.is_focusable(index));
        if let Some(index) = checked.or_else(|| self.list.first_focusable()) {
            self.list.goto(index);
        }
    }

    /// Host focus landed on radio button `id`.
    pub fn on_focus(&mut self, id: K) -> bool {
        match self.list.index_of(id) {
            Some(index) => self.list.goto(index),
            None => false,
        }
    }

    /// Interpret a key press inside the group. Returns `true` if handled.
    pub fn on_keydown(&mut self, event: &mut KeyboardEvent) -> bool {
        if self.list.is_list_disabled() {
            return false;
        }
        let config = self.list.config();
        let manager = KeyboardEventManager::new()
            .on(prev_key(config), KeyAction::Navigate(Move::Prev))
            .on(next_key(config), KeyAction::Navigate(Move::Next))
            .on(keys::HOME, KeyAction::Navigate(Move::First))
            .on(keys::END, KeyAction::Navigate(Move::Last))
            .on(keys::SPACE, KeyAction::Check);
        let Some(&action) = manager.handle(event) else {
            return false;
        };
        match action {
            KeyAction::Navigate(step) => {
                let wrap = self.list.config().wrap;
                if step.apply(&mut self.list, wrap) && self.config.follow_focus {
                    self.check_active();
                }
            }
            KeyAction::Check => {
                self.check_active();
            }
        }
        true
    }

    /// Interpret a click on radio button `event.target`.
    pub fn on_pointerdown(&mut self, event: &mut PointerEvent<Option<K>>) -> bool {
        if self.list.is_list_disabled() {
            return false;
        }
        let Some(id) = event.target.filter(|&id| {
            self.list
                .index_of(id)
                .is_some_and(|index| self.list.is_focusable(index))
        }) else {
            return false;
        };
        if PointerEventManager::new().on(()).handle(event).is_none() {
            return false;
        }
        WidgetGroup::goto(self, id)
    }

    /// Authoring problems.
    pub fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        if self.list.is_list_disabled() || self.list.first_focusable().is_none() {
            violations.push(Violation::NoFocusableItem("radio button"));
        }
        if self.list.config().skip_disabled
            && self
                .selection
                .selected_item(&self.list)
                .is_some_and(|item| item.disabled)
        {
            violations.push(Violation::SelectedDisabled("radio button"));
        }
        violations
    }

    fn check_active(&mut self) -> bool {
        match self.list.active_id() {
            Some(id) => self.select(id),
            None => false,
        }
    }
}

impl<K: Copy + Eq + Hash + Debug> WidgetGroup<K> for RadioGroup<K> {
    fn is_disabled(&self) -> bool {
        self.list.is_list_disabled()
    }

    fn is_on_first_item(&self) -> bool {
        self.list.active_index().is_some() && self.list.peek_prev_with_wrap(false).is_none()
    }

    fn is_on_last_item(&self) -> bool {
        self.list.active_index().is_some() && self.list.peek_next_with_wrap(false).is_none()
    }

    fn first(&mut self) -> bool {
        self.list.first()
    }

    fn last(&mut self) -> bool {
        self.list.last()
    }

    fn next(&mut self, wrap: bool) -> bool {
        self.list.next_with_wrap(wrap)
    }

    fn prev(&mut self, wrap: bool) -> bool {
        self.list.prev_with_wrap(wrap)
    }

    fn unfocus(&mut self) {
        self.list.clear_active();
    }

    fn trigger(&mut self) -> bool {
        self.check_active()
    }

    fn goto(&mut self, id: K) -> bool {
        match self.list.index_of(id) {
            Some(index) if self.list.goto(index) => {
                self.check_active();
                true
            }
            _ => false,
        }
    }

    fn set_default_state(&mut self) {
        Self::set_default_state(self);
    }

    fn active_id(&self) -> Option<K> {
        self.list.active_id()
    }
}
