// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Accordion: a stack of triggers, each disclosing one panel.
//!
//! Every trigger is an item of one [`List`] and its expansion id is its own
//! id, so the triggers share a single [`Expansion`]. `Space`, `Enter` and a
//! primary click toggle the active trigger.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use understory_event_manager::{
    KeyboardEvent, KeyboardEventManager, PointerEvent, PointerEventManager, keys,
};
use understory_list::{Expansion, ExpansionControl, Item, List, ListConfig, ListError, TabIndex};

use crate::keys::{next_key, prev_key};
use crate::listbox::Move;
use crate::violation::Violation;

/// Behavior switches of an [`Accordion`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct AccordionConfig {
    /// Allow several panels to be open at once.
    pub multi_expandable: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum KeyAction {
    Navigate(Move),
    Toggle,
}

/// Accordion state machine.
#[derive(Debug)]
pub struct Accordion<K> {
    list: List<K>,
    expansion: Expansion<K>,
}

impl<K> Accordion<K> {
    /// The triggers.
    pub fn list(&self) -> &List<K> {
        &self.list
    }
}

impl<K: Copy + Eq + Hash + Debug> Accordion<K> {
    /// Create an accordion with one trigger per item; all panels closed.
    pub fn new(
        triggers: Vec<Item<K>>,
        list_config: ListConfig,
        config: AccordionConfig,
    ) -> Result<Self, ListError> {
        Ok(Self {
            list: List::try_new(as_triggers(triggers), list_config)?,
            expansion: Expansion::new(config.multi_expandable),
        })
    }

    /// Replace the triggers. Panels of removed triggers are forgotten.
    pub fn set_triggers(&mut self, triggers: Vec<Item<K>>) -> Result<(), ListError> {
        self.list.set_items(as_triggers(triggers))?;
        self.expansion.prune(&self.list);
        Ok(())
    }

    /// Switch between single and multiple open panels.
    pub fn set_config(&mut self, config: AccordionConfig) {
        self.expansion.set_multi(&self.list, config.multi_expandable);
    }

    /// Tab index of trigger `id`.
    pub fn trigger_tabindex(&self, id: K) -> TabIndex {
        self.list
            .index_of(id)
            .map_or(-1, |index| self.list.item_tabindex(index))
    }

    /// Whether the panel of `id` is open (`aria-expanded` on its trigger).
    pub fn is_expanded(&self, id: K) -> bool {
        self.expansion.is_expanded(&self.list, id)
    }

    /// Whether the panel of `id` is hidden.
    pub fn panel_hidden(&self, id: K) -> bool {
        !self.is_expanded(id)
    }

    /// Whether trigger `id` is disabled (`aria-disabled`).
    pub fn is_disabled(&self, id: K) -> bool {
        !self.expansion.is_expandable(&self.list, id)
    }

    /// Open triggers, in order.
    pub fn expanded_ids(&self) -> Vec<K> {
        self.expansion.expanded_ids(&self.list).collect()
    }

    /// Expansion scoped to trigger `id`.
    pub fn trigger(&mut self, id: K) -> ExpansionControl<'_, K> {
        self.expansion.control(&self.list, id)
    }

    /// Open every panel. Multi-expandable accordions only.
    pub fn expand_all(&mut self) -> bool {
        self.expansion.open_all(&self.list)
    }

    /// Close every panel.
    pub fn collapse_all(&mut self) -> bool {
        self.expansion.close_all(&self.list)
    }

    /// Activate the first open focusable trigger, else the first focusable one.
    pub fn set_default_state(&mut self) {
        let open = (0..self.list.len()).find(|&index| {
            self.list.is_focusable(index)
                && self
                    .list
                    .get(index)
                    .is_some_and(|item| self.expansion.is_expanded(&self.list, item.id))
        });
        if let Some(index) = open.or_else(|| self.list.first_focusable()) {
            self.list.goto(index);
        }
    }

    /// Host focus landed on trigger `id`.
    pub fn on_focus(&mut self, id: K) -> bool {
        match self.list.index_of(id) {
            Some(index) => self.list.goto(index),
            None => false,
        }
    }

    /// Interpret a key press on a trigger. Returns `true` if handled.
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
            .on(keys::SPACE, KeyAction::Toggle)
            .on(keys::ENTER, KeyAction::Toggle);
        let Some(&action) = manager.handle(event) else {
            return false;
        };
        match action {
            KeyAction::Navigate(step) => {
                let wrap = self.list.config().wrap;
                step.apply(&mut self.list, wrap);
            }
            KeyAction::Toggle => {
                self.expansion.toggle(&self.list, None);
            }
        }
        true
    }

    /// Interpret a click on trigger `event.target`.
    pub fn on_pointerdown(&mut self, event: &mut PointerEvent<Option<K>>) -> bool {
        if self.list.is_list_disabled() {
            return false;
        }
        let Some(index) = event
            .target
            .and_then(|id| self.list.index_of(id))
            .filter(|&index| self.list.is_focusable(index))
        else {
            return false;
        };
        if PointerEventManager::new().on(()).handle(event).is_none() || !self.list.goto(index) {
            return false;
        }
        self.expansion.toggle(&self.list, None);
        true
    }

    /// Authoring problems.
    pub fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        if self.list.is_list_disabled() || self.list.first_focusable().is_none() {
            violations.push(Violation::NoFocusableItem("accordion trigger"));
        }
        violations
    }
}

fn as_triggers<K>(items: Vec<Item<K>>) -> Vec<Item<K>> {
    items
        .into_iter()
        .map(|item| item.with_expandable(true))
        .collect()
}
