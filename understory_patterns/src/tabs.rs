// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tabs: a tab list where exactly one tab's panel is shown.
//!
//! Selecting a tab also expands it, and expansion is single, so the shown
//! panel always belongs to the selected tab. Hosts that mount panels lazily
//! can read [`Tabs::panel_hidden`] to decide when to mount.
//!
//! With `follow_focus` (the default) arrow keys select as they move; without
//! it `Space`/`Enter` select the active tab.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use understory_event_manager::{
    KeyboardEvent, KeyboardEventManager, PointerEvent, PointerEventManager, keys,
};
use understory_list::{Expansion, Item, List, ListConfig, ListError, Selection, TabIndex};

use crate::keys::{next_key, prev_key};
use crate::listbox::Move;
use crate::violation::Violation;

/// Behavior switches of [`Tabs`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TabsConfig {
    /// Arrow-key navigation selects the newly active tab.
    pub follow_focus: bool,
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self { follow_focus: true }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum KeyAction {
    Navigate(Move),
    Select,
}

/// Tab list state machine.
#[derive(Debug)]
pub struct Tabs<K> {
    list: List<K>,
    selection: Selection<K>,
    expansion: Expansion<K>,
    config: TabsConfig,
}

impl<K> Tabs<K> {
    /// The tabs.
    pub fn list(&self) -> &List<K> {
        &self.list
    }

    /// Behavior switches.
    pub fn config(&self) -> &TabsConfig {
        &self.config
    }
}

impl<K: Copy + Eq + Hash + Debug> Tabs<K> {
    /// Create a tab list; nothing is selected until the host or the user
    /// selects a tab.
    pub fn new(
        tabs: Vec<Item<K>>,
        list_config: ListConfig,
        config: TabsConfig,
    ) -> Result<Self, ListError> {
        let tabs = tabs
            .into_iter()
            .map(|item| item.with_expandable(true))
            .collect();
        Ok(Self {
            list: List::try_new(tabs, list_config)?,
            selection: Selection::new(false, false),
            expansion: Expansion::new(false),
            config,
        })
    }

    /// Replace the behavior switches.
    pub fn set_config(&mut self, config: TabsConfig) {
        self.config = config;
    }

    /// The selected tab.
    pub fn selected_id(&self) -> Option<K> {
        self.selection.selected_item(&self.list).map(|item| item.id)
    }

    /// Whether tab `id` is selected (`aria-selected`).
    pub fn is_selected(&self, id: K) -> bool {
        self.selection.is_selected(&self.list, id)
    }

    /// Whether the panel of tab `id` is hidden.
    pub fn panel_hidden(&self, id: K) -> bool {
        !self.expansion.is_expanded(&self.list, id)
    }

    /// Tab index of tab `id`.
    pub fn tab_tabindex(&self, id: K) -> TabIndex {
        self.list
            .index_of(id)
            .map_or(-1, |index| self.list.item_tabindex(index))
    }

    /// Select tab `id` and show its panel.
    ///
    /// Disabled tabs cannot be selected. Selecting is never undone by
    /// selecting the same tab again.
    pub fn select(&mut self, id: K) -> bool {
        if !self.selection.select_one(&self.list, Some(id)) && !self.is_selected(id) {
            return false;
        }
        self.expansion.open(&self.list, Some(id));
        tracing::debug!(?id, "tab selected");
        true
    }

    /// Activate the selected tab if it is focusable, else the first
    /// focusable tab.
    pub fn set_default_state(&mut self) {
        let selected = self
            .selected_id()
            .and_then(|id| self.list.index_of(id))
            .filter(|&index| self.list.is_focusable(index));
        if let Some(index) = selected.or_else(|| self.list.first_focusable()) {
            self.list.goto(index);
        }
    }

    /// Host focus landed on tab `id`.
    pub fn on_focus(&mut self, id: K) -> bool {
        match self.list.index_of(id) {
            Some(index) => self.list.goto(index),
            None => false,
        }
    }

    /// Interpret a key press on the tab list. Returns `true` if handled.
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
            .on(keys::SPACE, KeyAction::Select)
            .on(keys::ENTER, KeyAction::Select);
        let Some(&action) = manager.handle(event) else {
            return false;
        };
        match action {
            KeyAction::Navigate(step) => {
                let wrap = self.list.config().wrap;
                if step.apply(&mut self.list, wrap) && self.config.follow_focus {
                    self.select_active();
                }
            }
            KeyAction::Select => {
                self.select_active();
            }
        }
        true
    }

    /// Interpret a click on tab `event.target`.
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
        self.select_active()
    }

    /// Authoring problems.
    pub fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        if self.list.is_list_disabled() || self.list.first_focusable().is_none() {
            violations.push(Violation::NoFocusableItem("tab"));
        }
        violations
    }

    fn select_active(&mut self) -> bool {
        match self.list.active_id() {
            Some(id) => self.select(id),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use understory_list::{Orientation, TextDirection};

    fn tabs(config: TabsConfig) -> Tabs<u8> {
        let mut tabs = Tabs::new(
            vec![
                Item::new(1, "General"),
                Item::new(2, "Privacy").with_disabled(true),
                Item::new(3, "Advanced"),
            ],
            ListConfig::default()
                .with_orientation(Orientation::Horizontal)
                .with_text_direction(TextDirection::Ltr),
            config,
        )
        .unwrap();
        tabs.set_default_state();
        tabs
    }

    fn press(tabs: &mut Tabs<u8>, key: &str) -> bool {
        tabs.on_keydown(&mut KeyboardEvent::new(key))
    }

    #[test]
    fn follow_focus_selects_and_shows_one_panel() {
        let mut t = tabs(TabsConfig::default());
        press(&mut t, "ArrowRight");
        assert_eq!(t.selected_id(), Some(3));
        assert!(!t.panel_hidden(3));
        press(&mut t, "ArrowRight");
        assert_eq!(t.selected_id(), Some(1));
        assert!(t.panel_hidden(3));
        assert!(!t.panel_hidden(1));
    }

    #[test]
    fn explicit_mode_waits_for_enter() {
        let mut t = tabs(TabsConfig {
            follow_focus: false,
        });
        press(&mut t, "End");
        assert_eq!(t.selected_id(), None);
        press(&mut t, "Enter");
        assert_eq!(t.selected_id(), Some(3));
        assert!(press(&mut t, " "));
        assert_eq!(t.selected_id(), Some(3));
    }

    #[test]
    fn disabled_tab_cannot_be_selected() {
        let mut t = tabs(TabsConfig::default());
        assert!(!t.select(2));
        assert!(!t.on_pointerdown(&mut PointerEvent::new(Some(2))));
        assert!(t.on_pointerdown(&mut PointerEvent::new(Some(3))));
        assert_eq!(t.tab_tabindex(3), 0);
    }

    #[test]
    fn default_state_follows_selection() {
        let mut t = tabs(TabsConfig::default());
        t.select(3);
        t.set_default_state();
        assert_eq!(t.list().active_id(), Some(3));
    }

    #[test]
    fn validate_flags_unreachable_tab_list() {
        let t = Tabs::new(
            vec![Item::new(1_u8, "Only").with_disabled(true)],
            ListConfig::default(),
            TabsConfig::default(),
        )
        .unwrap();
        assert_eq!(t.validate(), vec![Violation::NoFocusableItem("tab")]);
    }
}
