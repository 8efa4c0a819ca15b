// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listbox: a list of options with single or multiple selection.
//!
//! The listbox combines navigation, typeahead and a [`Selection`] into four
//! states, single/multi × follow-focus/explicit:
//!
//! | | follow focus | explicit |
//! |---|---|---|
//! | **single** | arrows select | `Space`/`Enter` toggle |
//! | **multi** | arrows add; `Ctrl`+arrows move only | `Space`/`Enter` toggle |
//!
//! In multi mode `Shift`+arrows extend a range from the anchor and
//! `Ctrl`/`Meta`+`A` toggles every option. While a typeahead query is in
//! progress `Space` is search text rather than a selection key.
//!
//! A read-only listbox navigates and searches but never changes selection.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use understory_event_manager::{
    KeyPattern, KeyboardEvent, KeyboardEventManager, ModifierMatch, Modifiers, PointerEvent,
    PointerEventManager, keys,
};
use understory_list::{FocusMode, Item, List, ListConfig, ListError, Selection, TabIndex, Typeahead};

use crate::combobox::PopupControls;
use crate::keys::{next_key, prev_key};
use crate::violation::Violation;

/// Behavior switches of a [`Listbox`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListboxConfig {
    /// Allow several selected options.
    pub multi: bool,
    /// Selection follows keyboard navigation.
    pub follow_focus: bool,
    /// Navigation and search only.
    pub readonly: bool,
    /// Typeahead reset delay in milliseconds.
    pub typeahead_delay: u64,
}

impl Default for ListboxConfig {
    fn default() -> Self {
        Self {
            multi: false,
            follow_focus: true,
            readonly: false,
            typeahead_delay: Typeahead::DEFAULT_DELAY,
        }
    }
}

impl ListboxConfig {
    /// Set multi selection.
    #[must_use]
    pub fn with_multi(mut self, multi: bool) -> Self {
        self.multi = multi;
        self
    }

    /// Set follow-focus selection.
    #[must_use]
    pub fn with_follow_focus(mut self, follow_focus: bool) -> Self {
        self.follow_focus = follow_focus;
        self
    }

    /// Set read-only mode.
    #[must_use]
    pub fn with_readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Move {
    Prev,
    Next,
    First,
    Last,
}

impl Move {
    pub(crate) fn apply<K>(self, list: &mut List<K>, wrap: bool) -> bool {
        match self {
            Self::Prev => list.prev_with_wrap(wrap),
            Self::Next => list.next_with_wrap(wrap),
            Self::First => list.first(),
            Self::Last => list.last(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum KeyAction {
    /// Move, then apply follow-focus selection.
    Navigate(Move),
    /// Move without touching selection.
    MoveOnly(Move),
    /// Move without wrapping, then select the range.
    Extend(Move),
    Anchor,
    SelectRange,
    Toggle,
    ToggleAll,
    ToggleAllKeepActive,
    Search,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum PointerAction {
    Goto,
    SelectOne,
    Toggle,
    Range,
}

/// Listbox state machine.
#[derive(Debug)]
pub struct Listbox<K> {
    list: List<K>,
    selection: Selection<K>,
    typeahead: Typeahead,
    config: ListboxConfig,
}

impl<K> Listbox<K> {
    /// Behavior switches.
    pub fn config(&self) -> &ListboxConfig {
        &self.config
    }

    /// The options.
    pub fn list(&self) -> &List<K> {
        &self.list
    }

    /// Selection state.
    pub fn selection(&self) -> &Selection<K> {
        &self.selection
    }

    /// Whether several options may be selected (`aria-multiselectable`).
    pub fn is_multiselectable(&self) -> bool {
        self.config.multi
    }

    /// Whether the listbox is inert.
    pub fn is_disabled(&self) -> bool {
        self.list.is_list_disabled()
    }

    /// Tab index of the listbox element.
    pub fn tabindex(&self) -> TabIndex {
        self.list.list_tabindex()
    }
}

impl<K: Copy + Eq + Hash + Debug> Listbox<K> {
    /// Create a listbox over `items`.
    pub fn new(
        items: Vec<Item<K>>,
        list_config: ListConfig,
        config: ListboxConfig,
    ) -> Result<Self, ListError> {
        Ok(Self {
            list: List::try_new(items, list_config)?,
            selection: Selection::new(config.multi, config.follow_focus && !config.readonly),
            typeahead: Typeahead::new(config.typeahead_delay),
            config,
        })
    }

    /// Replace the options. Selection of removed options is dropped and a
    /// typeahead query in progress is abandoned.
    pub fn set_items(&mut self, items: Vec<Item<K>>) -> Result<(), ListError> {
        self.list.set_items(items)?;
        self.selection.prune(&self.list);
        self.typeahead.cancel();
        Ok(())
    }

    /// Replace the behavior switches.
    pub fn set_config(&mut self, config: ListboxConfig) {
        self.selection.set_multi(config.multi);
        self.selection
            .set_follow_focus(config.follow_focus && !config.readonly);
        self.typeahead.set_delay(config.typeahead_delay);
        self.config = config;
    }

    /// Edit the collection configuration in place.
    pub fn update_list_config(&mut self, f: impl FnOnce(&mut ListConfig)) {
        self.list.update_config(f);
    }

    /// Tab index of the option `id`.
    pub fn item_tabindex(&self, id: K) -> TabIndex {
        self.list
            .index_of(id)
            .map_or(-1, |index| self.list.item_tabindex(index))
    }

    /// Option referenced by `aria-activedescendant`.
    pub fn active_descendant(&self) -> Option<K> {
        self.list.active_descendant()
    }

    /// The active option.
    pub fn active_id(&self) -> Option<K> {
        self.list.active_id()
    }

    /// Whether `id` is selected (`aria-selected`).
    pub fn is_selected(&self, id: K) -> bool {
        self.selection.is_selected(&self.list, id)
    }

    /// Selected options, in selection order.
    pub fn selected_ids(&self) -> Vec<K> {
        self.selection.selected_ids(&self.list).collect()
    }

    /// Replace the selected value programmatically.
    pub fn set_selected(&mut self, ids: impl IntoIterator<Item = K>) {
        self.selection.set_selected(&self.list, ids);
    }

    /// Activate the first selected focusable option, else the first
    /// focusable option.
    pub fn set_default_state(&mut self) {
        let selected = (0..self.list.len()).find(|&index| {
            self.list.is_focusable(index)
                && self
                    .list
                    .get(index)
                    .is_some_and(|item| self.selection.is_selected(&self.list, item.id))
        });
        if let Some(index) = selected.or_else(|| self.list.first_focusable()) {
            self.list.goto(index);
        }
    }

    /// Host focus landed on option `id`.
    pub fn on_focus(&mut self, id: K) -> bool {
        match self.list.index_of(id) {
            Some(index) => self.list.goto(index),
            None => false,
        }
    }

    /// Interpret a key press. Returns `true` if the key was handled.
    pub fn on_keydown(&mut self, event: &mut KeyboardEvent) -> bool {
        if self.list.is_list_disabled() {
            return false;
        }
        let manager = self.keydown_manager(event.time);
        let Some(&action) = manager.handle(event) else {
            return false;
        };
        let wrap = self.list.config().wrap;
        match action {
            KeyAction::Navigate(step) => {
                if step.apply(&mut self.list, wrap) {
                    self.selection.follow(&self.list);
                }
            }
            KeyAction::MoveOnly(step) => {
                step.apply(&mut self.list, wrap);
            }
            KeyAction::Extend(step) => {
                if step.apply(&mut self.list, false) {
                    self.selection.select_range(&self.list);
                }
            }
            KeyAction::Anchor => self.selection.begin_range_selection(&self.list, None),
            KeyAction::SelectRange => {
                self.selection.select_range(&self.list);
            }
            KeyAction::Toggle => {
                self.selection.toggle(&self.list, None);
            }
            KeyAction::ToggleAll => {
                self.selection.toggle_all(&self.list);
            }
            KeyAction::ToggleAllKeepActive => {
                self.selection.toggle_all(&self.list);
                self.selection.select(&self.list, None);
            }
            KeyAction::Search => {
                if let Some(ch) = event.char()
                    && self.typeahead.search(&mut self.list, ch, event.time)
                {
                    self.selection.follow(&self.list);
                }
            }
        }
        true
    }

    /// Interpret a pointer press on option `event.target` (`None` when the
    /// press missed every option).
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
        let manager = self.pointer_manager();
        let Some(&action) = manager.handle(event) else {
            return false;
        };
        if !self.list.goto(index) {
            return false;
        }
        match action {
            PointerAction::Goto => {}
            PointerAction::SelectOne => {
                self.selection.select_one(&self.list, None);
            }
            PointerAction::Toggle => {
                self.selection.toggle(&self.list, None);
            }
            PointerAction::Range => {
                self.selection.select_range(&self.list);
            }
        }
        true
    }

    /// Authoring problems.
    pub fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        let count = self.selection.len(&self.list);
        if !self.config.multi && count > 1 {
            violations.push(Violation::MultipleSelection {
                widget: "listbox",
                count,
            });
        }
        violations
    }

    fn keydown_manager(&self, now: u64) -> KeyboardEventManager<KeyAction> {
        let list_config = self.list.config();
        let (prev, next) = (prev_key(list_config), next_key(list_config));
        let typing = self.typeahead.is_typing(now);
        let ctrl_or_meta = [Modifiers::CTRL, Modifiers::META];
        let shifted_jump = [
            Modifiers::CTRL | Modifiers::SHIFT,
            Modifiers::META | Modifiers::SHIFT,
        ];

        let mut manager = KeyboardEventManager::new()
            .on(prev, KeyAction::Navigate(Move::Prev))
            .on(next, KeyAction::Navigate(Move::Next))
            .on(keys::HOME, KeyAction::Navigate(Move::First))
            .on(keys::END, KeyAction::Navigate(Move::Last));

        if !self.config.readonly {
            if self.config.multi {
                manager = manager
                    .on_modifiers(ModifierMatch::Any, keys::SHIFT, KeyAction::Anchor)
                    .on_modifiers(Modifiers::SHIFT, prev, KeyAction::Extend(Move::Prev))
                    .on_modifiers(Modifiers::SHIFT, next, KeyAction::Extend(Move::Next))
                    .on_modifiers(shifted_jump, keys::HOME, KeyAction::Extend(Move::First))
                    .on_modifiers(shifted_jump, keys::END, KeyAction::Extend(Move::Last))
                    .on_modifiers(Modifiers::SHIFT, keys::ENTER, KeyAction::SelectRange);
                if !typing {
                    manager =
                        manager.on_modifiers(Modifiers::SHIFT, keys::SPACE, KeyAction::SelectRange);
                }
            }
            if !self.config.follow_focus {
                if !typing {
                    manager = manager.on(keys::SPACE, KeyAction::Toggle);
                }
                manager = manager.on(keys::ENTER, KeyAction::Toggle);
                if self.config.multi {
                    manager = manager.on_modifiers(ctrl_or_meta, "a", KeyAction::ToggleAll);
                }
            } else if self.config.multi {
                manager = manager
                    .on_modifiers(ctrl_or_meta, prev, KeyAction::MoveOnly(Move::Prev))
                    .on_modifiers(ctrl_or_meta, next, KeyAction::MoveOnly(Move::Next))
                    .on_modifiers(ctrl_or_meta, keys::HOME, KeyAction::MoveOnly(Move::First))
                    .on_modifiers(ctrl_or_meta, keys::END, KeyAction::MoveOnly(Move::Last))
                    .on_modifiers(ctrl_or_meta, keys::SPACE, KeyAction::Toggle)
                    .on_modifiers(ctrl_or_meta, keys::ENTER, KeyAction::Toggle)
                    .on_modifiers(ctrl_or_meta, "a", KeyAction::ToggleAllKeepActive);
            }
        }

        manager.on_modifiers(
            [Modifiers::empty(), Modifiers::SHIFT],
            KeyPattern::printable(),
            KeyAction::Search,
        )
    }

    fn pointer_manager(&self) -> PointerEventManager<PointerAction> {
        let manager = PointerEventManager::new();
        if self.config.readonly {
            return manager.on(PointerAction::Goto);
        }
        match (self.config.multi, self.config.follow_focus) {
            (false, true) => manager.on(PointerAction::SelectOne),
            (false, false) => manager.on(PointerAction::Toggle),
            (true, true) => manager
                .on_modifiers(Modifiers::SHIFT, PointerAction::Range)
                .on_modifiers([Modifiers::CTRL, Modifiers::META], PointerAction::Toggle)
                .on(PointerAction::SelectOne),
            (true, false) => manager
                .on_modifiers(Modifiers::SHIFT, PointerAction::Range)
                .on(PointerAction::Toggle),
        }
    }
}

impl<K: Copy + Eq + Hash + Debug> PopupControls<K> for Listbox<K> {
    fn list(&self) -> &List<K> {
        &self.list
    }

    fn set_options(&mut self, items: Vec<Item<K>>) -> Result<(), ListError> {
        self.set_items(items)
    }

    fn set_focus_mode(&mut self, mode: FocusMode) {
        self.list.update_config(|config| config.focus_mode = mode);
    }

    fn first(&mut self) -> bool {
        self.list.first()
    }

    fn last(&mut self) -> bool {
        self.list.last()
    }

    fn next(&mut self) -> bool {
        self.list.next()
    }

    fn prev(&mut self) -> bool {
        self.list.prev()
    }

    fn focus(&mut self, id: K) -> bool {
        self.on_focus(id)
    }

    fn unfocus(&mut self) {
        self.list.clear_active();
    }

    fn select(&mut self, id: K) -> bool {
        if self.config.multi {
            self.selection.select(&self.list, Some(id))
        } else {
            self.selection.select_one(&self.list, Some(id))
        }
    }

    fn clear_selection(&mut self) {
        self.selection.clear();
    }

    fn selected(&self) -> Vec<K> {
        self.selected_ids()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use understory_list::{Orientation, TextDirection};

    fn options() -> Vec<Item<u32>> {
        vec![
            Item::new(1, "New York"),
            Item::new(2, "Newark"),
            Item::new(3, "Boston").with_disabled(true),
            Item::new(4, "Chicago"),
            Item::new(5, "Denver"),
        ]
    }

    fn listbox(config: ListboxConfig) -> Listbox<u32> {
        let mut listbox = Listbox::new(options(), ListConfig::default(), config).unwrap();
        listbox.set_default_state();
        listbox
    }

    fn key(listbox: &mut Listbox<u32>, key: &str, modifiers: Modifiers, time: u64) -> bool {
        let mut event = KeyboardEvent::new(key)
            .with_modifiers(modifiers)
            .at(time);
        listbox.on_keydown(&mut event)
    }

    fn press(listbox: &mut Listbox<u32>, key_name: &str) -> bool {
        key(listbox, key_name, Modifiers::empty(), 0)
    }

    #[test]
    fn follow_focus_selects_on_navigation() {
        let mut lb = listbox(ListboxConfig::default());
        assert_eq!(lb.active_id(), Some(1));
        assert!(press(&mut lb, "ArrowDown"));
        assert!(press(&mut lb, "ArrowDown"));
        assert_eq!(lb.active_id(), Some(4));
        assert_eq!(lb.selected_ids(), vec![4]);
        assert!(press(&mut lb, "End"));
        assert_eq!(lb.selected_ids(), vec![5]);
    }

    #[test]
    fn explicit_single_toggles_on_space_and_enter() {
        let mut lb = listbox(ListboxConfig::default().with_follow_focus(false));
        press(&mut lb, "ArrowDown");
        assert!(lb.selected_ids().is_empty());
        press(&mut lb, " ");
        assert_eq!(lb.selected_ids(), vec![2]);
        press(&mut lb, "ArrowUp");
        press(&mut lb, "Enter");
        assert_eq!(lb.selected_ids(), vec![1]);
    }

    #[test]
    fn multi_explicit_range_and_toggle_all() {
        let mut lb = listbox(ListboxConfig::default().with_multi(true).with_follow_focus(false));
        key(&mut lb, "Shift", Modifiers::SHIFT, 0);
        key(&mut lb, "ArrowDown", Modifiers::SHIFT, 0);
        key(&mut lb, "ArrowDown", Modifiers::SHIFT, 0);
        assert_eq!(lb.active_id(), Some(4));
        assert_eq!(lb.selected_ids(), vec![1, 2, 4]);

        key(&mut lb, "a", Modifiers::CTRL, 0);
        assert_eq!(lb.selected_ids(), vec![1, 2, 4, 5]);
        key(&mut lb, "A", Modifiers::META, 0);
        assert!(lb.selected_ids().is_empty());
    }

    #[test]
    fn range_extension_does_not_wrap() {
        let mut lb = listbox(ListboxConfig::default().with_multi(true).with_follow_focus(false));
        key(&mut lb, "ArrowUp", Modifiers::SHIFT, 0);
        assert_eq!(lb.active_id(), Some(1));
    }

    #[test]
    fn multi_follow_adds_and_ctrl_moves_only() {
        let mut lb = listbox(ListboxConfig::default().with_multi(true));
        press(&mut lb, "ArrowDown");
        key(&mut lb, "ArrowDown", Modifiers::CTRL, 0);
        assert_eq!(lb.active_id(), Some(4));
        assert_eq!(lb.selected_ids(), vec![2]);
        key(&mut lb, " ", Modifiers::CTRL, 0);
        assert_eq!(lb.selected_ids(), vec![2, 4]);
        press(&mut lb, "ArrowDown");
        assert_eq!(lb.selected_ids(), vec![2, 4, 5]);
    }

    #[test]
    fn space_is_search_text_while_typing() {
        let mut lb = listbox(ListboxConfig::default().with_follow_focus(false));
        for (time, ch) in [(0, "n"), (10, "e"), (20, "w"), (30, " "), (40, "y")] {
            assert!(key(&mut lb, ch, Modifiers::empty(), time));
        }
        assert_eq!(lb.active_id(), Some(1));
        assert!(lb.selected_ids().is_empty());

        assert!(key(&mut lb, " ", Modifiers::empty(), 2_000));
        assert_eq!(lb.selected_ids(), vec![1]);
    }

    #[test]
    fn typeahead_follows_focus() {
        let mut lb = listbox(ListboxConfig::default());
        assert!(key(&mut lb, "D", Modifiers::SHIFT, 0));
        assert_eq!(lb.selected_ids(), vec![5]);
    }

    #[test]
    fn default_state_prefers_selected_option() {
        let mut lb = Listbox::new(options(), ListConfig::default(), ListboxConfig::default())
            .unwrap();
        lb.set_selected([4]);
        lb.set_default_state();
        assert_eq!(lb.active_id(), Some(4));
        assert_eq!(lb.item_tabindex(4), 0);
        assert_eq!(lb.item_tabindex(1), -1);
    }

    #[test]
    fn readonly_never_selects() {
        let mut lb = listbox(ListboxConfig::default().with_readonly(true));
        press(&mut lb, "ArrowDown");
        press(&mut lb, " ");
        assert_eq!(lb.active_id(), Some(2));
        assert!(lb.selected_ids().is_empty());
        assert!(lb.on_pointerdown(&mut PointerEvent::new(Some(4))));
        assert!(lb.selected_ids().is_empty());
    }

    #[test]
    fn pointer_selection_per_mode() {
        let mut single = listbox(ListboxConfig::default());
        assert!(single.on_pointerdown(&mut PointerEvent::new(Some(2))));
        assert_eq!(single.selected_ids(), vec![2]);
        assert!(!single.on_pointerdown(&mut PointerEvent::new(Some(3))));
        assert!(!single.on_pointerdown(&mut PointerEvent::new(None)));
        assert_eq!(single.active_id(), Some(2));

        let mut multi = listbox(ListboxConfig::default().with_multi(true));
        multi.on_pointerdown(&mut PointerEvent::new(Some(1)));
        let mut ctrl = PointerEvent::new(Some(4)).with_modifiers(Modifiers::CTRL);
        multi.on_pointerdown(&mut ctrl);
        assert!(ctrl.default_prevented());
        assert_eq!(multi.selected_ids(), vec![1, 4]);
        multi.on_pointerdown(&mut PointerEvent::new(Some(5)));
        assert_eq!(multi.selected_ids(), vec![5]);
    }

    #[test]
    fn click_on_disabled_option_leaves_event_untouched() {
        let mut lb = listbox(ListboxConfig::default());
        let mut click = PointerEvent::new(Some(3));
        assert!(!lb.on_pointerdown(&mut click));
        assert!(!click.default_prevented());
        assert!(!click.propagation_stopped());
    }

    #[test]
    fn replacing_items_drops_selection_and_query() {
        let mut lb = listbox(ListboxConfig::default());
        assert!(key(&mut lb, "c", Modifiers::empty(), 0));
        assert_eq!(lb.selected_ids(), vec![4]);

        lb.set_items(vec![Item::new(1, "New York"), Item::new(5, "Denver")])
            .unwrap();
        lb.set_items(options()).unwrap();
        assert!(!lb.is_selected(4));
        assert!(lb.selected_ids().is_empty());

        // A fresh query, not "cd".
        assert!(key(&mut lb, "d", Modifiers::empty(), 100));
        assert_eq!(lb.active_id(), Some(5));
    }

    #[test]
    fn horizontal_rtl_swaps_arrows() {
        let mut lb = Listbox::new(
            options(),
            ListConfig::default()
                .with_orientation(Orientation::Horizontal)
                .with_text_direction(TextDirection::Rtl),
            ListboxConfig::default(),
        )
        .unwrap();
        lb.set_default_state();
        press(&mut lb, "ArrowLeft");
        assert_eq!(lb.active_id(), Some(2));
        assert!(!press(&mut lb, "ArrowDown"));
    }

    #[test]
    fn disabled_listbox_ignores_input() {
        let mut lb = Listbox::new(
            options(),
            ListConfig::default().with_disabled(true),
            ListboxConfig::default(),
        )
        .unwrap();
        assert!(lb.is_disabled());
        assert!(!press(&mut lb, "ArrowDown"));
        assert_eq!(lb.tabindex(), 0);
    }

    #[test]
    fn validate_flags_multiple_selection_in_single_mode() {
        let mut lb = listbox(ListboxConfig::default().with_multi(true));
        lb.set_selected([1, 2]);
        assert!(lb.validate().is_empty());
        lb.set_config(ListboxConfig::default());
        assert!(lb.validate().is_empty());

        let mut lb = listbox(ListboxConfig::default());
        lb.selection.set_multi(true);
        lb.set_selected([1, 2]);
        let violations = lb.validate();
        assert_eq!(violations.len(), 1);
        assert_eq!(
            alloc::format!("{}", violations[0]),
            "2 items selected in a single-select listbox"
        );
    }
}
