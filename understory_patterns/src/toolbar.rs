// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Toolbar: roving focus over plain widgets and nested widget groups.
//!
//! The toolbar's own [`List`] holds one entry per child. A child whose id has
//! a registered [`WidgetGroup`] is a group: main-axis keys step through the
//! group's items before leaving it, cross-axis keys cycle inside it, and
//! `Enter`/`Space` trigger its active item. Plain widgets are left to the host
//! once they have focus.
//!
//! ```
//! use understory_event_manager::KeyboardEvent;
//! use understory_list::{Item, ListConfig, Orientation};
//! use understory_patterns::{RadioGroup, RadioGroupConfig, Toolbar, ToolbarTarget};
//!
//! let horizontal = ListConfig::default().with_orientation(Orientation::Horizontal);
//! let align = RadioGroup::new(
//!     vec![Item::new(10, "Left"), Item::new(11, "Center"), Item::new(12, "Right")],
//!     ListConfig::default(),
//!     RadioGroupConfig { follow_focus: false, ..RadioGroupConfig::default() },
//! )
//! .unwrap();
//!
//! let mut toolbar = Toolbar::new(
//!     vec![Item::new(1, "Bold"), Item::new(2, "Alignment")],
//!     horizontal,
//! )
//! .unwrap();
//! toolbar.add_group(2, align);
//! toolbar.set_default_state();
//!
//! toolbar.on_keydown(&mut KeyboardEvent::new("ArrowRight"));
//! assert_eq!(
//!     toolbar.active_target(),
//!     Some(ToolbarTarget::GroupItem { group: 2, item: 10 }),
//! );
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use understory_event_manager::{
    KeyboardEvent, KeyboardEventManager, PointerEvent, PointerEventManager, keys,
};
use understory_list::{Item, List, ListConfig, ListError, TabIndex};

use crate::keys::{cross_next_key, cross_prev_key, next_key, prev_key};
use crate::violation::Violation;

/// A composite child of a [`Toolbar`] that manages its own items.
///
/// Moving inside a group never changes its value; [`WidgetGroup::trigger`]
/// does.
pub trait WidgetGroup<K>: Debug {
    /// Whether the whole group is inert.
    fn is_disabled(&self) -> bool;
    /// Whether the active item is the first reachable one.
    fn is_on_first_item(&self) -> bool;
    /// Whether the active item is the last reachable one.
    fn is_on_last_item(&self) -> bool;
    /// Activate the first reachable item.
    fn first(&mut self) -> bool;
    /// Activate the last reachable item.
    fn last(&mut self) -> bool;
    /// Activate the next item.
    fn next(&mut self, wrap: bool) -> bool;
    /// Activate the previous item.
    fn prev(&mut self, wrap: bool) -> bool;
    /// Forget the active item; focus is leaving the group.
    fn unfocus(&mut self);
    /// Perform the group's action on its active item.
    fn trigger(&mut self) -> bool;
    /// Activate `id` and perform the group's action on it.
    fn goto(&mut self, id: K) -> bool;
    /// Pick the item that receives focus when the group is entered.
    fn set_default_state(&mut self);
    /// The active item.
    fn active_id(&self) -> Option<K>;
}

/// What a toolbar event or focus change is about.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ToolbarTarget<K> {
    /// A plain widget, or a group as a whole.
    Widget(K),
    /// An item inside a group.
    GroupItem {
        /// Toolbar entry of the group.
        group: K,
        /// Item within the group.
        item: K,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum KeyAction {
    Prev,
    Next,
    GroupPrev,
    GroupNext,
    First,
    Last,
    Trigger,
}

/// Toolbar state machine.
#[derive(Debug)]
pub struct Toolbar<K> {
    list: List<K>,
    groups: HashMap<K, Box<dyn WidgetGroup<K>>>,
}

impl<K> Toolbar<K> {
    /// The toolbar entries.
    pub fn list(&self) -> &List<K> {
        &self.list
    }
}

impl<K: Copy + Eq + Hash + Debug> Toolbar<K> {
    /// Create a toolbar with one entry per child widget or group.
    pub fn new(widgets: Vec<Item<K>>, list_config: ListConfig) -> Result<Self, ListError> {
        Ok(Self {
            list: List::try_new(widgets, list_config)?,
            groups: HashMap::new(),
        })
    }

    /// Attach `group` to toolbar entry `id`, returning the group it replaces.
    ///
    /// The entry's own `disabled` flag still decides whether the toolbar can
    /// move onto it.
    pub fn add_group(
        &mut self,
        id: K,
        group: impl WidgetGroup<K> + 'static,
    ) -> Option<Box<dyn WidgetGroup<K>>> {
        self.groups.insert(id, Box::new(group))
    }

    /// Detach the group of entry `id`.
    pub fn remove_group(&mut self, id: K) -> Option<Box<dyn WidgetGroup<K>>> {
        self.groups.remove(&id)
    }

    /// The group attached to entry `id`.
    pub fn group(&self, id: K) -> Option<&dyn WidgetGroup<K>> {
        self.groups.get(&id).map(|group| &**group)
    }

    /// Replace the entries. Groups of removed entries are dropped.
    pub fn set_widgets(&mut self, widgets: Vec<Item<K>>) -> Result<(), ListError> {
        self.list.set_items(widgets)?;
        let list = &self.list;
        self.groups.retain(|&id, _| list.index_of(id).is_some());
        Ok(())
    }

    /// Tab index of entry `id`.
    pub fn widget_tabindex(&self, id: K) -> TabIndex {
        self.list
            .index_of(id)
            .map_or(-1, |index| self.list.item_tabindex(index))
    }

    /// Whether entry `id` is disabled, either itself or as a whole group.
    pub fn is_disabled(&self, id: K) -> bool {
        self.list.is_list_disabled()
            || self.list.item(id).is_none_or(|item| item.disabled)
            || self.groups.get(&id).is_some_and(|group| group.is_disabled())
    }

    /// The focused widget, or the active item of the focused group.
    pub fn active_target(&self) -> Option<ToolbarTarget<K>> {
        let id = self.list.active_id()?;
        match self.groups.get(&id).and_then(|group| group.active_id()) {
            Some(item) => Some(ToolbarTarget::GroupItem { group: id, item }),
            None => Some(ToolbarTarget::Widget(id)),
        }
    }

    /// Activate the first focusable entry, entering it if it is a group.
    pub fn set_default_state(&mut self) {
        if let Some(index) = self.list.first_focusable()
            && self.list.goto(index)
            && let Some(group) = self.active_group()
        {
            group.set_default_state();
        }
    }

    /// Host focus landed on `target`.
    pub fn on_focus(&mut self, target: ToolbarTarget<K>) -> bool {
        let (id, item) = match target {
            ToolbarTarget::Widget(id) => (id, None),
            ToolbarTarget::GroupItem { group, item } => (group, Some(item)),
        };
        if !self.move_to(id) {
            return false;
        }
        if let Some(item) = item
            && let Some(group) = self.groups.get_mut(&id)
            && !group.is_disabled()
        {
            return group.goto(item);
        }
        true
    }

    /// Interpret a key press inside the toolbar. Returns `true` if handled.
    pub fn on_keydown(&mut self, event: &mut KeyboardEvent) -> bool {
        if self.list.is_list_disabled() {
            return false;
        }
        let config = self.list.config();
        let manager = KeyboardEventManager::new()
            .on(prev_key(config), KeyAction::Prev)
            .on(next_key(config), KeyAction::Next)
            .on(cross_prev_key(config), KeyAction::GroupPrev)
            .on(cross_next_key(config), KeyAction::GroupNext)
            .on(keys::HOME, KeyAction::First)
            .on(keys::END, KeyAction::Last)
            .on(keys::ENTER, KeyAction::Trigger)
            .on(keys::SPACE, KeyAction::Trigger);
        let Some(&action) = manager.find(&*event).map(|config| &config.handler) else {
            return false;
        };
        // Cross keys and triggers belong to plain widgets when no group is active.
        if matches!(
            action,
            KeyAction::GroupPrev | KeyAction::GroupNext | KeyAction::Trigger
        ) && self.active_group().is_none()
        {
            return false;
        }
        manager.handle(event);
        match action {
            KeyAction::Prev => self.prev(),
            KeyAction::Next => self.next(),
            KeyAction::GroupPrev => {
                if let Some(group) = self.active_group() {
                    group.prev(true);
                }
            }
            KeyAction::GroupNext => {
                if let Some(group) = self.active_group() {
                    group.next(true);
                }
            }
            KeyAction::First => self.edge(true),
            KeyAction::Last => self.edge(false),
            KeyAction::Trigger => {
                if let Some(group) = self.active_group() {
                    group.trigger();
                }
            }
        }
        true
    }

    /// Interpret a click on `event.target`.
    pub fn on_pointerdown(&mut self, event: &mut PointerEvent<Option<ToolbarTarget<K>>>) -> bool {
        if self.list.is_list_disabled() {
            return false;
        }
        let Some(target) = event.target.filter(|target| {
            let id = match *target {
                ToolbarTarget::Widget(id) | ToolbarTarget::GroupItem { group: id, .. } => id,
            };
            self.list
                .index_of(id)
                .is_some_and(|index| self.list.is_focusable(index))
        }) else {
            return false;
        };
        if PointerEventManager::new().on(()).handle(event).is_none() {
            return false;
        }
        self.on_focus(target)
    }

    /// Authoring problems.
    pub fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        if self.list.is_list_disabled() || self.list.first_focusable().is_none() {
            violations.push(Violation::NoFocusableItem("widget"));
        }
        violations
    }

    fn active_group(&mut self) -> Option<&mut Box<dyn WidgetGroup<K>>> {
        let id = self.list.active_id()?;
        self.groups.get_mut(&id).filter(|group| !group.is_disabled())
    }

    fn leave_group(&mut self) {
        if let Some(group) = self.active_group() {
            group.unfocus();
        }
    }

    fn move_to(&mut self, id: K) -> bool {
        let Some(index) = self.list.index_of(id) else {
            return false;
        };
        if self.list.active_index() == Some(index) {
            return true;
        }
        if !self.list.is_focusable(index) {
            return false;
        }
        self.leave_group();
        self.list.goto(index)
    }

    fn next(&mut self) {
        if let Some(group) = self.active_group()
            && !group.is_on_last_item()
        {
            group.next(false);
            return;
        }
        let Some(index) = self.list.peek_next() else {
            return;
        };
        self.leave_group();
        if self.list.goto(index)
            && let Some(group) = self.active_group()
        {
            group.first();
        }
        tracing::trace!(target = ?self.active_target(), "toolbar moved forward");
    }

    fn prev(&mut self) {
        if let Some(group) = self.active_group()
            && !group.is_on_first_item()
        {
            group.prev(false);
            return;
        }
        let Some(index) = self.list.peek_prev() else {
            return;
        };
        self.leave_group();
        if self.list.goto(index)
            && let Some(group) = self.active_group()
        {
            group.last();
        }
        tracing::trace!(target = ?self.active_target(), "toolbar moved backward");
    }

    fn edge(&mut self, first: bool) {
        let target = if first {
            self.list.first_focusable()
        } else {
            self.list.last_focusable()
        };
        let Some(index) = target else {
            return;
        };
        self.leave_group();
        if self.list.goto(index)
            && let Some(group) = self.active_group()
        {
            if first {
                group.first();
            } else {
                group.last();
            }
        }
    }
}
