// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The collection contract: ordered items, configuration, and the active item.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use thiserror::Error;
use understory_signal::{Memo, Signal, Version};

use crate::item::Item;

/// Layout axis of a collection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Items are stacked top to bottom.
    #[default]
    Vertical,
    /// Items are laid out along the reading direction.
    Horizontal,
}

/// Reading direction of the surrounding content.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextDirection {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left.
    Rtl,
}

/// How keyboard focus is distributed over the collection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FocusMode {
    /// Only the active item is in the tab sequence and receives host focus.
    #[default]
    Roving,
    /// The collection root keeps host focus and points at the active item.
    ActiveDescendant,
}

/// Configuration of a [`List`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListConfig {
    /// Layout axis, used by patterns to derive arrow keys.
    pub orientation: Orientation,
    /// Reading direction, used by patterns to derive arrow keys.
    pub text_direction: TextDirection,
    /// Whether navigation wraps around the ends.
    pub wrap: bool,
    /// Disables the whole collection.
    pub disabled: bool,
    /// When `true`, disabled items cannot become active.
    ///
    /// When `false`, disabled items stay reachable but inert.
    pub skip_disabled: bool,
    /// Focus distribution strategy.
    pub focus_mode: FocusMode,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            text_direction: TextDirection::Ltr,
            wrap: true,
            disabled: false,
            skip_disabled: true,
            focus_mode: FocusMode::Roving,
        }
    }
}

impl ListConfig {
    /// Set the orientation.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the text direction.
    #[must_use]
    pub fn with_text_direction(mut self, text_direction: TextDirection) -> Self {
        self.text_direction = text_direction;
        self
    }

    /// Set wrap-around navigation.
    #[must_use]
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    /// Set the collection-wide disabled flag.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set whether disabled items are skipped.
    #[must_use]
    pub fn with_skip_disabled(mut self, skip_disabled: bool) -> Self {
        self.skip_disabled = skip_disabled;
        self
    }

    /// Set the focus strategy.
    #[must_use]
    pub fn with_focus_mode(mut self, focus_mode: FocusMode) -> Self {
        self.focus_mode = focus_mode;
        self
    }
}

/// Misuse of the collection contract by the host.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ListError {
    /// Two items share an id.
    #[error("duplicate item id at index {second} (first used at index {first})")]
    DuplicateId {
        /// Index of the first item with the id.
        first: usize,
        /// Index of the conflicting item.
        second: usize,
    },
}

/// An ordered collection of [`Item`]s with a single active item.
///
/// The list is the shared state of every controller in this crate. It owns
/// the items and the active-item reference; the focus and navigation methods
/// are the only writers of the active item. Selection, expansion and
/// typeahead keep their own state and read the list through `&List`.
///
/// Membership is held in a [`Signal`] so that derived state (such as the
/// first focusable item used for roving tab indices) is memoized and only
/// recomputed after the items or the configuration change.
#[derive(Debug)]
pub struct List<K> {
    items: Signal<Vec<Item<K>>>,
    config: Signal<ListConfig>,
    pub(crate) active: Option<usize>,
    pub(crate) previous: Option<usize>,
    first_focusable: Memo<Option<usize>>,
}

impl<K> Default for List<K> {
    fn default() -> Self {
        Self::new(ListConfig::default())
    }
}

impl<K> List<K> {
    /// Create an empty list.
    pub fn new(config: ListConfig) -> Self {
        Self {
            items: Signal::new(Vec::new()),
            config: Signal::new(config),
            active: None,
            previous: None,
            first_focusable: Memo::new(),
        }
    }

    /// Items in order.
    pub fn items(&self) -> &[Item<K>] {
        self.items.get()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.get().len()
    }

    /// Returns `true` if the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.get().is_empty()
    }

    /// Item at `index`.
    pub fn get(&self, index: usize) -> Option<&Item<K>> {
        self.items.get().get(index)
    }

    /// Current configuration.
    pub fn config(&self) -> &ListConfig {
        self.config.get()
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: ListConfig) {
        if self.config.set_if_changed(config) {
            self.revalidate_active();
        }
    }

    /// Edit the configuration in place.
    pub fn update_config(&mut self, f: impl FnOnce(&mut ListConfig)) {
        let mut config = *self.config.get();
        f(&mut config);
        self.set_config(config);
    }

    /// Version of the item membership, for controllers that prune stale ids.
    pub fn items_version(&self) -> Version {
        self.items.version()
    }

    /// Index of the active item.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// The active item.
    pub fn active_item(&self) -> Option<&Item<K>> {
        self.active.and_then(|i| self.get(i))
    }

    /// Index of the item that was active before the last successful focus.
    pub fn previous_index(&self) -> Option<usize> {
        self.previous
    }

    /// Clear the active item.
    pub fn clear_active(&mut self) {
        if self.active.is_some() {
            self.previous = self.active.take();
        }
    }

    /// Whether the item at `index` may become active.
    ///
    /// An item is focusable if it exists and is enabled, or if the list does
    /// not skip disabled items.
    pub fn is_focusable(&self, index: usize) -> bool {
        self.get(index)
            .is_some_and(|item| !item.disabled || !self.config().skip_disabled)
    }

    /// Index of the first focusable item (memoized).
    pub fn first_focusable(&self) -> Option<usize> {
        self.first_focusable.get(
            &[self.items.version(), self.config.version()],
            || (0..self.len()).find(|&i| self.is_focusable(i)),
        )
    }

    /// Index of the last focusable item.
    pub fn last_focusable(&self) -> Option<usize> {
        (0..self.len()).rev().find(|&i| self.is_focusable(i))
    }

    fn revalidate_active(&mut self) {
        if let Some(active) = self.active
            && !self.is_focusable(active)
        {
            tracing::debug!(index = active, "active item is no longer focusable");
            self.previous = self.active.take();
        }
    }
}

impl<K: Copy + Eq + Hash + Debug> List<K> {
    /// Create a list with the given items.
    pub fn try_new(items: Vec<Item<K>>, config: ListConfig) -> Result<Self, ListError> {
        let mut list = Self::new(config);
        list.set_items(items)?;
        Ok(list)
    }

    /// Replace the items.
    ///
    /// The active item is kept if an item with the same id is still present
    /// and focusable; otherwise it is cleared. On error the list is unchanged.
    pub fn set_items(&mut self, items: Vec<Item<K>>) -> Result<(), ListError> {
        let mut seen: HashMap<K, usize> = HashMap::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            if let Some(&first) = seen.get(&item.id) {
                return Err(ListError::DuplicateId {
                    first,
                    second: index,
                });
            }
            seen.insert(item.id, index);
        }

        let active_id = self.active_item().map(|item| item.id);
        let previous_id = self.previous.and_then(|i| self.get(i)).map(|item| item.id);
        self.items.set(items);
        self.active = active_id.and_then(|id| seen.get(&id).copied());
        self.previous = previous_id.and_then(|id| seen.get(&id).copied());
        self.revalidate_active();
        tracing::debug!(len = self.len(), active = ?self.active, "list items replaced");
        Ok(())
    }

    /// Index of the item with `id`.
    pub fn index_of(&self, id: K) -> Option<usize> {
        self.items().iter().position(|item| item.id == id)
    }

    /// Item with `id`.
    pub fn item(&self, id: K) -> Option<&Item<K>> {
        self.items().iter().find(|item| item.id == id)
    }

    /// Id of the active item.
    pub fn active_id(&self) -> Option<K> {
        self.active_item().map(|item| item.id)
    }

    /// Ids of all items, in order.
    pub fn ids(&self) -> impl Iterator<Item = K> + '_ {
        self.items().iter().map(|item| item.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn fruits() -> Vec<Item<u32>> {
        vec![
            Item::new(1, "Apple"),
            Item::new(2, "Banana"),
            Item::new(3, "Cherry"),
        ]
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let items = vec![Item::new(1_u32, "a"), Item::new(2, "b"), Item::new(1, "c")];
        let err = List::try_new(items, ListConfig::default()).unwrap_err();
        assert_eq!(err, ListError::DuplicateId { first: 0, second: 2 });
    }

    #[test]
    fn active_item_survives_reordering() {
        let mut list = List::try_new(fruits(), ListConfig::default()).unwrap();
        assert!(list.focus(2));
        let mut reordered = fruits();
        reordered.reverse();
        list.set_items(reordered).unwrap();
        assert_eq!(list.active_id(), Some(3));
        assert_eq!(list.active_index(), Some(0));
    }

    #[test]
    fn active_item_is_cleared_when_removed_or_disabled() {
        let mut list = List::try_new(fruits(), ListConfig::default()).unwrap();
        assert!(list.focus(1));
        list.set_items(vec![Item::new(1, "Apple"), Item::new(3, "Cherry")])
            .unwrap();
        assert_eq!(list.active_id(), None);

        assert!(list.focus(0));
        list.set_items(vec![
            Item::new(1, "Apple").with_disabled(true),
            Item::new(3, "Cherry"),
        ])
        .unwrap();
        assert_eq!(list.active_id(), None);
    }

    #[test]
    fn first_focusable_tracks_membership_and_config() {
        let mut list = List::try_new(
            vec![
                Item::new(1_u32, "a").with_disabled(true),
                Item::new(2, "b"),
            ],
            ListConfig::default(),
        )
        .unwrap();
        assert_eq!(list.first_focusable(), Some(1));
        list.update_config(|c| c.skip_disabled = false);
        assert_eq!(list.first_focusable(), Some(0));
        list.set_items(vec![Item::new(5, "z")]).unwrap();
        assert_eq!(list.first_focusable(), Some(0));
        list.set_items(Vec::new()).unwrap();
        assert_eq!(list.first_focusable(), None);
    }
}
