// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus controller: which item is active and how focus is distributed.
//!
//! Two strategies are supported, selected by [`FocusMode`]:
//!
//! - **Roving**: exactly one item is in the tab sequence (tabindex `0`), the
//!   active item or, if none is active, the first focusable item. Every other
//!   item and the collection root have tabindex `-1`. The host moves real focus
//!   to the active item's element.
//! - **Active descendant**: the root holds tabindex `0` and keeps host focus;
//!   items are never focusable themselves and the root references the active
//!   item through [`List::active_descendant`].
//!
//! A list that is disabled, or whose items are all disabled, is *inert*: the
//! root stays reachable (tabindex `0`) so assistive technology can announce
//! it, no item is focusable, and [`List::focus`] fails.

use crate::list::{FocusMode, List};

/// Tab index of an element in the sequential focus order.
pub type TabIndex = i32;

impl<K> List<K> {
    /// Whether the list as a whole is inert.
    pub fn is_list_disabled(&self) -> bool {
        self.config().disabled || self.items().iter().all(|item| item.disabled)
    }

    /// Make the item at `index` active.
    ///
    /// Returns `false` and leaves state unchanged if the list is inert or the
    /// item is not focusable.
    pub fn focus(&mut self, index: usize) -> bool {
        if self.is_list_disabled() || !self.is_focusable(index) {
            tracing::trace!(index, "focus rejected");
            return false;
        }
        if self.active != Some(index) {
            self.previous = self.active;
            self.active = Some(index);
            tracing::debug!(index, previous = ?self.previous, "active item changed");
        }
        true
    }

    /// Index of the item that currently carries tabindex `0` in roving mode.
    pub fn roving_index(&self) -> Option<usize> {
        self.active.or_else(|| self.first_focusable())
    }

    /// Tab index of the collection root.
    pub fn list_tabindex(&self) -> TabIndex {
        if self.is_list_disabled() {
            return 0;
        }
        match self.config().focus_mode {
            FocusMode::Roving => -1,
            FocusMode::ActiveDescendant => 0,
        }
    }

    /// Tab index of the item at `index`.
    pub fn item_tabindex(&self, index: usize) -> TabIndex {
        if self.is_list_disabled() {
            return -1;
        }
        match self.config().focus_mode {
            FocusMode::ActiveDescendant => -1,
            FocusMode::Roving if self.roving_index() == Some(index) => 0,
            FocusMode::Roving => -1,
        }
    }
}

impl<K: Copy> List<K> {
    /// Id referenced by the root in active-descendant mode.
    ///
    /// `None` in roving mode, when the list is inert, or when nothing is active.
    pub fn active_descendant(&self) -> Option<K> {
        if self.is_list_disabled() || self.config().focus_mode == FocusMode::Roving {
            return None;
        }
        self.active_item().map(|item| item.id)
    }
}
