// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Expansion controller: open/closed state of disclosure-style items.
//!
//! An item can be expanded only while it is expandable: the list is enabled,
//! the item is enabled, and the item's `expandable` flag is set. In
//! single-expand mode opening an item closes every other item of the list.
//!
//! [`ExpansionControl`] scopes the controller to one item, for widgets such as
//! accordion triggers and tabs that only ever talk about themselves.

use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashSet;
use understory_signal::Version;

use crate::list::List;

/// Expanded ids of a [`List`].
#[derive(Clone, Debug)]
pub struct Expansion<K> {
    expanded: HashSet<K>,
    multi: bool,
    synced: Version,
}

impl<K> Default for Expansion<K> {
    fn default() -> Self {
        Self::new(false)
    }
}

impl<K> Expansion<K> {
    /// Create a controller with nothing expanded.
    pub fn new(multi: bool) -> Self {
        Self {
            expanded: HashSet::new(),
            multi,
            synced: Version::INITIAL,
        }
    }

    /// Whether several items may be open at once.
    pub fn is_multi(&self) -> bool {
        self.multi
    }
}

impl<K: Copy + Eq + Hash + Debug> Expansion<K> {
    /// Switch between single- and multi-expand mode.
    ///
    /// Switching to single mode closes everything but the first open item in
    /// list order.
    pub fn set_multi(&mut self, list: &List<K>, multi: bool) {
        self.multi = multi;
        if !multi {
            let keep = self.expanded_ids(list).next();
            self.expanded.retain(|id| Some(*id) == keep);
        }
    }

    /// Whether `id` may be opened or closed.
    pub fn is_expandable(&self, list: &List<K>, id: K) -> bool {
        expandable(list, id)
    }

    /// Whether `id` is open.
    pub fn is_expanded(&self, list: &List<K>, id: K) -> bool {
        self.expanded.contains(&id) && list.item(id).is_some_and(|item| item.expandable)
    }

    /// Open ids, in list order.
    pub fn expanded_ids<'a>(&'a self, list: &'a List<K>) -> impl Iterator<Item = K> + 'a {
        list.items()
            .iter()
            .filter(|item| item.expandable && self.expanded.contains(&item.id))
            .map(|item| item.id)
    }

    /// Replace the open set programmatically.
    ///
    /// Ids that are not expandable items of `list` are ignored. Disabled items
    /// are accepted.
    pub fn set_expanded(&mut self, list: &List<K>, ids: impl IntoIterator<Item = K>) {
        self.expanded.clear();
        for id in ids {
            if list.item(id).is_some_and(|item| item.expandable) {
                self.expanded.insert(id);
                if !self.multi {
                    break;
                }
            }
        }
        self.synced = list.items_version();
    }

    /// Open `id`, or the active item when `None`.
    ///
    /// Returns `true` if the item was closed before.
    pub fn open(&mut self, list: &List<K>, id: Option<K>) -> bool {
        self.prune(list);
        let Some(id) = self.resolve(list, id) else {
            return false;
        };
        if self.expanded.contains(&id) {
            return false;
        }
        if !self.multi {
            self.expanded.clear();
        }
        self.expanded.insert(id);
        tracing::debug!(?id, "item expanded");
        true
    }

    /// Close `id`, or the active item when `None`.
    pub fn close(&mut self, list: &List<K>, id: Option<K>) -> bool {
        self.prune(list);
        let Some(id) = self.resolve(list, id) else {
            return false;
        };
        let changed = self.expanded.remove(&id);
        if changed {
            tracing::debug!(?id, "item collapsed");
        }
        changed
    }

    /// Flip `id`, or the active item when `None`.
    pub fn toggle(&mut self, list: &List<K>, id: Option<K>) -> bool {
        let Some(id) = id.or_else(|| list.active_id()) else {
            return false;
        };
        if self.is_expanded(list, id) {
            self.close(list, Some(id))
        } else {
            self.open(list, Some(id))
        }
    }

    /// Open every expandable item. Multi-expand mode only.
    pub fn open_all(&mut self, list: &List<K>) -> bool {
        if !self.multi {
            return false;
        }
        self.prune(list);
        let mut changed = false;
        for item in list.items() {
            if self.is_expandable(list, item.id) {
                changed |= self.expanded.insert(item.id);
            }
        }
        changed
    }

    /// Close every expandable item.
    pub fn close_all(&mut self, list: &List<K>) -> bool {
        self.prune(list);
        let before = self.expanded.len();
        self.expanded.retain(|&id| !expandable(list, id));
        self.expanded.len() != before
    }

    /// Per-item facade for `id`.
    pub fn control<'a>(&'a mut self, list: &'a List<K>, id: K) -> ExpansionControl<'a, K> {
        ExpansionControl {
            expansion: self,
            list,
            id,
        }
    }

    fn resolve(&self, list: &List<K>, id: Option<K>) -> Option<K> {
        let id = id.or_else(|| list.active_id())?;
        if !self.is_expandable(list, id) {
            tracing::trace!(?id, "expansion change rejected");
            return None;
        }
        Some(id)
    }

    /// Drop ids that are no longer expandable items of `list`.
    ///
    /// Mutations prune on their own. Owners that replace the items call this
    /// right after, so a panel does not reopen when its item is re-added.
    pub fn prune(&mut self, list: &List<K>) {
        let version = list.items_version();
        if self.synced != version {
            self.expanded
                .retain(|&id| list.item(id).is_some_and(|item| item.expandable));
            self.synced = version;
        }
    }
}

/// Expansion state scoped to a single item.
#[derive(Debug)]
pub struct ExpansionControl<'a, K> {
    expansion: &'a mut Expansion<K>,
    list: &'a List<K>,
    id: K,
}

impl<K: Copy + Eq + Hash + Debug> ExpansionControl<'_, K> {
    /// The item this control speaks for.
    pub fn id(&self) -> K {
        self.id
    }

    /// Whether the item is open.
    pub fn is_expanded(&self) -> bool {
        self.expansion.is_expanded(self.list, self.id)
    }

    /// Whether the item may be opened or closed.
    pub fn is_expandable(&self) -> bool {
        self.expansion.is_expandable(self.list, self.id)
    }

    /// Open the item.
    pub fn open(&mut self) -> bool {
        self.expansion.open(self.list, Some(self.id))
    }

    /// Close the item.
    pub fn close(&mut self) -> bool {
        self.expansion.close(self.list, Some(self.id))
    }

    /// Flip the item.
    pub fn toggle(&mut self) -> bool {
        self.expansion.toggle(self.list, Some(self.id))
    }
}

fn expandable<K: Copy + Eq + Hash + Debug>(list: &List<K>, id: K) -> bool {
    !list.config().disabled
        && list
            .item(id)
            .is_some_and(|item| item.expandable && !item.disabled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Item, ListConfig};
    use alloc::vec;
    use alloc::vec::Vec;

    fn collect_expanded(exp: &Expansion<u8>, list: &List<u8>) -> Vec<u8> {
        exp.expanded_ids(list).collect()
    }

    fn list() -> List<u8> {
        List::try_new(
            vec![
                Item::new(1, "One").with_expandable(true),
                Item::new(2, "Two").with_expandable(true),
                Item::new(3, "Three").with_expandable(true).with_disabled(true),
                Item::new(4, "Four"),
            ],
            ListConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn opening_b_closes_a_in_single_mode() {
        let list = list();
        let mut exp = Expansion::new(false);
        assert!(exp.open(&list, Some(1)));
        assert!(exp.open(&list, Some(2)));
        assert!(!exp.is_expanded(&list, 1));
        assert!(exp.is_expanded(&list, 2));
        assert_eq!(collect_expanded(&exp, &list), vec![2]);
    }

    #[test]
    fn multi_mode_is_independent() {
        let list = list();
        let mut exp = Expansion::new(true);
        assert!(exp.open(&list, Some(1)));
        assert!(exp.open(&list, Some(2)));
        assert_eq!(collect_expanded(&exp, &list), vec![1, 2]);
        assert!(exp.toggle(&list, Some(1)));
        assert_eq!(collect_expanded(&exp, &list), vec![2]);
    }

    #[test]
    fn only_expandable_enabled_items_change() {
        let mut list = list();
        let mut exp = Expansion::new(true);
        assert!(!exp.open(&list, Some(3)));
        assert!(!exp.open(&list, Some(4)));
        assert!(exp.open_all(&list));
        assert_eq!(collect_expanded(&exp, &list), vec![1, 2]);

        list.update_config(|c| c.disabled = true);
        assert!(!exp.is_expandable(&list, 1));
        assert!(!exp.close_all(&list));
        assert!(!exp.close(&list, Some(1)));
    }

    #[test]
    fn open_all_requires_multi() {
        let list = list();
        let mut exp = Expansion::new(false);
        assert!(!exp.open_all(&list));
        exp.open(&list, Some(1));
        assert!(exp.close_all(&list));
        assert_eq!(collect_expanded(&exp, &list), Vec::<u8>::new());
    }

    #[test]
    fn defaults_to_active_item() {
        let mut list = list();
        let mut exp = Expansion::new(false);
        assert!(!exp.toggle(&list, None));
        assert!(list.focus(1));
        assert!(exp.toggle(&list, None));
        assert!(exp.is_expanded(&list, 2));
    }

    #[test]
    fn control_forwards_to_shared_state() {
        let list = list();
        let mut exp = Expansion::new(false);
        {
            let mut first = exp.control(&list, 1);
            assert!(first.is_expandable());
            assert!(first.toggle());
            assert!(first.is_expanded());
        }
        let mut second = exp.control(&list, 2);
        assert!(second.open());
        assert!(!exp.is_expanded(&list, 1));
    }

    #[test]
    fn removed_items_are_pruned() {
        let mut list = list();
        let mut exp = Expansion::new(true);
        exp.open_all(&list);
        list.set_items(vec![Item::new(2, "Two").with_expandable(true)])
            .unwrap();
        assert_eq!(collect_expanded(&exp, &list), vec![2]);
        assert!(exp.close(&list, Some(2)));
        list.set_items(vec![
            Item::new(1, "One").with_expandable(true),
            Item::new(2, "Two").with_expandable(true),
        ])
        .unwrap();
        assert!(!exp.is_expanded(&list, 1));
    }

    #[test]
    fn pruned_ids_stay_closed_after_reinsertion() {
        let mut list = list();
        let mut exp = Expansion::new(true);
        assert!(exp.open(&list, Some(1)));
        list.set_items(vec![Item::new(2, "Two").with_expandable(true)])
            .unwrap();
        exp.prune(&list);
        list.set_items(vec![
            Item::new(1, "One").with_expandable(true),
            Item::new(2, "Two").with_expandable(true),
        ])
        .unwrap();
        assert!(!exp.is_expanded(&list, 1));
    }
}
