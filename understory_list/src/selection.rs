// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection controller: single or multiple selection over a [`List`].
//!
//! ## Modes
//!
//! - **Single**: selecting an item deselects every other item. Deselecting the
//!   only selected item leaves the selection empty; widgets that require one
//!   selected item (radio groups, tabs) enforce that themselves.
//! - **Multi**: items toggle independently, and a range can be extended from
//!   an anchor to the active item.
//!
//! With **follow focus** enabled the owning pattern calls
//! [`Selection::follow`] after every successful navigation; the newly active
//! item replaces the selection in single mode and is added to it in multi
//! mode.
//!
//! ## Membership
//!
//! Selected ids always refer to items in the list. Reads ignore ids whose item
//! is gone, and the first mutation after the list's items changed prunes them.
//!
//! User operations (`select`, `deselect`, `toggle`, ranges, `*_all`) never
//! change the state of a disabled item, or of any item while the list is
//! disabled. [`Selection::set_selected`] is the programmatic escape hatch.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use understory_signal::Version;

use crate::item::Item;
use crate::list::List;

/// Selected ids of a [`List`] plus the selection mode.
#[derive(Clone, Debug)]
pub struct Selection<K> {
    values: Vec<K>,
    multi: bool,
    follow_focus: bool,
    anchor: Option<K>,
    range_end: Option<K>,
    synced: Version,
}

impl<K> Default for Selection<K> {
    fn default() -> Self {
        Self::new(false, false)
    }
}

impl<K> Selection<K> {
    /// Create an empty selection.
    pub fn new(multi: bool, follow_focus: bool) -> Self {
        Self {
            values: Vec::new(),
            multi,
            follow_focus,
            anchor: None,
            range_end: None,
            synced: Version::INITIAL,
        }
    }

    /// Whether several items may be selected.
    pub fn is_multi(&self) -> bool {
        self.multi
    }

    /// Whether navigation drives selection.
    pub fn follows_focus(&self) -> bool {
        self.follow_focus
    }

    /// Enable or disable follow-focus selection.
    pub fn set_follow_focus(&mut self, follow_focus: bool) {
        self.follow_focus = follow_focus;
    }

    /// Switch between single and multi mode.
    ///
    /// Switching to single mode keeps only the first selected id.
    pub fn set_multi(&mut self, multi: bool) {
        self.multi = multi;
        if !multi {
            self.values.truncate(1);
        }
    }
}

impl<K: Copy + Eq + Hash + Debug> Selection<K> {
    /// Selected ids that are still members of `list`, in selection order.
    pub fn selected_ids<'a>(&'a self, list: &'a List<K>) -> impl Iterator<Item = K> + 'a {
        self.values
            .iter()
            .copied()
            .filter(|&id| list.index_of(id).is_some())
    }

    /// The first selected item, for single-select widgets.
    pub fn selected_item<'a>(&self, list: &'a List<K>) -> Option<&'a Item<K>> {
        self.values.iter().find_map(|&id| list.item(id))
    }

    /// Number of selected items in `list`.
    pub fn len(&self, list: &List<K>) -> usize {
        self.selected_ids(list).count()
    }

    /// Whether nothing in `list` is selected.
    pub fn is_empty(&self, list: &List<K>) -> bool {
        self.selected_ids(list).next().is_none()
    }

    /// Whether `id` is selected and still in `list`.
    pub fn is_selected(&self, list: &List<K>, id: K) -> bool {
        self.values.contains(&id) && list.index_of(id).is_some()
    }

    /// Replace the selection programmatically.
    ///
    /// Ids not in `list` are dropped; disabled items are accepted. In single
    /// mode only the first id is kept.
    pub fn set_selected(&mut self, list: &List<K>, ids: impl IntoIterator<Item = K>) {
        self.values.clear();
        for id in ids {
            if list.index_of(id).is_some() && !self.values.contains(&id) {
                self.values.push(id);
                if !self.multi {
                    break;
                }
            }
        }
        self.synced = list.items_version();
        tracing::debug!(selected = ?self.values, "selection replaced");
    }

    /// Clear everything, including disabled items and the range anchor.
    pub fn clear(&mut self) {
        self.values.clear();
        self.anchor = None;
        self.range_end = None;
    }

    /// Select `id`, or the active item when `None`.
    ///
    /// Returns `true` if the selection changed.
    pub fn select(&mut self, list: &List<K>, id: Option<K>) -> bool {
        self.prune(list);
        let Some(id) = self.resolve(list, id) else {
            return false;
        };
        self.anchor = Some(id);
        self.range_end = None;
        self.insert(id)
    }

    /// Deselect `id`, or the active item when `None`.
    pub fn deselect(&mut self, list: &List<K>, id: Option<K>) -> bool {
        self.prune(list);
        let Some(id) = self.resolve(list, id) else {
            return false;
        };
        self.remove(id)
    }

    /// Flip the state of `id`, or of the active item when `None`.
    pub fn toggle(&mut self, list: &List<K>, id: Option<K>) -> bool {
        let Some(id) = id.or_else(|| list.active_id()) else {
            return false;
        };
        if self.is_selected(list, id) {
            self.deselect(list, Some(id))
        } else {
            self.select(list, Some(id))
        }
    }

    /// Make `id` (or the active item) the only selected item.
    pub fn select_one(&mut self, list: &List<K>, id: Option<K>) -> bool {
        self.prune(list);
        let Some(id) = self.resolve(list, id) else {
            return false;
        };
        if self.values.len() == 1 && self.values[0] == id {
            return false;
        }
        self.deselect_all(list);
        self.select(list, Some(id));
        true
    }

    /// Deselect `id` if selected, otherwise make it the only selected item.
    pub fn toggle_one(&mut self, list: &List<K>, id: Option<K>) -> bool {
        let Some(id) = id.or_else(|| list.active_id()) else {
            return false;
        };
        if self.is_selected(list, id) {
            self.deselect(list, Some(id))
        } else {
            self.select_one(list, Some(id))
        }
    }

    /// Select every enabled item. Multi mode only.
    pub fn select_all(&mut self, list: &List<K>) -> bool {
        if !self.multi || list.config().disabled {
            return false;
        }
        self.prune(list);
        let mut changed = false;
        for item in list.items().iter().filter(|item| !item.disabled) {
            changed |= self.insert(item.id);
        }
        changed
    }

    /// Deselect every enabled item.
    pub fn deselect_all(&mut self, list: &List<K>) -> bool {
        if list.config().disabled {
            return false;
        }
        self.prune(list);
        let before = self.values.len();
        self.values
            .retain(|&id| list.item(id).is_some_and(|item| item.disabled));
        let changed = self.values.len() != before;
        if changed {
            tracing::debug!(selected = ?self.values, "selection cleared");
        }
        changed
    }

    /// Deselect all if every enabled item is selected, otherwise select all.
    pub fn toggle_all(&mut self, list: &List<K>) -> bool {
        let all_selected = list
            .items()
            .iter()
            .filter(|item| !item.disabled)
            .all(|item| self.values.contains(&item.id));
        if all_selected {
            self.deselect_all(list)
        } else {
            self.select_all(list)
        }
    }

    /// Start a range at `anchor`, or at the active item when `None`.
    pub fn begin_range_selection(&mut self, list: &List<K>, anchor: Option<usize>) {
        let anchor = anchor.or_else(|| list.active_index());
        self.anchor = anchor.and_then(|i| list.get(i)).map(|item| item.id);
        self.range_end = None;
    }

    /// Select every item between the range anchor and the active item.
    ///
    /// Items that were covered by the previous extent of the range but are
    /// outside the new one are deselected. Without an anchor the range starts
    /// at the previously active item. In single mode this selects the active
    /// item.
    pub fn select_range(&mut self, list: &List<K>) -> bool {
        let Some(active) = list.active_index() else {
            return false;
        };
        if !self.multi {
            return self.select(list, None);
        }
        if list.config().disabled {
            return false;
        }
        self.prune(list);

        let start = match self.anchor.and_then(|id| list.index_of(id)) {
            Some(start) => start,
            None => {
                let start = list.previous_index().unwrap_or(active);
                self.anchor = list.get(start).map(|item| item.id);
                start
            }
        };
        let end = self
            .range_end
            .and_then(|id| list.index_of(id))
            .unwrap_or(start);

        let mut changed = false;
        for index in span(start, end) {
            if !span(start, active).contains(&index) {
                changed |= self.remove_enabled(list, index);
            }
        }
        for index in span(start, active) {
            if list.get(index).is_some_and(|item| !item.disabled) {
                changed |= self.insert(list.items()[index].id);
            }
        }
        self.range_end = list.get(active).map(|item| item.id);
        changed
    }

    /// Apply follow-focus selection to the active item.
    ///
    /// No-op unless follow focus is enabled.
    pub fn follow(&mut self, list: &List<K>) -> bool {
        if !self.follow_focus {
            return false;
        }
        if self.multi {
            self.select(list, None)
        } else {
            self.select_one(list, None)
        }
    }

    fn resolve(&self, list: &List<K>, id: Option<K>) -> Option<K> {
        let id = id.or_else(|| list.active_id())?;
        let item = list.item(id)?;
        if item.disabled || list.config().disabled {
            tracing::trace!(?id, "selection change rejected");
            return None;
        }
        Some(id)
    }

    fn insert(&mut self, id: K) -> bool {
        if self.values.contains(&id) {
            return false;
        }
        if !self.multi {
            self.values.clear();
        }
        self.values.push(id);
        tracing::debug!(?id, selected = ?self.values, "item selected");
        true
    }

    fn remove(&mut self, id: K) -> bool {
        let before = self.values.len();
        self.values.retain(|&v| v != id);
        let changed = self.values.len() != before;
        if changed {
            tracing::debug!(?id, selected = ?self.values, "item deselected");
        }
        changed
    }

    fn remove_enabled(&mut self, list: &List<K>, index: usize) -> bool {
        match list.get(index) {
            Some(item) if !item.disabled => self.remove(item.id),
            _ => false,
        }
    }

    /// Drop ids that are no longer in `list`.
    ///
    /// Mutations prune on their own. Owners that replace the items call this
    /// right after, so an id that is removed and later re-added does not come
    /// back selected.
    pub fn prune(&mut self, list: &List<K>) {
        let version = list.items_version();
        if self.synced == version {
            return;
        }
        self.values.retain(|&id| list.index_of(id).is_some());
        if self.anchor.is_some_and(|id| list.index_of(id).is_none()) {
            self.anchor = None;
        }
        if self.range_end.is_some_and(|id| list.index_of(id).is_none()) {
            self.range_end = None;
        }
        self.synced = version;
    }
}

fn span(a: usize, b: usize) -> core::ops::RangeInclusive<usize> {
    a.min(b)..=a.max(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ListConfig;
    use alloc::vec;

    fn list() -> List<char> {
        List::try_new(
            vec![
                Item::new('a', "Alpha"),
                Item::new('b', "Bravo"),
                Item::new('c', "Charlie").with_disabled(true),
                Item::new('d', "Delta"),
                Item::new('e', "Echo"),
            ],
            ListConfig::default(),
        )
        .unwrap()
    }

    fn ids(selection: &Selection<char>, list: &List<char>) -> Vec<char> {
        selection.selected_ids(list).collect()
    }

    #[test]
    fn single_mode_replaces_selection() {
        let list = list();
        let mut sel = Selection::new(false, false);
        assert!(sel.select(&list, Some('a')));
        assert!(sel.select(&list, Some('b')));
        assert_eq!(ids(&sel, &list), vec!['b']);
        assert!(sel.deselect(&list, Some('b')));
        assert!(sel.is_empty(&list));
    }

    #[test]
    fn multi_mode_toggles_independently() {
        let list = list();
        let mut sel = Selection::new(true, false);
        assert!(sel.toggle(&list, Some('a')));
        assert!(sel.toggle(&list, Some('d')));
        assert_eq!(ids(&sel, &list), vec!['a', 'd']);
        assert!(sel.toggle(&list, Some('a')));
        assert_eq!(ids(&sel, &list), vec!['d']);
    }

    #[test]
    fn disabled_items_are_never_touched() {
        let list = list();
        let mut sel = Selection::new(true, false);
        assert!(!sel.select(&list, Some('c')));
        sel.set_selected(&list, ['c', 'a']);
        assert!(!sel.deselect(&list, Some('c')));
        assert!(sel.deselect_all(&list));
        assert_eq!(ids(&sel, &list), vec!['c']);
    }

    #[test]
    fn defaults_to_active_item() {
        let mut list = list();
        let mut sel = Selection::new(false, false);
        assert!(!sel.select(&list, None));
        assert!(list.focus(3));
        assert!(sel.select(&list, None));
        assert_eq!(sel.selected_item(&list).map(|i| i.id), Some('d'));
    }

    #[test]
    fn toggle_all_skips_disabled() {
        let list = list();
        let mut sel = Selection::new(true, false);
        assert!(sel.toggle_all(&list));
        assert_eq!(ids(&sel, &list), vec!['a', 'b', 'd', 'e']);
        assert!(sel.toggle_all(&list));
        assert!(sel.is_empty(&list));
    }

    #[test]
    fn select_all_requires_multi() {
        let list = list();
        let mut sel = Selection::new(false, false);
        assert!(!sel.select_all(&list));
    }

    #[test]
    fn range_shrinks_when_active_moves_back() {
        let mut list = list();
        let mut sel = Selection::new(true, false);
        assert!(list.focus(0));
        sel.select(&list, None);
        assert!(list.focus(4));
        assert!(sel.select_range(&list));
        assert_eq!(ids(&sel, &list), vec!['a', 'b', 'd', 'e']);
        assert!(list.focus(1));
        assert!(sel.select_range(&list));
        assert_eq!(ids(&sel, &list), vec!['a', 'b']);
    }

    #[test]
    fn range_without_anchor_starts_at_previous_active() {
        let mut list = list();
        let mut sel = Selection::new(true, false);
        assert!(list.focus(1));
        assert!(list.focus(3));
        assert!(sel.select_range(&list));
        assert_eq!(ids(&sel, &list), vec!['b', 'd']);
    }

    #[test]
    fn follow_focus_replaces_in_single_and_adds_in_multi() {
        let mut list = list();
        let mut single = Selection::new(false, true);
        let mut multi = Selection::new(true, true);
        for index in [0, 1] {
            assert!(list.focus(index));
            single.follow(&list);
            multi.follow(&list);
        }
        assert_eq!(ids(&single, &list), vec!['b']);
        assert_eq!(ids(&multi, &list), vec!['a', 'b']);

        let mut explicit = Selection::new(false, false);
        assert!(!explicit.follow(&list));
    }

    #[test]
    fn removed_items_are_pruned() {
        let mut list = list();
        let mut sel = Selection::new(true, false);
        sel.select(&list, Some('a'));
        sel.select(&list, Some('b'));
        list.set_items(vec![Item::new('b', "Bravo"), Item::new('z', "Zulu")])
            .unwrap();
        assert_eq!(ids(&sel, &list), vec!['b']);
        assert!(!sel.is_selected(&list, 'a'));
        sel.select(&list, Some('z'));
        // Reinserting 'a' must not resurrect the stale selection.
        list.set_items(vec![Item::new('a', "Alpha"), Item::new('z', "Zulu")])
            .unwrap();
        assert_eq!(ids(&sel, &list), vec!['z']);
    }

    #[test]
    fn pruned_ids_stay_gone_after_reinsertion() {
        let mut list = list();
        let mut sel = Selection::new(true, false);
        sel.select(&list, Some('a'));
        list.set_items(vec![Item::new('b', "Bravo")]).unwrap();
        sel.prune(&list);
        list.set_items(vec![Item::new('a', "Alpha"), Item::new('b', "Bravo")])
            .unwrap();
        assert!(!sel.is_selected(&list, 'a'));
        assert!(sel.is_empty(&list));
    }

    #[test]
    fn switching_to_single_keeps_first() {
        let list = list();
        let mut sel = Selection::new(true, false);
        sel.set_selected(&list, ['d', 'a']);
        sel.set_multi(false);
        assert_eq!(ids(&sel, &list), vec!['d']);
    }
}
