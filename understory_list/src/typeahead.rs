// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typeahead controller: incremental, timeout-reset search over item labels.
//!
//! Every keystroke appends a lowercased character to the query and moves the
//! reset deadline to `now + delay`; there is never more than one pending
//! deadline. The query is cleared by the first [`Typeahead::poll`] (or
//! [`Typeahead::search`]) at or after the deadline.
//!
//! The scan starts *after* the anchor: the item that was active when the
//! current query began. It wraps once around the list, and the first item
//! whose label starts with the query wins. Disabled items never match, even
//! when the list keeps them focusable.
//!
//! Pressing the same character repeatedly cycles through the items starting
//! with it: if the repeated query (`"aa"`) matches nothing, the `n`-th press
//! lands on the `n`-th item starting with that character.
//!
//! ```rust
//! use understory_list::{Item, List, ListConfig, Typeahead};
//!
//! let mut list = List::try_new(
//!     vec![Item::new(1, "Apple"), Item::new(2, "Banana"), Item::new(3, "Avocado")],
//!     ListConfig::default(),
//! )
//! .unwrap();
//! let mut typeahead = Typeahead::default();
//!
//! assert!(typeahead.search(&mut list, 'a', 0));
//! assert!(typeahead.search(&mut list, 'a', 100));
//! assert_eq!(list.active_id(), Some(3));
//!
//! // After the delay the query starts over from the new anchor.
//! assert!(typeahead.search(&mut list, 'b', 1_000));
//! assert_eq!(list.active_id(), Some(2));
//! ```

use alloc::string::String;
use core::fmt::Debug;
use core::hash::Hash;

use crate::list::List;

/// Incremental search state.
#[derive(Clone, Debug)]
pub struct Typeahead {
    delay: u64,
    query: String,
    anchor: Option<usize>,
    deadline: Option<u64>,
}

impl Default for Typeahead {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

impl Typeahead {
    /// Reset delay used by [`Typeahead::default`], in milliseconds.
    pub const DEFAULT_DELAY: u64 = 500;

    /// Create a controller that resets `delay` milliseconds after the last key.
    pub fn new(delay: u64) -> Self {
        Self {
            delay,
            query: String::new(),
            anchor: None,
            deadline: None,
        }
    }

    /// Reset delay in milliseconds.
    pub fn delay(&self) -> u64 {
        self.delay
    }

    /// Change the reset delay. Takes effect on the next keystroke.
    pub fn set_delay(&mut self, delay: u64) {
        self.delay = delay;
    }

    /// Current (lowercased) query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// When the pending query expires.
    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Whether a query is in progress at `now`.
    pub fn is_typing(&self, now: u64) -> bool {
        self.deadline.is_some_and(|deadline| now < deadline)
    }

    /// Expire the query if its deadline has passed.
    ///
    /// Returns `true` if the query was reset.
    pub fn poll(&mut self, now: u64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                tracing::trace!(query = %self.query, "typeahead query expired");
                self.cancel();
                true
            }
            _ => false,
        }
    }

    /// Drop the query and the pending deadline.
    pub fn cancel(&mut self) {
        self.query.clear();
        self.anchor = None;
        self.deadline = None;
    }

    /// Feed one character at host time `now`.
    ///
    /// Returns `true` if a matching item was found and made active. A space
    /// only counts when it extends a query already in progress.
    pub fn search<K: Copy + Eq + Hash + Debug>(
        &mut self,
        list: &mut List<K>,
        ch: char,
        now: u64,
    ) -> bool {
        self.poll(now);
        if ch == ' ' && self.query.is_empty() {
            return false;
        }
        if self.query.is_empty() {
            self.anchor = list.active_index();
        }
        self.query.extend(ch.to_lowercase());
        self.deadline = Some(now.saturating_add(self.delay));

        let Some(index) = self.find(list) else {
            tracing::trace!(query = %self.query, "typeahead found no match");
            return false;
        };
        let moved = list.focus(index);
        if moved {
            tracing::debug!(query = %self.query, index, "typeahead match");
        }
        moved
    }

    fn find<K>(&self, list: &List<K>) -> Option<usize> {
        let mut chars = self.query.chars();
        let first = chars.next()?;
        if let Some(index) = self.matches(list, &self.query).next() {
            return Some(index);
        }

        let repeats = self.query.chars().count();
        if repeats > 1 && chars.all(|c| c == first) {
            let mut buf = [0_u8; 4];
            let single: &str = first.encode_utf8(&mut buf);
            let count = self.matches(list, single).count();
            if count > 0 {
                return self.matches(list, single).nth((repeats - 1) % count);
            }
        }
        None
    }

    fn matches<'a, K>(
        &self,
        list: &'a List<K>,
        prefix: &'a str,
    ) -> impl Iterator<Item = usize> + use<'a, K> {
        let len = list.len();
        let start = self.anchor.filter(|&a| a < len).map_or(0, |a| a + 1);
        (start..len).chain(0..start).filter(move |&i| {
            list.is_focusable(i)
                && list
                    .get(i)
                    .is_some_and(|item| !item.disabled && item.label_starts_with(prefix))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Item, ListConfig};
    use alloc::vec;

    fn fruits() -> List<u32> {
        List::try_new(
            vec![
                Item::new(1, "Apple"),
                Item::new(2, "Banana"),
                Item::new(3, "Avocado"),
                Item::new(4, "apricot").with_disabled(true),
                Item::new(5, "Blueberry"),
            ],
            ListConfig::default().with_skip_disabled(false),
        )
        .unwrap()
    }

    #[test]
    fn repeated_letter_cycles_through_matches() {
        let mut list = fruits();
        let mut ta = Typeahead::default();
        assert!(ta.search(&mut list, 'a', 0));
        assert_eq!(list.active_id(), Some(1));
        assert!(ta.search(&mut list, 'a', 100));
        assert_eq!(list.active_id(), Some(3));
        assert!(ta.search(&mut list, 'a', 200));
        assert_eq!(list.active_id(), Some(1));
    }

    #[test]
    fn scan_starts_after_anchor() {
        let mut list = fruits();
        assert!(list.focus(2));
        let mut ta = Typeahead::default();
        assert!(ta.search(&mut list, 'b', 0));
        assert_eq!(list.active_id(), Some(5));
        ta.cancel();
        assert!(ta.search(&mut list, 'b', 0));
        assert_eq!(list.active_id(), Some(2));
    }

    #[test]
    fn multi_character_prefix() {
        let mut list = fruits();
        let mut ta = Typeahead::default();
        assert!(ta.search(&mut list, 'B', 0));
        assert!(ta.search(&mut list, 'l', 10));
        assert_eq!(list.active_id(), Some(5));
        assert_eq!(ta.query(), "bl");
    }

    #[test]
    fn disabled_items_never_match() {
        let mut list = fruits();
        let mut ta = Typeahead::default();
        assert!(ta.search(&mut list, 'a', 0));
        assert_eq!(list.active_id(), Some(1));
        assert!(ta.search(&mut list, 'p', 1));
        assert!(!ta.search(&mut list, 'r', 2));
        assert_eq!(list.active_id(), Some(1));
    }

    #[test]
    fn deadline_is_replaced_and_expires() {
        let mut list = fruits();
        let mut ta = Typeahead::new(300);
        ta.search(&mut list, 'b', 0);
        assert_eq!(ta.deadline(), Some(300));
        ta.search(&mut list, 'a', 200);
        assert_eq!(ta.deadline(), Some(500));
        assert!(ta.is_typing(499));
        assert!(!ta.poll(499));
        assert!(ta.poll(500));
        assert_eq!(ta.query(), "");
        assert!(!ta.is_typing(500));
    }

    #[test]
    fn space_only_extends_a_query() {
        let mut list = List::try_new(
            vec![Item::new(1_u32, "New York"), Item::new(2, "Newark")],
            ListConfig::default(),
        )
        .unwrap();
        let mut ta = Typeahead::default();
        assert!(!ta.search(&mut list, ' ', 0));
        assert_eq!(ta.deadline(), None);
        for (t, ch) in "new y".chars().enumerate() {
            ta.search(&mut list, ch, t as u64);
        }
        assert_eq!(list.active_id(), Some(1));
    }

    #[test]
    fn no_match_leaves_active_item() {
        let mut list = fruits();
        assert!(list.focus(1));
        let mut ta = Typeahead::default();
        assert!(!ta.search(&mut list, 'z', 0));
        assert_eq!(list.active_id(), Some(2));
    }
}
