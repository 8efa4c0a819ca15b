// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation controller: item-to-item movement in index order.
//!
//! Movement is always relative to index order; mapping arrow keys to
//! "previous" and "next" is the job of the widget pattern. Every move goes
//! through [`List::focus`], so navigation never lands on an item that is not
//! focusable and never changes state when it fails.
//!
//! The skip search visits each other item at most once, so a list without any
//! focusable item terminates immediately even when wrapping.

use crate::list::List;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Step {
    Forward,
    Backward,
}

impl<K> List<K> {
    /// Index `next` would move to, without moving.
    pub fn peek_next(&self) -> Option<usize> {
        self.peek(Step::Forward, self.config().wrap)
    }

    /// Index `prev` would move to, without moving.
    pub fn peek_prev(&self) -> Option<usize> {
        self.peek(Step::Backward, self.config().wrap)
    }

    /// [`List::peek_next`] with an explicit wrap setting.
    pub fn peek_next_with_wrap(&self, wrap: bool) -> Option<usize> {
        self.peek(Step::Forward, wrap)
    }

    /// [`List::peek_prev`] with an explicit wrap setting.
    pub fn peek_prev_with_wrap(&self, wrap: bool) -> Option<usize> {
        self.peek(Step::Backward, wrap)
    }

    /// Move to the next focusable item.
    ///
    /// With no active item this moves to the first focusable item.
    pub fn next(&mut self) -> bool {
        self.next_with_wrap(self.config().wrap)
    }

    /// Move to the previous focusable item.
    ///
    /// With no active item this moves to the last focusable item.
    pub fn prev(&mut self) -> bool {
        self.prev_with_wrap(self.config().wrap)
    }

    /// [`List::next`] with an explicit wrap setting.
    pub fn next_with_wrap(&mut self, wrap: bool) -> bool {
        match self.peek(Step::Forward, wrap) {
            Some(index) => self.focus(index),
            None => false,
        }
    }

    /// [`List::prev`] with an explicit wrap setting.
    pub fn prev_with_wrap(&mut self, wrap: bool) -> bool {
        match self.peek(Step::Backward, wrap) {
            Some(index) => self.focus(index),
            None => false,
        }
    }

    /// Move to the first focusable item.
    pub fn first(&mut self) -> bool {
        match self.first_focusable() {
            Some(index) => self.focus(index),
            None => false,
        }
    }

    /// Move to the last focusable item.
    pub fn last(&mut self) -> bool {
        match self.last_focusable() {
            Some(index) => self.focus(index),
            None => false,
        }
    }

    /// Move to the item at `index`; fails if it is not focusable.
    pub fn goto(&mut self, index: usize) -> bool {
        self.focus(index)
    }

    fn peek(&self, step: Step, wrap: bool) -> Option<usize> {
        let len = self.len();
        let Some(start) = self.active.filter(|&i| i < len) else {
            return match step {
                Step::Forward => self.first_focusable(),
                Step::Backward => self.last_focusable(),
            };
        };

        let mut index = start;
        for _ in 1..len {
            index = match step {
                Step::Forward if index + 1 < len => index + 1,
                Step::Forward if wrap => 0,
                Step::Backward if index > 0 => index - 1,
                Step::Backward if wrap => len - 1,
                _ => return None,
            };
            if self.is_focusable(index) {
                return Some(index);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::{Item, List, ListConfig};
    use alloc::vec::Vec;

    fn list(disabled: &[bool], config: ListConfig) -> List<usize> {
        let items: Vec<_> = disabled
            .iter()
            .enumerate()
            .map(|(i, &d)| Item::new(i, "item").with_disabled(d))
            .collect();
        List::try_new(items, config).unwrap()
    }

    #[test]
    fn next_skips_disabled_items() {
        let mut list = list(&[false, true, false], ListConfig::default());
        assert!(list.first());
        assert!(list.next());
        assert_eq!(list.active_index(), Some(2));
        assert!(list.prev());
        assert_eq!(list.active_index(), Some(0));
    }

    #[test]
    fn wrap_returns_to_start_after_n_moves() {
        let mut list = list(&[false, true, false, false], ListConfig::default());
        assert!(list.goto(2));
        for _ in 0..3 {
            assert!(list.next());
        }
        assert_eq!(list.active_index(), Some(2));
    }

    #[test]
    fn no_wrap_stops_at_the_ends() {
        let mut list = list(&[false, false, true], ListConfig::default().with_wrap(false));
        assert!(list.last());
        assert_eq!(list.active_index(), Some(1));
        assert!(!list.next());
        assert_eq!(list.active_index(), Some(1));
        assert!(list.first());
        assert!(!list.prev());
        assert_eq!(list.active_index(), Some(0));
    }

    #[test]
    fn explicit_wrap_override() {
        let mut list = list(&[false, false], ListConfig::default());
        assert!(list.last());
        assert_eq!(list.peek_next_with_wrap(false), None);
        assert!(!list.next_with_wrap(false));
        assert!(list.next_with_wrap(true));
        assert_eq!(list.active_index(), Some(0));
    }

    #[test]
    fn all_disabled_terminates_without_moving() {
        let mut list = list(&[true, true, true], ListConfig::default());
        assert!(!list.next());
        assert!(!list.prev());
        assert!(!list.first());
        assert_eq!(list.active_index(), None);
    }

    #[test]
    fn single_focusable_item_with_wrap_does_not_move() {
        let mut list = list(&[true, false, true], ListConfig::default());
        assert!(list.first());
        assert_eq!(list.peek_next(), None);
        assert!(!list.next());
        assert_eq!(list.active_index(), Some(1));
    }

    #[test]
    fn peek_does_not_mutate() {
        let mut list = list(&[false, false, false], ListConfig::default());
        assert!(list.goto(1));
        assert_eq!(list.peek_next(), Some(2));
        assert_eq!(list.peek_prev(), Some(0));
        assert_eq!(list.active_index(), Some(1));
    }

    #[test]
    fn without_active_item_next_and_prev_pick_the_ends() {
        let mut list = list(&[true, false, false, true], ListConfig::default());
        assert_eq!(list.peek_next(), Some(1));
        assert_eq!(list.peek_prev(), Some(2));
        assert!(list.prev());
        assert_eq!(list.active_index(), Some(2));
    }
}
