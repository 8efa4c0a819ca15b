// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory List: headless behaviors for ordered collections of items.
//!
//! A [`List`] owns an ordered sequence of [`Item`]s, its [`ListConfig`], and
//! the single *active* item. The behaviors layered on it are:
//!
//! - **Focus** ([`List::focus`], [`List::item_tabindex`],
//!   [`List::active_descendant`]): which item is active and how focus is
//!   distributed ([`FocusMode::Roving`] or [`FocusMode::ActiveDescendant`]).
//! - **Navigation** ([`List::next`], [`List::prev`], [`List::first`],
//!   [`List::last`], [`List::goto`]): movement in index order, honoring wrap
//!   and disabled-item skipping.
//! - **Selection** ([`Selection`]): single or multiple selection, optionally
//!   following focus.
//! - **Expansion** ([`Expansion`], [`ExpansionControl`]): open/closed state of
//!   disclosure-style items.
//! - **Typeahead** ([`Typeahead`]): incremental label search with a reset
//!   deadline.
//!
//! Focus and navigation are the only writers of the active item. Selection,
//! expansion and typeahead keep their own state and take the list as a
//! parameter, so a widget can hold all of them side by side without shared
//! ownership.
//!
//! Nothing in this crate reads a clock. Time-dependent operations take the
//! host's timestamp in milliseconds.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_list::{Item, List, ListConfig, Selection};
//!
//! let mut list = List::try_new(
//!     vec![
//!         Item::new('a', "Alpha"),
//!         Item::new('b', "Bravo").with_disabled(true),
//!         Item::new('c', "Charlie"),
//!     ],
//!     ListConfig::default(),
//! )
//! .unwrap();
//! let mut selection = Selection::new(false, true);
//!
//! assert!(list.first());
//! assert!(list.next());
//! // The disabled item is skipped.
//! assert_eq!(list.active_id(), Some('c'));
//! selection.follow(&list);
//! assert!(selection.is_selected(&list, 'c'));
//!
//! // Wrapping is on by default.
//! assert!(list.next());
//! assert_eq!(list.active_id(), Some('a'));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod expansion;
mod focus;
mod item;
mod list;
mod navigation;
mod selection;
mod typeahead;

pub use expansion::{Expansion, ExpansionControl};
pub use focus::TabIndex;
pub use item::Item;
pub use list::{FocusMode, List, ListConfig, ListError, Orientation, TextDirection};
pub use selection::Selection;
pub use typeahead::Typeahead;
