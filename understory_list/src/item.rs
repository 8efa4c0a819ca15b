// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item records owned by a [`List`](crate::List).

use alloc::string::String;

/// A single item of a collection.
///
/// Items are plain records owned by their [`List`](crate::List). They carry no
/// back-reference to the list; the item's index is its position in
/// [`List::items`](crate::List::items) and is resolved through the list.
///
/// The `id` is the handle the host adapter uses to find the rendered element
/// for this item. It doubles as the item's value for selection and expansion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item<K> {
    /// Identity of the item, unique within its list.
    pub id: K,
    /// Text used for typeahead search and combobox filtering.
    pub label: String,
    /// Disabled items cannot be selected or expanded and are skipped by
    /// navigation when the list skips disabled items.
    pub disabled: bool,
    /// Whether the item can be expanded (disclosure, accordion trigger, tab panel).
    pub expandable: bool,
}

impl<K> Item<K> {
    /// An enabled, non-expandable item.
    pub fn new(id: K, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            disabled: false,
            expandable: false,
        }
    }

    /// Set the disabled flag.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the expandable flag.
    #[must_use]
    pub fn with_expandable(mut self, expandable: bool) -> Self {
        self.expandable = expandable;
        self
    }

    /// Case-insensitive prefix test against the label.
    ///
    /// `prefix` is expected to be lowercase already.
    pub fn label_starts_with(&self, prefix: &str) -> bool {
        let mut label = self.label.chars().flat_map(char::to_lowercase);
        prefix.chars().all(|c| label.next() == Some(c))
    }
}
