// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Authoring problems reported by `validate()`.

use thiserror::Error;

/// A configuration problem that makes a widget inaccessible.
///
/// Violations are data for authoring tools. The `Display` text is the
/// human-readable message.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Violation {
    /// Nothing in the widget can receive keyboard focus.
    #[error("no focusable {0}")]
    NoFocusableItem(&'static str),
    /// A single-select widget has more than one selected item.
    #[error("{count} items selected in a single-select {widget}")]
    MultipleSelection {
        /// Kind of widget.
        widget: &'static str,
        /// Number of selected items.
        count: usize,
    },
    /// The selected item is disabled while disabled items are skipped, so the
    /// selection cannot be reached from the keyboard.
    #[error("the selected {0} is disabled and skipped by keyboard navigation")]
    SelectedDisabled(&'static str),
}
