// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Patterns: headless state machines for composite widgets.
//!
//! Each pattern owns an [`understory_list::List`] plus the controllers it
//! needs and turns raw input into state changes:
//!
//! - [`Listbox`]: single or multiple selection, range selection, typeahead.
//! - [`Combobox`]: a text input driving a popup through [`PopupControls`].
//! - [`Accordion`]: triggers disclosing panels.
//! - [`Tabs`]: one selected tab with one visible panel.
//! - [`RadioGroup`]: exactly one checked radio once a choice is made.
//! - [`Toolbar`]: widgets and nested [`WidgetGroup`]s on one roving tab stop.
//!
//! Patterns never render. The host forwards events (`on_keydown`,
//! `on_pointerdown`, `on_focus`, and for the combobox `on_input`) and reads
//! derived state (tab indices, selection, expansion, active descendant) back
//! into its element tree. Item ids are the handles the host maps to its own
//! elements. An entry point returns `true` when it consumed the event, in
//! which case the event has been marked default-prevented and
//! propagation-stopped.
//!
//! `validate()` reports [`Violation`]s such as a group with no focusable item.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_event_manager::{KeyboardEvent, PointerEvent};
//! use understory_list::{Item, ListConfig};
//! use understory_patterns::{Listbox, ListboxConfig};
//!
//! let mut listbox = Listbox::new(
//!     vec![
//!         Item::new(1, "Apple"),
//!         Item::new(2, "Banana"),
//!         Item::new(3, "Cherry"),
//!     ],
//!     ListConfig::default(),
//!     ListboxConfig::default(),
//! )
//! .unwrap();
//! listbox.set_default_state();
//!
//! let mut down = KeyboardEvent::new("ArrowDown");
//! assert!(listbox.on_keydown(&mut down));
//! assert!(down.default_prevented());
//! // Selection follows focus by default.
//! assert_eq!(listbox.selected_ids(), vec![2]);
//!
//! assert!(listbox.on_pointerdown(&mut PointerEvent::new(Some(3))));
//! assert_eq!(listbox.selected_ids(), vec![3]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod accordion;
mod combobox;
mod keys;
mod listbox;
mod radio_group;
mod tabs;
mod toolbar;
mod violation;

pub use accordion::{Accordion, AccordionConfig};
pub use combobox::{
    Combobox, ComboboxConfig, ComboboxTarget, FilterMode, InputKind, PopupControls,
};
pub use keys::{cross_next_key, cross_prev_key, next_key, prev_key};
pub use listbox::{Listbox, ListboxConfig};
pub use radio_group::{RadioGroup, RadioGroupConfig};
pub use tabs::{Tabs, TabsConfig};
pub use toolbar::{Toolbar, ToolbarTarget, WidgetGroup};
pub use violation::Violation;
