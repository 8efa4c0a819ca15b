// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Combobox: a text input that controls a popup of options.
//!
//! The combobox is a two-state machine, closed and open. It drives its popup
//! through the [`PopupControls`] seam, which [`Listbox`](crate::Listbox)
//! implements. The popup is always switched to active-descendant focus so
//! the input keeps host focus.
//!
//! ## Filter modes
//!
//! - [`FilterMode::Manual`]: typing never filters or moves the popup.
//! - [`FilterMode::AutoSelect`]: the options are narrowed to those starting
//!   with the input and the first one becomes the tentative choice, committed
//!   on confirm or when focus leaves.
//! - [`FilterMode::Highlight`]: like auto-select, and the host may render the
//!   rest of the tentative option's label inline ([`Combobox::completion`]).
//!
//! In every mode the committed [`Combobox::value`] only changes on `Enter`,
//! a click on an option, or (in the filtering modes) when focus leaves.
//! Deleting text never re-triggers the tentative choice.
//!
//! ## Keys
//!
//! | state | key | effect |
//! |---|---|---|
//! | closed | `ArrowDown` | open on the first option |
//! | closed | `ArrowUp` | open on the last option |
//! | closed | `Alt`+`ArrowDown` | open without moving |
//! | closed | `Escape` | clear the input and the value |
//! | open | `ArrowDown`/`ArrowUp` | move through the options |
//! | open | `Enter`, `Alt`+`ArrowUp` | commit and close |
//! | open | `Escape` | close |
//! | open | `Tab` | as focus leaving (not prevented) |

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use understory_event_manager::{
    HandlerOptions, KeyboardEvent, KeyboardEventManager, ModifierMatch, Modifiers, PointerEvent,
    PointerEventManager, keys,
};
use understory_list::{FocusMode, Item, List, ListError};
use understory_signal::{Memo, Signal, Version};

/// What a combobox needs from its popup.
pub trait PopupControls<K> {
    /// The options currently shown.
    fn list(&self) -> &List<K>;
    /// Replace the options currently shown.
    fn set_options(&mut self, items: Vec<Item<K>>) -> Result<(), ListError>;
    /// Switch the popup's focus strategy.
    fn set_focus_mode(&mut self, mode: FocusMode);
    /// Activate the first option.
    fn first(&mut self) -> bool;
    /// Activate the last option.
    fn last(&mut self) -> bool;
    /// Activate the next option.
    fn next(&mut self) -> bool;
    /// Activate the previous option.
    fn prev(&mut self) -> bool;
    /// Activate option `id`.
    fn focus(&mut self, id: K) -> bool;
    /// Clear the active option.
    fn unfocus(&mut self);
    /// Select option `id`.
    fn select(&mut self, id: K) -> bool;
    /// Drop the popup's selection.
    fn clear_selection(&mut self);
    /// Selected options.
    fn selected(&self) -> Vec<K>;

    /// The active option.
    fn active_id(&self) -> Option<K>
    where
        K: Copy,
    {
        self.list().active_item().map(|item| item.id)
    }
}

/// How typing affects the popup.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FilterMode {
    /// No filtering and no tentative choice.
    #[default]
    Manual,
    /// Filter by prefix and tentatively choose the first match.
    AutoSelect,
    /// Filter by prefix, tentatively choose the first match, and expose the
    /// inline completion.
    Highlight,
}

/// Behavior switches of a [`Combobox`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ComboboxConfig {
    /// Effect of typing.
    pub filter_mode: FilterMode,
    /// The popup can be browsed but the value cannot change.
    pub readonly: bool,
    /// The combobox ignores all input.
    pub disabled: bool,
}

impl ComboboxConfig {
    /// Set the filter mode.
    #[must_use]
    pub fn with_filter_mode(mut self, filter_mode: FilterMode) -> Self {
        self.filter_mode = filter_mode;
        self
    }
}

/// Kind of text edit, as reported by the host's input event.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Text was typed or pasted.
    #[default]
    Insert,
    /// Text was deleted.
    Delete,
}

/// What a pointer event on a combobox hit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ComboboxTarget<K> {
    /// The text input.
    Input,
    /// An option in the popup.
    Option(K),
    /// Anything outside the combobox and its popup.
    Outside,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Seed {
    Keep,
    First,
    Last,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum KeyAction {
    Open(Seed),
    Next,
    Prev,
    Commit,
    Close,
    Clear,
    Leave,
}

/// Combobox state machine over popup `P`.
#[derive(Debug)]
pub struct Combobox<K, P> {
    popup: P,
    options: Signal<Vec<Item<K>>>,
    input: Signal<String>,
    filtered: Memo<Vec<Item<K>>>,
    popup_synced: Option<(Version, Version, FilterMode)>,
    config: ComboboxConfig,
    expanded: bool,
    value: Option<K>,
    deleting: bool,
}

impl<K, P> Combobox<K, P> {
    /// Behavior switches.
    pub fn config(&self) -> &ComboboxConfig {
        &self.config
    }

    /// The popup.
    pub fn popup(&self) -> &P {
        &self.popup
    }

    /// Whether the popup is open (`aria-expanded`).
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Text of the input.
    pub fn input_value(&self) -> &str {
        self.input.get()
    }

    /// Whether the last edit deleted text.
    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// All options, filtered or not.
    pub fn options(&self) -> &[Item<K>] {
        self.options.get()
    }
}

impl<K: Copy + Eq + Hash + Debug, P: PopupControls<K>> Combobox<K, P> {
    /// Create a closed combobox over `options`.
    pub fn new(
        mut popup: P,
        options: Vec<Item<K>>,
        config: ComboboxConfig,
    ) -> Result<Self, ListError> {
        popup.set_options(options.clone())?;
        popup.set_focus_mode(FocusMode::ActiveDescendant);
        Ok(Self {
            popup,
            options: Signal::new(options),
            input: Signal::new(String::new()),
            filtered: Memo::new(),
            popup_synced: None,
            config,
            expanded: false,
            value: None,
            deleting: false,
        })
    }

    /// Replace the options.
    pub fn set_options(&mut self, options: Vec<Item<K>>) -> Result<(), ListError> {
        self.popup.set_options(options.clone())?;
        self.options.set(options);
        self.filtered.invalidate();
        self.sync_popup();
        if self.value.is_some_and(|id| !self.options.get().iter().any(|o| o.id == id)) {
            self.value = None;
        }
        Ok(())
    }

    /// Replace the behavior switches.
    pub fn set_config(&mut self, config: ComboboxConfig) {
        if config.filter_mode != self.config.filter_mode {
            self.filtered.invalidate();
        }
        self.config = config;
        if config.disabled {
            self.close();
        }
        self.sync_popup();
    }

    /// The committed option.
    pub fn value(&self) -> Option<K> {
        self.value
    }

    /// Option referenced by `aria-activedescendant` on the input.
    pub fn active_descendant(&self) -> Option<K> {
        if self.expanded {
            self.popup.active_id()
        } else {
            None
        }
    }

    /// Options that match the input in the filtering modes; all options in
    /// manual mode.
    pub fn visible_options(&self) -> Vec<Item<K>> {
        let deps = [self.options.version(), self.input.version()];
        self.filtered.get(&deps, || match self.config.filter_mode {
            FilterMode::Manual => self.options.get().clone(),
            FilterMode::AutoSelect | FilterMode::Highlight => {
                let prefix = self.input.get().to_lowercase();
                self.options
                    .get()
                    .iter()
                    .filter(|item| item.label_starts_with(&prefix))
                    .cloned()
                    .collect()
            }
        })
    }

    /// Rest of the tentative option's label after the typed text.
    ///
    /// Only in highlight mode while the popup is open and the last edit was
    /// not a deletion.
    pub fn completion(&self) -> Option<&str> {
        if self.config.filter_mode != FilterMode::Highlight || !self.expanded || self.deleting {
            return None;
        }
        let input = self.input.get();
        let item = self.popup.list().active_item()?;
        if input.is_empty() || !item.label_starts_with(&input.to_lowercase()) {
            return None;
        }
        let typed = input.chars().count();
        let split = item
            .label
            .char_indices()
            .nth(typed)
            .map_or(item.label.len(), |(offset, _)| offset);
        let rest = &item.label[split..];
        (!rest.is_empty()).then_some(rest)
    }

    /// Open the popup without moving its active option.
    pub fn open(&mut self) -> bool {
        self.open_with(Seed::Keep)
    }

    /// Close the popup.
    pub fn close(&mut self) -> bool {
        if !self.expanded {
            return false;
        }
        self.expanded = false;
        self.popup.unfocus();
        tracing::debug!("combobox closed");
        true
    }

    /// Commit the popup's active option and close.
    pub fn commit(&mut self) -> bool {
        let committed = self.commit_active();
        self.close();
        committed
    }

    /// The input text changed to `value`.
    pub fn on_input(&mut self, value: &str, kind: InputKind) -> bool {
        if self.config.disabled || self.config.readonly {
            return false;
        }
        self.deleting = kind == InputKind::Delete;
        self.input.set(String::from(value));
        if !self.expanded {
            self.expanded = true;
            tracing::debug!("combobox opened by typing");
        }
        self.sync_popup();

        if value.is_empty() {
            self.popup.unfocus();
            return true;
        }
        match self.config.filter_mode {
            FilterMode::Manual => {}
            FilterMode::AutoSelect | FilterMode::Highlight => {
                if self.deleting {
                    self.popup.unfocus();
                } else {
                    self.popup.first();
                }
            }
        }
        true
    }

    /// Interpret a key press on the input. Returns `true` if handled.
    pub fn on_keydown(&mut self, event: &mut KeyboardEvent) -> bool {
        if self.config.disabled {
            return false;
        }
        let manager = self.keydown_manager();
        let Some(&action) = manager.handle(event) else {
            return false;
        };
        match action {
            KeyAction::Open(seed) => {
                self.open_with(seed);
            }
            KeyAction::Next => {
                self.popup.next();
            }
            KeyAction::Prev => {
                self.popup.prev();
            }
            KeyAction::Commit => {
                self.commit();
            }
            KeyAction::Close => {
                self.close();
            }
            KeyAction::Clear => self.clear(),
            KeyAction::Leave => {
                self.on_focus_out();
            }
        }
        true
    }

    /// Pointer pressed. A press outside behaves like focus leaving.
    pub fn on_pointerdown(&mut self, event: &mut PointerEvent<ComboboxTarget<K>>) -> bool {
        match event.target {
            ComboboxTarget::Outside => self.on_focus_out(),
            ComboboxTarget::Input | ComboboxTarget::Option(_) => false,
        }
    }

    /// Pointer released. On the input this toggles the popup; on an option it
    /// commits that option.
    pub fn on_pointerup(&mut self, event: &mut PointerEvent<ComboboxTarget<K>>) -> bool {
        if self.config.disabled {
            return false;
        }
        let manager = PointerEventManager::new().on(());
        if manager.handle(event).is_none() {
            return false;
        }
        match event.target {
            ComboboxTarget::Input => {
                if self.expanded {
                    self.close()
                } else {
                    self.open()
                }
            }
            ComboboxTarget::Option(id) => {
                if !self.expanded || !self.popup.focus(id) {
                    return false;
                }
                self.commit()
            }
            ComboboxTarget::Outside => false,
        }
    }

    /// Focus left the combobox and its popup.
    ///
    /// In the filtering modes the tentative option is committed unless the
    /// last edit was a deletion.
    pub fn on_focus_out(&mut self) -> bool {
        if !self.expanded {
            return false;
        }
        if self.config.filter_mode != FilterMode::Manual && !self.deleting {
            self.commit_active();
        }
        self.close()
    }

    fn keydown_manager(&self) -> KeyboardEventManager<KeyAction> {
        if !self.expanded {
            return KeyboardEventManager::new()
                .on(keys::ARROW_DOWN, KeyAction::Open(Seed::First))
                .on(keys::ARROW_UP, KeyAction::Open(Seed::Last))
                .on_modifiers(Modifiers::ALT, keys::ARROW_DOWN, KeyAction::Open(Seed::Keep))
                .on(keys::ESCAPE, KeyAction::Clear);
        }
        KeyboardEventManager::new()
            .on(keys::ARROW_DOWN, KeyAction::Next)
            .on(keys::ARROW_UP, KeyAction::Prev)
            .on(keys::ENTER, KeyAction::Commit)
            .on_modifiers(Modifiers::ALT, keys::ARROW_UP, KeyAction::Commit)
            .on(keys::ESCAPE, KeyAction::Close)
            .on_with_options(
                ModifierMatch::NONE,
                keys::TAB,
                KeyAction::Leave,
                HandlerOptions::PASSIVE,
            )
    }

    fn open_with(&mut self, seed: Seed) -> bool {
        if self.config.disabled {
            return false;
        }
        self.sync_popup();
        if !self.expanded {
            self.expanded = true;
            tracing::debug!(?seed, "combobox opened");
        }
        match seed {
            Seed::First => {
                self.popup.first();
            }
            Seed::Last => {
                self.popup.last();
            }
            Seed::Keep => {
                if self.popup.active_id().is_none()
                    && let Some(value) = self.value
                {
                    self.popup.focus(value);
                }
            }
        }
        true
    }

    fn commit_active(&mut self) -> bool {
        if self.config.readonly {
            return false;
        }
        let Some(id) = self.popup.active_id() else {
            return false;
        };
        self.popup.select(id);
        self.value = Some(id);
        self.deleting = false;
        if let Some(label) = self.popup.list().item(id).map(|item| item.label.clone()) {
            self.input.set(label);
        }
        self.sync_popup();
        tracing::debug!(?id, "combobox value committed");
        true
    }

    fn clear(&mut self) {
        if self.config.readonly {
            return;
        }
        self.input.set(String::new());
        self.value = None;
        self.deleting = false;
        self.popup.clear_selection();
        self.sync_popup();
        tracing::debug!("combobox cleared");
    }

    fn sync_popup(&mut self) {
        let snapshot = (
            self.options.version(),
            self.input.version(),
            self.config.filter_mode,
        );
        if self.popup_synced == Some(snapshot) {
            return;
        }
        let visible = self.visible_options();
        if let Err(err) = self.popup.set_options(visible) {
            tracing::warn!(%err, "popup rejected the filtered options");
            return;
        }
        self.popup_synced = Some(snapshot);
        // Replacing the options prunes the popup's selection; keep the value shown.
        if let Some(value) = self.value
            && self.popup.list().index_of(value).is_some()
            && !self.popup.selected().contains(&value)
        {
            self.popup.select(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listbox::{Listbox, ListboxConfig};
    use alloc::vec;
    use understory_list::ListConfig;

    type Fruits = Combobox<u32, Listbox<u32>>;

    fn combobox(mode: FilterMode) -> Fruits {
        let popup = Listbox::new(Vec::new(), ListConfig::default(), ListboxConfig::default())
            .unwrap();
        Combobox::new(
            popup,
            vec![
                Item::new(1, "Apple"),
                Item::new(2, "Banana"),
                Item::new(3, "Avocado"),
            ],
            ComboboxConfig::default().with_filter_mode(mode),
        )
        .unwrap()
    }

    fn press(cb: &mut Fruits, key: &str, modifiers: Modifiers) -> KeyboardEvent {
        let mut event = KeyboardEvent::new(key).with_modifiers(modifiers);
        cb.on_keydown(&mut event);
        event
    }

    #[test]
    fn popup_uses_active_descendant() {
        let cb = combobox(FilterMode::Manual);
        assert_eq!(
            cb.popup().list().config().focus_mode,
            FocusMode::ActiveDescendant
        );
    }

    #[test]
    fn highlight_mode_keeps_value_until_confirmed() {
        let mut cb = combobox(FilterMode::Highlight);
        assert!(cb.on_input("b", InputKind::Insert));
        assert!(cb.is_expanded());
        assert_eq!(cb.active_descendant(), Some(2));
        assert_eq!(cb.completion(), Some("anana"));
        assert_eq!(cb.value(), None);

        press(&mut cb, "Enter", Modifiers::empty());
        assert_eq!(cb.value(), Some(2));
        assert_eq!(cb.input_value(), "Banana");
        assert!(!cb.is_expanded());
        assert_eq!(cb.popup().selected(), vec![2]);
    }

    #[test]
    fn filtering_narrows_the_popup() {
        let mut cb = combobox(FilterMode::AutoSelect);
        cb.on_input("a", InputKind::Insert);
        let ids: Vec<u32> = cb.visible_options().iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(cb.popup().list().len(), 2);
        assert_eq!(cb.active_descendant(), Some(1));

        press(&mut cb, "ArrowDown", Modifiers::empty());
        assert_eq!(cb.active_descendant(), Some(3));
        assert!(cb.on_pointerdown(&mut PointerEvent::new(ComboboxTarget::Outside)));
        assert_eq!(cb.value(), Some(3));
        assert!(!cb.is_expanded());
    }

    #[test]
    fn deleting_suppresses_auto_select() {
        let mut cb = combobox(FilterMode::AutoSelect);
        cb.on_input("av", InputKind::Insert);
        assert_eq!(cb.active_descendant(), Some(3));
        cb.on_input("a", InputKind::Delete);
        assert!(cb.is_deleting());
        assert_eq!(cb.active_descendant(), None);
        assert!(cb.on_focus_out());
        assert_eq!(cb.value(), None);
    }

    #[test]
    fn manual_mode_never_filters() {
        let mut cb = combobox(FilterMode::Manual);
        cb.on_input("b", InputKind::Insert);
        assert_eq!(cb.visible_options().len(), 3);
        assert_eq!(cb.active_descendant(), None);
        assert_eq!(cb.completion(), None);
        cb.on_focus_out();
        assert_eq!(cb.value(), None);
    }

    #[test]
    fn arrows_open_at_either_end() {
        let mut cb = combobox(FilterMode::Manual);
        let event = press(&mut cb, "ArrowUp", Modifiers::empty());
        assert!(event.default_prevented());
        assert_eq!(cb.active_descendant(), Some(3));
        press(&mut cb, "Escape", Modifiers::empty());
        assert!(!cb.is_expanded());

        press(&mut cb, "ArrowDown", Modifiers::empty());
        assert_eq!(cb.active_descendant(), Some(1));
        press(&mut cb, "Escape", Modifiers::empty());

        press(&mut cb, "ArrowDown", Modifiers::ALT);
        assert!(cb.is_expanded());
        assert_eq!(cb.active_descendant(), None);
    }

    #[test]
    fn escape_when_closed_clears_input() {
        let mut cb = combobox(FilterMode::AutoSelect);
        cb.on_input("ban", InputKind::Insert);
        press(&mut cb, "Enter", Modifiers::empty());
        assert_eq!(cb.value(), Some(2));
        press(&mut cb, "Escape", Modifiers::empty());
        assert_eq!(cb.input_value(), "");
        assert_eq!(cb.value(), None);
        assert!(cb.popup().selected().is_empty());
    }

    #[test]
    fn popup_matches_visible_options_after_clearing() {
        let mut cb = combobox(FilterMode::AutoSelect);
        cb.on_input("ban", InputKind::Insert);
        assert_eq!(cb.popup().list().len(), 1);
        press(&mut cb, "Enter", Modifiers::empty());
        press(&mut cb, "Escape", Modifiers::empty());

        // Reading the derived options must not hide a stale popup.
        let visible = cb.visible_options().len();
        assert_eq!(visible, 3);
        press(&mut cb, "ArrowDown", Modifiers::empty());
        assert_eq!(cb.popup().list().len(), visible);
        press(&mut cb, "ArrowDown", Modifiers::empty());
        press(&mut cb, "ArrowDown", Modifiers::empty());
        assert_eq!(cb.active_descendant(), Some(3));
    }

    #[test]
    fn committed_value_stays_selected_across_filtering() {
        let mut cb = combobox(FilterMode::AutoSelect);
        cb.on_input("ban", InputKind::Insert);
        press(&mut cb, "Enter", Modifiers::empty());
        cb.on_input("a", InputKind::Insert);
        assert!(cb.popup().selected().is_empty());
        cb.on_input("", InputKind::Delete);
        assert_eq!(cb.popup().selected(), vec![2]);
    }

    #[test]
    fn tab_leaves_without_preventing_default() {
        let mut cb = combobox(FilterMode::AutoSelect);
        cb.on_input("ap", InputKind::Insert);
        let event = press(&mut cb, "Tab", Modifiers::empty());
        assert!(!event.default_prevented());
        assert_eq!(cb.value(), Some(1));
    }

    #[test]
    fn pointer_toggles_and_commits() {
        let mut cb = combobox(FilterMode::Manual);
        assert!(cb.on_pointerup(&mut PointerEvent::new(ComboboxTarget::Input)));
        assert!(cb.is_expanded());
        assert!(cb.on_pointerup(&mut PointerEvent::new(ComboboxTarget::Option(2))));
        assert_eq!(cb.value(), Some(2));
        assert!(!cb.is_expanded());

        // Reopening puts the committed option back under the cursor.
        assert!(cb.open());
        assert_eq!(cb.active_descendant(), Some(2));
    }

    #[test]
    fn disabled_ignores_everything() {
        let mut cb = combobox(FilterMode::AutoSelect);
        cb.set_config(ComboboxConfig {
            disabled: true,
            ..ComboboxConfig::default()
        });
        assert!(!cb.on_input("a", InputKind::Insert));
        assert!(!cb.open());
        let event = press(&mut cb, "ArrowDown", Modifiers::empty());
        assert!(!event.default_prevented());
    }
}
