// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drive a listbox, a combobox and a toolbar with synthetic input.
//!
//! Every pattern is fed the same kind of events a host toolkit would forward,
//! and the derived state is printed after each step. Controller logging goes
//! through `tracing`.
//!
//! Run:
//! - `RUST_LOG=understory=debug cargo run -p understory_demos --example widget_walkthrough`

use tracing_subscriber::EnvFilter;
use understory_event_manager::{KeyboardEvent, Modifiers, PointerEvent};
use understory_list::{Item, ListConfig, ListError, Orientation};
use understory_patterns::{
    Combobox, ComboboxConfig, ComboboxTarget, FilterMode, InputKind, Listbox, ListboxConfig,
    RadioGroup, RadioGroupConfig, Toolbar, ToolbarTarget,
};

fn fruits() -> Vec<Item<u32>> {
    ["Apple", "Apricot", "Banana", "Blueberry", "Cherry"]
        .into_iter()
        .zip(1..)
        .map(|(label, id)| Item::new(id, label))
        .collect()
}

fn listbox() -> Result<(), ListError> {
    println!("== listbox (multi, explicit selection)");
    let mut listbox = Listbox::new(
        fruits(),
        ListConfig::default(),
        ListboxConfig::default()
            .with_multi(true)
            .with_follow_focus(false),
    )?;
    listbox.set_default_state();

    let mut now = 0;
    let mut press = |listbox: &mut Listbox<u32>, key: &str, modifiers: Modifiers| {
        now += 100;
        let mut event = KeyboardEvent::new(key).with_modifiers(modifiers).at(now);
        let handled = listbox.on_keydown(&mut event);
        println!(
            "{key:>10?} handled={handled:<5} active={:?} selected={:?}",
            listbox.active_id(),
            listbox.selected_ids()
        );
    };

    press(&mut listbox, " ", Modifiers::empty());
    press(&mut listbox, "ArrowDown", Modifiers::SHIFT);
    press(&mut listbox, "ArrowDown", Modifiers::SHIFT);
    press(&mut listbox, "c", Modifiers::empty());
    press(&mut listbox, "a", Modifiers::CTRL);

    let mut click = PointerEvent::new(Some(2)).with_modifiers(Modifiers::CTRL);
    listbox.on_pointerdown(&mut click);
    println!("ctrl-click 2 -> selected={:?}", listbox.selected_ids());
    for violation in listbox.validate() {
        println!("violation: {violation}");
    }
    Ok(())
}

fn combobox() -> Result<(), ListError> {
    println!("== combobox (highlight)");
    let popup = Listbox::new(Vec::new(), ListConfig::default(), ListboxConfig::default())?;
    let mut combobox = Combobox::new(
        popup,
        fruits(),
        ComboboxConfig::default().with_filter_mode(FilterMode::Highlight),
    )?;

    for typed in ["b", "bl"] {
        combobox.on_input(typed, InputKind::Insert);
        let visible: Vec<_> = combobox
            .visible_options()
            .into_iter()
            .map(|item| item.label)
            .collect();
        println!(
            "typed {typed:?}: options={visible:?} completion={:?} active={:?}",
            combobox.completion(),
            combobox.active_descendant()
        );
    }

    combobox.on_keydown(&mut KeyboardEvent::new("Enter"));
    println!(
        "enter -> value={:?} expanded={}",
        combobox.value(),
        combobox.is_expanded()
    );

    combobox.on_pointerup(&mut PointerEvent::new(ComboboxTarget::Input));
    combobox.on_pointerup(&mut PointerEvent::new(ComboboxTarget::Option(5)));
    println!("clicked Cherry -> value={:?}", combobox.value());
    Ok(())
}

fn toolbar() -> Result<(), ListError> {
    println!("== toolbar with a radio group");
    let alignment = RadioGroup::new(
        vec![
            Item::new(10, "Left"),
            Item::new(11, "Center"),
            Item::new(12, "Right"),
        ],
        ListConfig::default(),
        RadioGroupConfig {
            follow_focus: false,
            ..RadioGroupConfig::default()
        },
    )?;
    let mut toolbar = Toolbar::new(
        vec![
            Item::new(1, "Bold"),
            Item::new(2, "Italic"),
            Item::new(3, "Alignment"),
            Item::new(4, "Link"),
        ],
        ListConfig::default().with_orientation(Orientation::Horizontal),
    )?;
    toolbar.add_group(3, alignment);
    toolbar.set_default_state();

    for key in ["ArrowRight", "ArrowRight", "ArrowUp", "Enter", "ArrowRight", "End"] {
        let handled = toolbar.on_keydown(&mut KeyboardEvent::new(key));
        println!(
            "{key:>10?} handled={handled:<5} target={:?}",
            toolbar.active_target()
        );
    }

    let mut click = PointerEvent::new(Some(ToolbarTarget::GroupItem { group: 3, item: 11 }));
    toolbar.on_pointerdown(&mut click);
    println!("clicked Center -> target={:?}", toolbar.active_target());
    Ok(())
}

fn main() -> Result<(), ListError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    listbox()?;
    combobox()?;
    toolbar()?;
    Ok(())
}
