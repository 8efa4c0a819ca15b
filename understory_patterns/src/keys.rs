// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arrow keys derived from a collection's orientation and text direction.
//!
//! Vertical collections always move with `ArrowUp`/`ArrowDown`. Horizontal
//! collections move with `ArrowLeft`/`ArrowRight`, swapped in right-to-left
//! text. The *cross* keys are the other axis, used by toolbars to move inside
//! a nested group.

use understory_event_manager::keys;
use understory_list::{ListConfig, Orientation, TextDirection};

/// Key that moves to the previous item.
pub fn prev_key(config: &ListConfig) -> &'static str {
    axis_keys(config.orientation, config.text_direction).0
}

/// Key that moves to the next item.
pub fn next_key(config: &ListConfig) -> &'static str {
    axis_keys(config.orientation, config.text_direction).1
}

/// Previous-item key on the cross axis.
pub fn cross_prev_key(config: &ListConfig) -> &'static str {
    axis_keys(cross(config.orientation), config.text_direction).0
}

/// Next-item key on the cross axis.
pub fn cross_next_key(config: &ListConfig) -> &'static str {
    axis_keys(cross(config.orientation), config.text_direction).1
}

fn cross(orientation: Orientation) -> Orientation {
    match orientation {
        Orientation::Vertical => Orientation::Horizontal,
        Orientation::Horizontal => Orientation::Vertical,
    }
}

fn axis_keys(orientation: Orientation, direction: TextDirection) -> (&'static str, &'static str) {
    match (orientation, direction) {
        (Orientation::Vertical, _) => (keys::ARROW_UP, keys::ARROW_DOWN),
        (Orientation::Horizontal, TextDirection::Ltr) => (keys::ARROW_LEFT, keys::ARROW_RIGHT),
        (Orientation::Horizontal, TextDirection::Rtl) => (keys::ARROW_RIGHT, keys::ARROW_LEFT),
    }
}
