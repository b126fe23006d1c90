//! Focus System - Keyboard navigation and focus state
//!
//! Manages focus state and navigation:
//! - focused index (currently focused component, -1 if none)
//! - Focus cycling (Tab/Shift+Tab) ordered by tab index, then component index
//! - Focus callbacks (onFocus/onBlur)
//!
//! Callbacks may move focus again (the OTP fields redirect focus to an empty
//! predecessor). Nested moves are allowed; the last move wins.
//!
//! # Example
//!
//! ```ignore
//! use spark_otp::state::focus;
//!
//! focus::focus_next();
//! focus::focus(component_index);
//!
//! let cleanup = focus::register_callbacks(index, FocusCallbacks {
//!     on_focus: Some(Rc::new(|| log::trace!("focused"))),
//!     on_blur: None,
//! });
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::engine::arrays::interaction;
use crate::engine::get_allocated_indices;

// =============================================================================
// FOCUSED INDEX
// =============================================================================

thread_local! {
    static FOCUSED_INDEX: Cell<i32> = const { Cell::new(-1) };
}

/// Get the currently focused component index (-1 if none)
pub fn get_focused_index() -> i32 {
    FOCUSED_INDEX.with(|s| s.get())
}

/// The focused component index, if any.
pub fn focused() -> Option<usize> {
    usize::try_from(get_focused_index()).ok()
}

/// Check if any component is focused
pub fn has_focus() -> bool {
    get_focused_index() >= 0
}

/// Check if specific component is focused
pub fn is_focused(index: usize) -> bool {
    focused() == Some(index)
}

// =============================================================================
// FOCUS CALLBACKS
// =============================================================================

/// Callbacks fired when focus changes
#[derive(Default)]
pub struct FocusCallbacks {
    pub on_focus: Option<Rc<dyn Fn()>>,
    pub on_blur: Option<Rc<dyn Fn()>>,
}

thread_local! {
    // Multiple callbacks per index supported, keyed by registration id
    static FOCUS_CALLBACK_REGISTRY: RefCell<HashMap<usize, Vec<(usize, FocusCallbacks)>>> = RefCell::new(HashMap::new());
    static NEXT_CALLBACK_ID: Cell<usize> = const { Cell::new(0) };
}

/// Register focus callbacks for a component.
/// Returns cleanup function to unregister.
pub fn register_callbacks(index: usize, callbacks: FocusCallbacks) -> impl FnOnce() {
    let callback_id = NEXT_CALLBACK_ID.with(|next| {
        let id = next.get();
        next.set(id + 1);
        id
    });

    FOCUS_CALLBACK_REGISTRY.with(|reg| {
        reg.borrow_mut()
            .entry(index)
            .or_default()
            .push((callback_id, callbacks));
    });

    move || {
        FOCUS_CALLBACK_REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            if let Some(list) = reg.get_mut(&index) {
                list.retain(|(id, _)| *id != callback_id);
                if list.is_empty() {
                    reg.remove(&index);
                }
            }
        });
    }
}

/// Snapshot the callbacks of one kind so they run without holding the registry.
fn collect_callbacks(index: usize, pick: fn(&FocusCallbacks) -> Option<Rc<dyn Fn()>>) -> Vec<Rc<dyn Fn()>> {
    FOCUS_CALLBACK_REGISTRY.with(|reg| {
        reg.borrow()
            .get(&index)
            .map(|list| list.iter().filter_map(|(_, cb)| pick(cb)).collect())
            .unwrap_or_default()
    })
}

/// Internal: Set focus and fire callbacks at the source
fn set_focus_with_callbacks(new_index: i32) {
    let old_index = get_focused_index();

    if old_index == new_index {
        return;
    }

    if let Ok(old) = usize::try_from(old_index) {
        for on_blur in collect_callbacks(old, |cb| cb.on_blur.clone()) {
            on_blur();
        }
    }

    FOCUSED_INDEX.with(|s| s.set(new_index));
    log::trace!("focus moved from {old_index} to {new_index}");

    if let Ok(new) = usize::try_from(new_index) {
        for on_focus in collect_callbacks(new, |cb| cb.on_focus.clone()) {
            on_focus();
        }
    }
}

// =============================================================================
// FOCUSABLE QUERIES
// =============================================================================

/// Get all focusable component indices, sorted by tabIndex
pub fn get_focusable_indices() -> Vec<usize> {
    let mut result: Vec<usize> = get_allocated_indices()
        .into_iter()
        .filter(|&i| interaction::get_focusable(i))
        .collect();

    // Components with same tabIndex keep index order
    result.sort_by_key(|&i| (interaction::get_tab_index(i), i));

    result
}

// =============================================================================
// FOCUS NAVIGATION
// =============================================================================

/// Find next focusable component, wrapping around
fn find_next_focusable(from_index: i32, direction: i32) -> i32 {
    let focusables = get_focusable_indices();

    if focusables.is_empty() {
        return -1;
    }

    let current_pos = usize::try_from(from_index)
        .ok()
        .and_then(|from| focusables.iter().position(|&i| i == from));

    match current_pos {
        None => {
            if direction == 1 {
                focusables[0] as i32
            } else {
                focusables[focusables.len() - 1] as i32
            }
        }
        Some(pos) => {
            let len = focusables.len() as i32;
            let next_pos = ((pos as i32 + direction) % len + len) % len;
            focusables[next_pos as usize] as i32
        }
    }
}

/// Move focus to next focusable component
pub fn focus_next() -> bool {
    let current = get_focused_index();
    let next = find_next_focusable(current, 1);
    if next != -1 && next != current {
        set_focus_with_callbacks(next);
        return true;
    }
    false
}

/// Move focus to previous focusable component
pub fn focus_previous() -> bool {
    let current = get_focused_index();
    let prev = find_next_focusable(current, -1);
    if prev != -1 && prev != current {
        set_focus_with_callbacks(prev);
        return true;
    }
    false
}

/// Focus a specific component by index
pub fn focus(index: usize) -> bool {
    if interaction::get_focusable(index) {
        if !is_focused(index) {
            set_focus_with_callbacks(index as i32);
        }
        return true;
    }
    false
}

/// Clear focus (no component focused)
pub fn blur() {
    if has_focus() {
        set_focus_with_callbacks(-1);
    }
}

// =============================================================================
// RESET (for testing)
// =============================================================================

/// Reset all focus state (for testing)
pub fn reset_focus_state() {
    FOCUSED_INDEX.with(|s| s.set(-1));
    FOCUS_CALLBACK_REGISTRY.with(|reg| reg.borrow_mut().clear());
    NEXT_CALLBACK_ID.with(|next| next.set(0));
}

// =============================================================================
// TESTS
// =============================================================================
