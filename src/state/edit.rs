//! Edit Module - Text field change events
//!
//! A text field does not edit itself. Key presses that nobody consumed get a
//! default action, which computes the text the field would hold afterwards
//! (replacing the selected range) and fires the field's change handlers with
//! it. The owner decides what the field really shows; the field's text is
//! whatever its content slot derives on the next read.
//!
//! # API
//!
//! - `on_edit(i, fn)` - Subscribe to change events of component i
//! - `dispatch_edit(i, text)` - Fire a change event
//! - `apply_default_action(event)` - Printable chars, Backspace/Delete
//! - `apply_paste(text)` - Terminal (bracketed) paste into the focused field

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use super::focus;
use super::keyboard::KeyboardEvent;
use crate::engine::arrays::{interaction, text};

/// Change handler. Receives the full text the field would now hold.
pub type EditHandler = Rc<dyn Fn(&str)>;

thread_local! {
    static EDIT_HANDLERS: RefCell<HashMap<usize, Vec<(usize, EditHandler)>>> = RefCell::new(HashMap::new());
    static NEXT_HANDLER_ID: Cell<usize> = const { Cell::new(0) };
}

// =============================================================================
// HANDLER REGISTRY
// =============================================================================

/// Subscribe to change events of a component.
/// Returns cleanup function.
pub fn on_edit<F>(index: usize, handler: F) -> impl FnOnce()
where
    F: Fn(&str) + 'static,
{
    let id = NEXT_HANDLER_ID.with(|next| {
        let id = next.get();
        next.set(id + 1);
        id
    });

    EDIT_HANDLERS.with(|reg| {
        reg.borrow_mut()
            .entry(index)
            .or_default()
            .push((id, Rc::new(handler)));
    });

    move || {
        EDIT_HANDLERS.with(|reg| {
            let mut reg = reg.borrow_mut();
            if let Some(list) = reg.get_mut(&index) {
                list.retain(|(handler_id, _)| *handler_id != id);
                if list.is_empty() {
                    reg.remove(&index);
                }
            }
        });
    }
}

/// Fire a change event on a component.
/// Returns true if the component has change handlers.
pub fn dispatch_edit(index: usize, text: &str) -> bool {
    let handlers: Vec<EditHandler> = EDIT_HANDLERS.with(|reg| {
        reg.borrow()
            .get(&index)
            .map(|list| list.iter().map(|(_, h)| h.clone()).collect())
            .unwrap_or_default()
    });

    for handler in &handlers {
        handler(text);
    }
    !handlers.is_empty()
}

/// Check if a component accepts text edits.
pub fn is_editable(index: usize) -> bool {
    EDIT_HANDLERS.with(|reg| reg.borrow().contains_key(&index))
}

/// Remove all change handlers of a component.
pub fn cleanup_index(index: usize) {
    EDIT_HANDLERS.with(|reg| {
        reg.borrow_mut().remove(&index);
    });
}

// =============================================================================
// TEXT COMPUTATION
// =============================================================================

/// Selected character range of a component, clamped to its current text.
fn selected_range(index: usize, len: usize) -> (usize, usize) {
    let start = (interaction::get_selection_start(index) as usize).min(len);
    let end = (interaction::get_selection_end(index) as usize).min(len);
    (start.min(end), start.max(end))
}

/// The text a component would hold after replacing its selection with `insert`.
/// With no selection the insert lands at the cursor.
pub fn replace_selection(index: usize, insert: &str) -> String {
    let current: Vec<char> = text::get_text_content(index).chars().collect();
    let (start, end) = selected_range(index, current.len());

    let mut result: String = current[..start].iter().collect();
    result.push_str(insert);
    result.extend(&current[end..]);
    result
}

/// The text a component would hold after a Backspace (`forward == false`) or
/// Delete. None when there is nothing to delete.
fn delete_text(index: usize, forward: bool) -> Option<String> {
    let mut current: Vec<char> = text::get_text_content(index).chars().collect();
    let (start, end) = selected_range(index, current.len());

    if start != end {
        current.drain(start..end);
    } else if forward && start < current.len() {
        current.remove(start);
    } else if !forward && start > 0 {
        current.remove(start - 1);
    } else {
        return None;
    }
    Some(current.into_iter().collect())
}

// =============================================================================
// DEFAULT ACTIONS
// =============================================================================

/// Apply the default action of an unconsumed key press to the focused component.
/// Returns true if a change event was fired.
pub fn apply_default_action(event: &KeyboardEvent) -> bool {
    if !event.is_press() {
        return false;
    }
    let Some(index) = focus::focused() else {
        return false;
    };
    if !is_editable(index) {
        return false;
    }

    let new_text = if let Some(c) = event.typed_char() {
        let mut buf = [0u8; 4];
        Some(replace_selection(index, c.encode_utf8(&mut buf)))
    } else {
        match event.key.as_str() {
            "Backspace" => delete_text(index, false),
            "Delete" => delete_text(index, true),
            _ => None,
        }
    };

    match new_text {
        Some(new_text) => dispatch_edit(index, &new_text),
        None => false,
    }
}

/// Paste text into the focused component.
/// Returns true if a change event was fired.
pub fn apply_paste(pasted: &str) -> bool {
    match focus::focused() {
        Some(index) if is_editable(index) && !pasted.is_empty() => {
            let new_text = replace_selection(index, pasted);
            dispatch_edit(index, &new_text)
        }
        _ => false,
    }
}

/// Reset edit state (for testing)
pub fn reset_edit_state() {
    EDIT_HANDLERS.with(|reg| reg.borrow_mut().clear());
    NEXT_HANDLER_ID.with(|next| next.set(0));
}

// =============================================================================
// TESTS
// =============================================================================
