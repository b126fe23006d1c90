//! Keyboard Module - Keyboard event state and handler registry
//!
//! State and handler registry for keyboard events.
//! Does NOT own stdin (that is the input module).
//! Does NOT decide routing priority (that is global_keys::route_keyboard_event).
//!
//! # API
//!
//! - `on(handler)` - Subscribe to all keyboard events
//! - `on_key(key, fn)` - Subscribe to specific key(s)
//! - `on_focused(i, fn)` - Subscribe when component i has focus
//!
//! Handlers are snapshotted before they run, so a handler may register or
//! remove handlers (mounting or unmounting components) without a borrow panic.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

// =============================================================================
// TYPES
// =============================================================================

/// Keyboard modifier state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Create empty modifiers
    pub fn none() -> Self {
        Self::default()
    }

    /// Create modifiers with ctrl
    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }

    /// Create modifiers with alt
    pub fn alt() -> Self {
        Self { alt: true, ..Self::default() }
    }

    /// Create modifiers with shift
    pub fn shift() -> Self {
        Self { shift: true, ..Self::default() }
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Keyboard event
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// The key that was pressed (e.g., "7", "Backspace", "ArrowLeft")
    pub key: String,
    /// Modifier keys state
    pub modifiers: Modifiers,
    /// Press/repeat/release state
    pub state: KeyState,
}

impl KeyboardEvent {
    /// Create a simple key press event
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::default(),
            state: KeyState::Press,
        }
    }

    /// Create a key press with modifiers
    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            state: KeyState::Press,
        }
    }

    /// Check if this is a press event
    pub fn is_press(&self) -> bool {
        self.state == KeyState::Press
    }

    /// The character this key would type into a text field, if any.
    ///
    /// Single characters without Ctrl/Alt/Meta type themselves; Shift is allowed.
    pub fn typed_char(&self) -> Option<char> {
        if self.modifiers.ctrl || self.modifiers.alt || self.modifiers.meta {
            return None;
        }
        let mut chars = self.key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_control() => Some(c),
            _ => None,
        }
    }
}

/// Handler for keyboard events. Return true to consume the event.
pub type KeyHandler = Rc<dyn Fn(&KeyboardEvent) -> bool>;

/// Handler for specific key. Return true to consume the event.
pub type KeySpecificHandler = Rc<dyn Fn() -> bool>;

// =============================================================================
// HANDLER REGISTRY
// =============================================================================

struct HandlerRegistry {
    global_handlers: Vec<(usize, KeyHandler)>,
    key_handlers: HashMap<String, Vec<(usize, KeySpecificHandler)>>,
    focused_handlers: HashMap<usize, Vec<(usize, KeyHandler)>>,
    next_id: usize,
}

impl HandlerRegistry {
    fn new() -> Self {
        Self {
            global_handlers: Vec::new(),
            key_handlers: HashMap::new(),
            focused_handlers: HashMap::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

thread_local! {
    static REGISTRY: RefCell<HandlerRegistry> = RefCell::new(HandlerRegistry::new());
}

// =============================================================================
// EVENT DISPATCH
// =============================================================================

/// Dispatch to key-specific and global handlers only (not focused).
/// Returns true if any handler consumed the event.
pub fn dispatch_to_handlers(event: &KeyboardEvent) -> bool {
    let (key_handlers, global_handlers) = REGISTRY.with(|reg| {
        let reg = reg.borrow();
        let key_handlers: Vec<KeySpecificHandler> = reg
            .key_handlers
            .get(&event.key)
            .map(|handlers| handlers.iter().map(|(_, h)| h.clone()).collect())
            .unwrap_or_default();
        let global_handlers: Vec<KeyHandler> =
            reg.global_handlers.iter().map(|(_, h)| h.clone()).collect();
        (key_handlers, global_handlers)
    });

    key_handlers.iter().any(|handler| handler()) || global_handlers.iter().any(|handler| handler(event))
}

/// Dispatch to focused component handlers.
/// Returns true if consumed.
pub fn dispatch_focused(focused_index: i32, event: &KeyboardEvent) -> bool {
    let Ok(index) = usize::try_from(focused_index) else {
        return false;
    };
    if !event.is_press() {
        return false;
    }

    let handlers: Vec<KeyHandler> = REGISTRY.with(|reg| {
        reg.borrow()
            .focused_handlers
            .get(&index)
            .map(|handlers| handlers.iter().map(|(_, h)| h.clone()).collect())
            .unwrap_or_default()
    });

    handlers.iter().any(|handler| handler(event))
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Subscribe to all keyboard events.
/// Return true from handler to consume the event.
/// Returns cleanup function.
pub fn on<F>(handler: F) -> impl FnOnce()
where
    F: Fn(&KeyboardEvent) -> bool + 'static,
{
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.global_handlers.push((id, Rc::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            reg.borrow_mut()
                .global_handlers
                .retain(|(handler_id, _)| *handler_id != id);
        });
    }
}

/// Subscribe to a specific key.
/// Return true to consume the event.
/// Returns cleanup function.
pub fn on_key<F>(key: &str, handler: F) -> impl FnOnce()
where
    F: Fn() -> bool + 'static,
{
    let key = key.to_string();
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.key_handlers
            .entry(key.clone())
            .or_default()
            .push((id, Rc::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            if let Some(handlers) = reg.key_handlers.get_mut(&key) {
                handlers.retain(|(handler_id, _)| *handler_id != id);
                if handlers.is_empty() {
                    reg.key_handlers.remove(&key);
                }
            }
        });
    }
}

/// Subscribe to events when a specific component has focus.
/// Return true from handler to consume the event.
/// Returns cleanup function.
pub fn on_focused<F>(index: usize, handler: F) -> impl FnOnce()
where
    F: Fn(&KeyboardEvent) -> bool + 'static,
{
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.focused_handlers
            .entry(index)
            .or_default()
            .push((id, Rc::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            if let Some(handlers) = reg.focused_handlers.get_mut(&index) {
                handlers.retain(|(handler_id, _)| *handler_id != id);
                if handlers.is_empty() {
                    reg.focused_handlers.remove(&index);
                }
            }
        });
    }
}

/// Clean up all handlers for a component index.
/// Called when component is released to prevent leaks.
pub fn cleanup_index(index: usize) {
    REGISTRY.with(|reg| {
        reg.borrow_mut().focused_handlers.remove(&index);
    });
}

/// Reset keyboard state (for testing)
pub fn reset_keyboard_state() {
    REGISTRY.with(|reg| *reg.borrow_mut() = HandlerRegistry::new());
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn setup() {
        reset_keyboard_state();
    }

    #[test]
    fn test_global_handler() {
        setup();

        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();

        let cleanup = on(move |_event| {
            count_clone.set(count_clone.get() + 1);
            false
        });

        dispatch_to_handlers(&KeyboardEvent::new("a"));
        dispatch_to_handlers(&KeyboardEvent::new("b"));
        assert_eq!(count.get(), 2);

        cleanup();

        dispatch_to_handlers(&KeyboardEvent::new("c"));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_key_specific_handler_consumes() {
        setup();

        let enter_count = Rc::new(Cell::new(0));
        let enter_clone = enter_count.clone();
        let _c1 = on_key("Enter", move || {
            enter_clone.set(enter_clone.get() + 1);
            true
        });

        let reached = Rc::new(Cell::new(false));
        let reached_clone = reached.clone();
        let _c2 = on(move |_| {
            reached_clone.set(true);
            false
        });

        assert!(dispatch_to_handlers(&KeyboardEvent::new("Enter")));
        assert_eq!(enter_count.get(), 1);
        assert!(!reached.get());

        assert!(!dispatch_to_handlers(&KeyboardEvent::new("1")));
        assert!(reached.get());
    }

    #[test]
    fn test_focused_handler() {
        setup();

        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();

        let cleanup = on_focused(5, move |_event| {
            count_clone.set(count_clone.get() + 1);
            false
        });

        let event = KeyboardEvent::new("a");

        dispatch_focused(3, &event);
        assert_eq!(count.get(), 0);

        dispatch_focused(5, &event);
        assert_eq!(count.get(), 1);

        dispatch_focused(-1, &event);
        assert_eq!(count.get(), 1);

        cleanup();

        dispatch_focused(5, &event);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_handler_may_unregister_during_dispatch() {
        setup();

        let cleanup: Rc<RefCell<Option<Box<dyn FnOnce()>>>> = Rc::new(RefCell::new(None));
        let cleanup_for_handler = cleanup.clone();
        let registered = on_focused(0, move |_| {
            if let Some(remove) = cleanup_for_handler.borrow_mut().take() {
                remove();
            }
            true
        });
        *cleanup.borrow_mut() = Some(Box::new(registered));

        assert!(dispatch_focused(0, &KeyboardEvent::new("x")));
        assert!(!dispatch_focused(0, &KeyboardEvent::new("x")));
    }

    #[test]
    fn test_typed_char() {
        assert_eq!(KeyboardEvent::new("7").typed_char(), Some('7'));
        assert_eq!(KeyboardEvent::new("x").typed_char(), Some('x'));
        assert_eq!(KeyboardEvent::with_modifiers("A", Modifiers::shift()).typed_char(), Some('A'));
        assert_eq!(KeyboardEvent::with_modifiers("v", Modifiers::ctrl()).typed_char(), None);
        assert_eq!(KeyboardEvent::new("Backspace").typed_char(), None);
        assert_eq!(KeyboardEvent::new("").typed_char(), None);
    }
}
