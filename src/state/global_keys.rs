//! Global Keys Module - Global keyboard shortcuts and event routing
//!
//! Provides global key handlers for:
//! - Ctrl+C: Graceful shutdown
//! - Tab: Focus next component
//! - Shift+Tab: Focus previous component
//!
//! and the central router that decides who sees a key press first.
//!
//! # Example
//!
//! ```ignore
//! use spark_otp::state::global_keys;
//! use std::sync::Arc;
//! use std::sync::atomic::AtomicBool;
//!
//! let running = Arc::new(AtomicBool::new(true));
//! let handle = global_keys::setup_global_keys(running.clone());
//!
//! // Later, on cleanup:
//! handle.cleanup();
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::edit;
use super::focus;
use super::keyboard::{self, KeyboardEvent};

// =============================================================================
// ROUTING
// =============================================================================

/// Route a keyboard event.
///
/// 1. Handlers of the focused component
/// 2. Key-specific and global handlers
/// 3. The default action, applied to whatever is focused by then
///
/// Returns true if the event was consumed or produced an edit.
pub fn route_keyboard_event(event: KeyboardEvent) -> bool {
    if !event.is_press() {
        return false;
    }

    if keyboard::dispatch_focused(focus::get_focused_index(), &event) {
        return true;
    }

    if keyboard::dispatch_to_handlers(&event) {
        return true;
    }

    edit::apply_default_action(&event)
}

// =============================================================================
// GLOBAL KEYS HANDLE
// =============================================================================

/// Cleanup handle for global key handlers
pub struct GlobalKeysHandle {
    ctrl_c_cleanup: Option<Box<dyn FnOnce()>>,
    tab_cleanup: Option<Box<dyn FnOnce()>>,
    shift_tab_cleanup: Option<Box<dyn FnOnce()>>,
}

impl GlobalKeysHandle {
    /// Clean up all global key handlers
    pub fn cleanup(mut self) {
        if let Some(cleanup) = self.ctrl_c_cleanup.take() {
            cleanup();
        }
        if let Some(cleanup) = self.tab_cleanup.take() {
            cleanup();
        }
        if let Some(cleanup) = self.shift_tab_cleanup.take() {
            cleanup();
        }
    }
}

// =============================================================================
// SETUP FUNCTIONS
// =============================================================================

/// Set up global key handlers.
/// Returns a handle for cleanup.
///
/// # Arguments
/// * `running` - Atomic bool to set to false on Ctrl+C
///
/// # Handlers
///
/// - **Ctrl+C**: Sets `running` to false for graceful shutdown
/// - **Tab**: Calls `focus::focus_next()` to move to next focusable component
/// - **Shift+Tab**: Calls `focus::focus_previous()` to move to previous focusable component
pub fn setup_global_keys(running: Arc<AtomicBool>) -> GlobalKeysHandle {
    let ctrl_c_cleanup = keyboard::on(move |event| {
        if event.modifiers.ctrl && event.key == "c" {
            running.store(false, Ordering::SeqCst);
            true
        } else {
            false
        }
    });

    // Registered before Tab so the shift check runs first
    let shift_tab_cleanup = keyboard::on(|event| {
        if event.key == "Tab" && event.modifiers.shift {
            focus::focus_previous();
            true
        } else {
            false
        }
    });

    let tab_cleanup = keyboard::on(|event| {
        if event.key == "Tab" && !event.modifiers.shift {
            focus::focus_next();
            true
        } else {
            false
        }
    });

    GlobalKeysHandle {
        ctrl_c_cleanup: Some(Box::new(ctrl_c_cleanup)),
        tab_cleanup: Some(Box::new(tab_cleanup)),
        shift_tab_cleanup: Some(Box::new(shift_tab_cleanup)),
    }
}

// =============================================================================
// TESTS
// =============================================================================
