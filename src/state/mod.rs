//! State Module - Runtime state management systems
//!
//! This module contains the state systems that power interactivity:
//!
//! - **Focus** - Tab cycling, focus callbacks
//! - **Keyboard** - Event types, dispatch, handler registry
//! - **Edit** - Change events and the default action of a key press
//! - **Clipboard** - Internal copy/paste buffer
//! - **Input** - crossterm event conversion and routing
//! - **Global keys** - Ctrl+C, Tab cycling, the keyboard router

pub mod edit;
pub mod focus;
pub mod global_keys;
pub mod input;
pub mod keyboard;

pub use edit::{apply_default_action, apply_paste, dispatch_edit, on_edit, reset_edit_state};
pub use focus::*;
pub use global_keys::{route_keyboard_event, setup_global_keys, GlobalKeysHandle};
pub use input::{poll_event, read_event, route_event, InputEvent};
pub use keyboard::*;
