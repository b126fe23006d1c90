//! # spark-otp
//!
//! Segmented one-time-passcode input for terminal UIs.
//!
//! ## Architecture
//!
//! Components are indices into parallel arrays rather than objects. The OTP
//! widget mounts one group component and `length` field components beneath it;
//! each field is a focusable single-character text field whose displayed
//! character is derived from the owner's code on every read.
//!
//! ```text
//! key press → focused handlers → key/global handlers → default action (edit)
//!                    │                                        │
//!              navigation/focus                     on_change(new code)
//!                                                             │
//!                              owner stores code → fields re-derive display
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (Attr, ComponentType, InputMode)
//! - [`engine`] - Component registry and parallel arrays
//! - [`state`] - Focus, keyboard, edit events, terminal input
//! - [`primitives`] - The OTP input widget and the verification form
//! - [`renderer`] - Terminal line rendering

pub mod engine;
pub mod error;
pub mod primitives;
pub mod renderer;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::OtpError;

pub use engine::{
    allocate_index, get_allocated_indices, get_current_parent_index, get_id, is_allocated,
    on_destroy, pop_parent_context, push_parent_context, release_index, reset_registry,
};

pub use primitives::{
    derive_display, is_ascii_digit, is_complete, otp_input, placeholder_for, replace_at,
    verification_form, ChangeCallback, CharPredicate, Cleanup, FormHandle, FormProps,
    OtpInputHandle, OtpInputProps, PropValue, SubmitCallback, BLANK, DEFAULT_LENGTH,
};

pub use renderer::{render_form, render_group, write_line, RenderedField};

pub use state::{
    // Focus
    blur, focus, focus_next, focus_previous, get_focusable_indices, get_focused_index,
    has_focus, is_focused, register_callbacks, reset_focus_state, FocusCallbacks,
    // Keyboard
    dispatch_focused, dispatch_to_handlers, on as on_keyboard, on_focused, on_key, reset_keyboard_state, KeyHandler, KeyState, KeyboardEvent, Modifiers,
    // Edit
    apply_default_action, dispatch_edit, on_edit, reset_edit_state,
    // Routing
    route_keyboard_event, setup_global_keys, GlobalKeysHandle,
};
