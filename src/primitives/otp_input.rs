//! OTP Input Primitive - Segmented one-time-passcode input.
//!
//! `length` single-character fields that behave as one logical text field.
//!
//! # Features
//!
//! - The owner keeps the code; fields derive their character from it on every read
//! - Typing fills a field and moves to the next one
//! - Pasting a full code fills every field and blurs
//! - Backspace on an empty field steps back and clears the previous one
//! - Focus never lands past an empty field (left-to-right fill order)
//! - Arrow keys move between fields, Shift+Tab jumps to the last field
//!
//! # Example
//!
//! ```ignore
//! use spark_otp::primitives::{otp_input, OtpInputProps, PropValue};
//!
//! let code = Rc::new(RefCell::new(String::new()));
//! let writer = code.clone();
//!
//! let otp = otp_input(OtpInputProps {
//!     auto_focus: true,
//!     ..OtpInputProps::new(PropValue::from_cell(&code), move |next| {
//!         *writer.borrow_mut() = next.to_string();
//!     })
//! })?;
//!
//! // Later
//! otp.unmount();
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::engine::arrays::{core, interaction, text as text_arrays};
use crate::engine::{
    allocate_index, get_current_parent_index, on_destroy, pop_parent_context,
    push_parent_context, release_index,
};
use crate::error::OtpError;
use crate::state::keyboard::KeyboardEvent;
use crate::state::{edit, focus, keyboard};
use crate::types::{Attr, ComponentType, InputMode};
use super::types::{ChangeCallback, CharPredicate, OtpInputProps, PropValue};

/// Marks an empty position inside a code. Never an accepted character.
pub const BLANK: char = ' ';

// =============================================================================
// Code Helpers
// =============================================================================

/// Default accepted-character predicate.
pub fn is_ascii_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// The character each field shows: the code's character at that position if
/// it is accepted, otherwise nothing.
pub fn derive_display(value: &str, length: usize, accepts: &dyn Fn(char) -> bool) -> Vec<String> {
    let mut chars = value.chars();
    (0..length)
        .map(|_| match chars.next() {
            Some(c) if accepts(c) => c.to_string(),
            _ => String::new(),
        })
        .collect()
}

/// Placeholder of field `pos`.
///
/// A placeholder whose character count equals `length` spreads one character
/// per field; anything else falls back to the 1-based field number.
pub fn placeholder_for(placeholder: Option<&str>, length: usize, pos: usize) -> String {
    match placeholder {
        Some(p) if p.chars().count() == length => {
            p.chars().nth(pos).map(String::from).unwrap_or_default()
        }
        _ => (pos + 1).to_string(),
    }
}

/// Replace exactly position `pos` of `value`.
///
/// Positions past the end are padded with [`BLANK`] so no other character moves.
pub fn replace_at(value: &str, pos: usize, ch: char) -> String {
    let mut chars: Vec<char> = value.chars().collect();
    if pos < chars.len() {
        chars[pos] = ch;
    } else {
        chars.resize(pos, BLANK);
        chars.push(ch);
    }
    chars.into_iter().collect()
}

/// True when `value` is exactly `length` accepted characters with no gaps.
pub fn is_complete(value: &str, length: usize, accepts: &dyn Fn(char) -> bool) -> bool {
    value.chars().count() == length && value.chars().all(accepts)
}

// =============================================================================
// Shared State
// =============================================================================

struct DisplayMemo {
    value: String,
    length: usize,
    display: Rc<[String]>,
}

struct OtpState {
    group: usize,
    id: Option<String>,
    value: PropValue<String>,
    on_change: ChangeCallback,
    accepts: CharPredicate,
    length: Cell<usize>,
    /// Field registry: position -> component index
    fields: RefCell<Vec<usize>>,
    memo: RefCell<Option<DisplayMemo>>,
    placeholder: Option<String>,
    style: Attr,
    input_mode: InputMode,
    tab_index: i32,
}

impl OtpState {
    fn field(&self, pos: usize) -> Option<usize> {
        self.fields.borrow().get(pos).copied()
    }

    /// Derived display, recomputed only when the code or length changed.
    fn display(&self) -> Rc<[String]> {
        let value = self.value.get();
        let length = self.length.get();

        if let Some(memo) = self.memo.borrow().as_ref() {
            if memo.length == length && memo.value == value {
                return memo.display.clone();
            }
        }

        let display: Rc<[String]> = derive_display(&value, length, &*self.accepts).into();
        *self.memo.borrow_mut() = Some(DisplayMemo {
            value,
            length,
            display: display.clone(),
        });
        display
    }

    fn display_at(&self, pos: usize) -> String {
        self.display().get(pos).cloned().unwrap_or_default()
    }

    fn is_empty_at(&self, pos: usize) -> bool {
        self.display().get(pos).is_none_or(|c| c.is_empty())
    }

    /// Focus field `pos` and select its content.
    fn focus_and_select(&self, pos: usize) {
        if let Some(index) = self.field(pos) {
            focus::focus(index);
            select_all(index);
        }
    }

    fn handle_edit(&self, pos: usize, raw: &str) {
        let text = raw.trim();
        let is_deletion = text.is_empty();

        if !is_deletion && !text.chars().all(|c| (self.accepts)(c)) {
            log::debug!("field {pos}: rejected {text:?}");
            return;
        }

        if is_deletion && self.field(pos + 1).is_some() && !self.is_empty_at(pos + 1) {
            log::debug!("field {pos}: deletion rejected, next field is filled");
            return;
        }

        let written_len = if is_deletion { 1 } else { text.chars().count() };

        if written_len == 1 {
            let ch = text.chars().next().unwrap_or(BLANK);
            let next = replace_at(&self.value.get(), pos, ch);
            (self.on_change)(&next);

            if !is_deletion {
                self.focus_and_select(pos + 1);
            }
        } else if written_len == self.length.get() {
            log::debug!("field {pos}: full code pasted");
            (self.on_change)(text);
            focus::blur();
        } else {
            log::debug!("field {pos}: ignored write of {written_len} characters");
        }
    }

    fn handle_key(&self, pos: usize, event: &KeyboardEvent) -> bool {
        let consumed = match event.key.as_str() {
            "ArrowRight" => {
                if let Some(next) = self.field(pos + 1) {
                    focus::focus(next);
                }
                true
            }
            "ArrowLeft" => {
                if let Some(prev) = pos.checked_sub(1).and_then(|p| self.field(p)) {
                    focus::focus(prev);
                }
                true
            }
            "Tab" if event.modifiers.shift => {
                let last = self.fields.borrow().last().copied();
                if let Some(last) = last {
                    focus::focus(last);
                }
                true
            }
            _ => false,
        };

        let Some(index) = self.field(pos) else {
            return consumed;
        };
        select_all(index);

        if event.key == "Backspace" && text_arrays::get_text_content(index).is_empty() {
            if let Some(prev) = pos.checked_sub(1) {
                self.focus_and_select(prev);
            }
        }

        consumed
    }

    fn handle_focus(&self, pos: usize) {
        if let Some(prev) = pos.checked_sub(1) {
            if let Some(prev_index) = self.field(prev) {
                if self.is_empty_at(prev) {
                    log::trace!("field {pos}: redirecting focus to empty field {prev}");
                    focus::focus(prev_index);
                    return;
                }
            }
        }

        if let Some(index) = self.field(pos) {
            select_all(index);
        }
    }
}

/// Select the whole text of a field.
fn select_all(index: usize) {
    let len = text_arrays::get_text_content(index).chars().count();
    interaction::set_selection(index, 0, len.min(u16::MAX as usize) as u16);
}

// =============================================================================
// Field Mounting
// =============================================================================

/// Mount the field at `pos` under the current parent context.
fn mount_field(state: &Rc<OtpState>, pos: usize) -> usize {
    let id = state.id.as_ref().map(|id| format!("{id}-{pos}"));
    let index = allocate_index(id.as_deref());

    core::set_component_type(index, ComponentType::OtpField);
    core::set_parent_index(index, get_current_parent_index());
    interaction::set_focusable(index, true);
    interaction::set_tab_index(index, state.tab_index.saturating_add(pos as i32));
    text_arrays::set_text_attrs(index, state.style);

    let state_for_text = state.clone();
    text_arrays::set_text_content_getter(index, move || state_for_text.display_at(pos));

    let state_for_placeholder = state.clone();
    text_arrays::set_placeholder_getter(index, move || {
        placeholder_for(
            state_for_placeholder.placeholder.as_deref(),
            state_for_placeholder.length.get(),
            pos,
        )
    });

    // ==========================================================================
    // HANDLERS
    // ==========================================================================

    let state_for_key = state.clone();
    let key_cleanup = keyboard::on_focused(index, move |event| state_for_key.handle_key(pos, event));

    let state_for_focus = state.clone();
    let focus_cleanup = focus::register_callbacks(
        index,
        focus::FocusCallbacks {
            on_focus: Some(Rc::new(move || state_for_focus.handle_focus(pos))),
            on_blur: None,
        },
    );

    let state_for_edit = state.clone();
    let edit_cleanup = edit::on_edit(index, move |raw| state_for_edit.handle_edit(pos, raw));

    on_destroy(index, move || {
        key_cleanup();
        keyboard::cleanup_index(index);
        focus_cleanup();
        edit_cleanup();
        edit::cleanup_index(index);
    });

    index
}

/// Mount fields `from..to` as children of the group.
fn mount_fields(state: &Rc<OtpState>, from: usize, to: usize) {
    push_parent_context(state.group);
    let mounted: Vec<usize> = (from..to).map(|pos| mount_field(state, pos)).collect();
    pop_parent_context();
    state.fields.borrow_mut().extend(mounted);
}

// =============================================================================
// OTP Input Component
// =============================================================================

/// Handle to a mounted OTP input.
#[derive(Clone)]
pub struct OtpInputHandle {
    state: Rc<OtpState>,
}

/// Create an OTP input: a group component with `length` field components.
///
/// Fails with [`OtpError::InvalidLength`] when `length` is zero.
pub fn otp_input(props: OtpInputProps) -> Result<OtpInputHandle, OtpError> {
    if props.length == 0 {
        return Err(OtpError::InvalidLength(props.length));
    }

    let group = allocate_index(props.id.as_deref());
    core::set_component_type(group, ComponentType::OtpGroup);
    core::set_parent_index(group, get_current_parent_index());

    let state = Rc::new(OtpState {
        group,
        id: props.id,
        value: props.value,
        on_change: props.on_change,
        accepts: props.accepts,
        length: Cell::new(props.length),
        fields: RefCell::new(Vec::with_capacity(props.length)),
        memo: RefCell::new(None),
        placeholder: props.placeholder,
        style: props.style,
        input_mode: props.input_mode,
        tab_index: props.tab_index,
    });

    mount_fields(&state, 0, props.length);

    if props.auto_focus {
        if let Some(first) = state.field(0) {
            focus::focus(first);
        }
    }

    Ok(OtpInputHandle { state })
}

impl OtpInputHandle {
    /// Field component indices in position order.
    pub fn fields(&self) -> Vec<usize> {
        self.state.fields.borrow().clone()
    }

    /// Component index of the field at `pos`.
    pub fn field(&self, pos: usize) -> Option<usize> {
        self.state.field(pos)
    }

    /// Position of the focused field, if focus is inside this input.
    pub fn focused_position(&self) -> Option<usize> {
        let focused = focus::focused()?;
        self.state.fields.borrow().iter().position(|&i| i == focused)
    }

    pub fn length(&self) -> usize {
        self.state.length.get()
    }

    /// Component index of the group.
    pub fn group(&self) -> usize {
        self.state.group
    }

    pub fn input_mode(&self) -> InputMode {
        self.state.input_mode
    }

    /// The character each field currently shows.
    pub fn display(&self) -> Vec<String> {
        self.state.display().to_vec()
    }

    /// Whether the owner's code fills every field with an accepted character.
    pub fn is_complete(&self) -> bool {
        is_complete(&self.state.value.get(), self.length(), &*self.state.accepts)
    }

    /// Change the number of fields.
    ///
    /// Shrinking releases the trailing fields (blurring if one had focus).
    /// The code itself is left alone.
    pub fn set_length(&self, length: usize) -> Result<(), OtpError> {
        if length == 0 {
            return Err(OtpError::InvalidLength(length));
        }

        let current = self.length();
        if length < current {
            let removed: Vec<usize> = self.state.fields.borrow_mut().split_off(length);
            if focus::focused().is_some_and(|f| removed.contains(&f)) {
                focus::blur();
            }
            for index in removed {
                release_index(index);
            }
            self.state.length.set(length);
        } else if length > current {
            self.state.length.set(length);
            mount_fields(&self.state, current, length);
        }

        log::debug!("otp input resized from {current} to {length} fields");
        Ok(())
    }

    /// Change event of field `pos` with the field's raw new text.
    pub fn handle_edit(&self, pos: usize, raw: &str) {
        self.state.handle_edit(pos, raw);
    }

    /// Key press while field `pos` has focus. Returns true if consumed.
    pub fn handle_key(&self, pos: usize, event: &KeyboardEvent) -> bool {
        self.state.handle_key(pos, event)
    }

    /// Field `pos` received focus.
    pub fn handle_focus(&self, pos: usize) {
        self.state.handle_focus(pos);
    }

    /// Release the group and every field, removing all handlers.
    pub fn unmount(self) {
        let group = self.state.group;
        let focus_inside = focus::focused()
            .is_some_and(|f| f == group || self.state.fields.borrow().contains(&f));
        if focus_inside {
            focus::blur();
        }
        self.state.fields.borrow_mut().clear();
        release_index(group);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{get_id, is_allocated, reset_registry};
    use crate::state::global_keys::route_keyboard_event;
    use crate::state::keyboard::Modifiers;
    use crate::state::{edit::reset_edit_state, focus::reset_focus_state};
    use crate::state::keyboard::reset_keyboard_state;

    fn setup() {
        reset_registry();
        reset_focus_state();
        reset_keyboard_state();
        reset_edit_state();
    }

    /// The owner of the code, recording every proposed change.
    struct Owner {
        code: Rc<RefCell<String>>,
        changes: Rc<RefCell<Vec<String>>>,
    }

    impl Owner {
        fn code(&self) -> String {
            self.code.borrow().clone()
        }
    }

    fn mount_with(initial: &str, configure: impl FnOnce(&mut OtpInputProps)) -> (OtpInputHandle, Owner) {
        let code = Rc::new(RefCell::new(initial.to_string()));
        let changes = Rc::new(RefCell::new(Vec::new()));

        let writer = code.clone();
        let log = changes.clone();
        let mut props = OtpInputProps::new(PropValue::from_cell(&code), move |next: &str| {
            log.borrow_mut().push(next.to_string());
            *writer.borrow_mut() = next.to_string();
        });
        configure(&mut props);

        let handle = otp_input(props).expect("mount");
        (handle, Owner { code, changes })
    }

    fn mount(initial: &str) -> (OtpInputHandle, Owner) {
        mount_with(initial, |_| {})
    }

    fn press(key: &str) -> bool {
        route_keyboard_event(KeyboardEvent::new(key))
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    #[test]
    fn test_derive_display() {
        assert_eq!(derive_display("12", 4, &is_ascii_digit), vec!["1", "2", "", ""]);
        assert_eq!(derive_display("1a 4", 4, &is_ascii_digit), vec!["1", "", "", "4"]);
        assert_eq!(derive_display("123456", 3, &is_ascii_digit), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_display_is_memoized_on_value_and_length() {
        setup();
        let (otp, owner) = mount("12");

        let first = otp.state.display();
        let again = otp.state.display();
        assert!(Rc::ptr_eq(&first, &again));

        *owner.code.borrow_mut() = "123".to_string();
        let changed = otp.state.display();
        assert!(!Rc::ptr_eq(&first, &changed));
        assert_eq!(changed[2], "3");
        assert!(Rc::ptr_eq(&changed, &otp.state.display()));

        otp.set_length(4).expect("resize");
        let resized = otp.state.display();
        assert!(!Rc::ptr_eq(&changed, &resized));
        assert_eq!(resized.len(), 4);
    }

    #[test]
    fn test_placeholder_for() {
        assert_eq!(placeholder_for(Some("abcdef"), 6, 0), "a");
        assert_eq!(placeholder_for(Some("abcdef"), 6, 5), "f");
        assert_eq!(placeholder_for(Some("abc"), 6, 0), "1");
        assert_eq!(placeholder_for(Some("abc"), 6, 5), "6");
        assert_eq!(placeholder_for(None, 4, 3), "4");
    }

    #[test]
    fn test_replace_at_pads_with_blanks() {
        assert_eq!(replace_at("123456", 2, '9'), "129456");
        assert_eq!(replace_at("", 0, '1'), "1");
        assert_eq!(replace_at("", 3, '7'), "   7");
        assert_eq!(replace_at("12", 2, '3'), "123");
        assert_eq!(replace_at("123", 1, BLANK), "1 3");
    }

    #[test]
    fn test_is_complete() {
        assert!(is_complete("123456", 6, &is_ascii_digit));
        assert!(!is_complete("12345", 6, &is_ascii_digit));
        assert!(!is_complete("12 456", 6, &is_ascii_digit));
        assert!(!is_complete("1234567", 6, &is_ascii_digit));
        assert!(!is_complete("12345a", 6, &is_ascii_digit));
    }

    // =========================================================================
    // Mounting
    // =========================================================================

    #[test]
    fn test_mount_creates_group_and_fields() {
        setup();
        let (otp, _owner) = mount_with("", |p| {
            p.id = Some("otp".to_string());
            p.tab_index = 10;
            p.style = Attr::BOLD;
        });

        assert_eq!(otp.length(), 6);
        assert_eq!(core::get_component_type(otp.group()), ComponentType::OtpGroup);
        assert!(!interaction::get_focusable(otp.group()));

        let fields = otp.fields();
        assert_eq!(fields.len(), 6);
        for (pos, &index) in fields.iter().enumerate() {
            assert_eq!(core::get_component_type(index), ComponentType::OtpField);
            assert_eq!(core::get_parent_index(index), Some(otp.group()));
            assert!(interaction::get_focusable(index));
            assert_eq!(interaction::get_tab_index(index), 10 + pos as i32);
            assert_eq!(text_arrays::get_text_attrs(index), Attr::BOLD);
            assert_eq!(get_id(index), Some(format!("otp-{pos}")));
        }
        assert_eq!(focus::get_focusable_indices(), fields);
    }

    #[test]
    fn test_zero_length_rejected() {
        setup();
        let result = otp_input(OtpInputProps {
            length: 0,
            ..OtpInputProps::new("", |_| {})
        });
        assert!(matches!(result, Err(OtpError::InvalidLength(0))));
    }

    #[test]
    fn test_auto_focus() {
        setup();
        let (otp, _owner) = mount_with("", |p| p.auto_focus = true);
        assert_eq!(focus::focused(), otp.field(0));

        setup();
        let (_otp, _owner) = mount("");
        assert!(!focus::has_focus());
    }

    #[test]
    fn test_fields_follow_owner_code() {
        setup();
        let (otp, owner) = mount("12");
        let fields = otp.fields();

        assert_eq!(text_arrays::get_text_content(fields[0]), "1");
        assert_eq!(text_arrays::get_text_content(fields[2]), "");

        *owner.code.borrow_mut() = "9x7".to_string();
        assert_eq!(otp.display(), vec!["9", "", "7", "", "", ""]);
        assert_eq!(text_arrays::get_text_content(fields[2]), "7");
    }

    #[test]
    fn test_placeholders() {
        setup();
        let (otp, _owner) = mount_with("", |p| p.placeholder = Some("abcdef".to_string()));
        let fields = otp.fields();
        assert_eq!(text_arrays::get_placeholder(fields[0]), "a");
        assert_eq!(text_arrays::get_placeholder(fields[5]), "f");

        setup();
        let (otp, _owner) = mount_with("", |p| p.placeholder = Some("---".to_string()));
        let fields = otp.fields();
        assert_eq!(text_arrays::get_placeholder(fields[0]), "1");
        assert_eq!(text_arrays::get_placeholder(fields[5]), "6");
    }

    #[test]
    fn test_input_mode_is_only_a_hint() {
        setup();
        let (otp, owner) = mount_with("", |p| p.input_mode = InputMode::Tel);
        assert_eq!(otp.input_mode(), InputMode::Tel);

        otp.handle_edit(0, "+");
        assert_eq!(owner.code(), "");
    }

    // =========================================================================
    // Edit handling
    // =========================================================================

    #[test]
    fn test_typing_writes_and_advances() {
        setup();
        let (otp, owner) = mount_with("", |p| p.auto_focus = true);

        assert!(press("4"));
        assert_eq!(owner.code(), "4");
        assert_eq!(otp.focused_position(), Some(1));
    }

    #[test]
    fn test_accepted_char_at_any_field_of_empty_code() {
        for pos in 0..6 {
            setup();
            let (otp, owner) = mount("");

            otp.handle_edit(pos, "7");

            let code: Vec<char> = owner.code().chars().collect();
            assert_eq!(code.len(), pos + 1);
            assert_eq!(code[pos], '7');
            assert!(code[..pos].iter().all(|&c| c == BLANK));

            let expected_focus = if pos == 5 { None } else { Some(pos + 1) };
            assert_eq!(otp.focused_position(), expected_focus);
        }
    }

    #[test]
    fn test_overwrite_keeps_other_positions() {
        setup();
        let (otp, owner) = mount("123456");
        otp.handle_edit(2, "9");
        assert_eq!(owner.code(), "129456");
        assert_eq!(otp.focused_position(), Some(3));
        assert_eq!(interaction::get_selection_end(otp.fields()[3]), 1);
    }

    #[test]
    fn test_rejected_chars_leave_code_unchanged() {
        setup();
        let (otp, owner) = mount("12");

        otp.handle_edit(2, "a");
        otp.handle_edit(2, "-");
        otp.handle_edit(0, "12a456");
        assert_eq!(owner.code(), "12");
        assert!(owner.changes.borrow().is_empty());
    }

    #[test]
    fn test_input_is_trimmed() {
        setup();
        let (otp, owner) = mount("");
        otp.handle_edit(0, " 3 ");
        assert_eq!(owner.code(), "3");

        otp.handle_edit(0, "   ");
        assert_eq!(owner.code(), " ");
    }

    #[test]
    fn test_full_paste_sets_code_and_blurs() {
        setup();
        let (otp, owner) = mount_with("", |p| p.auto_focus = true);

        otp.handle_edit(0, "123456");
        assert_eq!(owner.code(), "123456");
        assert!(!focus::has_focus());
        assert!(otp.is_complete());
    }

    #[test]
    fn test_terminal_paste_into_focused_field() {
        setup();
        let (_otp, owner) = mount_with("", |p| p.auto_focus = true);

        assert!(crate::state::edit::apply_paste("654321"));
        assert_eq!(owner.code(), "654321");
        assert!(!focus::has_focus());
    }

    #[test]
    fn test_other_paste_lengths_ignored() {
        setup();
        let (otp, owner) = mount("");
        otp.handle_edit(0, "123");
        otp.handle_edit(0, "1234567");
        assert!(owner.changes.borrow().is_empty());
    }

    #[test]
    fn test_deletion_clears_one_position_without_moving() {
        setup();
        let (otp, owner) = mount("123456");
        let fields = otp.fields();

        focus::focus(fields[5]);
        assert!(press("Backspace"));
        assert_eq!(owner.code(), "12345 ");
        assert_eq!(otp.focused_position(), Some(5));
    }

    #[test]
    fn test_deletion_rejected_when_next_field_filled() {
        setup();
        let (otp, owner) = mount("123456");

        otp.handle_edit(2, "");
        assert_eq!(owner.code(), "123456");
        assert!(owner.changes.borrow().is_empty());
    }

    // =========================================================================
    // Key handling
    // =========================================================================

    #[test]
    fn test_backspace_on_empty_field_steps_back_and_clears() {
        setup();
        let (otp, owner) = mount("12");
        let fields = otp.fields();

        focus::focus(fields[2]);
        assert_eq!(otp.focused_position(), Some(2));

        assert!(press("Backspace"));
        assert_eq!(otp.focused_position(), Some(1));
        assert_eq!(owner.code(), "1 ");

        assert!(press("Backspace"));
        assert_eq!(otp.focused_position(), Some(0));
        assert_eq!(owner.code(), "  ");
    }

    #[test]
    fn test_backspace_handler_moves_focus_only() {
        setup();
        let (otp, _owner) = mount("12");
        let fields = otp.fields();

        focus::focus(fields[2]);
        assert!(!otp.handle_key(2, &KeyboardEvent::new("Backspace")));
        assert_eq!(otp.focused_position(), Some(1));
        assert_eq!(interaction::get_selection_end(fields[1]), 1);
    }

    #[test]
    fn test_backspace_on_first_empty_field_is_noop() {
        setup();
        let (otp, owner) = mount_with("", |p| p.auto_focus = true);

        assert!(!press("Backspace"));
        assert_eq!(otp.focused_position(), Some(0));
        assert!(owner.changes.borrow().is_empty());
    }

    #[test]
    fn test_arrow_navigation() {
        setup();
        let (otp, _owner) = mount("123456");
        let fields = otp.fields();
        focus::focus(fields[2]);

        assert!(press("ArrowRight"));
        assert_eq!(otp.focused_position(), Some(3));

        assert!(press("ArrowLeft"));
        assert!(press("ArrowLeft"));
        assert_eq!(otp.focused_position(), Some(1));

        focus::focus(fields[5]);
        assert!(press("ArrowRight"));
        assert_eq!(otp.focused_position(), Some(5));

        focus::focus(fields[0]);
        assert!(press("ArrowLeft"));
        assert_eq!(otp.focused_position(), Some(0));
    }

    #[test]
    fn test_key_press_selects_field_text() {
        setup();
        let (otp, _owner) = mount("123456");
        let field = otp.fields()[3];
        interaction::clear_selection(field);

        otp.handle_key(3, &KeyboardEvent::new("x"));
        assert_eq!(interaction::get_selection_start(field), 0);
        assert_eq!(interaction::get_selection_end(field), 1);
    }

    #[test]
    fn test_shift_tab_jumps_to_last_field() {
        setup();
        let (otp, _owner) = mount("123456");
        let fields = otp.fields();
        focus::focus(fields[1]);

        assert!(route_keyboard_event(KeyboardEvent::with_modifiers("Tab", Modifiers::shift())));
        assert_eq!(otp.focused_position(), Some(5));
    }

    #[test]
    fn test_shift_tab_then_redirects_to_first_gap() {
        setup();
        let (otp, _owner) = mount_with("12", |p| p.auto_focus = true);
        focus::focus(otp.fields()[2]);

        assert!(route_keyboard_event(KeyboardEvent::with_modifiers("Tab", Modifiers::shift())));
        assert_eq!(otp.focused_position(), Some(2));
    }

    // =========================================================================
    // Focus handling
    // =========================================================================

    #[test]
    fn test_focus_redirects_to_empty_predecessor() {
        setup();
        let (otp, _owner) = mount("");
        focus::focus(otp.fields()[4]);
        assert_eq!(otp.focused_position(), Some(0));

        setup();
        let (otp, _owner) = mount("123");
        focus::focus(otp.fields()[5]);
        assert_eq!(otp.focused_position(), Some(3));
    }

    #[test]
    fn test_focus_after_gap_redirects_into_gap() {
        setup();
        let (otp, _owner) = mount("12 4");
        focus::focus(otp.fields()[3]);
        assert_eq!(otp.focused_position(), Some(2));
    }

    #[test]
    fn test_focus_selects_filled_field() {
        setup();
        let (otp, _owner) = mount("123456");
        let field = otp.fields()[4];
        focus::focus(field);
        assert_eq!(interaction::get_selection_end(field), 1);
    }

    // =========================================================================
    // Field count changes and unmount
    // =========================================================================

    #[test]
    fn test_set_length_shrinks_and_blurs() {
        setup();
        let (otp, owner) = mount("123456");
        let fields = otp.fields();
        focus::focus(fields[5]);

        otp.set_length(4).expect("shrink");
        assert_eq!(otp.length(), 4);
        assert_eq!(otp.fields(), fields[..4].to_vec());
        assert!(!is_allocated(fields[5]));
        assert!(!focus::has_focus());
        assert_eq!(otp.display(), vec!["1", "2", "3", "4"]);
        assert_eq!(owner.code(), "123456");
    }

    #[test]
    fn test_set_length_extends() {
        setup();
        let (otp, owner) = mount_with("1234", |p| {
            p.length = 4;
            p.tab_index = 1;
        });

        otp.set_length(6).expect("extend");
        let fields = otp.fields();
        assert_eq!(fields.len(), 6);
        assert_eq!(core::get_parent_index(fields[5]), Some(otp.group()));
        assert_eq!(interaction::get_tab_index(fields[5]), 6);

        otp.handle_edit(4, "5");
        assert_eq!(owner.code(), "12345");
        assert_eq!(otp.focused_position(), Some(5));

        assert!(matches!(otp.set_length(0), Err(OtpError::InvalidLength(0))));
        assert_eq!(otp.length(), 6);
    }

    #[test]
    fn test_unmount_releases_everything() {
        setup();
        let (otp, owner) = mount_with("", |p| p.auto_focus = true);
        let group = otp.group();
        let fields = otp.fields();

        otp.unmount();
        assert!(!is_allocated(group));
        assert!(fields.iter().all(|&f| !is_allocated(f)));
        assert!(!focus::has_focus());

        assert!(!press("5"));
        assert!(!edit::dispatch_edit(fields[0], "5"));
        assert!(owner.changes.borrow().is_empty());
    }

    // =========================================================================
    // Scenario
    // =========================================================================

    #[test]
    fn test_typing_full_code() {
        setup();
        let (otp, owner) = mount_with("", |p| p.auto_focus = true);

        for (i, key) in ["1", "2", "3", "4", "5", "6"].into_iter().enumerate() {
            assert!(!otp.is_complete());
            assert_eq!(otp.focused_position(), Some(i));
            press(key);
        }

        assert_eq!(owner.code(), "123456");
        assert!(otp.is_complete());
        assert_eq!(otp.focused_position(), Some(5));
    }
}
