//! Primitive types - Props and cleanup.
//!
//! These types define the interface for component props.
//! Props support static values and getters; a getter is read every time the
//! value is needed, so a prop bound to owner state always sees the latest value.

use std::cell::RefCell;
use std::rc::Rc;

use crate::types::{Attr, InputMode};

/// Number of fields when none is configured.
pub const DEFAULT_LENGTH: usize = 6;

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function returned by components.
///
/// Call this to unmount the component and release resources.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Callback Types
// =============================================================================

/// Code change callback. Receives the proposed new full code.
///
/// Rc so the callback can be cloned into every field's handlers.
pub type ChangeCallback = Rc<dyn Fn(&str)>;

/// Form submit callback. Receives the submitted code.
pub type SubmitCallback = Rc<dyn Fn(&str)>;

/// Accepted-character predicate.
pub type CharPredicate = Rc<dyn Fn(char) -> bool>;

// =============================================================================
// Prop Value
// =============================================================================

/// A property value that can be static or a getter.
pub enum PropValue<T: Clone + 'static> {
    /// Static value.
    Static(T),
    /// Getter function (called each time value is needed).
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone + 'static> PropValue<T> {
    /// Get the current value (for immediate reads).
    pub fn get(&self) -> T {
        match self {
            PropValue::Static(v) => v.clone(),
            PropValue::Getter(f) => f(),
        }
    }

    /// Wrap a getter function.
    pub fn getter<F>(f: F) -> Self
    where
        F: Fn() -> T + 'static,
    {
        PropValue::Getter(Rc::new(f))
    }

    /// Read through a shared cell owned by someone else.
    pub fn from_cell(cell: &Rc<RefCell<T>>) -> Self {
        let cell = cell.clone();
        PropValue::Getter(Rc::new(move || cell.borrow().clone()))
    }
}

impl<T: Clone + 'static> Clone for PropValue<T> {
    fn clone(&self) -> Self {
        match self {
            PropValue::Static(v) => PropValue::Static(v.clone()),
            PropValue::Getter(f) => PropValue::Getter(f.clone()),
        }
    }
}

impl<T: Clone + Default + 'static> Default for PropValue<T> {
    fn default() -> Self {
        PropValue::Static(T::default())
    }
}

impl<T: Clone + 'static> From<T> for PropValue<T> {
    fn from(value: T) -> Self {
        PropValue::Static(value)
    }
}

impl From<&str> for PropValue<String> {
    fn from(value: &str) -> Self {
        PropValue::Static(value.to_string())
    }
}

// =============================================================================
// OTP Input Props
// =============================================================================

/// Properties for the OTP input.
///
/// # Example
///
/// ```ignore
/// use spark_otp::primitives::{otp_input, OtpInputProps, PropValue};
///
/// let code = Rc::new(RefCell::new(String::new()));
/// let writer = code.clone();
///
/// let otp = otp_input(OtpInputProps {
///     placeholder: Some("------".to_string()),
///     auto_focus: true,
///     ..OtpInputProps::new(PropValue::from_cell(&code), move |next| {
///         *writer.borrow_mut() = next.to_string();
///     })
/// })?;
/// ```
pub struct OtpInputProps {
    /// Optional id. Fields get `{id}-{pos}`, the group gets `{id}`.
    pub id: Option<String>,

    /// The owner's code. Read only; the widget proposes changes via `on_change`.
    pub value: PropValue<String>,

    /// Called with the proposed new code on every accepted edit.
    pub on_change: ChangeCallback,

    /// Number of fields.
    pub length: usize,

    /// Keyboard hint. Never used for validation.
    pub input_mode: InputMode,

    /// Text attributes applied to every field.
    pub style: Attr,

    /// Per-field placeholder source (used only if its char count equals `length`).
    pub placeholder: Option<String>,

    /// Focus field 0 at mount.
    pub auto_focus: bool,

    /// Accepted-character predicate.
    pub accepts: CharPredicate,

    /// Tab index of field 0; field `pos` gets `tab_index + pos`.
    pub tab_index: i32,
}

impl OtpInputProps {
    /// Props with the given value and change callback, defaults elsewhere.
    pub fn new<V, F>(value: V, on_change: F) -> Self
    where
        V: Into<PropValue<String>>,
        F: Fn(&str) + 'static,
    {
        Self {
            id: None,
            value: value.into(),
            on_change: Rc::new(on_change),
            length: DEFAULT_LENGTH,
            input_mode: InputMode::default(),
            style: Attr::NONE,
            placeholder: None,
            auto_focus: false,
            accepts: Rc::new(super::otp_input::is_ascii_digit),
            tab_index: 0,
        }
    }
}

// =============================================================================
// Form Props
// =============================================================================

/// Properties for the verification form.
pub struct FormProps {
    /// Optional id, passed through to the OTP input.
    pub id: Option<String>,

    /// Number of fields.
    pub length: usize,

    /// Keyboard hint for the fields.
    pub input_mode: InputMode,

    /// Placeholder for the fields.
    pub placeholder: Option<String>,

    /// Focus the first field at mount.
    pub auto_focus: bool,

    /// Text attributes applied to every field.
    pub style: Attr,

    /// Label of the submit button.
    pub submit_label: String,

    /// Called with the code when the form is submitted.
    pub on_submit: Option<SubmitCallback>,
}

impl Default for FormProps {
    fn default() -> Self {
        Self {
            id: None,
            length: DEFAULT_LENGTH,
            input_mode: InputMode::default(),
            placeholder: None,
            auto_focus: true,
            style: Attr::NONE,
            submit_label: "Verify".to_string(),
            on_submit: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prop_value_reads() {
        let fixed: PropValue<String> = "12".into();
        assert_eq!(fixed.get(), "12");

        let cell = Rc::new(RefCell::new("1".to_string()));
        let live = PropValue::from_cell(&cell);
        assert_eq!(live.get(), "1");
        *cell.borrow_mut() = "12".to_string();
        assert_eq!(live.get(), "12");
        assert_eq!(live.clone().get(), "12");
    }

    #[test]
    fn test_otp_props_defaults() {
        let props = OtpInputProps::new("", |_| {});
        assert_eq!(props.length, DEFAULT_LENGTH);
        assert_eq!(props.input_mode, InputMode::Number);
        assert!(!props.auto_focus);
        assert!((props.accepts)('5'));
        assert!(!(props.accepts)('a'));
    }

    #[test]
    fn test_form_props_defaults() {
        let props = FormProps::default();
        assert_eq!(props.length, 6);
        assert!(props.auto_focus);
        assert_eq!(props.submit_label, "Verify");
        assert!(props.on_submit.is_none());
    }
}
