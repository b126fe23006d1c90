//! Verification Form - An OTP input plus a submit button.
//!
//! The form owns the code. Submission is enabled only while the code fills
//! every field with an accepted character; Enter submits from anywhere, and
//! the focused submit button also submits on Space.

use std::cell::RefCell;
use std::rc::Rc;

use crate::engine::arrays::{core, interaction, text as text_arrays};
use crate::engine::{allocate_index, get_current_parent_index, on_destroy, release_index};
use crate::error::OtpError;
use crate::state::{focus, keyboard};
use crate::types::ComponentType;
use super::otp_input::{otp_input, OtpInputHandle};
use super::types::{Cleanup, FormProps, OtpInputProps, PropValue, SubmitCallback};

struct FormState {
    code: Rc<RefCell<String>>,
    otp: OtpInputHandle,
    button: usize,
    on_submit: Option<SubmitCallback>,
}

impl FormState {
    fn can_submit(&self) -> bool {
        self.otp.is_complete()
    }

    fn submit(&self) -> bool {
        if !self.can_submit() {
            log::debug!("submit ignored, code is incomplete");
            return false;
        }

        let code = self.code.borrow().clone();
        log::info!("submitting {}-character code", code.chars().count());
        if let Some(on_submit) = &self.on_submit {
            on_submit(&code);
        }
        true
    }
}

/// Handle to a mounted verification form.
pub struct FormHandle {
    state: Rc<FormState>,
    enter_cleanup: Cleanup,
}

/// Create a verification form: an OTP input followed by a submit button.
pub fn verification_form(props: FormProps) -> Result<FormHandle, OtpError> {
    let code = Rc::new(RefCell::new(String::new()));
    let writer = code.clone();

    let otp = otp_input(OtpInputProps {
        id: props.id.clone(),
        length: props.length,
        input_mode: props.input_mode,
        placeholder: props.placeholder,
        auto_focus: props.auto_focus,
        style: props.style,
        ..OtpInputProps::new(PropValue::from_cell(&code), move |next: &str| {
            *writer.borrow_mut() = next.to_string();
        })
    })?;

    // ==========================================================================
    // SUBMIT BUTTON - Tabs in after the last field, whatever the field count
    // ==========================================================================

    let button_id = props.id.as_ref().map(|id| format!("{id}-submit"));
    let button = allocate_index(button_id.as_deref());
    core::set_component_type(button, ComponentType::Button);
    core::set_parent_index(button, get_current_parent_index());
    interaction::set_focusable(button, true);
    let otp_for_tab = otp.clone();
    interaction::set_tab_index_getter(button, move || {
        otp_for_tab
            .fields()
            .last()
            .map_or(0, |&last| interaction::get_tab_index(last).saturating_add(1))
    });
    text_arrays::set_text_content(button, props.submit_label);

    let state = Rc::new(FormState {
        code,
        otp,
        button,
        on_submit: props.on_submit,
    });

    let state_for_button = state.clone();
    let button_cleanup = keyboard::on_focused(button, move |event| {
        if event.key == " " {
            state_for_button.submit();
            true
        } else {
            false
        }
    });
    on_destroy(button, move || {
        button_cleanup();
        keyboard::cleanup_index(button);
    });

    // Implicit submission
    let state_for_enter = state.clone();
    let enter_cleanup = keyboard::on_key("Enter", move || {
        state_for_enter.submit();
        true
    });

    Ok(FormHandle {
        state,
        enter_cleanup: Box::new(enter_cleanup),
    })
}

impl FormHandle {
    /// The current code.
    pub fn code(&self) -> String {
        self.state.code.borrow().clone()
    }

    /// Whether the submit button is enabled.
    pub fn can_submit(&self) -> bool {
        self.state.can_submit()
    }

    /// Submit the code. Returns false (and calls nothing) while disabled.
    pub fn submit(&self) -> bool {
        self.state.submit()
    }

    pub fn otp(&self) -> &OtpInputHandle {
        &self.state.otp
    }

    /// Component index of the submit button.
    pub fn submit_button(&self) -> usize {
        self.state.button
    }

    /// Release the button and the OTP input, removing every handler.
    pub fn unmount(self) {
        (self.enter_cleanup)();

        if focus::is_focused(self.state.button) {
            focus::blur();
        }
        release_index(self.state.button);
        self.state.otp.clone().unmount();
    }
}
