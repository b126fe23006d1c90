//! Primitives - Component building blocks.
//!
//! - [`otp_input`] - Segmented one-time-passcode input
//! - [`verification_form`] - OTP input plus a submit button that owns the code
//!
//! # Architecture
//!
//! Components are indices into parallel arrays. Each component:
//! 1. Allocates an index from the registry
//! 2. Writes its properties into the arrays (static values or getters)
//! 3. Registers keyboard, focus and edit handlers for its index
//! 4. Ties handler cleanup to the index's destroy callbacks
//!
//! Values owned elsewhere are bound as getters, so the arrays always read
//! the owner's current state:
//!
//! ```ignore
//! // Field text follows the owner's code
//! otp_input(OtpInputProps::new(PropValue::from_cell(&code), on_change));
//!
//! // Snapshot - the fields never see later changes
//! otp_input(OtpInputProps::new(code.borrow().clone(), on_change));
//! ```

mod form;
mod otp_input;
mod types;

pub use form::{verification_form, FormHandle};
pub use otp_input::{
    derive_display, is_ascii_digit, is_complete, otp_input, placeholder_for, replace_at,
    OtpInputHandle, BLANK,
};
pub use types::*;
