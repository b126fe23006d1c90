//! Engine - Component registry and parallel arrays.
//!
//! Components are NOT objects. They are indices into parallel arrays:
//!
//! ```text
//! Index 0: OtpGroup (parent=None)
//! Index 1: OtpField (parent=0, text=getter, placeholder="1", focusable)
//! Index 2: OtpField (parent=0, text=getter, placeholder="2", focusable)
//! ```

mod registry;
pub mod arrays;

pub use registry::*;
