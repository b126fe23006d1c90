//! Parallel Arrays
//!
//! All component state lives in these parallel arrays.
//! Each array index corresponds to one component.
//!
//! # Array Categories
//!
//! - **core**: Component type, parent, visibility
//! - **text**: Text content, placeholder, attributes
//! - **interaction**: Focusability, tab order, selection

pub mod core;
pub mod interaction;
pub mod slot;
pub mod text;

use self::core as core_arrays;
use self::interaction as interaction_arrays;
use self::text as text_arrays;

/// Ensure all arrays have capacity for the given index.
///
/// Called by registry when allocating.
pub fn ensure_all_capacity(index: usize) {
    core_arrays::ensure_capacity(index);
    text_arrays::ensure_capacity(index);
    interaction_arrays::ensure_capacity(index);
}

/// Clear all array values at an index.
///
/// Called by registry when releasing.
pub fn clear_all_at_index(index: usize) {
    core_arrays::clear_at_index(index);
    text_arrays::clear_at_index(index);
    interaction_arrays::clear_at_index(index);
}

/// Reset all parallel arrays to release memory.
///
/// Called automatically when the last component is released.
pub fn reset_all_arrays() {
    core_arrays::reset();
    text_arrays::reset();
    interaction_arrays::reset();
}
