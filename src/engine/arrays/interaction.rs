//! Interaction Arrays - Focus and selection state.
//!
//! - focusable: Can receive focus
//! - tabIndex: Tab order
//! - selectionStart/selectionEnd: Selected character range of a text field

use super::slot::SlotArray;

// =============================================================================
// Arrays
// =============================================================================

thread_local! {
    /// Is component focusable.
    static FOCUSABLE: SlotArray<bool> = SlotArray::new(false);

    /// Tab index for focus navigation (higher = later in order).
    static TAB_INDEX: SlotArray<i32> = SlotArray::new(0);

    /// Selection start (for text fields).
    static SELECTION_START: SlotArray<u16> = SlotArray::new(0);

    /// Selection end (for text fields).
    static SELECTION_END: SlotArray<u16> = SlotArray::new(0);
}

// =============================================================================
// Capacity Management
// =============================================================================

/// Ensure arrays have capacity for the given index.
pub fn ensure_capacity(index: usize) {
    FOCUSABLE.with(|arr| arr.ensure(index));
    TAB_INDEX.with(|arr| arr.ensure(index));
    SELECTION_START.with(|arr| arr.ensure(index));
    SELECTION_END.with(|arr| arr.ensure(index));
}

/// Clear values at index.
pub fn clear_at_index(index: usize) {
    FOCUSABLE.with(|arr| arr.clear(index));
    TAB_INDEX.with(|arr| arr.clear(index));
    SELECTION_START.with(|arr| arr.clear(index));
    SELECTION_END.with(|arr| arr.clear(index));
}

/// Reset all arrays.
pub fn reset() {
    FOCUSABLE.with(|arr| arr.clear_all());
    TAB_INDEX.with(|arr| arr.clear_all());
    SELECTION_START.with(|arr| arr.clear_all());
    SELECTION_END.with(|arr| arr.clear_all());
}

// =============================================================================
// Focusable
// =============================================================================

/// Get focusable at index.
pub fn get_focusable(index: usize) -> bool {
    FOCUSABLE.with(|arr| arr.get(index))
}

/// Set focusable at index.
pub fn set_focusable(index: usize, focusable: bool) {
    FOCUSABLE.with(|arr| arr.set_value(index, focusable));
}

// =============================================================================
// Tab Index
// =============================================================================

/// Get tab index at index.
pub fn get_tab_index(index: usize) -> i32 {
    TAB_INDEX.with(|arr| arr.get(index))
}

/// Set tab index at index.
pub fn set_tab_index(index: usize, tab_index: i32) {
    TAB_INDEX.with(|arr| arr.set_value(index, tab_index));
}

/// Set tab index from a getter function.
pub fn set_tab_index_getter<F>(index: usize, getter: F)
where
    F: Fn() -> i32 + 'static,
{
    TAB_INDEX.with(|arr| arr.set_getter(index, getter));
}

// =============================================================================
// Selection
// =============================================================================

/// Get selection start at index.
pub fn get_selection_start(index: usize) -> u16 {
    SELECTION_START.with(|arr| arr.get(index))
}

/// Get selection end at index.
pub fn get_selection_end(index: usize) -> u16 {
    SELECTION_END.with(|arr| arr.get(index))
}

/// Set selection range at index.
pub fn set_selection(index: usize, start: u16, end: u16) {
    SELECTION_START.with(|arr| arr.set_value(index, start));
    SELECTION_END.with(|arr| arr.set_value(index, end));
}

/// Clear selection at index (set start == end).
pub fn clear_selection(index: usize) {
    set_selection(index, 0, 0);
}

/// Check if there is an active selection at index.
pub fn has_selection(index: usize) -> bool {
    get_selection_start(index) != get_selection_end(index)
}
