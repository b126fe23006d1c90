//! Core Arrays - Component type and parent.

use super::slot::SlotArray;
use crate::types::ComponentType;

// =============================================================================
// Arrays
// =============================================================================

thread_local! {
    /// Component type.
    static COMPONENT_TYPE: SlotArray<ComponentType> = SlotArray::new(ComponentType::None);

    /// Parent component index (None at root).
    static PARENT_INDEX: SlotArray<Option<usize>> = SlotArray::new(None);
}

// =============================================================================
// Capacity Management
// =============================================================================

/// Ensure arrays have capacity for the given index.
pub fn ensure_capacity(index: usize) {
    COMPONENT_TYPE.with(|arr| arr.ensure(index));
    PARENT_INDEX.with(|arr| arr.ensure(index));
}

/// Clear values at index.
pub fn clear_at_index(index: usize) {
    COMPONENT_TYPE.with(|arr| arr.clear(index));
    PARENT_INDEX.with(|arr| arr.clear(index));
}

/// Reset all arrays.
pub fn reset() {
    COMPONENT_TYPE.with(|arr| arr.clear_all());
    PARENT_INDEX.with(|arr| arr.clear_all());
}

// =============================================================================
// Accessors
// =============================================================================

/// Get component type at index.
pub fn get_component_type(index: usize) -> ComponentType {
    COMPONENT_TYPE.with(|arr| arr.get(index))
}

/// Set component type at index.
pub fn set_component_type(index: usize, component_type: ComponentType) {
    COMPONENT_TYPE.with(|arr| arr.set_value(index, component_type));
}

/// Get parent index at index.
pub fn get_parent_index(index: usize) -> Option<usize> {
    PARENT_INDEX.with(|arr| arr.get(index))
}

/// Set parent index at index.
pub fn set_parent_index(index: usize, parent: Option<usize>) {
    PARENT_INDEX.with(|arr| arr.set_value(index, parent));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_defaults() {
        reset();
        assert_eq!(get_component_type(0), ComponentType::None);
        assert_eq!(get_parent_index(0), None);
    }

    #[test]
    fn test_core_setters() {
        reset();
        set_component_type(1, ComponentType::OtpField);
        set_parent_index(1, Some(0));

        assert_eq!(get_component_type(1), ComponentType::OtpField);
        assert_eq!(get_parent_index(1), Some(0));

        clear_at_index(1);
        assert_eq!(get_component_type(1), ComponentType::None);
        assert_eq!(get_parent_index(1), None);
    }
}
