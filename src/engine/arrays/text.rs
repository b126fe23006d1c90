//! Text Arrays - What a component shows.
//!
//! - textContent: The text string to display
//! - placeholder: Shown when textContent is empty
//! - textAttrs: Text attributes (bold, underline, etc.)

use super::slot::SlotArray;
use crate::types::Attr;

// =============================================================================
// Arrays
// =============================================================================

thread_local! {
    /// Text content string.
    static TEXT_CONTENT: SlotArray<String> = SlotArray::new(String::new());

    /// Placeholder string.
    static PLACEHOLDER: SlotArray<String> = SlotArray::new(String::new());

    /// Text attributes (bold, italic, etc.).
    static TEXT_ATTRS: SlotArray<Attr> = SlotArray::new(Attr::NONE);
}

// =============================================================================
// Capacity Management
// =============================================================================

/// Ensure arrays have capacity for the given index.
pub fn ensure_capacity(index: usize) {
    TEXT_CONTENT.with(|arr| arr.ensure(index));
    PLACEHOLDER.with(|arr| arr.ensure(index));
    TEXT_ATTRS.with(|arr| arr.ensure(index));
}

/// Clear values at index.
pub fn clear_at_index(index: usize) {
    TEXT_CONTENT.with(|arr| arr.clear(index));
    PLACEHOLDER.with(|arr| arr.clear(index));
    TEXT_ATTRS.with(|arr| arr.clear(index));
}

/// Reset all arrays.
pub fn reset() {
    TEXT_CONTENT.with(|arr| arr.clear_all());
    PLACEHOLDER.with(|arr| arr.clear_all());
    TEXT_ATTRS.with(|arr| arr.clear_all());
}

// =============================================================================
// Text Content
// =============================================================================

/// Get text content at index.
pub fn get_text_content(index: usize) -> String {
    TEXT_CONTENT.with(|arr| arr.get(index))
}

/// Set text content at index.
pub fn set_text_content(index: usize, content: String) {
    TEXT_CONTENT.with(|arr| arr.set_value(index, content));
}

/// Set text content from a getter function.
pub fn set_text_content_getter<F>(index: usize, getter: F)
where
    F: Fn() -> String + 'static,
{
    TEXT_CONTENT.with(|arr| arr.set_getter(index, getter));
}

// =============================================================================
// Placeholder
// =============================================================================

/// Get placeholder at index.
pub fn get_placeholder(index: usize) -> String {
    PLACEHOLDER.with(|arr| arr.get(index))
}

/// Set placeholder at index.
pub fn set_placeholder(index: usize, placeholder: String) {
    PLACEHOLDER.with(|arr| arr.set_value(index, placeholder));
}

/// Set placeholder from a getter function.
pub fn set_placeholder_getter<F>(index: usize, getter: F)
where
    F: Fn() -> String + 'static,
{
    PLACEHOLDER.with(|arr| arr.set_getter(index, getter));
}

// =============================================================================
// Text Attributes
// =============================================================================

/// Get text attributes at index.
pub fn get_text_attrs(index: usize) -> Attr {
    TEXT_ATTRS.with(|arr| arr.get(index))
}

/// Set text attributes at index.
pub fn set_text_attrs(index: usize, attrs: Attr) {
    TEXT_ATTRS.with(|arr| arr.set_value(index, attrs));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_content_getter() {
        reset();
        let source = std::rc::Rc::new(std::cell::RefCell::new("1".to_string()));
        let source_for_getter = source.clone();
        set_text_content_getter(0, move || source_for_getter.borrow().clone());

        assert_eq!(get_text_content(0), "1");
        *source.borrow_mut() = "2".to_string();
        assert_eq!(get_text_content(0), "2");
    }

    #[test]
    fn test_placeholder_and_attrs() {
        reset();
        set_placeholder(2, "•".to_string());
        set_text_attrs(2, Attr::BOLD);
        assert_eq!(get_placeholder(2), "•");
        assert_eq!(get_text_attrs(2), Attr::BOLD);

        clear_at_index(2);
        assert_eq!(get_placeholder(2), "");
        assert_eq!(get_text_attrs(2), Attr::NONE);
    }
}
