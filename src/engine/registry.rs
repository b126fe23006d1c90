//! Component Registry - Index allocation for parallel arrays.
//!
//! Manages the lifecycle of component indices:
//! - ID to index mapping (an ID registered twice keeps its index)
//! - Free index pool, so a remounted field reuses a released slot
//! - Parent context stack, so fields mount as children of their group
//! - Destroy callbacks (handler cleanup runs when an index is released)

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use super::arrays;

type DestroyCallback = Box<dyn FnOnce()>;

// =============================================================================
// Registry State
// =============================================================================

#[derive(Default)]
struct Registry {
    /// Allocated index -> component ID, iterated in index order.
    ids: BTreeMap<usize, String>,
    by_id: HashMap<String, usize>,
    free: Vec<usize>,
    next_index: usize,
    /// Counter for generated IDs.
    generated: usize,
    parents: Vec<usize>,
}

impl Registry {
    fn take_index(&mut self) -> usize {
        self.free.pop().unwrap_or_else(|| {
            let index = self.next_index;
            self.next_index += 1;
            index
        })
    }

    fn generate_id(&mut self) -> String {
        let id = format!("c{}", self.generated);
        self.generated += 1;
        id
    }

    fn children_of(&self, parent: usize) -> Vec<usize> {
        self.ids
            .keys()
            .copied()
            .filter(|&child| arrays::core::get_parent_index(child) == Some(parent))
            .collect()
    }
}

thread_local! {
    static REGISTRY: RefCell<Registry> = RefCell::new(Registry::default());

    // Kept apart from REGISTRY: callbacks run while the registry is unborrowed
    // and may release further indices.
    static DESTROY_CALLBACKS: RefCell<HashMap<usize, Vec<DestroyCallback>>> = RefCell::new(HashMap::new());
}

// =============================================================================
// Parent Context Stack
// =============================================================================

/// Get current parent index (None if at root).
pub fn get_current_parent_index() -> Option<usize> {
    REGISTRY.with(|reg| reg.borrow().parents.last().copied())
}

/// Push a parent index onto the stack.
pub fn push_parent_context(index: usize) {
    REGISTRY.with(|reg| reg.borrow_mut().parents.push(index));
}

/// Pop a parent index from the stack.
pub fn pop_parent_context() {
    REGISTRY.with(|reg| {
        reg.borrow_mut().parents.pop();
    });
}

// =============================================================================
// Index Allocation
// =============================================================================

/// Allocate an index for a new component.
///
/// Without an `id` one is generated (`c0`, `c1`, ...). An ID that is already
/// registered returns its existing index.
pub fn allocate_index(id: Option<&str>) -> usize {
    let index = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let component_id = match id {
            Some(id) => id.to_string(),
            None => reg.generate_id(),
        };
        if let Some(&index) = reg.by_id.get(&component_id) {
            return index;
        }

        let index = reg.take_index();
        reg.by_id.insert(component_id.clone(), index);
        reg.ids.insert(index, component_id);
        index
    });

    arrays::ensure_all_capacity(index);
    index
}

/// Release an index back to the pool, children first.
pub fn release_index(index: usize) {
    let children = REGISTRY.with(|reg| {
        let reg = reg.borrow();
        reg.ids.contains_key(&index).then(|| reg.children_of(index))
    });
    let Some(children) = children else { return };

    for child in children {
        release_index(child);
    }

    run_destroy_callbacks(index);

    // A destroy callback may already have released this index
    let now_empty = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.ids.remove(&index)?;
        reg.by_id.remove(&id);
        reg.free.push(index);
        Some(reg.ids.is_empty())
    });
    let Some(now_empty) = now_empty else { return };

    arrays::clear_all_at_index(index);

    // Last component gone: start over from index 0
    if now_empty {
        arrays::reset_all_arrays();
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            reg.free.clear();
            reg.next_index = 0;
        });
    }
}

// =============================================================================
// Destroy Callbacks
// =============================================================================

/// Register a callback to run when the component at `index` is destroyed.
pub fn on_destroy(index: usize, callback: impl FnOnce() + 'static) {
    DESTROY_CALLBACKS.with(|callbacks| {
        callbacks
            .borrow_mut()
            .entry(index)
            .or_default()
            .push(Box::new(callback));
    });
}

fn run_destroy_callbacks(index: usize) {
    let callbacks = DESTROY_CALLBACKS.with(|callbacks| callbacks.borrow_mut().remove(&index));
    for callback in callbacks.into_iter().flatten() {
        callback();
    }
}

// =============================================================================
// Lookups
// =============================================================================

/// Get ID for an index.
pub fn get_id(index: usize) -> Option<String> {
    REGISTRY.with(|reg| reg.borrow().ids.get(&index).cloned())
}

/// Get all currently allocated indices in ascending order.
pub fn get_allocated_indices() -> Vec<usize> {
    REGISTRY.with(|reg| reg.borrow().ids.keys().copied().collect())
}

/// Check if an index is currently allocated.
pub fn is_allocated(index: usize) -> bool {
    REGISTRY.with(|reg| reg.borrow().ids.contains_key(&index))
}

// =============================================================================
// Reset (for testing)
// =============================================================================

/// Reset all registry state (for testing).
pub fn reset_registry() {
    REGISTRY.with(|reg| *reg.borrow_mut() = Registry::default());
    DESTROY_CALLBACKS.with(|callbacks| callbacks.borrow_mut().clear());
    arrays::reset_all_arrays();
}
