//! Slot Array - Column storage for one component property.
//!
//! Each cell holds either a static value or a getter. Getters are evaluated on
//! every read, so a cell bound to a getter always reflects the current state
//! of whatever it closes over (that is how field text follows the owner's code).
//!
//! Getters run outside the array's borrow, so a getter may read other cells of
//! the same array.

use std::cell::RefCell;
use std::rc::Rc;

/// One cell of a [`SlotArray`].
pub enum Slot<T> {
    Value(T),
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone> Clone for Slot<T> {
    fn clone(&self) -> Self {
        match self {
            Slot::Value(v) => Slot::Value(v.clone()),
            Slot::Getter(g) => Slot::Getter(g.clone()),
        }
    }
}

/// Growable column of slots indexed by component index.
pub struct SlotArray<T: Clone + 'static> {
    default: T,
    slots: RefCell<Vec<Slot<T>>>,
}

impl<T: Clone + 'static> SlotArray<T> {
    /// Create an empty array. Unset cells read as `default`.
    pub fn new(default: T) -> Self {
        Self {
            default,
            slots: RefCell::new(Vec::new()),
        }
    }

    /// Grow the array so `index` is addressable.
    pub fn ensure(&self, index: usize) {
        let mut slots = self.slots.borrow_mut();
        if slots.len() <= index {
            slots.resize_with(index + 1, || Slot::Value(self.default.clone()));
        }
    }

    /// Read the value at `index`, evaluating a getter if one is bound.
    pub fn get(&self, index: usize) -> T {
        let getter = {
            let slots = self.slots.borrow();
            match slots.get(index) {
                Some(Slot::Value(v)) => return v.clone(),
                Some(Slot::Getter(g)) => g.clone(),
                None => return self.default.clone(),
            }
        };
        getter()
    }

    /// Store a static value at `index`.
    pub fn set_value(&self, index: usize, value: T) {
        self.ensure(index);
        self.slots.borrow_mut()[index] = Slot::Value(value);
    }

    /// Bind a getter at `index`.
    pub fn set_getter<F>(&self, index: usize, getter: F)
    where
        F: Fn() -> T + 'static,
    {
        self.ensure(index);
        self.slots.borrow_mut()[index] = Slot::Getter(Rc::new(getter));
    }

    /// Reset the cell at `index` to the default value.
    pub fn clear(&self, index: usize) {
        let mut slots = self.slots.borrow_mut();
        if let Some(slot) = slots.get_mut(index) {
            *slot = Slot::Value(self.default.clone());
        }
    }

    /// Drop every cell.
    pub fn clear_all(&self) {
        self.slots.borrow_mut().clear();
    }

    /// Number of addressable cells.
    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    /// True when no cell has been allocated.
    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }
}
