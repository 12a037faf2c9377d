//! Shared CPU storage for tensor elements.
//!
//! Mirrors the role the teacher's `device::Buffer` played for GPU memory,
//! but backs a tensor with a plain heap-allocated buffer instead of a GPU
//! resource. Views created by `reshape`/`transpose` share the same
//! [`Storage`] rather than copying it (spec Design Notes: "all tensors
//! share storage with reference-counted lifetime").

use alloc::rc::Rc;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::{Ref, RefCell, RefMut};

use crate::Element;

/// Reference-counted, interior-mutable element buffer.
///
/// Cloning a `Storage` is cheap and aliases the same underlying memory —
/// this is how reshape/transpose views share data with the tensor they were
/// created from.
#[derive(Clone, Debug)]
pub struct Storage<T: Element> {
    data: Rc<RefCell<Vec<T>>>,
}

impl<T: Element> Storage<T> {
    /// Allocates a zero-filled buffer of `len` elements.
    pub(crate) fn zeroed(len: usize) -> Self {
        Self {
            data: Rc::new(RefCell::new(vec![T::zero(); len])),
        }
    }

    /// Wraps an existing buffer.
    pub(crate) fn from_vec(data: Vec<T>) -> Self {
        Self {
            data: Rc::new(RefCell::new(data)),
        }
    }

    /// Number of elements in the buffer.
    pub(crate) fn len(&self) -> usize {
        self.data.borrow().len()
    }

    /// Borrows the buffer for reading.
    pub(crate) fn borrow(&self) -> Ref<'_, Vec<T>> {
        self.data.borrow()
    }

    /// Borrows the buffer for writing.
    pub(crate) fn borrow_mut(&self) -> RefMut<'_, Vec<T>> {
        self.data.borrow_mut()
    }

    /// Returns `true` if `self` and `other` alias the same buffer.
    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    /// Copies the buffer contents into a new, unshared `Vec`.
    pub(crate) fn to_vec(&self) -> Vec<T> {
        self.data.borrow().clone()
    }
}
