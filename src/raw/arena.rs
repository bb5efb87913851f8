use alloc::vec::Vec;

use super::handle::Handle;

/// Slot storage with a free list.
///
/// Handles returned by [`Arena::alloc`] stay valid until that exact slot is
/// taken; taking one slot never moves another. `clear` invalidates every
/// outstanding handle at once.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free_list: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free_list.len())
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(h) = self.free_list.pop() {
            // Reuse a free slot/handle.
            self.slots[h.index()] = Some(element);
            h
        } else {
            // Strict less-than: at most `Handle::MAX` slots may exist after the push,
            // so every slot index remains representable as a `Handle`.
            assert!(
                self.slots.len() < Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX
            );
            // Allocate a new slot/handle.
            self.slots.push(Some(element));
            Handle::new(self.slots.len() - 1)
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    /// Returns a reference to an element by handle from a raw pointer.
    ///
    /// # Safety
    /// - `ptr` must point to a valid, allocated `Arena<T>`.
    #[inline]
    pub(crate) unsafe fn get_ptr<'a>(ptr: *const Self, handle: Handle) -> &'a T {
        // SAFETY: Caller guarantees ptr is valid. We only read from the slots field.
        // The explicit reference is intentional to index into the Vec.
        unsafe { (&(*ptr).slots)[handle.index()].as_ref().expect("`Arena::get_ptr()` - `handle` is invalid!") }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.index()].take().expect("`Arena::take()` - `handle` is invalid!");
        self.free_list.push(handle);
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
    }
}
