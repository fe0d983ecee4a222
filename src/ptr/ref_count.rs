use crate::{ error::Result, heap };
use std::{
    cell::Cell,
    ptr::NonNull
};

// std::_Ref_count_base, minus the weak count and the deleter vtable
pub(crate) struct RefCount {
    uses: Cell<usize>
}

impl RefCount {
    /// Allocates a control block that starts out with a single owner.
    pub(crate) fn new_inner() -> Result<NonNull<Self>> {
        heap::allocate(Self { uses: Cell::new(1) })
    }

    pub(crate) fn uses(&self) -> usize { self.uses.get() }

    pub(crate) fn increment(&self) {
        let uses = self.uses.get();
        // only reachable by leaking owners; std::rc aborts here too
        if uses == usize::MAX { std::process::abort(); }
        self.uses.set(uses + 1);
    }

    /// Returns the number of owners left after this one goes away.
    pub(crate) fn decrement(&self) -> usize {
        let uses = self.uses.get() - 1;
        self.uses.set(uses);
        uses
    }
}
