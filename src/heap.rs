//! Single-object heap storage shared by every pointer type in this crate.
//!
//! Objects are laid out with `Layout::new::<T>()` on the global allocator, which is the same
//! layout `Box<T>` uses, so an address from `Box::into_raw` can be freed here and vice versa.

use crate::error::{ Error, Result };
use allocator_api2::alloc::{ Allocator, Global };
use std::{
    alloc::Layout,
    ptr::{ self, NonNull }
};

/// Moves `data` into a fresh allocation and returns its address.
pub fn allocate<T>(data: T) -> Result<NonNull<T>> {
    let layout = Layout::new::<T>();
    let ptr = match Global.allocate(layout) {
        Ok(p) => p.cast::<T>(),
        Err(_) => {
            log::debug!("allocation of {} bytes for {} failed", layout.size(), std::any::type_name::<T>());
            return Err(Error::out_of_memory(layout));
        }
    };
    unsafe { ptr::write(ptr.as_ptr(), data); }
    Ok(ptr)
}

/// Drops the object at `ptr` and returns its memory to the allocator.
///
/// # Safety
///
/// `ptr` must have come from [`allocate`] (or `Box::into_raw`) for the same `T`, and nothing may
/// use it afterwards.
pub unsafe fn deallocate<T>(ptr: NonNull<T>) {
    unsafe {
        ptr::drop_in_place(ptr.as_ptr());
        Global.deallocate(ptr.cast::<u8>(), Layout::new::<T>());
    }
}
