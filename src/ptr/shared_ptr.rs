//! Shared-ownership pointer, modelled on `std::shared_ptr`.
//!
//! Every `SharedPtr` that co-owns an object points at the same out-of-line `RefCount`. Cloning
//! bumps the count, dropping or reassigning lowers it, and whichever owner takes it to zero frees
//! both the object and the control block. The count is a plain `Cell`, so `SharedPtr` is neither
//! `Send` nor `Sync`.

use super::ref_count::RefCount;
use crate::{ error::Result, heap };
use std::{
    fmt::{ Debug, Display },
    marker::PhantomData,
    mem,
    ops::Deref,
    ptr::{ self, NonNull }
};

// std::shared_ptr
// _ptr and _rep are either both null or both set.
#[repr(C)]
pub struct SharedPtr<T> {
    _ptr: *mut T,
    _rep: *mut RefCount,
    _data: PhantomData<T>
}

impl<T> SharedPtr<T> {
    /// Creates a pointer that owns nothing and has no control block.
    pub const fn null() -> Self {
        Self { _ptr: ptr::null_mut(), _rep: ptr::null_mut(), _data: PhantomData }
    }

    pub const fn new() -> Self { Self::null() }

    /// Takes ownership of an existing allocation and gives it a fresh control block with a
    /// count of 1. A null `ptr` allocates nothing and yields a null pointer.
    ///
    /// If the control block can't be allocated, the error is returned and the caller still owns
    /// `ptr`.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must come from [`heap::allocate`] or `Box::into_raw` for this `T`, and no
    /// other owner (including another `SharedPtr` family) may free it.
    pub unsafe fn from_raw(ptr: *mut T) -> Result<Self> {
        if ptr.is_null() { return Ok(Self::null()) }
        let _rep = RefCount::new_inner()?;
        log::trace!("control block {:p} now owns {:p}", _rep, ptr);
        Ok(Self { _ptr: ptr, _rep: _rep.as_ptr(), _data: PhantomData })
    }

    /// Construct an object of type T and wrap it in a SharedPtr to act as a reference counting
    /// smart pointer.
    pub fn make_shared(data: T) -> Result<Self> {
        let ptr = heap::allocate(data)?;
        match unsafe { Self::from_raw(ptr.as_ptr()) } {
            Ok(v) => Ok(v),
            Err(e) => {
                unsafe { heap::deallocate(ptr) }
                Err(e)
            }
        }
    }

    fn get_rep(&self) -> Option<&RefCount> { unsafe { self._rep.as_ref() } }

    pub fn get(&self) -> *mut T { self._ptr }
    pub fn is_null(&self) -> bool { self._ptr.is_null() }

    pub fn as_ref(&self) -> Option<&T> { unsafe { self._ptr.as_ref() } }

    /// Mutable access, only while this is the sole owner.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self.unique() {
            true => Some(unsafe { &mut *self._ptr }),
            false => None
        }
    }

    /// # Safety
    ///
    /// The pointer must not be null.
    pub unsafe fn get_unchecked(&self) -> &T { unsafe { &*self._ptr } }

    /// Number of `SharedPtr`s sharing this control block, or 0 for a null pointer.
    pub fn use_count(&self) -> usize {
        self.get_rep().map_or(0, |r| r.uses())
    }

    pub fn unique(&self) -> bool { self.use_count() == 1 }

    /// True when both pointers share one control block (or are both null).
    pub fn ptr_eq(this: &Self, other: &Self) -> bool { this._rep == other._rep }

    /// Copy-assignment. Gives up this pointer's share and joins `other`'s.
    pub fn assign(&mut self, other: &Self) {
        if Self::ptr_eq(self, other) { return; }
        // take the new share before letting go of the old one; dropping the old object may
        // drop the last other owner of `other`'s block
        if let Some(rep) = other.get_rep() { rep.increment(); }
        self.release();
        self._ptr = other._ptr;
        self._rep = other._rep;
    }

    /// Moves this pointer's share into a new pointer, leaving this one null. The count is not
    /// touched.
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::null())
    }

    /// Move-assignment. Gives up this pointer's share, then takes over `other`'s without
    /// changing its count. `other` is left null.
    pub fn move_from(&mut self, other: &mut Self) {
        self.release();
        mem::swap(self, other);
    }

    /// Gives up this pointer's share and becomes null.
    pub fn reset(&mut self) { self.release(); }

    /// Gives up this pointer's share and takes ownership of `ptr` with a new control block.
    /// The control block is allocated first, so on error this pointer is left untouched and
    /// the caller still owns `ptr`. Passing the address that is already held does nothing.
    ///
    /// # Safety
    ///
    /// Same contract as [`SharedPtr::from_raw`].
    pub unsafe fn reset_with(&mut self, ptr: *mut T) -> Result<()> {
        if ptr == self._ptr { return Ok(()) }
        let fresh = unsafe { Self::from_raw(ptr)? };
        *self = fresh;
        Ok(())
    }

    fn release(&mut self) {
        let _ptr = mem::replace(&mut self._ptr, ptr::null_mut());
        let _rep = mem::replace(&mut self._rep, ptr::null_mut());
        let Some(rep) = NonNull::new(_rep) else { return };
        if unsafe { rep.as_ref() }.decrement() == 0 {
            log::trace!("last owner gone, freeing {:p} and control block {:p}", _ptr, rep);
            unsafe {
                heap::deallocate(NonNull::new_unchecked(_ptr));
                heap::deallocate(rep);
            }
        }
    }
}

impl<T> Default for SharedPtr<T> {
    fn default() -> Self { Self::null() }
}

impl<T> Clone for SharedPtr<T> {
    fn clone(&self) -> Self {
        if let Some(rep) = self.get_rep() { rep.increment(); }
        Self {
            _ptr: self._ptr,
            _rep: self._rep,
            _data: PhantomData
        }
    }
}

impl<T> Drop for SharedPtr<T> {
    fn drop(&mut self) { self.release(); }
}

impl<T> Deref for SharedPtr<T> {
    type Target = T;
    fn deref(&self) -> &Self::Target {
        assert!(!self.is_null(), "Tried to dereference a null SharedPtr");
        unsafe { &*self._ptr }
    }
}

impl<T> Debug for SharedPtr<T>
where T: Debug
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SharedPtr {{ data: {:?}, strong: {} }}", self.as_ref(), self.use_count())
    }
}

impl<T> Display for SharedPtr<T>
where T: Display
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.as_ref() {
            Some(v) => write!(f, "{}", v),
            None => write!(f, "nullptr")
        }
    }
}
