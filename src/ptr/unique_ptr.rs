//! Exclusive-ownership pointer, modelled on `std::unique_ptr`.
//!
//! A `UniquePtr` is move-only: there is no `Clone` impl, so ownership can be handed over but never
//! duplicated.
//!
//! ```compile_fail
//! use cpp_ptrs::UniquePtr;
//! struct Token;
//! let a = UniquePtr::make_unique(Token).unwrap();
//! let b: UniquePtr<Token> = a.clone();
//! ```

use crate::{ error::Result, heap };
use std::{
    fmt::{ Debug, Display },
    marker::PhantomData,
    mem,
    ops::{ Deref, DerefMut },
    ptr::{ self, NonNull }
};

// std::unique_ptr
#[repr(C)]
pub struct UniquePtr<T> {
    _ptr: *mut T,
    _data: PhantomData<T>
}

// The pointee is unaliased, so this is as thread-safe as T itself.
unsafe impl<T: Send> Send for UniquePtr<T> {}
unsafe impl<T: Sync> Sync for UniquePtr<T> {}

impl<T> UniquePtr<T> {
    /// Creates a pointer that owns nothing.
    pub const fn null() -> Self {
        Self { _ptr: ptr::null_mut(), _data: PhantomData }
    }

    /// Takes ownership of an existing allocation. `ptr` may be null.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must come from [`heap::allocate`] or `Box::into_raw` for this `T`, and no
    /// other owner may free it.
    pub const unsafe fn from_raw(ptr: *mut T) -> Self {
        Self { _ptr: ptr, _data: PhantomData }
    }

    /// Moves `data` onto the heap and wraps it.
    pub fn make_unique(data: T) -> Result<Self> {
        let ptr = heap::allocate(data)?;
        Ok(unsafe { Self::from_raw(ptr.as_ptr()) })
    }

    pub fn get(&self) -> *mut T { self._ptr }
    pub fn is_null(&self) -> bool { self._ptr.is_null() }

    pub fn as_ref(&self) -> Option<&T> { unsafe { self._ptr.as_ref() } }
    pub fn as_mut(&mut self) -> Option<&mut T> { unsafe { self._ptr.as_mut() } }

    /// # Safety
    ///
    /// The pointer must not be null.
    pub unsafe fn get_unchecked(&self) -> &T { unsafe { &*self._ptr } }

    /// # Safety
    ///
    /// The pointer must not be null.
    pub unsafe fn get_unchecked_mut(&mut self) -> &mut T { unsafe { &mut *self._ptr } }

    /// Gives up ownership without freeing anything. The caller is now responsible for the
    /// returned address.
    #[must_use = "the released allocation leaks unless it is freed or re-wrapped"]
    pub fn release(&mut self) -> *mut T {
        mem::replace(&mut self._ptr, ptr::null_mut())
    }

    /// Frees the held object, if any, and becomes null.
    pub fn reset(&mut self) {
        unsafe { self.reset_with(ptr::null_mut()) }
    }

    /// Frees the held object, if any, and takes ownership of `ptr` instead. Passing the address
    /// that is already held does nothing.
    ///
    /// # Safety
    ///
    /// Same contract as [`UniquePtr::from_raw`].
    pub unsafe fn reset_with(&mut self, ptr: *mut T) {
        if ptr == self._ptr { return; }
        // the field is updated before the old object is dropped, so its destructor never sees
        // this pointer still holding it
        let old = mem::replace(&mut self._ptr, ptr);
        if let Some(old) = NonNull::new(old) {
            unsafe { heap::deallocate(old) }
        }
    }

    /// Moves ownership out into a new pointer, leaving this one null.
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::null())
    }

    /// Move-assignment: frees whatever this pointer holds, then takes over `source`, which is
    /// left null.
    pub fn move_from(&mut self, source: &mut Self) {
        self.reset();
        mem::swap(self, source);
    }
}

impl<T> Default for UniquePtr<T> {
    fn default() -> Self { Self::null() }
}

impl<T> From<Box<T>> for UniquePtr<T> {
    fn from(value: Box<T>) -> Self {
        unsafe { Self::from_raw(Box::into_raw(value)) }
    }
}

impl<T> Drop for UniquePtr<T> {
    fn drop(&mut self) {
        if let Some(ptr) = NonNull::new(self._ptr) {
            unsafe { heap::deallocate(ptr) }
        }
    }
}

impl<T> Deref for UniquePtr<T> {
    type Target = T;
    fn deref(&self) -> &Self::Target {
        assert!(!self.is_null(), "Tried to dereference a null UniquePtr");
        unsafe { &*self._ptr }
    }
}

impl<T> DerefMut for UniquePtr<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        assert!(!self.is_null(), "Tried to dereference a null UniquePtr");
        unsafe { &mut *self._ptr }
    }
}

impl<T> Debug for UniquePtr<T>
where T: Debug
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UniquePtr {{ data: {:?} }}", self.as_ref())
    }
}

impl<T> Display for UniquePtr<T>
where T: Display
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.as_ref() {
            Some(v) => write!(f, "{}", v),
            None => write!(f, "nullptr")
        }
    }
}
