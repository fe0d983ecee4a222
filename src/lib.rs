//! Owning pointer primitives modelled on the C++ standard library's `std::unique_ptr` and
//! `std::shared_ptr`.
//!
//! Both pointers free their object through [`heap::deallocate`], so any address handed to them
//! must come from [`heap::allocate`] or `Box::into_raw`.

pub mod error;
pub mod heap;
pub mod ptr {
    pub(crate) mod ref_count;
    pub mod shared_ptr;
    pub mod unique_ptr;
}

#[cfg(test)]
pub(crate) mod testing;

pub use error::{ Error, Result };
pub use ptr::{
    shared_ptr::SharedPtr,
    unique_ptr::UniquePtr
};
