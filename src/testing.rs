//! Test-only helpers: a resource type that records how many times it has been dropped.

use std::{
    cell::Cell,
    rc::Rc
};

#[derive(Clone)]
pub struct DropCounter {
    drops: Rc<Cell<usize>>
}

impl DropCounter {
    pub fn new() -> Self {
        init_logger();
        Self { drops: Rc::new(Cell::new(0)) }
    }
    pub fn drops(&self) -> usize { self.drops.get() }
}

#[derive(Debug)]
pub struct Tracked {
    pub value: i32,
    drops: Rc<Cell<usize>>
}

impl Tracked {
    pub fn new(value: i32, counter: &DropCounter) -> Self {
        Self { value, drops: counter.drops.clone() }
    }
    pub fn boxed(value: i32, counter: &DropCounter) -> *mut Self {
        Box::into_raw(Box::new(Self::new(value, counter)))
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

// RUST_LOG=trace cargo test -- --nocapture
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
