use std::alloc::Layout;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Allocation of {} bytes (align {}) failed.", .layout.size(), .layout.align())]
    OutOfMemory { layout: Layout },
}

impl Error {
    #[cold]
    pub fn out_of_memory(layout: Layout) -> Self {
        Error::OutOfMemory { layout }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
pub mod tests {
    use super::Error;
    use std::alloc::Layout;

    #[test]
    fn out_of_memory_message() {
        let err = Error::out_of_memory(Layout::new::<u64>());
        assert!(err.to_string() == "Allocation of 8 bytes (align 8) failed.",
            "Unexpected error message: {}", err);
    }
}
