//! Small shared utilities.

pub mod byte_size;

pub use byte_size::byte_size;
