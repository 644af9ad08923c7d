//! Session store implementations for Lectern.

pub mod in_memory;

pub use in_memory::InMemorySessions;
