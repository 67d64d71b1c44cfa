//! Storage layer: atomic document files and key-value store adapters.

mod atomic_file;
mod file_store;
mod memory_store;

pub use atomic_file::{AtomicFile, AtomicFileError, FileFormat};
pub use file_store::FileKeyValueStore;
pub use memory_store::InMemoryKeyValueStore;
