//! Adapters - Implementations of port interfaces.
//!
//! - `storage` - Progress store implementations (in-memory, file)

pub mod storage;

pub use storage::{FileProgressStore, InMemoryProgressStore};
