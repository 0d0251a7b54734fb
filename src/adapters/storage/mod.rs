//! Storage Adapters
//!
//! Implementations of the ProgressStore port.
//!
//! ## Available Adapters
//!
//! - **FileProgressStore** - One YAML file per user on disk
//! - **InMemoryProgressStore** - Records held in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileProgressStore, InMemoryProgressStore};
//!
//! // Persistent: file-based storage
//! let store = FileProgressStore::new("./data/progress");
//!
//! // Testing: in-memory storage
//! let store = InMemoryProgressStore::new();
//! ```

mod file_progress_store;
mod in_memory_progress_store;

pub use file_progress_store::FileProgressStore;
pub use in_memory_progress_store::InMemoryProgressStore;
