//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ProgressStore` - Per-user persistence of assessment progress

mod progress_store;

pub use progress_store::{ProgressStore, ProgressStoreError};
