//! Progress module - what survives between sessions.

mod record;

pub use record::{ProgressPatch, ProgressRecord};
