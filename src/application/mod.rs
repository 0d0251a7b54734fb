//! Application layer - sessions and save dispatch.
//!
//! This layer wires the flow machine to the progress store port.

mod save_queue;
mod session;

pub use save_queue::SaveQueue;
pub use session::FlowSession;
