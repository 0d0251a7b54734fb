//! Content module - injected, read-only quiz and story tables.

mod catalog;
mod question;

pub use catalog::{ContentCatalog, ContentError};
pub use question::{Answer, Question};
