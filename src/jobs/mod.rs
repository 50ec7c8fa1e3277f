//! Curation job processing module.

mod processor;
mod store;

pub use processor::JobProcessor;
pub use store::{JobRecord, JobStore};
