//! Output module for writing records to JSON Lines.

mod jsonl_writer;
mod sink;

pub use jsonl_writer::JsonlWriter;
pub use sink::{RecordSink, SinkSummary};
