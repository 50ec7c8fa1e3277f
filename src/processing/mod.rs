//! Processing module for file classification and decoding.
//!
//! This module provides:
//! - File classification (skip, pass through, segment as notebook)
//! - Encoding validation and line ending normalization

pub mod file_processor;
pub mod filter;

pub use file_processor::FileProcessor;
pub use filter::{Classification, FileClassifier, FilterConfig};
