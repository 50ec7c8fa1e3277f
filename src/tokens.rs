//! Token counting for corpus statistics.

use anyhow::Result;

/// Token counter trait for counting tokens in text.
pub trait TokenCounter: Send + Sync {
    /// Count the number of tokens in the given text.
    fn count_tokens(&self, text: &str) -> usize;
}

/// Default token counter using tiktoken (cl100k_base encoding).
pub struct TiktokenCounter {
    bpe: tiktoken_rs::CoreBPE,
}

impl TiktokenCounter {
    /// Create a token counter with the cl100k_base encoding.
    pub fn new() -> Self {
        let bpe = tiktoken_rs::cl100k_base().expect("Failed to load cl100k_base encoding");
        Self { bpe }
    }

    /// Create a token counter with a specific encoding.
    pub fn with_encoding(encoding_name: &str) -> Result<Self> {
        let bpe = match encoding_name {
            "cl100k_base" => tiktoken_rs::cl100k_base()?,
            "p50k_base" => tiktoken_rs::p50k_base()?,
            "r50k_base" => tiktoken_rs::r50k_base()?,
            _ => tiktoken_rs::cl100k_base()?,
        };
        Ok(Self { bpe })
    }
}

impl Default for TiktokenCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenCounter for TiktokenCounter {
    fn count_tokens(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }
}

/// Count tokens using the shared default counter.
pub fn count_tokens(text: &str) -> usize {
    lazy_static::lazy_static! {
        static ref COUNTER: TiktokenCounter = TiktokenCounter::new();
    }
    COUNTER.count_tokens(text)
}
