use std::num::NonZeroUsize;

use crate::error::{Error, Result};

/// Largest byte range a single shard may cover.
pub const MAX_CHUNK_SIZE: usize = i32::MAX as usize;

/// Default distance a shard may look back for the previous line break. Must
/// exceed the longest line: a 100 byte key plus `;-99.9\n` fits easily.
pub const DEFAULT_LOOKBACK: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Number of shards the file is split into when `chunk_size` is unset.
    pub workers: usize,
    /// Nominal shard length in bytes; derived from `workers` when `None`.
    pub chunk_size: Option<usize>,
    pub lookback: usize,
    /// Treat end of input as the terminator of an unterminated last line.
    pub allow_unterminated_tail: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            workers: std::thread::available_parallelism().map_or(1, NonZeroUsize::get),
            chunk_size: None,
            lookback: DEFAULT_LOOKBACK,
            allow_unterminated_tail: false,
        }
    }
}

impl Config {
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    #[must_use]
    pub fn with_lookback(mut self, lookback: usize) -> Self {
        self.lookback = lookback;
        self
    }

    #[must_use]
    pub fn with_unterminated_tail(mut self, allow: bool) -> Self {
        self.allow_unterminated_tail = allow;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::InvalidConfig("workers must be at least 1"));
        }
        if self.chunk_size == Some(0) {
            return Err(Error::InvalidConfig("chunk size must be at least 1"));
        }
        if self.lookback == 0 {
            return Err(Error::InvalidConfig("lookback must be at least 1"));
        }
        Ok(())
    }

    /// Nominal shard length for a file of `len` bytes.
    pub fn chunk_size_for(&self, len: usize) -> usize {
        self.chunk_size
            .unwrap_or_else(|| len.div_ceil(self.workers.max(1)))
            .clamp(1, MAX_CHUNK_SIZE)
    }
}
