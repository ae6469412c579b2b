//! Per-key min/mean/max over `key;value` lines, computed by scanning disjoint
//! byte ranges of a memory-mapped file in parallel and merging the per-range
//! tries. All arithmetic is fixed point, so the result does not depend on how
//! the file was split.

pub mod config;
pub mod decimal;
pub mod engine;
pub mod error;
pub mod scanner;
pub mod shard;
pub mod sink;
pub mod tally;
pub mod trie;

pub use config::Config;
pub use decimal::MiniDec;
pub use engine::{Aggregation, Engine, Station};
pub use error::{Error, Result};
pub use sink::{BraceWriter, Sink};
pub use tally::Tally;
