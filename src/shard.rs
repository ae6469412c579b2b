use std::ops::Range;

use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::scanner::LineScanner;
use crate::trie::Trie;

/// A byte range of the input that starts at the first byte of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shard {
    pub id: usize,
    pub range: Range<usize>,
}

/// What a finished shard hands back for merging.
#[derive(Debug)]
pub struct ShardOutput {
    pub trie: Trie,
    pub lines: u64,
}

impl Shard {
    pub fn run(&self, data: &[u8], scanner: LineScanner) -> Result<ShardOutput> {
        let mut trie = Trie::new();
        let lines = scanner.scan(&data[self.range.clone()], self.range.start, &mut trie)?;
        debug!(
            shard = self.id,
            start = self.range.start,
            end = self.range.end,
            lines,
            keys = trie.len(),
            "shard done"
        );
        Ok(ShardOutput { trie, lines })
    }
}

/// Splits `data` into chunks of the configured size and moves every chunk
/// start after the first back to the start of the line it falls in. Chunks
/// that collapse onto the same line start are dropped, so shards never
/// overlap and together cover all of `data`.
pub fn partition(data: &[u8], config: &Config) -> Result<Vec<Shard>> {
    let len = data.len();
    let chunk_size = config.chunk_size_for(len);

    let mut starts = vec![0];
    let mut nominal = chunk_size;
    while nominal < len {
        let start = line_start(data, nominal, config.lookback)?;
        if starts.last().is_some_and(|&last| start > last) {
            starts.push(start);
        }
        nominal = nominal.saturating_add(chunk_size);
    }

    let shards = starts
        .iter()
        .enumerate()
        .map(|(id, &start)| Shard {
            id,
            range: start..starts.get(id + 1).copied().unwrap_or(len),
        })
        .collect();
    Ok(shards)
}

/// Start of the line containing `pos`, searching at most `lookback` bytes back.
fn line_start(data: &[u8], pos: usize, lookback: usize) -> Result<usize> {
    let window = pos.saturating_sub(lookback);
    match memchr::memrchr(b'\n', &data[window..pos]) {
        Some(nl) => Ok(window + nl + 1),
        None if window == 0 => Ok(0),
        None => Err(Error::LineTooLong {
            offset: pos,
            lookback,
        }),
    }
}
