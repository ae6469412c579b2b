use std::fs::File;
use std::io;
use std::path::Path;
use std::time::Instant;

use memmap2::MmapOptions;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::Config;
use crate::decimal::MiniDec;
use crate::error::{Error, Result};
use crate::scanner::LineScanner;
use crate::shard::{partition, ShardOutput};
use crate::sink::Sink;
use crate::tally::Tally;
use crate::trie::Trie;

/// Final statistics for one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub key: Box<[u8]>,
    pub mean: MiniDec,
    pub tally: Tally,
}

impl Station {
    pub fn min(&self) -> MiniDec {
        self.tally.min
    }

    pub fn max(&self) -> MiniDec {
        self.tally.max
    }

    pub fn count(&self) -> u64 {
        self.tally.count
    }
}

/// All stations of a run, sorted by key bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    stations: Vec<Station>,
    lines: u64,
}

impl Aggregation {
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn get(&self, key: &[u8]) -> Option<&Station> {
        self.stations
            .binary_search_by(|s| (*s.key).cmp(key))
            .ok()
            .map(|i| &self.stations[i])
    }

    /// Number of records read across all shards.
    pub fn lines(&self) -> u64 {
        self.lines
    }

    pub fn write_to<S: Sink + ?Sized>(&self, sink: &mut S) -> io::Result<()> {
        for station in &self.stations {
            sink.write(&station.key, station.min(), station.mean, station.max())?;
        }
        sink.finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: Config,
}

impl Engine {
    pub fn new(config: Config) -> Engine {
        Engine { config }
    }

    /// Maps `path` read-only and aggregates it.
    pub fn run(&self, path: impl AsRef<Path>) -> Result<Aggregation> {
        self.config.validate()?;
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let file_len = file.metadata().map_err(|e| Error::io(path, e))?.len();
        // an empty file cannot be mapped
        if file_len == 0 {
            return Err(Error::EmptyInput);
        }

        // SAFETY: the mapping is read-only and the file is not expected to
        // change while the run holds it.
        #[allow(unsafe_code)]
        let mmap = unsafe { MmapOptions::new().map(&file) }.map_err(|e| Error::io(path, e))?;
        debug!(path = %path.display(), bytes = mmap.len(), "mapped input");

        self.aggregate(&mmap)
    }

    /// Aggregates an in-memory input exactly like [`Engine::run`] does a file.
    pub fn aggregate(&self, data: &[u8]) -> Result<Aggregation> {
        let start = Instant::now();
        self.config.validate()?;

        let shards = partition(data, &self.config)?;
        let scanner = LineScanner::new(self.config.allow_unterminated_tail);

        let outputs = shards
            .par_iter()
            .map(|shard| shard.run(data, scanner))
            .collect::<Result<Vec<ShardOutput>>>()?;

        let mut lines = 0;
        let mut merged = Trie::new();
        for output in outputs {
            lines += output.lines;
            merged = merged.merge(output.trie);
        }
        if merged.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut entries = merged.flatten();
        entries.sort_unstable_by(|a, b| a.key.cmp(&b.key));

        let stations = entries
            .into_iter()
            .map(|entry| {
                let mean = entry.tally.mean().ok_or_else(|| Error::MeanOutOfRange {
                    key: String::from_utf8_lossy(&entry.key).into_owned(),
                })?;
                Ok(Station {
                    key: entry.key,
                    mean,
                    tally: entry.tally,
                })
            })
            .collect::<Result<Vec<Station>>>()?;

        info!(
            bytes = data.len(),
            shards = shards.len(),
            lines,
            keys = stations.len(),
            elapsed = ?start.elapsed(),
            "aggregation complete"
        );
        Ok(Aggregation { stations, lines })
    }
}
