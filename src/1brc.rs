use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use trie_brc::config::DEFAULT_LOOKBACK;
use trie_brc::{BraceWriter, Config, Engine};

/// Prints `{station=min/mean/max, ...}` for a file of `station;value` lines.
#[derive(Debug, Parser)]
#[command(name = "1brc", version)]
struct Args {
    /// Input file.
    #[arg(default_value = "measurements.txt")]
    path: PathBuf,

    /// Number of shards; defaults to the available parallelism.
    #[arg(short, long)]
    workers: Option<usize>,

    /// Nominal shard size in bytes; overrides --workers.
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Bytes to search back for a line start; must exceed the longest line.
    #[arg(long, default_value_t = DEFAULT_LOOKBACK)]
    lookback: usize,

    /// Accept a last line without a trailing newline.
    #[arg(long)]
    allow_unterminated: bool,
}

impl Args {
    fn config(&self) -> Config {
        let mut config = Config::default()
            .with_lookback(self.lookback)
            .with_unterminated_tail(self.allow_unterminated);
        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        if let Some(chunk_size) = self.chunk_size {
            config = config.with_chunk_size(chunk_size);
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let engine = Engine::new(args.config());
    let result = engine
        .run(&args.path)
        .with_context(|| format!("aggregating {}", args.path.display()))?;

    let stdout = io::stdout().lock();
    let mut writer = BraceWriter::new(BufWriter::new(stdout));
    result.write_to(&mut writer).context("writing result")?;
    Ok(())
}
