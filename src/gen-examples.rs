use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const STATIONS: &[&str] = &[
    "Abha", "Abidjan", "Accra", "Addis Ababa", "Adelaide", "Bangkok", "Bridgetown",
    "Bulawayo", "Conakry", "Cracow", "Hamburg", "Istanbul", "Kraków", "Palembang",
    "Reykjavík", "Roseau", "St. John's", "São Paulo", "Zürich",
];

/// Writes `station;value` lines with values in [-99.9, 99.9].
#[derive(Debug, Parser)]
#[command(name = "gen-examples")]
struct Args {
    /// Output file.
    #[arg(default_value = "measurements.txt")]
    path: PathBuf,

    /// Number of lines.
    #[arg(short, long, default_value_t = 1_000_000)]
    lines: u64,

    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let file = File::create(&args.path)
        .with_context(|| format!("creating {}", args.path.display()))?;
    let mut out = BufWriter::with_capacity(1 << 20, file);
    for _ in 0..args.lines {
        let station = STATIONS[rng.gen_range(0..STATIONS.len())];
        let tenths: i32 = rng.gen_range(-999..=999);
        let sign = if tenths < 0 { "-" } else { "" };
        let tenths = tenths.unsigned_abs();
        writeln!(out, "{station};{sign}{}.{}", tenths / 10, tenths % 10)?;
    }
    out.flush()?;
    Ok(())
}
