//! rtsim - replay key traces through a read-through LRU cache

mod error;
mod parser;
mod replay;
mod report;
mod source;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use readthru::{CacheConfig, LruCache};
use tracing::{info, warn};

use crate::replay::replay;
use crate::report::Report;
use crate::source::{EchoSource, Source, TableSource};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of items); negative disables caching.
    /// Falls back to READTHRU_CAPACITY, then 1024
    #[arg(short, long, allow_negative_numbers = true)]
    capacity: Option<i64>,

    /// Trace file listing the keys to request
    #[arg(short, long)]
    trace: Option<PathBuf>,

    /// Key/value table to read through to (default: echo each key back)
    #[arg(long)]
    table: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Include resident keys in the report, least recently used first
    #[arg(long)]
    show_order: bool,

    /// Keys to request after those from --trace
    keys: Vec<String>,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match args.capacity {
        Some(capacity) => CacheConfig::from_signed(capacity),
        None => CacheConfig::from_env(),
    };

    let mut keys = match &args.trace {
        Some(path) => parser::load_trace(path)
            .with_context(|| format!("failed to load trace {}", path.display()))?,
        None => Vec::new(),
    };
    keys.extend(args.keys);
    if keys.is_empty() {
        warn!("No keys to replay");
    }

    let source = match &args.table {
        Some(path) => {
            let table = TableSource::load(path)
                .with_context(|| format!("failed to load table {}", path.display()))?;
            if table.is_empty() {
                warn!("Table {} has no entries, every request will fail", path.display());
            }
            Source::Table(table)
        }
        None => Source::Echo(EchoSource),
    };

    info!("Starting rtsim v{}", env!("CARGO_PKG_VERSION"));
    info!("Cache capacity: {}", config.capacity);
    info!("Requests: {}", keys.len());

    let mut cache = LruCache::with_config(source, config);
    replay(&mut cache, &keys).context("replay aborted")?;

    let report = Report::from_cache(&cache, args.show_order);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }

    Ok(())
}
