//! lru - line-oriented shell over an in-memory LRU cache

mod handler;

use anyhow::{Context, Result};
use clap::Parser;
use lrucache::LruCache;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

use crate::handler::{CommandHandler, Reply};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of items)
    #[arg(short, long, env = "LRU_CAPACITY", default_value_t = 1024)]
    capacity: usize,

    /// Read commands from a file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so replies on stdout stay clean
    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(log_filter(args.verbose, rust_log.as_deref()))
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    serve(&args, &mut out)
}

/// Build the log filter. `RUST_LOG` wins; the level only applies when it is
/// unset or empty.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(rust_log.unwrap_or(""))
}

fn serve<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    let cache = LruCache::new(args.capacity).context("failed to create cache")?;
    info!("Cache capacity: {}", args.capacity);

    let mut handler = CommandHandler::new(cache);

    match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            info!("Reading commands from {}", path.display());
            run(&mut handler, BufReader::new(file), out)
        }
        None => run(&mut handler, io::stdin().lock(), out),
    }
}

fn run<R: BufRead, W: Write>(handler: &mut CommandHandler, input: R, out: &mut W) -> Result<()> {
    for line in input.lines() {
        let line = line.context("failed to read command")?;

        let Some(reply) = handler.handle(&line) else {
            continue;
        };

        match &reply {
            Reply::Quit => break,
            Reply::Error(msg) => warn!("Command failed: {}", msg),
            _ => {}
        }

        writeln!(out, "{}", reply)?;
        out.flush()?;
    }

    Ok(())
}
