//! lsdb REPL Binary
//!
//! Reads `add`/`get` commands from stdin and applies them to an engine.

use std::io;
use std::path::PathBuf;

use clap::Parser;
use lsdb::repl::Session;
use lsdb::{Config, Engine};
use tracing_subscriber::{fmt, EnvFilter};

/// lsdb REPL
#[derive(Parser, Debug)]
#[command(name = "lsdb")]
#[command(about = "Minimal log-structured key-value store")]
#[command(version)]
struct Args {
    /// Data directory (defaults to ~/.lsdb)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// MemTable size in bytes that triggers a flush
    #[arg(short, long, default_value_t = lsdb::config::DEFAULT_FLUSH_THRESHOLD)]
    flush_threshold: usize,
}

fn main() {
    // Logs go to stderr; stdout carries REPL replies
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,lsdb=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);

    tracing::info!("lsdb v{}", lsdb::VERSION);
    tracing::info!("Data directory: {}", data_dir.display());

    let config = Config::builder()
        .data_dir(data_dir)
        .flush_threshold(args.flush_threshold)
        .build();

    let engine = match Engine::open(config) {
        Ok(e) => e,
        Err(e) => {
            tracing::error!("Failed to open engine: {}", e);
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    if let Err(e) = Session::new(engine).run(stdin.lock(), io::stdout()) {
        tracing::error!("Session error: {}", e);
        std::process::exit(1);
    }
}

/// `$HOME/.lsdb`, or `./lsdb_data` when no home directory is set
fn default_data_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".lsdb"))
        .unwrap_or_else(|| Config::default().data_dir)
}
