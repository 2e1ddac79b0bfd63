//! charming - terminal dashboard for HTTP service health.
//!
//! Usage:
//!   charming                      # charming_config.json from cwd or $HOME
//!   charming ./services.json      # explicit config file
//!   charming -vv --log-file x.log # trace logging to x.log

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use clap::Parser;
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

use charming::config::{DEFAULT_CONFIG_FILE, find_config, load_config};
use charming::poll::{Event, Key};
use charming::service::Fetcher;
use charming::tui::App;

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Default log file name, placed in the system temp directory.
const DEFAULT_LOG_FILE: &str = "charming.log";

/// Terminal dashboard for HTTP service health.
#[derive(Parser)]
#[command(name = "charming", about = "Terminal dashboard for HTTP service health", version)]
struct Args {
    /// Configuration file. Default: charming_config.json in the current
    /// directory, then in the home directory.
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Where log output goes. The terminal belongs to the dashboard.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase logging verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only log errors.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_FILE));
    if let Err(e) = init_logging(args.verbose, args.quiet, &log_path) {
        eprintln!(
            "Warning: cannot open log file {}: {}",
            log_path.display(),
            e
        );
    }

    let path = match args.config {
        Some(path) => path,
        None => match find_config(DEFAULT_CONFIG_FILE) {
            Ok(path) => path,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    };

    let config = match load_config(&path) {
        Ok(config) => Arc::new(config),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    info!(
        path = %path.display(),
        services = config.services.len(),
        "configuration loaded"
    );

    let fetcher = match Fetcher::new() {
        Ok(fetcher) => fetcher,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();

    // SIGINT/SIGTERM arrive as a normal quit so the terminal is restored.
    let signal_tx = tx.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        let _ = signal_tx.send(Event::Input(Key::Quit));
    }) {
        warn!(error = %e, "failed to install signal handler");
    }

    if let Err(e) = App::new(config, fetcher).run(tx, rx).await {
        error!(error = %e, "terminal error");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    info!("exiting");
}

/// Initializes the tracing subscriber, writing to `path`.
/// Default level is INFO. Use -q for quiet mode (errors only).
fn init_logging(verbose: u8, quiet: bool, path: &Path) -> std::io::Result<()> {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("charming={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
