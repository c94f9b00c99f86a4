//! quakefeed - recent earthquakes from the USGS, in your terminal.
//!
//! `list` fetches once and prints; `watch` refreshes on an interval and
//! replaces the whole list with each completed load.

use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing::{error, info, warn};

use quakefeed::cli::{self, Cli, Command};
use quakefeed::client::QuakeClient;
use quakefeed::loader::{QuakeList, QuakeLoader};
use quakefeed::{output, query, render};

/// Shown when a load yields nothing to display.
const NO_EARTHQUAKES: &str = "No earthquakes found.";

/// Lower bound for the `watch` refresh interval.
const MIN_INTERVAL_SECS: u64 = 30;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    init_tracing(cli.verbose, cli.quiet);

    let runtime = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;

    match cli.command {
        Command::List(args) => runtime.block_on(cmd_list(args)),
        Command::Watch(args) => runtime.block_on(cmd_watch(args)),
    }
}

/// Initialize tracing subscriber.
fn init_tracing(verbose: bool, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Execute the `list` command - one-shot fetch of recent earthquakes.
async fn cmd_list(args: cli::ListArgs) -> Result<()> {
    let args = args.query;
    let config = args.config();
    let client = QuakeClient::new(&config).context("failed to create USGS client")?;

    let now = Local::now();
    let records = match query::query_url(&config.base_url, &args.filters(), config.limit, &now) {
        Some(url) => client.fetch_records(url.as_str()).await,
        None => None,
    };
    let records = records.unwrap_or_default();
    let rows = render::render_rows(&records, &now, &args.display());

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    output::write_rows(&mut handle, &rows, args.format, NO_EARTHQUAKES)?;

    Ok(())
}

/// Execute the `watch` command - periodic refresh, newest load wins.
async fn cmd_watch(args: cli::WatchArgs) -> Result<()> {
    let interval = args.interval.max(MIN_INTERVAL_SECS);
    if interval != args.interval {
        warn!("refresh interval clamped to minimum of {} seconds", MIN_INTERVAL_SECS);
    }

    let query_args = args.query;
    let config = query_args.config();
    let filters = query_args.filters();
    let display = query_args.display();

    let client = QuakeClient::new(&config).context("failed to create USGS client")?;
    let (mut loader, mut rx) = QuakeLoader::new(client, &config);
    let mut list = QuakeList::new();

    info!("refreshing earthquakes every {}s", interval);

    let mut ticker = tokio::time::interval(Duration::from_secs(interval));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                list.expect(loader.request(&filters, &Local::now()));
            }
            Some(outcome) = rx.recv() => {
                if !list.apply(outcome) {
                    continue;
                }
                let now = Local::now();
                let rows = render::render_rows(list.records(), &now, &display);
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                let stamp = now.format("%H:%M:%S").to_string();
                output::write_refresh_header(&mut handle, query_args.format, &stamp)?;
                output::write_rows(&mut handle, &rows, query_args.format, NO_EARTHQUAKES)?;
                handle.flush()?;
            }
            _ = &mut shutdown => {
                info!("stopping");
                return Ok(());
            }
        }
    }
}
