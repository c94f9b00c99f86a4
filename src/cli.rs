//! Command-line interface definitions.
//!
//! Uses clap derive API for argument parsing.

use clap::{Args, Parser, Subcommand};

use crate::config::{DEFAULT_LIMIT, QuakeConfig, USGS_QUERY_URL};
use crate::output::Format;
use crate::query::{QueryFilters, TimeWindow};
use crate::render::{DisplayOptions, Labels, TimeDisplay};

/// Recent earthquakes from the USGS, formatted for your terminal.
#[derive(Parser, Debug)]
#[command(name = "quakefeed")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    pub quiet: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch recent earthquakes once and exit
    List(ListArgs),

    /// Refresh the list periodically; each refresh replaces the last
    Watch(WatchArgs),
}

/// Query and display options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Time window: 24, 48 (hours), 7, 14 (days); other values query from now
    #[arg(long, default_value = "24")]
    pub window: String,

    /// Minimum magnitude, passed to the service as typed
    #[arg(long, default_value = "2.5")]
    pub min_magnitude: String,

    /// Sort order: time, time-asc, magnitude, magnitude-asc
    #[arg(long, default_value = "time")]
    pub order_by: String,

    /// Maximum number of events to request
    #[arg(long, short = 'n', env = "QUAKEFEED_LIMIT", default_value_t = DEFAULT_LIMIT)]
    pub limit: u32,

    /// Event query endpoint
    #[arg(long, env = "QUAKEFEED_BASE_URL", default_value = USGS_QUERY_URL)]
    pub base_url: String,

    /// Output format
    #[arg(long, short = 'f', default_value = "human", value_parser = parse_format)]
    pub format: Format,

    /// Show times as "ago" or as local clock time and date
    #[arg(long, default_value = "ago", value_parser = parse_time_display)]
    pub time_display: TimeDisplay,

    /// Use 24-hour clock times
    #[arg(long)]
    pub hour24: bool,

    /// Do not highlight same-day tsunami warnings
    #[arg(long)]
    pub no_tsunami_theme: bool,
}

impl QueryArgs {
    /// Filters for the query builder.
    #[must_use]
    pub fn filters(&self) -> QueryFilters {
        QueryFilters {
            time_window: TimeWindow::from_code(&self.window),
            min_magnitude: self.min_magnitude.clone(),
            order_by: self.order_by.clone(),
        }
    }

    /// Pipeline configuration with command-line overrides applied.
    #[must_use]
    pub fn config(&self) -> QuakeConfig {
        QuakeConfig {
            base_url: self.base_url.clone(),
            limit: self.limit,
            ..QuakeConfig::default()
        }
    }

    /// Row rendering preferences.
    #[must_use]
    pub fn display(&self) -> DisplayOptions {
        DisplayOptions {
            time_display: self.time_display,
            hour24: self.hour24,
            tsunami_theme: !self.no_tsunami_theme,
            labels: Labels::default(),
        }
    }
}

/// Arguments for the `list` command.
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub query: QueryArgs,
}

/// Arguments for the `watch` command.
#[derive(Args, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Refresh interval in seconds (minimum 30)
    #[arg(long, default_value = "60")]
    pub interval: u64,
}

/// Parse an output format from string.
fn parse_format(s: &str) -> Result<Format, String> {
    s.parse()
}

/// Parse a time display mode from string.
fn parse_time_display(s: &str) -> Result<TimeDisplay, String> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_defaults() {
        let cli = Cli::try_parse_from(["quakefeed", "list"]).unwrap();
        let Command::List(args) = cli.command else {
            panic!("expected list command");
        };
        let filters = args.query.filters();
        assert_eq!(filters, QueryFilters::default());
        assert_eq!(args.query.format, Format::Human);
        assert!(args.query.display().tsunami_theme);
    }

    #[test]
    fn test_unknown_window_is_accepted() {
        let cli = Cli::try_parse_from(["quakefeed", "list", "--window", "3"]).unwrap();
        let Command::List(args) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(args.query.filters().time_window, None);
    }

    #[test]
    fn test_watch_options() {
        let cli = Cli::try_parse_from([
            "quakefeed",
            "--verbose",
            "watch",
            "--interval",
            "120",
            "--window",
            "7",
            "--time-display",
            "clock",
            "--no-tsunami-theme",
            "-f",
            "ndjson",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Command::Watch(args) = cli.command else {
            panic!("expected watch command");
        };
        assert_eq!(args.interval, 120);
        assert_eq!(args.query.filters().time_window, Some(TimeWindow::Week));
        let display = args.query.display();
        assert_eq!(display.time_display, TimeDisplay::Clock);
        assert!(!display.tsunami_theme);
        assert_eq!(args.query.format, Format::Ndjson);
    }
}
