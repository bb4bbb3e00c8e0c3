//! Command-line parsing for the macro risk dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the data/signal code.

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "mrisk", version, about = "Macro Risk Dashboard (FRED + market data)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch data, print the risk table once, and exit.
    Report(DashArgs),
    /// Launch the interactive TUI dashboard.
    ///
    /// This uses the same fetch-and-score pipeline as `mrisk report`, but
    /// renders the table in a terminal UI with a manual refresh key.
    Tui(DashArgs),
}

/// Common options for the report and the TUI.
#[derive(Debug, Parser, Clone)]
pub struct DashArgs {
    /// Trailing window of daily market history to request (days).
    #[arg(long, default_value_t = 90)]
    pub lookback_days: i64,

    /// Observations in the 4-week change window (~20 trading days).
    #[arg(long, default_value_t = 20)]
    pub window: usize,

    /// Seconds fetched series stay memoized before refetching.
    #[arg(long, default_value_t = 900)]
    pub cache_ttl: u64,
}
