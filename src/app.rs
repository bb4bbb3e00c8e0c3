//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - builds the data feed (FRED + market clients + memo)
//! - runs the signal engine
//! - prints the one-shot report or hands off to the TUI

use clap::Parser;

use crate::cli::{Command, DashArgs};
use crate::data::DataFeed;
use crate::domain::DashConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `mrisk` binary.
pub fn run() -> Result<(), AppError> {
    // We want a bare `mrisk` (and `mrisk --window 20`) to behave like
    // `mrisk tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Report(args) => handle_report(args),
        Command::Tui(args) => crate::tui::run(args),
    }
}

fn handle_report(args: DashArgs) -> Result<(), AppError> {
    let config = dash_config_from_args(&args);
    let mut feed = DataFeed::from_env(&config)?;
    let key_configured = feed.fred_key_configured();

    let run = pipeline::run_dashboard(&mut feed, &config);

    println!(
        "{}",
        crate::report::format_dashboard(&run.rows, run.total_score, run.regime, key_configured)
    );

    Ok(())
}

pub fn dash_config_from_args(args: &DashArgs) -> DashConfig {
    DashConfig {
        lookback_days: args.lookback_days,
        window: args.window,
        cache_ttl_secs: args.cache_ttl,
    }
}

/// Rewrite argv so `mrisk` defaults to `mrisk tui`.
///
/// Rules:
/// - `mrisk`                      -> `mrisk tui`
/// - `mrisk --window 20 ...`      -> `mrisk tui --window 20 ...`
/// - `mrisk --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "report" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite_args(args(&["mrisk"])), args(&["mrisk", "tui"]));
    }

    #[test]
    fn leading_flag_defaults_to_tui() {
        assert_eq!(
            rewrite_args(args(&["mrisk", "--window", "20"])),
            args(&["mrisk", "tui", "--window", "20"])
        );
    }

    #[test]
    fn explicit_subcommands_pass_through() {
        assert_eq!(
            rewrite_args(args(&["mrisk", "report"])),
            args(&["mrisk", "report"])
        );
        assert_eq!(rewrite_args(args(&["mrisk", "tui"])), args(&["mrisk", "tui"]));
    }

    #[test]
    fn help_and_version_pass_through() {
        assert_eq!(
            rewrite_args(args(&["mrisk", "--help"])),
            args(&["mrisk", "--help"])
        );
        assert_eq!(rewrite_args(args(&["mrisk", "-V"])), args(&["mrisk", "-V"]));
    }
}
