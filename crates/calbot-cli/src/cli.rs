//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use clap::{Args, Parser, Subcommand};

/// Create calendar events from expressions like `下周三下午5点0分`.
///
/// The expression names a weekday relative to the current week, an optional
/// half-day (上午/下午), an hour (点/时) and a minute (分).
#[derive(Debug, Parser)]
#[command(name = "calbot", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve an expression and insert an event into the calendar sink.
    Add(AddArgs),

    /// Show how an expression tokenizes, parses and resolves.
    Parse(ParseArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// When, e.g. 下周三下午5点0分.
    #[arg(long)]
    pub when: String,

    /// Event title.
    #[arg(long)]
    pub what: String,

    /// Duration in hours. Defaults to `default_duration_hours` from config.
    #[arg(long = "dur")]
    pub duration: Option<u32>,

    /// Resolve against this RFC 3339 instant instead of the system clock.
    #[arg(long, value_parser = parse_anchor)]
    pub now: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// The expression to inspect.
    pub expression: String,

    /// Resolve against this RFC 3339 instant instead of the system clock.
    #[arg(long, value_parser = parse_anchor)]
    pub now: Option<DateTime<FixedOffset>>,
}

fn parse_anchor(s: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(s).map_err(|e| format!("'{s}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_add_args() {
        let cli = Cli::try_parse_from([
            "calbot",
            "add",
            "--when",
            "周一上午9点30分",
            "--what",
            "standup",
            "--dur",
            "2",
            "--now",
            "2026-10-21T10:00:00+08:00",
        ])
        .unwrap();
        let Commands::Add(args) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.when, "周一上午9点30分");
        assert_eq!(args.duration, Some(2));
        assert_eq!(
            args.now.unwrap().to_rfc3339(),
            "2026-10-21T10:00:00+08:00"
        );
    }

    #[test]
    fn test_bad_anchor_rejected() {
        let result = Cli::try_parse_from(["calbot", "parse", "周一9点0分", "--now", "tuesday"]);
        assert!(result.is_err());
    }
}
