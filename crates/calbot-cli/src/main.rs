use std::io;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use calbot_cli::commands;
use calbot_cli::{Cli, Commands, Config, JsonSink};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr; stdout carries the JSON output.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    match &cli.command {
        Commands::Add(args) => {
            let mut sink = JsonSink::new(io::stdout().lock());
            match args.now {
                Some(now) => commands::add(&now, args, &config, &mut sink)?,
                None => commands::add(&Local::now(), args, &config, &mut sink)?,
            };
        }
        Commands::Parse(args) => {
            let out = io::stdout().lock();
            match args.now {
                Some(now) => commands::parse(&now, &args.expression, out)?,
                None => commands::parse(&Local::now(), &args.expression, out)?,
            }
            println!();
        }
    }

    Ok(())
}
