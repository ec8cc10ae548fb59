//! Subcommand implementations.
//!
//! Each command takes its "now" anchor explicitly; `main` decides whether that
//! is the `--now` override or the local system clock.

use std::fmt::Display;
use std::io::Write;

use anyhow::{bail, Context, Result};
use calbot_engine::{describe_when, resolve_when, tokenize, ResolvedDatetime, Token};
use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::cli::AddArgs;
use crate::config::Config;
use crate::event::{CalendarSink, EventDraft};

/// Resolve `args.when`, draft the event and hand it to `sink`.
///
/// Nothing reaches the sink if the expression fails to resolve.
pub fn add<Tz: TimeZone>(
    now: &DateTime<Tz>,
    args: &AddArgs,
    config: &Config,
    sink: &mut dyn CalendarSink,
) -> Result<EventDraft>
where
    Tz::Offset: Display,
{
    if args.when.trim().is_empty() {
        bail!("missing argument `when`");
    }
    if args.what.trim().is_empty() {
        bail!("missing argument `what`");
    }

    let start = resolve_when(now, &args.when)
        .with_context(|| format!("cannot resolve '{}'", args.when))?;
    let duration = args.duration.unwrap_or(config.default_duration_hours);
    let draft = EventDraft::new(&args.what, &start, duration)?;

    sink.insert(&config.calendar_id, &draft)
        .with_context(|| format!("failed to insert event into '{}'", config.calendar_id))?;
    tracing::info!(
        calendar = %config.calendar_id,
        start = %draft.start,
        end = %draft.end,
        "event inserted"
    );
    Ok(draft)
}

#[derive(Debug, Serialize)]
struct ParseReport<'a> {
    expression: &'a str,
    tokens: Vec<Token<'a>>,
    #[serde(flatten)]
    resolved: ResolvedDatetime,
}

/// Write a pretty JSON report of tokens, parsed fields and the resolved time.
pub fn parse<Tz: TimeZone, W: Write>(now: &DateTime<Tz>, expression: &str, out: W) -> Result<()>
where
    Tz::Offset: Display,
{
    let tokens = tokenize(expression).with_context(|| format!("cannot resolve '{expression}'"))?;
    let resolved =
        describe_when(now, expression).with_context(|| format!("cannot resolve '{expression}'"))?;

    let report = ParseReport {
        expression,
        tokens,
        resolved,
    };
    serde_json::to_writer_pretty(out, &report).context("failed to write report")?;
    Ok(())
}
