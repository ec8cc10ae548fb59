//! Event drafts and the sink they are delivered to.

use std::fmt::Display;
use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, TimeDelta, TimeZone};
use serde::Serialize;

/// A calendar event ready for insertion: title plus RFC 3339 start and end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDraft {
    pub summary: String,
    pub start: String,
    pub end: String,
}

impl EventDraft {
    /// Draft an event lasting `duration_hours` from `start`.
    ///
    /// Fails if the end falls outside the representable datetime range.
    pub fn new<Tz: TimeZone>(
        summary: &str,
        start: &DateTime<Tz>,
        duration_hours: u32,
    ) -> Result<Self>
    where
        Tz::Offset: Display,
    {
        let end = TimeDelta::try_hours(i64::from(duration_hours))
            .and_then(|duration| start.clone().checked_add_signed(duration))
            .with_context(|| format!("duration of {duration_hours} hours is out of range"))?;
        Ok(Self {
            summary: summary.to_string(),
            start: start.to_rfc3339_opts(SecondsFormat::Secs, true),
            end: end.to_rfc3339_opts(SecondsFormat::Secs, true),
        })
    }
}

/// Destination for drafted events.
pub trait CalendarSink {
    fn insert(&mut self, calendar_id: &str, event: &EventDraft) -> Result<()>;
}

#[derive(Serialize)]
struct InsertRecord<'a> {
    calendar_id: &'a str,
    event: &'a EventDraft,
}

/// Writes each inserted event as one JSON line.
pub struct JsonSink<W> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> CalendarSink for JsonSink<W> {
    fn insert(&mut self, calendar_id: &str, event: &EventDraft) -> Result<()> {
        let record = InsertRecord { calendar_id, event };
        serde_json::to_writer(&mut self.writer, &record).context("failed to encode event")?;
        writeln!(self.writer).context("failed to write event")?;
        Ok(())
    }
}
