//! Deterministic resolution of parsed expressions into absolute datetimes.
//!
//! All functions take an explicit "now" anchor instead of reading the system
//! clock, so the same expression and anchor always resolve to the same
//! instant. The caller decides the timezone by choosing the anchor's
//! [`TimeZone`]; the command-line front end passes `chrono::Local::now()`.
//!
//! # Arithmetic
//!
//! 1. Truncate the anchor to local midnight and move back to Monday of the
//!    current week (weeks always start on Monday).
//! 2. Move forward to the parsed weekday (Sunday is the seventh day, so
//!    `周日` always lands *after* `周一` of the same week).
//! 3. Shift by `7 * next - 7 * prev` days on the local calendar.
//! 4. Starting from that day's local midnight, add the 24-hour hour and the
//!    minute as elapsed time.
//!
//! Hours are not range checked: `下午12点` becomes hour 24, i.e. midnight at
//! the start of the following day.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use serde::Serialize;

use crate::error::{Result, WhenError};
use crate::parser::{parse_expression, ParsedExpression};

/// The result of resolving an expression, formatted for display.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedDatetime {
    /// The resolved datetime in UTC (RFC 3339).
    pub resolved_utc: String,
    /// The resolved datetime in the anchor's timezone (RFC 3339 with offset).
    pub resolved_local: String,
    /// Human-readable interpretation (e.g., "Wednesday, October 28, 2026 at 5:00 PM CST").
    pub interpretation: String,
    /// The fields the expression parsed into.
    pub parsed: ParsedExpression,
}

impl ParsedExpression {
    /// Resolve these fields against `now`, in `now`'s timezone.
    ///
    /// The day (weekday plus week offset) is chosen on the local calendar and
    /// anchored at its first instant; hours and minutes are then added as
    /// elapsed time, so a time inside a DST gap lands past the gap.
    ///
    /// # Errors
    ///
    /// Returns [`WhenError::InvalidDatetime`] if the result is out of range,
    /// or the day has no local midnight in the timezone.
    pub fn resolve<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<DateTime<Tz>> {
        let out_of_range =
            || WhenError::InvalidDatetime(format!("'{self:?}' is out of range"));

        let shift = TimeDelta::try_days(self.week_offset_days()).ok_or_else(out_of_range)?;
        let day = weekday_in_current_week(now.date_naive(), self.weekday)
            .checked_add_signed(shift)
            .ok_or_else(out_of_range)?;
        let midnight = day.and_time(NaiveTime::MIN);

        let start_of_day = now
            .timezone()
            .from_local_datetime(&midnight)
            .earliest()
            .ok_or_else(|| {
                WhenError::InvalidDatetime(format!(
                    "{midnight} does not exist in the local timezone"
                ))
            })?;

        let resolved = time_of_day(self)
            .and_then(|elapsed| start_of_day.checked_add_signed(elapsed))
            .ok_or_else(out_of_range)?;
        tracing::debug!(%midnight, "resolved expression");
        Ok(resolved)
    }
}

/// Resolve an expression such as `下周三下午5点0分` relative to `now`.
///
/// # Errors
///
/// Returns the lexical, structural or numeric error of the first failing
/// stage, or [`WhenError::InvalidDatetime`] from resolution.
///
/// # Examples
///
/// ```
/// use calbot_engine::temporal::resolve_when;
/// use chrono::{FixedOffset, TimeZone, Timelike};
///
/// let cst = FixedOffset::east_opt(8 * 3600).unwrap();
/// // Wednesday, October 21, 2026
/// let now = cst.with_ymd_and_hms(2026, 10, 21, 10, 15, 0).unwrap();
/// let resolved = resolve_when(&now, "下周三下午5点0分").unwrap();
/// assert_eq!(resolved.to_rfc3339(), "2026-10-28T17:00:00+08:00");
/// assert_eq!(resolved.second(), 0);
/// ```
pub fn resolve_when<Tz: TimeZone>(now: &DateTime<Tz>, expression: &str) -> Result<DateTime<Tz>> {
    parse_expression(expression)?.resolve(now)
}

/// Resolve an expression and describe the result in UTC, local time and prose.
///
/// # Errors
///
/// Same as [`resolve_when`].
pub fn describe_when<Tz: TimeZone>(now: &DateTime<Tz>, expression: &str) -> Result<ResolvedDatetime>
where
    Tz::Offset: std::fmt::Display,
{
    let parsed = parse_expression(expression)?;
    let resolved_local = parsed.resolve(now)?;

    Ok(ResolvedDatetime {
        resolved_utc: resolved_local.with_timezone(&Utc).to_rfc3339(),
        resolved_local: resolved_local.to_rfc3339(),
        interpretation: format_interpretation(&resolved_local),
        parsed,
    })
}

// ── Internal helpers ────────────────────────────────────────────────────────

/// The date of weekday `ordinal` (1 = Monday .. 7 = Sunday) in the
/// Monday-based week containing `today`.
fn weekday_in_current_week(today: NaiveDate, ordinal: u8) -> NaiveDate {
    let days_since_monday = i64::from(today.weekday().num_days_from_monday());
    let monday = today - TimeDelta::days(days_since_monday);
    monday + TimeDelta::days(i64::from(ordinal) - 1)
}

/// Hour and minute as elapsed time since midnight, or `None` on overflow.
fn time_of_day(parsed: &ParsedExpression) -> Option<TimeDelta> {
    let hours = TimeDelta::try_hours(i64::try_from(parsed.hour_24()).ok()?)?;
    hours.checked_add(&TimeDelta::try_minutes(i64::from(parsed.minute))?)
}

/// Format a human-readable interpretation string.
fn format_interpretation<T: TimeZone>(dt: &DateTime<T>) -> String
where
    T::Offset: std::fmt::Display,
{
    dt.format("%A, %B %-d, %Y at %-I:%M %p %Z").to_string()
}

// ── Tests ───────────────────────────────────────────────────────────────────
