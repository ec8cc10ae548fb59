//! Recursive-descent grammar over the token stream.
//!
//! ```text
//! expression := prefix* day time END
//! prefix     := Next | Prev
//! day        := Week WeekDay
//! time       := (Morning | Afternoon)? hour minute
//! hour       := Num+ Hour
//! minute     := Num+ Min
//! ```
//!
//! The parse never backtracks: each production inspects the current token,
//! consumes it or fails, and the cursor only moves forward. A failure anywhere
//! aborts the whole parse; no partially filled result is returned.

use chrono::Weekday;
use serde::Serialize;

use crate::error::{Result, WhenError};
use crate::lexer::{tokenize, Token, TokenKind};

/// Which half of the day a time was qualified with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HalfDay {
    /// `上午`
    Morning,
    /// `下午`
    Afternoon,
}

/// Fields accumulated by a successful parse.
///
/// Resolve it against an anchor with [`ParsedExpression::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParsedExpression {
    /// Number of leading `下` markers.
    pub next_count: u32,
    /// Number of leading `上` markers.
    pub prev_count: u32,
    /// Weekday ordinal, 1 = Monday through 7 = Sunday.
    pub weekday: u8,
    pub half_day: Option<HalfDay>,
    /// Hour as written, before any afternoon adjustment.
    pub hour: u32,
    pub minute: u32,
}

impl ParsedExpression {
    /// The parsed weekday as a chrono [`Weekday`].
    pub fn weekday(&self) -> Weekday {
        match self.weekday {
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            6 => Weekday::Sat,
            _ => Weekday::Sun,
        }
    }

    /// Hour on a 24-hour clock. Afternoon adds 12 unconditionally, so
    /// `下午12点` yields 24. Widened to `u64` so any parsed hour fits.
    pub fn hour_24(&self) -> u64 {
        let hour = u64::from(self.hour);
        match self.half_day {
            Some(HalfDay::Afternoon) => hour + 12,
            _ => hour,
        }
    }

    /// Whole-week offset in days: `7 * next - 7 * prev`.
    pub fn week_offset_days(&self) -> i64 {
        7 * (i64::from(self.next_count) - i64::from(self.prev_count))
    }
}

/// Map a weekday glyph to its ordinal (1 = Monday .. 7 = Sunday).
pub fn weekday_ordinal(glyph: &str) -> Option<u8> {
    let mut chars = glyph.chars();
    let ch = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    "一二三四五六日"
        .chars()
        .position(|day| day == ch)
        .map(|i| i as u8 + 1)
        .or(if ch == '天' { Some(7) } else { None })
}

/// Parse an already tokenized expression.
///
/// # Errors
///
/// - [`WhenError::Structural`] when the tokens do not follow the grammar
///   (missing `周`, unknown weekday, stray `下`/`上`, trailing tokens).
/// - [`WhenError::Numeric`] when an hour or minute digit run is empty, does not
///   fit in `u32`, or is not closed by its `点`/`时`/`分` marker.
pub fn parse(tokens: &[Token<'_>]) -> Result<ParsedExpression> {
    let parsed = Parser::new(tokens).run()?;
    tracing::debug!(?parsed, "parsed expression");
    Ok(parsed)
}

/// Tokenize and parse `input` in one step.
///
/// # Examples
///
/// ```
/// use calbot_engine::parser::{parse_expression, HalfDay};
///
/// let parsed = parse_expression("下周三下午5点0分").unwrap();
/// assert_eq!(parsed.next_count, 1);
/// assert_eq!(parsed.weekday, 3);
/// assert_eq!(parsed.half_day, Some(HalfDay::Afternoon));
/// assert_eq!(parsed.hour_24(), 17);
/// ```
pub fn parse_expression(input: &str) -> Result<ParsedExpression> {
    let tokens = tokenize(input)?;
    parse(&tokens)
}

struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    cur: usize,
    next_count: u32,
    prev_count: u32,
    weekday: u8,
    morning: bool,
    afternoon: bool,
    hour: u32,
    minute: u32,
}

impl<'t, 'a> Parser<'t, 'a> {
    fn new(tokens: &'t [Token<'a>]) -> Self {
        Self {
            tokens,
            cur: 0,
            next_count: 0,
            prev_count: 0,
            weekday: 0,
            morning: false,
            afternoon: false,
            hour: 0,
            minute: 0,
        }
    }

    fn current(&self) -> Option<&'t Token<'a>> {
        self.tokens.get(self.cur)
    }

    fn current_is(&self, kind: TokenKind) -> bool {
        self.current().is_some_and(|t| t.kind == kind)
    }

    fn accept(&mut self) {
        self.cur += 1;
    }

    fn run(mut self) -> Result<ParsedExpression> {
        self.match_prefix();
        self.match_day()?;
        self.match_time()?;
        self.match_end()?;

        let half_day = if self.afternoon {
            Some(HalfDay::Afternoon)
        } else if self.morning {
            Some(HalfDay::Morning)
        } else {
            None
        };
        Ok(ParsedExpression {
            next_count: self.next_count,
            prev_count: self.prev_count,
            weekday: self.weekday,
            half_day,
            hour: self.hour,
            minute: self.minute,
        })
    }

    fn match_prefix(&mut self) {
        while let Some(token) = self.current() {
            match token.kind {
                TokenKind::Next => self.next_count += 1,
                TokenKind::Prev => self.prev_count += 1,
                _ => return,
            }
            self.accept();
        }
    }

    fn match_day(&mut self) -> Result<()> {
        if !self.current_is(TokenKind::Week) {
            return Err(invalid_weekday());
        }
        self.accept();
        self.match_weekday()
    }

    fn match_weekday(&mut self) -> Result<()> {
        let ordinal = self
            .current()
            .filter(|t| t.kind == TokenKind::WeekDay)
            .and_then(|t| weekday_ordinal(t.text))
            .ok_or_else(invalid_weekday)?;
        self.weekday = ordinal;
        self.accept();
        Ok(())
    }

    fn match_time(&mut self) -> Result<()> {
        self.match_half_day();
        self.hour = self.match_number(TokenKind::Hour, "invalid hour")?;
        self.minute = self.match_number(TokenKind::Min, "invalid minute")?;
        Ok(())
    }

    fn match_half_day(&mut self) {
        if self.current_is(TokenKind::Morning) {
            self.morning = true;
            self.accept();
        } else if self.current_is(TokenKind::Afternoon) {
            self.afternoon = true;
            self.accept();
        }
    }

    /// Concatenate a run of `Num` tokens, then require `marker`.
    fn match_number(&mut self, marker: TokenKind, what: &str) -> Result<u32> {
        let mut digits = String::new();
        while let Some(token) = self.current().filter(|t| t.kind == TokenKind::Num) {
            digits.push_str(token.text);
            self.accept();
        }

        if !self.current_is(marker) {
            return Err(WhenError::Numeric(what.to_string()));
        }
        self.accept();

        digits
            .parse::<u32>()
            .map_err(|_| WhenError::Numeric(what.to_string()))
    }

    fn match_end(&self) -> Result<()> {
        match self.current() {
            None => Ok(()),
            Some(token) => Err(WhenError::Structural(format!(
                "unexpected token {token} after minute"
            ))),
        }
    }
}

fn invalid_weekday() -> WhenError {
    WhenError::Structural("invalid weekday".to_string())
}

// ── Tests ───────────────────────────────────────────────────────────────────
