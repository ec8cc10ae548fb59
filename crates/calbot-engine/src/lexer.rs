//! Tokenizer for weekday/time expressions.
//!
//! Scans the input left to right with at most two characters of lookahead and
//! classifies every glyph (or glyph pair) into a [`TokenKind`]. Whitespace
//! between tokens is skipped and never becomes part of a token.
//!
//! Digits are emitted one token per character and the grammar
//! concatenates consecutive [`TokenKind::Num`] tokens itself, so `130` arrives
//! as three tokens `1`, `3`, `0`.
//!
//! # Recognized glyphs
//!
//! | Input | Kind |
//! |-------|------|
//! | `周`, `星期` | [`TokenKind::Week`] |
//! | `月` | [`TokenKind::Month`] |
//! | `一 二 三 四 五 六 日 天` | [`TokenKind::WeekDay`] |
//! | `下午` / `下` | [`TokenKind::Afternoon`] / [`TokenKind::Next`] |
//! | `上午` / `上` | [`TokenKind::Morning`] / [`TokenKind::Prev`] |
//! | `0`..`9` | [`TokenKind::Num`] |
//! | `时`, `点` | [`TokenKind::Hour`] |
//! | `分` | [`TokenKind::Min`] |

use std::fmt;

use serde::Serialize;

use crate::error::{Result, WhenError};

/// Classification of a matched substring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    #[serde(rename = "mon")]
    Month,
    /// `时` or `点`.
    Hour,
    /// `分`.
    Min,
    /// `周` or `星期`.
    Week,
    /// One of the weekday glyphs; the ordinal is assigned by the parser.
    WeekDay,
    Next,
    Prev,
    /// A single ASCII digit.
    Num,
    Morning,
    Afternoon,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Month => "mon",
            TokenKind::Hour => "hour",
            TokenKind::Min => "min",
            TokenKind::Week => "week",
            TokenKind::WeekDay => "weekday",
            TokenKind::Next => "next",
            TokenKind::Prev => "prev",
            TokenKind::Num => "num",
            TokenKind::Morning => "morning",
            TokenKind::Afternoon => "afternoon",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Byte range of a token within the input (`start..end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// A classified slice of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// The exact matched text, borrowed from the input.
    pub text: &'a str,
    pub span: Span,
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}]", self.text, self.kind)
    }
}

/// Glyphs that name a day of the week.
const WEEKDAY_GLYPHS: [char; 8] = ['一', '二', '三', '四', '五', '六', '天', '日'];

/// Tokenize a full expression.
///
/// # Errors
///
/// Returns [`WhenError::Lexical`] at the first character no rule accepts. The
/// message contains the whole input with the offending character bracketed,
/// e.g. `下周[x]三`.
///
/// # Examples
///
/// ```
/// use calbot_engine::lexer::{tokenize, TokenKind};
///
/// let tokens = tokenize("下周三下午").unwrap();
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(
///     kinds,
///     [TokenKind::Next, TokenKind::Week, TokenKind::WeekDay, TokenKind::Afternoon]
/// );
/// ```
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>> {
    let tokens = Lexer::new(input).run()?;
    tracing::trace!(count = tokens.len(), "tokenized expression");
    Ok(tokens)
}

struct Lexer<'a> {
    input: &'a str,
    /// Byte offset where the pending token starts.
    start: usize,
    /// Byte offset one past the last consumed character.
    end: usize,
    tokens: Vec<Token<'a>>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            start: 0,
            end: 0,
            tokens: Vec::new(),
        }
    }

    /// Look `n` characters past the cursor without consuming.
    fn peek(&self, n: usize) -> Option<char> {
        self.input[self.end..].chars().nth(n)
    }

    fn consume(&mut self, n: usize) {
        for ch in self.input[self.end..].chars().take(n) {
            self.end += ch.len_utf8();
        }
    }

    fn discard(&mut self) {
        self.start = self.end;
    }

    fn skip_space(&mut self) {
        while self.peek(0).is_some_and(char::is_whitespace) {
            self.consume(1);
        }
        self.discard();
    }

    /// Consume `n` characters and emit them as one token of `kind`.
    fn emit(&mut self, kind: TokenKind, n: usize) {
        self.consume(n);
        let token = Token {
            kind,
            text: &self.input[self.start..self.end],
            span: Span {
                start: self.start,
                end: self.end,
            },
        };
        tracing::trace!(%token, "token");
        self.tokens.push(token);
        self.discard();
    }

    fn run(mut self) -> Result<Vec<Token<'a>>> {
        loop {
            self.skip_space();
            let Some(ch) = self.peek(0) else {
                return Ok(self.tokens);
            };

            match ch {
                '周' => self.emit(TokenKind::Week, 1),
                '月' => self.emit(TokenKind::Month, 1),
                c if WEEKDAY_GLYPHS.contains(&c) => self.emit(TokenKind::WeekDay, 1),
                '下' if self.peek(1) == Some('午') => self.emit(TokenKind::Afternoon, 2),
                '下' => self.emit(TokenKind::Next, 1),
                '上' if self.peek(1) == Some('午') => self.emit(TokenKind::Morning, 2),
                '上' => self.emit(TokenKind::Prev, 1),
                '星' if self.peek(1) == Some('期') => self.emit(TokenKind::Week, 2),
                '0'..='9' => self.emit(TokenKind::Num, 1),
                '时' | '点' => self.emit(TokenKind::Hour, 1),
                '分' => self.emit(TokenKind::Min, 1),
                other => return Err(WhenError::unknown_char(self.input, self.start, other)),
            }
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
