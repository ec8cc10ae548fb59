//! # calbot-engine
//!
//! Deterministic resolution of short Chinese weekday/time expressions such as
//! `下周三下午5点0分` ("next Wednesday, 5:00 PM") into absolute datetimes.
//!
//! Resolution is a three-stage pipeline: text → tokens → parsed fields →
//! instant. Each stage fails with a distinct [`WhenError`] and nothing reads
//! the system clock; the caller supplies the "now" anchor.
//!
//! ## Modules
//!
//! - [`lexer`]: Text → tokens (one token per digit, two-glyph lookahead)
//! - [`parser`]: Tokens → [`ParsedExpression`] via a non-backtracking grammar
//! - [`temporal`]: [`ParsedExpression`] + anchor → `DateTime`
//! - [`error`]: Error types

pub mod error;
pub mod lexer;
pub mod parser;
pub mod temporal;

pub use error::WhenError;
pub use lexer::{tokenize, Span, Token, TokenKind};
pub use parser::{parse, parse_expression, weekday_ordinal, HalfDay, ParsedExpression};
pub use temporal::{describe_when, resolve_when, ResolvedDatetime};
