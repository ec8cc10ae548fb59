//! Error types for calbot-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WhenError {
    /// A character matched none of the token rules. `message` already carries
    /// the offending character bracketed inside its surrounding text.
    #[error("lexer: unknown token: {message}")]
    Lexical { message: String },

    #[error("parser: {0}")]
    Structural(String),

    #[error("parser: {0}")]
    Numeric(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),
}

impl WhenError {
    /// Build a lexical error for the character starting at byte `at` of `input`.
    pub(crate) fn unknown_char(input: &str, at: usize, ch: char) -> Self {
        let before = &input[..at];
        let after = &input[at + ch.len_utf8()..];
        WhenError::Lexical {
            message: format!("{before}[{ch}]{after}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, WhenError>;
