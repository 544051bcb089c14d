//! Error types shared by the tokenizer, parser, document model and file helpers
//!
//! Error Kinds
//!
//!     - [`ParseError`]: malformed text. Carries the 1-based line number and a closed
//!       [`ParseErrorKind`] reason. The parser stops at the first one.
//!     - [`NotFoundError`]: an edit or delete addressed a date block or message that
//!       does not exist. Carries the address that failed.
//!     - [`ValidationError`]: a field value or dialect that cannot be represented.
//!     - [`Error`]: the crate-level union, which additionally surfaces I/O, config and
//!       format errors unchanged.
//!
//! Mutations that fail leave the document untouched, so callers can retry or report
//! without any cleanup.

use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

use crate::cfml::ast::MessageAddress;
use crate::cfml::formats::FormatError;

/// Reason attached to a [`ParseError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// Line is neither a date marker, a message line nor blank
    UnexpectedToken,
    /// A date marker repeats a date already seen earlier in the text
    DuplicateDate,
    /// A date marker whose date text is missing, unparseable or not canonical
    MalformedDate,
    /// A message line that does not follow the field grammar
    MalformedMessage,
    /// A message line appears before the first date marker
    MessageBeforeAnyDateBlock,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParseErrorKind::UnexpectedToken => "unexpected token",
            ParseErrorKind::DuplicateDate => "duplicate date",
            ParseErrorKind::MalformedDate => "malformed date",
            ParseErrorKind::MalformedMessage => "malformed message",
            ParseErrorKind::MessageBeforeAnyDateBlock => "message before any date block",
        };
        write!(f, "{}", name)
    }
}

/// A parse failure at a specific line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {reason}")]
pub struct ParseError {
    /// 1-based line number of the offending line
    pub line: usize,
    pub reason: ParseErrorKind,
}

impl ParseError {
    pub fn new(line: usize, reason: ParseErrorKind) -> Self {
        Self { line, reason }
    }
}

/// An address that did not resolve
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NotFoundError {
    #[error("no date block for {0}")]
    DateBlock(NaiveDate),
    #[error("no message at {0}")]
    Message(MessageAddress),
}

/// A value that cannot be represented in a document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("sender must not be empty")]
    EmptySender,
    /// Use `None` for a message without receiver
    #[error("receiver must not be empty when present")]
    EmptyReceiver,
    #[error("invalid dialect: {0}")]
    InvalidDialect(String),
}

/// Crate-level error
#[derive(Error, Debug)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("not found: {0}")]
    NotFound(#[from] NotFoundError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("format error: {0}")]
    Format(#[from] FormatError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new(3, ParseErrorKind::DuplicateDate);
        assert_eq!(err.to_string(), "line 3: duplicate date");
    }

    #[test]
    fn test_not_found_display() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let err = NotFoundError::DateBlock(date);
        assert_eq!(err.to_string(), "no date block for 2024-01-01");

        let err = NotFoundError::Message(MessageAddress::at(date, 4));
        assert_eq!(err.to_string(), "no message at 2024-01-01[4]");
    }

    #[test]
    fn test_error_conversions_keep_kind() {
        let err: Error = ParseError::new(1, ParseErrorKind::UnexpectedToken).into();
        assert!(matches!(
            err,
            Error::Parse(ParseError {
                line: 1,
                reason: ParseErrorKind::UnexpectedToken
            })
        ));

        let err: Error = ValidationError::EmptySender.into();
        assert_eq!(err.to_string(), "validation error: sender must not be empty");
    }
}
