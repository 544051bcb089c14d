//! Token types produced by the cfml lexer
//!
//! Token Layers
//!
//!     Line Tokens:
//!         One per source line. The [`LineKind`] is the definitive set of line
//!         classifications (date marker, message, blank, malformed). Line tokens
//!         borrow the text after the marker from the source.
//!
//!     Field Units:
//!         The content of a message line, one unit per character except for the arrow
//!         which is a single unit. Escapes are already decoded, but stay distinct from
//!         plain characters so that an escaped space never counts as structure.

use std::fmt;

use crate::cfml::error::ParseErrorKind;

/// A classified source line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineToken<'a> {
    /// 1-based line number in the source
    pub line_number: usize,
    pub kind: LineKind<'a>,
}

impl<'a> LineToken<'a> {
    pub fn new(line_number: usize, kind: LineKind<'a>) -> Self {
        Self { line_number, kind }
    }
}

/// The classification of a line token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Date marker line, holding the date text after the marker
    DateMarker(&'a str),
    /// Message line, holding the raw field text after the marker
    Message(&'a str),
    /// Empty after trimming
    Blank,
    /// Line that cannot be classified, with the reason the parser will report
    Malformed(ParseErrorKind),
}

impl LineKind<'_> {
    /// Format the kind as grammar notation: `<date-marker>`, `<message>`, ...
    pub fn to_grammar_string(&self) -> &'static str {
        match self {
            LineKind::DateMarker(_) => "<date-marker>",
            LineKind::Message(_) => "<message>",
            LineKind::Blank => "<blank>",
            LineKind::Malformed(_) => "<malformed>",
        }
    }
}

impl fmt::Display for LineKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineKind::DateMarker(text) | LineKind::Message(text) => {
                write!(f, "{} {}", self.to_grammar_string(), text)
            }
            LineKind::Blank => write!(f, "{}", self.to_grammar_string()),
            LineKind::Malformed(reason) => write!(f, "{} {}", self.to_grammar_string(), reason),
        }
    }
}

/// One lexed element of a message line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldUnit {
    /// Literal character written as itself
    Char(char),
    /// Literal character decoded from an escape sequence
    Escaped(char),
    /// Unescaped reserved character in a position where it has no meaning
    Reserved(char),
    /// The arrow between sender and receiver, with its surrounding spaces
    Arrow,
    /// The separator before the body
    Separator,
}

impl fmt::Display for FieldUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldUnit::Char(c) => write!(f, "{c:?}"),
            FieldUnit::Escaped(c) => write!(f, "<escaped {c:?}>"),
            FieldUnit::Reserved(c) => write!(f, "<reserved {c:?}>"),
            FieldUnit::Arrow => write!(f, "<arrow>"),
            FieldUnit::Separator => write!(f, "<separator>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_kind_display() {
        assert_eq!(
            LineKind::DateMarker("2024-01-01").to_string(),
            "<date-marker> 2024-01-01"
        );
        assert_eq!(LineKind::Blank.to_string(), "<blank>");
        assert_eq!(
            LineKind::Malformed(ParseErrorKind::UnexpectedToken).to_string(),
            "<malformed> unexpected token"
        );
    }

    #[test]
    fn test_field_unit_display() {
        assert_eq!(FieldUnit::Char('a').to_string(), "'a'");
        assert_eq!(FieldUnit::Escaped(':').to_string(), "<escaped ':'>");
        assert_eq!(FieldUnit::Reserved('#').to_string(), "<reserved '#'>");
        assert_eq!(FieldUnit::Arrow.to_string(), "<arrow>");
    }
}
