//! Line Classification
//!
//! Determines the [`LineKind`] of a trimmed source line. Classification order:
//! 1. Blank lines
//! 2. Date marker lines (the marker, one space, the date text)
//! 3. Message lines (the marker, one space, the field text)
//! 4. Everything else is an unexpected token

use crate::cfml::error::ParseErrorKind;
use crate::cfml::grammar::Grammar;
use crate::cfml::lexing::tokens::LineKind;

/// Classify one line. The caller trims the line first.
pub fn classify_line<'a>(grammar: &Grammar, line: &'a str) -> LineKind<'a> {
    if line.is_empty() {
        return LineKind::Blank;
    }

    let dialect = grammar.dialect();

    if let Some(rest) = line.strip_prefix(dialect.date_marker.as_str()) {
        return match after_single_space(rest) {
            Some(date) => LineKind::DateMarker(date),
            None => LineKind::Malformed(ParseErrorKind::MalformedDate),
        };
    }

    if let Some(rest) = line.strip_prefix(dialect.message_marker) {
        return match after_single_space(rest) {
            Some(fields) => LineKind::Message(fields),
            None => LineKind::Malformed(ParseErrorKind::MalformedMessage),
        };
    }

    LineKind::Malformed(ParseErrorKind::UnexpectedToken)
}

/// The non-empty text following exactly one leading space
fn after_single_space(rest: &str) -> Option<&str> {
    rest.strip_prefix(' ').filter(|text| !text.is_empty())
}
