//! Message field grammar
//!
//! Parses the field units of one message line:
//!
//!     <sender> [<arrow> <receiver>] <separator> [" " <body>]
//!
//! Sender and receiver are non-empty runs of literal characters. The body is
//! everything after the space that follows the separator; a separator at the end of
//! the line means an empty body.

use chumsky::prelude::*;

use crate::cfml::lexing::FieldUnit;

/// Type alias for parser error
type ParserError = Simple<FieldUnit>;

/// Decoded fields of a message line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageFields {
    pub sender: String,
    pub receiver: Option<String>,
    pub body: String,
}

/// A literal character, plain or escaped
fn field_char() -> impl Parser<FieldUnit, char, Error = ParserError> + Clone {
    filter_map(|span, unit| match unit {
        FieldUnit::Char(c) | FieldUnit::Escaped(c) => Ok(c),
        other => Err(Simple::expected_input_found(span, Vec::new(), Some(other))),
    })
}

fn name() -> impl Parser<FieldUnit, String, Error = ParserError> + Clone {
    field_char().repeated().at_least(1).collect::<String>()
}

fn body() -> impl Parser<FieldUnit, String, Error = ParserError> + Clone {
    just(FieldUnit::Char(' ')).ignore_then(field_char().repeated().collect::<String>())
}

/// Parser for a full message line
pub fn message_fields() -> impl Parser<FieldUnit, MessageFields, Error = ParserError> {
    name()
        .then(just(FieldUnit::Arrow).ignore_then(name()).or_not())
        .then_ignore(just(FieldUnit::Separator))
        .then(body().or_not())
        .then_ignore(end())
        .map(|((sender, receiver), body)| MessageFields {
            sender,
            receiver,
            body: body.unwrap_or_default(),
        })
}
