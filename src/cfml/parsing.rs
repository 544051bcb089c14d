//! Parser
//!
//!     The parser consumes line tokens and builds a [`Document`]. It keeps a cursor on
//!     the current date block and the set of dates seen so far:
//!
//!     - date marker: the date must parse with the dialect format and render back to
//!       the same text, and must not have been seen before.
//!     - message: requires a current date block. The field text is lexed into field
//!       units and run through the [message] grammar.
//!     - blank: skipped.
//!     - malformed: reported as is.
//!
//!     Parsing stops at the first error and no partial document is returned.
//!
//!     A date marker without messages produces no date block, since empty blocks do
//!     not persist. Its date still counts as seen for duplicate detection.

pub mod message;
pub mod parser;

pub use parser::Parser;

use crate::cfml::ast::Document;
use crate::cfml::error::ParseError;
use crate::cfml::grammar::default_grammar;

/// Parse with the canonical grammar
pub fn parse(source: &str) -> Result<Document, ParseError> {
    Parser::new(default_grammar()).parse(source)
}
