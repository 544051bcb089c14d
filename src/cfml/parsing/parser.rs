use std::collections::HashSet;

use chumsky::Parser as _;
use chrono::NaiveDate;
use tracing::{debug, trace};

use super::message::message_fields;
use crate::cfml::ast::{Document, Message};
use crate::cfml::error::{ParseError, ParseErrorKind};
use crate::cfml::grammar::Grammar;
use crate::cfml::lexing::{LineKind, LineToken, Tokenizer};

/// Fail-fast parser for one grammar
#[derive(Debug, Clone, Copy)]
pub struct Parser<'g> {
    grammar: &'g Grammar,
}

impl<'g> Parser<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self { grammar }
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    /// Tokenize and parse source text
    pub fn parse(&self, source: &str) -> Result<Document, ParseError> {
        self.parse_tokens(Tokenizer::new(self.grammar).tokenize(source))
    }

    /// Parse an already tokenized source
    pub fn parse_tokens<'a, I>(&self, tokens: I) -> Result<Document, ParseError>
    where
        I: IntoIterator<Item = LineToken<'a>>,
    {
        let mut document = Document::new();
        let mut current: Option<NaiveDate> = None;
        let mut seen = HashSet::new();

        for token in tokens {
            let line = token.line_number;
            let fail = |reason| ParseError::new(line, reason);

            match token.kind {
                LineKind::Blank => {}
                LineKind::DateMarker(text) => {
                    let date = self
                        .grammar
                        .parse_date(text)
                        .ok_or_else(|| fail(ParseErrorKind::MalformedDate))?;
                    if !seen.insert(date) {
                        return Err(fail(ParseErrorKind::DuplicateDate));
                    }
                    trace!(line, %date, "date block");
                    current = Some(date);
                }
                LineKind::Message(text) => {
                    let date = current
                        .ok_or_else(|| fail(ParseErrorKind::MessageBeforeAnyDateBlock))?;
                    let message = self.parse_message(text).map_err(fail)?;
                    document.push_message(date, message);
                }
                LineKind::Malformed(reason) => return Err(fail(reason)),
            }
        }

        debug!(
            blocks = document.len(),
            messages = document.message_count(),
            "parsed document"
        );
        Ok(document)
    }

    /// Parse the field text of a single message line
    pub fn parse_message(&self, text: &str) -> Result<Message, ParseErrorKind> {
        let units = self.grammar.lex_fields(text)?;
        let fields = message_fields()
            .parse(units)
            .map_err(|_| ParseErrorKind::MalformedMessage)?;
        Message::new(fields.sender, fields.receiver.as_deref(), fields.body)
            .map_err(|_| ParseErrorKind::MalformedMessage)
    }
}
