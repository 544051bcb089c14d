//! Field lexer
//!
//! Splits the text of a message line into [`FieldUnit`]s with the grammar's field
//! pattern. Every character of the input belongs to exactly one unit. The arrow,
//! including its surrounding spaces, is a single unit so that the field grammar
//! never needs lookahead to find where the sender ends.

use crate::cfml::error::ParseErrorKind;
use crate::cfml::grammar::Grammar;
use crate::cfml::lexing::escaping::decode_escape;
use crate::cfml::lexing::tokens::FieldUnit;

/// Lex message text. Unknown or incomplete escapes are malformed.
pub fn lex_fields(grammar: &Grammar, text: &str) -> Result<Vec<FieldUnit>, ParseErrorKind> {
    let dialect = grammar.dialect();
    let escape_len = dialect.escape.len_utf8();
    let mut units = Vec::with_capacity(text.len());

    for caps in grammar.field_pattern().captures_iter(text) {
        let unit = if let Some(m) = caps.name("escape") {
            let decoded = decode_escape(grammar, &m.as_str()[escape_len..])
                .ok_or(ParseErrorKind::MalformedMessage)?;
            FieldUnit::Escaped(decoded)
        } else if caps.name("arrow").is_some() {
            FieldUnit::Arrow
        } else if let Some(m) = caps.name("reserved") {
            match first_char(m.as_str())? {
                c if c == dialect.separator => FieldUnit::Separator,
                c => FieldUnit::Reserved(c),
            }
        } else if let Some(m) = caps.name("plain") {
            FieldUnit::Char(first_char(m.as_str())?)
        } else {
            return Err(ParseErrorKind::MalformedMessage);
        };
        units.push(unit);
    }

    Ok(units)
}

fn first_char(s: &str) -> Result<char, ParseErrorKind> {
    s.chars().next().ok_or(ParseErrorKind::MalformedMessage)
}
