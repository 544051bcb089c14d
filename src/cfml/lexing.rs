//! Lexer
//!
//! This module orchestrates tokenization for the cfml format.
//!
//! Structure:
//!     Lexing happens at two levels:
//!     1. Line tokenization: each source line is trimmed and classified into a
//!        [`LineToken`] (date marker, message, blank, or malformed). See
//!        [line_classification].
//!     2. Field lexing: the text of a message line is split into [`FieldUnit`]s
//!        (literal characters with escapes decoded, reserved characters, the arrow and
//!        the separator). See [fields].
//!
//!     The tokenizer never fails. Malformed lines come out as
//!     [`LineKind::Malformed`] values and the parser decides what to do with them.
//!     Blank lines are reported so that line numbers stay accurate, but carry no
//!     meaning.

pub mod escaping;
pub mod fields;
pub mod line_classification;
pub mod tokens;

pub use fields::lex_fields;
pub use line_classification::classify_line;
pub use tokens::{FieldUnit, LineKind, LineToken};

use std::iter::Enumerate;
use std::str::Lines;

use crate::cfml::grammar::{default_grammar, Grammar};

/// Splits source text into line tokens for one grammar
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<'g> {
    grammar: &'g Grammar,
}

impl<'g> Tokenizer<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self { grammar }
    }

    /// Lazily tokenize `source`. The returned iterator can be cloned to restart.
    pub fn tokenize<'a>(&self, source: &'a str) -> LineTokens<'a, 'g> {
        LineTokens {
            grammar: self.grammar,
            lines: source.lines().enumerate(),
        }
    }
}

/// Iterator over the line tokens of a source text
#[derive(Debug, Clone)]
pub struct LineTokens<'a, 'g> {
    grammar: &'g Grammar,
    lines: Enumerate<Lines<'a>>,
}

impl<'a> Iterator for LineTokens<'a, '_> {
    type Item = LineToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, line) = self.lines.next()?;
        Some(LineToken {
            line_number: index + 1,
            kind: classify_line(self.grammar, line.trim()),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.lines.size_hint()
    }
}

/// Tokenize with the canonical grammar
pub fn tokenize(source: &str) -> LineTokens<'_, 'static> {
    Tokenizer::new(default_grammar()).tokenize(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfml::error::ParseErrorKind;

    #[test]
    fn test_document_pattern() {
        let source = "#DATE: 2024-01-01\n> Alice -> Bob: hello\n\n> Carol: note";
        let tokens: Vec<_> = tokenize(source).collect();

        assert_eq!(
            tokens,
            vec![
                LineToken::new(1, LineKind::DateMarker("2024-01-01")),
                LineToken::new(2, LineKind::Message("Alice -> Bob: hello")),
                LineToken::new(3, LineKind::Blank),
                LineToken::new(4, LineKind::Message("Carol: note")),
            ]
        );
    }

    #[test]
    fn test_lines_are_trimmed_before_classification() {
        let tokens: Vec<_> = tokenize("   #DATE: 2024-01-01  \n\t> a: b\t\n   ").collect();

        assert_eq!(
            tokens,
            vec![
                LineToken::new(1, LineKind::DateMarker("2024-01-01")),
                LineToken::new(2, LineKind::Message("a: b")),
                LineToken::new(3, LineKind::Blank),
            ]
        );
    }

    #[test]
    fn test_malformed_lines_are_values() {
        let tokens: Vec<_> = tokenize("hello\n#DATE:\n>").collect();

        assert_eq!(
            tokens,
            vec![
                LineToken::new(1, LineKind::Malformed(ParseErrorKind::UnexpectedToken)),
                LineToken::new(2, LineKind::Malformed(ParseErrorKind::MalformedDate)),
                LineToken::new(3, LineKind::Malformed(ParseErrorKind::MalformedMessage)),
            ]
        );
    }

    #[test]
    fn test_tokenizer_is_restartable() {
        let tokens = tokenize("#DATE: 2024-01-01\n> a: b");
        let first: Vec<_> = tokens.clone().collect();
        let second: Vec<_> = tokens.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_crlf_line_endings() {
        let tokens: Vec<_> = tokenize("#DATE: 2024-01-01\r\n> a: b\r\n").collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].kind, LineKind::Message("a: b"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize("").count(), 0);
    }
}
