//! Canonical cfml serializer
//!
//!     Each date block is written as its date marker line followed by one line per
//!     message. Lines are joined with `\n`. There are no blank lines and no trailing
//!     newline. Field values are escaped with [`Grammar::escape_field`], so any
//!     document built through the API parses back to an equal document.

use crate::cfml::ast::{DateBlock, Document, Message};
use crate::cfml::formats::registry::{FormatError, Formatter};
use crate::cfml::grammar::{default_grammar, Grammar};

/// Writes documents in the line format of one grammar
#[derive(Debug, Clone, Copy)]
pub struct Serializer<'g> {
    grammar: &'g Grammar,
}

impl<'g> Serializer<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self { grammar }
    }

    pub fn serialize(&self, doc: &Document) -> String {
        let mut lines = Vec::with_capacity(doc.len() + doc.message_count());
        for block in doc.iter_blocks() {
            lines.push(self.date_line(block));
            lines.extend(block.iter().map(|message| self.message_line(message)));
        }
        lines.join("\n")
    }

    pub fn date_line(&self, block: &DateBlock) -> String {
        format!(
            "{} {}",
            self.grammar.dialect().date_marker,
            self.grammar.format_date(block.date())
        )
    }

    pub fn message_line(&self, message: &Message) -> String {
        let dialect = self.grammar.dialect();
        let mut line = String::new();
        line.push(dialect.message_marker);
        line.push(' ');
        line.push_str(&self.grammar.escape_field(message.sender()));
        if let Some(receiver) = message.receiver() {
            line.push_str(self.grammar.arrow_token());
            line.push_str(&self.grammar.escape_field(receiver));
        }
        line.push(dialect.separator);
        if !message.body().is_empty() {
            line.push(' ');
            line.push_str(&self.grammar.escape_field(message.body()));
        }
        line
    }
}

/// Serialize with the canonical grammar
pub fn serialize(doc: &Document) -> String {
    Serializer::new(default_grammar()).serialize(doc)
}

/// Render a node in the canonical line format
pub trait ToCfmlString {
    fn to_cfml_string(&self) -> String;
}

impl ToCfmlString for Document {
    fn to_cfml_string(&self) -> String {
        serialize(self)
    }
}

impl ToCfmlString for DateBlock {
    fn to_cfml_string(&self) -> String {
        let serializer = Serializer::new(default_grammar());
        std::iter::once(serializer.date_line(self))
            .chain(self.iter().map(|message| serializer.message_line(message)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl ToCfmlString for Message {
    fn to_cfml_string(&self) -> String {
        Serializer::new(default_grammar()).message_line(self)
    }
}

/// Formatter for the canonical line format
#[derive(Debug, Clone, Default)]
pub struct CfmlFormatter {
    grammar: Grammar,
}

impl CfmlFormatter {
    pub fn new(grammar: Grammar) -> Self {
        Self { grammar }
    }
}

impl Formatter for CfmlFormatter {
    fn name(&self) -> &str {
        "cfml"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(Serializer::new(&self.grammar).serialize(doc))
    }

    fn description(&self) -> &str {
        "Canonical cfml text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_serialize_layout() {
        let mut doc = Document::new();
        doc.add_message(ymd(2024, 1, 1), "Alice", Some("Bob"), "hello")
            .unwrap();
        doc.add_message(ymd(2024, 1, 1), "Alice", None, "").unwrap();
        doc.add_message(ymd(2024, 1, 2), "Bob", None, "note").unwrap();

        assert_eq!(
            serialize(&doc),
            "#DATE: 2024-01-01\n> Alice -> Bob: hello\n> Alice:\n#DATE: 2024-01-02\n> Bob: note"
        );
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(serialize(&Document::new()), "");
    }

    #[test]
    fn test_fields_are_escaped() {
        let message = Message::new(" Al:ice", Some("#Bob"), "a -> b\nc ").unwrap();
        assert_eq!(
            message.to_cfml_string(),
            r"> \sAl\:ice -> \#Bob: a -\> b\nc\s"
        );
    }

    #[test]
    fn test_date_block_to_cfml_string() {
        let mut doc = Document::new();
        doc.add_message(ymd(2024, 5, 6), "a", None, "b").unwrap();
        assert_eq!(
            doc.blocks()[0].to_cfml_string(),
            "#DATE: 2024-05-06\n> a: b"
        );
    }
}
