//! Dialect and compiled grammar
//!
//!     A [`Dialect`] names the delimiters of the format: the date marker, the message
//!     marker, the arrow between sender and receiver, the separator before the body,
//!     the escape marker, and the date format. The canonical dialect is:
//!
//!         #DATE: 2024-01-01
//!         > Alice -> Bob: hello world
//!         > Alice: a note without receiver
//!
//!     A [`Grammar`] is a validated dialect plus the field lexer built from it. The
//!     tokenizer, parser and serializer all take a `&Grammar`, so several dialects can
//!     coexist in one process. [`default_grammar`] returns the canonical one.
//!
//! Reserved Characters
//!
//!     The escape marker, the first character of the date marker, the message marker
//!     and the separator are reserved. Inside a field each of them is written as the
//!     escape marker followed by the character. The arrow must contain a reserved
//!     character so that escaping breaks any literal arrow inside a field.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::cfml::error::{ParseErrorKind, ValidationError};
use crate::cfml::lexing::{escaping, fields, FieldUnit};

static DEFAULT_GRAMMAR: Lazy<Grammar> =
    Lazy::new(|| Grammar::new(Dialect::default()).expect("default dialect is valid"));

/// The canonical grammar
pub fn default_grammar() -> &'static Grammar {
    &DEFAULT_GRAMMAR
}

/// Delimiters and escape marker of a cfml dialect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dialect {
    pub date_marker: String,
    pub message_marker: char,
    pub arrow: String,
    pub separator: char,
    pub escape: char,
    /// chrono strftime format of the date after the date marker
    pub date_format: String,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            date_marker: "#DATE:".to_string(),
            message_marker: '>',
            arrow: "->".to_string(),
            separator: ':',
            escape: '\\',
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl Dialect {
    /// Characters that must be escaped inside message fields
    pub fn reserved_chars(&self) -> Vec<char> {
        let mut reserved = vec![self.escape];
        reserved.extend(self.date_marker.chars().next());
        reserved.push(self.message_marker);
        reserved.push(self.separator);
        reserved.sort_unstable();
        reserved.dedup();
        reserved
    }

    /// Check that the dialect can express every field value unambiguously
    pub fn validate(&self) -> Result<(), ValidationError> {
        let invalid = |msg: String| Err(ValidationError::InvalidDialect(msg));

        if self.date_marker.is_empty() {
            return invalid("date marker must not be empty".to_string());
        }
        if self.date_marker.trim() != self.date_marker {
            return invalid(format!(
                "date marker '{}' must not start or end with whitespace",
                self.date_marker
            ));
        }
        // Date markers are matched first, so they must never match a message line
        if self.date_marker.starts_with(self.message_marker) {
            return invalid(format!(
                "date marker '{}' must not start with the message marker {:?}",
                self.date_marker, self.message_marker
            ));
        }
        if self.arrow.is_empty() {
            return invalid("arrow must not be empty".to_string());
        }
        if self.arrow.trim() != self.arrow {
            return invalid(format!("arrow '{}' must not start or end with whitespace", self.arrow));
        }

        let reserved = self.reserved_chars();
        if let Some(c) = reserved
            .iter()
            .find(|c| c.is_alphanumeric() || c.is_whitespace())
        {
            return invalid(format!("reserved character {c:?} must be punctuation"));
        }
        if self.escape == self.message_marker
            || self.escape == self.separator
            || self.date_marker.starts_with(self.escape)
        {
            return invalid(format!("escape {:?} must differ from the markers", self.escape));
        }
        if self.message_marker == self.separator {
            return invalid(format!(
                "message marker and separator must differ (both {:?})",
                self.separator
            ));
        }
        if self.arrow.contains(self.separator) || self.arrow.contains(self.escape) {
            return invalid(format!(
                "arrow '{}' must not contain the separator or the escape",
                self.arrow
            ));
        }
        if !self.arrow.chars().any(|c| reserved.contains(&c)) {
            return invalid(format!(
                "arrow '{}' must contain a reserved character",
                self.arrow
            ));
        }

        self.validate_date_format()
    }

    fn validate_date_format(&self) -> Result<(), ValidationError> {
        let invalid = || {
            Err(ValidationError::InvalidDialect(format!(
                "date format '{}' does not round-trip a calendar date",
                self.date_format
            )))
        };

        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return invalid();
        }
        let Some(sample) = NaiveDate::from_ymd_opt(2024, 12, 31) else {
            return invalid();
        };
        let rendered = sample.format(&self.date_format).to_string();
        if rendered.is_empty() || rendered.trim() != rendered || rendered.contains('\n') {
            return invalid();
        }
        match NaiveDate::parse_from_str(&rendered, &self.date_format) {
            Ok(parsed) if parsed == sample => Ok(()),
            _ => invalid(),
        }
    }
}

/// A validated dialect together with its field lexer
#[derive(Debug, Clone)]
pub struct Grammar {
    dialect: Dialect,
    reserved: Vec<char>,
    arrow_token: String,
    field_pattern: Regex,
}

impl Grammar {
    pub fn new(dialect: Dialect) -> Result<Self, ValidationError> {
        dialect.validate()?;

        let reserved = dialect.reserved_chars();
        let arrow_token = format!(" {} ", dialect.arrow);
        let field_pattern = build_field_pattern(&dialect, &reserved, &arrow_token)?;

        Ok(Self {
            dialect,
            reserved,
            arrow_token,
            field_pattern,
        })
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    pub fn is_reserved(&self, c: char) -> bool {
        self.reserved.contains(&c)
    }

    /// The arrow as written between sender and receiver, with its surrounding spaces
    pub fn arrow_token(&self) -> &str {
        &self.arrow_token
    }

    pub(crate) fn field_pattern(&self) -> &Regex {
        &self.field_pattern
    }

    /// Split the text of a message line into field units, decoding escapes
    pub fn lex_fields(&self, text: &str) -> Result<Vec<FieldUnit>, ParseErrorKind> {
        fields::lex_fields(self, text)
    }

    /// Render a field value so that it lexes back to the same characters
    pub fn escape_field(&self, value: &str) -> String {
        escaping::escape_field(self, value)
    }

    /// Parse the text after a date marker. Only the canonical rendering is accepted.
    pub fn parse_date(&self, text: &str) -> Option<NaiveDate> {
        let date = NaiveDate::parse_from_str(text, &self.dialect.date_format).ok()?;
        (self.format_date(date) == text).then_some(date)
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(&self.dialect.date_format).to_string()
    }
}

impl Default for Grammar {
    fn default() -> Self {
        default_grammar().clone()
    }
}

/// One alternative per field unit, tried in order: escape sequence, arrow, reserved
/// character, any other character.
fn build_field_pattern(
    dialect: &Dialect,
    reserved: &[char],
    arrow_token: &str,
) -> Result<Regex, ValidationError> {
    let escape = regex::escape(&dialect.escape.to_string());
    let arrow = regex::escape(arrow_token);
    let reserved = reserved
        .iter()
        .map(|c| regex::escape(&c.to_string()))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(
        r"(?s)(?P<escape>{escape}(?:u\{{[0-9A-Fa-f]{{1,6}}\}}|.))|(?P<arrow>{arrow})|(?P<reserved>{reserved})|(?P<plain>.)"
    );
    Regex::new(&pattern).map_err(|e| ValidationError::InvalidDialect(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reserved_chars() {
        let grammar = default_grammar();
        for c in ['\\', '#', '>', ':'] {
            assert!(grammar.is_reserved(c), "{c:?} should be reserved");
        }
        assert!(!grammar.is_reserved('-'));
        assert_eq!(grammar.arrow_token(), " -> ");
    }

    #[test]
    fn test_date_must_be_canonical() {
        let grammar = default_grammar();
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(grammar.parse_date("2024-01-05"), Some(date));
        assert_eq!(grammar.parse_date("2024-1-5"), None);
        assert_eq!(grammar.parse_date("2024-02-30"), None);
        assert_eq!(grammar.parse_date("yesterday"), None);
        assert_eq!(grammar.format_date(date), "2024-01-05");
    }

    #[test]
    fn test_custom_dialect() {
        let dialect = Dialect {
            date_marker: "@day".to_string(),
            message_marker: '-',
            arrow: "->".to_string(),
            separator: '|',
            escape: '~',
            date_format: "%d.%m.%Y".to_string(),
        };
        let grammar = Grammar::new(dialect).unwrap();
        assert!(!grammar.is_reserved('>'));
        assert!(grammar.is_reserved('-'));
        assert!(grammar.is_reserved('@'));
        assert!(grammar.is_reserved('|'));
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(grammar.parse_date("09.03.2024"), Some(date));
    }

    #[test]
    fn test_arrow_without_reserved_char_is_rejected() {
        let dialect = Dialect {
            arrow: "to".to_string(),
            ..Dialect::default()
        };
        assert!(matches!(
            Grammar::new(dialect),
            Err(ValidationError::InvalidDialect(_))
        ));
    }

    #[test]
    fn test_alphanumeric_separator_is_rejected() {
        let dialect = Dialect {
            separator: 's',
            ..Dialect::default()
        };
        assert!(Grammar::new(dialect).is_err());
    }

    #[test]
    fn test_escape_colliding_with_marker_is_rejected() {
        let dialect = Dialect {
            escape: '>',
            ..Dialect::default()
        };
        assert!(Grammar::new(dialect).is_err());
    }

    #[test]
    fn test_date_marker_shadowing_message_marker_is_rejected() {
        for date_marker in [">", ">DATE:", " #DATE:"] {
            let dialect = Dialect {
                date_marker: date_marker.to_string(),
                ..Dialect::default()
            };
            assert!(
                matches!(Grammar::new(dialect), Err(ValidationError::InvalidDialect(_))),
                "{date_marker:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_broken_date_format_is_rejected() {
        for format in ["%Y-%m", "%Q", "%Y-%m-%d "] {
            let dialect = Dialect {
                date_format: format.to_string(),
                ..Dialect::default()
            };
            assert!(Grammar::new(dialect).is_err(), "{format} should be rejected");
        }
    }
}
