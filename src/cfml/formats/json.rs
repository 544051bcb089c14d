//! JSON formatter
//!
//! Serializes the document model with serde. Dates are written as `YYYY-MM-DD` and
//! messages without receiver omit the `receiver` key.

use crate::cfml::ast::Document;
use crate::cfml::formats::registry::{FormatError, Formatter};

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serde_json::to_string_pretty(doc).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Document model as JSON"
    }
}
