//! Document loading and saving
//!
//! This module provides [`DocumentLoader`], which stages source text from a file or
//! a string before parsing or tokenizing it, plus the [`load`] and [`save`] file
//! helpers used by the CLI.
//!
//! # Example
//!
//! ```rust
//! use cfml::cfml::loader::{self, DocumentLoader};
//!
//! // From file
//! let doc = loader::load("journal.cfml").unwrap();
//!
//! // From string
//! let doc = DocumentLoader::from_string("#DATE: 2024-01-01\n> a: b")
//!     .parse()
//!     .unwrap();
//!
//! loader::save("journal.cfml", &doc).unwrap();
//! ```

use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::cfml::ast::Document;
use crate::cfml::error::{ParseError, Result};
use crate::cfml::formats::Serializer;
use crate::cfml::grammar::{default_grammar, Grammar};
use crate::cfml::lexing::{LineToken, Tokenizer};
use crate::cfml::parsing::Parser;

/// Source text staged for parsing
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    source: String,
}

impl DocumentLoader {
    /// Load from a file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        debug!(path = %path.display(), bytes = source.len(), "read source");
        Ok(DocumentLoader { source })
    }

    /// Load from a string
    pub fn from_string<S: Into<String>>(source: S) -> Self {
        DocumentLoader {
            source: source.into(),
        }
    }

    /// Parse with the canonical grammar
    pub fn parse(&self) -> Result<Document, ParseError> {
        self.parse_with(default_grammar())
    }

    pub fn parse_with(&self, grammar: &Grammar) -> Result<Document, ParseError> {
        Parser::new(grammar).parse(&self.source)
    }

    /// Line tokens of the source with the canonical grammar
    pub fn tokenize(&self) -> Vec<LineToken<'_>> {
        self.tokenize_with(default_grammar())
    }

    pub fn tokenize_with(&self, grammar: &Grammar) -> Vec<LineToken<'_>> {
        Tokenizer::new(grammar).tokenize(&self.source).collect()
    }

    /// Get the raw source string
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Read and parse a file with the canonical grammar
pub fn load<P: AsRef<Path>>(path: P) -> Result<Document> {
    load_with(path, default_grammar())
}

pub fn load_with<P: AsRef<Path>>(path: P, grammar: &Grammar) -> Result<Document> {
    let document = DocumentLoader::from_path(path)?.parse_with(grammar)?;
    Ok(document)
}

/// Serialize a document and write it, replacing the file if it exists
pub fn save<P: AsRef<Path>>(path: P, document: &Document) -> Result<()> {
    save_with(path, document, default_grammar())
}

pub fn save_with<P: AsRef<Path>>(path: P, document: &Document, grammar: &Grammar) -> Result<()> {
    let path = path.as_ref();
    let text = Serializer::new(grammar).serialize(document);
    fs::write(path, &text)?;
    info!(path = %path.display(), blocks = document.len(), "saved document");
    Ok(())
}
