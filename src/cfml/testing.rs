//! Testing utilities
//!
//! Two tools for tests that parse cfml:
//!
//! 1. [`CfmlSources`] gives access to the verified sample files under `samples/`.
//!    Prefer these over inline cfml text so that a change to the format only means
//!    updating the samples.
//! 2. [`assert_doc`] is a fluent assertion API over a [`Document`]. Failures name the
//!    path of the node that did not match, e.g. `blocks[1].messages[0]`.
//!
//! ```rust,ignore
//! use cfml::cfml::testing::{assert_doc, ymd, CfmlSources};
//!
//! let doc = CfmlSources::parse("000-single-block.cfml")?;
//! assert_doc(&doc).block_count(1).block(0, |block| {
//!     block
//!         .date(ymd(2024, 1, 1))
//!         .message(0, |m| {
//!             m.sender("Alice").receiver(Some("Bob")).body("hello world");
//!         });
//! });
//! ```

use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

use crate::cfml::ast::{DateBlock, Document, Message};
use crate::cfml::error::{Error, Result};
use crate::cfml::parsing::parse;

/// Verified sample files
pub const AVAILABLE_SAMPLES: &[&str] = &[
    "000-single-block.cfml",
    "010-multiple-blocks.cfml",
    "020-escapes.cfml",
    "030-blank-lines.cfml",
];

/// Samples without blank lines or extra whitespace, which serialize back byte for byte
pub const CANONICAL_SAMPLES: &[&str] = &[
    "000-single-block.cfml",
    "010-multiple-blocks.cfml",
    "020-escapes.cfml",
];

pub struct CfmlSources;

impl CfmlSources {
    fn samples_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("samples")
    }

    pub fn sample_path(filename: &str) -> PathBuf {
        Self::samples_dir().join(filename)
    }

    /// Raw text of a sample
    pub fn get_string(filename: &str) -> Result<String> {
        if !AVAILABLE_SAMPLES.contains(&filename) {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!(
                    "Sample '{}' is not available. Available samples: {:?}",
                    filename, AVAILABLE_SAMPLES
                ),
            )));
        }
        Ok(fs::read_to_string(Self::sample_path(filename))?)
    }

    /// Parsed sample with the canonical grammar
    pub fn parse(filename: &str) -> Result<Document> {
        let source = Self::get_string(filename)?;
        Ok(parse(&source)?)
    }
}

/// Shorthand for a calendar date in tests
pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid date {year}-{month}-{day}"),
    }
}

// ============================================================================
// Entry Point
// ============================================================================

/// Create an assertion builder for a document
pub fn assert_doc(doc: &Document) -> DocumentAssertion<'_> {
    DocumentAssertion { doc }
}

// ============================================================================
// Document Assertions
// ============================================================================

pub struct DocumentAssertion<'a> {
    doc: &'a Document,
}

impl<'a> DocumentAssertion<'a> {
    pub fn block_count(self, expected: usize) -> Self {
        let actual = self.doc.len();
        assert_eq!(
            actual,
            expected,
            "Expected {} date blocks, found {}: [{}]",
            expected,
            actual,
            summarize_dates(self.doc)
        );
        self
    }

    /// Assert the dates of all blocks, in order
    pub fn dates(self, expected: &[NaiveDate]) -> Self {
        let actual: Vec<_> = self.doc.dates().collect();
        assert_eq!(actual, expected, "Date block order differs");
        self
    }

    pub fn message_count(self, expected: usize) -> Self {
        assert_eq!(
            self.doc.message_count(),
            expected,
            "Expected {} messages in the document",
            expected
        );
        self
    }

    /// Assert on a specific block by index
    pub fn block<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(DateBlockAssertion<'a>),
    {
        assert!(
            index < self.doc.len(),
            "Block index {} out of bounds (document has {} blocks)",
            index,
            self.doc.len()
        );

        assertion(DateBlockAssertion {
            block: &self.doc.blocks()[index],
            context: format!("blocks[{}]", index),
        });
        self
    }
}

fn summarize_dates(doc: &Document) -> String {
    doc.dates()
        .map(|date| date.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// DateBlock Assertions
// ============================================================================

pub struct DateBlockAssertion<'a> {
    block: &'a DateBlock,
    context: String,
}

impl<'a> DateBlockAssertion<'a> {
    pub fn date(self, expected: NaiveDate) -> Self {
        assert_eq!(
            self.block.date(),
            expected,
            "{}: Expected date {}, found {}",
            self.context,
            expected,
            self.block.date()
        );
        self
    }

    pub fn message_count(self, expected: usize) -> Self {
        assert_eq!(
            self.block.len(),
            expected,
            "{}: Expected {} messages, found {}",
            self.context,
            expected,
            self.block.len()
        );
        self
    }

    pub fn message<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(MessageAssertion<'a>),
    {
        let message = match self.block.get(index) {
            Some(message) => message,
            None => panic!(
                "{}: Message index {} out of bounds (block has {} messages)",
                self.context,
                index,
                self.block.len()
            ),
        };
        assertion(MessageAssertion {
            message,
            context: format!("{}.messages[{}]", self.context, index),
        });
        self
    }
}

// ============================================================================
// Message Assertions
// ============================================================================

pub struct MessageAssertion<'a> {
    message: &'a Message,
    context: String,
}

impl MessageAssertion<'_> {
    pub fn sender(self, expected: &str) -> Self {
        assert_eq!(
            self.message.sender(),
            expected,
            "{}: Expected sender {:?}, found {:?}",
            self.context,
            expected,
            self.message.sender()
        );
        self
    }

    pub fn receiver(self, expected: Option<&str>) -> Self {
        assert_eq!(
            self.message.receiver(),
            expected,
            "{}: Expected receiver {:?}, found {:?}",
            self.context,
            expected,
            self.message.receiver()
        );
        self
    }

    pub fn body(self, expected: &str) -> Self {
        assert_eq!(
            self.message.body(),
            expected,
            "{}: Expected body {:?}, found {:?}",
            self.context,
            expected,
            self.message.body()
        );
        self
    }

    pub fn body_contains(self, needle: &str) -> Self {
        assert!(
            self.message.body().contains(needle),
            "{}: Expected body to contain {:?}, found {:?}",
            self.context,
            needle,
            self.message.body()
        );
        self
    }
}
