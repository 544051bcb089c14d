//! # cfml
//!
//! A parser, document model and serializer for cfml, a compact line-based log of
//! dated messages.
//!
//! File Layout
//!
//!     The library follows the usual lexing / parsing / ast / formats split:
//!
//!     src/cfml
//!       ├── grammar      Dialect (delimiters, escape marker) and its compiled Grammar
//!       ├── lexing       Line tokenizer and message field lexer
//!       ├── parsing      Line tokens -> Document
//!       ├── ast          Document, DateBlock, Message, queries and addressing
//!       ├── formats      Serializers (cfml, json, treeviz) and their registry
//!       ├── config       Layered TOML configuration
//!       ├── loader       File helpers
//!       └── testing      Fluent document assertions and sample sources
//!
//! Round Trip
//!
//!     Parsing canonical text and serializing the result yields the same bytes. Blank
//!     lines are accepted on input and never produced on output.
//!
//! For testing guidelines, see the [testing module](cfml::testing).

pub mod cfml;

pub use cfml::ast::{
    DateBlock, Document, Located, Message, MessageAddress, MessageEdit, Query,
};
pub use cfml::error::{Error, NotFoundError, ParseError, ParseErrorKind, Result, ValidationError};
pub use cfml::formats::{serialize, ToCfmlString};
pub use cfml::grammar::{Dialect, Grammar};
pub use cfml::parsing::parse;
