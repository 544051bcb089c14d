//! Output format implementations for document serialization
//!
//! This module contains the formats a [`Document`](crate::cfml::ast::Document) can be
//! written in:
//! - cfml: the canonical line format, which parses back to an equal document
//! - json: the document model as pretty-printed JSON
//! - treeviz: an indented tree for humans

pub mod cfml;
pub mod json;
pub mod registry;
pub mod treeviz;

pub use cfml::{serialize, CfmlFormatter, Serializer, ToCfmlString};
pub use json::JsonFormatter;
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
