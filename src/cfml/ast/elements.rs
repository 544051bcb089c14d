//! AST element definitions

pub mod date_block;
pub mod document;
pub mod message;

pub use date_block::DateBlock;
pub use document::Document;
pub use message::Message;
