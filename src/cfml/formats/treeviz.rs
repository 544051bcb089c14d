//! Treeviz formatter for documents

use crate::cfml::ast::{DateBlock, Document, Message};
use crate::cfml::formats::registry::{FormatError, Formatter};

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

pub fn to_treeviz_str(doc: &Document) -> String {
    let mut result = String::new();
    let blocks = doc.blocks();
    for (i, block) in blocks.iter().enumerate() {
        let is_last = i == blocks.len() - 1;
        append_block(&mut result, block, is_last);
    }
    result
}

fn append_block(result: &mut String, block: &DateBlock, is_last: bool) {
    let connector = if is_last { "└─" } else { "├─" };
    result.push_str(&format!("{} DateBlock: {}\n", connector, block.date()));

    let prefix = if is_last { "  " } else { "│ " };
    for (i, message) in block.iter().enumerate() {
        let is_last = i == block.len() - 1;
        append_message(result, message, prefix, is_last);
    }
}

fn append_message(result: &mut String, message: &Message, prefix: &str, is_last: bool) {
    let connector = if is_last { "└─" } else { "├─" };
    let route = match message.receiver() {
        Some(receiver) => format!("{} -> {}", message.sender(), receiver),
        None => message.sender().to_string(),
    };
    // Keep one node per line
    let body = message.body().replace('\n', "⏎");
    result.push_str(&format!(
        "{}{} Message: {}: {}\n",
        prefix,
        connector,
        route,
        truncate(&body, 30)
    ));
}

pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }

    fn description(&self) -> &str {
        "Tree view of date blocks and messages"
    }
}
