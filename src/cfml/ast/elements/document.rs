//! Document element definition
//!
//! Mutations validate first and change the document only once nothing can fail, so
//! an error always leaves the document as it was.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use tracing::debug;

use super::date_block::DateBlock;
use super::message::Message;
use crate::cfml::ast::address::{MessageAddress, MessageEdit};
use crate::cfml::ast::query::{Located, Query};
use crate::cfml::error::{Error, NotFoundError, ValidationError};

/// The root of a cfml document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    blocks: Vec<DateBlock>,
}

impl Document {
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    pub fn blocks(&self) -> &[DateBlock] {
        &self.blocks
    }

    pub fn iter_blocks(&self) -> impl Iterator<Item = &DateBlock> {
        self.blocks.iter()
    }

    /// Dates in block order
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.blocks.iter().map(DateBlock::date)
    }

    pub fn date_block(&self, date: NaiveDate) -> Option<&DateBlock> {
        self.blocks.iter().find(|block| block.date() == date)
    }

    pub fn messages(&self, date: NaiveDate) -> Result<&[Message], NotFoundError> {
        self.date_block(date)
            .map(DateBlock::messages)
            .ok_or(NotFoundError::DateBlock(date))
    }

    pub fn message_at(&self, date: NaiveDate, position: usize) -> Option<&Message> {
        self.date_block(date)?.get(position)
    }

    /// Number of date blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn message_count(&self) -> usize {
        self.blocks.iter().map(DateBlock::len).sum()
    }

    /// Append a message to the block for `date`, creating the block at the end if
    /// the date is new. Returns the position of the message within its block.
    pub fn push_message(&mut self, date: NaiveDate, message: Message) -> usize {
        let index = match self.block_index(date) {
            Some(index) => index,
            None => {
                self.blocks.push(DateBlock::new(date));
                self.blocks.len() - 1
            }
        };
        let messages = self.blocks[index].messages_mut();
        messages.push(message);
        messages.len() - 1
    }

    /// Validate and append a message. See [`Message::new`].
    pub fn add_message(
        &mut self,
        date: NaiveDate,
        sender: &str,
        receiver: Option<&str>,
        body: &str,
    ) -> Result<usize, ValidationError> {
        let message = Message::new(sender, receiver, body)?;
        let position = self.push_message(date, message);
        debug!(%date, position, "added message");
        Ok(position)
    }

    /// Apply a partial edit in place. The message keeps its position.
    pub fn edit_message(&mut self, address: &MessageAddress, edit: MessageEdit) -> Result<(), Error> {
        let (block, position) = self.resolve(address)?;
        let messages = self.blocks[block].messages_mut();
        let edited = edit.apply_to(&messages[position])?;
        messages[position] = edited;
        debug!(%address, "edited message");
        Ok(())
    }

    /// Remove a message. A block left without messages is removed too.
    pub fn delete_message(&mut self, address: &MessageAddress) -> Result<Message, NotFoundError> {
        let (block, position) = self.resolve(address)?;
        let message = self.blocks[block].messages_mut().remove(position);
        if self.blocks[block].is_empty() {
            let removed = self.blocks.remove(block);
            debug!(date = %removed.date(), "removed empty date block");
        }
        debug!(%address, "deleted message");
        Ok(message)
    }

    /// Remove a whole date block with its messages
    pub fn delete_date_block(&mut self, date: NaiveDate) -> Result<DateBlock, NotFoundError> {
        let index = self
            .block_index(date)
            .ok_or(NotFoundError::DateBlock(date))?;
        debug!(%date, "deleted date block");
        Ok(self.blocks.remove(index))
    }

    /// Reorder blocks by date. Blocks are otherwise never reordered.
    pub fn sort_chronologically(&mut self) {
        self.blocks.sort_by_key(DateBlock::date);
    }

    /// Messages matching `query`, lazily and in document order
    pub fn find<'a, 'q>(&'a self, query: &'q Query) -> impl Iterator<Item = Located<'a>> + 'q
    where
        'a: 'q,
    {
        self.blocks
            .iter()
            .filter(move |block| query.matches_date(block.date()))
            .flat_map(move |block| {
                block
                    .iter()
                    .enumerate()
                    .filter(move |(_, message)| query.matches_message(message))
                    .map(move |(position, message)| Located {
                        date: block.date(),
                        position,
                        message,
                    })
            })
    }

    /// Resolve an address to the current message it names
    pub fn get(&self, address: &MessageAddress) -> Result<Located<'_>, NotFoundError> {
        let (block, position) = self.resolve(address)?;
        let block = &self.blocks[block];
        Ok(Located {
            date: block.date(),
            position,
            message: &block.messages()[position],
        })
    }

    fn resolve(&self, address: &MessageAddress) -> Result<(usize, usize), NotFoundError> {
        let not_found = || NotFoundError::Message(address.clone());
        match address {
            MessageAddress::Position { date, position } => {
                let block = self.block_index(*date).ok_or_else(not_found)?;
                if *position < self.blocks[block].len() {
                    Ok((block, *position))
                } else {
                    Err(not_found())
                }
            }
            MessageAddress::First(query) => {
                let found = self.find(query).next().ok_or_else(not_found)?;
                let block = self.block_index(found.date).ok_or_else(not_found)?;
                Ok((block, found.position))
            }
        }
    }

    fn block_index(&self, date: NaiveDate) -> Option<usize> {
        // New messages usually go to the most recent block
        self.blocks.iter().rposition(|block| block.date() == date)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Document({} date blocks, {} messages)",
            self.blocks.len(),
            self.message_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_document_creation() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.message_count(), 0);
        assert_eq!(doc.to_string(), "Document(0 date blocks, 0 messages)");
    }

    #[test]
    fn test_push_returns_positions() {
        let mut doc = Document::new();
        let d1 = ymd(2024, 1, 1);
        let d2 = ymd(2024, 1, 2);
        assert_eq!(doc.add_message(d1, "a", None, "1").unwrap(), 0);
        assert_eq!(doc.add_message(d2, "a", None, "2").unwrap(), 0);
        assert_eq!(doc.add_message(d1, "a", None, "3").unwrap(), 1);
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.message_count(), 3);
    }

    #[test]
    fn test_failed_add_leaves_no_block() {
        let mut doc = Document::new();
        assert!(doc.add_message(ymd(2024, 1, 1), "", None, "x").is_err());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_get_by_position_and_query() {
        let mut doc = Document::new();
        let date = ymd(2024, 1, 1);
        doc.add_message(date, "a", None, "first").unwrap();
        doc.add_message(date, "b", None, "second").unwrap();

        let located = doc.get(&MessageAddress::at(date, 1)).unwrap();
        assert_eq!(located.message.body(), "second");

        let located = doc
            .get(&MessageAddress::first(Query::new().sender("b")))
            .unwrap();
        assert_eq!(located.position, 1);

        assert_eq!(
            doc.get(&MessageAddress::at(date, 2)).unwrap_err(),
            NotFoundError::Message(MessageAddress::at(date, 2))
        );
    }

    #[test]
    fn test_find_results_outlive_the_query() {
        let mut doc = Document::new();
        let date = ymd(2024, 1, 1);
        doc.add_message(date, "a", Some("b"), "one").unwrap();
        doc.add_message(date, "b", None, "two").unwrap();

        let found: Vec<Located<'_>> = doc.find(&Query::new().sender("b")).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].position, 1);
        assert_eq!(found[0].message.body(), "two");
    }

    #[test]
    fn test_sort_chronologically() {
        let mut doc = Document::new();
        for day in [3, 1, 2] {
            doc.add_message(ymd(2024, 1, day), "a", None, "x").unwrap();
        }
        doc.sort_chronologically();
        assert_eq!(
            doc.dates().collect::<Vec<_>>(),
            vec![ymd(2024, 1, 1), ymd(2024, 1, 2), ymd(2024, 1, 3)]
        );
    }
}
