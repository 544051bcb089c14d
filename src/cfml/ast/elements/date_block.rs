//! Date block element definition

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use super::message::Message;

/// Messages grouped under one calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateBlock {
    date: NaiveDate,
    messages: Vec<Message>,
}

impl DateBlock {
    pub(crate) fn new(date: NaiveDate) -> Self {
        Self {
            date,
            messages: Vec::new(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub(crate) fn messages_mut(&mut self) -> &mut Vec<Message> {
        &mut self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Message> {
        self.messages.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }
}

impl<'a> IntoIterator for &'a DateBlock {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for DateBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DateBlock({}, {} messages)", self.date, self.messages.len())
    }
}
