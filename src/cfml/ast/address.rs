//! Message addresses and partial edits

use chrono::NaiveDate;
use std::fmt;

use crate::cfml::ast::elements::Message;
use crate::cfml::ast::query::Query;
use crate::cfml::error::ValidationError;

/// Names a message for edit or delete
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MessageAddress {
    /// Zero-based position within the block for `date`
    Position { date: NaiveDate, position: usize },
    /// First match of the query in document order
    First(Query),
}

impl MessageAddress {
    pub fn at(date: NaiveDate, position: usize) -> Self {
        MessageAddress::Position { date, position }
    }

    pub fn first(query: Query) -> Self {
        MessageAddress::First(query)
    }
}

impl fmt::Display for MessageAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageAddress::Position { date, position } => write!(f, "{date}[{position}]"),
            MessageAddress::First(query) => write!(f, "first match of {query}"),
        }
    }
}

/// A partial patch over a message. Fields left unset keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageEdit {
    sender: Option<String>,
    receiver: Option<Option<String>>,
    body: Option<String>,
}

impl MessageEdit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    pub fn receiver(mut self, receiver: impl Into<String>) -> Self {
        self.receiver = Some(Some(receiver.into()));
        self
    }

    /// Turn the message into one without receiver
    pub fn clear_receiver(mut self) -> Self {
        self.receiver = Some(None);
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// The edited copy of `message`, validated like [`Message::new`]
    pub fn apply_to(&self, message: &Message) -> Result<Message, ValidationError> {
        let sender = self.sender.as_deref().unwrap_or(message.sender());
        let receiver = match &self.receiver {
            Some(receiver) => receiver.as_deref(),
            None => message.receiver(),
        };
        let body = self.body.as_deref().unwrap_or(message.body());
        Message::new(sender, receiver, body)
    }
}
