//! Query filters
//!
//!     A [`Query`] is a conjunction of optional filters. An absent filter matches
//!     everything. All text comparisons are exact and case-sensitive:
//!
//!     - sender: equals the sender
//!     - receiver: equals the receiver. Never matches a message without receiver.
//!     - text: substring of the body
//!     - date: equals the date of the enclosing block

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use crate::cfml::ast::elements::Message;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Query {
    sender: Option<String>,
    receiver: Option<String>,
    text: Option<String>,
    date: Option<NaiveDate>,
}

impl Query {
    /// A query that matches every message
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    pub fn receiver(mut self, receiver: impl Into<String>) -> Self {
        self.receiver = Some(receiver.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn matches_date(&self, date: NaiveDate) -> bool {
        self.date.map_or(true, |wanted| wanted == date)
    }

    pub fn matches_message(&self, message: &Message) -> bool {
        let sender = self
            .sender
            .as_deref()
            .map_or(true, |wanted| wanted == message.sender());
        let receiver = self
            .receiver
            .as_deref()
            .map_or(true, |wanted| message.receiver() == Some(wanted));
        let text = self
            .text
            .as_deref()
            .map_or(true, |wanted| message.body().contains(wanted));
        sender && receiver && text
    }

    pub fn matches(&self, date: NaiveDate, message: &Message) -> bool {
        self.matches_date(date) && self.matches_message(message)
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut filters = Vec::new();
        if let Some(sender) = &self.sender {
            filters.push(format!("sender={sender}"));
        }
        if let Some(receiver) = &self.receiver {
            filters.push(format!("receiver={receiver}"));
        }
        if let Some(text) = &self.text {
            filters.push(format!("text={text:?}"));
        }
        if let Some(date) = &self.date {
            filters.push(format!("date={date}"));
        }
        if filters.is_empty() {
            write!(f, "any message")
        } else {
            write!(f, "{}", filters.join(", "))
        }
    }
}

/// A query match: the message with the date and position it was found at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Located<'a> {
    pub date: NaiveDate,
    pub position: usize,
    pub message: &'a Message,
}
