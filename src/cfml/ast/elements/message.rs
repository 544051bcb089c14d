//! Message element definition

use serde::Serialize;
use std::fmt;

use crate::cfml::error::ValidationError;

/// A single message record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Message {
    sender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    receiver: Option<String>,
    body: String,
}

impl Message {
    /// Build a message. The sender must be non-empty, and so must the receiver
    /// when present. The body may be empty.
    pub fn new(
        sender: impl Into<String>,
        receiver: Option<&str>,
        body: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let sender = sender.into();
        if sender.is_empty() {
            return Err(ValidationError::EmptySender);
        }
        if receiver.is_some_and(str::is_empty) {
            return Err(ValidationError::EmptyReceiver);
        }
        Ok(Self {
            sender,
            receiver: receiver.map(str::to_string),
            body: body.into(),
        })
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn receiver(&self) -> Option<&str> {
        self.receiver.as_deref()
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.receiver {
            Some(receiver) => write!(f, "Message({} -> {}, {:?})", self.sender, receiver, self.body),
            None => write!(f, "Message({}, {:?})", self.sender, self.body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let message = Message::new("Alice", Some("Bob"), "hi").unwrap();
        assert_eq!(message.sender(), "Alice");
        assert_eq!(message.receiver(), Some("Bob"));
        assert_eq!(message.body(), "hi");

        let note = Message::new("Alice", None, "").unwrap();
        assert_eq!(note.receiver(), None);
        assert_eq!(note.body(), "");
    }

    #[test]
    fn test_message_validation() {
        assert_eq!(
            Message::new("", None, "x"),
            Err(ValidationError::EmptySender)
        );
        assert_eq!(
            Message::new("a", Some(""), "x"),
            Err(ValidationError::EmptyReceiver)
        );
    }

    #[test]
    fn test_message_display() {
        let message = Message::new("Alice", Some("Bob"), "hi").unwrap();
        assert_eq!(message.to_string(), "Message(Alice -> Bob, \"hi\")");
    }
}
