//! Transcript Messages
//!
//! A [`ChatMessage`] is one bubble in the widget's transcript. Messages are
//! created when the user sends or a reply arrives, and never change after
//! they are appended.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::mood::Mood;

/// Content of the message a fresh widget opens with
pub const GREETING: &str = "Hi there! I'm Claim Saathi, your AI assistant. \
How can I help you with your insurance claims today?";

/// Unique message identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    /// Wrap a raw identifier
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the raw identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who sent a message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person typing into the widget
    User,
    /// Claim Saathi
    Bot,
}

/// A single transcript entry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique id
    pub id: MessageId,
    /// Text content
    pub content: String,
    /// Sender tag
    pub sender: Sender,
    /// When the message was created
    pub timestamp: DateTime<Utc>,
    /// Avatar mood (bot messages only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
}

impl ChatMessage {
    /// Create a user message stamped now
    pub fn user(id: MessageId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            sender: Sender::User,
            timestamp: Utc::now(),
            mood: None,
        }
    }

    /// Create a bot message stamped now
    pub fn bot(id: MessageId, content: impl Into<String>, mood: Mood) -> Self {
        Self {
            id,
            content: content.into(),
            sender: Sender::Bot,
            timestamp: Utc::now(),
            mood: Some(mood),
        }
    }

    /// The opening greeting shown before the user says anything
    #[must_use]
    pub fn greeting() -> Self {
        Self::bot(MessageId::new("1"), GREETING, Mood::Happy)
    }

    /// Whether the user sent this message
    #[must_use]
    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }

    /// Mood used to pick the avatar (defaults to happy)
    #[must_use]
    pub fn avatar_mood(&self) -> Mood {
        self.mood.unwrap_or_default()
    }
}

/// Wall-clock based id source
///
/// Ids are epoch milliseconds. The generator never hands out the same id
/// twice: a call within the same millisecond as the previous one gets the
/// previous id plus one.
#[derive(Debug, Default)]
pub struct MessageIdGenerator {
    last: i64,
}

impl MessageIdGenerator {
    /// Create a generator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id based on the current time
    pub fn next_id(&mut self) -> MessageId {
        self.next_at(Utc::now().timestamp_millis())
    }

    /// Next id for a given epoch-millisecond clock reading
    pub fn next_at(&mut self, now_ms: i64) -> MessageId {
        let id = now_ms.max(self.last + 1);
        self.last = id;
        MessageId(id.to_string())
    }
}
