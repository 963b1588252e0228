use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::scoring::{Message, Sender, Transcript};

/// Identifier wrapper for stored conversations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConversationId(pub String);

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Message as submitted by a client, before positions are assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageInput {
    pub sender: Sender,
    #[serde(default)]
    pub text: String,
}

/// Payload creating a conversation together with its messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewConversation {
    #[serde(default = "untitled")]
    pub title: String,
    #[serde(default)]
    pub messages: Vec<MessageInput>,
}

pub(crate) fn untitled() -> String {
    "Untitled".to_string()
}

/// Stored conversation with its ordered messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub title: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub is_analyzed: bool,
}

impl Conversation {
    pub(crate) fn from_new(
        id: ConversationId,
        new: NewConversation,
        created_at: DateTime<Utc>,
    ) -> Self {
        let messages = new
            .messages
            .into_iter()
            .enumerate()
            .map(|(position, input)| Message::new(input.sender, input.text, position as u32))
            .collect();

        Self {
            id,
            title: new.title,
            messages,
            created_at,
            is_analyzed: false,
        }
    }

    pub fn transcript(&self) -> Transcript {
        Transcript::new(self.messages.clone())
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}
