use serde::{Deserialize, Serialize};
use std::fmt;

/// Author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

impl Sender {
    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Ai => "ai",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Single turn of a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    pub sequence_position: u32,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>, sequence_position: u32) -> Self {
        Self {
            sender,
            text: text.into(),
            sequence_position,
        }
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }

    pub fn is_ai(&self) -> bool {
        self.sender == Sender::Ai
    }
}

/// Ordered turns of one conversation. Owns its messages outright.
///
/// Serialized as a plain message list; deserializing re-sorts by position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Message>", into = "Vec<Message>")]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Builds a transcript, ordering messages by `sequence_position`.
    ///
    /// The sort is stable so turns sharing a position keep their input order.
    pub fn new(mut messages: Vec<Message>) -> Self {
        messages.sort_by_key(|message| message.sequence_position);
        Self { messages }
    }

    /// Builds a transcript from turns already in conversation order.
    pub fn from_turns<I, T>(turns: I) -> Self
    where
        I: IntoIterator<Item = (Sender, T)>,
        T: Into<String>,
    {
        let messages = turns
            .into_iter()
            .enumerate()
            .map(|(index, (sender, text))| Message::new(sender, text, index as u32))
            .collect();
        Self { messages }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn user_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|message| message.is_user())
    }
}

impl From<Vec<Message>> for Transcript {
    fn from(messages: Vec<Message>) -> Self {
        Self::new(messages)
    }
}

impl From<Transcript> for Vec<Message> {
    fn from(transcript: Transcript) -> Self {
        transcript.messages
    }
}
