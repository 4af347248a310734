use chrono::{DateTime, Local};

/// Represents who sent a message in the chat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Returns the display prefix for this role.
    pub fn prefix(&self) -> &'static str {
        match self {
            Role::User => "You: ",
            Role::Assistant => "P2P: ",
        }
    }
}

/// A single turn in the conversation transcript.
#[derive(Clone, Debug)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// When the message was appended. Display only.
    pub sent_at: DateTime<Local>,
}

impl Message {
    /// Create a new message with the given role and content.
    pub fn new(role: Role, content: String) -> Self {
        Self {
            role,
            content,
            sent_at: Local::now(),
        }
    }

    /// Create a new user message.
    pub fn user(content: String) -> Self {
        Self::new(Role::User, content)
    }

    /// Create a new assistant message.
    pub fn assistant(content: String) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Short `HH:MM` label for the timestamp column.
    pub fn time_label(&self) -> String {
        self.sent_at.format("%H:%M").to_string()
    }
}
