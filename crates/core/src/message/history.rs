//! Append-only conversation history.

use super::{Content, Message, Role, ToolUse};
use crate::{PromptError, Result};
use serde::{Deserialize, Serialize};

/// An ordered, validated log of messages.
///
/// Every append is checked: roles alternate starting with `user`, no
/// message is empty, tool uses only come from the assistant and tool
/// results only from the user. A tool result must follow a message whose
/// last block is a tool use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Message>", into = "Vec<Message>")]
pub struct History {
    messages: Vec<Message>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a history from messages, checking every one.
    pub fn from_messages(messages: impl IntoIterator<Item = Message>) -> Result<Self> {
        let mut history = Self::new();
        for message in messages {
            history.push(message)?;
        }
        Ok(history)
    }

    /// Check whether `message` may be appended next.
    pub fn check(&self, message: &Message) -> Result<()> {
        if message.content.is_empty() {
            return Err(PromptError::EmptyMessage.into());
        }

        let expected = self.next_role();
        if message.role != expected {
            return Err(PromptError::RoleSequence { expected }.into());
        }

        for content in &message.content {
            match (message.role, content) {
                (Role::User, Content::ToolUse(_)) => {
                    return Err(PromptError::MisplacedToolUse.into());
                }
                (Role::Assistant, Content::ToolResult(_)) => {
                    return Err(PromptError::MisplacedToolResult.into());
                }
                (Role::User, Content::ToolResult(_)) if self.pending_tool_use().is_none() => {
                    return Err(PromptError::ToolResultWithoutToolUse.into());
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Append a message after checking it.
    pub fn push(&mut self, message: Message) -> Result<()> {
        self.check(&message)?;
        self.messages.push(message);
        Ok(())
    }

    /// The role the next message must have.
    pub fn next_role(&self) -> Role {
        match self.messages.last().map(|m| m.role) {
            Some(Role::User) => Role::Assistant,
            Some(Role::Assistant) | None => Role::User,
        }
    }

    /// The tool use awaiting a result: the last block of the last message,
    /// when that message came from the assistant.
    pub fn pending_tool_use(&self) -> Option<&ToolUse> {
        self.messages
            .last()
            .filter(|m| m.role == Role::Assistant)
            .and_then(Message::trailing_tool_use)
    }

    /// The messages, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Get the last message, if any.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the history has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterate the messages, oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }
}

impl TryFrom<Vec<Message>> for History {
    type Error = crate::Error;

    fn try_from(messages: Vec<Message>) -> Result<Self> {
        Self::from_messages(messages)
    }
}

impl From<History> for Vec<Message> {
    fn from(history: History) -> Self {
        history.messages
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
