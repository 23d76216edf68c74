//! Conversation messages.

pub use content::{
    Content, Document, DocumentFormat, Image, ImageFormat, ToolResult, ToolResultContent, ToolUse,
    Video, VideoFormat,
};
pub use history::History;
use serde::{Deserialize, Serialize};
use std::fmt;

mod content;
mod history;

/// A message in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message
    pub role: Role,

    /// The content blocks, in order
    pub content: Vec<Content>,
}

impl Message {
    /// Create a message from content blocks
    pub fn new(role: Role, content: Vec<Content>) -> Self {
        Self { role, content }
    }

    /// Create a new user text message
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, vec![Content::text(text)])
    }

    /// Create a new assistant text message
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, vec![Content::text(text)])
    }

    /// Append a content block
    pub fn with(mut self, content: Content) -> Self {
        self.content.push(content);
        self
    }

    /// All text blocks joined, or `None` if the message carries no text.
    pub fn text(&self) -> Option<String> {
        let mut texts = self.content.iter().filter_map(Content::as_text).peekable();
        texts.peek()?;
        Some(texts.collect())
    }

    /// Tool uses in this message, in order
    pub fn tool_uses(&self) -> impl Iterator<Item = &ToolUse> {
        self.content.iter().filter_map(Content::as_tool_use)
    }

    /// The first tool use, if any
    pub fn tool_use(&self) -> Option<&ToolUse> {
        self.tool_uses().next()
    }

    /// The last content block if it is a tool use.
    pub fn trailing_tool_use(&self) -> Option<&ToolUse> {
        self.content.last().and_then(Content::as_tool_use)
    }
}

/// The role of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Role {
    /// The user role
    #[serde(rename = "user")]
    User,
    /// The assistant role
    #[serde(rename = "assistant")]
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        })
    }
}
