//! Neutral streaming event representation.
//!
//! Transports translate the vendor event stream into [`StreamEvent`]s:
//! - `message_start`: the assistant message begins
//! - `content_block_start`: open a content block (text or tool_use)
//! - `content_block_delta`: a fragment of an open block
//! - `content_block_stop`: close a content block
//! - `message_stop`: end of message, with the stop reason
//! - `metadata`: usage and metrics

use crate::{Metrics, Role, StopReason, Usage};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// One event of a streaming response.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// The message begins.
    MessageStart {
        /// Author of the message being streamed.
        role: Role,
    },
    /// Open a content block.
    ContentBlockStart {
        /// Block index within the message.
        index: u32,
        /// What the block will contain.
        kind: BlockKind,
    },
    /// A fragment of an open block: text, or partial tool input JSON.
    ContentBlockDelta {
        /// Block index within the message.
        index: u32,
        /// The fragment.
        fragment: String,
    },
    /// Close a content block.
    ContentBlockStop {
        /// Block index within the message.
        index: u32,
    },
    /// End of message.
    MessageStop {
        /// Why generation stopped.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stop_reason: Option<StopReason>,
    },
    /// Usage and metrics.
    Metadata {
        /// Token usage statistics.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        usage: Option<Usage>,
        /// Call metrics.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        metrics: Option<Metrics>,
    },
}

/// The kind of a streamed content block.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
    /// Text, surfaced incrementally.
    Text,
    /// A tool invocation; input arrives as partial JSON.
    ToolUse {
        /// Id of the tool use.
        id: CompactString,
        /// Name of the tool.
        name: CompactString,
    },
    /// Reasoning output.
    Reasoning,
    /// Catch-all for unknown block kinds.
    #[serde(other)]
    Unknown,
}

impl BlockKind {
    /// Short name for logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::ToolUse { .. } => "tool_use",
            Self::Reasoning => "reasoning",
            Self::Unknown => "unknown",
        }
    }
}

/// An incremental text fragment for progressive display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentSegment {
    /// Index of the text block the fragment belongs to.
    pub index: u32,
    /// The fragment.
    pub text: String,
}
