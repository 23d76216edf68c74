//! Neutral response payload for non-streaming calls.
//!
//! Transports decode the vendor reply into this shape. Content blocks are
//! kept as raw JSON here: turning them into [`crate::Content`] is the
//! response handler's job, since an unmodeled block kind is an error there
//! rather than a decode failure here.

use crate::{Message, Role};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A complete response from the inference endpoint.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// The generated output. Missing output is a transport contract
    /// violation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Output>,

    /// Why generation stopped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<StopReason>,

    /// Token usage statistics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,

    /// Call metrics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
}

impl Response {
    /// Wrap an assistant message into a response payload.
    pub fn new(message: &Message) -> serde_json::Result<Self> {
        let content = message
            .content
            .iter()
            .map(serde_json::to_value)
            .collect::<serde_json::Result<Vec<_>>>()?;
        Ok(Self {
            output: Some(Output {
                message: Some(ResponseMessage {
                    role: message.role,
                    content,
                }),
            }),
            ..Default::default()
        })
    }

    /// Set the stop reason.
    pub fn with_stop_reason(mut self, reason: StopReason) -> Self {
        self.stop_reason = Some(reason);
        self
    }

    /// Set the usage statistics.
    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = Some(usage);
        self
    }
}

/// The output field of a response.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Output {
    /// The generated message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<ResponseMessage>,
}

/// A generated message with undecoded content blocks.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResponseMessage {
    /// The role of the author.
    pub role: Role,

    /// Content blocks, one single-key object each.
    #[serde(default)]
    pub content: Vec<Value>,
}

/// The reason the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The model finished its turn
    EndTurn,

    /// The model is waiting for tool results
    ToolUse,

    /// The model hit the max token limit
    MaxTokens,

    /// A stop sequence was generated
    StopSequence,

    /// A guardrail intervened
    GuardrailIntervened,

    /// Content was filtered
    ContentFiltered,

    /// Any reason this crate does not know yet
    #[serde(other)]
    Unknown,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    /// Number of tokens in the prompt
    pub input_tokens: u32,

    /// Number of tokens generated
    pub output_tokens: u32,

    /// Total number of tokens used
    pub total_tokens: u32,
}

/// Call metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// End-to-end latency in milliseconds
    pub latency_ms: u64,
}
