//! Error kinds surfaced by the conversation core.
//!
//! Every error is terminal to the call that produced it. Validation errors
//! are raised before any transport call is issued.

use crate::model::{Modality, Parameter};
use compact_str::CompactString;

/// Result alias for the conversation core.
pub type Result<T> = std::result::Result<T, Error>;

/// Conversation core error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The model identifier is not in the capability registry.
    #[error("unknown model '{0}'")]
    UnknownModel(CompactString),

    /// The model is known but lacks the capability a feature needs.
    #[error("model '{model}' does not support {modality}")]
    UnsupportedModality {
        /// Registry key of the model.
        model: &'static str,
        /// The missing capability.
        modality: Modality,
    },

    /// A tunable violates the model's declared range.
    #[error("invalid {parameter}: {violation}")]
    InvalidParameter {
        /// The offending tunable.
        parameter: Parameter,
        /// Why it was rejected.
        violation: Violation,
    },

    /// The staged turn is empty, over-length, or illegal for the current
    /// history.
    #[error("invalid prompt: {0}")]
    InvalidPrompt(#[from] PromptError),

    /// The transport returned a payload without the expected structure.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The event stream broke the reassembly protocol.
    #[error("stream protocol violation: {0}")]
    Protocol(String),

    /// A content kind the core does not model.
    #[error("content kind '{0}' is not implemented")]
    NotImplemented(CompactString),

    /// The transport itself failed.
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

impl Error {
    pub(crate) fn parameter(parameter: Parameter, violation: Violation) -> Self {
        Self::InvalidParameter {
            parameter,
            violation,
        }
    }
}

/// Why a tunable was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Violation {
    /// Zero or negative where only positive values make sense.
    #[error("value must be positive, got {0}")]
    NonPositive(i64),

    /// Outside the model's declared range.
    #[error("{value} is outside {min}..={max}")]
    OutOfRange {
        /// The supplied value.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },

    /// The model accepts no values for this tunable.
    #[error("not supported by this model")]
    Unsupported,

    /// More stop sequences than the model allows.
    #[error("{count} stop sequences exceed the limit of {max}")]
    TooMany {
        /// Number supplied.
        count: usize,
        /// Model maximum.
        max: usize,
    },

    /// A stop sequence was the empty string.
    #[error("stop sequence {0} is empty")]
    EmptyStopSequence(usize),
}

/// Why the staged turn was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PromptError {
    /// The prompt text is empty.
    #[error("prompt is empty")]
    Empty,

    /// The prompt is longer than the model accepts.
    #[error("prompt length {len} exceeds the limit of {max}")]
    TooLong {
        /// Measured length, in the model's unit.
        len: usize,
        /// Model maximum.
        max: usize,
    },

    /// Neither a prompt nor a tool result is staged.
    #[error("no prompt or tool result staged")]
    NothingStaged,

    /// An attachment was staged without a prompt to accompany it.
    #[error("attachments require a staged prompt")]
    MissingPrompt,

    /// A prompt was staged while a tool result already occupies the turn.
    #[error("a tool result is already staged for this turn")]
    ToolResultStaged,

    /// A tool result was staged but no tools were declared.
    #[error("tool result without declared tools")]
    NoTools,

    /// A tool result does not follow an assistant tool use.
    #[error("tool result without matching tool use")]
    ToolResultWithoutToolUse,

    /// A tool result names a different tool use than the pending one.
    #[error("tool result id '{got}' does not match tool use '{expected}'")]
    ToolUseIdMismatch {
        /// Id of the pending tool use.
        expected: CompactString,
        /// Id supplied with the result.
        got: CompactString,
    },

    /// Messages must alternate user / assistant, starting with user.
    #[error("expected a {expected} message next")]
    RoleSequence {
        /// The role that must come next.
        expected: crate::Role,
    },

    /// A message carries no content.
    #[error("message content is empty")]
    EmptyMessage,

    /// Tool use content in a user message.
    #[error("tool use is only valid in assistant messages")]
    MisplacedToolUse,

    /// Tool result content in an assistant message.
    #[error("tool result is only valid in user messages")]
    MisplacedToolResult,
}
