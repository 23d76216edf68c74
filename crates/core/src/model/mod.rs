//! Model capabilities.
//!
//! Every model the core can talk to is described by a static [`Model`]
//! entry: which modalities it supports and the legal range of each
//! tunable. Entries live in a compile-time table, see [`lookup`].

use crate::{Error, Result};
pub use registry::{MODELS, lookup};
use std::{fmt, ops::RangeInclusive};

mod registry;

/// A named capability a model may or may not support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modality {
    /// Plain text input and output.
    Text,
    /// Image and video attachments.
    Vision,
    /// Document attachments.
    Document,
    /// Tool declarations, tool use and tool results.
    ToolUse,
    /// Incremental streaming responses.
    Streaming,
    /// Extended reasoning output.
    Reasoning,
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Vision => "vision",
            Self::Document => "documents",
            Self::ToolUse => "tool use",
            Self::Streaming => "streaming",
            Self::Reasoning => "reasoning",
        })
    }
}

/// A generation-control parameter with a per-model legal range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    /// Maximum tokens to generate.
    MaxTokens,
    /// Sampling temperature.
    Temperature,
    /// Nucleus sampling mass.
    TopP,
    /// Number of stop sequences.
    StopSequences,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MaxTokens => "max_tokens",
            Self::Temperature => "temperature",
            Self::TopP => "top_p",
            Self::StopSequences => "stop_sequences",
        })
    }
}

/// The legal range of a parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Range {
    /// Inclusive integer range.
    Int(RangeInclusive<i64>),
    /// Inclusive floating range.
    Float(RangeInclusive<f64>),
    /// No declared bound.
    Unbounded,
}

/// How a model measures prompt length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptLimit {
    /// At most this many characters.
    Chars(usize),
    /// At most this many tokens, estimated at ~4 characters per token.
    Tokens(usize),
}

impl PromptLimit {
    /// Measure `prompt` in this limit's unit.
    pub fn measure(&self, prompt: &str) -> usize {
        let chars = prompt.chars().count();
        match self {
            Self::Chars(_) => chars,
            Self::Tokens(_) => chars.div_ceil(4),
        }
    }

    /// The maximum, in this limit's unit.
    pub fn max(&self) -> usize {
        match self {
            Self::Chars(max) | Self::Tokens(max) => *max,
        }
    }
}

/// Static facts about one model.
#[derive(Debug)]
pub struct Model {
    /// Registry key, e.g. `nova_lite`.
    pub key: &'static str,
    /// Identifier sent to the inference endpoint.
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Supported modalities.
    pub modalities: &'static [Modality],
    /// Legal `max_tokens`. `None` only enforces positivity.
    pub max_tokens: Option<RangeInclusive<i64>>,
    /// Legal temperature.
    pub temperature: RangeInclusive<f64>,
    /// Legal top-p.
    pub top_p: RangeInclusive<f64>,
    /// Maximum number of stop sequences, zero if unsupported.
    pub stop_sequences: usize,
    /// Prompt length limit, if any.
    pub prompt: Option<PromptLimit>,
}

impl Model {
    /// Whether the model supports `modality`.
    pub fn supports(&self, modality: Modality) -> bool {
        self.modalities.contains(&modality)
    }

    /// Fail with [`Error::UnsupportedModality`] unless `modality` is supported.
    pub fn require(&self, modality: Modality) -> Result<()> {
        if self.supports(modality) {
            Ok(())
        } else {
            Err(Error::UnsupportedModality {
                model: self.key,
                modality,
            })
        }
    }

    /// The declared range of `parameter`.
    pub fn range(&self, parameter: Parameter) -> Range {
        match parameter {
            Parameter::MaxTokens => self
                .max_tokens
                .clone()
                .map(Range::Int)
                .unwrap_or(Range::Unbounded),
            Parameter::Temperature => Range::Float(self.temperature.clone()),
            Parameter::TopP => Range::Float(self.top_p.clone()),
            Parameter::StopSequences => Range::Int(0..=self.stop_sequences as i64),
        }
    }
}
