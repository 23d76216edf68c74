//! The static model table.
//!
//! Populated at compile time and never mutated, so it is shared across
//! conversations without locking.

use super::{
    Model, PromptLimit,
    Modality::{Document, Reasoning, Streaming, Text, ToolUse, Vision},
};
use crate::{Error, Result};

/// Every model known to the core.
pub static MODELS: &[Model] = &[
    Model {
        key: "nova_micro",
        id: "amazon.nova-micro-v1:0",
        name: "Amazon Nova Micro",
        modalities: &[Text, ToolUse, Streaming],
        max_tokens: Some(1..=10_000),
        temperature: 0.0..=1.0,
        top_p: 0.0..=1.0,
        stop_sequences: 4,
        prompt: Some(PromptLimit::Tokens(128_000)),
    },
    Model {
        key: "nova_lite",
        id: "amazon.nova-lite-v1:0",
        name: "Amazon Nova Lite",
        modalities: &[Text, Vision, Document, ToolUse, Streaming],
        max_tokens: Some(1..=10_000),
        temperature: 0.0..=1.0,
        top_p: 0.0..=1.0,
        stop_sequences: 4,
        prompt: Some(PromptLimit::Tokens(300_000)),
    },
    Model {
        key: "nova_pro",
        id: "amazon.nova-pro-v1:0",
        name: "Amazon Nova Pro",
        modalities: &[Text, Vision, Document, ToolUse, Streaming],
        max_tokens: Some(1..=10_000),
        temperature: 0.0..=1.0,
        top_p: 0.0..=1.0,
        stop_sequences: 4,
        prompt: Some(PromptLimit::Tokens(300_000)),
    },
    Model {
        key: "titan_text_g1_express",
        id: "amazon.titan-text-express-v1",
        name: "Titan Text G1 - Express",
        modalities: &[Text, Document, Streaming],
        max_tokens: Some(1..=8_192),
        temperature: 0.0..=1.0,
        top_p: 0.0..=1.0,
        stop_sequences: 4,
        prompt: Some(PromptLimit::Tokens(8_000)),
    },
    Model {
        key: "titan_text_g1_lite",
        id: "amazon.titan-text-lite-v1",
        name: "Titan Text G1 - Lite",
        modalities: &[Text, Document, Streaming],
        max_tokens: Some(1..=4_096),
        temperature: 0.0..=1.0,
        top_p: 0.0..=1.0,
        stop_sequences: 4,
        prompt: Some(PromptLimit::Tokens(4_000)),
    },
    Model {
        key: "claude_3_haiku",
        id: "anthropic.claude-3-haiku-20240307-v1:0",
        name: "Claude 3 Haiku",
        modalities: &[Text, Vision, Document, ToolUse, Streaming],
        max_tokens: Some(1..=4_096),
        temperature: 0.0..=1.0,
        top_p: 0.0..=1.0,
        stop_sequences: 8_191,
        prompt: Some(PromptLimit::Tokens(200_000)),
    },
    Model {
        key: "claude_3_5_sonnet",
        id: "anthropic.claude-3-5-sonnet-20240620-v1:0",
        name: "Claude 3.5 Sonnet",
        modalities: &[Text, Vision, Document, ToolUse, Streaming],
        max_tokens: Some(1..=8_192),
        temperature: 0.0..=1.0,
        top_p: 0.0..=1.0,
        stop_sequences: 8_191,
        prompt: Some(PromptLimit::Tokens(200_000)),
    },
    Model {
        key: "command_r",
        id: "cohere.command-r-v1:0",
        name: "Cohere Command R",
        modalities: &[Text, Document, ToolUse, Streaming],
        max_tokens: None,
        temperature: 0.0..=1.0,
        top_p: 0.01..=0.99,
        stop_sequences: 4,
        prompt: Some(PromptLimit::Tokens(128_000)),
    },
    Model {
        key: "llama3_8b_instruct",
        id: "meta.llama3-8b-instruct-v1:0",
        name: "Llama 3 8B Instruct",
        modalities: &[Text, Document, Streaming],
        max_tokens: Some(1..=2_048),
        temperature: 0.0..=1.0,
        top_p: 0.0..=1.0,
        stop_sequences: 0,
        prompt: Some(PromptLimit::Chars(32_000)),
    },
    Model {
        key: "mistral_7b_instruct",
        id: "mistral.mistral-7b-instruct-v0:2",
        name: "Mistral 7B Instruct",
        modalities: &[Text, Document, Streaming],
        max_tokens: Some(1..=8_192),
        temperature: 0.0..=1.0,
        top_p: 0.0..=1.0,
        stop_sequences: 10,
        prompt: Some(PromptLimit::Chars(128_000)),
    },
    Model {
        key: "deepseek_r1",
        id: "us.deepseek.r1-v1:0",
        name: "DeepSeek-R1",
        modalities: &[Text, Document, Streaming, Reasoning],
        max_tokens: Some(1..=32_768),
        temperature: 0.0..=1.0,
        top_p: 0.0..=1.0,
        stop_sequences: 10,
        prompt: Some(PromptLimit::Tokens(128_000)),
    },
];

/// Look up a model by registry key or endpoint identifier.
pub fn lookup(model: &str) -> Result<&'static Model> {
    MODELS
        .iter()
        .find(|m| m.key == model || m.id == model)
        .ok_or_else(|| Error::UnknownModel(model.into()))
}
