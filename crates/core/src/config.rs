//! Conversation defaults loaded from TOML.
//!
//! ```toml
//! model = "nova_lite"
//! system = ["You are a helpful assistant."]
//!
//! [tunables]
//! max_tokens = 512
//! temperature = 0.5
//! ```

use crate::{Model, Result, Tunables, lookup};
use anyhow::Context;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Defaults for a conversation: model, system prompts and tunables.
///
/// Endpoint credentials are not part of this; they belong to the transport.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Registry key or endpoint identifier of the model.
    pub model: CompactString,

    /// System prompts sent with every request.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub system: Vec<String>,

    /// Default tunables, validated when a request is built.
    #[serde(default)]
    pub tunables: Tunables,
}

impl Config {
    /// Create a configuration for `model` with no defaults.
    pub fn new(model: impl Into<CompactString>) -> Self {
        Self {
            model: model.into(),
            system: Vec::new(),
            tunables: Tunables::default(),
        }
    }

    /// Parse a configuration from TOML.
    pub fn from_toml(source: &str) -> anyhow::Result<Self> {
        toml::from_str(source).context("failed to parse conversation config")
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = Self::from_toml(&source)?;
        tracing::debug!("loaded conversation config from {}", path.display());
        Ok(config)
    }

    /// Resolve the configured model in the registry.
    pub fn model(&self) -> Result<&'static Model> {
        lookup(&self.model)
    }
}
