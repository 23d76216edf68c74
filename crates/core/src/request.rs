//! Outbound request snapshot.

use crate::{History, Model, Tool, ToolChoice};
use serde::{Deserialize, Serialize, Serializer};

/// Generation-control parameters.
///
/// Only the fields that are set are sent and validated.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Tunables {
    /// Maximum tokens to generate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<i64>,

    /// Sampling temperature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Nucleus sampling mass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,

    /// Sequences that halt generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
}

impl Tunables {
    /// Store a tunable, replacing any previous value.
    pub fn set(&mut self, tunable: Tunable) {
        match tunable {
            Tunable::MaxTokens(value) => self.max_tokens = Some(value),
            Tunable::Temperature(value) => self.temperature = Some(value),
            Tunable::TopP(value) => self.top_p = Some(value),
            Tunable::StopSequences(value) => self.stop_sequences = Some(value),
        }
    }
}

/// A single tunable value.
#[derive(Debug, Clone, PartialEq)]
pub enum Tunable {
    /// Maximum tokens to generate.
    MaxTokens(i64),
    /// Sampling temperature.
    Temperature(f64),
    /// Nucleus sampling mass.
    TopP(f64),
    /// Sequences that halt generation.
    StopSequences(Vec<String>),
}

/// An immutable chat request.
///
/// Contains everything a transport needs for one call: the model, the full
/// history ending with the new user message, system prompts, tools and
/// tunables.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    #[serde(serialize_with = "model_id")]
    model: &'static Model,
    messages: History,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    system: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<ToolChoice>,
    #[serde(flatten)]
    tunables: Tunables,
}

impl Request {
    /// Create a new request for the given model and history.
    pub fn new(model: &'static Model, messages: History) -> Self {
        Self {
            model,
            messages,
            system: Vec::new(),
            tools: Vec::new(),
            tool_choice: None,
            tunables: Tunables::default(),
        }
    }

    /// Set the system prompts for this request.
    pub fn with_system(mut self, system: Vec<String>) -> Self {
        self.system = system;
        self
    }

    /// Set the tools for this request.
    pub fn with_tools(mut self, tools: Vec<Tool>) -> Self {
        self.tools = tools;
        self
    }

    /// Set the tool choice for this request.
    pub fn with_tool_choice(mut self, tool_choice: Option<ToolChoice>) -> Self {
        self.tool_choice = tool_choice;
        self
    }

    /// Set the tunables for this request.
    pub fn with_tunables(mut self, tunables: Tunables) -> Self {
        self.tunables = tunables;
        self
    }

    /// The target model.
    pub fn model(&self) -> &'static Model {
        self.model
    }

    /// The history to send, ending with the new user message.
    pub fn messages(&self) -> &History {
        &self.messages
    }

    /// System prompts.
    pub fn system(&self) -> &[String] {
        &self.system
    }

    /// Declared tools.
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    /// Tool choice, if any.
    pub fn tool_choice(&self) -> Option<&ToolChoice> {
        self.tool_choice.as_ref()
    }

    /// Tunables.
    pub fn tunables(&self) -> &Tunables {
        &self.tunables
    }

    /// Take the history out of the request.
    pub fn into_messages(self) -> History {
        self.messages
    }
}

fn model_id<S: Serializer>(model: &&'static Model, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(model.id)
}
