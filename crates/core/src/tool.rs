//! Tool declarations

use compact_str::CompactString;
use schemars::Schema;
use serde::{Deserialize, Serialize};

/// A tool the model may call
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    /// The name of the tool
    pub name: CompactString,

    /// The description of the tool
    pub description: String,

    /// JSON schema of the tool input
    pub input_schema: Schema,
}

impl Tool {
    /// Create a new tool declaration
    pub fn new(
        name: impl Into<CompactString>,
        description: impl Into<String>,
        input_schema: Schema,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// Controls which tool is called by the model
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolChoice {
    /// Model can pick between generating text or calling tools
    #[default]
    Auto,

    /// Model must call at least one tool
    Any,

    /// Model must call the named tool
    Tool(CompactString),
}

impl From<&str> for ToolChoice {
    fn from(value: &str) -> Self {
        ToolChoice::Tool(value.into())
    }
}
