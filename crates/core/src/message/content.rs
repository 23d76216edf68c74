//! Message content blocks.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One typed unit of message content.
///
/// Serialized externally tagged, e.g. `{"text": "hi"}` or
/// `{"toolUse": {"toolUseId": "..", "name": "..", "input": {}}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Content {
    /// Plain text.
    Text(String),
    /// An image attachment.
    Image(Image),
    /// A document attachment.
    Document(Document),
    /// A video attachment.
    Video(Video),
    /// A tool invocation requested by the model.
    ToolUse(ToolUse),
    /// The caller's answer to a tool invocation.
    ToolResult(ToolResult),
}

impl Content {
    /// The serialized tag of every variant, in declaration order.
    pub const KINDS: [&'static str; 6] = [
        "text",
        "image",
        "document",
        "video",
        "toolUse",
        "toolResult",
    ];

    /// Create a text block.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// The serialized tag of this block.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Image(_) => "image",
            Self::Document(_) => "document",
            Self::Video(_) => "video",
            Self::ToolUse(_) => "toolUse",
            Self::ToolResult(_) => "toolResult",
        }
    }

    /// The text, if this is a text block.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The tool use, if this is a tool use block.
    pub fn as_tool_use(&self) -> Option<&ToolUse> {
        match self {
            Self::ToolUse(tool_use) => Some(tool_use),
            _ => None,
        }
    }

    /// The tool result, if this is a tool result block.
    pub fn as_tool_result(&self) -> Option<&ToolResult> {
        match self {
            Self::ToolResult(result) => Some(result),
            _ => None,
        }
    }
}

/// Image encodings accepted by vision models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
}

/// Document encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Csv,
    Doc,
    Docx,
    Xls,
    Xlsx,
    Html,
    Txt,
    Md,
}

/// Video containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoFormat {
    Mkv,
    Mov,
    Mp4,
    Webm,
    Flv,
    Mpeg,
    Mpg,
    Wmv,
    #[serde(rename = "three_gp")]
    ThreeGp,
}

/// An image attachment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Encoding of `bytes`.
    pub format: ImageFormat,
    /// Raw image bytes, base64 on the wire.
    #[serde(with = "base64_bytes")]
    pub bytes: Vec<u8>,
}

/// A document attachment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Name shown to the model.
    pub name: CompactString,
    /// Encoding of `bytes`.
    pub format: DocumentFormat,
    /// Raw document bytes, base64 on the wire.
    #[serde(with = "base64_bytes")]
    pub bytes: Vec<u8>,
}

/// A video attachment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    /// Container of `bytes`.
    pub format: VideoFormat,
    /// Raw video bytes, base64 on the wire.
    #[serde(with = "base64_bytes")]
    pub bytes: Vec<u8>,
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolUse {
    /// Id the matching tool result must carry.
    #[serde(rename = "toolUseId")]
    pub id: CompactString,
    /// Name of the declared tool.
    pub name: CompactString,
    /// Structured input, as produced by the model.
    pub input: Value,
}

/// The caller's answer to a tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    /// Id of the tool use being answered.
    pub tool_use_id: CompactString,
    /// The result payload.
    pub content: ToolResultContent,
    /// Whether the tool failed.
    #[serde(default)]
    pub is_error: bool,
}

/// Payload of a tool result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolResultContent {
    /// Free-form text.
    Text(String),
    /// Structured JSON.
    Json(Value),
}

impl From<&str> for ToolResultContent {
    fn from(text: &str) -> Self {
        Self::Text(text.into())
    }
}

impl From<String> for ToolResultContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for ToolResultContent {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

mod base64_bytes {
    use base64::{Engine, engine::general_purpose::STANDARD};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(D::Error::custom)
    }
}
