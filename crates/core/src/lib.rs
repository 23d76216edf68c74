//! Core types for converse.
//!
//! Provides the pieces shared by every conversation: the static model
//! capability registry, the parameter validator, the `Message`/`Content`
//! model with its history invariants, the outbound `Request`, the neutral
//! `Response` payload and `StreamEvent` representation a transport must
//! produce, and the typed `Error`.

pub use config::Config;
pub use error::{Error, PromptError, Result, Violation};
pub use message::{
    Content, Document, DocumentFormat, History, Image, ImageFormat, Message, Role, ToolResult,
    ToolResultContent, ToolUse, Video, VideoFormat,
};
pub use model::{Modality, Model, Parameter, PromptLimit, Range, lookup};
pub use request::{Request, Tunable, Tunables};
pub use response::{Metrics, Output, Response, ResponseMessage, StopReason, Usage};
pub use stream::{BlockKind, ContentSegment, StreamEvent};
pub use tool::{Tool, ToolChoice};
pub use validate::validate;

mod config;
mod error;
pub mod message;
pub mod model;
mod request;
mod response;
mod stream;
mod tool;
mod validate;
