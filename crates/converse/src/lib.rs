//! Multi-turn conversations with foundation models.
//!
//! [`Builder`] stages one user turn at a time against a model's declared
//! capabilities and produces a validated [`Request`]. A [`Transport`]
//! carries the request; [`complete`] turns a whole response into the
//! assistant [`Message`], and [`Reassembler`] rebuilds it from stream
//! events. [`Conversation`] drives the round trip and commits the reply
//! to history once it is complete.

pub use {
    builder::{Builder, State},
    ccore::{
        BlockKind, Config, Content, ContentSegment, Error, History, Message, Modality, Model,
        PromptError, Request, Response, Result, Role, StopReason, StreamEvent, Tool, ToolChoice,
        ToolResultContent, Tunable, Tunables, Usage, Violation, lookup,
    },
    conversation::{Conversation, Pending},
    handler::{complete, decode},
    reassembly::{Reassembler, Step},
    transport::Transport,
};

mod builder;
mod conversation;
mod handler;
mod reassembly;
#[cfg(feature = "testing")]
pub mod testing;
mod transport;
