//! Streaming reassembly.
//!
//! [`Reassembler`] is a synchronous state machine fed one [`StreamEvent`]
//! at a time. Text deltas come back as [`ContentSegment`]s for progressive
//! display; tool input is accumulated silently and parsed when its block
//! stops. `message_stop` yields the finished assistant [`Message`], with
//! blocks in ascending index order. Text blocks that never received text
//! are dropped. Metadata may still arrive after `message_stop`.

use ccore::{
    BlockKind, Content, ContentSegment, Error, Message, Metrics, Result, Role, StopReason,
    StreamEvent, ToolUse, Usage,
};
use compact_str::CompactString;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// What a single event produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// A text fragment to display.
    Segment(ContentSegment),
    /// Nothing to surface yet.
    Continue,
    /// The message is complete.
    Complete(Message),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Streaming,
    Complete,
    Failed,
}

/// An open content block.
#[derive(Debug)]
enum Block {
    Text(String),
    ToolUse {
        id: CompactString,
        name: CompactString,
        input: String,
    },
}

impl Block {
    fn open(index: u32, kind: BlockKind) -> Result<Self> {
        match kind {
            BlockKind::Text => Ok(Self::Text(String::new())),
            BlockKind::ToolUse { id, name } => Ok(Self::ToolUse {
                id,
                name,
                input: String::new(),
            }),
            kind @ (BlockKind::Reasoning | BlockKind::Unknown) => {
                tracing::warn!("content block {index} has unsupported kind {}", kind.name());
                Err(Error::NotImplemented(kind.name().into()))
            }
        }
    }

    /// Finalize into content. Tool input must be valid JSON; an empty input
    /// is an empty object. An empty text block yields nothing.
    fn finish(self) -> Result<Option<Content>> {
        match self {
            Self::Text(text) if text.is_empty() => Ok(None),
            Self::Text(text) => Ok(Some(Content::Text(text))),
            Self::ToolUse { id, name, input } => {
                let input = if input.trim().is_empty() {
                    Value::Object(Default::default())
                } else {
                    serde_json::from_str(&input).map_err(|e| {
                        Error::Protocol(format!("malformed input for tool use '{id}': {e}"))
                    })?
                };
                Ok(Some(Content::ToolUse(ToolUse { id, name, input })))
            }
        }
    }
}

/// Reassembles streamed content blocks into one assistant message.
///
/// Not restartable: once the message completes or any event fails, every
/// further event is a protocol error, except metadata following
/// `message_stop`. Blocks finalized before a failure stay inspectable
/// through [`Reassembler::completed`].
#[derive(Debug)]
pub struct Reassembler {
    open: BTreeMap<u32, Block>,
    closed: BTreeSet<u32>,
    done: BTreeMap<u32, Content>,
    phase: Phase,
    stop_reason: Option<StopReason>,
    usage: Option<Usage>,
    metrics: Option<Metrics>,
}

impl Default for Reassembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Reassembler {
    /// Create an engine waiting for the first event.
    pub fn new() -> Self {
        Self {
            open: BTreeMap::new(),
            closed: BTreeSet::new(),
            done: BTreeMap::new(),
            phase: Phase::Streaming,
            stop_reason: None,
            usage: None,
            metrics: None,
        }
    }

    /// Feed the next event.
    pub fn accept(&mut self, event: StreamEvent) -> Result<Step> {
        match self.phase {
            Phase::Streaming => {}
            Phase::Complete => {
                return match event {
                    StreamEvent::Metadata { usage, metrics } => {
                        self.record(usage, metrics);
                        Ok(Step::Continue)
                    }
                    _ => Err(Error::Protocol("event after message_stop".into())),
                };
            }
            Phase::Failed => {
                return Err(Error::Protocol("event after stream failure".into()));
            }
        }

        let step = self.apply(event);
        match &step {
            Ok(Step::Complete(_)) => self.phase = Phase::Complete,
            Err(_) => self.phase = Phase::Failed,
            Ok(_) => {}
        }
        step
    }

    fn apply(&mut self, event: StreamEvent) -> Result<Step> {
        match event {
            StreamEvent::MessageStart { role } => {
                if role != Role::Assistant {
                    return Err(Error::Protocol(format!("message_start with role {role}")));
                }
                if !self.open.is_empty() || !self.closed.is_empty() {
                    return Err(Error::Protocol("message_start after content".into()));
                }
                Ok(Step::Continue)
            }
            StreamEvent::ContentBlockStart { index, kind } => {
                if self.open.contains_key(&index) || self.closed.contains(&index) {
                    return Err(Error::Protocol(format!(
                        "content block {index} started twice"
                    )));
                }
                self.open.insert(index, Block::open(index, kind)?);
                Ok(Step::Continue)
            }
            StreamEvent::ContentBlockDelta { index, fragment } => {
                let Some(block) = self.open.get_mut(&index) else {
                    return Err(Error::Protocol(format!(
                        "delta for content block {index} that is not open"
                    )));
                };
                match block {
                    Block::Text(text) => {
                        if fragment.is_empty() {
                            return Ok(Step::Continue);
                        }
                        text.push_str(&fragment);
                        Ok(Step::Segment(ContentSegment {
                            index,
                            text: fragment,
                        }))
                    }
                    Block::ToolUse { input, .. } => {
                        input.push_str(&fragment);
                        Ok(Step::Continue)
                    }
                }
            }
            StreamEvent::ContentBlockStop { index } => {
                let Some(block) = self.open.remove(&index) else {
                    return Err(Error::Protocol(format!(
                        "stop for content block {index} that is not open"
                    )));
                };
                self.closed.insert(index);
                if let Some(content) = block.finish()? {
                    self.done.insert(index, content);
                }
                Ok(Step::Continue)
            }
            StreamEvent::MessageStop { stop_reason } => {
                if !self.open.is_empty() {
                    let open = self.open.keys().collect::<Vec<_>>();
                    return Err(Error::Protocol(format!(
                        "message_stop with open content blocks {open:?}"
                    )));
                }
                if self.done.is_empty() {
                    return Err(Error::Protocol("message_stop without content".into()));
                }
                self.stop_reason = stop_reason;
                let content = self.done.values().cloned().collect();
                Ok(Step::Complete(Message::new(Role::Assistant, content)))
            }
            StreamEvent::Metadata { usage, metrics } => {
                self.record(usage, metrics);
                Ok(Step::Continue)
            }
        }
    }

    fn record(&mut self, usage: Option<Usage>, metrics: Option<Metrics>) {
        self.usage = usage.or(self.usage);
        self.metrics = metrics.or(self.metrics);
    }

    /// Finalized blocks, in index order.
    pub fn completed(&self) -> impl Iterator<Item = (u32, &Content)> {
        self.done.iter().map(|(index, content)| (*index, content))
    }

    /// Whether the engine has completed or failed.
    pub fn is_terminated(&self) -> bool {
        self.phase != Phase::Streaming
    }

    /// The stop reason from `message_stop`.
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    /// Usage reported by metadata events.
    pub fn usage(&self) -> Option<Usage> {
        self.usage
    }

    /// Metrics reported by metadata events.
    pub fn metrics(&self) -> Option<Metrics> {
        self.metrics
    }
}
