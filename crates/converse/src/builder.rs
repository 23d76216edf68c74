//! Conversation builder.
//!
//! Accumulates the next user turn plus the state that persists across
//! turns (history, tools, system prompts, tunables). `build` validates the
//! staged turn and produces an immutable [`Request`]; `record` commits the
//! assistant reply once it has been fully received.

use ccore::{
    Config, Content, Document, DocumentFormat, History, Image, ImageFormat, Message, Modality,
    Model, PromptError, Request, Result, Role, Tool, ToolChoice, ToolResult, ToolResultContent,
    Tunable, Tunables, Video, VideoFormat, lookup, validate,
};

/// Whether a turn is waiting to be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Nothing staged.
    Idle,
    /// A prompt or tool result is staged.
    Staged,
}

/// The pending user turn. Single-use: cleared whenever a request is built.
#[derive(Debug, Clone, Default)]
struct Staged {
    prompt: Option<String>,
    image: Option<Image>,
    document: Option<Document>,
    video: Option<Video>,
    tool_result: Option<ToolResult>,
}

impl Staged {
    /// Take the staged turn, leaving the slot empty.
    fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    fn is_empty(&self) -> bool {
        self.prompt.is_none() && self.tool_result.is_none()
    }

    /// Drop the prompt and its attachments.
    fn clear_prompt(&mut self) {
        self.prompt = None;
        self.image = None;
        self.document = None;
        self.video = None;
    }

    /// The user message this turn produces.
    fn message(&self) -> Message {
        let content = match &self.tool_result {
            Some(result) => vec![Content::ToolResult(result.clone())],
            None => self
                .prompt
                .iter()
                .map(|prompt| Content::text(prompt.as_str()))
                .chain(self.image.clone().map(Content::Image))
                .chain(self.document.clone().map(Content::Document))
                .chain(self.video.clone().map(Content::Video))
                .collect(),
        };
        Message::new(Role::User, content)
    }
}

/// Builds requests for one conversation, one turn at a time.
#[derive(Debug, Clone)]
pub struct Builder {
    model: &'static Model,
    history: History,
    system: Vec<String>,
    tools: Vec<Tool>,
    tool_choice: Option<ToolChoice>,
    tunables: Tunables,
    staged: Staged,
}

impl Builder {
    /// Create a builder for a model by registry key or endpoint id.
    pub fn new(model: &str) -> Result<Self> {
        lookup(model).map(Self::for_model)
    }

    /// Create a builder for a registry entry.
    pub fn for_model(model: &'static Model) -> Self {
        Self {
            model,
            history: History::new(),
            system: Vec::new(),
            tools: Vec::new(),
            tool_choice: None,
            tunables: Tunables::default(),
            staged: Staged::default(),
        }
    }

    /// Create a builder seeded with a configuration's model, system prompts
    /// and tunables.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = Self::for_model(config.model()?);
        builder.system = config.system.clone();
        builder.tunables = config.tunables.clone();
        Ok(builder)
    }

    /// Continue from an existing history.
    pub fn with_history(mut self, history: History) -> Self {
        self.history = history;
        self
    }

    /// Stage the prompt for the next turn.
    pub fn prompt(&mut self, text: impl Into<String>) -> Result<&mut Self> {
        if self.staged.tool_result.is_some() {
            return Err(PromptError::ToolResultStaged.into());
        }
        self.staged.prompt = Some(text.into());
        Ok(self)
    }

    /// Attach an image to the staged prompt.
    pub fn image(&mut self, format: ImageFormat, bytes: impl Into<Vec<u8>>) -> Result<&mut Self> {
        self.attach(Modality::Vision)?;
        self.staged.image = Some(Image {
            format,
            bytes: bytes.into(),
        });
        Ok(self)
    }

    /// Attach a document to the staged prompt.
    pub fn document(
        &mut self,
        name: &str,
        format: DocumentFormat,
        bytes: impl Into<Vec<u8>>,
    ) -> Result<&mut Self> {
        self.attach(Modality::Document)?;
        self.staged.document = Some(Document {
            name: name.into(),
            format,
            bytes: bytes.into(),
        });
        Ok(self)
    }

    /// Attach a video to the staged prompt.
    pub fn video(&mut self, format: VideoFormat, bytes: impl Into<Vec<u8>>) -> Result<&mut Self> {
        self.attach(Modality::Vision)?;
        self.staged.video = Some(Video {
            format,
            bytes: bytes.into(),
        });
        Ok(self)
    }

    fn attach(&self, modality: Modality) -> Result<()> {
        self.model.require(modality)?;
        if self.staged.prompt.is_none() {
            return Err(PromptError::MissingPrompt.into());
        }
        Ok(())
    }

    /// Declare a tool.
    pub fn tool(&mut self, tool: Tool) -> Result<&mut Self> {
        self.model.require(Modality::ToolUse)?;
        self.tools.push(tool);
        Ok(self)
    }

    /// Control which tool the model calls.
    pub fn tool_choice(&mut self, choice: ToolChoice) -> Result<&mut Self> {
        self.model.require(Modality::ToolUse)?;
        self.tool_choice = Some(choice);
        Ok(self)
    }

    /// Add a system prompt.
    pub fn system(&mut self, text: impl Into<String>) -> &mut Self {
        self.system.push(text.into());
        self
    }

    /// Stage a successful tool result for the pending tool use.
    ///
    /// `id` defaults to the pending tool use's id; if given it must match.
    pub fn tool_result(
        &mut self,
        content: impl Into<ToolResultContent>,
        id: Option<&str>,
    ) -> Result<&mut Self> {
        self.stage_tool_result(content.into(), id, false)
    }

    /// Stage a failed tool result for the pending tool use.
    pub fn tool_error(
        &mut self,
        content: impl Into<ToolResultContent>,
        id: Option<&str>,
    ) -> Result<&mut Self> {
        self.stage_tool_result(content.into(), id, true)
    }

    fn stage_tool_result(
        &mut self,
        content: ToolResultContent,
        id: Option<&str>,
        is_error: bool,
    ) -> Result<&mut Self> {
        self.model.require(Modality::ToolUse)?;
        if self.tools.is_empty() {
            return Err(PromptError::NoTools.into());
        }

        let Some(pending) = self.history.pending_tool_use() else {
            return Err(PromptError::ToolResultWithoutToolUse.into());
        };
        if let Some(id) = id
            && pending.id != id
        {
            return Err(PromptError::ToolUseIdMismatch {
                expected: pending.id.clone(),
                got: id.into(),
            }
            .into());
        }

        let tool_use_id = pending.id.clone();
        self.staged.clear_prompt();
        self.staged.tool_result = Some(ToolResult {
            tool_use_id,
            content,
            is_error,
        });
        Ok(self)
    }

    /// Store a tunable verbatim. It is validated when the request is built.
    pub fn tunable(&mut self, tunable: Tunable) -> &mut Self {
        self.tunables.set(tunable);
        self
    }

    /// Set the maximum tokens to generate.
    pub fn max_tokens(&mut self, value: i64) -> &mut Self {
        self.tunable(Tunable::MaxTokens(value))
    }

    /// Set the sampling temperature.
    pub fn temperature(&mut self, value: f64) -> &mut Self {
        self.tunable(Tunable::Temperature(value))
    }

    /// Set the nucleus sampling mass.
    pub fn top_p(&mut self, value: f64) -> &mut Self {
        self.tunable(Tunable::TopP(value))
    }

    /// Set the stop sequences.
    pub fn stop_sequences(&mut self, sequences: Vec<String>) -> &mut Self {
        self.tunable(Tunable::StopSequences(sequences))
    }

    /// Validate the staged turn and build the request.
    ///
    /// On success the staged turn is cleared; history, tools, system prompts
    /// and tunables are kept. On failure nothing changes.
    pub fn build(&mut self) -> Result<Request> {
        if self.staged.is_empty() {
            return Err(PromptError::NothingStaged.into());
        }
        if self.staged.tool_result.is_some() {
            self.model.require(Modality::ToolUse)?;
        }
        validate(self.model, &self.tunables, self.staged.prompt.as_deref())?;

        let mut messages = self.history.clone();
        messages.push(self.staged.message())?;
        self.staged.take();

        tracing::debug!(
            model = self.model.key,
            messages = messages.len(),
            tools = self.tools.len(),
            "built request"
        );
        Ok(Request::new(self.model, messages)
            .with_system(self.system.clone())
            .with_tools(self.tools.clone())
            .with_tool_choice(self.tool_choice.clone())
            .with_tunables(self.tunables.clone()))
    }

    /// Commit a completed turn: the request's history plus the reply become
    /// the new history.
    pub fn record(&mut self, request: Request, reply: Message) -> Result<&History> {
        let mut history = request.into_messages();
        history.push(reply)?;
        tracing::debug!(messages = history.len(), "recorded reply");
        self.history = history;
        Ok(&self.history)
    }

    /// Whether a turn is staged.
    pub fn state(&self) -> State {
        if self.staged.is_empty() {
            State::Idle
        } else {
            State::Staged
        }
    }

    /// The selected model.
    pub fn model(&self) -> &'static Model {
        self.model
    }

    /// The committed history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Declared tools.
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    /// Stored tunables.
    pub fn tunables(&self) -> &Tunables {
        &self.tunables
    }
}
