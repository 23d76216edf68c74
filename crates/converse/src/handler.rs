//! Non-streaming response handling.

use ccore::{Content, Error, Message, Response, Result, Role};
use serde_json::Value;

/// Turn a complete response payload into the assistant message.
///
/// A payload without `output.message` is a transport contract violation
/// and fails with [`Error::InvalidResponse`].
pub fn complete(response: &Response) -> Result<Message> {
    let Some(output) = &response.output else {
        return Err(Error::InvalidResponse("missing output".into()));
    };
    let Some(message) = &output.message else {
        return Err(Error::InvalidResponse("missing output message".into()));
    };

    if message.role != Role::Assistant {
        return Err(Error::InvalidResponse(format!(
            "expected an assistant message, got {}",
            message.role
        )));
    }
    if message.content.is_empty() {
        return Err(Error::InvalidResponse("output message has no content".into()));
    }

    let content = message
        .content
        .iter()
        .map(decode)
        .collect::<Result<Vec<_>>>()?;
    Ok(Message::new(Role::Assistant, content))
}

/// Decode one raw content block.
///
/// Blocks are single-key objects keyed by kind. Kinds outside
/// [`Content::KINDS`] fail with [`Error::NotImplemented`].
pub fn decode(block: &Value) -> Result<Content> {
    let kind = block
        .as_object()
        .filter(|object| object.len() == 1)
        .and_then(|object| object.keys().next())
        .ok_or_else(|| {
            Error::InvalidResponse(format!("content block is not a single-key object: {block}"))
        })?;

    if !Content::KINDS.contains(&kind.as_str()) {
        return Err(Error::NotImplemented(kind.as_str().into()));
    }

    serde_json::from_value(block.clone())
        .map_err(|e| Error::InvalidResponse(format!("malformed {kind} block: {e}")))
}
