//! Tests for the wire shape of content, events and responses.

use converse_core::{
    BlockKind, Content, Image, ImageFormat, Message, Response, StopReason, StreamEvent, ToolResult,
    ToolResultContent, ToolUse, Usage,
};
use serde_json::json;

#[test]
fn content_is_keyed_by_kind() {
    let text = serde_json::to_value(Content::text("hi")).unwrap();
    assert_eq!(text, json!({ "text": "hi" }));

    let tool_use = Content::ToolUse(ToolUse {
        id: "toolId".into(),
        name: "toolName".into(),
        input: json!({}),
    });
    assert_eq!(
        serde_json::to_value(&tool_use).unwrap(),
        json!({ "toolUse": { "toolUseId": "toolId", "name": "toolName", "input": {} } })
    );
    assert_eq!(tool_use.kind(), "toolUse");
}

#[test]
fn kinds_match_tags() {
    let samples = [
        Content::text("a"),
        Content::Image(Image {
            format: ImageFormat::Png,
            bytes: vec![1],
        }),
        Content::ToolResult(ToolResult {
            tool_use_id: "t".into(),
            content: ToolResultContent::Json(json!({ "ok": true })),
            is_error: false,
        }),
    ];
    for content in samples {
        let value = serde_json::to_value(&content).unwrap();
        let key = value.as_object().unwrap().keys().next().unwrap().clone();
        assert_eq!(key, content.kind());
        assert!(Content::KINDS.contains(&key.as_str()));
    }
}

#[test]
fn attachment_bytes_are_base64() {
    let image = Content::Image(Image {
        format: ImageFormat::Jpeg,
        bytes: b"png!".to_vec(),
    });
    let value = serde_json::to_value(&image).unwrap();
    assert_eq!(value, json!({ "image": { "format": "jpeg", "bytes": "cG5nIQ==" } }));
    assert_eq!(serde_json::from_value::<Content>(value).unwrap(), image);
}

#[test]
fn tool_result_defaults_to_success() {
    let value = json!({ "toolResult": { "toolUseId": "t1", "content": { "text": "42" } } });
    let content: Content = serde_json::from_value(value).unwrap();
    let result = content.as_tool_result().unwrap();
    assert_eq!(result.tool_use_id, "t1");
    assert_eq!(result.content, ToolResultContent::Text("42".into()));
    assert!(!result.is_error);
}

#[test]
fn response_carries_message_blocks() {
    let response = Response::new(&Message::assistant("hello"))
        .unwrap()
        .with_stop_reason(StopReason::EndTurn)
        .with_usage(Usage {
            input_tokens: 3,
            output_tokens: 1,
            total_tokens: 4,
        });
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(
        value["output"]["message"],
        json!({ "role": "assistant", "content": [{ "text": "hello" }] })
    );
    assert_eq!(value["stopReason"], "end_turn");
    assert_eq!(value["usage"]["totalTokens"], 4);
}

#[test]
fn unknown_stop_reason() {
    let reason: StopReason = serde_json::from_value(json!("something_new")).unwrap();
    assert_eq!(reason, StopReason::Unknown);
}

#[test]
fn stream_event_shape() {
    let event: StreamEvent = serde_json::from_value(json!({
        "type": "content_block_start",
        "index": 1,
        "kind": { "type": "tool_use", "id": "t1", "name": "lookup" }
    }))
    .unwrap();
    assert_eq!(
        event,
        StreamEvent::ContentBlockStart {
            index: 1,
            kind: BlockKind::ToolUse {
                id: "t1".into(),
                name: "lookup".into()
            }
        }
    );

    let stop: StreamEvent = serde_json::from_value(json!({ "type": "message_stop" })).unwrap();
    assert_eq!(stop, StreamEvent::MessageStop { stop_reason: None });
}

#[test]
fn unknown_block_kind() {
    let kind: BlockKind = serde_json::from_value(json!({ "type": "citation" })).unwrap();
    assert_eq!(kind, BlockKind::Unknown);
}
