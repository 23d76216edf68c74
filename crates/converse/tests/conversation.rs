//! Tests for driving turns over a transport.

use ccore::{ContentSegment, ToolUse};
use converse::{
    BlockKind, Builder, Content, Conversation, Error, Message, Role, StopReason, StreamEvent,
    Tool, Usage, testing::Scripted,
};
use futures_util::StreamExt;
use serde_json::json;

fn tool() -> Tool {
    Tool::new(
        "toolName",
        "Looks something up",
        schemars::schema_for!(String),
    )
}

fn conversation(model: &str, transport: Scripted) -> Conversation<Scripted> {
    Conversation::new(Builder::new(model).unwrap(), transport)
}

fn text_events(fragments: &[&str]) -> Vec<StreamEvent> {
    let mut events = vec![
        StreamEvent::MessageStart {
            role: Role::Assistant,
        },
        StreamEvent::ContentBlockStart {
            index: 0,
            kind: BlockKind::Text,
        },
    ];
    events.extend(fragments.iter().map(|fragment| StreamEvent::ContentBlockDelta {
        index: 0,
        fragment: fragment.to_string(),
    }));
    events.push(StreamEvent::ContentBlockStop { index: 0 });
    events.push(StreamEvent::MessageStop {
        stop_reason: Some(StopReason::EndTurn),
    });
    events
}

#[tokio::test]
async fn converse_text() {
    let transport = Scripted::new().reply(&Message::assistant("Paris."));
    let mut conversation = conversation("nova_micro", transport.clone());
    conversation
        .builder_mut()
        .prompt("Capital of France?")
        .unwrap();

    let reply = conversation.converse().await.unwrap();
    assert_eq!(reply.text().as_deref(), Some("Paris."));
    assert_eq!(conversation.history().len(), 2);

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].messages().len(), 1);
}

#[tokio::test]
async fn converse_tool_use_round_trip() {
    let tool_use = Message::new(
        Role::Assistant,
        vec![Content::ToolUse(ToolUse {
            id: "toolId".into(),
            name: "toolName".into(),
            input: json!({}),
        })],
    );
    let transport = Scripted::new()
        .reply(&tool_use)
        .reply(&Message::assistant("It is sunny."));
    let mut conversation = conversation("nova_lite", transport.clone());
    let builder = conversation.builder_mut();
    builder.tool(tool()).unwrap();
    builder.prompt("Weather?").unwrap();

    let reply = conversation.converse().await.unwrap();
    assert_eq!(reply.text(), None);
    let call = reply.tool_use().unwrap();
    assert_eq!(call.id, "toolId");
    assert_eq!(call.name, "toolName");
    assert_eq!(call.input, json!({}));
    assert_eq!(conversation.history().len(), 2);

    conversation
        .builder_mut()
        .tool_result("sunny", Some("toolId"))
        .unwrap();
    let reply = conversation.converse().await.unwrap();
    assert_eq!(reply.text().as_deref(), Some("It is sunny."));
    assert_eq!(conversation.history().len(), 4);

    let requests = transport.requests();
    assert_eq!(requests[1].tools().len(), 1);
    let answer = requests[1].messages().last().unwrap();
    assert_eq!(answer.content[0].as_tool_result().unwrap().tool_use_id, "toolId");
}

#[tokio::test]
async fn transport_failure_keeps_history() {
    let transport = Scripted::new().fail("connection reset");
    let mut conversation = conversation("nova_micro", transport);
    conversation.builder_mut().prompt("Hi").unwrap();

    let err = conversation.converse().await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
    assert_eq!(err.to_string(), "connection reset");
    assert!(conversation.history().is_empty());
}

#[tokio::test]
async fn invalid_response_keeps_history() {
    let transport = Scripted::new().respond(Default::default());
    let mut conversation = conversation("nova_micro", transport);
    conversation.builder_mut().prompt("Hi").unwrap();

    let err = conversation.converse().await.unwrap_err();
    assert!(matches!(err, Error::InvalidResponse(_)));
    assert!(conversation.history().is_empty());
}

#[tokio::test]
async fn validation_failure_skips_transport() {
    let transport = Scripted::new();
    let mut conversation = conversation("nova_micro", transport.clone());
    conversation
        .builder_mut()
        .prompt("Hi")
        .unwrap()
        .max_tokens(0);

    assert!(matches!(
        conversation.converse().await,
        Err(Error::InvalidParameter { .. })
    ));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn stream_text() {
    let transport = Scripted::new().events(text_events(&["Hel", "lo"]));
    let mut conversation = conversation("claude_3_haiku", transport);
    conversation.builder_mut().prompt("Greet me").unwrap();

    let (stream, pending) = conversation.converse_stream().unwrap();
    let segments = stream.collect::<Vec<_>>().await;
    let segments = segments
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(
        segments,
        [
            ContentSegment {
                index: 0,
                text: "Hel".into()
            },
            ContentSegment {
                index: 0,
                text: "lo".into()
            }
        ]
    );

    let message = pending.await.unwrap();
    assert_eq!(message, Message::assistant("Hello"));
    assert_eq!(conversation.history().len(), 2);
    assert_eq!(conversation.history().last(), Some(&message));
}

#[tokio::test]
async fn stream_tool_use() {
    let events = vec![
        StreamEvent::MessageStart {
            role: Role::Assistant,
        },
        StreamEvent::ContentBlockStart {
            index: 0,
            kind: BlockKind::ToolUse {
                id: "toolId".into(),
                name: "toolName".into(),
            },
        },
        StreamEvent::ContentBlockDelta {
            index: 0,
            fragment: r#"{"q":"#.into(),
        },
        StreamEvent::ContentBlockDelta {
            index: 0,
            fragment: r#""rust"}"#.into(),
        },
        StreamEvent::ContentBlockStop { index: 0 },
        StreamEvent::MessageStop {
            stop_reason: Some(StopReason::ToolUse),
        },
    ];
    let transport = Scripted::new().events(events);
    let mut conversation = conversation("nova_pro", transport);
    let builder = conversation.builder_mut();
    builder.tool(tool()).unwrap();
    builder.prompt("Search").unwrap();

    let (stream, pending) = conversation.converse_stream().unwrap();
    assert!(stream.collect::<Vec<_>>().await.is_empty());

    let message = pending.await.unwrap();
    assert_eq!(message.tool_use().unwrap().input, json!({ "q": "rust" }));
    assert!(conversation.history().pending_tool_use().is_some());
}

#[tokio::test]
async fn stream_failure_keeps_history() {
    let transport = Scripted::new().events_then_fail(
        text_events(&["Hel"])[..3].to_vec(),
        "connection reset",
    );
    let mut conversation = conversation("nova_lite", transport);
    conversation.builder_mut().prompt("Hi").unwrap();

    let (stream, pending) = conversation.converse_stream().unwrap();
    let items = stream.collect::<Vec<_>>().await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].as_ref().unwrap().text, "Hel");
    assert!(matches!(items[1], Err(Error::Transport(_))));

    assert!(pending.await.is_err());
    assert!(conversation.history().is_empty());
}

#[tokio::test]
async fn stream_ends_early() {
    let transport = Scripted::new().events(text_events(&["Hel"])[..3].to_vec());
    let mut conversation = conversation("nova_lite", transport);
    conversation.builder_mut().prompt("Hi").unwrap();

    let (stream, pending) = conversation.converse_stream().unwrap();
    let items = stream.collect::<Vec<_>>().await;
    assert!(matches!(items.last(), Some(Err(Error::Protocol(_)))));
    assert!(matches!(pending.await, Err(Error::Protocol(_))));
    assert!(conversation.history().is_empty());
}

#[tokio::test]
async fn stream_protocol_error() {
    let events = vec![StreamEvent::ContentBlockDelta {
        index: 4,
        fragment: "orphan".into(),
    }];
    let transport = Scripted::new().events(events);
    let mut conversation = conversation("nova_lite", transport);
    conversation.builder_mut().prompt("Hi").unwrap();

    let (stream, _pending) = conversation.converse_stream().unwrap();
    let items = stream.collect::<Vec<_>>().await;
    assert_eq!(items.len(), 1);
    assert!(matches!(items[0], Err(Error::Protocol(_))));
}

#[tokio::test]
async fn dropped_stream_keeps_history() {
    let transport = Scripted::new().events(text_events(&["Hel", "lo"]));
    let mut conversation = conversation("nova_lite", transport);
    conversation.builder_mut().prompt("Hi").unwrap();

    let pending = {
        let (stream, pending) = conversation.converse_stream().unwrap();
        futures_util::pin_mut!(stream);
        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(first.text, "Hel");
        pending
    };

    assert!(pending.await.is_err());
    assert!(conversation.history().is_empty());
}

#[tokio::test]
async fn stream_then_converse() {
    let transport = Scripted::new()
        .events(text_events(&["Hi", " there"]))
        .reply(&Message::assistant("Bye."));
    let mut conversation = conversation("mistral_7b_instruct", transport.clone());
    conversation.builder_mut().prompt("Hello").unwrap();

    let (stream, pending) = conversation.converse_stream().unwrap();
    stream.collect::<Vec<_>>().await;
    assert_eq!(pending.await.unwrap().text().as_deref(), Some("Hi there"));

    conversation.builder_mut().prompt("Goodbye").unwrap();
    conversation.converse().await.unwrap();
    assert_eq!(conversation.history().len(), 4);
    assert_eq!(transport.requests()[1].messages().len(), 3);
}

fn metadata() -> StreamEvent {
    StreamEvent::Metadata {
        usage: Some(Usage {
            input_tokens: 3,
            output_tokens: 1,
            total_tokens: 4,
        }),
        metrics: None,
    }
}

#[tokio::test]
async fn stream_with_trailing_metadata() {
    let mut events = text_events(&["hi"]);
    events.push(metadata());
    let transport = Scripted::new().events(events);
    let mut conversation = conversation("nova_lite", transport);
    conversation.builder_mut().prompt("Hello").unwrap();

    let (stream, pending) = conversation.converse_stream().unwrap();
    let items = stream.collect::<Vec<_>>().await;
    assert_eq!(items.len(), 1);
    assert!(items.iter().all(Result::is_ok));

    assert_eq!(pending.await.unwrap(), Message::assistant("hi"));
    assert_eq!(conversation.history().len(), 2);
}

#[tokio::test]
async fn failure_after_message_stop_keeps_reply() {
    let mut events = text_events(&["hi"]);
    events.push(metadata());
    let transport = Scripted::new().events_then_fail(events, "connection reset");
    let mut conversation = conversation("nova_lite", transport);
    conversation.builder_mut().prompt("Hello").unwrap();

    let (stream, pending) = conversation.converse_stream().unwrap();
    let items = stream.collect::<Vec<_>>().await;
    assert!(items.iter().all(Result::is_ok));

    assert_eq!(pending.await.unwrap().text().as_deref(), Some("hi"));
    assert_eq!(conversation.history().len(), 2);
}
