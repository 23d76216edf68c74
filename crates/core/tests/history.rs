//! Tests for history invariants.

use converse_core::{
    Content, Error, History, Message, PromptError, Role, ToolResult, ToolResultContent, ToolUse,
};
use serde_json::json;

fn tool_use(id: &str) -> Content {
    Content::ToolUse(ToolUse {
        id: id.into(),
        name: "lookup".into(),
        input: json!({ "q": "rust" }),
    })
}

fn tool_result(id: &str) -> Content {
    Content::ToolResult(ToolResult {
        tool_use_id: id.into(),
        content: ToolResultContent::from("found"),
        is_error: false,
    })
}

fn prompt_error(err: Error) -> PromptError {
    match err {
        Error::InvalidPrompt(err) => err,
        other => panic!("expected a prompt error, got {other:?}"),
    }
}

#[test]
fn roles_alternate() {
    let mut history = History::new();
    assert_eq!(history.next_role(), Role::User);
    history.push(Message::user("hi")).unwrap();
    assert_eq!(history.next_role(), Role::Assistant);
    history.push(Message::assistant("hello")).unwrap();
    assert_eq!(history.len(), 2);
}

#[test]
fn first_message_must_be_user() {
    let err = History::new()
        .push(Message::assistant("hello"))
        .unwrap_err();
    assert_eq!(
        prompt_error(err),
        PromptError::RoleSequence {
            expected: Role::User
        }
    );
}

#[test]
fn consecutive_user_messages_rejected() {
    let mut history = History::new();
    history.push(Message::user("one")).unwrap();
    let err = history.push(Message::user("two")).unwrap_err();
    assert_eq!(
        prompt_error(err),
        PromptError::RoleSequence {
            expected: Role::Assistant
        }
    );
    assert_eq!(history.len(), 1);
}

#[test]
fn empty_message_rejected() {
    let err = History::new()
        .push(Message::new(Role::User, Vec::new()))
        .unwrap_err();
    assert_eq!(prompt_error(err), PromptError::EmptyMessage);
}

#[test]
fn tool_result_follows_tool_use() {
    let history = History::from_messages([
        Message::user("search"),
        Message::new(Role::Assistant, vec![Content::text("looking"), tool_use("t1")]),
        Message::new(Role::User, vec![tool_result("t1")]),
    ])
    .unwrap();
    assert_eq!(history.len(), 3);
    assert!(history.pending_tool_use().is_none());
}

#[test]
fn tool_result_without_tool_use() {
    let mut history = History::new();
    history.push(Message::user("hi")).unwrap();
    history.push(Message::assistant("hello")).unwrap();
    let err = history
        .push(Message::new(Role::User, vec![tool_result("t1")]))
        .unwrap_err();
    assert_eq!(prompt_error(err), PromptError::ToolResultWithoutToolUse);
}

#[test]
fn tool_use_must_be_last_block() {
    let mut history = History::new();
    history.push(Message::user("search")).unwrap();
    history
        .push(Message::new(
            Role::Assistant,
            vec![tool_use("t1"), Content::text("done")],
        ))
        .unwrap();
    assert!(history.pending_tool_use().is_none());
}

#[test]
fn pending_tool_use() {
    let mut history = History::new();
    history.push(Message::user("search")).unwrap();
    history
        .push(Message::new(Role::Assistant, vec![tool_use("t9")]))
        .unwrap();
    assert_eq!(history.pending_tool_use().unwrap().id, "t9");
}

#[test]
fn user_cannot_send_tool_use() {
    let err = History::new()
        .push(Message::new(Role::User, vec![tool_use("t1")]))
        .unwrap_err();
    assert_eq!(prompt_error(err), PromptError::MisplacedToolUse);
}

#[test]
fn assistant_cannot_send_tool_result() {
    let mut history = History::new();
    history.push(Message::user("hi")).unwrap();
    let err = history
        .push(Message::new(Role::Assistant, vec![tool_result("t1")]))
        .unwrap_err();
    assert_eq!(prompt_error(err), PromptError::MisplacedToolResult);
    assert_eq!(
        PromptError::MisplacedToolResult.to_string(),
        "tool result is only valid in user messages"
    );
}

#[test]
fn deserialize_checks_invariants() {
    let ok = json!([
        { "role": "user", "content": [{ "text": "hi" }] },
        { "role": "assistant", "content": [{ "text": "hello" }] }
    ]);
    let history: History = serde_json::from_value(ok).unwrap();
    assert_eq!(history.last().unwrap().text().as_deref(), Some("hello"));

    let bad = json!([
        { "role": "assistant", "content": [{ "text": "hello" }] }
    ]);
    assert!(serde_json::from_value::<History>(bad).is_err());
}

#[test]
fn message_text_joins_blocks() {
    let message = Message::assistant("Hel")
        .with(tool_use("t1"))
        .with(Content::text("lo"));
    assert_eq!(message.text().as_deref(), Some("Hello"));
    assert_eq!(message.tool_use().unwrap().id, "t1");

    let silent = Message::new(Role::Assistant, vec![tool_use("t1")]);
    assert_eq!(silent.text(), None);
}
