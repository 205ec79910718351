//! The OpenAI-compatible provider against a mock Chat Completions endpoint.

use std::time::Duration;

use chore_assistant::provider::{ChatMessage, ChatModel, OpenAiChatModel};
use chores_info::api::tools::ChoreTool;
use httpmock::prelude::*;
use serde_json::json;

fn model_for(server: &MockServer) -> OpenAiChatModel {
    OpenAiChatModel::new(
        &server.url("/v1"),
        "test-key".into(),
        "gpt-test".into(),
        256,
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn sends_tools_and_parses_tool_calls() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("authorization", "Bearer test-key")
                .body_includes(r#""model":"gpt-test""#)
                .body_includes("\"listUsers\"");
            then.status(200).json_body(json!({
                "choices": [{
                    "finish_reason": "tool_calls",
                    "message": {
                        "role": "assistant",
                        "content": null,
                        "tool_calls": [{
                            "id": "call_9",
                            "type": "function",
                            "function": {"name": "listUsers", "arguments": "{}"}
                        }]
                    }
                }]
            }));
        })
        .await;

    let model = model_for(&server);
    let tools: Vec<_> = ChoreTool::all().iter().map(ChoreTool::definition).collect();
    let reply = model
        .complete(&[ChatMessage::user("who lives here?")], Some(&tools))
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(reply.content.is_none());
    assert_eq!(reply.tool_calls.len(), 1);
    assert_eq!(reply.tool_calls[0].id, "call_9");
    assert_eq!(reply.tool_calls[0].name, "listUsers");
}

#[tokio::test]
async fn plain_text_reply_without_tools() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).json_body(json!({
                "choices": [{"message": {"role": "assistant", "content": "All done."}}]
            }));
        })
        .await;

    let reply = model_for(&server)
        .complete(&[ChatMessage::user("thanks")], None)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(reply.content.as_deref(), Some("All done."));
    assert!(reply.tool_calls.is_empty());
}

#[tokio::test]
async fn error_status_is_reported() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(401).body("invalid api key");
        })
        .await;

    let err = model_for(&server)
        .complete(&[ChatMessage::user("hi")], None)
        .await
        .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("401"), "{msg}");
    assert!(msg.contains("invalid api key"), "{msg}");
}
