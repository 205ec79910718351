#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, Response},
    Router,
};
use chore_assistant::config::ChoreAssistantConfig;
use chore_assistant::provider::{ChatMessage, ChatModel, ChatReply, ToolCall};
use chore_assistant::ChoreAssistant;
use chores_info::api::tools::ToolDefinition;
use chores_info::config::ChoresInfoConfig;
use chores_info::ChoresInfo;
use parking_lot::Mutex;
use sea_orm::{ConnectOptions, Database};
use serde_json::Value;
use tower::ServiceExt;

/// One recorded `complete` call.
#[derive(Debug, Clone)]
pub struct SeenCall {
    pub messages: Vec<ChatMessage>,
    pub tools_offered: bool,
}

/// Replays canned replies in order and records what it was sent.
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<ChatReply, String>>>,
    pub calls: Mutex<Vec<SeenCall>>,
}

impl ScriptedModel {
    pub fn new(replies: Vec<ChatReply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().map(Ok).collect()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(VecDeque::from([Err(message.to_string())])),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn seen(&self) -> Vec<SeenCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: Option<&[ToolDefinition]>,
    ) -> Result<ChatReply> {
        self.calls.lock().push(SeenCall {
            messages: messages.to_vec(),
            tools_offered: tools.is_some_and(|t| !t.is_empty()),
        });
        match self.replies.lock().pop_front() {
            Some(Ok(r)) => Ok(r),
            Some(Err(e)) => Err(anyhow!(e)),
            None => Err(anyhow!("script exhausted")),
        }
    }
}

pub fn text(content: &str) -> ChatReply {
    ChatReply {
        content: Some(content.to_string()),
        tool_calls: Vec::new(),
    }
}

pub fn calls(list: &[(&str, &str, &str)]) -> ChatReply {
    ChatReply {
        content: None,
        tool_calls: list
            .iter()
            .map(|(id, name, args)| ToolCall {
                id: id.to_string(),
                name: name.to_string(),
                arguments: args.to_string(),
            })
            .collect(),
    }
}

pub async fn chores_module() -> ChoresInfo {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts)
        .await
        .expect("Failed to connect to test database");
    ChoresInfo::migrate(&db)
        .await
        .expect("Failed to run migrations");
    ChoresInfo::with_db(db, ChoresInfoConfig::default())
}

pub fn assistant_with(
    chores: &ChoresInfo,
    model: Option<Arc<dyn ChatModel>>,
    config: ChoreAssistantConfig,
) -> ChoreAssistant {
    ChoreAssistant::with_model(model, chores.tools(), config)
}

pub async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (u16, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();
    let resp: Response<Body> = router.clone().oneshot(req).await.unwrap();
    let status = resp.status().as_u16();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
