// OpenAI-compatible Chat Completions provider with function calling

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use url::Url;

use chores_info::api::tools::ToolDefinition;

use super::{ChatMessage, ChatModel, ChatReply, Role, ToolCall};
use crate::config::ChoreAssistantConfig;

pub struct OpenAiChatModel {
    client: Client,
    endpoint: Url,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl OpenAiChatModel {
    pub fn new(
        base_url: &str,
        api_key: String,
        model: String,
        max_tokens: u32,
        timeout: Duration,
    ) -> Result<Self> {
        let mut root = base_url.trim().to_string();
        if !root.ends_with('/') {
            root.push('/');
        }
        let endpoint = Url::parse(&root)
            .and_then(|u| u.join("chat/completions"))
            .with_context(|| format!("invalid assistant base_url '{base_url}'"))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            endpoint,
            api_key,
            model,
            max_tokens,
        })
    }

    /// Build from module config; the key comes from the env var named by `api_key_env`.
    pub fn from_config(cfg: &ChoreAssistantConfig) -> Result<Self> {
        let api_key = std::env::var(&cfg.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| anyhow!("environment variable {} is not set", cfg.api_key_env))?;
        Self::new(
            &cfg.base_url,
            api_key,
            cfg.model.clone(),
            cfg.max_tokens,
            Duration::from_secs(cfg.request_timeout_secs.max(1)),
        )
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn role_str(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
        Role::Tool => "tool",
    }
}

/// Convert to OpenAI message format
fn to_api_message(msg: &ChatMessage) -> Value {
    let mut out = json!({
        "role": role_str(msg.role),
        "content": msg.content,
    });
    if !msg.tool_calls.is_empty() {
        out["tool_calls"] = msg
            .tool_calls
            .iter()
            .map(|c| {
                json!({
                    "id": c.id,
                    "type": "function",
                    "function": { "name": c.name, "arguments": c.arguments },
                })
            })
            .collect();
    }
    if let Some(id) = &msg.tool_call_id {
        out["tool_call_id"] = json!(id);
    }
    out
}

fn to_api_tool(def: &ToolDefinition) -> Value {
    json!({
        "type": "function",
        "function": {
            "name": def.name,
            "description": def.description,
            "parameters": def.parameters,
        }
    })
}

/// Extract content and tool calls from `choices[0].message`.
fn parse_reply(raw: &Value) -> Result<ChatReply> {
    let message = raw["choices"][0]
        .get("message")
        .ok_or_else(|| anyhow!("No message in chat completion response"))?;

    let content = message["content"].as_str().map(String::from);
    let tool_calls = match message["tool_calls"].as_array() {
        Some(calls) => calls
            .iter()
            .map(|c| {
                let name = c["function"]["name"]
                    .as_str()
                    .ok_or_else(|| anyhow!("tool call without function name"))?;
                Ok(ToolCall {
                    id: c["id"].as_str().unwrap_or_default().to_string(),
                    name: name.to_string(),
                    arguments: c["function"]["arguments"]
                        .as_str()
                        .unwrap_or("{}")
                        .to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };

    if content.is_none() && tool_calls.is_empty() {
        warn!("chat completion returned neither content nor tool calls");
    }
    Ok(ChatReply {
        content,
        tool_calls,
    })
}

#[async_trait]
impl ChatModel for OpenAiChatModel {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: Option<&[ToolDefinition]>,
    ) -> Result<ChatReply> {
        let start = Instant::now();

        let mut body = json!({
            "model": self.model,
            "messages": messages.iter().map(to_api_message).collect::<Vec<_>>(),
            "max_tokens": self.max_tokens,
        });
        if let Some(tools) = tools.filter(|t| !t.is_empty()) {
            body["tools"] = tools.iter().map(to_api_tool).collect();
        }

        debug!(
            "Chat completion request: model={}, messages={}, tools={}",
            self.model,
            messages.len(),
            tools.map_or(0, <[ToolDefinition]>::len)
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("chat completion request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!("Chat API error {}: {}", status, error_text));
        }

        let raw: Value = response
            .json()
            .await
            .context("chat completion response is not JSON")?;
        debug!(
            "Chat completion took {}ms, finish_reason={:?}",
            start.elapsed().as_millis(),
            raw["choices"][0]["finish_reason"].as_str()
        );
        parse_reply(&raw)
    }
}
