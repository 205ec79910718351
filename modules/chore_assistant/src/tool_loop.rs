//! Multi-round tool-use loop
//!
//! Sends the transcript to the model with the chore tools attached, executes
//! any requested calls through the registry, and repeats until the model
//! answers in text or the round limit is hit.

use anyhow::Result;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use chores_info::api::tools::ToolRegistry;

use crate::provider::{ChatMessage, ChatModel, ToolCall};

#[derive(Debug, Clone, Copy)]
pub struct ToolLoopConfig {
    /// Maximum number of tool-calling rounds before forcing a final answer.
    pub max_rounds: usize,
}

impl Default for ToolLoopConfig {
    fn default() -> Self {
        Self { max_rounds: 5 }
    }
}

#[derive(Debug, Clone)]
pub struct ToolLoopResult {
    pub reply: String,
    /// Names of the tools executed, in call order.
    pub tools_called: Vec<String>,
    pub rounds: usize,
}

/// Execute one call. Failures come back as `{"error": ...}` so the model can react.
async fn execute_tool(registry: &ToolRegistry, call: &ToolCall) -> Value {
    let args: Value = if call.arguments.trim().is_empty() {
        Value::Null
    } else {
        match serde_json::from_str(&call.arguments) {
            Ok(v) => v,
            Err(e) => {
                return json!({ "error": format!("Invalid JSON arguments for {}: {}", call.name, e) })
            }
        }
    };
    match registry.invoke(&call.name, args).await {
        Ok(v) => v,
        Err(e) => json!({ "error": e.to_string() }),
    }
}

pub async fn run_tool_loop(
    model: &dyn ChatModel,
    registry: &ToolRegistry,
    mut messages: Vec<ChatMessage>,
    config: ToolLoopConfig,
) -> Result<ToolLoopResult> {
    let tools = registry.definitions();
    let mut tools_called = Vec::new();

    for round in 0..config.max_rounds {
        let reply = model.complete(&messages, Some(&tools)).await?;

        if reply.tool_calls.is_empty() {
            debug!("Tool loop finished after {} round(s)", round + 1);
            return Ok(ToolLoopResult {
                reply: reply.content.unwrap_or_default(),
                tools_called,
                rounds: round + 1,
            });
        }

        info!(
            "Round {}: executing {} tool call(s)",
            round + 1,
            reply.tool_calls.len()
        );
        let calls = reply.tool_calls.clone();
        messages.push(ChatMessage::assistant_tool_calls(reply.content, reply.tool_calls));

        for call in &calls {
            let output = execute_tool(registry, call).await;
            tools_called.push(call.name.clone());
            messages.push(ChatMessage::tool_result(&call.id, output.to_string()));
        }
    }

    warn!(
        "Hit max tool rounds ({}), requesting final answer",
        config.max_rounds
    );
    let final_reply = model.complete(&messages, None).await?;
    Ok(ToolLoopResult {
        reply: final_reply.content.unwrap_or_default(),
        tools_called,
        rounds: config.max_rounds + 1,
    })
}
