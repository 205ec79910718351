use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument, warn};

use chores_info::api::tools::{ChoreTool, ToolRegistry};
use chores_info::domain::dates;

use crate::memory::{session_key, ChatMemory};
use crate::provider::{ChatMessage, ChatModel};
use crate::tool_loop::{run_tool_loop, ToolLoopConfig};

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Please provide a message.")]
    EmptyMessage,

    #[error("The chat assistant is not configured")]
    NotConfigured,

    #[error("Chat provider failed: {0}")]
    Provider(String),
}

/// Builds the system prompt. Rebuilt per turn so "today" stays current.
pub fn system_prompt() -> String {
    let tool_lines = ChoreTool::all()
        .iter()
        .map(|t| format!("- {}: {}", t.name(), t.description()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a helpful family chore chart assistant. You help a household \
manage its members and their chores.\n\n\
Available tools:\n{tool_lines}\n\n\
Guidelines:\n\
- Always confirm with the user before deleting a user or a chore.\n\
- Dates use the format YYYY-MM-DD. Today is {today}.\n\
- Times use the 24-hour format HH:MM.\n\
- If a request is missing details (such as who a chore is for), ask for them.\n\
- Be friendly and encouraging, and suggest next steps when it helps.",
        today = dates::format_date(dates::today()),
    )
}

pub struct AssistantService {
    model: Option<Arc<dyn ChatModel>>,
    tools: Arc<ToolRegistry>,
    memory: ChatMemory,
    loop_config: ToolLoopConfig,
}

impl AssistantService {
    pub fn new(
        model: Option<Arc<dyn ChatModel>>,
        tools: Arc<ToolRegistry>,
        history_limit: usize,
        max_tool_rounds: usize,
    ) -> Self {
        Self {
            model,
            tools,
            memory: ChatMemory::new(history_limit),
            loop_config: ToolLoopConfig {
                max_rounds: max_tool_rounds,
            },
        }
    }

    pub fn is_configured(&self) -> bool {
        self.model.is_some()
    }

    pub fn memory(&self) -> &ChatMemory {
        &self.memory
    }

    /// One chat turn. History only records the user text and the final reply.
    #[instrument(
        name = "chore_assistant.service.chat",
        skip(self, session_id, message),
        fields(session = tracing::field::Empty)
    )]
    pub async fn chat(
        &self,
        session_id: Option<&str>,
        message: &str,
    ) -> Result<String, AssistantError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AssistantError::EmptyMessage);
        }
        let model = self.model.as_ref().ok_or(AssistantError::NotConfigured)?;
        let session = session_key(session_id);
        tracing::Span::current().record("session", session);

        let mut transcript = Vec::with_capacity(self.memory.limit() + 2);
        transcript.push(ChatMessage::system(system_prompt()));
        transcript.extend(self.memory.history(session));
        transcript.push(ChatMessage::user(message));

        let result = run_tool_loop(model.as_ref(), &self.tools, transcript, self.loop_config)
            .await
            .map_err(|e| {
                warn!("chat turn failed via {}: {:#}", model.name(), e);
                AssistantError::Provider(e.to_string())
            })?;

        info!(
            "chat turn done in {} round(s), tools: {:?}",
            result.rounds, result.tools_called
        );
        let reply = result.reply.trim().to_string();
        self.memory.append(
            session,
            [ChatMessage::user(message), ChatMessage::assistant(reply.clone())],
        );
        Ok(reply)
    }
}
