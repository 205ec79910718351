use dashmap::DashMap;
use std::collections::VecDeque;

use crate::provider::ChatMessage;

pub const DEFAULT_SESSION: &str = "default";

/// Per-session chat history, capped at the newest `limit` messages.
pub struct ChatMemory {
    sessions: DashMap<String, VecDeque<ChatMessage>>,
    limit: usize,
}

/// Missing or blank ids share the default session.
pub fn session_key(session_id: Option<&str>) -> &str {
    match session_id.map(str::trim) {
        Some(id) if !id.is_empty() => id,
        _ => DEFAULT_SESSION,
    }
}

impl ChatMemory {
    pub fn new(limit: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            limit: limit.max(1),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Snapshot of the session, oldest first.
    pub fn history(&self, session: &str) -> Vec<ChatMessage> {
        self.sessions
            .get(session)
            .map(|h| h.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn append(&self, session: &str, messages: impl IntoIterator<Item = ChatMessage>) {
        let mut entry = self.sessions.entry(session.to_string()).or_default();
        for msg in messages {
            entry.push_back(msg);
        }
        while entry.len() > self.limit {
            entry.pop_front();
        }
    }

}
