use serde::{Deserialize, Serialize};

/// Configuration for the chore_assistant module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChoreAssistantConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// OpenAI-compatible API root; `/chat/completions` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Messages kept per session.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default = "default_max_tool_rounds")]
    pub max_tool_rounds: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ChoreAssistantConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            max_tokens: default_max_tokens(),
            history_limit: default_history_limit(),
            max_tool_rounds: default_max_tool_rounds(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_history_limit() -> usize {
    20
}

fn default_max_tool_rounds() -> usize {
    5
}

fn default_request_timeout_secs() -> u64 {
    60
}
