use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Chat request. Both fields are optional on the wire; a blank message is rejected.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatRequest {
    /// Conversation id; omitted ids share the `default` session.
    pub session_id: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
}

impl ChatResponse {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}
