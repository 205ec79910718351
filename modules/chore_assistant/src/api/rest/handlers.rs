use std::sync::Arc;

use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Json, Response},
    Extension,
};
use modkit::api::Problem;
use tracing::{error, info};

use crate::api::rest::dto::{ChatRequest, ChatResponse};
use crate::errors::{ASSISTANT_NOT_CONFIGURED, PROVIDER_FAILED};
use crate::service::{AssistantError, AssistantService};

pub const READY_MESSAGE: &str =
    "Chore Assistant is ready to help! Ask me anything about managing your family chores.";

/// Send one message to the assistant
#[utoipa::path(
    post,
    path = "/assistant/chat",
    tag = "assistant",
    operation_id = "chore_assistant.chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse),
        (status = 400, description = "Blank message", body = ChatResponse),
        (status = 502, description = "Chat provider failed", body = Problem, content_type = "application/problem+json"),
        (status = 503, description = "Assistant not configured", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn chat(
    Extension(svc): Extension<Arc<AssistantService>>,
    uri: Uri,
    Json(req): Json<ChatRequest>,
) -> Response {
    let message = req.message.unwrap_or_default();
    info!("Chat request ({} chars)", message.len());

    match svc.chat(req.session_id.as_deref(), &message).await {
        Ok(reply) => Json(ChatResponse::new(reply)).into_response(),
        Err(e @ AssistantError::EmptyMessage) => {
            (StatusCode::BAD_REQUEST, Json(ChatResponse::new(e.to_string()))).into_response()
        }
        Err(AssistantError::NotConfigured) => ASSISTANT_NOT_CONFIGURED
            .to_response(
                "No chat model is configured; set the API key and restart",
                uri.path(),
            )
            .into_response(),
        Err(e @ AssistantError::Provider(_)) => {
            error!("Chat failed: {}", e);
            PROVIDER_FAILED
                .to_response(e.to_string(), uri.path())
                .into_response()
        }
    }
}

/// Readiness text for the assistant
#[utoipa::path(
    get,
    path = "/assistant/health",
    tag = "assistant",
    operation_id = "chore_assistant.health",
    responses((status = 200, description = "Ready", body = ChatResponse))
)]
pub async fn health() -> Json<ChatResponse> {
    Json(ChatResponse::new(READY_MESSAGE))
}
