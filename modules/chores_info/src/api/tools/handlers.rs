use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::Path,
    http::Uri,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use modkit::api::{Problem, ProblemResponse};
use serde_json::Value;
use tracing::{error, info};

use crate::api::rest::error::map_contract_error;
use crate::api::tools::registry::{ToolDefinition, ToolError, ToolRegistry};
use crate::config::ErrorStatusPolicy;
use crate::errors::ErrorCode;

/// `GET /tools` and `POST /tools/{name}`, relative to the API base path.
pub fn router(registry: Arc<ToolRegistry>, policy: ErrorStatusPolicy) -> Router {
    Router::new()
        .route("/tools", get(list_tools))
        .route("/tools/{name}", post(invoke_tool))
        .layer(Extension(registry))
        .layer(Extension(policy))
}

/// List the callable tools with their input schemas
#[utoipa::path(
    get,
    path = "/tools",
    tag = "tools",
    operation_id = "chores_info.list_tools",
    responses((status = 200, description = "Tool definitions", body = [ToolDefinition]))
)]
pub async fn list_tools(
    Extension(registry): Extension<Arc<ToolRegistry>>,
) -> Json<Vec<ToolDefinition>> {
    Json(registry.definitions())
}

/// Invoke one tool; an empty body means no arguments
#[utoipa::path(
    post,
    path = "/tools/{name}",
    tag = "tools",
    operation_id = "chores_info.invoke_tool",
    params(("name" = String, Path, description = "Tool name, e.g. createChore")),
    request_body(content = serde_json::Value, description = "Tool input", content_type = "application/json"),
    responses(
        (status = 200, description = "Tool output", body = serde_json::Value),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Unknown tool or entity", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn invoke_tool(
    Extension(registry): Extension<Arc<ToolRegistry>>,
    Extension(policy): Extension<ErrorStatusPolicy>,
    Path(name): Path<String>,
    uri: Uri,
    body: Bytes,
) -> Result<Json<Value>, ProblemResponse> {
    info!("Invoking tool {}", name);

    let args = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(&body).map_err(|e| {
            ErrorCode::ToolArguments
                .def()
                .to_response(format!("Request body is not valid JSON: {e}"), uri.path())
        })?
    };

    match registry.invoke(&name, args).await {
        Ok(out) => Ok(Json(out)),
        Err(e) => {
            error!("Tool {} failed: {}", name, e);
            Err(map_tool_error(&e, uri.path(), policy))
        }
    }
}

fn map_tool_error(e: &ToolError, instance: &str, policy: ErrorStatusPolicy) -> ProblemResponse {
    match e {
        ToolError::UnknownTool(_) => ErrorCode::ToolNotFound.def().to_response(e.to_string(), instance),
        ToolError::InvalidArguments { .. } => {
            ErrorCode::ToolArguments.def().to_response(e.to_string(), instance)
        }
        ToolError::Failed(inner) => map_contract_error(inner, instance, policy),
    }
}
