use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;

use crate::api::rest::handlers;
use crate::service::AssistantService;

/// Assistant routes, relative to the API base path.
pub fn router(service: Arc<AssistantService>) -> Router {
    Router::new()
        .route("/assistant/chat", post(handlers::chat))
        .route("/assistant/health", get(handlers::health))
        .layer(Extension(service))
}
