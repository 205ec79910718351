use modkit::api::Problem;
use utoipa::OpenApi;

use crate::api::rest::{dto, handlers};

#[derive(OpenApi)]
#[openapi(
    paths(handlers::chat, handlers::health),
    components(schemas(dto::ChatRequest, dto::ChatResponse, Problem)),
    tags((name = "assistant", description = "Natural-language chore management"))
)]
pub struct AssistantApiDoc;
