use std::sync::Arc;

use axum::Router;
use chores_info::api::tools::ToolRegistry;
use modkit::ModuleCtx;
use tracing::{debug, info, warn};
use utoipa::OpenApi;

use crate::api::rest::{openapi::AssistantApiDoc, routes};
use crate::config::ChoreAssistantConfig;
use crate::provider::{ChatModel, OpenAiChatModel};
use crate::service::AssistantService;

pub const MODULE_NAME: &str = "chore_assistant";

/// Conversational front end over the chores_info tools.
#[derive(Clone)]
pub struct ChoreAssistant {
    config: ChoreAssistantConfig,
    service: Arc<AssistantService>,
}

impl ChoreAssistant {
    /// Reads `modules.chore_assistant`. A missing API key leaves the module
    /// up but unconfigured; chat then answers 503.
    pub async fn init(ctx: &ModuleCtx, tools: Arc<ToolRegistry>) -> anyhow::Result<Self> {
        info!("Initializing chore_assistant module");

        let ctx = ctx.for_module(MODULE_NAME);
        let cfg: ChoreAssistantConfig = ctx.module_config()?;
        debug!(
            "Loaded chore_assistant config: model={}, base_url={}, history_limit={}",
            cfg.model, cfg.base_url, cfg.history_limit
        );

        let model: Option<Arc<dyn ChatModel>> = if !cfg.enabled {
            info!("chore_assistant disabled by config");
            None
        } else {
            match OpenAiChatModel::from_config(&cfg) {
                Ok(m) => Some(Arc::new(m)),
                Err(e) => {
                    warn!("chat model unavailable, assistant will answer 503: {:#}", e);
                    None
                }
            }
        };

        Ok(Self::with_model(model, tools, cfg))
    }

    pub fn with_model(
        model: Option<Arc<dyn ChatModel>>,
        tools: Arc<ToolRegistry>,
        config: ChoreAssistantConfig,
    ) -> Self {
        let service = Arc::new(AssistantService::new(
            model,
            tools,
            config.history_limit,
            config.max_tool_rounds,
        ));
        Self { config, service }
    }

    pub fn config(&self) -> &ChoreAssistantConfig {
        &self.config
    }

    pub fn service(&self) -> Arc<AssistantService> {
        self.service.clone()
    }

    pub fn router(&self) -> Router {
        info!("Registering chore_assistant REST routes");
        routes::router(self.service.clone())
    }

    pub fn openapi(&self) -> utoipa::openapi::OpenApi {
        AssistantApiDoc::openapi()
    }
}
