use std::sync::Arc;

use axum::Router;
use modkit::ModuleCtx;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};
use utoipa::OpenApi;

use crate::api::rest::{openapi::ChoresApiDoc, routes};
use crate::api::tools::{handlers as tool_handlers, ToolRegistry};
use crate::config::ChoresInfoConfig;
use crate::contract::client::ChoresInfoApi;
use crate::domain::service::{Service, ServiceConfig};
use crate::gateways::local::ChoresInfoLocalClient;
use crate::infra::storage::{migrations::Migrator, SeaOrmChoresRepository};

pub const MODULE_NAME: &str = "chores_info";

/// Users and chores: the CRUD core plus its REST and tool surfaces.
#[derive(Clone)]
pub struct ChoresInfo {
    config: ChoresInfoConfig,
    service: Arc<Service>,
    client: Arc<dyn ChoresInfoApi>,
    tools: Arc<ToolRegistry>,
}

impl ChoresInfo {
    /// Reads `modules.chores_info`, applies migrations and wires the service.
    pub async fn init(ctx: &ModuleCtx) -> anyhow::Result<Self> {
        info!("Initializing chores_info module");

        let ctx = ctx.for_module(MODULE_NAME);
        let cfg: ChoresInfoConfig = ctx.module_config()?;
        debug!(
            "Loaded chores_info config: default_color={}, error_status={:?}",
            cfg.default_color, cfg.error_status
        );

        let db = ctx.db().ok_or_else(|| anyhow::anyhow!("DB required"))?;
        Self::migrate(&db).await?;

        Ok(Self::with_db(db, cfg))
    }

    pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running chores_info database migrations");
        Migrator::up(db, None).await?;
        info!("Chores database migrations completed successfully");
        Ok(())
    }

    /// Wire the module on an already migrated connection.
    pub fn with_db(db: DatabaseConnection, config: ChoresInfoConfig) -> Self {
        let service_config = ServiceConfig {
            default_color: config.default_color.clone(),
            max_name_length: config.max_name_length,
            max_description_length: config.max_description_length,
        };
        let repo = Arc::new(SeaOrmChoresRepository::new(db));
        let service = Arc::new(Service::new(repo, service_config));
        let client: Arc<dyn ChoresInfoApi> = Arc::new(ChoresInfoLocalClient::new(service.clone()));
        let tools = Arc::new(ToolRegistry::new(client.clone()));

        Self {
            config,
            service,
            client,
            tools,
        }
    }

    pub fn config(&self) -> &ChoresInfoConfig {
        &self.config
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    /// In-process API for other modules.
    pub fn client(&self) -> Arc<dyn ChoresInfoApi> {
        self.client.clone()
    }

    pub fn tools(&self) -> Arc<ToolRegistry> {
        self.tools.clone()
    }

    /// REST and tool routes, relative to the API base path.
    pub fn router(&self) -> Router {
        info!("Registering chores_info REST routes");
        routes::router(self.service.clone(), self.config.error_status)
            .merge(tool_handlers::router(self.tools.clone(), self.config.error_status))
    }

    pub fn openapi(&self) -> utoipa::openapi::OpenApi {
        ChoresApiDoc::openapi()
    }
}
