//! HTTP host for the chore chart server.
//!
//! Owns the outer router: module APIs are nested under the configured base
//! path, host endpoints (`/health`, `/healthz`, `/openapi.json`, `/docs`) stay
//! at the root, and the common middleware stack wraps everything.

use anyhow::{Context, Result};
use axum::{middleware::from_fn, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

mod config;
pub mod openapi;
pub mod request_id;
mod web;

pub use config::ApiIngressConfig;

pub const MODULE_NAME: &str = "api_ingress";

pub struct ApiIngress {
    config: ApiIngressConfig,
}

impl ApiIngress {
    pub fn new(config: ApiIngressConfig) -> Self {
        Self { config }
    }

    /// Reads `modules.api_ingress`; an empty `bind_addr` falls back to `host:port`.
    pub fn from_ctx(ctx: &modkit::ModuleCtx, host: &str, port: u16) -> Result<Self> {
        let cfg: ApiIngressConfig = ctx.for_module(MODULE_NAME).module_config()?;
        tracing::debug!(module = MODULE_NAME, ?cfg, "module config loaded");
        Ok(Self::new(cfg.with_server_defaults(host, port)))
    }

    pub fn config(&self) -> &ApiIngressConfig {
        &self.config
    }

    /// Assemble the full application router.
    ///
    /// `api` holds module routes relative to the base path; `docs` are the
    /// module OpenAPI fragments, served only when `enable_docs` is set.
    pub fn build_router(&self, api: Router, docs: Vec<utoipa::openapi::OpenApi>) -> Router {
        let base = self.config.normalized_base_path();

        let mut router = Router::new()
            .route("/health", get(web::health_check))
            .route("/healthz", get(web::healthz));

        router = if base.is_empty() {
            router.merge(api)
        } else {
            router.nest(&base, api)
        };

        if self.config.enable_docs {
            let doc = Arc::new(openapi::assemble(docs, &base));
            tracing::info!(paths = doc.paths.paths.len(), "serving OpenAPI document");
            router = router
                .route(
                    "/openapi.json",
                    get({
                        let doc = doc.clone();
                        move || async move { axum::Json((*doc).clone()) }
                    }),
                )
                .route("/docs", get(web::serve_docs));
        }

        self.apply_layers(router)
    }

    /// Outermost to innermost:
    /// PropagateRequestId -> SetRequestId -> push_req_id_to_extensions -> Trace -> Timeout -> CORS -> BodyLimit
    fn apply_layers(&self, router: Router) -> Router {
        let x_request_id = request_id::header();

        let mut router = router.layer(RequestBodyLimitLayer::new(self.config.body_limit_bytes));
        if self.config.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }
        router
            .layer(TimeoutLayer::new(Duration::from_secs(
                self.config.request_timeout_secs.max(1),
            )))
            .layer(request_id::create_trace_layer())
            .layer(from_fn(request_id::push_req_id_to_extensions))
            .layer(SetRequestIdLayer::new(
                x_request_id.clone(),
                request_id::MakeReqId,
            ))
            .layer(PropagateRequestIdLayer::new(x_request_id))
    }

    pub async fn bind(&self) -> Result<TcpListener> {
        let addr: SocketAddr = self
            .config
            .bind_addr
            .parse()
            .with_context(|| format!("invalid bind address '{}'", self.config.bind_addr))?;
        TcpListener::bind(addr)
            .await
            .with_context(|| format!("cannot bind {addr}"))
    }

    /// Serve until `cancel` fires, then drain in-flight requests.
    pub async fn serve(
        listener: TcpListener,
        router: Router,
        cancel: CancellationToken,
    ) -> Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!(%addr, "HTTP server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                cancel.cancelled().await;
                tracing::info!("HTTP server shutting down gracefully");
            })
            .await
            .context("HTTP server failed")
    }
}
