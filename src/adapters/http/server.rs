//! Triage HTTP Server.
//!
//! Serves the analyze, suggest, graph, and feedback endpoints. Every
//! endpoint is reachable both at the root and under `/api/tasks/<name>/`,
//! the paths used by the browser client.

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{self, SharedService};
use crate::domain::models::ServerConfig;
use crate::services::PrioritizationService;

const CLIENT_PREFIX: &str = "/api/tasks";

/// Triage HTTP Server.
pub struct HttpServer {
    config: ServerConfig,
    service: SharedService,
}

impl HttpServer {
    pub fn new(service: PrioritizationService, config: ServerConfig) -> Self {
        Self {
            config,
            service: Arc::new(service),
        }
    }

    /// Build the router.
    pub fn router(&self) -> Router {
        build_router(Arc::clone(&self.service), self.config.enable_cors)
    }

    fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .with_context(|| {
                format!(
                    "Invalid listen address {}:{}",
                    self.config.host, self.config.port
                )
            })
    }

    /// Start the server.
    pub async fn serve(self) -> Result<()> {
        let addr = self.addr()?;
        let router = self.router();

        tracing::info!("Triage HTTP server listening on {}", addr);

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        axum::serve(listener, router).await.context("HTTP server failed")?;
        Ok(())
    }

    /// Start the server with a shutdown signal.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = self.addr()?;
        let router = self.router();

        tracing::info!("Triage HTTP server listening on {}", addr);

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .context("HTTP server failed")?;
        Ok(())
    }
}

fn mount(router: Router<SharedService>, prefix: &str, suffix: &str) -> Router<SharedService> {
    router
        .route(&format!("{prefix}/analyze{suffix}"), post(handlers::analyze))
        .route(&format!("{prefix}/suggest{suffix}"), get(handlers::suggest))
        .route(&format!("{prefix}/graph{suffix}"), post(handlers::graph))
        .route(&format!("{prefix}/feedback{suffix}"), post(handlers::feedback))
        .route(&format!("{prefix}/weights{suffix}"), get(handlers::weights))
}

/// Router over a shared service. Exposed for in-process testing.
pub fn build_router(service: SharedService, enable_cors: bool) -> Router {
    let app = Router::new().route("/health", get(handlers::health_check));
    let app = mount(app, "", "");
    let app = mount(app, CLIENT_PREFIX, "/");
    let app = app.with_state(service);

    if enable_cors {
        app.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
            .layer(TraceLayer::new_for_http())
    } else {
        app.layer(TraceLayer::new_for_http())
    }
}
