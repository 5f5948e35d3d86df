use anyhow::Result;
use tracing::info;

use crate::adapters::http::HttpServer;
use crate::cli::types::ServeArgs;
use crate::domain::models::Config;
use crate::services::PrioritizationService;

/// Handle the serve command. Runs until Ctrl-C.
pub async fn execute(args: ServeArgs, config: &Config) -> Result<()> {
    let mut server_config = config.server.clone();
    if let Some(host) = args.host {
        server_config.host = host;
    }
    if let Some(port) = args.port {
        server_config.port = port;
    }

    let service = PrioritizationService::from_config(config);
    let server = HttpServer::new(service, server_config);
    server.serve_with_shutdown(shutdown_signal()).await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
