use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info};

use userdb_api::config::AppConfig;
use userdb_api::kubernetes::client::K8sClient;
use userdb_api::{app, logging, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::load();

    // Initialize tracing
    logging::init(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        return Err(anyhow::anyhow!("Invalid configuration: {}", e));
    }
    info!("Configuration loaded successfully");
    let config = Arc::new(config);

    // Connect to the Kubernetes API: in-cluster first, kubeconfig fallback
    // for local development
    let kube = match K8sClient::from_incluster().await {
        Ok(client) => client,
        Err(e) => {
            info!("In-cluster config unavailable ({}), falling back to kubeconfig", e);
            K8sClient::infer()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create Kubernetes client: {}", e))?
        }
    };
    info!("Connected to Kubernetes API server at {}", kube.api_server());

    let state = Arc::new(AppState {
        config: config.clone(),
        kube,
    });

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("UserDB API listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped, exiting");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
