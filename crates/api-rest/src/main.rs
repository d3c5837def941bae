//! Exam grading API server.

use anyhow::Context;
use exam_grading_api_rest::{create_app, ApiConfig};
use exam_grading_common::{telemetry, AppConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    telemetry::init_from_config(&config.telemetry)?;

    let api_config = ApiConfig::from(&config);
    let address = api_config.server_address();
    let app = create_app(api_config);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!(address = %address, "Exam grading API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
