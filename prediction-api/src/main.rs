use prediction_api::{loader, server, AppState, Config, ModelSlot};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(config.log_level.clone())
        .init();

    tracing::info!("Prediction API starting");
    tracing::info!("Port: {}", config.port);
    tracing::info!("Model path: {}", config.model_path);

    let slot = Arc::new(ModelSlot::new());

    // Bind before loading so health checks see `loading` during the download
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    loader::spawn(config.clone(), Arc::clone(&slot));

    let app = server::build_router(AppState::new(slot));

    tracing::info!("Prediction API listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
