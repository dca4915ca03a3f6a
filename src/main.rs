use std::future::ready;
use std::path::PathBuf;

use axum::routing::get;
use signup::config::Configuration;
use signup::error::AppError;
use signup::{app, initialize_state, telemetry};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    telemetry::setup_logging();

    let config = match std::env::var("CONFIG_PATH") {
        Ok(path) => Configuration::default().path(PathBuf::from(path)),
        Err(_) => Configuration::default(),
    }
    .read()?;

    let state = initialize_state(config.clone())?;
    let mut router = app(state);

    if config.metrics {
        let handle = telemetry::setup_metrics_recorder()?;
        router = router.route("/metrics", get(move || ready(handle.render())));
    }

    let listener =
        tokio::net::TcpListener::bind((config.address.as_str(), config.port))
            .await?;
    tracing::info!(
        address = %config.address,
        port = config.port,
        version = config.version(),
        "server started"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "cannot listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
