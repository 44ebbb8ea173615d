use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use delivery_reports::api;
use delivery_reports::config::{Config, LogFormat};
use delivery_reports::error::AppError;
use delivery_reports::state::AppState;
use delivery_reports::store::memory::MemoryStore;
use delivery_reports::store::snapshot::load_snapshot;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = Config::from_env()?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level.clone()))
        .with_target(false);
    match config.log_format {
        LogFormat::Compact => subscriber.compact().init(),
        LogFormat::Json => subscriber.json().init(),
    }

    let store = match &config.seed_file {
        Some(path) => {
            let snapshot = load_snapshot(path).await?;
            info!(
                seed_file = %path.display(),
                couriers = snapshot.couriers.len(),
                kitchen_workers = snapshot.kitchen_workers.len(),
                orders = snapshot.orders.len(),
                "snapshot loaded"
            );
            MemoryStore::from_snapshot(snapshot)
        }
        None => {
            warn!("SEED_FILE not set; serving reports over an empty store");
            MemoryStore::new()
        }
    };

    let app_state = AppState::new(Arc::new(store))
        .with_payout_policy(config.payout_policy)
        .with_request_timeout(config.request_timeout);
    let app = api::rest::router(Arc::new(app_state));

    let bind_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|err| AppError::Internal(format!("failed to bind {bind_addr}: {err}")))?;

    info!(
        http_port = config.http_port,
        payout_policy = %config.payout_policy,
        "http server started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::Internal(format!("server error: {err}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
