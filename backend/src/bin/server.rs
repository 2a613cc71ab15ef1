//! Performance Predictor HTTP Server Binary
//!
//! Loads the trained model artifact once, sets up the HTTP router and
//! starts serving prediction requests.
//!
//! # Usage
//!
//! ```bash
//! # Train a model first
//! cargo run --bin train-model -- --output model.json
//!
//! # Serve it
//! MODEL_PATH=model.json cargo run --bin perf-server
//! ```
//!
//! # Environment Variables
//!
//! - `PREDICTOR_CONFIG`: Path to a TOML config file (default: discover `predictor.toml`)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `MODEL_PATH`: Model artifact path (default: model.json)
//! - `ALLOW_MISSING_MODEL`: Start without a model instead of failing (default: false)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::sync::Arc;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use perf_predictor::artifact::ModelArtifact;
use perf_predictor::config::ServerConfig;
use perf_predictor::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Performance Predictor HTTP Server");

    let config = ServerConfig::load()?;

    let state = match ModelArtifact::load(&config.model.path) {
        Ok(artifact) => {
            info!(
                model_id = %artifact.model_id,
                trained_at = %artifact.trained_at,
                trees = artifact.forest.num_trees(),
                r2 = artifact.metrics.r2,
                "Model loaded from {}",
                config.model.path.display()
            );
            AppState::new(Arc::new(artifact))
        }
        Err(err) if config.model.allow_missing => {
            warn!(error = %err, "Model unavailable, predictions will fail until restart");
            AppState::without_model()
        }
        Err(err) => {
            return Err(anyhow::anyhow!(err).context(format!(
                "failed to load model from {}",
                config.model.path.display()
            )))
        }
    };

    // Create router with all endpoints
    let app = create_router(state);

    let addr = config.bind_address()?;
    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health/", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
