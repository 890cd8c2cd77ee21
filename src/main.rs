use std::env;

use leave_engine::api::{AppState, create_router};
use leave_engine::config::ConfigLoader;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_BIND: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_dir =
        env::var("LEAVE_ENGINE_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let bind = env::var("LEAVE_ENGINE_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());

    let config = ConfigLoader::load(&config_dir).inspect_err(|e| {
        error!(config_dir = %config_dir, error = %e, "Failed to load leave policy")
    })?;
    info!(
        policy = %config.policy().metadata().code,
        version = %config.policy().metadata().version,
        "Leave policy loaded"
    );

    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!(address = %bind, "Leave engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
