use std::process::ExitCode;

use barberpro_web::config::{AppConfig, ConfigError};
use barberpro_web::net::api::ApiError;
use barberpro_web::routes;
use barberpro_web::state::AppState;

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Http(#[from] ApiError),
    #[error("failed to bind port {port}: {source}")]
    Bind { port: u16, source: std::io::Error },
    #[error("server failed: {0}")]
    Serve(std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "barberpro-web stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = AppConfig::from_env()?;
    let port = config.port;
    tracing::info!(api_url = %config.api_url, cookie_secure = config.cookie_secure, "configuration loaded");

    let state = AppState::from_config(config)?;
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .map_err(|source| StartupError::Bind { port, source })?;

    tracing::info!(%port, "barberpro-web listening");
    axum::serve(listener, app).await.map_err(StartupError::Serve)
}
