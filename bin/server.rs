// WeSplit - Web Server
// Serves the split calculator as a JSON API

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wesplit::{api, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Optional: wesplit-server --config <path>
    let args: Vec<String> = std::env::args().collect();
    let config_path = match args.iter().position(|a| a == "--config") {
        Some(i) => Some(PathBuf::from(
            args.get(i + 1).context("--config needs a file path")?,
        )),
        None => None,
    };

    let settings = Settings::load(config_path.as_deref())?;
    let addr = settings.listen_addr.clone();

    let app = api::router(api::AppState::new(settings));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Server running on http://{}", addr);
    info!("API: http://{}/api/split?check_amount=100&people=4&tip=2", addr);

    axum::serve(listener, app)
        .await
        .context("Server stopped unexpectedly")?;

    Ok(())
}
