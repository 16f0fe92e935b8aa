use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use cortex::api::{start_portal_server, ApiContext};
use cortex::config::{self, Config};
use cortex::db;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("Cortex starting v{}", config::APP_VERSION);

    let config = Config::from_env();

    if let Err(e) = run(config).await {
        tracing::error!("Fatal: {e}");
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), String> {
    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create data directory: {e}"))?;
    }
    std::fs::create_dir_all(&config.uploads_dir)
        .map_err(|e| format!("Failed to create uploads directory: {e}"))?;

    let conn = db::open_database(&config.db_path)
        .map_err(|e| format!("Failed to open database: {e}"))?;

    let ctx = ApiContext::new(conn, config.uploads_dir.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let mut server = start_portal_server(ctx, addr).await?;

    tracing::info!(addr = %server.addr, "Server running on port {}", server.addr.port());

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("Failed to listen for shutdown signal: {e}"))?;

    tracing::info!("Shutting down");
    server.shutdown();

    Ok(())
}
