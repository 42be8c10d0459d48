//! Storefront - Backend Server

use std::net::SocketAddr;

use storefront_backend::{create_app, init_tracing, repositories, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    init_tracing(&config);

    tracing::info!("Starting Storefront Server");
    tracing::info!("Environment: {}", config.environment);

    // Migrations only run automatically in development
    let run_migrations = config.environment == "development";
    let data_stores = repositories::connect(&config.data_store, run_migrations).await?;

    if config.admin.api_token.is_empty() {
        tracing::warn!("admin.api_token is empty; store settings routes will refuse every request");
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    // Build application
    let app = create_app(AppState::new(data_stores, config));

    // Start server
    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
