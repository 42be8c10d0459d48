//! Storefront - Backend
//!
//! Store settings, weekly hours and contact form API for a small
//! multi-location business site.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use config::Config;
use repositories::{ContactRepository, DataStores, StoreRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub stores: Arc<dyn StoreRepository>,
    pub contacts: Arc<dyn ContactRepository>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(data_stores: DataStores, config: Config) -> Self {
        Self {
            stores: data_stores.stores,
            contacts: data_stores.contacts,
            config: Arc::new(config),
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

/// Install the global subscriber; JSON lines in production
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "storefront_server=debug,storefront_backend=debug,tower_http=debug,sqlx=warn".into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Root endpoint
async fn root() -> &'static str {
    "Storefront API v1"
}
