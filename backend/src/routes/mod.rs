//! Route definitions for the storefront API

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::admin_auth_middleware, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Public location pages and contact form
        .nest("/locations", location_routes())
        // Protected routes - store settings
        .nest("/admin", admin_routes(state))
}

/// Location display routes (public)
fn location_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_locations))
        .route("/:location", get(handlers::get_location))
        .route("/:location/contact", post(handlers::submit_contact))
}

/// Store settings routes (protected)
fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/stores", get(handlers::list_stores))
        .route(
            "/stores/:location",
            get(handlers::get_store).put(handlers::save_store),
        )
        .route(
            "/stores/:location/hours",
            get(handlers::get_hours).put(handlers::save_hours),
        )
        .route_layer(middleware::from_fn_with_state(state, admin_auth_middleware))
}
