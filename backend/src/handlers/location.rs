//! Public contact page HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::models::{ContactSubmission, LocationListResponse};
use crate::services::{ContactService, LocationService};
use crate::AppState;

/// Active locations for the contact page
pub async fn list_locations(State(state): State<AppState>) -> impl IntoResponse {
    let service = LocationService::new(state.stores.clone());

    match service.list_locations().await {
        Ok(locations) => {
            (StatusCode::OK, Json(LocationListResponse { locations })).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// One location's contact block
pub async fn get_location(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> impl IntoResponse {
    let service = LocationService::new(state.stores.clone());

    match service.get_location(&location).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Leave a message for a location
pub async fn submit_contact(
    State(state): State<AppState>,
    Path(location): Path<String>,
    Json(input): Json<ContactSubmission>,
) -> impl IntoResponse {
    let service = ContactService::new(state.contacts.clone());

    match service.submit(&location, input).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => e.into_response(),
    }
}
