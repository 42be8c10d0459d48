//! Admin store settings HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::models::{StoreListResponse, StoreRecord, WeekHours};
use crate::services::StoreService;
use crate::AppState;

/// List every location for the store picker
pub async fn list_stores(State(state): State<AppState>) -> impl IntoResponse {
    let service = StoreService::new(state.stores.clone());

    match service.list_stores().await {
        Ok(stores) => (StatusCode::OK, Json(StoreListResponse { stores })).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get the full record for one location
pub async fn get_store(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> impl IntoResponse {
    let service = StoreService::new(state.stores.clone());

    match service.get_store(&location).await {
        Ok(store) => (StatusCode::OK, Json(store)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create or replace the record for one location
pub async fn save_store(
    State(state): State<AppState>,
    Path(location): Path<String>,
    Json(record): Json<StoreRecord>,
) -> impl IntoResponse {
    let service = StoreService::new(state.stores.clone());

    match service.save_store(&location, record).await {
        Ok(store) => (StatusCode::OK, Json(store)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get the weekly hours for one location
pub async fn get_hours(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> impl IntoResponse {
    let service = StoreService::new(state.stores.clone());

    match service.get_hours(&location).await {
        Ok(hours) => (StatusCode::OK, Json(hours)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Replace the weekly hours for one location
pub async fn save_hours(
    State(state): State<AppState>,
    Path(location): Path<String>,
    Json(hours): Json<WeekHours>,
) -> impl IntoResponse {
    let service = StoreService::new(state.stores.clone());

    match service.save_hours(&location, hours).await {
        Ok(hours) => (StatusCode::OK, Json(hours)).into_response(),
        Err(e) => e.into_response(),
    }
}
