//! Models served by the storefront API
//!
//! Re-exports models from the shared crate and adds API response bodies

use serde::Serialize;

pub use shared::models::*;
pub use shared::{HoursRow, LocationView};

/// Admin store picker response
#[derive(Debug, Serialize)]
pub struct StoreListResponse {
    pub stores: Vec<StoreSummary>,
}

/// Public contact page response
#[derive(Debug, Serialize)]
pub struct LocationListResponse {
    pub locations: Vec<LocationView>,
}

/// Hours editor response; `stored` is false when the defaults are shown
#[derive(Debug, Serialize)]
pub struct HoursResponse {
    pub location: String,
    pub stored: bool,
    pub hours: WeekHours,
    pub preview: Vec<HoursRow>,
}
