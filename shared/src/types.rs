//! Common types used across the site

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::validation::{validate_latitude, validate_longitude};

/// GPS coordinates in decimal degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: Decimal,
    pub longitude: Decimal,
}

impl GpsCoordinates {
    pub fn new(latitude: Decimal, longitude: Decimal) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Latitude within [-90, 90] and longitude within [-180, 180]
    pub fn is_valid(&self) -> bool {
        validate_latitude(self.latitude).is_ok() && validate_longitude(self.longitude).is_ok()
    }
}
